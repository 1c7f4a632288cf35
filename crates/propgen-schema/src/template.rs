//! Custom code templates attached to properties (custom expanders and
//! flatteners). Rendering is done by the caller's template engine; this
//! module only hands it the property.

use propgen_core::PropertyId;

use crate::error::TemplateError;
use crate::resource::Resource;

/// A template engine able to render a named template for one property.
pub trait TemplateRenderer {
    /// Render `template` with the property `id` of `resource` as input.
    fn render(
        &self,
        template: &str,
        resource: &Resource,
        id: PropertyId,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

impl Resource {
    /// Render a custom template for the property. With `append_newline`,
    /// the output is guaranteed to end in a newline.
    pub fn custom_template(
        &self,
        renderer: &dyn TemplateRenderer,
        id: PropertyId,
        template: &str,
        append_newline: bool,
    ) -> Result<String, TemplateError> {
        let mut rendered =
            renderer
                .render(template, self, id)
                .map_err(|source| TemplateError {
                    template: template.to_string(),
                    lineage: self.lineage(id),
                    source,
                })?;
        if append_newline && !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        Ok(rendered)
    }
}
