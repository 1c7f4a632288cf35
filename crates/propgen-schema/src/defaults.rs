//! # Default Resolution
//!
//! Fills derived fields on every node, parent before children. Fields that
//! were declared are left alone, so running the pass twice is harmless.
//! This pass also wires `parent` links and fixes each node's resolved kind.
//!
//! Nothing here can fail; structural problems are reported by validation.

use propgen_core::PropertyId;

use crate::kind::PropertyKind;
use crate::resource::Resource;

/// Key expander used for Map nodes that do not declare one.
pub const DEFAULT_KEY_EXPANDER: &str = "tpgresource.ExpandString";

/// Description given to nested objects that do not declare one.
pub const NESTED_OBJECT_DESCRIPTION: &str = "A nested object resource.";

impl Resource {
    /// Resolve defaults for every top-level property and parameter.
    pub fn resolve_defaults(&mut self) {
        tracing::debug!(resource = %self.name, "resolving property defaults");
        for id in self.all_user_properties() {
            self.node_mut(id).parent = None;
            self.resolve_node_defaults(id);
        }
    }

    fn resolve_node_defaults(&mut self, id: PropertyId) {
        let owner = self.name.clone();
        let update_verb = self.update_verb.clone();

        let node = self.node_mut(id);
        node.owner = Some(owner);
        if node.update_verb.is_empty() {
            node.update_verb = update_verb;
        }
        node.resolve_kind();

        match node.resolved_kind() {
            PropertyKind::Array => {
                let name = node.name.clone();
                if let Some(item) = node.item_type {
                    let item_node = self.node_mut(item);
                    item_node.name = name.clone();
                    item_node.parent_name = name;
                    item_node.parent = Some(id);
                    self.resolve_node_defaults(item);
                }
            }
            PropertyKind::Map => {
                if node.key_expander.is_empty() {
                    node.key_expander = DEFAULT_KEY_EXPANDER.to_string();
                }
                let name = node.name.clone();
                if let Some(value) = node.value_type {
                    let value_node = self.node_mut(value);
                    value_node.parent_name = name;
                    value_node.parent = Some(id);
                    self.resolve_node_defaults(value);
                }
            }
            PropertyKind::NestedObject => {
                if node.name.is_empty() {
                    node.name = node.parent_name.clone();
                }
                if node.description.is_empty() {
                    node.description = NESTED_OBJECT_DESCRIPTION.to_string();
                }
                for child in node.properties.clone().unwrap_or_default() {
                    self.node_mut(child).parent = Some(id);
                    self.resolve_node_defaults(child);
                }
            }
            PropertyKind::ResourceRef => {
                if node.name.is_empty() {
                    node.name = node.resource.clone();
                }
                if node.description.is_empty() {
                    node.description = format!("A reference to {} resource", node.resource);
                }
            }
            PropertyKind::Fingerprint => node.output = true,
            _ => {}
        }

        let node = self.node_mut(id);
        if node.api_name.is_empty() {
            node.api_name = node.name.clone();
        }
    }
}
