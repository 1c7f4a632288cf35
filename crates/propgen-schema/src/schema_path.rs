//! # Schema Path Resolution
//!
//! Constraint lists (`conflicts`, `required_with`, ...) are written as
//! configuration paths such as `parent_field.0.child_name`. Fields are
//! renamed and objects flattened over time, so these paths are resolved
//! against the current tree before they are emitted:
//!
//! ```text
//! nested.0.inner      (nested is flattened)   ──▶  inner
//! foo_bar                                     ──▶  foo_bar
//! does_not_exist                              ──▶  (none)
//! ```
//!
//! A path that no longer resolves is not an error. Callers drop it.

use propgen_core::{camelize, underscore, Case, PropertyId};

use crate::resource::Resource;

/// Separator between segments of a configuration path.
pub const INDEX_MARKER: &str = ".0.";

impl Resource {
    /// Resolve a configuration path to the path of the same field in the
    /// current schema, with flattened objects removed.
    ///
    /// Each segment is matched against the lowerCamel node names of the
    /// current candidates; a segment that does not match is retried
    /// verbatim to catch fields renamed at the top level. Returns `None`
    /// when a segment matches nothing or the path resolves to nothing.
    pub fn schema_path(&self, path: &str) -> Option<String> {
        let segments: Vec<&str> = path.split(INDEX_MARKER).collect();
        let mut candidates = self.user_properties();
        let mut tokens: Vec<String> = Vec::with_capacity(segments.len());

        for (i, segment) in segments.iter().enumerate() {
            let Some(id) = self.match_segment(&candidates, segment) else {
                tracing::warn!(
                    resource = %self.name,
                    path,
                    segment,
                    "schema path no longer resolves"
                );
                return None;
            };

            if i + 1 < segments.len() {
                candidates = match self.nested_properties(id) {
                    Ok(next) => next,
                    Err(e) => {
                        tracing::warn!(resource = %self.name, path, error = %e, "malformed nested object in schema path");
                        return None;
                    }
                };
            }

            let node = self.node(id);
            if !node.flatten_object {
                tokens.push(underscore(&node.name));
            }
        }

        match tokens.last() {
            Some(last) if !last.is_empty() => Some(tokens.join(INDEX_MARKER)),
            _ => None,
        }
    }

    fn match_segment(&self, candidates: &[PropertyId], segment: &str) -> Option<PropertyId> {
        let camel = camelize(segment, Case::Lower);
        candidates
            .iter()
            .copied()
            .find(|id| self.node(*id).name == camel)
            .or_else(|| {
                candidates
                    .iter()
                    .copied()
                    .find(|id| self.node(*id).name == segment)
            })
    }

    /// Resolve every path of a constraint list, dropping those that no
    /// longer apply.
    pub fn schema_path_list<S: AsRef<str>>(&self, paths: &[S]) -> Vec<String> {
        paths
            .iter()
            .filter_map(|path| self.schema_path(path.as_ref()))
            .collect()
    }
}
