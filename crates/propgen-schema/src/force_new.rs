//! # Force-New
//!
//! Whether changing a field requires recreating the resource. Immutability
//! is inherited from globally immutable resources down the parent chain,
//! except through fields that have their own update URL.

use propgen_core::PropertyId;

use crate::kind::PropertyKind;
use crate::resource::Resource;

impl Resource {
    /// Whether a change to the node forces the resource to be recreated.
    ///
    /// - Labels on a resource with root labels are never force-new.
    /// - Terraform labels on a resource that cannot be updated are.
    /// - Client-side fields follow only their own `immutable` flag.
    /// - Otherwise a writable field (or an effective-labels field) is
    ///   force-new when it is immutable, or when the resource is immutable,
    ///   the field has no update URL, and its parent is force-new. Labels
    ///   under a flattened parent do not inherit from that parent.
    pub fn is_force_new(&self, id: PropertyId) -> bool {
        let node = self.node(id);

        if node.is_a(PropertyKind::KeyValueLabels) && self.root_labels() {
            return false;
        }
        if node.is_a(PropertyKind::KeyValueTerraformLabels)
            && !self.updatable()
            && !self.root_labels()
        {
            return true;
        }
        if node.client_side {
            return node.immutable;
        }

        let writable = !node.output || node.is_a(PropertyKind::KeyValueEffectiveLabels);
        let inherited = || {
            self.immutable
                && node.update_url.is_empty()
                && match node.parent {
                    None => true,
                    Some(parent) => {
                        self.is_force_new(parent)
                            && !(self.node(parent).flatten_object
                                && node.is_a(PropertyKind::KeyValueLabels))
                    }
                }
        };
        writable && (node.immutable || inherited())
    }
}
