//! # Lineage, Prefix, and Namespace Names
//!
//! Names derived from a node's position in the tree. All of them walk
//! `parent` links toward the root, so they are only meaningful after
//! default resolution has wired those links.
//!
//! | Name                    | Example                          |
//! |-------------------------|----------------------------------|
//! | lineage                 | `metadata.foo_bar`               |
//! | configuration lineage   | `metadata.0.foo_bar`             |
//! | snake-case lineage      | `metadata_foo_bar`               |
//! | prefix                  | `ComputeAddressMetadata`         |
//! | namespace name          | `computeAddressMetadataFooBar`   |
//!
//! The prefix is memoized per node on first use. Seeding a prefix with
//! [`Property::set_prefix`](crate::property::Property::set_prefix) before
//! the first query overrides the derived value.

use propgen_core::{camelize, underscore, Case, PropertyId};

use crate::kind::PropertyKind;
use crate::resource::{GenerationTarget, Resource};

impl Resource {
    /// Dotted path of snake-case names from the root to `id`, for
    /// diagnostics.
    pub fn lineage(&self, id: PropertyId) -> String {
        self.join_ancestry(id, ".")
    }

    /// Like [`lineage`](Self::lineage) but joined with `_`.
    pub fn lineage_as_snake_case(&self, id: PropertyId) -> String {
        self.join_ancestry(id, "_")
    }

    fn join_ancestry(&self, id: PropertyId, sep: &str) -> String {
        let mut segments: Vec<String> = self
            .ancestry(id)
            .map(|node| underscore(&self.node(node).name))
            .collect();
        segments.reverse();
        segments.join(sep)
    }

    /// `id` followed by each of its ancestors up to the root.
    pub fn ancestry(&self, id: PropertyId) -> impl Iterator<Item = PropertyId> + '_ {
        std::iter::successors(Some(id), move |current| self.node(*current).parent)
    }

    /// Access path of the field in configuration values, e.g.
    /// `metadata.0.labels`. Flattened ancestors contribute no segment.
    pub fn terraform_lineage(&self, id: PropertyId) -> String {
        let node = self.node(id);
        let own = underscore(&node.name);
        match node.parent {
            Some(parent) if !self.node(parent).flatten_object => {
                format!("{}.0.{own}", self.terraform_lineage(parent))
            }
            _ => own,
        }
    }

    /// The node's name in UpperCamel case.
    pub fn titlelize_property(&self, id: PropertyId) -> String {
        camelize(&self.node(id).name, Case::Upper)
    }

    /// Generated-code prefix for the node, computed once.
    ///
    /// At the root this is the product-qualified resource name, with a
    /// `Nested` marker for nested-query resources generated for the
    /// provider. Below the root, Array and Map parents pass their prefix
    /// through unchanged; a Map grandparent contributes its own name in
    /// place of the value object's; any other parent appends its name.
    pub fn prefix(&self, id: PropertyId) -> &str {
        self.node(id).prefix.get_or_init(|| self.derive_prefix(id))
    }

    fn derive_prefix(&self, id: PropertyId) -> String {
        let Some(parent) = self.node(id).parent else {
            let nested = if self.nested_query.is_some()
                && self.target != GenerationTarget::Conversion
            {
                "Nested"
            } else {
                ""
            };
            return format!("{nested}{}", self.resource_name());
        };

        let parent_node = self.node(parent);
        if parent_node.is_a(PropertyKind::Array) || parent_node.is_a(PropertyKind::Map) {
            return self.prefix(parent).to_string();
        }

        match parent_node.parent {
            Some(grandparent) if self.node(grandparent).is_a(PropertyKind::Map) => format!(
                "{}{}",
                self.prefix(parent),
                self.titlelize_property(grandparent)
            ),
            _ => format!("{}{}", self.prefix(parent), self.titlelize_property(parent)),
        }
    }

    /// Globally unique identifier of the property: the product namespace,
    /// the resource name, then every name from the root to the node.
    pub fn namespace_property(&self, id: PropertyId) -> String {
        let mut chain: Vec<String> = self
            .ancestry(id)
            .map(|node| self.titlelize_property(node))
            .collect();
        chain.reverse();
        format!(
            "{}{}{}",
            camelize(&self.product().api_name, Case::Lower),
            self.name,
            chain.concat()
        )
    }

    /// Namespace segments shared by every property of the product.
    pub fn property_ns_prefix(&self) -> [String; 3] {
        [
            "Google".to_string(),
            camelize(&self.product().name, Case::Upper),
            "Property".to_string(),
        ]
    }
}
