//! # Version Filtering
//!
//! Marks nodes excluded when the version being generated does not satisfy
//! their version constraint. An exact version constraint is checked first;
//! the minimum version (the node's own, or the resource's when unset) is
//! checked afterwards, so a node must pass both.
//!
//! Filtering never clears `exclude` and always descends into children,
//! even below an excluded node.

use std::cmp::Ordering;

use propgen_core::{PropertyId, Version, VersionCatalog};

use crate::error::SchemaError;
use crate::kind::PropertyKind;
use crate::resource::Resource;

impl Resource {
    /// The lowest version the node exists at: its own `min_version`, else
    /// the resource's.
    ///
    /// # Errors
    ///
    /// `SchemaError::Version` if the constraint names an unknown or
    /// undeclared version.
    pub fn property_min_version(&self, id: PropertyId) -> Result<Version, SchemaError> {
        let node = self.node(id);
        let resolved = if node.min_version.is_empty() {
            self.min_version_obj()
        } else {
            self.product().resolve_version(&node.min_version)
        };
        resolved.map_err(|source| SchemaError::Version {
            resource: self.name.clone(),
            lineage: self.lineage(id),
            source,
        })
    }

    /// The only version the node exists at, if it declares one.
    pub fn property_exact_version(&self, id: PropertyId) -> Result<Option<Version>, SchemaError> {
        let node = self.node(id);
        if node.exact_version.is_empty() {
            return Ok(None);
        }
        self.product()
            .resolve_version(&node.exact_version)
            .map(Some)
            .map_err(|source| SchemaError::Version {
                resource: self.name.clone(),
                lineage: self.lineage(id),
                source,
            })
    }

    /// Exclude every node not available at `version`.
    pub fn exclude_if_not_in_version(&mut self, version: &Version) -> Result<(), SchemaError> {
        tracing::debug!(resource = %self.name, version = %version, "filtering properties by version");
        for id in self.all_user_properties() {
            self.exclude_node_if_not_in_version(id, version)?;
        }
        Ok(())
    }

    fn exclude_node_if_not_in_version(
        &mut self,
        id: PropertyId,
        version: &Version,
    ) -> Result<(), SchemaError> {
        if !self.node(id).exclude {
            let mut exclude = match self.property_exact_version(id)? {
                Some(exact) => exact.compare(version) != Ordering::Equal,
                None => false,
            };
            if !exclude {
                exclude = !version.satisfies(&self.property_min_version(id)?);
            }
            if exclude {
                tracing::trace!(
                    resource = %self.name,
                    lineage = %self.lineage(id),
                    version = %version,
                    "excluding property"
                );
                self.node_mut(id).exclude = true;
            }
        }

        let node = self.node(id);
        let next: Vec<PropertyId> = match node.resolved_kind() {
            PropertyKind::NestedObject => node.properties.clone().unwrap_or_default(),
            PropertyKind::Array => node
                .item_type
                .filter(|item| self.node(*item).is_a(PropertyKind::NestedObject))
                .into_iter()
                .collect(),
            PropertyKind::Map => node.value_type.into_iter().collect(),
            _ => Vec::new(),
        };
        for child in next {
            self.exclude_node_if_not_in_version(child, version)?;
        }
        Ok(())
    }
}
