//! # Products
//!
//! A product groups the resources generated from one API and publishes the
//! version catalog every property's version constraints resolve against.
//! Resources hold a shared handle to the product metadata; the product
//! owns the resources.

use std::sync::Arc;

use propgen_core::{PropertyId, Version, VersionCatalog, VersionError, VersionName};
use thiserror::Error;

use crate::error::SchemaError;
use crate::kind::PropertyKind;
use crate::resource::{PrepareError, Resource};

/// Product-level metadata shared by every resource of the product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductMetadata {
    /// Product name, e.g. `Compute`.
    pub name: String,
    /// Namespace used in global property identifiers; defaults to `name`.
    pub api_name: String,
    /// Versions the product is published at.
    pub versions: Vec<Version>,
}

impl ProductMetadata {
    /// Create metadata whose `api_name` equals `name`.
    pub fn new(name: impl Into<String>, versions: Vec<Version>) -> Self {
        let name = name.into();
        Self {
            api_name: name.clone(),
            name,
            versions,
        }
    }

    /// Whether the product publishes `name`.
    pub fn exists_at(&self, name: VersionName) -> bool {
        self.versions.iter().any(|v| v.name == name)
    }
}

impl VersionCatalog for ProductMetadata {
    fn resolve_version(&self, name: &str) -> Result<Version, VersionError> {
        let wanted: VersionName = name.parse()?;
        self.versions
            .iter()
            .find(|v| v.name == wanted)
            .cloned()
            .ok_or_else(|| VersionError::NotDeclared {
                product: self.name.clone(),
                version: name.to_string(),
            })
    }

    fn lowest_version(&self) -> Result<Version, VersionError> {
        self.versions
            .iter()
            .min_by_key(|v| v.name)
            .cloned()
            .ok_or_else(|| VersionError::NoVersions(self.name.clone()))
    }
}

/// Resources that failed to prepare for a version build.
#[derive(Error, Debug)]
#[error("{} of {total} resources in {product} failed:\n{}", .failures.len(), render_failures(.failures))]
pub struct ProductPrepareError {
    /// Product being generated.
    pub product: String,
    /// Number of resources attempted.
    pub total: usize,
    /// One entry per failed resource, in declaration order.
    pub failures: Vec<PrepareError>,
}

fn render_failures(failures: &[PrepareError]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// A product and the resources generated from it.
#[derive(Debug)]
pub struct Product {
    metadata: Arc<ProductMetadata>,
    resources: Vec<Resource>,
}

impl Product {
    /// Create a product with no resources.
    pub fn new(metadata: ProductMetadata) -> Self {
        Self {
            metadata: Arc::new(metadata),
            resources: Vec::new(),
        }
    }

    /// Shared handle to the product metadata, for constructing resources.
    pub fn metadata(&self) -> &Arc<ProductMetadata> {
        &self.metadata
    }

    /// Add a resource built against this product's metadata.
    pub fn add_resource(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Look up a resource by name.
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// The resource a ResourceRef node points at.
    ///
    /// Returns `Ok(None)` when the node is not a ResourceRef.
    ///
    /// # Errors
    ///
    /// `SchemaError::MissingResourceRef` if the product has no resource
    /// with the referenced name.
    pub fn resource_ref(
        &self,
        owner: &Resource,
        id: PropertyId,
    ) -> Result<Option<&Resource>, SchemaError> {
        let node = owner.node(id);
        if !node.is_a(PropertyKind::ResourceRef) {
            return Ok(None);
        }

        self.resource(&node.resource)
            .map(Some)
            .ok_or_else(|| SchemaError::MissingResourceRef {
                product: self.metadata.name.clone(),
                resource: owner.name.clone(),
                lineage: owner.lineage(id),
                target: node.resource.clone(),
            })
    }

    /// The resource type a ResourceRef node points at: the last segment of
    /// the referenced resource's base URL.
    pub fn resource_type(
        &self,
        owner: &Resource,
        id: PropertyId,
    ) -> Result<Option<String>, SchemaError> {
        Ok(self.resource_ref(owner, id)?.map(|target| {
            target
                .base_url
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string()
        }))
    }

    /// Run default resolution, validation, and version filtering on every
    /// resource for the build at `version`.
    ///
    /// Resources whose own minimum version is above `version` are marked
    /// excluded and skipped. With `fail_fast`, stops at the first resource
    /// that fails; otherwise every failure is collected.
    pub fn prepare(
        &mut self,
        version: VersionName,
        fail_fast: bool,
    ) -> Result<(), ProductPrepareError> {
        let product = self.metadata.name.clone();
        let total = self.resources.len();
        let wrap = |failures| ProductPrepareError {
            product: product.clone(),
            total,
            failures,
        };

        let target = self
            .metadata
            .resolve_version(version.as_str())
            .map_err(|e| wrap(vec![PrepareError::Version(e)]))?;

        let mut failures = Vec::new();
        for resource in &mut self.resources {
            if resource.exclude {
                continue;
            }
            match resource.min_version_obj() {
                Ok(min) if !target.satisfies(&min) => {
                    tracing::debug!(
                        resource = %resource.name,
                        min_version = %min,
                        "resource not available at target version, excluding"
                    );
                    resource.exclude = true;
                    continue;
                }
                Ok(_) => {}
                Err(e) => {
                    failures.push(PrepareError::Version(e));
                    if fail_fast {
                        break;
                    }
                    continue;
                }
            }

            if let Err(e) = resource.prepare(&target) {
                failures.push(e);
                if fail_fast {
                    break;
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(wrap(failures))
        }
    }
}
