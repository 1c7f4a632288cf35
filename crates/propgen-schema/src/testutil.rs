//! Fixtures shared by the unit tests of this crate.

use std::sync::Arc;

use propgen_core::{Version, VersionName};

use crate::product::{Product, ProductMetadata};
use crate::resource::Resource;

/// `Compute`, published at ga, beta, and alpha.
pub(crate) fn catalog() -> ProductMetadata {
    named_catalog("Compute")
}

fn named_catalog(name: &str) -> ProductMetadata {
    ProductMetadata::new(
        name,
        vec![
            Version::new(VersionName::Ga, "https://example.googleapis.com/v1/"),
            Version::new(VersionName::Beta, "https://example.googleapis.com/v1beta/"),
            Version::new(VersionName::Alpha, "https://example.googleapis.com/v1alpha/"),
        ],
    )
}

/// An empty product over [`catalog`].
pub(crate) fn product() -> Product {
    Product::new(catalog())
}

/// An empty resource of the `Compute` product.
pub(crate) fn resource(name: &str) -> Resource {
    Resource::new(name, Arc::new(catalog()))
}

/// An empty resource of another product with the same versions.
pub(crate) fn resource_in(product: &str, name: &str) -> Resource {
    Resource::new(name, Arc::new(named_catalog(product)))
}
