//! # Error Types
//!
//! Defines the error types shared across propgen. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! Configuration errors are author-facing: every message names the
//! product, resource, or property lineage at fault so the schema author
//! can find the offending declaration without a debugger.

use thiserror::Error;

/// Top-level error type for propgen. Each engine error converts into it,
/// with version failures keeping their structured cause.
#[derive(Error, Debug)]
pub enum PropgenError {
    /// A version name could not be resolved against a product catalog.
    #[error("version error: {0}")]
    Version(#[from] VersionError),

    /// A resource schema violates a structural or naming invariant.
    #[error("schema error: {0}")]
    Schema(String),

    /// A declaration file could not be read or parsed.
    #[error("declaration error: {0}")]
    Declaration(String),
}

/// Error resolving a version name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The name is not one of the ordered release channels.
    #[error("unknown version name {0:?}; expected one of ga, beta, alpha, private")]
    UnknownName(String),

    /// The product does not declare the requested version.
    #[error("API version '{version}' does not exist for product '{product}'")]
    NotDeclared {
        /// Product that was searched.
        product: String,
        /// Version name that was requested.
        version: String,
    },

    /// The product declares no versions at all.
    #[error("product '{0}' declares no versions")]
    NoVersions(String),
}
