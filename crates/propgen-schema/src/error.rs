//! # Schema Errors
//!
//! Fatal configuration errors raised while resolving a resource's property
//! tree. Validation rule failures are not reported through these types;
//! they are collected as [`crate::validate::Violation`]s so that every
//! problem in a resource is reported at once.

use propgen_core::{PropgenError, VersionError};
use thiserror::Error;

/// A fatal error in a resource schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A kind name in a declaration is not a known property kind.
    #[error("unknown property type {0:?}")]
    UnknownKind(String),

    /// A NestedObject was queried for its children but declares none.
    #[error("Field '{lineage}' properties are nil! (resource {resource})")]
    MissingProperties {
        /// Resource that owns the node.
        resource: String,
        /// Lineage of the nested object.
        lineage: String,
    },

    /// A ResourceRef names a resource the product does not define.
    #[error("resource reference '{lineage}' in {product}/{resource} targets unknown resource '{target}'")]
    MissingResourceRef {
        /// Product being generated.
        product: String,
        /// Resource holding the reference.
        resource: String,
        /// Lineage of the reference node.
        lineage: String,
        /// Name of the referenced resource.
        target: String,
    },

    /// A version constraint could not be resolved.
    #[error("{lineage} in resource {resource}: {source}")]
    Version {
        /// Resource that owns the node.
        resource: String,
        /// Lineage of the node carrying the constraint.
        lineage: String,
        /// Underlying catalog error.
        #[source]
        source: VersionError,
    },
}

impl From<SchemaError> for PropgenError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::Version { source, .. } => PropgenError::Version(source),
            other => PropgenError::Schema(other.to_string()),
        }
    }
}

/// A default value that cannot be rendered as a generated-code literal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LiteralError {
    /// The value is not an integer, float, boolean, string, or list of strings.
    #[error("unknown go literal type {0}")]
    Unsupported(String),
}

/// Error rendering a custom code template for a property.
#[derive(Error, Debug)]
#[error("template '{template}' for {lineage}: {source}")]
pub struct TemplateError {
    /// Template identifier that failed.
    pub template: String,
    /// Lineage of the property passed as template input.
    pub lineage: String,
    /// Renderer-specific failure.
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

/// Error loading a product or resource declaration.
#[derive(Error, Debug)]
pub enum DeclarationError {
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Read {
        /// Path that failed.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid declaration.
    #[error("invalid declaration '{path}': {source}")]
    Parse {
        /// Path that failed.
        path: String,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
}

impl From<DeclarationError> for PropgenError {
    fn from(err: DeclarationError) -> Self {
        PropgenError::Declaration(err.to_string())
    }
}
