//! # propgen-schema — Property Tree Engine
//!
//! Turns the declared field tree of an API resource into the resolved,
//! annotated tree that code-emission templates consume.
//!
//! ## Passes
//!
//! | Pass                 | Entry point                              | Mutates |
//! |----------------------|------------------------------------------|---------|
//! | Labels companions    | [`Resource::add_labels_related_fields`]  | adds nodes |
//! | Default resolution   | [`Resource::resolve_defaults`]           | yes     |
//! | Validation           | [`Resource::validate`]                   | no      |
//! | Version filtering    | [`Resource::exclude_if_not_in_version`]  | `exclude` only |
//! | Naming and paths     | [`Resource::lineage`], [`Resource::prefix`], [`Resource::schema_path`], ... | prefix cache only |
//!
//! [`Resource::prepare`] runs the first four in order;
//! [`Product::prepare`] runs them for every resource of a product.
//!
//! ## Key Design Principles
//!
//! 1. **One owner per tree.** A [`Resource`] owns every node in an arena.
//!    Parent, child, item, and value links are [`PropertyId`]s, so there
//!    are no reference cycles and no shared mutable state.
//!
//! 2. **Kinds are a closed enum.** [`PropertyKind`] is matched
//!    exhaustively. A provider override (`new_type`) is folded into the
//!    resolved kind once, during default resolution.
//!
//! 3. **All violations at once.** Validation collects every
//!    [`Violation`] in a resource before failing, so an author fixes a
//!    schema in one pass.
//!
//! 4. **Misses are not errors.** A constraint path that no longer
//!    resolves yields `None`; structural problems yield [`SchemaError`].
//!
//! ## Crate Policy
//!
//! - Depends only on `propgen-core` internally.
//! - No `unsafe` code.
//! - Nodes are never removed from the arena; consumers check `exclude`.
//!
//! [`PropertyId`]: propgen_core::PropertyId

pub mod declaration;
pub mod defaults;
pub mod error;
pub mod force_new;
pub mod kind;
pub mod lineage;
pub mod literal;
pub mod product;
pub mod property;
pub mod query;
pub mod resource;
pub mod schema_path;
pub mod template;
pub mod validate;
pub mod version_filter;

#[cfg(test)]
mod testutil;

pub use declaration::{load_product, load_resource, parse_product, parse_resource};
pub use error::{DeclarationError, LiteralError, SchemaError, TemplateError};
pub use kind::{PropertyKind, SchemaType};
pub use literal::go_literal;
pub use product::{Product, ProductMetadata, ProductPrepareError};
pub use property::{Property, PropertyBuilder, Validation};
pub use resource::{GenerationTarget, NestedQuery, PrepareError, Resource};
pub use template::TemplateRenderer;
pub use validate::{PropertyValidationError, ValidationViolations, Violation, ViolationRule};
