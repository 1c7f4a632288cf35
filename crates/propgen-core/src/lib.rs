//! # propgen-core — Foundational Types for propgen
//!
//! This crate holds the primitives every other propgen crate builds on.
//! It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed version ordering.** `VersionName` is an enum over the four
//!    release channels (`ga < beta < alpha < private`). A version name that
//!    is not in the ordering cannot be constructed, so version comparison
//!    never has an "unknown" case.
//!
//! 2. **One naming convention per direction.** `underscore` produces the
//!    configuration-facing snake case; `camelize` produces the API-facing
//!    and generated-code-facing camel case. Lineage, prefix, and path
//!    resolution all go through these two functions.
//!
//! 3. **Arena identifiers, not pointers.** `PropertyId` indexes a node in
//!    the arena owned by its resource. Parent links are ids, so the tree
//!    has a single owner.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `propgen-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod naming;
pub mod version;

// Re-export primary types for ergonomic imports.
pub use error::{PropgenError, VersionError};
pub use identity::PropertyId;
pub use naming::{camelize, underscore, Case};
pub use version::{Version, VersionCatalog, VersionName};
