//! # Version Catalog
//!
//! Products publish their API at one or more release channels. Properties
//! and resources declare the lowest channel they exist in (`min_version`)
//! or the only channel they exist in (`exact_version`).
//!
//! ## Ordering
//!
//! ```text
//! ga < beta < alpha < private
//! ```
//!
//! A build for a given channel includes everything whose minimum channel
//! is at or below it. The ordering is closed: names outside it are
//! rejected when parsed.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VersionError;

/// A release channel name, ordered from most to least stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionName {
    /// Generally available.
    Ga,
    /// Public preview.
    Beta,
    /// Early access.
    Alpha,
    /// Internal only.
    Private,
}

impl VersionName {
    /// Returns all channel names in ascending order.
    pub fn all() -> &'static [VersionName] {
        &[Self::Ga, Self::Beta, Self::Alpha, Self::Private]
    }

    /// Returns the lowercase identifier used in declarations.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ga => "ga",
            Self::Beta => "beta",
            Self::Alpha => "alpha",
            Self::Private => "private",
        }
    }
}

impl std::fmt::Display for VersionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionName {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ga" => Ok(Self::Ga),
            "beta" => Ok(Self::Beta),
            "alpha" => Ok(Self::Alpha),
            "private" => Ok(Self::Private),
            other => Err(VersionError::UnknownName(other.to_string())),
        }
    }
}

/// A version a product is published at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Release channel.
    pub name: VersionName,
    /// Base URL of the API at this channel.
    #[serde(default)]
    pub base_url: String,
}

impl Version {
    /// Create a version with the given channel and base URL.
    pub fn new(name: VersionName, base_url: impl Into<String>) -> Self {
        Self {
            name,
            base_url: base_url.into(),
        }
    }

    /// Compare channel order. `Less` means `self` is the more stable channel.
    pub fn compare(&self, other: &Version) -> Ordering {
        self.name.cmp(&other.name)
    }

    /// Whether a build at this version includes something whose minimum
    /// version is `min`.
    pub fn satisfies(&self, min: &Version) -> bool {
        self.compare(min) != Ordering::Less
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name.as_str())
    }
}

/// Resolves version names declared on properties and resources against
/// the versions a product actually publishes.
pub trait VersionCatalog {
    /// Look up a declared version by name.
    ///
    /// # Errors
    ///
    /// `VersionError::UnknownName` if `name` is not an ordered channel;
    /// `VersionError::NotDeclared` if the product does not publish it.
    fn resolve_version(&self, name: &str) -> Result<Version, VersionError>;

    /// The most stable version the product publishes.
    fn lowest_version(&self) -> Result<Version, VersionError>;
}
