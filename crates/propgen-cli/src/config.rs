//! # Generator Configuration
//!
//! Optional YAML file naming the product and resource declarations to
//! load and the build to prepare them for:
//!
//! ```yaml
//! product: products/compute/product.yaml
//! resources:
//!   - products/compute/Address.yaml
//!   - products/compute/Region.yaml
//! version: beta
//! target: provider
//! fail_fast: false
//! ```
//!
//! Relative paths are resolved against the directory holding the file.
//! Command-line flags override every value.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use propgen_core::VersionName;
use propgen_schema::GenerationTarget;
use serde::Deserialize;

/// File looked up in the current directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "propgen.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Product declaration.
    pub product: Option<PathBuf>,
    /// Resource declarations, in generation order.
    pub resources: Vec<PathBuf>,
    /// Version to prepare the product for.
    pub version: VersionName,
    pub target: GenerationTarget,
    /// Stop at the first resource with violations.
    pub fail_fast: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            product: None,
            resources: Vec::new(),
            version: VersionName::Ga,
            target: GenerationTarget::Provider,
            fail_fast: false,
        }
    }
}

impl GeneratorConfig {
    /// Load `path`, or `propgen.yaml` from the current directory if it
    /// exists, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let implicit = Path::new(DEFAULT_CONFIG_FILE);
                if implicit.is_file() {
                    Self::from_file(implicit)
                } else {
                    tracing::debug!("no configuration file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse a configuration file and resolve its paths against the
    /// file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let mut config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.product = config.product.map(|p| base.join(p));
        config.resources = config.resources.iter().map(|r| base.join(r)).collect();

        tracing::info!(
            config = %path.display(),
            resources = config.resources.len(),
            version = %config.version,
            "loaded configuration"
        );
        Ok(config)
    }
}
