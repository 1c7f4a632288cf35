//! # propgen-cli — Command-Line Driver for propgen
//!
//! Loads a product and its resource declarations, prepares them for a
//! version build, and reports what the property tree engine resolved.
//!
//! ## Subcommands
//!
//! - `propgen validate`: prepare every resource and report violations.
//! - `propgen inspect`: print resolved names, kinds, and force-new flags
//!   for every included property of one resource.
//! - `propgen resolve-path`: resolve configuration paths against a
//!   resource's current schema.
//!
//! ```bash
//! propgen --config propgen.yaml validate --version beta
//! propgen inspect Address --product product.yaml -r Address.yaml --json
//! propgen resolve-path Address network_config.0.network -r Address.yaml
//! ```
//!
//! A run that finds violations prints them and exits with status 1 before
//! any other output is produced.

pub mod config;
pub mod inspect;
pub mod resolve;
pub mod validate;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use propgen_core::VersionName;
use propgen_schema::{load_product, load_resource, Product};

use crate::config::GeneratorConfig;

/// Options shared by every subcommand that loads a product.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Product declaration. Overrides `product` in the config file.
    #[arg(long)]
    pub product: Option<PathBuf>,

    /// Version to prepare for: ga, beta, alpha, or private.
    #[arg(long)]
    pub version: Option<VersionName>,

    /// Stop at the first resource with violations.
    #[arg(long)]
    pub fail_fast: bool,
}

impl SourceArgs {
    /// Target version: the flag, else the config file's.
    pub fn version(&self, config: &GeneratorConfig) -> VersionName {
        self.version.unwrap_or(config.version)
    }

    pub fn fail_fast(&self, config: &GeneratorConfig) -> bool {
        self.fail_fast || config.fail_fast
    }
}

/// Load the product declaration and the given resources, falling back to
/// the config file for anything not given on the command line.
pub fn load_sources(
    config: &GeneratorConfig,
    product: Option<&Path>,
    resources: &[PathBuf],
) -> Result<Product> {
    let product_path = product
        .map(Path::to_path_buf)
        .or_else(|| config.product.clone())
        .context("no product declaration: pass --product or set `product` in the config file")?;
    let metadata = load_product(&product_path)
        .with_context(|| format!("failed to load product: {}", product_path.display()))?;
    let mut product = Product::new(metadata);

    let paths = if resources.is_empty() {
        config.resources.as_slice()
    } else {
        resources
    };
    if paths.is_empty() {
        tracing::warn!(product = %product.metadata().name, "no resource declarations given");
    }

    for path in paths {
        let mut resource = load_resource(path, Arc::clone(product.metadata()))
            .with_context(|| format!("failed to load resource: {}", path.display()))?;
        resource.target = config.target;
        product.add_resource(resource);
    }
    Ok(product)
}

/// Load and prepare a product. Violations are printed and yield `Ok(None)`.
pub fn load_prepared(
    config: &GeneratorConfig,
    source: &SourceArgs,
    resources: &[PathBuf],
) -> Result<Option<Product>> {
    let mut product = load_sources(config, source.product.as_deref(), resources)?;
    let version = source.version(config);
    match product.prepare(version, source.fail_fast(config)) {
        Ok(()) => Ok(Some(product)),
        Err(e) => {
            println!("{e}");
            tracing::error!(
                product = %e.product,
                failed = e.failures.len(),
                version = %version,
                "preparation failed"
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::path::{Path, PathBuf};

    pub(crate) const PRODUCT: &str = "\
name: Compute
versions:
  - name: ga
    base_url: https://compute.googleapis.com/compute/v1/
  - name: beta
    base_url: https://compute.googleapis.com/compute/beta/
";

    pub(crate) const ADDRESS: &str = "\
name: Address
base_url: projects/{{project}}/regions/{{region}}/addresses
properties:
  - name: name
    type: String
    required: true
  - name: networkConfig
    type: NestedObject
    flatten_object: true
    properties:
      - name: network
        type: String
  - name: preview
    type: String
    min_version: beta
";

    pub(crate) const BROKEN: &str = "\
name: Broken
properties:
  - name: state
    type: String
    output: true
    required: true
";

    /// Write `files` into `dir` and return their paths in order.
    pub(crate) fn write(dir: &Path, files: &[(&str, &str)]) -> Vec<PathBuf> {
        files
            .iter()
            .map(|(name, content)| {
                let path = dir.join(name);
                std::fs::write(&path, content).unwrap();
                path
            })
            .collect()
    }
}
