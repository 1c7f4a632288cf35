//! # Validate Subcommand
//!
//! Prepares every resource of a product for one version build and reports
//! the outcome. Exit status 0 when every resource prepared cleanly, 1 when
//! any resource had violations.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::config::GeneratorConfig;
use crate::{load_prepared, SourceArgs};

/// Arguments for `propgen validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Resource declarations. Defaults to `resources` from the config file.
    pub resources: Vec<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn run_validate(args: &ValidateArgs, config: &GeneratorConfig) -> Result<u8> {
    let Some(product) = load_prepared(config, &args.source, &args.resources)? else {
        return Ok(1);
    };

    let version = args.source.version(config);
    let included = product.resources().iter().filter(|r| !r.exclude).count();
    let excluded = product.resources().len() - included;
    println!(
        "OK: {included} resources in {} valid for {version}",
        product.metadata().name
    );
    if excluded > 0 {
        println!("    {excluded} not available at {version}");
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{write, ADDRESS, BROKEN, PRODUCT};
    use propgen_core::VersionName;

    fn args(paths: &[PathBuf], version: Option<VersionName>) -> ValidateArgs {
        ValidateArgs {
            resources: paths[1..].to_vec(),
            source: SourceArgs {
                product: Some(paths[0].clone()),
                version,
                fail_fast: false,
            },
        }
    }

    #[test]
    fn valid_resources_exit_zero() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write(dir.path(), &[("product.yaml", PRODUCT), ("address.yaml", ADDRESS)]);
        let code = run_validate(&args(&paths, None), &GeneratorConfig::default()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn violations_exit_one() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write(
            dir.path(),
            &[
                ("product.yaml", PRODUCT),
                ("address.yaml", ADDRESS),
                ("broken.yaml", BROKEN),
            ],
        );
        let code =
            run_validate(&args(&paths, Some(VersionName::Beta)), &GeneratorConfig::default())
                .unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn unknown_product_version_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write(dir.path(), &[("product.yaml", PRODUCT), ("address.yaml", ADDRESS)]);
        let code =
            run_validate(&args(&paths, Some(VersionName::Alpha)), &GeneratorConfig::default())
                .unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn missing_resource_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = write(dir.path(), &[("product.yaml", PRODUCT)]);
        paths.push(dir.path().join("missing.yaml"));
        let err = run_validate(&args(&paths, None), &GeneratorConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load resource"));
    }
}
