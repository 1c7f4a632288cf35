//! # Resolve-Path Subcommand
//!
//! Resolves configuration paths (`parent.0.child` dotted form, as written
//! in conflict and requirement lists) against a prepared resource and
//! prints the path the generated schema uses for each.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use propgen_schema::Resource;

use crate::config::GeneratorConfig;
use crate::{load_prepared, SourceArgs};

/// Printed for paths that match no included field.
const UNRESOLVED: &str = "<none>";

/// Arguments for `propgen resolve-path`.
#[derive(Args, Debug)]
pub struct ResolvePathArgs {
    /// Name of the resource to resolve against.
    pub resource: String,

    /// Paths to resolve.
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Resource declarations to load. Defaults to `resources` from the
    /// config file.
    #[arg(short = 'r', long = "resource")]
    pub resources: Vec<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// `(input, resolved)` pairs in input order.
pub fn resolve_paths<'a>(
    resource: &Resource,
    paths: &'a [String],
) -> Vec<(&'a str, Option<String>)> {
    paths
        .iter()
        .map(|path| (path.as_str(), resource.schema_path(path)))
        .collect()
}

pub fn run_resolve_path(args: &ResolvePathArgs, config: &GeneratorConfig) -> Result<u8> {
    let Some(product) = load_prepared(config, &args.source, &args.resources)? else {
        return Ok(1);
    };
    let Some(resource) = product.resource(&args.resource) else {
        bail!(
            "resource {} not found in product {}",
            args.resource,
            product.metadata().name
        );
    };

    let mut unresolved = 0usize;
    for (path, resolved) in resolve_paths(resource, &args.paths) {
        match resolved {
            Some(resolved) => println!("{path} -> {resolved}"),
            None => {
                unresolved += 1;
                println!("{path} -> {UNRESOLVED}");
            }
        }
    }
    Ok(if unresolved == 0 { 0 } else { 1 })
}
