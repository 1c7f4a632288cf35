//! # Inspect Subcommand
//!
//! Prints what the property tree engine resolved for every included
//! property of one resource: lineages, generated-code prefix and
//! namespace, kind, schema type, and whether a change forces
//! replacement. Output is tab-separated by default or one JSON array
//! with `--json`.

use std::fmt;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use propgen_schema::{PropertyKind, Resource, SchemaType};
use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::{load_prepared, SourceArgs};

/// Arguments for `propgen inspect`.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Name of the resource to inspect.
    pub resource: String,

    /// Resource declarations to load. Defaults to `resources` from the
    /// config file.
    #[arg(short = 'r', long = "resource")]
    pub resources: Vec<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Emit JSON instead of tab-separated rows.
    #[arg(long)]
    pub json: bool,
}

/// Resolved view of one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyReport {
    pub lineage: String,
    pub terraform_lineage: String,
    pub prefix: String,
    pub namespace: String,
    pub kind: PropertyKind,
    pub schema_type: SchemaType,
    pub force_new: bool,
}

impl fmt::Display for PropertyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.lineage,
            self.terraform_lineage,
            self.prefix,
            self.namespace,
            self.kind,
            self.schema_type,
            if self.force_new { "force_new" } else { "-" }
        )
    }
}

/// Reports for every included property of a prepared resource, parents
/// before children.
pub fn property_reports(resource: &Resource) -> Vec<PropertyReport> {
    resource
        .included_properties()
        .into_iter()
        .map(|id| PropertyReport {
            lineage: resource.lineage(id),
            terraform_lineage: resource.terraform_lineage(id),
            prefix: resource.prefix(id).to_string(),
            namespace: resource.namespace_property(id),
            kind: resource.node(id).resolved_kind(),
            schema_type: resource.schema_type(id),
            force_new: resource.is_force_new(id),
        })
        .collect()
}

pub fn run_inspect(args: &InspectArgs, config: &GeneratorConfig) -> Result<u8> {
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
    if resource.exclude {
        println!(
            "{} is not available at {}",
            resource.resource_name(),
            args.source.version(config)
        );
        return Ok(1);
    }

    let reports = property_reports(resource);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{report}");
        }
    }
    tracing::info!(
        resource = %resource.resource_name(),
        properties = reports.len(),
        "inspected resource"
    );
    Ok(0)
}
