//! Integration test: load the declarations under `tests/fixtures`, prepare
//! them for ga and beta builds, and check the resolved tree the templates
//! would see.

use std::path::PathBuf;
use std::sync::Arc;

use propgen_core::{PropertyId, VersionName};
use propgen_schema::{
    go_literal, load_product, load_resource, PrepareError, Product, PropertyKind, Resource,
    ViolationRule,
};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load(resources: &[&str]) -> Product {
    let dir = fixtures();
    let mut product = Product::new(load_product(&dir.join("product.yaml")).unwrap());
    for name in resources {
        let resource = load_resource(
            &dir.join(format!("{name}.yaml")),
            Arc::clone(product.metadata()),
        )
        .unwrap();
        product.add_resource(resource);
    }
    product
}

fn find(r: &Resource, lineage: &str) -> PropertyId {
    r.ids()
        .find(|id| r.lineage(*id) == lineage)
        .unwrap_or_else(|| panic!("no property with lineage {lineage}"))
}

#[test]
fn test_address_prepares_for_ga() {
    let mut product = load(&["address", "region"]);
    product.prepare(VersionName::Ga, false).unwrap();
    let r = product.resource("Address").unwrap();

    assert!(r.node(find(r, "ipv6_endpoint_type")).exclude);
    assert!(r.node(find(r, "rules.rules.priority")).exclude);
    assert!(!r.node(find(r, "rules.rules.action")).exclude);
    assert!(r.node(find(r, "label_fingerprint")).output);

    for id in r.ids() {
        assert!(!r.node(id).api_name.is_empty(), "{}", r.lineage(id));
    }
}

#[test]
fn test_address_prepares_for_beta() {
    let mut product = load(&["address", "region"]);
    product.prepare(VersionName::Beta, false).unwrap();
    let r = product.resource("Address").unwrap();

    assert!(!r.node(find(r, "ipv6_endpoint_type")).exclude);
    assert!(!r.node(find(r, "rules.rules.priority")).exclude);
}

#[test]
fn test_labels_companions_added() {
    let mut product = load(&["address", "region"]);
    product.prepare(VersionName::Ga, false).unwrap();
    let r = product.resource("Address").unwrap();

    let terraform = find(r, "terraform_labels");
    let effective = find(r, "effective_labels");
    assert!(r.node(terraform).is_a(PropertyKind::KeyValueTerraformLabels));
    assert!(r.node(effective).is_a(PropertyKind::KeyValueEffectiveLabels));
    assert_eq!(r.node(effective).api_name, "labels");
    assert!(r.node(find(r, "labels")).ignore_write);
}

#[test]
fn test_names_and_paths() {
    let mut product = load(&["address", "region"]);
    product.prepare(VersionName::Ga, false).unwrap();
    let r = product.resource("Address").unwrap();

    let network = find(r, "network_config.network");
    assert_eq!(r.terraform_lineage(network), "network");
    assert_eq!(r.prefix(network), "ComputeAddressNetworkConfig");
    assert_eq!(
        r.namespace_property(network),
        "computeAddressNetworkConfigNetwork"
    );

    let action = find(r, "rules.rules.action");
    // array items take the array's name
    assert_eq!(r.terraform_lineage(action), "rules.0.rules.0.action");
    assert_eq!(r.prefix(action), "ComputeAddressRules");

    let subnetwork = find(r, "network_config.subnetwork");
    assert_eq!(
        r.schema_path_list(r.conflicting(subnetwork)),
        vec!["network".to_string()]
    );
    assert_eq!(r.schema_path("ipv6_endpoint_type"), None, "excluded at ga");
}

#[test]
fn test_force_new() {
    let mut product = load(&["address", "region"]);
    product.prepare(VersionName::Ga, false).unwrap();
    let r = product.resource("Address").unwrap();

    assert!(r.updatable());
    assert!(r.root_labels());
    assert!(r.is_force_new(find(r, "name")));
    assert!(r.is_force_new(find(r, "network_config.network")));
    assert!(!r.is_force_new(find(r, "labels")));
    assert!(!r.is_force_new(find(r, "terraform_labels")));
    assert!(!r.is_force_new(find(r, "effective_labels")));
    assert!(!r.is_force_new(find(r, "label_fingerprint")));
}

#[test]
fn test_resource_ref_and_literals() {
    let mut product = load(&["address", "region"]);
    product.prepare(VersionName::Ga, false).unwrap();
    let r = product.resource("Address").unwrap();

    let region = find(r, "region");
    assert_eq!(
        product.resource_type(r, region).unwrap().as_deref(),
        Some("regions")
    );

    let address_type = r.node(find(r, "address_type"));
    let default = address_type.default_value.as_ref().unwrap();
    assert_eq!(go_literal(default).unwrap(), "\"EXTERNAL\"");
    assert_eq!(
        address_type.enum_values_to_string("\"", true),
        "\"INTERNAL\", \"EXTERNAL\", \"\""
    );
    assert_eq!(
        r.description(find(r, "description")),
        "An optional description of this resource."
    );
}

#[test]
fn test_broken_resource_reports_every_violation() {
    let mut product = load(&["address", "region", "broken"]);
    let err = product.prepare(VersionName::Ga, false).unwrap_err();
    assert_eq!(err.total, 3);
    assert_eq!(err.failures.len(), 1);

    let PrepareError::Invalid(invalid) = &err.failures[0] else {
        panic!("expected validation failure, got {}", err.failures[0]);
    };
    let rules: Vec<ViolationRule> = invalid
        .violations()
        .violations()
        .iter()
        .map(|v| v.rule)
        .collect();
    assert_eq!(
        rules,
        vec![
            ViolationRule::OutputAndRequired,
            ViolationRule::LabelsType,
            ViolationRule::MissingProperties,
            ViolationRule::InvalidValueType,
        ]
    );
    assert!(err.to_string().contains("Compute/Broken"));
}

#[test]
fn test_declarations_from_temp_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("product.yaml");
    std::fs::write(&path, "name: Dns\nversions:\n  - name: ga\n").unwrap();
    let product = load_product(&path).unwrap();
    assert_eq!(product.api_name, "Dns");
    assert!(product.exists_at(VersionName::Ga));
}
