//! # Resources
//!
//! A `Resource` owns the arena holding every property node of its field
//! tree, plus the resource-level metadata the property passes consult
//! (update verb, immutability, minimum version, nested-query marker).
//!
//! ## Lifecycle
//!
//! ```text
//! declared ──▶ add_labels_related_fields ──▶ resolve_defaults ──▶ validate
//!                                                                    │
//!                                                                    ▼
//!          lineage / prefix / schema_path queries ◀── exclude_if_not_in_version
//! ```
//!
//! [`Resource::prepare`] runs these passes in order. Queries are
//! read-only apart from the per-node prefix cache.

use std::sync::Arc;

use propgen_core::{PropertyId, Version, VersionCatalog, VersionError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::SchemaError;
use crate::kind::PropertyKind;
use crate::product::ProductMetadata;
use crate::property::{Property, PropertyBuilder};
use crate::validate::PropertyValidationError;

/// Which generator the resource is being emitted for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationTarget {
    /// The provider itself.
    #[default]
    Provider,
    /// The resource-conversion library, which does not namespace nested
    /// query resources.
    Conversion,
}

/// Marks a resource whose API object is nested inside a parent object's
/// list and must be located by key on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedQuery {
    /// Path of keys from the parent object to the list.
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub is_list_of_ids: bool,
    #[serde(default)]
    pub modify_by_patch: bool,
}

/// Failure of [`Resource::prepare`].
#[derive(Error, Debug)]
pub enum PrepareError {
    /// One or more validation rules failed.
    #[error(transparent)]
    Invalid(#[from] PropertyValidationError),

    /// A version constraint could not be resolved.
    #[error("{0}")]
    Version(#[from] VersionError),

    /// The schema is structurally unusable.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// An API resource and its property tree.
#[derive(Debug, Clone)]
pub struct Resource {
    pub name: String,
    pub base_url: String,
    pub min_version: String,
    /// Verb inherited by properties that do not set their own.
    pub update_verb: String,
    /// Whether every field forces recreation unless it has its own update URL.
    pub immutable: bool,
    pub id_format: String,
    pub self_link: String,
    pub nested_query: Option<NestedQuery>,
    pub exclude: bool,
    pub target: GenerationTarget,
    product: Arc<ProductMetadata>,
    nodes: Vec<Property>,
    properties: Vec<PropertyId>,
    parameters: Vec<PropertyId>,
}

impl Resource {
    /// Create an empty resource of `product` with the default update verb.
    pub fn new(name: impl Into<String>, product: Arc<ProductMetadata>) -> Self {
        Self {
            name: name.into(),
            base_url: String::new(),
            min_version: String::new(),
            update_verb: "PUT".to_string(),
            immutable: false,
            id_format: String::new(),
            self_link: String::new(),
            nested_query: None,
            exclude: false,
            target: GenerationTarget::default(),
            product,
            nodes: Vec::new(),
            properties: Vec::new(),
            parameters: Vec::new(),
        }
    }

    pub fn product(&self) -> &ProductMetadata {
        &self.product
    }

    /// Product-qualified name used as the root of generated-code prefixes.
    pub fn resource_name(&self) -> String {
        format!("{}{}", self.product.name, self.name)
    }

    // ─── Arena ──────────────────────────────────────────────────────

    /// The node behind `id`.
    ///
    /// # Panics
    ///
    /// If `id` was not issued by this resource.
    pub fn node(&self, id: PropertyId) -> &Property {
        &self.nodes[id.index()]
    }

    /// Mutable access to the node behind `id`.
    pub fn node_mut(&mut self, id: PropertyId) -> &mut Property {
        &mut self.nodes[id.index()]
    }

    /// Every node in the arena, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = PropertyId> + '_ {
        (0..self.nodes.len()).map(PropertyId)
    }

    /// Place a node in the arena without attaching it anywhere.
    pub fn insert(&mut self, property: Property) -> PropertyId {
        let id = PropertyId(self.nodes.len());
        self.nodes.push(property);
        id
    }

    /// Add a top-level property.
    pub fn add_property(&mut self, property: Property) -> PropertyId {
        let id = self.insert(property);
        self.properties.push(id);
        id
    }

    /// Add a top-level URL parameter.
    pub fn add_parameter(&mut self, property: Property) -> PropertyId {
        let id = self.insert(property);
        self.parameters.push(id);
        id
    }

    /// Append a child to a NestedObject, creating its property list if
    /// none was declared.
    pub fn add_child(&mut self, parent: PropertyId, child: Property) -> PropertyId {
        let id = self.insert(child);
        self.node_mut(parent)
            .properties
            .get_or_insert_with(Vec::new)
            .push(id);
        id
    }

    /// Set the item type of an Array.
    pub fn set_item_type(&mut self, array: PropertyId, item: Property) -> PropertyId {
        let id = self.insert(item);
        self.node_mut(array).item_type = Some(id);
        id
    }

    /// Set the value type of a Map.
    pub fn set_value_type(&mut self, map: PropertyId, value: Property) -> PropertyId {
        let id = self.insert(value);
        self.node_mut(map).value_type = Some(id);
        id
    }

    // ─── Top-level views ────────────────────────────────────────────

    /// Declared top-level properties, excluded ones included.
    pub fn properties(&self) -> &[PropertyId] {
        &self.properties
    }

    /// Declared URL parameters, excluded ones included.
    pub fn parameters(&self) -> &[PropertyId] {
        &self.parameters
    }

    /// Top-level properties followed by parameters, excluded ones included.
    pub fn all_user_properties(&self) -> Vec<PropertyId> {
        self.properties
            .iter()
            .chain(self.parameters.iter())
            .copied()
            .collect()
    }

    /// Top-level properties and parameters that are not excluded.
    pub fn user_properties(&self) -> Vec<PropertyId> {
        self.all_user_properties()
            .into_iter()
            .filter(|id| !self.node(*id).exclude)
            .collect()
    }

    /// Top-level user properties with flattened objects replaced by their
    /// own (recursively collapsed) children.
    pub fn root_properties(&self) -> Result<Vec<PropertyId>, SchemaError> {
        let mut props = Vec::new();
        for id in self.user_properties() {
            if self.node(id).flatten_object {
                props.extend(self.root_properties_of(id)?);
            } else {
                props.push(id);
            }
        }
        Ok(props)
    }

    /// Whether a top-level property or parameter is the resource's labels.
    pub fn root_labels(&self) -> bool {
        self.all_user_properties()
            .iter()
            .any(|id| self.node(*id).is_a(PropertyKind::KeyValueLabels))
    }

    /// Whether any field can be changed without recreating the resource.
    pub fn updatable(&self) -> bool {
        !self.immutable || self.nodes.iter().any(|p| !p.update_url.is_empty())
    }

    /// The lowest version the resource exists at: its own `min_version`,
    /// else the product's most stable version.
    pub fn min_version_obj(&self) -> Result<Version, VersionError> {
        if self.min_version.is_empty() {
            self.product.lowest_version()
        } else {
            self.product.resolve_version(&self.min_version)
        }
    }

    /// `base_url/{{name}}` unless an explicit self link is declared.
    pub fn self_link_uri(&self) -> String {
        if self.self_link.is_empty() {
            format!("{}/{{{{name}}}}", self.base_url)
        } else {
            self.self_link.clone()
        }
    }

    /// The resource id template; the self link when none is declared.
    pub fn id_format(&self) -> String {
        if self.id_format.is_empty() {
            self.self_link_uri()
        } else {
            self.id_format.clone()
        }
    }

    // ─── Synthetic fields ───────────────────────────────────────────

    /// Add the computed companions of every labels and annotations field:
    /// `terraformLabels` and `effectiveLabels` next to a KeyValueLabels
    /// field, `effectiveAnnotations` next to a KeyValueAnnotations field.
    ///
    /// The user-facing field stops being written to the API (the effective
    /// field is written instead). Provider kind overrides are folded in
    /// first, so a `new_type` of KeyValueLabels counts. Must run before
    /// default resolution; a second call adds nothing.
    pub fn add_labels_related_fields(&mut self) {
        for node in &mut self.nodes {
            node.resolve_kind();
        }
        let top = self.properties.clone();
        self.properties = self.labels_related_fields(top, None);
    }

    fn labels_related_fields(
        &mut self,
        mut props: Vec<PropertyId>,
        parent: Option<PropertyId>,
    ) -> Vec<PropertyId> {
        let existing: Vec<String> = props.iter().map(|id| self.node(*id).name.clone()).collect();
        let mut added = Vec::new();

        for id in props.clone() {
            let node = self.node(id);
            if node.is_a(PropertyKind::KeyValueLabels) {
                let labels = node.clone();
                let terraform_immutable = parent.is_some() && labels.immutable;

                if !existing.iter().any(|n| n == "terraformLabels") {
                    let terraform = build_companion("labels", "terraform", &labels)
                        .kind(PropertyKind::KeyValueTerraformLabels)
                        .description(
                            "The combination of labels configured directly on the resource\n \
                             and default labels configured on the provider.",
                        )
                        .ignore_write(true)
                        .immutable(terraform_immutable)
                        .build();
                    added.push(terraform);
                }
                if !existing.iter().any(|n| n == "effectiveLabels") {
                    added.push(effective_field("labels", &labels).build());
                }

                let labels = self.node_mut(id);
                labels.ignore_write = true;
                if parent.is_none() {
                    labels.immutable = false;
                }
                tracing::trace!(resource = %self.name, "added labels companions");
            } else if node.is_a(PropertyKind::KeyValueAnnotations) {
                let annotations = node.clone();
                if !existing.iter().any(|n| n == "effectiveAnnotations") {
                    added.push(effective_field("annotations", &annotations).build());
                }
                let annotations = self.node_mut(id);
                annotations.ignore_write = true;
                if parent.is_none() {
                    annotations.immutable = false;
                }
            } else if node.is_a(PropertyKind::NestedObject) {
                let children = node.properties.clone().unwrap_or_default();
                if !children.is_empty() {
                    let children = self.labels_related_fields(children, Some(id));
                    self.node_mut(id).properties = Some(children);
                }
            }
        }

        for property in added {
            props.push(self.insert(property));
        }
        props
    }

    // ─── Pipeline ───────────────────────────────────────────────────

    /// Add labels companions, resolve defaults, validate, and apply
    /// version filtering for a build at `version`.
    ///
    /// # Errors
    ///
    /// `PrepareError::Invalid` with every violation found, or
    /// `PrepareError::Schema` if a version constraint is unknown.
    pub fn prepare(&mut self, version: &Version) -> Result<(), PrepareError> {
        self.add_labels_related_fields();
        self.resolve_defaults();
        self.validate()?;
        self.exclude_if_not_in_version(version)?;
        Ok(())
    }
}

fn build_companion(field: &str, prefix: &str, source: &Property) -> PropertyBuilder {
    let mut title = field.to_string();
    if let Some(first) = title.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    PropertyBuilder::new(format!("{prefix}{title}"), field)
        .output(true)
        .min_version(source.min_version.clone())
        .update_verb(source.update_verb.clone())
        .update_url(source.update_url.clone())
}

fn effective_field(field: &str, source: &Property) -> PropertyBuilder {
    build_companion(field, "effective", source)
        .kind(PropertyKind::KeyValueEffectiveLabels)
        .description(format!(
            "All of {field} (key/value pairs) present on the resource in GCP, \
             including the {field} configured through Terraform, other clients and services."
        ))
        .immutable(source.immutable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{catalog, resource};
    use propgen_core::VersionName;

    #[test]
    fn test_resource_name_is_product_qualified() {
        let r = resource("Address");
        assert_eq!(r.resource_name(), "ComputeAddress");
    }

    #[test]
    fn test_user_properties_skip_excluded_and_include_parameters() {
        let mut r = resource("Address");
        let a = r.add_property(Property::new("name", PropertyKind::String));
        let mut hidden = Property::new("hidden", PropertyKind::String);
        hidden.exclude = true;
        r.add_property(hidden);
        let region = r.add_parameter(Property::new("region", PropertyKind::String));
        assert_eq!(r.all_user_properties().len(), 3);
        assert_eq!(r.user_properties(), vec![a, region]);
    }

    #[test]
    fn test_root_properties_collapse_flattened_objects() {
        let mut r = resource("Address");
        let first = r.add_property(Property::new("fooBar", PropertyKind::String));
        let mut nested = Property::new("nested", PropertyKind::NestedObject);
        nested.flatten_object = true;
        let nested = r.add_property(nested);
        let inner = r.add_child(nested, Property::new("inner", PropertyKind::String));
        assert_eq!(r.root_properties().unwrap(), vec![first, inner]);
    }

    #[test]
    fn test_root_labels_and_updatable() {
        let mut r = resource("Address");
        assert!(!r.root_labels());
        assert!(r.updatable());
        r.immutable = true;
        assert!(!r.updatable());
        r.add_property(Property::new("labels", PropertyKind::KeyValueLabels));
        assert!(r.root_labels());
        let mut p = Property::new("description", PropertyKind::String);
        p.update_url = "projects/{{project}}/addresses/{{name}}/setDescription".into();
        r.add_property(p);
        assert!(r.updatable());
    }

    #[test]
    fn test_min_version_obj_defaults_to_lowest() {
        let mut r = resource("Address");
        assert_eq!(r.min_version_obj().unwrap().name, VersionName::Ga);
        r.min_version = "beta".into();
        assert_eq!(r.min_version_obj().unwrap().name, VersionName::Beta);
        r.min_version = "gamma".into();
        assert!(r.min_version_obj().is_err());
    }

    #[test]
    fn test_id_format_falls_back_to_self_link() {
        let mut r = resource("Address");
        r.base_url = "projects/{{project}}/regions/{{region}}/addresses".into();
        assert_eq!(
            r.id_format(),
            "projects/{{project}}/regions/{{region}}/addresses/{{name}}"
        );
        r.id_format = "{{project}}/{{name}}".into();
        assert_eq!(r.id_format(), "{{project}}/{{name}}");
    }

    #[test]
    fn test_add_labels_related_fields() {
        let mut r = resource("Address");
        let mut labels = Property::new("labels", PropertyKind::KeyValueLabels);
        labels.immutable = true;
        labels.min_version = "beta".into();
        let labels = r.add_property(labels);
        r.add_property(Property::new("annotations", PropertyKind::KeyValueAnnotations));

        r.add_labels_related_fields();
        let names: Vec<&str> = r
            .properties()
            .iter()
            .map(|id| r.node(*id).name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "labels",
                "annotations",
                "terraformLabels",
                "effectiveLabels",
                "effectiveAnnotations"
            ]
        );

        let l = r.node(labels);
        assert!(l.ignore_write);
        assert!(!l.immutable, "top-level labels are never immutable");

        let effective = r.node(r.properties()[3]);
        assert!(effective.is_a(PropertyKind::KeyValueEffectiveLabels));
        assert!(effective.output);
        assert_eq!(effective.api_name, "labels");
        assert_eq!(effective.min_version, "beta");

        let terraform = r.node(r.properties()[2]);
        assert!(terraform.is_a(PropertyKind::KeyValueTerraformLabels));
        assert!(terraform.ignore_write);
        assert!(!terraform.immutable);

        r.add_labels_related_fields();
        assert_eq!(r.properties().len(), 5, "second call adds nothing");
    }

    #[test]
    fn test_add_labels_related_fields_nested() {
        let mut r = resource("Service");
        let metadata = r.add_property(Property::new("metadata", PropertyKind::NestedObject));
        let mut labels = Property::new("labels", PropertyKind::KeyValueLabels);
        labels.immutable = true;
        r.add_child(metadata, labels);

        r.add_labels_related_fields();
        let children = r.node(metadata).properties.clone().unwrap();
        assert_eq!(children.len(), 3);
        let terraform = r.node(children[1]);
        assert_eq!(terraform.name, "terraformLabels");
        assert!(terraform.immutable, "nested terraform labels keep immutability");
        assert!(r.node(children[0]).immutable);
    }

    #[test]
    fn test_prepare_runs_all_passes() {
        let mut r = resource("Address");
        let mut beta_only = Property::new("preview", PropertyKind::String);
        beta_only.min_version = "beta".into();
        let beta_only = r.add_property(beta_only);
        let name = r.add_property(Property::new("name", PropertyKind::String));

        let ga = catalog().resolve_version("ga").unwrap();
        r.prepare(&ga).unwrap();
        assert_eq!(r.node(name).api_name, "name");
        assert!(r.node(beta_only).exclude);
        assert!(!r.node(name).exclude);
    }

    #[test]
    fn test_labels_fields_follow_kind_override() {
        let mut r = resource("Address");
        let mut labels = Property::new("labels", PropertyKind::KeyValuePairs);
        labels.new_type = Some(PropertyKind::KeyValueLabels);
        let labels = r.add_property(labels);

        let ga = catalog().resolve_version("ga").unwrap();
        r.prepare(&ga).unwrap();

        let names: Vec<&str> = r
            .properties()
            .iter()
            .map(|id| r.node(*id).name.as_str())
            .collect();
        assert_eq!(names, vec!["labels", "terraformLabels", "effectiveLabels"]);
        assert!(r.node(labels).ignore_write);
        assert!(r.root_labels());
    }
}
