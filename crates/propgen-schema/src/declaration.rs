//! # Declarations
//!
//! YAML shapes of product and resource declarations, and their conversion
//! into [`ProductMetadata`] and arena-backed [`Resource`]s.
//!
//! A property declaration nests its children (`properties`, `item_type`,
//! `value_type`) directly. Loading flattens that tree into the resource's
//! arena. Parent links are left unset; default resolution wires them.
//!
//! ```yaml
//! name: Address
//! base_url: projects/{{project}}/regions/{{region}}/addresses
//! properties:
//!   - name: metadata
//!     type: NestedObject
//!     properties:
//!       - name: labels
//!         type: KeyValueLabels
//! ```

use std::path::Path;
use std::sync::Arc;

use propgen_core::{PropertyId, Version};
use serde::Deserialize;

use crate::error::DeclarationError;
use crate::kind::PropertyKind;
use crate::product::ProductMetadata;
use crate::property::{Property, Validation};
use crate::resource::{NestedQuery, Resource};

/// A product declaration file.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDeclaration {
    pub name: String,
    /// Defaults to `name`.
    #[serde(default)]
    pub api_name: Option<String>,
    #[serde(default)]
    pub versions: Vec<Version>,
}

impl ProductDeclaration {
    pub fn into_metadata(self) -> ProductMetadata {
        let mut metadata = ProductMetadata::new(self.name, self.versions);
        if let Some(api_name) = self.api_name {
            metadata.api_name = api_name;
        }
        metadata
    }
}

/// A resource declaration file.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceDeclaration {
    pub name: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub min_version: String,
    /// Defaults to `PUT`.
    #[serde(default)]
    pub update_verb: Option<String>,
    #[serde(default)]
    pub immutable: bool,
    #[serde(default)]
    pub id_format: String,
    #[serde(default)]
    pub self_link: String,
    #[serde(default)]
    pub nested_query: Option<NestedQuery>,
    #[serde(default)]
    pub exclude: bool,
    #[serde(default)]
    pub properties: Vec<PropertyDeclaration>,
    #[serde(default)]
    pub parameters: Vec<PropertyDeclaration>,
}

impl ResourceDeclaration {
    /// Build the resource, placing every declared node in its arena.
    pub fn into_resource(self, product: Arc<ProductMetadata>) -> Resource {
        let mut resource = Resource::new(self.name, product);
        resource.base_url = self.base_url;
        resource.min_version = self.min_version;
        if let Some(verb) = self.update_verb {
            resource.update_verb = verb;
        }
        resource.immutable = self.immutable;
        resource.id_format = self.id_format;
        resource.self_link = self.self_link;
        resource.nested_query = self.nested_query;
        resource.exclude = self.exclude;

        for decl in self.properties {
            let property = decl.place(&mut resource);
            resource.add_property(property);
        }
        for decl in self.parameters {
            let property = decl.place(&mut resource);
            resource.add_parameter(property);
        }
        resource
    }
}

/// One property of a resource declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDeclaration {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    #[serde(default)]
    pub new_type: Option<PropertyKind>,
    #[serde(default)]
    pub api_name: String,
    #[serde(default)]
    pub default_value: Option<serde_yaml::Value>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub exclude: bool,
    #[serde(default)]
    pub deprecation_message: String,
    #[serde(default)]
    pub removed_message: String,
    #[serde(default)]
    pub output: bool,
    #[serde(default)]
    pub immutable: bool,
    #[serde(default)]
    pub client_side: bool,
    #[serde(default)]
    pub url_param_only: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub read_query_params: String,
    #[serde(default)]
    pub update_verb: String,
    #[serde(default)]
    pub update_url: String,
    #[serde(default)]
    pub update_id: String,
    #[serde(default)]
    pub fingerprint_name: String,
    #[serde(default)]
    pub send_empty_value: bool,
    #[serde(default)]
    pub allow_empty_object: bool,
    #[serde(default)]
    pub min_version: String,
    #[serde(default)]
    pub exact_version: String,
    #[serde(default)]
    pub conflicts: Vec<String>,
    #[serde(default)]
    pub at_least_one_of: Vec<String>,
    #[serde(default)]
    pub exactly_one_of: Vec<String>,
    #[serde(default)]
    pub required_with: Vec<String>,
    /// Absent and empty are different: a NestedObject without a list is
    /// reported by validation.
    #[serde(default)]
    pub properties: Option<Vec<PropertyDeclaration>>,
    #[serde(default)]
    pub enum_values: Vec<String>,
    #[serde(default)]
    pub exclude_docs_values: bool,
    #[serde(default)]
    pub item_type: Option<Box<PropertyDeclaration>>,
    #[serde(default)]
    pub min_size: String,
    #[serde(default)]
    pub max_size: String,
    #[serde(default)]
    pub item_validation: Option<Validation>,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub imports: String,
    #[serde(default)]
    pub diff_suppress_func: String,
    #[serde(default)]
    pub state_func: String,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default)]
    pub ignore_read: bool,
    #[serde(default)]
    pub validation: Option<Validation>,
    #[serde(default)]
    pub unordered_list: bool,
    #[serde(default)]
    pub is_set: bool,
    #[serde(default)]
    pub set_hash_func: String,
    #[serde(default)]
    pub default_from_api: bool,
    #[serde(default)]
    pub schema_config_mode_attr: bool,
    #[serde(default)]
    pub update_mask_fields: Vec<String>,
    #[serde(default)]
    pub key_expander: String,
    #[serde(default)]
    pub key_diff_suppress_func: String,
    #[serde(default)]
    pub value_type: Option<Box<PropertyDeclaration>>,
    #[serde(default)]
    pub key_name: String,
    #[serde(default)]
    pub key_description: String,
    #[serde(default)]
    pub ignore_write: bool,
    #[serde(default)]
    pub flatten_object: bool,
    #[serde(default)]
    pub custom_expand: String,
    #[serde(default)]
    pub custom_flatten: String,
    /// Generated-code prefix to use instead of the derived one.
    #[serde(default)]
    pub prefix: Option<String>,
}

impl PropertyDeclaration {
    /// Convert to a node, first placing every descendant in the arena.
    fn place(self, resource: &mut Resource) -> Property {
        let children: Option<Vec<PropertyId>> = self.properties.map(|decls| {
            decls
                .into_iter()
                .map(|decl| {
                    let child = decl.place(resource);
                    resource.insert(child)
                })
                .collect()
        });
        let item_type = self.item_type.map(|decl| {
            let item = (*decl).place(resource);
            resource.insert(item)
        });
        let value_type = self.value_type.map(|decl| {
            let value = (*decl).place(resource);
            resource.insert(value)
        });

        let mut p = Property::new(self.name, self.kind);
        p.new_type = self.new_type;
        p.api_name = self.api_name;
        p.default_value = self.default_value;
        p.description = self.description;
        p.exclude = self.exclude;
        p.deprecation_message = self.deprecation_message;
        p.removed_message = self.removed_message;
        p.output = self.output;
        p.immutable = self.immutable;
        p.client_side = self.client_side;
        p.url_param_only = self.url_param_only;
        p.required = self.required;
        p.read_query_params = self.read_query_params;
        p.update_verb = self.update_verb;
        p.update_url = self.update_url;
        p.update_id = self.update_id;
        p.fingerprint_name = self.fingerprint_name;
        p.send_empty_value = self.send_empty_value;
        p.allow_empty_object = self.allow_empty_object;
        p.min_version = self.min_version;
        p.exact_version = self.exact_version;
        p.conflicts = self.conflicts;
        p.at_least_one_of = self.at_least_one_of;
        p.exactly_one_of = self.exactly_one_of;
        p.required_with = self.required_with;
        p.properties = children;
        p.enum_values = self.enum_values;
        p.exclude_docs_values = self.exclude_docs_values;
        p.item_type = item_type;
        p.min_size = self.min_size;
        p.max_size = self.max_size;
        p.item_validation = self.item_validation;
        p.resource = self.resource;
        p.imports = self.imports;
        p.diff_suppress_func = self.diff_suppress_func;
        p.state_func = self.state_func;
        p.sensitive = self.sensitive;
        p.ignore_read = self.ignore_read;
        p.validation = self.validation;
        p.unordered_list = self.unordered_list;
        p.is_set = self.is_set;
        p.set_hash_func = self.set_hash_func;
        p.default_from_api = self.default_from_api;
        p.schema_config_mode_attr = self.schema_config_mode_attr;
        p.update_mask_fields = self.update_mask_fields;
        p.key_expander = self.key_expander;
        p.key_diff_suppress_func = self.key_diff_suppress_func;
        p.value_type = value_type;
        p.key_name = self.key_name;
        p.key_description = self.key_description;
        p.ignore_write = self.ignore_write;
        p.flatten_object = self.flatten_object;
        p.custom_expand = self.custom_expand;
        p.custom_flatten = self.custom_flatten;
        if let Some(prefix) = self.prefix {
            p.set_prefix(prefix);
        }
        p
    }
}

// ─── Loading ────────────────────────────────────────────────────────

/// Parse a product declaration. `origin` names the source in errors.
pub fn parse_product(source: &str, origin: &str) -> Result<ProductMetadata, DeclarationError> {
    let decl: ProductDeclaration =
        serde_yaml::from_str(source).map_err(|e| DeclarationError::Parse {
            path: origin.to_string(),
            source: e,
        })?;
    Ok(decl.into_metadata())
}

/// Parse a resource declaration of `product`.
pub fn parse_resource(
    source: &str,
    origin: &str,
    product: Arc<ProductMetadata>,
) -> Result<Resource, DeclarationError> {
    let decl: ResourceDeclaration =
        serde_yaml::from_str(source).map_err(|e| DeclarationError::Parse {
            path: origin.to_string(),
            source: e,
        })?;
    Ok(decl.into_resource(product))
}

/// Read and parse a product declaration file.
pub fn load_product(path: &Path) -> Result<ProductMetadata, DeclarationError> {
    let source = read(path)?;
    let product = parse_product(&source, &path.display().to_string())?;
    tracing::debug!(path = %path.display(), product = %product.name, "loaded product");
    Ok(product)
}

/// Read and parse a resource declaration file.
pub fn load_resource(
    path: &Path,
    product: Arc<ProductMetadata>,
) -> Result<Resource, DeclarationError> {
    let source = read(path)?;
    let resource = parse_resource(&source, &path.display().to_string(), product)?;
    tracing::debug!(path = %path.display(), resource = %resource.name, "loaded resource");
    Ok(resource)
}

fn read(path: &Path) -> Result<String, DeclarationError> {
    std::fs::read_to_string(path).map_err(|e| DeclarationError::Read {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::catalog;
    use propgen_core::VersionName;

    const PRODUCT: &str = r#"
name: Compute
api_name: compute
versions:
  - name: ga
    base_url: https://compute.googleapis.com/compute/v1/
  - name: beta
    base_url: https://compute.googleapis.com/compute/beta/
"#;

    const RESOURCE: &str = r#"
name: Address
base_url: projects/{{project}}/regions/{{region}}/addresses
immutable: true
parameters:
  - name: region
    type: String
    required: true
properties:
  - name: addressType
    type: Enum
    enum_values: [INTERNAL, EXTERNAL]
    default_value: EXTERNAL
  - name: rules
    type: Array
    item_type:
      type: NestedObject
      properties:
        - name: action
          type: String
  - name: config
    type: NestedObject
    prefix: Custom
"#;

    #[test]
    fn test_parse_product() {
        let product = parse_product(PRODUCT, "product.yaml").unwrap();
        assert_eq!(product.name, "Compute");
        assert_eq!(product.api_name, "compute");
        assert!(product.exists_at(VersionName::Beta));
        assert!(!product.exists_at(VersionName::Alpha));
    }

    #[test]
    fn test_product_api_name_defaults_to_name() {
        let product = parse_product("name: Dns\nversions: []\n", "p.yaml").unwrap();
        assert_eq!(product.api_name, "Dns");
    }

    #[test]
    fn test_parse_resource_into_arena() {
        let r = parse_resource(RESOURCE, "address.yaml", Arc::new(catalog())).unwrap();
        assert_eq!(r.update_verb, "PUT");
        assert!(r.immutable);
        assert_eq!(r.properties().len(), 3);
        assert_eq!(r.parameters().len(), 1);

        let address_type = r.node(r.properties()[0]);
        assert!(address_type.is_a(PropertyKind::Enum));
        assert_eq!(address_type.enum_values, vec!["INTERNAL", "EXTERNAL"]);
        assert!(address_type.default_value.is_some());

        let rules = r.node(r.properties()[1]);
        let item = r.node(rules.item_type.unwrap());
        assert!(item.is_a(PropertyKind::NestedObject));
        assert_eq!(item.properties.as_ref().map(Vec::len), Some(1));
        assert!(item.parent.is_none(), "parent links are wired later");

        let config = r.node(r.properties()[2]);
        assert!(config.properties.is_none());
        assert_eq!(config.cached_prefix(), Some("Custom"));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = parse_resource(
            "name: X\nproperties:\n  - name: a\n    type: Object\n",
            "x.yaml",
            Arc::new(catalog()),
        )
        .unwrap_err();
        assert!(matches!(err, DeclarationError::Parse { .. }));
        assert!(err.to_string().contains("x.yaml"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_product(Path::new("/nonexistent/product.yaml")).unwrap_err();
        assert!(matches!(err, DeclarationError::Read { .. }));
    }

    #[test]
    fn test_update_urls_are_per_property() {
        let product = Arc::new(catalog());
        let r = parse_resource(RESOURCE, "address.yaml", Arc::clone(&product)).unwrap();
        assert!(!r.updatable());

        let patched = RESOURCE.replace(
            "    enum_values: [INTERNAL, EXTERNAL]\n",
            "    enum_values: [INTERNAL, EXTERNAL]\n    update_url: projects/{{project}}/setType\n",
        );
        let r = parse_resource(&patched, "address.yaml", product).unwrap();
        assert!(r.updatable());
        assert!(!r.is_force_new(r.properties()[0]));
    }
}
