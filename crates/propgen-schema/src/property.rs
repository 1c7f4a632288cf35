//! # Property Nodes
//!
//! A `Property` is one field definition in a resource's schema tree. The
//! resource owns every node in an arena; structural links (`properties`,
//! `item_type`, `value_type`, `parent`) are [`PropertyId`]s into that arena.
//!
//! Which fields are meaningful depends on the node's kind:
//!
//! | Kind            | Structural fields                           |
//! |-----------------|---------------------------------------------|
//! | `Array`         | `item_type`, `min_size`, `max_size`         |
//! | `Map`           | `value_type`, `key_name`, `key_expander`    |
//! | `NestedObject`  | `properties`, `flatten_object`              |
//! | `ResourceRef`   | `resource`, `imports`                       |
//! | `Enum`          | `enum_values`                               |
//!
//! Nodes are never removed from the arena. Version filtering sets
//! `exclude`, and consumers must check it.

use std::cell::OnceCell;

use propgen_core::PropertyId;
use serde::{Deserialize, Serialize};

use crate::kind::PropertyKind;

/// A value-validation hook attached to a property's schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    /// Regular expression the value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    /// Name of a validation function to call instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

/// One node of a resource's property tree.
#[derive(Debug, Clone)]
pub struct Property {
    /// Schema-facing identifier.
    pub name: String,
    /// Wire identifier; defaults to `name`.
    pub api_name: String,
    /// Declared kind.
    pub kind: PropertyKind,
    /// Provider-level override of `kind`.
    pub new_type: Option<PropertyKind>,
    resolved_kind: PropertyKind,

    pub default_value: Option<serde_yaml::Value>,
    pub description: String,
    pub exclude: bool,
    pub deprecation_message: String,
    pub removed_message: String,

    pub output: bool,
    pub immutable: bool,
    pub client_side: bool,
    pub url_param_only: bool,
    pub required: bool,
    pub read_query_params: String,
    pub update_verb: String,
    pub update_url: String,
    pub update_id: String,
    pub fingerprint_name: String,
    pub send_empty_value: bool,
    pub allow_empty_object: bool,

    pub min_version: String,
    pub exact_version: String,

    /// Dotted lineages of properties this one conflicts with.
    pub conflicts: Vec<String>,
    pub at_least_one_of: Vec<String>,
    pub exactly_one_of: Vec<String>,
    pub required_with: Vec<String>,

    /// Children of a NestedObject. `None` means none were declared.
    pub properties: Option<Vec<PropertyId>>,
    pub enum_values: Vec<String>,
    pub exclude_docs_values: bool,

    pub item_type: Option<PropertyId>,
    pub min_size: String,
    pub max_size: String,
    pub item_validation: Option<Validation>,
    pub parent_name: String,

    /// Name of the referenced resource.
    pub resource: String,
    /// Field of the referenced resource this reference imports.
    pub imports: String,

    pub diff_suppress_func: String,
    pub state_func: String,
    pub sensitive: bool,
    pub ignore_read: bool,
    pub validation: Option<Validation>,
    pub unordered_list: bool,
    pub is_set: bool,
    pub set_hash_func: String,
    pub default_from_api: bool,
    pub schema_config_mode_attr: bool,
    pub update_mask_fields: Vec<String>,

    pub key_expander: String,
    pub key_diff_suppress_func: String,
    pub value_type: Option<PropertyId>,
    pub key_name: String,
    pub key_description: String,

    pub ignore_write: bool,
    /// Elide this object's own segment from configuration-facing paths.
    pub flatten_object: bool,

    pub custom_expand: String,
    pub custom_flatten: String,

    /// Enclosing node; `None` at the top level of a resource.
    pub parent: Option<PropertyId>,
    /// Name of the resource this node was resolved against.
    pub owner: Option<String>,
    pub(crate) prefix: OnceCell<String>,
}

impl Property {
    /// Create a node with the given name and kind and every other field empty.
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            api_name: String::new(),
            kind,
            new_type: None,
            resolved_kind: kind,
            default_value: None,
            description: String::new(),
            exclude: false,
            deprecation_message: String::new(),
            removed_message: String::new(),
            output: false,
            immutable: false,
            client_side: false,
            url_param_only: false,
            required: false,
            read_query_params: String::new(),
            update_verb: String::new(),
            update_url: String::new(),
            update_id: String::new(),
            fingerprint_name: String::new(),
            send_empty_value: false,
            allow_empty_object: false,
            min_version: String::new(),
            exact_version: String::new(),
            conflicts: Vec::new(),
            at_least_one_of: Vec::new(),
            exactly_one_of: Vec::new(),
            required_with: Vec::new(),
            properties: None,
            enum_values: Vec::new(),
            exclude_docs_values: false,
            item_type: None,
            min_size: String::new(),
            max_size: String::new(),
            item_validation: None,
            parent_name: String::new(),
            resource: String::new(),
            imports: String::new(),
            diff_suppress_func: String::new(),
            state_func: String::new(),
            sensitive: false,
            ignore_read: false,
            validation: None,
            unordered_list: false,
            is_set: false,
            set_hash_func: String::new(),
            default_from_api: false,
            schema_config_mode_attr: false,
            update_mask_fields: Vec::new(),
            key_expander: String::new(),
            key_diff_suppress_func: String::new(),
            value_type: None,
            key_name: String::new(),
            key_description: String::new(),
            ignore_write: false,
            flatten_object: false,
            custom_expand: String::new(),
            custom_flatten: String::new(),
            parent: None,
            owner: None,
            prefix: OnceCell::new(),
        }
    }

    /// The effective kind: the provider override if one is set, else the
    /// declared kind. Fixed by default resolution.
    pub fn resolved_kind(&self) -> PropertyKind {
        self.resolved_kind
    }

    /// Whether the node's effective kind is `kind`.
    pub fn is_a(&self, kind: PropertyKind) -> bool {
        self.resolved_kind == kind
    }

    pub(crate) fn resolve_kind(&mut self) {
        self.resolved_kind = self.new_type.unwrap_or(self.kind);
    }

    /// Seed the generated-code prefix instead of deriving it from lineage.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = OnceCell::from(prefix.into());
    }

    /// The memoized prefix, if it has been computed or seeded.
    pub fn cached_prefix(&self) -> Option<&str> {
        self.prefix.get().map(String::as_str)
    }

    /// Whether the field was removed from the API.
    pub fn removed(&self) -> bool {
        !self.removed_message.is_empty()
    }

    /// Whether the field is deprecated in the API.
    pub fn deprecated(&self) -> bool {
        !self.deprecation_message.is_empty()
    }

    /// Description with trailing newlines and surrounding whitespace removed.
    pub fn trimmed_description(&self) -> &str {
        self.description.trim_end_matches('\n').trim()
    }

    /// Enum values wrapped in `quote` and joined with `, `.
    ///
    /// With `add_empty`, an optional enum also accepts `""` (appended unless
    /// already present).
    pub fn enum_values_to_string(&self, quote: &str, add_empty: bool) -> String {
        let mut values: Vec<String> = self
            .enum_values
            .iter()
            .map(|v| format!("{quote}{v}{quote}"))
            .collect();

        if add_empty && !self.required && !values.iter().any(|v| v == "\"\"") {
            values.push("\"\"".to_string());
        }

        values.join(", ")
    }
}

/// Builds synthetic properties that are not declared by the schema author.
///
/// ```ignore
/// let prop = PropertyBuilder::new("effectiveLabels", "labels")
///     .kind(PropertyKind::KeyValueEffectiveLabels)
///     .output(true)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct PropertyBuilder {
    property: Property,
}

impl PropertyBuilder {
    /// Start a String-kind property with the given schema and wire names.
    pub fn new(name: impl Into<String>, api_name: impl Into<String>) -> Self {
        let mut property = Property::new(name, PropertyKind::String);
        property.api_name = api_name.into();
        Self { property }
    }

    pub fn kind(mut self, kind: PropertyKind) -> Self {
        self.property.kind = kind;
        self.property.resolve_kind();
        self
    }

    pub fn output(mut self, output: bool) -> Self {
        self.property.output = output;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.property.description = description.into();
        self
    }

    pub fn min_version(mut self, min_version: impl Into<String>) -> Self {
        self.property.min_version = min_version.into();
        self
    }

    pub fn update_verb(mut self, update_verb: impl Into<String>) -> Self {
        self.property.update_verb = update_verb.into();
        self
    }

    pub fn update_url(mut self, update_url: impl Into<String>) -> Self {
        self.property.update_url = update_url.into();
        self
    }

    pub fn immutable(mut self, immutable: bool) -> Self {
        self.property.immutable = immutable;
        self
    }

    pub fn client_side(mut self, client_side: bool) -> Self {
        self.property.client_side = client_side;
        self
    }

    pub fn ignore_write(mut self, ignore_write: bool) -> Self {
        self.property.ignore_write = ignore_write;
        self
    }

    /// Finish the property.
    pub fn build(self) -> Property {
        self.property
    }
}
