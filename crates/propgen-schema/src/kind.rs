//! # Property Kinds
//!
//! `PropertyKind` is the single definition of what a property node can be.
//! Every `match` on it is exhaustive, so adding a kind forces every
//! consumer (defaulting, validation, schema-type mapping) to handle it.
//!
//! A provider can override the declared kind of a node (`new_type`); the
//! override is folded into the node's resolved kind during default
//! resolution and all membership tests go through the resolved kind.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// The kind of a property node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    String,
    Integer,
    Double,
    Boolean,
    Time,
    Enum,
    /// Server-assigned token used for optimistic-concurrency updates.
    Fingerprint,
    /// Ordered list of `item_type`.
    Array,
    /// Keyed set of `value_type` objects.
    Map,
    /// Structured object with child `properties`.
    NestedObject,
    /// Reference to another resource of the same product.
    ResourceRef,
    KeyValuePairs,
    /// The `labels` field of a resource.
    KeyValueLabels,
    /// The `annotations` field of a resource.
    KeyValueAnnotations,
    /// Labels as seen by configuration, merged with provider defaults.
    KeyValueTerraformLabels,
    /// Labels or annotations as present on the server.
    KeyValueEffectiveLabels,
}

impl PropertyKind {
    /// Returns every kind in declaration order.
    pub fn all() -> &'static [PropertyKind] {
        &[
            Self::String,
            Self::Integer,
            Self::Double,
            Self::Boolean,
            Self::Time,
            Self::Enum,
            Self::Fingerprint,
            Self::Array,
            Self::Map,
            Self::NestedObject,
            Self::ResourceRef,
            Self::KeyValuePairs,
            Self::KeyValueLabels,
            Self::KeyValueAnnotations,
            Self::KeyValueTerraformLabels,
            Self::KeyValueEffectiveLabels,
        ]
    }

    /// The name used for this kind in declarations.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Integer => "Integer",
            Self::Double => "Double",
            Self::Boolean => "Boolean",
            Self::Time => "Time",
            Self::Enum => "Enum",
            Self::Fingerprint => "Fingerprint",
            Self::Array => "Array",
            Self::Map => "Map",
            Self::NestedObject => "NestedObject",
            Self::ResourceRef => "ResourceRef",
            Self::KeyValuePairs => "KeyValuePairs",
            Self::KeyValueLabels => "KeyValueLabels",
            Self::KeyValueAnnotations => "KeyValueAnnotations",
            Self::KeyValueTerraformLabels => "KeyValueTerraformLabels",
            Self::KeyValueEffectiveLabels => "KeyValueEffectiveLabels",
        }
    }

    /// Whether this kind holds a single scalar value.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::String
                | Self::Integer
                | Self::Double
                | Self::Boolean
                | Self::Time
                | Self::Enum
                | Self::Fingerprint
        )
    }

    /// Whether this kind is one of the string-to-string map variants.
    pub fn is_key_value(&self) -> bool {
        matches!(
            self,
            Self::KeyValuePairs
                | Self::KeyValueLabels
                | Self::KeyValueAnnotations
                | Self::KeyValueTerraformLabels
                | Self::KeyValueEffectiveLabels
        )
    }

    /// The schema representation emitted for a node of this kind.
    pub fn schema_type(&self) -> SchemaType {
        match self {
            Self::Boolean => SchemaType::Bool,
            Self::Double => SchemaType::Float,
            Self::Integer => SchemaType::Int,
            Self::String
            | Self::Time
            | Self::Enum
            | Self::ResourceRef
            | Self::Fingerprint => SchemaType::String,
            Self::NestedObject | Self::Array => SchemaType::List,
            Self::KeyValuePairs
            | Self::KeyValueLabels
            | Self::KeyValueAnnotations
            | Self::KeyValueTerraformLabels
            | Self::KeyValueEffectiveLabels => SchemaType::Map,
            Self::Map => SchemaType::Set,
        }
    }
}

impl std::fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownKind(s.to_string()))
    }
}

/// Schema representation tag consumed by the code-emission templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaType {
    Bool,
    Float,
    Int,
    String,
    List,
    Map,
    Set,
}

impl SchemaType {
    /// The identifier emitted into generated schema code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "schema.TypeBool",
            Self::Float => "schema.TypeFloat",
            Self::Int => "schema.TypeInt",
            Self::String => "schema.TypeString",
            Self::List => "schema.TypeList",
            Self::Map => "schema.TypeMap",
            Self::Set => "schema.TypeSet",
        }
    }
}

impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_roundtrip() {
        for kind in PropertyKind::all() {
            let parsed: PropertyKind = kind.as_str().parse().unwrap();
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown_and_empty() {
        assert!(matches!(
            "Object".parse::<PropertyKind>(),
            Err(SchemaError::UnknownKind(_))
        ));
        assert!("".parse::<PropertyKind>().is_err());
        assert!("string".parse::<PropertyKind>().is_err());
    }

    #[test]
    fn test_serde_matches_as_str() {
        for kind in PropertyKind::all() {
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_schema_type_mapping() {
        assert_eq!(PropertyKind::Boolean.schema_type(), SchemaType::Bool);
        assert_eq!(PropertyKind::Double.schema_type(), SchemaType::Float);
        assert_eq!(PropertyKind::Integer.schema_type(), SchemaType::Int);
        assert_eq!(PropertyKind::Fingerprint.schema_type(), SchemaType::String);
        assert_eq!(PropertyKind::ResourceRef.schema_type(), SchemaType::String);
        assert_eq!(PropertyKind::NestedObject.schema_type(), SchemaType::List);
        assert_eq!(PropertyKind::Array.schema_type(), SchemaType::List);
        assert_eq!(PropertyKind::Map.schema_type(), SchemaType::Set);
        for kind in PropertyKind::all().iter().filter(|k| k.is_key_value()) {
            assert_eq!(kind.schema_type(), SchemaType::Map, "{kind}");
        }
    }

    #[test]
    fn test_schema_type_strings() {
        assert_eq!(SchemaType::Bool.to_string(), "schema.TypeBool");
        assert_eq!(SchemaType::Set.to_string(), "schema.TypeSet");
    }

    #[test]
    fn test_primitive_and_key_value_are_disjoint() {
        for kind in PropertyKind::all() {
            assert!(!(kind.is_primitive() && kind.is_key_value()), "{kind}");
        }
    }
}
