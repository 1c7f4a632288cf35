//! # Property Validation
//!
//! Enforces the structural and naming rules of a resource's property tree
//! after default resolution. Every rule failure becomes a [`Violation`];
//! all violations for a resource are returned together, in traversal order
//! (parent before children, rules in a fixed order per node).
//!
//! ## Rules (per node, in order)
//!
//! 1. The node has a name.
//! 2. The node is not both output and required.
//! 3. The node does not set both a default value and `default_from_api`.
//! 4. Labels and annotations fields use their dedicated kinds, and only
//!    those fields use them (with a fixed list of historical exceptions).
//! 5. Arrays have an item type, Maps have a NestedObject value type, and
//!    NestedObjects declare their properties.
//!
//! Then the node's item type, value type, or children are validated.

use std::fmt;

use propgen_core::PropertyId;
use serde::Serialize;
use thiserror::Error;

use crate::kind::PropertyKind;
use crate::resource::Resource;

/// Lineages reserved for the resource's labels field.
pub const LABELS_LINEAGES: &[&str] = &["labels", "metadata.labels", "configuration.labels"];

/// Lineages reserved for the resource's annotations field.
pub const ANNOTATIONS_LINEAGES: &[&str] = &["annotations", "metadata.annotations"];

/// (product, resource) pairs whose labels field predates KeyValueLabels.
const LABELS_EXCEPTIONS: &[(&str, &str)] = &[
    // label values must be empty strings
    ("CloudIdentity", "Group"),
    // labels is an Array
    ("DeploymentManager", "Deployment"),
    ("Edgenetwork", "Network"),
    ("Edgenetwork", "Subnet"),
    // userLabels is the resource labels field
    ("Monitoring", "NotificationChannel"),
    // labels is an Array
    ("Monitoring", "MetricDescriptor"),
];

/// (product, resource) pairs whose annotations field predates KeyValueAnnotations.
const ANNOTATIONS_EXCEPTIONS: &[(&str, &str)] = &[("Gkeonprem", "BareMetalAdminClusterEnrollment")];

/// The rule a [`Violation`] broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationRule {
    MissingName,
    OutputAndRequired,
    DefaultValueAndDefaultFromApi,
    LabelsType,
    AnnotationsType,
    MissingItemType,
    InvalidValueType,
    MissingProperties,
}

impl ViolationRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingName => "missing_name",
            Self::OutputAndRequired => "output_and_required",
            Self::DefaultValueAndDefaultFromApi => "default_value_and_default_from_api",
            Self::LabelsType => "labels_type",
            Self::AnnotationsType => "annotations_type",
            Self::MissingItemType => "missing_item_type",
            Self::InvalidValueType => "invalid_value_type",
            Self::MissingProperties => "missing_properties",
        }
    }
}

impl fmt::Display for ViolationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule failure on one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Lineage of the offending node.
    pub lineage: String,
    /// Product-qualified resource the node belongs to (`Product/Resource`).
    pub resource: String,
    pub rule: ViolationRule,
    /// Author-facing description of the problem.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lineage.is_empty() {
            write!(f, "  (root): {} [{}]", self.message, self.rule)
        } else {
            write!(f, "  {}: {} [{}]", self.lineage, self.message, self.rule)
        }
    }
}

/// Every violation found in one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }

    fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A resource's property tree broke one or more rules.
#[derive(Error, Debug, Clone)]
pub enum PropertyValidationError {
    #[error("resource {resource} has {} invalid properties:\n{violations}", .violations.len())]
    Invalid {
        /// Product-qualified resource name.
        resource: String,
        violations: ValidationViolations,
    },
}

impl PropertyValidationError {
    /// The violations carried by this error.
    pub fn violations(&self) -> &ValidationViolations {
        match self {
            Self::Invalid { violations, .. } => violations,
        }
    }
}

impl Resource {
    /// Check every node of the tree, top-level properties and parameters
    /// included, excluded nodes included.
    ///
    /// # Errors
    ///
    /// `PropertyValidationError::Invalid` carrying all violations found.
    pub fn validate(&self) -> Result<(), PropertyValidationError> {
        tracing::debug!(resource = %self.name, "validating properties");
        let mut violations = ValidationViolations::default();
        for id in self.all_user_properties() {
            self.validate_node(id, &mut violations);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(PropertyValidationError::Invalid {
                resource: self.qualified_name(),
                violations,
            })
        }
    }

    /// `Product/Resource`, as used in validation messages.
    fn qualified_name(&self) -> String {
        format!("{}/{}", self.product().name, self.name)
    }

    fn validate_node(&self, id: PropertyId, out: &mut ValidationViolations) {
        let node = self.node(id);
        let lineage = self.lineage(id);
        let resource = self.qualified_name();
        let mut report = |rule: ViolationRule, message: String| {
            out.push(Violation {
                lineage: lineage.clone(),
                resource: resource.clone(),
                rule,
                message,
            })
        };

        if node.name.is_empty() {
            report(
                ViolationRule::MissingName,
                format!(
                    "missing `name` for property with type {} in resource {}",
                    node.kind, self.name
                ),
            );
        }

        if node.output && node.required {
            report(
                ViolationRule::OutputAndRequired,
                format!(
                    "property {} cannot be output and required at the same time",
                    node.name
                ),
            );
        }

        if node.default_from_api && node.default_value.is_some() {
            report(
                ViolationRule::DefaultValueAndDefaultFromApi,
                "'default_value' and 'default_from_api' cannot be both set".to_string(),
            );
        }

        let product = self.product().name.as_str();
        let excepted = |list: &[(&str, &str)]| {
            list.iter()
                .any(|(p, r)| *p == product && *r == self.name.as_str())
        };

        if LABELS_LINEAGES.contains(&lineage.as_str()) {
            if !node.is_a(PropertyKind::KeyValueLabels) && !excepted(LABELS_EXCEPTIONS) {
                report(
                    ViolationRule::LabelsType,
                    format!("please use type KeyValueLabels for field {lineage}"),
                );
            }
        } else if node.is_a(PropertyKind::KeyValueLabels) {
            report(
                ViolationRule::LabelsType,
                format!("please don't use type KeyValueLabels for field {lineage}"),
            );
        }

        if ANNOTATIONS_LINEAGES.contains(&lineage.as_str()) {
            if !node.is_a(PropertyKind::KeyValueAnnotations) && !excepted(ANNOTATIONS_EXCEPTIONS) {
                report(
                    ViolationRule::AnnotationsType,
                    format!("please use type KeyValueAnnotations for field {lineage}"),
                );
            }
        } else if node.is_a(PropertyKind::KeyValueAnnotations) {
            report(
                ViolationRule::AnnotationsType,
                format!("please don't use type KeyValueAnnotations for field {lineage}"),
            );
        }

        let mut next = Vec::new();
        match node.resolved_kind() {
            PropertyKind::Array => match node.item_type {
                Some(item) => next.push(item),
                None => report(
                    ViolationRule::MissingItemType,
                    "Array property has no item type".to_string(),
                ),
            },
            PropertyKind::Map => match node.value_type {
                Some(value) if self.node(value).is_a(PropertyKind::NestedObject) => {
                    next.push(value)
                }
                Some(value) => report(
                    ViolationRule::InvalidValueType,
                    format!(
                        "Map value type must be NestedObject, found {}",
                        self.node(value).resolved_kind()
                    ),
                ),
                None => report(
                    ViolationRule::InvalidValueType,
                    "Map property has no value type".to_string(),
                ),
            },
            PropertyKind::NestedObject => match &node.properties {
                Some(children) => next.extend(children.iter().copied()),
                None => report(
                    ViolationRule::MissingProperties,
                    format!("field '{lineage}' properties are nil"),
                ),
            },
            _ => {}
        }

        for child in next {
            self.validate_node(child, out);
        }
    }
}
