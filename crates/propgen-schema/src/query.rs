//! # Node Queries
//!
//! Read-only views over a node and its children, used by code-emission
//! templates after the resource has been prepared.

use propgen_core::PropertyId;

use crate::error::SchemaError;
use crate::kind::{PropertyKind, SchemaType};
use crate::resource::Resource;

impl Resource {
    /// Declared children of a NestedObject, excluded ones included.
    pub fn all_properties_of(&self, id: PropertyId) -> &[PropertyId] {
        self.node(id).properties.as_deref().unwrap_or_default()
    }

    /// Non-excluded children of a NestedObject; empty for other kinds.
    ///
    /// # Errors
    ///
    /// `SchemaError::MissingProperties` if the NestedObject declares no
    /// property list.
    pub fn user_properties_of(&self, id: PropertyId) -> Result<Vec<PropertyId>, SchemaError> {
        let node = self.node(id);
        if !node.is_a(PropertyKind::NestedObject) {
            return Ok(Vec::new());
        }
        let children = node
            .properties
            .as_ref()
            .ok_or_else(|| SchemaError::MissingProperties {
                resource: self.name.clone(),
                lineage: self.lineage(id),
            })?;
        Ok(children
            .iter()
            .copied()
            .filter(|child| !self.node(*child).exclude)
            .collect())
    }

    /// User properties of a NestedObject with flattened children replaced
    /// by their own root properties.
    pub fn root_properties_of(&self, id: PropertyId) -> Result<Vec<PropertyId>, SchemaError> {
        let mut props = Vec::new();
        for child in self.user_properties_of(id)? {
            if self.node(child).flatten_object {
                props.extend(self.root_properties_of(child)?);
            } else {
                props.push(child);
            }
        }
        Ok(props)
    }

    /// The properties one level below the node in configuration: a
    /// NestedObject's user properties, an Array's NestedObject item's, or a
    /// Map's value object's. An excluded Array or Map exposes nothing.
    pub fn nested_properties(&self, id: PropertyId) -> Result<Vec<PropertyId>, SchemaError> {
        let node = self.node(id);
        match node.resolved_kind() {
            PropertyKind::Array => match node.item_type {
                Some(item) if self.node(item).is_a(PropertyKind::NestedObject) && !node.exclude => {
                    self.nested_properties(item)
                }
                _ => Ok(Vec::new()),
            },
            PropertyKind::NestedObject => self.user_properties_of(id),
            PropertyKind::Map => match node.value_type {
                Some(value) if !node.exclude => self.nested_properties(value),
                _ => Ok(Vec::new()),
            },
            _ => Ok(Vec::new()),
        }
    }

    /// Every node that survived version filtering, in declaration order
    /// with each node before its descendants. Children of an excluded node
    /// are skipped with it.
    pub fn included_properties(&self) -> Vec<PropertyId> {
        let mut out = Vec::new();
        for id in self.all_user_properties() {
            self.collect_included(id, &mut out);
        }
        out
    }

    fn collect_included(&self, id: PropertyId, out: &mut Vec<PropertyId>) {
        let node = self.node(id);
        if node.exclude {
            return;
        }
        out.push(id);
        let children: Vec<PropertyId> = match node.resolved_kind() {
            PropertyKind::Array => node.item_type.into_iter().collect(),
            PropertyKind::Map => node.value_type.into_iter().collect(),
            PropertyKind::NestedObject => self.all_properties_of(id).to_vec(),
            _ => Vec::new(),
        };
        for child in children {
            self.collect_included(child, out);
        }
    }

    /// Declared kind of an Array's items.
    pub fn item_type_class(&self, id: PropertyId) -> Option<PropertyKind> {
        let node = self.node(id);
        if !node.is_a(PropertyKind::Array) {
            return None;
        }
        node.item_type.map(|item| self.node(item).kind)
    }

    /// Schema representation tag of the node's resolved kind.
    pub fn schema_type(&self, id: PropertyId) -> SchemaType {
        self.node(id).resolved_kind().schema_type()
    }

    pub fn description(&self, id: PropertyId) -> &str {
        self.node(id).trimmed_description()
    }

    // ─── Constraint lists ───────────────────────────────────────────
    //
    // Empty until default resolution has attached the node to a resource.

    pub fn conflicting(&self, id: PropertyId) -> &[String] {
        self.constraint(id, |p| &p.conflicts)
    }

    pub fn at_least_one_of_list(&self, id: PropertyId) -> &[String] {
        self.constraint(id, |p| &p.at_least_one_of)
    }

    pub fn exactly_one_of_list(&self, id: PropertyId) -> &[String] {
        self.constraint(id, |p| &p.exactly_one_of)
    }

    pub fn required_with_list(&self, id: PropertyId) -> &[String] {
        self.constraint(id, |p| &p.required_with)
    }

    fn constraint<'a>(
        &'a self,
        id: PropertyId,
        list: impl FnOnce(&'a crate::property::Property) -> &'a Vec<String>,
    ) -> &'a [String] {
        let node = self.node(id);
        if node.owner.is_none() {
            return &[];
        }
        list(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Property;
    use crate::testutil::resource;

    #[test]
    fn test_user_properties_of_filters_excluded() {
        let mut r = resource("Address");
        let parent = r.add_property(Property::new("config", PropertyKind::NestedObject));
        let kept = r.add_child(parent, Property::new("kept", PropertyKind::String));
        let mut dropped = Property::new("dropped", PropertyKind::String);
        dropped.exclude = true;
        r.add_child(parent, dropped);

        assert_eq!(r.user_properties_of(parent).unwrap(), vec![kept]);
        assert_eq!(r.all_properties_of(parent).len(), 2);
        assert!(r.user_properties_of(kept).unwrap().is_empty());
    }

    #[test]
    fn test_user_properties_of_missing_list_is_fatal() {
        let mut r = resource("Address");
        let broken = r.add_property(Property::new("config", PropertyKind::NestedObject));
        let err = r.user_properties_of(broken).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Field 'config' properties are nil! (resource Address)"
        );
    }

    #[test]
    fn test_root_properties_of_collapses_recursively() {
        let mut r = resource("Address");
        let top = r.add_property(Property::new("top", PropertyKind::NestedObject));
        let mut outer = Property::new("outer", PropertyKind::NestedObject);
        outer.flatten_object = true;
        let outer = r.add_child(top, outer);
        let mut inner = Property::new("inner", PropertyKind::NestedObject);
        inner.flatten_object = true;
        let inner = r.add_child(outer, inner);
        let leaf = r.add_child(inner, Property::new("leaf", PropertyKind::String));
        let sibling = r.add_child(top, Property::new("sibling", PropertyKind::String));

        assert_eq!(r.root_properties_of(top).unwrap(), vec![leaf, sibling]);
    }

    #[test]
    fn test_nested_properties_by_kind() {
        let mut r = resource("Address");
        let rules = r.add_property(Property::new("rules", PropertyKind::Array));
        let item = r.set_item_type(rules, Property::new("", PropertyKind::NestedObject));
        let action = r.add_child(item, Property::new("action", PropertyKind::String));

        let map = r.add_property(Property::new("entries", PropertyKind::Map));
        let value = r.set_value_type(map, Property::new("", PropertyKind::NestedObject));
        let weight = r.add_child(value, Property::new("weight", PropertyKind::Integer));

        let tags = r.add_property(Property::new("tags", PropertyKind::Array));
        r.set_item_type(tags, Property::new("", PropertyKind::String));

        assert_eq!(r.nested_properties(rules).unwrap(), vec![action]);
        assert_eq!(r.nested_properties(map).unwrap(), vec![weight]);
        assert!(r.nested_properties(tags).unwrap().is_empty());

        r.node_mut(rules).exclude = true;
        r.node_mut(map).exclude = true;
        assert!(r.nested_properties(rules).unwrap().is_empty());
        assert!(r.nested_properties(map).unwrap().is_empty());
    }

    #[test]
    fn test_included_properties_pre_order() {
        let mut r = resource("Address");
        let config = r.add_property(Property::new("config", PropertyKind::NestedObject));
        let size = r.add_child(config, Property::new("size", PropertyKind::Integer));
        let mut hidden = Property::new("hidden", PropertyKind::NestedObject);
        hidden.exclude = true;
        let hidden = r.add_child(config, hidden);
        r.add_child(hidden, Property::new("inner", PropertyKind::String));
        let tags = r.add_property(Property::new("tags", PropertyKind::Array));
        let tag = r.set_item_type(tags, Property::new("", PropertyKind::String));
        let region = r.add_parameter(Property::new("region", PropertyKind::String));

        assert_eq!(
            r.included_properties(),
            vec![config, size, tags, tag, region]
        );
    }

    #[test]
    fn test_item_type_class_and_schema_type() {
        let mut r = resource("Address");
        let tags = r.add_property(Property::new("tags", PropertyKind::Array));
        r.set_item_type(tags, Property::new("", PropertyKind::Enum));
        let name = r.add_property(Property::new("name", PropertyKind::String));

        assert_eq!(r.item_type_class(tags), Some(PropertyKind::Enum));
        assert_eq!(r.item_type_class(name), None);
        assert_eq!(r.schema_type(tags), SchemaType::List);
        assert_eq!(r.schema_type(name), SchemaType::String);
    }

    #[test]
    fn test_constraint_lists_need_owner() {
        let mut r = resource("Address");
        let mut p = Property::new("a", PropertyKind::String);
        p.conflicts = vec!["b".into()];
        p.required_with = vec!["c".into()];
        let id = r.add_property(p);
        assert!(r.conflicting(id).is_empty());

        r.resolve_defaults();
        assert_eq!(r.conflicting(id), ["b".to_string()]);
        assert_eq!(r.required_with_list(id), ["c".to_string()]);
        assert!(r.at_least_one_of_list(id).is_empty());
        assert!(r.exactly_one_of_list(id).is_empty());
    }

    #[test]
    fn test_description_trimmed() {
        let mut r = resource("Address");
        let mut p = Property::new("a", PropertyKind::String);
        p.description = "An address.\n".into();
        let id = r.add_property(p);
        assert_eq!(r.description(id), "An address.");
    }
}
