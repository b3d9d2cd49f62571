//! Expansion of a type name into a selection tree.
use std::collections::HashSet;

use crate::schema::{is_builtin_scalar, Field, Schema, TypeRef};
use super::SelectionNode;

/// Expand `type_name` into a selection tree.
///
/// Types without fields come back as a leaf. Below the root that leaf carries
/// the field name, not the type name, so the tree stays a valid selection.
/// Every type is expanded at most
/// once per call: the visited set is shared by all branches, so a type that
/// already appeared anywhere in the expansion is dropped instead of recursed
/// into again. That keeps self-referential and mutually referential graphs
/// finite.
pub fn resolve(schema: &Schema, type_name: Option<&str>) -> Option<SelectionNode> {
    let type_name = type_name?;
    let mut resolver = Resolver { schema, visited: HashSet::new() };
    resolver.expand(type_name, type_name)
}

struct Resolver<'a> {
    schema: &'a Schema,
    visited: HashSet<&'a str>,
}

impl<'a> Resolver<'a> {
    fn expand(&mut self, field: &str, type_name: &str) -> Option<SelectionNode> {
        // Unknown names are treated like scalars: nothing to select beneath them.
        let Some(type_def) = self.schema.type_def(type_name) else {
            return Some(SelectionNode::leaf(field));
        };
        let Some(fields) = type_def.fields.as_deref() else {
            return Some(SelectionNode::leaf(field));
        };
        if !self.visited.insert(type_def.name.as_str()) {
            tracing::trace!(type_name, "cycle guard dropped repeated type");
            return None;
        }
        let children = fields.iter().filter_map(|f| self.child(f)).collect();
        Some(SelectionNode::object(field, type_def.name.as_str(), children))
    }

    fn child(&mut self, field: &'a Field) -> Option<SelectionNode> {
        match &field.ty {
            TypeRef::Named { name, .. } if is_builtin_scalar(name) => Some(SelectionNode::leaf(&field.name)),
            TypeRef::Named { name, .. } => self.expand(&field.name, name),
            TypeRef::List(inner) => match inner.name() {
                Some(name) => self.expand(&field.name, name),
                None => Some(SelectionNode::leaf(&field.name)),
            },
            TypeRef::NonNull(_) | TypeRef::Truncated => Some(SelectionNode::leaf(&field.name)),
        }
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use crate::schema::TypeKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn preview(node: &Option<SelectionNode>) -> serde_json::Value {
        serde_json::to_value(node).unwrap()
    }

    #[test]
    fn self_reference_is_cut() {
        let schema = users_schema();
        let tree = resolve(&schema, Some("User"));
        assert_eq!(preview(&tree), json!({ "User": ["id", "name"] }));
    }

    #[test]
    fn absent_type_name_resolves_to_nothing() {
        assert_eq!(resolve(&users_schema(), None), None);
    }

    #[test]
    fn fieldless_root_is_a_leaf_named_after_the_type() {
        assert_eq!(resolve(&users_schema(), Some("String")), Some(SelectionNode::leaf("String")));
    }

    #[test]
    fn acyclic_nesting_expands_every_level() {
        let schema = schema(
            None,
            None,
            vec![
                object("A", vec![field("id", named("ID")), field("b", named("B"))]),
                object("B", vec![field("c", list(named("C"))), field("count", named("Int"))]),
                object("C", vec![field("label", named("String"))]),
            ],
        );
        let tree = resolve(&schema, Some("A")).unwrap();
        assert_eq!(
            tree,
            SelectionNode::object(
                "A",
                "A",
                vec![
                    SelectionNode::leaf("id"),
                    SelectionNode::object(
                        "b",
                        "B",
                        vec![
                            SelectionNode::object("c", "C", vec![SelectionNode::leaf("label")]),
                            SelectionNode::leaf("count"),
                        ],
                    ),
                ],
            )
        );
    }

    #[test]
    fn mutual_recursion_terminates() {
        let schema = schema(
            None,
            None,
            vec![
                object("Post", vec![field("title", named("String")), field("author", named("Author"))]),
                object("Author", vec![field("name", named("String")), field("posts", list(named("Post")))]),
            ],
        );
        let tree = resolve(&schema, Some("Post"));
        assert_eq!(preview(&tree), json!({ "Post": ["title", { "Author": ["name"] }] }));
    }

    #[test]
    fn visited_set_is_shared_between_siblings() {
        let schema = schema(
            None,
            None,
            vec![
                object("Edge", vec![field("from", named("Node")), field("to", named("Node"))]),
                object("Node", vec![field("id", named("ID"))]),
            ],
        );
        let tree = resolve(&schema, Some("Edge")).unwrap();
        assert_eq!(tree.children(), &[SelectionNode::object("from", "Node", vec![SelectionNode::leaf("id")])]);
    }

    #[test]
    fn visited_set_starts_fresh_per_call() {
        let schema = users_schema();
        let first = resolve(&schema, Some("User"));
        let second = resolve(&schema, Some("User"));
        assert_eq!(first, second);
    }

    #[test]
    fn wrapped_and_enum_fields_stay_leaves() {
        let schema = schema(
            None,
            None,
            vec![
                object(
                    "Order",
                    vec![
                        field("status", named("Status")),
                        field("owner", non_null(named("Customer"))),
                        field("tags", non_null(list(named("String")))),
                        field("lines", list(non_null(named("Line")))),
                    ],
                ),
                leaf_type("Status", TypeKind::Enum),
                object("Customer", vec![field("id", named("ID"))]),
                object("Line", vec![field("sku", named("String"))]),
            ],
        );
        let tree = resolve(&schema, Some("Order")).unwrap();
        assert_eq!(
            tree.children(),
            &[
                SelectionNode::leaf("status"),
                SelectionNode::leaf("owner"),
                SelectionNode::leaf("tags"),
                SelectionNode::leaf("lines"),
            ]
        );
    }

    #[test]
    fn list_of_scalars_is_a_leaf_field() {
        let schema = schema(None, None, vec![object("Bag", vec![field("items", list(named("String")))])]);
        let tree = resolve(&schema, Some("Bag")).unwrap();
        assert_eq!(tree.children(), &[SelectionNode::leaf("items")]);
    }

    #[test]
    fn object_whose_only_child_cycles_keeps_an_empty_list() {
        let schema = schema(None, None, vec![object("Loop", vec![field("next", named("Loop"))])]);
        assert_eq!(resolve(&schema, Some("Loop")), Some(SelectionNode::object("Loop", "Loop", vec![])));
    }
}
