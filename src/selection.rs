//! Selection trees derived from the type graph.
//!
//! A tree is an ordered list of `SelectionNode`s: leaf fields are selected by
//! name, object fields carry the type they expand and their own child list.
pub mod depth;
pub mod resolve;

use serde::ser::{Serialize, SerializeMap, Serializer};

pub use depth::{depth, truncate};
pub use resolve::resolve;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionNode {
    Leaf(String),
    Object {
        /// Name the node is selected under in a document.
        field: String,
        /// Type whose fields make up `children`.
        type_name: String,
        children: Vec<SelectionNode>,
    },
}

impl SelectionNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        SelectionNode::Leaf(name.into())
    }

    pub fn object(field: impl Into<String>, type_name: impl Into<String>, children: Vec<SelectionNode>) -> Self {
        SelectionNode::Object {
            field: field.into(),
            type_name: type_name.into(),
            children,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, SelectionNode::Object { .. })
    }

    pub fn children(&self) -> &[SelectionNode] {
        match self {
            SelectionNode::Leaf(_) => &[],
            SelectionNode::Object { children, .. } => children,
        }
    }

    /// Consume the node, keeping the child list of an object (leaves have none).
    pub fn into_children(self) -> Vec<SelectionNode> {
        match self {
            SelectionNode::Leaf(_) => Vec::new(),
            SelectionNode::Object { children, .. } => children,
        }
    }
}

/// Preview shape: leaves as strings, objects as `{ "<TypeName>": [..] }`.
impl Serialize for SelectionNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SelectionNode::Leaf(name) => serializer.serialize_str(name),
            SelectionNode::Object { type_name, children, .. } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(type_name, children)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_as_type_keyed_preview() {
        let tree = SelectionNode::object(
            "getUser",
            "User",
            vec![SelectionNode::leaf("id"), SelectionNode::object("posts", "Post", vec![SelectionNode::leaf("title")])],
        );
        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!({ "User": ["id", { "Post": ["title"] }] })
        );
    }

    #[test]
    fn leaves_have_no_children() {
        let leaf = SelectionNode::leaf("id");
        assert!(leaf.children().is_empty());
        assert!(!leaf.is_object());
        assert!(leaf.into_children().is_empty());
    }
}
