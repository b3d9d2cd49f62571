use super::SelectionNode;

/// Number of nested object boundaries below the given level.
///
/// A list of leaves has depth 0; each level of object nesting adds one.
pub fn depth(fields: &[SelectionNode]) -> usize {
    depth_from(fields, 0)
}

fn depth_from(fields: &[SelectionNode], base: usize) -> usize {
    fields
        .iter()
        .filter(|node| node.is_object())
        .map(|node| depth_from(node.children(), base + 1))
        .max()
        .unwrap_or(base)
}

/// Keep `depth` levels of the tree, counting the given list as level 1.
///
/// At the last kept level only leaves survive. `depth == 0` keeps nothing.
pub fn truncate(fields: &[SelectionNode], depth: usize) -> Option<Vec<SelectionNode>> {
    if depth == 0 {
        return None;
    }
    let kept = fields
        .iter()
        .filter_map(|node| match node {
            SelectionNode::Leaf(_) => Some(node.clone()),
            SelectionNode::Object { .. } if depth == 1 => None,
            SelectionNode::Object { field, type_name, children } => Some(SelectionNode::Object {
                field: field.clone(),
                type_name: type_name.clone(),
                children: truncate(children, depth - 1).unwrap_or_default(),
            }),
        })
        .collect();
    Some(kept)
}

// ------------------------------- Tests ------------------------------------ //
