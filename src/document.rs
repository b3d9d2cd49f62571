//! Assembly of an executable operation from an action, its variables and a
//! selection tree.
use std::fmt::{self, Write as _};

use serde_json::{Map, Value};

use crate::schema::{Field, OperationKind, TypeKind, TypeRef};
use crate::selection::SelectionNode;
use crate::variables::{VariableDescriptor, Variables};

#[derive(Debug, Clone, PartialEq)]
pub struct OperationDocument {
    pub kind: OperationKind,
    pub action: String,
    pub variables: Variables,
    pub selection: Vec<SelectionNode>,
}

impl OperationDocument {
    pub fn assemble(
        kind: OperationKind,
        action: impl Into<String>,
        variables: Variables,
        selection: Vec<SelectionNode>,
    ) -> Self {
        Self { kind, action: action.into(), variables, selection }
    }

    /// GraphQL source text, e.g. `query ($id: ID!) { getUser(id: $id) { id name } }`.
    pub fn source(&self) -> String {
        let mut out = String::from(self.kind.keyword());
        if !self.variables.is_empty() {
            let declarations = self
                .variables
                .iter()
                .map(|(name, var)| format!("${name}: {}", declared_type(var)))
                .collect::<Vec<_>>();
            let _ = write!(out, " ({})", declarations.join(", "));
        }
        let _ = write!(out, " {{ {}", self.action);
        if !self.variables.is_empty() {
            let arguments = self
                .variables
                .keys()
                .map(|name| format!("{name}: ${name}"))
                .collect::<Vec<_>>();
            let _ = write!(out, "({})", arguments.join(", "));
        }
        write_selection(&mut out, &self.selection);
        out.push_str(" }");
        out
    }

    /// Values keyed by variable name, formatted for their declared type.
    pub fn variable_values(&self) -> Value {
        let values = self
            .variables
            .iter()
            .map(|(name, var)| (name.clone(), format_value(var)))
            .collect::<Map<_, _>>();
        Value::Object(values)
    }

    /// JSON body for a GraphQL-over-HTTP POST.
    pub fn request_body(&self) -> Value {
        serde_json::json!({
            "query": self.source(),
            "variables": self.variable_values(),
        })
    }
}

impl fmt::Display for OperationDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source())
    }
}

/// Mutations select their own required argument names instead of an expanded result.
pub fn mutation_selection(action: &Field) -> Vec<SelectionNode> {
    action
        .args
        .iter()
        .filter(|arg| arg.ty.is_non_null())
        .map(|arg| SelectionNode::leaf(&arg.name))
        .collect()
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn declared_type(var: &VariableDescriptor) -> String {
    if let Some(signature) = var.ty.signature() {
        return signature;
    }
    let base = var.base_type_name.as_deref().unwrap_or("String");
    if var.required { format!("{base}!") } else { base.to_string() }
}

// Objects whose child list ended up empty are skipped; `field { }` is not valid GraphQL.
fn write_selection(out: &mut String, nodes: &[SelectionNode]) {
    let rendered = nodes
        .iter()
        .filter_map(|node| match node {
            SelectionNode::Leaf(name) => Some(name.clone()),
            SelectionNode::Object { children, .. } if !has_selectable(children) => None,
            SelectionNode::Object { field, children, .. } => {
                let mut nested = field.clone();
                write_selection(&mut nested, children);
                Some(nested)
            }
        })
        .collect::<Vec<_>>();
    if !rendered.is_empty() {
        let _ = write!(out, " {{ {} }}", rendered.join(" "));
    }
}

fn has_selectable(nodes: &[SelectionNode]) -> bool {
    nodes.iter().any(|node| match node {
        SelectionNode::Leaf(_) => true,
        SelectionNode::Object { children, .. } => has_selectable(children),
    })
}

fn format_value(var: &VariableDescriptor) -> Value {
    let raw = var.value.as_str();
    let parsed = match var.base_type_name.as_deref() {
        Some("String" | "ID") => None,
        Some("Int") => raw.trim().parse::<i64>().ok().map(Value::from),
        Some("Float") => raw.trim().parse::<f64>().ok().and_then(serde_json::Number::from_f64).map(Value::Number),
        Some("Boolean") => raw.trim().parse::<bool>().ok().map(Value::Bool),
        _ if accepts_json_literal(&var.ty) => serde_json::from_str::<Value>(raw).ok().filter(|v| !v.is_string()),
        // custom scalars (AWSJSON, AWSDateTime, ...) are sent as typed
        _ => None,
    };
    parsed.unwrap_or_else(|| Value::String(raw.to_string()))
}

fn accepts_json_literal(ty: &TypeRef) -> bool {
    let ty = match ty {
        TypeRef::NonNull(inner) => inner,
        other => other,
    };
    ty.is_list() || matches!(ty.leaf_kind(), Some(TypeKind::InputObject | TypeKind::Enum))
}

// ------------------------------- Tests ------------------------------------ //
