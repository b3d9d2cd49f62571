//! Operator-supplied argument values turned into typed variable descriptors.
use indexmap::IndexMap;

use crate::schema::{Arg, TypeRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDescriptor {
    /// Raw text as typed by the operator; formatting happens at assembly.
    pub value: String,
    pub required: bool,
    pub base_type_name: Option<String>,
    /// Declared argument type, used for the `$name: Type` declaration.
    pub ty: TypeRef,
}

pub type Variables = IndexMap<String, VariableDescriptor>;

/// Build descriptors for every argument the operator gave a non-empty value.
///
/// Output follows the argument declaration order. Values are matched to
/// arguments by name; raw entries that name no argument are ignored.
pub fn coerce(args: &[Arg], raw: &IndexMap<String, String>) -> Variables {
    args.iter()
        .filter_map(|arg| {
            let value = raw.get(&arg.name).filter(|value| !value.is_empty())?;
            Some((arg.name.clone(), describe(arg, value)))
        })
        .collect()
}

fn describe(arg: &Arg, value: &str) -> VariableDescriptor {
    let (required, base) = match &arg.ty {
        TypeRef::NonNull(inner) => (true, inner.name()),
        other => (false, other.name()),
    };
    VariableDescriptor {
        value: value.to_string(),
        required,
        base_type_name: base.map(str::to_string),
        ty: arg.ty.clone(),
    }
}

/// Label shown when asking for an argument: `name!` marks a required one.
pub fn prompt_label(arg: &Arg) -> String {
    if arg.ty.is_non_null() {
        format!("{}!", arg.name)
    } else {
        arg.name.clone()
    }
}

// ------------------------------- Tests ------------------------------------ //
