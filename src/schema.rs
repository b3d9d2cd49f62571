//! In-memory type graph of an introspected GraphQL service.
//!
//! Built once from the introspection payload (see `introspection`) and never
//! mutated afterwards. Type references are lowered into the `TypeRef` sum type
//! so walking a wrapper chain is plain pattern matching.
use std::fmt;

/// Scalars every GraphQL service has, whether or not they are listed in `types`.
pub const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named { kind: TypeKind, name: String },
    NonNull(Box<TypeRef>),
    List(Box<TypeRef>),
    /// The chain ran out before reaching a named type (introspection depth exhausted).
    Truncated,
}

#[derive(Debug, Clone)]
pub struct Arg {
    pub name: String,
    pub ty: TypeRef,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub args: Vec<Arg>,
    pub ty: TypeRef,
    pub is_deprecated: bool,
}

#[derive(Debug, Clone)]
pub struct TypeDef {
    pub kind: TypeKind,
    pub name: String,
    pub description: Option<String>,
    /// `None` for leaf kinds (scalars, enums, input objects).
    pub fields: Option<Vec<Field>>,
    pub interfaces: Option<Vec<TypeRef>>,
    pub possible_types: Option<Vec<TypeRef>>,
}

#[derive(Debug, Clone)]
pub struct DirectiveDef {
    pub name: String,
    pub locations: Vec<String>,
    pub args: Vec<Arg>,
}

#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub types: Vec<TypeDef>,
    pub directives: Vec<DirectiveDef>,
    pub query_type_name: Option<String>,
    pub mutation_type_name: Option<String>,
    pub subscription_type_name: Option<String>,
}

/// Root operation kinds the browser can drive. Subscriptions are left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl TypeRef {
    /// Name at this link of the chain; only named leaves carry one.
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeRef::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn of_type(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::NonNull(inner) | TypeRef::List(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, TypeRef::List(_))
    }

    /// Kind of the named type at the end of the wrapper chain.
    pub fn leaf_kind(&self) -> Option<TypeKind> {
        match self {
            TypeRef::Named { kind, .. } => Some(*kind),
            TypeRef::NonNull(inner) | TypeRef::List(inner) => inner.leaf_kind(),
            TypeRef::Truncated => None,
        }
    }

    /// Name here or one link further in, e.g. `User` for both `User` and `User!`.
    pub fn shallow_name(&self) -> Option<&str> {
        self.name().or_else(|| self.of_type().and_then(TypeRef::name))
    }

    /// GraphQL type signature such as `[ID!]!`. `None` when the chain was truncated.
    pub fn signature(&self) -> Option<String> {
        match self {
            TypeRef::Named { name, .. } => Some(name.clone()),
            TypeRef::NonNull(inner) => inner.signature().map(|s| format!("{s}!")),
            TypeRef::List(inner) => inner.signature().map(|s| format!("[{s}]")),
            TypeRef::Truncated => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.signature() {
            Some(signature) => f.write_str(&signature),
            None => f.write_str("<truncated>"),
        }
    }
}

impl TypeDef {
    pub fn has_fields(&self) -> bool {
        self.fields.is_some()
    }

    pub fn fields(&self) -> &[Field] {
        self.fields.as_deref().unwrap_or_default()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().iter().find(|field| field.name == name)
    }
}

impl Schema {
    pub fn type_def(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|ty| ty.name == name)
    }

    pub fn root_type_name(&self, kind: OperationKind) -> Option<&str> {
        match kind {
            OperationKind::Query => self.query_type_name.as_deref(),
            OperationKind::Mutation => self.mutation_type_name.as_deref(),
        }
    }

    pub fn root(&self, kind: OperationKind) -> Option<&TypeDef> {
        self.root_type_name(kind).and_then(|name| self.type_def(name))
    }

    /// Field names of a root type, in declaration order.
    pub fn actions(&self, kind: OperationKind) -> Vec<&str> {
        self.root(kind)
            .map(|root| root.fields().iter().map(|f| f.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Operation kinds whose root type exists and declares at least one field.
    pub fn browsable_kinds(&self) -> Vec<OperationKind> {
        [OperationKind::Query, OperationKind::Mutation]
            .into_iter()
            .filter(|kind| !self.actions(*kind).is_empty())
            .collect()
    }
}

impl OperationKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

// ------------------------------- Tests ------------------------------------ //
