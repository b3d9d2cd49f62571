//! Small builders for hand-written type graphs used across the test modules.
use crate::schema::{Arg, Field, Schema, TypeDef, TypeKind, TypeRef};

pub fn named(name: &str) -> TypeRef {
    let kind = if crate::schema::is_builtin_scalar(name) { TypeKind::Scalar } else { TypeKind::Object };
    TypeRef::Named { kind, name: name.to_string() }
}

pub fn non_null(inner: TypeRef) -> TypeRef {
    TypeRef::NonNull(Box::new(inner))
}

pub fn list(inner: TypeRef) -> TypeRef {
    TypeRef::List(Box::new(inner))
}

pub fn field(name: &str, ty: TypeRef) -> Field {
    Field { name: name.to_string(), args: Vec::new(), ty, is_deprecated: false }
}

pub fn field_with_args(name: &str, args: Vec<Arg>, ty: TypeRef) -> Field {
    Field { args, ..field(name, ty) }
}

pub fn arg(name: &str, ty: TypeRef) -> Arg {
    Arg { name: name.to_string(), ty, default_value: None }
}

pub fn object(name: &str, fields: Vec<Field>) -> TypeDef {
    TypeDef {
        kind: TypeKind::Object,
        name: name.to_string(),
        description: None,
        fields: Some(fields),
        interfaces: Some(Vec::new()),
        possible_types: None,
    }
}

pub fn leaf_type(name: &str, kind: TypeKind) -> TypeDef {
    TypeDef {
        kind,
        name: name.to_string(),
        description: None,
        fields: None,
        interfaces: None,
        possible_types: None,
    }
}

pub fn builtin_scalars() -> Vec<TypeDef> {
    crate::schema::BUILTIN_SCALARS
        .iter()
        .map(|name| leaf_type(name, TypeKind::Scalar))
        .collect()
}

pub fn schema(query: Option<&str>, mutation: Option<&str>, types: Vec<TypeDef>) -> Schema {
    let mut all = builtin_scalars();
    all.extend(types);
    Schema {
        types: all,
        directives: Vec::new(),
        query_type_name: query.map(str::to_string),
        mutation_type_name: mutation.map(str::to_string),
        subscription_type_name: None,
    }
}

/// `Query { getUser(id: ID!): User, me: User!, version: String }`,
/// `User { id: ID, name: String, friends: [User] }`,
/// `Mutation { createUser(name: String!, age: Int): User }`.
pub fn users_schema() -> Schema {
    schema(
        Some("Query"),
        Some("Mutation"),
        vec![
            object(
                "Query",
                vec![
                    field_with_args("getUser", vec![arg("id", non_null(named("ID")))], named("User")),
                    field("me", non_null(named("User"))),
                    field("version", named("String")),
                ],
            ),
            object(
                "User",
                vec![
                    field("id", named("ID")),
                    field("name", named("String")),
                    field("friends", list(named("User"))),
                ],
            ),
            object(
                "Mutation",
                vec![field_with_args(
                    "createUser",
                    vec![arg("name", non_null(named("String"))), arg("age", named("Int"))],
                    named("User"),
                )],
            ),
        ],
    )
}
