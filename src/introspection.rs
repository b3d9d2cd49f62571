//! Wire shape of the standard introspection response and its lowering into
//! the `schema` model.
use serde::Deserialize;
use serde_json::Value;

use crate::error::SchemaError;
use crate::schema::{Arg, DirectiveDef, Field, Schema, TypeDef, TypeKind, TypeRef};

/// Full introspection query. `TypeRef` is expanded to seven `ofType` levels,
/// which bounds every wrapper chain in the response.
pub const INTROSPECTION_QUERY: &str = "query IntrospectionQuery { __schema { queryType { name } mutationType { name } subscriptionType { name } types { ...FullType } directives { name description locations args { ...InputValue } } } } fragment FullType on __Type { kind name description fields(includeDeprecated: true) { name description args { ...InputValue } type { ...TypeRef } isDeprecated deprecationReason } inputFields { ...InputValue } interfaces { ...TypeRef } enumValues(includeDeprecated: true) { name description isDeprecated deprecationReason } possibleTypes { ...TypeRef } } fragment InputValue on __InputValue { name description type { ...TypeRef } defaultValue } fragment TypeRef on __Type { kind name ofType { kind name ofType { kind name ofType { kind name ofType { kind name ofType { kind name ofType { kind name ofType { kind name } } } } } } } }";

pub fn request_body() -> Value {
    serde_json::json!({ "query": INTROSPECTION_QUERY })
}

// ————————————————————————————————————————————————————————————————————————————
// WIRE TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Deserialize)]
struct Response {
    data: Option<Data>,
    #[serde(default)]
    errors: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Data {
    #[serde(rename = "__schema")]
    schema: Option<WireSchema>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSchema {
    query_type: Option<NamedRef>,
    mutation_type: Option<NamedRef>,
    subscription_type: Option<NamedRef>,
    #[serde(default)]
    types: Vec<WireType>,
    #[serde(default)]
    directives: Vec<WireDirective>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireType {
    kind: TypeKind,
    name: Option<String>,
    description: Option<String>,
    fields: Option<Vec<WireField>>,
    interfaces: Option<Vec<WireTypeRef>>,
    possible_types: Option<Vec<WireTypeRef>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireField {
    name: String,
    #[serde(default)]
    args: Vec<WireInputValue>,
    #[serde(rename = "type")]
    ty: WireTypeRef,
    #[serde(default)]
    is_deprecated: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireInputValue {
    name: String,
    #[serde(rename = "type")]
    ty: WireTypeRef,
    default_value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTypeRef {
    kind: TypeKind,
    name: Option<String>,
    of_type: Option<Box<WireTypeRef>>,
}

#[derive(Debug, Deserialize)]
struct WireDirective {
    name: String,
    #[serde(default)]
    locations: Vec<String>,
    #[serde(default)]
    args: Vec<WireInputValue>,
}

// ————————————————————————————————————————————————————————————————————————————
// LOWERING
// ————————————————————————————————————————————————————————————————————————————

/// Parse a raw introspection response (`{"data": {"__schema": ...}}`) into a `Schema`.
pub fn parse_response(raw: Value) -> Result<Schema, SchemaError> {
    let response: Response = crate::path_de::from_value_with_path(raw).map_err(SchemaError::Malformed)?;
    match response.data.and_then(|data| data.schema) {
        Some(schema) => Ok(lower_schema(schema)),
        None => {
            let errors = response.errors.map(|e| e.to_string()).unwrap_or_else(|| "none".to_string());
            Err(SchemaError::MissingSchema(errors))
        }
    }
}

fn lower_schema(wire: WireSchema) -> Schema {
    Schema {
        types: wire.types.into_iter().filter_map(lower_type).collect(),
        directives: wire.directives.into_iter().map(lower_directive).collect(),
        query_type_name: wire.query_type.and_then(|t| t.name),
        mutation_type_name: wire.mutation_type.and_then(|t| t.name),
        subscription_type_name: wire.subscription_type.and_then(|t| t.name),
    }
}

// Unnamed entries in `types` cannot be referenced from anywhere; skip them.
fn lower_type(wire: WireType) -> Option<TypeDef> {
    let name = wire.name?;
    Some(TypeDef {
        kind: wire.kind,
        name,
        description: wire.description,
        fields: wire.fields.map(|fields| fields.into_iter().map(lower_field).collect()),
        interfaces: wire.interfaces.map(|xs| xs.into_iter().map(lower_type_ref).collect()),
        possible_types: wire.possible_types.map(|xs| xs.into_iter().map(lower_type_ref).collect()),
    })
}

fn lower_field(wire: WireField) -> Field {
    Field {
        name: wire.name,
        args: wire.args.into_iter().map(lower_arg).collect(),
        ty: lower_type_ref(wire.ty),
        is_deprecated: wire.is_deprecated,
    }
}

fn lower_arg(wire: WireInputValue) -> Arg {
    Arg {
        name: wire.name,
        ty: lower_type_ref(wire.ty),
        default_value: wire.default_value,
    }
}

fn lower_directive(wire: WireDirective) -> DirectiveDef {
    DirectiveDef {
        name: wire.name,
        locations: wire.locations,
        args: wire.args.into_iter().map(lower_arg).collect(),
    }
}

fn lower_type_ref(wire: WireTypeRef) -> TypeRef {
    let inner = match wire.of_type {
        Some(of_type) => lower_type_ref(*of_type),
        None => TypeRef::Truncated,
    };
    match wire.kind {
        TypeKind::NonNull => TypeRef::NonNull(Box::new(inner)),
        TypeKind::List => TypeRef::List(Box::new(inner)),
        kind => match wire.name {
            Some(name) => TypeRef::Named { kind, name },
            None => TypeRef::Truncated,
        },
    }
}

// ------------------------------- Tests ------------------------------------ //
