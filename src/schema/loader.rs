//! Schema Loading
//!
//! Parses SDL with `graphql-parser` and lowers the AST into a `TypeGraph`.
//! Schema definitions, directive definitions and type extensions carry no
//! table information and are left out of the model; the graph still keeps
//! them in its document for printing.

use graphql_parser::schema::{self as ast, Definition};
use tracing::debug;

use super::{
    Directive, EnumType, FieldDef, FieldType, Literal, ObjectType, TypeDefinition, TypeGraph,
};
use crate::error::{MigrateError, Result};

/// Parse SDL text into a type graph
pub fn load_sdl(sdl: &str) -> Result<TypeGraph> {
    let document = ast::parse_schema::<String>(sdl)
        .map_err(|e| MigrateError::Parse(e.to_string()))?
        .into_static();

    let mut definitions = Vec::with_capacity(document.definitions.len());
    for definition in &document.definitions {
        match definition {
            Definition::TypeDefinition(def) => definitions.push(lower_type(def.clone())),
            other => debug!(kind = definition_kind(other), "skipping non-type definition"),
        }
    }

    debug!(types = definitions.len(), "loaded schema");
    Ok(TypeGraph::with_document(definitions, document))
}

fn definition_kind(def: &Definition<'_, String>) -> &'static str {
    match def {
        Definition::SchemaDefinition(_) => "schema",
        Definition::TypeDefinition(_) => "type",
        Definition::TypeExtension(_) => "extension",
        Definition::DirectiveDefinition(_) => "directive",
    }
}

fn lower_type(def: ast::TypeDefinition<'_, String>) -> TypeDefinition {
    match def {
        ast::TypeDefinition::Object(obj) => TypeDefinition::Object(ObjectType {
            name: obj.name,
            fields: obj.fields.into_iter().map(lower_field).collect(),
            directives: lower_directives(obj.directives),
        }),
        ast::TypeDefinition::Interface(iface) => TypeDefinition::Interface(ObjectType {
            name: iface.name,
            fields: iface.fields.into_iter().map(lower_field).collect(),
            directives: lower_directives(iface.directives),
        }),
        ast::TypeDefinition::InputObject(input) => TypeDefinition::InputObject(ObjectType {
            name: input.name,
            fields: input
                .fields
                .into_iter()
                .map(|v| FieldDef {
                    name: v.name,
                    field_type: lower_field_type(v.value_type),
                    directives: lower_directives(v.directives),
                })
                .collect(),
            directives: lower_directives(input.directives),
        }),
        ast::TypeDefinition::Enum(en) => TypeDefinition::Enum(EnumType {
            name: en.name,
            values: en.values.into_iter().map(|v| v.name).collect(),
            directives: lower_directives(en.directives),
        }),
        ast::TypeDefinition::Scalar(scalar) => TypeDefinition::Scalar {
            name: scalar.name,
            directives: lower_directives(scalar.directives),
        },
        ast::TypeDefinition::Union(union) => TypeDefinition::Union {
            name: union.name,
            members: union.types,
            directives: lower_directives(union.directives),
        },
    }
}

fn lower_field(field: ast::Field<'_, String>) -> FieldDef {
    FieldDef {
        name: field.name,
        field_type: lower_field_type(field.field_type),
        directives: lower_directives(field.directives),
    }
}

fn lower_field_type(ty: ast::Type<'_, String>) -> FieldType {
    match ty {
        ast::Type::NamedType(name) => FieldType::Named(name),
        ast::Type::NonNullType(inner) => FieldType::NonNull(Box::new(lower_field_type(*inner))),
        ast::Type::ListType(inner) => FieldType::List(Box::new(lower_field_type(*inner))),
    }
}

fn lower_directives(directives: Vec<ast::Directive<'_, String>>) -> Vec<Directive> {
    directives
        .into_iter()
        .map(|d| Directive {
            name: d.name,
            arguments: d
                .arguments
                .into_iter()
                .map(|(name, value)| (name, lower_literal(&value)))
                .collect(),
        })
        .collect()
}

fn lower_literal(value: &ast::Value<'_, String>) -> Literal {
    match value {
        ast::Value::String(s) => Literal::String(s.clone()),
        other => Literal::Raw(render_value(other)),
    }
}

/// Source form of a non-string literal
fn render_value(value: &ast::Value<'_, String>) -> String {
    match value {
        ast::Value::Variable(name) => format!("${}", name),
        ast::Value::Int(n) => n.as_i64().map(|i| i.to_string()).unwrap_or_default(),
        ast::Value::Float(f) => f.to_string(),
        ast::Value::String(s) => Literal::String(s.clone()).to_string(),
        ast::Value::Boolean(b) => b.to_string(),
        ast::Value::Null => "null".to_string(),
        ast::Value::Enum(name) => name.clone(),
        ast::Value::List(items) => {
            let items: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", items.join(", "))
        }
        ast::Value::Object(fields) => {
            let fields: Vec<String> = fields
                .iter()
                .map(|(k, v)| format!("{}: {}", k, render_value(v)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
    }
}
