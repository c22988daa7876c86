//! Schema Printer
//!
//! Prints a `TypeGraph` back to SDL with `graphql-parser`'s formatter.
//! Graphs loaded from SDL print their source document, so descriptions,
//! field arguments and default values come back out alongside every
//! directive. Graphs built in code are raised into an equivalent document.

use graphql_parser::schema::{self as ast, Definition, Document};
use graphql_parser::Pos;

use super::{Directive, FieldDef, FieldType, Literal, ObjectType, TypeDefinition, TypeGraph};
use crate::plan::directives::{EXCLUDE_DIRECTIVE, LINK_DIRECTIVE, TABLE_DIRECTIVE};

/// Directives understood by the migration compiler
pub const DIRECTIVE_DEFINITIONS: &str = "\
directive @db(table: String, key: String) on OBJECT
directive @nodb on FIELD | FIELD_DEFINITION
directive @link(field: String) on FIELD | FIELD_DEFINITION
";

/// Print every definition of the schema in declaration order
pub fn print_schema(graph: &TypeGraph) -> String {
    graph.document().to_string()
}

/// Print the compiler's directive declarations followed by the schema
///
/// Declarations of `@db`, `@nodb` or `@link` already present in the schema
/// are replaced rather than repeated.
pub fn print_schema_with_directives(graph: &TypeGraph) -> String {
    let mut document = graph.document().clone();
    document.definitions.retain(|def| match def {
        Definition::DirectiveDefinition(d) => {
            ![TABLE_DIRECTIVE, EXCLUDE_DIRECTIVE, LINK_DIRECTIVE].contains(&d.name.as_str())
        }
        _ => true,
    });

    let mut output = String::from(DIRECTIVE_DEFINITIONS);
    let body = document.to_string();
    if !body.is_empty() {
        output.push('\n');
        output.push_str(&body);
    }
    output
}

// =============================================================================
// Model -> AST
// =============================================================================

pub(crate) fn to_document(definitions: &[TypeDefinition]) -> Document<'static, String> {
    Document {
        definitions: definitions
            .iter()
            .map(|def| Definition::TypeDefinition(raise_type(def)))
            .collect(),
    }
}

fn raise_type(def: &TypeDefinition) -> ast::TypeDefinition<'static, String> {
    match def {
        TypeDefinition::Object(t) => {
            let mut object = ast::ObjectType::new(t.name.clone());
            object.directives = raise_directives(&t.directives);
            object.fields = raise_fields(t);
            ast::TypeDefinition::Object(object)
        }
        TypeDefinition::Interface(t) => {
            let mut iface = ast::InterfaceType::new(t.name.clone());
            iface.directives = raise_directives(&t.directives);
            iface.fields = raise_fields(t);
            ast::TypeDefinition::Interface(iface)
        }
        TypeDefinition::InputObject(t) => {
            let mut input = ast::InputObjectType::new(t.name.clone());
            input.directives = raise_directives(&t.directives);
            input.fields = t.fields.iter().map(raise_input_value).collect();
            ast::TypeDefinition::InputObject(input)
        }
        TypeDefinition::Enum(e) => {
            let mut en = ast::EnumType::new(e.name.clone());
            en.directives = raise_directives(&e.directives);
            en.values = e.values.iter().cloned().map(ast::EnumValue::new).collect();
            ast::TypeDefinition::Enum(en)
        }
        TypeDefinition::Scalar { name, directives } => {
            let mut scalar = ast::ScalarType::new(name.clone());
            scalar.directives = raise_directives(directives);
            ast::TypeDefinition::Scalar(scalar)
        }
        TypeDefinition::Union { name, members, directives } => {
            let mut union = ast::UnionType::new(name.clone());
            union.directives = raise_directives(directives);
            union.types = members.clone();
            ast::TypeDefinition::Union(union)
        }
    }
}

fn raise_fields(t: &ObjectType) -> Vec<ast::Field<'static, String>> {
    t.fields
        .iter()
        .map(|field| ast::Field {
            position: Pos::default(),
            description: None,
            name: field.name.clone(),
            arguments: Vec::new(),
            field_type: raise_field_type(&field.field_type),
            directives: raise_directives(&field.directives),
        })
        .collect()
}

fn raise_input_value(field: &FieldDef) -> ast::InputValue<'static, String> {
    ast::InputValue {
        position: Pos::default(),
        description: None,
        name: field.name.clone(),
        value_type: raise_field_type(&field.field_type),
        default_value: None,
        directives: raise_directives(&field.directives),
    }
}

fn raise_field_type(ty: &FieldType) -> ast::Type<'static, String> {
    match ty {
        FieldType::Named(name) => ast::Type::NamedType(name.clone()),
        FieldType::NonNull(inner) => ast::Type::NonNullType(Box::new(raise_field_type(inner))),
        FieldType::List(inner) => ast::Type::ListType(Box::new(raise_field_type(inner))),
    }
}

fn raise_directives(directives: &[Directive]) -> Vec<ast::Directive<'static, String>> {
    directives
        .iter()
        .map(|d| ast::Directive {
            position: Pos::default(),
            name: d.name.clone(),
            arguments: d
                .arguments
                .iter()
                .map(|(name, value)| (name.clone(), raise_literal(value)))
                .collect(),
        })
        .collect()
}

fn raise_literal(literal: &Literal) -> ast::Value<'static, String> {
    match literal {
        Literal::String(s) => ast::Value::String(s.clone()),
        // Enum values print verbatim, which keeps the source form
        Literal::Raw(raw) => ast::Value::Enum(raw.clone()),
    }
}
