//! Schema Type Graph
//!
//! Read-only, directive-annotated view of a GraphQL schema document.
//! The compiler never sees SDL text: `loader` lowers the parser's AST into
//! these types and `printer` formats the kept document back to SDL.
//!
//! Definitions keep their declaration order; name lookups go through a
//! side index built once at construction.

pub mod loader;
pub mod printer;

pub use printer::{print_schema, print_schema_with_directives, DIRECTIVE_DEFINITIONS};

use std::collections::HashMap;
use std::fmt;

use graphql_parser::schema::Document;
use serde::{Deserialize, Serialize};

// =============================================================================
// Literals & Directives
// =============================================================================

/// Directive argument value, kept as written in the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Literal {
    /// String literal, stored unquoted
    String(String),
    /// Any other literal (ints, enums, lists...) in source form
    Raw(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\r' => f.write_str("\\r")?,
                        '\t' => f.write_str("\\t")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
            Literal::Raw(s) => f.write_str(s),
        }
    }
}

/// A directive application on a type or field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub name: String,
    /// Arguments in source order
    pub arguments: Vec<(String, Literal)>,
}

impl Directive {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: Literal) -> Self {
        self.arguments.push((name.into(), value));
        self
    }
}

// =============================================================================
// Field Types
// =============================================================================

/// Declared type of a field, including its wrappers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Named(String),
    NonNull(Box<FieldType>),
    List(Box<FieldType>),
}

impl FieldType {
    pub fn named(name: impl Into<String>) -> Self {
        FieldType::Named(name.into())
    }

    pub fn non_null(inner: FieldType) -> Self {
        FieldType::NonNull(Box::new(inner))
    }

    pub fn list(inner: FieldType) -> Self {
        FieldType::List(Box::new(inner))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Named(name) => f.write_str(name),
            FieldType::NonNull(inner) => write!(f, "{}!", inner),
            FieldType::List(inner) => write!(f, "[{}]", inner),
        }
    }
}

// =============================================================================
// Definitions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub field_type: FieldType,
    pub directives: Vec<Directive>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            directives: Vec::new(),
        }
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }
}

/// Object, interface and input object types share this shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    pub name: String,
    pub fields: Vec<FieldDef>,
    pub directives: Vec<Directive>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            directives: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumType {
    pub name: String,
    /// Member names in declaration order
    pub values: Vec<String>,
    pub directives: Vec<Directive>,
}

impl EnumType {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
            directives: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeDefinition {
    Object(ObjectType),
    Interface(ObjectType),
    InputObject(ObjectType),
    Enum(EnumType),
    Scalar { name: String, directives: Vec<Directive> },
    Union { name: String, members: Vec<String>, directives: Vec<Directive> },
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Object(t)
            | TypeDefinition::Interface(t)
            | TypeDefinition::InputObject(t) => &t.name,
            TypeDefinition::Enum(e) => &e.name,
            TypeDefinition::Scalar { name, .. } | TypeDefinition::Union { name, .. } => name,
        }
    }
}

// =============================================================================
// Type Graph
// =============================================================================

/// All type definitions of one schema, in declaration order
///
/// Alongside the lowered model the graph keeps the parser's document, which
/// the printer formats. Equality compares the lowered definitions only.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    definitions: Vec<TypeDefinition>,
    index: HashMap<String, usize>,
    document: Document<'static, String>,
}

impl TypeGraph {
    pub fn new(definitions: Vec<TypeDefinition>) -> Self {
        let document = printer::to_document(&definitions);
        Self::with_document(definitions, document)
    }

    pub(crate) fn with_document(
        definitions: Vec<TypeDefinition>,
        document: Document<'static, String>,
    ) -> Self {
        let mut index = HashMap::with_capacity(definitions.len());
        for (pos, def) in definitions.iter().enumerate() {
            // First declaration wins the name
            index.entry(def.name().to_string()).or_insert(pos);
        }
        Self {
            definitions,
            index,
            document,
        }
    }

    /// Parse SDL text into a type graph
    pub fn parse(sdl: &str) -> crate::Result<Self> {
        loader::load_sdl(sdl)
    }

    pub fn definitions(&self) -> &[TypeDefinition] {
        &self.definitions
    }

    /// Parsed SDL document, including what the model does not carry
    pub fn document(&self) -> &Document<'static, String> {
        &self.document
    }

    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.index.get(name).map(|&pos| &self.definitions[pos])
    }

    pub fn object(&self, name: &str) -> Option<&ObjectType> {
        match self.get(name)? {
            TypeDefinition::Object(t) => Some(t),
            _ => None,
        }
    }

    pub fn enum_type(&self, name: &str) -> Option<&EnumType> {
        match self.get(name)? {
            TypeDefinition::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn objects(&self) -> impl Iterator<Item = &ObjectType> {
        self.definitions.iter().filter_map(|d| match d {
            TypeDefinition::Object(t) => Some(t),
            _ => None,
        })
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumType> {
        self.definitions.iter().filter_map(|d| match d {
            TypeDefinition::Enum(e) => Some(e),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl PartialEq for TypeGraph {
    fn eq(&self, other: &Self) -> bool {
        self.definitions == other.definitions
    }
}

impl Eq for TypeGraph {}
