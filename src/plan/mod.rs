//! Table Planning
//!
//! Decides, for every `@db` object type, which table it becomes and what
//! columns that table holds. Each field goes through one linear decision:
//!
//! - `@nodb` → no column
//! - built-in scalar → typed column (array-shaped → `json`)
//! - `@link(field:)` to an object → foreign-key link on the owner table
//! - non-array enum → enum column with the enum's values
//! - anything else → `json` column
//!
//! The result is a `PlanResult` value; nothing here is shared between runs.

pub mod directives;
pub mod enums;
pub mod type_ref;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::LinkConfig;
use crate::error::{MigrateError, Result};
use crate::naming::{column_name, normalize};
use crate::schema::{ObjectType, TypeGraph};

pub use directives::{FieldDirectives, LinkDirective, ObjectDirectives, TableDirective};
pub use enums::EnumTable;
pub use type_ref::TypeRef;

// =============================================================================
// Scalar Kinds
// =============================================================================

/// Built-in scalar kinds and the column type each maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    Integer,
    Float,
    Boolean,
    String,
    Identifier,
    DateTime,
    Date,
    Time,
    Json,
}

impl ScalarKind {
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "Int" => Some(Self::Integer),
            "Float" => Some(Self::Float),
            "Boolean" => Some(Self::Boolean),
            "String" => Some(Self::String),
            "ID" => Some(Self::Identifier),
            "DateTime" => Some(Self::DateTime),
            "Date" => Some(Self::Date),
            "Time" => Some(Self::Time),
            "JSON" => Some(Self::Json),
            _ => None,
        }
    }

    /// Schema-builder method that creates a column of this kind
    pub fn builder_method(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Identifier => "uuid",
            Self::DateTime => "datetime",
            Self::Date => "date",
            Self::Time => "time",
            Self::Json => "json",
        }
    }
}

// =============================================================================
// Plan Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnSpec {
    Scalar {
        column_name: String,
        kind: ScalarKind,
        required: bool,
        is_primary: bool,
    },
    Enum {
        column_name: String,
        enum_name: String,
        values: Vec<String>,
        required: bool,
    },
}

impl ColumnSpec {
    pub fn column_name(&self) -> &str {
        match self {
            ColumnSpec::Scalar { column_name, .. } | ColumnSpec::Enum { column_name, .. } => {
                column_name
            }
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, ColumnSpec::Scalar { is_primary: true, .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    pub table_name: String,
    /// Scalar and enum columns in field declaration order
    pub columns: Vec<ColumnSpec>,
    /// Column name of the primary key, if any field claimed it
    pub primary_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSpec {
    pub owner_table: String,
    pub foreign_key_column: String,
    pub target_table: String,
    /// Primary-key column of the target table
    pub target_column: String,
}

/// Output of one planning pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanResult {
    pub tables: Vec<TableSpec>,
    /// Owner table -> links in field declaration order
    pub links: HashMap<String, Vec<LinkSpec>>,
    /// Table names in schema declaration order
    pub table_names: Vec<String>,
    pub enums: EnumTable,
}

impl PlanResult {
    pub fn table(&self, name: &str) -> Option<&TableSpec> {
        self.tables.iter().find(|t| t.table_name == name)
    }

    pub fn links_for(&self, table: &str) -> &[LinkSpec] {
        self.links.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn link_count(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }
}

// =============================================================================
// Planner
// =============================================================================

/// Plan every `@db` object in `graph`
pub fn plan(graph: &TypeGraph, links: &LinkConfig) -> Result<PlanResult> {
    Planner::new(graph, links).run()
}

struct Planner<'a> {
    graph: &'a TypeGraph,
    config: &'a LinkConfig,
    enums: EnumTable,
}

impl<'a> Planner<'a> {
    fn new(graph: &'a TypeGraph, config: &'a LinkConfig) -> Self {
        Self {
            graph,
            config,
            enums: EnumTable::from_graph(graph),
        }
    }

    fn run(self) -> Result<PlanResult> {
        let mut result = PlanResult::default();
        // Table name -> type that claimed it
        let mut owners: HashMap<String, &str> = HashMap::new();

        for object in self.graph.objects() {
            let directives = ObjectDirectives::parse(object)?;
            let Some(table) = directives.table else {
                debug!(type_name = %object.name, "no @db, skipping");
                continue;
            };

            let (spec, links) = self.plan_table(object, &table)?;
            if let Some(previous) = owners.insert(spec.table_name.clone(), &object.name) {
                return Err(MigrateError::BadTableDirective {
                    owner: object.name.clone(),
                    reason: format!("table '{}' already defined by {}", spec.table_name, previous),
                });
            }
            debug!(
                table = %spec.table_name,
                columns = spec.columns.len(),
                links = links.len(),
                "planned table"
            );

            result.table_names.push(spec.table_name.clone());
            if !links.is_empty() {
                result
                    .links
                    .entry(spec.table_name.clone())
                    .or_default()
                    .extend(links);
            }
            result.tables.push(spec);
        }

        result.enums = self.enums;
        Ok(result)
    }

    fn plan_table(&self, object: &ObjectType, table: &TableDirective) -> Result<(TableSpec, Vec<LinkSpec>)> {
        let table_name = table_name(object, table);
        if let Some(key) = &table.key {
            check_key_field(object, key)?;
        }

        let mut columns = Vec::with_capacity(object.fields.len());
        let mut links = Vec::new();
        let mut primary_key: Option<String> = None;

        for field in &object.fields {
            let directives = FieldDirectives::parse(&object.name, field)?;
            if directives.exclude {
                debug!(field = %field.name, "@nodb, skipping");
                continue;
            }

            let ty = type_ref::resolve(&field.field_type);
            let name = column_name(&field.name);

            if let Some(kind) = ScalarKind::from_type_name(&ty.name) {
                if directives.link.is_some() {
                    warn!(owner = %object.name, field = %field.name, "@link on a scalar field is ignored");
                }
                if ty.array {
                    columns.push(ColumnSpec::Scalar {
                        column_name: name,
                        kind: ScalarKind::Json,
                        required: ty.required,
                        is_primary: false,
                    });
                    continue;
                }

                let claims_key = primary_key.is_none()
                    && match &table.key {
                        Some(key) => *key == field.name,
                        None => kind == ScalarKind::Identifier,
                    };
                if claims_key {
                    primary_key = Some(name.clone());
                }
                columns.push(ColumnSpec::Scalar {
                    column_name: name,
                    kind,
                    required: ty.required,
                    is_primary: claims_key,
                });
            } else if let Some(link) = &directives.link {
                links.push(self.plan_link(object, &field.name, &ty, link, &table_name)?);
            } else if let (Some(values), false) = (self.enums.get(&ty.name), ty.array) {
                columns.push(ColumnSpec::Enum {
                    column_name: name,
                    enum_name: ty.name.clone(),
                    values: values.to_vec(),
                    required: ty.required,
                });
            } else {
                debug!(field = %field.name, type_name = %ty.name, "falling back to json column");
                columns.push(ColumnSpec::Scalar {
                    column_name: name,
                    kind: ScalarKind::Json,
                    required: ty.required,
                    is_primary: false,
                });
            }
        }

        Ok((
            TableSpec {
                table_name,
                columns,
                primary_key,
            },
            links,
        ))
    }

    fn plan_link(
        &self,
        owner: &ObjectType,
        field: &str,
        ty: &TypeRef,
        link: &LinkDirective,
        owner_table: &str,
    ) -> Result<LinkSpec> {
        let target = self.graph.object(&ty.name).ok_or_else(|| MigrateError::BadLinkDirective {
            owner: owner.name.clone(),
            field: field.to_string(),
            reason: format!("'{}' is not an object type", ty.name),
        })?;

        if self.config.strict && target.field(&link.field).is_none() {
            return Err(MigrateError::missing_link_target(
                &owner.name,
                field,
                &target.name,
                &link.field,
            ));
        }

        let target_directives = ObjectDirectives::parse(target)?.table.unwrap_or_default();
        let spec = LinkSpec {
            owner_table: owner_table.to_string(),
            foreign_key_column: normalize(&link.field),
            target_table: table_name(target, &target_directives),
            target_column: primary_column(target, &target_directives)?,
        };
        debug!(
            owner = %spec.owner_table,
            column = %spec.foreign_key_column,
            target = %spec.target_table,
            "planned link"
        );
        Ok(spec)
    }
}

fn table_name(object: &ObjectType, table: &TableDirective) -> String {
    table.table.clone().unwrap_or_else(|| normalize(&object.name))
}

/// Column the planner would mark primary on `object`, defaulting to `id`
fn primary_column(object: &ObjectType, table: &TableDirective) -> Result<String> {
    if let Some(key) = &table.key {
        return Ok(column_name(key));
    }
    for field in &object.fields {
        if FieldDirectives::parse(&object.name, field)?.exclude {
            continue;
        }
        let ty = type_ref::resolve(&field.field_type);
        if !ty.array && ScalarKind::from_type_name(&ty.name) == Some(ScalarKind::Identifier) {
            return Ok(column_name(&field.name));
        }
    }
    Ok("id".to_string())
}

fn check_key_field(object: &ObjectType, key: &str) -> Result<()> {
    let bad = |reason: String| MigrateError::BadTableDirective {
        owner: object.name.clone(),
        reason,
    };

    let field = object
        .field(key)
        .ok_or_else(|| bad(format!("key field '{}' does not exist", key)))?;
    if FieldDirectives::parse(&object.name, field)?.exclude {
        return Err(bad(format!("key field '{}' is excluded with @nodb", key)));
    }
    let ty = type_ref::resolve(&field.field_type);
    if ty.array || ScalarKind::from_type_name(&ty.name).is_none() {
        return Err(bad(format!("key field '{}' must be a non-list scalar", key)));
    }
    Ok(())
}
