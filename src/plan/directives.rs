//! Directive extraction
//!
//! `extract` flattens a node's directives into `name -> (argument -> literal)`.
//! A repeated directive name overwrites the earlier one, so only the last
//! occurrence is visible to lookups.
//!
//! The planner never reads the raw map directly: `ObjectDirectives` and
//! `FieldDirectives` parse the three directives the compiler understands
//! into typed values, rejecting arguments those directives do not declare
//! and declared arguments whose literal is not a string.

use std::collections::HashMap;

use crate::error::{MigrateError, Result};
use crate::schema::{Directive, FieldDef, Literal, ObjectType};

/// `@db(table: String, key: String)` on objects
pub const TABLE_DIRECTIVE: &str = "db";
/// `@nodb` on fields
pub const EXCLUDE_DIRECTIVE: &str = "nodb";
/// `@link(field: String)` on fields
pub const LINK_DIRECTIVE: &str = "link";

pub type ArgumentMap = HashMap<String, Literal>;
pub type DirectiveMap = HashMap<String, ArgumentMap>;

pub fn extract(directives: &[Directive]) -> DirectiveMap {
    directives
        .iter()
        .map(|d| (d.name.clone(), d.arguments.iter().cloned().collect()))
        .collect()
}

// =============================================================================
// Typed directives
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableDirective {
    /// Table name override, used verbatim
    pub table: Option<String>,
    /// Field claiming the primary key instead of the first `ID`
    pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDirective {
    /// Counterpart field on the referenced type
    pub field: String,
}

/// Directives the planner reads from an object type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectDirectives {
    pub table: Option<TableDirective>,
}

impl ObjectDirectives {
    pub fn parse(object: &ObjectType) -> Result<Self> {
        let map = extract(&object.directives);
        let table = match map.get(TABLE_DIRECTIVE) {
            Some(args) => {
                check_arguments(TABLE_DIRECTIVE, args, &["table", "key"], &object.name)?;
                Some(TableDirective {
                    table: string_arg(TABLE_DIRECTIVE, args, "table", &object.name)?,
                    key: string_arg(TABLE_DIRECTIVE, args, "key", &object.name)?,
                })
            }
            None => None,
        };
        Ok(Self { table })
    }

    pub fn is_table(&self) -> bool {
        self.table.is_some()
    }
}

/// Directives the planner reads from a field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDirectives {
    pub exclude: bool,
    pub link: Option<LinkDirective>,
}

impl FieldDirectives {
    pub fn parse(owner: &str, field: &FieldDef) -> Result<Self> {
        let map = extract(&field.directives);
        let location = format!("{}.{}", owner, field.name);

        let exclude = match map.get(EXCLUDE_DIRECTIVE) {
            Some(args) => {
                check_arguments(EXCLUDE_DIRECTIVE, args, &[], &location)?;
                true
            }
            None => false,
        };

        let link = match map.get(LINK_DIRECTIVE) {
            Some(args) => {
                check_arguments(LINK_DIRECTIVE, args, &["field"], &location)?;
                let target = string_arg(LINK_DIRECTIVE, args, "field", &location)?
                    .filter(|f| !f.is_empty())
                    .ok_or_else(|| MigrateError::BadLinkDirective {
                        owner: owner.to_string(),
                        field: field.name.clone(),
                        reason: "missing required argument 'field'".to_string(),
                    })?;
                Some(LinkDirective { field: target })
            }
            None => None,
        };

        Ok(Self { exclude, link })
    }
}

fn check_arguments(directive: &str, args: &ArgumentMap, allowed: &[&str], location: &str) -> Result<()> {
    let mut names: Vec<&String> = args.keys().collect();
    names.sort();
    match names.into_iter().find(|name| !allowed.contains(&name.as_str())) {
        Some(unknown) => Err(MigrateError::UnknownDirectiveArgument {
            directive: directive.to_string(),
            argument: unknown.clone(),
            location: location.to_string(),
        }),
        None => Ok(()),
    }
}

/// A `String` argument; `null` counts as absent, any other literal is rejected
fn string_arg(directive: &str, args: &ArgumentMap, name: &str, location: &str) -> Result<Option<String>> {
    match args.get(name) {
        None => Ok(None),
        Some(Literal::String(value)) => Ok(Some(value.clone())),
        Some(Literal::Raw(raw)) if raw == "null" => Ok(None),
        Some(Literal::Raw(raw)) => Err(MigrateError::InvalidDirectiveArgument {
            directive: directive.to_string(),
            argument: name.to_string(),
            location: location.to_string(),
            found: raw.clone(),
        }),
    }
}
