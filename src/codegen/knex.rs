//! Knex Migration Emitter
//!
//! Renders a plan as a CommonJS knex migration with `exports.up` and
//! `exports.down`.
//!
//! Key constraints:
//! - Tables are created in schema declaration order, with no dependency sort
//! - Within a table: scalar columns, then link columns, then enum columns
//! - `down` drops in the same order as `up` unless `reverse_drops` is set

use std::collections::HashMap;

use crate::config::EmitConfig;
use crate::plan::{ColumnSpec, LinkSpec, TableSpec};

/// Render the migration module
pub fn emit(
    tables: &[TableSpec],
    links: &HashMap<String, Vec<LinkSpec>>,
    table_names: &[String],
    config: &EmitConfig,
) -> String {
    let pad = Indent(config.indent);
    let mut output = String::new();

    output.push_str("exports.up = function (knex) {\n");
    if tables.is_empty() {
        output.push_str(&format!("{}return Promise.resolve();\n", pad.level(1)));
    } else {
        output.push_str(&format!("{}return knex.schema", pad.level(1)));
        for table in tables {
            let table_links = links.get(&table.table_name).map(Vec::as_slice).unwrap_or(&[]);
            emit_create_table(&mut output, table, table_links, pad);
        }
        output.push_str(";\n");
    }
    output.push_str("};\n\n");

    output.push_str("exports.down = function (knex) {\n");
    if table_names.is_empty() {
        output.push_str(&format!("{}return Promise.resolve();\n", pad.level(1)));
    } else {
        output.push_str(&format!("{}return knex.schema", pad.level(1)));
        let drops: Box<dyn Iterator<Item = &String>> = if config.reverse_drops {
            Box::new(table_names.iter().rev())
        } else {
            Box::new(table_names.iter())
        };
        for name in drops {
            output.push_str(&format!("\n{}.dropTable({})", pad.level(2), quote(name)));
        }
        output.push_str(";\n");
    }
    output.push_str("};\n");

    output
}

fn emit_create_table(output: &mut String, table: &TableSpec, links: &[LinkSpec], pad: Indent) {
    output.push_str(&format!(
        "\n{}.createTable({}, function (table) {{\n",
        pad.level(2),
        quote(&table.table_name)
    ));

    let body = pad.level(3);
    for column in &table.columns {
        if let ColumnSpec::Scalar { .. } = column {
            output.push_str(&format!("{}{};\n", body, render_column(column)));
        }
    }
    for link in links {
        output.push_str(&format!("{}{};\n", body, render_link(link)));
    }
    for column in &table.columns {
        if let ColumnSpec::Enum { .. } = column {
            output.push_str(&format!("{}{};\n", body, render_column(column)));
        }
    }

    output.push_str(&format!("{}}})", pad.level(2)));
}

fn render_column(column: &ColumnSpec) -> String {
    match column {
        ColumnSpec::Scalar {
            column_name,
            kind,
            required,
            is_primary,
        } => {
            let mut call = format!("table.{}({})", kind.builder_method(), quote(column_name));
            if *required {
                call.push_str(".notNullable()");
            }
            if *is_primary {
                call.push_str(".primary()");
            }
            call
        }
        ColumnSpec::Enum {
            column_name,
            values,
            required,
            ..
        } => {
            let values: Vec<String> = values.iter().map(|v| quote(v)).collect();
            let mut call = format!("table.enu({}, [{}])", quote(column_name), values.join(", "));
            if *required {
                call.push_str(".notNullable()");
            }
            call
        }
    }
}

fn render_link(link: &LinkSpec) -> String {
    format!(
        "table.uuid({}).index().references({}).inTable({})",
        quote(&link.foreign_key_column),
        quote(&link.target_column),
        quote(&link.target_table)
    )
}

/// Single-quoted JavaScript string literal
pub(crate) fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\'' => quoted.push_str("\\'"),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

#[derive(Debug, Clone, Copy)]
struct Indent(usize);

impl Indent {
    fn level(self, depth: usize) -> String {
        " ".repeat(self.0 * depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::ScalarKind;

    fn id_column() -> ColumnSpec {
        ColumnSpec::Scalar {
            column_name: "id".into(),
            kind: ScalarKind::Identifier,
            required: true,
            is_primary: true,
        }
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("books"), "'books'");
        assert_eq!(quote("it's"), "'it\\'s'");
        assert_eq!(quote("a\\b"), "'a\\\\b'");
    }

    #[test]
    fn test_render_scalar_modifiers() {
        assert_eq!(render_column(&id_column()), "table.uuid('id').notNullable().primary()");

        let nullable = ColumnSpec::Scalar {
            column_name: "score".into(),
            kind: ScalarKind::Float,
            required: false,
            is_primary: false,
        };
        assert_eq!(render_column(&nullable), "table.float('score')");
    }

    #[test]
    fn test_render_enum() {
        let column = ColumnSpec::Enum {
            column_name: "status".into(),
            enum_name: "Status".into(),
            values: vec!["ACTIVE".into(), "INACTIVE".into()],
            required: true,
        };
        assert_eq!(
            render_column(&column),
            "table.enu('status', ['ACTIVE', 'INACTIVE']).notNullable()"
        );
    }

    #[test]
    fn test_emit_full_module() {
        let tables = vec![TableSpec {
            table_name: "books".into(),
            columns: vec![
                ColumnSpec::Enum {
                    column_name: "state".into(),
                    enum_name: "State".into(),
                    values: vec!["DRAFT".into()],
                    required: false,
                },
                id_column(),
            ],
            primary_key: Some("id".into()),
        }];
        let mut links = HashMap::new();
        links.insert(
            "books".to_string(),
            vec![LinkSpec {
                owner_table: "books".into(),
                foreign_key_column: "authors".into(),
                target_table: "authors".into(),
                target_column: "id".into(),
            }],
        );

        let code = emit(&tables, &links, &["books".to_string()], &EmitConfig::default());
        let expected = "\
exports.up = function (knex) {
  return knex.schema
    .createTable('books', function (table) {
      table.uuid('id').notNullable().primary();
      table.uuid('authors').index().references('id').inTable('authors');
      table.enu('state', ['DRAFT']);
    });
};

exports.down = function (knex) {
  return knex.schema
    .dropTable('books');
};
";
        assert_eq!(code, expected);
    }

    #[test]
    fn test_emit_empty_plan() {
        let code = emit(&[], &HashMap::new(), &[], &EmitConfig::default());
        assert_eq!(
            code,
            "exports.up = function (knex) {\n  return Promise.resolve();\n};\n\n\
             exports.down = function (knex) {\n  return Promise.resolve();\n};\n"
        );
    }

    #[test]
    fn test_drop_order() {
        let names = vec!["a".to_string(), "b".to_string()];
        let tables: Vec<TableSpec> = names
            .iter()
            .map(|n| TableSpec { table_name: n.clone(), columns: vec![], primary_key: None })
            .collect();

        let forward = emit(&tables, &HashMap::new(), &names, &EmitConfig::default());
        assert!(forward.contains(".dropTable('a')\n    .dropTable('b');"));

        let config = EmitConfig { reverse_drops: true, ..EmitConfig::default() };
        let reversed = emit(&tables, &HashMap::new(), &names, &config);
        assert!(reversed.contains(".dropTable('b')\n    .dropTable('a');"));
    }

    #[test]
    fn test_indent_width() {
        let tables = vec![TableSpec { table_name: "a".into(), columns: vec![id_column()], primary_key: None }];
        let config = EmitConfig { indent: 4, ..EmitConfig::default() };
        let code = emit(&tables, &HashMap::new(), &["a".to_string()], &config);
        assert!(code.contains("\n            table.uuid('id')"));
    }
}
