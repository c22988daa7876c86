//! Identifier normalization
//!
//! Type names become table names by snake-casing and pluralizing the last
//! word: `BookAuthor` -> `book_authors`. Field names become column names by
//! snake-casing only.

use heck::ToSnakeCase;

/// Table (and foreign-key column) form of an identifier
pub fn normalize(identifier: &str) -> String {
    let snake = identifier.to_snake_case();
    match snake.rsplit_once('_') {
        Some((head, last)) => format!("{}_{}", head, cruet::to_plural(last)),
        None => cruet::to_plural(&snake),
    }
}

/// Column form of a field name
pub fn column_name(field: &str) -> String {
    field.to_snake_case()
}
