//! Schema Migrate
//!
//! Compiles a directive-annotated GraphQL schema into a reversible knex
//! migration module.
//!
//! ## Directives
//!
//! - **`@db(table, key)`**: the object type becomes a table
//! - **`@nodb`**: the field gets no column
//! - **`@link(field)`**: the field becomes an indexed foreign key into the
//!   referenced type's table
//!
//! ## Pipeline
//!
//! ```text
//! SDL ──loader──▶ TypeGraph ──plan──▶ PlanResult ──codegen──▶ exports.up / exports.down
//!                     │
//!                     └──printer──▶ normalized SDL
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use schema_migrate::{Compiler, CompilerConfig};
//!
//! let compiler = Compiler::new(CompilerConfig::default());
//! let migration = compiler.compile_sdl(sdl)?;
//! std::fs::write("migrations/001_init.js", migration.code)?;
//! ```

pub mod codegen;
pub mod compiler;
pub mod config;
pub mod error;
pub mod naming;
pub mod plan;
pub mod schema;

pub use codegen::GeneratedMigration;
pub use compiler::Compiler;
pub use config::{CompilerConfig, EmitConfig, LinkConfig};
pub use error::{MigrateError, Result};
pub use plan::{ColumnSpec, LinkSpec, PlanResult, ScalarKind, TableSpec};
pub use schema::{print_schema, print_schema_with_directives, TypeGraph, DIRECTIVE_DEFINITIONS};
