//! Compiler facade
//!
//! Runs the whole pipeline for one schema: plan the tables, then render the
//! migration. Every call owns its own plan, so one `Compiler` can be shared
//! across threads and schemas.

use tracing::debug;

use crate::codegen::{self, GeneratedMigration};
use crate::config::CompilerConfig;
use crate::error::Result;
use crate::plan::{self, PlanResult};
use crate::schema::TypeGraph;

#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Plan without rendering
    pub fn plan(&self, graph: &TypeGraph) -> Result<PlanResult> {
        plan::plan(graph, &self.config.links)
    }

    /// Compile a parsed schema into a migration module
    pub fn compile(&self, graph: &TypeGraph) -> Result<GeneratedMigration> {
        debug!(types = graph.len(), "compiling schema");
        let plan = self.plan(graph)?;
        Ok(codegen::generate(&plan, &self.config.emit))
    }

    /// Parse SDL, then compile it
    pub fn compile_sdl(&self, sdl: &str) -> Result<GeneratedMigration> {
        let graph = TypeGraph::parse(sdl)?;
        self.compile(&graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MigrateError;

    #[test]
    fn test_compile_sdl() {
        let compiler = Compiler::default();
        let generated = compiler.compile_sdl("type Note @db { id: ID! body: String }").unwrap();

        assert!(generated.code.contains(".createTable('notes', function (table) {"));
        assert!(generated.code.contains("table.string('body');"));
        assert!(generated.code.contains(".dropTable('notes');"));
    }

    #[test]
    fn test_compile_sdl_parse_error() {
        let err = Compiler::default().compile_sdl("type Broken {").unwrap_err();
        assert!(matches!(err, MigrateError::Parse(_)));
    }

    #[test]
    fn test_compiles_are_independent() {
        let compiler = Compiler::default();
        let first = compiler.compile_sdl("type A @db { id: ID! }").unwrap();
        let second = compiler.compile_sdl("type B @db { id: ID! }").unwrap();

        assert!(!second.code.contains("'as'"));
        assert_eq!(first.tables, 1);
        assert_eq!(second.tables, 1);
    }
}
