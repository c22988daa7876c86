//! Code Generation
//!
//! Turns a `PlanResult` into migration source.
//!
//! Architecture:
//! - PlanResult: frozen output of the planner, never mutated here
//! - Emitters: target-specific renderers that consume the plan only
//!
//! Emitters never look at the type graph, only at planned tables and links.

pub mod knex;

use tracing::info;

use crate::config::EmitConfig;
use crate::plan::PlanResult;

// =============================================================================
// Generated Output
// =============================================================================

/// Output from migration generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMigration {
    /// Migration module source
    pub code: String,
    /// Number of tables created
    pub tables: usize,
    /// Number of foreign-key columns
    pub links: usize,
    /// Number of scalar and enum columns
    pub columns: usize,
}

// =============================================================================
// Public API
// =============================================================================

/// Render a plan as a knex migration
pub fn generate(plan: &PlanResult, config: &EmitConfig) -> GeneratedMigration {
    let code = knex::emit(&plan.tables, &plan.links, &plan.table_names, config);

    let generated = GeneratedMigration {
        code,
        tables: plan.tables.len(),
        links: plan.link_count(),
        columns: plan.tables.iter().map(|t| t.columns.len()).sum(),
    };
    info!(
        tables = generated.tables,
        columns = generated.columns,
        links = generated.links,
        "generated migration"
    );
    generated
}
