//! Error types for the migration compiler

use thiserror::Error;

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, MigrateError>;

/// Migration compiler errors
#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("Schema parse error: {0}")]
    Parse(String),

    #[error("Bad @link on {owner}.{field}: {reason}")]
    BadLinkDirective {
        owner: String,
        field: String,
        reason: String,
    },

    #[error("Bad @db on {owner}: {reason}")]
    BadTableDirective { owner: String, reason: String },

    #[error("Unknown argument '{argument}' for @{directive} on {location}")]
    UnknownDirectiveArgument {
        directive: String,
        argument: String,
        location: String,
    },

    #[error("Argument '{argument}' of @{directive} on {location} must be a string, found {found}")]
    InvalidDirectiveArgument {
        directive: String,
        argument: String,
        location: String,
        found: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),
}

impl MigrateError {
    /// Link whose named counterpart field is missing on the referenced type
    pub fn missing_link_target(owner: &str, field: &str, target: &str, target_field: &str) -> Self {
        Self::BadLinkDirective {
            owner: owner.to_string(),
            field: field.to_string(),
            reason: format!("field '{}' does not exist on {}", target_field, target),
        }
    }
}
