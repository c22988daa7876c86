//! Configuration management for the migration compiler
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (schema-migrate.toml)
//! - Environment variables (SCHEMA_MIGRATE__*)
//!
//! ## Example config file (schema-migrate.toml):
//! ```toml
//! [emit]
//! reverse_drops = false
//! indent = 2
//!
//! [links]
//! strict = false
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Main configuration for the compiler
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Emitter settings
    #[serde(default)]
    pub emit: EmitConfig,

    /// Link resolution settings
    #[serde(default)]
    pub links: LinkConfig,
}

/// Emitter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitConfig {
    /// Drop tables in reverse creation order in `down`
    #[serde(default)]
    pub reverse_drops: bool,

    /// Spaces per indentation level in the generated module
    #[serde(default = "default_indent")]
    pub indent: usize,
}

/// Link resolution configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Require the `@link(field:)` target to exist on the referenced type
    #[serde(default)]
    pub strict: bool,
}

fn default_indent() -> usize {
    2
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            reverse_drops: false,
            indent: default_indent(),
        }
    }
}

impl CompilerConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, layering a specific file over the defaults
    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = [
            "schema-migrate.toml",
            ".schema-migrate.toml",
            "config/schema-migrate.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "schema-migrate") {
            let xdg_config = config_dir.config_dir().join("schema-migrate.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("SCHEMA_MIGRATE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MigrateError;

    #[test]
    fn test_default_config() {
        let config = CompilerConfig::default();
        assert!(!config.emit.reverse_drops);
        assert_eq!(config.emit.indent, 2);
        assert!(!config.links.strict);
    }

    #[test]
    fn test_serialize_config() {
        let config = CompilerConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[emit]"));
        assert!(toml_str.contains("[links]"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[emit]\nreverse_drops = true\n\n[links]\nstrict = true\n").unwrap();

        let config = CompilerConfig::load_from(Some(&path)).unwrap();
        assert!(config.emit.reverse_drops);
        assert!(config.links.strict);
        assert_eq!(config.emit.indent, 2);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let mut config = CompilerConfig::default();
        config.emit.indent = 4;
        config.save(&path).unwrap();

        let loaded = CompilerConfig::load_from(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = CompilerConfig::load_from(Some(&path)).unwrap_err();
        assert!(matches!(err, MigrateError::Config(_)));
    }

    #[test]
    fn test_malformed_value_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[emit]\nindent = \"wide\"\n").unwrap();

        let err = CompilerConfig::load_from(Some(&path)).unwrap_err();
        assert!(matches!(err, MigrateError::Config(_)));
    }

    #[test]
    fn test_save_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("schema-migrate.toml");

        let err = CompilerConfig::default().save(&path).unwrap_err();
        assert!(matches!(err, MigrateError::Io(_)));
    }
}
