// ABOUTME: Configuration for input and output locations
// ABOUTME: Loads optional TOML overrides on top of the conventional defaults

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::migration::DEFAULT_MIGRATION_EXTENSION;

pub const DEFAULT_BACKUP_PATH: &str = "u715355537_bill_api-5-12-2025.json";
pub const DEFAULT_MIGRATIONS_DIR: &str = "database/migrations";
pub const DEFAULT_ANALYSIS_OUTPUT: &str = "backup_analysis_result.txt";
pub const DEFAULT_COMPARISON_OUTPUT: &str = "detailed_table_analysis.txt";
pub const DEFAULT_AUDIT_OUTPUT: &str = "migration_audit_report.txt";

/// Input and output locations used by every command
///
/// Paths are relative to the working directory unless absolute. Every field
/// may be omitted from a config file and falls back to the conventional
/// Laravel project layout.
///
/// ```toml
/// backup_path = "dumps/prod.json"
/// migrations_dir = "database/migrations"
/// analysis_output = "reports/backup_analysis_result.txt"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    pub backup_path: PathBuf,
    pub migrations_dir: PathBuf,
    pub migration_extension: String,
    pub analysis_output: PathBuf,
    pub comparison_output: PathBuf,
    pub audit_output: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            backup_path: PathBuf::from(DEFAULT_BACKUP_PATH),
            migrations_dir: PathBuf::from(DEFAULT_MIGRATIONS_DIR),
            migration_extension: DEFAULT_MIGRATION_EXTENSION.to_string(),
            analysis_output: PathBuf::from(DEFAULT_ANALYSIS_OUTPUT),
            comparison_output: PathBuf::from(DEFAULT_COMPARISON_OUTPUT),
            audit_output: PathBuf::from(DEFAULT_AUDIT_OUTPUT),
        }
    }
}

impl AuditConfig {
    /// Parse a config from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid audit configuration")
    }
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Fails if the file cannot be read, is not valid TOML, or contains keys
/// other than the ones [`AuditConfig`] defines.
pub fn load_config_from_file(path: impl AsRef<Path>) -> Result<AuditConfig> {
    let path = path.as_ref();
    tracing::debug!("Loading configuration from {}", path.display());

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

    AuditConfig::from_toml(&contents)
        .with_context(|| format!("Failed to load config file '{}'", path.display()))
}
