// ABOUTME: Migration directory scanner
// ABOUTME: Discovers the tables declared by schema migrations from file names and contents

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Extension of Laravel migration files
pub const DEFAULT_MIGRATION_EXTENSION: &str = "php";

/// A migration file that could not be read during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanDiagnostic {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for ScanDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Result of scanning a migrations directory
#[derive(Debug, Clone, Default)]
pub struct MigrationScan {
    /// Every table name declared by at least one migration
    pub tables: BTreeSet<String>,
    /// Files that matched the extension but could not be read
    pub diagnostics: Vec<ScanDiagnostic>,
    /// Number of files matching the migration extension
    pub files_scanned: usize,
}

/// Extracts declared table names from migration files
///
/// Two independent rules are applied to every file and their results are
/// merged:
/// - the file name `..._create_<table>_table.<ext>`
/// - every `Schema::create('<table>'` call in the file body
///
/// The rules are allowed to disagree. A misnamed migration contributes both
/// the name from its file name and the table it actually creates.
#[derive(Debug, Clone)]
pub struct MigrationScanner {
    suffix: String,
    filename_pattern: Regex,
    create_pattern: Regex,
}

impl MigrationScanner {
    /// Build a scanner for files ending in `.<extension>`
    ///
    /// A leading dot on `extension` is accepted.
    pub fn new(extension: &str) -> Result<Self> {
        let extension = extension.trim_start_matches('.');

        let filename_pattern = Regex::new(&format!(
            r"create_([a-z_]+)_table\.{}$",
            regex::escape(extension)
        ))
        .context("Failed to build migration filename pattern")?;

        let create_pattern = Regex::new(r#"Schema::create\s*\(\s*['"]([^'"]+)['"]"#)
            .context("Failed to build Schema::create pattern")?;

        Ok(Self {
            suffix: format!(".{}", extension),
            filename_pattern,
            create_pattern,
        })
    }

    /// Whether a directory entry name looks like a migration file
    pub fn is_migration_file(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.suffix)
    }

    /// Table name encoded in a migration file name, if any
    ///
    /// # Examples
    ///
    /// ```
    /// # use migration_backup_audit::migration::MigrationScanner;
    /// let scanner = MigrationScanner::new("php").unwrap();
    /// assert_eq!(
    ///     scanner.table_from_filename("2024_12_31_194332_create_cash_boxes_table.php"),
    ///     Some("cash_boxes".to_string())
    /// );
    /// assert_eq!(
    ///     scanner.table_from_filename("2024_12_20_131955_add_created_by_to_roles_table.php"),
    ///     None
    /// );
    /// ```
    pub fn table_from_filename(&self, file_name: &str) -> Option<String> {
        self.filename_pattern
            .captures(file_name)
            .map(|captures| captures[1].to_string())
    }

    /// Every table created by `Schema::create` calls in a migration body
    pub fn tables_from_content(&self, content: &str) -> Vec<String> {
        self.create_pattern
            .captures_iter(content)
            .map(|captures| captures[1].to_string())
            .collect()
    }

    /// Scan a migrations directory
    ///
    /// Only the top level of `dir` is inspected. Files that cannot be read
    /// still contribute their file-name table and are reported as
    /// diagnostics instead of failing the scan.
    ///
    /// # Errors
    ///
    /// Fails if the directory itself cannot be listed.
    pub async fn scan(&self, dir: impl AsRef<Path>) -> Result<MigrationScan> {
        let dir = dir.as_ref();
        tracing::info!("Scanning migrations in {}", dir.display());

        let mut scan = MigrationScan::default();

        for path in list_directory(dir).await? {
            // Names that are not valid UTF-8 are matched in their lossy form
            let Some(file_name) = path.file_name().map(|name| name.to_string_lossy()) else {
                continue;
            };

            if !self.is_migration_file(&file_name) {
                continue;
            }
            scan.files_scanned += 1;

            if let Some(table) = self.table_from_filename(&file_name) {
                tracing::debug!("{}: declares '{}' by name", file_name, table);
                scan.tables.insert(table);
            }

            match tokio::fs::read_to_string(&path).await {
                Ok(content) => {
                    for table in self.tables_from_content(&content) {
                        tracing::debug!("{}: creates '{}'", file_name, table);
                        scan.tables.insert(table);
                    }
                }
                Err(e) => record_diagnostic(&mut scan.diagnostics, &path, e.to_string()),
            }
        }

        tracing::info!(
            "✓ Found {} tables across {} migration files",
            scan.tables.len(),
            scan.files_scanned
        );
        if !scan.diagnostics.is_empty() {
            tracing::warn!(
                "⚠ Skipped {} unreadable migration file(s)",
                scan.diagnostics.len()
            );
        }

        Ok(scan)
    }
}

/// List the entries of a directory sorted by path
pub(crate) async fn list_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read migrations directory '{}'", dir.display()))?;

    let mut paths = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("Failed to list migrations directory '{}'", dir.display()))?
    {
        paths.push(entry.path());
    }
    paths.sort();

    Ok(paths)
}

pub(crate) fn record_diagnostic(diagnostics: &mut Vec<ScanDiagnostic>, path: &Path, reason: String) {
    let diagnostic = ScanDiagnostic {
        path: path.to_path_buf(),
        reason,
    };
    tracing::warn!("Skipping migration file {}", diagnostic);
    diagnostics.push(diagnostic);
}
