// ABOUTME: Destructive operation audit for migrations
// ABOUTME: Flags drop and rename calls inside migration up() methods

use super::scanner::{list_directory, record_diagnostic, ScanDiagnostic};
use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;

/// Collected up() bodies shorter than this are still signature fragments
const MIN_UP_BODY_LEN: usize = 30;

/// Destructive calls found in a single migration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestructiveFinding {
    pub file: String,
    pub operations: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MigrationAudit {
    pub findings: Vec<DestructiveFinding>,
    pub diagnostics: Vec<ScanDiagnostic>,
    pub files_scanned: usize,
}

/// Find destructive schema operations inside `up()` methods
///
/// Each `up()` body is collected by brace counting from the line declaring
/// it. Calls to `drop`, `dropColumn`, `dropTable`, `dropIfExists` and
/// `renameColumn` within the body are returned verbatim, trimmed. Calls in
/// `down()` are rollbacks and are not reported.
pub fn find_destructive_operations(content: &str) -> Result<Vec<String>> {
    let up_pattern =
        Regex::new(r"public\s+function\s+up\s*\(").context("Failed to build up() pattern")?;
    let danger_pattern =
        Regex::new(r"(?s)(dropColumn|dropTable|renameColumn|dropIfExists|drop)\s*\(\s*(.*?)\)")
            .context("Failed to build destructive call pattern")?;

    let mut operations = Vec::new();
    let mut in_up = false;
    let mut up_body = String::new();
    let mut brace_depth: i64 = 0;

    for line in content.split_inclusive('\n') {
        if up_pattern.is_match(line) {
            in_up = true;
        }
        if !in_up {
            continue;
        }

        up_body.push_str(line);
        brace_depth += line.matches('{').count() as i64;
        brace_depth -= line.matches('}').count() as i64;

        if brace_depth == 0 && line.contains('}') && up_body.trim().len() > MIN_UP_BODY_LEN {
            in_up = false;
            operations.extend(
                danger_pattern
                    .find_iter(&up_body)
                    .map(|m| m.as_str().trim().to_string()),
            );
            up_body.clear();
        }
    }

    Ok(operations)
}

/// Audit every regular file in a migrations directory
///
/// Files are visited in name order. Content that is not valid UTF-8 is
/// audited in its lossy form. Unreadable files are skipped and recorded as
/// diagnostics.
pub async fn audit_migrations(dir: impl AsRef<Path>) -> Result<MigrationAudit> {
    let dir = dir.as_ref();
    tracing::info!("Auditing migrations in {} for destructive operations", dir.display());

    let mut audit = MigrationAudit::default();

    for path in list_directory(dir).await? {
        let is_file = tokio::fs::metadata(&path)
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false);
        if !is_file {
            continue;
        }

        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        audit.files_scanned += 1;

        let content = match tokio::fs::read(&path).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                record_diagnostic(&mut audit.diagnostics, &path, e.to_string());
                continue;
            }
        };

        let operations = find_destructive_operations(&content)?;
        if !operations.is_empty() {
            tracing::warn!(
                "⚠ {}: {} destructive operation(s) in up()",
                file,
                operations.len()
            );
            audit.findings.push(DestructiveFinding { file, operations });
        }
    }

    tracing::info!(
        "✓ Audited {} migration files, {} with destructive operations",
        audit.files_scanned,
        audit.findings.len()
    );
    Ok(audit)
}
