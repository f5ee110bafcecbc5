// ABOUTME: Audit command implementation - Destructive migration operations
// ABOUTME: Flags up() methods that drop or rename schema objects

use crate::migration::{audit_migrations, MigrationAudit};
use crate::report::render_destructive_audit;
use crate::utils::write_report;
use anyhow::{Context, Result};
use std::path::Path;

/// Audit migrations for destructive operations and write the report
pub async fn audit(migrations_dir: &Path, output_path: &Path) -> Result<MigrationAudit> {
    tracing::info!("Starting destructive operation audit...");

    let audit = audit_migrations(migrations_dir)
        .await
        .context("Failed to audit migrations")?;

    if audit.findings.is_empty() {
        tracing::info!("✓ No dangerous operations found in up() methods");
    } else {
        tracing::warn!(
            "⚠ {} migration(s) contain destructive operations",
            audit.findings.len()
        );
    }

    write_report(output_path, &render_destructive_audit(&audit.findings))?;

    println!("Report generated in {}", output_path.display());
    Ok(audit)
}
