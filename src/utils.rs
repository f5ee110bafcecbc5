// ABOUTME: Utility functions for report output and safe logging
// ABOUTME: Provides atomic report writes and identifier sanitization

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Mode given to newly created reports, matching a plain create under the usual umask
#[cfg(unix)]
const NEW_REPORT_MODE: u32 = 0o644;

/// Write a report to disk, replacing any previous report at `path`
///
/// The contents are written to a temporary file in the same directory and
/// then renamed over the target, so readers never observe a partially
/// written report. An existing report keeps its permissions, a new one is
/// created `0644`. When `path` is a symlink the report is written to the
/// file it points at and the link is left in place.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created or written, or
/// if it cannot be moved over `path`.
///
/// # Examples
///
/// ```
/// # use migration_backup_audit::utils::write_report;
/// # fn example() -> anyhow::Result<()> {
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("report.txt");
/// write_report(&path, "first run\n")?;
/// write_report(&path, "second run\n")?;
/// assert_eq!(std::fs::read_to_string(&path)?, "second run\n");
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub fn write_report(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let path = path.as_ref();
    let target = resolve_report_target(path)?;
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(parent).with_context(|| {
        format!(
            "Failed to create temporary report file in '{}'",
            parent.display()
        )
    })?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write report '{}'", path.display()))?;

    let permissions = match fs::metadata(&target) {
        Ok(metadata) => metadata.permissions(),
        Err(_) => new_report_permissions(&file)?,
    };
    file.as_file()
        .set_permissions(permissions)
        .with_context(|| format!("Failed to set permissions on report '{}'", path.display()))?;

    file.persist(&target)
        .with_context(|| format!("Failed to save report '{}'", path.display()))?;

    tracing::debug!("Wrote {} bytes to {}", contents.len(), target.display());
    Ok(())
}

/// Follow a symlinked report path to the file it names
///
/// A dangling link resolves to its destination so the report is created
/// there.
fn resolve_report_target(path: &Path) -> Result<PathBuf> {
    let is_symlink = fs::symlink_metadata(path)
        .map(|metadata| metadata.file_type().is_symlink())
        .unwrap_or(false);
    if !is_symlink {
        return Ok(path.to_path_buf());
    }

    if let Ok(resolved) = fs::canonicalize(path) {
        return Ok(resolved);
    }

    let link = fs::read_link(path)
        .with_context(|| format!("Failed to read report symlink '{}'", path.display()))?;
    Ok(match path.parent() {
        Some(parent) if link.is_relative() => parent.join(link),
        _ => link,
    })
}

#[cfg(unix)]
fn new_report_permissions(_file: &NamedTempFile) -> Result<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::Permissions::from_mode(NEW_REPORT_MODE))
}

#[cfg(not(unix))]
fn new_report_permissions(file: &NamedTempFile) -> Result<fs::Permissions> {
    let metadata = file
        .as_file()
        .metadata()
        .context("Failed to read temporary report metadata")?;
    Ok(metadata.permissions())
}

/// Sanitize an identifier (table name, file name, etc.) for display
///
/// Removes control characters and limits length so names read from an
/// untrusted dump cannot forge log lines.
///
/// # Examples
///
/// ```
/// # use migration_backup_audit::utils::sanitize_identifier;
/// assert_eq!(sanitize_identifier("normal_table"), "normal_table");
/// assert_eq!(sanitize_identifier("table\nname"), "tablename");
/// ```
pub fn sanitize_identifier(identifier: &str) -> String {
    identifier
        .chars()
        .filter(|c| !c.is_control())
        .take(100)
        .collect()
}
