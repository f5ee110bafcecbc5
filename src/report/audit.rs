// ABOUTME: Destructive migration audit report
// ABOUTME: Lists drop and rename calls found in migration up() methods

use super::ReportBuilder;
use crate::migration::DestructiveFinding;

const AUDIT_HEADER: &str = "Destructive operations in UP() method (Dangerous for Production):";

pub fn render_destructive_audit(findings: &[DestructiveFinding]) -> String {
    let mut report = ReportBuilder::new();
    report.line(AUDIT_HEADER).blank();

    if findings.is_empty() {
        let mut text = report.finish();
        text.push_str("No dangerous operations found in UP() methods.");
        return text;
    }

    for finding in findings {
        report.line(format!("File: {}", finding.file));
        for operation in &finding.operations {
            report.line(format!("  - DANGER: {}", operation));
        }
        report.blank();
    }

    report.finish()
}
