// ABOUTME: Plain-text report rendering
// ABOUTME: Fixed-layout banners, counts and table lists for each analysis

pub mod analysis;
pub mod audit;
pub mod comparison;

pub use analysis::render_backup_analysis;
pub use audit::render_destructive_audit;
pub use comparison::render_table_comparison;

use std::fmt::Display;

/// Width of the `=` banner lines framing report sections
pub const BANNER_WIDTH: usize = 80;

/// Line-oriented text accumulator used by the renderers
#[derive(Debug, Default)]
pub(crate) struct ReportBuilder {
    text: String,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, line: impl Display) -> &mut Self {
        self.text.push_str(&line.to_string());
        self.text.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.text.push('\n');
        self
    }

    pub fn banner(&mut self) -> &mut Self {
        self.line("=".repeat(BANNER_WIDTH))
    }

    /// A title framed by banners above and below
    pub fn section(&mut self, title: impl Display) -> &mut Self {
        self.banner().line(title).banner()
    }

    pub fn finish(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_is_framed_by_banners() {
        let mut report = ReportBuilder::new();
        report.section("TITLE").blank();
        let text = report.finish();

        let banner = "=".repeat(80);
        assert_eq!(text, format!("{banner}\nTITLE\n{banner}\n\n"));
    }
}
