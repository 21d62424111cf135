use anyhow::Result;

use crate::builders::validator::{Diagnostic, Severity};
use crate::core::engine::ConversionStats;

pub trait StatusReporter {
    fn generate_report(
        &self,
        source: &str,
        stats: &ConversionStats,
        diagnostics: &[Diagnostic],
    ) -> Result<()>;
}

/// Prints conversion reports to the console. Used by the `check` command.
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    /// With `verbose` set, warnings are listed alongside skipped lines.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Renders the report as text without printing it.
    pub fn format_report(
        &self,
        source: &str,
        stats: &ConversionStats,
        diagnostics: &[Diagnostic],
    ) -> String {
        let mut out = String::new();
        out.push_str(&format!("📊 Filter list report: {source}\n"));
        out.push_str("=====================================\n");

        // Rule share is measured against lines that could have carried a rule.
        let candidates = stats.rules + stats.truncated_rules + stats.skipped_lines;
        let percentage = if candidates > 0 {
            ((stats.rules + stats.truncated_rules) as f64 / candidates as f64) * 100.0
        } else {
            0.0
        };

        out.push_str(&format!("  Total lines: {}\n", stats.total_lines));
        out.push_str(&format!("  Blank lines: {}\n", stats.blank_lines));
        out.push_str(&format!("  Comment lines: {}\n", stats.comment_lines));
        out.push_str(&format!(
            "  Rules: {} ({:.1}% of rule lines recognized)\n",
            stats.rules, percentage
        ));
        out.push_str(&format!("  Skipped lines: {}\n", stats.skipped_lines));
        if stats.truncated_rules > 0 {
            out.push_str(&format!(
                "  ⚠️  Truncated rules: {}\n",
                stats.truncated_rules
            ));
        }

        let shown: Vec<&Diagnostic> = diagnostics
            .iter()
            .filter(|d| self.verbose || d.severity == Severity::Skipped)
            .collect();

        let hidden = diagnostics.len() - shown.len();

        if !shown.is_empty() {
            out.push_str("\n🔍 Diagnostics:\n");
            for diagnostic in shown {
                out.push_str(&format!("  └─ {diagnostic}\n"));
            }
        }

        if hidden > 0 {
            out.push_str(&format!(
                "\n⚠️  {hidden} warnings hidden, run with --verbose to see them\n"
            ));
        }

        out
    }
}

impl StatusReporter for ConsoleReporter {
    fn generate_report(
        &self,
        source: &str,
        stats: &ConversionStats,
        diagnostics: &[Diagnostic],
    ) -> Result<()> {
        print!("{}", self.format_report(source, stats, diagnostics));
        Ok(())
    }
}
