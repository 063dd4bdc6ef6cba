//! Summary sink for shell output.
//!
//! Prints a compact, human-readable digest per account.

use std::io::{self, Write};

use super::ReportSink;
use crate::error::Result;
use crate::model::{AuditReport, Grade};
use crate::utils::{money, pct};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn grade_color(grade: Grade) -> &'static str {
    match grade {
        Grade::A | Grade::B => "green",
        Grade::C => "yellow",
        Grade::D | Grade::F => "red",
        Grade::NotApplicable => "dim",
    }
}

/// Summary sink writing to stderr or any writer
pub struct SummarySink {
    writer: Box<dyn Write + Send>,
    colored: bool,
}

impl SummarySink {
    /// Summary on stderr, keeping stdout free for JSON
    #[must_use]
    pub fn stderr() -> Self {
        Self::writer(io::stderr())
    }

    #[must_use]
    pub fn writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Box::new(writer),
            colored: true,
        }
    }

    /// Disable colored output
    #[must_use]
    pub fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    /// Render the digest for one report
    #[must_use]
    pub fn render(&self, report: &AuditReport) -> String {
        let mut lines = Vec::new();
        let snapshot = report.snapshot();

        lines.push(format!(
            "{} ({}) {}",
            self.color(report.account(), "bold"),
            report.customer_id(),
            self.color(report.industry().label(), "dim"),
        ));
        lines.push(format!(
            "  {} {}/100 {}  {}",
            self.color("Health:", "cyan"),
            report.health_score(),
            self.color(report.grade().letter(), grade_color(report.grade())),
            report.verdict()
        ));
        lines.push(format!(
            "  {} {} spend, {} conversions, CTR {}",
            self.color("30 days:", "cyan"),
            money(snapshot.spend_30d),
            snapshot.conversions_30d,
            pct(snapshot.ctr)
        ));

        for category in report.categories() {
            let score = category
                .score
                .map_or_else(|| "N/A".to_string(), |s| format!("{s:.1}"));
            lines.push(format!(
                "  {:<34} {:>5}  {}",
                category.name,
                score,
                self.color(category.grade.letter(), grade_color(category.grade))
            ));
        }

        if !report.quick_wins().is_empty() {
            lines.push(format!("  {}", self.color("Quick wins:", "bold")));
            for win in report.quick_wins() {
                lines.push(format!(
                    "    [{}] {} ({})",
                    win.check,
                    win.action,
                    self.color(&win.time, "dim")
                ));
            }
        }

        lines.join("\n")
    }
}

impl ReportSink for SummarySink {
    fn accept(&mut self, report: &AuditReport) -> Result<()> {
        let rendered = self.render(report);
        writeln!(self.writer, "{rendered}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditEngine;
    use crate::model::{AccountDataset, AccountIdentity};
    use chrono::NaiveDate;

    #[test]
    fn test_render_plain() {
        let report = AuditEngine::default().audit(
            &AccountIdentity::new("Acme Widgets", "123-456-7890"),
            &AccountDataset::new(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        );
        let sink = SummarySink::writer(io::sink()).no_color();
        let text = sink.render(&report);

        assert!(text.starts_with("Acme Widgets (123-456-7890) General"));
        assert!(text.contains("Conversion Tracking"));
        assert!(text.contains("Settings & Targeting + Bidding"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_color_codes() {
        assert_eq!(ansi_color("x", "red", true), "\x1b[31mx\x1b[0m");
        assert_eq!(ansi_color("x", "red", false), "x");
    }
}
