//! Human-readable rendering of a [`Report`].

use std::fmt::Write as _;
use std::path::Path;

use vcsr_core::Dimension;

use crate::report::Report;

fn status_marker(score: u32) -> &'static str {
    if score >= 80 {
        "✅"
    } else if score >= 60 {
        "⚠️"
    } else {
        "❌"
    }
}

/// Render the console summary. `report_path` is where the JSON was written.
pub fn render_summary(report: &Report, report_path: Option<&Path>) -> String {
    let mut out = String::new();
    let s = &report.summary;

    // Writing into a String cannot fail.
    let _ = writeln!(out, "📊 Schema Quality Report");
    let _ = writeln!(out, "========================");
    let _ = writeln!(out, "Total schemas:  {}", s.total_schemas);
    let _ = writeln!(out, "Passed:         {}", s.passed);
    let _ = writeln!(out, "Failed:         {}", s.failed);
    let _ = writeln!(out, "Average score:  {}/100", s.average_score);
    let _ = writeln!(out, "Pass rate:      {}%", s.pass_rate);

    let _ = writeln!(out);
    let _ = writeln!(out, "Category scores:");
    for dim in Dimension::all() {
        let score = report.category_scores.get(dim).copied().unwrap_or(0);
        let _ = writeln!(out, "  {} {}: {}/100", status_marker(score), dim.label(), score);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Critical issues: {}", report.critical_issues);
    let _ = writeln!(out, "Warnings:        {}", report.warnings);

    if !report.recommendations.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Recommendations:");
        for (i, rec) in report.recommendations.iter().enumerate() {
            let _ = writeln!(out, "  {}. [{}] {}", i + 1, rec.priority.as_str(), rec.message);
        }
    }

    if let Some(path) = report_path {
        let _ = writeln!(out);
        let _ = writeln!(out, "Report written to {}", path.display());
    }
    out
}
