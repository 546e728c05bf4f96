// src/core/report.rs

//! Plain-text report rendering.
//!
//! The compact one-line summary always precedes the detail blocks so that a
//! reader of only a truncated prefix still sees every finding's headline.

use crate::core::models::{Finding, ScanSummary};
use std::fmt::Write;

/// Renders the full report for already reconciled, sorted findings.
pub fn render(summary: &ScanSummary, findings: &[Finding<'_>]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, summary, findings);
    out
}

fn write_report(out: &mut String, summary: &ScanSummary, findings: &[Finding<'_>]) -> std::fmt::Result {
    writeln!(out, "=== Dork Probe Scanner ===")?;
    writeln!(out, "Target: {}", summary.target)?;
    writeln!(out, "Intensity: {}", summary.intensity)?;
    writeln!(out, "Catalog entries loaded: {}", summary.entries_loaded)?;
    writeln!(out, "Convertible dorks: {}", summary.convertible)?;
    writeln!(out, "Total probes executed: {}", summary.probes_executed)?;
    writeln!(out, "Soft-404 baseline: {}", summary.baseline)?;
    writeln!(out)?;
    writeln!(out, "=== Scan Complete ===")?;
    writeln!(out, "Findings: {}", findings.len())?;
    writeln!(out)?;

    if !findings.is_empty() {
        writeln!(out, "=== Summary (highest severity first) ===")?;
        for finding in findings {
            let r = &finding.result;
            writeln!(
                out,
                "[{}] {} -> {} ({} bytes) | {}",
                finding.severity, r.url, r.status, r.size, finding.description
            )?;
        }
        writeln!(out)?;
    }

    for (i, finding) in findings.iter().enumerate() {
        let r = &finding.result;
        let status_note = if r.status == 403 { " (forbidden - path exists)" } else { "" };

        writeln!(out, "--- Finding {} ---", i + 1)?;
        writeln!(out, "Dork ID: {}", r.probe.source_id)?;
        writeln!(out, "Category: {}", r.probe.category)?;
        writeln!(out, "Severity: {}", finding.severity)?;
        writeln!(out, "Description: {}", finding.description)?;
        writeln!(out, "Original Dork: {}", r.probe.query)?;
        writeln!(out, "URL: {}{}", r.url, status_note)?;
        writeln!(out, "HTTP Status: {}", r.status)?;
        writeln!(out, "Response Size: {} bytes", r.size)?;
        writeln!(out, "Content-Type: {}", r.content_type)?;
        if !r.body_preview.is_empty() {
            writeln!(out, "Body Preview: {}", r.body_preview)?;
        }
        writeln!(out)?;
    }

    write!(out, "=== End Dork Scan ===")
}
