// src/core/reconciler.rs

//! Turns raw probe results into the ranked, deduplicated finding list.

use crate::core::knowledge_base::category_severity;
use crate::core::models::{Finding, ProbeResult, Severity};
use std::collections::HashMap;
use tracing::debug;

/// Deduplicates matched results by URL, assigns effective severity and
/// description, then stable-sorts most severe first.
///
/// Arrival order carries no meaning for the caller, but ties in both the
/// duplicate choice and the final sort resolve to the earlier result.
pub fn reconcile(results: Vec<ProbeResult<'_>>) -> Vec<Finding<'_>> {
    let matched = results.into_iter().filter(|r| r.matched);
    let mut findings: Vec<Finding> = deduplicate_by_url(matched)
        .into_iter()
        .map(|result| Finding {
            severity: effective_severity(&result),
            description: effective_description(&result),
            result,
        })
        .collect();

    findings.sort_by_key(|f| f.severity.rank());
    debug!(findings = findings.len(), "Reconciled results.");
    findings
}

/// Keeps one result per URL: the one whose category maps to the most severe
/// level, the first encountered on a tie.
fn deduplicate_by_url<'a>(results: impl Iterator<Item = ProbeResult<'a>>) -> Vec<ProbeResult<'a>> {
    let mut kept: Vec<ProbeResult<'a>> = Vec::new();
    let mut index_by_url: HashMap<String, usize> = HashMap::new();

    for result in results {
        match index_by_url.get(&result.url) {
            Some(&idx) => {
                let existing = category_severity(&kept[idx].probe.category);
                if category_severity(&result.probe.category) < existing {
                    kept[idx] = result;
                }
            }
            None => {
                index_by_url.insert(result.url.clone(), kept.len());
                kept.push(result);
            }
        }
    }
    kept
}

/// Severity as reported: 403 is always informational, and generic filetype
/// guesses never rank above low.
pub fn effective_severity(result: &ProbeResult<'_>) -> Severity {
    if result.status == 403 {
        return Severity::Info;
    }
    let severity = category_severity(&result.probe.category);
    if result.from_filetype && severity < Severity::Low {
        return Severity::Low;
    }
    severity
}

/// Filetype-derived results get a generic label, since the dork's own
/// description usually talks about something more specific.
pub fn effective_description(result: &ProbeResult<'_>) -> String {
    if result.from_filetype {
        let filename = result.path.rsplit('/').next().unwrap_or(&result.path);
        return format!("Exposed file: {} (generic filetype probe)", filename);
    }
    result.probe.description.clone()
}
