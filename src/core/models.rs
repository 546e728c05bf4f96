// src/core/models.rs

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use strum::{Display, EnumString};

// --- Catalog Models ---

// One entry of the dork catalog, exactly as the loader hands it over.
// Entries are read-only for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u64,
    pub category: String,
    pub query: String,
    pub short_description: String,
    #[serde(default)]
    pub date: String,
}

// --- Severity ---

// Severity levels, declared most severe first so that the derived ordering
// doubles as the ranking used when sorting findings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    /// Numeric rank, 0 being the most severe.
    pub fn rank(self) -> u8 {
        self as u8
    }
}

// --- Probe Models ---

/// A directly executable probe derived from a single catalog entry.
///
/// `paths` is never empty and holds no duplicates. `filetype_paths` is the
/// subset of `paths` that came from generic extension expansion rather than
/// from an explicit `inurl:` hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub source_id: u64,
    pub category: String,
    pub description: String,
    pub query: String,
    pub paths: Vec<String>,
    pub title_rule: Option<String>,
    pub body_rule: Option<String>,
    pub filetype_paths: HashSet<String>,
}

impl Probe {
    pub fn has_content_rule(&self) -> bool {
        self.title_rule.is_some() || self.body_rule.is_some()
    }

    pub fn is_filetype_path(&self, path: &str) -> bool {
        self.filetype_paths.contains(path)
    }
}

/// The retained outcome of one executed (probe, path) pair.
#[derive(Debug, Clone)]
pub struct ProbeResult<'a> {
    pub probe: &'a Probe,
    pub url: String,
    pub path: String,
    pub status: u16,
    pub size: u64,
    pub content_type: String,
    pub body_preview: String,
    pub matched: bool,
    pub from_filetype: bool,
}

// --- Calibration ---

/// Byte size of the target's answer to a path that cannot exist, when that
/// answer was a 200. `Baseline(None)` disables soft-404 suppression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Baseline(pub Option<u64>);

impl Baseline {
    /// Responses within this many bytes of the baseline count as soft-404 noise.
    pub const TOLERANCE: u64 = 100;

    pub fn unknown() -> Self {
        Self(None)
    }

    pub fn is_soft_404(&self, size: u64) -> bool {
        match self.0 {
            Some(baseline) => size.abs_diff(baseline) <= Self::TOLERANCE,
            None => false,
        }
    }
}

impl fmt::Display for Baseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(size) => write!(
                f,
                "{} bytes (responses within +/-{} bytes filtered)",
                size,
                Self::TOLERANCE
            ),
            None => write!(f, "not detected (target returns proper 404s)"),
        }
    }
}

// --- Report Models ---

/// A reconciled, surfaced result with its effective severity and description.
#[derive(Debug, Clone)]
pub struct Finding<'a> {
    pub result: ProbeResult<'a>,
    pub severity: Severity,
    pub description: String,
}

// Everything the renderer needs besides the findings themselves.
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub target: String,
    pub intensity: String,
    pub entries_loaded: usize,
    pub convertible: usize,
    pub probes_executed: usize,
    pub baseline: Baseline,
}
