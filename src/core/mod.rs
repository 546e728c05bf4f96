// src/core/mod.rs

// The `core` module holds everything between the loaded catalog and the
// rendered report. Stages are exposed individually so each can be driven
// and tested on its own.

/// Catalog entries, probes, probe results, severities and the soft-404 baseline.
pub mod models;

/// Error types shared by the stages.
pub mod error;

/// Intensity presets and the per-run configuration.
pub mod config;

/// Reading the dork catalog from GHDB XML or JSON.
pub mod catalog;

/// Static operator, filetype and severity tables, and the entry filter built on them.
pub mod knowledge_base;

/// Turning a catalog entry into a probe descriptor.
pub mod converter;

/// Calibration, HTTP fetching, classification and the concurrent probe pool.
pub mod scanner;

/// Deduplication, effective severity and ranking of findings.
pub mod reconciler;

/// Plain-text report output.
pub mod report;
