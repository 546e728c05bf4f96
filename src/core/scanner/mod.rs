// src/core/scanner/mod.rs

// This file acts as the public interface for the `scanner` module.
// It declares the scanning stages and wires them into a single run.
pub mod calibration;
pub mod classifier;
pub mod fetcher;
pub mod probe_scanner;

use crate::core::config::ScanConfig;
use crate::core::converter::convert_all;
use crate::core::error::FetchError;
use crate::core::knowledge_base::filter_entries;
use crate::core::models::{Baseline, CatalogEntry, Probe, ProbeResult, ScanSummary};
use crate::core::{reconciler, report};
use self::fetcher::{Fetcher, HttpFetcher};
use tracing::{info, instrument};

/// Drives one scan of one target: filter, convert, calibrate, probe, reconcile.
pub struct DorkScanner<F> {
    config: ScanConfig,
    fetcher: F,
}

impl DorkScanner<HttpFetcher> {
    /// Creates a scanner backed by the `reqwest` client.
    pub fn new(config: ScanConfig) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(&config.profile, config.cookie.as_deref())?;
        Ok(Self::with_fetcher(config, fetcher))
    }
}

impl<F: Fetcher> DorkScanner<F> {
    /// Creates a scanner with any HTTP capability.
    pub fn with_fetcher(config: ScanConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    /// Selects usable catalog entries and converts them into probes.
    pub fn plan(&self, entries: &[CatalogEntry]) -> Vec<Probe> {
        let filtered = filter_entries(entries, self.config.categories.as_deref());
        let probes = convert_all(filtered.iter().copied());
        info!(
            entries = entries.len(),
            filtered = filtered.len(),
            probes = probes.len(),
            "Planned probes."
        );
        probes
    }

    /// Calibrates, then runs the probe pool. Calibration always completes
    /// before the first probe is issued.
    pub async fn execute<'a>(&self, probes: &'a [Probe]) -> (Baseline, Vec<ProbeResult<'a>>) {
        let baseline = calibration::measure(&self.fetcher, &self.config).await;
        let results = probe_scanner::run_probes(&self.fetcher, &self.config, probes, baseline).await;
        (baseline, results)
    }

    /// Runs the whole pipeline and returns the rendered report.
    ///
    /// Zero findings is a normal outcome; nothing here fails the run.
    #[instrument(skip_all, fields(target = %self.config.target, intensity = %self.config.intensity))]
    pub async fn run(&self, entries: &[CatalogEntry]) -> String {
        let probes = self.plan(entries);
        let probes_executed = probe_scanner::flatten(&probes, self.config.profile.max_probes).len();

        let (baseline, results) = self.execute(&probes).await;
        let findings = reconciler::reconcile(results);
        info!(findings = findings.len(), "Scan finished.");

        let summary = ScanSummary {
            target: self.config.target.clone(),
            intensity: self.config.intensity.to_string(),
            entries_loaded: entries.len(),
            convertible: probes.len(),
            probes_executed,
            baseline,
        };
        report::render(&summary, &findings)
    }
}
