// src/core/scanner/probe_scanner.rs

use crate::core::config::ScanConfig;
use crate::core::error::FetchError;
use crate::core::models::{Baseline, Probe, ProbeResult};
use crate::core::scanner::classifier::classify;
use crate::core::scanner::fetcher::Fetcher;
use futures::{StreamExt, future, stream};
use tracing::{debug, info};

/// Flattens probes into (probe, path) work items in probe order, stopping
/// as soon as `max_total` items have been produced.
pub fn flatten(probes: &[Probe], max_total: usize) -> Vec<(&Probe, &str)> {
    probes
        .iter()
        .flat_map(|probe| probe.paths.iter().map(move |path| (probe, path.as_str())))
        .take(max_total)
        .collect()
}

/// Executes every work item concurrently and returns the retained results.
///
/// At most `profile.concurrency` requests are in flight at once. Each unit
/// is bounded by its own deadline; a failed or timed-out unit is dropped and
/// never retried. Results arrive in completion order, which carries no
/// meaning.
pub async fn run_probes<'a, F: Fetcher>(
    fetcher: &F,
    config: &ScanConfig,
    probes: &'a [Probe],
    baseline: Baseline,
) -> Vec<ProbeResult<'a>> {
    let work = flatten(probes, config.profile.max_probes);
    let width = config.profile.concurrency.max(1);
    let deadline = config.profile.unit_deadline();
    let total = work.len();

    info!(pairs = total, width, "Starting probe pool.");

    let results: Vec<ProbeResult<'a>> = stream::iter(work)
        .map(|(probe, path)| async move {
            let url = config.url_for(path);
            let outcome = tokio::time::timeout(deadline, fetcher.fetch(&url)).await;
            match outcome {
                Ok(Ok(response)) => classify(probe, path, url, &response, baseline),
                Ok(Err(e)) => {
                    debug!(url = %url, error = %e, "Probe failed.");
                    None
                }
                Err(_) => {
                    let e = FetchError::Timeout(deadline);
                    debug!(url = %url, error = %e, "Probe abandoned.");
                    None
                }
            }
        })
        .buffer_unordered(width)
        .filter_map(future::ready)
        .collect()
        .await;

    info!(pairs = total, retained = results.len(), "Probe pool finished.");
    results
}
