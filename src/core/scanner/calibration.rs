// src/core/scanner/calibration.rs

use crate::core::config::ScanConfig;
use crate::core::models::Baseline;
use crate::core::scanner::fetcher::Fetcher;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// A path under the target that cannot plausibly exist.
fn canary_path() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("/dorkprobe_baseline_{}", &id[..12])
}

/// Measures the target's soft-404 baseline with one canary request.
///
/// A 200 for the canary means the server fabricates pages for missing
/// resources, and its size becomes the baseline. Any other status, a
/// transport error or a timeout leaves the baseline unknown, which only
/// disables soft-404 suppression later. This never fails the run.
pub async fn measure<F: Fetcher>(fetcher: &F, config: &ScanConfig) -> Baseline {
    let url = config.url_for(&canary_path());
    debug!(url = %url, "Requesting canary path.");

    match tokio::time::timeout(config.profile.unit_deadline(), fetcher.fetch(&url)).await {
        Ok(Ok(response)) if response.status == 200 => {
            info!(size = response.size, "Soft-404 baseline detected.");
            Baseline(Some(response.size))
        }
        Ok(Ok(response)) => {
            info!(status = response.status, "Target answers missing paths properly, no baseline.");
            Baseline::unknown()
        }
        Ok(Err(e)) => {
            warn!(error = %e, "Calibration request failed, soft-404 filtering disabled.");
            Baseline::unknown()
        }
        Err(_) => {
            warn!("Calibration request timed out, soft-404 filtering disabled.");
            Baseline::unknown()
        }
    }
}
