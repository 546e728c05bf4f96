// src/core/config.rs

//! Run configuration: intensity presets and the per-run `ScanConfig`.
//!
//! Presets are plain immutable values. A `ScanConfig` is assembled once at
//! startup and handed to each stage by reference.

use crate::core::error::ConfigError;
use std::time::Duration;
use strum::{Display, EnumString};
use tracing::warn;
use url::Url;

/// Extra time allowed for the response body beyond the connect timeout.
const TOTAL_TIMEOUT_MARGIN: Duration = Duration::from_secs(2);

/// Extra time a unit may take beyond its total timeout before it is abandoned.
const UNIT_GRACE: Duration = Duration::from_secs(5);

const QUICK_CATEGORIES: &[&str] = &[
    "Files Containing Passwords",
    "Footholds",
    "Sensitive Directories",
    "Pages Containing Login Portals",
];

const STANDARD_CATEGORIES: &[&str] = &[
    "Files Containing Passwords",
    "Footholds",
    "Sensitive Directories",
    "Pages Containing Login Portals",
    "Files Containing Usernames",
    "Vulnerable Files",
    "Error Messages",
    "Web Server Detection",
];

/// Named scan intensity selecting probe budget, pool width and timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, clap::ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum Intensity {
    Quick,
    #[default]
    Standard,
    Thorough,
}

/// Resource limits for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntensityProfile {
    /// Hard cap on executed (probe, path) pairs.
    pub max_probes: usize,
    /// Worker pool width.
    pub concurrency: usize,
    /// Connect timeout for every request.
    pub timeout: Duration,
}

impl IntensityProfile {
    /// Whole-request deadline, body included.
    pub fn total_timeout(&self) -> Duration {
        self.timeout + TOTAL_TIMEOUT_MARGIN
    }

    /// Deadline after which a stuck unit is dropped.
    pub fn unit_deadline(&self) -> Duration {
        self.timeout + UNIT_GRACE
    }
}

impl Intensity {
    pub fn profile(self) -> IntensityProfile {
        match self {
            Intensity::Quick => IntensityProfile {
                max_probes: 100,
                concurrency: 5,
                timeout: Duration::from_secs(3),
            },
            Intensity::Standard => IntensityProfile {
                max_probes: 500,
                concurrency: 10,
                timeout: Duration::from_secs(5),
            },
            Intensity::Thorough => IntensityProfile {
                max_probes: 2000,
                concurrency: 20,
                timeout: Duration::from_secs(5),
            },
        }
    }

    /// The category allowlist for this intensity; `None` means every category.
    pub fn categories(self) -> Option<Vec<String>> {
        let preset = match self {
            Intensity::Quick => QUICK_CATEGORIES,
            Intensity::Standard => STANDARD_CATEGORIES,
            Intensity::Thorough => return None,
        };
        Some(preset.iter().map(|c| c.to_string()).collect())
    }
}

/// Everything a run needs besides the catalog itself.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Target base URL without a trailing slash.
    pub target: String,
    pub cookie: Option<String>,
    pub intensity: Intensity,
    pub profile: IntensityProfile,
    pub categories: Option<Vec<String>>,
}

impl ScanConfig {
    /// Builds a config from the intensity preset.
    ///
    /// A target that cannot be used is logged and kept as given: every
    /// request against it fails, and the run ends with an empty report.
    ///
    /// # Arguments
    ///
    /// * `target` - Base URL of the host to probe. A bare `host:port` is taken as http.
    /// * `cookie` - Optional raw `Cookie` header value. Blank strings count as absent.
    /// * `intensity` - Preset selecting limits and the default category allowlist.
    pub fn new(target: &str, cookie: Option<String>, intensity: Intensity) -> Self {
        let target = match normalize_target(target) {
            Ok(normalized) => normalized,
            Err(e) => {
                warn!(error = %e, "Target is unusable; every request will fail.");
                target.trim().to_string()
            }
        };

        Self {
            target: target.trim_end_matches('/').to_string(),
            cookie: cookie.filter(|c| !c.trim().is_empty()),
            intensity,
            profile: intensity.profile(),
            categories: intensity.categories(),
        }
    }

    /// Replaces the preset allowlist. A single `all` entry lifts the restriction.
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        let categories: Vec<String> = categories
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        let lifts_restriction = categories.len() == 1 && categories[0].eq_ignore_ascii_case("all");
        if lifts_restriction {
            self.categories = None;
        } else if !categories.is_empty() {
            self.categories = Some(categories);
        }
        self
    }

    /// Overrides the intensity profile with tight limits for tests.
    #[cfg(test)]
    pub fn with_profile(mut self, profile: IntensityProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Absolute URL for a probe path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.target, path)
    }
}

/// Adds `http://` to a scheme-less target, then checks that it parses as an
/// http or https URL.
pub fn normalize_target(target: &str) -> Result<String, ConfigError> {
    let target = target.trim();
    let target = if target.contains("://") {
        target.to_string()
    } else {
        format!("http://{}", target)
    };

    let parsed = Url::parse(&target).map_err(|source| ConfigError::InvalidTarget {
        url: target.clone(),
        source,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_string()));
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn presets_match_intensity() {
        let quick = Intensity::Quick.profile();
        assert_eq!((quick.max_probes, quick.concurrency), (100, 5));
        assert_eq!(quick.timeout, Duration::from_secs(3));
        assert_eq!(quick.total_timeout(), Duration::from_secs(5));

        let thorough = Intensity::Thorough.profile();
        assert_eq!((thorough.max_probes, thorough.concurrency), (2000, 20));
        assert!(Intensity::Thorough.categories().is_none());
        assert_eq!(Intensity::Standard.categories().map(|c| c.len()), Some(8));
    }

    #[test]
    fn intensity_parses_lowercase_names() {
        assert_eq!(Intensity::from_str("quick").unwrap(), Intensity::Quick);
        assert_eq!(Intensity::Thorough.to_string(), "thorough");
        assert!(Intensity::from_str("insane").is_err());
    }

    #[test]
    fn trailing_slash_is_stripped_for_joining() {
        let config = ScanConfig::new("http://10.0.0.1:8080/", None, Intensity::Quick);
        assert_eq!(config.url_for("/.env"), "http://10.0.0.1:8080/.env");
    }

    #[test]
    fn scheme_less_target_defaults_to_http() {
        let config = ScanConfig::new("10.0.0.1:8080", None, Intensity::Quick);
        assert_eq!(config.target, "http://10.0.0.1:8080");
        assert_eq!(config.url_for("/.env"), "http://10.0.0.1:8080/.env");

        let config = ScanConfig::new("localhost:8080/", None, Intensity::Quick);
        assert_eq!(config.target, "http://localhost:8080");
    }

    #[test]
    fn unusable_targets_are_rejected_by_normalization() {
        assert!(matches!(
            normalize_target("ftp://example.com"),
            Err(ConfigError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            normalize_target("not a url"),
            Err(ConfigError::InvalidTarget { .. })
        ));
        assert_eq!(normalize_target(" https://example.com ").unwrap(), "https://example.com");
    }

    #[test]
    fn unusable_target_still_builds_a_config() {
        let config = ScanConfig::new("ftp://example.com/", None, Intensity::Quick);
        assert_eq!(config.target, "ftp://example.com");
    }

    #[test]
    fn blank_cookie_is_dropped() {
        let config = ScanConfig::new("http://example.com", Some("  ".into()), Intensity::Quick);
        assert!(config.cookie.is_none());
    }

    #[test]
    fn category_override() {
        let base = ScanConfig::new("http://example.com", None, Intensity::Quick);
        let all = base.clone().with_categories(vec!["all".into()]);
        assert!(all.categories.is_none());

        let custom = base.clone().with_categories(vec!["Footholds".into(), " Error Messages ".into()]);
        assert_eq!(
            custom.categories,
            Some(vec!["Footholds".to_string(), "Error Messages".to_string()])
        );

        let unchanged = base.with_categories(Vec::new());
        assert_eq!(unchanged.categories.map(|c| c.len()), Some(4));
    }
}
