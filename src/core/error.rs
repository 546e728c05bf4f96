// src/core/error.rs

//! Error types for the scanner core.
//!
//! Per-probe failures are expected on an uncontrolled target, so `FetchError`
//! never escapes the prober. Only `CatalogError` is fatal to a run.

use std::path::PathBuf;
use std::time::Duration;

/// Failure to locate or parse the dork catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog not found at {0:?}")]
    NotFound(PathBuf),

    #[error("I/O error reading catalog at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed catalog XML: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Invalid run configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid target URL {url:?}: {source}")]
    InvalidTarget {
        url: String,
        source: url::ParseError,
    },

    #[error("unsupported scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),
}

/// A single HTTP request that produced no usable response.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("no response within {0:?}")]
    Timeout(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = CatalogError::NotFound(PathBuf::from("/pentest/data/ghdb.xml"));
        assert_eq!(err.to_string(), "catalog not found at \"/pentest/data/ghdb.xml\"");

        let err = ConfigError::UnsupportedScheme("ftp".into());
        assert!(err.to_string().contains("ftp"));

        let err = FetchError::Timeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "no response within 10s");
    }
}
