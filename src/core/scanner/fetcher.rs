// src/core/scanner/fetcher.rs

use crate::core::config::IntensityProfile;
use crate::core::error::FetchError;
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue};
use reqwest::{Client, redirect::Policy};
use std::future::Future;
use tracing::{debug, warn};

/// Only this many leading body bytes are ever kept for matching and previews.
pub const BODY_CAPTURE_LIMIT: usize = 8192;

const USER_AGENT: &str = concat!("DorkProbe/", env!("CARGO_PKG_VERSION"));

/// The parts of an HTTP response the classifier looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedResponse {
    pub status: u16,
    /// Full response size in bytes, not just the captured prefix.
    pub size: u64,
    pub content_type: String,
    /// At most `BODY_CAPTURE_LIMIT` leading bytes of the body.
    pub body: Vec<u8>,
}

/// Issues a single GET without following redirects.
///
/// Implementations must enforce their own timeout. Any HTTP client meeting
/// that contract can drive the calibrator and the prober.
pub trait Fetcher: Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchedResponse, FetchError>> + Send;
}

/// Fixed-capacity body buffer: keeps the first `limit` bytes and counts all of them.
struct BoundedBody {
    bytes: Vec<u8>,
    limit: usize,
    total: u64,
}

impl BoundedBody {
    fn new(limit: usize) -> Self {
        Self { bytes: Vec::with_capacity(limit), limit, total: 0 }
    }

    fn push(&mut self, chunk: &[u8]) {
        self.total += chunk.len() as u64;
        let room = self.limit - self.bytes.len();
        self.bytes.extend_from_slice(&chunk[..chunk.len().min(room)]);
    }

    fn is_full(&self) -> bool {
        self.bytes.len() >= self.limit
    }
}

/// `reqwest`-backed fetcher shared by every unit of a run.
///
/// The underlying `Client` pools connections internally, so cloning it per
/// unit is cheap and no unit depends on another.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds the client: redirects off, connect and total timeouts from the
    /// profile, and the caller's cookie string sent verbatim. A cookie that
    /// cannot be encoded as a header value is dropped with a warning.
    pub fn new(profile: &IntensityProfile, cookie: Option<&str>) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = cookie {
            match HeaderValue::from_str(cookie) {
                Ok(value) => {
                    headers.insert(COOKIE, value);
                }
                Err(e) => warn!(error = %e, "Cookie is not a valid header value; scanning without it."),
            }
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(Policy::none())
            .connect_timeout(profile.timeout)
            .timeout(profile.total_timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedResponse, FetchError> {
        let mut response = self.client.get(url).send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let advertised = response.content_length();

        // With a known length there is no reason to pull more than the capture limit.
        let mut body = BoundedBody::new(BODY_CAPTURE_LIMIT);
        while let Some(chunk) = response.chunk().await? {
            body.push(&chunk);
            if advertised.is_some() && body.is_full() {
                break;
            }
        }

        let size = advertised.unwrap_or(body.total);
        debug!(url, status, size, "Fetched.");
        Ok(FetchedResponse { status, size, content_type, body: body.bytes })
    }
}
