use super::RecordSource;
use crate::config::PriceConfig;
use crate::error::{PriceError, Result};
use crate::model::{PriceRecord, PriceResponse};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

const PRICE_PATH: [&str; 4] = ["api", "v1", "price", "all"];

/// Headers that let requests through ngrok and MS dev tunnels without the
/// interstitial warning page.
const TUNNEL_HEADERS: [(&str, &str); 2] = [
    ("ngrok-skip-browser-warning", "true"),
    ("x-tunnel-skip-anti-phishing-page", "1"),
];

/// Fetches price records over HTTP from the price backend.
pub struct HttpSource {
    client: Client,
    base_url: Url,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::build(base_url, true, Duration::from_secs(30))
    }

    pub fn from_config(config: &PriceConfig) -> Result<Self> {
        if config.timeout_secs == 0 {
            return Err(PriceError::Config(
                "timeout-secs must be at least 1".to_string(),
            ));
        }
        Self::build(
            &config.base_url,
            config.tunnel_headers,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn build(base_url: &str, tunnel_headers: bool, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| PriceError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PriceError::InvalidUrl {
                url: base_url.to_string(),
                reason: "cannot be used as a base".to_string(),
            });
        }

        let mut headers = HeaderMap::new();
        if tunnel_headers {
            for (name, value) in TUNNEL_HEADERS {
                headers.insert(
                    HeaderName::from_static(name),
                    HeaderValue::from_static(value),
                );
            }
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Builds `{base}/api/v1/price/all/{term}` with the term percent-encoded as a
    /// single path segment.
    ///
    /// A term made only of dots is refused: URL normalization treats `.` and `..`
    /// (encoded or not) as relative segments, so the request would land on a
    /// different endpoint.
    pub fn records_url(&self, query_term: &str) -> Result<Url> {
        if is_dot_segment(query_term) {
            return Err(PriceError::InvalidUrl {
                url: format!(
                    "{}/{}/{}",
                    self.base_url.as_str().trim_end_matches('/'),
                    PRICE_PATH.join("/"),
                    query_term
                ),
                reason: format!("search term '{}' cannot be sent as a path segment", query_term),
            });
        }

        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in build(), so path_segments_mut succeeds
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(PRICE_PATH.iter())
                .push(query_term);
        }
        Ok(url)
    }
}

fn is_dot_segment(term: &str) -> bool {
    !term.is_empty() && term.chars().all(|c| c == '.')
}

impl RecordSource for HttpSource {
    fn fetch_records(&self, query_term: &str) -> Result<Vec<PriceRecord>> {
        let url = self.records_url(query_term)?;
        debug!(%url, "requesting price records");

        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(PriceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text()?;
        let payload: PriceResponse = serde_json::from_str(&body)?;
        debug!(count = payload.data.len(), "decoded price records");
        Ok(payload.data)
    }
}
