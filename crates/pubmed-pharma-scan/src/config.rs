//! Configuration for the PubMed client and the scan pipeline.

use std::time::Duration;

/// NCBI E-utilities constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the NCBI E-utilities endpoints.
    pub const EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

    /// Tool name sent with every request, per NCBI usage guidelines.
    pub const TOOL_NAME: &str = "pubmed-pharma-scan";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Delay between requests without an API key (NCBI allows 3 req/s).
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(334);

    /// Delay between requests with an API key (NCBI allows 10 req/s).
    pub const RATE_LIMIT_DELAY_WITH_KEY: Duration = Duration::from_millis(100);

    /// Maximum PMIDs per efetch request (keeps the URL within limits).
    pub const EFETCH_BATCH_SIZE: usize = 200;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 4;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// NCBI API key (optional, raises the rate ceiling).
    pub api_key: Option<String>,

    /// Contact email forwarded to NCBI with every request.
    pub contact_email: Option<String>,

    /// Base URL for E-utilities (overridable for mock servers).
    pub eutils_base_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Fixed delay applied before each outbound request.
    pub rate_limit_delay: Duration,

    /// Maximum PMIDs per efetch request.
    pub efetch_batch_size: usize,
}

impl Config {
    /// Create a configuration with optional API key and contact email.
    ///
    /// The pacing delay is chosen from the API key presence:
    /// 3 req/s without a key, 10 req/s with one.
    #[must_use]
    pub fn new(api_key: Option<String>, contact_email: Option<String>) -> Self {
        let has_key = api_key.is_some();
        Self {
            api_key,
            contact_email,
            eutils_base_url: api::EUTILS_BASE_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            rate_limit_delay: if has_key {
                api::RATE_LIMIT_DELAY_WITH_KEY
            } else {
                api::RATE_LIMIT_DELAY
            },
            efetch_batch_size: api::EFETCH_BATCH_SIZE,
        }
    }

    /// Create a test configuration pointed at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: None,
            contact_email: None,
            eutils_base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            rate_limit_delay: Duration::from_millis(0), // No pacing in tests
            efetch_batch_size: api::EFETCH_BATCH_SIZE,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `NCBI_API_KEY` and `NCBI_EMAIL`.
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = std::env::var("NCBI_API_KEY").ok();
        let contact_email = std::env::var("NCBI_EMAIL").ok();
        Self::new(api_key, contact_email)
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert!(!config.has_api_key());
        assert_eq!(config.rate_limit_delay, api::RATE_LIMIT_DELAY);
    }

    #[test]
    fn test_config_with_api_key_uses_faster_pacing() {
        let config = Config::new(Some("test-key".to_string()), None);
        assert!(config.has_api_key());
        assert_eq!(config.rate_limit_delay, api::RATE_LIMIT_DELAY_WITH_KEY);
    }

    #[test]
    fn test_for_testing_strips_trailing_slash() {
        let config = Config::for_testing("http://127.0.0.1:9999/");
        assert_eq!(config.eutils_base_url, "http://127.0.0.1:9999");
        assert_eq!(config.rate_limit_delay, Duration::from_millis(0));
    }

    #[test]
    fn test_pacing_matches_ncbi_ceiling() {
        // 3 req/s without a key means at least ~333ms between requests.
        assert!(api::RATE_LIMIT_DELAY >= Duration::from_millis(333));
    }
}
