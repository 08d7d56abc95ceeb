//! PubMed E-utilities client.
//!
//! Two-phase interaction: `esearch` turns a free-text query into PMIDs,
//! `efetch` turns PMIDs into structured article records. Outbound
//! requests are paced with a fixed delay to stay under the NCBI rate
//! ceiling (3 req/s without an API key, 10 with one).

pub mod xml;

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::PaperRecord;

/// PubMed E-utilities client.
#[derive(Clone)]
pub struct PubMedClient {
    /// HTTP client with connection pooling.
    client: reqwest::Client,

    /// Client configuration (base URL, pacing, credentials).
    config: Config,
}

/// Envelope of the esearch JSON response.
#[derive(Debug, Deserialize)]
struct EsearchResponse {
    esearchresult: EsearchResult,
}

/// The `esearchresult` object. Malformed queries surface as an `ERROR` field.
#[derive(Debug, Default, Deserialize)]
struct EsearchResult {
    #[serde(default)]
    idlist: Vec<String>,

    #[serde(rename = "ERROR", default)]
    error: Option<String>,
}

impl PubMedClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(crate::config::api::MAX_KEEPALIVE)
            .pool_idle_timeout(crate::config::api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        Ok(Self { client, config })
    }

    /// Search PubMed and return matching PMIDs, newest first as the
    /// upstream orders them.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::BadQuery`] when the upstream rejects the
    /// query, [`ClientError::RateLimited`] on a 429 response, and
    /// [`ClientError::Network`] on transport failure.
    pub async fn search(&self, query: &str, max_results: usize) -> ClientResult<Vec<String>> {
        let url = format!("{}/esearch.fcgi", self.config.eutils_base_url);

        let mut params = self.base_params();
        params.push(("db", "pubmed".to_string()));
        params.push(("term", query.to_string()));
        params.push(("retmax", max_results.to_string()));
        params.push(("retmode", "json".to_string()));

        let body = self.get(&url, &params).await?;
        let response: EsearchResponse = serde_json::from_str(&body)?;

        if let Some(message) = response.esearchresult.error {
            return Err(ClientError::bad_query(message));
        }

        let ids = response.esearchresult.idlist;
        info!(count = ids.len(), query, "esearch returned PMIDs");
        Ok(ids)
    }

    /// Fetch article records for the given PMIDs.
    ///
    /// IDs are fetched in batches; record order follows the order of the
    /// upstream documents, batch by batch. PMIDs unknown to PubMed are
    /// simply absent from the response and yield no record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Xml`] only when a whole response document
    /// is unreadable; individual broken articles are skipped.
    pub async fn fetch_details(&self, pmids: &[String]) -> ClientResult<Vec<PaperRecord>> {
        if pmids.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/efetch.fcgi", self.config.eutils_base_url);
        let mut papers = Vec::with_capacity(pmids.len());

        for batch in pmids.chunks(self.config.efetch_batch_size) {
            let mut params = self.base_params();
            params.push(("db", "pubmed".to_string()));
            params.push(("id", batch.join(",")));
            params.push(("retmode", "xml".to_string()));
            params.push(("rettype", "abstract".to_string()));

            let body = self.get(&url, &params).await?;
            let parsed = xml::parse_article_set(&body)?;
            debug!(requested = batch.len(), parsed = parsed.len(), "efetch batch parsed");
            papers.extend(parsed);
        }

        Ok(papers)
    }

    /// Parameters common to every E-utilities request.
    fn base_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("tool", crate::config::api::TOOL_NAME.to_string())];
        if let Some(email) = &self.config.contact_email {
            params.push(("email", email.clone()));
        }
        if let Some(key) = &self.config.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }

    /// Make a paced GET request and return the response body.
    async fn get(&self, url: &str, params: &[(&'static str, String)]) -> ClientResult<String> {
        // Fixed pacing, applied before every outbound call.
        tokio::time::sleep(self.config.rate_limit_delay).await;

        let response = self.client.get(url).query(params).send().await?;
        let response = self.handle_response(response).await?;
        Ok(response.text().await?)
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_query(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

impl std::fmt::Debug for PubMedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PubMedClient")
            .field("has_api_key", &self.config.has_api_key())
            .field("base_url", &self.config.eutils_base_url)
            .finish()
    }
}
