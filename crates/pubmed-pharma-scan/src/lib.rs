//! PubMed Pharma Scan
//!
//! Searches PubMed for a free-text query, fetches article metadata via
//! the NCBI E-utilities, flags papers with at least one author affiliated
//! with a pharmaceutical/biotech company, and renders a six-column CSV
//! report.
//!
//! # Pipeline
//!
//! query → [`PubMedClient::search`] → PMIDs → [`PubMedClient::fetch_details`]
//! → paper records → [`AffiliationClassifier::filter_papers`] → qualifying
//! papers → [`report`].
//!
//! # Example
//!
//! ```no_run
//! use pubmed_pharma_scan::{AffiliationClassifier, Config, PubMedClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PubMedClient::new(Config::from_env())?;
//!     let pmids = client.search("cancer AND drug development", 50).await?;
//!     let papers = client.fetch_details(&pmids).await?;
//!
//!     let classifier = AffiliationClassifier::default();
//!     let qualifying = classifier.filter_papers(papers);
//!     pubmed_pharma_scan::report::write_report_to_stdout(&qualifying)?;
//!     Ok(())
//! }
//! ```

pub mod classifier;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod report;

pub use classifier::{AffiliationClassifier, AffiliationKind, ClassifierRules};
pub use client::PubMedClient;
pub use config::Config;
pub use error::{ClientError, ClientResult};
pub use models::{ClassifiedPaper, PaperAuthor, PaperRecord};
