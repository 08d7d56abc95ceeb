//! pubmed-pharma-scan - Entry point
//!
//! Fetches PubMed papers for a query and reports those with
//! pharmaceutical/biotech company authors as CSV.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pubmed_pharma_scan::report::{self, SummaryStats};
use pubmed_pharma_scan::{AffiliationClassifier, Config, PubMedClient};

#[derive(Parser, Debug)]
#[command(name = "pubmed-pharma-scan")]
#[command(about = "Find PubMed papers with pharmaceutical/biotech company authors")]
#[command(version)]
struct Cli {
    /// PubMed search query (full PubMed syntax: AND/OR/NOT, [Title], quotes)
    query: String,

    /// Write the CSV report to this file instead of stdout
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Maximum number of search results to fetch
    #[arg(long, default_value_t = 100)]
    max_results: usize,

    /// Contact email forwarded to NCBI per its usage guidelines
    #[arg(long, env = "NCBI_EMAIL")]
    email: Option<String>,

    /// NCBI API key (optional, raises the rate ceiling to 10 req/s)
    #[arg(long, env = "NCBI_API_KEY")]
    api_key: Option<String>,

    /// Skip the summary statistics block
    #[arg(long)]
    no_stats: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.debug);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        query = %cli.query,
        max_results = cli.max_results,
        "starting scan"
    );

    let config = Config::new(cli.api_key, cli.email);
    let client = PubMedClient::new(config)?;

    let pmids = client.search(&cli.query, cli.max_results).await?;
    if pmids.is_empty() {
        println!("No papers found for the given query.");
        return Ok(());
    }

    let papers = client.fetch_details(&pmids).await?;
    if papers.is_empty() {
        println!("No paper details could be fetched.");
        return Ok(());
    }

    let classifier = AffiliationClassifier::default();
    let qualifying = classifier.filter_papers(papers);
    if qualifying.is_empty() {
        println!("No papers found with pharmaceutical/biotech company authors.");
        return Ok(());
    }

    match &cli.file {
        Some(path) => {
            report::write_report_to_file(&qualifying, path)?;
            println!("Results written to {}", path.display());
        }
        None => report::write_report_to_stdout(&qualifying)?,
    }

    if !cli.no_stats {
        print!("{}", SummaryStats::compute(&qualifying).render());
    }

    Ok(())
}
