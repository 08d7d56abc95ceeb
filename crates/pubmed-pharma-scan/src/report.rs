//! CSV report output.
//!
//! One qualifying paper maps to one fixed six-column row. The row
//! mapping is pure; the sinks write to a file or stdout.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::models::ClassifiedPaper;

/// Fixed report column headers, in output order.
pub const COLUMNS: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// Separator for multi-valued cells.
const JOIN_SEP: &str = "; ";

/// Map one classified paper to its report row.
///
/// The publication date is transcribed as received; a missing email
/// renders as the empty string.
#[must_use]
pub fn to_row(paper: &ClassifiedPaper) -> [String; 6] {
    [
        paper.record.pmid.clone(),
        paper.record.title.clone(),
        paper.record.publication_date.clone(),
        paper.non_academic_authors.join(JOIN_SEP),
        paper.companies.join(JOIN_SEP),
        paper.record.corresponding_email.clone().unwrap_or_default(),
    ]
}

/// Write the report to any sink.
///
/// # Errors
///
/// Returns error on I/O failure.
pub fn write_report<W: Write>(papers: &[ClassifiedPaper], sink: W) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new().quote_style(csv::QuoteStyle::Always).from_writer(sink);

    writer.write_record(COLUMNS)?;
    for paper in papers {
        writer.write_record(to_row(paper))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the report to a file.
///
/// # Errors
///
/// Returns error if the file cannot be created or written.
pub fn write_report_to_file(papers: &[ClassifiedPaper], path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)?;
    write_report(papers, file)?;
    tracing::info!(count = papers.len(), path = %path.display(), "wrote report");
    Ok(())
}

/// Write the report to stdout.
///
/// # Errors
///
/// Returns error on I/O failure.
pub fn write_report_to_stdout(papers: &[ClassifiedPaper]) -> anyhow::Result<()> {
    write_report(papers, std::io::stdout().lock())?;
    Ok(())
}

/// Summary statistics across the qualifying papers.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SummaryStats {
    /// Number of qualifying papers.
    pub total_papers: usize,

    /// Number of distinct companies across all papers.
    pub total_companies: usize,

    /// Number of distinct non-academic authors across all papers.
    pub total_non_academic_authors: usize,

    /// Distinct company names, sorted.
    pub companies: Vec<String>,
}

impl SummaryStats {
    /// Compute statistics over the qualifying papers.
    #[must_use]
    pub fn compute(papers: &[ClassifiedPaper]) -> Self {
        let mut companies: Vec<String> =
            papers.iter().flat_map(|p| p.companies.iter().cloned()).collect();
        companies.sort();
        companies.dedup();

        let mut authors: Vec<&str> =
            papers.iter().flat_map(|p| p.non_academic_authors.iter().map(String::as_str)).collect();
        authors.sort_unstable();
        authors.dedup();

        Self {
            total_papers: papers.len(),
            total_companies: companies.len(),
            total_non_academic_authors: authors.len(),
            companies,
        }
    }

    /// Render the summary block for the console.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("\n=== SUMMARY ===\n");
        out.push_str(&format!("Qualifying papers: {}\n", self.total_papers));
        out.push_str(&format!("Companies: {}\n", self.total_companies));
        out.push_str(&format!("Non-academic authors: {}\n", self.total_non_academic_authors));
        for company in &self.companies {
            out.push_str(&format!("  - {company}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaperAuthor, PaperRecord};

    fn classified(pmid: &str, email: Option<&str>) -> ClassifiedPaper {
        ClassifiedPaper {
            record: PaperRecord {
                pmid: pmid.to_string(),
                title: "A study".to_string(),
                publication_date: "2024-Jan".to_string(),
                authors: vec![PaperAuthor::new("Jane Roe", vec![])],
                corresponding_email: email.map(ToString::to_string),
            },
            non_academic_authors: vec!["Jane Roe".to_string(), "John Doe".to_string()],
            companies: vec!["Pfizer".to_string(), "Genentech".to_string()],
        }
    }

    #[test]
    fn test_row_mapping() {
        let row = to_row(&classified("42", Some("jane@pfizer.com")));
        assert_eq!(row[0], "42");
        assert_eq!(row[1], "A study");
        assert_eq!(row[2], "2024-Jan");
        assert_eq!(row[3], "Jane Roe; John Doe");
        assert_eq!(row[4], "Pfizer; Genentech");
        assert_eq!(row[5], "jane@pfizer.com");
    }

    #[test]
    fn test_missing_email_is_empty_string() {
        let row = to_row(&classified("42", None));
        assert_eq!(row[5], "");
    }

    #[test]
    fn test_write_report_emits_header_and_rows() {
        let mut out = Vec::new();
        write_report(&[classified("42", None)], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "\"PubmedID\",\"Title\",\"Publication Date\",\"Non-academic Author(s)\",\"Company Affiliation(s)\",\"Corresponding Author Email\""
        );
        assert!(lines.next().unwrap().starts_with("\"42\","));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_summary_stats_dedupe_across_papers() {
        let papers = vec![classified("1", None), classified("2", None)];
        let stats = SummaryStats::compute(&papers);
        assert_eq!(stats.total_papers, 2);
        assert_eq!(stats.total_companies, 2);
        assert_eq!(stats.total_non_academic_authors, 2);
        assert_eq!(stats.companies, vec!["Genentech", "Pfizer"]);
    }

    #[test]
    fn test_summary_render_lists_companies() {
        let stats = SummaryStats::compute(&[classified("1", None)]);
        let rendered = stats.render();
        assert!(rendered.contains("Qualifying papers: 1"));
        assert!(rendered.contains("  - Pfizer"));
    }
}
