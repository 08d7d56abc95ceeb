//! Paper data model matching what the PubMed efetch response provides.

use serde::{Deserialize, Serialize};

/// One author on one paper, with the raw affiliation strings PubMed attaches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperAuthor {
    /// Display name ("ForeName LastName", or initials fallback).
    pub name: String,

    /// Raw affiliation strings, zero or more.
    #[serde(default)]
    pub affiliations: Vec<String>,
}

impl PaperAuthor {
    /// Create an author with affiliations.
    #[must_use]
    pub fn new(name: impl Into<String>, affiliations: Vec<String>) -> Self {
        Self { name: name.into(), affiliations }
    }
}

/// A paper as returned by the PubMed efetch endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperRecord {
    /// PubMed ID, stable across esearch and efetch.
    pub pmid: String,

    /// Article title.
    pub title: String,

    /// Publication date as received from PubMed (free-form, not ISO-normalized).
    pub publication_date: String,

    /// Authors in document order.
    #[serde(default)]
    pub authors: Vec<PaperAuthor>,

    /// Corresponding author email, when one appears in the record.
    #[serde(default)]
    pub corresponding_email: Option<String>,
}

impl PaperRecord {
    /// Iterate over every (author name, affiliation string) pair.
    pub fn affiliation_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.authors.iter().flat_map(|author| {
            author.affiliations.iter().map(move |aff| (author.name.as_str(), aff.as_str()))
        })
    }
}

/// A paper plus the classification computed for one run.
///
/// Derived, never persisted; recomputed on every invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedPaper {
    /// The underlying paper record.
    pub record: PaperRecord,

    /// Distinct names of authors with a non-academic affiliation, first-seen order.
    pub non_academic_authors: Vec<String>,

    /// Distinct company names identified across all authors, first-seen order.
    pub companies: Vec<String>,
}

impl ClassifiedPaper {
    /// A paper qualifies for the report iff at least one non-academic author was found.
    #[must_use]
    pub fn qualifies(&self) -> bool {
        !self.non_academic_authors.is_empty()
    }
}
