//! Affiliation classification.
//!
//! Decides, per affiliation string, whether an author is academic or
//! industry, and which company is implicated. All matches are
//! deterministic case-insensitive substring tests evaluated in a fixed
//! order; identical input text always yields identical output.

mod lists;

use tracing::info;

use crate::models::{ClassifiedPaper, PaperRecord};

/// Outcome of classifying one affiliation string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AffiliationKind {
    /// Academic, clinical, or unmatched. Contributes nothing to the report.
    Academic,

    /// Matched a known company; carries the canonical company name.
    Company(String),

    /// Matched an industry keyword; carries the normalized affiliation
    /// as the company identifier.
    Industry(String),
}

impl AffiliationKind {
    /// The company name recorded for this affiliation, if non-academic.
    #[must_use]
    pub fn company_name(&self) -> Option<&str> {
        match self {
            Self::Academic => None,
            Self::Company(name) | Self::Industry(name) => Some(name),
        }
    }

    /// Whether this affiliation marks its author as non-academic.
    #[must_use]
    pub const fn is_non_academic(&self) -> bool {
        !matches!(self, Self::Academic)
    }
}

/// Immutable match tables injected into the classifier at construction.
///
/// `Default` loads the production tables; tests supply small
/// deterministic ones instead.
#[derive(Debug, Clone)]
pub struct ClassifierRules {
    /// Substrings marking an affiliation as academic (checked first).
    pub academic_markers: Vec<String>,

    /// Known pharma/biotech company names.
    pub companies: Vec<String>,

    /// Fallback industry keywords.
    pub industry_keywords: Vec<String>,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            academic_markers: lists::ACADEMIC_MARKERS.iter().map(ToString::to_string).collect(),
            companies: lists::KNOWN_COMPANIES.iter().map(ToString::to_string).collect(),
            industry_keywords: lists::INDUSTRY_KEYWORDS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Classifies affiliations and filters papers down to those with at
/// least one non-academic author.
#[derive(Debug, Clone)]
pub struct AffiliationClassifier {
    academic_markers: Vec<String>,
    /// (lowercased needle, canonical display name) pairs.
    companies: Vec<(String, String)>,
    industry_keywords: Vec<String>,
}

impl AffiliationClassifier {
    /// Build a classifier from the given rules. Needles are lowercased
    /// once here so every match is a plain substring test.
    #[must_use]
    pub fn new(rules: ClassifierRules) -> Self {
        Self {
            academic_markers: rules.academic_markers.iter().map(|m| m.to_lowercase()).collect(),
            companies: rules
                .companies
                .iter()
                .map(|c| (c.to_lowercase(), title_case(c)))
                .collect(),
            industry_keywords: rules
                .industry_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
        }
    }

    /// Classify one affiliation string.
    ///
    /// Ordered, short-circuiting rule chain; the order is load-bearing:
    /// 1. academic marker → `Academic` (authoritative, even when a
    ///    company name is also present),
    /// 2. known company → `Company(canonical name)`,
    /// 3. industry keyword → `Industry(normalized affiliation)`,
    /// 4. otherwise → `Academic`.
    #[must_use]
    pub fn classify(&self, affiliation: &str) -> AffiliationKind {
        let lower = affiliation.to_lowercase();

        if self.academic_markers.iter().any(|marker| lower.contains(marker.as_str())) {
            return AffiliationKind::Academic;
        }

        if let Some((_, display)) =
            self.companies.iter().find(|(needle, _)| lower.contains(needle.as_str()))
        {
            return AffiliationKind::Company(display.clone());
        }

        if self.industry_keywords.iter().any(|keyword| lower.contains(keyword.as_str())) {
            return AffiliationKind::Industry(normalize_company(affiliation));
        }

        AffiliationKind::Academic
    }

    /// Classify every affiliation of every author on a paper.
    ///
    /// Aggregates distinct non-academic author names and distinct company
    /// names in first-seen order, keeping the output deterministic.
    #[must_use]
    pub fn classify_paper(&self, record: PaperRecord) -> ClassifiedPaper {
        let mut non_academic_authors: Vec<String> = Vec::new();
        let mut companies: Vec<String> = Vec::new();

        for (author, affiliation) in record.affiliation_pairs() {
            let kind = self.classify(affiliation);
            if !kind.is_non_academic() {
                continue;
            }
            if !non_academic_authors.iter().any(|n| n == author) {
                non_academic_authors.push(author.to_string());
            }
            if let Some(company) = kind.company_name() {
                if !companies.iter().any(|c| c == company) {
                    companies.push(company.to_string());
                }
            }
        }

        ClassifiedPaper { record, non_academic_authors, companies }
    }

    /// Keep only papers with at least one non-academic author, preserving
    /// input order.
    #[must_use]
    pub fn filter_papers(&self, records: Vec<PaperRecord>) -> Vec<ClassifiedPaper> {
        let total = records.len();
        let qualifying: Vec<ClassifiedPaper> = records
            .into_iter()
            .map(|record| self.classify_paper(record))
            .filter(ClassifiedPaper::qualifies)
            .collect();

        info!(qualifying = qualifying.len(), total, "filtered papers with industry authors");
        qualifying
    }
}

impl Default for AffiliationClassifier {
    fn default() -> Self {
        Self::new(ClassifierRules::default())
    }
}

/// Normalize an affiliation into a company identifier for keyword-only
/// matches: the first comma-separated segment when it is long enough to
/// be a name, otherwise the whole string.
fn normalize_company(affiliation: &str) -> String {
    let head = affiliation.split(',').next().unwrap_or(affiliation).trim();
    if head.len() > 3 { head.to_string() } else { affiliation.trim().to_string() }
}

/// Title-case a company list entry for display ("bristol-myers squibb"
/// becomes "Bristol-Myers Squibb").
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_boundary = true;
    for c in name.chars() {
        if c.is_alphabetic() {
            if at_boundary {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_boundary = false;
        } else {
            out.push(c);
            at_boundary = true;
        }
    }
    out
}
