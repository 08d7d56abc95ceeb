//! Parser for PubMed efetch XML (`<PubmedArticleSet>` documents).
//!
//! Pull-parser state machine over quick-xml events. Broken articles are
//! skipped with a warning rather than failing the whole batch.

use std::sync::LazyLock;

use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;
use tracing::warn;

use crate::error::{ClientError, ClientResult};
use crate::models::{PaperAuthor, PaperRecord};

/// Matches the first email-shaped token in an affiliation string.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

/// Date fields collected from a `PubDate` or `ArticleDate` element.
#[derive(Default)]
struct DateParts {
    year: String,
    month: String,
    day: String,
    medline: String,
}

impl DateParts {
    /// Render as `Year[-Month[-Day]]`, falling back to the free-form
    /// `MedlineDate` text when no structured year is present.
    fn render(&self) -> Option<String> {
        if self.year.is_empty() {
            if self.medline.is_empty() {
                return None;
            }
            return Some(self.medline.clone());
        }
        let mut parts = vec![self.year.clone()];
        if !self.month.is_empty() {
            parts.push(self.month.clone());
            if !self.day.is_empty() {
                parts.push(self.day.clone());
            }
        }
        Some(parts.join("-"))
    }
}

/// Per-article parse state, reset at each `<PubmedArticle>`.
#[derive(Default)]
struct ArticleState {
    pmid: String,
    title: String,
    authors: Vec<PaperAuthor>,
    pub_date: DateParts,
    article_date: DateParts,
    // Author currently being assembled.
    last_name: String,
    fore_name: String,
    initials: String,
    affiliations: Vec<String>,
}

impl ArticleState {
    fn finish_author(&mut self) {
        // Collective-name groups carry no LastName; they are not people
        // and are skipped, as the upstream record intends.
        if self.last_name.is_empty() {
            self.affiliations.clear();
            return;
        }
        let name = if !self.fore_name.is_empty() {
            format!("{} {}", self.fore_name, self.last_name)
        } else if !self.initials.is_empty() {
            format!("{} {}", self.initials, self.last_name)
        } else {
            self.last_name.clone()
        };
        self.authors.push(PaperAuthor::new(name, std::mem::take(&mut self.affiliations)));
    }

    fn into_record(self) -> Option<PaperRecord> {
        if self.pmid.is_empty() {
            warn!("skipping article with no PMID");
            return None;
        }
        if self.title.is_empty() {
            warn!(pmid = %self.pmid, "skipping article with empty title");
            return None;
        }
        let publication_date = self
            .pub_date
            .render()
            .or_else(|| self.article_date.render())
            .unwrap_or_else(|| "Unknown".to_string());
        let corresponding_email = self
            .authors
            .iter()
            .flat_map(|a| a.affiliations.iter())
            .find_map(|aff| EMAIL_RE.find(aff))
            .map(|m| m.as_str().to_string());
        Some(PaperRecord {
            pmid: self.pmid,
            title: self.title,
            publication_date,
            authors: self.authors,
            corresponding_email,
        })
    }
}

/// Which element's text we are currently inside.
#[derive(Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    None,
    Pmid,
    Title,
    LastName,
    ForeName,
    Initials,
    Affiliation,
    Year,
    Month,
    Day,
    MedlineDate,
}

/// Which date element encloses the current Year/Month/Day fields.
#[derive(Clone, Copy, PartialEq, Eq)]
enum DateContext {
    None,
    PubDate,
    ArticleDate,
}

/// Parse an efetch response into paper records, in document order.
///
/// # Errors
///
/// Returns [`ClientError::Xml`] when the document is unreadable before a
/// single article could be parsed. A reader error after that point stops
/// parsing and returns what was recovered.
pub fn parse_article_set(xml: &str) -> ClientResult<Vec<PaperRecord>> {
    let mut papers = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut current: Option<ArticleState> = None;
    let mut target = TextTarget::None;
    let mut date_ctx = DateContext::None;
    let mut in_author = false;
    let mut affiliation_buf = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"PubmedArticle" => current = Some(ArticleState::default()),
                b"PMID" => target = TextTarget::Pmid,
                b"ArticleTitle" => target = TextTarget::Title,
                b"Author" => {
                    if let Some(state) = current.as_mut() {
                        in_author = true;
                        state.last_name.clear();
                        state.fore_name.clear();
                        state.initials.clear();
                        state.affiliations.clear();
                    }
                }
                b"LastName" => target = TextTarget::LastName,
                b"ForeName" => target = TextTarget::ForeName,
                b"Initials" => target = TextTarget::Initials,
                b"Affiliation" => {
                    if in_author {
                        target = TextTarget::Affiliation;
                        affiliation_buf.clear();
                    }
                }
                b"PubDate" => date_ctx = DateContext::PubDate,
                b"ArticleDate" => date_ctx = DateContext::ArticleDate,
                b"Year" => target = TextTarget::Year,
                b"Month" => target = TextTarget::Month,
                b"Day" => target = TextTarget::Day,
                b"MedlineDate" => target = TextTarget::MedlineDate,
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default();
                if let Some(state) = current.as_mut() {
                    match target {
                        // Reference sections repeat PMID tags; the first
                        // occurrence in the citation header wins.
                        TextTarget::Pmid if state.pmid.is_empty() => state.pmid.push_str(&text),
                        // Titles and affiliations may carry nested markup,
                        // so text arrives in pieces and is accumulated.
                        TextTarget::Title => state.title.push_str(&text),
                        TextTarget::Affiliation => affiliation_buf.push_str(&text),
                        TextTarget::LastName => state.last_name.push_str(&text),
                        TextTarget::ForeName => state.fore_name.push_str(&text),
                        TextTarget::Initials => state.initials.push_str(&text),
                        TextTarget::Year | TextTarget::Month | TextTarget::Day
                        | TextTarget::MedlineDate => {
                            let date = match date_ctx {
                                DateContext::PubDate => Some(&mut state.pub_date),
                                DateContext::ArticleDate => Some(&mut state.article_date),
                                DateContext::None => None,
                            };
                            if let Some(date) = date {
                                match target {
                                    TextTarget::Year if date.year.is_empty() => {
                                        date.year = text.to_string();
                                    }
                                    TextTarget::Month if date.month.is_empty() => {
                                        date.month = text.to_string();
                                    }
                                    TextTarget::Day if date.day.is_empty() => {
                                        date.day = text.to_string();
                                    }
                                    TextTarget::MedlineDate if date.medline.is_empty() => {
                                        date.medline = text.to_string();
                                    }
                                    _ => {}
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"PMID" | b"ArticleTitle" | b"LastName" | b"ForeName" | b"Initials" | b"Year"
                | b"Month" | b"Day" | b"MedlineDate" => target = TextTarget::None,
                b"Affiliation" => {
                    if target == TextTarget::Affiliation {
                        if let Some(state) = current.as_mut() {
                            let aff = affiliation_buf.trim().to_string();
                            if !aff.is_empty() {
                                state.affiliations.push(aff);
                            }
                        }
                        target = TextTarget::None;
                    }
                }
                b"PubDate" | b"ArticleDate" => date_ctx = DateContext::None,
                b"Author" => {
                    if in_author {
                        if let Some(state) = current.as_mut() {
                            state.finish_author();
                        }
                        in_author = false;
                    }
                }
                b"PubmedArticle" => {
                    if let Some(record) = current.take().and_then(ArticleState::into_record) {
                        papers.push(record);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                if papers.is_empty() {
                    return Err(ClientError::xml(e.to_string()));
                }
                warn!(error = %e, recovered = papers.len(), "stopping on XML reader error");
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(papers)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE_ARTICLE: &str = r#"<?xml version="1.0"?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID Version="1">12345678</PMID>
      <Article>
        <Journal>
          <JournalIssue>
            <PubDate><Year>2024</Year><Month>Mar</Month><Day>5</Day></PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>Checkpoint inhibition in solid tumors</ArticleTitle>
        <AuthorList>
          <Author>
            <LastName>Roe</LastName>
            <ForeName>Jane</ForeName>
            <AffiliationInfo>
              <Affiliation>Pfizer Inc., New York, NY, USA. jane.roe@pfizer.com.</Affiliation>
            </AffiliationInfo>
          </Author>
          <Author>
            <LastName>Doe</LastName>
            <Initials>J</Initials>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

    #[test]
    fn test_parse_single_article() {
        let papers = parse_article_set(SINGLE_ARTICLE).unwrap();
        assert_eq!(papers.len(), 1);

        let paper = &papers[0];
        assert_eq!(paper.pmid, "12345678");
        assert_eq!(paper.title, "Checkpoint inhibition in solid tumors");
        assert_eq!(paper.publication_date, "2024-Mar-5");
        assert_eq!(paper.authors.len(), 2);
        assert_eq!(paper.authors[0].name, "Jane Roe");
        assert_eq!(paper.authors[0].affiliations, vec![
            "Pfizer Inc., New York, NY, USA. jane.roe@pfizer.com.".to_string()
        ]);
        assert_eq!(paper.authors[1].name, "J Doe");
        assert!(paper.authors[1].affiliations.is_empty());
        assert_eq!(paper.corresponding_email.as_deref(), Some("jane.roe@pfizer.com"));
    }

    #[test]
    fn test_title_with_nested_markup_is_flattened() {
        let xml = r#"<PubmedArticleSet><PubmedArticle><MedlineCitation>
            <PMID>1</PMID>
            <Article>
              <ArticleTitle>Effects of <i>BRCA1</i> variants</ArticleTitle>
              <Journal><JournalIssue><PubDate><Year>2020</Year></PubDate></JournalIssue></Journal>
            </Article>
        </MedlineCitation></PubmedArticle></PubmedArticleSet>"#;

        let papers = parse_article_set(xml).unwrap();
        assert_eq!(papers[0].title, "Effects of BRCA1 variants");
        assert_eq!(papers[0].publication_date, "2020");
    }

    #[test]
    fn test_medline_date_fallback() {
        let xml = r#"<PubmedArticleSet><PubmedArticle><MedlineCitation>
            <PMID>2</PMID>
            <Article>
              <ArticleTitle>Old review</ArticleTitle>
              <Journal><JournalIssue><PubDate><MedlineDate>1998 Nov-Dec</MedlineDate></PubDate></JournalIssue></Journal>
            </Article>
        </MedlineCitation></PubmedArticle></PubmedArticleSet>"#;

        let papers = parse_article_set(xml).unwrap();
        assert_eq!(papers[0].publication_date, "1998 Nov-Dec");
    }

    #[test]
    fn test_missing_date_is_unknown() {
        let xml = r#"<PubmedArticleSet><PubmedArticle><MedlineCitation>
            <PMID>3</PMID>
            <Article><ArticleTitle>No date here</ArticleTitle></Article>
        </MedlineCitation></PubmedArticle></PubmedArticleSet>"#;

        let papers = parse_article_set(xml).unwrap();
        assert_eq!(papers[0].publication_date, "Unknown");
        assert!(papers[0].corresponding_email.is_none());
    }

    #[test]
    fn test_collective_name_author_is_skipped() {
        let xml = r#"<PubmedArticleSet><PubmedArticle><MedlineCitation>
            <PMID>4</PMID>
            <Article>
              <ArticleTitle>Consortium report</ArticleTitle>
              <AuthorList>
                <Author><CollectiveName>The XYZ Study Group</CollectiveName></Author>
                <Author><LastName>Smith</LastName><ForeName>Ann</ForeName></Author>
              </AuthorList>
            </Article>
        </MedlineCitation></PubmedArticle></PubmedArticleSet>"#;

        let papers = parse_article_set(xml).unwrap();
        assert_eq!(papers[0].authors.len(), 1);
        assert_eq!(papers[0].authors[0].name, "Ann Smith");
    }

    #[test]
    fn test_article_missing_title_is_skipped_not_fatal() {
        let xml = r#"<PubmedArticleSet>
          <PubmedArticle><MedlineCitation><PMID>5</PMID></MedlineCitation></PubmedArticle>
          <PubmedArticle><MedlineCitation>
            <PMID>6</PMID>
            <Article><ArticleTitle>Survivor</ArticleTitle></Article>
          </MedlineCitation></PubmedArticle>
        </PubmedArticleSet>"#;

        let papers = parse_article_set(xml).unwrap();
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].pmid, "6");
    }

    #[test]
    fn test_reference_pmids_do_not_overwrite_citation_pmid() {
        let xml = r#"<PubmedArticleSet><PubmedArticle><MedlineCitation>
            <PMID>7</PMID>
            <Article><ArticleTitle>Cited work</ArticleTitle></Article>
            <CommentsCorrectionsList>
              <CommentsCorrections><PMID>99999999</PMID></CommentsCorrections>
            </CommentsCorrectionsList>
        </MedlineCitation></PubmedArticle></PubmedArticleSet>"#;

        let papers = parse_article_set(xml).unwrap();
        assert_eq!(papers[0].pmid, "7");
    }

    #[test]
    fn test_unreadable_document_is_an_error() {
        // Mismatched end tag before any article was recovered.
        let err = parse_article_set("<PubmedArticleSet><PMID>1</Wrong></PubmedArticleSet>")
            .unwrap_err();
        assert!(matches!(err, ClientError::Xml { .. }));
    }

    #[test]
    fn test_empty_article_set() {
        let papers = parse_article_set("<PubmedArticleSet></PubmedArticleSet>").unwrap();
        assert!(papers.is_empty());
    }
}
