//! Data models for papers, authors, and classification results.

mod paper;

pub use paper::{ClassifiedPaper, PaperAuthor, PaperRecord};
