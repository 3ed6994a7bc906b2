//! Research document model.
//!
//! # Responsibility
//! - Define the canonical record stored in the collection slot.
//! - Provide read-side helpers (preview, paragraphs) and date checks.
//!
//! # Invariants
//! - Field order on the wire is `id,title,authors,date,content,views`.
//! - Absent fields deserialize to their empty value, so a restored list of
//!   partial documents stays readable; `views` never goes negative.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Number of words kept by [`preview_text`].
pub const PREVIEW_WORD_LIMIT: usize = 40;

/// Wire names of every document field, in serialization order.
pub const DOCUMENT_FIELDS: [&str; 6] = ["id", "title", "authors", "date", "content", "views"];

static DATE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// One published research item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchItem {
    /// Opaque identifier, assigned at creation.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: String,
    /// Calendar date in `YYYY-MM-DD` form.
    #[serde(default)]
    pub date: String,
    /// Free text; paragraphs are separated by `\n`.
    #[serde(default)]
    pub content: String,
    /// Read counter.
    #[serde(default)]
    pub views: u64,
}

impl ResearchItem {
    /// Builds an item from a draft with the given id and a zero counter.
    pub fn from_draft(id: impl Into<String>, draft: ResearchDraft) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            authors: draft.authors,
            date: draft.date,
            content: draft.content,
            views: 0,
        }
    }

    /// Replaces every owner-editable field, keeping `id` and `views`.
    pub fn apply_draft(&mut self, draft: ResearchDraft) {
        self.title = draft.title;
        self.authors = draft.authors;
        self.date = draft.date;
        self.content = draft.content;
    }

    /// Card preview of this item's content.
    pub fn preview(&self) -> String {
        preview_text(&self.content)
    }

    /// Reader paragraphs of this item's content.
    pub fn paragraphs(&self) -> Vec<&str> {
        paragraphs(&self.content)
    }
}

/// Owner-editable fields supplied by the publish/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResearchDraft {
    pub title: String,
    pub authors: String,
    pub date: String,
    pub content: String,
}

impl ResearchDraft {
    pub fn new(
        title: impl Into<String>,
        authors: impl Into<String>,
        date: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            authors: authors.into(),
            date: date.into(),
            content: content.into(),
        }
    }
}

/// Returns the first [`PREVIEW_WORD_LIMIT`] words of `content` followed by `...`.
///
/// Runs of whitespace (including paragraph breaks) collapse into one space.
pub fn preview_text(content: &str) -> String {
    let normalized = WHITESPACE_RE.replace_all(content.trim(), " ");
    let mut preview = normalized
        .split(' ')
        .filter(|word| !word.is_empty())
        .take(PREVIEW_WORD_LIMIT)
        .collect::<Vec<_>>()
        .join(" ");
    preview.push_str("...");
    preview
}

/// Splits `content` into trimmed, non-empty paragraphs.
pub fn paragraphs(content: &str) -> Vec<&str> {
    content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Returns whether `value` is a real calendar date written as `YYYY-MM-DD`.
pub fn is_valid_date(value: &str) -> bool {
    DATE_SHAPE_RE.is_match(value) && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}
