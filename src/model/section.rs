//! Section type.

use serde::{Deserialize, Serialize};

/// A titled fragment of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Owning document id
    pub document: String,

    /// The title line, exactly as found on the page
    pub title: String,

    /// Up to N lines following the title, newline-joined
    pub body: String,

    /// Page number (1-indexed)
    pub page_number: u32,

    /// Cosine similarity against the query
    pub raw_score: f64,

    /// Raw score after boost/penalty adjustments
    pub adjusted_score: f64,
}

impl Section {
    /// Create an unscored section.
    pub fn new(
        document: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
        page_number: u32,
    ) -> Self {
        Self {
            document: document.into(),
            title: title.into(),
            body: body.into(),
            page_number,
            raw_score: 0.0,
            adjusted_score: 0.0,
        }
    }

    /// Text the relevance model sees for this section.
    pub fn model_text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}
