//! Document-level types.

use serde::{Deserialize, Serialize};

/// A source document as a sequence of page texts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier (the input filename)
    pub id: String,

    /// Page texts in page order; `None` for pages without extractable text
    pub pages: Vec<Option<String>>,
}

impl Document {
    /// Create a document with no pages.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pages: Vec::new(),
        }
    }

    /// Create a document from page texts, all of which are present.
    pub fn from_pages<I, S>(id: impl Into<String>, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            pages: pages.into_iter().map(|p| Some(p.into())).collect(),
        }
    }

    /// Append a page.
    pub fn add_page(&mut self, text: Option<String>) {
        self.pages.push(text);
    }

    /// Number of pages, including pages without text.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page's text by number (1-indexed).
    pub fn page_text(&self, page_num: u32) -> Option<&str> {
        if page_num == 0 {
            return None;
        }
        self.pages
            .get((page_num - 1) as usize)
            .and_then(|p| p.as_deref())
    }

    /// Iterate `(page_number, text)` over pages that have text.
    pub fn text_pages(&self) -> impl Iterator<Item = (u32, &str)> {
        self.pages
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_deref().map(|t| (i as u32 + 1, t)))
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new("a.pdf");
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
        assert_eq!(doc.page_text(1), None);
    }

    #[test]
    fn test_page_text_is_one_indexed() {
        let mut doc = Document::from_pages("a.pdf", ["first", "second"]);
        doc.add_page(None);

        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.page_text(0), None);
        assert_eq!(doc.page_text(1), Some("first"));
        assert_eq!(doc.page_text(2), Some("second"));
        assert_eq!(doc.page_text(3), None);
    }

    #[test]
    fn test_text_pages_skips_missing() {
        let doc = Document {
            id: "a.pdf".to_string(),
            pages: vec![None, Some("two".to_string()), None, Some("four".to_string())],
        };
        let pages: Vec<_> = doc.text_pages().collect();
        assert_eq!(pages, vec![(2, "two"), (4, "four")]);
    }
}
