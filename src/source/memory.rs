//! In-memory page source.

use std::collections::HashMap;
use std::io;

use crate::error::{Error, Result};
use crate::model::Document;

use super::PageTextSource;

/// Serves pre-loaded documents by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryPageSource {
    documents: HashMap<String, Document>,
}

impl MemoryPageSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document whose pages all have text.
    pub fn with_document<I, S>(mut self, id: impl Into<String>, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let doc = Document::from_pages(id, pages);
        self.documents.insert(doc.id.clone(), doc);
        self
    }

    /// Register a fully specified document.
    pub fn insert(&mut self, document: Document) {
        self.documents.insert(document.id.clone(), document);
    }

    /// Number of registered documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if no documents are registered.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl PageTextSource for MemoryPageSource {
    fn load(&self, document_id: &str) -> Result<Document> {
        self.documents.get(document_id).cloned().ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", document_id),
            ))
        })
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_registered_document() {
        let source = MemoryPageSource::new().with_document("menu.pdf", ["Page one", "Page two"]);
        let doc = source.load("menu.pdf").unwrap();
        assert_eq!(doc.id, "menu.pdf");
        assert_eq!(doc.page_count(), 2);
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_load_unknown_document() {
        let source = MemoryPageSource::new();
        assert!(source.is_empty());
        assert!(matches!(source.load("missing.pdf"), Err(Error::Io(_))));
    }

    #[test]
    fn test_insert_preserves_missing_pages() {
        let mut source = MemoryPageSource::new();
        source.insert(Document {
            id: "scan.pdf".to_string(),
            pages: vec![None, Some("Text".to_string())],
        });
        let doc = source.load("scan.pdf").unwrap();
        assert_eq!(doc.page_text(1), None);
        assert_eq!(doc.page_text(2), Some("Text"));
    }
}
