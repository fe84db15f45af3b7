//! Page text sources.
//!
//! The pipeline only needs "document id → ordered page texts". The
//! [`PageTextSource`] trait isolates that from any concrete PDF library so the
//! rest of the crate can be driven by in-memory documents in tests.

mod content;
mod memory;
mod pdf;

pub use memory::MemoryPageSource;
pub use pdf::{is_pdf_bytes, PdfPageSource};

use crate::error::Result;
use crate::model::Document;

/// Something that can turn a document id into page texts.
pub trait PageTextSource {
    /// Load every page of `document_id`.
    ///
    /// An `Err` means the whole document is unavailable (missing, unreadable,
    /// not a PDF). Individual pages without text are `None` entries in the
    /// returned document, not errors.
    fn load(&self, document_id: &str) -> Result<Document>;

    /// Short name used in log messages.
    fn name(&self) -> &str;
}

impl<T: PageTextSource + ?Sized> PageTextSource for &T {
    fn load(&self, document_id: &str) -> Result<Document> {
        (**self).load(document_id)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
