//! # docrank
//!
//! Pulls candidate sections out of a batch of PDFs, scores them against a
//! fixed information need, and writes a ranked top-K summary.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docrank::{rank_documents, RankConfig};
//!
//! fn main() -> docrank::Result<()> {
//!     let config = RankConfig::new()
//!         .with_pdf_dir("./pdfs")
//!         .with_input_path("challenge1b_input.json")
//!         .with_output_path("challenge1b_output.json");
//!
//!     let record = rank_documents(config)?;
//!     for section in &record.extracted_sections {
//!         println!("{}. {}", section.importance_rank, section.section_title);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. [`source`]: document id → page texts (PDFs via lopdf)
//! 2. [`extract`]: page text → titled sections
//! 3. [`corpus`]: all sections of the run
//! 4. [`relevance`]: TF-IDF fitted once over the corpus
//! 5. [`score`]: cosine similarity plus keyword boosts and penalties
//! 6. [`rank`]: stable descending sort, top K
//! 7. [`render`]: excerpts and the JSON output record

pub mod config;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod input;
pub mod model;
pub mod pipeline;
pub mod rank;
pub mod relevance;
pub mod render;
pub mod score;
pub mod source;

// Re-export commonly used types
pub use config::RankConfig;
pub use corpus::Corpus;
pub use error::{Error, Result};
pub use extract::{extract_sections, is_title_line, SectionExtractor};
pub use input::InputSpec;
pub use model::{Document, Section};
pub use pipeline::Pipeline;
pub use rank::{rank, RankedSection};
pub use relevance::{SparseVector, TfidfModel, VectorSpace};
pub use render::{refine_text, write_output, JsonFormat, OutputRecord};
pub use score::{AdjustmentRule, RuleTarget, Scorer};
pub use source::{MemoryPageSource, PageTextSource, PdfPageSource};

use std::path::Path;

/// Run the whole pipeline from configuration: read the input record, rank
/// the listed PDFs, write the output record.
///
/// # Example
///
/// ```no_run
/// use docrank::{rank_documents, RankConfig};
///
/// let record = rank_documents(RankConfig::default()).unwrap();
/// println!("{} sections", record.extracted_sections.len());
/// ```
pub fn rank_documents(config: RankConfig) -> Result<OutputRecord> {
    Pipeline::from_config(config)?.run_files()
}

/// Extract the sections of a single PDF file.
///
/// # Example
///
/// ```no_run
/// use docrank::sections_from_file;
///
/// for section in sections_from_file("menu.pdf").unwrap() {
///     println!("p{} {}", section.page_number, section.title);
/// }
/// ```
pub fn sections_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Section>> {
    let document = PdfPageSource::load_path(path)?;
    Ok(extract_sections(&document))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_from_missing_file() {
        let result = sections_from_file("/nonexistent/menu.pdf");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_rank_documents_missing_input() {
        let config = RankConfig::new().with_input_path("/nonexistent/input.json");
        assert!(matches!(rank_documents(config), Err(Error::Io(_))));
    }

    #[test]
    fn test_rank_documents_invalid_config() {
        let config = RankConfig::new().with_top_k(0);
        assert!(matches!(
            rank_documents(config),
            Err(Error::InvalidConfig(_))
        ));
    }
}
