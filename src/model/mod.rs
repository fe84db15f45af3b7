//! Core data types shared by every pipeline stage.
//!
//! A [`Document`] is what the page text source produces; a [`Section`] is what
//! the extractor carves out of it and what the scorer and ranker operate on.

mod document;
mod section;

pub use document::Document;
pub use section::Section;
