//! Corpus: every section of a run, in document then extraction order.

use crate::model::Section;

/// All sections of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    sections: Vec<Section>,
}

impl Corpus {
    /// Concatenate per-document section lists in the order given.
    pub fn build<I>(per_document: I) -> Self
    where
        I: IntoIterator<Item = Vec<Section>>,
    {
        let sections = per_document.into_iter().flatten().collect();
        Self { sections }
    }

    /// Sections in corpus order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Consume the corpus, yielding its sections.
    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }

    /// Per-section texts the relevance model is fitted on.
    pub fn texts(&self) -> Vec<String> {
        self.sections.iter().map(Section::model_text).collect()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if no sections were extracted.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
