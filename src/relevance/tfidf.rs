//! TF-IDF vector space.
//!
//! Weights are raw term counts times smoothed inverse document frequency,
//! `idf(t) = ln((1 + n) / (1 + df(t))) + 1`, and every encoded vector is
//! L2-normalized.

use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, Result};

use super::tokenize::Tokenizer;
use super::{SparseVector, VectorSpace};

/// A TF-IDF model fitted over a fixed set of texts.
#[derive(Debug, Clone)]
pub struct TfidfModel {
    tokenizer: Tokenizer,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    document_count: usize,
}

impl TfidfModel {
    /// Fit over `texts` with the default tokenizer.
    pub fn fit<S: AsRef<str>>(texts: &[S]) -> Result<Self> {
        Self::fit_with_tokenizer(texts, Tokenizer::new())
    }

    /// Fit over `texts` with a custom tokenizer.
    pub fn fit_with_tokenizer<S: AsRef<str>>(texts: &[S], tokenizer: Tokenizer) -> Result<Self> {
        if texts.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for text in texts {
            let mut terms = tokenizer.tokenize(text.as_ref());
            terms.sort_unstable();
            terms.dedup();
            for term in terms {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let n = texts.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        log::debug!(
            "Fitted TF-IDF over {} texts, {} terms",
            texts.len(),
            vocabulary.len()
        );

        Ok(Self {
            tokenizer,
            vocabulary,
            idf,
            document_count: texts.len(),
        })
    }

    /// Dimension index of a term, if it is in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// IDF weight of a term, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|i| self.idf[i])
    }

    /// Number of texts the model was fitted on.
    pub fn document_count(&self) -> usize {
        self.document_count
    }
}

impl VectorSpace for TfidfModel {
    fn encode(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.tokenizer.tokenize(text) {
            if let Some(index) = self.term_index(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let pairs = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();
        let mut vector = SparseVector::from_pairs(pairs);
        vector.normalize();
        vector
    }

    fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }
}
