//! Relevance model: a term-weighted vector space fitted over the corpus.
//!
//! The scorer only depends on [`VectorSpace`] and [`SparseVector::cosine`];
//! [`TfidfModel`] is the implementation used by the pipeline.

mod tfidf;
mod tokenize;

pub use tfidf::TfidfModel;
pub use tokenize::{is_stop_word, tokenize, Tokenizer};

/// A fitted vector space that can encode arbitrary text.
pub trait VectorSpace {
    /// Encode text with the fitted vocabulary. Unknown terms contribute
    /// nothing.
    fn encode(&self, text: &str) -> SparseVector;

    /// Number of dimensions (vocabulary size).
    fn dimensions(&self) -> usize;
}

/// Sparse vector as `(dimension, weight)` pairs sorted by dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from unsorted pairs; zero weights are dropped and duplicate
    /// dimensions summed.
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.sort_by_key(|(dim, _)| *dim);
        let mut entries: Vec<(usize, f64)> = Vec::with_capacity(pairs.len());
        for (dim, weight) in pairs {
            match entries.last_mut() {
                Some((last, w)) if *last == dim => *w += weight,
                _ => entries.push((dim, weight)),
            }
        }
        entries.retain(|(_, w)| *w != 0.0);
        Self { entries }
    }

    /// Non-zero entries, sorted by dimension.
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Check if every weight is zero.
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Scale to unit length. Zero vectors are left untouched.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }

    /// Dot product via a merge over both sorted entry lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_dim, a_w) = self.entries[i];
            let (b_dim, b_w) = other.entries[j];
            match a_dim.cmp(&b_dim) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity; 0.0 when either vector is zero.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return 0.0;
        }
        self.dot(other) / denom
    }
}
