//! Ranking and top-K selection.

use std::cmp::Ordering;

use serde::Serialize;

use crate::model::Section;

/// A selected section with its 1-based importance rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSection {
    pub importance_rank: usize,
    pub section: Section,
}

/// Order sections by adjusted score, highest first, and keep the first `k`.
///
/// The sort is stable, so sections with equal scores stay in corpus order.
/// Fewer than `k` sections are returned as-is without padding.
pub fn rank(mut sections: Vec<Section>, k: usize) -> Vec<RankedSection> {
    sections.sort_by(|a, b| {
        b.adjusted_score
            .partial_cmp(&a.adjusted_score)
            .unwrap_or(Ordering::Equal)
    });
    sections.truncate(k);

    sections
        .into_iter()
        .enumerate()
        .map(|(i, section)| RankedSection {
            importance_rank: i + 1,
            section,
        })
        .collect()
}
