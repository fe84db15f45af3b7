//! Scoring: cosine similarity against the query plus keyword adjustments.

use crate::config::RankConfig;
use crate::corpus::Corpus;
use crate::model::Section;
use crate::relevance::VectorSpace;

/// Which part of a section a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTarget {
    /// The section body text
    Body,
    /// The owning document's id
    DocumentId,
}

/// Adds `delta` to a section's score when its target field contains any
/// keyword (case-insensitive substring match).
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentRule {
    pub keywords: Vec<String>,
    pub delta: f64,
    pub target: RuleTarget,
}

impl AdjustmentRule {
    /// Create a rule. Keywords are lowercased once here.
    pub fn new<I, S>(keywords: I, delta: f64, target: RuleTarget) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
            delta,
            target,
        }
    }

    /// Check whether the rule fires for `section`.
    pub fn matches(&self, section: &Section) -> bool {
        let haystack = match self.target {
            RuleTarget::Body => section.body.to_lowercase(),
            RuleTarget::DocumentId => section.document.to_lowercase(),
        };
        self.keywords
            .iter()
            .any(|k| !k.is_empty() && haystack.contains(k.as_str()))
    }

    /// The delta this rule contributes for `section` (0.0 if it does not fire).
    pub fn apply(&self, section: &Section) -> f64 {
        if self.matches(section) {
            self.delta
        } else {
            0.0
        }
    }
}

/// Scores every corpus section against one query.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    rules: Vec<AdjustmentRule>,
}

impl Scorer {
    /// A scorer with no adjustment rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// The penalty-on-body and boost-on-document-id rules from a config.
    pub fn from_config(config: &RankConfig) -> Self {
        Self::new()
            .with_rule(AdjustmentRule::new(
                &config.penalty_keywords,
                config.penalty_delta,
                RuleTarget::Body,
            ))
            .with_rule(AdjustmentRule::new(
                &config.boost_keywords,
                config.boost_delta,
                RuleTarget::DocumentId,
            ))
    }

    /// Add an adjustment rule. Rules are applied in insertion order.
    pub fn with_rule(mut self, rule: AdjustmentRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Configured rules.
    pub fn rules(&self) -> &[AdjustmentRule] {
        &self.rules
    }

    /// Adjusted score for a section with the given base score.
    pub fn adjust(&self, section: &Section, base: f64) -> f64 {
        self.rules
            .iter()
            .fold(base, |score, rule| score + rule.apply(section))
    }

    /// Encode the query once, then attach raw and adjusted scores to every
    /// section in corpus order.
    pub fn score<V: VectorSpace + ?Sized>(
        &self,
        corpus: Corpus,
        model: &V,
        query: &str,
    ) -> Vec<Section> {
        let query_vector = model.encode(query);
        if query_vector.is_zero() {
            log::warn!("Query shares no terms with the corpus vocabulary; all base scores are 0");
        }

        corpus
            .into_sections()
            .into_iter()
            .map(|mut section| {
                let base = query_vector.cosine(&model.encode(&section.model_text()));
                section.raw_score = base;
                section.adjusted_score = self.adjust(&section, base);
                section
            })
            .collect()
    }
}
