//! Run configuration.
//!
//! A [`RankConfig`] is built once at startup and passed by reference to every
//! pipeline stage. Nothing in the crate reads process-wide state.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Default number of ranked sections in the output.
pub const DEFAULT_TOP_K: usize = 5;

/// Default number of lines following a title that form its body.
pub const DEFAULT_BODY_LINES: usize = 5;

/// Default score shift for sections whose body mentions a penalty keyword.
pub const DEFAULT_PENALTY_DELTA: f64 = -0.2;

/// Default score shift for sections whose document id mentions a boost keyword.
pub const DEFAULT_BOOST_DELTA: f64 = 0.1;

/// Keywords marking undesired content in a section body.
pub const DEFAULT_PENALTY_KEYWORDS: &[&str] =
    &["breakfast", "pancake", "toast", "scrambled egg", "morning"];

/// Keywords marking desired content in a document filename.
pub const DEFAULT_BOOST_KEYWORDS: &[&str] = &["dinner", "lunch", "main", "side", "entree", "buffet"];

/// Relevance query every section is scored against.
pub const DEFAULT_QUERY: &str = "Vegetarian gluten-free dishes suitable for a buffet-style dinner at a corporate event. \
Exclude breakfast. Prefer sides and mains. \
Focus on falafel, lasagna, baba ganoush, ratatouille, sushi.";

/// Configuration for a single ranking run.
#[derive(Debug, Clone, PartialEq)]
pub struct RankConfig {
    /// Directory the input filenames resolve against
    pub pdf_dir: PathBuf,

    /// Path of the input record
    pub input_path: PathBuf,

    /// Path the output record is written to
    pub output_path: PathBuf,

    /// Number of sections kept after ranking
    pub top_k: usize,

    /// Maximum number of lines collected into a section body
    pub body_lines: usize,

    /// Keywords searched for in section bodies
    pub penalty_keywords: Vec<String>,

    /// Keywords searched for in document ids
    pub boost_keywords: Vec<String>,

    /// Added to the score when a penalty keyword matches (normally negative)
    pub penalty_delta: f64,

    /// Added to the score when a boost keyword matches
    pub boost_delta: f64,

    /// Text every section is compared against
    pub query: String,
}

impl RankConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document directory.
    pub fn with_pdf_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.pdf_dir = dir.into();
        self
    }

    /// Set the input record path.
    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    /// Set the output record path.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Set the number of ranked sections.
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    /// Set the body look-ahead window.
    pub fn with_body_lines(mut self, lines: usize) -> Self {
        self.body_lines = lines;
        self
    }

    /// Replace the penalty keyword set.
    pub fn with_penalty_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.penalty_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the boost keyword set.
    pub fn with_boost_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.boost_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the penalty delta.
    pub fn with_penalty_delta(mut self, delta: f64) -> Self {
        self.penalty_delta = delta;
        self
    }

    /// Set the boost delta.
    pub fn with_boost_delta(mut self, delta: f64) -> Self {
        self.boost_delta = delta;
        self
    }

    /// Set the relevance query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Check value ranges that would otherwise produce an empty or
    /// meaningless run.
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::InvalidConfig("top_k must be at least 1".to_string()));
        }
        if self.body_lines == 0 {
            return Err(Error::InvalidConfig(
                "body_lines must be at least 1".to_string(),
            ));
        }
        if !self.penalty_delta.is_finite() || !self.boost_delta.is_finite() {
            return Err(Error::InvalidConfig(
                "score deltas must be finite numbers".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            pdf_dir: PathBuf::from("./pdfs"),
            input_path: PathBuf::from("challenge1b_input.json"),
            output_path: PathBuf::from("challenge1b_output.json"),
            top_k: DEFAULT_TOP_K,
            body_lines: DEFAULT_BODY_LINES,
            penalty_keywords: DEFAULT_PENALTY_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            boost_keywords: DEFAULT_BOOST_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            penalty_delta: DEFAULT_PENALTY_DELTA,
            boost_delta: DEFAULT_BOOST_DELTA,
            query: DEFAULT_QUERY.to_string(),
        }
    }
}
