//! Heuristic section extraction from page text.
//!
//! A page is reduced to its trimmed, non-empty lines. Every line that looks
//! like a heading starts a section whose body is the next few lines. Bodies
//! of closely spaced titles overlap; that is expected.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::DEFAULT_BODY_LINES;
use crate::model::{Document, Section};

/// Title lines: an uppercase ASCII letter followed by 3 to 50 letters,
/// digits, whitespace characters or hyphens.
const TITLE_PATTERN: &str = r"^[A-Z][\p{L}\p{N}\s\-]{3,50}$";

fn title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TITLE_PATTERN).expect("title pattern is valid"))
}

/// Check whether a single (already trimmed) line looks like a section title.
pub fn is_title_line(line: &str) -> bool {
    title_regex().is_match(line)
}

/// Split page text into trimmed, non-empty lines.
pub fn page_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Extract sections from one page with the default extractor.
pub fn extract_page_sections(document_id: &str, page_number: u32, text: &str) -> Vec<Section> {
    SectionExtractor::default().extract_page(document_id, page_number, text)
}

/// Extract sections from every page of a document with the default extractor.
pub fn extract_sections(document: &Document) -> Vec<Section> {
    SectionExtractor::default().extract(document)
}

/// Walks page lines and emits one [`Section`] per title line.
#[derive(Debug, Clone, Copy)]
pub struct SectionExtractor {
    body_lines: usize,
    is_title: fn(&str) -> bool,
}

impl SectionExtractor {
    /// Create an extractor with the default title predicate and body window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines after a title collected into its body.
    pub fn with_body_lines(mut self, lines: usize) -> Self {
        self.body_lines = lines;
        self
    }

    /// Replace the title predicate.
    pub fn with_title_predicate(mut self, predicate: fn(&str) -> bool) -> Self {
        self.is_title = predicate;
        self
    }

    /// Body window size.
    pub fn body_lines(&self) -> usize {
        self.body_lines
    }

    /// Extract sections from a whole document, page ascending.
    pub fn extract(&self, document: &Document) -> Vec<Section> {
        let mut sections = Vec::new();
        for (page_number, text) in document.text_pages() {
            sections.extend(self.extract_page(&document.id, page_number, text));
        }
        log::debug!(
            "{}: {} sections from {} pages",
            document.id,
            sections.len(),
            document.page_count()
        );
        sections
    }

    /// Extract sections from a single page's text.
    pub fn extract_page(&self, document_id: &str, page_number: u32, text: &str) -> Vec<Section> {
        let lines = page_lines(text);

        lines
            .iter()
            .enumerate()
            .filter(|(_, line)| (self.is_title)(line))
            .map(|(j, line)| {
                let end = (j + 1 + self.body_lines).min(lines.len());
                let body = lines[j + 1..end].join("\n");
                Section::new(document_id, *line, body, page_number)
            })
            .collect()
    }
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self {
            body_lines: DEFAULT_BODY_LINES,
            is_title: is_title_line,
        }
    }
}
