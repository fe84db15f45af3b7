//! Output record types.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::input::InputSpec;
use crate::rank::RankedSection;

use super::excerpt::refine_text;

/// Timestamp layout used for `processing_timestamp`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// The complete ranked summary written at the end of a run.
///
/// Field order here is the field order in the written JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub metadata: OutputMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

/// Run metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: String,
}

/// One ranked section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    pub importance_rank: usize,
    pub page_number: u32,
}

/// Refined excerpt of one ranked section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}

impl OutputRecord {
    /// Assemble the record. Both lists follow `ranked` order.
    pub fn build(input: &InputSpec, ranked: &[RankedSection], processed_at: DateTime<Local>) -> Self {
        let metadata = OutputMetadata {
            input_documents: input.filenames(),
            persona: input.persona.role.clone(),
            job_to_be_done: input.job_to_be_done.task.clone(),
            processing_timestamp: format_timestamp(processed_at),
        };

        let extracted_sections = ranked
            .iter()
            .map(|r| ExtractedSection {
                document: r.section.document.clone(),
                section_title: r.section.title.clone(),
                importance_rank: r.importance_rank,
                page_number: r.section.page_number,
            })
            .collect();

        let subsection_analysis = ranked
            .iter()
            .map(|r| SubsectionAnalysis {
                document: r.section.document.clone(),
                refined_text: refine_text(&r.section.body),
                page_number: r.section.page_number,
            })
            .collect();

        Self {
            metadata,
            extracted_sections,
            subsection_analysis,
        }
    }

    /// Number of ranked entries.
    pub fn len(&self) -> usize {
        self.extracted_sections.len()
    }

    /// Check if nothing was ranked.
    pub fn is_empty(&self) -> bool {
        self.extracted_sections.is_empty()
    }
}

/// Format a local timestamp as ISO-8601 with microseconds.
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
