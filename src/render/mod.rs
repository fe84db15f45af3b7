//! Output formatting: excerpt refinement, the output record, and JSON writing.

mod excerpt;
mod json;
mod output;

pub use excerpt::{refine_text, MAX_EXCERPT_CHARS};
pub use json::{to_json, write_output, JsonFormat};
pub use output::{
    format_timestamp, ExtractedSection, OutputMetadata, OutputRecord, SubsectionAnalysis,
    TIMESTAMP_FORMAT,
};
