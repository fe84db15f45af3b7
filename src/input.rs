//! Input record: persona, job to be done, and the document list.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The run's input record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSpec {
    /// Who the summary is for
    pub persona: Persona,

    /// What the persona is trying to accomplish
    pub job_to_be_done: JobToBeDone,

    /// Documents to process, in output order
    pub documents: Vec<DocumentRef>,
}

/// Persona description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub role: String,
}

/// Task description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobToBeDone {
    pub task: String,
}

/// A single input document entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Filename relative to the document directory
    pub filename: String,

    /// Optional human title; carried but not used for ranking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl InputSpec {
    /// Load and validate an input record from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Parse and validate an input record from a JSON string.
    pub fn from_json(data: &str) -> Result<Self> {
        let spec: InputSpec = serde_json::from_str(data)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Filenames in input order.
    pub fn filenames(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.filename.clone()).collect()
    }

    fn validate(&self) -> Result<()> {
        if let Some(pos) = self
            .documents
            .iter()
            .position(|d| d.filename.trim().is_empty())
        {
            return Err(Error::InvalidInput(format!(
                "document #{} has an empty filename",
                pos + 1
            )));
        }
        Ok(())
    }
}
