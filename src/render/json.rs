//! JSON rendering and writing of the output record.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

use super::output::OutputRecord;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Four-space indented JSON
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize an output record. Non-ASCII text is written as-is.
pub fn to_json(record: &OutputRecord, format: JsonFormat) -> Result<String> {
    let bytes = to_json_bytes(record, format)?;
    String::from_utf8(bytes)
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn to_json_bytes<T: Serialize>(value: &T, format: JsonFormat) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match format {
        JsonFormat::Pretty => {
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            value.serialize(&mut ser)?;
        }
        JsonFormat::Compact => serde_json::to_writer(&mut buf, value)?,
    }
    Ok(buf)
}

/// Write an output record to `path`.
///
/// The JSON is written to a temporary file next to `path` and renamed into
/// place, so a failed write never leaves a partial file behind.
pub fn write_output<P: AsRef<Path>>(record: &OutputRecord, path: P, format: JsonFormat) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_json_bytes(record, format)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    log::info!("Wrote {} ranked sections to {}", record.len(), path.display());
    Ok(())
}
