//! Pretty-printed JSON output.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::api::FetchError;

/// Serialise `data` to `path` with 4-space indentation.
///
/// Any prior content is truncated. Serialisation of a given value is
/// deterministic, so identical responses produce byte-identical files. The
/// file handle is scope-bound and released on every exit path, including
/// serialisation failures.
///
/// # Errors
///
/// Returns [`FetchError::Io`] when the file cannot be created or written.
pub fn write_pretty(path: &Path, data: &Value) -> Result<(), FetchError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut writer, formatter);
    data.serialize(&mut ser).map_err(std::io::Error::from)?;
    writer.flush()?;
    Ok(())
}
