use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::error::{ProcessingError, Result};

/// Read a whole source file as text.
///
/// A byte order mark selects the encoding and is stripped. Files without one
/// are decoded as UTF-8, falling back to Windows-1252 when that fails.
pub fn read_source_text(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(ProcessingError::source_read(path, "file not found"));
    }
    let bytes = fs::read(path).map_err(|e| ProcessingError::source_read(path, e))?;
    Ok(decode(&bytes, path))
}

fn decode(bytes: &[u8], path: &Path) -> String {
    let (encoding, bom_len) = Encoding::for_bom(bytes).unwrap_or((UTF_8, 0));
    let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);

    if had_errors && encoding == UTF_8 {
        warn!(
            path = %path.display(),
            "Source is not valid UTF-8, decoding as Windows-1252"
        );
        let (text, _) = WINDOWS_1252.decode_without_bom_handling(&bytes[bom_len..]);
        return text.into_owned();
    }

    text.into_owned()
}
