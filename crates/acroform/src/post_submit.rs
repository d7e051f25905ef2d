//! Post-submit processing of a user-edited PDF.
//!
//! The stage reads one input file and produces one output file. The output
//! is written through a temporary file in the destination directory and
//! renamed into place, so no output file exists after a failure.

use std::io::Write;
use std::path::Path;

use acroform_core::FormError;
use tempfile::NamedTempFile;
use tracing::info;

/// A transformation applied to a submitted PDF.
pub trait PostSubmitProcessor {
    /// Produce the output bytes for `input`.
    ///
    /// `document_key` is an opaque correlation key supplied by the caller.
    fn process(&self, input: &[u8], document_key: Option<&str>) -> Result<Vec<u8>, FormError>;
}

/// Returns the input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityProcessor;

impl PostSubmitProcessor for IdentityProcessor {
    fn process(&self, input: &[u8], _document_key: Option<&str>) -> Result<Vec<u8>, FormError> {
        Ok(input.to_vec())
    }
}

/// Read `input`, run `processor` on it and write the result to `output`.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns [`FormError::IoError`] if the input cannot be read or the output
/// cannot be written, and whatever the processor fails with. `output` is
/// left untouched in every error case.
pub fn run_post_submit(
    input: &Path,
    output: &Path,
    document_key: Option<&str>,
    processor: &dyn PostSubmitProcessor,
) -> Result<usize, FormError> {
    let bytes = std::fs::read(input)
        .map_err(|e| FormError::IoError(format!("{}: {e}", input.display())))?;
    let processed = processor.process(&bytes, document_key)?;

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| FormError::IoError(format!("{}: {e}", dir.display())))?;
    tmp.write_all(&processed)?;
    tmp.flush()?;
    tmp.persist(output)
        .map_err(|e| FormError::IoError(format!("{}: {}", output.display(), e.error)))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        document_key = document_key.unwrap_or("-"),
        bytes = processed.len(),
        "post-submit output written"
    );
    Ok(processed.len())
}
