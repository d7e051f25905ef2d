//! Error types for the PDF backend layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! that wraps lopdf failures and converts them to [`FormError`].

use acroform_core::FormError;
use thiserror::Error;

/// Error type for PDF backend operations.
///
/// Only document-level failures are errors here; per-annotation and
/// per-patch problems are reported as warnings.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The bytes could not be loaded as a PDF, or the object graph is
    /// unusable (no catalog, no page tree).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading or writing PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The mutated object graph could not be written back to bytes.
    #[error("PDF serialize error: {0}")]
    Serialize(String),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] FormError),
}

impl From<BackendError> for FormError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => FormError::ParseError(msg),
            BackendError::Io(e) => FormError::IoError(e.to_string()),
            BackendError::Serialize(msg) => FormError::Other(format!("failed to write PDF: {msg}")),
            BackendError::Core(e) => e,
        }
    }
}
