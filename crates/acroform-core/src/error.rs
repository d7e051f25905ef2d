//! Error and warning types for AcroForm processing.
//!
//! Provides [`FormError`] for fatal errors that abort a whole invocation,
//! [`PatchWarning`] for recoverable problems that only skip the affected
//! record, field or annotation, and [`ExtractResult`] for pairing a value
//! with the warnings collected while producing it.

use std::fmt;

/// Fatal error types.
///
/// Only an unreadable document or an unparseable patch list aborts an
/// operation; everything else is recovered as a [`PatchWarning`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    /// The input could not be opened or serialized as a PDF.
    ParseError(String),
    /// I/O error reading or writing data.
    IoError(String),
    /// The patch list is not valid JSON.
    PatchListError(String),
    /// A configured resource limit was exceeded.
    ResourceLimitExceeded {
        /// Name of the limit that was exceeded (e.g., "max_input_bytes").
        limit_name: String,
        /// The configured limit value.
        limit_value: usize,
        /// The actual value that exceeded the limit.
        actual_value: usize,
    },
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::ParseError(msg) => write!(f, "parse error: {msg}"),
            FormError::IoError(msg) => write!(f, "I/O error: {msg}"),
            FormError::PatchListError(msg) => write!(f, "invalid patch list: {msg}"),
            FormError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
            } => write!(
                f,
                "resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value})"
            ),
            FormError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FormError {}

impl From<std::io::Error> for FormError {
    fn from(err: std::io::Error) -> Self {
        FormError::IoError(err.to_string())
    }
}

/// Machine-readable code for a recoverable problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// A patch entry had no usable `fieldId` and was dropped.
    MissingFieldId,
    /// A rect was not four finite numbers.
    InvalidRect,
    /// A numeric patch value (maxLen, fontSize, page) did not parse.
    InvalidNumber,
    /// An annotation could not be resolved or lacked a usable `/Rect`.
    MalformedAnnotation,
    /// A patch matched no annotation and did not request creation.
    UnmatchedPatch,
    /// A creation request was rejected (page out of range, missing rect).
    CreationSkipped,
    /// An appearance stream could not be regenerated.
    AppearanceFailed,
}

impl WarningCode {
    /// Returns the string tag for this warning code.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningCode::MissingFieldId => "MISSING_FIELD_ID",
            WarningCode::InvalidRect => "INVALID_RECT",
            WarningCode::InvalidNumber => "INVALID_NUMBER",
            WarningCode::MalformedAnnotation => "MALFORMED_ANNOTATION",
            WarningCode::UnmatchedPatch => "UNMATCHED_PATCH",
            WarningCode::CreationSkipped => "CREATION_SKIPPED",
            WarningCode::AppearanceFailed => "APPEARANCE_FAILED",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recoverable problem, recorded instead of aborting the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchWarning {
    /// Machine-readable warning code.
    pub code: WarningCode,
    /// Human-readable description of the warning.
    pub description: String,
    /// 1-based page number, if applicable.
    pub page: Option<u32>,
    /// Patch id or field name the warning concerns, if applicable.
    pub field: Option<String>,
}

impl PatchWarning {
    /// Create a warning with a code and description.
    pub fn new(code: WarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            page: None,
            field: None,
        }
    }

    /// Attach page context (builder pattern).
    pub fn on_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Attach field context (builder pattern).
    pub fn for_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl fmt::Display for PatchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(page) = self.page {
            write!(f, " (page {page})")?;
        }
        if let Some(ref field) = self.field {
            write!(f, " [{field}]")?;
        }
        Ok(())
    }
}

/// Result wrapper that pairs a value with collected warnings.
#[derive(Debug, Clone)]
pub struct ExtractResult<T> {
    /// The extracted value.
    pub value: T,
    /// Warnings collected while producing the value.
    pub warnings: Vec<PatchWarning>,
}

impl<T> ExtractResult<T> {
    /// Create a result with no warnings.
    pub fn ok(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Create a result with warnings.
    pub fn with_warnings(value: T, warnings: Vec<PatchWarning>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if there are no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Transform the value while preserving warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExtractResult<U> {
        ExtractResult {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}
