//! Configuration for extraction and patch application.

use crate::error::FormError;

/// Options for field extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Maximum input PDF size in bytes (default: None = no limit).
    pub max_input_bytes: Option<usize>,
}

/// Options for patch application.
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Maximum input PDF size in bytes (default: None = no limit).
    pub max_input_bytes: Option<usize>,
    /// Whether to rebuild `/AP` streams for patched values (default: true).
    ///
    /// `/NeedAppearances` is set either way.
    pub regenerate_appearances: bool,
    /// Id prefix that requests creation of unmatched patches (default: `"new-"`).
    pub new_field_prefix: String,
    /// Font size used when a patch sets a font family without a size
    /// (default: 11).
    pub default_font_size: f64,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            max_input_bytes: None,
            regenerate_appearances: true,
            new_field_prefix: "new-".to_string(),
            default_font_size: 11.0,
        }
    }
}

impl From<&ApplyOptions> for ExtractOptions {
    fn from(options: &ApplyOptions) -> Self {
        Self {
            max_input_bytes: options.max_input_bytes,
        }
    }
}

/// Reject inputs larger than `limit`.
pub fn check_input_size(len: usize, limit: Option<usize>) -> Result<(), FormError> {
    match limit {
        Some(max) if len > max => Err(FormError::ResourceLimitExceeded {
            limit_name: "max_input_bytes".to_string(),
            limit_value: max,
            actual_value: len,
        }),
        _ => Ok(()),
    }
}
