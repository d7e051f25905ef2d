//! One-shot operations over PDF bytes, as used by the command-line tools.

use acroform_core::{
    ApplyOptions, ApplyReport, ExtractOptions, ExtractResult, FieldDescriptor, FormError,
    parse_patch_list,
};
use serde_json::{Value, json};
use tracing::debug;

use crate::FormDocument;

/// Output of a full apply: the rewritten document and what happened.
#[derive(Debug, Clone)]
pub struct Applied {
    pub bytes: Vec<u8>,
    pub report: ApplyReport,
}

/// Result of a dry run. Serializes to the JSON body the apply tool prints.
#[derive(Debug, Clone, PartialEq)]
pub enum DryRunOutcome {
    Success { patches_count: usize },
    Failure { error: String, patches_count: usize },
}

impl DryRunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DryRunOutcome::Success { .. })
    }

    pub fn patches_count(&self) -> usize {
        match self {
            DryRunOutcome::Success { patches_count }
            | DryRunOutcome::Failure { patches_count, .. } => *patches_count,
        }
    }

    /// `{"success":true,"message":...,"patches_count":N}` or
    /// `{"success":false,"error":...,"patches_count":N}`.
    pub fn to_json(&self) -> Value {
        match self {
            DryRunOutcome::Success { patches_count } => json!({
                "success": true,
                "message": "Apply would succeed",
                "patches_count": patches_count,
            }),
            DryRunOutcome::Failure {
                error,
                patches_count,
            } => json!({
                "success": false,
                "error": error,
                "patches_count": patches_count,
            }),
        }
    }
}

/// Open `bytes` and describe every widget.
pub fn extract_fields(
    bytes: &[u8],
    options: Option<ExtractOptions>,
) -> Result<ExtractResult<Vec<FieldDescriptor>>, FormError> {
    FormDocument::open(bytes, options)?.fields()
}

/// Apply a JSON patch list to `bytes` and rewrite the document.
///
/// # Errors
///
/// Fails if the patch list is not valid JSON or the PDF cannot be opened
/// or written. Per-record problems are only reported.
pub fn apply_patches(
    bytes: &[u8],
    patches_json: &str,
    options: &ApplyOptions,
) -> Result<Applied, FormError> {
    let patches = parse_patch_list(patches_json)?;
    let mut doc = FormDocument::open(bytes, Some(ExtractOptions::from(options)))?;
    let report = doc.apply(&patches, options)?;
    let bytes = doc.save_to_bytes()?;
    Ok(Applied { bytes, report })
}

/// Run a full apply in memory and discard the output.
///
/// Never fails: every error is folded into [`DryRunOutcome::Failure`].
pub fn dry_run(bytes: &[u8], patches_json: &str, options: &ApplyOptions) -> DryRunOutcome {
    let patches = match parse_patch_list(patches_json) {
        Ok(patches) => patches,
        Err(err) => {
            return DryRunOutcome::Failure {
                error: err.to_string(),
                patches_count: 0,
            };
        }
    };
    let patches_count = patches.total;

    let result = FormDocument::open(bytes, Some(ExtractOptions::from(options)))
        .and_then(|mut doc| {
            doc.apply(&patches, options)?;
            doc.save_to_bytes()
        });
    match result {
        Ok(output) => {
            debug!(patches_count, output_bytes = output.len(), "dry run succeeded");
            DryRunOutcome::Success { patches_count }
        }
        Err(err) => DryRunOutcome::Failure {
            error: err.to_string(),
            patches_count,
        },
    }
}
