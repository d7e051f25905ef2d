//! acroform: Extract AcroForm widgets from PDF documents and apply
//! structural field patches.
//!
//! This is the public API facade crate. It re-exports types from
//! acroform-core and uses acroform-parse for reading, patching and writing
//! PDFs.
//!
//! # Architecture
//!
//! - **acroform-core**: Backend-independent types, the field identification
//!   scheme and patch-list parsing
//! - **acroform-parse**: The lopdf backend (extraction, patching, widget
//!   creation, appearance streams)
//! - **acroform** (this crate): Public API that ties everything together

mod document;
mod ops;
mod post_submit;

pub use acroform_core;
pub use acroform_core::{
    AppearanceOutcome, AppearanceReport, ApplyOptions, ApplyReport, ChoiceOption, ExtractOptions,
    ExtractResult, FieldDescriptor, FieldType, FormError, ParsedPatches, PatchRecord,
    PatchWarning, Rect, WarningCode, parse_patch_list,
};
pub use acroform_parse;
pub use document::FormDocument;
pub use ops::{Applied, DryRunOutcome, apply_patches, dry_run, extract_fields};
pub use post_submit::{IdentityProcessor, PostSubmitProcessor, run_post_submit};
