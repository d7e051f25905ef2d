//! acroform-core: Backend-independent types and algorithms for AcroForm
//! editing.
//!
//! This crate provides the field descriptor model, the identification
//! scheme that correlates extracted fields with later patches, lenient
//! patch-list parsing, default-appearance strings, and the error, option
//! and report types shared by the PDF backend and the CLI. It has no PDF
//! library dependency.

pub mod appearance;
pub mod error;
pub mod field_id;
pub mod form_field;
pub mod geometry;
pub mod options;
pub mod patch;
pub mod report;

pub use appearance::{
    DaFont, DefaultAppearance, MAX_FONT_SIZE, MIN_FONT_SIZE, StandardFont, parse_da_font,
    parse_font_size,
};
pub use error::{ExtractResult, FormError, PatchWarning, WarningCode};
pub use field_id::{FieldKey, IdAllocator, PatchIndex, positional_id};
pub use form_field::{ChoiceOption, FieldDescriptor, FieldType, WIDGET_SUBTYPE};
pub use geometry::{Rect, round2};
pub use options::{ApplyOptions, ExtractOptions, check_input_size};
pub use patch::{
    AppearanceRequest, FieldEdit, ParsedPatches, PatchRecord, parse_patch_list,
    parse_patch_value,
};
pub use report::{AppearanceEntry, AppearanceOutcome, AppearanceReport, ApplyReport};
