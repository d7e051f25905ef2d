//! AcroForm field types and the field descriptor emitted by extraction.
//!
//! Provides [`FieldType`] for the `/FT` entry of a field dictionary,
//! [`FieldDescriptor`] for one extracted widget, and [`ChoiceOption`] for
//! `/Opt` entries of choice fields.

use serde::Serialize;

use crate::Rect;

/// The type of a PDF form field.
///
/// Corresponds to the `/FT` entry in a field dictionary (PDF 1.7 Table 220).
/// Serializes as the bare PDF name (`"Tx"`, `"Btn"`, `"Ch"`, `"Sig"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldType {
    /// Text field (`/FT /Tx`) — accepts text input.
    #[serde(rename = "Tx")]
    Text,
    /// Button field (`/FT /Btn`) — checkboxes, radio buttons, push buttons.
    #[serde(rename = "Btn")]
    Button,
    /// Choice field (`/FT /Ch`) — dropdowns, list boxes.
    #[serde(rename = "Ch")]
    Choice,
    /// Signature field (`/FT /Sig`) — digital signature.
    #[serde(rename = "Sig")]
    Signature,
}

impl FieldType {
    /// Parse a field type from its PDF name string.
    ///
    /// Returns `None` if the string is not a recognized field type.
    pub fn from_pdf_name(name: &str) -> Option<Self> {
        match name {
            "Tx" => Some(Self::Text),
            "Btn" => Some(Self::Button),
            "Ch" => Some(Self::Choice),
            "Sig" => Some(Self::Signature),
            _ => None,
        }
    }

    /// Return the PDF name string for this field type.
    pub fn as_pdf_name(&self) -> &'static str {
        match self {
            Self::Text => "Tx",
            Self::Button => "Btn",
            Self::Choice => "Ch",
            Self::Signature => "Sig",
        }
    }

    /// Resolve a patch `fieldType` value through the synonym table.
    ///
    /// Case-insensitive; a leading `/` is accepted (`"/Tx"`).
    pub fn from_field_type_synonym(value: &str) -> Option<Self> {
        let normalized = value.trim().trim_start_matches('/').to_ascii_lowercase();
        match normalized.as_str() {
            "tx" | "text" => Some(Self::Text),
            "btn" | "button" | "checkbox" => Some(Self::Button),
            "ch" | "choice" | "select" => Some(Self::Choice),
            "sig" | "signature" => Some(Self::Signature),
            _ => None,
        }
    }

    /// Resolve an editor `controlType` value through the synonym table.
    pub fn from_control_type(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "textarea" => Some(Self::Text),
            "checkbox" => Some(Self::Button),
            "select" | "choice" => Some(Self::Choice),
            "signature" => Some(Self::Signature),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "Text"),
            Self::Button => write!(f, "Button"),
            Self::Choice => write!(f, "Choice"),
            Self::Signature => write!(f, "Signature"),
        }
    }
}

/// One entry of a choice field's `/Opt` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceOption {
    /// A bare display string, also used as the export value.
    Plain(String),
    /// An `[export, display]` pair.
    Pair { value: String, label: String },
}

/// A widget annotation extracted from a page, with inherited field attributes.
///
/// One descriptor is emitted per widget, in page-major then annotation-array
/// order. `id` is unique within one extraction pass only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Correlation key for later patches (see [`crate::field_id`]).
    pub id: String,
    /// Widget `/Rect` as read from the document.
    pub rect: Rect,
    /// `urx - llx`, clamped at 0 and rounded to two decimals.
    pub width: f64,
    /// `ury - lly`, clamped at 0 and rounded to two decimals.
    pub height: f64,
    /// `/FT`, from the widget or its parent. Defaults to text.
    pub field_type: FieldType,
    /// `/V`, from the widget or its parent. Empty when absent.
    pub value: String,
    /// 1-based page number.
    pub page: u32,
    /// Always `"Widget"`.
    pub subtype: &'static str,
    /// `/T`, from the widget or its parent. Empty when absent.
    pub field_name: String,
    /// Font size parsed from the default appearance string.
    pub font_size: Option<f64>,
    /// `/MaxLen`, when present and integral.
    pub max_len: Option<i64>,
    /// Annotation `/F` flags, when present and integral.
    pub flags: Option<i64>,
}

/// Annotation subtype reported for every descriptor.
pub const WIDGET_SUBTYPE: &str = "Widget";
