//! Creation of brand-new widgets for unmatched patch records.

use acroform_core::{ApplyOptions, ChoiceOption, FieldType, PatchRecord};
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

use crate::error::BackendError;
use crate::objects::{catalog_id, dict_mut, page_annots, rect_object, set_page_annots};
use crate::text_string::encode_text_string;

/// A widget added to the document.
#[derive(Debug, Clone)]
pub(crate) struct CreatedWidget {
    pub id: ObjectId,
    pub page: u32,
    pub page_id: ObjectId,
    pub name: String,
    pub value: String,
}

/// Why a creation request was not honoured.
#[derive(Debug)]
pub(crate) enum CreationSkip {
    MissingRect,
    PageOutOfRange { page: i64, page_count: usize },
    Backend(BackendError),
}

impl std::fmt::Display for CreationSkip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreationSkip::MissingRect => write!(f, "no valid rect to place the new widget"),
            CreationSkip::PageOutOfRange { page, page_count } => {
                write!(f, "page {page} is outside 1..={page_count}")
            }
            CreationSkip::Backend(err) => write!(f, "{err}"),
        }
    }
}

impl From<BackendError> for CreationSkip {
    fn from(err: BackendError) -> Self {
        CreationSkip::Backend(err)
    }
}

/// Add a widget for `record` to its target page and to the AcroForm
/// `/Fields` list.
///
/// The page defaults to 1 and the field type to text. Nothing is written
/// unless the rect and the page are valid.
pub(crate) fn create_widget(
    doc: &mut Document,
    page_ids: &[ObjectId],
    record: &PatchRecord,
    options: &ApplyOptions,
) -> Result<CreatedWidget, CreationSkip> {
    let rect = record.rect.ok_or(CreationSkip::MissingRect)?;
    let page = record.page.unwrap_or(1);
    let page_id = usize::try_from(page)
        .ok()
        .and_then(|p| p.checked_sub(1))
        .and_then(|index| page_ids.get(index).copied())
        .ok_or(CreationSkip::PageOutOfRange {
            page,
            page_count: page_ids.len(),
        })?;

    let name = record.creation_name();
    let value = record.default_value.clone().unwrap_or_default();
    let field_type = record.field_type.unwrap_or(FieldType::Text);

    let mut widget = dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "Rect" => rect_object(&rect),
        "T" => encode_text_string(&name),
        "FT" => field_type.as_pdf_name(),
        "V" => encode_text_string(&value),
        "DV" => encode_text_string(&value),
        "P" => page_id,
    };
    if let Some(appearance) = &record.appearance {
        let da = appearance.resolve(options.default_font_size).to_da_string();
        widget.set("DA", encode_text_string(&da));
    }
    if let Some(label) = record.label.as_deref() {
        widget.set("TU", encode_text_string(label));
    }
    if let Some(max_len) = record.max_len {
        widget.set("MaxLen", max_len);
    }
    if field_type == FieldType::Choice {
        if let Some(opts) = record.options.as_deref() {
            widget.set("Opt", options_object(opts));
        }
    }

    ensure_acroform(doc)?;
    let widget_id = doc.add_object(widget);

    let mut annots = page_annots(doc, page_id).unwrap_or_default();
    annots.push(Object::Reference(widget_id));
    set_page_annots(doc, page_id, annots)?;
    append_field(doc, widget_id)?;

    Ok(CreatedWidget {
        id: widget_id,
        page: page as u32,
        page_id,
        name,
        value,
    })
}

/// Build an `/Opt` array: bare strings or `[export display]` pairs.
pub(crate) fn options_object(options: &[ChoiceOption]) -> Object {
    Object::Array(
        options
            .iter()
            .map(|option| match option {
                ChoiceOption::Plain(text) => encode_text_string(text),
                ChoiceOption::Pair { value, label } => Object::Array(vec![
                    encode_text_string(value),
                    encode_text_string(label),
                ]),
            })
            .collect(),
    )
}

/// Get the AcroForm dictionary for writing, creating it (with
/// `/NeedAppearances true`) when the catalog has none.
pub(crate) fn ensure_acroform(doc: &mut Document) -> Result<&mut Dictionary, BackendError> {
    let catalog_id = catalog_id(doc)?;
    let indirect = doc
        .get_object(catalog_id)
        .and_then(Object::as_dict)
        .map_err(|e| BackendError::Parse(format!("invalid document catalog: {e}")))?
        .get(b"AcroForm")
        .and_then(Object::as_reference)
        .ok();

    if let Some(acro_id) = indirect {
        return dict_mut(doc, acro_id)
            .ok_or_else(|| BackendError::Parse("/AcroForm is not a dictionary".to_string()));
    }

    let catalog = dict_mut(doc, catalog_id)
        .ok_or_else(|| BackendError::Parse("invalid document catalog".to_string()))?;
    if !matches!(catalog.get(b"AcroForm"), Ok(Object::Dictionary(_))) {
        catalog.set(
            "AcroForm",
            dictionary! {
                "Fields" => Object::Array(Vec::new()),
                "NeedAppearances" => Object::Boolean(true),
            },
        );
    }
    catalog
        .get_mut(b"AcroForm")
        .and_then(Object::as_dict_mut)
        .map_err(|e| BackendError::Parse(format!("invalid /AcroForm: {e}")))
}

/// Append a field reference to the AcroForm `/Fields` array.
fn append_field(doc: &mut Document, field_id: ObjectId) -> Result<(), BackendError> {
    let indirect = ensure_acroform(doc)?
        .get(b"Fields")
        .and_then(Object::as_reference)
        .ok();
    if let Some(array_id) = indirect {
        if let Ok(Object::Array(fields)) = doc.get_object_mut(array_id) {
            fields.push(Object::Reference(field_id));
            return Ok(());
        }
    }

    let acro = ensure_acroform(doc)?;
    match acro.get_mut(b"Fields") {
        Ok(Object::Array(fields)) => fields.push(Object::Reference(field_id)),
        _ => acro.set("Fields", Object::Array(vec![Object::Reference(field_id)])),
    }
    Ok(())
}
