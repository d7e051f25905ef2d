//! Widget extraction: one [`FieldDescriptor`] per widget annotation.

use acroform_core::{
    ExtractResult, FieldDescriptor, FieldType, IdAllocator, PatchWarning, WIDGET_SUBTYPE,
    WarningCode, parse_font_size, round2,
};
use lopdf::{Document, Object, ObjectId};
use tracing::debug;

use crate::objects::{
    dict_of, field_name, get_inheritable, get_resolved, is_widget, name_of, object_to_i64,
    page_annots, rect_of, text_of,
};

/// Walk every page's annotations in order and describe each widget.
///
/// Non-widget annotations are skipped silently; widgets without a usable
/// `/Rect` are skipped with a warning.
pub(crate) fn extract_fields(
    doc: &Document,
    page_ids: &[ObjectId],
) -> ExtractResult<Vec<FieldDescriptor>> {
    let mut ids = IdAllocator::new();
    let mut fields = Vec::new();
    let mut warnings = Vec::new();

    for (page_index, &page_id) in page_ids.iter().enumerate() {
        let page = page_index as u32 + 1;
        let Some(annots) = page_annots(doc, page_id) else {
            continue;
        };

        for (index, entry) in annots.iter().enumerate() {
            let Some(dict) = dict_of(doc, entry) else {
                warnings.push(
                    PatchWarning::new(
                        WarningCode::MalformedAnnotation,
                        format!("annotation {index} is not a dictionary"),
                    )
                    .on_page(page),
                );
                continue;
            };
            if !is_widget(dict) {
                continue;
            }
            let Some(rect) = rect_of(doc, dict) else {
                warnings.push(
                    PatchWarning::new(
                        WarningCode::MalformedAnnotation,
                        format!("widget {index} has no usable /Rect"),
                    )
                    .on_page(page),
                );
                continue;
            };

            let name = get_inheritable(doc, dict, b"T")
                .and_then(text_of)
                .unwrap_or_default();
            let field_type = get_inheritable(doc, dict, b"FT")
                .and_then(name_of)
                .and_then(|ft| FieldType::from_pdf_name(&ft))
                .unwrap_or(FieldType::Text);
            let value = get_inheritable(doc, dict, b"V")
                .and_then(value_text)
                .unwrap_or_default();
            let font_size = get_inheritable(doc, dict, b"DA")
                .and_then(|da| match da {
                    Object::String(..) => text_of(da),
                    _ => None,
                })
                .and_then(|da| parse_font_size(&da));
            let max_len = get_inheritable(doc, dict, b"MaxLen").and_then(object_to_i64);
            let flags = get_resolved(doc, dict, b"F").and_then(object_to_i64);

            let id = ids.assign(&name, page, index);
            debug!(page, index, id = %id, "extracted widget");
            fields.push(FieldDescriptor {
                id,
                rect,
                width: round2(rect.width()),
                height: round2(rect.height()),
                field_type,
                value,
                page,
                subtype: WIDGET_SUBTYPE,
                field_name: name,
                font_size,
                max_len,
                flags,
            });
        }
    }

    ExtractResult::with_warnings(fields, warnings)
}

/// Text of a `/V` entry. Multi-select arrays are joined with `", "`.
fn value_text(obj: &Object) -> Option<String> {
    match obj {
        Object::Array(items) => {
            let values: Vec<String> = items.iter().filter_map(text_of).collect();
            (!values.is_empty()).then(|| values.join(", "))
        }
        other => text_of(other),
    }
}

/// Names reachable from the AcroForm `/Fields` list, one level of `/Kids`
/// deep. Duplicates are kept.
pub(crate) fn acroform_field_names(doc: &Document) -> Vec<String> {
    let Some(fields) = crate::objects::acroform(doc)
        .and_then(|acro| get_resolved(doc, acro, b"Fields"))
        .and_then(|fields| fields.as_array().ok())
    else {
        return Vec::new();
    };

    let mut names = Vec::new();
    for entry in fields {
        let Some(field) = dict_of(doc, entry) else {
            continue;
        };
        let name = field_name(doc, field);
        if !name.is_empty() {
            names.push(name);
            continue;
        }
        let kids = get_resolved(doc, field, b"Kids").and_then(|kids| kids.as_array().ok());
        for kid in kids.into_iter().flatten() {
            if let Some(kid) = dict_of(doc, kid) {
                let name = field_name(doc, kid);
                if !name.is_empty() {
                    names.push(name);
                }
            }
        }
    }
    names
}
