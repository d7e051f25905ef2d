//! Object-graph helpers shared by extraction, patching and creation.
//!
//! Field attributes are read widget first, then from the widget's `/Parent`.
//! The walk is one level deep on purpose; deeper field hierarchies are not
//! consulted.

use acroform_core::Rect;
use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::BackendError;
use crate::text_string::decode_text_string;

/// Resolve a potentially indirect object reference.
pub(crate) fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Resolve an object to a dictionary, if it is one.
pub(crate) fn dict_of<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    resolve(doc, obj).as_dict().ok()
}

/// Look up `key` in `dict`, resolving an indirect value.
pub(crate) fn get_resolved<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    dict.get(key).ok().map(|obj| resolve(doc, obj))
}

/// Object id of the widget's parent field, when `/Parent` is a reference.
pub(crate) fn parent_id(dict: &Dictionary) -> Option<ObjectId> {
    dict.get(b"Parent").ok()?.as_reference().ok()
}

/// The widget's parent field dictionary.
pub(crate) fn parent_dict<'a>(doc: &'a Document, dict: &'a Dictionary) -> Option<&'a Dictionary> {
    dict_of(doc, dict.get(b"Parent").ok()?)
}

/// Look up an inheritable field attribute: widget first, then parent.
pub(crate) fn get_inheritable<'a>(
    doc: &'a Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    get_resolved(doc, dict, key)
        .or_else(|| parent_dict(doc, dict).and_then(|parent| get_resolved(doc, parent, key)))
}

/// Text content of a string or name object.
pub(crate) fn text_of(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

/// Name object as text.
pub(crate) fn name_of(obj: &Object) -> Option<String> {
    match obj {
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

/// The inherited `/T`, trimmed. Empty when absent.
pub(crate) fn field_name(doc: &Document, dict: &Dictionary) -> String {
    get_inheritable(doc, dict, b"T")
        .and_then(text_of)
        .map(|name| name.trim().to_string())
        .unwrap_or_default()
}

/// Whether an annotation dictionary is a widget.
pub(crate) fn is_widget(dict: &Dictionary) -> bool {
    matches!(dict.get(b"Subtype"), Ok(Object::Name(name)) if name == b"Widget")
}

/// Convert a lopdf numeric object to f64.
///
/// Reals are stored as `f32`; they are widened through their shortest
/// decimal form so that `200.1` reads back as `200.1` rather than
/// `200.10000610351562`.
pub(crate) fn object_to_f64(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(f) => f.to_string().parse::<f64>().ok(),
        _ => None,
    }
}

/// Integer value of an integral numeric object.
pub(crate) fn object_to_i64(obj: &Object) -> Option<i64> {
    match obj {
        Object::Integer(i) => Some(*i),
        Object::Real(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
        _ => None,
    }
}

/// A number object: integer when integral, real otherwise.
pub(crate) fn number_object(value: f64) -> Object {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Object::Integer(value as i64)
    } else {
        Object::Real(value as f32)
    }
}

/// The widget `/Rect`, if it is an array of at least four numbers.
pub(crate) fn rect_of(doc: &Document, dict: &Dictionary) -> Option<Rect> {
    let array = get_resolved(doc, dict, b"Rect")?.as_array().ok()?;
    let values = array
        .iter()
        .take(4)
        .map(|item| object_to_f64(resolve(doc, item)))
        .collect::<Option<Vec<f64>>>()?;
    Rect::from_values(&values)
}

/// A `/Rect` array object, components rounded to two decimals.
pub(crate) fn rect_object(rect: &Rect) -> Object {
    Object::Array(
        rect.rounded()
            .as_array()
            .iter()
            .map(|&v| number_object(v))
            .collect(),
    )
}

/// Object id of the document catalog.
pub(crate) fn catalog_id(doc: &Document) -> Result<ObjectId, BackendError> {
    doc.trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|e| BackendError::Parse(format!("missing document catalog: {e}")))
}

/// The document catalog dictionary.
pub(crate) fn catalog(doc: &Document) -> Result<&Dictionary, BackendError> {
    doc.get_object(catalog_id(doc)?)
        .and_then(Object::as_dict)
        .map_err(|e| BackendError::Parse(format!("invalid document catalog: {e}")))
}

/// The `/AcroForm` dictionary, if the document has one.
pub(crate) fn acroform(doc: &Document) -> Option<&Dictionary> {
    let catalog = catalog(doc).ok()?;
    dict_of(doc, catalog.get(b"AcroForm").ok()?)
}

/// Entries of a page's `/Annots` array, in order.
///
/// Returns `None` when the page has no usable `/Annots`.
pub(crate) fn page_annots(doc: &Document, page_id: ObjectId) -> Option<Vec<Object>> {
    let page = doc.get_object(page_id).and_then(Object::as_dict).ok()?;
    let annots = get_resolved(doc, page, b"Annots")?.as_array().ok()?;
    Some(annots.clone())
}

/// Replace a page's `/Annots` array.
///
/// An indirect `/Annots` array is updated in place so other references to it
/// stay valid.
pub(crate) fn set_page_annots(
    doc: &mut Document,
    page_id: ObjectId,
    annots: Vec<Object>,
) -> Result<(), BackendError> {
    let indirect = doc
        .get_object(page_id)
        .and_then(Object::as_dict)
        .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?
        .get(b"Annots")
        .and_then(Object::as_reference)
        .ok();

    if let Some(array_id) = indirect {
        if let Ok(Object::Array(array)) = doc.get_object_mut(array_id) {
            *array = annots;
            return Ok(());
        }
    }

    doc.get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?
        .set("Annots", Object::Array(annots));
    Ok(())
}

/// Mutable dictionary behind an object id.
pub(crate) fn dict_mut(doc: &mut Document, id: ObjectId) -> Option<&mut Dictionary> {
    doc.get_object_mut(id).and_then(Object::as_dict_mut).ok()
}
