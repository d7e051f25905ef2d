//! Appearance stream (`/AP /N`) regeneration for patched values.
//!
//! Only single-line text and choice fields are rendered, in one of the 14
//! standard fonts named by the field's default appearance. Anything else is
//! reported as a failed entry; readers still regenerate it on view because
//! `/NeedAppearances` is always set.

use std::collections::HashMap;

use acroform_core::{
    AppearanceEntry, AppearanceOutcome, AppearanceReport, FieldType, MIN_FONT_SIZE, Rect,
    StandardFont, parse_da_font,
};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use tracing::{debug, warn};

use crate::objects::{
    acroform, dict_of, field_name, get_inheritable, get_resolved, name_of, page_annots, rect_of,
    text_of,
};
use crate::text_string::encode_latin1;

const PADDING: f64 = 2.0;
/// Upper bound for auto-sized (`0 Tf`) text.
const AUTO_FONT_MAX: f64 = 12.0;
/// Baseline offset above the bottom of a centred line, as a share of the size.
const DESCENT_RATIO: f64 = 0.22;

/// A value whose widgets need a fresh appearance.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AppearanceJob {
    pub page: u32,
    pub page_id: ObjectId,
    pub field_name: String,
    pub value: String,
}

/// Font and size resolved from a default appearance string.
struct ResolvedFont {
    resource_name: String,
    font: StandardFont,
    size: f64,
}

/// Regenerate appearances for every queued job, recording each outcome.
pub(crate) fn regenerate(doc: &mut Document, jobs: &[AppearanceJob]) -> AppearanceReport {
    let mut fonts: HashMap<StandardFont, ObjectId> = HashMap::new();
    let mut report = AppearanceReport::default();

    for job in jobs {
        let outcome = match regenerate_job(doc, job, &mut fonts) {
            Ok(count) => {
                debug!(page = job.page, field = %job.field_name, count, "regenerated appearance");
                AppearanceOutcome::Regenerated { count }
            }
            Err(reason) => {
                warn!(page = job.page, field = %job.field_name, %reason, "appearance not regenerated");
                AppearanceOutcome::Failed(reason)
            }
        };
        report.entries.push(AppearanceEntry {
            page: job.page,
            field_name: job.field_name.clone(),
            value: job.value.clone(),
            outcome,
        });
    }
    report
}

fn regenerate_job(
    doc: &mut Document,
    job: &AppearanceJob,
    fonts: &mut HashMap<StandardFont, ObjectId>,
) -> Result<usize, String> {
    let encoded = encode_latin1(&job.value)
        .ok_or_else(|| "value is not representable in WinAnsi encoding".to_string())?;

    let view: &Document = doc;
    let widget_ids: Vec<ObjectId> = page_annots(view, job.page_id)
        .unwrap_or_default()
        .iter()
        .filter_map(|entry| entry.as_reference().ok())
        .filter(|&id| {
            view.get_object(id)
                .and_then(Object::as_dict)
                .is_ok_and(|dict| field_name(view, dict) == job.field_name)
        })
        .collect();
    if widget_ids.is_empty() {
        return Err(format!("no widget named {:?} on page {}", job.field_name, job.page));
    }

    for &widget_id in &widget_ids {
        let (rect, font) = {
            let widget = doc
                .get_object(widget_id)
                .and_then(Object::as_dict)
                .map_err(|e| e.to_string())?;
            check_field_type(doc, widget)?;
            let rect = rect_of(doc, widget).ok_or_else(|| "widget has no usable /Rect".to_string())?;
            (rect, resolve_font(doc, widget)?)
        };

        let font_id = *fonts
            .entry(font.font)
            .or_insert_with(|| doc.add_object(font_dictionary(font.font)));
        let stream = appearance_stream(&rect, &font, font_id, &encoded);
        let stream_id = doc.add_object(stream);

        let widget = crate::objects::dict_mut(doc, widget_id)
            .ok_or_else(|| "widget disappeared while regenerating".to_string())?;
        widget.set("AP", dictionary! { "N" => stream_id });
    }
    Ok(widget_ids.len())
}

fn check_field_type(doc: &Document, widget: &Dictionary) -> Result<(), String> {
    let field_type = get_inheritable(doc, widget, b"FT")
        .and_then(name_of)
        .and_then(|ft| FieldType::from_pdf_name(&ft))
        .unwrap_or(FieldType::Text);
    match field_type {
        FieldType::Text | FieldType::Choice => Ok(()),
        other => Err(format!("{other} fields are not rendered")),
    }
}

/// DA lookup order: widget, parent, AcroForm; Helvetica auto-size otherwise.
fn resolve_font(doc: &Document, widget: &Dictionary) -> Result<ResolvedFont, String> {
    let acro = acroform(doc);
    let da = get_inheritable(doc, widget, b"DA")
        .or_else(|| acro.and_then(|acro| get_resolved(doc, acro, b"DA")))
        .and_then(text_of);

    let Some(da_font) = da.as_deref().and_then(parse_da_font) else {
        return Ok(ResolvedFont {
            resource_name: "Helv".to_string(),
            font: StandardFont::Helvetica,
            size: 0.0,
        });
    };

    let font = StandardFont::from_resource_name(&da_font.resource_name)
        .or_else(|| {
            // Not an alias: look the resource up in the AcroForm /DR fonts.
            let dr = acro.and_then(|acro| get_resolved(doc, acro, b"DR"))?;
            let fonts = dict_of(doc, dr).and_then(|dr| get_resolved(doc, dr, b"Font"))?;
            let entry = dict_of(doc, fonts)
                .and_then(|fonts| get_resolved(doc, fonts, da_font.resource_name.as_bytes()))?;
            let base = dict_of(doc, entry)
                .and_then(|font| get_resolved(doc, font, b"BaseFont"))
                .and_then(name_of)?;
            StandardFont::from_resource_name(&base)
        })
        .ok_or_else(|| format!("font /{} is not a standard font", da_font.resource_name))?;

    Ok(ResolvedFont {
        resource_name: da_font.resource_name,
        font,
        size: da_font.size,
    })
}

fn font_dictionary(font: StandardFont) -> Dictionary {
    let mut dict = dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
    };
    if !matches!(font, StandardFont::Symbol | StandardFont::ZapfDingbats) {
        dict.set("Encoding", "WinAnsiEncoding");
    }
    dict
}

fn appearance_stream(rect: &Rect, font: &ResolvedFont, font_id: ObjectId, text: &[u8]) -> Stream {
    let width = rect.width();
    let height = rect.height();
    let size = if font.size > 0.0 {
        font.size
    } else {
        ((height - 2.0 * PADDING) * 0.7).clamp(MIN_FONT_SIZE, AUTO_FONT_MAX)
    };
    let baseline = ((height - size) / 2.0 + size * DESCENT_RATIO).max(0.0);

    let mut content = Vec::new();
    content.extend_from_slice(b"/Tx BMC\nq\n");
    let clip_width = (width - 2.0 * PADDING).max(0.0);
    let clip_height = (height - 2.0 * PADDING).max(0.0);
    content.extend_from_slice(
        format!("{PADDING} {PADDING} {clip_width:.2} {clip_height:.2} re W n\n").as_bytes(),
    );
    content.extend_from_slice(b"BT\n0 0 0 rg\n");
    content.extend_from_slice(format!("/{} {size:.2} Tf\n", font.resource_name).as_bytes());
    content.extend_from_slice(format!("{PADDING} {baseline:.2} Td\n").as_bytes());
    content.push(b'(');
    content.extend_from_slice(&escape_literal(text));
    content.extend_from_slice(b") Tj\nET\nQ\nEMC\n");

    let mut font_resources = Dictionary::new();
    font_resources.set(font.resource_name.as_bytes().to_vec(), font_id);
    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Form",
        "BBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width as f32),
            Object::Real(height as f32),
        ],
        "Resources" => dictionary! { "Font" => font_resources },
    };
    Stream::new(dict, content)
}

/// Escape a byte string for use inside `( ... )`.
fn escape_literal(text: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for &b in text {
        if matches!(b, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(b);
    }
    out
}
