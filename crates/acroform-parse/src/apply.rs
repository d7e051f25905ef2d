//! Patch application over the live object graph.
//!
//! One pass per page resolves each annotation to at most one patch record,
//! removes hidden annotations and applies the record's edits. Records that
//! matched nothing may then create new widgets, queued values get fresh
//! appearance streams, and `/NeedAppearances` is set last.

use std::collections::HashSet;

use acroform_core::{
    AppearanceOutcome, ApplyOptions, ApplyReport, FieldEdit, FieldType, ParsedPatches,
    PatchIndex, PatchRecord, PatchWarning, WarningCode,
};
use lopdf::{Document, Object, ObjectId};
use tracing::{debug, info};

use crate::appearance::{AppearanceJob, regenerate};
use crate::create::{create_widget, ensure_acroform, options_object};
use crate::error::BackendError;
use crate::objects::{
    dict_mut, dict_of, field_name, get_inheritable, is_widget, name_of, page_annots, parent_id,
    rect_object, set_page_annots,
};
use crate::text_string::encode_text_string;

/// Apply a parsed batch to `doc`, whose pages are `page_ids` in order.
///
/// Per-record and per-field problems become warnings in the report; only
/// an unusable document structure is an error.
pub(crate) fn apply_patches(
    doc: &mut Document,
    page_ids: &[ObjectId],
    patches: &ParsedPatches,
    options: &ApplyOptions,
) -> Result<ApplyReport, BackendError> {
    let records = &patches.records;
    let index = PatchIndex::build(records);
    let mut report = ApplyReport {
        patches_total: patches.total,
        patches_accepted: records.len(),
        warnings: patches.warnings.clone(),
        ..ApplyReport::default()
    };
    let mut matched_ids: HashSet<&str> = HashSet::new();
    let mut jobs: Vec<AppearanceJob> = Vec::new();

    for (page_index, &page_id) in page_ids.iter().enumerate() {
        let page = page_index as u32 + 1;
        let Some(annots) = page_annots(doc, page_id) else {
            continue;
        };

        let mut kept = Vec::with_capacity(annots.len());
        let mut rewritten = false;
        for (idx, entry) in annots.into_iter().enumerate() {
            let live_name = live_widget_name(doc, &entry);
            let Some(slot) = index.resolve(page, idx, live_name.as_deref()) else {
                kept.push(entry);
                continue;
            };
            let record = &records[slot];
            matched_ids.insert(record.field_id.as_str());

            if record.hidden {
                debug!(page, index = idx, field_id = %record.field_id, "removing hidden annotation");
                report.removed += 1;
                rewritten = true;
                continue;
            }

            let widget_id = match entry {
                Object::Reference(id) if is_dictionary(doc, id) => id,
                Object::Dictionary(dict) => {
                    // Direct annotation dictionaries are promoted to indirect
                    // objects so that edits have a stable target.
                    rewritten = true;
                    doc.add_object(dict)
                }
                other => {
                    report.warnings.push(
                        PatchWarning::new(
                            WarningCode::MalformedAnnotation,
                            format!("annotation {idx} cannot be resolved"),
                        )
                        .on_page(page)
                        .for_field(record.field_id.as_str()),
                    );
                    kept.push(other);
                    continue;
                }
            };

            debug!(page, index = idx, field_id = %record.field_id, "applying patch");
            report.matched += 1;
            apply_edits(doc, widget_id, record, options, page, page_id, &mut jobs);
            kept.push(Object::Reference(widget_id));
        }

        if rewritten {
            set_page_annots(doc, page_id, kept)?;
        }
    }

    for record in records {
        if matched_ids.contains(record.field_id.as_str()) {
            continue;
        }
        if !record.wants_creation(&options.new_field_prefix) {
            debug!(field_id = %record.field_id, "patch matched no annotation");
            report.warnings.push(
                PatchWarning::new(WarningCode::UnmatchedPatch, "patch matched no annotation")
                    .for_field(record.field_id.as_str()),
            );
            report.unmatched.push(record.field_id.clone());
            continue;
        }
        match create_widget(doc, page_ids, record, options) {
            Ok(created) => {
                debug!(page = created.page, name = %created.name, id = ?created.id, "created widget");
                report.created += 1;
                report.matched += 1;
                if !created.value.is_empty() {
                    queue_job(
                        &mut jobs,
                        AppearanceJob {
                            page: created.page,
                            page_id: created.page_id,
                            field_name: created.name,
                            value: created.value,
                        },
                    );
                }
            }
            Err(skip) => {
                debug!(field_id = %record.field_id, reason = %skip, "creation skipped");
                report.warnings.push(
                    PatchWarning::new(WarningCode::CreationSkipped, skip.to_string())
                        .for_field(record.field_id.as_str()),
                );
                report.unmatched.push(record.field_id.clone());
            }
        }
    }

    if options.regenerate_appearances && !jobs.is_empty() {
        report.appearances = regenerate(doc, &jobs);
        for entry in &report.appearances.entries {
            if let AppearanceOutcome::Failed(reason) = &entry.outcome {
                report.warnings.push(
                    PatchWarning::new(WarningCode::AppearanceFailed, reason.clone())
                        .on_page(entry.page)
                        .for_field(entry.field_name.as_str()),
                );
            }
        }
    }

    ensure_acroform(doc)?.set("NeedAppearances", Object::Boolean(true));

    info!(
        patches = report.patches_total,
        matched = report.matched,
        created = report.created,
        removed = report.removed,
        unmatched = report.unmatched.len(),
        "applied patches"
    );
    Ok(report)
}

/// Apply every edit of `record` to the widget `widget_id`.
///
/// Widget-level keys (`/Rect`, `/TU`, `/DA`) go on the widget. `/V` and
/// `/DV` go on both widget and parent. Field-level keys (`/FT`, `/MaxLen`,
/// `/Opt`) go on the field of record: the parent when there is one, else
/// the widget itself.
fn apply_edits(
    doc: &mut Document,
    widget_id: ObjectId,
    record: &PatchRecord,
    options: &ApplyOptions,
    page: u32,
    page_id: ObjectId,
    jobs: &mut Vec<AppearanceJob>,
) {
    let parent = doc
        .get_object(widget_id)
        .and_then(Object::as_dict)
        .ok()
        .and_then(parent_id)
        .filter(|&id| is_dictionary(doc, id));
    let field_of_record = parent.unwrap_or(widget_id);

    for edit in record.edits(options.default_font_size) {
        match edit {
            FieldEdit::Rect(rect) => set_key(doc, widget_id, "Rect", rect_object(&rect)),
            FieldEdit::Label(label) => set_key(doc, widget_id, "TU", encode_text_string(label)),
            FieldEdit::Value(value) => {
                for target in std::iter::once(widget_id).chain(parent) {
                    set_key(doc, target, "V", encode_text_string(value));
                    set_key(doc, target, "DV", encode_text_string(value));
                }
                let name = widget_field_name(doc, widget_id);
                if !name.is_empty() {
                    queue_job(
                        jobs,
                        AppearanceJob {
                            page,
                            page_id,
                            field_name: name,
                            value: value.to_string(),
                        },
                    );
                }
            }
            FieldEdit::FieldType(field_type) => set_key(
                doc,
                field_of_record,
                "FT",
                Object::Name(field_type.as_pdf_name().as_bytes().to_vec()),
            ),
            FieldEdit::MaxLen(max_len) => {
                set_key(doc, field_of_record, "MaxLen", Object::Integer(max_len))
            }
            FieldEdit::Options(opts) => {
                if effective_type(doc, widget_id) == FieldType::Choice {
                    set_key(doc, field_of_record, "Opt", options_object(opts));
                } else {
                    debug!(field_id = %record.field_id, "ignoring options on a non-choice field");
                }
            }
            FieldEdit::Appearance(da) => {
                set_key(doc, widget_id, "DA", encode_text_string(&da.to_da_string()))
            }
        }
    }
}

/// Trimmed inherited name of a widget annotation entry.
fn live_widget_name(doc: &Document, entry: &Object) -> Option<String> {
    dict_of(doc, entry)
        .filter(|dict| is_widget(dict))
        .map(|dict| field_name(doc, dict))
}

fn widget_field_name(doc: &Document, widget_id: ObjectId) -> String {
    doc.get_object(widget_id)
        .and_then(Object::as_dict)
        .map(|dict| field_name(doc, dict))
        .unwrap_or_default()
}

fn is_dictionary(doc: &Document, id: ObjectId) -> bool {
    doc.get_object(id).is_ok_and(|obj| obj.as_dict().is_ok())
}

fn effective_type(doc: &Document, widget_id: ObjectId) -> FieldType {
    doc.get_object(widget_id)
        .and_then(Object::as_dict)
        .ok()
        .and_then(|dict| get_inheritable(doc, dict, b"FT"))
        .and_then(name_of)
        .and_then(|ft| FieldType::from_pdf_name(&ft))
        .unwrap_or(FieldType::Text)
}

fn set_key(doc: &mut Document, id: ObjectId, key: &str, value: Object) {
    if let Some(dict) = dict_mut(doc, id) {
        dict.set(key, value);
    }
}

/// Queue a regeneration; a later value for the same page and name wins.
fn queue_job(jobs: &mut Vec<AppearanceJob>, job: AppearanceJob) {
    match jobs
        .iter_mut()
        .find(|queued| queued.page == job.page && queued.field_name == job.field_name)
    {
        Some(queued) => queued.value = job.value,
        None => jobs.push(job),
    }
}
