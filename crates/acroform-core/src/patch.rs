//! Patch records submitted by the form editor.
//!
//! Patch lists come from an interactive editor that may send partially
//! valid state, so parsing is lenient: the list as a whole must be JSON, but
//! each record and each key of a record is validated on its own and a bad
//! value only drops that value (with a [`PatchWarning`]).

use serde_json::{Map, Value};

use crate::appearance::DefaultAppearance;
use crate::error::{FormError, PatchWarning, WarningCode};
use crate::form_field::{ChoiceOption, FieldType};
use crate::geometry::Rect;

/// Requested default appearance: either key may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct AppearanceRequest {
    /// `None` when the size was absent, null or zero.
    pub size: Option<f64>,
    pub family: Option<String>,
}

impl AppearanceRequest {
    /// Resolve into a DA, using `default_size` when no size was given.
    pub fn resolve(&self, default_size: f64) -> DefaultAppearance {
        DefaultAppearance::from_patch(self.size.unwrap_or(default_size), self.family.as_deref())
    }
}

/// One structural patch for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchRecord {
    /// Correlation key (see [`crate::field_id::FieldKey`]). Never empty.
    pub field_id: String,
    /// Trimmed display name, used as a second lookup key and as the name of
    /// created widgets.
    pub field_name: Option<String>,
    pub rect: Option<Rect>,
    /// New `/V` and `/DV`. `None` leaves the value untouched.
    pub default_value: Option<String>,
    pub hidden: bool,
    /// Trimmed, non-empty tooltip text.
    pub label: Option<String>,
    pub field_type: Option<FieldType>,
    pub max_len: Option<i64>,
    pub options: Option<Vec<ChoiceOption>>,
    /// Target page for creation. Unparseable input is kept as `Some(0)` so
    /// that it is rejected as out of range.
    pub page: Option<i64>,
    pub create_if_missing: bool,
    pub appearance: Option<AppearanceRequest>,
}

/// A single mutation carried by a patch record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit<'a> {
    Rect(Rect),
    Label(&'a str),
    Value(&'a str),
    FieldType(FieldType),
    MaxLen(i64),
    Options(&'a [ChoiceOption]),
    Appearance(DefaultAppearance),
}

impl PatchRecord {
    /// A record that carries no mutation.
    pub fn new(field_id: &str) -> Self {
        Self {
            field_id: field_id.to_string(),
            field_name: None,
            rect: None,
            default_value: None,
            hidden: false,
            label: None,
            field_type: None,
            max_len: None,
            options: None,
            page: None,
            create_if_missing: false,
            appearance: None,
        }
    }

    /// The mutations to apply to a matched annotation, in a fixed order.
    ///
    /// `hidden` is not an edit: a hidden record removes the annotation
    /// instead of mutating it.
    pub fn edits(&self, default_font_size: f64) -> Vec<FieldEdit<'_>> {
        let mut edits = Vec::new();
        if let Some(rect) = self.rect {
            edits.push(FieldEdit::Rect(rect));
        }
        if let Some(label) = self.label.as_deref() {
            edits.push(FieldEdit::Label(label));
        }
        if let Some(value) = self.default_value.as_deref() {
            edits.push(FieldEdit::Value(value));
        }
        if let Some(field_type) = self.field_type {
            edits.push(FieldEdit::FieldType(field_type));
        }
        if let Some(max_len) = self.max_len {
            edits.push(FieldEdit::MaxLen(max_len));
        }
        if let Some(options) = self.options.as_deref() {
            edits.push(FieldEdit::Options(options));
        }
        if let Some(appearance) = &self.appearance {
            edits.push(FieldEdit::Appearance(appearance.resolve(default_font_size)));
        }
        edits
    }

    /// Whether an unmatched record asks for a new widget.
    pub fn wants_creation(&self, new_field_prefix: &str) -> bool {
        self.create_if_missing
            || (!new_field_prefix.is_empty() && self.field_id.starts_with(new_field_prefix))
    }

    /// `/T` for a widget created from this record.
    pub fn creation_name(&self) -> String {
        let name = self
            .field_name
            .as_deref()
            .unwrap_or(self.field_id.as_str())
            .trim();
        if name.is_empty() {
            "Field".to_string()
        } else {
            name.to_string()
        }
    }
}

/// Outcome of parsing a patch list.
#[derive(Debug, Clone, Default)]
pub struct ParsedPatches {
    /// Records that carried a usable `fieldId`, in input order.
    pub records: Vec<PatchRecord>,
    /// Length of the submitted array (0 when the JSON was not an array).
    pub total: usize,
    pub warnings: Vec<PatchWarning>,
}

/// Parse a JSON patch list.
///
/// Fails only on invalid JSON. A JSON value that is not an array is an
/// empty list.
pub fn parse_patch_list(json: &str) -> Result<ParsedPatches, FormError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| FormError::PatchListError(e.to_string()))?;
    Ok(parse_patch_value(&value))
}

/// Parse an already-decoded patch list.
pub fn parse_patch_value(value: &Value) -> ParsedPatches {
    let Value::Array(entries) = value else {
        return ParsedPatches::default();
    };

    let mut parsed = ParsedPatches {
        total: entries.len(),
        ..ParsedPatches::default()
    };
    for (position, entry) in entries.iter().enumerate() {
        if let Some(record) = parse_record(position, entry, &mut parsed.warnings) {
            parsed.records.push(record);
        }
    }
    parsed
}

fn parse_record(
    position: usize,
    entry: &Value,
    warnings: &mut Vec<PatchWarning>,
) -> Option<PatchRecord> {
    let Some(obj) = entry.as_object() else {
        warnings.push(PatchWarning::new(
            WarningCode::MissingFieldId,
            format!("patch entry {position} is not an object"),
        ));
        return None;
    };
    let Some(field_id) = key(obj, "fieldId", "field_id").and_then(scalar_text) else {
        warnings.push(PatchWarning::new(
            WarningCode::MissingFieldId,
            format!("patch entry {position} has no fieldId"),
        ));
        return None;
    };
    if field_id.is_empty() {
        warnings.push(PatchWarning::new(
            WarningCode::MissingFieldId,
            format!("patch entry {position} has an empty fieldId"),
        ));
        return None;
    }

    let mut record = PatchRecord::new(&field_id);
    let mut warn = |code: WarningCode, description: String| {
        warnings.push(PatchWarning::new(code, description).for_field(field_id.as_str()));
    };

    record.field_name = key(obj, "fieldName", "field_name")
        .and_then(scalar_text)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    if let Some(value) = key(obj, "rect", "rect") {
        record.rect = parse_rect(value);
        if record.rect.is_none() {
            warn(WarningCode::InvalidRect, format!("ignoring rect {value}"));
        }
    }

    record.default_value = key(obj, "defaultValue", "default_value").map(value_text);
    record.hidden = matches!(obj.get("hidden"), Some(Value::Bool(true)));
    record.label = obj
        .get("label")
        .and_then(scalar_text)
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty());

    record.field_type = key(obj, "fieldType", "field_type")
        .and_then(scalar_text)
        .and_then(|ft| FieldType::from_field_type_synonym(&ft))
        .or_else(|| {
            key(obj, "controlType", "control_type")
                .and_then(scalar_text)
                .and_then(|ct| FieldType::from_control_type(&ct))
        });

    if let Some(value) = key(obj, "maxLen", "max_len") {
        record.max_len = parse_integer(value);
        if record.max_len.is_none() {
            warn(WarningCode::InvalidNumber, format!("ignoring maxLen {value}"));
        }
    }

    if let Some(Value::Array(items)) = obj.get("options") {
        if !items.is_empty() {
            record.options = Some(items.iter().map(parse_option).collect());
        }
    }

    if let Some(value) = obj.get("page").filter(|v| !v.is_null()) {
        record.page = Some(parse_integer(value).unwrap_or_else(|| {
            warn(WarningCode::InvalidNumber, format!("page {value} is not a number"));
            0
        }));
    }

    record.create_if_missing = match key(obj, "createIfMissing", "create_if_missing") {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => {
            let text = text.trim();
            text.eq_ignore_ascii_case("true") || text == "1"
        }
        _ => false,
    };

    let size = obj.get("fontSize").or_else(|| obj.get("font_size"));
    let family = obj.get("fontFamily").or_else(|| obj.get("font_family"));
    if size.is_some() || family.is_some() {
        match parse_font_size(size) {
            Ok(size) => {
                record.appearance = Some(AppearanceRequest {
                    size,
                    family: family.and_then(Value::as_str).map(str::to_string),
                });
            }
            Err(value) => {
                warn(WarningCode::InvalidNumber, format!("ignoring fontSize {value}"));
            }
        }
    }

    Some(record)
}

/// Look up a key by its camelCase name, falling back to the snake_case alias.
/// Null counts as absent.
fn key<'a>(obj: &'a Map<String, Value>, camel: &str, snake: &str) -> Option<&'a Value> {
    obj.get(camel)
        .filter(|v| !v.is_null())
        .or_else(|| obj.get(snake).filter(|v| !v.is_null()))
}

/// Text of a string or number; other JSON types have none.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Strings verbatim, anything else as its JSON text.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn parse_rect(value: &Value) -> Option<Rect> {
    let items = value.as_array()?;
    let numbers = items
        .iter()
        .take(4)
        .map(parse_number)
        .collect::<Option<Vec<f64>>>()?;
    Rect::from_values(&numbers).map(|rect| rect.rounded())
}

fn parse_option(item: &Value) -> ChoiceOption {
    match item {
        Value::String(s) => ChoiceOption::Plain(s.clone()),
        Value::Object(obj) => {
            let value = obj
                .get("value")
                .filter(|v| !v.is_null())
                .map(value_text)
                .unwrap_or_default();
            match obj.get("label").filter(|v| !v.is_null()).map(value_text) {
                Some(label) if label.trim() != value => ChoiceOption::Pair { value, label },
                _ => ChoiceOption::Plain(value),
            }
        }
        other => ChoiceOption::Plain(other.to_string()),
    }
}

/// `Ok(None)` for absent, null or zero sizes; `Err` carries the bad value.
fn parse_font_size(value: Option<&Value>) -> Result<Option<f64>, Value> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => match parse_number(v) {
            Some(size) if size == 0.0 => Ok(None),
            Some(size) => Ok(Some(size)),
            None => Err(v.clone()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ParsedPatches {
        parse_patch_list(json).unwrap()
    }

    #[test]
    fn invalid_json_is_fatal() {
        let err = parse_patch_list("[{").unwrap_err();
        assert!(matches!(err, FormError::PatchListError(_)));
    }

    #[test]
    fn non_array_is_empty_list() {
        let parsed = parse(r#"{"fieldId":"p1-0"}"#);
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.total, 0);
    }

    #[test]
    fn missing_field_id_is_skipped() {
        let parsed = parse(r#"[{}, {"fieldId":""}, 3, {"fieldId":"p1-0"}]"#);
        assert_eq!(parsed.total, 4);
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].field_id, "p1-0");
        assert_eq!(parsed.warnings.len(), 3);
        assert!(parsed.warnings.iter().all(|w| w.code == WarningCode::MissingFieldId));
    }

    #[test]
    fn numeric_field_id_is_text() {
        let parsed = parse(r#"[{"fieldId":509}]"#);
        assert_eq!(parsed.records[0].field_id, "509");
    }

    #[test]
    fn snake_case_aliases() {
        let parsed = parse(
            r#"[{"field_id":"a","field_name":" Name ","default_value":"x",
                 "field_type":"select","max_len":"12","create_if_missing":true,
                 "font_size":14,"font_family":"courier"}]"#,
        );
        let record = &parsed.records[0];
        assert_eq!(record.field_id, "a");
        assert_eq!(record.field_name.as_deref(), Some("Name"));
        assert_eq!(record.default_value.as_deref(), Some("x"));
        assert_eq!(record.field_type, Some(FieldType::Choice));
        assert_eq!(record.max_len, Some(12));
        assert!(record.create_if_missing);
        assert_eq!(
            record.appearance,
            Some(AppearanceRequest {
                size: Some(14.0),
                family: Some("courier".to_string())
            })
        );
    }

    #[test]
    fn rect_accepts_numeric_strings_and_extra_entries() {
        let parsed = parse(r#"[{"fieldId":"a","rect":[1,"2.5",3,4,99]}]"#);
        assert_eq!(parsed.records[0].rect, Some(Rect::new(1.0, 2.5, 3.0, 4.0)));
    }

    #[test]
    fn rect_is_rounded_to_two_decimals() {
        let parsed = parse(r#"[{"fieldId":"a","rect":[200.33333333333334,665.1234567,520.75,715.5]}]"#);
        assert_eq!(
            parsed.records[0].rect,
            Some(Rect::new(200.33, 665.12, 520.75, 715.5))
        );
    }

    #[test]
    fn bad_rect_is_dropped_with_warning() {
        let parsed = parse(r#"[{"fieldId":"a","rect":["x",1,2,3]}, {"fieldId":"b","rect":[1,2,3]}]"#);
        assert_eq!(parsed.records.len(), 2);
        assert!(parsed.records.iter().all(|r| r.rect.is_none()));
        assert_eq!(parsed.warnings.len(), 2);
        assert_eq!(parsed.warnings[0].code, WarningCode::InvalidRect);
        assert_eq!(parsed.warnings[0].field.as_deref(), Some("a"));
    }

    #[test]
    fn default_value_forms() {
        let parsed = parse(
            r#"[{"fieldId":"a","defaultValue":"Juan Pérez"},
                {"fieldId":"b","defaultValue":42},
                {"fieldId":"c","defaultValue":null},
                {"fieldId":"d","defaultValue":""}]"#,
        );
        assert_eq!(parsed.records[0].default_value.as_deref(), Some("Juan Pérez"));
        assert_eq!(parsed.records[1].default_value.as_deref(), Some("42"));
        assert_eq!(parsed.records[2].default_value, None);
        assert_eq!(parsed.records[3].default_value.as_deref(), Some(""));
    }

    #[test]
    fn hidden_only_for_json_true() {
        let parsed = parse(
            r#"[{"fieldId":"a","hidden":true},{"fieldId":"b","hidden":"true"},{"fieldId":"c","hidden":1}]"#,
        );
        let hidden: Vec<bool> = parsed.records.iter().map(|r| r.hidden).collect();
        assert_eq!(hidden, vec![true, false, false]);
    }

    #[test]
    fn create_if_missing_forms() {
        let parsed = parse(
            r#"[{"fieldId":"a","createIfMissing":"TRUE"},{"fieldId":"b","createIfMissing":"1"},
                {"fieldId":"c","createIfMissing":"yes"},{"fieldId":"d","createIfMissing":1}]"#,
        );
        let flags: Vec<bool> = parsed.records.iter().map(|r| r.create_if_missing).collect();
        assert_eq!(flags, vec![true, true, false, false]);
    }

    #[test]
    fn wants_creation_by_prefix() {
        let record = PatchRecord::new("new-17");
        assert!(record.wants_creation("new-"));
        assert!(!PatchRecord::new("Nombre").wants_creation("new-"));
        assert!(!record.wants_creation(""));
    }

    #[test]
    fn creation_name_fallbacks() {
        let mut record = PatchRecord::new("new-1");
        assert_eq!(record.creation_name(), "new-1");
        record.field_name = Some("Apellidos".to_string());
        assert_eq!(record.creation_name(), "Apellidos");
        assert_eq!(PatchRecord::new("  ").creation_name(), "Field");
    }

    #[test]
    fn field_type_wins_over_control_type() {
        let parsed = parse(
            r#"[{"fieldId":"a","fieldType":"Btn","controlType":"select"},
                {"fieldId":"b","controlType":"textarea"},
                {"fieldId":"c","fieldType":"radio","controlType":"checkbox"},
                {"fieldId":"d","fieldType":"radio"}]"#,
        );
        assert_eq!(parsed.records[0].field_type, Some(FieldType::Button));
        assert_eq!(parsed.records[1].field_type, Some(FieldType::Text));
        assert_eq!(parsed.records[2].field_type, Some(FieldType::Button));
        assert_eq!(parsed.records[3].field_type, None);
    }

    #[test]
    fn max_len_forms() {
        let parsed = parse(
            r#"[{"fieldId":"a","maxLen":10},{"fieldId":"b","maxLen":10.0},
                {"fieldId":"c","maxLen":"abc"},{"fieldId":"d","maxLen":2.5}]"#,
        );
        let lens: Vec<Option<i64>> = parsed.records.iter().map(|r| r.max_len).collect();
        assert_eq!(lens, vec![Some(10), Some(10), None, None]);
        assert_eq!(parsed.warnings.len(), 2);
        assert!(parsed.warnings.iter().all(|w| w.code == WarningCode::InvalidNumber));
    }

    #[test]
    fn options_forms() {
        let parsed = parse(
            r#"[{"fieldId":"a","options":["One",{"value":"2","label":"Two"},{"value":"3","label":" 3 "},7]},
                {"fieldId":"b","options":[]}]"#,
        );
        assert_eq!(
            parsed.records[0].options,
            Some(vec![
                ChoiceOption::Plain("One".to_string()),
                ChoiceOption::Pair {
                    value: "2".to_string(),
                    label: "Two".to_string()
                },
                ChoiceOption::Plain("3".to_string()),
                ChoiceOption::Plain("7".to_string()),
            ])
        );
        assert_eq!(parsed.records[1].options, None);
    }

    #[test]
    fn page_forms() {
        let parsed = parse(
            r#"[{"fieldId":"a","page":2},{"fieldId":"b","page":"3"},{"fieldId":"c","page":"two"},{"fieldId":"d"}]"#,
        );
        let pages: Vec<Option<i64>> = parsed.records.iter().map(|r| r.page).collect();
        assert_eq!(pages, vec![Some(2), Some(3), Some(0), None]);
    }

    #[test]
    fn appearance_defaults_and_invalid_size() {
        let parsed = parse(
            r#"[{"fieldId":"a","fontFamily":"serif"},{"fieldId":"b","fontSize":0},
                {"fieldId":"c","fontSize":"big"},{"fieldId":"d"}]"#,
        );
        let a = parsed.records[0].appearance.as_ref().unwrap();
        assert_eq!(a.resolve(11.0).to_da_string(), "0 0 0 rg /Times-Roman 11.0 Tf");
        let b = parsed.records[1].appearance.as_ref().unwrap();
        assert_eq!(b.size, None);
        assert_eq!(parsed.records[2].appearance, None);
        assert_eq!(parsed.records[3].appearance, None);
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn edits_in_fixed_order() {
        let parsed = parse(
            r#"[{"fieldId":"a","fontSize":12,"label":" Tip ","rect":[0,0,10,10],"defaultValue":"v","maxLen":3}]"#,
        );
        let edits = parsed.records[0].edits(11.0);
        assert_eq!(edits.len(), 5);
        assert_eq!(edits[0], FieldEdit::Rect(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(edits[1], FieldEdit::Label("Tip"));
        assert_eq!(edits[2], FieldEdit::Value("v"));
        assert_eq!(edits[3], FieldEdit::MaxLen(3));
        assert!(matches!(edits[4], FieldEdit::Appearance(da) if da.size == 12.0));
    }

    #[test]
    fn empty_record_has_no_edits() {
        let parsed = parse(r#"[{"fieldId":"p1-0","label":"   ","unknown":{"x":1}}]"#);
        assert!(parsed.records[0].edits(11.0).is_empty());
        assert!(parsed.warnings.is_empty());
    }
}
