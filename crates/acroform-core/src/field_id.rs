//! Field identification scheme shared by extraction and patch application.
//!
//! PDF field names are neither guaranteed unique nor present, so extraction
//! derives an id per widget from its name or its position:
//!
//! - trimmed field name when non-empty, else `p{page}-{index}`;
//! - a repeated candidate becomes `{candidate}@{page}-{index}`.
//!
//! Patch application accepts three id shapes (see [`FieldKey::parse`]) and
//! resolves each annotation by position first, then by name. The scheme is
//! positional: it assumes the annotation array order did not change between
//! extraction and application on the same document bytes.

use std::collections::{HashMap, HashSet};

use crate::PatchRecord;

/// Id used for a widget without a usable name.
pub fn positional_id(page: u32, index: usize) -> String {
    format!("p{page}-{index}")
}

/// Hands out ids during one extraction pass, guaranteeing uniqueness.
#[derive(Debug, Default)]
pub struct IdAllocator {
    seen: HashSet<String>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the id for the widget at `(page, index)` named `field_name`.
    ///
    /// The earliest occurrence of a name keeps the bare name; later ones get
    /// the `@{page}-{index}` suffix.
    pub fn assign(&mut self, field_name: &str, page: u32, index: usize) -> String {
        let trimmed = field_name.trim();
        let candidate = if trimmed.is_empty() {
            positional_id(page, index)
        } else {
            trimmed.to_string()
        };

        let mut id = if self.seen.contains(&candidate) {
            format!("{candidate}@{page}-{index}")
        } else {
            candidate
        };
        // Only reachable when a literal field name equals a generated id.
        let mut attempt = 1;
        while self.seen.contains(&id) {
            id = format!("{}#{attempt}", positional_id(page, index));
            attempt += 1;
        }

        self.seen.insert(id.clone());
        id
    }
}

/// How a patch id addresses an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// 1-based page number and 0-based index in the page's `/Annots` array.
    Position { page: u32, index: usize },
    /// A field name matched against the live `/T` of each widget.
    Name(String),
}

impl FieldKey {
    /// Classify a patch id.
    ///
    /// - `p{page}-{index}` resolves by position, independent of any name;
    /// - `{name}@{page}-{index}` resolves by position, the name is informational;
    /// - `p{page}-{index}#{n}`, the collision fallback, resolves by position;
    /// - anything else, including ids that look positional but do not parse,
    ///   is a name key.
    pub fn parse(id: &str) -> Self {
        let positional = if id.contains('@') {
            id.rsplit_once('@')
                .and_then(|(_, suffix)| parse_page_index(suffix))
        } else if let Some(rest) = id.strip_prefix('p') {
            parse_page_index(strip_collision_suffix(rest))
        } else {
            None
        };

        match positional {
            Some((page, index)) => Self::Position { page, index },
            None => Self::Name(id.to_string()),
        }
    }
}

/// Drop a trailing `#{n}` counter.
fn strip_collision_suffix(text: &str) -> &str {
    match text.rsplit_once('#') {
        Some((head, counter))
            if !counter.is_empty() && counter.bytes().all(|b| b.is_ascii_digit()) =>
        {
            head
        }
        _ => text,
    }
}

/// Parse `"{page}-{index}"`.
fn parse_page_index(text: &str) -> Option<(u32, usize)> {
    let (page, index) = text.split_once('-')?;
    Some((page.parse().ok()?, index.parse().ok()?))
}

/// Lookup tables from annotation identity to patch position in a batch.
///
/// Built once per apply operation. Registering the same key twice keeps the
/// later patch (last write wins).
#[derive(Debug, Default)]
pub struct PatchIndex {
    by_position: HashMap<(u32, usize), usize>,
    by_name: HashMap<String, usize>,
}

impl PatchIndex {
    /// Index every record of a batch.
    ///
    /// A record's `fieldName`, when present and different from its id, is
    /// registered as an additional name key.
    pub fn build(records: &[PatchRecord]) -> Self {
        let mut index = Self::default();
        for (slot, record) in records.iter().enumerate() {
            match FieldKey::parse(&record.field_id) {
                FieldKey::Position { page, index: pos } => {
                    index.by_position.insert((page, pos), slot);
                }
                FieldKey::Name(name) => {
                    index.by_name.insert(name, slot);
                }
            }
            if let Some(name) = record.field_name.as_deref() {
                if name != record.field_id {
                    index.by_name.insert(name.to_string(), slot);
                }
            }
        }
        index
    }

    /// Resolve the patch for the annotation at `(page, index)`.
    ///
    /// Position wins; `field_name` (the annotation's live, trimmed name) is
    /// the fallback.
    pub fn resolve(&self, page: u32, index: usize, field_name: Option<&str>) -> Option<usize> {
        self.by_position.get(&(page, index)).copied().or_else(|| {
            field_name
                .filter(|name| !name.is_empty())
                .and_then(|name| self.by_name.get(name).copied())
        })
    }

    /// Number of distinct keys registered.
    pub fn len(&self) -> usize {
        self.by_position.len() + self.by_name.len()
    }

    /// Whether no key was registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
