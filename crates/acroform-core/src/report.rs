//! Outcome of a patch application.

use crate::error::PatchWarning;

/// Result of regenerating one queued appearance.
#[derive(Debug, Clone, PartialEq)]
pub enum AppearanceOutcome {
    /// `count` widgets received a fresh `/AP /N` stream.
    Regenerated { count: usize },
    Failed(String),
}

/// One queued appearance regeneration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppearanceEntry {
    pub page: u32,
    pub field_name: String,
    pub value: String,
    pub outcome: AppearanceOutcome,
}

/// Partial-success record of the appearance pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppearanceReport {
    pub entries: Vec<AppearanceEntry>,
}

impl AppearanceReport {
    pub fn regenerated(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, AppearanceOutcome::Regenerated { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.entries.len() - self.regenerated()
    }
}

/// Summary of one apply operation.
#[derive(Debug, Clone, Default)]
pub struct ApplyReport {
    /// Length of the submitted patch array.
    pub patches_total: usize,
    /// Records that carried a usable `fieldId`.
    pub patches_accepted: usize,
    /// Annotations a patch was applied to plus created widgets. Hidden
    /// removals count only in `removed`.
    pub matched: usize,
    /// Widgets created for unmatched records.
    pub created: usize,
    /// Annotations removed by `hidden` records.
    pub removed: usize,
    /// Ids of records that matched nothing and created nothing.
    pub unmatched: Vec<String>,
    pub warnings: Vec<PatchWarning>,
    pub appearances: AppearanceReport,
}

impl ApplyReport {
    /// The one-line diagnostic printed by the apply CLI.
    pub fn summary_line(&self, output_bytes: usize) -> String {
        format!(
            "patches={} matched={} output_bytes={}",
            self.patches_total, self.matched, output_bytes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(outcome: AppearanceOutcome) -> AppearanceEntry {
        AppearanceEntry {
            page: 1,
            field_name: "Nombre".to_string(),
            value: "x".to_string(),
            outcome,
        }
    }

    #[test]
    fn appearance_report_counts() {
        let report = AppearanceReport {
            entries: vec![
                entry(AppearanceOutcome::Regenerated { count: 2 }),
                entry(AppearanceOutcome::Failed("no font".to_string())),
                entry(AppearanceOutcome::Regenerated { count: 1 }),
            ],
        };
        assert_eq!(report.regenerated(), 2);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn summary_line_format() {
        let report = ApplyReport {
            patches_total: 6,
            matched: 5,
            ..ApplyReport::default()
        };
        assert_eq!(report.summary_line(1234), "patches=6 matched=5 output_bytes=1234");
    }
}
