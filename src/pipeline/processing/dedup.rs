use crate::domain::LedgerRecord;
use std::collections::HashSet;
use tracing::info;

/// Remove exact full-row duplicates, keeping the first occurrence in
/// input order. Runs on normalized records, before any derived columns
/// exist, so the comparison covers the typo-fixed customer name and the
/// cleaned numeric values.
pub fn dedup(records: Vec<LedgerRecord>) -> Vec<LedgerRecord> {
    let before = records.len();
    let mut seen = HashSet::new();
    let deduped: Vec<LedgerRecord> = records
        .into_iter()
        .filter(|record| seen.insert(record.dedup_key()))
        .collect();
    if deduped.len() < before {
        info!(
            removed = before - deduped.len(),
            remaining = deduped.len(),
            "duplicate rows removed"
        );
    }
    deduped
}
