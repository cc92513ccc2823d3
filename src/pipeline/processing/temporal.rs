use crate::domain::{LedgerRecord, SemesterPeriod};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::warn;

/// Closed month-name vocabulary of the ledger exports. A fixed table
/// rather than locale-based parsing: the input language never changes
/// with the host system.
static MONTHS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("janeiro", 1),
        ("fevereiro", 2),
        ("março", 3),
        ("abril", 4),
        ("maio", 5),
        ("junho", 6),
        ("julho", 7),
        ("agosto", 8),
        ("setembro", 9),
        ("outubro", 10),
        ("novembro", 11),
        ("dezembro", 12),
    ])
});

/// Case-insensitive lookup into the closed month vocabulary.
pub fn month_number(name: &str) -> Option<u32> {
    MONTHS.get(name.trim().to_lowercase().as_str()).copied()
}

/// A ledger record annotated with its derived temporal keys. Rows whose
/// `(year, month_name)` composition fails keep `None` keys and flow
/// through the rest of the pipeline untouched.
#[derive(Debug, Clone)]
pub struct KeyedRecord {
    pub record: LedgerRecord,
    pub month_num: Option<u32>,
    pub date: Option<NaiveDate>,
    pub semester: Option<SemesterPeriod>,
}

/// Derive calendar date (first of month) and semester bucket for every row.
pub fn build_keys(records: Vec<LedgerRecord>) -> Vec<KeyedRecord> {
    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| {
            let month_num = month_number(&record.month_name);
            if month_num.is_none() {
                warn!(row = idx, month = %record.month_name, "unmapped month name, date left invalid");
            }
            // A zero-filled year (unparseable input) invalidates the date
            // the same way an unmapped month does.
            let date = month_num
                .filter(|_| record.year > 0)
                .and_then(|month| NaiveDate::from_ymd_opt(record.year, month, 1));
            let semester = match (date, month_num) {
                (Some(_), Some(month)) => Some(SemesterPeriod::from_month(record.year, month)),
                _ => None,
            };
            KeyedRecord {
                record,
                month_num,
                date,
                semester,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, month_name: &str) -> LedgerRecord {
        LedgerRecord {
            year,
            month_name: month_name.to_string(),
            customer: "Cliente A".to_string(),
            revenue: 1.0,
            weight: 1.0,
            classification: "Ouro".to_string(),
        }
    }

    #[test]
    fn month_lookup_is_case_insensitive_and_closed() {
        assert_eq!(month_number("janeiro"), Some(1));
        assert_eq!(month_number("MARÇO"), Some(3));
        assert_eq!(month_number(" dezembro "), Some(12));
        assert_eq!(month_number("january"), None);
        assert_eq!(month_number(""), None);
    }

    #[test]
    fn valid_rows_get_date_and_semester() {
        let keyed = build_keys(vec![record(2023, "julho")]);
        assert_eq!(keyed[0].month_num, Some(7));
        assert_eq!(keyed[0].date, NaiveDate::from_ymd_opt(2023, 7, 1));
        let semester = keyed[0].semester.unwrap();
        assert_eq!((semester.year, semester.half), (2023, 2));
    }

    #[test]
    fn zero_filled_year_invalidates_the_date() {
        let keyed = build_keys(vec![record(0, "janeiro")]);
        assert_eq!(keyed[0].month_num, Some(1));
        assert!(keyed[0].date.is_none());
        assert!(keyed[0].semester.is_none());
    }

    #[test]
    fn unmapped_month_is_retained_with_invalid_date() {
        let keyed = build_keys(vec![record(2023, "smarch")]);
        assert_eq!(keyed.len(), 1);
        assert!(keyed[0].month_num.is_none());
        assert!(keyed[0].date.is_none());
        assert!(keyed[0].semester.is_none());
        assert_eq!(keyed[0].record.customer, "Cliente A");
    }
}
