use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw ledger row exactly as read from the input file, before any
/// cleaning. Numeric fields stay as strings until the normalizer runs.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub year: String,
    pub month_name: String,
    pub customer: String,
    pub revenue: String,
    pub weight: String,
    pub classification: String,
}

/// A ledger row after field normalization: numeric fields parsed and
/// zero-filled, the known customer-name typo rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRecord {
    pub year: i32,
    pub month_name: String,
    pub customer: String,
    pub revenue: f64,
    pub weight: f64,
    pub classification: String,
}

impl LedgerRecord {
    /// Hashable identity over every field, used for full-row deduplication.
    /// Floats are compared by bit pattern; normalized values are never NaN.
    pub fn dedup_key(&self) -> (i32, String, String, u64, u64, String) {
        (
            self.year,
            self.month_name.clone(),
            self.customer.clone(),
            self.revenue.to_bits(),
            self.weight.to_bits(),
            self.classification.clone(),
        )
    }
}

/// A 6-calendar-month bucket of a year: S1 = January-June, S2 = July-December.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SemesterPeriod {
    pub year: i32,
    pub half: u8,
}

impl SemesterPeriod {
    pub fn from_month(year: i32, month: u32) -> Self {
        Self {
            year,
            half: if month <= 6 { 1 } else { 2 },
        }
    }
}

impl fmt::Display for SemesterPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-S{}", self.year, self.half)
    }
}

impl Serialize for SemesterPeriod {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Categorical label derived from purchase frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CustomerProfile {
    Frequent,
    Single,
    Seasonal,
}

impl fmt::Display for CustomerProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CustomerProfile::Frequent => "Frequent",
            CustomerProfile::Single => "Single",
            CustomerProfile::Seasonal => "Seasonal",
        };
        f.write_str(label)
    }
}

/// The analysis-ready output row. Field order is the output column order;
/// `None` serializes as an empty field.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedRecord {
    pub year: i32,
    pub month_name: String,
    pub month_num: Option<u32>,
    pub customer: String,
    pub revenue: f64,
    pub weight: f64,
    pub classification: String,
    pub date: Option<NaiveDate>,
    pub semester_period: Option<SemesterPeriod>,
    pub weight_total_by_semester: Option<f64>,
    pub revenue_total_by_semester: Option<f64>,
    pub purchase_count_by_customer: u64,
    pub top_customer_overall: String,
    pub weight_total_by_customer: f64,
    pub customer_profile: CustomerProfile,
    pub annual_revenue_change_pct: f64,
    pub is_retained_customer: bool,
}
