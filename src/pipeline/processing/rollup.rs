use crate::domain::SemesterPeriod;
use crate::error::{LedgerError, Result};
use crate::pipeline::processing::temporal::KeyedRecord;
use std::collections::{BTreeMap, HashMap};
use tracing::info;

/// Grouped aggregates computed in one pass over the keyed table and
/// broadcast back onto rows by key lookup (no row-by-row joins).
#[derive(Debug)]
pub struct Rollups {
    pub weight_by_semester: HashMap<SemesterPeriod, f64>,
    pub revenue_by_semester: HashMap<SemesterPeriod, f64>,
    pub purchases_by_customer: HashMap<String, u64>,
    pub weight_by_customer: HashMap<String, f64>,
    /// Total revenue per year, ascending; consumed by the YoY classifier.
    pub revenue_by_year: BTreeMap<i32, f64>,
    /// The single highest-revenue customer across the whole table,
    /// lexicographically smallest name on ties.
    pub top_customer: String,
}

pub fn compute(rows: &[KeyedRecord]) -> Result<Rollups> {
    if rows.is_empty() {
        return Err(LedgerError::EmptyAggregation(
            "top customer selection over an empty table".to_string(),
        ));
    }

    let mut weight_by_semester = HashMap::new();
    let mut revenue_by_semester = HashMap::new();
    let mut purchases_by_customer: HashMap<String, u64> = HashMap::new();
    let mut weight_by_customer: HashMap<String, f64> = HashMap::new();
    let mut revenue_by_customer: HashMap<String, f64> = HashMap::new();
    let mut revenue_by_year: BTreeMap<i32, f64> = BTreeMap::new();

    for keyed in rows {
        let record = &keyed.record;
        if let Some(semester) = keyed.semester {
            *weight_by_semester.entry(semester).or_insert(0.0) += record.weight;
            *revenue_by_semester.entry(semester).or_insert(0.0) += record.revenue;
        }
        *purchases_by_customer
            .entry(record.customer.clone())
            .or_insert(0) += 1;
        *weight_by_customer
            .entry(record.customer.clone())
            .or_insert(0.0) += record.weight;
        *revenue_by_customer
            .entry(record.customer.clone())
            .or_insert(0.0) += record.revenue;
        *revenue_by_year.entry(record.year).or_insert(0.0) += record.revenue;
    }

    let mut top: Option<(&String, f64)> = None;
    for (customer, &revenue) in &revenue_by_customer {
        let better = match top {
            None => true,
            Some((best_name, best_revenue)) => {
                revenue > best_revenue || (revenue == best_revenue && customer < best_name)
            }
        };
        if better {
            top = Some((customer, revenue));
        }
    }
    let top_customer = top
        .map(|(name, _)| name.clone())
        .ok_or_else(|| {
            LedgerError::EmptyAggregation("no customers present in the table".to_string())
        })?;

    info!(
        semesters = revenue_by_semester.len(),
        customers = purchases_by_customer.len(),
        years = revenue_by_year.len(),
        top_customer = %top_customer,
        "rollups computed"
    );

    Ok(Rollups {
        weight_by_semester,
        revenue_by_semester,
        purchases_by_customer,
        weight_by_customer,
        revenue_by_year,
        top_customer,
    })
}
