use crate::domain::CustomerProfile;
use std::collections::{BTreeMap, HashMap};

/// Profile from purchase frequency. The frequent predicate is strictly
/// greater-than: exactly `threshold` purchases is still Seasonal.
pub fn profile_for(purchase_count: u64, frequent_threshold: u64) -> CustomerProfile {
    if purchase_count > frequent_threshold {
        CustomerProfile::Frequent
    } else if purchase_count == 1 {
        CustomerProfile::Single
    } else {
        CustomerProfile::Seasonal
    }
}

/// Year-over-year percentage change of total revenue, in ascending-year
/// order over the whole dataset. The first year, and any year whose
/// predecessor had zero revenue, gets 0.0.
pub fn annual_change_pct(revenue_by_year: &BTreeMap<i32, f64>) -> HashMap<i32, f64> {
    let mut changes = HashMap::with_capacity(revenue_by_year.len());
    let mut previous: Option<f64> = None;
    for (&year, &revenue) in revenue_by_year {
        let pct = match previous {
            Some(prev) if prev != 0.0 => ((revenue - prev) / prev) * 100.0,
            _ => 0.0,
        };
        changes.insert(year, pct);
        previous = Some(revenue);
    }
    changes
}

pub fn is_retained(profile: CustomerProfile) -> bool {
    profile == CustomerProfile::Frequent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_boundaries() {
        assert_eq!(profile_for(1, 20), CustomerProfile::Single);
        assert_eq!(profile_for(2, 20), CustomerProfile::Seasonal);
        assert_eq!(profile_for(20, 20), CustomerProfile::Seasonal);
        assert_eq!(profile_for(21, 20), CustomerProfile::Frequent);
    }

    #[test]
    fn yoy_change_matches_sorted_year_series() {
        let totals = BTreeMap::from([(2022, 100.0), (2023, 150.0), (2024, 120.0)]);
        let changes = annual_change_pct(&totals);
        assert_eq!(changes[&2022], 0.0);
        assert_eq!(changes[&2023], 50.0);
        assert_eq!(changes[&2024], -20.0);
    }

    #[test]
    fn zero_previous_year_yields_zero_change() {
        let totals = BTreeMap::from([(2022, 0.0), (2023, 150.0)]);
        let changes = annual_change_pct(&totals);
        assert_eq!(changes[&2023], 0.0);
    }

    #[test]
    fn only_frequent_customers_are_retained() {
        assert!(is_retained(CustomerProfile::Frequent));
        assert!(!is_retained(CustomerProfile::Seasonal));
        assert!(!is_retained(CustomerProfile::Single));
    }
}
