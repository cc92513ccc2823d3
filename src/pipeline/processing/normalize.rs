use crate::config::CleaningConfig;
use crate::domain::{LedgerRecord, RawRecord};
use tracing::{debug, warn};

/// Cell-level failure while parsing a formatted currency string.
/// Always caught by the normalizer and replaced with 0.0.
#[derive(Debug, PartialEq)]
pub struct CurrencyParseError {
    pub raw: String,
}

/// Counters for the recoverable repairs applied during normalization.
#[derive(Debug, Default, Clone, Copy)]
pub struct NormalizeStats {
    pub recovered_revenue_cells: usize,
    pub recovered_weight_cells: usize,
    pub fixed_customer_names: usize,
}

pub struct NormalizeOutcome {
    pub records: Vec<LedgerRecord>,
    pub stats: NormalizeStats,
}

pub struct Normalizer {
    cleaning: CleaningConfig,
}

impl Normalizer {
    pub fn new(cleaning: CleaningConfig) -> Self {
        Self { cleaning }
    }

    /// Clean every raw row: parse revenue and weight, fill missing numerics
    /// with zero, rewrite the known customer-name typo. Rows are never
    /// dropped here; every parse failure is repaired in place.
    pub fn normalize(&self, rows: Vec<RawRecord>) -> NormalizeOutcome {
        let mut stats = NormalizeStats::default();
        let mut records = Vec::with_capacity(rows.len());

        for (idx, row) in rows.into_iter().enumerate() {
            let revenue = match self.parse_currency(&row.revenue) {
                Ok(value) => value,
                Err(e) => {
                    warn!(row = idx, raw = %e.raw, "unparseable revenue, using 0.0");
                    stats.recovered_revenue_cells += 1;
                    0.0
                }
            };

            let weight = match coerce_numeric(&row.weight) {
                Some(value) => value,
                None => {
                    warn!(row = idx, raw = %row.weight, "unparseable weight, using 0.0");
                    stats.recovered_weight_cells += 1;
                    0.0
                }
            };

            let customer = self.fix_customer_typo(&row.customer);
            if customer != row.customer {
                debug!(row = idx, from = %row.customer, to = %customer, "customer typo fixed");
                stats.fixed_customer_names += 1;
            }

            let year = row.year.trim().parse::<i32>().unwrap_or_else(|_| {
                warn!(row = idx, raw = %row.year, "unparseable year, using 0");
                0
            });

            records.push(LedgerRecord {
                year,
                month_name: row.month_name,
                customer,
                revenue,
                weight,
                classification: row.classification,
            });
        }

        NormalizeOutcome { records, stats }
    }

    /// Parse a revenue cell. Bare numbers pass through unchanged; formatted
    /// strings like `"R$ 1.234,56"` are converted (strip the currency
    /// prefix, drop `.` thousands grouping, `,` becomes the decimal point).
    /// Missing values fill to 0.0; anything else is a `CurrencyParseError`.
    pub fn parse_currency(&self, raw: &str) -> Result<f64, CurrencyParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(0.0);
        }
        if let Ok(value) = trimmed.parse::<f64>() {
            return Ok(value);
        }

        let without_prefix = trimmed
            .strip_prefix(self.cleaning.currency_prefix.as_str())
            .unwrap_or(trimmed)
            .trim();
        let digits = without_prefix.replace('.', "").replace(',', ".");
        digits.parse::<f64>().map_err(|_| CurrencyParseError {
            raw: raw.to_string(),
        })
    }

    /// Substring-level rewrite of the known data-entry typo, case-sensitive.
    pub fn fix_customer_typo(&self, customer: &str) -> String {
        customer.replace(
            self.cleaning.customer_typo_from.as_str(),
            self.cleaning.customer_typo_to.as_str(),
        )
    }
}

/// Generic numeric coercion for weight cells. Empty counts as missing
/// and fills to zero; garbage is `None` so the caller can log the repair.
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CleaningConfig;

    fn normalizer() -> Normalizer {
        Normalizer::new(CleaningConfig::default())
    }

    #[test]
    fn parses_brazilian_currency_format() {
        let n = normalizer();
        assert_eq!(n.parse_currency("R$ 1.234,56").unwrap(), 1234.56);
        assert_eq!(n.parse_currency("R$ 0,00").unwrap(), 0.0);
        assert_eq!(n.parse_currency("1.234,56").unwrap(), 1234.56);
    }

    #[test]
    fn bare_numbers_pass_through_unchanged() {
        let n = normalizer();
        assert_eq!(n.parse_currency("1234.56").unwrap(), 1234.56);
        assert_eq!(n.parse_currency("100").unwrap(), 100.0);
    }

    #[test]
    fn garbage_is_an_error_and_missing_fills_zero() {
        let n = normalizer();
        assert!(n.parse_currency("abc").is_err());
        assert_eq!(n.parse_currency("").unwrap(), 0.0);
        assert_eq!(n.parse_currency("   ").unwrap(), 0.0);
    }

    #[test]
    fn typo_fix_is_substring_level() {
        let n = normalizer();
        assert_eq!(n.fix_customer_typo("Clinte Silva"), "Cliente Silva");
        assert_eq!(n.fix_customer_typo("Cliente Silva"), "Cliente Silva");
        assert_eq!(n.fix_customer_typo("Clinte Clinte"), "Cliente Cliente");
    }

    #[test]
    fn normalize_repairs_cells_without_dropping_rows() {
        let rows = vec![
            RawRecord {
                year: "2023".to_string(),
                month_name: "janeiro".to_string(),
                customer: "Clinte A".to_string(),
                revenue: "abc".to_string(),
                weight: "not-a-number".to_string(),
                classification: "Ouro".to_string(),
            },
            RawRecord {
                year: "2024".to_string(),
                month_name: "julho".to_string(),
                customer: "Cliente B".to_string(),
                revenue: "R$ 50,00".to_string(),
                weight: "5".to_string(),
                classification: "Prata".to_string(),
            },
        ];
        let outcome = normalizer().normalize(rows);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].revenue, 0.0);
        assert_eq!(outcome.records[0].weight, 0.0);
        assert_eq!(outcome.records[0].customer, "Cliente A");
        assert_eq!(outcome.records[1].revenue, 50.0);
        assert_eq!(outcome.stats.recovered_revenue_cells, 1);
        assert_eq!(outcome.stats.recovered_weight_cells, 1);
        assert_eq!(outcome.stats.fixed_customer_names, 1);
    }
}
