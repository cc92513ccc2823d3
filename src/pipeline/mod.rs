// Batch enrichment pipeline: ingestion, processing stages, emission.

pub mod emit;
pub mod ingestion;
pub mod processing;

use crate::config::Config;
use crate::domain::EnrichedRecord;
use crate::error::Result;
use processing::normalize::{NormalizeStats, Normalizer};
use processing::temporal::KeyedRecord;
use processing::{classify, dedup, rollup, temporal};
use std::path::Path;
use tracing::info;

/// Counters reported after a pipeline run.
#[derive(Debug)]
pub struct PipelineSummary {
    pub raw_rows: usize,
    pub deduplicated_rows: usize,
    pub invalid_date_rows: usize,
    pub recovered_revenue_cells: usize,
    pub recovered_weight_cells: usize,
    pub fixed_customer_names: usize,
    pub output_file: String,
}

/// Diagnostics from a dry run (`validate`): ingestion and normalization
/// only, nothing written.
#[derive(Debug)]
pub struct ValidationSummary {
    pub raw_rows: usize,
    pub invalid_month_rows: usize,
    pub recovered_revenue_cells: usize,
    pub recovered_weight_cells: usize,
    pub fixed_customer_names: usize,
}

/// Sequences the fixed stage order over one in-memory table per run.
/// Stateless across runs: every invocation reprocesses the raw input.
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the full pipeline: ingest, normalize, deduplicate, derive
    /// temporal keys, roll up, classify, emit. Any non-recoverable
    /// failure aborts before output is written.
    pub fn run(&self, input: &Path, output: &Path) -> Result<PipelineSummary> {
        let delimiter = self.config.delimiter_byte();

        let raw = ingestion::read_ledger(input, delimiter)?;
        let raw_rows = raw.len();

        let (keyed, stats) = self.prepare(raw);
        let deduplicated_rows = keyed.len();
        let invalid_date_rows = keyed.iter().filter(|k| k.date.is_none()).count();

        let rollups = rollup::compute(&keyed)?;
        let enriched = self.classify_and_assemble(keyed, &rollups);

        emit::write_ledger(output, &enriched, delimiter)?;

        info!(
            raw_rows,
            deduplicated_rows, invalid_date_rows, "pipeline run complete"
        );
        Ok(PipelineSummary {
            raw_rows,
            deduplicated_rows,
            invalid_date_rows,
            recovered_revenue_cells: stats.recovered_revenue_cells,
            recovered_weight_cells: stats.recovered_weight_cells,
            fixed_customer_names: stats.fixed_customer_names,
            output_file: output.to_string_lossy().to_string(),
        })
    }

    /// Dry run: ingest and normalize only, reporting what a full run
    /// would have repaired. Writes nothing.
    pub fn validate(&self, input: &Path) -> Result<ValidationSummary> {
        let raw = ingestion::read_ledger(input, self.config.delimiter_byte())?;
        let raw_rows = raw.len();
        let outcome = Normalizer::new(self.config.cleaning.clone()).normalize(raw);
        let invalid_month_rows = outcome
            .records
            .iter()
            .filter(|r| temporal::month_number(&r.month_name).is_none())
            .count();
        Ok(ValidationSummary {
            raw_rows,
            invalid_month_rows,
            recovered_revenue_cells: outcome.stats.recovered_revenue_cells,
            recovered_weight_cells: outcome.stats.recovered_weight_cells,
            fixed_customer_names: outcome.stats.fixed_customer_names,
        })
    }

    /// Normalize, deduplicate, and key the raw table. Shared by `run`.
    fn prepare(&self, raw: Vec<crate::domain::RawRecord>) -> (Vec<KeyedRecord>, NormalizeStats) {
        let outcome = Normalizer::new(self.config.cleaning.clone()).normalize(raw);
        let deduped = dedup::dedup(outcome.records);
        let keyed = temporal::build_keys(deduped);
        (keyed, outcome.stats)
    }

    /// Broadcast rollups onto every row and attach classifier columns.
    fn classify_and_assemble(
        &self,
        keyed: Vec<KeyedRecord>,
        rollups: &rollup::Rollups,
    ) -> Vec<EnrichedRecord> {
        let threshold = self.config.classifier.frequent_purchase_threshold;
        let yearly_change = classify::annual_change_pct(&rollups.revenue_by_year);

        keyed
            .into_iter()
            .map(|keyed| {
                let record = keyed.record;
                let purchase_count = rollups
                    .purchases_by_customer
                    .get(&record.customer)
                    .copied()
                    .unwrap_or(0);
                let profile = classify::profile_for(purchase_count, threshold);

                EnrichedRecord {
                    weight_total_by_semester: keyed
                        .semester
                        .and_then(|s| rollups.weight_by_semester.get(&s).copied()),
                    revenue_total_by_semester: keyed
                        .semester
                        .and_then(|s| rollups.revenue_by_semester.get(&s).copied()),
                    purchase_count_by_customer: purchase_count,
                    top_customer_overall: rollups.top_customer.clone(),
                    weight_total_by_customer: rollups
                        .weight_by_customer
                        .get(&record.customer)
                        .copied()
                        .unwrap_or(0.0),
                    customer_profile: profile,
                    annual_revenue_change_pct: yearly_change
                        .get(&record.year)
                        .copied()
                        .unwrap_or(0.0),
                    is_retained_customer: classify::is_retained(profile),
                    year: record.year,
                    month_name: record.month_name,
                    month_num: keyed.month_num,
                    customer: record.customer,
                    revenue: record.revenue,
                    weight: record.weight,
                    classification: record.classification,
                    date: keyed.date,
                    semester_period: keyed.semester,
                }
            })
            .collect()
    }
}
