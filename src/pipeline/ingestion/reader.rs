use crate::domain::RawRecord;
use crate::error::{LedgerError, Result};
use csv::{ReaderBuilder, Trim};
use std::fs;
use std::path::Path;
use tracing::info;

/// Required input columns, in the order the ledger export produces them.
pub const EXPECTED_COLUMNS: [&str; 6] =
    ["Ano", "Mês", "CLIENTE", "RECEITA", "PESO", "Classificação"];

/// Read a Latin-1, delimited ledger file into raw records.
///
/// Schema problems (missing column, no data rows) are fatal and reported
/// before any processing stage runs.
pub fn read_ledger(path: &Path, delimiter: u8) -> Result<Vec<RawRecord>> {
    let bytes = fs::read(path)?;
    // The ledger exports are Latin-1; windows-1252 is its superset and
    // covers the same byte range.
    let (content, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
    let records = read_content(&content, delimiter)?;
    info!(rows = records.len(), file = %path.display(), "ledger ingested");
    Ok(records)
}

/// Parse decoded ledger content. Split out from file reading for tests.
pub fn read_content(content: &str, delimiter: u8) -> Result<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let mut positions = [0usize; 6];
    for (slot, expected) in EXPECTED_COLUMNS.iter().enumerate() {
        match headers.iter().position(|h| h == *expected) {
            Some(pos) => positions[slot] = pos,
            None => return Err(LedgerError::MissingColumn((*expected).to_string())),
        }
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let field = |slot: usize| row.get(positions[slot]).unwrap_or("").to_string();
        records.push(RawRecord {
            year: field(0),
            month_name: field(1),
            customer: field(2),
            revenue: field(3),
            weight: field(4),
            classification: field(5),
        });
    }

    if records.is_empty() {
        return Err(LedgerError::EmptyInput);
    }
    Ok(records)
}
