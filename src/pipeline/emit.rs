use crate::domain::EnrichedRecord;
use crate::error::Result;
use csv::WriterBuilder;
use std::fs;
use std::path::Path;
use tracing::info;

/// Serialize the enriched table to a Latin-1, delimited snapshot file.
///
/// Writes to a sibling temp file and renames into place so a concurrent
/// run against the same output path never observes a partial file.
pub fn write_ledger(path: &Path, records: &[EnrichedRecord], delimiter: u8) -> Result<()> {
    let mut writer = WriterBuilder::new().delimiter(delimiter).from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    let buffer = writer.into_inner().map_err(|e| e.into_error())?;

    let utf8 = String::from_utf8_lossy(&buffer);
    let (encoded, _, _) = encoding_rs::WINDOWS_1252.encode(&utf8);

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "enriched.csv".to_string());
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));

    fs::write(&tmp_path, encoded.as_ref())?;
    fs::rename(&tmp_path, path)?;

    info!(rows = records.len(), file = %path.display(), "enriched snapshot written");
    Ok(())
}
