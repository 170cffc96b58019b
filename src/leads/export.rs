//! CSV snapshots of harvested leads.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use super::Lead;
use crate::scraping::ScrapingError;

/// Snapshot file name for a run started at `at`.
#[must_use]
pub fn snapshot_file_name(at: NaiveDateTime) -> String {
    format!("leads_{}.csv", at.format("%Y%m%d_%H%M%S"))
}

/// Write `leads` as CSV with a header row.
///
/// # Errors
/// Returns an error if serialization or the underlying writer fails.
pub fn write_leads<W: Write>(writer: W, leads: &[Lead]) -> Result<(), ScrapingError> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(true).from_writer(writer);
    for lead in leads {
        csv_writer.serialize(lead)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write `leads` to `<dir>/leads_<timestamp>.csv`, creating `dir` if needed.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn write_snapshot(dir: &Path, leads: &[Lead], at: NaiveDateTime) -> Result<PathBuf, ScrapingError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(snapshot_file_name(at));
    let file = File::create(&path)?;
    write_leads(file, leads)?;
    Ok(path)
}
