use crate::error::Result;
use crate::models::OutputTable;
use crate::utils::constants::{DATE_COLUMN, OUTPUT_DATE_FORMAT};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::warn;

/// Writes an [`OutputTable`] as delimited text: a `date` column followed by
/// one column per station, blank where there is no value.
#[derive(Debug, Default)]
pub struct CsvTableWriter;

impl CsvTableWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write the table to `path`.
    ///
    /// The file is written next to its destination and renamed into place, so
    /// `path` either keeps its previous contents or holds the whole table.
    pub fn write(&self, table: &OutputTable, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        if table.is_empty() {
            warn!("No dated rows to write; {} will hold only the header", path.display());
        }

        let mut staging = NamedTempFile::new_in(parent)?;
        self.write_to(table, staging.as_file_mut())?;
        staging.as_file().sync_all()?;
        staging.persist(path)?;

        Ok(())
    }

    /// Serialize the table to any writer.
    pub fn write_to<W: Write>(&self, table: &OutputTable, destination: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(destination);

        let mut header = Vec::with_capacity(table.columns().len() + 1);
        header.push(DATE_COLUMN.to_string());
        header.extend(table.columns().iter().cloned());
        writer.write_record(&header)?;

        for (row, date) in table.dates().iter().enumerate() {
            let mut record = Vec::with_capacity(header.len());
            record.push(date.format(OUTPUT_DATE_FORMAT).to_string());
            record.extend(
                table
                    .row_values(row)
                    .map(|value| value.map(format_value).unwrap_or_default()),
            );
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Shortest round-trip form of a value; whole numbers keep one decimal.
pub fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
