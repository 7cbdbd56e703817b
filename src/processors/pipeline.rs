use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::models::{OutputTable, Station};
use crate::processors::ExtractionReport;
use crate::readers::{GridCatalog, GridSampler, NetcdfExtractor, StationReader};
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvTableWriter;
use tracing::{info, warn};

/// Drives the station × file lookup loop and fills the output table.
pub struct Pipeline<S> {
    sampler: S,
    show_progress: bool,
}

impl<S: GridSampler> Pipeline<S> {
    pub fn new(sampler: S) -> Self {
        Self {
            sampler,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Look up every station in every catalogued file.
    ///
    /// Rows exist for all catalogued dates before the first lookup, so a date
    /// with no values still appears. Failed lookups are logged and counted.
    pub fn extract(
        &self,
        stations: &[Station],
        catalog: &GridCatalog,
    ) -> (OutputTable, ExtractionReport) {
        let mut table = OutputTable::new();
        for file in catalog.files() {
            table.init_row(file.date);
        }

        let mut report =
            ExtractionReport::new(stations.len(), catalog.len(), catalog.skipped().len());

        let total = (stations.len() * catalog.len()) as u64;
        let progress = ProgressReporter::new(total, "Extracting rainfall...", !self.show_progress);

        for station in stations {
            table.add_column(&station.name);
            progress.set_message(&format!("Extracting {}", station.name));

            for file in catalog.files() {
                match self
                    .sampler
                    .sample(&file.path, station.longitude, station.latitude)
                {
                    Ok(value) => {
                        table.set(file.date, &station.name, value);
                        report.record_value();
                    }
                    Err(failure) => {
                        progress.suspend(|| warn!("{}", failure));
                        report.record_failure(&failure);
                    }
                }
                progress.increment(1);
            }
        }

        progress.finish_with_message(&format!(
            "Extracted {} of {} values",
            report.values_extracted, report.extractions_attempted
        ));

        (table, report)
    }
}

impl Pipeline<NetcdfExtractor> {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(NetcdfExtractor::from_config(config)).with_progress(config.show_progress)
    }
}

/// Run the whole extraction described by `config` and write the table.
///
/// Errors returned here are fatal: the station list or grid directory could
/// not be read, or the output could not be written.
pub fn run_extraction(config: &ExtractionConfig) -> Result<ExtractionReport> {
    config.validate()?;

    info!("Reading stations from {}", config.stations_file.display());
    let stations = StationReader::new().read_stations(&config.stations_file)?;

    info!("Scanning {} for grid files", config.grid_dir.display());
    let catalog = GridCatalog::scan(&config.grid_dir, &config.file_extension)?;
    info!(
        "{} stations, {} dated grid files ({} skipped)",
        stations.len(),
        catalog.len(),
        catalog.skipped().len()
    );
    if catalog.is_empty() {
        warn!(
            "No dated .{} files found in {}",
            config.file_extension,
            config.grid_dir.display()
        );
    }

    let (table, report) = Pipeline::from_config(config).extract(&stations, &catalog);

    info!(
        "Writing {} rows x {} stations to {}",
        table.len(),
        table.columns().len(),
        config.output_file.display()
    );
    CsvTableWriter::new().write(&table, &config.output_file)?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionFailure;
    use crate::models::ExtractionResult;
    use chrono::NaiveDate;
    use std::path::{Path, PathBuf};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, day).unwrap()
    }

    fn catalog() -> GridCatalog {
        GridCatalog::from_paths(vec![
            PathBuf::from("grid_20200101.nc"),
            PathBuf::from("grid_20200102.nc"),
            PathBuf::from("grid_bad.nc"),
        ])
    }

    fn sampler(path: &Path, lon: f64, _lat: f64) -> ExtractionResult {
        if path.ends_with("grid_20200102.nc") {
            return Err(ExtractionFailure::MissingVariable {
                path: path.to_path_buf(),
                variable: "rfe".to_string(),
            });
        }
        if lon > 100.0 {
            return Err(ExtractionFailure::OutOfBounds {
                path: path.to_path_buf(),
                lon,
                lat: 0.0,
            });
        }
        Ok(lon)
    }

    #[test]
    fn test_extract_fills_table_and_report() {
        let stations = vec![Station::new("A", 10.0, 5.0)];
        let (table, report) = Pipeline::new(sampler).extract(&stations, &catalog());

        assert_eq!(table.dates(), &[date(1), date(2)]);
        assert_eq!(table.columns(), &["A".to_string()]);
        assert_eq!(table.get(date(1), "A"), Some(10.0));
        assert_eq!(table.get(date(2), "A"), None);

        assert_eq!(report.stations, 1);
        assert_eq!(report.files_catalogued, 2);
        assert_eq!(report.files_skipped, 1);
        assert_eq!(report.extractions_attempted, 2);
        assert_eq!(report.values_extracted, 1);
        assert_eq!(report.failures_of("missing_variable"), 1);
    }

    #[test]
    fn test_station_without_values_keeps_its_column() {
        let stations = vec![Station::new("A", 10.0, 5.0), Station::new("Far", 150.0, 5.0)];
        let (table, report) = Pipeline::new(sampler).extract(&stations, &catalog());

        assert_eq!(table.columns(), &["A".to_string(), "Far".to_string()]);
        assert_eq!(table.get(date(1), "Far"), None);
        assert_eq!(report.failures_of("out_of_bounds"), 1);
    }

    #[test]
    fn test_rows_exist_when_every_lookup_fails() {
        let stations = vec![Station::new("A", 10.0, 5.0)];
        let always_missing = |path: &Path, lon: f64, lat: f64| -> ExtractionResult {
            Err(ExtractionFailure::NoData {
                path: path.to_path_buf(),
                lon,
                lat,
            })
        };
        let (table, report) = Pipeline::new(always_missing).extract(&stations, &catalog());

        assert_eq!(table.len(), 2);
        assert_eq!(table.filled_cells(), 0);
        assert_eq!(report.values_extracted, 0);
    }

    #[test]
    fn test_each_station_visits_each_file_once() {
        let calls = std::cell::RefCell::new(Vec::new());
        let counting = |path: &Path, lon: f64, _lat: f64| -> ExtractionResult {
            calls.borrow_mut().push((lon, path.to_path_buf()));
            Ok(1.0)
        };
        let stations = vec![Station::new("A", 1.0, 0.0), Station::new("B", 2.0, 0.0)];
        Pipeline::new(counting).extract(&stations, &catalog());

        let calls = calls.into_inner();
        assert_eq!(calls.len(), 4);
        // Outer loop over stations, inner loop over files
        assert_eq!(calls[0], (1.0, PathBuf::from("grid_20200101.nc")));
        assert_eq!(calls[1], (1.0, PathBuf::from("grid_20200102.nc")));
        assert_eq!(calls[2], (2.0, PathBuf::from("grid_20200101.nc")));
    }

    #[test]
    fn test_duplicate_station_names_share_a_column() {
        let stations = vec![Station::new("A", 10.0, 5.0), Station::new("A", 20.0, 5.0)];
        let (table, _) = Pipeline::new(sampler).extract(&stations, &catalog());

        assert_eq!(table.columns().len(), 1);
        assert_eq!(table.get(date(1), "A"), Some(20.0));
    }
}
