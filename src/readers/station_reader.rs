use crate::error::{ProcessingError, Result};
use crate::models::Station;
use crate::utils::constants::{LAT_COLUMN, LON_COLUMN, STATION_COLUMN};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};
use validator::Validate;

#[derive(Debug, Default)]
pub struct StationReader;

impl StationReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the station list. Any I/O or parse failure is returned to the
    /// caller; stations with implausible coordinates are kept with a warning.
    pub fn read_stations(&self, path: &Path) -> Result<Vec<Station>> {
        let file = File::open(path)?;
        let stations = self.read_stations_from(file)?;
        debug!("Loaded {} stations from {}", stations.len(), path.display());
        Ok(stations)
    }

    pub fn read_stations_from<R: Read>(&self, source: R) -> Result<Vec<Station>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        for required in [STATION_COLUMN, LON_COLUMN, LAT_COLUMN] {
            if !headers.iter().any(|h| h == required) {
                return Err(ProcessingError::MissingData(format!(
                    "station list has no '{}' column (found: {})",
                    required,
                    headers.iter().collect::<Vec<_>>().join(", ")
                )));
            }
        }

        let mut stations = Vec::new();
        for record in reader.deserialize::<Station>() {
            let station = record?;
            if let Err(e) = station.validate() {
                warn!(
                    "Station '{}' at ({}, {}) failed validation: {}",
                    station.name, station.longitude, station.latitude, e
                );
            }
            stations.push(station);
        }

        Ok(stations)
    }
}
