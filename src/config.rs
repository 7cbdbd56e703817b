use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    GRID_DIR, GRID_FILE_EXTENSION, LAT_DIMENSION, LON_DIMENSION, OUTPUT_FILE, RAINFALL_VARIABLE,
    STATIONS_FILE,
};
use std::path::PathBuf;

/// Everything a run needs to know about where inputs live and how grids are
/// laid out. `Default` gives the fixed CHIRPS locations.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionConfig {
    pub stations_file: PathBuf,
    pub grid_dir: PathBuf,
    pub output_file: PathBuf,
    pub variable: String,
    pub lon_name: String,
    pub lat_name: String,
    pub file_extension: String,
    pub show_progress: bool,
}

impl ExtractionConfig {
    pub fn new(
        stations_file: impl Into<PathBuf>,
        grid_dir: impl Into<PathBuf>,
        output_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            stations_file: stations_file.into(),
            grid_dir: grid_dir.into(),
            output_file: output_file.into(),
            ..Self::default()
        }
    }

    pub fn with_variable(mut self, variable: &str) -> Self {
        self.variable = variable.to_string();
        self
    }

    pub fn with_dimensions(mut self, lon_name: &str, lat_name: &str) -> Self {
        self.lon_name = lon_name.to_string();
        self.lat_name = lat_name.to_string();
        self
    }

    pub fn with_file_extension(mut self, extension: &str) -> Self {
        self.file_extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Reject settings that would make every lookup fail.
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("variable", &self.variable),
            ("longitude dimension", &self.lon_name),
            ("latitude dimension", &self.lat_name),
            ("file extension", &self.file_extension),
        ];
        for (label, value) in names {
            if value.trim().is_empty() {
                return Err(ProcessingError::Config(format!("{} must not be empty", label)));
            }
        }

        if self.lon_name == self.lat_name {
            return Err(ProcessingError::Config(format!(
                "longitude and latitude dimensions are both '{}'",
                self.lon_name
            )));
        }

        Ok(())
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            stations_file: PathBuf::from(STATIONS_FILE),
            grid_dir: PathBuf::from(GRID_DIR),
            output_file: PathBuf::from(OUTPUT_FILE),
            variable: RAINFALL_VARIABLE.to_string(),
            lon_name: LON_DIMENSION.to_string(),
            lat_name: LAT_DIMENSION.to_string(),
            file_extension: GRID_FILE_EXTENSION.to_string(),
            show_progress: true,
        }
    }
}
