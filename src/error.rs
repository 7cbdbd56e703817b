use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

/// Errors that abort a run: unreadable inputs or a failed output write.
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Could not persist output file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required data: {0}")]
    MissingData(String),
}

/// Why a single (station, file) lookup produced no value.
///
/// These never abort a run. The pipeline logs them and leaves the cell empty.
#[derive(Error, Debug)]
pub enum ExtractionFailure {
    #[error("Error opening file {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: netcdf::Error,
    },

    #[error("'{variable}' variable not found in {}", .path.display())]
    MissingVariable { path: PathBuf, variable: String },

    #[error("coordinate variable '{name}' not found in {}", .path.display())]
    MissingCoordinate { path: PathBuf, name: String },

    #[error("invalid coordinates ({lon}, {lat}) for {}", .path.display())]
    InvalidCoordinate { path: PathBuf, lon: f64, lat: f64 },

    #[error("coordinates ({lon}, {lat}) lie outside the grid in {}", .path.display())]
    OutOfBounds { path: PathBuf, lon: f64, lat: f64 },

    #[error("No data returned for coordinates ({lon}, {lat}) in {}: dimension '{dimension}' is empty", .path.display())]
    EmptySelection {
        path: PathBuf,
        lon: f64,
        lat: f64,
        dimension: String,
    },

    #[error("missing value at ({lon}, {lat}) in {}", .path.display())]
    NoData { path: PathBuf, lon: f64, lat: f64 },

    #[error("Value error in {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },
}

impl ExtractionFailure {
    /// Short stable label used for summary counts.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FileOpen { .. } => "file_open",
            Self::MissingVariable { .. } => "missing_variable",
            Self::MissingCoordinate { .. } => "missing_coordinate",
            Self::InvalidCoordinate { .. } => "invalid_coordinate",
            Self::OutOfBounds { .. } => "out_of_bounds",
            Self::EmptySelection { .. } => "empty_selection",
            Self::NoData { .. } => "no_data",
            Self::Read { .. } => "read",
        }
    }
}

/// Why a grid filename could not be turned into a date.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilenameError {
    #[error("path has no file name")]
    NoFileName,

    #[error("filename is not valid UTF-8")]
    NotUtf8,

    #[error("no date token after '_' in '{stem}'")]
    MissingDateToken { stem: String },

    #[error("date token '{token}' is not 8 digits (YYYYMMDD)")]
    NotEightDigits { token: String },

    #[error("date token '{token}' is not a calendar date")]
    InvalidDate { token: String },
}
