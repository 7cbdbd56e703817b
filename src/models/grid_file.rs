use chrono::NaiveDate;
use std::path::PathBuf;

/// A daily rainfall grid whose date has already been read from its filename.
///
/// The grid contents are not held here; each extraction reopens the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GriddedFile {
    pub date: NaiveDate,
    pub path: PathBuf,
}

impl GriddedFile {
    pub fn new(date: NaiveDate, path: impl Into<PathBuf>) -> Self {
        Self {
            date,
            path: path.into(),
        }
    }
}
