use crate::error::{FilenameError, ProcessingError, Result};
use crate::models::GriddedFile;
use crate::utils::filename::parse_filename_date;
use glob::{glob, Pattern};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A grid file left out of the run because its name carries no usable date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: FilenameError,
}

/// The dated grid files of one directory, in sorted filename order.
///
/// Each filename is parsed exactly once here; everything downstream works
/// from the cached [`GriddedFile::date`].
#[derive(Debug, Clone, Default)]
pub struct GridCatalog {
    files: Vec<GriddedFile>,
    skipped: Vec<SkippedFile>,
}

impl GridCatalog {
    /// List `<dir>/*.<extension>` and parse the date from every name.
    pub fn scan(dir: &Path, extension: &str) -> Result<Self> {
        if !dir.is_dir() {
            return Err(ProcessingError::MissingData(format!(
                "grid directory not found: {}",
                dir.display()
            )));
        }

        let pattern = format!(
            "{}/*.{}",
            Pattern::escape(&dir.to_string_lossy()),
            Pattern::escape(extension)
        );

        let mut paths = Vec::new();
        for entry in glob(&pattern)? {
            match entry {
                Ok(path) if path.is_file() => paths.push(path),
                Ok(_) => {}
                Err(e) => warn!("Could not read directory entry: {}", e),
            }
        }

        debug!("Found {} grid files matching {}", paths.len(), pattern);
        Ok(Self::from_paths(paths))
    }

    /// Build a catalog from an explicit list of paths.
    pub fn from_paths(mut paths: Vec<PathBuf>) -> Self {
        paths.sort();

        let mut catalog = Self::default();
        for path in paths {
            match parse_filename_date(&path) {
                Ok(date) => catalog.files.push(GriddedFile::new(date, path)),
                Err(reason) => {
                    warn!(
                        "Could not parse date from filename: {}, Error: {}",
                        path.display(),
                        reason
                    );
                    catalog.skipped.push(SkippedFile { path, reason });
                }
            }
        }
        catalog
    }

    pub fn files(&self) -> &[GriddedFile] {
        &self.files
    }

    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_from_paths_sorts_and_skips() {
        let catalog = GridCatalog::from_paths(vec![
            PathBuf::from("CHIRPS/chirps_20200102.nc"),
            PathBuf::from("CHIRPS/grid_bad.nc"),
            PathBuf::from("CHIRPS/chirps_20200101.nc"),
        ]);

        let dates: Vec<NaiveDate> = catalog.files().iter().map(|f| f.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
            ]
        );
        assert_eq!(catalog.skipped().len(), 1);
        assert_eq!(catalog.skipped()[0].path, PathBuf::from("CHIRPS/grid_bad.nc"));
        assert!(!catalog.is_empty());

        let undated = GridCatalog::from_paths(vec![PathBuf::from("CHIRPS/grid_bad.nc")]);
        assert!(undated.is_empty());
    }

    #[test]
    fn test_scan_filters_by_extension() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("chirps_20200101.nc"), b"")?;
        fs::write(dir.path().join("chirps_20200102.nc"), b"")?;
        fs::write(dir.path().join("chirps_20200103.tif"), b"")?;
        fs::create_dir(dir.path().join("chirps_20200104.nc"))?;

        let catalog = GridCatalog::scan(dir.path(), "nc")?;

        assert_eq!(catalog.len(), 2);
        assert!(catalog.skipped().is_empty());
        assert!(catalog.files()[0].path.ends_with("chirps_20200101.nc"));
        Ok(())
    }

    #[test]
    fn test_scan_missing_directory() {
        let err = GridCatalog::scan(Path::new("no/such/dir"), "nc").unwrap_err();
        assert!(matches!(err, ProcessingError::MissingData(_)));
    }
}
