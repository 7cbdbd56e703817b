use crate::error::FilenameError;
use crate::utils::constants::FILENAME_DATE_FORMAT;
use chrono::NaiveDate;
use std::path::Path;

/// Parse the date encoded in a grid filename such as `chirps_20200101.nc`.
///
/// The date is the second `_`-separated token of the file stem and must be
/// exactly eight digits in `YYYYMMDD` order.
///
/// # Examples
/// ```
/// use chirps_extractor::utils::parse_filename_date;
/// use std::path::Path;
///
/// let date = parse_filename_date(Path::new("CHIRPS/chirps_20200101.nc")).unwrap();
/// assert_eq!(date.to_string(), "2020-01-01");
/// ```
pub fn parse_filename_date(path: &Path) -> Result<NaiveDate, FilenameError> {
    let stem = path
        .file_stem()
        .ok_or(FilenameError::NoFileName)?
        .to_str()
        .ok_or(FilenameError::NotUtf8)?;

    let token = stem
        .split('_')
        .nth(1)
        .ok_or_else(|| FilenameError::MissingDateToken {
            stem: stem.to_string(),
        })?;

    if token.len() != 8 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FilenameError::NotEightDigits {
            token: token.to_string(),
        });
    }

    NaiveDate::parse_from_str(token, FILENAME_DATE_FORMAT).map_err(|_| {
        FilenameError::InvalidDate {
            token: token.to_string(),
        }
    })
}
