pub mod grid_file;
pub mod station;
pub mod table;

pub use grid_file::GriddedFile;
pub use station::Station;
pub use table::OutputTable;

/// Outcome of one (station, file) lookup: a rainfall value or the reason
/// there is none.
pub type ExtractionResult<T = f64> = std::result::Result<T, crate::error::ExtractionFailure>;
