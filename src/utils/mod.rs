pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod logging;
pub mod progress;

pub use constants::*;
pub use coordinates::{flat_index, is_valid_coordinate, nearest_index, AxisLookupError};
pub use filename::parse_filename_date;
pub use logging::init_logging;
pub use progress::ProgressReporter;
