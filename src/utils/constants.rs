/// Fixed input and output locations
pub const STATIONS_FILE: &str = "stations.csv";
pub const GRID_DIR: &str = "CHIRPS";
pub const OUTPUT_FILE: &str = "chirps_1981_2021.csv";

/// Gridded file layout
pub const GRID_FILE_EXTENSION: &str = "nc";
pub const RAINFALL_VARIABLE: &str = "rfe";
pub const LON_DIMENSION: &str = "lon";
pub const LAT_DIMENSION: &str = "lat";

/// Station list column names
pub const STATION_COLUMN: &str = "station";
pub const LON_COLUMN: &str = "lon";
pub const LAT_COLUMN: &str = "lat";

/// Output table
pub const DATE_COLUMN: &str = "date";
pub const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const FILENAME_DATE_FORMAT: &str = "%Y%m%d";

/// CF attribute names used when decoding raw grid values
pub const FILL_VALUE_ATTR: &str = "_FillValue";
pub const MISSING_VALUE_ATTR: &str = "missing_value";
pub const SCALE_FACTOR_ATTR: &str = "scale_factor";
pub const ADD_OFFSET_ATTR: &str = "add_offset";
