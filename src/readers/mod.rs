pub mod grid_catalog;
pub mod point_extractor;
pub mod station_reader;

pub use grid_catalog::{GridCatalog, SkippedFile};
pub use point_extractor::{CfDecoding, GridSampler, NetcdfExtractor};
pub use station_reader::StationReader;
