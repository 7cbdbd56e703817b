pub mod extraction_report;
pub mod pipeline;

pub use extraction_report::ExtractionReport;
pub use pipeline::{run_extraction, Pipeline};
