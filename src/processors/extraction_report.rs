use crate::error::ExtractionFailure;
use std::collections::BTreeMap;

/// Counts gathered over one extraction run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionReport {
    pub stations: usize,
    pub files_catalogued: usize,
    pub files_skipped: usize,
    pub extractions_attempted: usize,
    pub values_extracted: usize,
    pub failures: BTreeMap<&'static str, usize>,
}

impl ExtractionReport {
    pub fn new(stations: usize, files_catalogued: usize, files_skipped: usize) -> Self {
        Self {
            stations,
            files_catalogued,
            files_skipped,
            ..Self::default()
        }
    }

    pub fn record_value(&mut self) {
        self.extractions_attempted += 1;
        self.values_extracted += 1;
    }

    pub fn record_failure(&mut self, failure: &ExtractionFailure) {
        self.extractions_attempted += 1;
        *self.failures.entry(failure.kind()).or_insert(0) += 1;
    }

    pub fn total_failures(&self) -> usize {
        self.failures.values().sum()
    }

    pub fn failures_of(&self, kind: &str) -> usize {
        self.failures.get(kind).copied().unwrap_or(0)
    }

    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Extraction Report ===\n");
        summary.push_str(&format!("Stations: {}\n", self.stations));
        summary.push_str(&format!(
            "Grid files: {} dated, {} skipped\n",
            self.files_catalogued, self.files_skipped
        ));
        summary.push_str(&format!("Lookups: {}\n", self.extractions_attempted));

        if self.extractions_attempted > 0 {
            summary.push_str(&format!(
                "Values extracted: {} ({:.1}%)\n",
                self.values_extracted,
                100.0 * self.values_extracted as f64 / self.extractions_attempted as f64
            ));
        } else {
            summary.push_str("Values extracted: 0\n");
        }

        summary.push_str(&format!("No value: {}\n", self.total_failures()));
        for (kind, count) in &self.failures {
            summary.push_str(&format!("  {}: {}\n", kind, count));
        }

        summary
    }
}
