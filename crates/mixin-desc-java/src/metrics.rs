use crate::results::duration_serde;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Metrics collected while scanning
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScanMetrics {
    /// Total files attempted
    pub files_attempted: usize,

    /// Files successfully scanned
    pub files_succeeded: usize,

    /// Files that failed to scan
    pub files_failed: usize,

    /// Type declarations looked at
    pub declarations_scanned: usize,

    /// `@Desc` records decoded
    pub descriptors_found: usize,

    /// `@Desc` annotations that failed to decode
    pub malformed_descriptors: usize,

    /// Total time spent scanning
    #[serde(with = "duration_serde")]
    pub total_scan_time: Duration,
}

impl ScanMetrics {
    /// Success rate (0.0 to 1.0)
    pub fn success_rate(&self) -> f64 {
        if self.files_attempted == 0 {
            0.0
        } else {
            self.files_succeeded as f64 / self.files_attempted as f64
        }
    }

    /// Average scan time per file
    pub fn avg_scan_time(&self) -> Duration {
        if self.files_succeeded == 0 {
            Duration::ZERO
        } else {
            self.total_scan_time / self.files_succeeded as u32
        }
    }

    /// Merge another metrics object into this one
    pub fn merge(&mut self, other: &ScanMetrics) {
        self.files_attempted += other.files_attempted;
        self.files_succeeded += other.files_succeeded;
        self.files_failed += other.files_failed;
        self.declarations_scanned += other.declarations_scanned;
        self.descriptors_found += other.descriptors_found;
        self.malformed_descriptors += other.malformed_descriptors;
        self.total_scan_time += other.total_scan_time;
    }
}
