use serde::{Deserialize, Serialize};

/// Configuration for scanner behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Maximum file size to scan (in bytes)
    /// Files larger than this are reported as failed
    pub max_file_size: usize,

    /// Enable parallel scanning (for `scan_files`)
    pub parallel: bool,

    /// Number of parallel workers (None = rayon default)
    pub parallel_workers: Option<usize>,

    /// Also look at member types (`Outer$Inner`)
    pub include_nested: bool,

    /// Scan files even if tree-sitter reports syntax errors
    pub tolerate_syntax_errors: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024, // 10 MB
            parallel: false,
            parallel_workers: None,
            include_nested: true,
            tolerate_syntax_errors: false,
        }
    }
}

impl ScanConfig {
    /// Top-level types only, scanned in parallel
    pub fn fast() -> Self {
        Self {
            parallel: true,
            include_nested: false,
            ..Default::default()
        }
    }

    /// Keep going through files tree-sitter cannot fully parse
    pub fn lenient() -> Self {
        Self {
            tolerate_syntax_errors: true,
            ..Default::default()
        }
    }

    /// Enable parallel scanning
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the number of parallel workers
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.parallel_workers = Some(workers);
        self
    }

    /// Set maximum file size
    pub fn with_max_file_size(mut self, size: usize) -> Self {
        self.max_file_size = size;
        self
    }

    pub fn with_nested(mut self, include_nested: bool) -> Self {
        self.include_nested = include_nested;
        self
    }

    pub fn with_tolerate_syntax_errors(mut self, tolerate: bool) -> Self {
        self.tolerate_syntax_errors = tolerate;
        self
    }
}
