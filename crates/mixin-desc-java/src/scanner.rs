//! File and project level scanning for `@Desc` records

use crate::config::ScanConfig;
use crate::errors::{ScanError, ScanResult};
use crate::extractor::{extract_descriptors, parse_compilation_unit};
use crate::metrics::ScanMetrics;
use crate::results::{FileDescriptors, ProjectDescriptors};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Scans Java sources for `@Desc` annotated type declarations
pub struct DescScanner {
    config: ScanConfig,
    metrics: Mutex<ScanMetrics>,
}

impl DescScanner {
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    pub fn with_config(config: ScanConfig) -> Self {
        Self {
            config,
            metrics: Mutex::new(ScanMetrics::default()),
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Snapshot of the metrics collected so far
    pub fn metrics(&self) -> ScanMetrics {
        self.lock_metrics().clone()
    }

    pub fn reset_metrics(&mut self) {
        *self.lock_metrics() = ScanMetrics::default();
    }

    /// Whether `path` looks like a Java source file
    pub fn can_scan(&self, path: &Path) -> bool {
        path.extension().and_then(|ext| ext.to_str()) == Some("java")
    }

    fn lock_metrics(&self) -> MutexGuard<'_, ScanMetrics> {
        // metrics are plain counters, still usable after a panicking writer
        self.metrics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn update_metrics(&self, result: Option<&FileDescriptors>, duration: Duration) {
        let mut metrics = self.lock_metrics();
        metrics.files_attempted += 1;
        metrics.total_scan_time += duration;
        match result {
            Some(info) => {
                metrics.files_succeeded += 1;
                metrics.declarations_scanned += info.declarations_scanned;
                metrics.descriptors_found += info.descriptors.len();
                metrics.malformed_descriptors += info.failures.len();
            }
            None => metrics.files_failed += 1,
        }
    }

    /// Read and scan one file
    pub fn scan_file(&self, path: &Path) -> ScanResult<FileDescriptors> {
        let start = Instant::now();
        let result = self.read_and_scan(path);
        self.update_metrics(result.as_ref().ok(), start.elapsed());
        result
    }

    fn read_and_scan(&self, path: &Path) -> ScanResult<FileDescriptors> {
        let metadata = fs::metadata(path).map_err(|e| ScanError::IoError(path.to_path_buf(), e))?;

        if exceeds_limit(metadata.len(), self.config.max_file_size) {
            return Err(ScanError::FileTooLarge(
                path.to_path_buf(),
                usize::try_from(metadata.len()).unwrap_or(usize::MAX),
            ));
        }

        let source =
            fs::read_to_string(path).map_err(|e| ScanError::IoError(path.to_path_buf(), e))?;
        self.scan(&source, path)
    }

    /// Scan in-memory source; `file_path` is only used for reporting
    pub fn scan_source(&self, source: &str, file_path: &Path) -> ScanResult<FileDescriptors> {
        let start = Instant::now();
        let result = self.scan(source, file_path);
        self.update_metrics(result.as_ref().ok(), start.elapsed());
        result
    }

    fn scan(&self, source: &str, file_path: &Path) -> ScanResult<FileDescriptors> {
        let start = Instant::now();
        let unit = parse_compilation_unit(source, file_path, &self.config)?;
        let (descriptors, failures) = extract_descriptors(&unit);

        debug!(
            "scanned {}: {} declarations, {} @Desc records, {} malformed",
            file_path.display(),
            unit.declarations.len(),
            descriptors.len(),
            failures.len()
        );

        Ok(FileDescriptors {
            file_path: file_path.to_path_buf(),
            package: unit.package,
            declarations_scanned: unit.declarations.len(),
            descriptors,
            failures,
            parse_time: start.elapsed(),
            line_count: unit.line_count,
            byte_count: source.len(),
        })
    }

    /// Scan many files; a failing file never aborts the others
    pub fn scan_files(&self, paths: &[PathBuf]) -> ScanResult<ProjectDescriptors> {
        let results = if self.config.parallel {
            self.scan_files_parallel(paths)?
        } else {
            paths
                .iter()
                .map(|path| (path.clone(), self.scan_file(path)))
                .collect()
        };

        Ok(collect_project(results))
    }

    /// Scan files in parallel using rayon
    fn scan_files_parallel(
        &self,
        paths: &[PathBuf],
    ) -> ScanResult<Vec<(PathBuf, ScanResult<FileDescriptors>)>> {
        use rayon::prelude::*;

        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(num_threads) = self.config.parallel_workers {
            builder = builder.num_threads(num_threads);
        }
        let pool = builder
            .build()
            .map_err(|e| ScanError::ThreadPool(e.to_string()))?;

        Ok(pool.install(|| {
            paths
                .par_iter()
                .map(|path| (path.clone(), self.scan_file(path)))
                .collect()
        }))
    }
}

impl Default for DescScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_project(results: Vec<(PathBuf, ScanResult<FileDescriptors>)>) -> ProjectDescriptors {
    let mut files = Vec::new();
    let mut failed_files = Vec::new();
    let mut total_descriptors = 0;
    let mut total_parse_time = Duration::ZERO;

    for (path, result) in results {
        match result {
            Ok(info) => {
                total_descriptors += info.descriptors.len();
                total_parse_time += info.parse_time;
                files.push(info);
            }
            Err(e) => {
                failed_files.push((path, e.to_string()));
            }
        }
    }

    ProjectDescriptors {
        files,
        failed_files,
        total_descriptors,
        total_parse_time,
    }
}

/// Compare in `u64` so sizes above `usize::MAX` on 32-bit targets still count.
fn exceeds_limit(file_size: u64, max_file_size: usize) -> bool {
    file_size > max_file_size as u64
}
