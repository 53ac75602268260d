//! Scan results for files and projects

use crate::binding::JavaType;
use crate::declaration::DeclarationKind;
use mixin_desc::{DescError, DescRecord};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// A `@Desc` record found on one type declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationDescriptor {
    /// Binary name of the annotated declaration
    pub declaration: String,

    pub kind: DeclarationKind,

    /// Starting line number (1-indexed)
    pub line_start: usize,

    /// Ending line number (1-indexed)
    pub line_end: usize,

    pub record: DescRecord<JavaType>,
}

/// A declaration whose `@Desc` annotation could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationFailure {
    pub declaration: String,

    pub line_start: usize,

    pub error: DescError,
}

/// Everything found in one source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptors {
    /// Path to the source file
    pub file_path: PathBuf,

    pub package: Option<String>,

    /// Number of type declarations looked at
    pub declarations_scanned: usize,

    pub descriptors: Vec<DeclarationDescriptor>,

    pub failures: Vec<DeclarationFailure>,

    /// Time taken to scan this file
    #[serde(with = "duration_serde")]
    pub parse_time: Duration,

    /// Number of lines in the file
    pub line_count: usize,

    /// File size in bytes
    pub byte_count: usize,
}

impl FileDescriptors {
    /// Descriptor for a declaration, by binary name
    pub fn descriptor_for(&self, declaration: &str) -> Option<&DeclarationDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.declaration == declaration)
    }
}

/// Aggregate results for a set of files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDescriptors {
    /// Results for each successfully scanned file
    pub files: Vec<FileDescriptors>,

    /// Files that failed to scan (path, error message)
    pub failed_files: Vec<(PathBuf, String)>,

    pub total_descriptors: usize,

    /// Total scan time for all files
    #[serde(with = "duration_serde")]
    pub total_parse_time: Duration,
}

impl ProjectDescriptors {
    /// Total number of files processed (success + failure)
    pub fn total_files(&self) -> usize {
        self.files.len() + self.failed_files.len()
    }

    /// Success rate (0.0 to 1.0)
    pub fn success_rate(&self) -> f64 {
        if self.total_files() == 0 {
            0.0
        } else {
            self.files.len() as f64 / self.total_files() as f64
        }
    }

    /// Average scan time per file
    pub fn avg_parse_time(&self) -> Duration {
        if self.files.is_empty() {
            Duration::ZERO
        } else {
            self.total_parse_time / self.files.len() as u32
        }
    }

    /// All descriptors across files, in file order
    pub fn descriptors(&self) -> impl Iterator<Item = &DeclarationDescriptor> {
        self.files.iter().flat_map(|file| file.descriptors.iter())
    }
}

// Helper module for serializing Duration
pub(crate) mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs_f64().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, descriptors: usize) -> FileDescriptors {
        FileDescriptors {
            file_path: PathBuf::from(path),
            package: None,
            declarations_scanned: descriptors,
            descriptors: (0..descriptors)
                .map(|i| DeclarationDescriptor {
                    declaration: format!("T{i}"),
                    kind: DeclarationKind::Class,
                    line_start: 1,
                    line_end: 1,
                    record: DescRecord::default(),
                })
                .collect(),
            failures: Vec::new(),
            parse_time: Duration::from_secs(2),
            line_count: 1,
            byte_count: 10,
        }
    }

    #[test]
    fn test_project_aggregates() {
        let project = ProjectDescriptors {
            files: vec![file("A.java", 1), file("B.java", 2)],
            failed_files: vec![(PathBuf::from("C.java"), "boom".to_string())],
            total_descriptors: 3,
            total_parse_time: Duration::from_secs(4),
        };

        assert_eq!(project.total_files(), 3);
        assert!((project.success_rate() - 2.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(project.avg_parse_time(), Duration::from_secs(2));
        assert_eq!(project.descriptors().count(), 3);
    }

    #[test]
    fn test_empty_project() {
        let project = ProjectDescriptors {
            files: Vec::new(),
            failed_files: Vec::new(),
            total_descriptors: 0,
            total_parse_time: Duration::ZERO,
        };
        assert_eq!(project.success_rate(), 0.0);
        assert_eq!(project.avg_parse_time(), Duration::ZERO);
    }

    #[test]
    fn test_sub_second_durations_serialize() {
        let mut info = file("A.java", 0);
        info.parse_time = Duration::from_micros(1_500);

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["parse_time"], serde_json::json!(0.0015));

        let back: FileDescriptors = serde_json::from_value(json).unwrap();
        assert_eq!(back.parse_time, Duration::from_micros(1_500));
    }

    #[test]
    fn test_negative_duration_rejected() {
        let mut json = serde_json::to_value(file("A.java", 0)).unwrap();
        json["parse_time"] = serde_json::json!(-1.0);
        assert!(serde_json::from_value::<FileDescriptors>(json).is_err());
    }

    #[test]
    fn test_descriptor_for() {
        let file = file("A.java", 2);
        assert!(file.descriptor_for("T1").is_some());
        assert!(file.descriptor_for("T9").is_none());
    }
}
