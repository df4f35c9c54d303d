use std::path::PathBuf;

use serde::Serialize;

use image_normalizer_core::batch::{FailedFile, ProcessedFile};
use image_normalizer_core::geometry::Dimensions;
use image_normalizer_core::BatchSummary;

/// Result of processing a single file.
#[derive(Debug, Serialize)]
pub struct FileResult {
    pub path: PathBuf,
    pub output: PathBuf,
    pub source: Option<Dimensions>,
    pub cropped: bool,
    pub written: bool,
    pub error: Option<String>,
}

impl From<&ProcessedFile> for FileResult {
    fn from(file: &ProcessedFile) -> Self {
        let plan = &file.outcome.plan;
        Self {
            path: file.path.clone(),
            output: file.output.clone(),
            source: Some(file.outcome.source),
            // Any overflow counts, even when the centered offset rounds to 0
            cropped: plan.scaled != plan.output(),
            written: file.outcome.written,
            error: None,
        }
    }
}

impl From<&FailedFile> for FileResult {
    fn from(file: &FailedFile) -> Self {
        Self {
            path: file.path.clone(),
            output: file.output.clone(),
            source: None,
            cropped: false,
            written: false,
            error: Some(file.error.clone()),
        }
    }
}

/// Aggregate report for all processed files.
#[derive(Debug, Serialize)]
pub struct Report {
    pub target: Dimensions,
    pub results: Vec<FileResult>,
}

impl Report {
    /// Build from a run summary, ordered by input path.
    pub fn from_summary(summary: &BatchSummary) -> Self {
        let mut results: Vec<FileResult> = summary
            .processed
            .iter()
            .map(FileResult::from)
            .chain(summary.failed.iter().map(FileResult::from))
            .collect();
        results.sort_by(|a, b| a.path.cmp(&b.path));
        Self {
            target: summary.target,
            results,
        }
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_none()).count()
    }

    pub fn error_count(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_some()).count()
    }

    pub fn cropped_count(&self) -> usize {
        self.results.iter().filter(|r| r.cropped).count()
    }

    pub fn print_summary(&self) {
        println!("\n--- Summary ---");
        println!("Target size: {}", self.target);
        println!(
            "Files processed: {} | Cropped: {} | Errors: {}",
            self.success_count(),
            self.cropped_count(),
            self.error_count()
        );

        for r in &self.results {
            if let Some(ref err) = r.error {
                println!("  ERROR {}: {}", r.path.display(), err);
            }
        }
    }
}
