//! Batch orchestration: resolve the reference size once, then crop-resize
//! every supported file of the input folder into the output folder.
//!
//! A failure on one file is recorded and the batch moves on; only a missing
//! reference image stops the run, and it does so before any file is touched.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::ImageReader;
use rayon::prelude::*;
use serde::Serialize;

use crate::config::NormalizeConfig;
use crate::error::NormalizeError;
use crate::format::ImageFormat;
use crate::geometry::{plan_crop, CropPlan, Dimensions};
use crate::io::{collect_images, ensure_dir, read_file, write_file};
use crate::normalize::{encode, fit_to_target};
use crate::reference::resolve_reference;

/// One input file and where its normalized copy goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl BatchEntry {
    pub fn file_name(&self) -> String {
        self.input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.display().to_string())
    }
}

#[derive(Debug, Clone)]
pub struct BatchJob {
    pub output_dir: PathBuf,
    pub target: Dimensions,
    pub entries: Vec<BatchEntry>,
}

impl BatchJob {
    /// Resolve the reference and list every file to process.
    pub fn plan(
        input_dir: &Path,
        output_dir: &Path,
        config: &NormalizeConfig,
    ) -> Result<Self, NormalizeError> {
        let target = resolve_reference(input_dir, &config.reference_name)?;

        let entries = collect_images(input_dir)?
            .into_iter()
            .filter(|path| {
                !(config.exclude_reference
                    && path.file_name().is_some_and(|n| n == config.reference_name.as_str()))
            })
            .filter_map(|input| {
                let name = input.file_name()?.to_owned();
                Some(BatchEntry {
                    output: output_dir.join(name),
                    input,
                })
            })
            .collect();

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            target,
            entries,
        })
    }
}

/// What happened to a single file.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub source: Dimensions,
    pub plan: CropPlan,
    /// False on a dry run.
    pub written: bool,
}

/// Applies the crop-resize for a fixed target size.
#[derive(Debug, Clone)]
pub struct Normalizer {
    target: Dimensions,
    config: NormalizeConfig,
}

impl Normalizer {
    pub fn new(target: Dimensions, config: NormalizeConfig) -> Self {
        Self { target, config }
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Read, transform and write one file. The decoded image is dropped
    /// before returning, on success or error.
    pub fn process(&self, entry: &BatchEntry) -> Result<FileOutcome, NormalizeError> {
        let format = ImageFormat::from_path(&entry.output).ok_or_else(|| {
            NormalizeError::UnsupportedFormat(
                entry
                    .output
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "unknown".into()),
            )
        })?;

        let data = read_file(&entry.input)?;

        if self.config.dry_run {
            let (width, height) = ImageReader::new(Cursor::new(&data))
                .with_guessed_format()
                .map_err(|e| NormalizeError::Decode(e.to_string()))?
                .into_dimensions()
                .map_err(|e| NormalizeError::Decode(e.to_string()))?;
            let source = Dimensions::new(width, height);
            return Ok(FileOutcome {
                source,
                plan: plan_crop(source, self.target)?,
                written: false,
            });
        }

        let img =
            image::load_from_memory(&data).map_err(|e| NormalizeError::Decode(e.to_string()))?;
        let source = Dimensions::from((img.width(), img.height()));
        let plan = plan_crop(source, self.target)?;

        let fitted = fit_to_target(&img, self.target, self.config.filter)?;
        drop(img);

        let bytes = encode(&fitted, format, self.config.quality)?;
        write_file(&entry.output, &bytes)?;

        Ok(FileOutcome {
            source,
            plan,
            written: true,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessedFile {
    pub path: PathBuf,
    pub output: PathBuf,
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub output: PathBuf,
    pub error: String,
}

/// Per-file results of a run, in entry order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub target: Dimensions,
    pub processed: Vec<ProcessedFile>,
    pub failed: Vec<FailedFile>,
}

impl BatchSummary {
    pub fn new(target: Dimensions) -> Self {
        Self {
            target,
            processed: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn record(&mut self, entry: &BatchEntry, result: Result<FileOutcome, NormalizeError>) {
        match result {
            Ok(outcome) => self.processed.push(ProcessedFile {
                path: entry.input.clone(),
                output: entry.output.clone(),
                outcome,
            }),
            Err(e) => self.failed.push(FailedFile {
                path: entry.input.clone(),
                output: entry.output.clone(),
                error: e.to_string(),
            }),
        }
    }
}

fn log_outcome(entry: &BatchEntry, result: &Result<FileOutcome, NormalizeError>) {
    match result {
        Ok(outcome) if outcome.written => log::info!("processed {}", entry.file_name()),
        Ok(outcome) => log::info!(
            "would process {} ({} → crop at {},{})",
            entry.file_name(),
            outcome.source,
            outcome.plan.left,
            outcome.plan.top
        ),
        Err(e) => log::error!("error processing {}: {}", entry.file_name(), e),
    }
}

fn prepare(job: &BatchJob, normalizer: &Normalizer) {
    log::info!("target size: {}", job.target);
    if !normalizer.config().dry_run {
        if let Err(e) = ensure_dir(&job.output_dir) {
            // Every write will report this again per file.
            log::error!("{}", e);
        }
    }
}

fn process_entry(
    normalizer: &Normalizer,
    entry: &BatchEntry,
) -> Result<FileOutcome, NormalizeError> {
    let result = normalizer.process(entry);
    log_outcome(entry, &result);
    result
}

fn finish(summary: BatchSummary) -> BatchSummary {
    log::info!(
        "finished: {} processed, {} failed",
        summary.processed.len(),
        summary.failed.len()
    );
    summary
}

/// Process every entry in order, one file at a time.
///
/// `observer` sees each entry's result right after it is processed.
pub fn run<F>(job: &BatchJob, normalizer: &Normalizer, mut observer: F) -> BatchSummary
where
    F: FnMut(&BatchEntry, &Result<FileOutcome, NormalizeError>),
{
    prepare(job, normalizer);

    let mut summary = BatchSummary::new(job.target);
    for entry in &job.entries {
        let result = process_entry(normalizer, entry);
        observer(entry, &result);
        summary.record(entry, result);
    }
    finish(summary)
}

/// Same as [`run`], with entries spread over the rayon pool.
///
/// `observer` is called from worker threads in completion order; the summary
/// still lists files in entry order.
pub fn run_parallel<F>(job: &BatchJob, normalizer: &Normalizer, observer: F) -> BatchSummary
where
    F: Fn(&BatchEntry, &Result<FileOutcome, NormalizeError>) + Sync,
{
    prepare(job, normalizer);

    let results: Vec<_> = job
        .entries
        .par_iter()
        .map(|entry| {
            let result = process_entry(normalizer, entry);
            observer(entry, &result);
            result
        })
        .collect();

    let mut summary = BatchSummary::new(job.target);
    for (entry, result) in job.entries.iter().zip(results) {
        summary.record(entry, result);
    }
    finish(summary)
}
