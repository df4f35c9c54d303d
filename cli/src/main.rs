use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use image_normalizer::cli::{Cli, Command};
use image_normalizer::logging;
use image_normalizer::report::Report;
use image_normalizer_core::batch::{self, BatchEntry, BatchJob, FileOutcome, Normalizer};
use image_normalizer_core::config::NormalizeConfig;
use image_normalizer_core::geometry::{plan_crop, Dimensions};
use image_normalizer_core::io::collect_images;
use image_normalizer_core::reference::resolve_reference;
use image_normalizer_core::NormalizeError;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hidden until a batch starts; the logger suspends it around each record
    let pb = ProgressBar::hidden();

    // Init logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    logging::init(log_level, pb.clone()).context("Failed to install logger")?;

    match &cli.command {
        Command::Normalize {
            input,
            output,
            reference,
            quality,
            filter,
            exclude_reference,
            parallel,
            dry_run,
            json,
        } => {
            let config = cli.to_config(reference, *quality, *filter, *exclude_reference, *dry_run);
            handle_normalize(input, output, config, *parallel, *json, &pb)
        }
        Command::Inspect { input, reference } => handle_inspect(input, reference),
    }
}

fn show_progress(pb: &ProgressBar, len: usize) -> Result<()> {
    pb.set_length(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    pb.set_draw_target(ProgressDrawTarget::stderr());
    Ok(())
}

fn handle_normalize(
    input: &Path,
    output: &Path,
    config: NormalizeConfig,
    parallel: bool,
    json: bool,
    pb: &ProgressBar,
) -> Result<()> {
    let job = BatchJob::plan(input, output, &config)
        .with_context(|| format!("Failed to prepare batch for {}", input.display()))?;

    if !json {
        println!("Found {} file(s) to process.", job.entries.len());
        show_progress(pb, job.entries.len())?;
    }

    let normalizer = Normalizer::new(job.target, config);
    let tick = |entry: &BatchEntry, _: &Result<FileOutcome, NormalizeError>| {
        pb.set_message(entry.file_name());
        pb.inc(1);
    };

    let summary = if parallel {
        batch::run_parallel(&job, &normalizer, tick)
    } else {
        batch::run(&job, &normalizer, tick)
    };

    pb.finish_with_message("Done!");

    let report = Report::from_summary(&summary);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print_summary();
        println!("All images processed.");
    }

    Ok(())
}

fn handle_inspect(input: &Path, reference: &str) -> Result<()> {
    let target = resolve_reference(input, reference)
        .with_context(|| format!("Failed to read reference image in {}", input.display()))?;
    println!("Reference {}: {}", reference, target);

    let files = collect_images(input).context("Failed to collect input files")?;

    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let source = match image::image_dimensions(path) {
            Ok(dims) => Dimensions::from(dims),
            Err(e) => {
                println!("  {name}: unreadable ({e})");
                continue;
            }
        };

        match plan_crop(source, target) {
            Ok(plan) if plan.is_identity(source) => println!("  {name}: {source} (already normalized)"),
            Ok(plan) => println!(
                "  {name}: {source} → scale {} → crop at ({}, {})",
                plan.scaled, plan.left, plan.top
            ),
            Err(e) => println!("  {name}: {source} ({e})"),
        }
    }

    Ok(())
}
