use std::path::PathBuf;

use clap::{Parser, Subcommand};

use image_normalizer_core::config::{NormalizeConfig, ResampleFilter, DEFAULT_REFERENCE};

pub const DEFAULT_INPUT: &str = "images";
pub const DEFAULT_OUTPUT: &str = "images_resized";

/// Crop and resize a folder of quiz images to the size of one reference image
#[derive(Debug, Parser)]
#[command(name = "image_normalizer", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resize and center-crop every image to the reference size
    Normalize {
        /// Input directory (must contain the reference image)
        #[arg(default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Output directory, created if missing
        #[arg(default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// File name of the reference image inside the input directory
        #[arg(short, long, default_value = DEFAULT_REFERENCE)]
        reference: String,

        /// JPEG quality 0–100
        #[arg(short, long, default_value_t = 95, value_parser = clap::value_parser!(u8).range(0..=100))]
        quality: u8,

        /// Resampling filter (nearest, triangle, catmull-rom, gaussian, lanczos3)
        #[arg(short, long, default_value_t = ResampleFilter::Lanczos3)]
        filter: ResampleFilter,

        /// Skip the reference image instead of re-saving it
        #[arg(long)]
        exclude_reference: bool,

        /// Process files on a thread pool
        #[arg(short, long)]
        parallel: bool,

        /// Show the crop plan for each file without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the target size and each file's crop plan
    Inspect {
        /// Input directory (must contain the reference image)
        #[arg(default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// File name of the reference image inside the input directory
        #[arg(short, long, default_value = DEFAULT_REFERENCE)]
        reference: String,
    },
}

impl Cli {
    pub fn to_config(
        &self,
        cmd_reference: &str,
        cmd_quality: u8,
        cmd_filter: ResampleFilter,
        cmd_exclude_reference: bool,
        cmd_dry_run: bool,
    ) -> NormalizeConfig {
        NormalizeConfig {
            reference_name: cmd_reference.to_string(),
            quality: cmd_quality,
            filter: cmd_filter,
            exclude_reference: cmd_exclude_reference,
            dry_run: cmd_dry_run,
        }
    }
}
