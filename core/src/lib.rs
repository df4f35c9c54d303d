//! Aspect-preserving normalization of an image folder to one reference size.
//!
//! [`batch::BatchJob::plan`] reads the reference image's size, then
//! [`batch::run`] (or [`batch::run_parallel`]) scales each image so it covers
//! that size and center-crops the overflow.

pub mod batch;
pub mod config;
pub mod error;
pub mod format;
pub mod geometry;
pub mod io;
pub mod normalize;
pub mod reference;

pub use batch::{BatchEntry, BatchJob, BatchSummary, FileOutcome, Normalizer, ProcessedFile};
pub use config::{NormalizeConfig, ResampleFilter};
pub use error::NormalizeError;
pub use geometry::{plan_crop, CropPlan, Dimensions};
