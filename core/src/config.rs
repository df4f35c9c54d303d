use std::fmt;
use std::str::FromStr;

use image::imageops::FilterType;

pub const DEFAULT_REFERENCE: &str = "gaenari.jpg";
pub const DEFAULT_QUALITY: u8 = 95;

/// Resampling filter used for the proportional resize step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResampleFilter {
    pub fn to_filter_type(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => write!(f, "nearest"),
            Self::Triangle => write!(f, "triangle"),
            Self::CatmullRom => write!(f, "catmull-rom"),
            Self::Gaussian => write!(f, "gaussian"),
            Self::Lanczos3 => write!(f, "lanczos3"),
        }
    }
}

impl FromStr for ResampleFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "triangle" | "bilinear" => Ok(Self::Triangle),
            "catmull-rom" | "catmullrom" | "bicubic" => Ok(Self::CatmullRom),
            "gaussian" => Ok(Self::Gaussian),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            _ => Err(format!("unknown resample filter: {s}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    /// File name of the image whose size every output takes
    pub reference_name: String,
    /// JPEG quality 0-100
    pub quality: u8,
    /// Filter for the resize step
    pub filter: ResampleFilter,
    /// Leave the reference image itself out of the batch
    pub exclude_reference: bool,
    /// Dry run - plan crops but don't write anything
    pub dry_run: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            reference_name: DEFAULT_REFERENCE.to_string(),
            quality: DEFAULT_QUALITY,
            filter: ResampleFilter::Lanczos3,
            exclude_reference: false,
            dry_run: false,
        }
    }
}
