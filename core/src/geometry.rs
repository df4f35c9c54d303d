//! Crop rectangle arithmetic for the resize-then-center-crop transform.
//!
//! Everything here is pure: no pixels, no I/O. Ratios are compared by
//! cross-multiplying in `u64` and the scaled edge is floor-divided from the
//! same products, so an exact aspect match always lands on the zero-offset
//! path and the scaled edge never drops below the target.

use serde::Serialize;

use crate::error::NormalizeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    fn validate(self) -> Result<Self, NormalizeError> {
        if self.width == 0 || self.height == 0 {
            return Err(NormalizeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Which axis of the source gets pinned to the target during the resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitAxis {
    /// Source is relatively wider: height matches, crop trims left/right.
    Height,
    /// Source is relatively taller or equal: width matches, crop trims top/bottom.
    Width,
}

/// Resize target plus the centered crop rectangle inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropPlan {
    pub axis: FitAxis,
    pub scaled: Dimensions,
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl CropPlan {
    pub fn output(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Crop rectangle lies fully inside the scaled image.
    pub fn contains_crop(&self) -> bool {
        self.left as u64 + self.width as u64 <= self.scaled.width as u64
            && self.top as u64 + self.height as u64 <= self.scaled.height as u64
    }

    /// No resampling and no trimming needed for a source of this size.
    pub fn is_identity(&self, source: Dimensions) -> bool {
        self.scaled == source && self.left == 0 && self.top == 0 && self.scaled == self.output()
    }
}

fn to_u32(value: u64, source: Dimensions) -> Result<u32, NormalizeError> {
    u32::try_from(value).map_err(|_| NormalizeError::InvalidDimensions {
        width: source.width,
        height: source.height,
    })
}

fn fit_height(source: Dimensions, target: Dimensions) -> Result<CropPlan, NormalizeError> {
    let scaled_width = target.height as u64 * source.width as u64 / source.height as u64;
    let scaled_width = to_u32(scaled_width, source)?;
    Ok(CropPlan {
        axis: FitAxis::Height,
        scaled: Dimensions::new(scaled_width, target.height),
        left: (scaled_width - target.width) / 2,
        top: 0,
        width: target.width,
        height: target.height,
    })
}

fn fit_width(source: Dimensions, target: Dimensions) -> Result<CropPlan, NormalizeError> {
    let scaled_height = target.width as u64 * source.height as u64 / source.width as u64;
    let scaled_height = to_u32(scaled_height, source)?;
    Ok(CropPlan {
        axis: FitAxis::Width,
        scaled: Dimensions::new(target.width, scaled_height),
        left: 0,
        top: (scaled_height - target.height) / 2,
        width: target.width,
        height: target.height,
    })
}

/// Plan the resize + center crop that turns `source` into exactly `target`.
///
/// A source wider than the target (by aspect ratio) is scaled to the target
/// height and trimmed horizontally; anything else is scaled to the target
/// width and trimmed vertically. The scaled edge is truncated, never rounded
/// up, so it stays within one pixel of the exact ratio.
///
/// # Examples
/// ```
/// # use image_normalizer_core::geometry::{plan_crop, Dimensions};
/// // 16:9 into 4:3 → height 600, width 1066, trim 133px on the left
/// let plan = plan_crop(Dimensions::new(1600, 900), Dimensions::new(800, 600)).unwrap();
/// assert_eq!(plan.scaled, Dimensions::new(1066, 600));
/// assert_eq!((plan.left, plan.top), (133, 0));
/// ```
pub fn plan_crop(source: Dimensions, target: Dimensions) -> Result<CropPlan, NormalizeError> {
    let source = source.validate()?;
    let target = target.validate()?;

    let source_wider = source.width as u64 * target.height as u64
        > target.width as u64 * source.height as u64;

    if source_wider {
        fit_height(source, target)
    } else {
        fit_width(source, target)
    }
}
