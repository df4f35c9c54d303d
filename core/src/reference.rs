use std::path::Path;

use crate::error::NormalizeError;
use crate::geometry::Dimensions;

/// Read the size of the reference image `name` inside `dir`.
///
/// Only the header is decoded; the file is never modified.
pub fn resolve_reference(dir: &Path, name: &str) -> Result<Dimensions, NormalizeError> {
    let path = dir.join(name);
    if !path.is_file() {
        return Err(NormalizeError::ReferenceNotFound {
            name: name.to_string(),
            dir: dir.to_path_buf(),
        });
    }

    let (width, height) = image::image_dimensions(&path)
        .map_err(|e| NormalizeError::Decode(format!("{}: {}", path.display(), e)))?;

    if width == 0 || height == 0 {
        return Err(NormalizeError::InvalidDimensions { width, height });
    }
    let dims = Dimensions::new(width, height);

    log::debug!("reference {} is {}", path.display(), dims);
    Ok(dims)
}
