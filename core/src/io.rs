use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::NormalizeError;
use crate::format::ImageFormat;

/// Collect the supported image files directly inside `dir`, sorted by name.
/// Subdirectories are not entered; symlinks to files count as files.
pub fn collect_images(dir: &Path) -> Result<Vec<PathBuf>, NormalizeError> {
    if !dir.is_dir() {
        return Err(NormalizeError::ReadFile {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let files: Result<Vec<_>, _> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| {
            let entry = match entry {
                Ok(e) => e,
                // A bad entry (e.g. a dangling link) only costs that file
                Err(e) if e.depth() > 0 => {
                    let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                    log::warn!("skipping {}: {}", path, e);
                    return None;
                }
                Err(e) => return Some(Err(NormalizeError::from(e))),
            };
            if !entry.file_type().is_file() {
                return None;
            }
            let path = entry.into_path();
            if ImageFormat::from_path(&path).is_some() {
                Some(Ok(path))
            } else {
                None
            }
        })
        .collect();

    files
}

/// Create `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> Result<(), NormalizeError> {
    fs::create_dir_all(dir).map_err(|e| NormalizeError::WriteFile {
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Read file contents.
pub fn read_file(path: &Path) -> Result<Vec<u8>, NormalizeError> {
    fs::read(path).map_err(|e| NormalizeError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write file contents, creating parent directories as needed.
pub fn write_file(path: &Path, data: &[u8]) -> Result<(), NormalizeError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, data).map_err(|e| NormalizeError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}
