use std::path::Path;

/// File types a batch will pick up. Anything else in the input folder is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpg,
    Png,
    Gif,
    Bmp,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "bmp" => Some(ImageFormat::Bmp),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Jpg => "JPEG",
            ImageFormat::Png => "PNG",
            ImageFormat::Gif => "GIF",
            ImageFormat::Bmp => "BMP",
        }
    }

    /// Whether the encoder takes a lossy quality setting.
    pub fn supports_quality(&self) -> bool {
        matches!(self, ImageFormat::Jpg)
    }

    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Jpg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_is_case_insensitive() {
        assert_eq!(ImageFormat::from_path(Path::new("a.JPG")), Some(ImageFormat::Jpg));
        assert_eq!(ImageFormat::from_path(Path::new("a.Jpeg")), Some(ImageFormat::Jpg));
        assert_eq!(ImageFormat::from_path(Path::new("b.PNG")), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_path(Path::new("c.gif")), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::from_path(Path::new("d.bmp")), Some(ImageFormat::Bmp));
    }

    #[test]
    fn test_from_path_rejects_other_files() {
        assert_eq!(ImageFormat::from_path(Path::new("notes.txt")), None);
        assert_eq!(ImageFormat::from_path(Path::new("photo.webp")), None);
        assert_eq!(ImageFormat::from_path(Path::new("README")), None);
        assert_eq!(ImageFormat::from_path(Path::new("questions.json")), None);
    }

    #[test]
    fn test_only_jpeg_takes_quality() {
        assert!(ImageFormat::Jpg.supports_quality());
        assert!(!ImageFormat::Png.supports_quality());
        assert!(!ImageFormat::Gif.supports_quality());
        assert!(!ImageFormat::Bmp.supports_quality());
    }
}
