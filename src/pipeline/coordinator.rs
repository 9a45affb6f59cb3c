//! Discovery of input media.

use crate::constants::extensions;
use crate::error::Result;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Kind of input the shell offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Still images.
    Image,
    /// Video files.
    Video,
}

impl MediaKind {
    /// Extensions accepted for this kind.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Image => extensions::IMAGE,
            Self::Video => extensions::VIDEO,
        }
    }

    /// Check if a path has an extension of this kind (case-insensitive).
    pub fn matches(self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| {
            // Compare as OsStr to handle non-UTF-8 filenames
            self.extensions()
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(OsStr::new(accepted)))
        })
    }
}

/// List files of `kind` directly inside `dir`, sorted by name.
///
/// A missing directory yields an empty list.
pub fn list_media(dir: &Path, kind: MediaKind) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        warn!("Input directory does not exist: {}", dir.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && kind.matches(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// File name for menus, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_image_extensions() {
        assert!(MediaKind::Image.matches(Path::new("car.jpg")));
        assert!(MediaKind::Image.matches(Path::new("car.JPEG")));
        assert!(MediaKind::Image.matches(Path::new("car.png")));
        assert!(!MediaKind::Image.matches(Path::new("car.gif")));
        assert!(!MediaKind::Image.matches(Path::new("car")));
    }

    #[test]
    fn test_video_extensions() {
        assert!(MediaKind::Video.matches(Path::new("drive.mp4")));
        assert!(MediaKind::Video.matches(Path::new("drive.MOV")));
        assert!(MediaKind::Video.matches(Path::new("drive.avi")));
        assert!(!MediaKind::Video.matches(Path::new("drive.mkv")));
    }

    #[test]
    fn test_unicode_names() {
        assert!(MediaKind::Image.matches(Path::new("ääni_kuva.jpg")));
        assert!(MediaKind::Video.matches(Path::new("テスト.mp4")));
    }

    #[test]
    fn test_list_media_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.png", "a.jpg", "notes.txt", "c.mp4"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.jpg")).unwrap();

        let images = list_media(dir.path(), MediaKind::Image).unwrap();
        let names: Vec<_> = images.iter().map(|p| display_name(p)).collect();
        assert_eq!(names, ["a.jpg", "b.png"]);

        let videos = list_media(dir.path(), MediaKind::Video).unwrap();
        assert_eq!(videos.len(), 1);
    }

    #[test]
    fn test_list_media_missing_dir() {
        let files = list_media(Path::new("/nonexistent/img"), MediaKind::Image).unwrap();
        assert!(files.is_empty());
    }
}
