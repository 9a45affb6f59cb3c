//! Configuration type definitions.

use crate::constants::{annotation, api, paths, video};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Recognition API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Input and output directories.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Annotation drawing settings.
    #[serde(default)]
    pub annotation: AnnotationConfig,

    /// Video decoding settings.
    #[serde(default)]
    pub video: VideoConfig,
}

/// Recognition API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Recognition endpoint URL (without query string).
    pub endpoint: String,

    /// Country code passed to the recognizer.
    pub country: String,

    /// API credential. Usually supplied through `API_KEY` instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    /// Request timeout in seconds. Library default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: api::DEFAULT_ENDPOINT.to_string(),
            country: api::DEFAULT_COUNTRY.to_string(),
            secret_key: None,
            timeout_secs: None,
        }
    }
}

/// Input and output directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory listed for still images.
    pub images: PathBuf,

    /// Directory listed for videos.
    pub videos: PathBuf,

    /// Directory receiving annotated copies.
    pub results: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            images: PathBuf::from(paths::IMAGES_DIR),
            videos: PathBuf::from(paths::VIDEOS_DIR),
            results: PathBuf::from(paths::RESULTS_DIR),
        }
    }
}

/// Annotation drawing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Preferred TrueType font file.
    pub font: PathBuf,

    /// Preferred font pixel height.
    pub font_size: f32,

    /// Outline stroke width in pixels.
    pub stroke_width: u32,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            font: PathBuf::from(annotation::DEFAULT_FONT),
            font_size: annotation::DEFAULT_FONT_SIZE,
            stroke_width: annotation::DEFAULT_STROKE_WIDTH,
        }
    }
}

/// Video decoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// ffmpeg executable used to decode frames.
    pub ffmpeg: PathBuf,

    /// ffprobe executable used to read stream metadata.
    pub ffprobe: PathBuf,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from(video::DEFAULT_FFMPEG),
            ffprobe: PathBuf::from(video::DEFAULT_FFPROBE),
        }
    }
}
