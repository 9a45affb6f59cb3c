//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "platescan";

/// Environment variable holding the recognition API credential.
pub const API_KEY_ENV: &str = "API_KEY";

/// Recognition API constants.
pub mod api {
    /// Default recognition endpoint.
    pub const DEFAULT_ENDPOINT: &str = "https://api.openalpr.com/v1/recognize";

    /// Default country code sent with every request.
    pub const DEFAULT_COUNTRY: &str = "us";

    /// Task selector; only plate recognition is requested.
    pub const TASKS: &str = "plate";

    /// Vehicle recognition flag (disabled).
    pub const RECOGNIZE_VEHICLE: &str = "0";

    /// Multipart field carrying the image bytes.
    pub const IMAGE_FIELD: &str = "image";
}

/// Default input and output directories, relative to the working directory.
pub mod paths {
    /// Directory scanned for still images.
    pub const IMAGES_DIR: &str = "img";

    /// Directory scanned for videos.
    pub const VIDEOS_DIR: &str = "vid";

    /// Directory receiving annotated images.
    pub const RESULTS_DIR: &str = "results";
}

/// Supported input file extensions.
pub mod extensions {
    /// Still image extensions.
    pub const IMAGE: &[&str] = &["jpg", "jpeg", "png"];

    /// Video extensions.
    pub const VIDEO: &[&str] = &["mp4", "mov", "avi"];

    /// Extension of every annotated output file.
    pub const OUTPUT: &str = "jpg";
}

/// Annotation drawing constants.
pub mod annotation {
    /// Preferred TrueType font, looked up relative to the working directory.
    pub const DEFAULT_FONT: &str = "arial.ttf";

    /// Preferred font pixel height.
    pub const DEFAULT_FONT_SIZE: f32 = 20.0;

    /// Outline stroke width in pixels.
    pub const DEFAULT_STROKE_WIDTH: u32 = 5;

    /// Vertical offset of the label above the first corner.
    pub const LABEL_OFFSET_Y: i32 = 30;

    /// Integer upscale applied to the built-in 8x8 glyphs.
    pub const BUILTIN_GLYPH_SCALE: u32 = 2;

    /// Outline and label colour.
    pub const INK: [u8; 3] = [0, 0, 0];
}

/// Video sampling constants.
pub mod video {
    /// Sampled frames per second of footage.
    pub const SAMPLES_PER_SECOND: u32 = 2;

    /// Default ffmpeg executable.
    pub const DEFAULT_FFMPEG: &str = "ffmpeg";

    /// Default ffprobe executable.
    pub const DEFAULT_FFPROBE: &str = "ffprobe";

    /// JPEG quality for frames submitted to the API.
    pub const FRAME_JPEG_QUALITY: u8 = 90;

    /// Name given to the in-memory frame upload.
    pub const FRAME_UPLOAD_NAME: &str = "frame.jpg";
}
