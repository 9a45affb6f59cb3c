//! Error types for platescan.

/// Result type alias for platescan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for platescan.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// No API credential was supplied.
    #[error(
        "no API key configured (pass --api-key, set API_KEY, or set api.secret_key in the config file)"
    )]
    MissingApiKey,

    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client")]
    HttpClient {
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// Recognition endpoint URL is invalid.
    #[error("invalid recognition endpoint '{url}'")]
    InvalidEndpoint {
        /// The rejected URL.
        url: String,
        /// Underlying parse error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to read an input image.
    #[error("failed to read image file '{path}'")]
    ImageRead {
        /// Path to the image file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to decode an image.
    #[error("failed to decode image '{path}'")]
    ImageDecode {
        /// Path to the image file.
        path: std::path::PathBuf,
        /// Underlying image error.
        #[source]
        source: image::ImageError,
    },

    /// Failed to encode an image.
    #[error("failed to encode image")]
    ImageEncode {
        /// Underlying image error.
        #[source]
        source: image::ImageError,
    },

    /// Failed to write an annotated image.
    #[error("failed to write annotated image '{path}'")]
    ImageWrite {
        /// Path to the output file.
        path: std::path::PathBuf,
        /// Underlying image error.
        #[source]
        source: image::ImageError,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Recognition API answered 200 with a body that is not JSON.
    #[error("recognition response is not valid JSON")]
    ResponseDecode {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A result entry in the recognition response lacks an expected field.
    #[error("malformed recognition result at index {index}")]
    MalformedResponse {
        /// Position of the offending entry in `plate.results`.
        index: usize,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to launch or read from a video tool.
    #[error("failed to open video '{path}'")]
    VideoOpen {
        /// Path to the video file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Video contains no decodable video stream.
    #[error("no video stream found in '{path}'")]
    NoVideoStream {
        /// Path to the video file.
        path: std::path::PathBuf,
    },

    /// Failed to read a frame from the decoder.
    #[error("failed to read frame {index}")]
    FrameRead {
        /// Index of the frame that could not be read.
        index: u64,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// The error and its sources on one line: `error: cause: cause`.
    pub fn chain(&self) -> String {
        use std::error::Error as _;

        let mut parts = vec![self.to_string()];
        let mut source = self.source();
        while let Some(cause) = source {
            parts.push(cause.to_string());
            source = cause.source();
        }
        parts.join(": ")
    }
}
