//! Detection types shared by recognition, annotation and the shell.

use serde::{Deserialize, Serialize};

/// A corner of a plate outline, in source image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

/// One plate reported by the recognition API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Recognized plate text.
    pub plate: String,
    /// Confidence in percent (0-100), passed through unclamped.
    pub confidence: f64,
    /// Outline corners in the order the API returned them.
    pub coordinates: Vec<Point>,
}

impl Detection {
    /// Label drawn next to the outline, e.g. `ABC123 (91.25%)`.
    pub fn label(&self) -> String {
        format!("{} ({:.2}%)", self.plate, self.confidence)
    }
}

/// A detection found in a sampled video frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameResult {
    /// Recognized plate text.
    pub plate: String,
    /// Confidence in percent.
    pub confidence: f64,
    /// Zero-based index of the frame in the video.
    pub frame_index: u64,
}

impl FrameResult {
    /// Tag a detection with the frame it came from.
    pub fn from_detection(detection: &Detection, frame_index: u64) -> Self {
        Self {
            plate: detection.plate.clone(),
            confidence: detection.confidence,
            frame_index,
        }
    }
}
