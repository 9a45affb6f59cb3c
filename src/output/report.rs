//! Console formatting of detections and frame results.

use crate::recognition::{Detection, FrameResult};
use std::fmt::Write;

/// Numbered list line for a still-image detection: `1. ABC123`.
pub fn detection_line(position: usize, detection: &Detection) -> String {
    format!("{position}. {}", detection.plate)
}

/// Full field listing for one detection.
pub fn detection_details(detection: &Detection) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Detailed Plate Information:");
    let _ = writeln!(out, "Plate: {}", detection.plate);
    let _ = writeln!(out, "Confidence: {}", detection.confidence);
    let _ = writeln!(out, "Bounding Box Coordinates:");
    for point in &detection.coordinates {
        let _ = writeln!(out, "  - x: {}, y: {}", point.x, point.y);
    }
    out
}

/// Numbered list line for a video result.
pub fn frame_result_line(position: usize, result: &FrameResult) -> String {
    format!(
        "{position}. Plate: {} (Confidence: {:.2}%) - Frame: {}",
        result.plate, result.confidence, result.frame_index
    )
}

/// Full field listing for one video result.
pub fn frame_result_details(result: &FrameResult) -> String {
    format!(
        "Detailed Plate Information:\nPlate: {}\nConfidence: {:.2}%\nFrame: {}\n",
        result.plate, result.confidence, result.frame_index
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognition::Point;

    fn detection() -> Detection {
        Detection {
            plate: "ABC123".to_string(),
            confidence: 91.5,
            coordinates: vec![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }],
        }
    }

    #[test]
    fn test_detection_line() {
        assert_eq!(detection_line(2, &detection()), "2. ABC123");
    }

    #[test]
    fn test_detection_details_lists_coordinates() {
        let text = detection_details(&detection());
        assert!(text.contains("Plate: ABC123"));
        assert!(text.contains("Confidence: 91.5"));
        assert!(text.contains("  - x: 1, y: 2"));
        assert!(text.contains("  - x: 3, y: 4"));
    }

    #[test]
    fn test_frame_result_line() {
        let result = FrameResult {
            plate: "XYZ".to_string(),
            confidence: 80.0,
            frame_index: 15,
        };
        assert_eq!(
            frame_result_line(1, &result),
            "1. Plate: XYZ (Confidence: 80.00%) - Frame: 15"
        );
        assert!(frame_result_details(&result).contains("Frame: 15"));
    }
}
