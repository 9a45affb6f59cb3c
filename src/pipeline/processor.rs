//! Single image processing.

use crate::error::Result;
use crate::recognition::{Detection, Recognizer, parse_detections};
use std::path::Path;
use tracing::info;

/// Outcome of submitting one still image.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageOutcome {
    /// The service returned no usable response.
    NoResponse,
    /// Detections in response order (possibly empty).
    Detections(Vec<Detection>),
}

/// Recognize plates in a still image.
///
/// The parser only runs on a successful response.
pub fn recognize_image(image_path: &Path, recognizer: &dyn Recognizer) -> Result<ImageOutcome> {
    info!("Processing: {}", image_path.display());

    let Some(response) = recognizer.recognize(image_path)? else {
        return Ok(ImageOutcome::NoResponse);
    };

    let detections = parse_detections(&response)?;
    info!("Found {} plate(s)", detections.len());
    Ok(ImageOutcome::Detections(detections))
}
