//! Fixed-interval frame sampling and per-frame recognition.

use super::source::{FfmpegSource, FrameSource};
use crate::annotate::Annotator;
use crate::config::VideoConfig;
use crate::constants::video::{FRAME_JPEG_QUALITY, FRAME_UPLOAD_NAME, SAMPLES_PER_SECOND};
use crate::error::{Error, Result};
use crate::output::progress;
use crate::recognition::{FrameResult, Recognizer, parse_detections};
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Frames between samples: `max(1, trunc(frame_rate) / 2)`.
///
/// 30 fps samples frames 0, 15, 30, ...; anything below 4 fps samples every
/// frame.
pub fn sampling_interval(frame_rate: f64) -> u64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = if frame_rate.is_finite() && frame_rate > 0.0 {
        frame_rate.trunc() as u64
    } else {
        0
    };
    (whole / u64::from(SAMPLES_PER_SECOND)).max(1)
}

/// Open a video file and sample it.
///
/// A video that cannot be opened yields an empty result.
pub fn process_video(
    path: &Path,
    config: &VideoConfig,
    recognizer: &dyn Recognizer,
    annotator: &Annotator,
    progress_enabled: bool,
) -> Result<Vec<FrameResult>> {
    info!("Processing: {}", path.display());

    let mut source = match FfmpegSource::open(path, config) {
        Ok(source) => source,
        Err(e) => {
            error!("{}", e.chain());
            return Ok(Vec::new());
        }
    };

    sample_and_process(&mut source, recognizer, annotator, progress_enabled)
}

/// Walk every frame of `source`, recognizing and annotating every sampled one.
///
/// Results are in frame order. A read error ends the walk early with what
/// was collected so far; a bad recognition response only drops that frame.
/// Failures to write annotated images propagate.
pub fn sample_and_process(
    source: &mut dyn FrameSource,
    recognizer: &dyn Recognizer,
    annotator: &Annotator,
    progress_enabled: bool,
) -> Result<Vec<FrameResult>> {
    let info = source.info().clone();
    let interval = sampling_interval(info.frame_rate);
    let expected_samples = info.frame_count.map_or(0, |count| count / interval);

    debug!(
        "Sampling every {} frame(s) at {:.3} fps",
        interval, info.frame_rate
    );

    let frame_progress = progress::create_frame_progress(expected_samples, progress_enabled);

    let mut results = Vec::new();
    let mut sampled = 0_u64;
    let mut index = 0_u64;

    loop {
        if index % interval == 0 {
            let frame = match source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(e) => {
                    warn!("Stopping early: {e}");
                    break;
                }
            };

            if let Err(e) = process_frame(&frame, index, recognizer, annotator, &mut results) {
                progress::finish_progress(frame_progress, "Failed");
                return Err(e);
            }
            sampled += 1;
            progress::inc_progress(frame_progress.as_ref());
        } else {
            match source.skip_frame() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    warn!("Stopping early: {e}");
                    break;
                }
            }
        }
        index += 1;
    }

    progress::finish_progress(frame_progress, "Complete");
    info!(
        "Video processing complete: {} frames read, {} sampled, {} plate(s) found",
        index,
        sampled,
        results.len()
    );

    Ok(results)
}

/// Recognize one sampled frame, annotating and recording each detection.
fn process_frame(
    frame: &RgbImage,
    index: u64,
    recognizer: &dyn Recognizer,
    annotator: &Annotator,
    results: &mut Vec<FrameResult>,
) -> Result<()> {
    let jpeg = encode_jpeg(frame)?;

    let response = match recognizer.recognize_bytes(jpeg, FRAME_UPLOAD_NAME) {
        Ok(Some(response)) => response,
        Ok(None) => return Ok(()),
        Err(e) => {
            error!("Frame {index}: {e}");
            return Ok(());
        }
    };

    let detections = match parse_detections(&response) {
        Ok(detections) => detections,
        Err(e) => {
            error!("Frame {index}: {}", e.chain());
            return Ok(());
        }
    };

    let prefix = format!("frame_{index}");
    for detection in &detections {
        annotator.annotate_image(frame, detection, Some(&prefix))?;
        debug!(
            "Frame {index}: {} ({:.2}%)",
            detection.plate, detection.confidence
        );
        results.push(FrameResult::from_detection(detection, index));
    }

    Ok(())
}

/// Encode a frame as JPEG in memory.
pub fn encode_jpeg(frame: &RgbImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, FRAME_JPEG_QUALITY)
        .encode_image(frame)
        .map_err(|e| Error::ImageEncode { source: e })?;
    Ok(buffer)
}
