//! Annotated image writing.
//!
//! Draws a detection's outline and label on a copy of the source image and
//! writes it as JPEG into the results directory.

use super::font::{LabelFont, resolve_font};
use crate::config::AnnotationConfig;
use crate::constants::{annotation, extensions};
use crate::error::{Error, Result};
use crate::recognition::{Detection, Point};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes annotated copies of images.
#[derive(Debug)]
pub struct Annotator {
    /// Output directory for annotated images.
    output_dir: PathBuf,
    font: LabelFont,
    stroke_width: u32,
}

impl Annotator {
    /// Create an annotator writing into `output_dir`.
    pub fn new(output_dir: PathBuf, font: LabelFont, stroke_width: u32) -> Self {
        Self {
            output_dir,
            font,
            stroke_width: stroke_width.max(1),
        }
    }

    /// Create an annotator from configuration, resolving the label font.
    pub fn from_config(output_dir: PathBuf, config: &AnnotationConfig) -> Self {
        let font = LabelFont::load(&resolve_font(&config.font), config.font_size);
        Self::new(output_dir, font, config.stroke_width)
    }

    /// Directory receiving annotated images.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path an annotation for `plate` (and optional prefix) is written to.
    pub fn output_path(&self, plate: &str, prefix: Option<&str>) -> PathBuf {
        self.output_dir.join(output_file_name(plate, prefix))
    }

    /// Annotate the image at `image_path` with one detection.
    ///
    /// Returns the path of the written file. An existing file with the same
    /// name is overwritten.
    pub fn annotate(
        &self,
        image_path: &Path,
        detection: &Detection,
        prefix: Option<&str>,
    ) -> Result<PathBuf> {
        let source = image::open(image_path).map_err(|e| Error::ImageDecode {
            path: image_path.to_path_buf(),
            source: e,
        })?;
        self.annotate_image(&source.to_rgb8(), detection, prefix)
    }

    /// Annotate an in-memory image with one detection.
    pub fn annotate_image(
        &self,
        image: &RgbImage,
        detection: &Detection,
        prefix: Option<&str>,
    ) -> Result<PathBuf> {
        let mut canvas = image.clone();
        let ink = Rgb(annotation::INK);

        draw_outline(&mut canvas, &detection.coordinates, self.stroke_width, ink);

        let anchor = detection
            .coordinates
            .first()
            .copied()
            .unwrap_or(Point { x: 0, y: 0 });
        self.font.draw(
            &mut canvas,
            anchor.x,
            anchor.y - annotation::LABEL_OFFSET_Y,
            &detection.label(),
            ink,
        );

        fs::create_dir_all(&self.output_dir).map_err(|e| Error::OutputDirCreateFailed {
            path: self.output_dir.clone(),
            source: e,
        })?;

        let output_path = self.output_path(&detection.plate, prefix);
        canvas
            .save_with_format(&output_path, ImageFormat::Jpeg)
            .map_err(|e| Error::ImageWrite {
                path: output_path.clone(),
                source: e,
            })?;

        debug!("Saved annotated image as: {}", output_path.display());
        Ok(output_path)
    }
}

/// Draw a closed outline through `points` with a square brush of `width`.
fn draw_outline(canvas: &mut RgbImage, points: &[Point], width: u32, color: Rgb<u8>) {
    if points.is_empty() {
        return;
    }

    #[allow(clippy::cast_possible_wrap)]
    let width = width as i32;
    let low = -(width - 1) / 2;
    let high = width / 2;

    for (i, start) in points.iter().enumerate() {
        let end = points[(i + 1) % points.len()];
        for dx in low..=high {
            for dy in low..=high {
                #[allow(clippy::cast_precision_loss)]
                draw_line_segment_mut(
                    canvas,
                    ((start.x + dx) as f32, (start.y + dy) as f32),
                    ((end.x + dx) as f32, (end.y + dy) as f32),
                    color,
                );
            }
        }
    }
}

/// Output file name: `{plate}.jpg` or `{prefix}_{plate}.jpg`.
///
/// Blank plate text becomes `_` so the file is never hidden.
pub fn output_file_name(plate: &str, prefix: Option<&str>) -> String {
    let mut plate = sanitize_filename(plate);
    if plate.trim().is_empty() {
        plate = "_".to_string();
    }
    prefix.map_or_else(
        || format!("{plate}.{}", extensions::OUTPUT),
        |prefix| format!("{}_{plate}.{}", sanitize_filename(prefix), extensions::OUTPUT),
    )
}

/// Sanitize a string for use as a filename.
///
/// Replaces characters that are invalid in filenames across platforms
/// and prevents path traversal.
fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();

    sanitized.replace("..", "__")
}
