//! Label font resolution.
//!
//! A preferred TrueType file is used when it exists locally; otherwise labels
//! fall back to the embedded 8x8 bitmap glyphs.

use crate::constants::annotation::BUILTIN_GLYPH_SCALE;
use ab_glyph::{FontVec, PxScale};
use font8x8::UnicodeFonts;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where label glyphs come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// A TrueType/OpenType file on disk.
    Preferred(PathBuf),
    /// The embedded bitmap font.
    BuiltIn,
}

/// Decide which font to use without loading anything.
pub fn resolve_font(preferred: &Path) -> FontSource {
    if preferred.is_file() {
        FontSource::Preferred(preferred.to_path_buf())
    } else {
        FontSource::BuiltIn
    }
}

/// A loaded label font.
pub enum LabelFont {
    /// Scalable outline font.
    TrueType {
        /// Parsed font data.
        font: FontVec,
        /// Pixel height.
        scale: PxScale,
    },
    /// Embedded 8x8 glyphs, upscaled by an integer factor.
    BuiltIn {
        /// Pixels per glyph dot.
        scale: u32,
    },
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TrueType { scale, .. } => write!(f, "TrueType({}px)", scale.y),
            Self::BuiltIn { scale } => write!(f, "BuiltIn(x{scale})"),
        }
    }
}

impl LabelFont {
    /// The embedded bitmap font at its default scale.
    pub fn builtin() -> Self {
        Self::BuiltIn {
            scale: BUILTIN_GLYPH_SCALE,
        }
    }

    /// Load the resolved font. A preferred file that cannot be read or parsed
    /// degrades to the embedded font.
    pub fn load(source: &FontSource, size: f32) -> Self {
        let FontSource::Preferred(path) = source else {
            debug!("Using built-in label font");
            return Self::builtin();
        };

        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                warn!("Cannot read font {}: {e}; using built-in font", path.display());
                return Self::builtin();
            }
        };

        match FontVec::try_from_vec(data) {
            Ok(font) => {
                debug!("Using label font {}", path.display());
                Self::TrueType {
                    font,
                    scale: PxScale::from(size),
                }
            }
            Err(e) => {
                warn!("Cannot parse font {}: {e}; using built-in font", path.display());
                Self::builtin()
            }
        }
    }

    /// Draw `text` with its top-left corner at (`x`, `y`). Parts outside the
    /// canvas are clipped.
    pub fn draw(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
        match self {
            Self::TrueType { font, scale } => {
                draw_text_mut(canvas, color, x, y, *scale, font, text);
            }
            Self::BuiltIn { scale } => draw_bitmap_text(canvas, x, y, text, color, *scale),
        }
    }
}

fn draw_bitmap_text(canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>, scale: u32) {
    let fallback = font8x8::BASIC_FONTS.get('?').unwrap_or([0; 8]);
    #[allow(clippy::cast_possible_wrap)]
    let step = scale as i32;

    for (column, ch) in text.chars().enumerate() {
        let glyph = font8x8::BASIC_FONTS.get(ch).unwrap_or(fallback);
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let origin_x = x + column as i32 * 8 * step;

        for (row, bits) in (0_i32..).zip(glyph) {
            for bit in 0..8_i32 {
                // Bit 0 is the leftmost dot
                if bits & (1 << bit) != 0 {
                    let rect = Rect::at(origin_x + bit * step, y + row * step).of_size(scale, scale);
                    draw_filled_rect_mut(canvas, rect, color);
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font_resolves_to_builtin() {
        let source = resolve_font(Path::new("/definitely/not/here/arial.ttf"));
        assert_eq!(source, FontSource::BuiltIn);
    }

    #[test]
    fn test_existing_file_resolves_to_preferred() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let source = resolve_font(file.path());
        assert_eq!(source, FontSource::Preferred(file.path().to_path_buf()));
    }

    #[test]
    fn test_unparseable_font_degrades_to_builtin() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"not a font").unwrap();
        let font = LabelFont::load(&FontSource::Preferred(file.path().to_path_buf()), 20.0);
        assert!(matches!(font, LabelFont::BuiltIn { .. }));
    }

    #[test]
    fn test_builtin_draws_ink() {
        let mut canvas = RgbImage::from_pixel(64, 32, Rgb([255, 255, 255]));
        LabelFont::builtin().draw(&mut canvas, 2, 2, "A1", Rgb([0, 0, 0]));
        assert!(canvas.pixels().any(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn test_builtin_clips_outside_canvas() {
        let mut canvas = RgbImage::from_pixel(16, 16, Rgb([255, 255, 255]));
        LabelFont::builtin().draw(&mut canvas, -40, -40, "OFF", Rgb([0, 0, 0]));
        assert!(canvas.pixels().all(|p| p.0 == [255, 255, 255]));
    }
}
