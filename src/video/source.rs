//! Video frame sources.
//!
//! Frames are decoded by an `ffmpeg` child process writing raw `rgb24` to a
//! pipe; stream metadata comes from `ffprobe`.

use crate::config::VideoConfig;
use crate::error::{Error, Result};
use image::RgbImage;
use serde::Deserialize;
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};
use tracing::{debug, warn};

/// Stream properties needed for sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second.
    pub frame_rate: f64,
    /// Total frames, when the container reports it.
    pub frame_count: Option<u64>,
}

/// Sequential access to decoded frames.
pub trait FrameSource {
    /// Stream properties.
    fn info(&self) -> &VideoInfo;

    /// Decode the next frame. `Ok(None)` at end of stream.
    fn next_frame(&mut self) -> Result<Option<RgbImage>>;

    /// Advance past the next frame without keeping it. `Ok(false)` at end of
    /// stream.
    fn skip_frame(&mut self) -> Result<bool> {
        Ok(self.next_frame()?.is_some())
    }
}

/// Frames decoded by an `ffmpeg` child process.
///
/// The child is killed and reaped when the source is dropped, so stopping
/// early never leaves a decoder running.
pub struct FfmpegSource {
    path: PathBuf,
    info: VideoInfo,
    child: Child,
    stdout: BufReader<ChildStdout>,
    frame_len: usize,
    scratch: Vec<u8>,
    next_index: u64,
}

impl FfmpegSource {
    /// Probe `path` and start decoding it.
    pub fn open(path: &Path, config: &VideoConfig) -> Result<Self> {
        let info = probe(path, &config.ffprobe)?;
        debug!(
            "Video {}: {}x{} @ {:.3} fps, {} frames",
            path.display(),
            info.width,
            info.height,
            info.frame_rate,
            info.frame_count
                .map_or_else(|| "unknown".to_string(), |n| n.to_string())
        );

        let mut child = Command::new(&config.ffmpeg)
            .arg("-v")
            .arg("error")
            .arg("-nostdin")
            .arg("-i")
            .arg(path)
            .args(["-map", "0:v:0", "-fps_mode", "passthrough"])
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::VideoOpen {
                path: path.to_path_buf(),
                source: Box::new(e),
            })?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(Error::VideoOpen {
                path: path.to_path_buf(),
                source: "ffmpeg stdout was not captured".into(),
            });
        };

        let frame_len = info.width as usize * info.height as usize * 3;

        Ok(Self {
            path: path.to_path_buf(),
            info,
            child,
            stdout: BufReader::with_capacity(frame_len, stdout),
            frame_len,
            scratch: vec![0; frame_len],
            next_index: 0,
        })
    }

    /// Fill the scratch buffer with the next frame. `Ok(false)` at end of
    /// stream; a trailing partial frame also counts as the end.
    fn read_raw(&mut self) -> Result<bool> {
        match self.stdout.read_exact(&mut self.scratch) {
            Ok(()) => {
                self.next_index += 1;
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                debug!(
                    "End of {} after {} frames",
                    self.path.display(),
                    self.next_index
                );
                Ok(false)
            }
            Err(e) => Err(Error::FrameRead {
                index: self.next_index,
                source: e,
            }),
        }
    }
}

impl FrameSource for FfmpegSource {
    fn info(&self) -> &VideoInfo {
        &self.info
    }

    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        if !self.read_raw()? {
            return Ok(None);
        }
        let buffer = std::mem::replace(&mut self.scratch, vec![0; self.frame_len]);
        Ok(RgbImage::from_raw(self.info.width, self.info.height, buffer))
    }

    fn skip_frame(&mut self) -> Result<bool> {
        self.read_raw()
    }
}

impl Drop for FfmpegSource {
    fn drop(&mut self) {
        // Already-exited children make kill() fail; that is fine
        let _ = self.child.kill();
        if let Err(e) = self.child.wait() {
            warn!("Failed to reap ffmpeg for {}: {e}", self.path.display());
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<u32>,
    height: Option<u32>,
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
    nb_frames: Option<String>,
    duration: Option<String>,
    #[serde(default)]
    tags: ProbeTags,
    #[serde(default)]
    side_data_list: Vec<ProbeSideData>,
}

#[derive(Debug, Default, Deserialize)]
struct ProbeTags {
    rotate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeSideData {
    rotation: Option<f64>,
}

impl ProbeStream {
    /// Display rotation in degrees. The display matrix wins over the legacy
    /// `rotate` tag.
    fn rotation(&self) -> f64 {
        self.side_data_list
            .iter()
            .find_map(|side| side.rotation)
            .or_else(|| self.tags.rotate.as_deref()?.trim().parse().ok())
            .unwrap_or(0.0)
    }
}

/// Read stream metadata with `ffprobe`.
fn probe(path: &Path, ffprobe: &Path) -> Result<VideoInfo> {
    let output = Command::new(ffprobe)
        .args(["-v", "error", "-select_streams", "v:0"])
        .args([
            "-show_entries",
            "stream=width,height,avg_frame_rate,r_frame_rate,nb_frames,duration\
             :stream_tags=rotate:stream_side_data=rotation",
            "-of",
            "json",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| Error::VideoOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::VideoOpen {
            path: path.to_path_buf(),
            source: format!("ffprobe failed: {}", stderr.trim()).into(),
        });
    }

    let parsed: ProbeOutput =
        serde_json::from_slice(&output.stdout).map_err(|e| Error::VideoOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    video_info_from_probe(&parsed).ok_or_else(|| Error::NoVideoStream {
        path: path.to_path_buf(),
    })
}

fn video_info_from_probe(probe: &ProbeOutput) -> Option<VideoInfo> {
    let stream = probe.streams.first()?;
    let coded_width = stream.width.filter(|w| *w > 0)?;
    let coded_height = stream.height.filter(|h| *h > 0)?;

    // ffmpeg autorotates, so quarter turns swap the decoded dimensions
    #[allow(clippy::cast_possible_truncation)]
    let quarter_turns = ((stream.rotation() / 90.0).round() as i64).rem_euclid(4);
    let (width, height) = if quarter_turns % 2 == 1 {
        (coded_height, coded_width)
    } else {
        (coded_width, coded_height)
    };

    let frame_rate = stream
        .avg_frame_rate
        .as_deref()
        .and_then(parse_rational)
        .or_else(|| stream.r_frame_rate.as_deref().and_then(parse_rational))?;

    let frame_count = stream
        .nb_frames
        .as_deref()
        .and_then(|n| n.parse::<u64>().ok())
        .or_else(|| {
            let secs = stream.duration.as_deref()?.parse::<f64>().ok()?;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Some((secs * frame_rate).round() as u64)
        });

    Some(VideoInfo {
        width,
        height,
        frame_rate,
        frame_count,
    })
}

/// Parse an ffprobe rate such as `30000/1001` or `25`.
fn parse_rational(text: &str) -> Option<f64> {
    let value = match text.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => text.trim().parse().ok()?,
    };
    (value.is_finite() && value > 0.0).then_some(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rational() {
        assert_eq!(parse_rational("30/1"), Some(30.0));
        assert_eq!(parse_rational("25"), Some(25.0));
        let ntsc = parse_rational("30000/1001").unwrap();
        assert!((ntsc - 29.97).abs() < 0.01);
        assert_eq!(parse_rational("0/0"), None);
        assert_eq!(parse_rational("N/A"), None);
    }

    #[test]
    fn test_video_info_from_probe() {
        let probe: ProbeOutput = serde_json::from_str(
            r#"{"programs": [], "streams": [{
                "width": 1280, "height": 720,
                "avg_frame_rate": "30/1", "r_frame_rate": "30/1",
                "nb_frames": "60"
            }]}"#,
        )
        .unwrap();

        let info = video_info_from_probe(&probe).unwrap();
        assert_eq!(info.width, 1280);
        assert_eq!(info.height, 720);
        assert_eq!(info.frame_rate, 30.0);
        assert_eq!(info.frame_count, Some(60));
    }

    #[test]
    fn test_frame_count_falls_back_to_duration() {
        let probe: ProbeOutput = serde_json::from_str(
            r#"{"streams": [{
                "width": 640, "height": 480,
                "avg_frame_rate": "0/0", "r_frame_rate": "25/1",
                "duration": "4.000000"
            }]}"#,
        )
        .unwrap();

        let info = video_info_from_probe(&probe).unwrap();
        assert_eq!(info.frame_rate, 25.0);
        assert_eq!(info.frame_count, Some(100));
    }

    #[test]
    fn test_display_matrix_rotation_swaps_dimensions() {
        let probe: ProbeOutput = serde_json::from_str(
            r#"{"streams": [{
                "width": 1920, "height": 1080,
                "avg_frame_rate": "30/1", "nb_frames": "90",
                "side_data_list": [{"side_data_type": "Display Matrix", "rotation": -90}]
            }]}"#,
        )
        .unwrap();

        let info = video_info_from_probe(&probe).unwrap();
        assert_eq!((info.width, info.height), (1080, 1920));
    }

    #[test]
    fn test_rotate_tag_swaps_dimensions() {
        let probe: ProbeOutput = serde_json::from_str(
            r#"{"streams": [{
                "width": 1920, "height": 1080, "avg_frame_rate": "30/1",
                "tags": {"rotate": "270"}
            }]}"#,
        )
        .unwrap();

        let info = video_info_from_probe(&probe).unwrap();
        assert_eq!((info.width, info.height), (1080, 1920));
    }

    #[test]
    fn test_half_turn_keeps_dimensions() {
        let probe: ProbeOutput = serde_json::from_str(
            r#"{"streams": [{
                "width": 1920, "height": 1080, "avg_frame_rate": "30/1",
                "side_data_list": [{"rotation": 180}]
            }]}"#,
        )
        .unwrap();

        let info = video_info_from_probe(&probe).unwrap();
        assert_eq!((info.width, info.height), (1920, 1080));
    }

    #[test]
    fn test_no_streams() {
        let probe: ProbeOutput = serde_json::from_str(r#"{"streams": []}"#).unwrap();
        assert!(video_info_from_probe(&probe).is_none());
    }

    #[test]
    fn test_open_missing_tool_fails() {
        let config = VideoConfig {
            ffmpeg: PathBuf::from("/nonexistent/ffmpeg"),
            ffprobe: PathBuf::from("/nonexistent/ffprobe"),
        };
        let result = FfmpegSource::open(Path::new("clip.mp4"), &config);
        assert!(matches!(result, Err(Error::VideoOpen { .. })));
    }
}
