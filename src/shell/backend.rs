//! The production [`Backend`]: remote recognition plus on-disk annotation.

use super::session::Backend;
use crate::annotate::Annotator;
use crate::config::{PathsConfig, VideoConfig};
use crate::error::Result;
use crate::pipeline::{ImageOutcome, MediaKind, list_media, recognize_image};
use crate::recognition::{Detection, FrameResult, Recognizer};
use crate::video;
use std::path::{Path, PathBuf};

/// Backend wiring the shell to a recognizer and an annotator.
pub struct PipelineBackend<'a> {
    recognizer: &'a dyn Recognizer,
    annotator: &'a Annotator,
    paths: &'a PathsConfig,
    video: &'a VideoConfig,
    progress_enabled: bool,
}

impl<'a> PipelineBackend<'a> {
    /// Create a backend.
    pub fn new(
        recognizer: &'a dyn Recognizer,
        annotator: &'a Annotator,
        paths: &'a PathsConfig,
        video: &'a VideoConfig,
        progress_enabled: bool,
    ) -> Self {
        Self {
            recognizer,
            annotator,
            paths,
            video,
            progress_enabled,
        }
    }
}

impl Backend for PipelineBackend<'_> {
    fn media_dir(&self, kind: MediaKind) -> &Path {
        match kind {
            MediaKind::Image => &self.paths.images,
            MediaKind::Video => &self.paths.videos,
        }
    }

    fn list(&self, kind: MediaKind) -> Result<Vec<PathBuf>> {
        list_media(self.media_dir(kind), kind)
    }

    fn recognize_image(&self, image: &Path) -> Result<ImageOutcome> {
        recognize_image(image, self.recognizer)
    }

    fn annotate(&self, image: &Path, detection: &Detection) -> Result<PathBuf> {
        self.annotator.annotate(image, detection, None)
    }

    fn process_video(&self, path: &Path) -> Result<Vec<FrameResult>> {
        video::process_video(
            path,
            self.video,
            self.recognizer,
            self.annotator,
            self.progress_enabled,
        )
    }
}
