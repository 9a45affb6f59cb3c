//! The interactive shell state machine.
//!
//! [`Session`] owns the console I/O; each state reads at most one line,
//! validates it with the parsers in [`super::input`], performs the work
//! through a [`Backend`], and returns the next state.

use super::input::{
    InspectCommand, MenuChoice, Selection, SelectionError, parse_inspect, parse_menu, parse_pick,
    parse_selection,
};
use crate::error::{Error, Result};
use crate::output::report;
use crate::pipeline::{ImageOutcome, MediaKind, display_name};
use crate::recognition::{Detection, FrameResult};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::error;

/// The work the shell drives.
pub trait Backend {
    /// Directory listed for `kind`, shown when nothing is found.
    fn media_dir(&self, kind: MediaKind) -> &Path;

    /// Candidate files of `kind`.
    fn list(&self, kind: MediaKind) -> Result<Vec<PathBuf>>;

    /// Submit a still image and parse the response.
    fn recognize_image(&self, image: &Path) -> Result<ImageOutcome>;

    /// Write an annotated copy of `image` for one detection.
    fn annotate(&self, image: &Path, detection: &Detection) -> Result<PathBuf>;

    /// Sample, recognize and annotate a video.
    fn process_video(&self, video: &Path) -> Result<Vec<FrameResult>>;
}

/// Shell states.
#[derive(Debug, Clone, PartialEq)]
pub enum State {
    /// Waiting for a main menu choice.
    MainMenu,
    /// Waiting for an image pick among these files.
    SelectImage(Vec<PathBuf>),
    /// Waiting for a video pick among these files.
    SelectVideo(Vec<PathBuf>),
    /// Waiting for a detection to inspect and annotate.
    InspectPlates {
        /// The processed image.
        image: PathBuf,
        /// Its detections.
        detections: Vec<Detection>,
    },
    /// Browsing the results of a video run.
    InspectFrames(Vec<FrameResult>),
    /// Terminal state.
    Exit,
}

/// Result of a file selection prompt.
enum FilePick<'f> {
    File(&'f Path),
    Exit,
    Invalid,
}

/// An interactive session over any line reader and writer.
pub struct Session<'a, R, W> {
    backend: &'a dyn Backend,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    /// Create a session.
    pub fn new(backend: &'a dyn Backend, input: R, output: W) -> Self {
        Self {
            backend,
            input,
            output,
        }
    }

    /// Run until the operator exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        let mut state = State::MainMenu;
        while state != State::Exit {
            state = self.step(state)?;
        }
        writeln!(self.output, "Exiting.")?;
        self.output.flush()?;
        Ok(())
    }

    /// Advance one state.
    pub fn step(&mut self, state: State) -> Result<State> {
        match state {
            State::MainMenu => self.main_menu(),
            State::SelectImage(files) => self.select_image(&files),
            State::SelectVideo(files) => self.select_video(&files),
            State::InspectPlates { image, detections } => self.inspect_plates(&image, &detections),
            State::InspectFrames(results) => self.inspect_frames(results),
            State::Exit => Ok(State::Exit),
        }
    }

    fn main_menu(&mut self) -> Result<State> {
        writeln!(self.output, "Choose an option:")?;
        writeln!(self.output, "1. Process an image")?;
        writeln!(self.output, "2. Process a video")?;
        let Some(line) = self.prompt("Enter your choice (1 or 2, or 'exit' to quit): ")? else {
            return Ok(State::Exit);
        };

        match parse_menu(&line) {
            Some(MenuChoice::Image) => self.offer(MediaKind::Image),
            Some(MenuChoice::Video) => self.offer(MediaKind::Video),
            Some(MenuChoice::Exit) => Ok(State::Exit),
            None => {
                writeln!(self.output, "Invalid choice. Please enter '1', '2', or 'exit'.")?;
                Ok(State::MainMenu)
            }
        }
    }

    /// List candidate files and move to the matching selection state.
    fn offer(&mut self, kind: MediaKind) -> Result<State> {
        let files = self.backend.list(kind)?;
        let (noun, heading) = match kind {
            MediaKind::Image => ("images", "Available Images:"),
            MediaKind::Video => ("videos", "Available Videos:"),
        };

        if files.is_empty() {
            writeln!(
                self.output,
                "No {noun} found in the {} folder.",
                self.backend.media_dir(kind).display()
            )?;
            return Ok(State::MainMenu);
        }

        writeln!(self.output, "\n{heading}")?;
        for (i, file) in files.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, display_name(file))?;
        }

        Ok(match kind {
            MediaKind::Image => State::SelectImage(files),
            MediaKind::Video => State::SelectVideo(files),
        })
    }

    /// Ask for one of `files`.
    fn pick_file<'f>(&mut self, files: &'f [PathBuf], noun: &str) -> Result<FilePick<'f>> {
        let Some(line) = self.prompt(&format!(
            "Please choose {} {noun} to process (or type 'exit' to quit): ",
            if noun == "image" { "an" } else { "a" }
        ))?
        else {
            return Ok(FilePick::Exit);
        };

        match parse_selection(&line, files.len()) {
            Ok(Selection::Pick(index)) => Ok(FilePick::File(&files[index])),
            Ok(Selection::Exit) => Ok(FilePick::Exit),
            Err(SelectionError::NotANumber | SelectionError::OutOfRange) => {
                writeln!(
                    self.output,
                    "Invalid input. Please enter a number corresponding to the {noun}."
                )?;
                Ok(FilePick::Invalid)
            }
        }
    }

    fn select_image(&mut self, files: &[PathBuf]) -> Result<State> {
        let image = match self.pick_file(files, "image")? {
            FilePick::File(image) => image.to_path_buf(),
            FilePick::Exit => return Ok(State::Exit),
            FilePick::Invalid => return Ok(State::MainMenu),
        };

        match self.backend.recognize_image(&image) {
            Ok(ImageOutcome::NoResponse) => {
                writeln!(self.output, "Error in OCR processing.")?;
                Ok(State::MainMenu)
            }
            Ok(ImageOutcome::Detections(detections)) if detections.is_empty() => {
                writeln!(self.output, "No plates detected.")?;
                Ok(State::MainMenu)
            }
            Ok(ImageOutcome::Detections(detections)) => {
                writeln!(self.output, "\nDetected Plates:")?;
                for (i, detection) in detections.iter().enumerate() {
                    writeln!(self.output, "{}", report::detection_line(i + 1, detection))?;
                }
                Ok(State::InspectPlates { image, detections })
            }
            Err(e) => {
                error!("Failed to process {}: {}", image.display(), e.chain());
                writeln!(self.output, "Error processing {}: {e}", display_name(&image))?;
                Ok(State::MainMenu)
            }
        }
    }

    fn inspect_plates(&mut self, image: &Path, detections: &[Detection]) -> Result<State> {
        let line = self
            .prompt("\nEnter the number of the plate to see more info, or 'skip' to go back: ")?
            .unwrap_or_default();

        let Some(index) = parse_pick(&line, detections.len()) else {
            writeln!(self.output, "Skipping to next image.")?;
            return Ok(State::MainMenu);
        };

        let detection = &detections[index];
        write!(self.output, "\n{}", report::detection_details(detection))?;
        match self.backend.annotate(image, detection) {
            Ok(saved) => {
                writeln!(self.output, "Saved annotated image as: {}", saved.display())?;
            }
            // The source became unreadable; write failures still propagate
            Err(e @ (Error::ImageRead { .. } | Error::ImageDecode { .. })) => {
                error!("Failed to annotate {}: {}", image.display(), e.chain());
                writeln!(self.output, "Error annotating {}: {e}", display_name(image))?;
            }
            Err(e) => return Err(e),
        }
        Ok(State::MainMenu)
    }

    fn select_video(&mut self, files: &[PathBuf]) -> Result<State> {
        let video = match self.pick_file(files, "video")? {
            FilePick::File(video) => video.to_path_buf(),
            FilePick::Exit => return Ok(State::Exit),
            FilePick::Invalid => return Ok(State::MainMenu),
        };

        let results = self.backend.process_video(&video)?;
        writeln!(self.output, "\nVideo processing complete.")?;

        if results.is_empty() {
            writeln!(self.output, "No plates detected in the video.")?;
            return Ok(State::MainMenu);
        }

        writeln!(self.output, "\nAll Detected Plates:")?;
        for (i, result) in results.iter().enumerate() {
            writeln!(self.output, "{}", report::frame_result_line(i + 1, result))?;
        }
        Ok(State::InspectFrames(results))
    }

    fn inspect_frames(&mut self, results: Vec<FrameResult>) -> Result<State> {
        let Some(line) = self.prompt(
            "\nEnter the number of a plate to view more details, or type 'done' to continue: ",
        )?
        else {
            return Ok(State::Exit);
        };

        match parse_inspect(&line, results.len()) {
            InspectCommand::Done => Ok(State::MainMenu),
            InspectCommand::Pick(index) => {
                write!(self.output, "\n{}", report::frame_result_details(&results[index]))?;
                Ok(State::InspectFrames(results))
            }
            InspectCommand::Invalid => {
                writeln!(
                    self.output,
                    "Invalid input. Please enter a valid plate number or 'done'."
                )?;
                Ok(State::InspectFrames(results))
            }
        }
    }

    /// Print a prompt and read one line. `Ok(None)` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line))
    }
}
