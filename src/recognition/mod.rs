//! Remote plate recognition: HTTP client and response parsing.

mod client;
mod parser;
mod types;

pub use client::{RecognitionClient, Recognizer};
pub use parser::parse_detections;
pub use types::{Detection, FrameResult, Point};
