//! Video decoding and frame sampling.

mod sampler;
mod source;

pub use sampler::{encode_jpeg, process_video, sample_and_process, sampling_interval};
pub use source::{FfmpegSource, FrameSource, VideoInfo};
