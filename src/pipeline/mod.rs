//! Processing pipeline components.

mod coordinator;
mod processor;

pub use coordinator::{MediaKind, display_name, list_media};
pub use processor::{ImageOutcome, recognize_image};
