//! Console output: progress bars and result listings.

pub mod progress;
pub mod report;
