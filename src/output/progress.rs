//! Progress bar utilities for video sampling.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a progress bar counting sampled frames.
///
/// Returns `None` when disabled or when the total is unknown.
pub fn create_frame_progress(total_samples: u64, enabled: bool) -> Option<ProgressBar> {
    if !enabled || total_samples == 0 {
        return None;
    }

    let pb = ProgressBar::new(total_samples);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} Processing Video [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} frames ({eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ "),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Finish a progress bar with a message.
pub fn finish_progress(pb: Option<ProgressBar>, message: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(message.to_string());
    }
}

/// Increment a progress bar.
pub fn inc_progress(pb: Option<&ProgressBar>) {
    if let Some(pb) = pb {
        pb.inc(1);
    }
}
