//! CLI argument definitions.

use crate::constants::API_KEY_ENV;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// License plate recognition for images and videos.
#[derive(Debug, Parser)]
#[command(name = "platescan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run. Starts the interactive shell when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options shared by every command.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Recognize plates in one image and annotate every detection.
    Image {
        /// Image file to process.
        path: PathBuf,
    },
    /// Sample a video and annotate every detection.
    Video {
        /// Video file to process.
        path: PathBuf,
    },
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Options shared by every command.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Configuration file (default: platform config directory).
    #[arg(long, global = true, env = "PLATESCAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Recognition API credential.
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Country code passed to the recognizer (e.g. us, eu).
    #[arg(long, global = true, value_parser = parse_country, env = "PLATESCAN_COUNTRY")]
    pub country: Option<String>,

    /// Directory listed for images.
    #[arg(long, global = true, env = "PLATESCAN_IMAGES_DIR")]
    pub images_dir: Option<PathBuf>,

    /// Directory listed for videos.
    #[arg(long, global = true, env = "PLATESCAN_VIDEOS_DIR")]
    pub videos_dir: Option<PathBuf>,

    /// Directory receiving annotated images.
    #[arg(long, global = true, env = "PLATESCAN_RESULTS_DIR")]
    pub results_dir: Option<PathBuf>,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable progress bars.
    #[arg(long, global = true)]
    pub no_progress: bool,
}

impl GlobalArgs {
    /// Whether progress bars should be drawn.
    pub fn progress_enabled(&self) -> bool {
        !self.quiet && !self.no_progress
    }
}

/// Parse and normalize a country code.
fn parse_country(s: &str) -> Result<String, String> {
    let code = s.trim();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(format!("'{s}' is not a valid country code"));
    }
    Ok(code.to_ascii_lowercase())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_country() {
        assert_eq!(parse_country("US").ok(), Some("us".to_string()));
        assert_eq!(parse_country(" eu ").ok(), Some("eu".to_string()));
        assert!(parse_country("").is_err());
        assert!(parse_country("u-s").is_err());
    }

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::try_parse_from(["platescan"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.global.progress_enabled());
    }

    #[test]
    fn test_cli_parse_image() {
        let cli = Cli::try_parse_from(["platescan", "image", "img/car.jpg", "-q"]).unwrap();
        match cli.command {
            Some(Command::Image { path }) => assert_eq!(path, PathBuf::from("img/car.jpg")),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(cli.global.quiet);
        assert!(!cli.global.progress_enabled());
    }

    #[test]
    fn test_cli_parse_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "platescan",
            "video",
            "vid/drive.mp4",
            "--country",
            "EU",
            "--results-dir",
            "out",
            "-vv",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Command::Video { .. })));
        assert_eq!(cli.global.country.as_deref(), Some("eu"));
        assert_eq!(cli.global.results_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn test_cli_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["platescan", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));
    }

    #[test]
    fn test_cli_rejects_bad_country() {
        assert!(Cli::try_parse_from(["platescan", "--country", "1"]).is_err());
    }
}
