//! Platescan - license plate recognition CLI.
//!
//! Submits still images and sampled video frames to a remote plate
//! recognition service, parses the detections and writes annotated copies.

#![warn(missing_docs)]

pub mod annotate;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod recognition;
pub mod shell;
pub mod video;

use annotate::Annotator;
use clap::Parser;
use cli::{Cli, Command, ConfigAction, GlobalArgs};
use config::{
    Config, config_file_path, load_config_file, resolve_api_key, save_config, validate_config,
};
use pipeline::ImageOutcome;
use recognition::RecognitionClient;
use shell::{PipelineBackend, Session};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub use error::{Error, Result};

/// Main entry point for platescan CLI.
pub fn run() -> Result<()> {
    // Must precede parsing so `.env` values reach clap's `env` fallbacks
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.global.verbose, cli.global.quiet);

    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring unreadable .env file: {e}"),
    }

    let config_path = match &cli.global.config {
        Some(path) => path.clone(),
        None => config_file_path()?,
    };

    // Config management does not need a credential
    if let Some(Command::Config { action }) = cli.command {
        return handle_config_command(action, &config_path);
    }

    debug!("Loading configuration: {}", config_path.display());
    let mut config = load_config_file(&config_path)?;
    apply_overrides(&mut config, &cli.global);
    validate_config(&config)?;

    let api_key = resolve_api_key(cli.global.api_key.as_deref(), &config)?;
    let client = RecognitionClient::new(&config.api, &api_key)?;
    let annotator = Annotator::from_config(config.paths.results.clone(), &config.annotation);
    let progress_enabled = cli.global.progress_enabled();

    match cli.command {
        Some(Command::Image { path }) => run_image(&path, &client, &annotator),
        Some(Command::Video { path }) => {
            run_video(&path, &config, &client, &annotator, progress_enabled)
        }
        Some(Command::Config { .. }) | None => {
            let backend = PipelineBackend::new(
                &client,
                &annotator,
                &config.paths,
                &config.video,
                progress_enabled,
            );
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            Session::new(&backend, stdin.lock(), stdout.lock()).run()
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // Menus and listings own stdout
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Apply command line overrides on top of the loaded configuration.
fn apply_overrides(config: &mut Config, args: &GlobalArgs) {
    if let Some(country) = &args.country {
        config.api.country.clone_from(country);
    }
    if let Some(dir) = &args.images_dir {
        config.paths.images.clone_from(dir);
    }
    if let Some(dir) = &args.videos_dir {
        config.paths.videos.clone_from(dir);
    }
    if let Some(dir) = &args.results_dir {
        config.paths.results.clone_from(dir);
    }
}

#[allow(clippy::print_stdout)]
fn run_image(path: &Path, client: &RecognitionClient, annotator: &Annotator) -> Result<()> {
    let detections = match pipeline::recognize_image(path, client)? {
        ImageOutcome::NoResponse => {
            warn!("No usable response for {}", path.display());
            println!("Error in OCR processing.");
            return Ok(());
        }
        ImageOutcome::Detections(detections) => detections,
    };

    if detections.is_empty() {
        println!("No plates detected.");
        return Ok(());
    }

    let mut saved: Vec<PathBuf> = Vec::with_capacity(detections.len());
    for (i, detection) in detections.iter().enumerate() {
        println!("{}", output::report::detection_line(i + 1, detection));
        saved.push(annotator.annotate(path, detection, None)?);
    }

    for file in &saved {
        println!("Saved annotated image as: {}", file.display());
    }
    info!("Annotated {} plate(s)", saved.len());
    Ok(())
}

#[allow(clippy::print_stdout)]
fn run_video(
    path: &Path,
    config: &Config,
    client: &RecognitionClient,
    annotator: &Annotator,
    progress_enabled: bool,
) -> Result<()> {
    let results = video::process_video(path, &config.video, client, annotator, progress_enabled)?;
    println!("Video processing complete.");

    if results.is_empty() {
        println!("No plates detected in the video.");
        return Ok(());
    }

    println!("All Detected Plates:");
    for (i, result) in results.iter().enumerate() {
        println!("{}", output::report::frame_result_line(i + 1, result));
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction, path: &Path) -> Result<()> {
    match action {
        ConfigAction::Init => {
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::default(), path)?;
                println!("Created configuration file: {}", path.display());
                println!("\nNext steps:");
                println!("  export {}=<your key>", constants::API_KEY_ENV);
                println!("  platescan");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let mut config = load_config_file(path)?;
            if config.api.secret_key.is_some() {
                config.api.secret_key = Some("<redacted>".to_string());
            }
            let rendered =
                toml::to_string_pretty(&config).map_err(|e| Error::ConfigSerialize { source: e })?;
            println!("{rendered}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}
