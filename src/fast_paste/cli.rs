//! Command-line interface for the Fast Paste image tools.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::background_service::BackgroundRemovalService;
use crate::application::error::ApplicationError;
use crate::domain::threshold::Threshold;
use crate::infrastructure::image_processor::DefaultImageProcessor;

pub const USAGE: &str = "Usage: fast_paste remove_white_background <input> <output> [threshold]";

/// Fast Paste image utilities
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log each pipeline stage
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Make near-white pixels transparent and save the result as PNG
    #[command(name = "remove_white_background", allow_negative_numbers = true)]
    RemoveWhiteBackground(RemoveWhiteBackgroundArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct RemoveWhiteBackgroundArgs {
    /// Source image (PNG, JPEG, ...)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Destination PNG, overwritten if it exists
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Pixels with R, G and B all strictly above this value become transparent
    #[arg(default_value_t = Threshold::DEFAULT.value())]
    pub threshold: i32,

    /// Print a JSON report instead of the confirmation line
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// Required arguments were missing and usage was printed.
    Usage,
}

pub async fn execute(cli: Cli) -> anyhow::Result<Status> {
    let Some(Commands::RemoveWhiteBackground(args)) = cli.command else {
        println!("{}", USAGE);
        return Ok(Status::Usage);
    };
    let (Some(input), Some(output)) = (args.input.as_deref(), args.output.as_deref()) else {
        println!("{}", USAGE);
        return Ok(Status::Usage);
    };

    let input = resolve(input)?;
    let output = resolve(output)?;

    let service = BackgroundRemovalService::new(Arc::new(DefaultImageProcessor::new()));
    let report = service
        .remove_white_background(&input, &output, Threshold::new(args.threshold))
        .await
        .with_context(|| format!("failed to process {}", input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Processed: {} -> {}", input.display(), output.display());
    }
    Ok(Status::Success)
}

/// Maps the outcome of [`execute`] to the process exit status: 0 on success,
/// 1 after printing usage, and the error's own code on failure.
pub fn exit_code(outcome: &anyhow::Result<Status>) -> u8 {
    match outcome {
        Ok(Status::Success) => 0,
        Ok(Status::Usage) => 1,
        Err(e) => e
            .downcast_ref::<ApplicationError>()
            .map_or(1, ApplicationError::exit_code),
    }
}

fn resolve(path: &Path) -> Result<PathBuf, ApplicationError> {
    std::path::absolute(path).map_err(|e| {
        ApplicationError::InvalidArgument(format!("cannot resolve path {}: {}", path.display(), e))
    })
}
