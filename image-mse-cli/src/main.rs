//! image-mse CLI - Mean squared error between two images
//!
//! Decode two images and print the mean of the squared per-sample
//! differences.

mod logging;

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::{ColorChoice, Parser, ValueEnum};
use colored::Colorize;
use image_mse::{compare_files, ChannelLayout, Comparison};
use serde::Serialize;
use tracing::info;

use crate::logging::{init_logging, LogLevel};

/// Exit status when `--max-error` is exceeded.
const EXIT_THRESHOLD: u8 = 1;
/// Exit status for load failures and shape mismatches.
const EXIT_ERROR: u8 = 2;

/// Mean squared error between two images
///
/// Both images are decoded, converted to the same channel layout and
/// compared sample by sample. All pixels and channels are pooled into a
/// single number. 0 means the decoded samples are identical.
///
/// The images must have the same width, height and channel count.
#[derive(Parser, Debug)]
#[command(name = "image-mse")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    Compare two images:
        image-mse original.png compressed.jpg

    Compare the file's own channels and bit depth:
        image-mse --channels native a.tiff b.tiff

    CI mode - fail if the error exceeds a threshold:
        image-mse --max-error 2.5 expected.png actual.png

    Output JSON for scripting:
        image-mse --json original.png compressed.jpg

EXIT CODES:
    0 - Success (error within threshold if --max-error specified)
    1 - Error exceeded threshold (--max-error)
    2 - Error (missing argument, file not found, invalid image, size mismatch)")]
struct Cli {
    /// First image
    #[arg(value_name = "IMAGE_0")]
    first: PathBuf,

    /// Second image
    #[arg(value_name = "IMAGE_1")]
    second: PathBuf,

    /// Channel layout both images are converted to before comparing
    ///
    /// rgb: 8-bit R,G,B (grayscale replicated, alpha dropped).
    /// rgba: 8-bit R,G,B,A. luma: 8-bit gray.
    /// native: the file's own channels and bit depth, not rescaled.
    #[arg(
        long,
        default_value = "rgb",
        value_name = "LAYOUT",
        value_parser = ChannelLayout::from_str
    )]
    channels: ChannelLayout,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output JSON (shorthand for --format json)
    #[arg(long, conflicts_with = "format")]
    json: bool,

    /// Quiet mode - only output the number, no error text
    #[arg(long, short = 's')]
    quiet: bool,

    /// Maximum acceptable error (exit code 1 if exceeded)
    #[arg(long, value_name = "MSE")]
    max_error: Option<f64>,

    /// Logging level (error, warn, info, debug, trace)
    ///
    /// If omitted, `IMAGE_MSE_LOG` or `warn` is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorChoice,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `Mean Squared Error: <value>`
    Text,
    /// JSON object with the value, paths and shape
    Json,
    /// Just the number
    Score,
}

#[derive(Serialize)]
struct JsonOutput {
    mean_squared_error: f64,
    first: String,
    second: String,
    width: usize,
    height: usize,
    channels: usize,
    channel_layout: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    threshold_exceeded: Option<bool>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_colors(cli.color);
    init_logging(cli.log_level);

    run(&cli)
}

fn setup_colors(choice: ColorChoice) {
    match choice {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {
            // Colors only appear in error text on stderr
            if !io::stderr().is_terminal() {
                colored::control::set_override(false);
            }
        }
    }
}

fn run(cli: &Cli) -> ExitCode {
    let layout = cli.channels;
    info!(
        first = %cli.first.display(),
        second = %cli.second.display(),
        %layout,
        "comparing images"
    );

    let comparison = match compare_files(&cli.first, &cli.second, layout) {
        Ok(comparison) => comparison,
        Err(e) => {
            report_error(cli, &e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let exceeded = cli
        .max_error
        .map(|max| exceeds_threshold(comparison.error, max));

    if let Err(e) = output_result(cli, &comparison, layout, exceeded) {
        report_error(cli, &e);
        return ExitCode::from(EXIT_ERROR);
    }

    if exceeded == Some(true) {
        ExitCode::from(EXIT_THRESHOLD)
    } else {
        ExitCode::SUCCESS
    }
}

fn report_error(cli: &Cli, e: &dyn std::fmt::Display) {
    if !cli.quiet {
        eprintln!("{}: {}", "error".red().bold(), e);
    }
}

/// Anything not provably within `max` fails the gate, NaN included.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
fn exceeds_threshold(error: f64, max: f64) -> bool {
    !(error <= max)
}

fn get_format(cli: &Cli) -> OutputFormat {
    if cli.json {
        OutputFormat::Json
    } else if cli.quiet {
        OutputFormat::Score
    } else {
        cli.format
    }
}

/// `Debug` is the shortest round-trip rendering and always keeps a
/// fractional part (`0.0`, not `0`).
fn format_value(value: f64) -> String {
    format!("{value:?}")
}

fn output_result(
    cli: &Cli,
    comparison: &Comparison,
    layout: ChannelLayout,
    exceeded: Option<bool>,
) -> Result<(), String> {
    let value = format_value(comparison.error);

    match get_format(cli) {
        OutputFormat::Score => {
            println!("{value}");
        }
        OutputFormat::Text => match (exceeded, cli.max_error) {
            (Some(true), Some(max)) => {
                println!("Mean Squared Error: {value} (exceeds threshold {max})");
            }
            _ => println!("Mean Squared Error: {value}"),
        },
        OutputFormat::Json => {
            let output = JsonOutput {
                mean_squared_error: comparison.error,
                first: cli.first.display().to_string(),
                second: cli.second.display().to_string(),
                width: comparison.shape.width,
                height: comparison.shape.height,
                channels: comparison.shape.channels,
                channel_layout: layout.as_str(),
                threshold_exceeded: exceeded,
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| format!("failed to serialize JSON: {e}"))?;
            println!("{json}");
        }
    }

    Ok(())
}
