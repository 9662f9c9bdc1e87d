//! Command line arguments backing the `ocr-lines` binary.
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
  name = "ocr-lines",
  about = "Rebuilds reading-order text lines from raw OCR detector output",
  version
)]
pub struct Args {
  /// Log normalization details to stderr
  #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
  pub verbose: bool,

  /// Only log errors
  #[arg(long, short = 'q', global = true)]
  pub quiet: bool,

  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print version information
  Version,
  /// Group detector fragments into lines
  Analyze {
    /// Detector output as JSON; reads stdin when omitted or `-`
    input: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Fraction of the mean row height two fragment centers may differ by
    #[arg(long, default_value_t = 0.5, value_parser = parse_tolerance)]
    row_tolerance: f64,

    /// Text placed between fragments on the same line
    #[arg(long, default_value = "   ")]
    separator: String,

    /// Input holds one result per image; only the first image is used
    #[arg(long)]
    batch: bool,
  },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
  /// One line of text per row
  Text,
  /// `{"text": ..., "lines": [...]}`
  Json,
}

fn parse_tolerance(s: &str) -> Result<f64, String> {
  let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
  if value.is_finite() && value > 0.0 {
    Ok(value)
  } else {
    Err(format!("row tolerance must be a positive number, got {s}"))
  }
}
