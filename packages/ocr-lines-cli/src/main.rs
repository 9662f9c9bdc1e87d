mod cli;
mod source;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Commands, OutputFormat};
use ocr_lines::{analyze_source, ReconstructorConfig};
use source::JsonSource;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // -v/-q win over RUST_LOG; stdout carries the lines, so logs go to stderr
  let filter = if args.verbose {
    EnvFilter::new("debug")
  } else if args.quiet {
    EnvFilter::new("error")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .compact()
    .init();

  match args.command {
    Commands::Version => {
      println!("ocr-lines {}", env!("CARGO_PKG_VERSION"));
    }
    Commands::Analyze {
      input,
      format,
      row_tolerance,
      separator,
      batch,
    } => {
      let config = ReconstructorConfig::default()
        .with_row_tolerance(row_tolerance)
        .with_separator(separator);
      let label = input
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string());
      let source = JsonSource::new(input, batch);
      let analysis = analyze_source(&source, &config)
        .await
        .with_context(|| format!("Failed to analyze detector output from {label}"))?;

      match format {
        OutputFormat::Text => {
          for line in &analysis.lines {
            println!("{line}");
          }
        }
        OutputFormat::Json => {
          let json = serde_json::to_string(&analysis).context("Failed to encode analysis")?;
          println!("{json}");
        }
      }
    }
  }

  Ok(())
}
