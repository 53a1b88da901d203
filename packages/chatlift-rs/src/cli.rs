//! Command line arguments backing the `chatlift` binary.
use chatlift_rs::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
  name = "chatlift",
  about = "Rebuild chat conversations from the OCR output of chat screenshots",
  version
)]
pub struct Args {
  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print version information
  Version,
  /// Reconstruct messages from saved OCR dumps and write them as one chat history
  Parse {
    /// OCR dump files, or directories containing them
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file path for the chat history
    #[arg(long, short = 'o', default_value = "chat_history.csv")]
    output_file_path: PathBuf,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Keep rows in input order instead of sorting by date and time
    #[arg(long)]
    no_sort: bool,

    /// Number of screenshots processed at once
    #[arg(long, default_value = "4")]
    max_concurrent: usize,

    /// Vertical distance in pixels within which two boxes share a line
    #[arg(long)]
    line_tolerance: Option<f32>,

    /// Fraction of the image height treated as header
    #[arg(long)]
    header_cutoff: Option<f32>,

    /// Fraction of the image width a timestamp must reach to count as outgoing
    #[arg(long)]
    outgoing_side: Option<f32>,

    /// Give the last message of each screenshot the last timestamp seen
    #[arg(long)]
    stamp_trailing: bool,

    /// Only log warnings and errors
    #[arg(long, short = 'q')]
    quiet: bool,
  },
}
