mod cli;

use chatlift_rs::{ChatHistoryGenerator, ChatHistoryOptions, ParserConfig};
use clap::Parser;
use cli::{Args, Commands};
use tracing::Level;

#[tokio::main]
async fn main() {
  let args = Args::parse();

  match args.command {
    Commands::Version => {
      println!("chatlift {}", env!("CARGO_PKG_VERSION"));
    }
    Commands::Parse {
      inputs,
      output_file_path,
      format,
      no_sort,
      max_concurrent,
      line_tolerance,
      header_cutoff,
      outgoing_side,
      stamp_trailing,
      quiet,
    } => {
      tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(if quiet { Level::WARN } else { Level::INFO })
        .init();

      let defaults = ParserConfig::default();
      let parser_config = ParserConfig {
        line_tolerance: line_tolerance.unwrap_or(defaults.line_tolerance),
        header_cutoff_ratio: header_cutoff.unwrap_or(defaults.header_cutoff_ratio),
        outgoing_side_ratio: outgoing_side.unwrap_or(defaults.outgoing_side_ratio),
        stamp_trailing_message: stamp_trailing,
        ..defaults
      };

      let options = ChatHistoryOptions {
        inputs,
        output_file_path,
        format,
        parser_config,
        max_concurrent_files: max_concurrent,
        sort_rows: !no_sort,
      };

      match ChatHistoryGenerator::new(options).generate().await {
        Ok(result) => {
          if !result.success {
            eprintln!(
              "Error: {} of {} screenshots could not be processed",
              result.failed_images, result.total_images
            );
            std::process::exit(1);
          }
        }
        Err(e) => {
          eprintln!("Error: {}", e);
          std::process::exit(1);
        }
      }
    }
  }
}
