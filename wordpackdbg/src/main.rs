use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use wordpack::RecordFormat;

#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
  /// Path to the record file.
  record_file: PathBuf,

  /// Record format: `json` or `msgpack`. Defaults to the one implied by the file extension, then JSON.
  #[arg(short, long)]
  format: Option<String>,
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt::init();

  let cli = Cli::parse();

  let format = match cli.format {
    Some(name) => RecordFormat::from_file_extension(&name)
      .with_context(|| format!("unknown record format {:?}", name))?,
    None => cli
      .record_file
      .extension()
      .and_then(|ext| RecordFormat::from_file_extension(&ext.to_string_lossy()))
      .unwrap_or_default(),
  };
  let raw = fs::read(&cli.record_file)
    .with_context(|| format!("failed to read {}", cli.record_file.display()))?;
  info!(size = raw.len(), ?format, "loading record");
  let record = format.from_slice(&raw)?;

  println!("{}", record.generate_inspection_message());
  Ok(())
}
