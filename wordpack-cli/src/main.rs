mod files;
mod shell;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use files::compress_file;
use files::decompress_file;
use files::Options;
use std::io::stdin;
use std::io::stdout;
use std::path::PathBuf;
use wordpack::RecordFormat;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
  Json,
  Msgpack,
}

impl From<Format> for RecordFormat {
  fn from(f: Format) -> Self {
    match f {
      Format::Json => RecordFormat::Json,
      Format::Msgpack => RecordFormat::MessagePack,
    }
  }
}

#[derive(Debug, Args)]
struct OutputArgs {
  /// Record format. When decompressing, defaults to the one implied by the record file's extension; otherwise JSON.
  #[arg(short, long, value_enum)]
  format: Option<Format>,

  /// Directory to write output files to. Existing files are never overwritten.
  #[arg(short, long, default_value = ".")]
  out_dir: PathBuf,
}

impl OutputArgs {
  fn into_options(self) -> Options {
    Options {
      format: self.format.map(RecordFormat::from),
      out_dir: self.out_dir,
    }
  }
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Compress a UTF-8 text file into a record.
  Compress {
    file: PathBuf,
    #[command(flatten)]
    output: OutputArgs,
  },
  /// Restore the original text from a record.
  Decompress {
    file: PathBuf,
    #[command(flatten)]
    output: OutputArgs,
  },
  /// Prompt for operations on stdin until `exit`.
  Interactive {
    #[command(flatten)]
    output: OutputArgs,
  },
}

#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt::init();

  let cli = Cli::parse();
  match cli.command {
    Command::Compress { file, output } => {
      let out = compress_file(&file, &output.into_options())?;
      println!("File compressed: {}", out.display());
    }
    Command::Decompress { file, output } => {
      let out = decompress_file(&file, &output.into_options())?;
      println!("File decompressed: {}", out.display());
    }
    Command::Interactive { output } => {
      shell::run(stdin().lock(), stdout(), &output.into_options())?;
    }
  };
  Ok(())
}

#[cfg(test)]
mod tests {
  use crate::Cli;
  use crate::Command;
  use clap::CommandFactory;
  use clap::Parser;
  use std::path::PathBuf;
  use wordpack::RecordFormat;

  #[test]
  fn test_cli_definition() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_compress_args() {
    let cli = Cli::parse_from(["wordpack", "compress", "a.txt", "-f", "msgpack", "-o", "out"]);
    let Command::Compress { file, output } = cli.command else {
      panic!("expected compress");
    };
    assert_eq!(file, PathBuf::from("a.txt"));
    let opts = output.into_options();
    assert_eq!(opts.format, Some(RecordFormat::MessagePack));
    assert_eq!(opts.out_dir, PathBuf::from("out"));
  }

  #[test]
  fn test_parse_defaults() {
    let cli = Cli::parse_from(["wordpack", "decompress", "a.json"]);
    let Command::Decompress { output, .. } = cli.command else {
      panic!("expected decompress");
    };
    let opts = output.into_options();
    assert_eq!(opts.format, None);
    assert_eq!(opts.out_dir, PathBuf::from("."));
  }
}
