use crate::files::compress_file;
use crate::files::decompress_file;
use crate::files::Options;
use std::io::BufRead;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tracing::error;

type Operation = fn(&Path, &Options) -> anyhow::Result<PathBuf>;

/// Prints `question` and reads one trimmed line, or None at end of input.
fn prompt(
  input: &mut impl BufRead,
  output: &mut impl Write,
  question: &str,
) -> anyhow::Result<Option<String>> {
  write!(output, "{}", question)?;
  output.flush()?;
  let mut line = String::new();
  if input.read_line(&mut line)? == 0 {
    return Ok(None);
  };
  Ok(Some(line.trim().to_string()))
}

fn run_operation(
  output: &mut impl Write,
  path: &str,
  opts: &Options,
  op: Operation,
  done: &str,
  failed: &str,
) -> anyhow::Result<()> {
  let path = Path::new(path);
  if !path.is_file() {
    writeln!(output, "File not found")?;
    return Ok(());
  };
  match op(path, opts) {
    Ok(out) => writeln!(output, "{}: {}", done, out.display())?,
    Err(err) => {
      error!(path = %path.display(), "{:#}", err);
      writeln!(output, "{}: {:#}", failed, err)?;
    }
  };
  Ok(())
}

/// Menu loop. Operation failures are reported and the loop continues; only failures of `input` or `output` end it early.
pub fn run(mut input: impl BufRead, mut output: impl Write, opts: &Options) -> anyhow::Result<()> {
  loop {
    writeln!(output)?;
    writeln!(output, "=== Text File Compressor ===")?;
    writeln!(output, "1. compress - Compress file")?;
    writeln!(output, "2. decompress - Decompress file")?;
    writeln!(output, "3. exit - Exit")?;
    let Some(choice) = prompt(&mut input, &mut output, "Choose operation: ")? else {
      break;
    };
    let (question, op, done, failed): (_, Operation, _, _) = match choice.to_lowercase().as_str() {
      "1" | "compress" => (
        "Enter text file path: ",
        compress_file,
        "File compressed",
        "Compression error",
      ),
      "2" | "decompress" => (
        "Enter record file path: ",
        decompress_file,
        "File decompressed",
        "Decompression error",
      ),
      "3" | "exit" => break,
      _ => {
        writeln!(output, "Invalid option")?;
        continue;
      }
    };
    let Some(path) = prompt(&mut input, &mut output, question)? else {
      break;
    };
    run_operation(&mut output, &path, opts, op, done, failed)?;
  }
  writeln!(output, "Goodbye!")?;
  Ok(())
}
