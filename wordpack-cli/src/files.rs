use anyhow::bail;
use anyhow::Context;
use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tracing::info;
use tracing::warn;
use wordpack::RecordFormat;
use wordpack::SizeReport;

#[derive(Clone, Debug)]
pub struct Options {
  /// None means JSON for compression, and inferred from the record's file extension for decompression.
  pub format: Option<RecordFormat>,
  pub out_dir: PathBuf,
}

/// Final `.suffix` of the file name including its dot, or empty if there is none.
pub fn source_extension(path: &Path) -> String {
  match path.extension() {
    Some(ext) if !ext.is_empty() => format!(".{}", ext.to_string_lossy()),
    _ => String::new(),
  }
}

fn file_stem(path: &Path) -> String {
  path
    .file_stem()
    .map(|s| s.to_string_lossy().into_owned())
    .unwrap_or_default()
}

/// Returns `path` if nothing exists there, otherwise the first free `<stem>_<n><suffix>` next to it.
pub fn unique_path(path: PathBuf) -> PathBuf {
  if !path.exists() {
    return path;
  };
  let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
  let stem = file_stem(&path);
  let suffix = source_extension(&path);
  let mut counter = 1u64;
  loop {
    let candidate = dir.join(format!("{}_{}{}", stem, counter, suffix));
    if !candidate.exists() {
      return candidate;
    };
    counter += 1;
  }
}

// Fails rather than overwrite if the file appeared since `unique_path` checked.
fn write_new(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
  let mut file = OpenOptions::new()
    .write(true)
    .create_new(true)
    .open(path)
    .with_context(|| format!("failed to create {}", path.display()))?;
  file
    .write_all(contents)
    .with_context(|| format!("failed to write {}", path.display()))?;
  Ok(())
}

/// Compresses the UTF-8 text file at `path` and returns where the record was written.
pub fn compress_file(path: &Path, opts: &Options) -> anyhow::Result<PathBuf> {
  let text =
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let format = opts.format.unwrap_or_default();
  let compressed = wordpack::compress(&text, &source_extension(path), format)?;
  info!(
    tokens = compressed.record.data.len(),
    dictionary = compressed.record.words.len(),
    "encoded text"
  );
  match compressed.size {
    SizeReport::NotSmaller { original, encoded } => warn!(
      original,
      encoded,
      "compressed record is not smaller than the original, compression may not be beneficial"
    ),
    SizeReport::Saved {
      original,
      encoded,
      percent,
    } => info!(
      original,
      encoded,
      saved = %format!("{:.1}%", percent),
      "compression saved space"
    ),
  };

  let out = unique_path(opts.out_dir.join(format!(
    "{}{}",
    file_stem(path),
    format.file_extension()
  )));
  write_new(&out, &compressed.bytes)?;
  info!(path = %out.display(), "file compressed");
  Ok(out)
}

/// Restores the text from the record at `path` and returns where it was written.
pub fn decompress_file(path: &Path, opts: &Options) -> anyhow::Result<PathBuf> {
  let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
  let format = opts
    .format
    .or_else(|| {
      path
        .extension()
        .and_then(|ext| RecordFormat::from_file_extension(&ext.to_string_lossy()))
    })
    .unwrap_or_default();
  let decoded = wordpack::decompress(&raw, format)
    .with_context(|| format!("failed to decode {}", path.display()))?;
  if decoded.extension.contains(|c: char| c == '/' || c == '\\') {
    bail!(
      "record extension {:?} contains a path separator",
      decoded.extension
    );
  };

  let out = unique_path(
    opts
      .out_dir
      .join(format!("{}{}", file_stem(path), decoded.extension)),
  );
  write_new(&out, decoded.text.as_bytes())?;
  info!(path = %out.display(), bytes = decoded.text.len(), "file decompressed");
  Ok(out)
}
