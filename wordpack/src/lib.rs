pub mod codec;
pub mod error;
pub mod format;
pub mod record;
pub mod tokenize;

use codec::decode;
use codec::encode;
pub use codec::Decoded;
pub use error::Error;
pub use error::MalformedRecord;
pub use error::Result;
pub use format::RecordFormat;
pub use record::Dictionary;
pub use record::Entry;
pub use record::Record;
use tokenize::tokenize;

/// How the serialized record compares to the UTF-8 size of the source text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SizeReport {
  Saved {
    original: usize,
    encoded: usize,
    percent: f64,
  },
  NotSmaller { original: usize, encoded: usize },
}

impl SizeReport {
  pub fn measure(original: usize, encoded: usize) -> Self {
    if encoded >= original {
      SizeReport::NotSmaller { original, encoded }
    } else {
      SizeReport::Saved {
        original,
        encoded,
        percent: (1.0 - encoded as f64 / original as f64) * 100.0,
      }
    }
  }
}

pub struct Compressed {
  pub record: Record,
  /// `record` serialized in the requested format.
  pub bytes: Vec<u8>,
  pub size: SizeReport,
}

/// Tokenizes and encodes `text`, then serializes the record. The record is produced even when it is not smaller than the text; `size` reports that.
pub fn compress(text: &str, extension: &str, format: RecordFormat) -> Result<Compressed> {
  let record = encode(&tokenize(text), extension);
  let bytes = format.to_vec(&record)?;
  let size = SizeReport::measure(text.len(), bytes.len());
  Ok(Compressed {
    record,
    bytes,
    size,
  })
}

pub fn decompress(raw: &[u8], format: RecordFormat) -> Result<Decoded> {
  let record = format.from_slice(raw)?;
  Ok(decode(&record)?)
}

#[cfg(test)]
mod tests {
  use crate::compress;
  use crate::decompress;
  use crate::Error;
  use crate::MalformedRecord;
  use crate::RecordFormat;
  use crate::SizeReport;

  #[test]
  fn test_size_report() {
    assert_eq!(SizeReport::measure(0, 40), SizeReport::NotSmaller {
      original: 0,
      encoded: 40
    });
    assert_eq!(SizeReport::measure(40, 40), SizeReport::NotSmaller {
      original: 40,
      encoded: 40
    });
    match SizeReport::measure(200, 50) {
      SizeReport::Saved { percent, .. } => assert!((percent - 75.0).abs() < 1e-9),
      other => panic!("{:?}", other),
    };
  }

  #[test]
  fn test_compress_decompress() {
    let text = "repeat repeat repeat repeat repeat repeat repeat repeat repeat repeat\n".repeat(20);
    for format in [RecordFormat::Json, RecordFormat::MessagePack] {
      let compressed = compress(&text, ".txt", format).unwrap();
      assert!(matches!(compressed.size, SizeReport::Saved { .. }));
      let decoded = decompress(&compressed.bytes, format).unwrap();
      assert_eq!(decoded.text, text);
      assert_eq!(decoded.extension, ".txt");
    }
  }

  #[test]
  fn test_compress_small_text_still_produces_record() {
    let compressed = compress("hi", "", RecordFormat::Json).unwrap();
    assert!(matches!(compressed.size, SizeReport::NotSmaller {
      original: 2,
      ..
    }));
    assert_eq!(
      decompress(&compressed.bytes, RecordFormat::Json)
        .unwrap()
        .text,
      "hi"
    );
  }

  #[test]
  fn test_decompress_reads_records_written_elsewhere() {
    let raw = br#"{"extension":".txt","words":{" ":1,"the":2,"cat":3},"data":[2,1,3,1,"sat"]}"#;
    let decoded = decompress(raw, RecordFormat::Json).unwrap();
    assert_eq!(decoded.text, "the cat sat");
  }

  #[test]
  fn test_decompress_unknown_identifier() {
    let raw = br#"{"extension":".txt","words":{"the":1},"data":[1," ",7]}"#;
    assert!(matches!(
      decompress(raw, RecordFormat::Json),
      Err(Error::MalformedRecord(MalformedRecord::UnknownIdentifier {
        id: 7,
        position: 2
      }))
    ));
  }
}
