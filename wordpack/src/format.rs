use crate::error::Error;
use crate::error::MalformedRecord;
use crate::error::Result;
use crate::record::Record;
use serde_json::error::Category;

/// Wire format of a persisted record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecordFormat {
  /// Compact JSON with non-ASCII characters left unescaped.
  #[default]
  Json,
  /// MessagePack with named fields, so records keep the same field names as JSON.
  MessagePack,
}

impl RecordFormat {
  /// File extension for records of this format, including the leading dot.
  pub fn file_extension(self) -> &'static str {
    match self {
      RecordFormat::Json => ".json",
      RecordFormat::MessagePack => ".msgpack",
    }
  }

  /// Accepts an extension with or without its leading dot, in any case.
  pub fn from_file_extension(ext: &str) -> Option<Self> {
    match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
      "json" => Some(RecordFormat::Json),
      "msgpack" | "mpk" => Some(RecordFormat::MessagePack),
      _ => None,
    }
  }

  pub fn to_vec(self, record: &Record) -> Result<Vec<u8>> {
    match self {
      RecordFormat::Json => serde_json::to_vec(record).map_err(Error::Json),
      RecordFormat::MessagePack => Ok(rmp_serde::to_vec_named(record)?),
    }
  }

  pub fn from_slice(self, raw: &[u8]) -> Result<Record> {
    match self {
      RecordFormat::Json => serde_json::from_slice(raw).map_err(|e| match e.classify() {
        // Well-formed JSON that doesn't fit the record schema.
        Category::Data => MalformedRecord::Fields(e.to_string()).into(),
        _ => Error::Json(e),
      }),
      RecordFormat::MessagePack => rmp_serde::from_slice(raw).map_err(|e| match e {
        rmp_serde::decode::Error::Syntax(msg) => MalformedRecord::Fields(msg).into(),
        e => Error::MessagePackDecode(e),
      }),
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::codec::encode;
  use crate::error::Error;
  use crate::error::MalformedRecord;
  use crate::format::RecordFormat;
  use crate::tokenize::tokenize;

  #[test]
  fn test_json_output_is_compact_and_unescaped() {
    let record = encode(&tokenize("naïve naïve\ttab"), ".txt");
    let raw = RecordFormat::Json.to_vec(&record).unwrap();
    assert_eq!(
      String::from_utf8(raw).unwrap(),
      r#"{"extension":".txt","words":{"naïve":1},"data":[1," ",1,"\t","tab"]}"#
    );
  }

  #[test]
  fn test_both_formats_restore_the_record() {
    let record = encode(&tokenize("alpha beta alpha 12 12 \u{1F600}"), ".rs");
    for format in [RecordFormat::Json, RecordFormat::MessagePack] {
      let raw = format.to_vec(&record).unwrap();
      assert_eq!(format.from_slice(&raw).unwrap(), record);
    }
  }

  #[test]
  fn test_messagepack_keeps_field_names() {
    let record = encode(&tokenize("x"), ".txt");
    let raw = RecordFormat::MessagePack.to_vec(&record).unwrap();
    for name in [&b"extension"[..], b"words", b"data"] {
      assert!(raw.windows(name.len()).any(|w| w == name));
    }
  }

  #[test]
  fn test_schema_violations_are_malformed_records() {
    for json in [
      r#"{"extension":".txt","data":[]}"#,
      r#"{"extension":".txt","words":{}}"#,
      r#"{"words":{"a":"one"},"data":[]}"#,
      r#"{"words":{},"data":[2.5]}"#,
      r#"[]"#,
    ] {
      match RecordFormat::Json.from_slice(json.as_bytes()) {
        Err(Error::MalformedRecord(MalformedRecord::Fields(_))) => {}
        other => panic!("{}: {:?}", json, other),
      };
    }
  }

  #[test]
  fn test_invalid_json_is_a_json_error() {
    for raw in [&b"{\"words\":"[..], b"not json", b""] {
      assert!(matches!(
        RecordFormat::Json.from_slice(raw),
        Err(Error::Json(_))
      ));
    }
  }

  #[test]
  fn test_messagepack_schema_violation() {
    #[derive(serde::Serialize)]
    struct Partial {
      extension: String,
    }
    let raw = rmp_serde::to_vec_named(&Partial {
      extension: ".txt".to_string(),
    })
    .unwrap();
    assert!(matches!(
      RecordFormat::MessagePack.from_slice(&raw),
      Err(Error::MalformedRecord(MalformedRecord::Fields(_)))
    ));
  }

  #[test]
  fn test_format_from_file_extension() {
    assert_eq!(
      RecordFormat::from_file_extension(".json"),
      Some(RecordFormat::Json)
    );
    assert_eq!(
      RecordFormat::from_file_extension("JSON"),
      Some(RecordFormat::Json)
    );
    assert_eq!(
      RecordFormat::from_file_extension(".msgpack"),
      Some(RecordFormat::MessagePack)
    );
    assert_eq!(
      RecordFormat::from_file_extension("mpk"),
      Some(RecordFormat::MessagePack)
    );
    assert_eq!(RecordFormat::from_file_extension(".txt"), None);
    assert_eq!(RecordFormat::from_file_extension(""), None);
  }
}
