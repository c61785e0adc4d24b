use thiserror::Error;

/// A record that cannot be turned back into text. Decoding fails as a whole; no partial text is ever produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRecord {
  #[error("token {token:?} has identifier 0, identifiers must be positive")]
  ZeroIdentifier { token: String },

  #[error("identifier {id} is assigned to both {first:?} and {second:?}")]
  DuplicateIdentifier {
    id: u64,
    first: String,
    second: String,
  },

  #[error("data entry {position} references identifier {id}, which is not in the dictionary")]
  UnknownIdentifier { id: u64, position: usize },

  #[error("missing or invalid fields: {0}")]
  Fields(String),
}

#[derive(Error, Debug)]
pub enum Error {
  #[error("malformed record: {0}")]
  MalformedRecord(#[from] MalformedRecord),

  #[error("JSON error: {0}")]
  Json(serde_json::Error),

  #[error("MessagePack encode error: {0}")]
  MessagePackEncode(#[from] rmp_serde::encode::Error),

  #[error("MessagePack decode error: {0}")]
  MessagePackDecode(rmp_serde::decode::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
