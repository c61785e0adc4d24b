use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use std::fmt;

/// One position of the data sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
  /// Substituted token, resolved through the record's dictionary.
  Id(u64),
  /// Token stored verbatim. Numeric-looking tokens are still strings on the wire, so they never collide with identifiers.
  Literal(String),
}

/// Token to identifier mapping, kept in the order it was built or read (ascending identifier for encoder output).
///
/// Persisted as a map. Entries are not validated here; `decode` rejects duplicate or zero identifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dictionary {
  entries: Vec<(String, u64)>,
}

impl Dictionary {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, token: String, id: u64) {
    self.entries.push((token, id));
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Linear lookup. Encoding and decoding build their own hash maps.
  pub fn get(&self, token: &str) -> Option<u64> {
    self
      .entries
      .iter()
      .find(|(t, _)| t == token)
      .map(|(_, id)| *id)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
    self.entries.iter().map(|(t, id)| (t.as_str(), *id))
  }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Dictionary {
  fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
    Self {
      entries: iter.into_iter().map(|(t, id)| (t.into(), id)).collect(),
    }
  }
}

impl Serialize for Dictionary {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.entries.len()))?;
    for (token, id) in self.entries.iter() {
      map.serialize_entry(token, id)?;
    }
    map.end()
  }
}

struct DictionaryVisitor;

impl<'de> Visitor<'de> for DictionaryVisitor {
  type Value = Dictionary;

  fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str("a map from tokens to identifiers")
  }

  fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Dictionary, A::Error> {
    // Don't trust the length prefix of binary formats for the allocation.
    let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0).min(4096));
    while let Some((token, id)) = map.next_entry::<String, u64>()? {
      entries.push((token, id));
    }
    Ok(Dictionary { entries })
  }
}

impl<'de> Deserialize<'de> for Dictionary {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_map(DictionaryVisitor)
  }
}

fn default_extension() -> String {
  ".txt".to_string()
}

/// The persisted unit: everything needed to restore the source text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
  /// Extension of the source file including the leading dot, possibly empty.
  #[serde(default = "default_extension")]
  pub extension: String,
  pub words: Dictionary,
  pub data: Vec<Entry>,
}

impl Record {
  pub fn generate_inspection_message(&self) -> String {
    let mut uses = FxHashMap::<u64, usize>::default();
    let mut literal_count = 0;
    let mut literal_chars = 0;
    for entry in self.data.iter() {
      match entry {
        Entry::Id(id) => *uses.entry(*id).or_default() += 1,
        Entry::Literal(token) => {
          literal_count += 1;
          literal_chars += token.chars().count();
        }
      };
    }
    let substituted = self.data.len() - literal_count;

    let mut msg = String::new();
    msg.push_str(&format!("Extension: {:?}\n", self.extension));
    msg.push_str(&format!(
      "Data: {} entries, {} substituted ({:.1}%), {} literal ({} chars)\n",
      self.data.len(),
      substituted,
      if self.data.is_empty() {
        0.0
      } else {
        substituted as f64 * 100.0 / self.data.len() as f64
      },
      literal_count,
      literal_chars,
    ));
    msg.push_str(&format!("Dictionary: {} tokens\n", self.words.len()));
    if self.words.is_empty() {
      return msg;
    };
    msg.push_str(&format!("{:>8}  {:>8}  token\n", "id", "uses"));
    for (token, id) in self.words.iter().sorted_by_key(|(_, id)| *id) {
      let n = uses.get(&id).copied().unwrap_or(0);
      msg.push_str(&format!("{:>8}  {:>8}  {:?}\n", id, n, token));
    }
    msg
  }
}
