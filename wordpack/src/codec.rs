use crate::error::MalformedRecord;
use crate::record::Dictionary;
use crate::record::Entry;
use crate::record::Record;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::cmp::Reverse;

/// Occurrence counts per distinct token. Lives only for the duration of one `encode`.
struct FrequencyTable<'a> {
  index: FxHashMap<&'a str, usize>,
  // Distinct tokens in order of first occurrence, with their counts.
  counts: Vec<(&'a str, usize)>,
}

impl<'a> FrequencyTable<'a> {
  fn new() -> Self {
    Self {
      index: FxHashMap::default(),
      counts: Vec::new(),
    }
  }

  fn add(&mut self, token: &'a str) {
    match self.index.get(token) {
      Some(&i) => self.counts[i].1 += 1,
      None => {
        self.index.insert(token, self.counts.len());
        self.counts.push((token, 1));
      }
    };
  }

  /// Most frequent first, then shortest. The sort is stable, so tokens with equal keys stay in first-occurrence order.
  fn ranked(self) -> Vec<(&'a str, usize)> {
    self
      .counts
      .into_iter()
      .sorted_by_key(|&(token, count)| (Reverse(count), token.chars().count()))
      .collect_vec()
  }
}

/// Whether a token gets a dictionary entry: it repeats, or it is longer than three characters.
pub fn is_worth_substituting(token: &str, frequency: usize) -> bool {
  frequency > 1 || token.chars().count() > 3
}

/// Builds the record for `tokens`.
///
/// Every distinct token is ranked and numbered from 1 in rank order, but only tokens passing `is_worth_substituting` are recorded in the dictionary, so the identifiers present are generally not contiguous. All other tokens are stored as literals.
pub fn encode(tokens: &[&str], extension: &str) -> Record {
  let mut freq = FrequencyTable::new();
  for &token in tokens {
    freq.add(token);
  }

  let mut words = Dictionary::new();
  let mut ids = FxHashMap::<&str, u64>::default();
  for (rank, (token, count)) in freq.ranked().into_iter().enumerate() {
    if !is_worth_substituting(token, count) {
      continue;
    };
    let id = rank as u64 + 1;
    words.insert(token.to_string(), id);
    ids.insert(token, id);
  }

  let data = tokens
    .iter()
    .map(|&token| match ids.get(token) {
      Some(&id) => Entry::Id(id),
      None => Entry::Literal(token.to_string()),
    })
    .collect_vec();

  Record {
    extension: extension.to_string(),
    words,
    data,
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
  pub text: String,
  pub extension: String,
}

/// Restores the text of `record`. Fails without producing any text if the dictionary or data sequence is inconsistent.
pub fn decode(record: &Record) -> Result<Decoded, MalformedRecord> {
  let mut tokens_by_id = FxHashMap::<u64, &str>::default();
  for (token, id) in record.words.iter() {
    if id == 0 {
      return Err(MalformedRecord::ZeroIdentifier {
        token: token.to_string(),
      });
    };
    if let Some(first) = tokens_by_id.insert(id, token) {
      return Err(MalformedRecord::DuplicateIdentifier {
        id,
        first: first.to_string(),
        second: token.to_string(),
      });
    };
  }

  let mut text = String::new();
  for (position, entry) in record.data.iter().enumerate() {
    match entry {
      Entry::Id(id) => {
        let token = tokens_by_id
          .get(id)
          .ok_or(MalformedRecord::UnknownIdentifier { id: *id, position })?;
        text.push_str(token);
      }
      Entry::Literal(token) => text.push_str(token),
    };
  }

  Ok(Decoded {
    text,
    extension: record.extension.clone(),
  })
}
