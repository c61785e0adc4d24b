use once_cell::sync::Lazy;
use regex::Regex;

// Unicode White_Space plus the ASCII information separators (U+001C..U+001F).
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\x1C-\x1F]+").unwrap());

/// Splits `text` into alternating content and whitespace runs.
///
/// The result always starts and ends with a content run, either of which may be empty, so its length is always odd. Empty text yields a single empty token. Concatenating the tokens reproduces `text` exactly.
pub fn tokenize(text: &str) -> Vec<&str> {
  let mut tokens = Vec::new();
  let mut content_start = 0;
  for m in WHITESPACE.find_iter(text) {
    tokens.push(&text[content_start..m.start()]);
    tokens.push(m.as_str());
    content_start = m.end();
  }
  tokens.push(&text[content_start..]);
  tokens
}
