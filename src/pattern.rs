//! Wildcard name matching.

use crate::error::{FscoutError, Result};
use regex::{Regex, RegexBuilder};

/// A compiled `*`/`?` wildcard.
///
/// `*` matches any run of characters (including none), `?` exactly one.
/// Matching is case-insensitive and anchored to the whole name, never a
/// substring test: `*.txt` accepts `readme.TXT` but not `notes`, and
/// `a?c` accepts `abc` but neither `ac` nor `abbc`.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    raw: String,
    regex: Regex,
}

impl WildcardPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let mut source = String::with_capacity(pattern.len() + 2);
        let mut buf = [0u8; 4];
        source.push('^');
        for ch in pattern.chars() {
            match ch {
                '*' => source.push_str(".*"),
                '?' => source.push('.'),
                _ => source.push_str(&regex::escape(ch.encode_utf8(&mut buf))),
            }
        }
        source.push('$');

        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|source| FscoutError::Pattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            raw: pattern.to_string(),
            regex,
        })
    }

    /// Whether `name` satisfies the wildcard.
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}
