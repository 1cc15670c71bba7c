use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    /// Maximal runs of Unicode word characters (letters, digits, underscore).
    static ref WORD_RE: Regex = Regex::new(r"\w+").expect("valid regex");
}

/// Lowercase `text` and iterate over its word runs, duplicates included.
pub(crate) fn words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}

/// Tokenize text into the set of distinct lowercase words it contains.
///
/// Total over any input: text without word characters yields an empty set.
pub fn tokenize(text: &str) -> HashSet<String> {
    words(text).into_iter().collect()
}
