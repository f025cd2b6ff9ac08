//! Line and sentence segmentation.
//!
//! Both segmenters produce *units*: trimmed, non-empty fragments of the
//! input in their original order.
//!
//! - [`lines`] splits on runs of line breaks and borrows from the input.
//! - [`sentences`] ignores line structure and splits after terminal
//!   punctuation (`.`, `?`, `!`).
//!
//! # Sentence boundaries
//!
//! A confident boundary sits right after a terminal mark that is followed
//! by whitespace and then a character that can open a sentence: an
//! ASCII uppercase letter, an ASCII digit, a quote (`"`, `“`, `‘`, `'`) or a
//! parenthesis. The mark stays with its sentence and the whitespace run is
//! dropped.
//!
//! When that rule finds no boundary at all (the text comes back as a single
//! unit), the text is re-split after *every* terminal mark. This recovers
//! sentences in text without capitalization cues, at the cost of splitting
//! abbreviations such as `e.g.`.
//!
//! ```rust
//! use paraform_core::segment::{lines, sentences};
//!
//! let units: Vec<&str> = lines("  first\n\n\nsecond  \r\n").collect();
//! assert_eq!(units, vec!["first", "second"]);
//!
//! assert_eq!(
//!     sentences("Hello world. This is great! What next?"),
//!     vec!["Hello world.", "This is great!", "What next?"],
//! );
//! ```

use std::iter::FusedIterator;
use std::str::Split;

use tracing::trace;

/// Lazy iterator over the trimmed, non-empty lines of a text.
///
/// The iterator is `Clone`, so a pass can be replayed from any point;
/// calling [`lines`] again restarts from the top.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    pieces: Split<'a, char>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.pieces.by_ref().map(str::trim).find(|p| !p.is_empty())
    }
}

impl FusedIterator for Lines<'_> {}

/// Split `text` on runs of line breaks (`\n`, `\r\n`), trimming each piece
/// and skipping blank ones.
pub fn lines(text: &str) -> Lines<'_> {
    Lines {
        pieces: text.split('\n'),
    }
}

/// Split `text` into sentence units.
///
/// Line breaks are collapsed to spaces first, so a sentence may span
/// several input lines. Empty input yields no units; input without any
/// terminal punctuation yields one.
pub fn sentences(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let collapsed = collapse_line_breaks(text);
    let confident = trimmed_units(split_at_confident_boundaries(&collapsed));
    if confident.len() != 1 {
        return confident;
    }

    let loose = trimmed_units(collapsed.split_inclusive(is_terminal));
    trace!(units = loose.len(), "no confident sentence boundary, split on every terminal mark");
    loose
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '?' | '!')
}

fn opens_sentence(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '"' | '“' | '‘' | '\'' | '(' | ')')
}

/// Replace every `\r?\n+` run with a single space.
fn collapse_line_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let starts_break = c == '\n' || (c == '\r' && chars.peek() == Some(&'\n'));
        if !starts_break {
            out.push(c);
            continue;
        }
        while chars.next_if_eq(&'\n').is_some() {}
        out.push(' ');
    }
    out
}

fn split_at_confident_boundaries(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for (i, mark) in text.match_indices(is_terminal) {
        let end = i + mark.len();
        let rest = &text[end..];
        let next_start = rest.trim_start();
        if next_start.len() == rest.len() {
            continue;
        }
        if next_start.chars().next().is_some_and(opens_sentence) {
            pieces.push(&text[start..end]);
            start = text.len() - next_start.len();
        }
    }

    pieces.push(&text[start..]);
    pieces
}

fn trimmed_units<'a>(pieces: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
