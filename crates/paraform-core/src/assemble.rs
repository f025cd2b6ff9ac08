//! Paragraph assembly.
//!
//! Turns one block of text into at most `N` display paragraphs by trying an
//! ordered cascade of [`Strategy`] variants. The first strategy whose
//! predicate holds produces the result:
//!
//! | Strategy | Predicate | Result |
//! |----------|-----------|--------|
//! | [`Strategy::Lines`] | at least `N` non-blank lines | the first `N` lines |
//! | [`Strategy::Empty`] | no sentences at all | no paragraphs |
//! | [`Strategy::Sentences`] | at most `N` sentences | one paragraph per sentence |
//! | [`Strategy::Balanced`] | always | sentences balanced into `N` chunks, space-joined |
//!
//! Existing line breaks win over synthetic sentence grouping whenever they
//! already give enough structure. Sentences are only segmented when the
//! line strategy fails, and at most once per call.
//!
//! # Example
//!
//! ```rust
//! use paraform_core::assemble::{assemble_paragraphs, assemble, Strategy};
//! use paraform_core::length::ParagraphCount;
//!
//! let paras = assemble_paragraphs(Some("Hello world. This is great! What next?"), 2).unwrap();
//! assert_eq!(paras, vec!["Hello world. This is great!", "What next?"]);
//!
//! let assembly = assemble("first line\nsecond line", ParagraphCount::ONE);
//! assert_eq!(assembly.strategy, Strategy::Lines);
//! assert_eq!(assembly.paragraphs, vec!["first line"]);
//! ```

use std::cell::OnceCell;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::balance::balance;
use crate::error::Result;
use crate::length::ParagraphCount;
use crate::segment::{lines, sentences};

/// One way of turning text into paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Use the text's own line breaks.
    Lines,
    /// Nothing to show.
    Empty,
    /// Each sentence becomes a paragraph.
    Sentences,
    /// Sentences grouped into near-equal chunks.
    Balanced,
}

impl Strategy {
    /// The order in which strategies are tried.
    pub const CASCADE: [Strategy; 4] = [
        Strategy::Lines,
        Strategy::Empty,
        Strategy::Sentences,
        Strategy::Balanced,
    ];

    /// Snake-case name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Lines => "lines",
            Strategy::Empty => "empty",
            Strategy::Sentences => "sentences",
            Strategy::Balanced => "balanced",
        }
    }

    /// Run this strategy, returning `None` when its predicate does not hold.
    fn attempt(self, input: &Segments<'_>, count: ParagraphCount) -> Option<Vec<String>> {
        let n = count.get();
        match self {
            Strategy::Lines => {
                let first: Vec<String> = lines(input.text).take(n).map(str::to_string).collect();
                (first.len() == n).then_some(first)
            }
            Strategy::Empty => input.sentences().is_empty().then(Vec::new),
            Strategy::Sentences => {
                let sentences = input.sentences();
                (sentences.len() <= n).then(|| sentences.to_vec())
            }
            Strategy::Balanced => {
                let paragraphs: Vec<String> = balance(input.sentences(), count)
                    .into_iter()
                    .map(|chunk| chunk.join(" ").trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect();
                if paragraphs.len() < n {
                    debug!(
                        produced = paragraphs.len(),
                        requested = n,
                        "balanced chunking under-produced, keeping what we have"
                    );
                }
                Some(paragraphs)
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input text with lazily computed sentence units.
struct Segments<'a> {
    text: &'a str,
    sentences: OnceCell<Vec<String>>,
}

impl<'a> Segments<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            sentences: OnceCell::new(),
        }
    }

    fn sentences(&self) -> &[String] {
        self.sentences.get_or_init(|| sentences(self.text))
    }
}

/// Paragraphs produced by one assembly call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assembly {
    /// The strategy that produced `paragraphs`.
    pub strategy: Strategy,
    /// Non-empty paragraphs, never more than the requested count.
    pub paragraphs: Vec<String>,
}

/// Assemble `text` into at most `count` paragraphs.
pub fn assemble(text: &str, count: ParagraphCount) -> Assembly {
    let input = Segments::new(text);
    Strategy::CASCADE
        .into_iter()
        .find_map(|strategy| {
            strategy.attempt(&input, count).map(|mut paragraphs| {
                paragraphs.truncate(count.get());
                Assembly {
                    strategy,
                    paragraphs,
                }
            })
        })
        .inspect(|assembly| {
            debug!(
                strategy = %assembly.strategy,
                requested = count.get(),
                produced = assembly.paragraphs.len(),
                "assembled paragraphs"
            );
        })
        .unwrap_or(Assembly {
            strategy: Strategy::Empty,
            paragraphs: Vec::new(),
        })
}

/// Assemble possibly-absent `text` into at most `desired` paragraphs.
///
/// Absent and empty text both yield an empty list. Fails with
/// [`Error::InvalidArgument`](crate::Error::InvalidArgument) when
/// `desired == 0`, before looking at the text.
pub fn assemble_paragraphs(text: Option<&str>, desired: usize) -> Result<Vec<String>> {
    let count = ParagraphCount::new(desired)?;
    Ok(assemble(text.unwrap_or_default(), count).paragraphs)
}
