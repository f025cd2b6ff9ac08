//! Paragraph counts and the length selector that drives them.
//!
//! Callers pick one of three [`SummaryLength`] values; a [`LengthMap`]
//! turns that choice into a [`ParagraphCount`]. The default map is
//! `short → 1`, `medium → 2`, `long → 3`.
//!
//! ```rust
//! use paraform_core::length::{LengthMap, SummaryLength};
//!
//! let map = LengthMap::default();
//! assert_eq!(map.count_for(SummaryLength::Long).get(), 3);
//! assert_eq!("medium".parse::<SummaryLength>().unwrap(), SummaryLength::Medium);
//! ```

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The number of paragraphs a caller wants. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct ParagraphCount(NonZeroUsize);

impl ParagraphCount {
    /// A single paragraph.
    pub const ONE: ParagraphCount = ParagraphCount(NonZeroUsize::MIN);

    /// Validate a raw count.
    ///
    /// Returns [`Error::InvalidArgument`] when `n == 0`.
    pub fn new(n: usize) -> Result<Self> {
        NonZeroUsize::new(n).map(Self).ok_or_else(|| {
            Error::InvalidArgument(format!("paragraph count must be >= 1, got {}", n))
        })
    }

    /// The count as a plain `usize`.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl From<NonZeroUsize> for ParagraphCount {
    fn from(n: NonZeroUsize) -> Self {
        Self(n)
    }
}

impl TryFrom<usize> for ParagraphCount {
    type Error = Error;

    fn try_from(n: usize) -> Result<Self> {
        Self::new(n)
    }
}

impl From<ParagraphCount> for usize {
    fn from(count: ParagraphCount) -> Self {
        count.get()
    }
}

impl fmt::Display for ParagraphCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Three-valued length selector exposed to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    /// Every selector, shortest first.
    pub const ALL: [SummaryLength; 3] = [Self::Short, Self::Medium, Self::Long];

    /// Lowercase name, as used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl fmt::Display for SummaryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryLength {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            other => Err(Error::InvalidArgument(format!(
                "unknown length '{}': must be short, medium, or long",
                other
            ))),
        }
    }
}

/// Mapping from [`SummaryLength`] to [`ParagraphCount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthMap {
    pub short: ParagraphCount,
    pub medium: ParagraphCount,
    pub long: ParagraphCount,
}

impl LengthMap {
    /// Build a map from raw counts, rejecting zeros.
    pub fn new(short: usize, medium: usize, long: usize) -> Result<Self> {
        Ok(Self {
            short: ParagraphCount::new(short)?,
            medium: ParagraphCount::new(medium)?,
            long: ParagraphCount::new(long)?,
        })
    }

    /// Paragraph count for `length`.
    pub fn count_for(&self, length: SummaryLength) -> ParagraphCount {
        match length {
            SummaryLength::Short => self.short,
            SummaryLength::Medium => self.medium,
            SummaryLength::Long => self.long,
        }
    }

    /// `(selector, count)` pairs in selector order.
    pub fn entries(&self) -> impl Iterator<Item = (SummaryLength, ParagraphCount)> + '_ {
        SummaryLength::ALL
            .into_iter()
            .map(move |length| (length, self.count_for(length)))
    }
}

impl Default for LengthMap {
    fn default() -> Self {
        Self {
            short: ParagraphCount::ONE,
            medium: ParagraphCount(NonZeroUsize::MIN.saturating_add(1)),
            long: ParagraphCount(NonZeroUsize::MIN.saturating_add(2)),
        }
    }
}
