//! # Paraform Core
//!
//! Pure, I/O-free paragraph engine: turns one block of text into a fixed
//! number of display paragraphs.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`segment`] | Line and sentence segmentation |
//! | [`balance`] | Near-equal contiguous chunking |
//! | [`assemble`] | Strategy cascade producing paragraphs |
//! | [`length`] | Paragraph counts and the short/medium/long selector |
//! | [`error`] | Error type |
//!
//! Every function is a stateless transformation of its arguments, so all
//! of it is safe to call from any number of threads at once.

pub mod assemble;
pub mod balance;
pub mod error;
pub mod length;
pub mod segment;

pub use assemble::{assemble, assemble_paragraphs, Assembly, Strategy};
pub use error::{Error, Result};
pub use length::{LengthMap, ParagraphCount, SummaryLength};
