//! Balanced partitioning of units into contiguous chunks.
//!
//! [`balance`] cuts an ordered slice into exactly `n` contiguous chunks
//! whose sizes differ by at most one. The remainder goes to the earliest
//! chunks, so with 5 units and 3 chunks the sizes are `[2, 2, 1]`.
//!
//! ```rust
//! use paraform_core::balance::balance;
//! use paraform_core::length::ParagraphCount;
//!
//! let units = ["a", "b", "c", "d", "e"];
//! let chunks = balance(&units, ParagraphCount::new(3).unwrap());
//! assert_eq!(chunks, vec![&["a", "b"][..], &["c", "d"][..], &["e"][..]]);
//! ```

use crate::length::ParagraphCount;

/// Partition `units` into `n` contiguous, near-equal chunks.
///
/// # Guarantees
///
/// - Exactly `n` chunks when `units` is non-empty. If `n` exceeds the number
///   of units the trailing chunks are empty.
/// - Exactly one empty chunk when `units` is empty.
/// - Concatenating the chunks in order yields `units` unchanged.
pub fn balance<T>(units: &[T], n: ParagraphCount) -> Vec<&[T]> {
    let total = units.len();
    if total == 0 {
        return vec![units];
    }

    let n = n.get();
    let base = total / n;
    let remainder = total % n;

    let mut chunks = Vec::with_capacity(n);
    let mut rest = units;
    for i in 0..n {
        let take = base + usize::from(i < remainder);
        let (chunk, tail) = rest.split_at(take);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}
