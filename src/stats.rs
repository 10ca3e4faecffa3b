//! Contig length statistics.
//!
//! Downstream consumers only need the list of contig lengths. From it this
//! module reports the longest contig and the N50: the length at which the
//! cumulative sum of lengths, taken longest first, first reaches half of the
//! total.
//!
//! # Example
//!
//! ```rust
//! use kontig::stats::ContigStats;
//!
//! let stats = ContigStats::from_lengths(&[2, 3, 4, 5, 6, 7, 8, 9, 10]).unwrap();
//!
//! assert_eq!(stats.max_length, 10);
//! // 10 + 9 + 8 = 27 >= 54 / 2
//! assert_eq!(stats.n50, 8);
//! ```

use serde::Serialize;

/// Summary statistics over a set of contig lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContigStats {
    /// Number of contigs.
    pub count: usize,
    /// Sum of all contig lengths.
    pub total_length: usize,
    /// Length of the longest contig.
    pub max_length: usize,
    /// N50 length.
    pub n50: usize,
}

impl ContigStats {
    /// Computes statistics over `lengths`, or `None` if there are none.
    #[must_use]
    pub fn from_lengths(lengths: &[usize]) -> Option<Self> {
        let mut sorted = lengths.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        let max_length = *sorted.first()?;
        let total_length: usize = sorted.iter().sum();

        Some(Self {
            count: sorted.len(),
            total_length,
            max_length,
            n50: n50_sorted(&sorted, total_length),
        })
    }
}

/// N50 of `lengths`, or 0 for an empty list.
#[must_use]
pub fn n50(lengths: &[usize]) -> usize {
    ContigStats::from_lengths(lengths).map_or(0, |stats| stats.n50)
}

/// Expects `sorted` in descending order.
fn n50_sorted(sorted: &[usize], total: usize) -> usize {
    let mut running = 0usize;
    for &length in sorted {
        running += length;
        // running >= total / 2, without losing the odd half
        if running.saturating_mul(2) >= total {
            return length;
        }
    }
    0
}
