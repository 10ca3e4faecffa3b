//! Keeping only reads whose k-mers all recur.
//!
//! A read is "good" when every one of its full k-mer windows was seen more
//! than once while building the graph. Reads that fail are simply left out.

use bytes::Bytes;
use tracing::{debug, info, info_span};

use crate::{
    graph::KmerGraph,
    kmer::{full_windows, trim_line_terminator},
};

/// Why a read was turned away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The read holds no complete k-mer.
    TooShort { len: usize },
    /// The window at `position` has multiplicity of at most one.
    Unique { position: usize, multiplicity: u64 },
}

/// Checks one read against the graph's multiplicities.
///
/// Windows are scanned left to right and the first one with multiplicity of
/// at most one rejects the read. A k-mer the graph never saw counts as zero.
pub fn check_read(graph: &KmerGraph, read: &Bytes) -> Result<(), Rejection> {
    let read = trim_line_terminator(read);
    let k = graph.k();
    if read.len() < k.get() {
        return Err(Rejection::TooShort { len: read.len() });
    }
    let first_unique = full_windows(&read, k)
        .map(|kmer| graph.multiplicity(&kmer))
        .enumerate()
        .find(|(_, multiplicity)| *multiplicity <= 1);
    match first_unique {
        Some((position, multiplicity)) => Err(Rejection::Unique {
            position,
            multiplicity,
        }),
        None => Ok(()),
    }
}

pub fn is_good_read(graph: &KmerGraph, read: &Bytes) -> bool {
    check_read(graph, read).is_ok()
}

/// Returns the good reads, trimmed of line terminators, in input order.
pub fn filter_good_reads(graph: &KmerGraph, reads: &[Bytes]) -> Vec<Bytes> {
    let _span = info_span!("filter_good_reads", reads = reads.len()).entered();

    let good: Vec<Bytes> = reads
        .iter()
        .enumerate()
        .filter_map(|(index, read)| match check_read(graph, read) {
            Ok(()) => Some(trim_line_terminator(read)),
            Err(reason) => {
                debug!(index, ?reason, "read rejected");
                None
            }
        })
        .collect();

    info!(
        accepted = good.len(),
        rejected = reads.len() - good.len(),
        "reads filtered"
    );
    good
}
