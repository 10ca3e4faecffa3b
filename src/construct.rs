//! Building a [`KmerGraph`] from reads.
//!
//! Every read is cut into overlapping k-mer windows. Each window becomes (or
//! bumps) a node, and consecutive windows are joined: window `i` gets an
//! outgoing edge to window `i + 1`, and window `i + 1` gets the matching
//! incoming edge from window `i`.
//!
//! # Example
//!
//! ```rust
//! use bytes::Bytes;
//! use kontig::construct::build_graph;
//! use kontig::kmer::{KmerLength, Windowing};
//!
//! let reads = vec![Bytes::from_static(b"AATGCA"), Bytes::from_static(b"ATGCAT")];
//! let graph = build_graph(&reads, KmerLength::new(3)?, Windowing::ExcludeFinal)?;
//!
//! assert_eq!(graph.multiplicity(b"ATG"), 2);
//! assert_eq!(graph.multiplicity(b"GCA"), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use bytes::Bytes;
use tracing::{debug, info, info_span};

use crate::{
    error::AssemblyError,
    graph::KmerGraph,
    kmer::{window, KmerLength, Windowing},
};

/// Builds a graph over all `reads`.
///
/// Every read is checked against `k` before the first k-mer is inserted, so a
/// read that is too short fails the whole build without leaving a partial
/// graph behind.
///
/// # Errors
///
/// Returns [`AssemblyError::ReadTooShort`] if any read is shorter than `k`.
pub fn build_graph(
    reads: &[Bytes],
    k: KmerLength,
    windowing: Windowing,
) -> Result<KmerGraph, AssemblyError> {
    let _span = info_span!("build_graph", reads = reads.len(), k = k.get()).entered();

    validate_reads(reads, k, windowing)?;

    let mut builder = GraphBuilder::new(k).windowing(windowing);
    for read in reads {
        builder.add_read(read)?;
    }
    let graph = builder.finish();

    info!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        "k-mer graph built"
    );
    Ok(graph)
}

/// Checks that every read can hold the windows `windowing` asks for.
///
/// # Errors
///
/// Returns [`AssemblyError::ReadTooShort`] for the first offending read.
pub fn validate_reads(
    reads: &[Bytes],
    k: KmerLength,
    windowing: Windowing,
) -> Result<(), AssemblyError> {
    match reads
        .iter()
        .position(|read| windowing.window_count(read.len(), k).is_none())
    {
        Some(index) => Err(AssemblyError::ReadTooShort {
            index,
            len: reads[index].len(),
            k: k.get(),
        }),
        None => Ok(()),
    }
}

/// Incrementally adds reads to a [`KmerGraph`].
#[derive(Debug)]
pub struct GraphBuilder {
    graph: KmerGraph,
    windowing: Windowing,
    reads: usize,
}

impl GraphBuilder {
    pub fn new(k: KmerLength) -> Self {
        Self {
            graph: KmerGraph::new(k),
            windowing: Windowing::default(),
            reads: 0,
        }
    }

    /// Sets which windows of each read are used.
    #[must_use]
    pub fn windowing(mut self, windowing: Windowing) -> Self {
        self.windowing = windowing;
        self
    }

    /// Adds one read's k-mers and edges.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::ReadTooShort`] if the read is shorter than `k`;
    /// the graph is left untouched in that case.
    pub fn add_read(&mut self, read: &Bytes) -> Result<(), AssemblyError> {
        let k = self.graph.k();
        let windows = self
            .windowing
            .window_count(read.len(), k)
            .ok_or_else(|| AssemblyError::ReadTooShort {
                index: self.reads,
                len: read.len(),
                k: k.get(),
            })?;

        for i in 0..windows {
            let Some(kmer) = window(read, i, k) else {
                break;
            };
            self.graph.insert_kmer(kmer.clone());

            if i > 0 {
                if let Some(prev) = window(read, i - 1, k) {
                    self.graph.add_incoming_edge(&kmer, prev)?;
                }
            }
            // The successor must be one of this read's windows, or the edge
            // would point at a k-mer that never becomes a node.
            if i + 1 < windows {
                if let Some(next) = window(read, i + 1, k) {
                    self.graph.add_outgoing_edge(&kmer, next)?;
                }
            }
        }

        self.reads += 1;
        debug!(read = self.reads, windows, "read added");
        Ok(())
    }

    /// Number of reads added so far.
    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn finish(self) -> KmerGraph {
        self.graph
    }
}
