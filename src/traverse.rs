//! Reading contigs off a k-mer graph.
//!
//! A contig starts at some k-mer and follows single outgoing edges for as long
//! as the next k-mer has not been consumed yet. Consecutive k-mers overlap by
//! `k - 1` bases, so each step appends just the last base of the k-mer it
//! moves onto.
//!
//! Walks first start at every source (a node with no incoming edge). Any node
//! left unvisited afterwards sits on a cycle with no way in, and a second pass
//! walks each such cycle once around.

use bytes::{Bytes, BytesMut};
use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::{error::AssemblyError, graph::KmerGraph};

/// Default minimum contig length.
pub const DEFAULT_MIN_CONTIG_LEN: usize = 100;

/// A contiguous sequence read off the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contig {
    sequence: Bytes,
    extensions: usize,
}

impl Contig {
    pub fn sequence(&self) -> &Bytes {
        &self.sequence
    }

    /// Number of k-mers appended after the starting one.
    pub fn extensions(&self) -> usize {
        self.extensions
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// The sequence as text, with invalid UTF-8 replaced.
    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(&self.sequence).into_owned()
    }
}

impl std::fmt::Display for Contig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.sequence))
    }
}

impl Serialize for Contig {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&String::from_utf8_lossy(&self.sequence))
    }
}

/// Walks every contig in `graph`, keeping those at least `min_len` long.
///
/// Contigs come out in the graph's insertion order: source-rooted walks
/// first, then cycles.
///
/// # Errors
///
/// Returns [`AssemblyError::MissingNode`] if an edge leads to a k-mer that
/// is not in the graph.
pub fn find_contigs(graph: &mut KmerGraph, min_len: usize) -> Result<Vec<Contig>, AssemblyError> {
    let _span = info_span!("find_contigs", nodes = graph.len(), min_len).entered();

    let kmers: Vec<Bytes> = graph.kmers().cloned().collect();
    let mut contigs = Vec::new();
    let mut walked = 0usize;

    let sources: Vec<&Bytes> = kmers
        .iter()
        .filter(|kmer| graph.node(kmer).is_some_and(|node| node.incoming().is_empty()))
        .collect();
    for start in sources {
        let contig = walk(graph, start)?;
        walked += 1;
        keep_if_long(&mut contigs, contig, min_len);
    }
    let from_sources = contigs.len();

    for start in &kmers {
        let unvisited = graph.node(start).is_some_and(|node| !node.visited());
        if unvisited {
            let contig = walk(graph, start)?;
            walked += 1;
            keep_if_long(&mut contigs, contig, min_len);
        }
    }

    info!(
        walked,
        kept = contigs.len(),
        from_sources,
        from_cycles = contigs.len() - from_sources,
        "contigs assembled"
    );
    Ok(contigs)
}

fn keep_if_long(contigs: &mut Vec<Contig>, contig: Contig, min_len: usize) {
    if contig.len() >= min_len {
        contigs.push(contig);
    } else {
        debug!(len = contig.len(), min_len, "contig below minimum length");
    }
}

/// Walks forward from `start`, marking every node it enters as visited.
///
/// # Errors
///
/// Returns [`AssemblyError::MissingNode`] if `start` or any successor is
/// absent from the graph.
pub fn walk(graph: &mut KmerGraph, start: &[u8]) -> Result<Contig, AssemblyError> {
    let mut sequence = BytesMut::from(start);
    let mut extensions = 0;
    graph.mark_visited(start)?;

    let mut current = Bytes::copy_from_slice(start);
    loop {
        let node = graph
            .node(&current)
            .ok_or_else(|| AssemblyError::missing_node(&current))?;
        let Some(next) = node.outgoing().single().cloned() else {
            break;
        };
        let next_node = graph
            .node(&next)
            .ok_or_else(|| AssemblyError::missing_node(&next))?;
        if next_node.visited() {
            break;
        }

        graph.mark_visited(&next)?;
        if let Some(&last) = next.last() {
            sequence.extend_from_slice(&[last]);
        }
        extensions += 1;
        current = next;
    }

    Ok(Contig {
        sequence: sequence.freeze(),
        extensions,
    })
}

/// Lengths of `contigs`, in the same order.
pub fn contig_lengths(contigs: &[Contig]) -> Vec<usize> {
    contigs.iter().map(Contig::len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        construct::build_graph,
        kmer::{KmerLength, Windowing},
        prune::remove_branching_nodes,
    };

    fn graph_of(reads: &[&'static str], k: usize) -> KmerGraph {
        let reads: Vec<Bytes> = reads
            .iter()
            .map(|r| Bytes::from_static(r.as_bytes()))
            .collect();
        build_graph(&reads, KmerLength::new(k).unwrap(), Windowing::ExcludeFinal).unwrap()
    }

    fn texts(contigs: &[Contig]) -> Vec<String> {
        contigs.iter().map(Contig::as_string).collect()
    }

    #[test]
    fn overlapping_reads_merge() {
        let mut graph = graph_of(&["AATGCA", "ATGCAT"], 3);
        let contigs = find_contigs(&mut graph, 1).unwrap();
        assert_eq!(texts(&contigs), vec!["AATGCA"]);
        assert_eq!(contigs[0].extensions(), 3);
    }

    #[test]
    fn cycle_without_source_is_walked_once() {
        // ACG -> CGT -> GTA -> TAC -> ACG
        let mut graph = graph_of(&["ACGTACGTA"], 3);
        assert_eq!(graph.len(), 4);
        assert!(graph.nodes().all(|node| node.incoming().len() == 1));

        let contigs = find_contigs(&mut graph, 1).unwrap();

        assert_eq!(texts(&contigs), vec!["ACGTAC"]);
        assert_eq!(contigs[0].len(), 3 + 3);
        assert!(graph.nodes().all(|node| node.visited()));
    }

    #[test]
    fn short_contigs_are_dropped_but_consumed() {
        let mut graph = graph_of(&["AATGCA", "ATGCAT"], 3);
        let contigs = find_contigs(&mut graph, 7).unwrap();
        assert!(contigs.is_empty());
        assert!(graph.nodes().all(|node| node.visited()));
    }

    #[test]
    fn walk_stops_at_fork() {
        let mut graph = graph_of(&["CATGCA", "GTGCAT"], 3);
        // TGC has two predecessors, but a walk from CAT only cares about out-degree.
        let contig = walk(&mut graph, b"CAT").unwrap();
        assert_eq!(contig.as_string(), "CATGCA");
    }

    #[test]
    fn pruned_graph_splits_into_pieces() {
        let mut graph = graph_of(&["CATGCAA", "GTGCAA"], 3);
        remove_branching_nodes(&mut graph).unwrap();
        let contigs = find_contigs(&mut graph, 1).unwrap();
        insta::assert_snapshot!(texts(&contigs).join(","), @"CATG,GCA,GTG");
    }

    #[test]
    fn missing_start_is_inconsistent() {
        let mut graph = graph_of(&["AATGCA"], 3);
        let err = walk(&mut graph, b"GGG").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::GraphConsistency);
    }

    #[test]
    fn lengths_follow_contigs() {
        let mut graph = graph_of(&["AATGCA", "ATGCAT", "GGGGGCCCCC"], 3);
        let contigs = find_contigs(&mut graph, 1).unwrap();
        assert_eq!(
            contig_lengths(&contigs),
            contigs.iter().map(|c| c.as_string().len()).collect::<Vec<_>>()
        );
    }
}
