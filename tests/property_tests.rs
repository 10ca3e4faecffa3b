//! Property-based tests using proptest.
//!
//! These tests verify invariants that should hold across all valid inputs,
//! catching edge cases that might be missed by example-based tests.

use bytes::Bytes;
use kontig::{
    assemble_contigs,
    construct::build_graph,
    filter::is_good_read,
    graph::KmerGraph,
    kmer::{full_windows, KmerLength, Windowing},
    prune::remove_branching_nodes,
    stats::ContigStats,
    traverse::find_contigs,
};
use proptest::prelude::*;
use std::collections::HashMap;

/// Strategy for generating DNA sequences over a small alphabet.
fn dna_sequence(min_len: usize, max_len: usize) -> impl Strategy<Value = Bytes> {
    proptest::collection::vec(
        prop_oneof![Just(b'A'), Just(b'C'), Just(b'G'), Just(b'T')],
        min_len..=max_len,
    )
    .prop_map(Bytes::from)
}

/// Strategy for a k and a batch of reads that are all at least `k` long.
fn reads_and_k() -> impl Strategy<Value = (usize, Vec<Bytes>)> {
    (1usize..=5).prop_flat_map(|k| {
        (
            Just(k),
            proptest::collection::vec(dna_sequence(k, k + 12), 1..8),
        )
    })
}

fn windowing() -> impl Strategy<Value = Windowing> {
    prop_oneof![Just(Windowing::ExcludeFinal), Just(Windowing::Full)]
}

/// Counts k-mer occurrences the slow way.
fn expected_counts(reads: &[Bytes], k: usize, windowing: Windowing) -> HashMap<Bytes, u64> {
    let k_len = KmerLength::new(k).unwrap();
    let mut counts = HashMap::new();
    for read in reads {
        let windows = windowing.window_count(read.len(), k_len).unwrap();
        for i in 0..windows {
            *counts.entry(read.slice(i..i + k)).or_insert(0) += 1;
        }
    }
    counts
}

/// Every adjacency entry names a live node that points back.
fn assert_consistent(graph: &KmerGraph) -> Result<(), TestCaseError> {
    for node in graph.nodes() {
        let key = node.value();
        for next in node.outgoing().iter() {
            let target = graph.node(next);
            prop_assert!(target.is_some(), "dangling outgoing edge");
            prop_assert!(target.unwrap().incoming().contains(key));
        }
        for prev in node.incoming().iter() {
            let source = graph.node(prev);
            prop_assert!(source.is_some(), "dangling incoming edge");
            prop_assert!(source.unwrap().outgoing().contains(key));
        }
    }
    Ok(())
}

proptest! {
    /// Multiplicity equals the number of occurrences among built windows.
    #[test]
    fn multiplicity_counts_occurrences((k, reads) in reads_and_k(), windowing in windowing()) {
        let graph = build_graph(&reads, KmerLength::new(k).unwrap(), windowing).unwrap();
        let expected = expected_counts(&reads, k, windowing);

        prop_assert_eq!(graph.len(), expected.len());
        for (kmer, count) in &expected {
            prop_assert_eq!(graph.multiplicity(kmer), *count);
        }
    }

    /// Adjacency lists never repeat a key, every edge is mirrored, and any node
    /// with more than one neighbour on a side is flagged as branching.
    #[test]
    fn adjacency_is_a_mirrored_set((k, reads) in reads_and_k(), windowing in windowing()) {
        let graph = build_graph(&reads, KmerLength::new(k).unwrap(), windowing).unwrap();
        for node in graph.nodes() {
            for list in [node.outgoing(), node.incoming()] {
                let mut seen: Vec<&Bytes> = list.iter().collect();
                seen.sort();
                seen.dedup();
                prop_assert_eq!(seen.len(), list.len());
            }
            if node.outgoing().len() > 1 || node.incoming().len() > 1 {
                prop_assert!(node.branching());
            }
        }
        assert_consistent(&graph)?;
    }

    /// Pruning leaves no branching node and no reference to a removed one.
    #[test]
    fn pruning_removes_every_branching_node((k, reads) in reads_and_k()) {
        let mut graph = build_graph(&reads, KmerLength::new(k).unwrap(), Windowing::default()).unwrap();
        let branching = graph.branching_kmers();
        let before = graph.len();

        let summary = remove_branching_nodes(&mut graph).unwrap();

        prop_assert_eq!(summary.removed_nodes, branching.len());
        prop_assert_eq!(graph.len(), before - branching.len());
        prop_assert!(graph.nodes().all(|node| !node.branching()));
        for kmer in &branching {
            prop_assert!(!graph.contains(kmer));
        }
        assert_consistent(&graph)?;
    }

    /// Contig length is k plus one base per step, and each step appends the
    /// last base of a k-mer that is still in the graph.
    #[test]
    fn contigs_are_spelled_by_their_walk((k, reads) in reads_and_k(), min_len in 0usize..12) {
        let k_len = KmerLength::new(k).unwrap();
        let mut graph = build_graph(&reads, k_len, Windowing::default()).unwrap();
        remove_branching_nodes(&mut graph).unwrap();
        let contigs = find_contigs(&mut graph, min_len).unwrap();

        prop_assert!(graph.nodes().all(|node| node.visited()));
        for contig in &contigs {
            prop_assert!(contig.len() >= min_len);
            prop_assert_eq!(contig.len(), k + contig.extensions());
            for kmer in full_windows(contig.sequence(), k_len) {
                prop_assert!(graph.contains(&kmer));
            }
        }
    }

    /// A read is good exactly when every full window occurs more than once.
    #[test]
    fn good_read_iff_all_windows_repeat((k, reads) in reads_and_k(), windowing in windowing()) {
        let k_len = KmerLength::new(k).unwrap();
        let graph = build_graph(&reads, k_len, windowing).unwrap();
        for read in &reads {
            let all_repeat = full_windows(read, k_len).all(|kmer| graph.multiplicity(&kmer) > 1);
            prop_assert_eq!(is_good_read(&graph, read), all_repeat);
        }
    }

    /// The same reads always assemble into the same contigs.
    #[test]
    fn assembly_is_deterministic((k, reads) in reads_and_k()) {
        let k_len = KmerLength::new(k).unwrap();
        let first = assemble_contigs(&reads, k_len, 1, Windowing::default()).unwrap();
        let second = assemble_contigs(&reads, k_len, 1, Windowing::default()).unwrap();
        prop_assert_eq!(first.contigs, second.contigs);
    }

    /// N50 is one of the lengths, and the lengths at least that long cover
    /// half of the total.
    #[test]
    fn n50_covers_half(lengths in proptest::collection::vec(1usize..1000, 1..50)) {
        let stats = ContigStats::from_lengths(&lengths).unwrap();
        prop_assert!(lengths.contains(&stats.n50));
        prop_assert!(stats.n50 <= stats.max_length);
        let covered: usize = lengths.iter().filter(|&&len| len >= stats.n50).sum();
        prop_assert!(covered * 2 >= stats.total_length);
    }
}
