//! Removing branching nodes.
//!
//! A node is branching if it ever had more than one predecessor or more than
//! one successor. Such k-mers can't be extended unambiguously, so they are cut
//! out of the graph before contigs are walked. Pruning is a single pass: a
//! neighbour whose degree drops back to one keeps whatever flag it already had.

use bytes::Bytes;
use tracing::{debug, info, info_span};

use crate::{error::AssemblyError, graph::KmerGraph};

/// What a pruning pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneSummary {
    /// Branching nodes deleted from the graph.
    pub removed_nodes: usize,
    /// Adjacency entries stripped from surviving or doomed neighbours.
    pub removed_edges: usize,
}

/// Deletes every branching node and every reference to it.
///
/// # Errors
///
/// Returns [`AssemblyError::MissingNode`] if a branching node lists a
/// neighbour that is not in the graph.
pub fn remove_branching_nodes(graph: &mut KmerGraph) -> Result<PruneSummary, AssemblyError> {
    let _span = info_span!("remove_branching_nodes", nodes = graph.len()).entered();

    let doomed = graph.branching_kmers();
    let mut summary = PruneSummary::default();

    for kmer in &doomed {
        summary.removed_edges += detach(graph, kmer)?;
    }
    for kmer in &doomed {
        if graph.remove_node(kmer).is_some() {
            summary.removed_nodes += 1;
        }
    }

    info!(
        removed_nodes = summary.removed_nodes,
        removed_edges = summary.removed_edges,
        remaining = graph.len(),
        "branching nodes removed"
    );
    Ok(summary)
}

/// Strips `kmer` from the adjacency of each of its neighbours.
fn detach(graph: &mut KmerGraph, kmer: &Bytes) -> Result<usize, AssemblyError> {
    let node = graph
        .node(kmer)
        .ok_or_else(|| AssemblyError::missing_node(kmer))?;
    let incoming: Vec<Bytes> = node.incoming().iter().cloned().collect();
    let outgoing: Vec<Bytes> = node.outgoing().iter().cloned().collect();

    let mut removed = 0;
    for pred in &incoming {
        let neighbour = graph
            .node_mut(pred)
            .ok_or_else(|| AssemblyError::missing_node(pred))?;
        if neighbour.outgoing_mut().remove(kmer) {
            removed += 1;
        }
    }
    for succ in &outgoing {
        let neighbour = graph
            .node_mut(succ)
            .ok_or_else(|| AssemblyError::missing_node(succ))?;
        if neighbour.incoming_mut().remove(kmer) {
            removed += 1;
        }
    }

    debug!(
        kmer = %String::from_utf8_lossy(kmer),
        removed,
        "detached branching node"
    );
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        construct::build_graph,
        kmer::{KmerLength, Windowing},
    };

    fn b(s: &'static str) -> Bytes {
        Bytes::from_static(s.as_bytes())
    }

    /// `ACG` with three successors, each of which has `ACG` as its only predecessor.
    fn three_way_fork() -> KmerGraph {
        let mut graph = KmerGraph::new(KmerLength::new(3).unwrap());
        graph.insert_kmer(b("ACG"));
        for succ in ["CGA", "CGC", "CGT"] {
            graph.insert_kmer(b(succ));
            graph.add_outgoing_edge(b"ACG", b(succ)).unwrap();
            graph.add_incoming_edge(succ.as_bytes(), b("ACG")).unwrap();
        }
        graph
    }

    #[test]
    fn removes_fork_and_repairs_successors() {
        let mut graph = three_way_fork();
        assert!(graph.node(b"ACG").unwrap().branching());

        let summary = remove_branching_nodes(&mut graph).unwrap();

        assert_eq!(
            summary,
            PruneSummary {
                removed_nodes: 1,
                removed_edges: 3
            }
        );
        assert!(!graph.contains(b"ACG"));
        for succ in ["CGA", "CGC", "CGT"] {
            let node = graph.node(succ.as_bytes()).unwrap();
            assert!(!node.incoming().contains(b"ACG"));
            assert!(node.incoming().is_empty());
        }
    }

    #[test]
    fn leaves_unbranched_graph_alone() {
        let reads = vec![b("AATGCA"), b("ATGCAT")];
        let mut graph = build_graph(&reads, KmerLength::new(3).unwrap(), Windowing::ExcludeFinal)
            .unwrap();
        let before = graph.len();
        let summary = remove_branching_nodes(&mut graph).unwrap();
        assert_eq!(summary, PruneSummary::default());
        assert_eq!(graph.len(), before);
    }

    #[test]
    fn adjacent_branching_nodes_are_both_removed() {
        // AC is followed by both CA and CG; CA is entered from both AC and TC.
        let reads = vec![b("ACACGT"), b("TCAG")];
        let mut graph = build_graph(&reads, KmerLength::new(2).unwrap(), Windowing::ExcludeFinal)
            .unwrap();
        assert!(graph.node(b"AC").unwrap().branching());
        assert!(graph.node(b"CA").unwrap().branching());

        remove_branching_nodes(&mut graph).unwrap();

        assert!(!graph.contains(b"AC"));
        assert!(!graph.contains(b"CA"));
        for node in graph.nodes() {
            assert!(!node.branching());
            for kmer in node.incoming().iter().chain(node.outgoing().iter()) {
                assert!(graph.contains(kmer), "dangling reference to {kmer:?}");
            }
        }
    }

    #[test]
    fn merge_point_removal_truncates_predecessor() {
        // TGC is entered from both ATG and GTG.
        let reads = vec![b("CATGCA"), b("GTGCA")];
        let mut graph = build_graph(&reads, KmerLength::new(3).unwrap(), Windowing::ExcludeFinal)
            .unwrap();
        let tgc = graph.node(b"TGC").unwrap();
        assert!(tgc.branching());

        remove_branching_nodes(&mut graph).unwrap();

        let atg = graph.node(b"ATG").unwrap();
        assert!(atg.outgoing().is_empty());
        assert!(!atg.branching());
    }
}
