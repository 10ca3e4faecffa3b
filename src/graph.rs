//! The k-mer graph: one node per distinct k-mer, edges between k-mers from
//! consecutive windows of a read.
//!
//! Nodes live in an insertion-ordered arena and are looked up through an
//! [`FxHashMap`] from k-mer to arena slot. Adjacency is stored as k-mer values,
//! never as references to other nodes, so the graph can be cyclic without any
//! ownership cycle. Removed nodes leave a tombstone so the iteration order of
//! the survivors is unchanged.

use bytes::Bytes;
use rustc_hash::FxHashMap;

use crate::{error::AssemblyError, kmer::KmerLength};

/// An ordered set of neighbouring k-mers, kept in first-insertion order.
///
/// Degrees in a read-derived graph are tiny, so a linear scan beats hashing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency(Vec<Bytes>);

impl Adjacency {
    /// Adds `kmer` unless already present. Returns `true` if it was added.
    pub fn insert(&mut self, kmer: Bytes) -> bool {
        if self.contains(&kmer) {
            return false;
        }
        self.0.push(kmer);
        true
    }

    /// Removes `kmer` if present. Returns `true` if it was removed.
    pub fn remove(&mut self, kmer: &[u8]) -> bool {
        match self.0.iter().position(|k| k.as_ref() == kmer) {
            Some(pos) => {
                self.0.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, kmer: &[u8]) -> bool {
        self.0.iter().any(|k| k.as_ref() == kmer)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The neighbour, if there is exactly one.
    pub fn single(&self) -> Option<&Bytes> {
        match self.0.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bytes> {
        self.0.iter()
    }
}

/// One distinct k-mer and its adjacency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    value: Bytes,
    outgoing: Adjacency,
    incoming: Adjacency,
    visited: bool,
    branching: bool,
    multiplicity: u64,
}

impl GraphNode {
    fn new(value: Bytes) -> Self {
        Self {
            value,
            outgoing: Adjacency::default(),
            incoming: Adjacency::default(),
            visited: false,
            branching: false,
            multiplicity: 1,
        }
    }

    /// The k-mer this node stands for.
    pub fn value(&self) -> &Bytes {
        &self.value
    }

    pub fn outgoing(&self) -> &Adjacency {
        &self.outgoing
    }

    pub fn incoming(&self) -> &Adjacency {
        &self.incoming
    }

    /// Whether a contig walk has consumed this node.
    pub fn visited(&self) -> bool {
        self.visited
    }

    /// Whether either adjacency set has ever held more than one k-mer.
    ///
    /// Once set, this stays set even if edges are later removed.
    pub fn branching(&self) -> bool {
        self.branching
    }

    /// Number of times this k-mer was seen while building.
    pub fn multiplicity(&self) -> u64 {
        self.multiplicity
    }

    pub(crate) fn outgoing_mut(&mut self) -> &mut Adjacency {
        &mut self.outgoing
    }

    pub(crate) fn incoming_mut(&mut self) -> &mut Adjacency {
        &mut self.incoming
    }

    fn add_outgoing(&mut self, to: Bytes) {
        self.outgoing.insert(to);
        if self.outgoing.len() > 1 {
            self.branching = true;
        }
    }

    fn add_incoming(&mut self, from: Bytes) {
        self.incoming.insert(from);
        if self.incoming.len() > 1 {
            self.branching = true;
        }
    }
}

/// An insertion-ordered k-mer graph.
#[derive(Debug, Clone)]
pub struct KmerGraph {
    k: KmerLength,
    nodes: Vec<Option<GraphNode>>,
    index: FxHashMap<Bytes, usize>,
}

impl KmerGraph {
    /// Creates an empty graph for k-mers of length `k`.
    pub fn new(k: KmerLength) -> Self {
        Self {
            k,
            nodes: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// The k-mer length this graph was built with.
    pub fn k(&self) -> KmerLength {
        self.k
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, kmer: &[u8]) -> bool {
        self.index.contains_key(kmer)
    }

    pub fn node(&self, kmer: &[u8]) -> Option<&GraphNode> {
        let slot = *self.index.get(kmer)?;
        self.nodes.get(slot)?.as_ref()
    }

    pub(crate) fn node_mut(&mut self, kmer: &[u8]) -> Option<&mut GraphNode> {
        let slot = *self.index.get(kmer)?;
        self.nodes.get_mut(slot)?.as_mut()
    }

    fn require_mut(&mut self, kmer: &[u8]) -> Result<&mut GraphNode, AssemblyError> {
        self.node_mut(kmer)
            .ok_or_else(|| AssemblyError::missing_node(kmer))
    }

    /// Multiplicity of `kmer`, or 0 if the graph has never seen it.
    pub fn multiplicity(&self, kmer: &[u8]) -> u64 {
        self.node(kmer).map_or(0, GraphNode::multiplicity)
    }

    /// Live nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().flatten()
    }

    /// Live k-mers in insertion order.
    pub fn kmers(&self) -> impl Iterator<Item = &Bytes> {
        self.nodes().map(GraphNode::value)
    }

    /// Inserts `kmer`, or bumps its multiplicity if already present.
    ///
    /// Returns the multiplicity after insertion.
    pub fn insert_kmer(&mut self, kmer: Bytes) -> u64 {
        if let Some(node) = self.node_mut(&kmer) {
            node.multiplicity += 1;
            return node.multiplicity;
        }
        let slot = self.nodes.len();
        self.index.insert(kmer.clone(), slot);
        self.nodes.push(Some(GraphNode::new(kmer)));
        1
    }

    /// Records `to` as a successor of `from`.
    ///
    /// Only `from` is edited; the matching incoming edge is added on `to`
    /// separately.
    pub fn add_outgoing_edge(&mut self, from: &[u8], to: Bytes) -> Result<(), AssemblyError> {
        self.require_mut(from)?.add_outgoing(to);
        Ok(())
    }

    /// Records `from` as a predecessor of `to`.
    pub fn add_incoming_edge(&mut self, to: &[u8], from: Bytes) -> Result<(), AssemblyError> {
        self.require_mut(to)?.add_incoming(from);
        Ok(())
    }

    /// K-mers of every node flagged as branching, in insertion order.
    pub fn branching_kmers(&self) -> Vec<Bytes> {
        self.nodes()
            .filter(|node| node.branching)
            .map(|node| node.value.clone())
            .collect()
    }

    /// Removes a node without touching its neighbours.
    pub(crate) fn remove_node(&mut self, kmer: &[u8]) -> Option<GraphNode> {
        let slot = self.index.remove(kmer)?;
        self.nodes.get_mut(slot)?.take()
    }

    pub(crate) fn mark_visited(&mut self, kmer: &[u8]) -> Result<(), AssemblyError> {
        self.require_mut(kmer)?.visited = true;
        Ok(())
    }

    /// Total number of directed edges, counted on the outgoing side.
    pub fn edge_count(&self) -> usize {
        self.nodes().map(|node| node.outgoing.len()).sum()
    }
}
