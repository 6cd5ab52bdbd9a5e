//! Session flow graph using petgraph::DiGraph over the compact node index

use std::collections::HashSet;

use crate::model::AggregatedLink;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{depth_first_search, DfsEvent, EdgeRef};
use petgraph::Direction;

/// Edge payload: the link's position in aggregation order and its weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowEdge {
    pub position: usize,
    pub value: u32,
}

/// Directed caller → speaker graph of one session.
///
/// Node `i` of the graph is node `i` of the session view, so compact indices
/// can be used directly.
pub struct FlowGraph {
    inner: DiGraph<(), FlowEdge>,
}

impl std::fmt::Debug for FlowGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowGraph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl FlowGraph {
    /// Build the graph for `node_count` nodes and the aggregated links.
    pub fn new(node_count: usize, links: &[AggregatedLink]) -> Self {
        let mut inner = DiGraph::with_capacity(node_count, links.len());
        for _ in 0..node_count {
            inner.add_node(());
        }
        for (position, link) in links.iter().enumerate() {
            inner.add_edge(
                NodeIndex::new(link.source),
                NodeIndex::new(link.target),
                FlowEdge {
                    position,
                    value: link.value,
                },
            );
        }
        FlowGraph { inner }
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of links.
    pub fn link_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// The link joining `a` and `b` in either direction. When both
    /// directions exist the one aggregated first is returned.
    pub fn link_between(&self, a: usize, b: usize) -> Option<FlowEdge> {
        let (a, b) = (NodeIndex::new(a), NodeIndex::new(b));
        self.inner
            .edges_connecting(a, b)
            .chain(self.inner.edges_connecting(b, a))
            .map(|e| *e.weight())
            .min_by_key(|e| e.position)
    }

    /// Outgoing links of a node as `(target, edge)` pairs.
    pub fn outgoing(&self, node: usize) -> Vec<(usize, FlowEdge)> {
        self.inner
            .edges_directed(NodeIndex::new(node), Direction::Outgoing)
            .map(|e| (e.target().index(), *e.weight()))
            .collect()
    }

    /// Incoming links of a node as `(source, edge)` pairs.
    pub fn incoming(&self, node: usize) -> Vec<(usize, FlowEdge)> {
        self.inner
            .edges_directed(NodeIndex::new(node), Direction::Incoming)
            .map(|e| (e.source().index(), *e.weight()))
            .collect()
    }

    /// Sum of outgoing link values.
    pub fn flow_out(&self, node: usize) -> u32 {
        self.outgoing(node).iter().map(|(_, e)| e.value).sum()
    }

    /// Sum of incoming link values.
    pub fn flow_in(&self, node: usize) -> u32 {
        self.incoming(node).iter().map(|(_, e)| e.value).sum()
    }

    /// Links that close a cycle when the graph is walked depth-first from
    /// node 0 upwards, as `(source, target)` pairs.
    fn back_links(&self) -> HashSet<(usize, usize)> {
        let mut back = HashSet::new();
        depth_first_search(&self.inner, self.inner.node_indices(), |event| {
            if let DfsEvent::BackEdge(s, t) = event {
                back.insert((s.index(), t.index()));
            }
        });
        back
    }

    /// Column of each node: longest caller chain leading into it, ignoring
    /// the links that close a cycle. The walk starts at the most involved
    /// node, so of two participants interrupting each other the one listed
    /// first stays left. Nodes that never call anyone are pushed to the last
    /// column. Without any links everything stays in column zero.
    pub fn columns(&self) -> Vec<usize> {
        let n = self.node_count();
        if n == 0 {
            return Vec::new();
        }
        let back = self.back_links();
        let forward: Vec<(usize, usize)> = self
            .inner
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
            .filter(|&(s, t)| s != t && !back.contains(&(s, t)))
            .collect();

        let mut depth = vec![0usize; n];
        for _ in 0..n {
            let mut changed = false;
            for &(s, t) in &forward {
                if depth[s] + 1 > depth[t] {
                    depth[t] = depth[s] + 1;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        if self.link_count() == 0 {
            return depth;
        }
        let last = depth.iter().copied().max().unwrap_or(0).max(1);
        for (node, d) in depth.iter_mut().enumerate() {
            if self.flow_out(node) == 0 {
                *d = last;
            }
        }
        depth
    }
}
