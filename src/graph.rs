mod edge;
mod view;

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::cuts::EdgeSubset;
use crate::error::GraphError;

pub use edge::Edge;
pub use view::GraphView;

/// Largest edge count whose powerset still fits the 64-bit enumeration index.
pub const MAX_EDGES: usize = 63;

/// Simple undirected graph with labelled nodes and integer edge weights.
///
/// Edges keep their insertion order; that order defines the edge indices used
/// by [`EdgeSubset`], by weight summation and by the enumeration.
#[derive(Debug, Clone)]
pub struct CutGraph {
    graph: UnGraph<String, u32>,
    index: HashMap<String, NodeIndex>,
}

impl CutGraph {
    /// Builds a graph from node labels and `(u, v, weight)` triples.
    ///
    /// Fails on unknown endpoints, self-loops, repeated edges (in either
    /// orientation), repeated node labels and graphs with more than
    /// [`MAX_EDGES`] edges. Nothing is returned on failure.
    pub fn new<N, L, E, S>(nodes: N, edges: E) -> Result<Self, GraphError>
    where
        N: IntoIterator<Item = L>,
        L: Into<String>,
        E: IntoIterator<Item = (S, S, u32)>,
        S: AsRef<str>,
    {
        let mut graph = UnGraph::<String, u32>::new_undirected();
        let mut index = HashMap::new();

        for label in nodes {
            let label: String = label.into();
            if index.contains_key(&label) {
                return Err(GraphError::DuplicateNode(label));
            }
            let node = graph.add_node(label.clone());
            index.insert(label, node);
        }

        let edges: Vec<(S, S, u32)> = edges.into_iter().collect();
        if edges.len() > MAX_EDGES {
            return Err(GraphError::TooManyEdges {
                count: edges.len(),
                max: MAX_EDGES,
            });
        }

        for (from, to, weight) in &edges {
            let (from, to) = (from.as_ref(), to.as_ref());
            let lookup = |node: &str| {
                index
                    .get(node)
                    .copied()
                    .ok_or_else(|| GraphError::UnknownEndpoint {
                        from: from.to_string(),
                        to: to.to_string(),
                        node: node.to_string(),
                    })
            };
            let a = lookup(from)?;
            let b = lookup(to)?;
            if a == b {
                return Err(GraphError::SelfLoop {
                    node: from.to_string(),
                });
            }
            if graph.find_edge(a, b).is_some() {
                return Err(GraphError::DuplicateEdge {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
            graph.add_edge(a, b, *weight);
        }

        Ok(Self { graph, index })
    }

    /// Same as [`CutGraph::new`] with every edge weighing 1.
    pub fn with_unit_weights<N, L, E, S>(nodes: N, edges: E) -> Result<Self, GraphError>
    where
        N: IntoIterator<Item = L>,
        L: Into<String>,
        E: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        Self::new(nodes, edges.into_iter().map(|(u, v)| (u, v, 1)))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Edges in index order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph.edge_references().map(move |edge| Edge {
            index: edge.id().index(),
            source: self.graph[edge.source()].clone(),
            target: self.graph[edge.target()].clone(),
            weight: *edge.weight(),
        })
    }

    /// Edge weights in index order.
    pub fn weights(&self) -> Vec<u32> {
        self.graph.edge_weights().copied().collect()
    }

    /// Index of the edge joining `a` and `b`, in either orientation.
    pub fn find_edge(&self, a: &str, b: &str) -> Option<usize> {
        let a = *self.index.get(a)?;
        let b = *self.index.get(b)?;
        self.graph.find_edge(a, b).map(|edge| edge.index())
    }

    /// The whole graph with no edge removed.
    pub fn view(&self) -> GraphView<'_> {
        GraphView::new(self, EdgeSubset::EMPTY)
    }

    /// A view of this graph with the edges in `subset` removed.
    ///
    /// Bits past the last edge are ignored.
    pub fn copy_without(&self, subset: EdgeSubset) -> GraphView<'_> {
        let mask = EdgeSubset::full(self.edge_count());
        GraphView::new(self, subset.intersection(mask))
    }

    /// A view of this graph with the given edges removed, matched by endpoints.
    ///
    /// Edges this graph does not contain are skipped.
    pub fn without_edges<'e, I>(&self, edges: I) -> GraphView<'_>
    where
        I: IntoIterator<Item = &'e Edge>,
    {
        let removed = edges
            .into_iter()
            .filter_map(|edge| self.find_edge(&edge.source, &edge.target))
            .collect();
        GraphView::new(self, removed)
    }

    /// The underlying petgraph graph, node weights being labels and edge
    /// weights the cut weights. Edge indices match [`EdgeSubset`] bits.
    pub fn petgraph(&self) -> &UnGraph<String, u32> {
        &self.graph
    }
}
