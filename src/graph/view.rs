use crate::cuts::{self, EdgeSubset};
use crate::graph::CutGraph;

/// A borrowed graph with a set of edges masked out.
///
/// Removing edges never clones the graph, it only changes the mask.
#[derive(Debug, Clone, Copy)]
pub struct GraphView<'a> {
    graph: &'a CutGraph,
    removed: EdgeSubset,
}

impl<'a> GraphView<'a> {
    pub(crate) fn new(graph: &'a CutGraph, removed: EdgeSubset) -> Self {
        Self { graph, removed }
    }

    pub fn graph(&self) -> &'a CutGraph {
        self.graph
    }

    pub fn removed(&self) -> EdgeSubset {
        self.removed
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn remaining_edge_count(&self) -> usize {
        self.graph.edge_count() - self.removed.len()
    }

    pub fn count_partitions(&self) -> usize {
        cuts::count_partitions(self)
    }

    pub fn components(&self) -> Vec<Vec<String>> {
        cuts::components(self)
    }
}
