//! Minimum K-cut by exhaustive search.
//!
//! Every subset of a small weighted graph's edges is tried as a cut; the
//! lightest one whose removal leaves exactly K connected components wins.
//! Candidates heavier than the best cut found so far are skipped before
//! their components are counted.
//!
//! ```
//! use min_k_cut::{build_graph, find_min_k_cut};
//!
//! let graph = build_graph(["a", "b", "c"], [("a", "b", 2), ("b", "c", 1)]).unwrap();
//! let cut = find_min_k_cut(&graph, 2).unwrap();
//! assert_eq!(Some(1), cut.weight);
//! assert_eq!(4, cut.examined);
//! ```

pub mod config;
pub mod cuts;
pub mod error;
pub mod graph;

pub use config::{EdgeSpec, GraphSpec, SearchConfig};
pub use cuts::{
    components, count_partitions, enumerate_subsets, find_min_k_cut, CutSearch, EdgeSubset, KCut,
    Subsets, TieBreak,
};
pub use error::{ConfigError, GraphError, SearchError};
pub use graph::{CutGraph, Edge, GraphView};

/// Builds a graph from node labels and `(u, v, weight)` triples.
pub fn build_graph<N, L, E, S>(nodes: N, edges: E) -> Result<CutGraph, GraphError>
where
    N: IntoIterator<Item = L>,
    L: Into<String>,
    E: IntoIterator<Item = (S, S, u32)>,
    S: AsRef<str>,
{
    CutGraph::new(nodes, edges)
}

#[cfg(test)]
mod tests {
    use crate::{build_graph, find_min_k_cut, GraphError, GraphSpec};

    #[test]
    fn builds_reference_graph() {
        let spec = GraphSpec::reference();
        let graph = build_graph(
            spec.nodes.iter().cloned(),
            spec.edges
                .iter()
                .map(|edge| (edge.source.as_str(), edge.target.as_str(), edge.weight)),
        )
        .unwrap();
        assert_eq!(7, graph.node_count());
        assert_eq!(11, graph.edge_count());
        let cut = find_min_k_cut(&graph, 3).unwrap();
        assert_eq!(Some(12), cut.weight);
        assert_eq!(2048, cut.examined);
    }

    #[test]
    fn unknown_endpoint_fails_the_build() {
        let result = build_graph(["a", "b"], [("a", "b", 1), ("a", "q", 2)]);
        assert_eq!(
            Err(GraphError::UnknownEndpoint {
                from: "a".to_string(),
                to: "q".to_string(),
                node: "q".to_string(),
            }),
            result.map(|graph| graph.edge_count())
        );
    }
}
