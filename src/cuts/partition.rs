use std::collections::VecDeque;

use itertools::Itertools;
use petgraph::visit::{
    EdgeIndexable, EdgeRef, IntoEdges, IntoNodeIdentifiers, NodeIndexable, VisitMap, Visitable,
};

use crate::cuts::EdgeSubset;
use crate::graph::GraphView;

/// Gets the endpoint of `edge` opposite `vertex`.
///
/// `vertex` must be an endpoint of `edge`, which holds for every edge handed
/// out by `graph.edges(vertex)`.
fn other_endpoint<G>(graph: G, edge: G::EdgeRef, vertex: G::NodeId) -> G::NodeId
where
    G: NodeIndexable + IntoEdges,
{
    if vertex == edge.source() {
        edge.target()
    } else if vertex == edge.target() {
        edge.source()
    } else {
        let end_point = NodeIndexable::to_index(&graph, vertex);
        panic!("Illegal endpoint {}", end_point);
    }
}

/// Labels the connected components of `graph` once the `removed` edges are
/// gone, calling `on_node(component, node)` for every node.
///
/// Components are numbered from 0 in the order their first node is met.
/// Returns the number of components. Visitation state lives in a map local
/// to this call, so the graph itself is only read.
pub fn label_components<G, F>(graph: G, removed: EdgeSubset, mut on_node: F) -> usize
where
    G: NodeIndexable + EdgeIndexable + Visitable + IntoEdges + IntoNodeIdentifiers,
    F: FnMut(usize, G::NodeId),
{
    let mut visited = graph.visit_map();
    let mut queue: VecDeque<G::NodeId> = VecDeque::new();
    let mut count = 0;

    for start in graph.node_identifiers() {
        if !visited.visit(start) {
            continue;
        }
        on_node(count, start);
        queue.push_back(start);

        // do a BFS through the remaining edges
        while let Some(vertex) = queue.pop_front() {
            for edge in graph.edges(vertex) {
                let edge_index = EdgeIndexable::to_index(&graph, edge.id());
                if removed.contains(edge_index) {
                    continue;
                }
                let next = other_endpoint(graph, edge, vertex);
                if visited.visit(next) {
                    on_node(count, next);
                    queue.push_back(next);
                }
            }
        }

        count += 1;
    }

    count
}

/// Number of connected components left in `view`.
///
/// At least 1 for any graph with a node; 0 for the empty graph.
pub fn count_partitions(view: &GraphView<'_>) -> usize {
    label_components(view.graph().petgraph(), view.removed(), |_, _| {})
}

/// Node labels of each connected component of `view`.
///
/// Labels are sorted within a component and components are sorted by their
/// smallest label, so the result does not depend on insertion order.
pub fn components(view: &GraphView<'_>) -> Vec<Vec<String>> {
    let graph = view.graph().petgraph();
    let mut members: Vec<Vec<String>> = vec![];
    label_components(graph, view.removed(), |component, node| {
        if component == members.len() {
            members.push(vec![]);
        }
        members[component].push(graph[node].clone());
    });

    members
        .into_iter()
        .map(|component| component.into_iter().sorted().collect_vec())
        .sorted()
        .collect()
}
