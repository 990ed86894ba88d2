use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::cuts::EdgeSubset;
use crate::graph::{CutGraph, Edge};

/// Outcome of a K-cut search.
///
/// `cut_set` is `None` when no examined subset leaves exactly
/// `target_partitions` components; `weight` is then `None` as well, standing
/// for an unbounded weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KCut {
    pub target_partitions: usize,
    pub cut_set: Option<Vec<Edge>>,
    pub weight: Option<u64>,
    /// Candidates examined, pruned ones included.
    pub examined: u64,
    /// Size of the full enumeration, `2^|E|`.
    pub total: u64,
    /// Whether every candidate was examined.
    pub complete: bool,
    /// Node labels of each component left by the cut.
    pub partitions: Vec<Vec<String>>,
}

impl KCut {
    pub(crate) fn new(
        graph: &CutGraph,
        target_partitions: usize,
        best: Option<(EdgeSubset, u64)>,
        examined: u64,
        total: u64,
        complete: bool,
    ) -> Self {
        let (cut_set, weight, partitions) = match best {
            Some((subset, weight)) => {
                let edges = graph.edges().collect_vec();
                let cut_set: Vec<Edge> = subset.select(&edges).cloned().collect();
                let partitions = graph.copy_without(subset).components();
                (Some(cut_set), Some(weight), partitions)
            }
            None => (None, None, vec![]),
        };

        Self {
            target_partitions,
            cut_set,
            weight,
            examined,
            total,
            complete,
            partitions,
        }
    }

    pub fn is_found(&self) -> bool {
        self.cut_set.is_some()
    }

    /// Number of edges in the cut.
    pub fn size(&self) -> Option<usize> {
        self.cut_set.as_ref().map(Vec::len)
    }

    /// Whether `edge` is part of the cut, matched by endpoints.
    pub fn removes(&self, edge: &Edge) -> bool {
        self.cut_set
            .iter()
            .flatten()
            .any(|removed| removed.connects(&edge.source, &edge.target))
    }
}

impl fmt::Display for KCut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.cut_set, self.weight) {
            (Some(edges), Some(weight)) => {
                writeln!(
                    f,
                    "BEST {}-cut: [{}] = {}",
                    self.target_partitions,
                    edges.iter().join(", "),
                    weight
                )?;
                let partitions = self
                    .partitions
                    .iter()
                    .map(|members| format!("{{{}}}", members.join(", ")))
                    .join(" ");
                writeln!(f, "Partitions: {}", partitions)?;
            }
            _ => writeln!(
                f,
                "No edge subset splits the graph into exactly {} partitions",
                self.target_partitions
            )?,
        }
        write!(
            f,
            "Examined {} of {} edge subsets",
            self.examined, self.total
        )?;
        if !self.complete {
            write!(f, " (stopped early)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cuts::{find_min_k_cut, CutSearch};
    use crate::graph::{CutGraph, Edge};

    fn path() -> CutGraph {
        CutGraph::new(["a", "b", "c"], [("a", "b", 2), ("b", "c", 1)]).unwrap()
    }

    #[test]
    fn reports_cut_edges_and_partitions() {
        let cut = find_min_k_cut(&path(), 2).unwrap();
        assert_eq!(Some(vec![Edge::new(1, "b", "c", 1)]), cut.cut_set);
        assert_eq!(Some(1), cut.weight);
        assert_eq!(Some(1), cut.size());
        assert_eq!(
            vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string()]],
            cut.partitions
        );
        assert!(cut.removes(&Edge::new(0, "c", "b", 1)));
        assert!(!cut.removes(&Edge::new(0, "a", "b", 2)));
    }

    #[test]
    fn displays_summary() {
        let cut = find_min_k_cut(&path(), 2).unwrap();
        let expected = "BEST 2-cut: [b-c (1)] = 1\n\
                        Partitions: {a, b} {c}\n\
                        Examined 4 of 4 edge subsets";
        assert_eq!(expected, cut.to_string());
    }

    #[test]
    fn displays_missing_cut() {
        let cut = CutSearch::new(&path(), 3).unwrap().budget(2).run();
        let expected = "No edge subset splits the graph into exactly 3 partitions\n\
                        Examined 2 of 4 edge subsets (stopped early)";
        assert_eq!(expected, cut.to_string());
        assert!(!cut.removes(&Edge::new(0, "a", "b", 2)));
    }

    #[test]
    fn serializes_to_json() {
        let cut = find_min_k_cut(&path(), 2).unwrap();
        let json = serde_json::to_value(&cut).unwrap();
        assert_eq!(1, json["weight"]);
        assert_eq!("b", json["cut_set"][0]["source"]);
        assert_eq!(4, json["examined"]);
    }
}
