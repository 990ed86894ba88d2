//! Graph input and search settings

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cuts::TieBreak;
use crate::error::{ConfigError, GraphError};
use crate::graph::CutGraph;

fn default_weight() -> u32 {
    1
}

/// One edge of a [`GraphSpec`]; `weight` defaults to 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub source: String,
    pub target: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

impl EdgeSpec {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: u32) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

/// Serialized description of a graph, as read from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSpec {
    pub nodes: Vec<String>,
    pub edges: Vec<EdgeSpec>,
    /// Number of partitions to cut the graph into, if the file names one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_partitions: Option<usize>,
}

impl GraphSpec {
    /// The seven node, eleven edge sample graph with a target of 3 partitions.
    pub fn reference() -> Self {
        let edges = [
            ("a", "b", 1),
            ("a", "c", 4),
            ("b", "d", 3),
            ("b", "e", 6),
            ("c", "d", 2),
            ("c", "f", 5),
            ("d", "e", 2),
            ("d", "f", 4),
            ("e", "f", 2),
            ("e", "g", 7),
            ("f", "g", 6),
        ];
        Self {
            nodes: ["a", "b", "c", "d", "e", "f", "g"].map(String::from).to_vec(),
            edges: edges
                .into_iter()
                .map(|(u, v, weight)| EdgeSpec::new(u, v, weight))
                .collect(),
            target_partitions: Some(3),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("Loading graph from {}", path.display());
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn build(&self) -> Result<CutGraph, GraphError> {
        CutGraph::new(
            self.nodes.iter().cloned(),
            self.edges
                .iter()
                .map(|edge| (edge.source.as_str(), edge.target.as_str(), edge.weight)),
        )
    }
}

/// Settings for a single cut search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub target_partitions: usize,
    pub tie_break: TieBreak,
    /// Maximum number of candidates to examine
    pub budget: Option<u64>,
    /// Maximum wall-clock time for the search
    pub deadline: Option<Duration>,
    pub parallel: bool,
    /// Worker threads for a parallel search, 0 meaning all cores
    pub threads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            target_partitions: 3,
            tie_break: TieBreak::LastEncountered,
            budget: None,
            deadline: None,
            parallel: false,
            threads: 0,
        }
    }
}

impl SearchConfig {
    pub fn new(target_partitions: usize) -> Self {
        Self {
            target_partitions,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::config::{EdgeSpec, GraphSpec, SearchConfig};
    use crate::cuts::{find_min_k_cut, CutSearch, TieBreak};
    use crate::error::{ConfigError, GraphError};

    #[test]
    fn reference_spec_builds() {
        let graph = GraphSpec::reference().build().unwrap();
        assert_eq!(7, graph.node_count());
        assert_eq!(11, graph.edge_count());
        assert_eq!(Some(12), find_min_k_cut(&graph, 3).unwrap().weight);
    }

    #[test]
    fn missing_weight_defaults_to_one() {
        let spec = GraphSpec::from_json(
            r#"{
                "nodes": ["a", "b", "c"],
                "edges": [
                    {"source": "a", "target": "b"},
                    {"source": "b", "target": "c", "weight": 5}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            vec![EdgeSpec::new("a", "b", 1), EdgeSpec::new("b", "c", 5)],
            spec.edges
        );
        assert_eq!(None, spec.target_partitions);
    }

    #[test]
    fn round_trips_reference_through_json() {
        let spec = GraphSpec::reference();
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(spec, GraphSpec::from_json(&json).unwrap());
    }

    #[test]
    fn invalid_graph_is_reported_on_build() {
        let spec = GraphSpec {
            nodes: vec!["a".to_string()],
            edges: vec![EdgeSpec::new("a", "z", 1)],
            target_partitions: None,
        };
        assert!(matches!(spec.build(), Err(GraphError::UnknownEndpoint { .. })));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let result = GraphSpec::from_json(r#"{"nodes": ["a"]}"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir().join(format!("min-k-cut-{}.json", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", serde_json::to_string(&GraphSpec::reference()).unwrap()).unwrap();
        drop(file);

        let spec = GraphSpec::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(GraphSpec::reference(), spec);

        assert!(matches!(
            GraphSpec::from_path(&path),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn default_search_config() {
        let config = SearchConfig::default();
        assert_eq!(3, config.target_partitions);
        assert_eq!(TieBreak::LastEncountered, config.tie_break);
        assert!(!config.parallel);
        assert_eq!(0, config.threads);
        assert_eq!(SearchConfig { target_partitions: 5, ..config }, SearchConfig::new(5));
    }

    #[test]
    fn search_config_drives_search() {
        let graph = GraphSpec::reference().build().unwrap();
        let config = SearchConfig {
            tie_break: TieBreak::FewestEdges,
            budget: Some(64),
            ..SearchConfig::new(2)
        };
        let search = CutSearch::from_config(&graph, &config).unwrap();
        assert_eq!(2, search.target());
        let cut = search.run();
        assert_eq!(64, cut.examined);
        assert!(!cut.complete);
    }
}
