use std::path::PathBuf;

use thiserror::Error;

/// Rejected graph input. Raised only while building a [`crate::CutGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("edge {from}-{to} references unknown node {node}")]
    UnknownEndpoint {
        from: String,
        to: String,
        node: String,
    },
    #[error("edge {node}-{node} is a self-loop")]
    SelfLoop { node: String },
    #[error("edge {from}-{to} is given more than once")]
    DuplicateEdge { from: String, to: String },
    #[error("node {0} is given more than once")]
    DuplicateNode(String),
    #[error("graph has {count} edges, at most {max} can be enumerated")]
    TooManyEdges { count: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("target of {target} partitions is outside 1..={node_count}")]
    InvalidTarget { target: usize, node_count: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read graph spec {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed graph spec")]
    Json(#[from] serde_json::Error),
    #[error("invalid graph")]
    Graph(#[from] GraphError),
}
