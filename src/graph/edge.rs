use std::fmt;

use serde::Serialize;

/// An edge of a [`crate::CutGraph`], detached from the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub index: usize,
    pub source: String,
    pub target: String,
    pub weight: u32,
}

impl Edge {
    pub fn new(index: usize, source: impl Into<String>, target: impl Into<String>, weight: u32) -> Self {
        Self {
            index,
            source: source.into(),
            target: target.into(),
            weight,
        }
    }

    /// Whether this edge joins `a` and `b`, in either orientation.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} ({})", self.source, self.target, self.weight)
    }
}
