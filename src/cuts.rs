mod cut;
mod partition;
mod search;
mod subsets;

pub use cut::KCut;
pub use partition::{components, count_partitions, label_components};
pub use search::{find_min_k_cut, CutSearch, TieBreak};
pub use subsets::{enumerate_subsets, EdgeSubset, Indices, Subsets};
