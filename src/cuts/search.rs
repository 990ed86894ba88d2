use std::cmp::Ordering;
use std::ops::Range;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::cuts::{EdgeSubset, KCut, Subsets};
use crate::error::SearchError;
use crate::graph::CutGraph;

/// How often, in candidates, the deadline is checked.
const DEADLINE_STRIDE: u64 = 1024;

/// Which of several equally light qualifying cuts is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// The cut met last in enumeration order, i.e. the one with the largest
    /// subset mask.
    #[default]
    #[value(name = "last")]
    LastEncountered,
    /// The cut with the fewest edges; among those, the one whose sorted edge
    /// indices are lexicographically smallest.
    #[value(name = "fewest")]
    FewestEdges,
}

impl TieBreak {
    /// Orders two subsets of equal weight, `Less` meaning `a` is preferred.
    fn compare(self, a: EdgeSubset, b: EdgeSubset) -> Ordering {
        match self {
            TieBreak::LastEncountered => b.bits().cmp(&a.bits()),
            TieBreak::FewestEdges => a
                .len()
                .cmp(&b.len())
                .then_with(|| a.indices().cmp(b.indices())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    subset: EdgeSubset,
    weight: u64,
}

impl Candidate {
    fn beats(&self, other: &Candidate, tie_break: TieBreak) -> bool {
        match self.weight.cmp(&other.weight) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => tie_break.compare(self.subset, other.subset) == Ordering::Less,
        }
    }
}

/// Best cut of one index range.
#[derive(Debug, Default)]
struct Outcome {
    best: Option<Candidate>,
    examined: u64,
    interrupted: bool,
}

impl Outcome {
    fn merge(self, other: Outcome, tie_break: TieBreak) -> Outcome {
        let best = match (self.best, other.best) {
            (Some(a), Some(b)) => Some(if b.beats(&a, tie_break) { b } else { a }),
            (a, b) => a.or(b),
        };
        Outcome {
            best,
            examined: self.examined + other.examined,
            interrupted: self.interrupted || other.interrupted,
        }
    }
}

/// Exhaustive search for the lightest edge set splitting a graph into
/// exactly `target` connected components.
///
/// Every subset of the edges is a candidate. Candidates strictly heavier than
/// the best qualifying cut so far are skipped without counting components.
#[derive(Debug, Clone)]
pub struct CutSearch<'g> {
    graph: &'g CutGraph,
    target: usize,
    tie_break: TieBreak,
    budget: Option<u64>,
    deadline: Option<Duration>,
    parallel: bool,
}

impl<'g> CutSearch<'g> {
    /// Fails if `target` is not in `1..=graph.node_count()`.
    pub fn new(graph: &'g CutGraph, target: usize) -> Result<Self, SearchError> {
        let node_count = graph.node_count();
        if target == 0 || target > node_count {
            return Err(SearchError::InvalidTarget { target, node_count });
        }
        Ok(Self {
            graph,
            target,
            tie_break: TieBreak::default(),
            budget: None,
            deadline: None,
            parallel: false,
        })
    }

    pub fn from_config(graph: &'g CutGraph, config: &SearchConfig) -> Result<Self, SearchError> {
        let mut search = Self::new(graph, config.target_partitions)?.tie_break(config.tie_break);
        search.budget = config.budget;
        search.deadline = config.deadline;
        search.parallel = config.parallel;
        Ok(search)
    }

    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Examine at most `budget` candidates, the first ones in enumeration
    /// order. Not part of the plain exhaustive search; a cut found under a
    /// budget is only the best among the candidates examined.
    pub fn budget(mut self, budget: u64) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Stop once `deadline` has elapsed since the run started.
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Make [`CutSearch::execute`] use the rayon thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Number of candidates in the full enumeration, `2^|E|`.
    pub fn total(&self) -> u64 {
        Subsets::total(self.graph.edge_count())
    }

    fn end(&self) -> u64 {
        match self.budget {
            Some(budget) => budget.min(self.total()),
            None => self.total(),
        }
    }

    /// Runs the search, in parallel if so configured.
    pub fn execute(&self) -> KCut {
        if self.parallel {
            self.run_parallel()
        } else {
            self.run()
        }
    }

    /// Runs the search on the current thread.
    pub fn run(&self) -> KCut {
        let started = Instant::now();
        self.log_start("sequential");
        let weights = self.graph.weights();
        let outcome = self.search_range(&weights, 0..self.end(), started);
        self.finish(outcome, started)
    }

    /// Runs the search on the rayon thread pool.
    ///
    /// The enumeration is split into contiguous ranges searched
    /// independently; because both tie-break policies only look at the
    /// candidates themselves, the winner is the one [`CutSearch::run`] finds.
    pub fn run_parallel(&self) -> KCut {
        let started = Instant::now();
        self.log_start("parallel");
        let weights = self.graph.weights();
        let end = self.end();
        let chunks = (rayon::current_num_threads() as u64 * 4).clamp(1, end.max(1));
        let chunk_len = end.div_ceil(chunks);
        let tie_break = self.tie_break;

        let outcome = (0..chunks)
            .into_par_iter()
            .map(|chunk| {
                let start = (chunk * chunk_len).min(end);
                let stop = (start + chunk_len).min(end);
                self.search_range(&weights, start..stop, started)
            })
            .reduce(Outcome::default, |a, b| a.merge(b, tie_break));

        self.finish(outcome, started)
    }

    fn search_range(&self, weights: &[u32], range: Range<u64>, started: Instant) -> Outcome {
        let mut outcome = Outcome::default();

        for subset in Subsets::range(range) {
            if let Some(deadline) = self.deadline {
                if outcome.examined % DEADLINE_STRIDE == 0 && started.elapsed() >= deadline {
                    outcome.interrupted = true;
                    break;
                }
            }
            outcome.examined += 1;

            let candidate = Candidate {
                subset,
                weight: subset.weight(weights),
            };

            // a heavier cut can never replace the current best
            if let Some(best) = &outcome.best {
                if !candidate.beats(best, self.tie_break) {
                    continue;
                }
            }

            if self.graph.copy_without(subset).count_partitions() == self.target {
                log::debug!(
                    "new best cut {:#b} with weight {}",
                    candidate.subset.bits(),
                    candidate.weight
                );
                outcome.best = Some(candidate);
            }
        }

        outcome
    }

    fn log_start(&self, mode: &str) {
        log::info!(
            "Searching {} of {} edge subsets for a {}-cut ({} nodes, {} edges, {})",
            self.end(),
            self.total(),
            self.target,
            self.graph.node_count(),
            self.graph.edge_count(),
            mode
        );
    }

    fn finish(&self, outcome: Outcome, started: Instant) -> KCut {
        let complete = !outcome.interrupted && outcome.examined == self.total();
        if !complete {
            log::warn!(
                "Search stopped after {} of {} candidates, result may not be minimal",
                outcome.examined,
                self.total()
            );
        }
        match &outcome.best {
            Some(best) if best.subset.is_empty() => log::info!(
                "Graph already has {} partitions, nothing to cut ({} candidates examined)",
                self.target,
                outcome.examined
            ),
            Some(best) => log::info!(
                "Best {}-cut weighs {} ({} edges), {} candidates examined in {:?}",
                self.target,
                best.weight,
                best.subset.len(),
                outcome.examined,
                started.elapsed()
            ),
            None => log::info!(
                "No edge subset yields exactly {} partitions, {} candidates examined in {:?}",
                self.target,
                outcome.examined,
                started.elapsed()
            ),
        }

        KCut::new(
            self.graph,
            self.target,
            outcome.best.map(|best| (best.subset, best.weight)),
            outcome.examined,
            self.total(),
            complete,
        )
    }
}

/// Lightest edge set whose removal leaves exactly `target` components, using
/// the default tie-break and no budget.
pub fn find_min_k_cut(graph: &CutGraph, target: usize) -> Result<KCut, SearchError> {
    Ok(CutSearch::new(graph, target)?.run())
}
