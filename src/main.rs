use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use min_k_cut::{CutSearch, GraphSpec, SearchConfig, TieBreak};

#[derive(Parser, Debug)]
#[clap(
    name = "min-k-cut",
    about = "Exhaustive minimum K-cut search over small weighted graphs"
)]
struct Cli {
    /// Graph spec in JSON; the built-in seven node sample when omitted
    #[clap(long)]
    input: Option<PathBuf>,

    /// Number of partitions to cut the graph into [default: from input, else 3]
    #[clap(long, short = 'k')]
    target: Option<usize>,

    /// Which of several equally light cuts to report
    #[clap(long, value_enum, default_value = "last")]
    tie_break: TieBreak,

    /// Examine at most this many edge subsets
    #[clap(long)]
    budget: Option<u64>,

    /// Stop searching after this many milliseconds
    #[clap(long)]
    deadline_ms: Option<u64>,

    /// Search on all worker threads
    #[clap(long)]
    parallel: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Print the result as JSON
    #[clap(long)]
    json: bool,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let spec = match &args.input {
        Some(path) => GraphSpec::from_path(path)?,
        None => GraphSpec::reference(),
    };
    let graph = spec.build().context("invalid graph")?;

    log::info!(
        "Loaded graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let config = SearchConfig {
        target_partitions: args
            .target
            .or(spec.target_partitions)
            .unwrap_or(SearchConfig::default().target_partitions),
        tie_break: args.tie_break,
        budget: args.budget,
        deadline: args.deadline_ms.map(Duration::from_millis),
        parallel: args.parallel,
        threads: args.threads,
    };

    if config.parallel && config.threads > 0 {
        log::info!("Using {} worker threads", config.threads);
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build_global()?;
    }

    let cut = CutSearch::from_config(&graph, &config)?.execute();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&cut)?);
    } else {
        println!("{}", cut);
    }

    Ok(())
}
