//! Command-line front end: load a dataset and a rule, report every occurrence.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use nettree_core::display::{dot, grid, trace};
use nettree_core::input::load_rule;
use nettree_core::{Dataset, MatchConfig, NetTree};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "nettree", version, about = "Find every occurrence of a sequential rule in a symbolic time series")]
struct Cli {
    /// Dataset JSON: {"timestamps": [...], "series": [{"name": ..., "values": [...]}]}
    #[arg(short, long)]
    data: PathBuf,

    /// Rule JSON: [{"series": ..., "symbol": ..., "op": ..., "gap": [min, max]}]
    #[arg(short, long)]
    rule: PathBuf,

    /// Optional matcher configuration JSON
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print the dataset grid with occurrence N highlighted
    #[arg(long, value_name = "N")]
    render: Option<usize>,

    /// Print the ancestry of the leaf of occurrence N
    #[arg(long, value_name = "N")]
    trace: Option<usize>,

    /// Print the net-tree in Graphviz DOT format
    #[arg(long)]
    dot: bool,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => MatchConfig::from_path(path).with_context(|| format!("loading config {}", path.display()))?,
        None => MatchConfig::default(),
    };
    let dataset = Dataset::from_path(&cli.data).with_context(|| format!("loading dataset {}", cli.data.display()))?;
    let specs = load_rule(&cli.rule).with_context(|| format!("loading rule {}", cli.rule.display()))?;

    let tree = NetTree::from_specs(&dataset, &specs, &config).context("matching rule against dataset")?;
    info!(occurrences = tree.occurrences(), nodes = tree.node_count(), "match complete");

    match cli.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&tree.report())?),
        Format::Text => {
            println!("occurrences: {}", tree.occurrences());
            for (i, occurrence) in tree.patterns().iter().enumerate() {
                let chain: Vec<String> = tree
                    .events(occurrence)
                    .iter()
                    .map(|e| format!("{}={}@{}", e.series, e.value, e.interval.start))
                    .collect();
                println!("{:>4}: {}", i, chain.join(" -> "));
            }
        }
    }

    if let Some(n) = cli.render {
        let out = grid::render_occurrence(&dataset, &tree, n)
            .with_context(|| format!("no occurrence {} to render", n))?;
        print!("{}", out);
    }

    if let Some(n) = cli.trace {
        let leaf = tree
            .patterns()
            .get(n)
            .and_then(|o| o.leaf())
            .with_context(|| format!("no occurrence {} to trace", n))?;
        print!("{}", trace::format_trace(&tree, leaf));
    }

    if cli.dot {
        println!("{}", dot::to_dot(&tree));
    }

    Ok(())
}
