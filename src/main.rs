use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use cajal::{
    read_trace_file, BlockDims, NodeNum, NodeStore, Topology, TraceAnalyzer, TraceMorphometry,
};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cajal", about = "Morphometry engine for SWC point traces")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute per-segment frustum metrics and print the aggregate report.
    Report {
        /// SWC trace file. Prompts on stdin when omitted.
        trace: Option<PathBuf>,
    },
    /// Classify nodes and print the root, terminal, and branch sets.
    Topology {
        /// SWC trace file. Prompts on stdin when omitted.
        trace: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Report { trace } => run_report(trace)?,
        Commands::Topology { trace } => run_topology(trace)?,
    }

    Ok(())
}

fn run_report(trace: Option<PathBuf>) -> Result<()> {
    let path = resolve_trace_path(trace)?;
    let block = read_trace_file(&path)
        .with_context(|| format!("failed to read trace from {}", path.display()))?;

    let analyzer = TraceAnalyzer::new(block);
    let node_count = analyzer.store().len();
    let morphometry = analyzer
        .run()
        .with_context(|| format!("analysis failed for {}", path.display()))?;

    print_report(node_count, analyzer.dims(), &morphometry);
    Ok(())
}

fn run_topology(trace: Option<PathBuf>) -> Result<()> {
    let path = resolve_trace_path(trace)?;
    let block = read_trace_file(&path)
        .with_context(|| format!("failed to read trace from {}", path.display()))?;

    let store = NodeStore::from_block(block);
    let parents = store.parent_index();
    let topology = Topology::classify(&parents)
        .with_context(|| format!("classification failed for {}", path.display()))?;

    print_topology(store.len(), &topology);
    Ok(())
}

fn resolve_trace_path(trace: Option<PathBuf>) -> Result<PathBuf> {
    match trace {
        Some(path) => Ok(path),
        None => {
            print!("Enter the path to the SWC trace file: ");
            std::io::stdout().flush()?;

            let mut line = String::new();
            std::io::stdin()
                .read_line(&mut line)
                .context("failed to read trace path from stdin")?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                anyhow::bail!("no trace path given");
            }
            Ok(PathBuf::from(trimmed))
        }
    }
}

fn print_report(node_count: usize, dims: Option<BlockDims>, morphometry: &TraceMorphometry) {
    let report = &morphometry.report;

    println!("nodes\t{}", node_count);
    if let Some(dims) = dims {
        println!("volume dims\t{}x{}x{}", dims.x, dims.y, dims.z);
    }
    println!("roots\t{}", report.root_count);
    println!("branches\t{}", report.branch_count);
    println!("terminals\t{}", report.terminal_count);
    println!("segments\t{}", report.segment_count);
    println!("total length\t{:.4}", report.total_length);
    println!("total lateral area\t{:.4}", report.total_surface_area);
    println!("total volume\t{:.4}", report.total_volume);
    println!(
        "segment length min/avg/max\t{:.4}/{:.4}/{:.4}",
        report.min_length(),
        report.average_length(),
        report.max_length
    );
}

fn print_topology(node_count: usize, topology: &Topology) {
    println!("nodes\t{}", node_count);
    println!("roots\t{}", join_ids(topology.roots()));
    println!("terminals\t{}", join_ids(topology.terminals()));
    for &branch in topology.branches() {
        println!(
            "branch\t{}\tchildren={}",
            branch,
            join_ids(topology.children_of(branch))
        );
    }
}

fn join_ids(ids: &[NodeNum]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
