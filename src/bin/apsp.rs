use std::time::Duration;

use clap::Parser;
use dist_dijkstra::config::{OutputFormat, RunConfig, RunMode};
use dist_dijkstra::graph::generators::{sample_graph, seeded_random_graph};
use dist_dijkstra::graph::{DirectedGraph, Graph};
use dist_dijkstra::{BatchRunner, DistanceTable, DistributedCoordinator};

fn print_table(table: &DistanceTable<u32>, output: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        OutputFormat::Text => print!("{}", table),
        OutputFormat::Json => println!("{}", table.to_json()?),
        OutputFormat::None => {}
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    // clap prints usage and exits on --help or malformed flags
    let config = RunConfig::parse();
    config.validate()?;

    let graph: DirectedGraph<u32> = match config.mode {
        RunMode::Small => sample_graph()?,
        _ => seeded_random_graph(config.vertex_count, config.max_weight, config.seed)?,
    };

    log::info!(
        "mode {}: {} vertices, {} edges, seed {}",
        config.mode,
        graph.vertex_count(),
        graph.edge_count(),
        config.seed
    );

    let runner: BatchRunner<u32, DirectedGraph<u32>> = BatchRunner::new();
    let (table, elapsed, label): (DistanceTable<u32>, Duration, &str) = match config.mode {
        RunMode::Small | RunMode::Sequential => {
            let report = runner.run_sequential(&graph)?;
            (report.table, report.elapsed, "non-parallel")
        }
        RunMode::Parallel => {
            let report = runner.run_parallel(&graph)?;
            (report.table, report.elapsed, "parallel (rayon)")
        }
        RunMode::Distributed => {
            let report = DistributedCoordinator::new(&graph).run_thread_group(config.workers)?;
            let table = report
                .table
                .ok_or("coordinator rank returned no table")?;
            (table, report.elapsed, "parallel")
        }
    };

    print_table(&table, config.output)?;
    println!(
        "Time taken {}: {:.3} seconds",
        label,
        elapsed.as_secs_f64()
    );

    Ok(())
}
