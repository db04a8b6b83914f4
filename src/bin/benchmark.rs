use std::time::Duration;

use dist_dijkstra::graph::generators::seeded_random_graph;
use dist_dijkstra::graph::{DirectedGraph, Graph};
use dist_dijkstra::{BatchRunner, DistributedCoordinator};

const MAX_WEIGHT: u32 = 20;
const SEED: u64 = 7;

fn speedup(baseline: Duration, other: Duration) -> f64 {
    baseline.as_secs_f64() / other.as_secs_f64().max(f64::EPSILON)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let graph_sizes = vec![256, 512, 1024, 2048];
    let worker_counts = vec![2, 4, 8];

    println!("=====================================================");
    println!("Benchmark: all-pairs Dijkstra, sequential vs parallel");
    println!("Max edge weight: {}, seed: {}", MAX_WEIGHT, SEED);
    println!("=====================================================");

    let runner: BatchRunner<u32, DirectedGraph<u32>> = BatchRunner::new();
    let mut results = Vec::new();

    for &size in &graph_sizes {
        let graph: DirectedGraph<u32> = seeded_random_graph(size, MAX_WEIGHT, SEED)?;
        println!(
            "\nGraph has {} vertices and {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );

        let sequential = runner.run_sequential(&graph)?;
        println!("  - sequential: {:?}", sequential.elapsed);

        let pooled = runner.run_parallel(&graph)?;
        println!("  - rayon ({} threads): {:?}", rayon::current_num_threads(), pooled.elapsed);
        if pooled.table != sequential.table {
            return Err("rayon table differs from sequential table".into());
        }

        let coordinator = DistributedCoordinator::new(&graph);
        let mut group_times = Vec::new();
        for &workers in &worker_counts {
            let report = coordinator.run_thread_group(workers)?;
            if report.table.as_ref() != Some(&sequential.table) {
                return Err(format!("{}-worker table differs from sequential table", workers).into());
            }
            println!("  - {} workers: {:?}", workers, report.elapsed);
            group_times.push(report.elapsed);
        }

        results.push((size, sequential.elapsed, pooled.elapsed, group_times));
    }

    println!("\n=====================================================");
    println!("Summary of Results (speedup over sequential)");
    println!("=====================================================");
    print!("{:<10} | {:<15} | {:<10}", "Vertices", "Sequential (ms)", "Rayon");
    for workers in &worker_counts {
        print!(" | {:<10}", format!("{} workers", workers));
    }
    println!();
    println!("-----------------------------------------------------");

    for (size, sequential, pooled, group_times) in &results {
        print!(
            "{:<10} | {:<15} | {:<10.2}",
            size,
            sequential.as_millis(),
            speedup(*sequential, *pooled)
        );
        for time in group_times {
            print!(" | {:<10.2}", speedup(*sequential, *time));
        }
        println!();
    }

    Ok(())
}
