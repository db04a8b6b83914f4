use std::thread;

use dist_dijkstra::distributed::{Communicator, GatherLayout, LocalGroup};
use dist_dijkstra::graph::generators::{sample_graph, seeded_random_graph};
use dist_dijkstra::graph::DirectedGraph;
use dist_dijkstra::{BatchRunner, DistanceTable, DistributedCoordinator, Error, WorkerReport};

fn sequential_table(graph: &DirectedGraph<u32>) -> DistanceTable<u32> {
    BatchRunner::new().compute_all_pairs(graph).unwrap()
}

#[test]
fn test_worker_counts_match_sequential_table() {
    let graph = seeded_random_graph(37, 20u32, 8).unwrap();
    let expected = sequential_table(&graph);
    let coordinator = DistributedCoordinator::new(&graph);

    for workers in 1..=8 {
        let report = coordinator.run_thread_group(workers).unwrap();
        assert_eq!(report.rank, 0);
        assert_eq!(report.workers, workers);
        assert_eq!(report.table.as_ref(), Some(&expected), "{} workers", workers);
    }
}

#[test]
fn test_rayon_runner_matches_sequential_table() {
    let graph = seeded_random_graph(150, 20u32, 4).unwrap();
    let runner: BatchRunner<u32, DirectedGraph<u32>> = BatchRunner::new();

    assert_eq!(
        runner.compute_all_pairs_parallel(&graph).unwrap(),
        runner.compute_all_pairs(&graph).unwrap()
    );
}

#[test]
fn test_more_workers_than_sources() {
    let graph: DirectedGraph<u32> = sample_graph().unwrap();
    let report = DistributedCoordinator::new(&graph).run_thread_group(7).unwrap();

    let table = report.table.unwrap();
    assert_eq!(table, sequential_table(&graph));
    assert_eq!(table.row(0).unwrap(), &[Some(0), Some(1), Some(2), Some(2), Some(3)]);
    assert_eq!(report.sources, 0..1);
}

#[test]
fn test_empty_graph_gathers_empty_table() {
    let graph: DirectedGraph<u32> = DirectedGraph::with_vertices(0);
    let report = DistributedCoordinator::new(&graph).run_thread_group(3).unwrap();

    let table = report.table.unwrap();
    assert_eq!(table.vertex_count(), 0);
    assert!(table.as_flat().is_empty());
}

#[test]
fn test_only_root_holds_the_table() {
    let graph = seeded_random_graph(10, 20u32, 2).unwrap();
    let coordinator = DistributedCoordinator::new(&graph).with_root(2);
    let group = LocalGroup::<Option<u32>>::new(4).unwrap();

    let reports: Vec<WorkerReport<u32>> = thread::scope(|scope| {
        let handles: Vec<_> = group
            .into_iter()
            .map(|comm| {
                let coordinator = &coordinator;
                scope.spawn(move || coordinator.run(&comm).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let ranges: Vec<_> = reports.iter().map(|r| r.sources.clone()).collect();
    assert_eq!(ranges, vec![0..3, 3..6, 6..8, 8..10]);

    for report in &reports {
        assert_eq!(report.table.is_some(), report.rank == 2);
    }
    assert_eq!(reports[2].table.as_ref(), Some(&sequential_table(&graph)));
}

#[test]
fn test_root_outside_group_is_rejected() {
    let graph: DirectedGraph<u32> = sample_graph().unwrap();
    let result = DistributedCoordinator::new(&graph).with_root(3).run_thread_group(3);

    assert!(matches!(result, Err(Error::InvalidPartition { rank: 3, workers: 3 })));
}

#[test]
fn test_zero_workers_is_rejected() {
    let graph: DirectedGraph<u32> = sample_graph().unwrap();
    let result = DistributedCoordinator::new(&graph).run_thread_group(0);

    assert!(matches!(result, Err(Error::InvalidPartition { workers: 0, .. })));
}

#[test]
fn test_gather_places_buffers_at_displacements() {
    let layout = GatherLayout {
        counts: vec![2, 0, 3],
        displacements: vec![0, 2, 2],
    };
    let group = LocalGroup::<u64>::new(3).unwrap();
    assert_eq!(group.len(), 3);
    assert!(!group.is_empty());

    let results: Vec<Option<Vec<u64>>> = thread::scope(|scope| {
        let handles: Vec<_> = group
            .into_iter()
            .map(|comm| {
                let layout = &layout;
                scope.spawn(move || {
                    let rank = comm.rank() as u64;
                    let count = layout.counts[comm.rank()];
                    let local = vec![rank * 10; count];
                    let root_layout = if comm.rank() == 0 { Some(layout) } else { None };
                    comm.gather_varcount(local, root_layout, 0).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results[0], Some(vec![0, 0, 20, 20, 20]));
    assert_eq!(results[1], None);
    assert_eq!(results[2], None);
}

#[test]
fn test_gather_detects_size_mismatch() {
    let layout = GatherLayout::new(4, 2).unwrap();
    let group = LocalGroup::<Option<u32>>::new(2).unwrap();

    let results: Vec<Result<Option<Vec<Option<u32>>>, Error>> = thread::scope(|scope| {
        let handles: Vec<_> = group
            .into_iter()
            .map(|comm| {
                let layout = &layout;
                scope.spawn(move || {
                    // Rank 1 sends one row short
                    let len = if comm.rank() == 0 { 8 } else { 4 };
                    let root_layout = if comm.rank() == 0 { Some(layout) } else { None };
                    comm.gather_varcount(vec![Some(1); len], root_layout, 0)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(matches!(
        results[0],
        Err(Error::GatherSizeMismatch {
            rank: 1,
            expected: 8,
            actual: 4
        })
    ));
    assert!(matches!(results[1], Ok(None)));
}

#[test]
fn test_local_failure_is_reported_instead_of_hanging() {
    // 0->1->2 overflows u8 only for source 0
    let graph: DirectedGraph<u8> =
        DirectedGraph::from_edges(3, vec![(0, 1, 200), (1, 2, 200)]).unwrap();
    let result = DistributedCoordinator::new(&graph).run_thread_group(3);

    assert!(matches!(result, Err(Error::DistanceOverflow(1, 2))));
}

#[test]
fn test_overflowing_detour_still_gathers() {
    let graph: DirectedGraph<u8> =
        DirectedGraph::from_edges(4, vec![(0, 1, 200), (0, 3, 250), (1, 3, 100)]).unwrap();
    let report = DistributedCoordinator::new(&graph).run_thread_group(2).unwrap();

    let table = report.table.unwrap();
    assert_eq!(table.row(0).unwrap(), &[Some(0), Some(200), None, Some(250)]);
    assert_eq!(table.row(1).unwrap(), &[None, Some(0), None, Some(100)]);
}
