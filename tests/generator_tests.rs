use std::collections::VecDeque;

use dist_dijkstra::graph::generators::{generate_random_graph, seeded_random_graph, NEIGHBOURHOOD_WINDOW};
use dist_dijkstra::graph::{DirectedGraph, Graph};
use dist_dijkstra::Error;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn undirected_component_size(graph: &DirectedGraph<u32>) -> usize {
    let n = graph.vertex_count();
    let mut neighbours = vec![Vec::new(); n];
    for u in 0..n {
        for &(v, _) in graph.outgoing_edges(u) {
            neighbours[u].push(v);
            neighbours[v].push(u);
        }
    }

    let mut seen = vec![false; n];
    let mut queue = VecDeque::from(vec![0]);
    seen[0] = true;
    let mut count = 1;
    while let Some(u) = queue.pop_front() {
        for &v in &neighbours[u] {
            if !seen[v] {
                seen[v] = true;
                count += 1;
                queue.push_back(v);
            }
        }
    }
    count
}

#[test]
fn test_edges_stay_inside_the_window() {
    let n = 500;
    let max_weight = 20u32;
    let graph = seeded_random_graph(n, max_weight, 3).unwrap();

    assert_eq!(graph.edge_count(), 2 * (n - 1));
    assert!(graph.max_edge_weight() <= Some(max_weight));

    for i in 0..n {
        let edges = graph.outgoing_edges(i);
        let forward: Vec<_> = edges.iter().filter(|&&(v, _)| v > i).collect();
        let backward: Vec<_> = edges.iter().filter(|&&(v, _)| v < i).collect();

        assert_eq!(forward.len(), usize::from(i + 1 < n), "vertex {}", i);
        assert_eq!(backward.len(), usize::from(i > 0), "vertex {}", i);

        for &&(v, w) in forward.iter().chain(backward.iter()) {
            assert!(v.abs_diff(i) <= NEIGHBOURHOOD_WINDOW);
            assert!((1..=max_weight).contains(&w));
        }
    }
}

#[test]
fn test_forward_edge_of_last_vertices() {
    let graph = seeded_random_graph(6, 5u32, 21).unwrap();

    // The window shrinks near the end: vertex 4 can only reach 5
    assert_eq!(graph.outgoing_edges(4).iter().filter(|e| e.0 > 4).count(), 1);
    assert!(graph.has_edge(4, 5));
    // and vertex 1 can only step back to 0
    assert!(graph.has_edge(1, 0));
}

#[test]
fn test_same_seed_same_graph() {
    let a = seeded_random_graph(200, 20u32, 99).unwrap();
    let b = seeded_random_graph(200, 20u32, 99).unwrap();
    let c = seeded_random_graph(200, 20u32, 100).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_caller_supplied_rng() {
    let mut rng = StdRng::seed_from_u64(99);
    let from_rng: DirectedGraph<u32> = generate_random_graph(200, 20, &mut rng).unwrap();
    assert_eq!(from_rng, seeded_random_graph(200, 20u32, 99).unwrap());
}

#[test]
fn test_generated_graph_is_weakly_connected() {
    for &n in &[1, 2, 7, 64, 1024] {
        let graph = seeded_random_graph(n, 20u32, n as u64).unwrap();
        assert_eq!(undirected_component_size(&graph), n);
    }
}

#[test]
fn test_tiny_graphs() {
    let empty = seeded_random_graph(0, 20u32, 1).unwrap();
    assert_eq!(empty.vertex_count(), 0);
    assert_eq!(empty.max_edge_weight(), None);
    assert_eq!(empty.edge_count(), 0);

    let single = seeded_random_graph(1, 20u32, 1).unwrap();
    assert_eq!(single.edge_count(), 0);

    let pair = seeded_random_graph(2, 20u32, 1).unwrap();
    assert!(pair.has_edge(0, 1));
    assert!(pair.has_edge(1, 0));
}

#[test]
fn test_zero_max_weight_is_rejected() {
    assert!(matches!(
        seeded_random_graph(10, 0u32, 1),
        Err(Error::InvalidWeightBound)
    ));
}
