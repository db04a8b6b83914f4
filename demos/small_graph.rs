use dist_dijkstra::graph::generators::sample_graph;
use dist_dijkstra::graph::{DirectedGraph, Graph};
use dist_dijkstra::{BatchRunner, Dijkstra, ShortestPathAlgorithm};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // (0) --1-- (1) --1-- (2)
    //  |         |         |
    //  2         4         3
    //  |         |         |
    // (3) --1-- (4) -------+
    let graph: DirectedGraph<u32> = sample_graph()?;

    println!("--- Shortest paths on the sample graph ---");
    println!("Graph has {} vertices and {} edges", graph.vertex_count(), graph.edge_count());

    let dijkstra = Dijkstra::new();
    let result = dijkstra.compute_shortest_paths(&graph, 0)?;

    for v in 0..graph.vertex_count() {
        match result.distances[v] {
            Some(dist) => {
                let path = <Dijkstra as ShortestPathAlgorithm<u32, DirectedGraph<u32>>>::get_path(&dijkstra, &result, v)
                    .unwrap_or_default();
                println!("Vertex {}: distance = {}, path = {:?}", v, dist, path);
            }
            None => println!("Vertex {}: unreachable", v),
        }
    }

    println!("\n--- All pairs ---");
    let runner: BatchRunner<u32, DirectedGraph<u32>> = BatchRunner::new();
    let table = runner.compute_all_pairs(&graph)?;
    print!("{}", table);

    Ok(())
}
