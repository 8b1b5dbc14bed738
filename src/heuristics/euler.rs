//! Euler circuit extraction (Hierholzer with an explicit stack).

use crate::graph::Multigraph;

/// Closed walk from `start` that uses every edge of `graph` exactly once.
///
/// Every vertex must have even degree and all edges must be reachable from
/// `start`. The traversal consumes a private copy of the neighbor lists, so
/// `graph` can be shared between concurrent extractions. The returned walk
/// holds `edge_count + 1` vertices and ends where it started.
pub fn euler_circuit(graph: &Multigraph, start: usize) -> Vec<usize> {
    let mut remaining = graph.working_copy();
    let mut circuit = Vec::with_capacity(graph.edge_count() + 1);
    let mut stack = Vec::new();
    let mut current = start;

    while !remaining[current].is_empty() || !stack.is_empty() {
        if let Some(next) = remaining[current].pop() {
            stack.push(current);
            if let Some(pos) = remaining[next].iter().position(|&v| v == current) {
                remaining[next].remove(pos);
            }
            current = next;
        } else {
            circuit.push(current);
            if let Some(previous) = stack.pop() {
                current = previous;
            }
        }
    }
    circuit.push(current);

    debug_assert!(remaining.iter().all(Vec::is_empty));
    circuit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::matching::greedy_odd_matching;
    use crate::heuristics::spanning_tree::prim;
    use crate::instance::TspInstance;
    use crate::matrix::DistanceMatrix;
    use std::collections::HashMap;

    /// Multiset of undirected edges walked by `circuit`
    fn walked_edges(circuit: &[usize]) -> HashMap<(usize, usize), usize> {
        let mut counts = HashMap::new();
        for w in circuit.windows(2) {
            *counts.entry((w[0].min(w[1]), w[0].max(w[1]))).or_insert(0) += 1;
        }
        counts
    }

    fn edge_multiset(graph: &Multigraph) -> HashMap<(usize, usize), usize> {
        let mut counts = HashMap::new();
        for edge in graph.edges() {
            *counts.entry(edge).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_double_edge() {
        let mut graph = Multigraph::new(2);
        graph.add_edge(0, 1);
        graph.add_edge(0, 1);

        assert_eq!(euler_circuit(&graph, 0), vec![0, 1, 0]);
        assert_eq!(euler_circuit(&graph, 1), vec![1, 0, 1]);
    }

    #[test]
    fn test_isolated_vertex() {
        assert_eq!(euler_circuit(&Multigraph::new(1), 0), vec![0]);
    }

    #[test]
    fn test_square_cycle() {
        let mut graph = Multigraph::new(4);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(0, 3);
        graph.add_edge(2, 3);

        let circuit = euler_circuit(&graph, 0);

        assert_eq!(circuit.len(), 5);
        assert_eq!(circuit.first(), Some(&0));
        assert_eq!(circuit.last(), Some(&0));
        assert_eq!(walked_edges(&circuit), edge_multiset(&graph));
    }

    #[test]
    fn test_two_loops_through_shared_vertex() {
        // figure eight: triangles 0-1-2 and 0-3-4 meeting at 0
        let mut graph = Multigraph::new(5);
        for &(u, v) in &[(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0)] {
            graph.add_edge(u, v);
        }

        for start in 0..5 {
            let circuit = euler_circuit(&graph, start);
            assert_eq!(circuit.len(), 7);
            assert_eq!(circuit[0], start);
            assert_eq!(circuit[6], start);
            assert_eq!(walked_edges(&circuit), edge_multiset(&graph));
        }
    }

    #[test]
    fn test_matched_graphs_from_every_start() {
        let instance = TspInstance::random(25, 100, 5);
        let matrix = DistanceMatrix::build(&instance.cities, 2).unwrap();
        let mut graph = prim(&matrix).graph;
        greedy_odd_matching(&mut graph, &matrix);
        let snapshot = graph.clone();

        for start in 0..25 {
            let circuit = euler_circuit(&graph, start);
            assert_eq!(circuit.len(), graph.edge_count() + 1);
            assert_eq!(circuit[0], start);
            assert_eq!(*circuit.last().unwrap(), start);
            assert_eq!(walked_edges(&circuit), edge_multiset(&graph));
        }

        assert_eq!(graph, snapshot);
    }
}
