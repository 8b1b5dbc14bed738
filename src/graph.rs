//! Undirected multigraph stored as per-vertex neighbor lists.
//!
//! Parallel edges are allowed: once odd vertices are matched, the same pair
//! can be joined by a tree edge and a matching edge.

use std::collections::VecDeque;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Multigraph {
    adjacency: Vec<Vec<usize>>,
}

impl Multigraph {
    /// Graph with `vertices` vertices and no edges
    pub fn new(vertices: usize) -> Self {
        Multigraph {
            adjacency: vec![Vec::new(); vertices],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges, counting parallel edges separately
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn degree(&self, vertex: usize) -> usize {
        self.adjacency[vertex].len()
    }

    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        &self.adjacency[vertex]
    }

    /// Append `v` to `u`'s list and `u` to `v`'s list
    pub fn add_edge(&mut self, u: usize, v: usize) {
        self.adjacency[u].push(v);
        self.adjacency[v].push(u);
    }

    /// Vertices with an odd number of incident edges, in index order
    pub fn odd_vertices(&self) -> Vec<usize> {
        (0..self.vertex_count())
            .filter(|&v| self.degree(v) % 2 != 0)
            .collect()
    }

    pub fn all_degrees_even(&self) -> bool {
        self.adjacency.iter().all(|list| list.len() % 2 == 0)
    }

    /// Breadth-first reachability from vertex 0
    pub fn is_connected(&self) -> bool {
        let n = self.vertex_count();
        if n == 0 {
            return true;
        }

        let mut seen = vec![false; n];
        let mut queue = VecDeque::from([0]);
        seen[0] = true;
        let mut reached = 1;

        while let Some(v) = queue.pop_front() {
            for &u in &self.adjacency[v] {
                if !seen[u] {
                    seen[u] = true;
                    reached += 1;
                    queue.push_back(u);
                }
            }
        }

        reached == n
    }

    /// Every edge once as `(min, max)`, sorted; parallel edges appear repeatedly
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = self
            .adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, list)| list.iter().filter(move |&&v| u < v).map(move |&v| (u, v)))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Disposable copy of the neighbor lists for destructive traversals
    pub fn working_copy(&self) -> Vec<Vec<usize>> {
        self.adjacency.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_edges() {
        let mut graph = Multigraph::new(3);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(1, 2);

        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.degree(1), 3);
        assert_eq!(graph.neighbors(2), &[1, 1]);
        assert_eq!(graph.odd_vertices(), vec![0, 1]);
        assert!(!graph.all_degrees_even());
        assert_eq!(graph.edges(), vec![(0, 1), (1, 2), (1, 2)]);
        assert!(graph.is_connected());
    }

    #[test]
    fn test_connectivity() {
        let mut graph = Multigraph::new(4);
        graph.add_edge(0, 1);
        graph.add_edge(2, 3);
        assert!(!graph.is_connected());

        graph.add_edge(1, 2);
        assert!(graph.is_connected());
        assert!(Multigraph::new(1).is_connected());
        assert!(Multigraph::default().is_connected());
    }

    #[test]
    fn test_working_copy_is_independent() {
        let mut graph = Multigraph::new(2);
        graph.add_edge(0, 1);

        let mut copy = graph.working_copy();
        copy[0].clear();

        assert_eq!(graph.neighbors(0), &[1]);
    }
}
