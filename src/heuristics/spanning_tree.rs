//! Prim's minimum spanning tree over the complete distance graph.

use crate::graph::Multigraph;
use crate::matrix::{Distance, DistanceMatrix};

/// Result of Prim's algorithm rooted at vertex 0
#[derive(Debug, Clone)]
pub struct SpanningTree {
    /// Tree edges as undirected neighbor lists
    pub graph: Multigraph,
    /// Parent of each vertex; `None` for the root
    pub parent: Vec<Option<usize>>,
    /// Sum of the tree edge weights
    pub total_weight: Distance,
}

/// Index of the cheapest vertex not yet in the tree, lowest index on ties
fn nearest_outside(key: &[Distance], in_tree: &[bool]) -> Option<usize> {
    (0..key.len())
        .filter(|&v| !in_tree[v])
        .min_by_key(|&v| (key[v], v))
}

/// Build a minimum spanning tree with Prim's algorithm from root 0.
pub fn prim(matrix: &DistanceMatrix) -> SpanningTree {
    let n = matrix.size();
    let mut key = vec![Distance::MAX; n];
    let mut in_tree = vec![false; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];

    if n > 0 {
        key[0] = 0;
    }

    for _ in 0..n.saturating_sub(1) {
        let Some(v) = nearest_outside(&key, &in_tree) else {
            break;
        };
        in_tree[v] = true;

        let row = matrix.row(v);
        for u in 0..n {
            if !in_tree[u] && row[u] < key[u] {
                parent[u] = Some(v);
                key[u] = row[u];
            }
        }
    }

    let mut graph = Multigraph::new(n);
    let mut total_weight = 0;
    for (child, p) in parent.iter().enumerate() {
        if let Some(p) = *p {
            graph.add_edge(child, p);
            total_weight += matrix.get(child, p);
        }
    }

    debug_assert_eq!(graph.edge_count(), n.saturating_sub(1));
    debug_assert!(graph.is_connected());

    SpanningTree {
        graph,
        parent,
        total_weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{City, TspInstance};

    fn square_matrix() -> DistanceMatrix {
        let cities = vec![City::new(0, 0), City::new(0, 10), City::new(10, 10), City::new(10, 0)];
        DistanceMatrix::build(&cities, 1).unwrap()
    }

    #[test]
    fn test_square_tree_is_a_path() {
        let tree = prim(&square_matrix());

        assert_eq!(tree.total_weight, 30);
        assert_eq!(tree.graph.edges(), vec![(0, 1), (0, 3), (1, 2)]);
        assert_eq!(tree.parent, vec![None, Some(0), Some(1), Some(0)]);
        // path 3 - 0 - 1 - 2
        assert_eq!(tree.graph.odd_vertices(), vec![2, 3]);
    }

    #[test]
    fn test_tree_invariants_on_random_instances() {
        for seed in 0..10 {
            let instance = TspInstance::random(30, 200, seed);
            let matrix = DistanceMatrix::build(&instance.cities, 4).unwrap();
            let tree = prim(&matrix);

            // V - 1 edges and connected implies acyclic
            assert_eq!(tree.graph.edge_count(), 29);
            assert!(tree.graph.is_connected());
            assert_eq!(tree.parent.iter().filter(|p| p.is_none()).count(), 1);
        }
    }

    #[test]
    fn test_duplicate_cities_join_with_zero_edges() {
        let cities = vec![City::new(5, 5), City::new(5, 5), City::new(9, 5)];
        let matrix = DistanceMatrix::build(&cities, 1).unwrap();
        let tree = prim(&matrix);

        assert_eq!(tree.total_weight, 4);
        assert_eq!(tree.graph.edges(), vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn test_degenerate_sizes() {
        let one = prim(&DistanceMatrix::new(1));
        assert_eq!(one.graph.edge_count(), 0);
        assert_eq!(one.total_weight, 0);

        let empty = prim(&DistanceMatrix::new(0));
        assert_eq!(empty.graph.vertex_count(), 0);
    }
}
