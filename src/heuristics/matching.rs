//! Greedy pairing of odd-degree vertices.
//!
//! Each round takes the first unmatched odd vertex and joins it to its
//! nearest remaining odd vertex. This is not a minimum-weight perfect
//! matching; the cost is accepted in exchange for a quadratic running time.

use crate::graph::Multigraph;
use crate::matrix::DistanceMatrix;

/// Add one edge per pair of odd-degree vertices so every degree becomes even.
///
/// Returns the pairs in the order they were matched.
pub fn greedy_odd_matching(graph: &mut Multigraph, matrix: &DistanceMatrix) -> Vec<(usize, usize)> {
    let mut odd = graph.odd_vertices();
    let mut pairs = Vec::with_capacity(odd.len() / 2);

    // Handshake lemma: the count of odd vertices is even
    debug_assert!(odd.len() % 2 == 0);

    while odd.len() >= 2 {
        let p = odd[0];
        let row = matrix.row(p);

        let mut closest = 1;
        for candidate in 2..odd.len() {
            if row[odd[candidate]] < row[odd[closest]] {
                closest = candidate;
            }
        }

        let q = odd.remove(closest);
        odd.remove(0);

        graph.add_edge(p, q);
        pairs.push((p, q));
    }

    debug_assert!(graph.all_degrees_even());
    pairs
}
