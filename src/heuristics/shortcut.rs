//! Collapse an Euler circuit into a Hamiltonian cycle by skipping repeats.

use crate::matrix::{Distance, DistanceMatrix};

/// Keep the first visit of every vertex in `circuit` and close the cycle.
///
/// Returns the closed tour (first vertex repeated at the end) and its length.
/// Skipping a repeated vertex never lengthens the walk when distances obey
/// the triangle inequality, which holds for planar Euclidean cities.
pub fn shortcut(circuit: &[usize], matrix: &DistanceMatrix) -> (Vec<usize>, Distance) {
    let Some(&first) = circuit.first() else {
        return (Vec::new(), 0);
    };

    let mut visited = vec![false; matrix.size()];
    let mut tour = Vec::with_capacity(matrix.size() + 1);
    let mut length = 0;
    let mut last_kept = first;

    visited[first] = true;
    tour.push(first);

    for &vertex in &circuit[1..] {
        if visited[vertex] {
            continue;
        }
        visited[vertex] = true;
        length += matrix.get(last_kept, vertex);
        tour.push(vertex);
        last_kept = vertex;
    }

    length += matrix.get(last_kept, first);
    tour.push(first);

    (tour, length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::City;

    fn square_matrix() -> DistanceMatrix {
        let cities = vec![City::new(0, 0), City::new(0, 10), City::new(10, 10), City::new(10, 0)];
        DistanceMatrix::build(&cities, 1).unwrap()
    }

    #[test]
    fn test_skips_repeated_vertices() {
        let matrix = square_matrix();
        // 0 -> 1 -> 0 -> 3 -> 2 -> 3 -> 0
        let (tour, length) = shortcut(&[0, 1, 0, 3, 2, 3, 0], &matrix);

        assert_eq!(tour, vec![0, 1, 3, 2, 0]);
        assert_eq!(length, 10 + 14 + 10 + 14);
        assert_eq!(length, matrix.tour_length(&tour));
    }

    #[test]
    fn test_simple_cycle_is_unchanged() {
        let matrix = square_matrix();
        let (tour, length) = shortcut(&[2, 3, 0, 1, 2], &matrix);

        assert_eq!(tour, vec![2, 3, 0, 1, 2]);
        assert_eq!(length, 40);
    }

    #[test]
    fn test_small_circuits() {
        let cities = vec![City::new(0, 0), City::new(0, 5)];
        let matrix = DistanceMatrix::build(&cities, 1).unwrap();

        assert_eq!(shortcut(&[0, 1, 0], &matrix), (vec![0, 1, 0], 10));
        assert_eq!(shortcut(&[1], &DistanceMatrix::new(2)), (vec![1, 1], 0));
        assert_eq!(shortcut(&[], &matrix), (Vec::new(), 0));
    }

    #[test]
    fn test_never_longer_than_circuit() {
        let matrix = square_matrix();
        let circuit = [0, 1, 2, 1, 0, 3, 0];
        let (tour, length) = shortcut(&circuit, &matrix);

        assert_eq!(tour, vec![0, 1, 2, 3, 0]);
        assert!(length <= matrix.tour_length(&circuit));
    }
}
