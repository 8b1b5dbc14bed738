//! Solution representation and output for the TSP.
//!
//! A tour is stored closed: `tour[0] == tour[tour.len() - 1]` and every city
//! appears exactly once among the first `tour.len() - 1` entries.

use crate::error::Result;
use crate::matrix::{Distance, DistanceMatrix};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Represents a solution to the TSP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Closed tour as a sequence of city indices
    pub tour: Vec<usize>,
    /// Total tour length including the closing edge
    pub length: Distance,
    /// Start vertex the Euler circuit was extracted from
    pub start: usize,
    /// Algorithm that generated this solution
    pub algorithm: String,
    /// Computation time in seconds
    pub computation_time: f64,
    /// Number of local search passes run (if applicable)
    pub iterations: Option<usize>,
}

impl Solution {
    /// Create a new empty solution
    pub fn new() -> Self {
        Solution {
            tour: Vec::new(),
            length: Distance::MAX,
            start: 0,
            algorithm: String::new(),
            computation_time: 0.0,
            iterations: None,
        }
    }

    /// Create a solution from a closed tour, computing its length
    pub fn from_tour(matrix: &DistanceMatrix, tour: Vec<usize>, algorithm: &str) -> Self {
        let length = matrix.tour_length(&tour);
        let start = tour.first().copied().unwrap_or(0);

        Solution {
            tour,
            length,
            start,
            algorithm: algorithm.to_string(),
            computation_time: 0.0,
            iterations: None,
        }
    }

    /// Recompute the length from the matrix
    pub fn validate(&mut self, matrix: &DistanceMatrix) {
        self.length = matrix.tour_length(&self.tour);
    }

    /// Number of distinct cities on the tour
    pub fn num_cities(&self) -> usize {
        self.tour.len().saturating_sub(1)
    }

    /// Cities in visiting order, without the closing repeat
    pub fn visit_order(&self) -> &[usize] {
        &self.tour[..self.num_cities()]
    }

    /// Check that the tour is closed and visits each of `num_cities` cities exactly once
    pub fn is_complete(&self, num_cities: usize) -> bool {
        if self.tour.len() != num_cities + 1 || self.tour.first() != self.tour.last() {
            return false;
        }

        let mut seen = vec![false; num_cities];
        for &city in self.visit_order() {
            if city >= num_cities || seen[city] {
                return false;
            }
            seen[city] = true;
        }
        true
    }

    /// Write the length followed by one city index per line
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writeln!(writer, "{}", self.length)?;
        for city in self.visit_order() {
            writeln!(writer, "{}", city)?;
        }
        writer.flush()
    }

    /// Write the tour file to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        self.write_to(writer)?;
        Ok(())
    }

    /// Write the solution as pretty JSON to `path`
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution ({})", self.algorithm)?;
        writeln!(f, "  Length: {}", self.length)?;
        writeln!(f, "  Start: {}", self.start)?;
        writeln!(f, "  Time: {:.4}s", self.computation_time)?;
        if let Some(iter) = self.iterations {
            writeln!(f, "  2-opt passes: {}", iter)?;
        }
        writeln!(f, "  Tour: {:?}", self.tour)
    }
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
    fn test_solution_creation() {
        let sol = Solution::new();
        assert!(sol.tour.is_empty());
        assert_eq!(sol.length, Distance::MAX);
        assert!(sol.visit_order().is_empty());
    }

    #[test]
    fn test_from_tour() {
        let sol = Solution::from_tour(&square_matrix(), vec![1, 2, 3, 0, 1], "test");
        assert_eq!(sol.length, 40);
        assert_eq!(sol.start, 1);
        assert_eq!(sol.visit_order(), &[1, 2, 3, 0]);
        assert!(sol.is_complete(4));
    }

    #[test]
    fn test_is_complete_rejects_bad_tours() {
        let matrix = square_matrix();
        assert!(!Solution::from_tour(&matrix, vec![0, 1, 2, 3], "open").is_complete(4));
        assert!(!Solution::from_tour(&matrix, vec![0, 1, 1, 3, 0], "repeat").is_complete(4));
        assert!(!Solution::from_tour(&matrix, vec![0, 1, 2, 0], "short").is_complete(4));
    }

    #[test]
    fn test_write_format() {
        let sol = Solution::from_tour(&square_matrix(), vec![0, 1, 2, 3, 0], "test");
        let mut out = Vec::new();
        sol.write_to(&mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "40\n0\n1\n2\n3\n");
    }

    #[test]
    fn test_json_export() {
        let sol = Solution::from_tour(&square_matrix(), vec![0, 3, 2, 1, 0], "test");
        let json = serde_json::to_string(&sol).unwrap();
        let back: Solution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sol);
    }
}
