//! Local search improvement heuristics.
//!
//! Tours are improved by 2-opt moves: two non-adjacent tour edges `c-a` and
//! `d-b` are replaced by `a-b` and `c-d` by reversing the path between them.
//! The search runs a bounded number of sweeps instead of iterating to a local
//! optimum.

use crate::matrix::{Distance, DistanceMatrix};
use crate::solution::Solution;

/// Trait for local search improvement methods
pub trait LocalSearch {
    /// Improve `solution` in place; returns whether the tour changed
    fn improve(&self, matrix: &DistanceMatrix, solution: &mut Solution) -> bool;
    fn name(&self) -> &str;
}

/// Default number of sweeps over all breakpoint pairs
pub const DEFAULT_TWO_OPT_PASSES: usize = 5;

/// Bounded 2-Opt Local Search
///
/// Sweeps every pair of cyclic breakpoints and applies each improving
/// reversal immediately (first improvement). At most `max_passes` sweeps
/// are run; a sweep without any accepted move ends the search early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoOptSearch {
    /// Upper bound on full sweeps
    pub max_passes: usize,
}

impl TwoOptSearch {
    pub fn new() -> Self {
        TwoOptSearch {
            max_passes: DEFAULT_TWO_OPT_PASSES,
        }
    }

    pub fn with_passes(max_passes: usize) -> Self {
        TwoOptSearch { max_passes }
    }

    /// Reverse the cyclic segment `begin..=end` (indices taken modulo the cycle size)
    fn reverse_segment(cycle: &mut [usize], mut begin: usize, mut end: usize) {
        let n = cycle.len();
        while begin < end {
            cycle.swap(begin % n, end % n);
            begin += 1;
            end -= 1;
        }
    }

    /// One sweep over all breakpoint pairs; returns the number of accepted moves
    fn sweep(&self, matrix: &DistanceMatrix, cycle: &mut [usize], length: &mut Distance) -> usize {
        let n = cycle.len();
        let mut accepted = 0;

        for i in 0..n {
            let mut j = i + 2;
            while (j + 1) % n != i {
                let c = cycle[i];
                let a = cycle[(i + 1) % n];
                let d = cycle[j % n];
                let b = cycle[(j + 1) % n];

                let removed = matrix.get(c, a) + matrix.get(d, b);
                let added = matrix.get(a, b) + matrix.get(c, d);

                if removed > added {
                    Self::reverse_segment(cycle, i + 1, j);
                    *length -= removed - added;
                    accepted += 1;
                }
                j += 1;
            }
        }

        accepted
    }
}

impl Default for TwoOptSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalSearch for TwoOptSearch {
    fn improve(&self, matrix: &DistanceMatrix, solution: &mut Solution) -> bool {
        let n = solution.num_cities();
        // fewer than four cities leave no pair of non-adjacent edges
        if n < 4 || self.max_passes == 0 {
            return false;
        }

        let anchor = solution.tour[0];
        let mut cycle = solution.tour[..n].to_vec();
        let mut length = solution.length;
        let mut passes = 0;
        let mut total_accepted = 0;

        while passes < self.max_passes {
            let accepted = self.sweep(matrix, &mut cycle, &mut length);
            passes += 1;
            total_accepted += accepted;
            log::debug!("2-opt: pass={} accepted={} length={}", passes, accepted, length);

            if accepted == 0 {
                break;
            }
        }

        // a tour without accepted moves is left exactly as it came in
        if total_accepted == 0 {
            return false;
        }

        if let Some(pos) = cycle.iter().position(|&v| v == anchor) {
            cycle.rotate_left(pos);
        }
        cycle.push(cycle[0]);

        debug_assert_eq!(length, matrix.tour_length(&cycle));
        solution.tour = cycle;
        solution.length = length;
        solution.iterations = Some(passes);
        true
    }

    fn name(&self) -> &str {
        "2-Opt"
    }
}
