//! End-to-end solver: distance matrix, tour generator, multi-start evaluation.

use crate::error::{Error, Result};
use crate::heuristics::construction::{candidate_starts, TourGenerator};
use crate::heuristics::local_search::{TwoOptSearch, DEFAULT_TWO_OPT_PASSES};
use crate::instance::TspInstance;
use crate::matrix::DistanceMatrix;
use crate::solution::Solution;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Solver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Worker threads for the distance matrix and the start evaluations
    pub workers: usize,
    /// Number of start vertices to evaluate (`None` = every vertex)
    pub starts: Option<usize>,
    /// Maximum number of 2-opt sweeps per tour
    pub two_opt_passes: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            workers: std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            starts: None,
            two_opt_passes: DEFAULT_TWO_OPT_PASSES,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::configuration("worker count must be at least 1"));
        }
        if self.starts == Some(0) {
            return Err(Error::configuration("start count must be at least 1"));
        }
        Ok(())
    }
}

pub struct ChristofidesSolver {
    pub config: SolverConfig,
}

impl ChristofidesSolver {
    pub fn new(config: SolverConfig) -> Self {
        ChristofidesSolver { config }
    }

    /// Solve `instance`; nothing is written anywhere until this returns.
    pub fn solve(&self, instance: &TspInstance) -> Result<Solution> {
        self.config.validate()?;
        if instance.cities.is_empty() {
            return Err(Error::configuration(format!("instance {} has no cities", instance.name)));
        }

        let start = Instant::now();
        log::info!(
            "solver: start instance={} n={} workers={} passes={}",
            instance.name,
            instance.dimension(),
            self.config.workers,
            self.config.two_opt_passes
        );

        let matrix = DistanceMatrix::build(&instance.cities, self.config.workers)?;
        log::info!("solver: matrix ready in {:.3}s", start.elapsed().as_secs_f64());

        let generator = TourGenerator::new(&matrix, TwoOptSearch::with_passes(self.config.two_opt_passes));
        let starts = candidate_starts(matrix.size(), self.config.starts);
        let mut solution = generator.best_of(&starts, self.config.workers)?;

        solution.computation_time = start.elapsed().as_secs_f64();
        log::info!(
            "solver: complete length={} start={} time={:.3}s",
            solution.length,
            solution.start,
            solution.computation_time
        );
        Ok(solution)
    }
}
