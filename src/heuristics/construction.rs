//! Tour construction: MST, parity repair, Euler circuit, shortcut, 2-opt.
//!
//! A [`TourGenerator`] performs the graph-building steps once and then
//! freezes the matched multigraph. Tours are extracted from it for any number
//! of start vertices, concurrently, through shared references only.

use crate::error::{Error, Result};
use crate::graph::Multigraph;
use crate::heuristics::euler::euler_circuit;
use crate::heuristics::local_search::{LocalSearch, TwoOptSearch};
use crate::heuristics::matching::greedy_odd_matching;
use crate::heuristics::shortcut::shortcut;
use crate::heuristics::spanning_tree::prim;
use crate::matrix::{Distance, DistanceMatrix};
use crate::solution::Solution;
use rayon::prelude::*;

pub trait ConstructionHeuristic {
    /// Build a complete tour beginning at `start`
    fn construct(&self, start: usize) -> Solution;
    /// Number of cities a start vertex may refer to
    fn num_cities(&self) -> usize;
    fn name(&self) -> &str;
}

/// Christofides-style tour generator over a fixed distance matrix
pub struct TourGenerator<'m> {
    matrix: &'m DistanceMatrix,
    graph: Multigraph,
    tree_weight: Distance,
    matched_pairs: usize,
    local_search: TwoOptSearch,
}

impl<'m> TourGenerator<'m> {
    /// Build the spanning tree and match its odd vertices.
    ///
    /// This is the only place the multigraph is mutated.
    pub fn new(matrix: &'m DistanceMatrix, local_search: TwoOptSearch) -> Self {
        let tree = prim(matrix);
        let tree_weight = tree.total_weight;
        let mut graph = tree.graph;
        let matched_pairs = greedy_odd_matching(&mut graph, matrix).len();

        log::info!(
            "generator: n={} tree_weight={} matched_pairs={} edges={}",
            matrix.size(),
            tree_weight,
            matched_pairs,
            graph.edge_count()
        );

        TourGenerator {
            matrix,
            graph,
            tree_weight,
            matched_pairs,
            local_search,
        }
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        self.matrix
    }

    /// The frozen, even-degree multigraph
    pub fn graph(&self) -> &Multigraph {
        &self.graph
    }

    pub fn tree_weight(&self) -> Distance {
        self.tree_weight
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// Run the full pipeline from `start`
    ///
    /// # Panics
    ///
    /// Panics if `start` is not a city index; [`TourGenerator::best_of`] checks this.
    pub fn evaluate(&self, start: usize) -> Solution {
        let circuit = euler_circuit(&self.graph, start);
        let (tour, length) = shortcut(&circuit, self.matrix);

        let mut solution = Solution {
            tour,
            length,
            start,
            algorithm: self.name().to_string(),
            ..Solution::new()
        };
        let shortcut_length = solution.length;
        self.local_search.improve(self.matrix, &mut solution);

        log::debug!(
            "generator.evaluate: start={} shortcut={} optimized={}",
            start,
            shortcut_length,
            solution.length
        );
        solution
    }

    /// Worker task evaluating a single start vertex
    pub fn task(&self, start: usize) -> StartTask<'_, Self> {
        StartTask::new(self, start)
    }

    /// Evaluate every start in `starts` on `workers` threads and keep the shortest tour
    pub fn best_of(&self, starts: &[usize], workers: usize) -> Result<Solution> {
        best_of_starts(self, starts, workers)
    }
}

impl ConstructionHeuristic for TourGenerator<'_> {
    fn construct(&self, start: usize) -> Solution {
        self.evaluate(start)
    }

    fn num_cities(&self) -> usize {
        self.matrix.size()
    }

    fn name(&self) -> &str {
        "Christofides+2-Opt"
    }
}

/// A unit of work handed to the worker pool: one heuristic, one start vertex.
pub struct StartTask<'g, H: ?Sized> {
    heuristic: &'g H,
    start: usize,
}

impl<'g, H: ConstructionHeuristic + ?Sized> StartTask<'g, H> {
    pub fn new(heuristic: &'g H, start: usize) -> Self {
        StartTask { heuristic, start }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn run(&self) -> Solution {
        self.heuristic.construct(self.start)
    }
}

/// Evaluate `starts` in parallel and return the shortest tour.
///
/// Ties go to the lowest start vertex so the result does not depend on
/// scheduling.
pub fn best_of_starts<H>(heuristic: &H, starts: &[usize], workers: usize) -> Result<Solution>
where
    H: ConstructionHeuristic + Sync + ?Sized,
{
    if starts.is_empty() {
        return Err(Error::configuration("no start vertices to evaluate"));
    }
    let num_cities = heuristic.num_cities();
    if let Some(&bad) = starts.iter().find(|&&s| s >= num_cities) {
        return Err(Error::configuration(format!(
            "start vertex {} out of range for {} cities",
            bad, num_cities
        )));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.clamp(1, starts.len()))
        .build()
        .map_err(|e| Error::resource(format!("start evaluation pool: {e}")))?;

    let results: Vec<Solution> = pool.install(|| {
        starts
            .par_iter()
            .map(|&start| StartTask::new(heuristic, start).run())
            .collect()
    });

    let evaluated = results.len();
    let best = results
        .into_iter()
        .min_by_key(|s| (s.length, s.start))
        .ok_or_else(|| Error::configuration("no start vertices to evaluate"))?;

    log::info!(
        "generator: evaluated={} best_start={} best_length={}",
        evaluated,
        best.start,
        best.length
    );
    Ok(best)
}

/// Start vertices to evaluate: all of them, or `count` evenly spaced ones.
pub fn candidate_starts(num_cities: usize, count: Option<usize>) -> Vec<usize> {
    match count {
        Some(count) if count > 0 && count < num_cities => {
            (0..count).map(|k| k * num_cities / count).collect()
        }
        _ => (0..num_cities).collect(),
    }
}
