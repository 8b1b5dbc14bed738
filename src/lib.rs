//! Christofides TSP Solver Library
//!
//! Approximate tours for the symmetric Euclidean Traveling Salesman Problem.
//!
//! # Features
//!
//! - Parallel distance matrix construction
//! - Prim minimum spanning tree and greedy odd-vertex matching
//! - Hierholzer Euler circuit with Hamiltonian shortcutting
//! - Bounded 2-opt local search
//! - Deterministic multi-start evaluation on a worker pool
//! - Benchmarking and visualization tools
//!
//! # Example
//!
//! ```no_run
//! use christofides_tsp::instance::TspInstance;
//! use christofides_tsp::solver::{ChristofidesSolver, SolverConfig};
//!
//! // Load instance
//! let instance = TspInstance::from_file("cities.txt").unwrap();
//!
//! // Solve with default settings
//! let solver = ChristofidesSolver::new(SolverConfig::default());
//! let solution = solver.solve(&instance).unwrap();
//!
//! println!("Tour length: {}", solution.length);
//! solution.save("cities.tour").unwrap();
//! ```

pub mod error;
pub mod instance;
pub mod matrix;
pub mod graph;
pub mod solution;
pub mod heuristics;
pub mod solver;
pub mod benchmark;
pub mod visualization;

pub use error::{Error, Result};
pub use instance::{City, TspInstance};
pub use matrix::{Distance, DistanceMatrix};
pub use solution::Solution;
pub use solver::{ChristofidesSolver, SolverConfig};
