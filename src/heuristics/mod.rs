//! Heuristics module for the Euclidean TSP.
//!
//! The tour pipeline in order: spanning tree, odd-vertex matching, Euler
//! circuit, shortcutting, then 2-opt improvement. `construction` ties the
//! stages together.

pub mod spanning_tree;
pub mod matching;
pub mod euler;
pub mod shortcut;
pub mod local_search;
pub mod construction;

pub use spanning_tree::*;
pub use matching::*;
pub use euler::*;
pub use shortcut::*;
pub use local_search::*;
pub use construction::*;
