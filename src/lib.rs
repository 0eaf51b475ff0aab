//! Sliding puzzle solver.
//!
//! [`Puzzle`] is an immutable n-by-n board. [`Solver`] runs A* on it and, in
//! lockstep, on its [twin](Puzzle::twin); whichever reaches the goal first
//! decides whether the original board can be solved.

pub mod config;
pub mod error;
pub mod puzzle;
pub mod search;
pub mod solver;

pub use config::{DuplicatePolicy, Heuristic, SolverConfig};
pub use error::PuzzleError;
pub use puzzle::{Move, Puzzle};
pub use search::SearchStats;
pub use solver::{DualSearch, SearchStatus, Solver};
