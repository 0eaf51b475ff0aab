use std::fmt;

use crate::puzzle::Puzzle;

/// Admissible distance-to-goal estimate used to order the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Sum of tile Manhattan distances. Dominates `Hamming`.
    #[default]
    Manhattan,
    /// Count of misplaced tiles.
    Hamming,
}

impl Heuristic {
    pub fn evaluate(&self, puzzle: &Puzzle) -> usize {
        match self {
            Heuristic::Manhattan => puzzle.manhattan(),
            Heuristic::Hamming => puzzle.hamming(),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::Manhattan => write!(f, "manhattan"),
            Heuristic::Hamming => write!(f, "hamming"),
        }
    }
}

/// How a search avoids regenerating boards it has already seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Skip only the neighbor equal to the parent's board, so a slide is
    /// never undone immediately. Cycles of length four or more remain.
    #[default]
    Grandparent,
    /// Also keep every expanded board and never expand or push it again.
    ClosedSet,
}

/// Knobs shared by both halves of a dual search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolverConfig {
    pub heuristic: Heuristic,
    pub duplicates: DuplicatePolicy,
}

impl SolverConfig {
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }
}
