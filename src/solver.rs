//! Dual A* solver.
//!
//! The initial board and its twin are searched side by side, one expansion
//! each per round. Exactly one of the two is solvable, so whichever search
//! surfaces a goal first decides the verdict.

use log::{debug, trace};

use crate::config::SolverConfig;
use crate::error::PuzzleError;
use crate::puzzle::{Move, Puzzle};
use crate::search::{AStar, Advance, SearchStats};

/// Lifecycle of a [`DualSearch`]. `Solved` and `Unsolvable` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Searching,
    Solved,
    Unsolvable,
}

/// The two lockstep searches behind [`Solver`], exposed so callers can drive
/// them round by round.
#[derive(Debug)]
pub struct DualSearch {
    original: AStar,
    twin: AStar,
    status: SearchStatus,
    rounds: usize,
}

impl DualSearch {
    /// Seeds both frontiers and pops their roots.
    pub fn new(initial: Puzzle, config: SolverConfig) -> Result<Self, PuzzleError> {
        let twin = initial.twin()?;
        Ok(Self {
            original: AStar::new(initial, config),
            twin: AStar::new(twin, config),
            status: SearchStatus::Searching,
            rounds: 0,
        })
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Completed expansion rounds.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn original_stats(&self) -> SearchStats {
        self.original.stats()
    }

    pub fn twin_stats(&self) -> SearchStats {
        self.twin.stats()
    }

    /// Checks both current nodes for a goal, then expands each once.
    ///
    /// Calling this on a finished search returns the terminal status and does
    /// nothing else.
    pub fn step(&mut self) -> SearchStatus {
        if self.status != SearchStatus::Searching {
            return self.status;
        }

        if self.original.current_is_goal() {
            self.status = SearchStatus::Solved;
            return self.status;
        }
        if self.twin.current_is_goal() {
            self.status = SearchStatus::Unsolvable;
            return self.status;
        }

        if self.original.advance() == Advance::Exhausted {
            debug!("original search exhausted without reaching the goal");
            self.status = SearchStatus::Unsolvable;
            return self.status;
        }
        // A twin that runs dry is unsolvable, so the original must be
        // solvable; it keeps going on its own.
        if !self.twin.is_exhausted() && self.twin.advance() == Advance::Exhausted {
            debug!("twin search exhausted; continuing with the original only");
        }

        self.rounds += 1;
        trace!(
            "round {}: original f={} twin f={}",
            self.rounds,
            self.original.current().priority(),
            self.twin.current().priority()
        );
        self.status
    }

    /// Steps until a terminal status is reached.
    pub fn run(&mut self) -> SearchStatus {
        while self.step() == SearchStatus::Searching {}
        self.status
    }

    /// Boards from the initial board to the goal, once solved.
    pub fn solution(&self) -> Option<Vec<Puzzle>> {
        (self.status == SearchStatus::Solved).then(|| self.original.path())
    }
}

/// Solves a sliding puzzle with A*, detecting unsolvable boards through a
/// twin search.
///
/// ```
/// use slider_puzzle::{Puzzle, Solver};
///
/// let initial: Puzzle = "3  0 1 3  4 2 5  7 8 6".parse().unwrap();
/// let solver = Solver::new(initial).unwrap();
/// assert!(solver.is_solvable());
/// assert_eq!(solver.moves(), Some(4));
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    solution: Option<Vec<Puzzle>>,
    rounds: usize,
    stats: SearchStats,
    twin_stats: SearchStats,
}

impl Solver {
    /// Solves `initial` with the default configuration.
    pub fn new(initial: Puzzle) -> Result<Self, PuzzleError> {
        Self::with_config(initial, SolverConfig::default())
    }

    pub fn with_config(initial: Puzzle, config: SolverConfig) -> Result<Self, PuzzleError> {
        let size = initial.dimension();
        debug!(
            "solving {size}x{size} board with {} heuristic, {:?} duplicate check",
            config.heuristic, config.duplicates
        );

        let mut search = DualSearch::new(initial, config)?;
        let status = search.run();
        let solution = search.solution();

        debug!(
            "{:?} after {} rounds ({} + {} nodes generated)",
            status,
            search.rounds(),
            search.original_stats().generated,
            search.twin_stats().generated
        );

        Ok(Self {
            solution,
            rounds: search.rounds(),
            stats: search.original_stats(),
            twin_stats: search.twin_stats(),
        })
    }

    pub fn is_solvable(&self) -> bool {
        self.solution.is_some()
    }

    /// Minimum number of slides, or `None` when the board is unsolvable.
    pub fn moves(&self) -> Option<usize> {
        self.solution.as_ref().map(|path| path.len() - 1)
    }

    /// Boards of a shortest solution from the initial board to the goal, or
    /// `None` when the board is unsolvable.
    pub fn solution(&self) -> Option<&[Puzzle]> {
        self.solution.as_deref()
    }

    /// The slides between consecutive boards of the solution.
    pub fn moves_sequence(&self) -> Option<Vec<Move>> {
        self.solution.as_ref().and_then(|path| {
            path.windows(2)
                .map(|pair| pair[0].move_to(&pair[1]))
                .collect()
        })
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Counters of the search over the initial board.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Counters of the search over the twin board.
    pub fn twin_stats(&self) -> SearchStats {
        self.twin_stats
    }
}
