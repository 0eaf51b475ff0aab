//! Single best-first (A*) search over puzzle boards.
//!
//! Nodes live in an arena and refer to their parent by index, so the
//! ancestry chain needed for path reconstruction is just a walk over
//! `parent` ids. The frontier orders ids by `(f, h, node_id)` where
//! `f = g + h`; `node_id` is the creation order, which makes every tie
//! deterministic.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use log::trace;

use crate::config::{DuplicatePolicy, Heuristic, SolverConfig};
use crate::puzzle::Puzzle;

/// Index of a node in its search's arena.
pub type NodeId = usize;

/// A board reached after `moves` slides, with its heuristic cached.
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub puzzle: Puzzle,
    /// Slides from the root (`g`).
    pub moves: usize,
    /// The node this one was generated from; `None` only for the root.
    pub parent: Option<NodeId>,
    /// Heuristic value (`h`), computed once at creation.
    pub estimate: usize,
}

impl SearchNode {
    /// `f = g + h`.
    pub fn priority(&self) -> usize {
        self.moves + self.estimate
    }
}

/// Frontier ordering key. Lower sorts first: smallest `f`, then smallest
/// `h`, then oldest node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierKey {
    pub priority: usize,
    pub estimate: usize,
    pub node_id: NodeId,
}

impl FrontierKey {
    fn new(node_id: NodeId, node: &SearchNode) -> Self {
        Self {
            priority: node.priority(),
            estimate: node.estimate,
            node_id,
        }
    }
}

/// Min-priority queue of node ids.
///
/// `BinaryHeap` is a max-heap, so keys are wrapped in `Reverse`.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<FrontierKey>>,
    high_water: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: FrontierKey) {
        self.heap.push(Reverse(key));
        self.high_water = self.high_water.max(self.heap.len());
    }

    pub fn pop(&mut self) -> Option<FrontierKey> {
        self.heap.pop().map(|Reverse(key)| key)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest size the frontier has reached.
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

/// Counters for one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Nodes whose neighbors were generated.
    pub expanded: usize,
    /// Nodes created, including the root.
    pub generated: usize,
    /// Popped nodes dropped because their board was already expanded.
    pub discarded: usize,
    pub frontier_high_water: usize,
}

/// Outcome of advancing a search by one expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// A new minimum-priority node is current.
    Popped,
    /// Nothing is left to pop. Only possible with a closed set, once every
    /// board reachable from the root has been expanded.
    Exhausted,
}

/// One A* search seeded with a single board.
///
/// Construction pushes the root and pops it, so a fresh search always has a
/// current node. Each call to [`AStar::advance`] expands the current node
/// and pops the next one.
#[derive(Debug)]
pub struct AStar {
    nodes: Vec<SearchNode>,
    frontier: Frontier,
    closed: Option<HashSet<Puzzle>>,
    heuristic: Heuristic,
    current: NodeId,
    exhausted: bool,
    stats: SearchStats,
}

impl AStar {
    pub fn new(root: Puzzle, config: SolverConfig) -> Self {
        let closed = match config.duplicates {
            DuplicatePolicy::Grandparent => None,
            DuplicatePolicy::ClosedSet => Some(HashSet::new()),
        };
        let mut search = Self {
            nodes: Vec::new(),
            frontier: Frontier::new(),
            closed,
            heuristic: config.heuristic,
            current: 0,
            exhausted: false,
            stats: SearchStats::default(),
        };
        search.insert(root, 0, None);
        // The root is the only entry and cannot be closed yet.
        if let Some(id) = search.pop_open() {
            search.current = id;
        }
        search
    }

    /// The most recently popped node.
    pub fn current(&self) -> &SearchNode {
        &self.nodes[self.current]
    }

    pub fn current_is_goal(&self) -> bool {
        !self.exhausted && self.current().puzzle.is_goal()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            frontier_high_water: self.frontier.high_water(),
            ..self.stats
        }
    }

    /// Expands the current node and pops the next minimum.
    pub fn advance(&mut self) -> Advance {
        if self.exhausted {
            return Advance::Exhausted;
        }

        let id = self.current;
        let children: Vec<Puzzle> = {
            let node = &self.nodes[id];
            let grandparent = node.parent.map(|parent| &self.nodes[parent].puzzle);
            node.puzzle
                .neighbors()
                .into_iter()
                .filter(|next| Some(next) != grandparent)
                .filter(|next| self.closed.as_ref().map_or(true, |closed| !closed.contains(next)))
                .collect()
        };

        if let Some(closed) = self.closed.as_mut() {
            closed.insert(self.nodes[id].puzzle.clone());
        }

        let moves = self.nodes[id].moves + 1;
        for child in children {
            self.insert(child, moves, Some(id));
        }
        self.stats.expanded += 1;

        match self.pop_open() {
            Some(next) => {
                self.current = next;
                trace!(
                    "popped node {next}: g={} h={} frontier={}",
                    self.nodes[next].moves,
                    self.nodes[next].estimate,
                    self.frontier.len()
                );
                Advance::Popped
            }
            None => {
                self.exhausted = true;
                Advance::Exhausted
            }
        }
    }

    /// Boards from the root to the current node.
    pub fn path(&self) -> Vec<Puzzle> {
        let mut path = Vec::with_capacity(self.current().moves + 1);
        let mut cursor = Some(self.current);
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            path.push(node.puzzle.clone());
            cursor = node.parent;
        }
        path.reverse();
        path
    }

    fn insert(&mut self, puzzle: Puzzle, moves: usize, parent: Option<NodeId>) {
        let estimate = self.heuristic.evaluate(&puzzle);
        let node = SearchNode {
            puzzle,
            moves,
            parent,
            estimate,
        };
        let id = self.nodes.len();
        self.frontier.push(FrontierKey::new(id, &node));
        self.nodes.push(node);
        self.stats.generated += 1;
    }

    fn pop_open(&mut self) -> Option<NodeId> {
        while let Some(key) = self.frontier.pop() {
            let already_closed = self
                .closed
                .as_ref()
                .is_some_and(|closed| closed.contains(&self.nodes[key.node_id].puzzle));
            if already_closed {
                self.stats.discarded += 1;
                continue;
            }
            return Some(key.node_id);
        }
        None
    }
}
