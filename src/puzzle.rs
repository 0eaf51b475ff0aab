use rand::{seq::SliceRandom, Rng};
use std::fmt;
use std::str::FromStr;

use crate::error::PuzzleError;

/// A single slide, named by the direction the tile travels into the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Every move, in the order successors are generated.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Offset applied to the blank's `(row, col)` position.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (1, 0),
            Move::Left => (0, 1),
            Move::Down => (-1, 0),
            Move::Right => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// An immutable n-by-n sliding puzzle board. Label `0` is the blank.
///
/// Every transformation (`slide`, `twin`, ...) returns a new board; nothing
/// mutates an existing one. Two boards are equal iff they have the same
/// dimension and the same tile at every position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Puzzle {
    size: usize,
    board: Vec<Vec<u32>>,
    blank_row: usize,
    blank_col: usize,
}

impl Puzzle {
    /// Builds a board from rows of tile labels.
    ///
    /// The grid must be square with dimension at least 2 and hold every label
    /// in `0..n*n` exactly once.
    pub fn new(board: Vec<Vec<u32>>) -> Result<Self, PuzzleError> {
        let size = board.len();
        if size == 0 {
            return Err(PuzzleError::invalid("board is empty"));
        }
        if size < 2 {
            return Err(PuzzleError::invalid(format!(
                "dimension must be at least 2, got {size}"
            )));
        }

        let cells = size * size;
        let mut seen = vec![false; cells];
        let mut blank = None;

        for (row, tiles) in board.iter().enumerate() {
            if tiles.len() != size {
                return Err(PuzzleError::invalid(format!(
                    "row {row} has {} tiles, expected {size}",
                    tiles.len()
                )));
            }
            for (col, &value) in tiles.iter().enumerate() {
                let idx = value as usize;
                if idx >= cells {
                    return Err(PuzzleError::invalid(format!(
                        "tile {value} at ({row}, {col}) is outside 0..{cells}"
                    )));
                }
                if seen[idx] {
                    return Err(PuzzleError::invalid(format!(
                        "tile {value} appears more than once"
                    )));
                }
                seen[idx] = true;
                if value == 0 {
                    blank = Some((row, col));
                }
            }
        }

        // n*n in-range distinct labels on n*n cells always include the blank.
        let (blank_row, blank_col) =
            blank.ok_or_else(|| PuzzleError::invalid("board has no blank tile"))?;

        Ok(Self {
            size,
            board,
            blank_row,
            blank_col,
        })
    }

    /// The solved board: `1..n*n` in row-major order, blank in the last cell.
    pub fn goal(size: usize) -> Result<Self, PuzzleError> {
        let mut board = Vec::with_capacity(size);
        let mut value = 1;

        for i in 0..size {
            let mut row = Vec::with_capacity(size);
            for j in 0..size {
                if i == size - 1 && j == size - 1 {
                    row.push(0);
                } else {
                    row.push(value);
                    value += 1;
                }
            }
            board.push(row);
        }

        Self::new(board)
    }

    /// A uniformly random arrangement. About half of these are unsolvable.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, PuzzleError> {
        let goal = Self::goal(size)?;
        let mut flattened: Vec<u32> = goal.board.iter().flatten().copied().collect();
        flattened.shuffle(rng);
        Self::new(flattened.chunks(size).map(<[u32]>::to_vec).collect())
    }

    /// A uniformly random arrangement that is guaranteed to be solvable.
    pub fn shuffled<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, PuzzleError> {
        loop {
            let puzzle = Self::random(size, rng)?;
            if puzzle.has_solvable_parity() {
                return Ok(puzzle);
            }
        }
    }

    pub fn dimension(&self) -> usize {
        self.size
    }

    /// `(row, col)` of the blank.
    pub fn blank(&self) -> (usize, usize) {
        (self.blank_row, self.blank_col)
    }

    pub fn tile(&self, row: usize, col: usize) -> Option<u32> {
        self.board.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Rows of tile labels, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.board.iter().map(Vec::as_slice)
    }

    /// Goal `(row, col)` of a non-blank label.
    pub fn goal_position(&self, value: u32) -> (usize, usize) {
        let index = value as usize - 1;
        (index / self.size, index % self.size)
    }

    /// Number of non-blank tiles out of place.
    pub fn hamming(&self) -> usize {
        let mut out_of_place = 0;
        for (i, row) in self.board.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if value != 0 && value as usize != i * self.size + j + 1 {
                    out_of_place += 1;
                }
            }
        }
        out_of_place
    }

    /// Sum of the Manhattan distances of every non-blank tile to its goal.
    pub fn manhattan(&self) -> usize {
        let mut distance = 0;
        for (i, row) in self.board.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if value != 0 {
                    let (target_row, target_col) = self.goal_position(value);
                    distance += i.abs_diff(target_row) + j.abs_diff(target_col);
                }
            }
        }
        distance
    }

    pub fn is_goal(&self) -> bool {
        self.hamming() == 0
    }

    /// The board after sliding one tile into the blank, or `None` when the
    /// move would leave the grid.
    pub fn slide(&self, movement: Move) -> Option<Self> {
        let (dx, dy) = movement.as_offset();

        let new_row = self.blank_row.checked_add_signed(dx)?;
        let new_col = self.blank_col.checked_add_signed(dy)?;
        if new_row >= self.size || new_col >= self.size {
            return None;
        }

        Some(self.swapped((self.blank_row, self.blank_col), (new_row, new_col)))
    }

    /// Every legal slide together with the board it produces.
    pub fn successors(&self) -> impl Iterator<Item = (Move, Self)> + '_ {
        Move::ALL
            .into_iter()
            .filter_map(move |movement| self.slide(movement).map(|next| (movement, next)))
    }

    /// Every board one slide away, in `Move::ALL` order.
    pub fn neighbors(&self) -> Vec<Self> {
        self.successors().map(|(_, next)| next).collect()
    }

    /// The slide that turns `self` into `other`, if they are one slide apart.
    pub fn move_to(&self, other: &Self) -> Option<Move> {
        if self.size != other.size {
            return None;
        }
        Move::ALL
            .into_iter()
            .find(|&movement| self.slide(movement).as_ref() == Some(other))
    }

    /// This board with the first two non-blank tiles (row-major) exchanged.
    ///
    /// Exactly one of a board and its twin is solvable.
    pub fn twin(&self) -> Result<Self, PuzzleError> {
        let mut tiles = self
            .board
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().enumerate().map(move |(j, &v)| ((i, j), v)))
            .filter(|&(_, value)| value != 0)
            .map(|(pos, _)| pos);

        match (tiles.next(), tiles.next()) {
            (Some(first), Some(second)) => Ok(self.swapped(first, second)),
            _ => Err(PuzzleError::invariant(
                "board does not contain two non-blank tiles",
            )),
        }
    }

    /// Inversion-parity solvability test.
    ///
    /// Odd dimension: solvable iff the inversion count is even. Even dimension:
    /// solvable iff inversions plus the blank's row index is odd.
    pub fn has_solvable_parity(&self) -> bool {
        let flattened: Vec<u32> = self.board.iter().flatten().copied().collect();
        let inversions = count_inversions(&flattened);

        if self.size % 2 == 1 {
            inversions % 2 == 0
        } else {
            (inversions + self.blank_row) % 2 == 1
        }
    }

    fn swapped(&self, a: (usize, usize), b: (usize, usize)) -> Self {
        let mut board = self.board.clone();
        let held = board[a.0][a.1];
        board[a.0][a.1] = board[b.0][b.1];
        board[b.0][b.1] = held;

        let (mut blank_row, mut blank_col) = (self.blank_row, self.blank_col);
        if board[a.0][a.1] == 0 {
            (blank_row, blank_col) = a;
        } else if board[b.0][b.1] == 0 {
            (blank_row, blank_col) = b;
        }

        Self {
            size: self.size,
            board,
            blank_row,
            blank_col,
        }
    }
}

fn count_inversions(flattened: &[u32]) -> usize {
    flattened
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != 0)
        .map(|(i, &val)| {
            flattened[i + 1..]
                .iter()
                .filter(|&&next| next != 0 && next < val)
                .count()
        })
        .sum()
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.size)?;
        for row in &self.board {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses `n` followed by `n*n` whitespace-separated labels in row-major order.
impl FromStr for Puzzle {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = s.split_whitespace().map(|token| {
            token
                .parse::<u32>()
                .map_err(|_| PuzzleError::invalid(format!("`{token}` is not a tile label")))
        });

        let size = values
            .next()
            .ok_or_else(|| PuzzleError::invalid("missing board dimension"))?? as usize;

        let mut board = Vec::new();
        for row in 0..size {
            let mut tiles = Vec::new();
            for col in 0..size {
                let value = values.next().ok_or_else(|| {
                    PuzzleError::invalid(format!("missing tile at ({row}, {col})"))
                })??;
                tiles.push(value);
            }
            board.push(tiles);
        }

        if values.next().is_some() {
            return Err(PuzzleError::invalid(format!(
                "more than {} tiles for a {size}x{size} board",
                size * size
            )));
        }

        Self::new(board)
    }
}
