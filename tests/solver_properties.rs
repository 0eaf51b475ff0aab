use std::collections::{HashMap, VecDeque};
use std::sync::OnceLock;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use slider_puzzle::{Puzzle, Solver};

/// Breadth-first distances from the goal to every solvable board.
fn distances_from_goal(size: usize) -> HashMap<Puzzle, usize> {
    let goal = Puzzle::goal(size).unwrap();
    let mut dist = HashMap::from([(goal.clone(), 0)]);
    let mut queue = VecDeque::from([goal]);
    while let Some(board) = queue.pop_front() {
        let next_dist = dist[&board] + 1;
        for next in board.neighbors() {
            if !dist.contains_key(&next) {
                dist.insert(next.clone(), next_dist);
                queue.push_back(next);
            }
        }
    }
    dist
}

fn three_by_three() -> &'static HashMap<Puzzle, usize> {
    static DIST: OnceLock<HashMap<Puzzle, usize>> = OnceLock::new();
    DIST.get_or_init(|| distances_from_goal(3))
}

fn all_boards(size: usize) -> Vec<Puzzle> {
    fn permute(prefix: &mut Vec<u32>, rest: &mut Vec<u32>, out: &mut Vec<Vec<u32>>) {
        if rest.is_empty() {
            out.push(prefix.clone());
            return;
        }
        for i in 0..rest.len() {
            let value = rest.remove(i);
            prefix.push(value);
            permute(prefix, rest, out);
            prefix.pop();
            rest.insert(i, value);
        }
    }

    let mut flat = Vec::new();
    let mut labels: Vec<u32> = (0..(size * size) as u32).collect();
    permute(&mut Vec::new(), &mut labels, &mut flat);
    flat.into_iter()
        .map(|tiles| Puzzle::new(tiles.chunks(size).map(<[u32]>::to_vec).collect()).unwrap())
        .collect()
}

fn random_boards(size: usize, count: usize, seed: u64) -> Vec<Puzzle> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Puzzle::random(size, &mut rng).unwrap())
        .collect()
}

/// A board reached from the goal by `steps` random slides.
fn scrambled(size: usize, steps: usize, rng: &mut StdRng) -> Puzzle {
    let mut board = Puzzle::goal(size).unwrap();
    for _ in 0..steps {
        board = board.neighbors().choose(rng).cloned().unwrap();
    }
    board
}

#[test]
fn two_by_two_matches_exhaustive_search() {
    let dist = distances_from_goal(2);
    assert_eq!(dist.len(), 12);

    for board in all_boards(2) {
        let solver = Solver::new(board.clone()).unwrap();
        assert_eq!(solver.moves(), dist.get(&board).copied(), "{board}");
        assert_eq!(solver.is_solvable(), board.has_solvable_parity(), "{board}");
    }
}

#[test]
fn exactly_one_of_board_and_twin_is_solvable() {
    let dist = three_by_three();
    assert_eq!(dist.len(), 181_440);

    for board in random_boards(3, 200, 1) {
        let twin = board.twin().unwrap();
        assert_ne!(
            dist.contains_key(&board),
            dist.contains_key(&twin),
            "{board}"
        );
        assert_eq!(dist.contains_key(&board), board.has_solvable_parity(), "{board}");
    }
    for board in all_boards(2) {
        let twin = board.twin().unwrap();
        assert_ne!(board.has_solvable_parity(), twin.has_solvable_parity());
    }
}

#[test]
fn twin_differs_by_one_pair_of_tiles() {
    for board in random_boards(4, 50, 2) {
        let twin = board.twin().unwrap();
        let mut differing = Vec::new();
        for row in 0..4 {
            for col in 0..4 {
                if board.tile(row, col) != twin.tile(row, col) {
                    differing.push((row, col));
                }
            }
        }
        assert_eq!(differing.len(), 2, "{board}");
        for &(row, col) in &differing {
            assert_ne!(board.tile(row, col), Some(0));
        }
        assert_eq!(board.tile(differing[0].0, differing[0].1), twin.tile(differing[1].0, differing[1].1));
    }
}

#[test]
fn heuristics_are_ordered_and_admissible() {
    let dist = three_by_three();
    for board in random_boards(3, 300, 3) {
        assert!(board.manhattan() >= board.hamming(), "{board}");
        assert_eq!(board.manhattan() == 0, board.is_goal());
        assert_eq!(board.hamming() == 0, board.is_goal());
        if let Some(&moves) = dist.get(&board) {
            assert!(board.manhattan() <= moves, "{board}");
        }
    }
}

#[test]
fn neighbors_move_the_blank_by_one_cell() {
    for board in random_boards(4, 50, 4) {
        let (row, col) = board.blank();
        let neighbors = board.neighbors();
        let open = [row > 0, row < 3, col > 0, col < 3].iter().filter(|&&o| o).count();
        assert_eq!(neighbors.len(), open, "{board}");

        for next in &neighbors {
            assert_ne!(next, &board);
            let (next_row, next_col) = next.blank();
            assert_eq!(row.abs_diff(next_row) + col.abs_diff(next_col), 1);
            assert_eq!(next.tile(row, col), board.tile(next_row, next_col));
            assert!(next.manhattan().abs_diff(board.manhattan()) == 1);
        }
    }
}

#[test]
fn three_by_three_solutions_are_optimal() {
    let dist = three_by_three();
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..25 {
        let board = scrambled(3, 24, &mut rng);
        let solver = Solver::new(board.clone()).unwrap();
        assert_eq!(solver.moves(), dist.get(&board).copied(), "{board}");

        let path = solver.solution().unwrap();
        assert_eq!(path.first(), Some(&board));
        assert!(path.last().unwrap().is_goal());
        for pair in path.windows(2) {
            assert!(pair[0].move_to(&pair[1]).is_some());
        }
    }
}

#[test]
fn unsolvable_three_by_three_boards_are_rejected() {
    let mut rng = StdRng::seed_from_u64(6);

    for _ in 0..10 {
        let board = scrambled(3, 16, &mut rng).twin().unwrap();
        let solver = Solver::new(board.clone()).unwrap();
        assert!(!solver.is_solvable(), "{board}");
        assert_eq!(solver.moves(), None);
        assert!(solver.solution().is_none());
    }
}
