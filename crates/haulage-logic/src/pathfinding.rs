//! Generic best-first (A*) path search over an arbitrary state space.
//!
//! `AStar` is built from plain closures: a transition function, an edge
//! weight, a heuristic and an optional goal test. It holds no graph of its
//! own, so the same search can run against the tile grid or any other
//! state space. [`tile_route`] wires it to the board's neighbor rule.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

use crate::grid::{Board, TileIndex, NO_TILE};

type Transitions<'a, S> = Box<dyn Fn(S) -> Vec<S> + 'a>;
type Cost<'a, S> = Box<dyn Fn(S, S) -> f64 + 'a>;
type GoalTest<'a, S> = Box<dyn Fn(S, S) -> bool + 'a>;

/// One frontier entry. Ordered so that `BinaryHeap` pops the lowest
/// estimated total cost first, and among equal costs the earliest pushed.
struct Frontier<S> {
    estimate: f64,
    seq: u64,
    state: S,
}

impl<S> PartialEq for Frontier<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S> Eq for Frontier<S> {}

impl<S> PartialOrd for Frontier<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for Frontier<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A* search over states of type `S`.
///
/// Edge weights must be non-negative. A zero heuristic turns the search into
/// uniform-cost search.
pub struct AStar<'a, S> {
    invalid: S,
    transitions: Transitions<'a, S>,
    edge_weight: Cost<'a, S>,
    heuristic: Cost<'a, S>,
    is_goal: GoalTest<'a, S>,
}

impl<'a, S> AStar<'a, S>
where
    S: Copy + Eq + Hash + 'a,
{
    /// Build a search. `invalid` is a sentinel state that is never entered;
    /// transitions yielding it are ignored.
    pub fn new(
        invalid: S,
        transitions: impl Fn(S) -> Vec<S> + 'a,
        edge_weight: impl Fn(S, S) -> f64 + 'a,
        heuristic: impl Fn(S, S) -> f64 + 'a,
    ) -> Self {
        Self {
            invalid,
            transitions: Box::new(transitions),
            edge_weight: Box::new(edge_weight),
            heuristic: Box::new(heuristic),
            is_goal: Box::new(|state, goal| state == goal),
        }
    }

    /// Replace the default equality goal test.
    pub fn with_goal_test(mut self, is_goal: impl Fn(S, S) -> bool + 'a) -> Self {
        self.is_goal = Box::new(is_goal);
        self
    }

    /// Find a lowest-cost path from `start` to a state satisfying the goal
    /// test. The path includes both endpoints. Returns an empty vec when the
    /// goal cannot be reached.
    pub fn find_path(&self, start: S, goal: S) -> Vec<S> {
        if start == self.invalid || goal == self.invalid {
            return Vec::new();
        }

        let mut open = BinaryHeap::new();
        let mut came_from: HashMap<S, S> = HashMap::new();
        let mut g_score: HashMap<S, f64> = HashMap::new();
        let mut f_score: HashMap<S, f64> = HashMap::new();
        let mut seq = 0u64;

        let start_estimate = (self.heuristic)(start, goal);
        g_score.insert(start, 0.0);
        f_score.insert(start, start_estimate);
        open.push(Frontier {
            estimate: start_estimate,
            seq,
            state: start,
        });

        while let Some(Frontier {
            estimate,
            state: current,
            ..
        }) = open.pop()
        {
            // Superseded by a cheaper entry pushed later.
            if f_score.get(&current).is_some_and(|&best| estimate > best) {
                continue;
            }

            if (self.is_goal)(current, goal) {
                return reconstruct_path(current, &came_from);
            }

            let current_g = g_score.get(&current).copied().unwrap_or(f64::INFINITY);
            for next in (self.transitions)(current) {
                if next == self.invalid {
                    continue;
                }
                let tentative = current_g + (self.edge_weight)(current, next);
                let known = g_score.get(&next).copied().unwrap_or(f64::INFINITY);
                if tentative < known {
                    let next_estimate = tentative + (self.heuristic)(next, goal);
                    came_from.insert(next, current);
                    g_score.insert(next, tentative);
                    f_score.insert(next, next_estimate);
                    seq += 1;
                    open.push(Frontier {
                        estimate: next_estimate,
                        seq,
                        state: next,
                    });
                }
            }
        }

        Vec::new()
    }
}

fn reconstruct_path<S: Copy + Eq + Hash>(end: S, came_from: &HashMap<S, S>) -> Vec<S> {
    let mut path = vec![end];
    let mut node = end;
    while let Some(&prev) = came_from.get(&node) {
        path.push(prev);
        node = prev;
    }
    path.reverse();
    path
}

/// Shortest tile route on `board` using its neighbor rule, unit edge weight
/// and unit heuristic. Empty when `to` is unreachable from `from`.
pub fn tile_route(board: &Board, from: TileIndex, to: TileIndex) -> Vec<TileIndex> {
    if !board.contains(from) || !board.contains(to) {
        return Vec::new();
    }
    AStar::new(
        NO_TILE,
        |tile| board.neighbors(tile),
        |_, _| 1.0,
        |_, _| 1.0,
    )
    .find_path(from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_search<'a>() -> AStar<'a, i32> {
        // 0 - 1 - 2 - ... - 9, state 5 is a wall
        AStar::new(
            -1,
            |s: i32| {
                [s - 1, s + 1]
                    .into_iter()
                    .filter(|n| (0..10).contains(n) && *n != 5)
                    .collect()
            },
            |_, _| 1.0,
            |a: i32, b: i32| (a - b).abs() as f64,
        )
    }

    #[test]
    fn test_same_state() {
        let search = line_search();
        assert_eq!(search.find_path(3, 3), vec![3]);
    }

    #[test]
    fn test_straight_line() {
        let search = line_search();
        assert_eq!(search.find_path(0, 4), vec![0, 1, 2, 3, 4]);
        assert_eq!(search.find_path(4, 1), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_unreachable() {
        let search = line_search();
        assert!(search.find_path(0, 8).is_empty());
    }

    #[test]
    fn test_invalid_endpoints() {
        let search = line_search();
        assert!(search.find_path(-1, 3).is_empty());
        assert!(search.find_path(3, -1).is_empty());
    }

    #[test]
    fn test_invalid_transitions_skipped() {
        // Transition function leaks the sentinel; it must never appear in a path.
        let search = AStar::new(
            -1,
            |s: i32| if s < 3 { vec![-1, s + 1] } else { vec![-1] },
            |_, _| 1.0,
            |_, _| 0.0,
        );
        assert_eq!(search.find_path(0, 3), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_weighted_detour() {
        // 0 -> 1 -> 3 costs 10 + 10, 0 -> 2 -> 3 costs 1 + 1
        let search = AStar::new(
            -1,
            |s: i32| match s {
                0 => vec![1, 2],
                1 | 2 => vec![3],
                _ => vec![],
            },
            |a: i32, b: i32| if a == 1 || b == 1 { 10.0 } else { 1.0 },
            |_, _| 0.0,
        );
        assert_eq!(search.find_path(0, 3), vec![0, 2, 3]);
    }

    #[test]
    fn test_custom_goal_test() {
        let search = line_search().with_goal_test(|s, goal| s >= goal);
        // Stops at the first state at or beyond 3
        assert_eq!(search.find_path(0, 3), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_tile_route_diagonal() {
        let board = Board::new(4, 4);
        // Only south-east steps gain y, so (0,0) -> (3,3) is three of them
        assert_eq!(tile_route(&board, 0, 15), vec![0, 5, 10, 15]);
        assert_eq!(tile_route(&board, 15, 0), vec![15, 10, 5, 0]);
    }

    #[test]
    fn test_tile_route_off_board() {
        let board = Board::new(4, 4);
        assert!(tile_route(&board, 0, 16).is_empty());
        assert!(tile_route(&board, NO_TILE, 3).is_empty());
    }
}
