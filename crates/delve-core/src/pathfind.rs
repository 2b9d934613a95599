//! A* search over a grid-shaped domain
//!
//! The search knows nothing about tiles. Whether a step is legal, and what
//! it costs, is decided by an injected [`MovementCost`]; the hallway carver
//! plugs in its own cost model, tests use closures.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{trace, warn};

use crate::consts::{MAX_SEARCH_STEPS, MOVE_DIAGONAL_COST, MOVE_STRAIGHT_COST};
use crate::dungeon::{Direction, Point};

/// Edge cost of a single step
///
/// `prev` is the cell the search arrived at `from` through, if any, so costs
/// may depend on the direction of travel. Returning `None` makes the step
/// illegal for this relaxation.
pub trait MovementCost {
    fn cost(&self, from: Point, to: Point, prev: Option<Point>) -> Option<u32>;
}

impl<F> MovementCost for F
where
    F: Fn(Point, Point, Option<Point>) -> Option<u32>,
{
    fn cost(&self, from: Point, to: Point, prev: Option<Point>) -> Option<u32> {
        self(from, to, prev)
    }
}

/// Uniform terrain: every step is legal, diagonals cost more than straight
/// moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepCost;

impl MovementCost for StepCost {
    fn cost(&self, from: Point, to: Point, _prev: Option<Point>) -> Option<u32> {
        if from.is_diagonal_to(to) {
            Some(MOVE_DIAGONAL_COST)
        } else {
            Some(MOVE_STRAIGHT_COST)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum NodeState {
    #[default]
    Unvisited,
    Open,
    Closed,
}

/// Per-cell search bookkeeping
#[derive(Debug, Clone, Copy, Default)]
struct Node {
    prev: Option<Point>,
    movement: u32,
    state: NodeState,
}

/// Entry in the open queue
///
/// Lowest total cost first. Equal totals pop the most recently pushed entry,
/// which keeps the search deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    total: u32,
    seq: u64,
    pos: Point,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .total
            .cmp(&self.total)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reusable A* search over a `width` x `height` domain
///
/// Scratch state is kept between calls to avoid reallocating and is reset at
/// the start of every [`find_path`](Self::find_path). A single instance must
/// not be shared between concurrent searches.
#[derive(Debug)]
pub struct PathFinder<C> {
    width: i32,
    height: i32,
    cost: C,
    diagonals: bool,
    max_steps: usize,
    nodes: Vec<Node>,
    open: BinaryHeap<OpenEntry>,
    seq: u64,
    last_steps: usize,
}

impl<C: MovementCost> PathFinder<C> {
    /// Create a 4-directional search with the default step ceiling
    pub fn new(width: i32, height: i32, cost: C) -> Self {
        assert!(
            width > 0 && height > 0,
            "search domain must have positive dimensions, got {width}x{height}"
        );
        Self {
            width,
            height,
            cost,
            diagonals: false,
            max_steps: MAX_SEARCH_STEPS,
            nodes: vec![Node::default(); (width * height) as usize],
            open: BinaryHeap::new(),
            seq: 0,
            last_steps: 0,
        }
    }

    /// Also consider the four diagonal neighbors
    pub fn with_diagonals(mut self, diagonals: bool) -> Self {
        self.diagonals = diagonals;
        self
    }

    /// Give up after expanding this many nodes
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Number of nodes expanded by the most recent search
    pub fn last_steps(&self) -> usize {
        self.last_steps
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Octile distance, admissible as long as a diagonal step costs no less
    /// than a straight one
    pub fn estimate(from: Point, to: Point) -> u32 {
        let dx = (from.x - to.x).unsigned_abs();
        let dy = (from.y - to.y).unsigned_abs();
        let diagonal = dx.min(dy);
        let straight = dx.max(dy) - diagonal;
        MOVE_DIAGONAL_COST * diagonal + MOVE_STRAIGHT_COST * straight
    }

    fn index(&self, p: Point) -> usize {
        (p.y * self.width + p.x) as usize
    }

    fn reset(&mut self) {
        self.nodes.fill(Node::default());
        self.open.clear();
        self.seq = 0;
        self.last_steps = 0;
    }

    fn push_open(&mut self, pos: Point, movement: u32, dest: Point) {
        let total = movement.saturating_add(Self::estimate(pos, dest));
        self.open.push(OpenEntry {
            total,
            seq: self.seq,
            pos,
        });
        self.seq += 1;
    }

    /// Find the cheapest path from `start` to `dest`
    ///
    /// Returns every cell of the path including both ends, or an empty
    /// vector if `dest` cannot be reached within the step ceiling.
    pub fn find_path(&mut self, start: Point, dest: Point) -> Vec<Point> {
        self.reset();

        if !self.in_bounds(start) || !self.in_bounds(dest) {
            trace!(%start, %dest, "path endpoint out of bounds");
            return Vec::new();
        }

        let idx = self.index(start);
        self.nodes[idx] = Node {
            prev: None,
            movement: 0,
            state: NodeState::Open,
        };
        self.push_open(start, 0, dest);

        while let Some(entry) = self.open.pop() {
            let current = entry.pos;
            let cur_idx = self.index(current);

            // Stale entry left behind by a decrease-key
            if self.nodes[cur_idx].state == NodeState::Closed {
                continue;
            }

            if self.last_steps >= self.max_steps {
                warn!(
                    %start,
                    %dest,
                    max_steps = self.max_steps,
                    "pathfinder step ceiling reached"
                );
                return Vec::new();
            }
            self.last_steps += 1;

            self.nodes[cur_idx].state = NodeState::Closed;
            if current == dest {
                let path = self.reconstruct(dest);
                trace!(%start, %dest, steps = self.last_steps, len = path.len(), "path found");
                return path;
            }

            self.expand(current, dest);
        }

        trace!(%start, %dest, steps = self.last_steps, "no path");
        Vec::new()
    }

    fn expand(&mut self, current: Point, dest: Point) {
        let Node { prev, movement, .. } = self.nodes[self.index(current)];

        let diagonals: &[Direction] = if self.diagonals {
            &Direction::DIAGONAL
        } else {
            &[]
        };

        for dir in Direction::CARDINAL.iter().chain(diagonals) {
            let next = current + dir.offset();
            if !self.in_bounds(next) {
                continue;
            }

            let next_idx = self.index(next);
            let node = self.nodes[next_idx];
            if node.state == NodeState::Closed {
                continue;
            }

            let Some(step) = self.cost.cost(current, next, prev) else {
                continue;
            };
            let tentative = movement.saturating_add(step);

            match node.state {
                NodeState::Open if tentative >= node.movement => {}
                _ => {
                    self.nodes[next_idx] = Node {
                        prev: Some(current),
                        movement: tentative,
                        state: NodeState::Open,
                    };
                    self.push_open(next, tentative, dest);
                }
            }
        }
    }

    fn reconstruct(&self, dest: Point) -> Vec<Point> {
        let mut path = vec![dest];
        let mut cursor = self.nodes[self.index(dest)].prev;
        while let Some(p) = cursor {
            path.push(p);
            cursor = self.nodes[self.index(p)].prev;
        }
        path.reverse();
        path
    }
}
