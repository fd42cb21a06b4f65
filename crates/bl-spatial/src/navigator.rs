//! Navigation trait and the default goal-seeded Dijkstra implementation.
//!
//! # Why search from the goal
//!
//! A goal is a region, not a cell.  Seeding the priority queue with every
//! free cell inside the capture zone and expanding outwards until the agent's
//! cell is settled yields, in one pass, the cheapest way from the agent into
//! *any* goal cell.  The predecessor of the agent's cell is its next step.
//!
//! # Cost model
//!
//! Moving between cells `a → b` along offset `(di, dj)` costs
//!
//! ```text
//!   (sqrt(di² + dj²) + occupancy(b)) · discipline.cost_factor(a, goal, di, dj)
//! ```
//!
//! where `a` is the cell nearer the goal.  Cells with infinite occupancy
//! (walls) are never entered.
//!
//! # Determinism
//!
//! Heap entries are ordered by `(cost, cell index, predecessor index)`, so
//! ties resolve identically on every run.  No randomness is involved.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use bl_core::{GridCell, QueueDiscipline};
use tracing::trace;

use crate::occupancy::{BLOCKAGE_THRESHOLD, OccupancyGrid};
use crate::Goal;

// ── Request / result ──────────────────────────────────────────────────────────

/// One navigation query: move the agent at `from` towards `goal`.
#[derive(Debug, Clone, Copy)]
pub struct NavRequest<'a> {
    /// Occupancy built from every agent except the one navigating.
    pub grid:       &'a OccupancyGrid,
    pub goal:       &'a Goal,
    pub from:       GridCell,
    pub discipline: QueueDiscipline,
    /// Distance within which a cell counts as aligned with the goal's row
    /// or column (the agent radius).
    pub alignment_tolerance: f64,
}

/// What the agent should do this tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum NavOutcome {
    /// Move to this neighbouring cell.
    Step(GridCell),
    /// The agent's own cell is inside the goal's capture zone; stay.
    Arrived,
    /// The best next cell is occupied by another agent; wait.
    Blocked(GridCell),
    /// No finite-cost route exists; wait.
    Unreachable,
}

impl NavOutcome {
    /// The cell to move to, if the agent moves.
    #[inline]
    pub fn next_cell(self) -> Option<GridCell> {
        match self {
            NavOutcome::Step(cell) => Some(cell),
            _ => None,
        }
    }

    /// `true` when the agent wants to progress but cannot.
    #[inline]
    pub fn is_stuck(self) -> bool {
        matches!(self, NavOutcome::Blocked(_) | NavOutcome::Unreachable)
    }
}

/// Result of a navigation query.
#[derive(Clone, Debug)]
pub struct NavPlan {
    pub outcome: NavOutcome,
    /// Cells from the agent's cell (first) to a goal cell (last).  Empty when
    /// the goal is unreachable.
    pub path:    Vec<GridCell>,
    /// Total search cost of `path`; `f64::INFINITY` when unreachable.
    pub cost:    f64,
    /// Number of cells settled by the search.
    pub settled: usize,
}

impl NavPlan {
    fn unreachable(settled: usize) -> Self {
        Self { outcome: NavOutcome::Unreachable, path: Vec::new(), cost: f64::INFINITY, settled }
    }

    /// Path length in moves.
    #[inline]
    pub fn moves(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

// ── Navigator trait ───────────────────────────────────────────────────────────

/// Pluggable navigation engine.
///
/// The scheduler calls navigation via this trait, so alternative searches
/// (e.g. a heuristic-guided variant that must settle on identical paths) can
/// be swapped in without touching the tick loop.
///
/// Implementations must be `Send + Sync` so whole simulations can be moved
/// onto sweep worker threads.
pub trait Navigator: Send + Sync {
    fn plan(&self, request: &NavRequest<'_>) -> NavPlan;
}

// ── DijkstraNavigator ─────────────────────────────────────────────────────────

/// Multi-source Dijkstra seeded from the goal's capture zone.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraNavigator;

impl Navigator for DijkstraNavigator {
    fn plan(&self, request: &NavRequest<'_>) -> NavPlan {
        dijkstra(request)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Total order on `f64` costs for use as a heap key.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// `(cost, cell, predecessor)`; a seed has no predecessor and sorts first.
type HeapEntry = Reverse<(Cost, usize, Option<usize>)>;

fn dijkstra(request: &NavRequest<'_>) -> NavPlan {
    let grid = request.grid;
    let geometry = *grid.geometry();
    let goal = request.goal;

    if request.from.row >= geometry.rows || request.from.col >= geometry.cols {
        return NavPlan::unreachable(0);
    }
    let target = geometry.index(request.from);

    let n = geometry.len();
    // prev[v] = the cell one step nearer the goal; None for seeds and unsettled cells.
    let mut prev    = vec![None; n];
    let mut settled = vec![false; n];

    let mut heap: BinaryHeap<HeapEntry> = BinaryHeap::new();
    for index in seed_cells(grid, goal) {
        heap.push(Reverse((Cost(0.0), index, None)));
    }

    let directions = request.discipline.step_directions();
    let mut settled_count = 0usize;
    let mut reached = None;

    while let Some(Reverse((Cost(cost), index, from))) = heap.pop() {
        // Closed set: the first settlement of a cell is its cheapest.
        if settled[index] {
            continue;
        }
        settled[index] = true;
        prev[index] = from;
        settled_count += 1;

        if index == target {
            reached = Some(cost);
            break;
        }

        let cell = geometry.cell(index);
        let at = geometry.point(cell);
        for &(di, dj) in directions {
            if (di, dj) == (0, 0) {
                continue;
            }
            let Some(next) = geometry.offset(cell, di, dj) else {
                continue;
            };
            let next_index = geometry.index(next);
            let occupancy = grid.cost_at(next_index);
            if settled[next_index] || !occupancy.is_finite() {
                continue;
            }
            let base = ((di * di + dj * dj) as f64).sqrt() + occupancy;
            let factor = request.discipline.cost_factor(
                at,
                goal.position,
                request.alignment_tolerance,
                (di, dj),
            );
            heap.push(Reverse((Cost(cost + base * factor), next_index, Some(index))));
        }
    }

    let Some(total) = reached else {
        trace!(from = %request.from, goal = %goal.id, settled = settled_count, "goal unreachable");
        return NavPlan::unreachable(settled_count);
    };

    let path = reconstruct(&prev, target, |i| geometry.cell(i));
    let outcome = match prev[target] {
        None => NavOutcome::Arrived,
        Some(next) => {
            let cell = geometry.cell(next);
            if grid.cost_at(next) < BLOCKAGE_THRESHOLD {
                NavOutcome::Step(cell)
            } else {
                NavOutcome::Blocked(cell)
            }
        }
    };
    trace!(
        from = %request.from,
        goal = %goal.id,
        settled = settled_count,
        cost = total,
        ?outcome,
        "path found"
    );

    NavPlan { outcome, path, cost: total, settled: settled_count }
}

/// Flat indices of every finite-cost cell strictly inside the goal's
/// capture zone, in ascending order.
fn seed_cells(grid: &OccupancyGrid, goal: &Goal) -> Vec<usize> {
    let geometry = grid.geometry();
    let g = geometry.granularity as f64;
    let r = goal.capture_radius;
    let p = goal.position;

    let row_lo = ((p.y - r) * g).floor().max(0.0);
    let row_hi = ((p.y + r) * g).ceil().min(geometry.rows as f64 - 1.0);
    let col_lo = ((p.x - r) * g).floor().max(0.0);
    let col_hi = ((p.x + r) * g).ceil().min(geometry.cols as f64 - 1.0);
    if row_hi < row_lo || col_hi < col_lo {
        return Vec::new();
    }

    let mut seeds = Vec::new();
    for row in row_lo as usize..=row_hi as usize {
        for col in col_lo as usize..=col_hi as usize {
            let cell = GridCell::new(row, col);
            let index = geometry.index(cell);
            if grid.cost_at(index).is_finite() && geometry.point(cell).chebyshev(p) < r {
                seeds.push(index);
            }
        }
    }
    seeds
}

/// Walk the predecessor chain from `start` to a seed.
fn reconstruct(
    prev:  &[Option<usize>],
    start: usize,
    cell:  impl Fn(usize) -> GridCell,
) -> Vec<GridCell> {
    let mut path = vec![cell(start)];
    let mut cur = start;
    while let Some(next) = prev[cur] {
        path.push(cell(next));
        cur = next;
    }
    path
}
