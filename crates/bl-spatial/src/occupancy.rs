//! Per-query occupancy cost grid.
//!
//! The grid is rebuilt from scratch for every navigation query (and for the
//! spawn check) from the positions of all *other* agents.  It doubles as a
//! soft distance field:
//!
//! | Cell                                       | Cost                                   |
//! |--------------------------------------------|----------------------------------------|
//! | within `ceil(radius · g)` cells of a wall  | `+∞`                                   |
//! | within `2 · radius` (Chebyshev) of an agent| `+= BLOCKAGE_FACTOR · (1 + (h − y)/h)` |
//! | anywhere else                              | `0`                                    |
//!
//! Blockage from overlapping agents adds up.  The `(h − y)/h` term makes
//! crowds near the top of the room (the counter) cheaper to route through
//! than crowds near the bottom, so detours prefer the back of the room.

use bl_core::{GridCell, GridGeometry, Point};

/// Base penalty for a cell inside another agent's footprint.
pub const BLOCKAGE_FACTOR: f64 = 1_000.0;

/// Cost at or above which a cell counts as occupied by another agent.
pub const BLOCKAGE_THRESHOLD: f64 = BLOCKAGE_FACTOR;

/// A dense, row-major cost grid.
#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyGrid {
    geometry: GridGeometry,
    costs:    Vec<f64>,
}

impl OccupancyGrid {
    /// Build the grid for agents of `radius` standing at `others`.
    ///
    /// Pure: identical inputs (in identical order) yield bit-identical grids.
    pub fn build<I>(geometry: GridGeometry, radius: f64, others: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut costs = vec![0.0; geometry.len()];

        let margin = geometry.border_margin(radius);
        for (index, cost) in costs.iter_mut().enumerate() {
            if geometry.is_border(geometry.cell(index), margin) {
                *cost = f64::INFINITY;
            }
        }

        let g = geometry.granularity as f64;
        let h = geometry.height();
        let reach = 2.0 * radius;

        for other in others {
            // Bounding box of the footprint, widened by a cell; the exact
            // Chebyshev test below decides membership.
            let row_lo = ((other.y - reach) * g).floor() - 1.0;
            let row_hi = ((other.y + reach) * g).ceil() + 1.0;
            let col_lo = ((other.x - reach) * g).floor() - 1.0;
            let col_hi = ((other.x + reach) * g).ceil() + 1.0;
            let Some((row_lo, row_hi)) = clamp_span(row_lo, row_hi, geometry.rows) else {
                continue;
            };
            let Some((col_lo, col_hi)) = clamp_span(col_lo, col_hi, geometry.cols) else {
                continue;
            };

            for row in row_lo..=row_hi {
                for col in col_lo..=col_hi {
                    let cell = GridCell::new(row, col);
                    let p = geometry.point(cell);
                    if other.chebyshev(p) < reach {
                        costs[geometry.index(cell)] += BLOCKAGE_FACTOR * (1.0 + (h - p.y) / h);
                    }
                }
            }
        }

        Self { geometry, costs }
    }

    #[inline]
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Raw costs, row-major.
    #[inline]
    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    #[inline]
    pub fn cost(&self, cell: GridCell) -> f64 {
        self.costs[self.geometry.index(cell)]
    }

    #[inline]
    pub fn cost_at(&self, index: usize) -> f64 {
        self.costs[index]
    }

    /// `true` if no wall and no other agent occupies `cell`.
    #[inline]
    pub fn is_free(&self, cell: GridCell) -> bool {
        self.cost(cell) < BLOCKAGE_THRESHOLD
    }

    /// The free cell furthest left, topmost among equals: the entrance
    /// agents spawn at.  `None` if the room is full.
    pub fn entry_cell(&self) -> Option<GridCell> {
        (0..self.geometry.cols)
            .flat_map(|col| (0..self.geometry.rows).map(move |row| GridCell::new(row, col)))
            .find(|&cell| self.is_free(cell))
    }
}

/// Clamp an inclusive float span to `[0, len)`.  `None` if it misses entirely.
fn clamp_span(lo: f64, hi: f64, len: usize) -> Option<(usize, usize)> {
    if len == 0 || hi < 0.0 || lo >= len as f64 {
        return None;
    }
    let lo = lo.max(0.0) as usize;
    let hi = (hi as usize).min(len - 1);
    Some((lo, hi))
}
