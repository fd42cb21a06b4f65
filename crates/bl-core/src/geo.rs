//! Continuous room coordinates and the discretised grid laid over them.
//!
//! The room spans `x ∈ [0, width)` left to right and `y ∈ [0, height)` top to
//! bottom.  Grid cell `(row, col)` sits at the point `(col / g, row / g)`
//! where `g` is the granularity (cells per unit of distance).  Cells are
//! flattened row-major into a single `Vec` index by every grid consumer.

use std::fmt;

// ── Point ─────────────────────────────────────────────────────────────────────

/// A position in continuous room coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Chebyshev (L∞) distance.  Agents and stations are square, so every
    /// "within radius" test in the simulation uses this metric.
    #[inline]
    pub fn chebyshev(self, other: Point) -> f64 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// ── GridCell ──────────────────────────────────────────────────────────────────

/// A discrete grid coordinate.  `row` grows downwards, `col` to the right.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
}

impl GridCell {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Chebyshev distance in cells.
    #[inline]
    pub fn chebyshev(self, other: GridCell) -> usize {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

// ── GridGeometry ──────────────────────────────────────────────────────────────

/// Dimensions of the discretised room and the conversions between cells,
/// flat indices, and continuous points.
///
/// `GridGeometry` is `Copy` and holds no heap data; every per-query grid
/// built over it shares the same shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridGeometry {
    pub rows:        usize,
    pub cols:        usize,
    pub granularity: u32,
}

impl GridGeometry {
    pub fn new(rows: usize, cols: usize, granularity: u32) -> Self {
        Self { rows, cols, granularity }
    }

    /// Cover a `width × height` room at `granularity` cells per unit.
    ///
    /// Dimensions are rounded to the nearest cell so that e.g. a height of
    /// `0.3` at granularity 10 yields exactly 3 rows.
    pub fn from_extent(width: f64, height: f64, granularity: u32) -> Self {
        let g = granularity as f64;
        Self {
            rows: (height * g).round().max(0.0) as usize,
            cols: (width * g).round().max(0.0) as usize,
            granularity,
        }
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Room height in continuous units.
    #[inline]
    pub fn height(&self) -> f64 {
        self.rows as f64 / self.granularity as f64
    }

    /// Room width in continuous units.
    #[inline]
    pub fn width(&self) -> f64 {
        self.cols as f64 / self.granularity as f64
    }

    /// Row-major flat index of `cell`.
    #[inline]
    pub fn index(&self, cell: GridCell) -> usize {
        cell.row * self.cols + cell.col
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn cell(&self, index: usize) -> GridCell {
        GridCell::new(index / self.cols, index % self.cols)
    }

    /// The neighbour of `cell` at offset `(di, dj)`, or `None` if it falls
    /// outside the grid.
    #[inline]
    pub fn offset(&self, cell: GridCell, di: i32, dj: i32) -> Option<GridCell> {
        let row = cell.row.checked_add_signed(di as isize)?;
        let col = cell.col.checked_add_signed(dj as isize)?;
        (row < self.rows && col < self.cols).then_some(GridCell::new(row, col))
    }

    /// Continuous coordinates of a cell.
    #[inline]
    pub fn point(&self, cell: GridCell) -> Point {
        let g = self.granularity as f64;
        Point::new(cell.col as f64 / g, cell.row as f64 / g)
    }

    /// The cell nearest to `p`, or `None` if `p` lies outside the grid.
    ///
    /// Agents only ever occupy cell centres, so rounding recovers their cell
    /// exactly despite floating-point noise in `col / g * g`.
    pub fn cell_at(&self, p: Point) -> Option<GridCell> {
        let g = self.granularity as f64;
        let row = (p.y * g).round();
        let col = (p.x * g).round();
        if row < 0.0 || col < 0.0 || row >= self.rows as f64 || col >= self.cols as f64 {
            return None;
        }
        Some(GridCell::new(row as usize, col as usize))
    }

    /// Width in cells of the wall band an agent of `radius` may never enter.
    #[inline]
    pub fn border_margin(&self, radius: f64) -> usize {
        (radius * self.granularity as f64).ceil().max(0.0) as usize
    }

    /// `true` if `cell` lies within `margin` cells of any edge.
    #[inline]
    pub fn is_border(&self, cell: GridCell, margin: usize) -> bool {
        cell.row < margin
            || cell.col < margin
            || cell.row + margin >= self.rows
            || cell.col + margin >= self.cols
    }
}
