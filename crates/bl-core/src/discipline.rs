//! Queueing discipline: the navigation policy every agent of a run follows.
//!
//! A discipline is a closed set of variants that differ only in which grid
//! moves are allowed and how step costs are shaped.  The navigator matches on
//! it inline inside the per-cell relaxation loop, so there is no dynamic
//! dispatch on the hot path.
//!
//! # Direction convention
//!
//! The navigator searches *from the goal back towards the agent*, so a
//! direction `(di, dj)` is the offset from a cell nearer the goal to a cell
//! farther from it.  The agent itself travels the reverse offset: `(1, 0)`
//! in a direction set lets agents move *up* one row, `(0, -1)` lets them move
//! *right* one column.

use std::fmt;
use std::str::FromStr;

use crate::{BlError, Point};

/// Grid offset `(di, dj)` = (row delta, column delta).
pub type Direction = (i32, i32);

/// Cost multiplier applied to a move the discipline wants agents to prefer.
pub const ALIGNMENT_DISCOUNT: f64 = 1e-3;

const ALL_DIRECTIONS: [Direction; 9] = [
    (0, 0), (1, 0), (0, 1), (-1, 0), (0, -1), (1, 1), (1, -1), (-1, -1), (-1, 1),
];

const FORWARD_DIRECTIONS: [Direction; 4] = [(0, 0), (0, -1), (1, -1), (1, 0)];

const LIMITED_DIRECTIONS: [Direction; 6] = [(0, 0), (1, 0), (0, -1), (-1, 0), (1, -1), (-1, -1)];

/// How agents choose their moves.  Fixed for a whole run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum QueueDiscipline {
    /// 8-connected movement, no directional preference.
    #[default]
    Free,
    /// Only forward moves (right, up, up-right).  Moving along the station
    /// row towards the station is nearly free, so agents line up in a single
    /// file against the counter.
    SingleFile,
    /// Six directions, no leftward moves.  Moving up while in the station's
    /// column is nearly free, so queues form perpendicular to the counter.
    Perpendicular,
    /// The same six directions as `Perpendicular` without cost shaping:
    /// agents may sidestep down or up but never overtake leftwards.
    OvertakeLimited,
}

impl QueueDiscipline {
    pub const ALL: [QueueDiscipline; 4] = [
        QueueDiscipline::Free,
        QueueDiscipline::SingleFile,
        QueueDiscipline::Perpendicular,
        QueueDiscipline::OvertakeLimited,
    ];

    /// Candidate moves.  Always contains the "stay" offset `(0, 0)`.
    pub fn step_directions(self) -> &'static [Direction] {
        match self {
            QueueDiscipline::Free => &ALL_DIRECTIONS,
            QueueDiscipline::SingleFile => &FORWARD_DIRECTIONS,
            QueueDiscipline::Perpendicular | QueueDiscipline::OvertakeLimited => {
                &LIMITED_DIRECTIONS
            }
        }
    }

    /// Multiplier on the base step cost of moving in `dir` out of the cell at
    /// `at` while heading for a station at `goal`.
    ///
    /// `tolerance` is the distance within which `at` counts as aligned with
    /// the station's row or column (the agent radius).
    #[inline]
    pub fn cost_factor(self, at: Point, goal: Point, tolerance: f64, dir: Direction) -> f64 {
        match self {
            QueueDiscipline::Free | QueueDiscipline::OvertakeLimited => 1.0,
            QueueDiscipline::SingleFile => {
                if (at.y - goal.y).abs() < tolerance && dir == (0, -1) {
                    ALIGNMENT_DISCOUNT
                } else {
                    1.0
                }
            }
            QueueDiscipline::Perpendicular => {
                if (at.x - goal.x).abs() < tolerance && dir == (1, 0) {
                    ALIGNMENT_DISCOUNT
                } else {
                    1.0
                }
            }
        }
    }

    /// Canonical name, as used in trace files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            QueueDiscipline::Free            => "free",
            QueueDiscipline::SingleFile      => "single-file",
            QueueDiscipline::Perpendicular   => "perpendicular",
            QueueDiscipline::OvertakeLimited => "overtake-limited",
        }
    }
}

impl fmt::Display for QueueDiscipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueueDiscipline {
    type Err = BlError;

    /// Accepts the canonical names and the historical method names
    /// (`anarchy`, `classic`, `vline`, `skippable`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" | "anarchy" => Ok(QueueDiscipline::Free),
            "single-file" | "single_file" | "classic" => Ok(QueueDiscipline::SingleFile),
            "perpendicular" | "vline" => Ok(QueueDiscipline::Perpendicular),
            "overtake-limited" | "overtake_limited" | "skippable" => {
                Ok(QueueDiscipline::OvertakeLimited)
            }
            _ => Err(BlError::UnknownDiscipline(s.to_owned())),
        }
    }
}
