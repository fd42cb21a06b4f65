//! The goal table: service stations along the counter plus the exit.
//!
//! # Layout
//!
//! ```text
//!   x = extra_width + 0   extra_width + 1   …   extra_width + n-1          width + 10
//!        [station 0]       [station 1]           [station n-1]   | wall |   (exit)
//! ```
//!
//! Stations sit `station_radius` below the top wall.  The exit lies far
//! beyond the right wall with a capture radius large enough to swallow the
//! last column band of the room, so "reaching the exit" means walking
//! against the right-hand wall.

use bl_core::{BuffetConfig, GoalId, ItemId, Point};

use crate::{SpatialError, SpatialResult};

/// How far past the right wall the exit centre lies.
pub const EXIT_OFFSET: f64 = 10.0;

/// Capture radius of the exit.  One unit wider than `EXIT_OFFSET`, so the
/// rightmost unit of the room counts as "at the exit".
pub const EXIT_RADIUS: f64 = EXIT_OFFSET + 1.0;

/// What a goal provides.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GoalKind {
    /// A service station handing out one item.
    Station(ItemId),
    /// The exit sentinel.  Reaching it retires the agent.
    Exit,
}

/// A fixed destination with a square capture zone.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Goal {
    pub id:             GoalId,
    pub position:       Point,
    pub capture_radius: f64,
    pub kind:           GoalKind,
}

impl Goal {
    /// `true` if `p` lies within the capture radius (Chebyshev, inclusive).
    #[inline]
    pub fn captures(&self, p: Point) -> bool {
        p.chebyshev(self.position) <= self.capture_radius
    }

    #[inline]
    pub fn is_exit(&self) -> bool {
        self.kind == GoalKind::Exit
    }
}

/// Immutable, ordered list of goals.  Index = [`GoalId`] = visiting priority.
///
/// The last entry is always the exit.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalTable {
    goals: Vec<Goal>,
}

impl GoalTable {
    /// Lay out `config.station_count` stations serving `0..n` in order.
    pub fn from_config(config: &BuffetConfig) -> SpatialResult<Self> {
        let items = (0..config.station_count).map(|i| ItemId(i as u16)).collect();
        Self::with_items(config, items)
    }

    /// Lay out the stations serving `items` (one per station) plus the exit.
    pub fn with_items(config: &BuffetConfig, items: Vec<ItemId>) -> SpatialResult<Self> {
        if config.station_count == 0 {
            return Err(SpatialError::NoStations);
        }
        if items.len() != config.station_count {
            return Err(SpatialError::ItemCount {
                expected: config.station_count,
                got:      items.len(),
            });
        }

        let mut goals: Vec<Goal> = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| Goal {
                id:             GoalId(i as u16),
                position:       Point::new(config.extra_width + i as f64, config.station_radius),
                capture_radius: config.station_radius,
                kind:           GoalKind::Station(item),
            })
            .collect();

        goals.push(Goal {
            id:             GoalId(config.station_count as u16),
            position:       Point::new(config.width() + EXIT_OFFSET, 0.0),
            capture_radius: EXIT_RADIUS,
            kind:           GoalKind::Exit,
        });

        Ok(Self { goals })
    }

    #[inline]
    pub fn get(&self, id: GoalId) -> Option<&Goal> {
        self.goals.get(id.index())
    }

    /// The exit sentinel's id (always the highest).
    #[inline]
    pub fn exit_id(&self) -> GoalId {
        self.goals[self.goals.len() - 1].id
    }

    /// Number of service stations, excluding the exit.
    #[inline]
    pub fn station_count(&self) -> usize {
        self.goals.len() - 1
    }

    /// Service stations only, in priority order.
    pub fn stations(&self) -> &[Goal] {
        &self.goals[..self.goals.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter()
    }

    /// Total number of goals including the exit.
    #[inline]
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// Never true: a built table always holds at least one station and the exit.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}
