//! A single diner moving through the buffet.

use std::collections::BTreeMap;

use bl_core::{AgentId, GoalId, Point, QueueDiscipline};
use bl_spatial::Goal;

/// Outstanding goals keyed by id, valued by remaining service units.
///
/// `BTreeMap` keeps keys sorted, so the first key is always the next goal to
/// pursue regardless of the order goals were inserted.
pub type GoalQueue = BTreeMap<GoalId, u32>;

/// What happened at the agent's current goal this tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Service {
    /// Not within the goal's capture radius.
    Away,
    /// Consumed one unit; `left` units remain.
    Loading { left: u32 },
    /// Consumed the last unit; the goal was removed from the queue.
    Completed(GoalId),
}

/// Per-agent state.
///
/// Lifecycle: created by the scheduler on arrival; mutated once per tick;
/// retired (and `finished_at` stamped) when `remaining` becomes empty.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id:                 AgentId,
    pub created_at:         f64,
    pub finished_at:        Option<f64>,
    pub position:           Point,
    /// Half-width of the square footprint.
    pub radius:             f64,
    pub discipline:         QueueDiscipline,
    /// Always holds the exit sentinel until the agent leaves.
    pub remaining:          GoalQueue,
    /// Units still to load at the current station while being served.
    pub loading_units_left: Option<u32>,
    /// Goals completed so far, in completion order.
    pub visited_goals:      Vec<GoalId>,
    /// Planned route from the current position to the current goal.
    pub path:               Vec<Point>,
}

impl Agent {
    pub fn new(
        id:         AgentId,
        created_at: f64,
        position:   Point,
        radius:     f64,
        discipline: QueueDiscipline,
        remaining:  GoalQueue,
    ) -> Self {
        Self {
            id,
            created_at,
            finished_at: None,
            position,
            radius,
            discipline,
            remaining,
            loading_units_left: None,
            visited_goals: Vec::new(),
            path: Vec::new(),
        }
    }

    /// The lowest-numbered goal still outstanding.
    #[inline]
    pub fn current_goal(&self) -> Option<GoalId> {
        self.remaining.keys().next().copied()
    }

    /// `true` once every goal, the exit included, has been completed.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.remaining.is_empty()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Consume one service unit at `goal` if the agent stands within its
    /// capture radius.
    ///
    /// `goal` must be the agent's current goal.  `loading_units_left` is
    /// updated to the remaining count (zero on completion) or cleared when
    /// the agent is away.
    pub fn serve(&mut self, goal: &Goal) -> Service {
        debug_assert_eq!(self.current_goal(), Some(goal.id));

        self.loading_units_left = None;
        if !goal.captures(self.position) {
            return Service::Away;
        }
        let Some(units) = self.remaining.get_mut(&goal.id) else {
            return Service::Away;
        };

        *units = units.saturating_sub(1);
        let left = *units;
        self.loading_units_left = Some(left);

        if left == 0 {
            self.remaining.remove(&goal.id);
            self.visited_goals.push(goal.id);
            Service::Completed(goal.id)
        } else {
            Service::Loading { left }
        }
    }

    /// Stamp the retirement time.  Idempotent: the first stamp wins.
    pub fn retire(&mut self, at: f64) {
        debug_assert!(self.is_done());
        if self.finished_at.is_none() {
            self.finished_at = Some(at);
        }
    }
}
