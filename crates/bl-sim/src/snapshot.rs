//! Data products handed to collaborators: trace records, tick summaries, and
//! render snapshots.
//!
//! Everything here is owned data.  A `Snapshot` can be sent to a render
//! thread while the simulation carries on with the next tick; the goal table
//! is shared through an `Arc` because it never changes after construction.

use std::sync::Arc;

use bl_agent::Agent;
use bl_core::{AgentId, GoalId, Point, SimClock, Tick};
use bl_spatial::GoalTable;

/// One row of the survival trace: an agent's arrival, departure (if any),
/// and the time the row was observed.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceRecord {
    pub agent:       AgentId,
    pub created_at:  f64,
    pub finished_at: Option<f64>,
    pub observed_at: f64,
}

/// Per-tick counters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSummary {
    /// The tick that was processed.
    pub tick:           Tick,
    /// Clock time at the end of the tick.
    pub observed_at:    f64,
    /// Agent spawned this tick, if any.
    pub spawned:        Option<AgentId>,
    /// Agents still active after retirement.
    pub active:         usize,
    /// Agents that wanted to move but were blocked or had no route.
    pub stuck:          usize,
    /// Agents retired this tick.
    pub retired:        usize,
    /// Agents retired since the start of the run.
    pub finished_count: u64,
}

/// Render-facing view of one active agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentView {
    pub id:                 AgentId,
    pub position:           Point,
    pub radius:             f64,
    pub path:               Vec<Point>,
    pub current_goal:       Option<GoalId>,
    pub loading_units_left: Option<u32>,
    pub visited_goals:      Vec<GoalId>,
}

impl From<&Agent> for AgentView {
    fn from(agent: &Agent) -> Self {
        Self {
            id:                 agent.id,
            position:           agent.position,
            radius:             agent.radius,
            path:               agent.path.clone(),
            current_goal:       agent.current_goal(),
            loading_units_left: agent.loading_units_left,
            visited_goals:      agent.visited_goals.clone(),
        }
    }
}

/// Frozen copy of everything a renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub clock:          SimClock,
    pub finished_count: u64,
    pub agents:         Vec<AgentView>,
    pub goals:          Arc<GoalTable>,
}

impl Snapshot {
    /// Finished agents per unit of time so far.
    pub fn throughput(&self) -> f64 {
        let t = self.clock.time();
        if t > 0.0 { self.finished_count as f64 / t } else { 0.0 }
    }
}
