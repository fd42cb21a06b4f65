//! Plain data row types written by output backends.

use bl_sim::{TickSummary, TraceRecord};

/// One agent's survival record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRow {
    pub agent_id:    u32,
    pub created_at:  f64,
    /// `None` while the agent is still in the room.
    pub finished_at: Option<f64>,
    pub observed_at: f64,
}

impl From<&TraceRecord> for TraceRow {
    fn from(r: &TraceRecord) -> Self {
        Self {
            agent_id:    r.agent.0,
            created_at:  r.created_at,
            finished_at: r.finished_at,
            observed_at: r.observed_at,
        }
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub time:           f64,
    pub active:         u64,
    /// Id of the agent spawned this tick; `None` if nobody arrived.
    pub spawned:        Option<u32>,
    pub stuck:          u64,
    pub retired:        u64,
    pub finished_count: u64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:           s.tick.0,
            time:           s.observed_at,
            active:         s.active as u64,
            spawned:        s.spawned.map(|id| id.0),
            stuck:          s.stuck as u64,
            retired:        s.retired as u64,
            finished_count: s.finished_count,
        }
    }
}
