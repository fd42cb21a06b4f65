//! Goal-set sampling for arriving agents.
//!
//! Every arrival wants each station independently with probability `p`, and
//! always wants the exit.  An arrival that wants no station at all is
//! resampled; the retry count is bounded so a degenerate `p` can never hang
//! the scheduler.

use bl_core::{BuffetConfig, GoalId, SimRng};

use crate::GoalQueue;

/// Upper bound on resampling attempts for one arrival.
///
/// With `p = 0.4` and 7 stations an attempt fails with probability
/// `0.6⁷ ≈ 2.8 %`; exhausting the bound is practically impossible unless
/// `p` is degenerate.
pub const MAX_SAMPLE_ATTEMPTS: u32 = 1_000;

/// Draws the goal queue for new agents.
#[derive(Clone, Debug)]
pub struct GoalSampler {
    station_count: usize,
    probability:   f64,
    service_units: u32,
    exit:          GoalId,
}

impl GoalSampler {
    pub fn new(station_count: usize, probability: f64, service_units: u32) -> Self {
        Self {
            station_count,
            probability,
            service_units,
            exit: GoalId(station_count as u16),
        }
    }

    pub fn from_config(config: &BuffetConfig) -> Self {
        Self::new(config.station_count, config.selection_probability, config.service_units())
    }

    #[inline]
    pub fn exit(&self) -> GoalId {
        self.exit
    }

    /// Sample a goal queue holding at least one station plus the exit.
    ///
    /// Returns `None` after [`MAX_SAMPLE_ATTEMPTS`] empty draws.
    pub fn sample(&self, rng: &mut SimRng) -> Option<GoalQueue> {
        for _ in 0..MAX_SAMPLE_ATTEMPTS {
            let mut goals: GoalQueue = (0..self.station_count)
                .filter(|_| rng.chance(self.probability))
                .map(|i| (GoalId(i as u16), self.service_units))
                .collect();
            if goals.is_empty() {
                continue;
            }
            goals.insert(self.exit, 1);
            return Some(goals);
        }
        None
    }
}
