//! Simulation time.
//!
//! One tick is the time an agent needs to cross one grid cell, so with `g`
//! cells per unit of distance:
//!
//!   time = tick / g
//!
//! The tick counter is the source of truth; continuous time is always derived
//! from it, never accumulated.

use std::fmt;

/// Number of ticks processed since the start of the run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick {}", self.0)
    }
}

/// The current tick plus the tick → time conversion.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Ticks per unit of time; equal to the grid granularity.
    pub granularity:  u32,
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(granularity: u32) -> Self {
        Self { granularity, current_tick: Tick::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.offset(1);
    }

    /// Continuous time of the current tick.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time_of(self.current_tick)
    }

    #[inline]
    pub fn time_of(&self, tick: Tick) -> f64 {
        tick.0 as f64 / self.granularity as f64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (t = {:.1})", self.current_tick, self.time())
    }
}
