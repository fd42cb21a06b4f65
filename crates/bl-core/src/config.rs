//! Top-level simulation configuration.

use crate::{BlError, BlResult, GridGeometry, QueueDiscipline, Tick};

/// Everything needed to construct a simulation.
///
/// Typically built from `BuffetConfig::default()` with a few fields
/// overridden.  With the `serde` feature, missing fields deserialize to
/// their defaults, so a JSON config need only name what it changes
/// (`bl_output::read_config`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuffetConfig {
    /// Number of service stations along the counter.
    pub station_count: usize,

    /// Probability that an arriving agent wants any given station.
    pub selection_probability: f64,

    /// Grid cells per unit of distance.  Also ticks per unit of time.
    pub granularity: u32,

    /// Half-width of an agent's square footprint.
    pub agent_radius: f64,

    /// Capture radius of each station.  Stations sit this far from the top wall.
    pub station_radius: f64,

    /// Room height.
    pub height: f64,

    /// Service time at a station relative to moving one unit of distance.
    pub service_factor: f64,

    /// Free space left of the first station.  Room width is
    /// `extra_width + station_count + 1`.
    pub extra_width: f64,

    /// Expected arrivals per unit of time.
    pub arrival_rate: f64,

    /// Navigation policy shared by every agent of the run.
    pub discipline: QueueDiscipline,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Ticks simulated by `Sim::run`.
    pub total_ticks: u64,

    /// Emit a snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for BuffetConfig {
    fn default() -> Self {
        Self {
            station_count:           7,
            selection_probability:   0.4,
            granularity:             10,
            agent_radius:            0.18,
            station_radius:          0.24,
            height:                  4.0,
            service_factor:          2.0,
            extra_width:             3.0,
            arrival_rate:            1.0,
            discipline:              QueueDiscipline::Free,
            seed:                    42,
            total_ticks:             3_000,
            snapshot_interval_ticks: 1,
        }
    }
}

impl BuffetConfig {
    /// Room width in continuous units.
    #[inline]
    pub fn width(&self) -> f64 {
        self.extra_width + self.station_count as f64 + 1.0
    }

    /// Grid covering the room.
    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::from_extent(self.width(), self.height, self.granularity)
    }

    /// Service units an agent consumes at each station it wants (one per tick).
    #[inline]
    pub fn service_units(&self) -> u32 {
        (self.granularity as f64 * self.service_factor).round().max(0.0) as u32
    }

    /// Probability of an arrival during a single tick.
    #[inline]
    pub fn spawn_probability(&self) -> f64 {
        self.arrival_rate / self.granularity as f64
    }

    /// The tick at which `Sim::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Reject configurations the simulation cannot run.
    pub fn validate(&self) -> BlResult<()> {
        fn positive(name: &str, v: f64) -> BlResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(BlError::Config(format!("{name} must be positive and finite, got {v}")))
            }
        }
        fn non_negative(name: &str, v: f64) -> BlResult<()> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(BlError::Config(format!("{name} must be non-negative and finite, got {v}")))
            }
        }

        if self.station_count == 0 {
            return Err(BlError::Config("station_count must be at least 1".into()));
        }
        if self.station_count >= u16::MAX as usize {
            return Err(BlError::Config(format!(
                "station_count {} leaves no goal id for the exit",
                self.station_count
            )));
        }
        if !(self.selection_probability > 0.0 && self.selection_probability <= 1.0) {
            return Err(BlError::Config(format!(
                "selection_probability must lie in (0, 1], got {}",
                self.selection_probability
            )));
        }
        if self.granularity == 0 {
            return Err(BlError::Config("granularity must be at least 1".into()));
        }
        positive("agent_radius", self.agent_radius)?;
        positive("station_radius", self.station_radius)?;
        positive("height", self.height)?;
        positive("service_factor", self.service_factor)?;
        non_negative("extra_width", self.extra_width)?;
        non_negative("arrival_rate", self.arrival_rate)?;

        if self.service_units() == 0 {
            return Err(BlError::Config(format!(
                "granularity {} × service_factor {} rounds to zero service units",
                self.granularity, self.service_factor
            )));
        }

        let geometry = self.geometry();
        let margin = geometry.border_margin(self.agent_radius);
        if geometry.rows <= 2 * margin || geometry.cols <= 2 * margin {
            return Err(BlError::Config(format!(
                "{}×{} grid has no interior inside a {margin}-cell border",
                geometry.rows, geometry.cols
            )));
        }
        Ok(())
    }
}
