//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;

use bl_agent::GoalSampler;
use bl_core::{BuffetConfig, ItemId, SimClock, SimRng};
use bl_spatial::{DijkstraNavigator, GoalTable, Navigator};
use tracing::debug;

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim<N>`].
///
/// # Required inputs
///
/// - [`BuffetConfig`] — room layout, arrival rate, discipline, seed, …
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                        |
/// |-------------------|--------------------------------|
/// | `.items(v)`       | station `i` serves `ItemId(i)` |
/// | `.navigator(n)`   | [`DijkstraNavigator`]          |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .items(vec![ItemId(3), ItemId(11), ItemId(7)])
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<N: Navigator = DijkstraNavigator> {
    config:    BuffetConfig,
    items:     Option<Vec<ItemId>>,
    navigator: N,
}

impl SimBuilder<DijkstraNavigator> {
    /// Create a builder using the default navigator.
    pub fn new(config: BuffetConfig) -> Self {
        Self { config, items: None, navigator: DijkstraNavigator }
    }
}

impl<N: Navigator> SimBuilder<N> {
    /// Items served by each station, in station order.  Must hold exactly
    /// `config.station_count` entries.
    pub fn items(mut self, items: Vec<ItemId>) -> Self {
        self.items = Some(items);
        self
    }

    /// Replace the navigation engine.
    pub fn navigator<M: Navigator>(self, navigator: M) -> SimBuilder<M> {
        SimBuilder { config: self.config, items: self.items, navigator }
    }

    /// Validate the configuration, lay out the goal table, and return a
    /// ready-to-run [`Sim`] with no agents.
    pub fn build(self) -> SimResult<Sim<N>> {
        self.config.validate()?;

        let goals = match self.items {
            Some(items) => GoalTable::with_items(&self.config, items)?,
            None => GoalTable::from_config(&self.config)?,
        };
        let geometry = self.config.geometry();

        debug!(
            rows = geometry.rows,
            cols = geometry.cols,
            stations = goals.station_count(),
            discipline = %self.config.discipline,
            seed = self.config.seed,
            "simulation built"
        );

        Ok(Sim {
            clock:          SimClock::new(self.config.granularity),
            geometry,
            goals:          Arc::new(goals),
            sampler:        GoalSampler::from_config(&self.config),
            navigator:      self.navigator,
            active:         Vec::new(),
            ledger:         Vec::new(),
            finished_count: 0,
            rng:            SimRng::new(self.config.seed),
            config:         self.config,
        })
    }
}
