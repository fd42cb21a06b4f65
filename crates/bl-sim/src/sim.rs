//! The `Sim` struct and its tick loop.

use std::sync::Arc;

use bl_agent::{Agent, GoalQueue, GoalSampler};
use bl_core::{AgentId, BuffetConfig, GridGeometry, Point, SimClock, SimRng, Tick};
use bl_spatial::{DijkstraNavigator, GoalTable, NavOutcome, NavRequest, Navigator, OccupancyGrid};
use tracing::{debug, trace, warn};

use crate::{
    AgentView, NoopObserver, SimError, SimObserver, SimResult, Snapshot, TickSummary, TraceRecord,
};

/// Arrival and departure times of one agent, indexed by `AgentId`.
///
/// Kept for every agent ever spawned so the trace outlives retirement.
#[derive(Copy, Clone, Debug)]
pub(crate) struct LedgerEntry {
    pub(crate) created_at:  f64,
    pub(crate) finished_at: Option<f64>,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<N>` owns the room, the active agents, and the random stream, and
/// drives the tick loop described in the [crate docs][crate].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<N: Navigator = DijkstraNavigator> {
    /// Room layout, rates, discipline, seed, run length.
    pub config: BuffetConfig,

    /// Simulation clock: `1 / granularity` time units per tick.
    pub clock: SimClock,

    /// Grid dimensions shared by every occupancy build.
    pub geometry: GridGeometry,

    /// Stations plus the exit.  Immutable after construction and shared with
    /// every snapshot.
    pub goals: Arc<GoalTable>,

    pub sampler: GoalSampler,

    pub navigator: N,

    /// Agents in the room, in this tick's movement order.
    pub(crate) active: Vec<Agent>,

    pub(crate) ledger: Vec<LedgerEntry>,

    pub(crate) finished_count: u64,

    /// The single random stream: arrival rolls, goal sampling, shuffles.
    pub(crate) rng: SimRng,
}

impl<N: Navigator> Sim<N> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        let end = self.config.end_tick();
        if self.clock.current_tick < end {
            self.run_while(observer, |summary| summary.tick.offset(1) < end);
        }
        observer.on_sim_end(self.clock.current_tick, &self.trace());
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.observed_tick(observer);
        }
    }

    /// Run ticks until `keep_going` returns `false` for a tick's summary.
    ///
    /// At least one tick is always processed, and `end_tick` is not
    /// consulted.  `run` is this loop with an end-tick predicate; interactive
    /// drivers pass their own stop signal.
    pub fn run_while<O, F>(&mut self, observer: &mut O, mut keep_going: F)
    where
        O: SimObserver,
        F: FnMut(&TickSummary) -> bool,
    {
        loop {
            let summary = self.observed_tick(observer);
            if !keep_going(&summary) {
                break;
            }
        }
    }

    /// Process a single tick without observer callbacks.
    pub fn step(&mut self) -> TickSummary {
        self.process_tick(&mut NoopObserver)
    }

    /// Agents currently in the room, in movement order.
    pub fn agents(&self) -> &[Agent] {
        &self.active
    }

    /// Agents retired since the start of the run.
    pub fn finished_count(&self) -> u64 {
        self.finished_count
    }

    /// Agents spawned since the start of the run.
    pub fn spawned_count(&self) -> usize {
        self.ledger.len()
    }

    /// Current simulation time.
    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    /// One record per agent ever spawned, in spawn order, observed now.
    pub fn trace(&self) -> Vec<TraceRecord> {
        let observed_at = self.clock.time();
        self.ledger
            .iter()
            .enumerate()
            .map(|(i, entry)| TraceRecord {
                agent:       AgentId(i as u32),
                created_at:  entry.created_at,
                finished_at: entry.finished_at,
                observed_at,
            })
            .collect()
    }

    /// Deep copy of the render-relevant state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            clock:          self.clock,
            finished_count: self.finished_count,
            agents:         self.active.iter().map(AgentView::from).collect(),
            goals:          Arc::clone(&self.goals),
        }
    }

    /// Put an agent with an explicit goal queue into the room at the current
    /// time.
    ///
    /// The exit is added to `goals` if missing.  `position` must map to a
    /// free grid cell given the agents already present.
    pub fn place_agent(&mut self, position: Point, mut goals: GoalQueue) -> SimResult<AgentId> {
        let Some(cell) = self.geometry.cell_at(position) else {
            return Err(SimError::Placement { position, reason: "outside the room" });
        };
        if goals.keys().any(|&g| self.goals.get(g).is_none()) {
            return Err(SimError::Placement { position, reason: "unknown goal id" });
        }
        if !self.occupancy_excluding(None).is_free(cell) {
            return Err(SimError::Placement { position, reason: "cell is not free" });
        }
        goals.entry(self.goals.exit_id()).or_insert(1);

        let id = self.next_agent_id().ok_or(SimError::Placement {
            position,
            reason: "agent id space exhausted",
        })?;
        self.admit(id, self.geometry.point(cell), goals);
        Ok(id)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn observed_tick<O: SimObserver>(&mut self, observer: &mut O) -> TickSummary {
        observer.on_tick_start(self.clock.current_tick);
        let summary = self.process_tick(observer);
        observer.on_tick_end(&summary);
        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && summary.tick.0.is_multiple_of(interval) {
            observer.on_snapshot(&self.snapshot());
        }
        summary
    }

    fn process_tick<O: SimObserver>(&mut self, observer: &mut O) -> TickSummary {
        let now = self.clock.current_tick;
        let time = self.clock.time();

        // ── Phase 1: arrival ──────────────────────────────────────────────
        let spawned = if self.rng.chance(self.config.spawn_probability()) {
            self.spawn(time)
        } else {
            None
        };
        if let Some(agent) = self.active.last().filter(|_| spawned.is_some()) {
            observer.on_agent_spawned(agent);
        }

        // ── Phase 2: serve and move, in list order ────────────────────────
        //
        // Each agent sees the positions others hold at the moment it moves.
        let mut stuck = 0;
        for i in 0..self.active.len() {
            if self.advance_agent(i).is_some_and(NavOutcome::is_stuck) {
                stuck += 1;
            }
        }

        // ── Phase 3: retire and reshuffle ─────────────────────────────────
        let observed_at = self.clock.time_of(now.offset(1));
        let mut retained = Vec::with_capacity(self.active.len());
        let mut retired = 0;
        for mut agent in std::mem::take(&mut self.active) {
            if !agent.is_done() {
                retained.push(agent);
                continue;
            }
            agent.retire(time);
            let entry = &mut self.ledger[agent.id.index()];
            entry.finished_at = agent.finished_at;
            self.finished_count += 1;
            retired += 1;
            debug!(agent = %agent.id, time, visited = ?agent.visited_goals, "agent left");
            observer.on_agent_finished(&TraceRecord {
                agent:       agent.id,
                created_at:  agent.created_at,
                finished_at: agent.finished_at,
                observed_at,
            });
        }
        self.rng.shuffle(&mut retained);
        self.active = retained;

        // ── Phase 4: advance the clock ────────────────────────────────────
        self.clock.advance();

        TickSummary {
            tick: now,
            observed_at,
            spawned,
            active: self.active.len(),
            stuck,
            retired,
            finished_count: self.finished_count,
        }
    }

    /// Roll succeeded: try to admit one new agent at the entry cell.
    fn spawn(&mut self, time: f64) -> Option<AgentId> {
        let grid = self.occupancy_excluding(None);
        let Some(cell) = grid.entry_cell() else {
            debug!(time, "no free entry cell; arrival dropped");
            return None;
        };
        let Some(goals) = self.sampler.sample(&mut self.rng) else {
            warn!(time, "goal sampling exhausted; arrival dropped");
            return None;
        };
        let Some(id) = self.next_agent_id() else {
            warn!(time, "agent id space exhausted; arrival dropped");
            return None;
        };

        debug!(agent = %id, time, row = cell.row, col = cell.col, goals = ?goals.keys(), "agent arrived");
        self.admit(id, self.geometry.point(cell), goals);
        Some(id)
    }

    fn admit(&mut self, id: AgentId, position: Point, goals: GoalQueue) {
        let created_at = self.clock.time();
        self.ledger.push(LedgerEntry { created_at, finished_at: None });
        self.active.push(Agent::new(
            id,
            created_at,
            position,
            self.config.agent_radius,
            self.config.discipline,
            goals,
        ));
    }

    fn next_agent_id(&self) -> Option<AgentId> {
        AgentId::from_index(self.ledger.len())
    }

    /// Occupancy grid of every active agent except `skip`.
    fn occupancy_excluding(&self, skip: Option<usize>) -> OccupancyGrid {
        let others = self
            .active
            .iter()
            .enumerate()
            .filter(|&(j, _)| Some(j) != skip)
            .map(|(_, a)| a.position);
        OccupancyGrid::build(self.geometry, self.config.agent_radius, others)
    }

    /// Serve, plan, and move agent `i`.  Returns `None` for an agent with no
    /// outstanding goal or an off-grid position.
    fn advance_agent(&mut self, i: usize) -> Option<NavOutcome> {
        let goal_id = self.active[i].current_goal()?;
        let goal = *self.goals.get(goal_id)?;
        self.active[i].serve(&goal);

        let grid = self.occupancy_excluding(Some(i));
        let agent = &self.active[i];
        let from = self.geometry.cell_at(agent.position)?;
        let plan = self.navigator.plan(&NavRequest {
            grid:                &grid,
            goal:                &goal,
            from,
            discipline:          agent.discipline,
            alignment_tolerance: agent.radius,
        });

        let agent = &mut self.active[i];
        if let Some(next) = plan.outcome.next_cell() {
            agent.position = self.geometry.point(next);
        }
        agent.path = plan.path.iter().map(|&c| self.geometry.point(c)).collect();

        trace!(
            agent = %agent.id,
            goal = %goal_id,
            outcome = ?plan.outcome,
            moves = plan.moves(),
            settled = plan.settled,
            "navigated"
        );
        Some(plan.outcome)
    }
}
