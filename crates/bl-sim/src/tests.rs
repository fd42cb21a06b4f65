//! Integration tests for bl-sim.

use std::collections::HashMap;

use bl_core::{AgentId, BuffetConfig, GoalId, Point, QueueDiscipline, Tick};

use crate::{Sim, SimBuilder, SimObserver, Snapshot, TickSummary, TraceRecord};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> BuffetConfig {
    BuffetConfig { total_ticks, snapshot_interval_ticks: 0, ..BuffetConfig::default() }
}

/// One station at (3.0, 0.24), room 5 × 4, nobody arrives on their own.
fn quiet_room(discipline: QueueDiscipline) -> Sim {
    let config = BuffetConfig {
        station_count: 1,
        arrival_rate: 0.0,
        discipline,
        ..test_config(1_000)
    };
    SimBuilder::new(config).build().unwrap()
}

/// No two active agents closer than two radii (Chebyshev).
fn assert_separated(sim: &Sim) {
    let agents = sim.agents();
    let min = 2.0 * sim.config.agent_radius - 1e-9;
    for (i, a) in agents.iter().enumerate() {
        for b in &agents[i + 1..] {
            let d = a.position.chebyshev(b.position);
            assert!(d >= min, "{} at {} overlaps {} at {} (d = {d})", a.id, a.position, b.id, b.position);
        }
    }
}

#[derive(Default)]
struct Recorder {
    starts:    Vec<Tick>,
    summaries: Vec<TickSummary>,
    finished:  Vec<TraceRecord>,
    snapshots: usize,
    spawned:   usize,
    end:       Option<(Tick, usize)>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }
    fn on_agent_spawned(&mut self, _agent: &bl_agent::Agent) {
        self.spawned += 1;
    }
    fn on_agent_finished(&mut self, record: &TraceRecord) {
        self.finished.push(*record);
    }
    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.summaries.push(*summary);
    }
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {
        self.snapshots += 1;
    }
    fn on_sim_end(&mut self, final_tick: Tick, trace: &[TraceRecord]) {
        self.end = Some((final_tick, trace.len()));
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use bl_core::ItemId;
    use bl_spatial::GoalKind;

    use super::*;
    use crate::SimError;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = SimBuilder::new(test_config(10)).build().unwrap();
        assert_eq!(sim.goals.len(), 8);
        assert_eq!(sim.geometry.rows, 40);
        assert_eq!(sim.geometry.cols, 110);
        assert!(sim.agents().is_empty());
        assert_eq!(sim.current_tick(), Tick::ZERO);
    }

    #[test]
    fn invalid_config_errors() {
        let config = BuffetConfig { granularity: 0, ..test_config(10) };
        let result = SimBuilder::new(config).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn item_count_mismatch_errors() {
        let result = SimBuilder::new(test_config(10)).items(vec![ItemId(1); 3]).build();
        assert!(matches!(result, Err(SimError::Goals(_))));
    }

    #[test]
    fn custom_items_reach_the_goal_table() {
        let items: Vec<ItemId> = (0..7).rev().map(ItemId).collect();
        let sim = SimBuilder::new(test_config(10)).items(items).build().unwrap();
        let first = sim.goals.get(GoalId(0)).unwrap();
        assert_eq!(first.kind, GoalKind::Station(ItemId(6)));
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_loop {
    use super::*;
    use crate::NoopObserver;

    #[test]
    fn zero_arrival_rate_stays_empty() {
        let mut sim = quiet_room(QueueDiscipline::Free);
        sim.run_ticks(100, &mut NoopObserver);
        assert_eq!(sim.spawned_count(), 0);
        assert_eq!(sim.finished_count(), 0);
        assert!(sim.trace().is_empty());
        assert!((sim.time() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn run_stops_at_end_tick() {
        let config = BuffetConfig { snapshot_interval_ticks: 10, ..test_config(50) };
        let mut sim = SimBuilder::new(config).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);

        assert_eq!(sim.current_tick(), Tick(50));
        assert_eq!(rec.starts.len(), 50);
        assert_eq!(rec.starts.first(), Some(&Tick(0)));
        assert_eq!(rec.starts.last(), Some(&Tick(49)));
        assert_eq!(rec.snapshots, 5);
        assert_eq!(rec.end, Some((Tick(50), sim.spawned_count())));
        assert_eq!(rec.spawned, sim.spawned_count());
    }

    #[test]
    fn run_from_end_tick_is_a_no_op() {
        let mut sim = SimBuilder::new(test_config(0)).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);
        assert!(rec.starts.is_empty());
        assert_eq!(rec.end, Some((Tick(0), 0)));
    }

    #[test]
    fn run_while_honours_stop_signal() {
        let mut sim = SimBuilder::new(test_config(1_000)).build().unwrap();
        sim.run_while(&mut NoopObserver, |s| s.tick < Tick(9));
        assert_eq!(sim.current_tick(), Tick(10));
    }

    #[test]
    fn run_while_keeps_going_past_end_tick() {
        let mut sim = SimBuilder::new(test_config(5)).build().unwrap();
        sim.run_ticks(5, &mut NoopObserver);
        assert_eq!(sim.current_tick(), sim.config.end_tick());

        let mut rec = Recorder::default();
        let mut calls = 0;
        sim.run_while(&mut rec, |_| {
            calls += 1;
            calls < 3
        });
        assert_eq!(calls, 3);
        assert_eq!(sim.current_tick(), Tick(8));
        assert_eq!(rec.starts, vec![Tick(5), Tick(6), Tick(7)]);
        assert_eq!(rec.end, None);
    }

    #[test]
    fn run_while_from_zero_length_config_still_ticks() {
        let mut sim = SimBuilder::new(test_config(0)).build().unwrap();
        sim.run_while(&mut NoopObserver, |_| false);
        assert_eq!(sim.current_tick(), Tick(1));
    }

    #[test]
    fn summary_reports_post_advance_time() {
        let mut sim = quiet_room(QueueDiscipline::Free);
        let summary = sim.step();
        assert_eq!(summary.tick, Tick(0));
        assert!((summary.observed_at - 0.1).abs() < 1e-12);
        assert_eq!(summary.spawned, None);
    }

    #[test]
    fn arrivals_enter_at_the_entrance() {
        let config = BuffetConfig { arrival_rate: 10.0, ..test_config(10) };
        let mut sim = SimBuilder::new(config).build().unwrap();
        let summary = sim.step();
        // Probability 1: the first roll always spawns.
        assert_eq!(summary.spawned, Some(AgentId(0)));
        let trace = sim.trace();
        assert_eq!(trace.len(), 1);
        assert_eq!(trace[0].created_at, 0.0);
    }
}

// ── Run-level properties ──────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use super::*;

    #[test]
    fn finished_count_is_monotonic_and_matches_trace() {
        let mut sim = SimBuilder::new(test_config(600)).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);

        assert!(rec.summaries.windows(2).all(|w| w[0].finished_count <= w[1].finished_count));
        let trace = sim.trace();
        let finished = trace.iter().filter(|r| r.finished_at.is_some()).count() as u64;
        assert_eq!(finished, sim.finished_count());
        assert_eq!(rec.finished.len() as u64, sim.finished_count());
        assert!(sim.finished_count() > 0, "nobody left in 60 time units");
    }

    #[test]
    fn finished_count_matches_trace_every_tick() {
        let mut sim = SimBuilder::new(test_config(400)).build().unwrap();
        for _ in 0..400 {
            let summary = sim.step();
            let finished = sim.trace().iter().filter(|r| r.finished_at.is_some()).count() as u64;
            assert_eq!(finished, summary.finished_count);
            assert_eq!(sim.agents().len() + finished as usize, sim.spawned_count());
        }
    }

    #[test]
    fn created_before_finished() {
        let mut sim = SimBuilder::new(test_config(600)).build().unwrap();
        sim.run(&mut crate::NoopObserver);
        for record in sim.trace() {
            assert!(record.created_at <= record.observed_at);
            if let Some(finished) = record.finished_at {
                assert!(record.created_at <= finished);
                assert!(finished <= record.observed_at);
            }
        }
    }

    #[test]
    fn same_seed_same_run() {
        let run = || {
            let mut sim = SimBuilder::new(test_config(400)).build().unwrap();
            sim.run(&mut crate::NoopObserver);
            let positions: Vec<Point> = sim.agents().iter().map(|a| a.position).collect();
            (sim.trace(), positions)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn agents_never_overlap() {
        for discipline in QueueDiscipline::ALL {
            let config = BuffetConfig { discipline, ..test_config(300) };
            let mut sim = SimBuilder::new(config).build().unwrap();
            for _ in 0..300 {
                sim.step();
                assert_separated(&sim);
            }
        }
    }

    #[test]
    fn goal_queues_only_shrink() {
        let mut sim = SimBuilder::new(test_config(300)).build().unwrap();
        let mut last: HashMap<AgentId, usize> = HashMap::new();
        for _ in 0..300 {
            sim.step();
            for agent in sim.agents() {
                let len = agent.remaining.len();
                if let Some(&prev) = last.get(&agent.id) {
                    assert!(len <= prev, "{} grew from {prev} to {len}", agent.id);
                }
                assert!(agent.remaining.contains_key(&sim.goals.exit_id()));
                last.insert(agent.id, len);
            }
        }
    }
}

// ── Scripted scenarios ────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use bl_agent::GoalQueue;
    use bl_core::GridCell;
    use bl_spatial::{BLOCKAGE_THRESHOLD, NavOutcome, NavRequest, Navigator, OccupancyGrid};

    use super::*;
    use crate::SimError;

    fn wants_station_zero() -> GoalQueue {
        GoalQueue::from([(GoalId(0), 20)])
    }

    #[test]
    fn placed_agent_gets_the_exit() {
        let mut sim = quiet_room(QueueDiscipline::Free);
        let id = sim.place_agent(Point::new(1.0, 2.0), wants_station_zero()).unwrap();
        let agent = &sim.agents()[0];
        assert_eq!(agent.id, id);
        assert_eq!(agent.remaining.get(&GoalId(1)), Some(&1));
    }

    #[test]
    fn placement_rejects_bad_positions() {
        let mut sim = quiet_room(QueueDiscipline::Free);
        sim.place_agent(Point::new(1.0, 2.0), wants_station_zero()).unwrap();

        let overlap = sim.place_agent(Point::new(1.2, 2.1), wants_station_zero());
        assert!(matches!(overlap, Err(SimError::Placement { .. })));

        let outside = sim.place_agent(Point::new(9.0, 2.0), wants_station_zero());
        assert!(matches!(outside, Err(SimError::Placement { .. })));

        let unknown = sim.place_agent(Point::new(2.0, 3.0), GoalQueue::from([(GoalId(5), 1)]));
        assert!(matches!(unknown, Err(SimError::Placement { .. })));
    }

    #[test]
    fn lone_agent_is_served_and_leaves() {
        let mut sim = quiet_room(QueueDiscipline::Free);
        sim.place_agent(Point::new(1.0, 2.0), wants_station_zero()).unwrap();
        for _ in 0..300 {
            sim.step();
            if sim.finished_count() == 1 {
                break;
            }
        }
        let trace = sim.trace();
        assert_eq!(trace.len(), 1);
        let finished = trace[0].finished_at.expect("agent never left");
        // At least 20 ticks of service on top of the walk.
        assert!(finished >= 2.0);
    }

    #[test]
    fn single_file_agents_converging_never_overlap() {
        let mut sim = quiet_room(QueueDiscipline::SingleFile);
        // One approaching along the station row, one from below.
        sim.place_agent(Point::new(2.0, 0.3), wants_station_zero()).unwrap();
        sim.place_agent(Point::new(3.0, 1.5), wants_station_zero()).unwrap();

        for _ in 0..600 {
            sim.step();
            assert_separated(&sim);
            if sim.finished_count() == 2 {
                break;
            }
        }
        assert_eq!(sim.finished_count(), 2);
    }

    /// Station at (3.0, 0.1) whose capture zone holds a single cell centre
    /// inside a one-cell wall band.
    fn pinpoint_room() -> Sim {
        let config = BuffetConfig {
            station_count: 1,
            arrival_rate: 0.0,
            discipline: QueueDiscipline::SingleFile,
            agent_radius: 0.1,
            station_radius: 0.1,
            ..test_config(1_000)
        };
        SimBuilder::new(config).build().unwrap()
    }

    #[test]
    fn pinpoint_station_has_one_seed_cell() {
        let sim = pinpoint_room();
        let grid = OccupancyGrid::build(sim.geometry, sim.config.agent_radius, []);
        let station = sim.goals.get(GoalId(0)).unwrap();
        let inside: Vec<GridCell> = (0..sim.geometry.len())
            .map(|i| sim.geometry.cell(i))
            .filter(|&c| grid.cost(c).is_finite())
            .filter(|&c| sim.geometry.point(c).chebyshev(station.position) < station.capture_radius)
            .collect();
        assert_eq!(inside, vec![GridCell::new(1, 30)]);
    }

    #[test]
    fn single_file_steps_into_pinpoint_station_stay_unblocked() {
        let mut sim = pinpoint_room();
        // One on the station row to the left, one straight below.
        sim.place_agent(Point::new(2.0, 0.1), wants_station_zero()).unwrap();
        sim.place_agent(Point::new(3.0, 1.0), wants_station_zero()).unwrap();

        let mut steps = 0;
        for _ in 0..600 {
            for (i, agent) in sim.agents().iter().enumerate() {
                let others = sim
                    .agents()
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, a)| a.position);
                let grid = OccupancyGrid::build(sim.geometry, sim.config.agent_radius, others);
                let goal = sim.goals.get(agent.current_goal().unwrap()).unwrap();
                let from = sim.geometry.cell_at(agent.position).unwrap();
                let plan = sim.navigator.plan(&NavRequest {
                    grid: &grid,
                    goal,
                    from,
                    discipline: agent.discipline,
                    alignment_tolerance: agent.radius,
                });
                if let NavOutcome::Step(next) = plan.outcome {
                    steps += 1;
                    assert!(
                        grid.cost(next) < BLOCKAGE_THRESHOLD,
                        "{} steps into {next} at cost {}",
                        agent.id,
                        grid.cost(next)
                    );
                }
            }

            sim.step();
            assert_separated(&sim);
            if sim.finished_count() == 2 {
                break;
            }
        }

        assert!(steps > 0);
        assert_eq!(sim.finished_count(), 2);
        assert!(sim.trace().iter().all(|r| r.finished_at.is_some()));
    }

    #[test]
    fn single_file_never_moves_left_or_down() {
        let mut sim = quiet_room(QueueDiscipline::SingleFile);
        sim.place_agent(Point::new(1.0, 3.0), wants_station_zero()).unwrap();
        let mut prev = sim.agents()[0].position;
        for _ in 0..200 {
            sim.step();
            let Some(agent) = sim.agents().first() else { break };
            assert!(agent.position.x >= prev.x - 1e-9);
            assert!(agent.position.y <= prev.y + 1e-9);
            prev = agent.position;
        }
    }
}
