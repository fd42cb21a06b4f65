//! Unit tests for bl-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, GoalId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::from_index(42), Some(id));
        assert_eq!(GoalId::from_index(70_000), None);
    }

    #[test]
    fn goal_ordering_is_numeric() {
        assert!(GoalId(2) < GoalId(10));
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "agent#7");
        assert_eq!(GoalId(3).to_string(), "goal#3");
    }
}

#[cfg(test)]
mod geo {
    use crate::{GridCell, GridGeometry, Point};

    #[test]
    fn extent_rounds_to_whole_cells() {
        let g = GridGeometry::from_extent(11.0, 4.0, 10);
        assert_eq!((g.rows, g.cols), (40, 110));
        let g = GridGeometry::from_extent(0.7, 0.3, 10);
        assert_eq!((g.rows, g.cols), (3, 7));
    }

    #[test]
    fn cell_point_roundtrip() {
        let g = GridGeometry::new(40, 110, 10);
        for (row, col) in [(0, 0), (3, 7), (17, 29), (39, 109)] {
            let cell = GridCell::new(row, col);
            assert_eq!(g.cell_at(g.point(cell)), Some(cell));
            assert_eq!(g.cell(g.index(cell)), cell);
        }
    }

    #[test]
    fn cell_at_outside_is_none() {
        let g = GridGeometry::new(10, 10, 10);
        assert_eq!(g.cell_at(Point::new(-0.5, 0.2)), None);
        assert_eq!(g.cell_at(Point::new(0.2, 1.0)), None);
    }

    #[test]
    fn offset_clips_at_edges() {
        let g = GridGeometry::new(5, 5, 10);
        let corner = GridCell::new(0, 0);
        assert_eq!(g.offset(corner, -1, 0), None);
        assert_eq!(g.offset(corner, 0, -1), None);
        assert_eq!(g.offset(corner, 1, 1), Some(GridCell::new(1, 1)));
        assert_eq!(g.offset(GridCell::new(4, 4), 0, 1), None);
    }

    #[test]
    fn border_band() {
        let g = GridGeometry::new(50, 50, 10);
        let margin = g.border_margin(0.2);
        assert_eq!(margin, 2);
        assert!(g.is_border(GridCell::new(1, 25), margin));
        assert!(g.is_border(GridCell::new(48, 25), margin));
        assert!(!g.is_border(GridCell::new(2, 2), margin));
        assert!(!g.is_border(GridCell::new(47, 47), margin));
    }

    #[test]
    fn chebyshev() {
        assert_eq!(Point::new(0.0, 0.0).chebyshev(Point::new(0.3, -0.5)), 0.5);
        assert_eq!(GridCell::new(2, 9).chebyshev(GridCell::new(5, 4)), 5);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t.offset(3), Tick(13));
        assert!(t < t.offset(1));
        assert_eq!(t.to_string(), "tick 10");
    }

    #[test]
    fn clock_does_not_drift() {
        let mut clock = SimClock::new(10);
        for _ in 0..1_000 {
            clock.advance();
        }
        assert_eq!(clock.time(), 100.0);
        assert_eq!(clock.time_of(Tick(5)), 0.5);
    }
}

#[cfg(test)]
mod rng {
    use crate::{SimRng, derive_seed};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.unit(), r2.unit());
        }
    }

    #[test]
    fn chance_extremes() {
        let mut rng = SimRng::new(0);
        for _ in 0..100 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn shuffle_is_reproducible() {
        let mut a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();
        SimRng::new(7).shuffle(&mut a);
        SimRng::new(7).shuffle(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn derived_seeds_differ() {
        assert_ne!(derive_seed(1, 0), derive_seed(1, 1));
        assert_eq!(derive_seed(9, 0), 9);
    }
}

#[cfg(test)]
mod discipline {
    use crate::discipline::ALIGNMENT_DISCOUNT;
    use crate::{Point, QueueDiscipline};

    #[test]
    fn every_direction_set_contains_stay() {
        for d in QueueDiscipline::ALL {
            assert!(d.step_directions().contains(&(0, 0)), "{d}");
        }
    }

    #[test]
    fn free_is_eight_connected() {
        assert_eq!(QueueDiscipline::Free.step_directions().len(), 9);
    }

    #[test]
    fn free_has_no_preference() {
        let at = Point::new(3.0, 0.24);
        let goal = Point::new(3.0, 0.24);
        for &dir in QueueDiscipline::Free.step_directions() {
            assert_eq!(QueueDiscipline::Free.cost_factor(at, goal, 0.18, dir), 1.0);
        }
    }

    #[test]
    fn perpendicular_discounts_column_aligned_approach() {
        let goal = Point::new(4.0, 0.24);
        let d = QueueDiscipline::Perpendicular;
        assert_eq!(d.cost_factor(Point::new(4.1, 1.0), goal, 0.18, (1, 0)), ALIGNMENT_DISCOUNT);
        assert_eq!(d.cost_factor(Point::new(4.5, 1.0), goal, 0.18, (1, 0)), 1.0);
        assert_eq!(d.cost_factor(Point::new(4.1, 1.0), goal, 0.18, (0, -1)), 1.0);
    }

    #[test]
    fn single_file_discounts_row_aligned_approach() {
        let goal = Point::new(4.0, 0.24);
        let d = QueueDiscipline::SingleFile;
        assert_eq!(d.cost_factor(Point::new(2.0, 0.3), goal, 0.18, (0, -1)), ALIGNMENT_DISCOUNT);
        assert_eq!(d.cost_factor(Point::new(2.0, 0.8), goal, 0.18, (0, -1)), 1.0);
        assert_eq!(d.cost_factor(Point::new(2.0, 0.3), goal, 0.18, (1, 0)), 1.0);
    }

    #[test]
    fn parses_historical_names() {
        assert_eq!("anarchy".parse::<QueueDiscipline>().unwrap(), QueueDiscipline::Free);
        assert_eq!("classic".parse::<QueueDiscipline>().unwrap(), QueueDiscipline::SingleFile);
        assert_eq!("vline".parse::<QueueDiscipline>().unwrap(), QueueDiscipline::Perpendicular);
        assert_eq!(
            "skippable".parse::<QueueDiscipline>().unwrap(),
            QueueDiscipline::OvertakeLimited
        );
        assert!("rogue".parse::<QueueDiscipline>().is_err());
    }

    #[test]
    fn display_roundtrips_through_from_str() {
        for d in QueueDiscipline::ALL {
            assert_eq!(d.to_string().parse::<QueueDiscipline>().unwrap(), d);
        }
    }
}

#[cfg(test)]
mod config {
    use crate::BuffetConfig;

    #[test]
    fn defaults_are_valid() {
        let cfg = BuffetConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.width(), 11.0);
        assert_eq!(cfg.service_units(), 20);
        assert_eq!(cfg.geometry().rows, 40);
        assert_eq!(cfg.geometry().cols, 110);
    }

    #[test]
    fn rejects_zero_stations() {
        let cfg = BuffetConfig { station_count: 0, ..BuffetConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_selection_probability() {
        let cfg = BuffetConfig { selection_probability: 0.0, ..BuffetConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_negative_rate_and_radius() {
        let cfg = BuffetConfig { arrival_rate: -1.0, ..BuffetConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = BuffetConfig { agent_radius: -0.1, ..BuffetConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = BuffetConfig { station_radius: f64::NAN, ..BuffetConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_arrival_rate_is_allowed() {
        let cfg = BuffetConfig { arrival_rate: 0.0, ..BuffetConfig::default() };
        cfg.validate().unwrap();
        assert_eq!(cfg.spawn_probability(), 0.0);
    }

    #[test]
    fn rejects_grid_without_interior() {
        let cfg = BuffetConfig { height: 0.3, agent_radius: 0.2, ..BuffetConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_service_units() {
        let cfg = BuffetConfig { service_factor: 0.01, ..BuffetConfig::default() };
        assert!(cfg.validate().is_err());
    }
}
