//! Integration tests for nasch-sim.

use std::collections::HashSet;

use nasch_core::{ConfigError, SimConfig, Step, VehicleId};
use nasch_lane::{Cell, LaneError};
use nasch_vehicle::{Vehicle, VehicleError};

use crate::{NoopObserver, Sim, SimBuilder, SimError, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(width: u32, vehicle_count: usize, step_budget: u64) -> SimConfig {
    SimConfig {
        width,
        height: 1,
        vehicle_count,
        max_speed: 4,
        seed: 42,
        step_budget,
        num_threads: Some(1),
    }
}

/// (position, speed) of every vehicle.
type Snapshot = Vec<(Cell, u32)>;

/// Observer that keeps everything it is shown.
#[derive(Default)]
struct Recorder {
    starts:   Vec<Step>,
    captures: Vec<(Step, f64, Snapshot)>,
    ended:    Vec<Step>,
}

impl SimObserver for Recorder {
    fn on_step_start(&mut self, step: Step) {
        self.starts.push(step);
    }

    fn on_capture(&mut self, step: Step, average_speed: f64, vehicles: &[Vehicle]) {
        let snap = vehicles.iter().map(|v| (v.position, v.speed)).collect();
        self.captures.push((step, average_speed, snap));
    }

    fn on_sim_end(&mut self, final_step: Step) {
        self.ended.push(final_step);
    }
}

fn recorded(config: SimConfig) -> Sim<Recorder> {
    SimBuilder::new(config, Recorder::default()).build().unwrap()
}

fn at(x: u32) -> Cell {
    Cell::new(x, 0)
}

fn assert_consistent<O: SimObserver>(sim: &Sim<O>) {
    let mut seen = HashSet::new();
    for v in sim.vehicles() {
        assert!(seen.insert(v.position), "two vehicles share {}", v.position);
        assert!(v.speed <= v.max_speed, "{} speed {} > max {}", v.id, v.speed, v.max_speed);
        assert_eq!(sim.lane().occupant(v.position), Some(v.id));
    }
    assert_eq!(sim.lane().occupied(), sim.vehicles().len());
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_reference_configuration() {
        let sim = SimBuilder::new(SimConfig::default(), NoopObserver).build().unwrap();
        assert!(sim.running());
        assert_eq!(sim.step_count(), Step::ZERO);
        assert_eq!(sim.vehicles().len(), 5);
        assert!(sim.vehicles().iter().all(|v| v.speed == 0 && v.max_speed == 4));
        assert!(sim.averages().is_empty());
        assert_consistent(&sim);
    }

    #[test]
    fn vehicle_ids_index_the_collection() {
        let sim = recorded(test_config(30, 6, 10));
        for (i, v) in sim.vehicles().iter().enumerate() {
            assert_eq!(v.id, VehicleId(i as u32));
            assert_eq!(sim.vehicle(v.id), Some(v));
        }
        assert_eq!(sim.vehicle(VehicleId(6)), None);
    }

    #[test]
    fn too_many_vehicles_is_invalid_configuration() {
        let result = SimBuilder::new(test_config(10, 11, 10), NoopObserver).build();
        assert!(matches!(
            result,
            Err(SimError::InvalidConfiguration(ConfigError::TooManyVehicles {
                requested: 11,
                capacity:  10,
            }))
        ));
    }

    #[test]
    fn zero_width_is_invalid_configuration() {
        let result = SimBuilder::new(test_config(0, 0, 10), NoopObserver).build();
        assert!(matches!(
            result,
            Err(SimError::InvalidConfiguration(ConfigError::ZeroWidth))
        ));
    }

    #[test]
    fn position_count_mismatch_errors() {
        let result = SimBuilder::new(test_config(10, 2, 10), NoopObserver)
            .initial_positions(vec![at(0)])
            .build();
        assert!(matches!(
            result,
            Err(SimError::VehicleCountMismatch { expected: 2, got: 1, .. })
        ));
    }

    #[test]
    fn duplicate_positions_error() {
        let result = SimBuilder::new(test_config(10, 2, 10), NoopObserver)
            .initial_positions(vec![at(4), at(14)])
            .build();
        assert!(matches!(
            result,
            Err(SimError::Lane(LaneError::OccupiedCell { .. }))
        ));
    }

    #[test]
    fn supplied_positions_are_wrapped() {
        let sim = SimBuilder::new(test_config(10, 2, 10), NoopObserver)
            .initial_positions(vec![at(12), at(5)])
            .build()
            .unwrap();
        assert_eq!(sim.vehicles()[0].position, at(2));
        assert_eq!(sim.vehicles()[1].position, at(5));
        assert_consistent(&sim);
    }

    #[test]
    fn per_vehicle_max_speeds() {
        let sim = SimBuilder::new(test_config(20, 3, 10), NoopObserver)
            .max_speeds(vec![1, 2, 5])
            .build()
            .unwrap();
        let maxes: Vec<u32> = sim.vehicles().iter().map(|v| v.max_speed).collect();
        assert_eq!(maxes, vec![1, 2, 5]);
    }

    #[test]
    fn max_speed_count_mismatch_errors() {
        let result = SimBuilder::new(test_config(20, 3, 10), NoopObserver)
            .max_speeds(vec![1, 2])
            .build();
        assert!(matches!(result, Err(SimError::VehicleCountMismatch { .. })));
    }

    #[test]
    fn zero_per_vehicle_max_speed_is_invalid() {
        let result = SimBuilder::new(test_config(20, 2, 10), NoopObserver)
            .max_speeds(vec![3, 0])
            .build();
        assert!(matches!(
            result,
            Err(SimError::InvalidConfiguration(ConfigError::ZeroMaxSpeed))
        ));
    }

    #[test]
    fn initial_state_is_captured_once() {
        let sim = recorded(test_config(30, 4, 10));
        let obs = sim.observer();
        assert_eq!(obs.captures.len(), 1);
        let (step, avg, snap) = &obs.captures[0];
        assert_eq!(*step, Step::ZERO);
        assert_eq!(*avg, 0.0);
        assert_eq!(snap.len(), 4);
        assert!(obs.starts.is_empty());
    }

    #[test]
    fn placement_is_seeded() {
        let positions = |seed| {
            let config = SimConfig { seed, ..test_config(60, 5, 10) };
            let sim = SimBuilder::new(config, NoopObserver).build().unwrap();
            sim.vehicles().iter().map(|v| v.position).collect::<Vec<_>>()
        };
        assert_eq!(positions(7), positions(7));
        assert_ne!(positions(1), positions(2));
    }

    #[test]
    fn full_lane_uses_every_cell() {
        let sim = recorded(test_config(12, 12, 10));
        assert_eq!(sim.lane().occupied(), 12);
        assert!(sim.lane().coords().all(|c| !sim.lane().is_empty(c)));
    }
}

// ── Step loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_stops_at_budget() {
        let mut sim = recorded(SimConfig::default());
        sim.run().unwrap();
        assert!(!sim.running());
        assert_eq!(sim.step_count(), Step(100));
        assert_eq!(sim.averages().len(), 100);
    }

    #[test]
    fn step_after_termination_is_rejected() {
        let mut sim = recorded(test_config(20, 3, 2));
        sim.step().unwrap();
        sim.step().unwrap();
        assert!(!sim.running());
        assert!(matches!(sim.step(), Err(SimError::Terminated(Step(2)))));
        // Rejection changes nothing.
        assert_eq!(sim.step_count(), Step(2));
        assert_eq!(sim.averages().len(), 2);
    }

    #[test]
    fn run_steps_advances_and_stops_early() {
        let mut sim = recorded(test_config(20, 3, 10));
        sim.run_steps(4).unwrap();
        assert_eq!(sim.step_count(), Step(4));
        sim.run_steps(3).unwrap();
        assert_eq!(sim.step_count(), Step(7));
        sim.run_steps(50).unwrap();
        assert_eq!(sim.step_count(), Step(10));
        assert!(!sim.running());
    }

    #[test]
    fn observer_called_correct_number_of_times() {
        let mut sim = recorded(test_config(20, 3, 7));
        sim.run().unwrap();
        let obs = sim.into_observer();
        assert_eq!(obs.starts, (1..=7).map(Step).collect::<Vec<_>>());
        // Initial capture plus one per step.
        assert_eq!(obs.captures.len(), 8);
        let steps: Vec<Step> = obs.captures.iter().map(|c| c.0).collect();
        assert_eq!(steps, (0..=7).map(Step).collect::<Vec<_>>());
        assert_eq!(obs.ended, vec![Step(7)]);
    }

    #[test]
    fn borrowed_observer_outlives_sim() {
        let mut rec = Recorder::default();
        {
            let mut sim = SimBuilder::new(test_config(20, 3, 5), &mut rec).build().unwrap();
            sim.run().unwrap();
        }
        assert_eq!(rec.captures.len(), 6);
        assert_eq!(rec.ended, vec![Step(5)]);
    }

    #[test]
    fn average_is_mean_of_committed_speeds() {
        let mut sim = recorded(test_config(40, 10, 30));
        sim.run().unwrap();
        let obs = sim.observer();
        for (step, avg, snap) in &obs.captures[1..] {
            let total: u32 = snap.iter().map(|&(_, s)| s).sum();
            let mean = total as f64 / snap.len() as f64;
            assert!((avg - mean).abs() < 1e-12, "{step}: {avg} != {mean}");
        }
        let recorded_avgs: Vec<f64> = obs.captures[1..].iter().map(|c| c.1).collect();
        assert_eq!(sim.averages(), recorded_avgs.as_slice());
    }

    #[test]
    fn total_speed_matches_last_step() {
        let mut sim = recorded(test_config(40, 8, 30));
        sim.run_steps(5).unwrap();
        let sum: u64 = sim.vehicles().iter().map(|v| u64::from(v.speed)).sum();
        assert_eq!(sim.total_speed(), sum);
        assert_eq!(sim.average_speed(), sum as f64 / 8.0);
    }

    #[test]
    fn no_vehicles_average_zero() {
        let mut sim = recorded(test_config(30, 0, 20));
        sim.run().unwrap();
        assert_eq!(sim.averages().len(), 20);
        assert!(sim.averages().iter().all(|&a| a == 0.0));
        assert!(sim.observer().captures.iter().all(|c| c.2.is_empty()));
    }

    #[test]
    fn full_lane_never_moves() {
        let mut sim = recorded(test_config(15, 15, 10));
        let before: Vec<Cell> = sim.vehicles().iter().map(|v| v.position).collect();
        sim.run().unwrap();
        assert!(sim.averages().iter().all(|&a| a == 0.0));
        assert!(sim.vehicles().iter().all(|v| v.speed == 0));
        let after: Vec<Cell> = sim.vehicles().iter().map(|v| v.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn invariants_hold_every_step() {
        let mut sim = recorded(test_config(50, 20, 200));
        while sim.running() {
            sim.step().unwrap();
            assert_consistent(&sim);
        }
    }

    #[test]
    fn per_vehicle_max_speeds_respected() {
        let mut sim = SimBuilder::new(test_config(100, 3, 50), NoopObserver)
            .initial_positions(vec![at(0), at(30), at(60)])
            .max_speeds(vec![1, 2, 5])
            .build()
            .unwrap();
        let mut seen_max = [0u32; 3];
        while sim.running() {
            sim.step().unwrap();
            for v in sim.vehicles() {
                assert!(v.speed <= v.max_speed);
                seen_max[v.id.index()] = seen_max[v.id.index()].max(v.speed);
            }
        }
        assert_eq!(seen_max[0], 1);
    }

    #[test]
    fn same_seed_same_trajectory() {
        let run = || {
            let mut sim = recorded(test_config(60, 12, 100));
            sim.run().unwrap();
            sim.into_observer().captures
        };
        let a = run();
        let b = run();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.0, y.0);
            assert_eq!(x.1.to_bits(), y.1.to_bits());
            assert_eq!(x.2, y.2);
        }
    }

    #[test]
    fn different_seed_different_trajectory() {
        let run = |seed| {
            let config = SimConfig { seed, ..test_config(60, 12, 50) };
            let mut sim = recorded(config);
            sim.run().unwrap();
            sim.into_observer().captures
        };
        assert_ne!(run(1), run(2));
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn follower_stops_short_of_leader() {
        let mut sim = SimBuilder::new(test_config(10, 2, 100), NoopObserver)
            .initial_positions(vec![at(0), at(3)])
            .build()
            .unwrap();
        sim.step().unwrap();
        // Gap is 2, so the follower lands on 0, 1 or 2.
        assert!(sim.vehicles()[0].position.x < 3);
        assert!(sim.vehicles()[0].speed <= 2);

        while sim.running() {
            let before: Vec<u32> = sim.vehicles().iter().map(|v| v.position.x).collect();
            sim.step().unwrap();
            for (i, v) in sim.vehicles().iter().enumerate() {
                let ahead = before[(i + 1) % 2];
                let gap = (ahead + 10 - before[i] - 1) % 10;
                assert!(v.speed <= gap, "vehicle {i}: speed {} gap {gap}", v.speed);
                assert_eq!(v.position.x, (before[i] + v.speed) % 10);
            }
        }
    }

    #[test]
    fn lone_vehicle_bounded_by_ring() {
        let config = SimConfig { max_speed: 9, ..test_config(5, 1, 40) };
        let mut sim = recorded(config);
        sim.run().unwrap();
        for (_, _, snap) in &sim.observer().captures {
            assert!(snap[0].1 <= 4);
        }
    }

    #[test]
    fn wraparound_keeps_coordinates_in_range() {
        let mut sim = SimBuilder::new(test_config(7, 2, 100), NoopObserver)
            .initial_positions(vec![at(6), at(3)])
            .build()
            .unwrap();
        while sim.running() {
            let before: Vec<u32> = sim.vehicles().iter().map(|v| v.position.x).collect();
            sim.step().unwrap();
            for (v, old) in sim.vehicles().iter().zip(before) {
                assert!(v.position.x < 7);
                assert_eq!(v.position.x, (old + v.speed) % 7);
            }
        }
    }

    #[test]
    fn denser_traffic_is_slower() {
        let mean = |count| {
            let mut sim = recorded(test_config(200, count, 100));
            sim.run().unwrap();
            let tail = &sim.averages()[50..];
            tail.iter().sum::<f64>() / tail.len() as f64
        };
        assert!(mean(10) > mean(150));
    }
}

// ── Commit failures ───────────────────────────────────────────────────────────

#[cfg(test)]
mod failure_tests {
    use super::*;
    use nasch_vehicle::Phase;

    /// Always keeps speed.
    struct NeverBrake;

    impl nasch_core::UniformSource for NeverBrake {
        fn next_unit(&mut self) -> f64 {
            0.99
        }
    }

    #[test]
    fn occupied_cell_surfaces_and_halts() {
        let mut sim = SimBuilder::new(test_config(10, 2, 10), Recorder::default())
            .initial_positions(vec![at(0), at(5)])
            .build()
            .unwrap();

        // Vehicle 0 plans a move to cell 1, then a stray vehicle appears there.
        sim.vehicles[0].compute(&sim.lane, &mut NeverBrake);
        assert_eq!(sim.vehicles[0].pending().map(|p| p.destination), Some(at(1)));
        sim.lane.place(VehicleId(99), at(1)).unwrap();

        let err = sim.commit_phase(Step(1)).unwrap_err();
        assert!(matches!(
            err,
            SimError::Vehicle(VehicleError::Lane(LaneError::OccupiedCell {
                occupant: VehicleId(99),
                incoming: VehicleId(0),
                ..
            }))
        ));
        assert!(!sim.running());
        assert!(matches!(sim.step(), Err(SimError::Terminated(Step::ZERO))));
        // The failed vehicle keeps its committed state.
        assert_eq!(sim.vehicles[0].position, at(0));
    }

    #[test]
    fn failed_commit_leaves_a_partial_step() {
        let mut sim = SimBuilder::new(test_config(10, 3, 10), Recorder::default())
            .initial_positions(vec![at(0), at(5), at(8)])
            .build()
            .unwrap();

        for v in sim.vehicles.iter_mut() {
            v.compute(&sim.lane, &mut NeverBrake);
        }
        sim.lane.place(VehicleId(99), at(6)).unwrap();

        let err = sim.commit_phase(Step(1)).unwrap_err();
        assert!(matches!(
            err,
            SimError::Vehicle(VehicleError::Lane(LaneError::OccupiedCell {
                incoming: VehicleId(1),
                ..
            }))
        ));

        // Committed before the failure.
        assert_eq!((sim.vehicles[0].position, sim.vehicles[0].speed), (at(1), 1));
        assert_eq!(sim.lane.occupant(at(1)), Some(VehicleId(0)));
        // The failing vehicle stays put with its move dropped.
        assert_eq!(sim.vehicles[1].position, at(5));
        assert_eq!(sim.vehicles[1].phase(), Phase::Idle);
        // Never reached.
        assert_eq!(sim.vehicles[2].position, at(8));
        assert_eq!(sim.vehicles[2].phase(), Phase::Computed);

        assert!(sim.averages().is_empty());
        assert_eq!(sim.step_count(), Step::ZERO);
        assert_eq!(sim.observer().captures.len(), 1);
    }

    #[test]
    fn compute_phase_reads_a_frozen_lane() {
        let mut sim = SimBuilder::new(test_config(10, 3, 10), NoopObserver)
            .initial_positions(vec![at(0), at(2), at(3)])
            .build()
            .unwrap();
        let before = sim.lane.clone();
        sim.compute_phase();
        for v in sim.vehicles() {
            assert_eq!(before.occupant(v.position), sim.lane.occupant(v.position));
            assert_eq!(sim.lane.position_of(v.id), Some(v.position));
        }
        // Vehicle 1 is boxed in by vehicle 2 no matter what it draws.
        assert_eq!(sim.vehicles[1].pending().map(|p| p.speed), Some(0));
    }
}

// ── Determinism across thread counts ──────────────────────────────────────────

#[cfg(test)]
mod determinism_tests {
    use super::*;
    use nasch_core::SimRng;
    use nasch_vehicle::VehicleRngs;

    fn dense_config(num_threads: Option<usize>) -> SimConfig {
        SimConfig {
            width: 60,
            height: 1,
            vehicle_count: 20,
            max_speed: 4,
            seed: 42,
            step_budget: 100,
            num_threads,
        }
    }

    fn trajectory(num_threads: Option<usize>) -> Vec<(Step, f64, Snapshot)> {
        let mut sim = recorded(dense_config(num_threads));
        sim.run().unwrap();
        sim.into_observer().captures
    }

    /// Replays every step with a plain sequential loop over the vehicles and
    /// compares it against the simulation, whichever compute path it uses.
    #[test]
    fn matches_a_sequential_replay() {
        let mut sim = recorded(dense_config(Some(4)));
        let mut lane = sim.lane().clone();
        let mut vehicles = sim.vehicles().to_vec();
        let mut rngs = VehicleRngs::new(vehicles.len(), SimRng::new(42).next_seed());

        while sim.running() {
            let avg = sim.step().unwrap();

            let total: u64 = vehicles
                .iter_mut()
                .zip(rngs.inner.iter_mut())
                .map(|(v, rng)| u64::from(v.compute(&lane, rng)))
                .sum();
            for v in &mut vehicles {
                v.commit(&mut lane).unwrap();
            }

            assert_eq!(sim.vehicles(), vehicles.as_slice(), "diverged at {}", sim.step_count());
            assert_eq!(avg, total as f64 / vehicles.len() as f64);
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn pool_size_does_not_change_trajectory() {
        let single = trajectory(Some(1));
        assert_eq!(trajectory(Some(4)), single);
        assert_eq!(trajectory(None), single);
    }

    /// Rayon treats a zero-thread request as "pick the default".
    #[cfg(feature = "parallel")]
    #[test]
    fn zero_threads_builds_a_default_pool() {
        let sim = SimBuilder::new(dense_config(Some(0)), NoopObserver).build();
        assert!(sim.is_ok());
        assert_eq!(trajectory(Some(0)), trajectory(Some(1)));
    }

    #[test]
    fn repeated_runs_are_identical() {
        assert_eq!(trajectory(Some(4)), trajectory(Some(4)));
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn no_overlap_and_bounded_speed(
            width     in 1u32..40,
            fill      in 0.0f64..=1.0,
            max_speed in 1u32..7,
            seed      in any::<u64>(),
        ) {
            let vehicle_count = ((width as f64) * fill) as usize;
            let config = SimConfig {
                width,
                height: 1,
                vehicle_count,
                max_speed,
                seed,
                step_budget: 40,
                num_threads: Some(1),
            };
            let mut sim = SimBuilder::new(config, NoopObserver).build().unwrap();
            assert_consistent(&sim);
            while sim.running() {
                let avg = sim.step().unwrap();
                assert_consistent(&sim);
                prop_assert!(avg >= 0.0 && avg <= max_speed as f64);
            }
            prop_assert_eq!(sim.averages().len(), 40);
        }
    }
}
