//! Integration test: non-finite charge values.
//!
//! Without sanitization a NaN spreads through the grid. With
//! `sanitize_non_finite` the simulator keeps every value finite.

use coulomb_engine::{HookTarget, SimConfig, Simulator};
use coulomb_test_utils::{grid_with_charges, RecordingHook};

#[test]
fn nan_spreads_without_sanitizing() {
    let grid = grid_with_charges(4, 4, &[((1, 1), f64::NAN)]);
    let mut sim = Simulator::new(grid, SimConfig::default()).unwrap();

    sim.run(2, 0.0).unwrap();

    let nan_cells = sim
        .grid()
        .values()
        .as_slice()
        .iter()
        .filter(|v| v.is_nan())
        .count();
    assert!(nan_cells > 1);
}

#[test]
fn sanitizing_keeps_grid_finite() {
    let grid = grid_with_charges(4, 4, &[((1, 1), f64::NAN), ((3, 3), -1.0)]);
    let config = SimConfig {
        sanitize_non_finite: true,
        ..SimConfig::default()
    };
    let mut sim = Simulator::new(grid, config).unwrap();

    sim.run(10, 0.5).unwrap();

    assert!(sim.grid().values().as_slice().iter().all(|v| v.is_finite()));
    assert!(sim.last_metrics().total_charge.is_finite());
}

#[test]
fn sanitizing_keeps_field_finite() {
    let grid = grid_with_charges(4, 4, &[((1, 1), f64::NAN), ((2, 3), f64::INFINITY)]);
    let config = SimConfig {
        sanitize_non_finite: true,
        ..SimConfig::default()
    };
    let mut sim = Simulator::new(grid, config).unwrap();
    assert!(sim.field().as_slice().iter().all(|v| v.is_finite()));

    let hook = RecordingHook::new();
    sim.attach_step_hook(hook.recorder(), HookTarget::Field);
    sim.run(10, 0.0).unwrap();

    for record in hook.records() {
        assert!(
            record.values.as_slice().iter().all(|v| v.is_finite()),
            "field not finite at step {}",
            record.step
        );
    }
    assert!(sim.field().as_slice().iter().all(|v| v.is_finite()));
}
