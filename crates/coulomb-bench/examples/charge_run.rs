//! Demo driver: a 10x10 grid, one pre-seeded charge, 10,000 steps.
//!
//! Prints a charge summary every 500 steps from a hook, then the run
//! totals. Pass a step count as the first argument to override.

use coulomb_bench::{reference_profile, REFERENCE_THRESHOLD};
use coulomb_core::{ScalarField, StepIndex};
use coulomb_engine::{HookTarget, Simulator};

fn main() {
    println!("=== Coulomb Charge Run ===\n");

    let steps: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(10_000);

    let (grid, config) = reference_profile(42);
    println!(
        "grid {}, mobility {}, friction {}, threshold {REFERENCE_THRESHOLD}",
        grid.shape(),
        config.mobility,
        config.friction
    );
    let mut sim = Simulator::new(grid, config).unwrap();

    sim.attach_step_hook(
        |charge: &ScalarField, step: StepIndex| {
            if step.0 % 500 == 0 {
                let min = charge.as_slice().iter().copied().fold(f64::INFINITY, f64::min);
                println!(
                    "  step {step:>6}: total {:>10.4}, min cell {:>8.4}",
                    charge.sum(),
                    min
                );
            }
        },
        HookTarget::Charge,
    );

    let summary = sim.run(steps, REFERENCE_THRESHOLD).unwrap();

    println!("\nSteps:        {}", summary.steps);
    println!("Injections:   {}", summary.injections);
    println!("Final charge: {:.4}", summary.final_total_charge);
    println!("Last step:    {} us", sim.last_metrics().total_us);
}
