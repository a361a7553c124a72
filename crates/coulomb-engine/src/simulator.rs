//! The step loop: field solve, transport, stochastic injection, hooks.
//!
//! [`Simulator`] is the primary user-facing API. It owns the charge
//! [`Grid`], both solvers, the random source, and the ordered list of hook
//! registrations. Each step runs:
//!
//! 1. field solve on the current grid
//! 2. transport under that field
//! 3. draw `u` in `[0, 1)`; if `u < charge_threshold`, inject one unit of
//!    negative charge at a uniformly random cell
//! 4. every hook, in registration order, with its chosen snapshot
//!
//! The random draw in step 3 happens on every step regardless of the
//! threshold, so the random stream depends only on the step count.

use std::error::Error;
use std::fmt;
use std::time::Instant;

use coulomb_core::{GridError, ScalarField, StepIndex};
use coulomb_solvers::{FieldSolver, TransportSolver};
use coulomb_space::Grid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{ConfigError, SimConfig};
use crate::hook::{HookRegistration, HookTarget, StepHook};
use crate::metrics::StepMetrics;

// ── StepError ──────────────────────────────────────────────────────

/// Errors from a simulation step.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// A solver rejected the grid or field.
    Grid(GridError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
        }
    }
}

impl From<GridError> for StepError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ── RunSummary ─────────────────────────────────────────────────────

/// Outcome of a [`Simulator::run`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Steps executed.
    pub steps: usize,
    /// Steps on which a charge was injected.
    pub injections: usize,
    /// Grid total charge after the last step.
    pub final_total_charge: f64,
}

// ── Simulator ──────────────────────────────────────────────────────

/// Owns a charge grid and advances it step by step.
///
/// Generic over the random source so tests can inject any seeded
/// generator; [`new()`](Simulator::new) uses a `ChaCha8Rng` seeded from
/// [`SimConfig::seed`].
///
/// # Example
///
/// ```
/// use coulomb_core::{ScalarField, StepIndex};
/// use coulomb_engine::{HookTarget, SimConfig, Simulator};
/// use coulomb_space::Grid;
///
/// let grid = Grid::from_shape(10, 10).unwrap();
/// let mut sim = Simulator::new(grid, SimConfig::default()).unwrap();
///
/// sim.attach_step_hook(
///     |charge: &ScalarField, step: StepIndex| println!("{step}: {:.3}", charge.sum()),
///     HookTarget::Charge,
/// );
///
/// let summary = sim.run(20, 0.5).unwrap();
/// assert_eq!(summary.steps, 20);
/// assert_eq!(sim.steps_taken(), 20);
/// ```
pub struct Simulator<R = ChaCha8Rng> {
    grid: Grid,
    field: FieldSolver,
    transport: TransportSolver,
    hooks: Vec<HookRegistration>,
    rng: R,
    config: SimConfig,
    steps_taken: u64,
    last_metrics: StepMetrics,
}

impl Simulator<ChaCha8Rng> {
    /// Validate `config` and build a simulator over `grid`, seeding a
    /// `ChaCha8Rng` from `config.seed`.
    ///
    /// The field solver runs once during construction.
    pub fn new(grid: Grid, config: SimConfig) -> Result<Self, ConfigError> {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(grid, config, rng)
    }
}

impl<R: Rng> Simulator<R> {
    /// Like [`new()`](Simulator::new) but with a caller-supplied random
    /// source. `config.seed` is ignored.
    pub fn with_rng(grid: Grid, config: SimConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let field = FieldSolver::builder()
            .permittivity(config.permittivity)
            .policy(config.field_policy)
            .sanitize_non_finite(config.sanitize_non_finite)
            .build_for(&grid)
            .map_err(|reason| ConfigError::InvalidSolver { reason })?;
        let transport = TransportSolver::builder()
            .mobility(config.mobility)
            .friction(config.friction)
            .sanitize_non_finite(config.sanitize_non_finite)
            .build()
            .map_err(|reason| ConfigError::InvalidSolver { reason })?;

        log::debug!(
            "simulator ready: grid {}, mobility {}, friction {}, policy {:?}",
            grid.shape(),
            config.mobility,
            config.friction,
            config.field_policy
        );

        Ok(Self {
            grid,
            field,
            transport,
            hooks: Vec::new(),
            rng,
            config,
            steps_taken: 0,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Register an observer. Hooks are called in registration order.
    pub fn attach_step_hook<H>(&mut self, hook: H, target: HookTarget)
    where
        H: StepHook + 'static,
    {
        self.hooks.push(HookRegistration {
            hook: Box::new(hook),
            target,
        });
    }

    /// Execute `steps` sequential steps.
    ///
    /// Hooks see step indices `0..steps` for this call, whatever ran
    /// before. A `charge_threshold` of 0 (or NaN) disables injection; 1 or
    /// more injects every step.
    ///
    /// # Errors
    ///
    /// Returns the first [`StepError`]; steps completed before it remain
    /// applied.
    pub fn run(&mut self, steps: usize, charge_threshold: f64) -> Result<RunSummary, StepError> {
        let mut injections = 0;
        for i in 0..steps {
            let metrics = self.advance(charge_threshold, StepIndex(i as u64))?;
            if metrics.injected_at.is_some() {
                injections += 1;
            }
        }
        Ok(RunSummary {
            steps,
            injections,
            final_total_charge: self.grid.total_charge(),
        })
    }

    /// Execute a single step. Hooks see the lifetime step counter as the
    /// index, so repeated calls produce increasing indices.
    pub fn step(&mut self, charge_threshold: f64) -> Result<&StepMetrics, StepError> {
        let index = StepIndex(self.steps_taken);
        self.advance(charge_threshold, index)?;
        Ok(&self.last_metrics)
    }

    fn advance(&mut self, charge_threshold: f64, index: StepIndex) -> Result<&StepMetrics, StepError> {
        let step_start = Instant::now();

        let field_start = Instant::now();
        self.field.calculate_field(&self.grid)?;
        let field_us = field_start.elapsed().as_micros() as u64;

        let transport_start = Instant::now();
        let report = self
            .transport
            .calculate_charge(&mut self.grid, self.field.field())?;
        let transport_us = transport_start.elapsed().as_micros() as u64;

        let u: f64 = self.rng.random();
        let injected_at = if u < charge_threshold {
            let cell = self.grid.place_charge(&mut self.rng);
            log::debug!("step {index}: injected charge at {cell}");
            Some(cell)
        } else {
            None
        };

        for reg in &mut self.hooks {
            let snapshot: &ScalarField = match reg.target {
                HookTarget::Charge => self.grid.values(),
                HookTarget::Field => self.field.field(),
            };
            reg.hook.on_step(snapshot, index);
        }

        self.steps_taken += 1;
        self.last_metrics = StepMetrics {
            total_us: step_start.elapsed().as_micros() as u64,
            field_us,
            transport_us,
            injected_at,
            total_charge: self.grid.total_charge(),
            drift: report.drift,
            friction_loss: report.friction_loss,
            boundary_leakage: report.boundary_leakage,
        };
        log::trace!(
            "step {index}: total charge {:.6}, {} us",
            self.last_metrics.total_charge,
            self.last_metrics.total_us
        );
        Ok(&self.last_metrics)
    }

    /// The current charge grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The current field array.
    pub fn field(&self) -> &ScalarField {
        self.field.field()
    }

    /// The validated configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Steps executed over this simulator's lifetime.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Metrics of the most recent step (all zero before the first).
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Number of registered hooks.
    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Consume the simulator and return its grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}
