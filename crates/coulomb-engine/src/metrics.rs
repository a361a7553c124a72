//! Per-step metrics for the simulator.
//!
//! [`StepMetrics`] captures timing and charge accounting for a single
//! step. The simulator overwrites it after every step; read it back via
//! [`Simulator::last_metrics`](crate::Simulator::last_metrics).

use coulomb_core::CellIndex;

/// Timing and charge accounting collected during a single step.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, including hooks.
    pub total_us: u64,
    /// Time spent in the field solve.
    pub field_us: u64,
    /// Time spent in the transport step.
    pub transport_us: u64,
    /// Cell that received an injected charge this step, if any.
    pub injected_at: Option<CellIndex>,
    /// Grid total charge after transport and injection.
    pub total_charge: f64,
    /// Summed drift flux of the transport step.
    pub drift: f64,
    /// Summed frictional loss of the transport step.
    pub friction_loss: f64,
    /// Charge removed at the open boundary.
    pub boundary_leakage: f64,
}
