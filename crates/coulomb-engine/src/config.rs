//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] is the input for constructing a
//! [`Simulator`](crate::Simulator). [`validate()`](SimConfig::validate)
//! checks every numeric parameter before any solver is built.

use std::error::Error;
use std::fmt;

use coulomb_solvers::{FieldPolicy, DEFAULT_PERMITTIVITY};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A numeric parameter is out of range.
    InvalidParameter {
        /// Name of the offending field.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Which constraint was violated.
        reason: &'static str,
    },
    /// A solver builder rejected the configuration.
    InvalidSolver {
        /// The builder's explanation.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                name,
                value,
                reason,
            } => write!(f, "{name} = {value}: {reason}"),
            Self::InvalidSolver { reason } => write!(f, "invalid solver: {reason}"),
        }
    }
}

impl Error for ConfigError {}

// ── SimConfig ──────────────────────────────────────────────────────

/// Physical and runtime parameters of a simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Mobility `mu` of the transport step. Default: 0.5.
    pub mobility: f64,
    /// Friction coefficient of the transport step. Default: 0.01.
    pub friction: f64,
    /// Permittivity of the field stencil. Default: 2.0.
    pub permittivity: f64,
    /// Whether the field is cleared between solves. Default: `Accumulate`.
    pub field_policy: FieldPolicy,
    /// Neutralise NaN and infinite values during transport. Default: false.
    pub sanitize_non_finite: bool,
    /// Seed for the default `ChaCha8Rng`. Ignored by
    /// [`Simulator::with_rng`](crate::Simulator::with_rng). Default: 0.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            mobility: 0.5,
            friction: 0.01,
            permittivity: DEFAULT_PERMITTIVITY,
            field_policy: FieldPolicy::Accumulate,
            sanitize_non_finite: false,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Check all numeric parameters.
    ///
    /// Returns the first violation found, in field declaration order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("mobility", self.mobility)?;
        non_negative("friction", self.friction)?;
        if !self.permittivity.is_finite() || self.permittivity <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "permittivity",
                value: self.permittivity,
                reason: "must be finite and > 0",
            });
        }
        Ok(())
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidParameter {
            name,
            value,
            reason: "must be finite and >= 0",
        });
    }
    Ok(())
}
