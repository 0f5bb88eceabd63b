//! Typed errors for the actuarial core
//!
//! Every failure is surfaced to the immediate caller as a variant here;
//! the core never substitutes a default value or propagates NaN silently.

use thiserror::Error;

/// Errors raised by table loading, annuity valuation, and rate solving
#[derive(Debug, Error)]
pub enum PensionError {
    /// Mortality source exists but is missing required fields or has
    /// non-numeric values
    #[error("malformed mortality data: {0}")]
    DataFormat(String),

    /// Mortality source does not exist
    #[error("mortality source not found: {0}")]
    NotFound(String),

    /// An age falls outside the table's coverage on a direct point lookup
    #[error("age {age} outside table range {min}..={max}")]
    OutOfRange { age: u32, min: u32, max: u32 },

    /// A rate for which the discount factor 1/(1+rate) is undefined
    #[error("rate {0} makes the discount factor undefined")]
    InvalidRate(f64),

    /// The root-finder's target is unreachable within the supplied bracket
    #[error("no solution for target {target} in [{lower}, {upper}]: value function does not change sign")]
    NoSolution { target: f64, lower: f64, upper: f64 },
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, PensionError>;
