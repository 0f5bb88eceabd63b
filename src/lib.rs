//! Pension Balance - actuarial analysis of pension-fund funding
//!
//! This library provides:
//! - Survivorship (lx) tables loaded from CSV, with a synthetic fallback
//! - Annuity factors: temporary, whole-life, joint-life, last-survivor,
//!   reversionary, with the Woolhouse monthly adjustment
//! - Salary/contribution projection and benefit present-value valuation
//! - Rate solving: recover an unknown economic assumption from a reported
//!   asset, liability, or deficit figure

pub mod annuity;
pub mod error;
pub mod funding;
pub mod mortality;
pub mod scenario;

// Re-export commonly used types
pub use error::{PensionError, Result};
pub use funding::{solve_for_rate, ProjectionSeries, ValuationResult};
pub use mortality::MortalityTable;
pub use scenario::{DeficitScenario, ScenarioRunner};
