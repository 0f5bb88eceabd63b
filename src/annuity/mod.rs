//! Annuity factor engine
//!
//! Converts a mortality table, age(s), a discount rate, and a payment
//! horizon into present-value annuity factors, with the Woolhouse monthly
//! adjustment for benefits paid twelve times a year.

mod single;
mod joint;

pub use single::{discount_factor, temporary_annuity, whole_life_annuity};
pub use joint::{joint_life_annuity, last_survivor_annuity, reversionary_annuity};

/// Woolhouse second-order adjustment for monthly payment
pub const WOOLHOUSE_MONTHLY_ADJUSTMENT: f64 = 11.0 / 24.0;

/// Approximate a monthly-paid annuity factor from an annually-paid one:
/// ä_x^(12) ≈ ä_x − 11/24.
///
/// Apply once, after the annual factor is fully assembled; the adjustment is
/// a constant, not a per-term correction.
pub fn monthly_correction(annual_factor: f64) -> f64 {
    annual_factor - WOOLHOUSE_MONTHLY_ADJUSTMENT
}
