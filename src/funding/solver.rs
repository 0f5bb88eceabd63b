//! Rate solving by bisection
//!
//! Inverts a monotone valuation function: given a target asset or liability
//! figure, find the rate that reproduces it. The caller picks bounds
//! consistent with the function's monotonicity (liability falls as the
//! discount rate rises; assets rise with the investment return).

use crate::error::{PensionError, Result};

const RATE_TOLERANCE: f64 = 1e-12;
const MAX_ITERATIONS: u32 = 200;

/// Find `rate` in [lower_bound, upper_bound] with value_fn(rate) == target.
///
/// Fails with `NoSolution` when the value function does not change sign
/// across the bracket; the caller must report that, never substitute a
/// default guess.
pub fn solve_for_rate<F>(
    target_value: f64,
    mut value_fn: F,
    lower_bound: f64,
    upper_bound: f64,
) -> Result<f64>
where
    F: FnMut(f64) -> Result<f64>,
{
    let no_solution = || PensionError::NoSolution {
        target: target_value,
        lower: lower_bound,
        upper: upper_bound,
    };

    if !(lower_bound < upper_bound) {
        return Err(no_solution());
    }

    let mut low = lower_bound;
    let mut high = upper_bound;
    let mut f_low = value_fn(low)? - target_value;
    let f_high = value_fn(high)? - target_value;

    if f_low == 0.0 {
        return Ok(low);
    }
    if f_high == 0.0 {
        return Ok(high);
    }
    if f_low * f_high > 0.0 {
        return Err(no_solution());
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let f_mid = value_fn(mid)? - target_value;

        if f_mid == 0.0 || (high - low) / 2.0 < RATE_TOLERANCE {
            return Ok(mid);
        }

        if f_mid * f_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            f_low = f_mid;
        }
    }

    Ok((low + high) / 2.0)
}
