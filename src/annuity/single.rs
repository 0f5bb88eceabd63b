//! Single-life annuity factors
//!
//! An annuity factor is the expected present value of a unit payment stream
//! paid annually in advance while the annuitant survives:
//! sum over t of v^t * t_px. All sums run in increasing-age order.

use log::warn;

use crate::error::{PensionError, Result};
use crate::mortality::MortalityTable;

/// Annual discount factor v = 1/(1+rate)
///
/// Zero and negative rates are valid (stress scenarios); only a rate of
/// exactly -100% leaves v undefined.
pub fn discount_factor(rate: f64) -> Result<f64> {
    if !rate.is_finite() || 1.0 + rate == 0.0 {
        return Err(PensionError::InvalidRate(rate));
    }
    Ok(1.0 / (1.0 + rate))
}

/// Temporary life annuity-due factor ä_x:n| = Σ_{t=0}^{n-1} v^t · t_px
///
/// Running past the table's terminal age (or into a gap) before `years`
/// terms are summed is a boundary condition, not a failure: the partial sum
/// is returned and a warning is logged. The starting age itself must be
/// tabulated.
pub fn temporary_annuity(table: &MortalityTable, age: u32, years: u32, rate: f64) -> Result<f64> {
    let v = discount_factor(rate)?;

    let base = table.survivors_at(age)?;
    if base == 0.0 {
        return Err(PensionError::DataFormat(format!(
            "zero survivor count at base age {}",
            age
        )));
    }

    let mut factor = 0.0;
    for t in 0..years {
        if !table.contains_age(age + t) {
            warn!(
                "annuity truncated at t={}: age {} beyond table coverage (max {})",
                t,
                age + t,
                table.max_age()
            );
            break;
        }
        let tpx = table.survivors_at(age + t)? / base;
        factor += v.powi(t as i32) * tpx;
    }

    Ok(factor)
}

/// Whole-life annuity-due factor ä_x: the temporary sum carried to the
/// table's terminal age
pub fn whole_life_annuity(table: &MortalityTable, age: u32, rate: f64) -> Result<f64> {
    if age > table.max_age() {
        return Err(PensionError::OutOfRange {
            age,
            min: table.min_age(),
            max: table.max_age(),
        });
    }
    temporary_annuity(table, age, table.max_age() - age + 1, rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mortality::{MortalityRecord, MortalityTable};
    use approx::assert_relative_eq;

    fn table(rows: &[(u32, f64)]) -> MortalityTable {
        MortalityTable::from_records(
            rows.iter()
                .map(|&(age, lx)| MortalityRecord { age, lx })
                .collect(),
        )
        .unwrap()
    }

    fn small_table() -> MortalityTable {
        table(&[(60, 1000.0), (61, 980.0), (62, 955.0), (63, 925.0)])
    }

    #[test]
    fn test_temporary_annuity_by_hand() {
        let t = small_table();
        let v: f64 = 1.0 / 1.05;
        let expected = 1.0 + v * 0.98 + v.powi(2) * 0.955;

        let factor = temporary_annuity(&t, 60, 3, 0.05).unwrap();
        assert_relative_eq!(factor, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_rate_whole_life() {
        // At 0% interest the whole-life factor is the expected number of
        // payment years: Σ t_px
        let t = small_table();
        let factor = whole_life_annuity(&t, 60, 0.0).unwrap();
        let expected = 1.0 + 0.98 + 0.955 + 0.925;
        assert_relative_eq!(factor, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_horizon_is_zero() {
        let t = small_table();
        assert_eq!(temporary_annuity(&t, 60, 0, 0.05).unwrap(), 0.0);
    }

    #[test]
    fn test_decreasing_in_rate() {
        let t = small_table();
        let low = temporary_annuity(&t, 60, 4, 0.02).unwrap();
        let mid = temporary_annuity(&t, 60, 4, 0.05).unwrap();
        let high = temporary_annuity(&t, 60, 4, 0.10).unwrap();
        assert!(low > mid && mid > high);
    }

    #[test]
    fn test_truncation_returns_partial_sum() {
        let t = small_table();
        // 10 requested years but only 4 tabulated: partial sum, not an error
        let truncated = temporary_annuity(&t, 60, 10, 0.05).unwrap();
        let full = temporary_annuity(&t, 60, 4, 0.05).unwrap();
        assert_relative_eq!(truncated, full, max_relative = 1e-12);
    }

    #[test]
    fn test_start_age_out_of_range() {
        let t = small_table();
        assert!(matches!(
            temporary_annuity(&t, 40, 5, 0.05),
            Err(PensionError::OutOfRange { age: 40, .. })
        ));
        assert!(whole_life_annuity(&t, 70, 0.05).is_err());
    }

    #[test]
    fn test_negative_rate_accepted() {
        let t = small_table();
        let factor = temporary_annuity(&t, 60, 3, -0.02).unwrap();
        // Negative rate discounts upwards
        assert!(factor > temporary_annuity(&t, 60, 3, 0.0).unwrap());
    }

    #[test]
    fn test_minus_one_hundred_percent_rejected() {
        let t = small_table();
        assert!(matches!(
            temporary_annuity(&t, 60, 3, -1.0),
            Err(PensionError::InvalidRate(_))
        ));
    }
}
