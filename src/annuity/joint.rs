//! Joint-life, last-survivor, and reversionary annuity factors
//!
//! Two lives on (possibly different) tables. Discounting uses the real rate
//! (1+g)/(1+i) so indexed benefits fall out of the same summation. The sum
//! runs over the shorter of the two tables' remaining ranges.

use crate::error::{PensionError, Result};
use crate::mortality::MortalityTable;

/// Annuity payable while both lives survive:
/// Σ f^t · t_px_a · t_px_b with f = (1+benefit_growth)/(1+rate)
pub fn joint_life_annuity(
    table_a: &MortalityTable,
    age_a: u32,
    table_b: &MortalityTable,
    age_b: u32,
    rate: f64,
    benefit_growth: f64,
) -> Result<f64> {
    two_life_sum(table_a, age_a, table_b, age_b, rate, benefit_growth, |pa, pb| pa * pb)
}

/// Annuity payable while at least one life survives (inclusion-exclusion):
/// Σ f^t · (t_px_a + t_px_b − t_px_a·t_px_b)
pub fn last_survivor_annuity(
    table_a: &MortalityTable,
    age_a: u32,
    table_b: &MortalityTable,
    age_b: u32,
    rate: f64,
    benefit_growth: f64,
) -> Result<f64> {
    two_life_sum(table_a, age_a, table_b, age_b, rate, benefit_growth, |pa, pb| {
        pa + pb - pa * pb
    })
}

/// Reversionary combination: the participant's own-life annuity plus a
/// fractional continuation to the survivor, ä_x + pct·(ä_y − ä_xy).
///
/// Pure arithmetic over already-computed factors; no mortality lookup.
pub fn reversionary_annuity(ax: f64, ay: f64, axy: f64, survivor_fraction: f64) -> f64 {
    ax + survivor_fraction * (ay - axy)
}

fn two_life_sum(
    table_a: &MortalityTable,
    age_a: u32,
    table_b: &MortalityTable,
    age_b: u32,
    rate: f64,
    benefit_growth: f64,
    combine: impl Fn(f64, f64) -> f64,
) -> Result<f64> {
    if !rate.is_finite() || 1.0 + rate == 0.0 {
        return Err(PensionError::InvalidRate(rate));
    }
    let f = (1.0 + benefit_growth) / (1.0 + rate);

    let base_a = table_a.survivors_at(age_a)?;
    let base_b = table_b.survivors_at(age_b)?;
    if base_a == 0.0 || base_b == 0.0 {
        return Err(PensionError::DataFormat(
            "zero survivor count at a base age".into(),
        ));
    }

    let mut factor = 0.0;
    let mut t = 0;
    while table_a.contains_age(age_a + t) && table_b.contains_age(age_b + t) {
        let pa = table_a.survivors_at(age_a + t)? / base_a;
        let pb = table_b.survivors_at(age_b + t)? / base_b;
        factor += f.powi(t as i32) * combine(pa, pb);
        t += 1;
    }

    Ok(factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annuity::whole_life_annuity;
    use crate::mortality::default_synthetic_table;
    use approx::assert_relative_eq;

    #[test]
    fn test_last_survivor_dominates_joint() {
        let table = default_synthetic_table();
        for &(age_a, age_b) in &[(56, 51), (60, 60), (70, 55)] {
            let joint = joint_life_annuity(&table, age_a, &table, age_b, 0.05, 0.0).unwrap();
            let last = last_survivor_annuity(&table, age_a, &table, age_b, 0.05, 0.0).unwrap();
            assert!(last >= joint, "ages ({}, {})", age_a, age_b);
        }
    }

    #[test]
    fn test_inclusion_exclusion_identity() {
        // joint + last survivor = ä_x + ä_y over a shared horizon
        let table = default_synthetic_table();
        let ax = whole_life_annuity(&table, 56, 0.05).unwrap();
        let ay = whole_life_annuity(&table, 51, 0.05).unwrap();
        let joint = joint_life_annuity(&table, 56, &table, 51, 0.05, 0.0).unwrap();
        let last = last_survivor_annuity(&table, 56, &table, 51, 0.05, 0.0).unwrap();

        // The two-life sums stop at the shorter remaining range (age 56
        // reaches the terminal age first), so compare against single-life
        // factors truncated to the same horizon.
        let horizon = table.max_age() - 56 + 1;
        let ax_trunc = crate::annuity::temporary_annuity(&table, 56, horizon, 0.05).unwrap();
        let ay_trunc = crate::annuity::temporary_annuity(&table, 51, horizon, 0.05).unwrap();
        assert_relative_eq!(joint + last, ax_trunc + ay_trunc, max_relative = 1e-10);

        // And the untruncated single-life factors bound them from above
        assert!(ax >= ax_trunc && ay >= ay_trunc);
    }

    #[test]
    fn test_benefit_growth_raises_factor() {
        let table = default_synthetic_table();
        let flat = joint_life_annuity(&table, 56, &table, 51, 0.057, 0.0).unwrap();
        let indexed = joint_life_annuity(&table, 56, &table, 51, 0.057, 0.02).unwrap();
        assert!(indexed > flat);
    }

    #[test]
    fn test_reversionary_composition() {
        let (ax, ay, axy) = (12.0, 14.5, 10.25);
        let factor = reversionary_annuity(ax, ay, axy, 0.5);
        assert_relative_eq!(factor, 12.0 + 0.5 * (14.5 - 10.25), max_relative = 1e-15);

        // Zero reversion leaves the own-life factor untouched
        assert_relative_eq!(reversionary_annuity(ax, ay, axy, 0.0), ax, max_relative = 1e-15);
    }

    #[test]
    fn test_invalid_rate() {
        let table = default_synthetic_table();
        assert!(matches!(
            joint_life_annuity(&table, 56, &table, 51, -1.0, 0.0),
            Err(PensionError::InvalidRate(_))
        ));
    }
}
