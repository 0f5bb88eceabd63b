//! Synthetic fallback mortality table
//!
//! Gompertz-law approximation used when real TMI data is unavailable and the
//! caller explicitly opts into an exploratory run.

use crate::mortality::{MortalityRecord, MortalityTable};

/// Starting population of the synthetic table
pub const SYNTHETIC_RADIX: f64 = 100_000.0;

/// Build a synthetic survivorship table under Gompertz mortality,
/// qx = coefficient * e^(slope * age), capped at 1.
///
/// Construction cannot violate the table invariants: lx is a running
/// product of (1 - qx) factors from a positive radix.
pub fn gompertz_table(max_age: u32, coefficient: f64, slope: f64) -> MortalityTable {
    let mut records = Vec::with_capacity(max_age as usize + 1);
    let mut lx = SYNTHETIC_RADIX;

    for age in 0..=max_age {
        records.push(MortalityRecord { age, lx });
        let qx = (coefficient * (slope * age as f64).exp()).min(1.0);
        lx *= 1.0 - qx;
    }

    MortalityTable::from_records(records).expect("gompertz construction preserves invariants")
}

/// Synthetic stand-in for the TMI tables: ages 0..=111 with the calibration
/// used by the exploratory dashboards
pub fn default_synthetic_table() -> MortalityTable {
    gompertz_table(111, 0.0001, 0.09)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_shape() {
        let table = default_synthetic_table();
        assert_eq!(table.min_age(), 0);
        assert_eq!(table.max_age(), 111);
        assert!((table.survivors_at(0).unwrap() - SYNTHETIC_RADIX).abs() < 1e-9);
    }

    #[test]
    fn test_lx_monotone() {
        let table = default_synthetic_table();
        for age in 0..table.max_age() {
            assert!(table.survivors_at(age).unwrap() >= table.survivors_at(age + 1).unwrap());
        }
    }

    #[test]
    fn test_old_age_attrition() {
        let table = default_synthetic_table();
        // By age 111 under this calibration nearly everyone has died
        let survivors = table.survivors_at(111).unwrap();
        assert!(survivors < SYNTHETIC_RADIX * 0.01, "lx(111) = {}", survivors);
    }
}
