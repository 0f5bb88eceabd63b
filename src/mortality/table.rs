//! Survivorship table (lx curve)
//!
//! The table is built once from tabular data, validated, and immutable
//! afterwards. All downstream annuity math works from the survival
//! probability t_px = lx(x+t) / lx(x).

use crate::error::{PensionError, Result};

/// One tabulated point of the survivorship curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MortalityRecord {
    /// Exact age in years
    pub age: u32,
    /// Survivors to exact age out of the table's radix
    pub lx: f64,
}

/// Immutable survivorship table indexed by exact age
///
/// Ages are strictly increasing but need not be contiguous; lookups inside
/// a gap fail the same way as lookups past either end.
#[derive(Debug, Clone)]
pub struct MortalityTable {
    records: Vec<MortalityRecord>,
}

impl MortalityTable {
    /// Build a table from (age, lx) records, validating the survivorship
    /// invariants: ages strictly increasing, lx positive and non-increasing.
    ///
    /// Only the terminal age may carry lx = 0.
    pub fn from_records(records: Vec<MortalityRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(PensionError::DataFormat("table has no rows".into()));
        }

        for pair in records.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if next.age <= prev.age {
                return Err(PensionError::DataFormat(format!(
                    "ages not strictly increasing at age {}",
                    next.age
                )));
            }
            if next.lx > prev.lx {
                return Err(PensionError::DataFormat(format!(
                    "lx increases from {} to {} at age {}",
                    prev.lx, next.lx, next.age
                )));
            }
        }

        let last = records.len() - 1;
        for (i, rec) in records.iter().enumerate() {
            if !rec.lx.is_finite() || rec.lx < 0.0 || (rec.lx == 0.0 && i < last) {
                return Err(PensionError::DataFormat(format!(
                    "non-positive survivor count {} at age {}",
                    rec.lx, rec.age
                )));
            }
        }

        Ok(Self { records })
    }

    /// Lowest tabulated age
    pub fn min_age(&self) -> u32 {
        self.records[0].age
    }

    /// Highest tabulated age
    pub fn max_age(&self) -> u32 {
        self.records[self.records.len() - 1].age
    }

    /// Number of tabulated rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        false // from_records rejects empty tables
    }

    /// Survivors lx at an exact age; hard failure outside the table
    pub fn survivors_at(&self, age: u32) -> Result<f64> {
        self.lookup(age)
            .map(|rec| rec.lx)
            .ok_or(PensionError::OutOfRange {
                age,
                min: self.min_age(),
                max: self.max_age(),
            })
    }

    /// Whether the exact age is tabulated (gaps count as absent)
    pub fn contains_age(&self, age: u32) -> bool {
        self.lookup(age).is_some()
    }

    /// Survival probability t_px = lx(x+t) / lx(x)
    ///
    /// Defined only while both x and x+t are tabulated.
    pub fn survival_probability(&self, age: u32, t: u32) -> Result<f64> {
        let base = self.survivors_at(age)?;
        if base == 0.0 {
            // Only possible at the terminal age
            return Err(PensionError::DataFormat(format!(
                "zero survivor count at base age {}",
                age
            )));
        }
        let later = self.survivors_at(age + t)?;
        Ok(later / base)
    }

    fn lookup(&self, age: u32) -> Option<&MortalityRecord> {
        self.records
            .binary_search_by_key(&age, |rec| rec.age)
            .ok()
            .map(|idx| &self.records[idx])
    }
}
