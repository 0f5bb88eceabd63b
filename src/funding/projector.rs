//! Salary, contribution, and liability projection
//!
//! Asset side: monthly contributions on a geometrically growing wage,
//! each year's contribution compounded forward to the funding date.
//! Liability side: career-average wage benefit formula discounted through
//! an annuity factor supplied by the caller.

use serde::Serialize;

/// One year of the accumulation horizon
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProjectionPeriod {
    /// Year index, 0-based
    pub period: u32,
    /// Monthly wage in force during this year
    pub wage: f64,
    /// Annual contribution (wage × 12 × contribution rate)
    pub contribution: f64,
    /// Running accumulated asset, valued at the funding date
    pub accumulated_asset: f64,
}

/// Per-period projection output; one record per year of service
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionSeries {
    periods: Vec<ProjectionPeriod>,
}

impl ProjectionSeries {
    /// All per-period records in order
    pub fn periods(&self) -> &[ProjectionPeriod] {
        &self.periods
    }

    /// Accumulated asset at the funding date; zero for an empty horizon
    pub fn final_asset(&self) -> f64 {
        self.periods.last().map_or(0.0, |p| p.accumulated_asset)
    }

    /// Monthly wage in the final year of service
    pub fn final_wage(&self) -> f64 {
        self.periods.last().map_or(0.0, |p| p.wage)
    }

    /// Arithmetic mean of the per-period monthly wages
    pub fn mean_wage(&self) -> f64 {
        if self.periods.is_empty() {
            return 0.0;
        }
        let total: f64 = self.periods.iter().map(|p| p.wage).sum();
        total / self.periods.len() as f64
    }
}

/// Valuation snapshot: accumulated asset against present-value liability
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ValuationResult {
    pub total_asset: f64,
    pub total_liability: f64,
    /// Surplus when positive, deficit when negative
    pub gap: f64,
    /// Asset over liability; `None` when the liability is zero
    pub funding_ratio: Option<f64>,
}

impl ValuationResult {
    pub fn new(total_asset: f64, total_liability: f64) -> Self {
        let funding_ratio = if total_liability != 0.0 {
            Some(total_asset / total_liability)
        } else {
            None
        };
        Self {
            total_asset,
            total_liability,
            gap: total_asset - total_liability,
            funding_ratio,
        }
    }

    pub fn is_funded(&self) -> bool {
        self.gap >= 0.0
    }
}

/// Project the contribution accumulation over `years` of service.
///
/// For year t the monthly wage is start_wage·(1+salary_growth)^t, the annual
/// contribution is wage·12·contribution_rate, and the contribution compounds
/// at invest_return for the years-1-t remaining periods.
pub fn project_assets(
    start_wage: f64,
    years: u32,
    salary_growth: f64,
    contribution_rate: f64,
    invest_return: f64,
) -> ProjectionSeries {
    let mut periods = Vec::with_capacity(years as usize);
    let mut wage = start_wage;
    let mut accumulated = 0.0;

    for t in 0..years {
        let contribution = wage * 12.0 * contribution_rate;
        let remaining = years - 1 - t;
        accumulated += contribution * (1.0 + invest_return).powi(remaining as i32);

        periods.push(ProjectionPeriod {
            period: t,
            wage,
            contribution,
            accumulated_asset: accumulated,
        });

        wage *= 1.0 + salary_growth;
    }

    ProjectionSeries { periods }
}

/// Career-average monthly wage over the horizon, closed form.
///
/// Geometric series: start_wage·(r^n − 1)/((r − 1)·n) with r = 1+growth;
/// agrees with the arithmetic mean of the projected series to within float
/// tolerance.
pub fn average_wage(start_wage: f64, years: u32, salary_growth: f64) -> f64 {
    if years == 0 || salary_growth == 0.0 {
        return start_wage;
    }
    let r = 1.0 + salary_growth;
    start_wage * (r.powi(years as i32) - 1.0) / ((r - 1.0) * years as f64)
}

/// Present value of the promised benefit stream.
///
/// Annual benefit = benefit_rate × years × career-average wage × 12,
/// discounted through the supplied annuity factor.
pub fn project_liability(
    start_wage: f64,
    years: u32,
    salary_growth: f64,
    benefit_rate: f64,
    annuity_factor: f64,
) -> f64 {
    let avg_wage = average_wage(start_wage, years, salary_growth);
    let annual_benefit = benefit_rate * years as f64 * avg_wage * 12.0;
    annual_benefit * annuity_factor
}
