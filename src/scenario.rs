//! Scenario runner for deficit simulations and assumption solving
//!
//! Pre-loads the participant and survivor mortality tables once, then runs
//! many asset-vs-liability valuations with different economic configurations
//! without re-reading CSV files. Also inverts the valuation: implied salary
//! growth and investment return from reported asset/liability figures,
//! required contribution for a promised accrual, and the investment return
//! needed to break even.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::annuity::{
    joint_life_annuity, monthly_correction, reversionary_annuity, temporary_annuity,
    whole_life_annuity,
};
use crate::error::{PensionError, Result};
use crate::funding::{
    average_wage, project_assets, project_liability, solve_for_rate, ValuationResult,
};
use crate::mortality::{default_synthetic_table, load_table, MortalityTable};

/// Search bracket for implied salary growth
pub const SALARY_GROWTH_BRACKET: (f64, f64) = (0.0, 0.15);

/// Search bracket for implied investment return
pub const INVEST_RETURN_BRACKET: (f64, f64) = (0.0, 0.20);

/// One valuation configuration: participant profile plus economic assumptions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeficitScenario {
    /// Monthly wage in the first year of service
    pub start_wage: f64,
    pub years_of_service: u32,
    /// Annual salary increase rate
    pub salary_growth: f64,
    /// Annual return earned on accumulated contributions
    pub invest_return: f64,
    /// Technical rate used to discount the benefit stream
    pub discount_rate: f64,
    /// Contribution as a fraction of salary
    pub contribution_rate: f64,
    /// Benefit accrual per year of service, as a fraction of average wage
    pub accrual_rate: f64,
    /// Annual benefit indexation after retirement
    pub benefit_indexation: f64,
    /// Participant's age at retirement
    pub retirement_age: u32,
    /// Survivor's age when the participant retires
    pub survivor_age: u32,
    /// Fraction of the pension continuing to the survivor
    pub survivor_fraction: f64,
    /// Pin an externally calibrated annuity factor instead of computing one
    /// from the tables
    pub annuity_override: Option<f64>,
}

impl Default for DeficitScenario {
    /// Calibration reproducing the reported deficit case: wage 2.5M over 32
    /// years, 7.87% salary growth against a 6.53% return, 3% contribution
    /// for a 1% accrual
    fn default() -> Self {
        Self {
            start_wage: 2_500_000.0,
            years_of_service: 32,
            salary_growth: 0.0787,
            invest_return: 0.0653,
            discount_rate: 0.057,
            contribution_rate: 0.03,
            accrual_rate: 0.01,
            benefit_indexation: 0.0,
            retirement_age: 56,
            survivor_age: 51,
            survivor_fraction: 0.5,
            annuity_override: None,
        }
    }
}

/// Full output of one deficit simulation
#[derive(Debug, Clone, Serialize)]
pub struct DeficitOutcome {
    pub start_wage: f64,
    pub final_wage: f64,
    pub average_wage: f64,
    pub years_of_service: u32,
    /// Monthly benefit from the accrual formula
    pub monthly_benefit: f64,
    /// Annuity basis used to value the liability
    pub annuity_factor: f64,
    pub valuation: ValuationResult,
}

/// Economic assumptions recovered from reported asset/liability figures
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ImpliedAssumptions {
    pub salary_growth: f64,
    pub invest_return: f64,
    /// Discount basis the solve was conditioned on
    pub discount_rate: f64,
    /// invest_return − salary_growth; negative spread means contributions
    /// lose ground to the wage base they fund
    pub spread: f64,
}

/// Conversion of an accumulated fund into lifetime income
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReplacementOutcome {
    /// Whole-life annuity factor at retirement, monthly corrected
    pub annuity_factor: f64,
    pub monthly_benefit: f64,
    /// Monthly benefit over final monthly wage
    pub replacement_ratio: f64,
}

/// Pre-loaded runner; every calculation is a pure function of its scenario
/// and the immutable tables
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    participant: MortalityTable,
    survivor: MortalityTable,
}

impl ScenarioRunner {
    /// Create a runner with pre-built tables
    pub fn new(participant: MortalityTable, survivor: MortalityTable) -> Self {
        Self { participant, survivor }
    }

    /// Load participant and survivor tables from CSV files
    pub fn from_csv_paths<P: AsRef<std::path::Path>>(participant: P, survivor: P) -> Result<Self> {
        Ok(Self {
            participant: load_table(participant)?,
            survivor: load_table(survivor)?,
        })
    }

    /// Synthetic Gompertz tables for exploratory runs without TMI data
    pub fn synthetic() -> Self {
        let table = default_synthetic_table();
        Self::new(table.clone(), table)
    }

    pub fn participant_table(&self) -> &MortalityTable {
        &self.participant
    }

    pub fn survivor_table(&self) -> &MortalityTable {
        &self.survivor
    }

    /// Annuity basis valuing one unit of annual benefit from retirement:
    /// (ä_x − 11/24) + fraction·(ä_y − ä_xy), participant on the first
    /// table, survivor on the second.
    ///
    /// The Woolhouse adjustment is applied once to the own-life term; the
    /// reversionary excess is left unadjusted since the corrections cancel.
    /// All three factors are summed over the shorter of the two remaining
    /// ranges so the decomposition stays internally consistent.
    pub fn annuity_basis(&self, scenario: &DeficitScenario) -> Result<f64> {
        if let Some(factor) = scenario.annuity_override {
            return Ok(factor);
        }

        let age_x = scenario.retirement_age;
        let age_y = scenario.survivor_age;
        let real = real_rate(scenario.discount_rate, scenario.benefit_indexation)?;

        let horizon_x = self.participant.max_age().saturating_sub(age_x) + 1;
        let horizon_y = self.survivor.max_age().saturating_sub(age_y) + 1;
        let horizon = horizon_x.min(horizon_y);

        let ax = temporary_annuity(&self.participant, age_x, horizon, real)?;
        let ay = temporary_annuity(&self.survivor, age_y, horizon, real)?;
        let axy = joint_life_annuity(
            &self.participant,
            age_x,
            &self.survivor,
            age_y,
            scenario.discount_rate,
            scenario.benefit_indexation,
        )?;

        Ok(reversionary_annuity(
            monthly_correction(ax),
            ay,
            axy,
            scenario.survivor_fraction,
        ))
    }

    /// Run one asset-vs-liability valuation
    pub fn simulate(&self, scenario: &DeficitScenario) -> Result<DeficitOutcome> {
        let series = project_assets(
            scenario.start_wage,
            scenario.years_of_service,
            scenario.salary_growth,
            scenario.contribution_rate,
            scenario.invest_return,
        );

        let annuity_factor = self.annuity_basis(scenario)?;
        let liability = project_liability(
            scenario.start_wage,
            scenario.years_of_service,
            scenario.salary_growth,
            scenario.accrual_rate,
            annuity_factor,
        );

        let avg_wage = average_wage(
            scenario.start_wage,
            scenario.years_of_service,
            scenario.salary_growth,
        );

        Ok(DeficitOutcome {
            start_wage: scenario.start_wage,
            final_wage: series.final_wage(),
            average_wage: avg_wage,
            years_of_service: scenario.years_of_service,
            monthly_benefit: scenario.accrual_rate * scenario.years_of_service as f64 * avg_wage,
            annuity_factor,
            valuation: ValuationResult::new(series.final_asset(), liability),
        })
    }

    /// Run many scenarios in parallel; tables are shared read-only
    pub fn run_batch(&self, scenarios: &[DeficitScenario]) -> Vec<Result<DeficitOutcome>> {
        scenarios.par_iter().map(|s| self.simulate(s)).collect()
    }

    /// Recover the economic assumptions behind reported asset/liability
    /// figures.
    ///
    /// Two-phase solve: first the salary growth that reproduces the
    /// liability at the scenario's discount basis (the annuity basis does
    /// not depend on salary growth), then the investment return that
    /// reproduces the asset given that growth.
    pub fn solve_implied_assumptions(
        &self,
        target_asset: f64,
        target_liability: f64,
        base: &DeficitScenario,
    ) -> Result<ImpliedAssumptions> {
        let annuity_factor = self.annuity_basis(base)?;

        let (growth_lo, growth_hi) = SALARY_GROWTH_BRACKET;
        let salary_growth = solve_for_rate(
            target_liability,
            |growth| {
                Ok(project_liability(
                    base.start_wage,
                    base.years_of_service,
                    growth,
                    base.accrual_rate,
                    annuity_factor,
                ))
            },
            growth_lo,
            growth_hi,
        )?;

        let (ret_lo, ret_hi) = INVEST_RETURN_BRACKET;
        let invest_return = solve_for_rate(
            target_asset,
            |rate| {
                Ok(project_assets(
                    base.start_wage,
                    base.years_of_service,
                    salary_growth,
                    base.contribution_rate,
                    rate,
                )
                .final_asset())
            },
            ret_lo,
            ret_hi,
        )?;

        Ok(ImpliedAssumptions {
            salary_growth,
            invest_return,
            discount_rate: base.discount_rate,
            spread: invest_return - salary_growth,
        })
    }

    /// Equilibrium contribution rate funding the scenario's accrual exactly:
    /// liability divided by the asset accumulated per unit of contribution
    pub fn required_contribution(&self, scenario: &DeficitScenario) -> Result<f64> {
        let annuity_factor = self.annuity_basis(scenario)?;
        let liability = project_liability(
            scenario.start_wage,
            scenario.years_of_service,
            scenario.salary_growth,
            scenario.accrual_rate,
            annuity_factor,
        );

        let unit_rate = 0.01;
        let asset_per_unit = project_assets(
            scenario.start_wage,
            scenario.years_of_service,
            scenario.salary_growth,
            unit_rate,
            scenario.invest_return,
        )
        .final_asset();

        if asset_per_unit <= 0.0 {
            return Err(PensionError::NoSolution {
                target: liability,
                lower: 0.0,
                upper: f64::INFINITY,
            });
        }

        Ok(liability / asset_per_unit * unit_rate)
    }

    /// Investment return at which the scenario's contributions exactly fund
    /// its promised benefit
    pub fn required_return(&self, scenario: &DeficitScenario) -> Result<f64> {
        let annuity_factor = self.annuity_basis(scenario)?;
        let liability = project_liability(
            scenario.start_wage,
            scenario.years_of_service,
            scenario.salary_growth,
            scenario.accrual_rate,
            annuity_factor,
        );

        let (lo, hi) = INVEST_RETURN_BRACKET;
        solve_for_rate(
            liability,
            |rate| {
                Ok(project_assets(
                    scenario.start_wage,
                    scenario.years_of_service,
                    scenario.salary_growth,
                    scenario.contribution_rate,
                    rate,
                )
                .final_asset())
            },
            lo,
            hi,
        )
    }

    /// Convert an accumulated fund into a lifetime monthly benefit at
    /// retirement and compare it against the final wage
    pub fn income_replacement(
        &self,
        accumulated_fund: f64,
        retirement_age: u32,
        discount_rate: f64,
        final_monthly_wage: f64,
    ) -> Result<ReplacementOutcome> {
        let annual = whole_life_annuity(&self.participant, retirement_age, discount_rate)?;
        let annuity_factor = monthly_correction(annual);
        let monthly_benefit = accumulated_fund / (annuity_factor * 12.0);

        Ok(ReplacementOutcome {
            annuity_factor,
            monthly_benefit,
            replacement_ratio: monthly_benefit / final_monthly_wage,
        })
    }
}

/// Real discount rate combining the technical rate and benefit indexation:
/// (1+i)/(1+g) − 1, so v_real^t = ((1+g)/(1+i))^t
fn real_rate(discount_rate: f64, benefit_indexation: f64) -> Result<f64> {
    if !discount_rate.is_finite() || 1.0 + discount_rate == 0.0 {
        return Err(PensionError::InvalidRate(discount_rate));
    }
    if !benefit_indexation.is_finite() || 1.0 + benefit_indexation == 0.0 {
        return Err(PensionError::InvalidRate(benefit_indexation));
    }
    Ok((1.0 + discount_rate) / (1.0 + benefit_indexation) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pinned_scenario() -> DeficitScenario {
        DeficitScenario {
            annuity_override: Some(14.32),
            ..DeficitScenario::default()
        }
    }

    #[test]
    fn test_simulate_reproduces_reported_deficit() {
        let runner = ScenarioRunner::synthetic();
        let outcome = runner.simulate(&pinned_scenario()).unwrap();

        let v = &outcome.valuation;
        assert!((v.total_asset - 249_783_000.0).abs() / 249_783_000.0 < 0.01);
        assert!((v.total_liability - 561_752_000.0).abs() / 561_752_000.0 < 0.01);
        assert!((v.gap - (-311_969_000.0)).abs() / 311_969_000.0 < 0.02);
        assert!(!v.is_funded());
    }

    #[test]
    fn test_annuity_basis_from_tables() {
        let runner = ScenarioRunner::synthetic();
        let scenario = DeficitScenario::default();

        let basis = runner.annuity_basis(&scenario).unwrap();
        // A 56-year-old with a 50% reversion at a 5.7% discount lands in a
        // plausible range for a whole-life basis
        assert!(basis > 5.0 && basis < 30.0, "basis = {}", basis);

        // The reversion adds value over the own-life basis alone
        let no_reversion = runner
            .annuity_basis(&DeficitScenario {
                survivor_fraction: 0.0,
                ..scenario
            })
            .unwrap();
        assert!(basis > no_reversion);
    }

    #[test]
    fn test_annuity_override_wins() {
        let runner = ScenarioRunner::synthetic();
        let basis = runner.annuity_basis(&pinned_scenario()).unwrap();
        assert_eq!(basis, 14.32);
    }

    #[test]
    fn test_indexation_raises_basis() {
        let runner = ScenarioRunner::synthetic();
        let flat = runner.annuity_basis(&DeficitScenario::default()).unwrap();
        let indexed = runner
            .annuity_basis(&DeficitScenario {
                benefit_indexation: 0.02,
                ..DeficitScenario::default()
            })
            .unwrap();
        assert!(indexed > flat);
    }

    #[test]
    fn test_implied_assumptions_round_trip() {
        let runner = ScenarioRunner::synthetic();
        let truth = DeficitScenario {
            salary_growth: 0.06,
            invest_return: 0.07,
            ..DeficitScenario::default()
        };

        let outcome = runner.simulate(&truth).unwrap();
        let implied = runner
            .solve_implied_assumptions(
                outcome.valuation.total_asset,
                outcome.valuation.total_liability,
                &DeficitScenario::default(),
            )
            .unwrap();

        assert!((implied.salary_growth - 0.06).abs() < 1e-6);
        assert!((implied.invest_return - 0.07).abs() < 1e-6);
        assert!((implied.spread - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_implied_assumptions_unreachable_target() {
        let runner = ScenarioRunner::synthetic();
        let err = runner
            .solve_implied_assumptions(1e18, 1e18, &DeficitScenario::default())
            .unwrap_err();
        assert!(matches!(err, PensionError::NoSolution { .. }));
    }

    #[test]
    fn test_required_contribution_balances_the_fund() {
        let runner = ScenarioRunner::synthetic();
        let scenario = pinned_scenario();

        let required = runner.required_contribution(&scenario).unwrap();
        // The reported case is deeply underfunded at a 3% contribution
        assert!(required > scenario.contribution_rate);

        let balanced = runner
            .simulate(&DeficitScenario {
                contribution_rate: required,
                ..scenario
            })
            .unwrap();
        let ratio = balanced.valuation.funding_ratio.unwrap();
        assert!((ratio - 1.0).abs() < 1e-9, "ratio = {}", ratio);
    }

    #[test]
    fn test_required_return_breaks_even() {
        let runner = ScenarioRunner::synthetic();
        let scenario = DeficitScenario {
            contribution_rate: 0.09,
            accrual_rate: 0.015,
            annuity_override: Some(14.32),
            ..DeficitScenario::default()
        };

        let implied = runner.required_return(&scenario).unwrap();
        let balanced = runner
            .simulate(&DeficitScenario {
                invest_return: implied,
                ..scenario
            })
            .unwrap();
        assert!(
            balanced.valuation.gap.abs() / balanced.valuation.total_liability < 1e-6,
            "gap = {}",
            balanced.valuation.gap
        );
    }

    #[test]
    fn test_income_replacement_round_trip() {
        let runner = ScenarioRunner::synthetic();

        // Fund sized to deliver exactly 2M a month at this basis
        let annual = whole_life_annuity(runner.participant_table(), 55, 0.06).unwrap();
        let factor = monthly_correction(annual);
        let fund = 2_000_000.0 * factor * 12.0;

        let outcome = runner.income_replacement(fund, 55, 0.06, 5_000_000.0).unwrap();
        assert!((outcome.monthly_benefit - 2_000_000.0).abs() < 1e-6);
        assert!((outcome.replacement_ratio - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_batch_matches_single_runs() {
        let runner = ScenarioRunner::synthetic();
        let scenarios: Vec<DeficitScenario> = [0.02, 0.03, 0.05, 0.09]
            .iter()
            .map(|&c| DeficitScenario {
                contribution_rate: c,
                ..pinned_scenario()
            })
            .collect();

        let batch = runner.run_batch(&scenarios);
        assert_eq!(batch.len(), scenarios.len());
        for (scenario, result) in scenarios.iter().zip(&batch) {
            let single = runner.simulate(scenario).unwrap();
            let parallel = result.as_ref().unwrap();
            assert_eq!(single.valuation.total_asset, parallel.valuation.total_asset);
            assert_eq!(single.valuation.gap, parallel.valuation.gap);
        }
    }
}
