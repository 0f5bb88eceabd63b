//! Pension Balance CLI
//!
//! Worked example: value the reported deficit case, then price the
//! contribution and return that would balance the fund.

use pension_balance::scenario::{DeficitScenario, ScenarioRunner};
use pension_balance::PensionError;

fn main() {
    env_logger::init();

    println!("Pension Balance v0.1.0");
    println!("======================\n");

    // Load the TMI tables if present; fall back to the synthetic Gompertz
    // tables for an exploratory run. The substitution is made here, at the
    // caller, never inside the loader.
    let runner = match ScenarioRunner::from_csv_paths("data/tmi_4_m.csv", "data/tmi_4_f.csv") {
        Ok(runner) => {
            println!("Loaded TMI mortality tables from data/");
            runner
        }
        Err(PensionError::NotFound(path)) => {
            println!("Mortality source {} missing; using synthetic tables", path);
            ScenarioRunner::synthetic()
        }
        Err(err) => {
            eprintln!("Failed to load mortality tables: {}", err);
            std::process::exit(1);
        }
    };

    let scenario = DeficitScenario::default();
    println!("\nScenario:");
    println!("  Start wage          : {:>15.0}/month", scenario.start_wage);
    println!("  Years of service    : {:>15}", scenario.years_of_service);
    println!("  Salary growth       : {:>14.2}%", scenario.salary_growth * 100.0);
    println!("  Investment return   : {:>14.2}%", scenario.invest_return * 100.0);
    println!("  Discount rate       : {:>14.2}%", scenario.discount_rate * 100.0);
    println!("  Contribution rate   : {:>14.2}%", scenario.contribution_rate * 100.0);
    println!("  Accrual rate        : {:>14.2}%", scenario.accrual_rate * 100.0);

    let outcome = match runner.simulate(&scenario) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("Valuation failed: {}", err);
            std::process::exit(1);
        }
    };

    println!("\nValuation:");
    println!("  Final wage          : {:>15.0}/month", outcome.final_wage);
    println!("  Average wage        : {:>15.0}/month", outcome.average_wage);
    println!("  Monthly benefit     : {:>15.0}", outcome.monthly_benefit);
    println!("  Annuity basis       : {:>15.4}", outcome.annuity_factor);
    println!("  Total asset         : {:>15.0}", outcome.valuation.total_asset);
    println!("  Total liability     : {:>15.0}", outcome.valuation.total_liability);
    println!("  Surplus / (deficit) : {:>15.0}", outcome.valuation.gap);
    match outcome.valuation.funding_ratio {
        Some(ratio) => println!("  Funding ratio       : {:>14.1}%", ratio * 100.0),
        None => println!("  Funding ratio       : n/a (zero liability)"),
    }

    println!("\nBalancing the fund:");
    match runner.required_contribution(&scenario) {
        Ok(rate) => println!(
            "  Contribution funding the {:.2}% accrual : {:.2}% of salary",
            scenario.accrual_rate * 100.0,
            rate * 100.0
        ),
        Err(err) => println!("  Required contribution: {}", err),
    }
    match runner.required_return(&scenario) {
        Ok(rate) => println!(
            "  Return balancing the {:.2}% contribution: {:.2}% p.a.",
            scenario.contribution_rate * 100.0,
            rate * 100.0
        ),
        Err(err) => println!("  Required return: {}", err),
    }
}
