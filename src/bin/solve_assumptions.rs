//! Reverse-engineer economic assumptions from reported fund figures
//!
//! Given a reported accumulated asset and present-value liability, solve for
//! the implied salary growth and investment return at a fixed discount
//! basis. Supports JSON output for dashboard integration via --json.

use anyhow::Context;
use clap::Parser;
use pension_balance::scenario::{DeficitScenario, ScenarioRunner};
use pension_balance::PensionError;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "solve_assumptions")]
#[command(about = "Solve for the economic assumptions behind reported asset/liability figures")]
struct Args {
    /// Reported accumulated asset at the funding date
    #[arg(long)]
    target_asset: f64,

    /// Reported present-value liability at the funding date
    #[arg(long)]
    target_liability: f64,

    /// Monthly wage in the first year of service
    #[arg(long, default_value_t = 2_500_000.0)]
    start_wage: f64,

    /// Years of service to the funding date
    #[arg(long, default_value_t = 32)]
    years: u32,

    /// Technical discount rate for the liability
    #[arg(long, default_value_t = 0.057)]
    discount_rate: f64,

    /// Contribution rate as a fraction of salary
    #[arg(long, default_value_t = 0.03)]
    contribution_rate: f64,

    /// Accrual rate as a fraction of average wage per year of service
    #[arg(long, default_value_t = 0.01)]
    accrual_rate: f64,

    /// Participant mortality CSV; synthetic table when omitted
    #[arg(long)]
    participant_table: Option<String>,

    /// Survivor mortality CSV; synthetic table when omitted
    #[arg(long)]
    survivor_table: Option<String>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SolveResponse {
    target_asset: f64,
    target_liability: f64,
    discount_rate: f64,
    implied_salary_growth: f64,
    implied_invest_return: f64,
    spread: f64,
    annuity_basis: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let runner = match (&args.participant_table, &args.survivor_table) {
        (Some(male), Some(female)) => ScenarioRunner::from_csv_paths(male, female)
            .context("loading mortality tables")?,
        (None, None) => ScenarioRunner::synthetic(),
        _ => anyhow::bail!("provide both --participant-table and --survivor-table, or neither"),
    };

    let base = DeficitScenario {
        start_wage: args.start_wage,
        years_of_service: args.years,
        discount_rate: args.discount_rate,
        contribution_rate: args.contribution_rate,
        accrual_rate: args.accrual_rate,
        ..DeficitScenario::default()
    };

    let annuity_basis = runner.annuity_basis(&base)?;
    let implied = match runner.solve_implied_assumptions(
        args.target_asset,
        args.target_liability,
        &base,
    ) {
        Ok(implied) => implied,
        Err(err @ PensionError::NoSolution { .. }) => {
            anyhow::bail!("no feasible assumptions reproduce the targets: {}", err)
        }
        Err(err) => return Err(err.into()),
    };

    let response = SolveResponse {
        target_asset: args.target_asset,
        target_liability: args.target_liability,
        discount_rate: implied.discount_rate,
        implied_salary_growth: implied.salary_growth,
        implied_invest_return: implied.invest_return,
        spread: implied.spread,
        annuity_basis,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("Target asset         : {:>15.0}", response.target_asset);
        println!("Target liability     : {:>15.0}", response.target_liability);
        println!("Discount basis       : {:>14.2}%", response.discount_rate * 100.0);
        println!("Annuity basis        : {:>15.4}", response.annuity_basis);
        println!("Implied salary growth: {:>14.2}%", response.implied_salary_growth * 100.0);
        println!("Implied return       : {:>14.2}%", response.implied_invest_return * 100.0);
        println!("Spread               : {:>14.2}%", response.spread * 100.0);
        if response.spread < 0.0 {
            println!("Note: negative spread; wages outgrow the return earned on contributions");
        }
    }

    Ok(())
}
