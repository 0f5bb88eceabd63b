//! Funding projection: asset accumulation, liability valuation, rate solving

mod projector;
mod solver;

pub use projector::{
    average_wage, project_assets, project_liability, ProjectionPeriod, ProjectionSeries,
    ValuationResult,
};
pub use solver::solve_for_rate;
