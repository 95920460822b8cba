//! Payoff projection: closed-form solvers, cycle simulation, plan tiers

pub mod math;
pub mod plan;
pub mod simulator;

pub use math::{
    covers_monthly_charges, monthly_charges, months_to_payoff, payoff_date, required_payment,
    PayoffEstimate, PayoffMonths, MAX_PAYOFF_MONTHS,
};
pub use plan::{build_plan, PayoffPlan, PlanTier, TierKind};
pub use simulator::{simulate, summarize, Cycle, SimulationSummary};
