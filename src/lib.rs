//! ZeroDebt - Debt tracking and payoff projection engine
//!
//! This library provides:
//! - Closed-form payoff solvers (months to payoff, required payment)
//! - Cycle-by-cycle payoff simulation with installment schedules
//! - Monthly accrual of interest and installment charges
//! - Payoff goal tracking based on debt elimination
//! - Cross-loan summary rollups and export formatting

pub mod accrual;
pub mod banks;
pub mod export;
pub mod goal;
pub mod loan;
pub mod projection;
pub mod store;
pub mod summary;

// Re-export commonly used types
pub use accrual::{AccrualReport, YearMonth};
pub use loan::{Installment, Loan, LoanType};
pub use projection::{Cycle, PayoffMonths, SimulationSummary};
pub use store::Store;
pub use summary::{DebtSummary, SummaryFilters};
