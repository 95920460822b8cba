//! Cross-loan rollups: filtered totals and a combined payoff estimate

use crate::loan::{Loan, LoanType};
use crate::projection::{months_to_payoff, PayoffMonths};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-type include flags for the summary rollup.
///
/// A type with no recorded flag is active; only an explicit `false`
/// excludes it. When no flag has been recorded for any type present in
/// the loan set, everything is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryFilters(pub HashMap<LoanType, bool>);

impl SummaryFilters {
    /// Set a type's include flag
    pub fn set(&mut self, loan_type: LoanType, active: bool) {
        self.0.insert(loan_type, active);
    }

    /// The active subset of the types present among `loans`
    pub fn active_types(&self, loans: &[Loan]) -> Vec<LoanType> {
        let present: Vec<LoanType> = [LoanType::CreditCard, LoanType::Personal]
            .into_iter()
            .filter(|t| loans.iter().any(|l| l.loan_type == *t))
            .collect();

        let has_any_flag = present.iter().any(|t| self.0.contains_key(t));
        if !has_any_flag {
            return present;
        }
        present
            .into_iter()
            .filter(|t| self.0.get(t) != Some(&false))
            .collect()
    }
}

/// Aggregate view over the filtered loan set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtSummary {
    /// Total outstanding balance across active loans
    pub total: f64,

    /// Balance per active type, in fixed display order
    pub by_type: Vec<(LoanType, f64)>,

    /// Latest finite payoff date among active loans, at their planned
    /// payments
    pub estimated_payoff: Option<NaiveDate>,

    /// At least one active loan's payoff horizon is unbounded; rendered
    /// alongside whatever finite date the rest produce
    pub has_unpayable: bool,
}

/// Roll up the active loans into a combined total and payoff estimate.
///
/// Payoff horizons come from the closed-form solver at each loan's
/// planned payment; the estimate is the latest finite date, and loans
/// whose horizon is unbounded set the `has_unpayable` flag instead of
/// poisoning the date.
pub fn summarize_loans(loans: &[Loan], filters: &SummaryFilters, today: NaiveDate) -> DebtSummary {
    let active = filters.active_types(loans);
    let filtered: Vec<&Loan> = loans
        .iter()
        .filter(|l| active.contains(&l.loan_type))
        .collect();

    let total = filtered.iter().map(|l| l.balance.max(0.0)).sum();

    let by_type = active
        .iter()
        .map(|t| {
            let sum = filtered
                .iter()
                .filter(|l| l.loan_type == *t)
                .map(|l| l.balance.max(0.0))
                .sum();
            (*t, sum)
        })
        .collect();

    let mut estimated_payoff: Option<NaiveDate> = None;
    let mut has_unpayable = false;
    for loan in filtered.iter().filter(|l| l.balance > 0.0) {
        match months_to_payoff(loan.balance, loan.monthly_payment, loan.projection_rate()) {
            PayoffMonths::Finite(m) if m > 0 => {
                if let Some(date) = today.checked_add_months(Months::new(m)) {
                    if estimated_payoff.map_or(true, |latest| date > latest) {
                        estimated_payoff = Some(date);
                    }
                }
            }
            PayoffMonths::Unbounded => has_unpayable = true,
            _ => {}
        }
    }

    DebtSummary {
        total,
        by_type,
        estimated_payoff,
        has_unpayable,
    }
}
