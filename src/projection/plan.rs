//! Three-tier payoff plan built on the cycle simulator
//!
//! Suggests Conservative / Faster / Aggressive monthly payments for a loan
//! and simulates each so callers can present horizon, interest cost, and
//! savings against the baseline tier.

use super::math::{covers_monthly_charges, MAX_PAYOFF_MONTHS};
use super::simulator::{simulate, summarize, SimulationSummary};
use crate::loan::Loan;
use serde::{Deserialize, Serialize};

/// Strategy tier identifiers, ordered by payment size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierKind {
    Conservative,
    Faster,
    Aggressive,
}

impl TierKind {
    pub fn label(&self) -> &'static str {
        match self {
            TierKind::Conservative => "Conservative",
            TierKind::Faster => "Faster",
            TierKind::Aggressive => "Aggressive",
        }
    }

    /// Multiplier applied to the base payment
    fn factor(&self) -> f64 {
        match self {
            TierKind::Conservative => 1.0,
            TierKind::Faster => 1.5,
            TierKind::Aggressive => 2.5,
        }
    }
}

/// One simulated strategy tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTier {
    pub kind: TierKind,

    /// Suggested monthly payment for this tier
    pub monthly_payment: f64,

    /// Simulation outcome at this payment
    pub summary: SimulationSummary,

    /// Interest saved relative to the Conservative tier
    pub interest_saved: f64,

    /// Payment fails to cover monthly charges or the simulation diverged
    pub insufficient: bool,
}

/// Payoff plan for a loan: three tiers plus the shared baseline inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffPlan {
    pub tiers: Vec<PlanTier>,

    /// Base monthly payment the tiers scale from
    pub base_payment: f64,
}

/// Build the three-tier payoff plan for a loan.
///
/// The base payment is the loan's planned payment when it is viable
/// (above the interest-only amount), otherwise the larger of 110% of the
/// interest-only amount and 3% of the balance.
pub fn build_plan(loan: &Loan) -> PayoffPlan {
    let balance = loan.balance;
    let rate = loan.projection_rate();
    let current_pay = loan.monthly_payment;

    // Minimum viable payment: just above the interest-only amount
    let min_viable = balance * (rate / 100.0) * 1.01;
    let base_payment = if current_pay > min_viable {
        current_pay
    } else {
        (min_viable * 1.1).max(balance * 0.03)
    };

    let run = |payment: f64| {
        summarize(&simulate(
            balance,
            payment,
            rate,
            &loan.installments,
            loan.include_installments,
            MAX_PAYOFF_MONTHS,
        ))
    };

    let baseline = run(base_payment);

    let tiers = [TierKind::Conservative, TierKind::Faster, TierKind::Aggressive]
        .into_iter()
        .map(|kind| {
            let monthly_payment = base_payment * kind.factor();
            let summary = run(monthly_payment);
            let interest_saved = (baseline.total_interest - summary.total_interest).max(0.0);
            let covered = covers_monthly_charges(
                monthly_payment,
                balance,
                rate,
                &loan.installments,
                loan.include_installments,
            );
            let insufficient = !covered || summary.balance_growing;
            PlanTier {
                kind,
                monthly_payment,
                summary,
                interest_saved,
                insufficient,
            }
        })
        .collect();

    PayoffPlan { tiers, base_payment }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::Installment;

    fn card(balance: f64, rate: f64, payment: f64) -> Loan {
        let mut loan = Loan::credit_card("cc1", "BDO", balance);
        loan.interest_rate = rate;
        loan.monthly_payment = payment;
        loan
    }

    #[test]
    fn test_viable_payment_becomes_base() {
        let loan = card(10_000.0, 2.0, 1_000.0);
        let plan = build_plan(&loan);
        assert_eq!(plan.base_payment, 1_000.0);
        assert_eq!(plan.tiers.len(), 3);
        assert_eq!(plan.tiers[0].monthly_payment, 1_000.0);
        assert_eq!(plan.tiers[1].monthly_payment, 1_500.0);
        assert_eq!(plan.tiers[2].monthly_payment, 2_500.0);
    }

    #[test]
    fn test_unviable_payment_replaced() {
        // Planned payment below interest-only: base falls back to the
        // larger of 110% of interest-only and 3% of balance
        let loan = card(10_000.0, 2.0, 100.0);
        let plan = build_plan(&loan);
        let min_viable = 10_000.0 * 0.02 * 1.01;
        assert!(plan.base_payment >= min_viable * 1.1 - 1e-9);
        assert!(plan.base_payment >= 10_000.0 * 0.03 - 1e-9);
    }

    #[test]
    fn test_higher_tiers_pay_off_no_slower() {
        let loan = card(50_000.0, 2.5, 2_000.0);
        let plan = build_plan(&loan);
        let months: Vec<u32> = plan
            .tiers
            .iter()
            .map(|t| t.summary.months.unwrap_or(u32::MAX))
            .collect();
        assert!(months[1] <= months[0]);
        assert!(months[2] <= months[1]);
    }

    #[test]
    fn test_interest_saved_grows_with_payment() {
        let loan = card(50_000.0, 2.5, 2_000.0);
        let plan = build_plan(&loan);
        assert_eq!(plan.tiers[0].interest_saved, 0.0);
        assert!(plan.tiers[1].interest_saved > 0.0);
        assert!(plan.tiers[2].interest_saved > plan.tiers[1].interest_saved);
    }

    #[test]
    fn test_installments_flag_insufficient_tier() {
        // Base payment clears interest but not interest + installments
        let mut loan = card(10_000.0, 2.0, 300.0);
        loan.installments.push(Installment {
            name: "Phone".into(),
            monthly_amount: 2_000.0,
            total_months: 24,
            paid_months: 0,
        });
        let plan = build_plan(&loan);
        assert!(plan.tiers[0].insufficient);
    }
}
