//! Cycle-by-cycle payoff simulation
//!
//! Single source of truth for every multi-month projection in the system:
//! payoff plan tiers, goal cycle breakdowns, and export reports all consume
//! the cycles produced here. No other code path recomputes cycle math.

use crate::loan::{Installment, InstallmentMode};
use serde::{Deserialize, Serialize};

/// A single simulated billing/payment period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    /// Balance at the start of the cycle
    pub start_bal: f64,

    /// Interest charged on the starting balance
    pub interest: f64,

    /// Summed installment charges applied this cycle
    pub inst_charge: f64,

    /// Payment actually applied, capped at the post-charge balance
    pub payment: f64,

    /// Balance after payment, floored at 0
    pub end_bal: f64,
}

/// Simulate payoff cycles for a balance under a fixed monthly payment.
///
/// Per cycle, in strict order: interest on the starting balance, then
/// installment charges for schedules whose remaining unpaid months exceed
/// the zero-based cycle index, then the payment (capped at the balance,
/// floored at 0). The installments themselves are never mutated; the cycle
/// offset models months not yet billed at simulation start.
///
/// Stops at the cycle where the balance reaches 0, at `max_cycles`, or —
/// after at least 3 cycles — when the new balance is both at or above the
/// first cycle's starting balance and at or above the current cycle's
/// starting balance. That last check is a divergence heuristic, not a
/// proof: it exists to bound runs where the payment cannot outpace
/// charges.
///
/// Returns no cycles at all when the balance or payment is not positive.
pub fn simulate(
    balance: f64,
    monthly_payment: f64,
    monthly_rate_pct: f64,
    installments: &[Installment],
    mode: InstallmentMode,
    max_cycles: u32,
) -> Vec<Cycle> {
    let mut cycles = Vec::new();
    let mut bal = balance;
    let r = monthly_rate_pct / 100.0;

    if bal <= 0.0 || monthly_payment <= 0.0 {
        return cycles;
    }

    for i in 0..max_cycles {
        if bal <= 0.0 {
            break;
        }
        let start_bal = bal;

        // 1. Interest on the current balance
        let interest = start_bal * r;
        bal += interest;

        // 2. Installment charges for months not yet billed
        let mut inst_charge = 0.0;
        if mode.is_included() {
            for inst in installments {
                if i < inst.remaining_months() {
                    inst_charge += inst.monthly_amount;
                }
            }
            bal += inst_charge;
        }

        // 3. Payment, capped at the balance
        let payment = monthly_payment.min(bal);
        bal = (bal - payment).max(0.0);

        cycles.push(Cycle {
            start_bal,
            interest,
            inst_charge,
            payment,
            end_bal: bal,
        });

        if bal <= 0.0 {
            break;
        }

        // Bail early if the balance is growing: payment doesn't cover charges
        if i >= 2 && bal >= cycles[0].start_bal && bal >= start_bal {
            break;
        }
    }

    cycles
}

/// Aggregate view over a simulated cycle sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Cycle count; `None` when the simulation produced no cycles
    pub months: Option<u32>,

    /// Sum of payments across cycles
    pub total_paid: f64,

    /// Sum of interest across cycles
    pub total_interest: f64,

    /// Whether the final cycle ended at zero balance
    pub paid_off: bool,

    /// Simulation-detected divergence: not paid off, ran more than one
    /// cycle, and the final balance is at or above the first cycle's start
    pub balance_growing: bool,
}

/// Derive the summary for a simulated sequence.
pub fn summarize(cycles: &[Cycle]) -> SimulationSummary {
    if cycles.is_empty() {
        return SimulationSummary {
            months: None,
            total_paid: 0.0,
            total_interest: 0.0,
            paid_off: false,
            balance_growing: false,
        };
    }

    let total_paid = cycles.iter().map(|c| c.payment).sum();
    let total_interest = cycles.iter().map(|c| c.interest).sum();
    let last = &cycles[cycles.len() - 1];
    let paid_off = last.end_bal <= 0.0;
    let balance_growing = !paid_off && cycles.len() > 1 && last.end_bal >= cycles[0].start_bal;

    SimulationSummary {
        months: Some(cycles.len() as u32),
        total_paid,
        total_interest,
        paid_off,
        balance_growing,
    }
}
