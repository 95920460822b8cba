//! Closed-form payoff solvers for the single-rate, single-payment case
//!
//! These intentionally ignore installment charges: they back the quick
//! interactive what-if calculator. Projections that must account for
//! installment schedules go through the cycle simulator instead.

use crate::loan::{Installment, InstallmentMode, Loan, LoanType};
use chrono::{Months, NaiveDate};

/// Projection horizon cap in months (30 years). Anything beyond this is
/// reported as unbounded rather than a literal month count.
pub const MAX_PAYOFF_MONTHS: u32 = 360;

/// Result of a months-to-payoff calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoffMonths {
    /// Balance was already zero or negative
    AlreadyPaid,
    /// Pays off within the modeled horizon
    Finite(u32),
    /// Payment cannot overcome charges, or the horizon exceeds 360 months
    Unbounded,
}

impl PayoffMonths {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, PayoffMonths::Unbounded)
    }

    /// Month count when finite; `AlreadyPaid` counts as 0
    pub fn months(&self) -> Option<u32> {
        match self {
            PayoffMonths::AlreadyPaid => Some(0),
            PayoffMonths::Finite(m) => Some(*m),
            PayoffMonths::Unbounded => None,
        }
    }
}

/// Months to pay off `balance` at `monthly_payment`, compounding monthly
/// at `monthly_rate_pct` percent.
///
/// With a positive rate the payment must exceed the interest-only amount
/// `balance * r` or the balance never decreases. The closed form is the
/// standard amortization horizon `n = -ln(1 - B*r/P) / ln(1+r)`.
pub fn months_to_payoff(balance: f64, monthly_payment: f64, monthly_rate_pct: f64) -> PayoffMonths {
    if balance <= 0.0 {
        return PayoffMonths::AlreadyPaid;
    }
    if monthly_payment <= 0.0 {
        return PayoffMonths::Unbounded;
    }

    let r = monthly_rate_pct / 100.0;
    let months = if r > 0.0 {
        if monthly_payment <= balance * r {
            return PayoffMonths::Unbounded;
        }
        let n = -(1.0 - (balance * r) / monthly_payment).ln() / (1.0 + r).ln();
        n.ceil() as u32
    } else {
        (balance / monthly_payment).ceil() as u32
    };

    if months > MAX_PAYOFF_MONTHS {
        PayoffMonths::Unbounded
    } else {
        PayoffMonths::Finite(months)
    }
}

/// Monthly payment required to clear `balance` in exactly `target_months`.
///
/// Annuity formula `P = B*r*(1+r)^n / ((1+r)^n - 1)` for a positive rate,
/// straight division otherwise. Degenerate inputs yield 0 rather than an
/// error.
pub fn required_payment(balance: f64, target_months: u32, monthly_rate_pct: f64) -> f64 {
    if balance <= 0.0 || target_months == 0 {
        return 0.0;
    }
    let r = monthly_rate_pct / 100.0;
    if r > 0.0 {
        let factor = (1.0 + r).powi(target_months as i32);
        balance * r * factor / (factor - 1.0)
    } else {
        balance / target_months as f64
    }
}

/// Total recurring monthly charges for a balance: interest plus the
/// monthly amounts of active installments (when included).
pub fn monthly_charges(
    balance: f64,
    monthly_rate_pct: f64,
    installments: &[Installment],
    mode: InstallmentMode,
) -> f64 {
    let interest = balance.max(0.0) * monthly_rate_pct / 100.0;
    let inst: f64 = if mode.is_included() {
        installments
            .iter()
            .filter(|i| i.is_active())
            .map(|i| i.monthly_amount)
            .sum()
    } else {
        0.0
    };
    interest + inst
}

/// Whether a payment outpaces the recurring monthly charges.
///
/// The single definition of the "payment doesn't cover charges" threshold
/// shared by the calculator, payoff plan tiers, and simulation callers. A
/// loan with no charges at all is trivially covered.
pub fn covers_monthly_charges(
    payment: f64,
    balance: f64,
    monthly_rate_pct: f64,
    installments: &[Installment],
    mode: InstallmentMode,
) -> bool {
    let charges = monthly_charges(balance, monthly_rate_pct, installments, mode);
    charges <= 0.0 || payment > charges
}

/// Payoff estimate for a whole loan at its planned monthly payment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoffEstimate {
    pub months: PayoffMonths,
    /// Calendar payoff date, present only for a finite positive horizon
    pub date: Option<NaiveDate>,
}

/// Estimate when a loan pays off at its planned monthly payment.
///
/// Personal loans project at a flat rate; credit cards compound at their
/// monthly rate. When the loan carries active installments that are
/// included in projections, the closed form would understate the horizon,
/// so this routes through the cycle simulator instead.
pub fn payoff_date(loan: &Loan, today: NaiveDate) -> PayoffEstimate {
    let months = if loan.include_installments.is_included()
        && loan.loan_type == LoanType::CreditCard
        && loan.has_active_installments()
    {
        let cycles = super::simulator::simulate(
            loan.balance,
            loan.monthly_payment,
            loan.projection_rate(),
            &loan.installments,
            InstallmentMode::Include,
            MAX_PAYOFF_MONTHS,
        );
        let summary = super::simulator::summarize(&cycles);
        if summary.paid_off {
            PayoffMonths::Finite(summary.months.unwrap_or(0))
        } else if loan.balance <= 0.0 {
            PayoffMonths::AlreadyPaid
        } else {
            PayoffMonths::Unbounded
        }
    } else {
        months_to_payoff(loan.balance, loan.monthly_payment, loan.projection_rate())
    };

    let date = match months {
        PayoffMonths::Finite(m) if m > 0 => today.checked_add_months(Months::new(m)),
        _ => None,
    };
    PayoffEstimate { months, date }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_balance_already_paid() {
        assert_eq!(months_to_payoff(0.0, 500.0, 2.0), PayoffMonths::AlreadyPaid);
        assert_eq!(months_to_payoff(-10.0, 500.0, 2.0), PayoffMonths::AlreadyPaid);
        assert_eq!(PayoffMonths::AlreadyPaid.months(), Some(0));
    }

    #[test]
    fn test_zero_payment_unbounded() {
        // balance=10000, rate=2%/month, payment=0
        let result = months_to_payoff(10_000.0, 0.0, 2.0);
        assert!(result.is_unbounded());
        assert_eq!(result.months(), None);
    }

    #[test]
    fn test_payment_below_interest_unbounded() {
        // Interest-only amount is 10000 * 0.02 = 200
        assert!(months_to_payoff(10_000.0, 200.0, 2.0).is_unbounded());
        assert!(months_to_payoff(10_000.0, 150.0, 2.0).is_unbounded());
        assert!(months_to_payoff(10_000.0, 201.0, 2.0).months().is_some());
    }

    #[test]
    fn test_zero_rate_exact_division() {
        // balance=5000, rate=0, payment=500 -> exactly 10 months
        assert_eq!(months_to_payoff(5_000.0, 500.0, 0.0), PayoffMonths::Finite(10));
        // Non-exact division rounds up
        assert_eq!(months_to_payoff(5_000.0, 600.0, 0.0), PayoffMonths::Finite(9));
    }

    #[test]
    fn test_horizon_cap() {
        // 100/month against 36000 at zero rate is exactly 360 months
        assert_eq!(months_to_payoff(36_000.0, 100.0, 0.0), PayoffMonths::Finite(360));
        // One peso more tips past the cap
        assert!(months_to_payoff(36_100.0, 100.0, 0.0).is_unbounded());
    }

    #[test]
    fn test_solver_consistency() {
        // balance=20000, rate=2, payment=1000 -> finite months, and the
        // required payment for that horizon never exceeds the payment used
        let months = months_to_payoff(20_000.0, 1_000.0, 2.0).months().unwrap();
        assert!(months > 0);
        let required = required_payment(20_000.0, months, 2.0);
        assert!(
            required <= 1_000.0,
            "required {} should not exceed 1000",
            required
        );
        // And one month fewer should need strictly more
        let tighter = required_payment(20_000.0, months - 1, 2.0);
        assert!(tighter > required);
    }

    #[test]
    fn test_required_payment_zero_rate() {
        assert_relative_eq!(required_payment(12_000.0, 12, 0.0), 1_000.0);
    }

    #[test]
    fn test_required_payment_degenerate() {
        assert_eq!(required_payment(0.0, 12, 2.0), 0.0);
        assert_eq!(required_payment(-500.0, 12, 2.0), 0.0);
        assert_eq!(required_payment(10_000.0, 0, 2.0), 0.0);
    }

    #[test]
    fn test_required_payment_annuity() {
        // 10000 at 1%/month over 12 months: standard annuity ~888.49
        let p = required_payment(10_000.0, 12, 1.0);
        assert_relative_eq!(p, 888.4878867834167, epsilon = 1e-6);
    }

    #[test]
    fn test_monthly_charges_and_coverage() {
        let insts = vec![
            Installment {
                name: "TV".into(),
                monthly_amount: 1_000.0,
                total_months: 6,
                paid_months: 2,
            },
            Installment {
                name: "Done".into(),
                monthly_amount: 500.0,
                total_months: 3,
                paid_months: 3,
            },
        ];
        // 10000 * 2% = 200 interest + 1000 active installment
        let charges = monthly_charges(10_000.0, 2.0, &insts, InstallmentMode::Include);
        assert_relative_eq!(charges, 1_200.0);

        assert!(!covers_monthly_charges(1_200.0, 10_000.0, 2.0, &insts, InstallmentMode::Include));
        assert!(covers_monthly_charges(1_201.0, 10_000.0, 2.0, &insts, InstallmentMode::Include));

        // Excluding installments drops the threshold to interest only
        assert!(covers_monthly_charges(300.0, 10_000.0, 2.0, &insts, InstallmentMode::Exclude));

        // No charges at all -> trivially covered, even by a zero payment
        assert!(covers_monthly_charges(0.0, 10_000.0, 0.0, &[], InstallmentMode::Include));
    }

    #[test]
    fn test_payoff_date_uses_simulator_for_installments() {
        let mut loan = Loan::credit_card("cc1", "BDO", 5_000.0);
        loan.interest_rate = 0.0;
        loan.monthly_payment = 2_000.0;
        loan.installments.push(Installment {
            name: "Phone".into(),
            monthly_amount: 1_000.0,
            total_months: 5,
            paid_months: 0,
        });

        let today = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let est = payoff_date(&loan, today);
        // Closed form alone would say 3 months; installments stretch it
        let closed_form = months_to_payoff(5_000.0, 2_000.0, 0.0).months().unwrap();
        assert!(est.months.months().unwrap() > closed_form);
        assert!(est.date.unwrap() > today);
    }

    #[test]
    fn test_payoff_date_planned_payment_too_low() {
        let mut loan = Loan::credit_card("cc1", "BDO", 10_000.0);
        loan.interest_rate = 2.0;
        loan.monthly_payment = 100.0;

        let today = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let est = payoff_date(&loan, today);
        assert!(est.months.is_unbounded());
        assert!(est.date.is_none());
    }
}
