//! Payoff goal tracking
//!
//! A goal freezes the balance at commitment time; progress is measured as
//! debt elimination (start balance minus current balance), never as a sum
//! of payment history amounts. Interest and charges can inflate the
//! balance between payments, so a payment-sum metric would overstate true
//! debt reduction.

use crate::loan::{Goal, Loan};
use crate::projection::{simulate, Cycle};
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Debt-elimination progress against a committed goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// Debt eliminated since the goal was set
    pub paid_down: f64,

    /// Outstanding balance, floored at 0
    pub remaining: f64,

    /// Whole-percent progress, capped at 100
    pub percent: u32,

    /// Balance has reached zero
    pub complete: bool,
}

/// Commit a payoff goal on a loan, snapshotting the current balance.
pub fn set_goal(loan: &mut Loan, monthly_payment: f64, target_months: u32, today: NaiveDate) {
    let target_date = today
        .checked_add_months(Months::new(target_months))
        .unwrap_or(today);
    loan.goal = Some(Goal {
        monthly_payment,
        target_months,
        start_balance: loan.balance,
        target_date,
        set_at: today,
    });
}

/// Drop a loan's goal. Pure deletion; nothing else recomputes.
pub fn remove_goal(loan: &mut Loan) {
    loan.goal = None;
}

/// Progress for a loan's committed goal, if it has one.
pub fn progress(loan: &Loan) -> Option<GoalProgress> {
    let goal = loan.goal.as_ref()?;
    let remaining = loan.balance.max(0.0);
    let paid_down = (goal.start_balance - remaining).max(0.0);
    let percent = if goal.start_balance > 0.0 {
        ((paid_down / goal.start_balance * 100.0).round() as u32).min(100)
    } else {
        100
    };
    Some(GoalProgress {
        paid_down,
        remaining,
        percent,
        complete: remaining <= 0.0,
    })
}

/// Count due-date boundary crossings since the goal was set, capped at the
/// goal's target months.
///
/// A calendar-cycle counter independent of payment history: it reports
/// plan adherence, not debt state, and may legitimately diverge from
/// actual payoff progress.
pub fn cycles_elapsed(goal: &Goal, due_date: u32, today: NaiveDate) -> u32 {
    let due_day = if due_date == 0 { 1 } else { due_date };

    // First due date strictly after the goal was set
    let mut boundary = due_date_in_month(goal.set_at.year(), goal.set_at.month(), due_day);
    if boundary <= goal.set_at {
        boundary = boundary
            .checked_add_months(Months::new(1))
            .unwrap_or(boundary);
    }

    let mut cycles = 0;
    while boundary <= today && cycles < goal.target_months {
        cycles += 1;
        boundary = match boundary.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => break,
        };
    }
    cycles
}

/// Cycle-by-cycle breakdown of the goal plan, simulated from the frozen
/// start balance at the committed payment.
pub fn breakdown(loan: &Loan) -> Vec<Cycle> {
    let Some(goal) = loan.goal.as_ref() else {
        return Vec::new();
    };
    simulate(
        goal.start_balance,
        goal.monthly_payment,
        loan.projection_rate(),
        &loan.installments,
        loan.include_installments,
        goal.target_months,
    )
}

/// The due day within a month, clamped to the month's length
fn due_date_in_month(year: i32, month: u32, due_day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, due_day).unwrap_or_else(|| {
        // Day past the month's end (e.g. the 31st in February): clamp to
        // the last day
        let first_next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        first_next
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MIN)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::{EntryType, HistoryEntry, Installment};
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn card_with_goal(balance: f64, goal_start: f64, monthly: f64, months: u32) -> Loan {
        let mut loan = Loan::credit_card("cc1", "BDO", balance);
        loan.goal = Some(Goal {
            monthly_payment: monthly,
            target_months: months,
            start_balance: goal_start,
            target_date: date(2027, 2, 1),
            set_at: date(2026, 8, 1),
        });
        loan
    }

    #[test]
    fn test_set_goal_snapshots_balance() {
        let mut loan = Loan::credit_card("cc1", "BDO", 12_345.0);
        set_goal(&mut loan, 2_000.0, 7, date(2026, 8, 6));

        let goal = loan.goal.as_ref().unwrap();
        assert_eq!(goal.start_balance, 12_345.0);
        assert_eq!(goal.target_months, 7);
        assert_eq!(goal.target_date, date(2027, 3, 6));
        assert_eq!(goal.set_at, date(2026, 8, 6));
    }

    #[test]
    fn test_progress_tracks_balance_not_payments() {
        let mut loan = card_with_goal(10_000.0, 10_000.0, 1_000.0, 10);

        // Pay 1000, then interest pushes the balance back up by 500
        loan.record_payment(1_000.0, "", date(2026, 8, 15));
        loan.balance += 500.0;
        loan.history.push(HistoryEntry {
            entry_type: EntryType::Interest,
            amount: 500.0,
            note: String::new(),
            date: date(2026, 9, 1),
            balance_after: loan.balance,
        });

        let p = progress(&loan).unwrap();
        // Net debt reduction is 500, even though 1000 was paid
        assert_relative_eq!(p.paid_down, 500.0);
        assert_relative_eq!(p.remaining, 9_500.0);
        assert_eq!(p.percent, 5);
        assert!(!p.complete);

        // Invariant: paid_down == max(0, start_balance - balance)
        let goal = loan.goal.as_ref().unwrap();
        assert_relative_eq!(p.paid_down, (goal.start_balance - loan.balance).max(0.0));
    }

    #[test]
    fn test_progress_complete_and_capped() {
        let loan = card_with_goal(0.0, 8_000.0, 1_000.0, 8);
        let p = progress(&loan).unwrap();
        assert!(p.complete);
        assert_eq!(p.percent, 100);
        assert_relative_eq!(p.paid_down, 8_000.0);

        // Balance grew past the start: progress floors at zero
        let worse = card_with_goal(9_000.0, 8_000.0, 1_000.0, 8);
        let p = progress(&worse).unwrap();
        assert_relative_eq!(p.paid_down, 0.0);
        assert_eq!(p.percent, 0);
    }

    #[test]
    fn test_progress_zero_start_balance() {
        let loan = card_with_goal(0.0, 0.0, 500.0, 3);
        let p = progress(&loan).unwrap();
        assert_eq!(p.percent, 100);
        assert!(p.complete);
    }

    #[test]
    fn test_progress_without_goal() {
        let loan = Loan::credit_card("cc1", "BDO", 5_000.0);
        assert!(progress(&loan).is_none());
    }

    #[test]
    fn test_cycles_elapsed_counts_due_boundaries() {
        let goal = Goal {
            monthly_payment: 1_000.0,
            target_months: 6,
            start_balance: 6_000.0,
            target_date: date(2027, 2, 10),
            set_at: date(2026, 8, 10),
        };

        // Due on the 15th: first boundary is Aug 15
        assert_eq!(cycles_elapsed(&goal, 15, date(2026, 8, 14)), 0);
        assert_eq!(cycles_elapsed(&goal, 15, date(2026, 8, 15)), 1);
        assert_eq!(cycles_elapsed(&goal, 15, date(2026, 10, 20)), 3);

        // Due on the 5th: set_at is past it, so the first boundary is Sep 5
        assert_eq!(cycles_elapsed(&goal, 5, date(2026, 9, 4)), 0);
        assert_eq!(cycles_elapsed(&goal, 5, date(2026, 9, 5)), 1);
    }

    #[test]
    fn test_cycles_elapsed_caps_at_target() {
        let goal = Goal {
            monthly_payment: 1_000.0,
            target_months: 3,
            start_balance: 3_000.0,
            target_date: date(2026, 11, 1),
            set_at: date(2026, 1, 1),
        };
        // Years later, the counter still reports at most target_months
        assert_eq!(cycles_elapsed(&goal, 15, date(2030, 1, 1)), 3);
    }

    #[test]
    fn test_cycles_elapsed_clamps_due_day() {
        let goal = Goal {
            monthly_payment: 1_000.0,
            target_months: 12,
            start_balance: 12_000.0,
            target_date: date(2027, 2, 28),
            set_at: date(2026, 2, 10),
        };
        // Due on the 31st in February clamps to the 28th
        assert_eq!(cycles_elapsed(&goal, 31, date(2026, 2, 27)), 0);
        assert_eq!(cycles_elapsed(&goal, 31, date(2026, 2, 28)), 1);
    }

    #[test]
    fn test_breakdown_runs_from_goal_snapshot() {
        let mut loan = card_with_goal(7_000.0, 10_000.0, 2_000.0, 6);
        loan.interest_rate = 2.0;
        loan.installments.push(Installment {
            name: "Phone".into(),
            monthly_amount: 500.0,
            total_months: 4,
            paid_months: 2,
        });

        let cycles = breakdown(&loan);
        assert!(!cycles.is_empty());
        // Starts from the frozen goal balance, not the current one
        assert_relative_eq!(cycles[0].start_bal, 10_000.0);
        assert_relative_eq!(cycles[0].inst_charge, 500.0);
        assert!(cycles.len() <= 6);
    }

    #[test]
    fn test_remove_goal_is_pure_deletion() {
        let mut loan = card_with_goal(5_000.0, 10_000.0, 2_000.0, 6);
        remove_goal(&mut loan);
        assert!(loan.goal.is_none());
        assert_eq!(loan.balance, 5_000.0);
        assert!(breakdown(&loan).is_empty());
    }
}
