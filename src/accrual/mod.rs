//! Monthly accrual: advances loan balances for elapsed calendar months
//!
//! The only stateful, effectful operation in the system. Runs once per
//! startup; all other components are read-only projections over the loan
//! snapshots this produces.

use crate::loan::{EntryType, HistoryEntry, Loan, LoanType};
use chrono::{Datelike, NaiveDate};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar year-month, the accrual cursor's granularity.
///
/// Persisted as an opaque `"YYYY-MM"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        Self { year, month }
    }

    /// The year-month containing a calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Whole months from `self` to `other`; negative when `other` is earlier
    pub fn delta(&self, other: YearMonth) -> i32 {
        (other.year - self.year) * 12 + (other.month as i32 - self.month as i32)
    }

    /// The year-month `months` after this one
    pub fn plus_months(&self, months: u32) -> Self {
        let total = self.year * 12 + (self.month as i32 - 1) + months as i32;
        Self {
            year: total.div_euclid(12),
            month: total.rem_euclid(12) as u32 + 1,
        }
    }

    /// First calendar day of the month, used to date synthetic accrual events
    pub fn first_day(&self) -> NaiveDate {
        // Month is validated on construction, so this cannot be out of range
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (y, m) = s
            .split_once('-')
            .ok_or_else(|| format!("invalid year-month: {s}"))?;
        let year: i32 = y.parse().map_err(|_| format!("invalid year: {s}"))?;
        let month: u32 = m.parse().map_err(|_| format!("invalid month: {s}"))?;
        if !(1..=12).contains(&month) {
            return Err(format!("month out of range: {s}"));
        }
        Ok(Self { year, month })
    }
}

impl TryFrom<String> for YearMonth {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> Self {
        ym.to_string()
    }
}

/// Outcome of an accrual run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualReport {
    /// New cursor value; always the current year-month, whether or not any
    /// charge was applied
    pub cursor: YearMonth,

    /// Elapsed months covered by this run, for user notification. Zero on
    /// cold start, within-month reruns, and backward clock movement.
    pub months_missed: u32,

    /// Number of history entries produced. When zero the caller may skip
    /// persisting the loans (the cursor must still be persisted with them).
    pub entries_applied: usize,
}

/// Advance all loans by the calendar months elapsed since `cursor`.
///
/// For each missed month, in loan list order: interest first (when the
/// rate is positive), then credit-card installment charges in schedule
/// order, each appended to history with the balance captured at event
/// time. Events are dated to the first day of the synthetic month.
///
/// An absent cursor is a cold start: the cursor seeds to the current month
/// and nothing is charged, so a first-time load never back-bills unknown
/// history. A cursor at or ahead of the current month (clock moved
/// backward) is a no-op that still advances the cursor, making the run
/// idempotent within a month.
pub fn run(loans: &mut [Loan], cursor: Option<YearMonth>, today: NaiveDate) -> AccrualReport {
    let current = YearMonth::from_date(today);

    let last = match cursor {
        Some(ym) => ym,
        None => {
            debug!("accrual cold start, seeding cursor to {current}");
            return AccrualReport {
                cursor: current,
                months_missed: 0,
                entries_applied: 0,
            };
        }
    };

    let missed = last.delta(current);
    if missed <= 0 {
        return AccrualReport {
            cursor: current,
            months_missed: 0,
            entries_applied: 0,
        };
    }

    let mut entries_applied = 0;

    for m in 1..=missed as u32 {
        let event_date = last.plus_months(m).first_day();

        for loan in loans.iter_mut() {
            // 1. Interest accrual first; requires a positive balance
            let rate = loan.interest_rate;
            if loan.balance > 0.0 && rate > 0.0 {
                let interest_amt = loan.balance * rate / 100.0;
                loan.balance += interest_amt;
                loan.history.push(HistoryEntry {
                    entry_type: EntryType::Interest,
                    amount: interest_amt,
                    note: format!("Monthly interest ({rate}%)"),
                    date: event_date,
                    balance_after: loan.balance,
                });
                entries_applied += 1;
            }

            // 2. Installment charges (credit cards), in schedule order.
            // An active schedule bills even when the revolving balance is
            // zero; the card still owes the financed months.
            if loan.loan_type == LoanType::CreditCard {
                for inst in loan.installments.iter_mut() {
                    if inst.paid_months < inst.total_months && inst.monthly_amount > 0.0 {
                        loan.balance += inst.monthly_amount;
                        inst.paid_months += 1;
                        let note = format!("Installment: {}", inst.name);
                        let balance_after = loan.balance;
                        loan.history.push(HistoryEntry {
                            entry_type: EntryType::Installment,
                            amount: inst.monthly_amount,
                            note,
                            date: event_date,
                            balance_after,
                        });
                        entries_applied += 1;
                    }
                }
            }
        }
    }

    info!(
        "accrual applied {entries_applied} entr{} across {missed} month(s)",
        if entries_applied == 1 { "y" } else { "ies" }
    );

    AccrualReport {
        cursor: current,
        months_missed: missed as u32,
        entries_applied,
    }
}
