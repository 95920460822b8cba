//! Loan data structures matching the persisted store format

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default due day-of-month when none was recorded
fn default_due_date() -> u32 {
    1
}

/// Kind of debt instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    /// Revolving credit line with a monthly interest rate and installments
    CreditCard,
    /// Fixed-term personal loan
    Personal,
}

impl LoanType {
    /// Get the display label used in summaries and exports
    pub fn label(&self) -> &'static str {
        match self {
            LoanType::CreditCard => "Credit Cards",
            LoanType::Personal => "Personal",
        }
    }
}

/// Whether projections add future installment charges for a loan
///
/// Made explicit rather than relying on field absence: a loan without a
/// stored flag defaults to `Include`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentMode {
    #[default]
    Include,
    Exclude,
}

impl InstallmentMode {
    pub fn is_included(&self) -> bool {
        matches!(self, InstallmentMode::Include)
    }
}

/// A fixed-amount sub-charge schedule layered onto a credit line
/// (e.g. a financed purchase), distinct from revolving interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    /// Item description ("iPhone 15", "Laptop", ...)
    pub name: String,

    /// Amount charged to the balance each month
    pub monthly_amount: f64,

    /// Total number of monthly charges in the schedule
    pub total_months: u32,

    /// Charges already applied; `paid_months == total_months` means inactive
    pub paid_months: u32,
}

impl Installment {
    /// Whether this installment still has unbilled months
    pub fn is_active(&self) -> bool {
        self.paid_months < self.total_months
    }

    /// Months not yet charged
    pub fn remaining_months(&self) -> u32 {
        self.total_months.saturating_sub(self.paid_months)
    }

    /// Total amount still to be charged
    pub fn remaining_amount(&self) -> f64 {
        self.remaining_months() as f64 * self.monthly_amount
    }
}

/// Kind of balance-affecting event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Interest,
    Installment,
    Charge,
    Payment,
}

impl EntryType {
    /// Payments reduce the balance; everything else increases it
    pub fn is_debit(&self) -> bool {
        !matches!(self, EntryType::Payment)
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryType::Interest => "Interest",
            EntryType::Installment => "Installment",
            EntryType::Charge => "Charge",
            EntryType::Payment => "Payment",
        }
    }
}

/// Immutable record of a balance-affecting event
///
/// `balance_after` is captured at the moment of the event and never
/// recomputed later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub entry_type: EntryType,
    pub amount: f64,
    #[serde(default)]
    pub note: String,
    pub date: NaiveDate,
    pub balance_after: f64,
}

/// A committed payoff plan snapshot
///
/// `start_balance` is frozen when the goal is set; progress is always
/// measured as `start_balance - current balance`, never as a sum of
/// payment history amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub monthly_payment: f64,
    pub target_months: u32,
    pub start_balance: f64,
    pub target_date: NaiveDate,
    pub set_at: NaiveDate,
}

/// A single debt instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    /// Opaque unique identifier, immutable
    pub id: String,

    /// Instrument kind
    #[serde(rename = "type")]
    pub loan_type: LoanType,

    /// Issuing bank (credit cards)
    #[serde(default)]
    pub bank: String,

    /// User-chosen display name
    #[serde(default)]
    pub nickname: String,

    /// Lender name (personal loans)
    #[serde(default)]
    pub lender_name: String,

    /// Current outstanding amount, never written below 0
    pub balance: f64,

    /// Original principal (personal loans, informational)
    #[serde(default)]
    pub total_amount: f64,

    /// Monthly percentage rate; 0 for non-interest-bearing loans
    #[serde(default)]
    pub interest_rate: f64,

    /// Planned recurring payment used for default projections
    #[serde(default)]
    pub monthly_payment: f64,

    /// Day-of-month (1-31) used only for cycle-boundary counting
    #[serde(default = "default_due_date")]
    pub due_date: u32,

    /// Informational ceiling (credit cards), not enforced by the engine
    #[serde(default)]
    pub credit_limit: f64,

    /// Term in months (personal loans, informational)
    #[serde(default)]
    pub loan_term: u32,

    /// Installment schedules in insertion order; order determines accrual
    /// and simulation processing order
    #[serde(default)]
    pub installments: Vec<Installment>,

    /// Whether projections add future installment charges
    #[serde(default)]
    pub include_installments: InstallmentMode,

    /// Committed payoff plan, if any
    #[serde(default)]
    pub goal: Option<Goal>,

    /// Append-only event log, chronological by insertion
    #[serde(default)]
    pub history: Vec<HistoryEntry>,

    /// Date the loan record was created
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
}

impl Loan {
    /// Create a credit-card loan with required fields
    pub fn credit_card(id: impl Into<String>, bank: impl Into<String>, balance: f64) -> Self {
        Self {
            id: id.into(),
            loan_type: LoanType::CreditCard,
            bank: bank.into(),
            nickname: String::new(),
            lender_name: String::new(),
            balance,
            total_amount: 0.0,
            interest_rate: 0.0,
            monthly_payment: 0.0,
            due_date: 1,
            credit_limit: 0.0,
            loan_term: 0,
            installments: Vec::new(),
            include_installments: InstallmentMode::Include,
            goal: None,
            history: Vec::new(),
            created_at: None,
        }
    }

    /// Create a personal loan with required fields
    pub fn personal(id: impl Into<String>, lender: impl Into<String>, balance: f64) -> Self {
        Self {
            loan_type: LoanType::Personal,
            lender_name: lender.into(),
            ..Self::credit_card(id, "", balance)
        }
    }

    /// Display name: nickname, then lender, then bank
    pub fn display_name(&self) -> &str {
        if !self.nickname.is_empty() {
            &self.nickname
        } else if !self.lender_name.is_empty() {
            &self.lender_name
        } else if !self.bank.is_empty() {
            &self.bank
        } else {
            "Loan"
        }
    }

    /// The rate used in projections: credit cards compound monthly,
    /// personal loans are treated as flat for projection purposes
    pub fn projection_rate(&self) -> f64 {
        match self.loan_type {
            LoanType::CreditCard => self.interest_rate,
            LoanType::Personal => 0.0,
        }
    }

    pub fn is_paid_off(&self) -> bool {
        self.balance <= 0.0
    }

    /// Whether any installment schedule still has unbilled months
    pub fn has_active_installments(&self) -> bool {
        self.installments.iter().any(Installment::is_active)
    }

    /// Sum of payment history amounts (display only; goal progress never
    /// derives from this)
    pub fn total_paid(&self) -> f64 {
        self.history
            .iter()
            .filter(|h| h.entry_type == EntryType::Payment)
            .map(|h| h.amount)
            .sum()
    }

    /// Record a payment: balance floors at 0, history gets a `Payment`
    /// entry with the post-event balance. Zero or negative amounts are
    /// ignored.
    pub fn record_payment(&mut self, amount: f64, note: &str, date: NaiveDate) {
        if amount <= 0.0 {
            return;
        }
        self.balance = (self.balance - amount).max(0.0);
        self.history.push(HistoryEntry {
            entry_type: EntryType::Payment,
            amount,
            note: note.to_string(),
            date,
            balance_after: self.balance,
        });
    }

    /// Record a purchase or fee charged to the balance
    pub fn record_charge(&mut self, amount: f64, note: &str, date: NaiveDate) {
        if amount <= 0.0 {
            return;
        }
        self.balance += amount;
        self.history.push(HistoryEntry {
            entry_type: EntryType::Charge,
            amount,
            note: note.to_string(),
            date,
            balance_after: self.balance,
        });
    }

    /// Add an installment schedule. Records a zero-amount history entry so
    /// the schedule's start shows up in the log; the balance is unchanged
    /// until accrual bills the first month.
    pub fn add_installment(&mut self, installment: Installment, date: NaiveDate) {
        let note = format!(
            "New installment added: {} ({:.2}/mo x {} months)",
            installment.name, installment.monthly_amount, installment.total_months
        );
        self.installments.push(installment);
        self.history.push(HistoryEntry {
            entry_type: EntryType::Installment,
            amount: 0.0,
            note,
            date,
            balance_after: self.balance,
        });
    }
}
