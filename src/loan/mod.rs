//! Loan data model and direct balance mutations

mod data;

pub use data::{EntryType, Goal, HistoryEntry, Installment, InstallmentMode, Loan, LoanType};
