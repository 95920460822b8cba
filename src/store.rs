//! Persisted store: loans, summary filters, and the accrual cursor
//!
//! One JSON file holds everything, so loans and the cursor are always
//! written together: a crash can never leave an advanced cursor alongside
//! unpersisted balance changes.

use crate::accrual::YearMonth;
use crate::loan::Loan;
use crate::summary::SummaryFilters;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default store location, relative to the working directory
pub const DEFAULT_STORE_PATH: &str = "zerodebt.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write store: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize store: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The complete persisted application state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default)]
    pub loans: Vec<Loan>,

    #[serde(default)]
    pub filters: SummaryFilters,

    /// Last year-month for which monthly accrual was applied; absent
    /// before the first run
    #[serde(default)]
    pub last_accrual: Option<YearMonth>,
}

impl Store {
    /// Load the store from disk.
    ///
    /// A missing file is a first run and yields an empty store. A file
    /// that fails to parse degrades to an empty store with a warning
    /// rather than an error: a malformed record must never prevent the
    /// app from starting.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Store::default(),
            Err(e) => {
                warn!("could not read store at {}: {e}", path.display());
                return Store::default();
            }
        };

        match serde_json::from_str::<Store>(&raw) {
            Ok(mut store) => {
                store.normalize();
                store
            }
            Err(e) => {
                warn!("store at {} is malformed, starting empty: {e}", path.display());
                Store::default()
            }
        }
    }

    /// Persist the whole store in a single write.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Coerce out-of-range stored values so malformed records degrade to
    /// inert loans instead of crashing the engine: non-finite or negative
    /// amounts become 0, due dates clamp into 1..=31, and installment
    /// `paid_months` never exceeds `total_months`.
    fn normalize(&mut self) {
        for loan in &mut self.loans {
            loan.balance = sane(loan.balance);
            loan.interest_rate = sane(loan.interest_rate);
            loan.monthly_payment = sane(loan.monthly_payment);
            loan.credit_limit = sane(loan.credit_limit);
            loan.total_amount = sane(loan.total_amount);
            loan.due_date = loan.due_date.clamp(1, 31);
            for inst in &mut loan.installments {
                inst.monthly_amount = sane(inst.monthly_amount);
                inst.paid_months = inst.paid_months.min(inst.total_months);
            }
        }
    }

    pub fn find_loan(&self, id: &str) -> Option<&Loan> {
        self.loans.iter().find(|l| l.id == id)
    }

    pub fn find_loan_mut(&mut self, id: &str) -> Option<&mut Loan> {
        self.loans.iter_mut().find(|l| l.id == id)
    }
}

fn sane(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::Installment;
    use std::env;

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(format!("zerodebt_store_test_{name}.json"))
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let store = Store::load(Path::new("/nonexistent/zerodebt.json"));
        assert!(store.loans.is_empty());
        assert!(store.last_accrual.is_none());
    }

    #[test]
    fn test_round_trip() {
        let path = temp_path("round_trip");
        let mut store = Store::default();
        let mut loan = Loan::credit_card("cc1", "BDO", 12_500.0);
        loan.interest_rate = 2.0;
        store.loans.push(loan);
        store.last_accrual = Some("2026-08".parse().unwrap());

        store.save(&path).unwrap();
        let loaded = Store::load(&path);
        fs::remove_file(&path).ok();

        assert_eq!(loaded, store);
    }

    #[test]
    fn test_malformed_file_degrades_to_empty() {
        let path = temp_path("malformed");
        fs::write(&path, "{not json").unwrap();

        let store = Store::load(&path);
        fs::remove_file(&path).ok();

        assert!(store.loans.is_empty());
    }

    #[test]
    fn test_normalize_clamps_bad_values() {
        let path = temp_path("normalize");
        let json = r#"{
            "loans": [{
                "id": "cc1",
                "type": "credit_card",
                "balance": -500.0,
                "due_date": 99,
                "installments": [{
                    "name": "TV",
                    "monthly_amount": 1000.0,
                    "total_months": 6,
                    "paid_months": 10
                }]
            }]
        }"#;
        fs::write(&path, json).unwrap();

        let store = Store::load(&path);
        fs::remove_file(&path).ok();

        let loan = &store.loans[0];
        assert_eq!(loan.balance, 0.0);
        assert_eq!(loan.due_date, 31);
        assert_eq!(loan.installments[0].paid_months, 6);
        assert!(!loan.installments[0].is_active());
    }

    #[test]
    fn test_cursor_persists_as_plain_string() {
        let mut store = Store::default();
        store.last_accrual = Some(YearMonth::new(2026, 3));
        let json = serde_json::to_string(&store).unwrap();
        assert!(json.contains("\"2026-03\""));

        let back: Store = serde_json::from_str(&json).unwrap();
        assert_eq!(back.last_accrual, Some(YearMonth::new(2026, 3)));
    }

    #[test]
    fn test_find_loan() {
        let mut store = Store::default();
        store.loans.push(Loan::credit_card("cc1", "BDO", 100.0));
        store.loans.push({
            let mut l = Loan::credit_card("cc2", "BPI", 200.0);
            l.installments.push(Installment {
                name: "X".into(),
                monthly_amount: 10.0,
                total_months: 2,
                paid_months: 0,
            });
            l
        });

        assert!(store.find_loan("cc2").is_some());
        assert!(store.find_loan("nope").is_none());
        store.find_loan_mut("cc1").unwrap().balance = 0.0;
        assert_eq!(store.find_loan("cc1").unwrap().balance, 0.0);
    }
}
