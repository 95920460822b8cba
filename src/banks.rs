//! Static per-bank fee and rate reference data
//!
//! Used only to pre-fill default interest rates and show fee schedules
//! when adding a credit card; the engine treats `monthly_rate` as an
//! ordinary numeric input.

use serde::Serialize;

/// Rate used when a card has neither a stored rate nor a known bank
pub const DEFAULT_MONTHLY_RATE: f64 = 2.0;

/// Published card terms for one issuing bank
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bank {
    pub name: &'static str,
    pub short_name: &'static str,
    /// Monthly interest rate in percent
    pub monthly_rate: f64,
    /// Lower bound when the bank publishes a rate range
    pub monthly_rate_min: Option<f64>,
    pub late_fee: &'static str,
    pub cash_advance_fee: &'static str,
    pub annual_fee: &'static str,
}

impl Bank {
    /// Display text for the rate, as a range when a minimum is published
    pub fn rate_text(&self) -> String {
        match self.monthly_rate_min {
            Some(min) => format!("{}% - {}%", min, self.monthly_rate),
            None => format!("{}%", self.monthly_rate),
        }
    }
}

/// Look up a bank by its full name
pub fn find(name: &str) -> Option<&'static Bank> {
    PH_BANKS.iter().find(|b| b.name == name)
}

/// The full reference table, in display order
pub fn all() -> &'static [Bank] {
    PH_BANKS
}

/// Default rate for a named bank, falling back to the market-typical rate
pub fn default_rate(bank_name: &str) -> f64 {
    find(bank_name).map_or(DEFAULT_MONTHLY_RATE, |b| b.monthly_rate)
}

const STANDARD_CASH_ADVANCE: &str = "\u{20B1}200 or 3% of amount (whichever is higher)";

static PH_BANKS: &[Bank] = &[
    Bank {
        name: "Asia United Bank",
        short_name: "AUB",
        monthly_rate: 2.0,
        monthly_rate_min: None,
        late_fee: "\u{20B1}750 or unpaid minimum due (whichever is lower)",
        cash_advance_fee: STANDARD_CASH_ADVANCE,
        annual_fee: "\u{20B1}1,500 - \u{20B1}3,500",
    },
    Bank {
        name: "Bank of Commerce",
        short_name: "Bank of Commerce",
        monthly_rate: 2.0,
        monthly_rate_min: None,
        late_fee: "\u{20B1}1,000 or unpaid minimum due (whichever is lower)",
        cash_advance_fee: STANDARD_CASH_ADVANCE,
        annual_fee: "\u{20B1}1,250 - \u{20B1}2,500",
    },
    Bank {
        name: "BDO",
        short_name: "BDO",
        monthly_rate: 2.0,
        monthly_rate_min: None,
        late_fee: "7% of overdue amount",
        cash_advance_fee: STANDARD_CASH_ADVANCE,
        annual_fee: "\u{20B1}1,500 - \u{20B1}5,000",
    },
    Bank {
        name: "BPI",
        short_name: "BPI",
        monthly_rate: 2.0,
        monthly_rate_min: None,
        late_fee: "\u{20B1}850 or unpaid minimum due (whichever is lower)",
        cash_advance_fee: STANDARD_CASH_ADVANCE,
        annual_fee: "\u{20B1}1,500 - \u{20B1}4,000",
    },
    Bank {
        name: "Chinabank",
        short_name: "Chinabank",
        monthly_rate: 2.0,
        monthly_rate_min: None,
        late_fee: "\u{20B1}750 or unpaid minimum due (whichever is lower)",
        cash_advance_fee: STANDARD_CASH_ADVANCE,
        annual_fee: "\u{20B1}1,500 - \u{20B1}3,000",
    },
    Bank {
        name: "Citibank",
        short_name: "Citibank",
        monthly_rate: 2.0,
        monthly_rate_min: None,
        late_fee: "\u{20B1}1,500 or unpaid minimum due (whichever is lower)",
        cash_advance_fee: STANDARD_CASH_ADVANCE,
        annual_fee: "\u{20B1}2,500 - \u{20B1}5,000",
    },
    Bank {
        name: "EastWest Bank",
        short_name: "EastWest",
        monthly_rate: 2.0,
        monthly_rate_min: None,
        late_fee: "\u{20B1}1,500 or 8% of minimum payment",
        cash_advance_fee: STANDARD_CASH_ADVANCE,
        annual_fee: "\u{20B1}1,500 - \u{20B1}3,500",
    },
    Bank {
        name: "Equicom Savings",
        short_name: "Equicom",
        monthly_rate: 2.0,
        monthly_rate_min: None,
        late_fee: "6% (peso), 4% (dollar)",
        cash_advance_fee: STANDARD_CASH_ADVANCE,
        annual_fee: "\u{20B1}1,250 - \u{20B1}2,500",
    },
    Bank {
        name: "Home Credit",
        short_name: "Home Credit",
        monthly_rate: 2.0,
        monthly_rate_min: None,
        late_fee: "\u{20B1}500 or unpaid minimum due (whichever is lower)",
        cash_advance_fee: STANDARD_CASH_ADVANCE,
        annual_fee: "\u{20B1}0 - \u{20B1}1,500",
    },
    Bank {
        name: "HSBC",
        short_name: "HSBC",
        monthly_rate: 2.0,
        monthly_rate_min: None,
        late_fee: "\u{20B1}1,000 or unpaid minimum due (whichever is lower)",
        cash_advance_fee: STANDARD_CASH_ADVANCE,
        annual_fee: "\u{20B1}2,500 - \u{20B1}7,000",
    },
    Bank {
        name: "Landbank",
        short_name: "Landbank",
        monthly_rate: 2.0,
        monthly_rate_min: None,
        late_fee: "2.25% of unpaid minimum due",
        cash_advance_fee: STANDARD_CASH_ADVANCE,
        annual_fee: "\u{20B1}500 - \u{20B1}1,500",
    },
    Bank {
        name: "Maybank",
        short_name: "Maybank",
        monthly_rate: 2.0,
        monthly_rate_min: None,
        late_fee: "\u{20B1}700 or unpaid minimum due (whichever is lower)",
        cash_advance_fee: STANDARD_CASH_ADVANCE,
        annual_fee: "\u{20B1}1,500 - \u{20B1}3,000",
    },
    Bank {
        name: "Metrobank",
        short_name: "Metrobank",
        monthly_rate: 2.0,
        monthly_rate_min: None,
        late_fee: "\u{20B1}850 or unpaid minimum due (whichever is lower)",
        cash_advance_fee: STANDARD_CASH_ADVANCE,
        annual_fee: "\u{20B1}1,500 - \u{20B1}5,000",
    },
    Bank {
        name: "PNB",
        short_name: "PNB",
        monthly_rate: 2.0,
        monthly_rate_min: Some(1.88),
        late_fee: "7% (peso), 5% (dollar)",
        cash_advance_fee: STANDARD_CASH_ADVANCE,
        annual_fee: "\u{20B1}1,500 - \u{20B1}3,500",
    },
    Bank {
        name: "RCBC Bankard",
        short_name: "RCBC",
        monthly_rate: 2.0,
        monthly_rate_min: None,
        late_fee: "\u{20B1}850 or minimum due (whichever is lower)",
        cash_advance_fee: STANDARD_CASH_ADVANCE,
        annual_fee: "\u{20B1}1,500 - \u{20B1}3,500",
    },
    Bank {
        name: "Robinsons Bank",
        short_name: "Robinsons Bank",
        monthly_rate: 2.0,
        monthly_rate_min: None,
        late_fee: "\u{20B1}750",
        cash_advance_fee: STANDARD_CASH_ADVANCE,
        annual_fee: "\u{20B1}1,250 - \u{20B1}2,500",
    },
    Bank {
        name: "Security Bank",
        short_name: "Security Bank",
        monthly_rate: 2.0,
        monthly_rate_min: None,
        late_fee: "\u{20B1}750 or unpaid minimum due (whichever is lower)",
        cash_advance_fee: STANDARD_CASH_ADVANCE,
        annual_fee: "\u{20B1}1,500 - \u{20B1}4,000",
    },
    Bank {
        name: "Union Bank",
        short_name: "Union Bank",
        monthly_rate: 2.0,
        monthly_rate_min: None,
        late_fee: "\u{20B1}750 or unpaid minimum due (whichever is lower)",
        cash_advance_fee: STANDARD_CASH_ADVANCE,
        annual_fee: "\u{20B1}1,500 - \u{20B1}3,500",
    },
];
