//! Loan export: CSV history, JSON dump, and a report snapshot
//!
//! Consumes a loan snapshot plus a simulator-produced cycle sequence and
//! formats them; all projection numbers are computed upstream.

use crate::loan::{Goal, Installment, Loan};
use crate::projection::Cycle;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// File name for an export: `ZeroDebt_<name>_<date>.<ext>` with the loan
/// name reduced to alphanumerics
pub fn export_filename(loan: &Loan, ext: &str, today: NaiveDate) -> String {
    let name: String = loan
        .display_name()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("ZeroDebt_{}_{}.{}", name, today.format("%Y-%m-%d"), ext)
}

/// Render the loan's transaction history as CSV.
pub fn history_csv(loan: &Loan) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(["Date", "Type", "Amount", "Balance After", "Note"])?;
    for entry in &loan.history {
        writer.write_record([
            entry.date.format("%Y-%m-%d").to_string(),
            entry.entry_type.label().to_string(),
            format!("{:.2}", entry.amount),
            format!("{:.2}", entry.balance_after),
            entry.note.clone(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Render a simulated projection as CSV, one row per cycle.
pub fn projection_csv(cycles: &[Cycle]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(["Cycle", "Start Balance", "Interest", "Installments", "Payment", "End Balance"])?;
    for (idx, c) in cycles.iter().enumerate() {
        writer.write_record([
            (idx + 1).to_string(),
            format!("{:.2}", c.start_bal),
            format!("{:.2}", c.interest),
            format!("{:.2}", c.inst_charge),
            format!("{:.2}", c.payment),
            format!("{:.2}", c.end_bal),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Full loan record as pretty-printed JSON.
pub fn loan_json(loan: &Loan) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(loan)?)
}

/// Snapshot report for one loan: summary figures, installments, goal, and
/// an embedded short projection
#[derive(Debug, Clone, Serialize)]
pub struct LoanReport<'a> {
    pub exported_at: NaiveDate,
    pub name: &'a str,
    pub bank: &'a str,
    pub balance: f64,
    pub total_paid: f64,
    pub interest_rate: f64,
    pub monthly_payment: f64,
    pub due_date: u32,
    pub installments: &'a [Installment],
    pub goal: Option<&'a Goal>,
    /// Simulator-produced cycles at the loan's planned payment
    pub projection: &'a [Cycle],
}

/// Assemble the report snapshot from a loan and its projection cycles.
pub fn build_report<'a>(loan: &'a Loan, cycles: &'a [Cycle], today: NaiveDate) -> LoanReport<'a> {
    LoanReport {
        exported_at: today,
        name: loan.display_name(),
        bank: &loan.bank,
        balance: loan.balance,
        total_paid: loan.total_paid(),
        interest_rate: loan.interest_rate,
        monthly_payment: loan.monthly_payment,
        due_date: loan.due_date,
        installments: &loan.installments,
        goal: loan.goal.as_ref(),
        projection: cycles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::InstallmentMode;
    use crate::projection::simulate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_loan() -> Loan {
        let mut loan = Loan::credit_card("cc1", "BDO", 10_000.0);
        loan.nickname = "Travel card".into();
        loan.interest_rate = 2.0;
        loan.monthly_payment = 2_000.0;
        loan.record_charge(500.0, "dinner, with \"friends\"", date(2026, 7, 2));
        loan.record_payment(1_500.0, "payday", date(2026, 7, 15));
        loan
    }

    #[test]
    fn test_filename_sanitized() {
        let loan = sample_loan();
        assert_eq!(
            export_filename(&loan, "csv", date(2026, 8, 6)),
            "ZeroDebt_Travel_card_2026-08-06.csv"
        );
    }

    #[test]
    fn test_history_csv_shape() {
        let csv = history_csv(&sample_loan()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "\"Date\",\"Type\",\"Amount\",\"Balance After\",\"Note\"");
        assert!(lines[1].contains("\"Charge\""));
        assert!(lines[1].contains("\"500.00\""));
        // Embedded quotes are doubled per CSV quoting rules
        assert!(lines[1].contains("\"\"friends\"\""));
        assert!(lines[2].contains("\"Payment\""));
        assert!(lines[2].contains("\"9000.00\""));
    }

    #[test]
    fn test_projection_csv_matches_cycles() {
        let loan = sample_loan();
        let cycles = simulate(
            loan.balance,
            loan.monthly_payment,
            loan.interest_rate,
            &loan.installments,
            InstallmentMode::Include,
            6,
        );
        let csv = projection_csv(&cycles).unwrap();
        // Header plus one row per cycle
        assert_eq!(csv.lines().count(), cycles.len() + 1);
        assert!(csv.lines().nth(1).unwrap().starts_with("1,"));
    }

    #[test]
    fn test_loan_json_round_trips() {
        let loan = sample_loan();
        let json = loan_json(&loan).unwrap();
        let back: Loan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, loan);
    }

    #[test]
    fn test_report_embeds_projection() {
        let loan = sample_loan();
        let cycles = simulate(
            loan.balance,
            loan.monthly_payment,
            loan.interest_rate,
            &loan.installments,
            InstallmentMode::Include,
            6,
        );
        let report = build_report(&loan, &cycles, date(2026, 8, 6));

        assert_eq!(report.name, "Travel card");
        assert_eq!(report.projection.len(), cycles.len());
        assert_eq!(report.total_paid, 1_500.0);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"projection\""));
    }
}
