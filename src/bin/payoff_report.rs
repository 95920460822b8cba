//! Dump a full payoff projection for one loan to CSV
//!
//! Runs the cycle simulator to the 360-month horizon at the loan's
//! planned payment and writes one row per cycle, for spreadsheet
//! comparison.

use anyhow::{bail, Context, Result};
use chrono::Local;
use std::path::Path;
use zerodebt::export::projection_csv;
use zerodebt::projection::{simulate, summarize, MAX_PAYOFF_MONTHS};
use zerodebt::store::{Store, DEFAULT_STORE_PATH};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let store_path = DEFAULT_STORE_PATH;
    let store = Store::load(Path::new(store_path));

    // Loan id from argv, else the first loan carrying a balance
    let loan = match args.get(1) {
        Some(id) => store
            .find_loan(id)
            .with_context(|| format!("no loan with id {id}"))?,
        None => match store.loans.iter().find(|l| l.balance > 0.0) {
            Some(loan) => loan,
            None => bail!("no loans with an outstanding balance in {store_path}"),
        },
    };

    println!("Loan: {} ({})", loan.display_name(), loan.id);
    println!("  Balance: {:.2}", loan.balance);
    println!("  Rate: {}%/mo", loan.interest_rate);
    println!("  Planned payment: {:.2}/mo", loan.monthly_payment);
    println!();

    let cycles = simulate(
        loan.balance,
        loan.monthly_payment,
        loan.projection_rate(),
        &loan.installments,
        loan.include_installments,
        MAX_PAYOFF_MONTHS,
    );

    if cycles.is_empty() {
        bail!("nothing to project: balance and planned payment must both be positive");
    }

    let csv_path = "payoff_projection.csv";
    std::fs::write(csv_path, projection_csv(&cycles)?)?;
    println!("Full projection written to: {csv_path}");

    let summary = summarize(&cycles);
    println!("\nSummary:");
    println!("  Cycles: {}", cycles.len());
    println!("  Total Paid: {:.2}", summary.total_paid);
    println!("  Total Interest: {:.2}", summary.total_interest);
    if summary.paid_off {
        let done = Local::now().date_naive() + chrono::Months::new(cycles.len() as u32);
        println!("  Paid off by: {}", done.format("%B %Y"));
    } else if summary.balance_growing {
        println!("  Balance is growing: payment doesn't cover charges.");
    } else {
        println!("  Not paid off within the {MAX_PAYOFF_MONTHS}-month horizon.");
    }

    // Milestone cycles for spot checks
    let milestones = [1usize, 2, 6, 12, 24, 60, 120];
    println!("\nKey cycles:");
    for &m in &milestones {
        if let Some(c) = cycles.get(m - 1) {
            println!(
                "  Cycle {:>3}: start={:.2} interest={:.2} inst={:.2} end={:.2}",
                m, c.start_bal, c.interest, c.inst_charge, c.end_bal
            );
        }
    }

    Ok(())
}
