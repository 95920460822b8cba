//! ZeroDebt CLI
//!
//! Command-line interface over the debt tracking and projection engine.
//! Every invocation starts with a monthly accrual pass, mirroring the
//! single startup pass the engine contract requires.

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zerodebt::loan::{Installment, Loan, LoanType};
use zerodebt::projection::{self, PayoffMonths};
use zerodebt::store::{Store, DEFAULT_STORE_PATH};
use zerodebt::{accrual, banks, export, goal, summary};

#[derive(Parser)]
#[command(name = "zerodebt", version, about = "Track debts and project their payoff")]
struct Cli {
    /// Path to the store file
    #[arg(long, default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List loans with payoff estimates
    List,

    /// Cross-loan totals and combined payoff estimate
    Summary {
        /// Exclude a loan type from the rollup (repeatable)
        #[arg(long, value_enum)]
        exclude: Vec<TypeArg>,
    },

    /// Add a credit card
    AddCard {
        #[arg(long)]
        bank: String,
        #[arg(long)]
        balance: f64,
        /// Monthly interest rate in percent; defaults to the bank's
        /// published rate
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long, default_value_t = 0.0)]
        payment: f64,
        #[arg(long, default_value_t = 1)]
        due_date: u32,
        #[arg(long, default_value_t = 0.0)]
        credit_limit: f64,
        #[arg(long, default_value = "")]
        nickname: String,
    },

    /// Add a personal loan
    AddPersonal {
        #[arg(long)]
        lender: String,
        #[arg(long)]
        balance: f64,
        #[arg(long, default_value_t = 0.0)]
        payment: f64,
        #[arg(long, default_value_t = 0)]
        term: u32,
        #[arg(long, default_value_t = 1)]
        due_date: u32,
    },

    /// Record a payment against a loan
    Pay {
        id: String,
        amount: f64,
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Record a charge on a credit card
    Charge {
        id: String,
        amount: f64,
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Add an installment schedule to a credit card
    AddInstallment {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        monthly: f64,
        #[arg(long)]
        months: u32,
        #[arg(long, default_value_t = 0)]
        paid: u32,
    },

    /// How long a monthly payment takes to clear a loan
    CalcMonths { id: String, monthly: f64 },

    /// Monthly payment needed to clear a loan in a target number of months
    CalcPayment { id: String, months: u32 },

    /// Three-tier payoff plan
    Plan { id: String },

    /// Cycle-by-cycle projection at the planned (or given) payment
    Simulate {
        id: String,
        #[arg(long)]
        payment: Option<f64>,
        #[arg(long, default_value_t = 6)]
        cycles: u32,
    },

    /// Payoff goal operations
    #[command(subcommand)]
    Goal(GoalCommand),

    /// Show the bank reference table
    Banks,

    /// Export a loan
    Export {
        id: String,
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum GoalCommand {
    /// Commit a payoff goal, snapshotting the current balance
    Set {
        id: String,
        monthly: f64,
        months: u32,
    },
    /// Remove a loan's goal
    Remove { id: String },
    /// Show goal progress and the cycle breakdown
    Show { id: String },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum TypeArg {
    CreditCard,
    Personal,
}

impl From<TypeArg> for LoanType {
    fn from(t: TypeArg) -> Self {
        match t {
            TypeArg::CreditCard => LoanType::CreditCard,
            TypeArg::Personal => LoanType::Personal,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
    Report,
}

fn php(amount: f64) -> String {
    format!("\u{20B1}{amount:.2}")
}

fn new_loan_id(today: NaiveDate) -> String {
    // Opaque and unique enough for a single-user store: date plus a
    // sub-second timestamp suffix
    let millis = Local::now().timestamp_subsec_millis();
    format!("loan-{}-{millis:03}", today.format("%Y%m%d"))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let today = Local::now().date_naive();

    let mut store = Store::load(&cli.store);

    // Monthly accrual pass: at most once per startup, persisted together
    // with the advanced cursor
    let report = accrual::run(&mut store.loans, store.last_accrual, today);
    let cursor_moved = store.last_accrual != Some(report.cursor);
    store.last_accrual = Some(report.cursor);
    if report.entries_applied > 0 || cursor_moved {
        store.save(&cli.store)?;
    }
    if report.months_missed > 0 {
        println!(
            "Auto-applied interest and installments for {} month(s).\n",
            report.months_missed
        );
    }

    match cli.command {
        Command::List => cmd_list(&store, today),
        Command::Summary { exclude } => cmd_summary(&store, &exclude, today),
        Command::AddCard {
            bank,
            balance,
            rate,
            payment,
            due_date,
            credit_limit,
            nickname,
        } => {
            let mut loan = Loan::credit_card(new_loan_id(today), bank.clone(), balance);
            loan.interest_rate = rate.unwrap_or_else(|| banks::default_rate(&bank));
            loan.monthly_payment = payment;
            loan.due_date = due_date.clamp(1, 31);
            loan.credit_limit = credit_limit;
            loan.nickname = nickname;
            loan.created_at = Some(today);
            println!("Added {} ({})", loan.display_name(), loan.id);
            store.loans.push(loan);
            store.save(&cli.store)?;
            Ok(())
        }
        Command::AddPersonal {
            lender,
            balance,
            payment,
            term,
            due_date,
        } => {
            let mut loan = Loan::personal(new_loan_id(today), lender, balance);
            loan.monthly_payment = payment;
            loan.loan_term = term;
            loan.due_date = due_date.clamp(1, 31);
            loan.created_at = Some(today);
            println!("Added {} ({})", loan.display_name(), loan.id);
            store.loans.push(loan);
            store.save(&cli.store)?;
            Ok(())
        }
        Command::Pay { id, amount, note } => {
            let loan = find_mut(&mut store, &id)?;
            loan.record_payment(amount, &note, today);
            println!("Balance: {}", php(loan.balance));
            store.save(&cli.store)?;
            Ok(())
        }
        Command::Charge { id, amount, note } => {
            let loan = find_mut(&mut store, &id)?;
            loan.record_charge(amount, &note, today);
            println!("Balance: {}", php(loan.balance));
            store.save(&cli.store)?;
            Ok(())
        }
        Command::AddInstallment {
            id,
            name,
            monthly,
            months,
            paid,
        } => {
            if monthly <= 0.0 || months == 0 {
                bail!("installment needs a positive monthly amount and month count");
            }
            let loan = find_mut(&mut store, &id)?;
            loan.add_installment(
                Installment {
                    name,
                    monthly_amount: monthly,
                    total_months: months,
                    paid_months: paid.min(months),
                },
                today,
            );
            store.save(&cli.store)?;
            Ok(())
        }
        Command::CalcMonths { id, monthly } => cmd_calc_months(&store, &id, monthly, today),
        Command::CalcPayment { id, months } => cmd_calc_payment(&store, &id, months, today),
        Command::Plan { id } => cmd_plan(&store, &id),
        Command::Simulate { id, payment, cycles } => cmd_simulate(&store, &id, payment, cycles),
        Command::Goal(goal_cmd) => cmd_goal(&mut store, &cli.store, goal_cmd, today),
        Command::Banks => {
            for bank in banks::all() {
                println!(
                    "{:<20} {:>12}  late fee: {}",
                    bank.name,
                    bank.rate_text(),
                    bank.late_fee
                );
            }
            Ok(())
        }
        Command::Export { id, format, out } => cmd_export(&store, &id, format, out, today),
    }
}

fn find<'a>(store: &'a Store, id: &str) -> Result<&'a Loan> {
    store
        .find_loan(id)
        .with_context(|| format!("no loan with id {id}"))
}

fn find_mut<'a>(store: &'a mut Store, id: &str) -> Result<&'a mut Loan> {
    store
        .find_loan_mut(id)
        .with_context(|| format!("no loan with id {id}"))
}

fn cmd_list(store: &Store, today: NaiveDate) -> Result<()> {
    if store.loans.is_empty() {
        println!("No loans yet.");
        return Ok(());
    }

    for loan in &store.loans {
        println!("{} [{}]", loan.display_name(), loan.id);
        println!("  Balance: {}", php(loan.balance));
        if loan.is_paid_off() {
            println!("  PAID OFF");
            continue;
        }

        let estimate = projection::payoff_date(loan, today);
        match (estimate.months, estimate.date) {
            (PayoffMonths::Finite(m), Some(date)) => {
                println!("  Est. paid off: {} ({m} months)", date.format("%B %Y"));
            }
            (PayoffMonths::Unbounded, _) if loan.monthly_payment > 0.0 => {
                println!("  Payment doesn't cover monthly charges. Increase your monthly payment.");
            }
            _ => {}
        }

        if loan.loan_type == LoanType::CreditCard && loan.balance > 0.0 {
            let interest = loan.balance * loan.interest_rate / 100.0;
            println!("  Est. monthly interest: {}", php(interest));
        }
        for inst in &loan.installments {
            println!(
                "  Installment {}: {}/mo, {}/{} months",
                inst.name,
                php(inst.monthly_amount),
                inst.paid_months,
                inst.total_months
            );
        }
        if let Some(p) = goal::progress(loan) {
            println!(
                "  Goal: {}% paid down ({}), remaining {}",
                p.percent,
                php(p.paid_down),
                php(p.remaining)
            );
        }
    }
    Ok(())
}

fn cmd_summary(store: &Store, exclude: &[TypeArg], today: NaiveDate) -> Result<()> {
    let mut filters = store.filters.clone();
    for t in exclude {
        filters.set((*t).into(), false);
    }

    let summary = summary::summarize_loans(&store.loans, &filters, today);
    println!("Total debt: {}", php(summary.total));
    for (loan_type, amount) in &summary.by_type {
        println!("  {}: {}", loan_type.label(), php(*amount));
    }
    if let Some(date) = summary.estimated_payoff {
        print!("Est. all paid off by: {}", date.format("%B %Y"));
        if summary.has_unpayable {
            print!(" (some loans need higher payments)");
        }
        println!();
    } else if summary.total > 0.0 {
        println!("Plan your payoff below.");
    }
    Ok(())
}

fn cmd_calc_months(store: &Store, id: &str, monthly: f64, today: NaiveDate) -> Result<()> {
    let loan = find(store, id)?;
    let rate = loan.projection_rate();

    if !projection::covers_monthly_charges(
        monthly,
        loan.balance,
        rate,
        &loan.installments,
        loan.include_installments,
    ) {
        let charges = projection::monthly_charges(
            loan.balance,
            rate,
            &loan.installments,
            loan.include_installments,
        );
        println!("Payment does not cover monthly charges.");
        println!("  Total charges: {}", php(charges));
        println!("  Your payment:  {}", php(monthly));
        println!("  Deficit:       {}", php(charges - monthly));
        return Ok(());
    }

    match projection::months_to_payoff(loan.balance, monthly, rate) {
        PayoffMonths::AlreadyPaid => println!("Already paid off."),
        PayoffMonths::Unbounded => {
            println!("Balance will not decrease at this payment. Try a higher amount.");
        }
        PayoffMonths::Finite(months) => {
            let total_paid = monthly * months as f64;
            let date = today + chrono::Months::new(months);
            println!("Paying {}/month:", php(monthly));
            println!("  Paid off in {months} months (by {})", date.format("%B %Y"));
            println!("  Total paid: {}", php(total_paid));
            println!("  Total interest: {}", php(total_paid - loan.balance));
        }
    }
    Ok(())
}

fn cmd_calc_payment(store: &Store, id: &str, months: u32, today: NaiveDate) -> Result<()> {
    if months == 0 {
        bail!("target months must be positive");
    }
    if months > projection::MAX_PAYOFF_MONTHS {
        bail!("maximum projection period is 30 years (360 months)");
    }
    let loan = find(store, id)?;
    let required = projection::required_payment(loan.balance, months, loan.projection_rate());
    let total_paid = required * months as f64;
    let date = today + chrono::Months::new(months);

    println!("To finish in {months} months:");
    println!("  Pay {}/month (target {})", php(required), date.format("%B %Y"));
    println!("  Total paid: {}", php(total_paid));
    println!("  Total interest: {}", php(total_paid - loan.balance));
    Ok(())
}

fn cmd_plan(store: &Store, id: &str) -> Result<()> {
    let loan = find(store, id)?;
    let plan = projection::build_plan(loan);

    for tier in &plan.tiers {
        print!("{:<12} {}/mo: ", tier.kind.label(), php(tier.monthly_payment));
        if tier.insufficient {
            println!("insufficient");
        } else if !tier.summary.paid_off {
            println!("30+ years");
        } else {
            print!(
                "{} months, interest {}",
                tier.summary.months.unwrap_or(0),
                php(tier.summary.total_interest)
            );
            if tier.interest_saved > 0.0 {
                print!(", saves {}", php(tier.interest_saved));
            }
            println!();
        }
    }
    Ok(())
}

fn cmd_simulate(store: &Store, id: &str, payment: Option<f64>, cycles: u32) -> Result<()> {
    let loan = find(store, id)?;
    let pay = payment.unwrap_or(loan.monthly_payment);
    let sim = projection::simulate(
        loan.balance,
        pay,
        loan.projection_rate(),
        &loan.installments,
        loan.include_installments,
        cycles,
    );

    if sim.is_empty() {
        println!("Nothing to simulate: balance and payment must both be positive.");
        return Ok(());
    }

    println!(
        "{:>5} {:>14} {:>12} {:>12} {:>12} {:>14}",
        "Cycle", "Start", "Interest", "Installments", "Payment", "End"
    );
    for (idx, c) in sim.iter().enumerate() {
        println!(
            "{:>5} {:>14} {:>12} {:>12} {:>12} {:>14}",
            idx + 1,
            php(c.start_bal),
            php(c.interest),
            php(c.inst_charge),
            php(c.payment),
            php(c.end_bal)
        );
    }

    let summary = projection::summarize(&sim);
    if summary.paid_off {
        println!("Paid off in {} cycles.", sim.len());
    } else if summary.balance_growing {
        println!("Balance is growing: payment doesn't cover charges.");
    }
    Ok(())
}

fn cmd_goal(
    store: &mut Store,
    store_path: &PathBuf,
    cmd: GoalCommand,
    today: NaiveDate,
) -> Result<()> {
    match cmd {
        GoalCommand::Set { id, monthly, months } => {
            let loan = find_mut(store, &id)?;
            goal::set_goal(loan, monthly, months, today);
            println!("Goal set: {}/mo for {months} months.", php(monthly));
            store.save(store_path)?;
        }
        GoalCommand::Remove { id } => {
            let loan = find_mut(store, &id)?;
            goal::remove_goal(loan);
            println!("Goal removed.");
            store.save(store_path)?;
        }
        GoalCommand::Show { id } => {
            let loan = find(store, &id)?;
            let Some(g) = loan.goal.as_ref() else {
                println!("No goal set.");
                return Ok(());
            };
            let Some(p) = goal::progress(loan) else {
                return Ok(());
            };
            let cycles = goal::cycles_elapsed(g, loan.due_date, today);

            println!(
                "Goal: {}/mo for {} months (target {})",
                php(g.monthly_payment),
                g.target_months,
                g.target_date.format("%B %Y")
            );
            println!(
                "Debt progress: {}% \u{2022} Cycle progress: {}/{}",
                p.percent, cycles, g.target_months
            );
            println!(
                "Paid down: {} \u{2022} Remaining: {}",
                php(p.paid_down),
                php(p.remaining)
            );
            if p.complete {
                println!("Goal reached!");
            }

            for (idx, c) in goal::breakdown(loan).iter().enumerate() {
                println!(
                    "  Month {}: start {} + interest {}{} - payment {} = {}",
                    idx + 1,
                    php(c.start_bal),
                    php(c.interest),
                    if c.inst_charge > 0.0 {
                        format!(" + installments {}", php(c.inst_charge))
                    } else {
                        String::new()
                    },
                    php(c.payment),
                    php(c.end_bal)
                );
            }
        }
    }
    Ok(())
}

fn cmd_export(
    store: &Store,
    id: &str,
    format: ExportFormat,
    out: Option<PathBuf>,
    today: NaiveDate,
) -> Result<()> {
    let loan = find(store, id)?;

    let (content, ext) = match format {
        ExportFormat::Csv => (export::history_csv(loan)?, "csv"),
        ExportFormat::Json => (export::loan_json(loan)?, "json"),
        ExportFormat::Report => {
            let cycles = projection::simulate(
                loan.balance,
                loan.monthly_payment,
                loan.projection_rate(),
                &loan.installments,
                loan.include_installments,
                6,
            );
            let report = export::build_report(loan, &cycles, today);
            (serde_json::to_string_pretty(&report)?, "json")
        }
    };

    match out {
        Some(path) => {
            std::fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => {
            println!("{content}");
            log::debug!(
                "suggested filename: {}",
                export::export_filename(loan, ext, today)
            );
        }
    }
    Ok(())
}
