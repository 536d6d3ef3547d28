use anyhow::Result;
use chrono::{Days, Utc};

use crate::models::{Expense, PaymentMethod, Service, Transaction};
use crate::repo::Ledger;
use crate::report;
use crate::store::RecordStore;

pub(crate) fn as_cli<S: RecordStore>(args: &[String], ledger: &Ledger<S>) -> Result<()> {
    match args[1].as_str() {
        "services" => cli_services(ledger),
        "add-service" => cli_add_service(&args[2..], ledger),
        "rm-service" => cli_rm_service(&args[2..], ledger),
        "txns" => cli_txns(ledger),
        "add-txn" => cli_add_txn(&args[2..], ledger),
        "expenses" => cli_expenses(ledger),
        "add-expense" => cli_add_expense(&args[2..], ledger),
        "rm-expense" => cli_rm_expense(&args[2..], ledger),
        "summary" | "s" => cli_summary(&args[2..], ledger),
        "week" => cli_week(ledger),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("trimbook {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("TrimBook — local-only barbershop point-of-sale and bookkeeping");
    println!();
    println!("Usage: trimbook [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Current-month summary");
    println!("  services                      List the service price list");
    println!("  add-service <name> <price>    Add or rename a service");
    println!("  rm-service <id>               Remove a service from the list");
    println!("  txns                          List recent sales");
    println!("  add-txn <customer> <service-id>   Record a sale");
    println!("    --pay <Cash|Transfer|QRIS>  Payment method (default: Cash)");
    println!("  expenses                      List recorded expenses");
    println!("  add-expense <title> <amount>  Record an outflow");
    println!("  rm-expense <id>               Delete an expense");
    println!("  summary [YYYY-MM]             Monthly income/expense/profit report");
    println!("  week                          Daily income over the last 7 days");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

// ── Services ─────────────────────────────────────────────────

fn cli_services<S: RecordStore>(ledger: &Ledger<S>) -> Result<()> {
    let services = ledger.services()?;
    if services.is_empty() {
        println!("No services on the price list.");
        return Ok(());
    }
    for service in &services {
        println!(
            "{:>13}  {:<24} {}",
            service.id,
            service.name,
            format_amount(service.price)
        );
    }
    Ok(())
}

fn cli_add_service<S: RecordStore>(args: &[String], ledger: &Ledger<S>) -> Result<()> {
    let [name, price] = args else {
        anyhow::bail!("Usage: trimbook add-service <name> <price>");
    };
    let price: i64 = price
        .parse()
        .map_err(|_| anyhow::anyhow!("Price must be a whole number: {price}"))?;

    let service = Service::new(next_id(), name.clone(), price);
    ledger.upsert_service(&service)?;
    println!("Added service '{}' at {}", service.name, format_amount(price));
    Ok(())
}

fn cli_rm_service<S: RecordStore>(args: &[String], ledger: &Ledger<S>) -> Result<()> {
    let [id] = args else {
        anyhow::bail!("Usage: trimbook rm-service <id>");
    };
    ledger.remove_service(id)?;
    println!("Removed service {id} (past sales keep their recorded price)");
    Ok(())
}

// ── Transactions ─────────────────────────────────────────────

fn cli_txns<S: RecordStore>(ledger: &Ledger<S>) -> Result<()> {
    let transactions = ledger.transactions()?;
    if transactions.is_empty() {
        println!("No sales recorded yet.");
        return Ok(());
    }
    // Most recent first, capped like the dashboard's recent-activity list.
    for txn in transactions.iter().rev().take(10) {
        println!(
            "{}  {:<16} {:<20} {:<8} {}",
            txn.date.get(..10).unwrap_or(&txn.date),
            txn.customer_name,
            txn.service_name,
            txn.payment_method,
            format_amount(txn.amount)
        );
    }
    Ok(())
}

fn cli_add_txn<S: RecordStore>(args: &[String], ledger: &Ledger<S>) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: trimbook add-txn <customer> <service-id> [--pay <method>]");
    }
    let customer = &args[0];
    let service_id = &args[1];

    let method = match args.windows(2).find(|w| w[0] == "--pay") {
        Some(w) => PaymentMethod::parse(&w[1]).ok_or_else(|| {
            let all: Vec<&str> = PaymentMethod::all().iter().map(|m| m.as_str()).collect();
            anyhow::anyhow!("Unknown payment method '{}'. One of: {}", w[1], all.join(", "))
        })?,
        None => PaymentMethod::Cash,
    };

    let services = ledger.services()?;
    let service = services
        .iter()
        .find(|s| s.id == *service_id)
        .ok_or_else(|| anyhow::anyhow!("Service '{service_id}' not found. See: trimbook services"))?;

    let txn = Transaction::new(next_id(), customer.clone(), service, method);
    ledger.append_transaction(&txn)?;
    println!(
        "Recorded {} for {} ({})",
        service.name,
        customer,
        format_amount(txn.amount)
    );
    Ok(())
}

// ── Expenses ─────────────────────────────────────────────────

fn cli_expenses<S: RecordStore>(ledger: &Ledger<S>) -> Result<()> {
    let expenses = ledger.expenses()?;
    if expenses.is_empty() {
        println!("No expenses recorded.");
        return Ok(());
    }
    for expense in expenses.iter().rev() {
        println!(
            "{:>13}  {}  {:<24} {}",
            expense.id,
            expense.date.get(..10).unwrap_or(&expense.date),
            expense.title,
            format_amount(expense.amount)
        );
    }
    Ok(())
}

fn cli_add_expense<S: RecordStore>(args: &[String], ledger: &Ledger<S>) -> Result<()> {
    let [title, amount] = args else {
        anyhow::bail!("Usage: trimbook add-expense <title> <amount>");
    };
    let amount: i64 = amount
        .parse()
        .map_err(|_| anyhow::anyhow!("Amount must be a whole number: {amount}"))?;

    let expense = Expense::new(next_id(), title.clone(), amount);
    ledger.append_expense(&expense)?;
    println!("Recorded expense '{title}' of {}", format_amount(amount));
    Ok(())
}

fn cli_rm_expense<S: RecordStore>(args: &[String], ledger: &Ledger<S>) -> Result<()> {
    let [id] = args else {
        anyhow::bail!("Usage: trimbook rm-expense <id>");
    };
    ledger.remove_expense(id)?;
    println!("Removed expense {id}");
    Ok(())
}

// ── Reports ──────────────────────────────────────────────────

pub(crate) fn cli_summary<S: RecordStore>(args: &[String], ledger: &Ledger<S>) -> Result<()> {
    let month = match args.first() {
        Some(m) => {
            if m.len() != 7 || m.as_bytes()[4] != b'-' {
                anyhow::bail!("Month must be in YYYY-MM format, got: {m}");
            }
            m.clone()
        }
        None => Utc::now().format("%Y-%m").to_string(),
    };

    let transactions = ledger.transactions()?;
    let expenses = ledger.expenses()?;
    let month_txns: Vec<Transaction> = report::filter_by_date_prefix(&transactions, &month)
        .into_iter()
        .cloned()
        .collect();
    let month_expenses: Vec<Expense> = report::filter_by_date_prefix(&expenses, &month)
        .into_iter()
        .cloned()
        .collect();

    let summary = report::compute_summary(&month_txns, &month_expenses);
    let margin = report::margin_percent(summary.income, summary.profit);

    let today = Utc::now().format("%Y-%m-%d").to_string();
    let today_income = report::sum_amount(report::filter_by_date_prefix(&transactions, &today));

    println!("Summary for {month}");
    println!("  Income:       {}", format_amount(summary.income));
    println!("  Expenses:     {}", format_amount(summary.expense));
    println!("  Net profit:   {}", format_amount(summary.profit));
    println!("  Margin:       {margin}%");
    println!("  Sales count:  {}", summary.transaction_count);
    println!("  Today:        {}", format_amount(today_income));
    Ok(())
}

fn cli_week<S: RecordStore>(ledger: &Ledger<S>) -> Result<()> {
    let transactions = ledger.transactions()?;
    let today = Utc::now().date_naive();
    let start = today
        .checked_sub_days(Days::new(6))
        .unwrap_or(today);

    let buckets = report::bucket_by_day(&transactions, start, 7);
    let max = buckets.iter().map(|b| b.income).max().unwrap_or(0);

    println!("Daily income, last 7 days");
    for bucket in &buckets {
        let width = if max > 0 {
            (bucket.income * 24 / max) as usize
        } else {
            0
        };
        println!(
            "  {}  {:<24} {}",
            bucket.day,
            "#".repeat(width),
            format_amount(bucket.income)
        );
    }
    Ok(())
}

// ── Helpers ──────────────────────────────────────────────────

/// Opaque identifier for new records: millisecond timestamp as a string.
/// Identity is assigned here, at the presentation layer, never by the
/// repository.
fn next_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Format an integer amount with thousand separators, e.g. `50000` →
/// `"Rp 50,000"`.
pub(crate) fn format_amount(val: i64) -> String {
    let abs = val.unsigned_abs().to_string();
    let with_commas: String = abs
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < 0 {
        format!("-Rp {with_commas}")
    } else {
        format!("Rp {with_commas}")
    }
}
