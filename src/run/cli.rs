use anyhow::Result;

use crate::allocate;
use crate::config::take_flag;
use crate::db::{Database, Table};
use crate::ledger;
use crate::models::{parse_month, AllocationCategory, AllocationInputs, Session};
use crate::report;
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "allocate" => cli_allocate(&args[2..], db),
        "expense" | "e" => cli_expense(&args[2..], db),
        "expenses" => cli_expenses(&args[2..], db),
        "delete-expense" => cli_delete_expense(&args[2..], db),
        "allocations" => cli_allocations(&args[2..], db),
        "months" => cli_months(db),
        "report" | "r" => cli_report(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("budgetplan {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("BudgetPlan - split a salary across categories and track expenses");
    println!();
    println!("Usage: budgetplan [--db <path>] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                  Launch interactive TUI");
    println!("  allocate <YYYY-MM> --salary <amount>    Allocate a month's salary");
    println!("    --housing <pct> --transportation <pct> --food <pct> --utilities <pct>");
    println!("    --entertainment <pct> --savings <pct> --investment <pct>");
    println!("  expense <YYYY-MM> <YYYY-MM-DD> <category> <amount> [description]");
    println!("                                          Record an expense");
    println!("  expenses <YYYY-MM>                      List expenses for a month");
    println!("  delete-expense <id>                     Delete an expense");
    println!("  allocations <YYYY-MM>                   List allocations for a month");
    println!("  months                                  List months with any data");
    println!("  report <YYYY-MM> [--salary <amount>]    Print chart data for a month");
    println!("  --help, -h                              Show this help");
    println!("  --version, -V                           Show version");
}

fn month_arg(args: &[String], usage: &str) -> Result<String> {
    let raw = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .ok_or_else(|| anyhow::anyhow!("Usage: {usage}"))?;
    Ok(parse_month(raw)?)
}

fn cli_allocate(args: &[String], db: &mut Database) -> Result<()> {
    let usage = "budgetplan allocate <YYYY-MM> --salary <amount> [--<category> <pct>]...";
    let month = month_arg(args, usage)?;
    let mut rest = args[1..].to_vec();

    let mut session = Session::new();
    let salary_raw =
        take_flag(&mut rest, "--salary").ok_or_else(|| anyhow::anyhow!("Usage: {usage}"))?;
    let salary = session.set_salary(&salary_raw)?;

    let mut inputs = AllocationInputs::new();
    for category in AllocationCategory::all() {
        if let Some(pct) = take_flag(&mut rest, &format!("--{category}")) {
            inputs.set(*category, pct);
        }
    }
    if let Some(unknown) = rest.first() {
        anyhow::bail!("Unexpected argument: {unknown}");
    }

    let outcome = allocate::add_allocations(db, &month, salary, &inputs)?;
    for err in &outcome.errors {
        eprintln!("Warning: {err}");
    }
    println!(
        "Allocated {} of {} across {} categories for {month}",
        format_amount(outcome.total()),
        format_amount(salary),
        outcome.inserted.len()
    );
    for a in &outcome.inserted {
        println!("  {:<16} {:>14}", a.category, format_amount(a.amount));
    }
    Ok(())
}

fn cli_expense(args: &[String], db: &mut Database) -> Result<()> {
    if args.len() < 4 {
        anyhow::bail!(
            "Usage: budgetplan expense <YYYY-MM> <YYYY-MM-DD> <category> <amount> [description]"
        );
    }
    let month = parse_month(&args[0])?;
    let description = args[4..].join(" ");
    let id = ledger::add(db, &args[2], &month, &args[1], &description, &args[3])?;
    println!("Added expense #{id} to {month}");
    Ok(())
}

fn cli_expenses(args: &[String], db: &mut Database) -> Result<()> {
    let month = month_arg(args, "budgetplan expenses <YYYY-MM>")?;
    let expenses = ledger::list(db, &month)?;
    if expenses.is_empty() {
        println!("No expenses for {month}");
        return Ok(());
    }

    println!(
        "{:<6} {:<12} {:<16} {:>12}  Description",
        "ID", "Date", "Category", "Amount"
    );
    println!("{}", "─".repeat(64));
    for e in &expenses {
        println!(
            "{:<6} {:<12} {:<16} {:>12}  {}",
            e.id.unwrap_or(0),
            e.date,
            e.category,
            format_amount(e.amount),
            e.description,
        );
    }
    Ok(())
}

fn cli_delete_expense(args: &[String], db: &mut Database) -> Result<()> {
    let id: i64 = args
        .first()
        .and_then(|a| a.parse().ok())
        .ok_or_else(|| anyhow::anyhow!("Usage: budgetplan delete-expense <id>"))?;
    ledger::delete(db, id)?;
    println!("Expense deleted successfully");
    Ok(())
}

fn cli_allocations(args: &[String], db: &mut Database) -> Result<()> {
    let month = month_arg(args, "budgetplan allocations <YYYY-MM>")?;
    let allocations = db.get_allocations(&month)?;
    if allocations.is_empty() {
        println!("No allocations for {month}");
        return Ok(());
    }

    println!("Allocations for {month}");
    println!("{}", "─".repeat(32));
    for a in &allocations {
        println!("  {:<16} {:>12}", a.category, format_amount(a.amount));
    }
    println!("  {:<16} {:>12}", "Total", format_amount(db.sum_allocations(&month)?));
    Ok(())
}

fn cli_months(db: &mut Database) -> Result<()> {
    let mut months = db.distinct_months(Table::Allocations)?;
    months.extend(db.distinct_months(Table::Expenses)?);
    months.sort();
    months.dedup();

    if months.is_empty() {
        println!("No months yet");
        return Ok(());
    }
    for m in &months {
        let allocated = if db.has_allocation(m)? { "allocated" } else { "" };
        println!("  {m}  {allocated}");
    }
    Ok(())
}

fn cli_report(args: &[String], db: &mut Database) -> Result<()> {
    let month = month_arg(args, "budgetplan report <YYYY-MM> [--salary <amount>]")?;
    let mut rest = args[1..].to_vec();
    let mut session = Session::new();
    if let Some(raw) = take_flag(&mut rest, "--salary") {
        session.set_salary(&raw)?;
    }

    println!("BudgetPlan - {month}");
    println!("{}", "─".repeat(40));

    let breakdown = report::category_breakdown(db, &month)?;
    println!("Expenses by Category:");
    if breakdown.is_empty() {
        println!("  (none)");
    }
    for (category, amount) in &breakdown {
        println!("  {category:<24} {:>12}", format_amount(*amount));
    }

    let Some(salary) = session.salary() else {
        println!();
        println!("Pass --salary <amount> to include savings views");
        return Ok(());
    };

    let budget = report::budget_vs_savings(db, &month, salary)?;
    println!();
    println!("Budget Allocation vs Savings for {}:", budget.month);
    for (label, amount) in budget.series() {
        println!("  {label:<24} {:>12}", format_amount(amount));
    }

    let trend = report::monthly_trend(db, salary)?;
    println!();
    println!("Total Expenses and Savings per Month:");
    for t in &trend {
        println!(
            "  {}  expenses {:>12}  savings {:>12}",
            t.month,
            format_amount(t.expenses),
            format_amount(t.savings)
        );
    }
    Ok(())
}
