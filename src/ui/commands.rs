use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, InputMode, PendingAction, Screen};
use super::util::format_amount;
use crate::allocate;
use crate::db::Database;
use crate::error::Error;
use crate::ledger;
use crate::models::{parse_month, shift_month, AllocationCategory, AllocationInputs};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit BudgetPlan", cmd_quit, r);
    register_command!("quit", "Quit BudgetPlan", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("a", "Go to Allocations", cmd_allocations, r);
    register_command!("allocations", "Go to Allocations", cmd_allocations, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Set month (e.g. :month 2024-01)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 2024-01)", cmd_month, r);
    register_command!(
        "new-month",
        "Start a month that has no allocation yet (e.g. :new-month 2024-02)",
        cmd_new_month,
        r
    );
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "salary",
        "Set this session's monthly salary (e.g. :salary 3000)",
        cmd_salary,
        r
    );
    register_command!(
        "allocate",
        "Allocate salary (e.g. :allocate housing=30 food=15 or seven values)",
        cmd_allocate,
        r
    );
    register_command!(
        "expense",
        "Add expense (e.g. :expense 2024-01-15 food 12.50 lunch)",
        cmd_expense,
        r
    );
    register_command!(
        "x",
        "Add expense (e.g. :x 2024-01-15 food 12.50 lunch)",
        cmd_expense,
        r
    );
    register_command!(
        "delete-expense",
        "Delete selected expense",
        cmd_delete_expense,
        r
    );

    r
});

/// Run one `:` command. Failures end up on the status line and in the log
/// rather than closing the UI.
pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        if let Err(e) = (cmd.run)(args, app, db) {
            show_failure(app, &e);
        }
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn show_error(app: &mut App, err: Error) {
    if !err.is_user_error() {
        tracing::error!(error = %err, "command failed");
    }
    app.set_status(format!("Error: {err}"));
}

/// Report an error that escaped a command, usually a failed refresh.
pub(crate) fn show_failure(app: &mut App, err: &anyhow::Error) {
    tracing::error!(error = %err, "command failed");
    app.set_status(format!("Error: {err:#}"));
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh_dashboard(db)?;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.refresh_expenses(db)?;
    Ok(())
}

fn cmd_allocations(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Allocations;
    app.refresh_allocations(db)?;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    match parse_month(args) {
        Ok(month) => {
            app.set_status(format!("Switched to month: {month}"));
            switch_month(app, db, month)
        }
        Err(e) => {
            app.set_status(e.to_string());
            Ok(())
        }
    }
}

fn cmd_new_month(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let month = match parse_month(args) {
        Ok(m) => m,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };
    if db.has_allocation(&month)? {
        show_error(app, Error::DuplicateMonth(month));
        return Ok(());
    }
    app.set_status(format!(
        "New month {month}. Set :salary then :allocate to plan it"
    ));
    switch_month(app, db, month)
}

fn cmd_next_month(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    advance_month(app, db, 1)
}

fn cmd_prev_month(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    advance_month(app, db, -1)
}

fn cmd_salary(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        let current = app
            .session
            .salary()
            .map(format_amount)
            .unwrap_or_else(|| "not set".into());
        app.set_status(format!("Usage: :salary <amount> (current: {current})"));
        return Ok(());
    }
    match app.session.set_salary(args) {
        Ok(salary) => {
            app.refresh_dashboard(db)?;
            app.set_status(format!("Salary set to {}", format_amount(salary)));
        }
        Err(e) => show_error(app, e),
    }
    Ok(())
}

/// Parse `:allocate` arguments: either `category=pct` pairs or up to seven
/// positional values in category order.
pub(crate) fn parse_allocation_args(args: &str) -> Result<AllocationInputs, String> {
    if args.contains('=') {
        let mut inputs = AllocationInputs::new();
        for pair in args.split_whitespace() {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("Expected category=percent, got '{pair}'"))?;
            let category = AllocationCategory::parse(name)
                .ok_or_else(|| format!("Unknown category '{name}'"))?;
            inputs.set(category, value);
        }
        Ok(inputs)
    } else {
        let values: Vec<&str> = args.split_whitespace().collect();
        if values.len() > AllocationCategory::all().len() {
            return Err(format!(
                "Expected at most {} values",
                AllocationCategory::all().len()
            ));
        }
        Ok(AllocationInputs::from_positional(&values))
    }
}

fn cmd_allocate(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        let names: Vec<&str> = AllocationCategory::all().iter().map(|c| c.as_str()).collect();
        app.set_status(format!(
            "Usage: :allocate <category>=<pct>... Categories: {}",
            names.join(", ")
        ));
        return Ok(());
    }

    let salary = match app.session.require_salary() {
        Ok(s) => s,
        Err(e) => {
            show_error(app, e);
            return Ok(());
        }
    };

    let inputs = match parse_allocation_args(args) {
        Ok(i) => i,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };

    let month = app.current_month.clone();
    match allocate::add_allocations(db, &month, salary, &inputs) {
        Ok(outcome) => {
            app.refresh_allocations(db)?;
            app.refresh_dashboard(db)?;
            if outcome.is_complete() {
                app.set_status(format!(
                    "Budget allocation added for {month}: {}",
                    format_amount(outcome.total())
                ));
            } else {
                let skipped: Vec<String> = outcome.errors.iter().map(|e| e.to_string()).collect();
                app.set_status(format!(
                    "Allocated {} categories. Skipped: {}",
                    outcome.inserted.len(),
                    skipped.join("; ")
                ));
            }
        }
        Err(e) => show_error(app, e),
    }
    Ok(())
}

fn cmd_expense(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let mut fields = args.split_whitespace();
    let (Some(date), Some(category), Some(amount)) = (fields.next(), fields.next(), fields.next())
    else {
        app.set_status("Usage: :expense <YYYY-MM-DD> <category> <amount> [description]");
        return Ok(());
    };
    let description = fields.collect::<Vec<_>>().join(" ");

    let month = app.current_month.clone();
    match ledger::add(db, category, &month, date, &description, amount) {
        Ok(_) => {
            app.refresh_expenses(db)?;
            app.refresh_dashboard(db)?;
            app.set_status(format!("Expense added: {category} {amount} on {date}"));
        }
        Err(e) => show_error(app, e),
    }
    Ok(())
}

fn cmd_delete_expense(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Expenses || app.expenses.is_empty() {
        app.set_status("Navigate to Expenses and select one first");
        return Ok(());
    }

    if let Some(expense) = app.selected_expense() {
        if let Some(id) = expense.id {
            let description = if expense.description.is_empty() {
                expense.category.clone()
            } else {
                expense.description.clone()
            };
            app.confirm_message = format!("Delete '{description}'?");
            app.pending_action = Some(PendingAction::DeleteExpense { id, description });
            app.input_mode = InputMode::Confirm;
        }
    }

    Ok(())
}

/// Carry out the action the user just confirmed with `y`.
pub(crate) fn confirm_pending(app: &mut App, db: &mut Database) {
    let Some(action) = app.pending_action.take() else {
        return;
    };
    match action {
        PendingAction::DeleteExpense { id, description } => match ledger::delete(db, id) {
            Ok(()) => {
                app.set_status(format!("Expense deleted successfully: {description}"));
                if let Err(e) = app.refresh_all(db) {
                    show_failure(app, &e);
                }
            }
            Err(e) => show_error(app, e),
        },
    }
}

fn switch_month(app: &mut App, db: &mut Database, month: String) -> anyhow::Result<()> {
    app.current_month = month;
    app.expense_index = 0;
    app.expense_scroll = 0;
    app.refresh_all(db)?;
    Ok(())
}

fn advance_month(app: &mut App, db: &mut Database, delta: i32) -> anyhow::Result<()> {
    if let Some(m) = shift_month(&app.current_month, delta) {
        app.set_status(format!("Month: {m}"));
        switch_month(app, db, m)?;
    }
    Ok(())
}
