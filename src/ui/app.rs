use anyhow::Result;
use chrono::Local;
use rust_decimal::Decimal;

use crate::db::{Database, Table};
use crate::models::{Allocation, Expense, Session};
use crate::report::{self, BudgetVsSavings, MonthTotals};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
    Allocations,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Expenses, Self::Allocations]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
            Self::Allocations => write!(f, "Allocations"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64, description: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    /// Format: "YYYY-MM"
    pub(crate) current_month: String,
    pub(crate) session: Session,

    // Dashboard
    pub(crate) breakdown: Vec<(String, Decimal)>,
    pub(crate) budget: Option<BudgetVsSavings>,
    pub(crate) trend: Vec<MonthTotals>,
    pub(crate) month_expenses: Decimal,
    pub(crate) month_allocated: Decimal,

    // Expenses
    pub(crate) expenses: Vec<Expense>,
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,
    pub(crate) expense_count: i64,

    // Allocations
    pub(crate) allocations: Vec<Allocation>,
    pub(crate) allocated_months: Vec<String>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            current_month: Local::now().format("%Y-%m").to_string(),
            session: Session::new(),

            breakdown: Vec::new(),
            budget: None,
            trend: Vec::new(),
            month_expenses: Decimal::ZERO,
            month_allocated: Decimal::ZERO,

            expenses: Vec::new(),
            expense_index: 0,
            expense_scroll: 0,
            expense_count: 0,

            allocations: Vec::new(),
            allocated_months: Vec::new(),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Savings views need a salary; without one only the breakdown is shown.
    pub(crate) fn refresh_dashboard(&mut self, db: &Database) -> Result<()> {
        self.breakdown = report::category_breakdown(db, &self.current_month)?
            .into_iter()
            .collect();
        self.month_expenses = db.sum_expenses(&self.current_month)?;
        self.month_allocated = db.sum_allocations(&self.current_month)?;

        match self.session.salary() {
            Some(salary) => {
                self.budget = Some(report::budget_vs_savings(db, &self.current_month, salary)?);
                self.trend = report::monthly_trend(db, salary)?;
            }
            None => {
                self.budget = None;
                self.trend.clear();
            }
        }
        Ok(())
    }

    pub(crate) fn refresh_expenses(&mut self, db: &Database) -> Result<()> {
        self.expenses = crate::ledger::list(db, &self.current_month)?;
        self.expense_count = db.expense_count()?;
        if self.expense_index >= self.expenses.len() {
            self.expense_index = self.expenses.len().saturating_sub(1);
        }
        if self.expense_scroll > self.expense_index {
            self.expense_scroll = self.expense_index;
        }
        Ok(())
    }

    pub(crate) fn refresh_allocations(&mut self, db: &Database) -> Result<()> {
        self.allocations = db.get_allocations(&self.current_month)?;
        self.allocated_months = db.distinct_months(Table::Allocations)?;
        Ok(())
    }

    /// The expense and allocation lists are reloaded even when the
    /// dashboard totals fail, so a bad row can still be found and deleted.
    pub(crate) fn refresh_all(&mut self, db: &Database) -> Result<()> {
        let dashboard = self.refresh_dashboard(db);
        self.refresh_expenses(db)?;
        self.refresh_allocations(db)?;
        dashboard
    }

    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.expenses.get(self.expense_index)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
