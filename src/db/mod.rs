mod schema;

use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::*;

/// Tables that carry a month key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Table {
    Expenses,
    Allocations,
}

impl Table {
    fn name(&self) -> &'static str {
        match self {
            Self::Expenses => "expenses",
            Self::Allocations => "budget_allocation",
        }
    }
}

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let db = Self { conn };
        db.ensure_schema()?;
        info!(path = %path.display(), "opened database");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.ensure_schema()?;
        Ok(db)
    }

    pub(crate) fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(schema::SCHEMA)?;
        Ok(())
    }

    // ── Expenses ──────────────────────────────────────────────

    pub(crate) fn insert_expense(&self, expense: &Expense) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO expenses (category, month, date, description, amount)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                expense.category,
                expense.month,
                expense.date,
                expense.description,
                expense.amount.to_string(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, month = %expense.month, category = %expense.category, "inserted expense");
        Ok(id)
    }

    /// Deleting an id that does not exist is not an error.
    pub(crate) fn delete_expense(&self, id: i64) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        info!(id, removed, "deleted expense");
        Ok(())
    }

    pub(crate) fn get_expenses(&self, month: &str) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category, month, date, description, amount
             FROM expenses WHERE month = ?1
             ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map(params![month], |row| {
            let amount_str: String = row.get(5)?;
            Ok(Expense {
                id: Some(row.get(0)?),
                category: row.get(1)?,
                month: row.get(2)?,
                date: row.get(3)?,
                description: row.get(4)?,
                amount: parse_stored(&amount_str),
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn expense_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?)
    }

    // ── Allocations ───────────────────────────────────────────

    pub(crate) fn insert_allocation(&self, allocation: &Allocation) -> Result<i64> {
        insert_allocation_row(
            &self.conn,
            &allocation.category,
            &allocation.month,
            allocation.amount,
        )
    }

    /// Insert one month's allocation rows atomically. The duplicate-month
    /// check runs inside the same transaction; nothing is written if it
    /// fails or if any insert fails. Every row is stored under `month`,
    /// whatever its own `month` field says.
    pub(crate) fn insert_allocation_batch(
        &mut self,
        month: &str,
        allocations: &[Allocation],
    ) -> Result<Vec<i64>> {
        let tx = self.conn.transaction()?;
        if month_has_allocation(&tx, month)? {
            return Err(Error::DuplicateMonth(month.to_string()));
        }
        let mut ids = Vec::with_capacity(allocations.len());
        for allocation in allocations {
            if allocation.month != month {
                warn!(month, row_month = %allocation.month, "allocation row filed under batch month");
            }
            ids.push(insert_allocation_row(
                &tx,
                &allocation.category,
                month,
                allocation.amount,
            )?);
        }
        tx.commit()?;
        info!(month, rows = ids.len(), "committed allocation batch");
        Ok(ids)
    }

    pub(crate) fn has_allocation(&self, month: &str) -> Result<bool> {
        month_has_allocation(&self.conn, month)
    }

    /// Allocated amount for one category and month; zero when none exists.
    pub(crate) fn query_allocation(&self, category: &str, month: &str) -> Result<Decimal> {
        let amount: Option<String> = self
            .conn
            .query_row(
                "SELECT amount FROM budget_allocation WHERE category = ?1 AND month = ?2
                 ORDER BY id LIMIT 1",
                params![category, month],
                |row| row.get(0),
            )
            .optional()?;
        Ok(amount.map(|s| parse_stored(&s)).unwrap_or(Decimal::ZERO))
    }

    pub(crate) fn get_allocations(&self, month: &str) -> Result<Vec<Allocation>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category, month, amount FROM budget_allocation
             WHERE month = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![month], |row| {
            let amount_str: String = row.get(3)?;
            Ok(Allocation {
                id: Some(row.get(0)?),
                category: row.get(1)?,
                month: row.get(2)?,
                amount: parse_stored(&amount_str),
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Aggregate reads ───────────────────────────────────────

    /// Months present in `table`, oldest first.
    pub(crate) fn distinct_months(&self, table: Table) -> Result<Vec<String>> {
        let sql = format!(
            "SELECT DISTINCT month FROM {} ORDER BY month",
            table.name()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        let months = rows.collect::<std::result::Result<Vec<String>, _>>()?;
        debug!(table = table.name(), count = months.len(), "distinct months");
        Ok(months)
    }

    /// Every category that has ever had an allocation row, in the order it
    /// was first allocated.
    pub(crate) fn distinct_categories(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT category FROM budget_allocation
             GROUP BY category ORDER BY MIN(id)",
        )?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<std::result::Result<Vec<String>, _>>()?)
    }

    /// Summed expense amount per category for a month. Categories with no
    /// expenses are absent.
    pub(crate) fn sum_expenses_by_category(&self, month: &str) -> Result<BTreeMap<String, Decimal>> {
        let mut stmt = self
            .conn
            .prepare("SELECT category, amount FROM expenses WHERE month = ?1")?;
        let rows = stmt.query_map(params![month], |row| {
            let category: String = row.get(0)?;
            let amount_str: String = row.get(1)?;
            Ok((category, parse_stored(&amount_str)))
        })?;

        let mut totals = BTreeMap::new();
        for row in rows {
            let (category, amount) = row?;
            let total: &mut Decimal = totals.entry(category).or_insert(Decimal::ZERO);
            *total = total
                .checked_add(amount)
                .ok_or_else(|| Error::Overflow(month.to_string()))?;
        }
        Ok(totals)
    }

    pub(crate) fn sum_expenses(&self, month: &str) -> Result<Decimal> {
        self.sum_amounts(Table::Expenses, month)
    }

    pub(crate) fn sum_allocations(&self, month: &str) -> Result<Decimal> {
        self.sum_amounts(Table::Allocations, month)
    }

    // Amounts are stored as decimal text, so summing happens here rather than
    // in SQL to avoid a round trip through REAL.
    fn sum_amounts(&self, table: Table, month: &str) -> Result<Decimal> {
        let sql = format!("SELECT amount FROM {} WHERE month = ?1", table.name());
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![month], |row| row.get::<_, String>(0))?;
        let mut total = Decimal::ZERO;
        for row in rows {
            total = total
                .checked_add(parse_stored(&row?))
                .ok_or_else(|| Error::Overflow(month.to_string()))?;
        }
        Ok(total)
    }
}

fn insert_allocation_row(
    conn: &Connection,
    category: &str,
    month: &str,
    amount: Decimal,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO budget_allocation (category, month, amount) VALUES (?1, ?2, ?3)",
        params![category, month, amount.to_string()],
    )?;
    Ok(conn.last_insert_rowid())
}

fn month_has_allocation(conn: &Connection, month: &str) -> Result<bool> {
    Ok(conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM budget_allocation WHERE month = ?1)",
        params![month],
        |row| row.get(0),
    )?)
}

fn parse_stored(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap_or_default()
}
