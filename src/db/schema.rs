/// Both tables are created on demand. There is no version table: the schema
/// only ever grows by adding `IF NOT EXISTS` statements here.
pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    category    TEXT NOT NULL,
    month       TEXT NOT NULL,
    date        TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    amount      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_expenses_month ON expenses(month);

CREATE TABLE IF NOT EXISTS budget_allocation (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL,
    month    TEXT NOT NULL,
    amount   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_budget_allocation_month ON budget_allocation(month);
"#;
