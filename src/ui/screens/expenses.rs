use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::render::panel;
use crate::ui::theme;
use crate::ui::util::{format_amount, saturating_total, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.expenses.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("No expenses for {}", app.current_month),
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :expense <YYYY-MM-DD> <category> <amount> [description]",
                theme::dim_style(),
            )),
        ];
        f.render_widget(
            Paragraph::new(msg)
                .centered()
                .block(panel(" Expenses (0) ".to_string())),
            area,
        );
        return;
    }

    let header_cells = ["Date", "Category", "Description", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .expenses
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, expense)| {
            let style = if i == app.expense_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            // Negative amounts are refunds and read as money coming back.
            let amount_style = theme::balance_style(expense.amount < Decimal::ZERO);

            Row::new(vec![
                Cell::from(format!("  {}", expense.date)),
                Cell::from(truncate(&expense.category, 18)),
                Cell::from(truncate(&expense.description, 40)),
                Cell::from(Span::styled(format_amount(expense.amount), amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Length(20),
        Constraint::Min(20),
        Constraint::Length(14),
    ];

    let total = saturating_total(app.expenses.iter().map(|e| e.amount));
    let table = Table::new(rows, widths).header(header).block(panel(format!(
        " Expenses for {} ({}) total {} ",
        app.current_month,
        app.expenses.len(),
        format_amount(total)
    )));

    f.render_widget(table, area);
}
