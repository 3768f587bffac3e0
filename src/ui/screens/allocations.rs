use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::render::panel;
use crate::ui::theme;
use crate::ui::util::{format_amount, saturating_total};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(20)])
        .split(area);

    if app.allocations.is_empty() {
        render_empty(f, chunks[0], app);
    } else {
        render_allocations(f, chunks[0], app);
    }
    render_months(f, chunks[1], app);
}

fn render_allocations(f: &mut Frame, area: Rect, app: &App) {
    let total = saturating_total(app.allocations.iter().map(|a| a.amount));
    let items: Vec<ListItem> = app
        .allocations
        .iter()
        .enumerate()
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, allocation)| {
            let ratio = if total > Decimal::ZERO {
                allocation
                    .amount
                    .checked_div(total)
                    .and_then(|r| r.to_f64())
                    .unwrap_or(0.0)
                    .clamp(0.0, 1.0)
            } else {
                0.0
            };
            let style = if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<16}", allocation.category), style),
                Span::styled(
                    format!("{:>14} ", format_amount(allocation.amount)),
                    Style::default().fg(theme::ACCENT),
                ),
                Span::styled(create_share_bar(ratio, 20), Style::default().fg(theme::ACCENT)),
            ]))
        })
        .collect();

    let list = List::new(items).block(panel(format!(
        " Allocations for {} total {} ",
        app.current_month,
        format_amount(total)
    )));
    f.render_widget(list, area);
}

fn render_empty(f: &mut Frame, area: Rect, app: &App) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("No budget allocation for {}", app.current_month),
            theme::dim_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Set :salary <amount>, then :allocate housing=30 food=15 ...",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(panel(" Allocations ".to_string()));
    f.render_widget(msg, area);
}

fn render_months(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .allocated_months
        .iter()
        .map(|m| {
            let style = if *m == app.current_month {
                theme::selected_style()
            } else {
                theme::normal_style()
            };
            ListItem::new(Line::from(Span::styled(format!(" {m}"), style)))
        })
        .collect();
    f.render_widget(
        List::new(items).block(panel(" Months ".to_string())),
        area,
    );
}

fn create_share_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
