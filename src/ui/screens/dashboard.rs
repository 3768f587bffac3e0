use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::report::SAVINGS_LABEL;
use crate::ui::app::App;
use crate::ui::render::panel;
use crate::ui::theme;
use crate::ui::util::{bar_value, format_amount, percent_of, saturating_total, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Totals
            Constraint::Percentage(40), // Expenses breakdown
            Constraint::Percentage(30), // Budget vs savings
            Constraint::Min(6),         // Monthly trend
        ])
        .split(area);

    render_totals(f, chunks[0], app);
    render_breakdown(f, chunks[1], app);
    render_budget_vs_savings(f, chunks[2], app);
    render_trend(f, chunks[3], app);
}

fn render_totals(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(" Spent ", theme::dim_style()),
        Span::styled(
            format_amount(app.month_expenses),
            Style::default().fg(theme::RED).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Allocated ", theme::dim_style()),
        Span::styled(
            format_amount(app.month_allocated),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(budget) = &app.budget {
        spans.push(Span::styled("   Savings ", theme::dim_style()));
        spans.push(Span::styled(
            format_amount(budget.savings),
            theme::balance_style(budget.savings >= Decimal::ZERO).add_modifier(Modifier::BOLD),
        ));
    }

    let totals = Paragraph::new(Line::from(spans))
        .block(panel(format!(" {} ", app.current_month)));
    f.render_widget(totals, area);
}

fn render_empty(f: &mut Frame, area: Rect, title: String, hint: &str) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(hint.to_string(), theme::dim_style())),
    ])
    .centered()
    .block(panel(title));
    f.render_widget(msg, area);
}

fn render_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let title = format!(" Monthly Expenses Breakdown for {} ", app.current_month);
    if app.breakdown.is_empty() {
        render_empty(
            f,
            area,
            title,
            "No expenses for this month. Add one with :expense",
        );
        return;
    }

    let total = saturating_total(app.breakdown.iter().map(|(_, amt)| *amt));
    let bars: Vec<Bar> = app
        .breakdown
        .iter()
        .map(|(name, amt)| {
            let share = percent_of(*amt, total).round_dp(1);
            Bar::default()
                .value(bar_value(*amt))
                .text_value(format!("{share}%"))
                .label(Line::from(truncate(name, 10)))
                .style(Style::default().fg(theme::PEACH))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::PEACH)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(panel(title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1);
    f.render_widget(chart, area);
}

fn render_budget_vs_savings(f: &mut Frame, area: Rect, app: &App) {
    let title = format!(" Budget Allocation vs Savings for {} ", app.current_month);
    let Some(budget) = &app.budget else {
        render_empty(f, area, title, "Set a salary with :salary <amount>");
        return;
    };

    let bars: Vec<Bar> = budget
        .series()
        .into_iter()
        .map(|(label, amt)| {
            let color = if label == SAVINGS_LABEL {
                if amt >= Decimal::ZERO {
                    theme::GREEN
                } else {
                    theme::RED
                }
            } else {
                theme::ACCENT
            };
            Bar::default()
                .value(bar_value(amt))
                .text_value(format_amount(amt))
                .label(Line::from(truncate(&label, 12)))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(theme::HEADER_BG).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(panel(title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(1);
    f.render_widget(chart, area);
}

fn render_trend(f: &mut Frame, area: Rect, app: &App) {
    let title = " Total Expenses and Savings for Each Month ".to_string();
    if app.budget.is_none() {
        render_empty(f, area, title, "Set a salary with :salary <amount>");
        return;
    }
    if app.trend.is_empty() {
        render_empty(f, area, title, "No expenses recorded yet");
        return;
    }

    let mut chart = BarChart::default()
        .block(panel(title))
        .bar_width(6)
        .bar_gap(0)
        .group_gap(2);

    // Most recent months that fit; each group is two bars plus a gap.
    let fit = (area.width.saturating_sub(2) / 14).max(1) as usize;
    let skip = app.trend.len().saturating_sub(fit);
    for totals in app.trend.iter().skip(skip) {
        let bars = [
            Bar::default()
                .value(bar_value(totals.expenses))
                .style(Style::default().fg(theme::RED))
                .value_style(Style::default().fg(theme::HEADER_BG).bg(theme::RED)),
            Bar::default()
                .value(bar_value(totals.savings))
                .style(theme::balance_style(totals.savings >= Decimal::ZERO))
                .value_style(Style::default().fg(theme::HEADER_BG).bg(theme::GREEN)),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(totals.month.clone()))
                .bars(&bars),
        );
    }

    f.render_widget(chart, area);
}
