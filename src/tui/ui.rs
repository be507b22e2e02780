use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use super::app::{App, Focus};
use crate::features::expenses::form::FormField;

pub const EMPTY_LIST_MESSAGE: &str = "No expenses added yet.";

pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    let banner_height = if app.manager.error().is_some() { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),             // header
            Constraint::Length(banner_height), // error banner
            Constraint::Length(8),             // form
            Constraint::Min(0),                // table
            Constraint::Length(3),             // footer
        ])
        .split(f.area());

    let header = Paragraph::new("Budget Tracker")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    if let Some(msg) = app.manager.error() {
        let banner = Paragraph::new(msg).style(Style::default().fg(Color::Red));
        f.render_widget(banner, chunks[1]);
    }

    draw_form(f, chunks[2], app);
    draw_table(f, chunks[3], app);

    let footer_text = match app.focus {
        Focus::Form(_) if app.manager.mode().is_editing() => {
            "Tab/↑/↓: move  |  ←/→: choose  |  Enter: update  |  Esc: cancel edit  |  Ctrl+C: quit"
        }
        Focus::Form(_) => {
            "Tab/↑/↓: move  |  ←/→: choose  |  Enter: add  |  Esc: go to list  |  Ctrl+C: quit"
        }
        Focus::Table => {
            "↑/↓: select  |  e: edit  |  d: delete  |  r: reload  |  x: clear message  |  Tab: form  |  q: quit"
        }
    };
    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[4]);
}

fn draw_form(f: &mut Frame<'_>, area: Rect, app: &App) {
    let draft = app.manager.draft();
    let mut lines = Vec::new();

    for field in FormField::ALL {
        let focused = app.focus == Focus::Form(field);
        let marker = if focused { "> " } else { "  " };
        let value = field.value(draft);

        let mut spans = vec![Span::raw(format!("{marker}{:<15}", field.label()))];
        if value.is_empty() {
            spans.push(Span::styled(
                field.placeholder(),
                Style::default().fg(Color::DarkGray),
            ));
        } else if field.is_select() {
            spans.push(Span::raw(format!("< {value} >")));
        } else {
            spans.push(Span::raw(value.to_string()));
        }
        if focused && !field.is_select() {
            spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
        }
        if let Some((hinted, hint)) = app.form_hint {
            if hinted == field {
                spans.push(Span::styled(
                    format!("  {hint}"),
                    Style::default().fg(Color::Yellow),
                ));
            }
        }
        lines.push(Line::from(spans));
    }

    let mut buttons = vec![Span::styled(
        if app.manager.mode().is_editing() {
            "[ Update Expense ]"
        } else {
            "[ Add Expense ]"
        },
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if app.manager.mode().is_editing() {
        buttons.push(Span::raw("  [ Cancel ]"));
    }
    lines.push(Line::from(buttons));

    let block = Block::default().title("Expense").borders(Borders::ALL);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// 経費一覧を描画する
///
/// 選択行が表示範囲の外にある場合はスクロールして表示する
fn draw_table(f: &mut Frame<'_>, area: Rect, app: &mut App) {
    let block = Block::default().title("All Expenses").borders(Borders::ALL);
    let expenses = app.manager.expenses();

    if expenses.is_empty() {
        f.render_widget(Paragraph::new(EMPTY_LIST_MESSAGE).block(block), area);
        return;
    }

    let rows = expenses.iter().map(|exp| {
        Row::new(vec![
            exp.title.clone(),
            exp.category.clone(),
            format!("${}", exp.display_amount()),
            exp.date.clone(),
            exp.payment_method.clone(),
            "e: Edit  d: Delete".to_string(),
        ])
    });

    let widths = [
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Length(19),
    ];

    // 選択行の反転表示は一覧にフォーカスがあるときだけ
    let highlight = if app.focus == Focus::Table {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Title", "Category", "Amount", "Date", "Payment", "Action"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(block)
        .row_highlight_style(highlight);

    app.table_state.select(Some(app.selected_idx));
    f.render_stateful_widget(table, area, &mut app.table_state);
}
