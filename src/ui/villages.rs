//! Villages view rendering.
//!
//! Displays a sortable table of villages with population, cases, infection
//! rate, rolled-up water status and outbreak risk.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::{App, SortColumn};

use super::{filter_info, format_count};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let villages = app.visible_villages();

    let header = Row::new(vec![
        Cell::from(format_header("Village", SortColumn::Name, app)),
        Cell::from("Population"),
        Cell::from(format_header("Cases", SortColumn::Cases, app)),
        Cell::from(format_header("Rate", SortColumn::InfectionRate, app)),
        Cell::from("Water"),
        Cell::from(format_header("Risk", SortColumn::Risk, app)),
        Cell::from("Workers"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = villages
        .iter()
        .map(|v| {
            let rate = v
                .infection_rate()
                .map(|r| format!("{:.2}%", r))
                .unwrap_or_else(|| "-".to_string());
            let risk = match v.risk() {
                Some(level) => Cell::from(level.label().to_uppercase()).style(app.theme.risk_style(level)),
                None => Cell::from("-").style(Style::default().add_modifier(Modifier::DIM)),
            };

            Row::new(vec![
                Cell::from(v.name.clone()),
                Cell::from(v.population.map(format_count).unwrap_or_else(|| "-".to_string())),
                Cell::from(v.cases.to_string()),
                Cell::from(rate),
                Cell::from(v.status().water_status()).style(app.theme.band_style(v.status())),
                risk,
                Cell::from(v.health_workers.to_string()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Min(13),
        Constraint::Min(9),
        Constraint::Min(8),
    ];

    let selected = app.cursor.min(villages.len().saturating_sub(1));
    let sort_dir = if app.sort_ascending { "↑" } else { "↓" };
    let position_info = if !villages.is_empty() {
        format!(" [{}/{}]", selected + 1, villages.len())
    } else {
        String::new()
    };

    let title = format!(
        " Villages ({}/{}) [s:sort {}{}]{}{} ",
        villages.len(),
        app.registry.villages().count(),
        app.sort_column.label(),
        sort_dir,
        filter_info(&app.filter_text, app.filter_active),
        position_info
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}

fn format_header(name: &str, col: SortColumn, app: &App) -> Span<'static> {
    if app.sort_column == col {
        let arrow = if app.sort_ascending { "↑" } else { "↓" };
        Span::raw(format!("{}{}", name, arrow))
    } else {
        Span::raw(name.to_string())
    }
}
