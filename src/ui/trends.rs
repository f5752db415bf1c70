//! Trends view rendering.
//!
//! One card per disease with the week-over-week change, and a table of
//! weekly counts with a sparkline of the totals.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::{Direction, Disease, Trend};

use super::render_sparkline;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(5), Constraint::Min(5)]).split(area);

    let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(chunks[0]);
    for (i, (&disease, column)) in Disease::ALL.iter().zip(columns.iter()).enumerate() {
        render_card(frame, app, disease, i == app.cursor, *column);
    }

    render_weeks(frame, app, chunks[1]);
}

fn direction_style(app: &App, direction: Direction) -> Style {
    // More cases is the bad direction
    match direction {
        Direction::Up => Style::default().fg(app.theme.danger),
        Direction::Down => Style::default().fg(app.theme.safe),
        Direction::Flat => Style::default(),
    }
}

fn arrow(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲",
        Direction::Down => "▼",
        Direction::Flat => "■",
    }
}

fn render_card(frame: &mut Frame, app: &App, disease: Disease, focused: bool, area: Rect) {
    let lines = match app.history.trend(disease) {
        Some(trend) => card_lines(app, &trend),
        None => vec![Line::from(Span::styled(
            " Not enough weeks reported",
            Style::default().add_modifier(Modifier::DIM),
        ))],
    };

    let border_style = if focused {
        Style::default().fg(app.theme.highlight)
    } else {
        Style::default().fg(app.theme.border)
    };

    let card = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" {} ", disease.label()))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(border_style),
    );
    frame.render_widget(card, area);
}

fn card_lines(app: &App, trend: &Trend) -> Vec<Line<'static>> {
    let style = direction_style(app, trend.direction);
    vec![
        Line::from(vec![
            Span::styled(format!(" {}", trend.current), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" cases this week"),
        ]),
        Line::from(vec![
            Span::styled(
                format!(" {} {}", arrow(trend.direction), trend.change_label()),
                style,
            ),
            Span::raw(format!(" from {}", trend.previous)),
        ]),
    ]
}

fn render_weeks(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![
        Cell::from("Week"),
        Cell::from("Cholera"),
        Cell::from("Diarrhea"),
        Cell::from("Typhoid"),
        Cell::from("Total"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = app
        .history
        .weeks
        .iter()
        .map(|w| {
            Row::new(vec![
                Cell::from(w.week.clone()),
                Cell::from(w.cholera.to_string()),
                Cell::from(w.diarrhea.to_string()),
                Cell::from(w.typhoid.to_string()),
                Cell::from(w.total().to_string()).style(Style::default().add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ];

    let distribution = app
        .history
        .distribution()
        .iter()
        .map(|(d, pct)| format!("{} {}%", d.label(), pct))
        .collect::<Vec<_>>()
        .join(", ");

    let title = format!(
        " Weekly Cases {} [{}] ",
        render_sparkline(&app.history.sparkline()),
        distribution
    );

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );

    frame.render_widget(table, area);
}
