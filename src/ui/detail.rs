//! Detail overlay rendering.
//!
//! Displays a modal overlay for the site held by the selection model.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::{age, Site};

use super::{format_count, water::format_reading};

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 16;

/// Render the selected site as a modal overlay.
///
/// Nothing is drawn when the selection is empty or refers to a site that
/// is no longer registered.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(site) = app.selection.resolve(&app.registry) else {
        return;
    };

    let overlay_width = (area.width * 95 / 100).clamp(MIN_OVERLAY_WIDTH, 100);
    let overlay_height = (area.height * 90 / 100).clamp(MIN_OVERLAY_HEIGHT, 40);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(6), // Site info
        Constraint::Min(5),    // Readings or sources
        Constraint::Length(6), // Issues
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    render_header(frame, app, site, chunks[0]);
    if site.is_village() {
        render_village_sources(frame, app, site, chunks[1]);
    } else {
        render_readings(frame, app, site, chunks[1]);
    }
    render_issues(frame, app, site, chunks[2]);

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " ↑↓:next site  Esc:close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[3]);
}

fn render_header(frame: &mut Frame, app: &App, site: &Site, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let status = site.status();

    let mut facts = vec![
        Span::raw(" Water: "),
        Span::styled(
            format!("{} {}", status.symbol(), status.water_status()),
            app.theme.band_style(status),
        ),
    ];

    let second = if site.is_village() {
        if let Some(risk) = site.risk() {
            facts.push(Span::raw("    Risk: "));
            facts.push(Span::styled(risk.label().to_uppercase(), app.theme.risk_style(risk)));
        }
        let rate = site
            .infection_rate()
            .map(|r| format!("{:.2}%", r))
            .unwrap_or_else(|| "-".to_string());
        Line::from(vec![
            Span::raw(" Population: "),
            Span::styled(site.population.map(format_count).unwrap_or_else(|| "-".into()), bold),
            Span::raw("    Cases: "),
            Span::styled(site.cases.to_string(), bold),
            Span::raw("    Rate: "),
            Span::styled(rate, bold),
            Span::raw("    Health workers: "),
            Span::styled(site.health_workers.to_string(), bold),
        ])
    } else {
        let tested = site
            .last_tested
            .map(age::format_age)
            .unwrap_or_else(|| "never".to_string());
        let mut spans = vec![
            Span::raw(" Village: "),
            Span::styled(site.village_name().to_string(), bold),
            Span::raw("    Last tested: "),
            Span::styled(tested, bold),
        ];
        if site.last_tested.is_some_and(age::is_overdue) {
            spans.push(Span::styled("  (overdue)", Style::default().fg(app.theme.warning)));
        }
        Line::from(spans)
    };

    let lines = vec![
        Line::from(vec![Span::styled(format!(" {} ", site.name), bold)]),
        Line::from(""),
        Line::from(facts),
        second,
    ];

    let title = if site.is_village() { " Village Detail " } else { " Water Source Detail " };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_readings(frame: &mut Frame, app: &App, site: &Site, area: Rect) {
    let header = Row::new(vec![
        Cell::from("Reading"),
        Cell::from("Value"),
        Cell::from("Unit"),
        Cell::from("Band"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = site
        .measurements()
        .iter()
        .map(|m| {
            let band = m.band();
            Row::new(vec![
                Cell::from(m.kind.to_string()),
                Cell::from(format_reading(m.kind, m.value)),
                Cell::from(m.kind.unit()),
                Cell::from(format!("{} {}", band.symbol(), band.label())).style(app.theme.band_style(band)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(format!(" Readings ({}) ", site.measurements().len()))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );
    frame.render_widget(table, area);
}

fn render_village_sources(frame: &mut Frame, app: &App, site: &Site, area: Rect) {
    let header = Row::new(vec![Cell::from("Source"), Cell::from("Tested"), Cell::from("Status")])
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = app
        .registry
        .sources_for(&site.name)
        .map(|s| {
            Row::new(vec![
                Cell::from(s.name.clone()),
                Cell::from(s.last_tested.map(age::format_age_short).unwrap_or_else(|| "-".into())),
                Cell::from(s.status().water_status()).style(app.theme.band_style(s.status())),
            ])
        })
        .collect();
    let count = rows.len();

    let widths = [Constraint::Fill(3), Constraint::Length(8), Constraint::Length(14)];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(format!(" Water Sources ({}) ", count))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );
    frame.render_widget(table, area);
}

fn render_issues(frame: &mut Frame, app: &App, site: &Site, area: Rect) {
    let issues = site.issues();
    let lines: Vec<Line> = if issues.is_empty() {
        vec![Line::from(Span::styled(
            "  No issues",
            Style::default().fg(app.theme.safe),
        ))]
    } else {
        issues
            .into_iter()
            .map(|issue| Line::from(format!("  • {}", issue)))
            .collect()
    };

    let block = Block::default()
        .title(" Issues ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
