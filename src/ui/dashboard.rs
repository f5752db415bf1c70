//! Dashboard view rendering.
//!
//! Key figures across the top, per-band breakdowns of water sources and
//! village risk in the middle, and the active alert list below.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{summarize, summarize_risk, Band, RiskLevel};

use super::format_count;

const BAR_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(4), // Metric cards
        Constraint::Length(7), // Breakdowns
        Constraint::Min(4),    // Alerts
    ])
    .split(area);

    render_cards(frame, app, chunks[0]);

    let middle =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(chunks[1]);
    render_water_breakdown(frame, app, middle[0]);
    render_risk_breakdown(frame, app, middle[1]);

    render_alerts(frame, app, chunks[2]);
}

fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let sources = summarize(app.registry.water_sources());
    let total_cases: u64 = app.registry.villages().map(|v| v.cases).sum();
    let workers: u64 = app.registry.villages().map(|v| u64::from(v.health_workers)).sum();
    let alerts = app.visible_alerts().len();
    let contaminated = sources.get(Band::Unsafe);

    let cards = [
        ("Active Cases", format_count(total_cases), Style::default()),
        (
            "Contaminated Sources",
            format!("{}/{}", contaminated.count, sources.total),
            app.theme.band_style(if contaminated.count > 0 { Band::Unsafe } else { Band::Safe }),
        ),
        (
            "Active Alerts",
            alerts.to_string(),
            if alerts > 0 {
                Style::default().fg(app.theme.warning)
            } else {
                Style::default()
            },
        ),
        ("Health Workers", workers.to_string(), Style::default()),
    ];

    let columns = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for ((title, value, style), column) in cards.into_iter().zip(columns.iter()) {
        let card = Paragraph::new(Line::from(Span::styled(
            format!(" {}", value),
            style.add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        );
        frame.render_widget(card, *column);
    }
}

fn bar(percentage: u32) -> String {
    let filled = (percentage as usize * BAR_WIDTH + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)))
}

fn breakdown_line(label: &str, count: usize, percentage: u32, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!(" {:<10}", label)),
        Span::styled(bar(percentage), style),
        Span::raw(format!(" {:>3} ({:>3}%)", count, percentage)),
    ])
}

fn render_water_breakdown(frame: &mut Frame, app: &App, area: Rect) {
    let summary = summarize(app.registry.water_sources());
    let lines: Vec<Line> = Band::ALL
        .iter()
        .rev()
        .map(|&band| {
            let c = summary.get(band);
            breakdown_line(band.water_status(), c.count, c.percentage, app.theme.band_style(band))
        })
        .collect();

    let block = Block::default()
        .title(format!(" Water Quality ({} sources) ", summary.total))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_risk_breakdown(frame: &mut Frame, app: &App, area: Rect) {
    let summary = summarize_risk(app.registry.villages());
    let lines: Vec<Line> = [RiskLevel::Critical, RiskLevel::High, RiskLevel::Medium, RiskLevel::Low]
        .iter()
        .map(|&level| {
            let c = summary.get(level);
            breakdown_line(level.label(), c.count, c.percentage, app.theme.risk_style(level))
        })
        .collect();

    let block = Block::default()
        .title(format!(" Outbreak Risk ({} villages) ", summary.total))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_alerts(frame: &mut Frame, app: &App, area: Rect) {
    let alerts = app.visible_alerts();

    let block = Block::default()
        .title(format!(" Alerts ({}) [x:dismiss] ", alerts.len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if alerts.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No active alerts",
                Style::default().fg(app.theme.safe),
            )),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = alerts
        .iter()
        .map(|alert| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<9}", alert.severity.label()),
                    app.theme.severity_style(alert.severity),
                ),
                Span::raw(alert.message.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.cursor.min(alerts.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width_is_constant() {
        for pct in [0, 33, 50, 100] {
            assert_eq!(bar(pct).chars().count(), BAR_WIDTH);
        }
        assert_eq!(bar(50).chars().filter(|&c| c == '█').count(), 10);
    }
}
