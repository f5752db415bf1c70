//! Water sources view rendering.
//!
//! One row per source with each reading colored by its band, the overall
//! status, and how long ago the source was tested.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::{age, MeasurementKind, Site};

use super::filter_info;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let sources = app.visible_sources();

    let header = Row::new(vec![
        Cell::from("Source"),
        Cell::from("Village"),
        Cell::from("pH"),
        Cell::from("Bacteria"),
        Cell::from("Chlorine"),
        Cell::from("Temp"),
        Cell::from("Tested"),
        Cell::from("Status"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = sources
        .iter()
        .map(|s| {
            let mut cells = vec![Cell::from(s.name.clone()), Cell::from(s.village_name().to_string())];
            cells.extend(MeasurementKind::ALL.iter().map(|&kind| reading_cell(app, s, kind)));
            cells.push(tested_cell(app, s));
            cells.push(
                Cell::from(format!("{} {}", s.status().symbol(), s.status().water_status()))
                    .style(app.theme.band_style(s.status())),
            );
            Row::new(cells)
        })
        .collect();

    let widths = [
        Constraint::Fill(3), // Source
        Constraint::Fill(2), // Village
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Min(17),
    ];

    let selected = app.cursor.min(sources.len().saturating_sub(1));
    let position_info = if !sources.is_empty() {
        format!(" [{}/{}]", selected + 1, sources.len())
    } else {
        String::new()
    };

    let title = format!(
        " Water Sources ({}/{}){}{} ",
        sources.len(),
        app.registry.water_sources().count(),
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

fn reading_cell(app: &App, site: &Site, kind: MeasurementKind) -> Cell<'static> {
    match site.measurement(kind) {
        Some(m) => Cell::from(format_reading(kind, m.value)).style(app.theme.band_style(m.band())),
        None => Cell::from("-").style(Style::default().add_modifier(Modifier::DIM)),
    }
}

fn tested_cell(app: &App, site: &Site) -> Cell<'static> {
    match site.last_tested {
        Some(d) if age::is_overdue(d) => {
            Cell::from(format!("{}!", age::format_age_short(d)))
                .style(Style::default().fg(app.theme.warning))
        }
        Some(d) => Cell::from(age::format_age_short(d)),
        None => Cell::from("never").style(Style::default().add_modifier(Modifier::DIM)),
    }
}

pub(crate) fn format_reading(kind: MeasurementKind, value: f64) -> String {
    match kind {
        MeasurementKind::Ph => format!("{:.1}", value),
        MeasurementKind::Bacteria => format!("{:.0}", value),
        MeasurementKind::Chlorine => format!("{:.1}", value),
        MeasurementKind::Temperature => format!("{:.0}°C", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_reading() {
        assert_eq!(format_reading(MeasurementKind::Ph, 6.2), "6.2");
        assert_eq!(format_reading(MeasurementKind::Bacteria, 850.0), "850");
        assert_eq!(format_reading(MeasurementKind::Temperature, 24.0), "24°C");
        assert_eq!(format_reading(MeasurementKind::Ph, f64::NAN), "NaN");
    }
}
