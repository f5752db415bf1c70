//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::{summarize, Band};

/// Render the header bar with the water-safety overview.
///
/// Displays: overall indicator, source counts per band, village count.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    if app.last_updated.is_none() {
        let line = Line::from(vec![
            Span::styled(" HEALTHWATCH ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let sources = summarize(app.registry.water_sources());
    let worst = sources
        .iter()
        .filter(|(_, c)| c.count > 0)
        .map(|(band, _)| band)
        .max()
        .unwrap_or(Band::Unknown);

    let count_span = |band: Band| {
        let n = sources.get(band).count;
        if n > 0 {
            Span::styled(n.to_string(), app.theme.band_style(band))
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        }
    };

    let line = Line::from(vec![
        Span::styled(" ● ", app.theme.band_style(worst)),
        Span::styled("HEALTHWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        count_span(Band::Safe),
        Span::raw(" safe "),
        count_span(Band::Warning),
        Span::raw(" warn "),
        count_span(Band::Unsafe),
        Span::raw(" unsafe "),
        count_span(Band::Unknown),
        Span::raw(" unknown │ "),
        Span::styled(
            sources.total.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" sources │ "),
        Span::styled(
            app.registry.villages().count().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" villages"),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, v)| Line::from(format!(" {}:{} ", i + 1, v.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows the data source, time since last update and the controls for the
/// current view. Temporary status messages and load errors take priority.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit r:retry", err)
    } else if let Some(updated) = app.last_updated {
        let controls = if app.filter_active {
            "Type to search | Enter:apply Esc:cancel"
        } else if app.selection.is_selected() {
            "↑↓:next site Esc:close ?:help q:quit"
        } else {
            match app.current_view {
                View::Dashboard => "↑↓:select x:dismiss X:restore Enter:detail ?:help q:quit",
                View::Trends => "Tab:switch ?:help q:quit",
                View::Water => "/:search Tab:switch Enter:detail ?:help q:quit",
                View::Villages => "/:search s:sort S:reverse Enter:detail ?:help q:quit",
            }
        };

        format!(
            " {} | Updated {:.0}s ago | {}",
            app.source_description(),
            updated.elapsed().as_secs_f64(),
            controls,
        )
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(title, Style::default().add_modifier(Modifier::BOLD))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  1-4         Jump to view"),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Select site"),
        Line::from("  Esc         Clear selection"),
        Line::from(""),
        section(" Dashboard"),
        Line::from("  x         Dismiss alert"),
        Line::from("  X         Restore alerts"),
        Line::from(""),
        section(" Water & Villages"),
        Line::from("  /         Start filter/search"),
        Line::from("  c         Clear filter"),
        Line::from("  s / S     Sort villages / reverse"),
        Line::from(""),
        section(" General"),
        Line::from("  r         Reload data"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 28u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
