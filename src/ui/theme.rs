//! Theme configuration for the TUI.
//!
//! Every band and risk color used by the views is decided here.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{AlertSeverity, Band, RiskLevel};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for readings in the safe band.
    pub safe: Color,
    /// Color for readings in the warning band.
    pub warning: Color,
    /// Color for unsafe readings and critical risk.
    pub danger: Color,
    /// Color for readings that could not be classified.
    pub unknown: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            safe: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            unknown: Color::Magenta,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            safe: Color::Green,
            warning: Color::Rgb(176, 120, 0),
            danger: Color::Red,
            unknown: Color::Magenta,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn band_color(&self, band: Band) -> Color {
        match band {
            Band::Safe => self.safe,
            Band::Warning => self.warning,
            Band::Unknown => self.unknown,
            Band::Unsafe => self.danger,
        }
    }

    /// Style for a water quality band.
    pub fn band_style(&self, band: Band) -> Style {
        let style = Style::default().fg(self.band_color(band));
        if band == Band::Unsafe {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Style for an outbreak risk level.
    pub fn risk_style(&self, risk: RiskLevel) -> Style {
        match risk {
            RiskLevel::Low => Style::default().fg(self.safe),
            RiskLevel::Medium => Style::default().fg(self.warning),
            RiskLevel::High => Style::default().fg(self.danger),
            RiskLevel::Critical => Style::default().fg(self.danger).add_modifier(Modifier::BOLD),
            RiskLevel::Unknown => Style::default().fg(self.unknown),
        }
    }

    pub fn severity_style(&self, severity: AlertSeverity) -> Style {
        match severity {
            AlertSeverity::Warning => Style::default().fg(self.warning),
            AlertSeverity::Critical => {
                Style::default().fg(self.danger).add_modifier(Modifier::BOLD)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsafe_is_bold_and_distinct() {
        let theme = Theme::dark();
        assert!(theme.band_style(Band::Unsafe).add_modifier.contains(Modifier::BOLD));
        assert_ne!(theme.band_color(Band::Unknown), theme.band_color(Band::Safe));
        assert_ne!(theme.band_color(Band::Unknown), theme.band_color(Band::Unsafe));
    }

    #[test]
    fn test_risk_follows_band_palette() {
        let theme = Theme::light();
        assert_eq!(theme.risk_style(RiskLevel::Low).fg, Some(theme.band_color(Band::Safe)));
        assert_eq!(theme.risk_style(RiskLevel::High).fg, Some(theme.danger));
    }
}
