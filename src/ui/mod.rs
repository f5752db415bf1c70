//! Terminal rendering using ratatui.

pub mod common;
pub mod dashboard;
pub mod detail;
pub mod theme;
pub mod trends;
pub mod villages;
pub mod water;

pub use theme::Theme;

/// Sparkline characters (8 levels of height).
pub(crate) const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub(crate) fn render_sparkline(levels: &[u8]) -> String {
    levels.iter().map(|&v| SPARKLINE_CHARS[v.min(7) as usize]).collect()
}

/// Format a count for display (e.g., 1234 -> "1.2K").
pub(crate) fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Title suffix describing the active filter, shared by the table views.
pub(crate) fn filter_info(filter_text: &str, filter_active: bool) -> String {
    if filter_active {
        format!(" /{}_", filter_text)
    } else if !filter_text.is_empty() {
        format!(" /{}/ [c:clear]", filter_text)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(950), "950");
        assert_eq!(format_count(3200), "3.2K");
        assert_eq!(format_count(2_500_000), "2.5M");
    }

    #[test]
    fn test_sparkline_clamps_levels() {
        assert_eq!(render_sparkline(&[0, 7, 9]), "▁██");
        assert_eq!(render_sparkline(&[]), "");
    }

    #[test]
    fn test_filter_info() {
        assert_eq!(filter_info("", false), "");
        assert_eq!(filter_info("jor", true), " /jor_");
        assert_eq!(filter_info("jor", false), " /jor/ [c:clear]");
    }
}
