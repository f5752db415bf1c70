//! Application state and navigation logic.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};

use crate::data::{
    Alert, AlertBoard, CaseHistory, Disease, RiskPolicy, Site, SiteId, SiteRegistry,
    SelectionModel,
};
use crate::export;
use crate::source::DataSource;
use crate::ui::Theme;

/// The current view/tab in the TUI.
///
/// Site detail is shown as an overlay whenever the [`SelectionModel`] holds
/// a site, rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Key figures, band breakdowns and active alerts.
    Dashboard,
    /// Weekly infection counts per disease.
    Trends,
    /// Water sources with their readings.
    Water,
    /// Villages with cases, infection rate and risk.
    Villages,
}

impl View {
    pub const ALL: [View; 4] = [View::Dashboard, View::Trends, View::Water, View::Villages];

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Dashboard => View::Trends,
            View::Trends => View::Water,
            View::Water => View::Villages,
            View::Villages => View::Dashboard,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Dashboard => View::Villages,
            View::Trends => View::Dashboard,
            View::Water => View::Trends,
            View::Villages => View::Water,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Trends => "Trends",
            View::Water => "Water",
            View::Villages => "Villages",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            View::Dashboard => 0,
            View::Trends => 1,
            View::Water => 2,
            View::Villages => 3,
        }
    }
}

/// Column to sort the Villages view by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    /// Registry order.
    #[default]
    Registry,
    Name,
    Cases,
    InfectionRate,
    Risk,
}

impl SortColumn {
    pub fn next(self) -> Self {
        match self {
            SortColumn::Registry => SortColumn::Name,
            SortColumn::Name => SortColumn::Cases,
            SortColumn::Cases => SortColumn::InfectionRate,
            SortColumn::InfectionRate => SortColumn::Risk,
            SortColumn::Risk => SortColumn::Registry,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Registry => "default",
            SortColumn::Name => "name",
            SortColumn::Cases => "cases",
            SortColumn::InfectionRate => "rate",
            SortColumn::Risk => "risk",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data
    source: Box<dyn DataSource>,
    pub registry: SiteRegistry,
    pub history: CaseHistory,
    pub policy: RiskPolicy,
    pub last_updated: Option<Instant>,
    pub load_error: Option<String>,

    // Interaction state
    pub selection: SelectionModel,
    pub alerts: AlertBoard,
    pub cursor: usize,

    // Sorting (Villages view)
    pub sort_column: SortColumn,
    pub sort_ascending: bool,

    // Search/filter
    pub filter_text: String,
    pub filter_active: bool,

    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given data source and risk policy.
    pub fn new(source: Box<dyn DataSource>, policy: RiskPolicy, history: CaseHistory) -> Self {
        Self {
            running: true,
            current_view: View::Dashboard,
            show_help: false,
            source,
            registry: SiteRegistry::default(),
            history,
            policy,
            last_updated: None,
            load_error: None,
            selection: SelectionModel::new(),
            alerts: AlertBoard::new(),
            cursor: 0,
            sort_column: SortColumn::default(),
            sort_ascending: true,
            filter_text: String::new(),
            filter_active: false,
            theme: Theme::dark(),
            status_message: None,
        }
    }

    /// Replace the theme (the binary auto-detects one from the terminal).
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source and rebuild the registry on new data.
    ///
    /// Returns true if new data was loaded. Source and registry errors are
    /// recorded in `load_error`; the previous data stays on screen.
    pub fn reload_data(&mut self) -> bool {
        let Some(snapshot) = self.source.poll() else {
            if let Some(err) = self.source.error() {
                self.load_error = Some(err.to_string());
            }
            return false;
        };

        match SiteRegistry::from_records(snapshot, &self.policy) {
            Ok(registry) => {
                self.registry = registry;
                self.load_error = None;
                self.last_updated = Some(Instant::now());
                if self.selection.revalidate(&self.registry) {
                    self.set_status_message("Selected site is no longer present".to_string());
                }
                self.clamp_cursor();
                info!(source = self.source.description(), "Data reloaded");
                true
            }
            Err(e) => {
                warn!(error = %e, "Rejected snapshot");
                self.load_error = Some(e.to_string());
                false
            }
        }
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    /// Switch to a specific view. The filter belongs to the view it was
    /// typed in and is dropped.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
        self.cursor = 0;
        self.filter_text.clear();
        self.filter_active = false;
    }

    /// Check if a site matches the current filter (by name or village).
    pub fn matches_filter(&self, site: &Site) -> bool {
        if self.filter_text.is_empty() {
            return true;
        }
        let search = self.filter_text.to_lowercase();
        site.name.to_lowercase().contains(&search)
            || site.village_name().to_lowercase().contains(&search)
    }

    /// Water sources as shown in the Water view.
    pub fn visible_sources(&self) -> Vec<&Site> {
        self.registry.water_sources().filter(|s| self.matches_filter(s)).collect()
    }

    /// Villages as shown in the Villages view, filtered and sorted.
    pub fn visible_villages(&self) -> Vec<&Site> {
        let mut villages: Vec<&Site> =
            self.registry.villages().filter(|s| self.matches_filter(s)).collect();
        sort_villages_by(&mut villages, self.sort_column, self.sort_ascending);
        villages
    }

    /// Alerts as shown on the Dashboard.
    pub fn visible_alerts(&self) -> Vec<Alert> {
        self.alerts.active(&self.registry)
    }

    /// Number of selectable rows in the current view.
    pub fn row_count(&self) -> usize {
        match self.current_view {
            View::Dashboard => self.visible_alerts().len(),
            View::Trends => Disease::ALL.len(),
            View::Water => self.visible_sources().len(),
            View::Villages => self.visible_villages().len(),
        }
    }

    /// The site under the cursor, if the current view lists sites.
    pub fn site_at_cursor(&self) -> Option<SiteId> {
        match self.current_view {
            View::Water => self.visible_sources().get(self.cursor).map(|s| s.id),
            View::Villages => self.visible_villages().get(self.cursor).map(|s| s.id),
            View::Dashboard => self.visible_alerts().get(self.cursor).map(|a| a.key.site()),
            View::Trends => None,
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.row_count().saturating_sub(1));
    }

    /// Move the cursor down by one row.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move the cursor up by one row.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move the cursor down by n rows.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.row_count().saturating_sub(1);
        self.cursor = (self.cursor + n).min(max);
        self.follow_cursor();
    }

    /// Move the cursor up by n rows.
    pub fn select_prev_n(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_sub(n);
        self.follow_cursor();
    }

    /// Move the cursor to a row, e.g. from a mouse click.
    pub fn set_cursor(&mut self, row: usize) {
        if row < self.row_count() {
            self.cursor = row;
            self.follow_cursor();
        }
    }

    pub fn select_first(&mut self) {
        self.cursor = 0;
        self.follow_cursor();
    }

    pub fn select_last(&mut self) {
        self.cursor = self.row_count().saturating_sub(1);
        self.follow_cursor();
    }

    /// While the detail overlay is open, keep it on the row under the cursor.
    fn follow_cursor(&mut self) {
        if self.selection.is_selected() {
            self.enter_detail();
        }
    }

    /// Select the site under the cursor, opening the detail overlay.
    pub fn enter_detail(&mut self) {
        let Some(id) = self.site_at_cursor() else {
            return;
        };
        if let Err(e) = self.selection.select(&self.registry, id) {
            // Stale row: treat as a no-op and drop any selection
            self.selection.clear();
            self.set_status_message(e.to_string());
        }
    }

    /// Close the detail overlay.
    pub fn close_detail(&mut self) {
        self.selection.clear();
    }

    /// Navigate back: close the overlay first, then return to the Dashboard.
    pub fn go_back(&mut self) {
        if self.selection.is_selected() {
            self.selection.clear();
            return;
        }
        if self.current_view != View::Dashboard {
            self.set_view(View::Dashboard);
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Dismiss the alert under the cursor on the Dashboard.
    pub fn dismiss_alert(&mut self) {
        if self.current_view != View::Dashboard {
            return;
        }
        if let Some(alert) = self.visible_alerts().get(self.cursor) {
            self.alerts.dismiss(alert.key);
            self.set_status_message("Alert dismissed".to_string());
        }
        self.clamp_cursor();
    }

    /// Bring back all dismissed alerts.
    pub fn restore_alerts(&mut self) {
        self.alerts.restore_all();
        self.set_status_message("Alerts restored".to_string());
    }

    pub fn cycle_sort(&mut self) {
        if self.current_view == View::Villages {
            self.sort_column = self.sort_column.next();
        }
    }

    pub fn toggle_sort_direction(&mut self) {
        if self.current_view == View::Villages {
            self.sort_ascending = !self.sort_ascending;
        }
    }

    /// Enter filter input mode.
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
        self.clamp_cursor();
    }

    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
        self.clamp_cursor();
    }

    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
        self.clamp_cursor();
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current state to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        if self.last_updated.is_none() {
            anyhow::bail!("No data to export");
        }
        let alerts = self.visible_alerts();
        export::write(path, &self.registry, &alerts, &self.history)
    }
}

/// Sort villages by the given column; ties keep registry order.
pub fn sort_villages_by(villages: &mut [&Site], column: SortColumn, ascending: bool) {
    villages.sort_by(|a, b| {
        let primary = match column {
            SortColumn::Registry => std::cmp::Ordering::Equal,
            SortColumn::Name => a.name.cmp(&b.name),
            SortColumn::Cases => a.cases.cmp(&b.cases),
            SortColumn::InfectionRate => {
                let a_rate = a.infection_rate().unwrap_or(0.0);
                let b_rate = b.infection_rate().unwrap_or(0.0);
                a_rate.total_cmp(&b_rate)
            }
            SortColumn::Risk => {
                let rank = |s: &Site| s.risk().map_or(0, |r| r.severity() + 1);
                rank(a).cmp(&rank(b))
            }
        };

        if ascending {
            primary
        } else {
            primary.reverse()
        }
    });
}
