//! Alerts derived from the current registry state.
//!
//! Alerts are never stored: they are recomputed from site status and risk
//! on every read. Only the set of dismissed alert keys is kept, so an
//! alert dismissed for a site stays hidden across reloads of the same data.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::classify::{Band, RiskLevel};
use super::registry::SiteRegistry;
use super::site::{Site, SiteId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            AlertSeverity::Warning => "WARNING",
            AlertSeverity::Critical => "CRITICAL",
        }
    }
}

/// Stable identity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "site", rename_all = "snake_case")]
pub enum AlertKey {
    /// Water quality problem at a source.
    Water(SiteId),
    /// Elevated outbreak risk in a village.
    Outbreak(SiteId),
}

impl AlertKey {
    /// The site the alert is about.
    pub fn site(&self) -> SiteId {
        match self {
            AlertKey::Water(id) | AlertKey::Outbreak(id) => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub key: AlertKey,
    pub severity: AlertSeverity,
    pub message: String,
}

/// Session-local alert state.
#[derive(Debug, Clone, Default)]
pub struct AlertBoard {
    dismissed: HashSet<AlertKey>,
}

impl AlertBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every alert implied by the registry, worst first, then in site order.
    pub fn derive(registry: &SiteRegistry) -> Vec<Alert> {
        let mut alerts: Vec<Alert> = registry
            .get_all()
            .iter()
            .filter_map(|site| {
                if site.is_village() {
                    outbreak_alert(site)
                } else {
                    water_alert(site)
                }
            })
            .collect();

        alerts.sort_by(|a, b| b.severity.cmp(&a.severity));
        alerts
    }

    /// Alerts not dismissed in this session.
    pub fn active(&self, registry: &SiteRegistry) -> Vec<Alert> {
        Self::derive(registry)
            .into_iter()
            .filter(|a| !self.dismissed.contains(&a.key))
            .collect()
    }

    /// Hide an alert. Returns `false` if it was already dismissed.
    pub fn dismiss(&mut self, key: AlertKey) -> bool {
        let inserted = self.dismissed.insert(key);
        if inserted {
            debug!(?key, "Alert dismissed");
        }
        inserted
    }

    pub fn is_dismissed(&self, key: AlertKey) -> bool {
        self.dismissed.contains(&key)
    }

    /// Bring back every dismissed alert.
    pub fn restore_all(&mut self) {
        self.dismissed.clear();
    }
}

fn water_alert(site: &Site) -> Option<Alert> {
    let issues = site.issues().join(", ");
    let village = site.village_name();

    let (severity, message) = match site.status() {
        Band::Safe => return None,
        Band::Unsafe => (
            AlertSeverity::Critical,
            format!(
                "{} in {} is contaminated. Issues: {}. Immediate action required.",
                site.name, village, issues
            ),
        ),
        Band::Unknown if site.measurements().is_empty() => (
            AlertSeverity::Warning,
            format!("{} in {} has no readings. Schedule a test.", site.name, village),
        ),
        Band::Unknown => (
            AlertSeverity::Warning,
            format!("{} in {} reported invalid readings: {}.", site.name, village, issues),
        ),
        Band::Warning => (
            AlertSeverity::Warning,
            format!("{} in {} needs attention: {}.", site.name, village, issues),
        ),
    };

    Some(Alert {
        key: AlertKey::Water(site.id),
        severity,
        message,
    })
}

fn outbreak_alert(site: &Site) -> Option<Alert> {
    let severity = match site.risk()? {
        RiskLevel::Critical => AlertSeverity::Critical,
        RiskLevel::High => AlertSeverity::Warning,
        _ => return None,
    };
    let rate = site.infection_rate().unwrap_or_default();

    Some(Alert {
        key: AlertKey::Outbreak(site.id),
        severity,
        message: format!(
            "{} cases in {} ({:.1}% of population). Monitor closely.",
            site.cases, site.name, rate
        ),
    })
}
