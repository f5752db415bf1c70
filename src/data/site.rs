//! Monitored sites with derived status.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::classify::{case_ratio_percent, Band, Measurement, MeasurementKind, RiskLevel};

/// Unique identifier of a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(pub u32);

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a site represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteKind {
    Village,
    /// A well, pump or tank belonging to the named village.
    WaterSource { village: String },
}

/// A monitored village or water source.
///
/// `status` and `risk` are derived from the readings and case counts by
/// [`SiteRegistry`](super::SiteRegistry) and cannot be set directly.
#[derive(Debug, Clone)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    pub kind: SiteKind,
    pub population: Option<u64>,
    pub cases: u64,
    pub health_workers: u32,
    pub last_tested: Option<Duration>,
    pub(crate) measurements: Vec<Measurement>,
    pub(crate) status: Band,
    pub(crate) risk: Option<RiskLevel>,
}

impl Site {
    pub fn status(&self) -> Band {
        self.status
    }

    /// Outbreak risk; `None` for sites without a population (water sources).
    pub fn risk(&self) -> Option<RiskLevel> {
        self.risk
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn measurement(&self, kind: MeasurementKind) -> Option<Measurement> {
        self.measurements.iter().copied().find(|m| m.kind == kind)
    }

    pub fn is_village(&self) -> bool {
        self.kind == SiteKind::Village
    }

    /// The village a site belongs to (itself for a village).
    pub fn village_name(&self) -> &str {
        match &self.kind {
            SiteKind::Village => &self.name,
            SiteKind::WaterSource { village } => village,
        }
    }

    /// Cases as a percentage of the population.
    pub fn infection_rate(&self) -> Option<f64> {
        case_ratio_percent(self.cases, self.population)
    }

    /// Problems found in this site's readings, in measurement order.
    pub fn issues(&self) -> Vec<String> {
        self.measurements.iter().filter_map(Measurement::issue).collect()
    }

    /// Readings the classifier could not interpret.
    pub fn invalid_measurements(&self) -> impl Iterator<Item = &Measurement> {
        self.measurements.iter().filter(|m| m.band() == Band::Unknown)
    }
}
