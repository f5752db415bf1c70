//! Serialized site records.
//!
//! These are the raw input format read from JSON files or produced by the
//! built-in seed. Derived fields (status, risk) are intentionally absent:
//! the registry computes them from the readings.

use serde::{Deserialize, Serialize};

use crate::data::{Measurement, MeasurementKind};

/// An ordered list of site records. Order is preserved for display.
pub type SiteSnapshot = Vec<SiteRecord>;

/// Whether a record describes a village or one of its water sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Village,
    WaterSource,
}

/// Raw state for a single site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteRecord {
    pub id: u32,
    pub name: String,
    pub kind: RecordKind,

    /// Owning village name (water sources only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,

    /// Active cases reported at this site.
    #[serde(default)]
    pub cases: u64,

    #[serde(default)]
    pub health_workers: u32,

    /// Age of the latest test. Format: "2h", "1d", "30m".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_tested: Option<String>,

    #[serde(default)]
    pub readings: Readings,
}

/// Latest readings at a site. Missing readings are simply not measured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Readings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ph: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bacteria: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chlorine: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl Readings {
    /// Flatten into measurements, in [`MeasurementKind::ALL`] order.
    pub fn measurements(&self) -> Vec<Measurement> {
        MeasurementKind::ALL
            .iter()
            .filter_map(|&kind| self.get(kind).map(|v| Measurement::new(kind, v)))
            .collect()
    }

    pub fn get(&self, kind: MeasurementKind) -> Option<f64> {
        match kind {
            MeasurementKind::Ph => self.ph,
            MeasurementKind::Bacteria => self.bacteria,
            MeasurementKind::Chlorine => self.chlorine,
            MeasurementKind::Temperature => self.temperature,
        }
    }
}
