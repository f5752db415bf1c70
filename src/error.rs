//! Error types for the health monitoring model.

use thiserror::Error;

use crate::data::{MeasurementKind, SiteId};

/// Errors raised by the classification, registry and selection layers.
///
/// None of these are fatal. `NotFound` is handled by ignoring the request
/// or clearing the selection, `InvalidMeasurement` by classifying the
/// reading as unknown and surfacing it as a data-quality issue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HealthError {
    /// No site with this identifier is registered.
    #[error("Site not found: {id}")]
    NotFound { id: SiteId },

    /// A reading that cannot be classified (non-finite or out of domain).
    #[error("Invalid {kind} measurement: {value}")]
    InvalidMeasurement { kind: MeasurementKind, value: f64 },

    /// Two records share an identifier.
    #[error("Duplicate site id: {id}")]
    DuplicateSite { id: SiteId },
}

pub type Result<T> = std::result::Result<T, HealthError>;
