//! Threshold classification of raw readings.
//!
//! Every view consumes the bands produced here; no other module compares
//! a reading against a threshold.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HealthError, Result};

/// pH range considered safe for drinking water (inclusive).
pub const PH_SAFE: (f64, f64) = (6.5, 8.5);
/// Bacterial count (CFU/ml) at which a source enters the warning band.
pub const BACTERIA_WARNING: f64 = 100.0;
/// Bacterial count (CFU/ml) at which a source is unsafe.
pub const BACTERIA_UNSAFE: f64 = 500.0;
/// Residual chlorine range (mg/L) for effective disinfection (inclusive).
pub const CHLORINE_SAFE: (f64, f64) = (0.5, 1.0);
/// Ideal water temperature range in °C (inclusive).
pub const TEMPERATURE_IDEAL: (f64, f64) = (15.0, 25.0);

/// The kind of a measurement taken at a water source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    Ph,
    Bacteria,
    Chlorine,
    Temperature,
}

impl MeasurementKind {
    /// All kinds, in display order.
    pub const ALL: [MeasurementKind; 4] = [
        MeasurementKind::Ph,
        MeasurementKind::Bacteria,
        MeasurementKind::Chlorine,
        MeasurementKind::Temperature,
    ];

    /// Unit suffix for display.
    pub fn unit(&self) -> &'static str {
        match self {
            MeasurementKind::Ph => "",
            MeasurementKind::Bacteria => "CFU/ml",
            MeasurementKind::Chlorine => "mg/L",
            MeasurementKind::Temperature => "°C",
        }
    }

    /// Whether a negative value is physically meaningful for this kind.
    fn allows_negative(&self) -> bool {
        matches!(self, MeasurementKind::Temperature)
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MeasurementKind::Ph => "pH",
            MeasurementKind::Bacteria => "bacteria",
            MeasurementKind::Chlorine => "chlorine",
            MeasurementKind::Temperature => "temperature",
        };
        f.write_str(label)
    }
}

/// Water quality band.
///
/// The variant order is the severity order used when combining bands:
/// `Unsafe > Unknown > Warning > Safe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Safe,
    Warning,
    /// The reading could not be classified. Never treated as safe.
    Unknown,
    Unsafe,
}

impl Band {
    pub const ALL: [Band; 4] = [Band::Safe, Band::Warning, Band::Unknown, Band::Unsafe];

    /// Short lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            Band::Safe => "safe",
            Band::Warning => "warning",
            Band::Unknown => "unknown",
            Band::Unsafe => "unsafe",
        }
    }

    /// Label used for a site's overall water status.
    pub fn water_status(&self) -> &'static str {
        match self {
            Band::Safe => "Safe",
            Band::Warning => "Warning",
            Band::Unknown => "Unknown",
            Band::Unsafe => "Contaminated",
        }
    }

    /// Short symbol for table cells.
    pub fn symbol(&self) -> &'static str {
        match self {
            Band::Safe => "OK",
            Band::Warning => "WARN",
            Band::Unknown => "??",
            Band::Unsafe => "BAD",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outbreak risk derived from the case/population ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
    /// Ratio undefined (no population) or invalid.
    Unknown,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 5] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
        RiskLevel::Unknown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
            RiskLevel::Unknown => "unknown",
        }
    }

    /// Severity rank for sorting; unknown ranks with high.
    pub fn severity(&self) -> u8 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High | RiskLevel::Unknown => 2,
            RiskLevel::Critical => 3,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Case-ratio thresholds, in percent of the population.
///
/// `low < medium_percent <= medium < high_percent <= high <= critical_percent < critical`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskPolicy {
    pub medium_percent: f64,
    pub high_percent: f64,
    pub critical_percent: f64,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            medium_percent: 1.0,
            high_percent: 3.0,
            critical_percent: 6.0,
        }
    }
}

impl RiskPolicy {
    /// Check that the thresholds are finite, positive and strictly increasing.
    pub fn validate(&self) -> anyhow::Result<()> {
        let bounds = [self.medium_percent, self.high_percent, self.critical_percent];
        if bounds.iter().any(|b| !b.is_finite() || *b <= 0.0) {
            anyhow::bail!("Risk thresholds must be positive numbers: {:?}", bounds);
        }
        if !(self.medium_percent < self.high_percent && self.high_percent < self.critical_percent)
        {
            anyhow::bail!(
                "Risk thresholds must be increasing: medium {} < high {} < critical {}",
                self.medium_percent,
                self.high_percent,
                self.critical_percent
            );
        }
        Ok(())
    }
}

/// A single reading taken at a site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub kind: MeasurementKind,
    pub value: f64,
}

impl Measurement {
    pub fn new(kind: MeasurementKind, value: f64) -> Self {
        Self { kind, value }
    }

    pub fn band(&self) -> Band {
        classify(self.kind, self.value)
    }

    /// Describe what is wrong with this reading, if anything.
    pub fn issue(&self) -> Option<String> {
        let band = self.band();
        if band == Band::Safe {
            return None;
        }
        if band == Band::Unknown {
            return Some(format!("Invalid {} reading", self.kind));
        }

        let issue = match self.kind {
            MeasurementKind::Ph if self.value < PH_SAFE.0 => "Low pH",
            MeasurementKind::Ph => "High pH",
            MeasurementKind::Bacteria if band == Band::Warning => "Elevated bacteria count",
            MeasurementKind::Bacteria => "High bacteria count",
            MeasurementKind::Chlorine if self.value < CHLORINE_SAFE.0 => "Low chlorine",
            MeasurementKind::Chlorine => "High chlorine",
            MeasurementKind::Temperature if self.value < TEMPERATURE_IDEAL.0 => "Low temperature",
            MeasurementKind::Temperature => "Elevated temperature",
        };
        Some(issue.to_string())
    }
}

/// Classify a reading, rejecting values outside the kind's domain.
pub fn classify_checked(kind: MeasurementKind, value: f64) -> Result<Band> {
    if !value.is_finite() || (value < 0.0 && !kind.allows_negative()) {
        return Err(HealthError::InvalidMeasurement { kind, value });
    }

    let band = match kind {
        MeasurementKind::Ph => within(value, PH_SAFE, Band::Unsafe),
        MeasurementKind::Bacteria => {
            if value < BACTERIA_WARNING {
                Band::Safe
            } else if value < BACTERIA_UNSAFE {
                Band::Warning
            } else {
                Band::Unsafe
            }
        }
        MeasurementKind::Chlorine => within(value, CHLORINE_SAFE, Band::Unsafe),
        MeasurementKind::Temperature => within(value, TEMPERATURE_IDEAL, Band::Warning),
    };
    Ok(band)
}

/// Classify a reading. Invalid input maps to [`Band::Unknown`].
pub fn classify(kind: MeasurementKind, value: f64) -> Band {
    classify_checked(kind, value).unwrap_or(Band::Unknown)
}

/// Classify a case/population ratio given in percent.
pub fn classify_risk(ratio_percent: f64, policy: &RiskPolicy) -> RiskLevel {
    if !ratio_percent.is_finite() || ratio_percent < 0.0 {
        return RiskLevel::Unknown;
    }
    if ratio_percent < policy.medium_percent {
        RiskLevel::Low
    } else if ratio_percent < policy.high_percent {
        RiskLevel::Medium
    } else if ratio_percent <= policy.critical_percent {
        RiskLevel::High
    } else {
        RiskLevel::Critical
    }
}

/// Cases as a percentage of population, `None` without a population.
pub fn case_ratio_percent(cases: u64, population: Option<u64>) -> Option<f64> {
    match population {
        Some(p) if p > 0 => Some(cases as f64 * 100.0 / p as f64),
        _ => None,
    }
}

fn within(value: f64, (low, high): (f64, f64), outside: Band) -> Band {
    if value >= low && value <= high {
        Band::Safe
    } else {
        outside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ph_bounds_inclusive() {
        assert_eq!(classify(MeasurementKind::Ph, 6.5), Band::Safe);
        assert_eq!(classify(MeasurementKind::Ph, 8.5), Band::Safe);
        assert_eq!(classify(MeasurementKind::Ph, 7.1), Band::Safe);
        assert_eq!(classify(MeasurementKind::Ph, 6.49), Band::Unsafe);
        assert_eq!(classify(MeasurementKind::Ph, 8.51), Band::Unsafe);
        assert_eq!(classify(MeasurementKind::Ph, 0.0), Band::Unsafe);
    }

    #[test]
    fn test_ph_safe_iff_in_range() {
        for tenth in 0..=140 {
            let v = tenth as f64 / 10.0;
            let safe = (6.5..=8.5).contains(&v);
            assert_eq!(classify(MeasurementKind::Ph, v) == Band::Safe, safe, "pH {}", v);
        }
    }

    #[test]
    fn test_bacteria_bands() {
        assert_eq!(classify(MeasurementKind::Bacteria, 0.0), Band::Safe);
        assert_eq!(classify(MeasurementKind::Bacteria, 99.9), Band::Safe);
        assert_eq!(classify(MeasurementKind::Bacteria, 100.0), Band::Warning);
        assert_eq!(classify(MeasurementKind::Bacteria, 499.0), Band::Warning);
        assert_eq!(classify(MeasurementKind::Bacteria, 500.0), Band::Unsafe);
        assert_eq!(classify(MeasurementKind::Bacteria, 1200.0), Band::Unsafe);
    }

    #[test]
    fn test_bacteria_warning_iff_in_range() {
        for b in (0..2000).step_by(7) {
            let v = b as f64;
            let warning = (100.0..500.0).contains(&v);
            assert_eq!(classify(MeasurementKind::Bacteria, v) == Band::Warning, warning);
        }
    }

    #[test]
    fn test_chlorine_bounds() {
        assert_eq!(classify(MeasurementKind::Chlorine, 0.5), Band::Safe);
        assert_eq!(classify(MeasurementKind::Chlorine, 1.0), Band::Safe);
        assert_eq!(classify(MeasurementKind::Chlorine, 0.3), Band::Unsafe);
        assert_eq!(classify(MeasurementKind::Chlorine, 1.2), Band::Unsafe);
    }

    #[test]
    fn test_temperature_only_warns() {
        assert_eq!(classify(MeasurementKind::Temperature, 15.0), Band::Safe);
        assert_eq!(classify(MeasurementKind::Temperature, 25.0), Band::Safe);
        assert_eq!(classify(MeasurementKind::Temperature, 28.0), Band::Warning);
        assert_eq!(classify(MeasurementKind::Temperature, -2.0), Band::Warning);
    }

    #[test]
    fn test_invalid_input_is_never_safe() {
        for kind in MeasurementKind::ALL {
            assert_eq!(classify(kind, f64::NAN), Band::Unknown);
            assert_eq!(classify(kind, f64::INFINITY), Band::Unknown);
        }
        assert_eq!(classify(MeasurementKind::Bacteria, -1.0), Band::Unknown);
        assert_eq!(classify(MeasurementKind::Ph, -0.1), Band::Unknown);
        assert_eq!(classify(MeasurementKind::Chlorine, -0.5), Band::Unknown);

        let err = classify_checked(MeasurementKind::Bacteria, -1.0).unwrap_err();
        assert!(matches!(
            err,
            HealthError::InvalidMeasurement { kind: MeasurementKind::Bacteria, .. }
        ));
    }

    #[test]
    fn test_risk_boundaries() {
        let policy = RiskPolicy::default();
        assert_eq!(classify_risk(0.0, &policy), RiskLevel::Low);
        assert_eq!(classify_risk(0.99, &policy), RiskLevel::Low);
        assert_eq!(classify_risk(1.0, &policy), RiskLevel::Medium);
        assert_eq!(classify_risk(2.99, &policy), RiskLevel::Medium);
        assert_eq!(classify_risk(3.0, &policy), RiskLevel::High);
        assert_eq!(classify_risk(6.0, &policy), RiskLevel::High);
        assert_eq!(classify_risk(6.01, &policy), RiskLevel::Critical);
        assert_eq!(classify_risk(f64::NAN, &policy), RiskLevel::Unknown);
        assert_eq!(classify_risk(-1.0, &policy), RiskLevel::Unknown);
    }

    #[test]
    fn test_case_ratio_boundaries_are_exact() {
        let policy = RiskPolicy::default();
        let level = |cases, pop| {
            case_ratio_percent(cases, Some(pop))
                .map_or(RiskLevel::Unknown, |r| classify_risk(r, &policy))
        };
        assert_eq!(level(1, 100), RiskLevel::Medium);
        assert_eq!(level(3, 100), RiskLevel::High);
        assert_eq!(level(6, 100), RiskLevel::High);
        assert_eq!(level(7, 100), RiskLevel::Critical);
        assert_eq!(level(15, 2500), RiskLevel::Low);
        assert_eq!(case_ratio_percent(5, Some(0)), None);
        assert_eq!(case_ratio_percent(5, None), None);
    }

    #[test]
    fn test_policy_validation() {
        assert!(RiskPolicy::default().validate().is_ok());
        let bad = RiskPolicy {
            medium_percent: 3.0,
            high_percent: 3.0,
            critical_percent: 6.0,
        };
        assert!(bad.validate().is_err());
        let negative = RiskPolicy {
            medium_percent: -1.0,
            ..RiskPolicy::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_issue_labels() {
        let issue = |kind, v| Measurement::new(kind, v).issue();
        assert_eq!(issue(MeasurementKind::Ph, 6.2).as_deref(), Some("Low pH"));
        assert_eq!(issue(MeasurementKind::Ph, 9.0).as_deref(), Some("High pH"));
        assert_eq!(issue(MeasurementKind::Ph, 7.0), None);
        assert_eq!(
            issue(MeasurementKind::Bacteria, 850.0).as_deref(),
            Some("High bacteria count")
        );
        assert_eq!(
            issue(MeasurementKind::Bacteria, 150.0).as_deref(),
            Some("Elevated bacteria count")
        );
        assert_eq!(issue(MeasurementKind::Chlorine, 0.1).as_deref(), Some("Low chlorine"));
        assert_eq!(
            issue(MeasurementKind::Temperature, 26.0).as_deref(),
            Some("Elevated temperature")
        );
        assert_eq!(
            issue(MeasurementKind::Ph, f64::NAN).as_deref(),
            Some("Invalid pH reading")
        );
    }

    #[test]
    fn test_band_severity_order() {
        assert!(Band::Unsafe > Band::Unknown);
        assert!(Band::Unknown > Band::Warning);
        assert!(Band::Warning > Band::Safe);
    }
}
