//! Built-in demonstration data.
//!
//! Six villages in Assam with one monitored water source each, plus six
//! weeks of case reports.

use super::record::{Readings, RecordKind, SiteRecord, SiteSnapshot};
use crate::data::{CaseHistory, WeeklyCases};

struct VillageSeed {
    id: u32,
    name: &'static str,
    population: u64,
    cases: u64,
    health_workers: u32,
}

struct SourceSeed {
    id: u32,
    name: &'static str,
    village: &'static str,
    last_tested: &'static str,
    ph: f64,
    bacteria: f64,
    chlorine: f64,
    temperature: f64,
}

const VILLAGES: &[VillageSeed] = &[
    VillageSeed { id: 1, name: "Jorhat", population: 2500, cases: 15, health_workers: 3 },
    VillageSeed { id: 2, name: "Dibrugarh", population: 3200, cases: 23, health_workers: 4 },
    VillageSeed { id: 3, name: "Tezpur", population: 1800, cases: 8, health_workers: 2 },
    VillageSeed { id: 4, name: "Silchar", population: 2200, cases: 12, health_workers: 3 },
    VillageSeed { id: 5, name: "Nagaon", population: 1500, cases: 6, health_workers: 2 },
    VillageSeed { id: 6, name: "Barpeta", population: 2800, cases: 18, health_workers: 3 },
];

const SOURCES: &[SourceSeed] = &[
    SourceSeed {
        id: 11,
        name: "Jorhat Main Well",
        village: "Jorhat",
        last_tested: "2h",
        ph: 6.2,
        bacteria: 850.0,
        chlorine: 0.3,
        temperature: 24.0,
    },
    SourceSeed {
        id: 12,
        name: "Dibrugarh Bore Well",
        village: "Dibrugarh",
        last_tested: "4h",
        ph: 7.1,
        bacteria: 12.0,
        chlorine: 0.8,
        temperature: 22.0,
    },
    SourceSeed {
        id: 13,
        name: "Tezpur Community Tank",
        village: "Tezpur",
        last_tested: "6h",
        ph: 8.2,
        bacteria: 45.0,
        chlorine: 1.2,
        temperature: 26.0,
    },
    SourceSeed {
        id: 14,
        name: "Silchar Hand Pump",
        village: "Silchar",
        last_tested: "1d",
        ph: 7.0,
        bacteria: 8.0,
        chlorine: 0.9,
        temperature: 23.0,
    },
    SourceSeed {
        id: 15,
        name: "Nagaon River Intake",
        village: "Nagaon",
        last_tested: "3h",
        ph: 5.8,
        bacteria: 1200.0,
        chlorine: 0.1,
        temperature: 28.0,
    },
    SourceSeed {
        id: 16,
        name: "Barpeta Deep Well",
        village: "Barpeta",
        last_tested: "5h",
        ph: 7.8,
        bacteria: 35.0,
        chlorine: 0.6,
        temperature: 25.0,
    },
];

/// Villages followed by their water sources.
pub fn default_records() -> SiteSnapshot {
    let villages = VILLAGES.iter().map(|v| SiteRecord {
        id: v.id,
        name: v.name.to_string(),
        kind: RecordKind::Village,
        village: None,
        population: Some(v.population),
        cases: v.cases,
        health_workers: v.health_workers,
        last_tested: None,
        readings: Readings::default(),
    });

    let sources = SOURCES.iter().map(|s| SiteRecord {
        id: s.id,
        name: s.name.to_string(),
        kind: RecordKind::WaterSource,
        village: Some(s.village.to_string()),
        population: None,
        cases: 0,
        health_workers: 0,
        last_tested: Some(s.last_tested.to_string()),
        readings: Readings {
            ph: Some(s.ph),
            bacteria: Some(s.bacteria),
            chlorine: Some(s.chlorine),
            temperature: Some(s.temperature),
        },
    });

    villages.chain(sources).collect()
}

/// Six weeks of reported cases, oldest first.
pub fn default_history() -> CaseHistory {
    let weeks = [(5, 12, 2), (8, 15, 3), (3, 8, 1), (6, 11, 4), (4, 7, 2), (7, 14, 3)];
    CaseHistory::new(
        weeks
            .iter()
            .enumerate()
            .map(|(i, &(cholera, diarrhea, typhoid))| WeeklyCases {
                week: format!("Week {}", i + 1),
                cholera,
                diarrhea,
                typhoid,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{summarize, Band, Disease, RiskPolicy, SiteId, SiteRegistry};

    #[test]
    fn test_seed_builds_registry() {
        let registry =
            SiteRegistry::from_records(default_records(), &RiskPolicy::default()).unwrap();
        assert_eq!(registry.villages().count(), 6);
        assert_eq!(registry.water_sources().count(), 6);
        for village in registry.villages() {
            assert_eq!(registry.sources_for(&village.name).count(), 1);
        }
    }

    #[test]
    fn test_seed_statuses_are_derived() {
        let registry =
            SiteRegistry::from_records(default_records(), &RiskPolicy::default()).unwrap();
        let status = |id| registry.get_by_id(SiteId(id)).unwrap().status();

        assert_eq!(status(11), Band::Unsafe);
        assert_eq!(status(12), Band::Safe);
        // chlorine 1.2 is above the disinfection range
        assert_eq!(status(13), Band::Unsafe);
        assert_eq!(status(14), Band::Safe);
        assert_eq!(status(15), Band::Unsafe);
        assert_eq!(status(16), Band::Safe);

        let summary = summarize(registry.water_sources());
        assert_eq!(summary.get(Band::Safe).count, 3);
        assert_eq!(summary.get(Band::Unsafe).percentage, 50);
    }

    #[test]
    fn test_seed_history_matches_trend_cards() {
        let history = default_history();
        assert_eq!(history.weeks.len(), 6);
        assert_eq!(history.totals()[1], 26);
        assert_eq!(history.trend(Disease::Cholera).unwrap().change_label(), "+75%");
    }
}
