//! Registry of monitored sites.
//!
//! The registry owns every [`Site`] and is the only place where derived
//! fields are written. Status is recomputed whenever readings change, so
//! a displayed status can never disagree with the numbers behind it.

use std::collections::HashMap;

use tracing::{info, warn};

use super::age::parse_age;
use super::classify::{
    case_ratio_percent, classify_risk, Band, Measurement, MeasurementKind, RiskLevel, RiskPolicy,
};
use super::site::{Site, SiteId, SiteKind};
use crate::error::{HealthError, Result};
use crate::source::{RecordKind, SiteRecord};

/// Ordered collection of sites, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    sites: Vec<Site>,
    index: HashMap<SiteId, usize>,
    policy: RiskPolicy,
}

impl SiteRegistry {
    /// Build a registry from raw records, preserving their order.
    pub fn from_records(
        records: impl IntoIterator<Item = SiteRecord>,
        policy: &RiskPolicy,
    ) -> Result<Self> {
        let mut registry = Self {
            sites: Vec::new(),
            index: HashMap::new(),
            policy: policy.clone(),
        };

        for record in records {
            let site = Self::site_from_record(record);
            if registry.index.contains_key(&site.id) {
                return Err(HealthError::DuplicateSite { id: site.id });
            }
            registry.index.insert(site.id, registry.sites.len());
            registry.sites.push(site);
        }

        // Water sources first: villages without readings roll up from them
        let mut order: Vec<SiteId> = registry.sites.iter().map(|s| s.id).collect();
        order.sort_by_key(|id| registry.sites[registry.index[id]].is_village());
        for id in order {
            registry.recompute_status(id)?;
        }

        for site in &registry.sites {
            for m in site.invalid_measurements() {
                warn!(site = %site.name, kind = %m.kind, value = m.value, "Invalid measurement");
            }
        }
        info!(sites = registry.sites.len(), "Site registry loaded");

        Ok(registry)
    }

    fn site_from_record(record: SiteRecord) -> Site {
        let kind = match record.kind {
            RecordKind::Village => SiteKind::Village,
            RecordKind::WaterSource => SiteKind::WaterSource {
                village: record.village.unwrap_or_default(),
            },
        };

        let last_tested = record.last_tested.as_deref().and_then(|s| match parse_age(s) {
            Ok(age) => Some(age),
            Err(e) => {
                warn!(site = %record.name, error = %e, "Ignoring unparseable test age");
                None
            }
        });

        Site {
            id: SiteId(record.id),
            measurements: record.readings.measurements(),
            name: record.name,
            kind,
            population: record.population,
            cases: record.cases,
            health_workers: record.health_workers,
            last_tested,
            status: Band::Unknown,
            risk: None,
        }
    }

    /// All sites in insertion order.
    pub fn get_all(&self) -> &[Site] {
        &self.sites
    }

    pub fn get_by_id(&self, id: SiteId) -> Result<&Site> {
        self.index
            .get(&id)
            .map(|&idx| &self.sites[idx])
            .ok_or(HealthError::NotFound { id })
    }

    pub fn contains(&self, id: SiteId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn villages(&self) -> impl Iterator<Item = &Site> {
        self.sites.iter().filter(|s| s.is_village())
    }

    pub fn water_sources(&self) -> impl Iterator<Item = &Site> {
        self.sites.iter().filter(|s| !s.is_village())
    }

    /// Water sources belonging to the named village.
    pub fn sources_for<'a>(&'a self, village: &'a str) -> impl Iterator<Item = &'a Site> + 'a {
        self.water_sources().filter(move |s| s.village_name() == village)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn policy(&self) -> &RiskPolicy {
        &self.policy
    }

    /// Re-derive status and risk for one site from its current data.
    ///
    /// Status is the worst band across the site's readings. A village with
    /// no readings of its own takes the worst status of its water sources.
    pub fn recompute_status(&mut self, id: SiteId) -> Result<Band> {
        let idx = self.index_of(id)?;
        let site = &self.sites[idx];

        let status = self.derive_status(site);
        let risk = site.population.map(|p| {
            case_ratio_percent(site.cases, Some(p))
                .map_or(RiskLevel::Unknown, |ratio| classify_risk(ratio, &self.policy))
        });

        let site = &mut self.sites[idx];
        site.status = status;
        site.risk = risk;
        Ok(status)
    }

    fn derive_status(&self, site: &Site) -> Band {
        if let Some(worst) = site.measurements.iter().map(Measurement::band).max() {
            return worst;
        }
        if site.is_village() {
            return self.sources_for(&site.name).map(Site::status).max().unwrap_or(Band::Unknown);
        }
        Band::Unknown
    }

    /// Record a new reading, replacing any earlier reading of the same kind.
    ///
    /// Returns the band of the new reading. Invalid readings are kept and
    /// classified as [`Band::Unknown`].
    pub fn record_measurement(
        &mut self,
        id: SiteId,
        kind: MeasurementKind,
        value: f64,
    ) -> Result<Band> {
        let idx = self.index_of(id)?;
        let measurement = Measurement::new(kind, value);
        let band = measurement.band();
        if band == Band::Unknown {
            warn!(site = %self.sites[idx].name, %kind, value, "Invalid measurement recorded");
        }

        let site = &mut self.sites[idx];
        match site.measurements.iter_mut().find(|m| m.kind == kind) {
            Some(existing) => *existing = measurement,
            None => site.measurements.push(measurement),
        }

        self.recompute_status(id)?;
        self.recompute_owning_village(id)?;
        Ok(band)
    }

    /// Add newly reported cases to a site and re-derive its risk.
    pub fn record_cases(&mut self, id: SiteId, new_cases: u64) -> Result<Option<RiskLevel>> {
        let idx = self.index_of(id)?;
        let site = &mut self.sites[idx];
        site.cases = site.cases.saturating_add(new_cases);
        info!(site = %site.name, new_cases, total = site.cases, "Cases reported");

        self.recompute_status(id)?;
        Ok(self.sites[idx].risk)
    }

    fn recompute_owning_village(&mut self, id: SiteId) -> Result<()> {
        let idx = self.index_of(id)?;
        let SiteKind::WaterSource { village } = &self.sites[idx].kind else {
            return Ok(());
        };

        // Names are not unique; every same-name village rolls up this source
        let village_ids: Vec<SiteId> =
            self.villages().filter(|v| &v.name == village).map(|v| v.id).collect();
        for village_id in village_ids {
            self.recompute_status(village_id)?;
        }
        Ok(())
    }

    fn index_of(&self, id: SiteId) -> Result<usize> {
        self.index.get(&id).copied().ok_or(HealthError::NotFound { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Readings;

    fn source(id: u32, name: &str, village: &str, readings: Readings) -> SiteRecord {
        SiteRecord {
            id,
            name: name.to_string(),
            kind: RecordKind::WaterSource,
            village: Some(village.to_string()),
            population: None,
            cases: 0,
            health_workers: 0,
            last_tested: Some("2h".to_string()),
            readings,
        }
    }

    fn village(id: u32, name: &str, population: u64, cases: u64) -> SiteRecord {
        SiteRecord {
            id,
            name: name.to_string(),
            kind: RecordKind::Village,
            village: None,
            population: Some(population),
            cases,
            health_workers: 2,
            last_tested: None,
            readings: Readings::default(),
        }
    }

    fn readings(ph: f64, bacteria: f64) -> Readings {
        Readings {
            ph: Some(ph),
            bacteria: Some(bacteria),
            ..Readings::default()
        }
    }

    fn sample() -> SiteRegistry {
        SiteRegistry::from_records(
            vec![
                village(1, "Jorhat", 2500, 15),
                source(11, "Jorhat Main Well", "Jorhat", readings(6.2, 850.0)),
                village(2, "Dibrugarh", 3200, 23),
                source(12, "Dibrugarh Bore Well", "Dibrugarh", readings(7.1, 12.0)),
            ],
            &RiskPolicy::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_insertion_order_preserved() {
        let registry = sample();
        let ids: Vec<u32> = registry.get_all().iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![1, 11, 2, 12]);
        assert_eq!(registry.villages().count(), 2);
        assert_eq!(registry.water_sources().count(), 2);
    }

    #[test]
    fn test_status_derived_from_readings() {
        let registry = sample();
        assert_eq!(registry.get_by_id(SiteId(11)).unwrap().status(), Band::Unsafe);
        assert_eq!(registry.get_by_id(SiteId(12)).unwrap().status(), Band::Safe);
        assert!(registry.get_by_id(SiteId(11)).unwrap().risk().is_none());
    }

    #[test]
    fn test_village_rolls_up_from_sources() {
        let registry = sample();
        let jorhat = registry.get_by_id(SiteId(1)).unwrap();
        assert_eq!(jorhat.status(), Band::Unsafe);
        assert_eq!(jorhat.risk(), Some(RiskLevel::Low));
        assert_eq!(registry.get_by_id(SiteId(2)).unwrap().status(), Band::Safe);
    }

    #[test]
    fn test_village_without_sources_is_unknown() {
        let registry =
            SiteRegistry::from_records(vec![village(5, "Dhubri", 100, 0)], &RiskPolicy::default())
                .unwrap();
        assert_eq!(registry.get_by_id(SiteId(5)).unwrap().status(), Band::Unknown);
    }

    #[test]
    fn test_get_by_id_not_found() {
        let registry = sample();
        let err = registry.get_by_id(SiteId(99)).unwrap_err();
        assert_eq!(err, HealthError::NotFound { id: SiteId(99) });
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = SiteRegistry::from_records(
            vec![village(1, "A", 10, 0), village(1, "B", 10, 0)],
            &RiskPolicy::default(),
        );
        assert!(matches!(result, Err(HealthError::DuplicateSite { id: SiteId(1) })));
    }

    #[test]
    fn test_record_measurement_recomputes_source_and_village() {
        let mut registry = sample();

        let band = registry.record_measurement(SiteId(11), MeasurementKind::Bacteria, 40.0).unwrap();
        assert_eq!(band, Band::Safe);
        // pH 6.2 is still out of range
        assert_eq!(registry.get_by_id(SiteId(11)).unwrap().status(), Band::Unsafe);

        registry.record_measurement(SiteId(11), MeasurementKind::Ph, 7.0).unwrap();
        assert_eq!(registry.get_by_id(SiteId(11)).unwrap().status(), Band::Safe);
        assert_eq!(registry.get_by_id(SiteId(1)).unwrap().status(), Band::Safe);
        assert_eq!(registry.get_by_id(SiteId(11)).unwrap().measurements().len(), 2);
    }

    #[test]
    fn test_invalid_measurement_is_unknown_not_safe() {
        let mut registry = sample();
        let band = registry.record_measurement(SiteId(12), MeasurementKind::Chlorine, f64::NAN).unwrap();
        assert_eq!(band, Band::Unknown);

        let site = registry.get_by_id(SiteId(12)).unwrap();
        assert_eq!(site.status(), Band::Unknown);
        assert_eq!(site.invalid_measurements().count(), 1);
        assert!(site.issues().contains(&"Invalid chlorine reading".to_string()));
    }

    #[test]
    fn test_record_on_unknown_site() {
        let mut registry = sample();
        assert!(matches!(
            registry.record_measurement(SiteId(42), MeasurementKind::Ph, 7.0),
            Err(HealthError::NotFound { .. })
        ));
        assert!(matches!(
            registry.record_cases(SiteId(42), 3),
            Err(HealthError::NotFound { .. })
        ));
    }

    #[test]
    fn test_record_cases_raises_risk() {
        let mut registry = sample();
        // 15 + 60 = 75 of 2500 is exactly 3%
        let risk = registry.record_cases(SiteId(1), 60).unwrap();
        assert_eq!(risk, Some(RiskLevel::High));
        assert_eq!(registry.get_by_id(SiteId(1)).unwrap().cases, 75);
    }

    #[test]
    fn test_zero_population_risk_unknown() {
        let registry =
            SiteRegistry::from_records(vec![village(3, "Empty", 0, 4)], &RiskPolicy::default())
                .unwrap();
        assert_eq!(registry.get_by_id(SiteId(3)).unwrap().risk(), Some(RiskLevel::Unknown));
    }

    #[test]
    fn test_custom_policy_applies() {
        let policy = RiskPolicy {
            medium_percent: 0.1,
            high_percent: 0.5,
            critical_percent: 0.55,
        };
        let registry =
            SiteRegistry::from_records(vec![village(1, "Jorhat", 2500, 15)], &policy).unwrap();
        // 0.6% exceeds the critical threshold
        assert_eq!(registry.get_by_id(SiteId(1)).unwrap().risk(), Some(RiskLevel::Critical));
    }

    #[test]
    fn test_last_tested_parsed() {
        let registry = sample();
        let well = registry.get_by_id(SiteId(11)).unwrap();
        assert_eq!(well.last_tested, Some(std::time::Duration::from_secs(7200)));
    }

    #[test]
    fn test_out_of_range_age_is_dropped() {
        let mut well = source(11, "Jorhat Main Well", "Jorhat", readings(7.0, 10.0));
        well.last_tested = Some("1e20d".to_string());

        let registry = SiteRegistry::from_records(vec![well], &RiskPolicy::default()).unwrap();
        let well = registry.get_by_id(SiteId(11)).unwrap();
        assert_eq!(well.last_tested, None);
        assert_eq!(well.status(), Band::Safe);
    }

    #[test]
    fn test_measurement_updates_every_same_name_village() {
        let mut registry = SiteRegistry::from_records(
            vec![
                village(1, "Rampur", 1000, 0),
                village(2, "Rampur", 800, 0),
                source(11, "Rampur Well", "Rampur", readings(7.0, 10.0)),
            ],
            &RiskPolicy::default(),
        )
        .unwrap();
        assert_eq!(registry.get_by_id(SiteId(2)).unwrap().status(), Band::Safe);

        registry.record_measurement(SiteId(11), MeasurementKind::Bacteria, 900.0).unwrap();

        assert_eq!(registry.get_by_id(SiteId(1)).unwrap().status(), Band::Unsafe);
        assert_eq!(registry.get_by_id(SiteId(2)).unwrap().status(), Band::Unsafe);
    }
}
