//! JSON export of the current dashboard state.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Value};

use crate::data::{
    age, summarize, summarize_risk, Alert, Band, CaseHistory, Disease, RiskLevel, Site,
    SiteRegistry,
};

/// Build the export document: summary, sites, active alerts and trends.
pub fn build(registry: &SiteRegistry, alerts: &[Alert], history: &CaseHistory) -> Value {
    let sources = summarize(registry.water_sources());
    let villages = summarize(registry.villages());
    let risk = summarize_risk(registry.villages());

    let band_counts = |counts: &crate::data::AggregateCounts<Band>| {
        Band::ALL
            .iter()
            .map(|&band| {
                let c = counts.get(band);
                (
                    band.label().to_string(),
                    json!({ "count": c.count, "percentage": c.percentage }),
                )
            })
            .collect::<serde_json::Map<_, _>>()
    };

    let risk_counts = RiskLevel::ALL
        .iter()
        .map(|&level| {
            let c = risk.get(level);
            (
                level.label().to_string(),
                json!({ "count": c.count, "percentage": c.percentage }),
            )
        })
        .collect::<serde_json::Map<_, _>>();

    let total_cases: u64 = registry.villages().map(|v| v.cases).sum();
    let total_workers: u32 = registry.villages().map(|v| v.health_workers).sum();

    let summary = json!({
        "total_sites": registry.len(),
        "total_cases": total_cases,
        "health_workers": total_workers,
        "water_sources": { "total": sources.total, "bands": band_counts(&sources) },
        "villages": { "total": villages.total, "bands": band_counts(&villages) },
        "risk": risk_counts,
    });

    let sites: Vec<Value> = registry.get_all().iter().map(site_json).collect();

    let trends: Vec<Value> = Disease::ALL
        .iter()
        .filter_map(|&d| {
            history.trend(d).map(|t| {
                json!({
                    "disease": d.label(),
                    "current": t.current,
                    "previous": t.previous,
                    "change": t.change_label(),
                })
            })
        })
        .collect();

    json!({
        "summary": summary,
        "sites": sites,
        "alerts": alerts,
        "trends": trends,
    })
}

fn site_json(site: &Site) -> Value {
    let readings: serde_json::Map<_, _> = site
        .measurements()
        .iter()
        .map(|m| {
            (
                m.kind.to_string(),
                json!({ "value": m.value, "band": m.band().label() }),
            )
        })
        .collect();

    json!({
        "id": site.id,
        "name": site.name,
        "kind": if site.is_village() { "village" } else { "water_source" },
        "village": site.village_name(),
        "status": site.status().label(),
        "risk": site.risk().map(|r| r.label()),
        "population": site.population,
        "cases": site.cases,
        "infection_rate": site.infection_rate(),
        "last_tested": site.last_tested.map(age::format_age),
        "readings": readings,
        "issues": site.issues(),
    })
}

/// Write the export document as pretty JSON.
pub fn write(
    path: &Path,
    registry: &SiteRegistry,
    alerts: &[Alert],
    history: &CaseHistory,
) -> Result<()> {
    let doc = build(registry, alerts, history);
    let json = serde_json::to_string_pretty(&doc)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AlertBoard, RiskPolicy};
    use crate::source::seed;

    fn seeded() -> SiteRegistry {
        SiteRegistry::from_records(seed::default_records(), &RiskPolicy::default()).unwrap()
    }

    #[test]
    fn test_export_summary() {
        let registry = seeded();
        let alerts = AlertBoard::new().active(&registry);
        let doc = build(&registry, &alerts, &seed::default_history());

        assert_eq!(doc["summary"]["total_sites"], 12);
        assert_eq!(doc["summary"]["total_cases"], 82);
        assert_eq!(doc["summary"]["water_sources"]["bands"]["unsafe"]["count"], 3);
        assert_eq!(doc["summary"]["water_sources"]["bands"]["unsafe"]["percentage"], 50);
        assert_eq!(doc["sites"].as_array().unwrap().len(), 12);
        assert_eq!(doc["alerts"].as_array().unwrap().len(), alerts.len());
        assert_eq!(doc["trends"][0]["change"], "+75%");
    }

    #[test]
    fn test_export_site_fields() {
        let registry = seeded();
        let doc = build(&registry, &[], &CaseHistory::default());

        let well = &doc["sites"][6];
        assert_eq!(well["name"], "Jorhat Main Well");
        assert_eq!(well["status"], "unsafe");
        assert_eq!(well["last_tested"], "2 hours ago");
        assert_eq!(well["readings"]["pH"]["band"], "unsafe");
        assert!(doc["trends"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_write_creates_file() {
        let registry = seeded();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        write(&path, &registry, &[], &CaseHistory::default()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["summary"]["villages"]["total"], 6);
    }
}
