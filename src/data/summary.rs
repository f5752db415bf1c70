//! Per-band counts and percentages for summary cards.

use std::collections::BTreeMap;

use serde::Serialize;

use super::classify::{Band, RiskLevel};
use super::site::Site;

/// Count of members in one band and their share of the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BandCount {
    pub count: usize,
    /// `round(count / total * 100)`, rounding halves up.
    pub percentage: u32,
}

/// Counts per band, derived from a set of sites.
///
/// Only bands present in the input have entries. Percentages are rounded
/// independently, so they need not sum to exactly 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateCounts<K: Ord> {
    pub total: usize,
    pub bands: BTreeMap<K, BandCount>,
}

impl<K: Ord> Default for AggregateCounts<K> {
    fn default() -> Self {
        Self {
            total: 0,
            bands: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> AggregateCounts<K> {
    /// Count and percentage for a band; zero when absent.
    pub fn get(&self, band: K) -> BandCount {
        self.bands.get(&band).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, BandCount)> + '_ {
        self.bands.iter().map(|(k, c)| (*k, *c))
    }
}

/// Summarize any sequence of band labels.
pub fn summarize_by<K, I>(labels: I) -> AggregateCounts<K>
where
    K: Ord + Copy,
    I: IntoIterator<Item = K>,
{
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    let mut total = 0;
    for label in labels {
        *counts.entry(label).or_default() += 1;
        total += 1;
    }

    let bands = counts
        .into_iter()
        .map(|(label, count)| {
            let count = BandCount {
                count,
                percentage: percentage(count, total),
            };
            (label, count)
        })
        .collect();

    AggregateCounts { total, bands }
}

/// Summarize sites by water status.
pub fn summarize<'a>(sites: impl IntoIterator<Item = &'a Site>) -> AggregateCounts<Band> {
    summarize_by(sites.into_iter().map(Site::status))
}

/// Summarize sites by outbreak risk. Sites without a risk are skipped.
pub fn summarize_risk<'a>(sites: impl IntoIterator<Item = &'a Site>) -> AggregateCounts<RiskLevel> {
    summarize_by(sites.into_iter().filter_map(Site::risk))
}

/// `round(count / total * 100)` with halves rounded up; 0 when total is 0.
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as u64 * 200 + total as u64) / (total as u64 * 2)) as u32
}
