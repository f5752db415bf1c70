//! Weekly infection counts and week-over-week trends.

use serde::{Deserialize, Serialize};

/// Diseases tracked in weekly reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disease {
    Cholera,
    Diarrhea,
    Typhoid,
}

impl Disease {
    pub const ALL: [Disease; 3] = [Disease::Cholera, Disease::Diarrhea, Disease::Typhoid];

    pub fn label(&self) -> &'static str {
        match self {
            Disease::Cholera => "Cholera",
            Disease::Diarrhea => "Diarrhea",
            Disease::Typhoid => "Typhoid",
        }
    }
}

/// Reported cases for one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyCases {
    pub week: String,
    pub cholera: u64,
    pub diarrhea: u64,
    pub typhoid: u64,
}

impl WeeklyCases {
    pub fn cases(&self, disease: Disease) -> u64 {
        match disease {
            Disease::Cholera => self.cholera,
            Disease::Diarrhea => self.diarrhea,
            Disease::Typhoid => self.typhoid,
        }
    }

    pub fn total(&self) -> u64 {
        Disease::ALL.iter().map(|&d| self.cases(d)).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

/// Change between the two most recent weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trend {
    pub current: u64,
    pub previous: u64,
    pub direction: Direction,
    /// Rounded percent change; `None` when the previous week had no cases.
    pub change_percent: Option<i64>,
}

impl Trend {
    pub fn between(previous: u64, current: u64) -> Self {
        let direction = match current.cmp(&previous) {
            std::cmp::Ordering::Greater => Direction::Up,
            std::cmp::Ordering::Less => Direction::Down,
            std::cmp::Ordering::Equal => Direction::Flat,
        };
        let change_percent = (previous > 0).then(|| {
            let delta = current as f64 - previous as f64;
            (delta / previous as f64 * 100.0).round() as i64
        });

        Self {
            current,
            previous,
            direction,
            change_percent,
        }
    }

    /// Signed change label, e.g. "+75%", "-25%", "new".
    pub fn change_label(&self) -> String {
        match self.change_percent {
            Some(p) if p > 0 => format!("+{}%", p),
            Some(p) => format!("{}%", p),
            None if self.current > 0 => "new".to_string(),
            None => "-".to_string(),
        }
    }
}

/// Weekly case history, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseHistory {
    pub weeks: Vec<WeeklyCases>,
}

impl CaseHistory {
    pub fn new(weeks: Vec<WeeklyCases>) -> Self {
        Self { weeks }
    }

    /// Trend for one disease over the last two weeks.
    pub fn trend(&self, disease: Disease) -> Option<Trend> {
        let [.., previous, current] = self.weeks.as_slice() else {
            return None;
        };
        Some(Trend::between(previous.cases(disease), current.cases(disease)))
    }

    pub fn totals(&self) -> Vec<u64> {
        self.weeks.iter().map(WeeklyCases::total).collect()
    }

    /// Share of all reported cases per disease, rounded percent.
    pub fn distribution(&self) -> Vec<(Disease, u32)> {
        let grand_total: u64 = self.totals().iter().sum();
        Disease::ALL
            .iter()
            .map(|&d| {
                let cases: u64 = self.weeks.iter().map(|w| w.cases(d)).sum();
                (d, super::summary::percentage(cases as usize, grand_total as usize))
            })
            .collect()
    }

    /// Weekly totals normalized to 0-7 for 8 sparkline levels.
    pub fn sparkline(&self) -> Vec<u8> {
        let totals = self.totals();
        let max = totals.iter().copied().max().unwrap_or(0).max(1);
        totals.iter().map(|&t| ((t * 7) / max).min(7) as u8).collect()
    }
}
