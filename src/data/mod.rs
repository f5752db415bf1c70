//! Domain model: classification, registry, aggregation and selection.
//!
//! ## Submodules
//!
//! - [`classify`]: Threshold rules mapping readings to [`Band`]s and case
//!   ratios to [`RiskLevel`]s
//! - [`site`]: The [`Site`] entity with derived status
//! - [`registry`]: [`SiteRegistry`], the ordered set of sites
//! - [`summary`]: Per-band counts and percentages
//! - [`selection`]: [`SelectionModel`] for the detail view
//! - [`alerts`]: Alerts derived from site status, with dismissal
//! - [`trends`]: Weekly case history and week-over-week trends
//! - [`age`]: Parsing and formatting of reading ages ("2h", "1d")
//!
//! ## Data Flow
//!
//! ```text
//! SiteSnapshot (raw records)
//!        │
//!        ▼
//! SiteRegistry::from_records()
//!        │
//!        ├──▶ Site (status/risk derived via classify)
//!        │
//!        ├──▶ summarize() / AlertBoard::active()
//!        │
//!        └──▶ SelectionModel::resolve()
//! ```

pub mod age;
pub mod alerts;
pub mod classify;
pub mod registry;
pub mod selection;
pub mod site;
pub mod summary;
pub mod trends;

pub use alerts::{Alert, AlertBoard, AlertKey, AlertSeverity};
pub use classify::{
    classify, classify_checked, classify_risk, Band, Measurement, MeasurementKind, RiskLevel,
    RiskPolicy,
};
pub use registry::SiteRegistry;
pub use selection::{Selection, SelectionModel};
pub use site::{Site, SiteId, SiteKind};
pub use summary::{summarize, summarize_by, summarize_risk, AggregateCounts, BandCount};
pub use trends::{CaseHistory, Direction, Disease, Trend, WeeklyCases};
