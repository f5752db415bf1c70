//! # healthwatch
//!
//! A terminal dashboard and library for community health and water-quality
//! monitoring.
//!
//! Field teams record water readings (pH, bacteria, chlorine, temperature)
//! per water source and case counts per village. This crate classifies every
//! reading into a safety [`Band`], derives each site's overall status and
//! outbreak [`RiskLevel`], aggregates counts and percentages per band, and
//! tracks which single site is selected for the detail view.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (state) │    │ (model)  │    │(render) │    │         │  │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘  │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── BuiltinSource | FileSource                  │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`data`]**: Threshold classification, the [`SiteRegistry`], per-band
//!   summaries, the [`SelectionModel`], alerts and case trends
//! - **[`source`]**: The [`DataSource`] trait with the built-in demo data and
//!   a polling JSON [`FileSource`]
//! - **[`app`]**: Application state, view navigation and user interaction
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`config`]**: Layered settings (TOML file, environment)
//! - **[`export`]**: JSON export of the current state
//!
//! ## Usage
//!
//! ```bash
//! # Built-in demo data
//! healthwatch
//!
//! # Poll a JSON file of site records
//! healthwatch --file sites.json
//!
//! # Write a JSON summary and exit
//! healthwatch --file sites.json --export report.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use healthwatch::{summarize, Band, BuiltinSource, DataSource, RiskPolicy, SiteRegistry};
//!
//! let mut source = BuiltinSource::new();
//! let records = source.poll().unwrap_or_default();
//! let registry = SiteRegistry::from_records(records, &RiskPolicy::default()).unwrap();
//!
//! let summary = summarize(registry.water_sources());
//! println!("{}% of sources unsafe", summary.get(Band::Unsafe).percentage);
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod export;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use config::Settings;
pub use data::{
    classify, classify_risk, summarize, AggregateCounts, Alert, AlertBoard, Band, BandCount,
    CaseHistory, Measurement, MeasurementKind, RiskLevel, RiskPolicy, Selection, SelectionModel,
    Site, SiteId, SiteKind, SiteRegistry,
};
pub use error::HealthError;
pub use source::{BuiltinSource, DataSource, FileSource, SiteRecord, SiteSnapshot};
