//! Data source abstraction for loading site records.
//!
//! A source yields complete [`SiteSnapshot`]s; the application rebuilds the
//! registry from each new snapshot. Sources are polled from the UI loop and
//! must not block.

mod builtin;
mod file;
mod record;
pub mod seed;

pub use builtin::BuiltinSource;
pub use file::FileSource;
pub use record::{Readings, RecordKind, SiteRecord, SiteSnapshot};

use std::fmt::Debug;

/// Trait for receiving site records from various sources.
///
/// # Example
///
/// ```
/// use healthwatch::{BuiltinSource, DataSource};
///
/// let mut source = BuiltinSource::new();
/// if let Some(snapshot) = source.poll() {
///     println!("Got {} sites", snapshot.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if new data is available, `None` otherwise.
    fn poll(&mut self) -> Option<SiteSnapshot>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;

    /// Returns the error message if the last poll failed.
    fn error(&self) -> Option<&str>;
}
