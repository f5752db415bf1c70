//! File-based data source.
//!
//! Polls a JSON file of site records.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};

use super::{DataSource, SiteSnapshot};

/// A data source that reads site records from a JSON file.
///
/// The source tracks the file's modification time and only returns
/// new data when the file has been updated, so field teams can edit the
/// file while the dashboard is running.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
        }
    }

    /// Returns the path being monitored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    fn read_file(&mut self) -> Option<SiteSnapshot> {
        let result = fs::read_to_string(&self.path)
            .map_err(|e| format!("Read error: {}", e))
            .and_then(|content| {
                serde_json::from_str::<SiteSnapshot>(&content)
                    .map_err(|e| format!("Parse error: {}", e))
            });

        match result {
            Ok(snapshot) => {
                debug!(path = %self.path.display(), sites = snapshot.len(), "Read site file");
                self.last_error = None;
                Some(snapshot)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to load site file");
                self.last_error = Some(e);
                None
            }
        }
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<SiteSnapshot> {
        let current_modified = self.get_modified_time();

        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // First poll, always read
            (Some(_), None) => false, // File disappeared, keep current data
            (Some(last), Some(current)) => current > last,
        };

        if file_changed {
            if let Some(snapshot) = self.read_file() {
                self.last_modified = current_modified;
                return Some(snapshot);
            }
        }

        None
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"[
            {
                "id": 1,
                "name": "Silchar",
                "kind": "village",
                "population": 2200,
                "cases": 12
            },
            {
                "id": 2,
                "name": "Silchar Hand Pump",
                "kind": "water_source",
                "village": "Silchar",
                "readings": { "ph": 7.0, "bacteria": 8, "chlorine": 0.9 }
            }
        ]"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/sites.json");
        assert_eq!(source.path(), Path::new("/tmp/sites.json"));
        assert_eq!(source.description(), "file: /tmp/sites.json");
        assert!(source.error().is_none());
    }

    #[test]
    fn test_file_source_poll_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());

        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1].name, "Silchar Hand Pump");

        // Unchanged file yields nothing new
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/sites.json");

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Read error"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Parse error"));
    }
}
