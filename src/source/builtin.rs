//! Built-in demonstration data source.

use super::{seed, DataSource, SiteSnapshot};

/// A source that yields the built-in seed data once.
#[derive(Debug, Default)]
pub struct BuiltinSource {
    delivered: bool,
}

impl BuiltinSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataSource for BuiltinSource {
    fn poll(&mut self) -> Option<SiteSnapshot> {
        if self.delivered {
            return None;
        }
        self.delivered = true;
        Some(seed::default_records())
    }

    fn description(&self) -> &str {
        "built-in demo data"
    }

    fn error(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_delivers_once() {
        let mut source = BuiltinSource::new();
        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot.len(), 12);
        assert!(source.poll().is_none());
        assert!(source.error().is_none());
    }
}
