//! Single-site selection for the detail view.

use tracing::debug;

use super::registry::SiteRegistry;
use super::site::{Site, SiteId};
use crate::error::Result;

/// Selection state. At most one site is selected at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(SiteId),
}

/// Tracks which site the detail view shows.
///
/// The model only stores an identifier; the registry is consulted to
/// validate it on `select` and to resolve it for display.
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    state: Selection,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a site.
    ///
    /// Returns `Ok(true)` if the selection changed and `Ok(false)` if the
    /// site was already selected. An unknown id leaves the state untouched
    /// and returns `NotFound`.
    pub fn select(&mut self, registry: &SiteRegistry, id: SiteId) -> Result<bool> {
        registry.get_by_id(id)?;

        if self.state == Selection::Selected(id) {
            return Ok(false);
        }
        debug!(%id, previous = ?self.state, "Site selected");
        self.state = Selection::Selected(id);
        Ok(true)
    }

    /// Return to `Unselected`. Idempotent.
    pub fn clear(&mut self) {
        if self.state != Selection::Unselected {
            debug!(previous = ?self.state, "Selection cleared");
        }
        self.state = Selection::Unselected;
    }

    pub fn current(&self) -> Option<SiteId> {
        match self.state {
            Selection::Unselected => None,
            Selection::Selected(id) => Some(id),
        }
    }

    pub fn state(&self) -> Selection {
        self.state
    }

    pub fn is_selected(&self) -> bool {
        self.state != Selection::Unselected
    }

    /// Look up the selected site.
    pub fn resolve<'a>(&self, registry: &'a SiteRegistry) -> Option<&'a Site> {
        self.current().and_then(|id| registry.get_by_id(id).ok())
    }

    /// Drop a selection that no longer exists after the registry changed.
    ///
    /// Returns `true` if the selection was cleared.
    pub fn revalidate(&mut self, registry: &SiteRegistry) -> bool {
        match self.current() {
            Some(id) if !registry.contains(id) => {
                debug!(%id, "Selected site disappeared, clearing selection");
                self.state = Selection::Unselected;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RiskPolicy;
    use crate::error::HealthError;
    use crate::source::{Readings, RecordKind, SiteRecord};

    fn registry(ids: &[u32]) -> SiteRegistry {
        let records = ids.iter().map(|&id| SiteRecord {
            id,
            name: format!("Village {}", id),
            kind: RecordKind::Village,
            village: None,
            population: Some(1000),
            cases: 1,
            health_workers: 1,
            last_tested: None,
            readings: Readings::default(),
        });
        SiteRegistry::from_records(records, &RiskPolicy::default()).unwrap()
    }

    #[test]
    fn test_initially_unselected() {
        let model = SelectionModel::new();
        assert_eq!(model.current(), None);
        assert_eq!(model.state(), Selection::Unselected);
        assert!(!model.is_selected());
    }

    #[test]
    fn test_select_known_site() {
        let registry = registry(&[1, 2]);
        let mut model = SelectionModel::new();
        assert_eq!(model.select(&registry, SiteId(1)), Ok(true));
        assert_eq!(model.current(), Some(SiteId(1)));
        assert_eq!(model.resolve(&registry).map(|s| s.name.as_str()), Some("Village 1"));
    }

    #[test]
    fn test_select_unknown_leaves_state_unchanged() {
        let registry = registry(&[1, 2]);
        let mut model = SelectionModel::new();

        assert_eq!(
            model.select(&registry, SiteId(9)),
            Err(HealthError::NotFound { id: SiteId(9) })
        );
        assert_eq!(model.current(), None);

        model.select(&registry, SiteId(2)).unwrap();
        assert!(model.select(&registry, SiteId(9)).is_err());
        assert_eq!(model.current(), Some(SiteId(2)));
    }

    #[test]
    fn test_reselect_is_noop() {
        let registry = registry(&[1, 2]);
        let mut model = SelectionModel::new();
        assert_eq!(model.select(&registry, SiteId(1)), Ok(true));
        assert_eq!(model.select(&registry, SiteId(1)), Ok(false));
        assert_eq!(model.state(), Selection::Selected(SiteId(1)));
    }

    #[test]
    fn test_select_replaces_previous() {
        let registry = registry(&[1, 2]);
        let mut model = SelectionModel::new();
        model.select(&registry, SiteId(1)).unwrap();
        assert_eq!(model.select(&registry, SiteId(2)), Ok(true));
        assert_eq!(model.current(), Some(SiteId(2)));
    }

    #[test]
    fn test_clear_always_unselects() {
        let registry = registry(&[1, 2]);
        for (a, b) in [(1, 2), (2, 1), (1, 1)] {
            let mut model = SelectionModel::new();
            model.select(&registry, SiteId(a)).unwrap();
            model.select(&registry, SiteId(b)).unwrap();
            model.clear();
            assert_eq!(model.state(), Selection::Unselected);
        }

        let mut model = SelectionModel::new();
        model.clear();
        model.clear();
        assert_eq!(model.current(), None);
    }

    #[test]
    fn test_revalidate_after_reload() {
        let mut model = SelectionModel::new();
        model.select(&registry(&[1, 2]), SiteId(2)).unwrap();

        assert!(!model.revalidate(&registry(&[2, 3])));
        assert_eq!(model.current(), Some(SiteId(2)));

        assert!(model.revalidate(&registry(&[1, 3])));
        assert_eq!(model.current(), None);
    }
}
