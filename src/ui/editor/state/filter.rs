// SPDX-License-Identifier: MPL-2.0
//! Filter staging while the edit panel is open.

use crate::domain::editing::{FilterChange, FilterParameter, Filters};

/// Live copy of a record's filters.
///
/// While staging, the surface shows the staged values; outside of it the
/// committed values. The two are never mixed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSession {
    staging: Option<Filters>,
}

impl FilterSession {
    /// Starts editing from the committed filters.
    pub fn begin(&mut self, committed: Filters) {
        self.staging = Some(committed);
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.staging.is_some()
    }

    #[must_use]
    pub fn staged(&self) -> Option<Filters> {
        self.staging
    }

    /// Updates one staged value. Ignored when not staging.
    pub fn set(&mut self, change: FilterChange) -> Option<Filters> {
        let staged = self.staging.as_mut()?;
        *staged = staged.with(change);
        Some(*staged)
    }

    /// Puts one staged value back to neutral. Ignored when not staging.
    pub fn reset(&mut self, parameter: FilterParameter) -> Option<Filters> {
        let staged = self.staging.as_mut()?;
        *staged = staged.reset(parameter);
        Some(*staged)
    }

    /// Ends staging and hands back the values to store on the record.
    pub fn commit(&mut self) -> Option<Filters> {
        self.staging.take()
    }

    /// Ends staging, dropping the staged values.
    pub fn cancel(&mut self) {
        self.staging = None;
    }

    /// Filters the surface must show for a record with `committed` filters.
    #[must_use]
    pub fn effective(&self, committed: Filters) -> Filters {
        self.staging.unwrap_or(committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::editing::FilterPreset;

    fn committed() -> Filters {
        Filters::default().with(FilterChange::Brightness(80.0))
    }

    #[test]
    fn effective_is_committed_when_idle() {
        let session = FilterSession::default();
        assert_eq!(session.effective(committed()), committed());
    }

    #[test]
    fn staged_changes_show_while_editing() {
        let mut session = FilterSession::default();
        session.begin(committed());
        session.set(FilterChange::Preset(FilterPreset::Sepia));

        let effective = session.effective(committed());
        assert_eq!(effective.preset, FilterPreset::Sepia);
        assert_eq!(effective.brightness, 80.0);
    }

    #[test]
    fn cancel_restores_committed_exactly() {
        let mut session = FilterSession::default();
        session.begin(committed());
        session.set(FilterChange::Contrast(-40.0));
        session.reset(FilterParameter::Brightness);
        session.cancel();

        assert!(!session.is_active());
        assert_eq!(session.effective(committed()), committed());
    }

    #[test]
    fn commit_returns_staged_values() {
        let mut session = FilterSession::default();
        session.begin(committed());
        session.set(FilterChange::Saturation(150.0));

        let stored = session.commit().expect("staging active");
        assert_eq!(stored.saturation, 150.0);
        assert!(session.commit().is_none());
    }

    #[test]
    fn set_without_begin_is_ignored() {
        let mut session = FilterSession::default();
        assert!(session.set(FilterChange::Brightness(10.0)).is_none());
        assert!(!session.is_active());
    }
}
