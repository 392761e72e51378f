//! "Artikel / Neu" form state.
//!
//! The form holds two checkboxes and a production type chosen through a
//! picker. The picker is open while it has a query (possibly empty) and
//! closes on pick or dismiss. It lists the production types whose name
//! contains the query, case-insensitively, in store order.

use crate::model::{ProductionType, RecordStore};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArticleDraft {
    pub sellable: bool,
    pub buyable: bool,
    pub production_type: Option<ProductionType>,
    picker: Option<String>,
}

impl ArticleDraft {
    pub fn picker_open(&self) -> bool {
        self.picker.is_some()
    }

    /// Current picker query, `None` when the picker is closed.
    pub fn picker_query(&self) -> Option<&str> {
        self.picker.as_deref()
    }

    /// Opening always starts with an empty query.
    pub fn open_picker(&mut self) {
        self.picker = Some(String::new());
    }

    pub fn close_picker(&mut self) -> bool {
        self.picker.take().is_some()
    }

    /// Returns `false` when the picker is closed.
    pub fn set_picker_query(&mut self, query: impl Into<String>) -> bool {
        match self.picker.as_mut() {
            Some(q) => {
                *q = query.into();
                true
            }
            None => false,
        }
    }

    /// Entries the open picker offers.
    pub fn choices<'a>(&self, store: &'a RecordStore) -> Vec<&'a ProductionType> {
        match self.picker.as_deref() {
            Some(q) => store.filter_production_types(q),
            None => Vec::new(),
        }
    }

    /// Select `id` (case-insensitive) and close the picker.
    ///
    /// Any production type can be picked, not only the ones the current query
    /// shows. Returns `false` if no type has that id.
    pub fn pick(&mut self, store: &RecordStore, id: &str) -> bool {
        let Some(pt) = store
            .production_types()
            .iter()
            .find(|p| p.id.eq_ignore_ascii_case(id.trim()))
        else {
            return false;
        };
        self.production_type = Some(pt.clone());
        self.picker = None;
        true
    }

    pub fn toggle_sellable(&mut self) {
        self.sellable = !self.sellable;
    }

    pub fn toggle_buyable(&mut self) {
        self.buyable = !self.buyable;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picker_filters_and_closes_on_pick() {
        let store = RecordStore::demo();
        let mut draft = ArticleDraft::default();
        assert!(draft.choices(&store).is_empty());
        assert!(!draft.set_picker_query("prem"));

        draft.open_picker();
        assert_eq!(draft.choices(&store).len(), 3);
        assert!(draft.set_picker_query("PREM"));
        let ids: Vec<_> = draft.choices(&store).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["PT002"]);

        assert!(draft.pick(&store, "pt002"));
        assert!(!draft.picker_open());
        assert_eq!(draft.production_type.as_ref().unwrap().name, "Premium");
    }

    #[test]
    fn unknown_pick_keeps_picker_open() {
        let store = RecordStore::demo();
        let mut draft = ArticleDraft::default();
        draft.open_picker();
        draft.set_picker_query("zzz");
        assert!(draft.choices(&store).is_empty());
        assert!(!draft.pick(&store, "PT999"));
        assert!(draft.picker_open());
        assert_eq!(draft.production_type, None);

        // Reopening resets the query.
        draft.close_picker();
        draft.open_picker();
        assert_eq!(draft.picker_query(), Some(""));
    }

    #[test]
    fn flags_toggle_independently() {
        let mut draft = ArticleDraft::default();
        draft.toggle_sellable();
        assert!(draft.sellable);
        assert!(!draft.buyable);
        draft.toggle_buyable();
        draft.toggle_sellable();
        assert!(!draft.sellable);
        assert!(draft.buyable);
    }
}
