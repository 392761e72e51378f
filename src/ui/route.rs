//! Route state: where the view currently is.
//!
//! A [`Route`] is a plain value. Navigation builds a new one and replaces the
//! old one wholesale; there is no partial mutation and no back-stack.

use crate::model::types::{VIEW_BOARD, VIEW_DETAIL};
use crate::model::{Contact, Employee, Module, Opportunity, RecordStore};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown when a route has no selection or points at a removed record.
pub const SELECT_PLACEHOLDER: &str = "Bitte einen Datensatz auswählen";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub module: Module,
    /// Free-form view mode, interpreted per module.
    pub view: String,
    pub id: Option<String>,
}

impl Route {
    /// Module landing route: its default view, nothing selected.
    pub fn module(module: Module) -> Self {
        Self {
            module,
            view: module.default_view().to_string(),
            id: None,
        }
    }

    pub fn detail(module: Module, id: impl Into<String>) -> Self {
        Self {
            module,
            view: VIEW_DETAIL.to_string(),
            id: Some(id.into()),
        }
    }

    /// Opportunity board with one card selected.
    pub fn board(id: impl Into<String>) -> Self {
        Self {
            module: Module::Opps,
            view: VIEW_BOARD.to_string(),
            id: Some(id.into()),
        }
    }

    /// Resolve the selected id against the store.
    pub fn selection<'a>(&self, store: &'a RecordStore) -> Selection<'a> {
        let Some(id) = self.id.as_deref() else {
            return Selection::None;
        };
        let found = match self.module {
            Module::Employees => store.employee(id).map(Selection::Employee),
            Module::Contacts => store.contact(id).map(Selection::Contact),
            Module::Opps => store.opportunity(id).map(Selection::Opportunity),
            _ => None,
        };
        found.unwrap_or_else(|| Selection::Stale(id.to_string()))
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::module(Module::Dashboard)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.module, self.view)?;
        if let Some(id) = &self.id {
            write!(f, "/{id}")?;
        }
        Ok(())
    }
}

/// What a view finds when it looks up the route's selected id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<'a> {
    None,
    Employee(&'a Employee),
    Contact(&'a Contact),
    Opportunity(&'a Opportunity),
    /// The id no longer matches a record in the route's module.
    Stale(String),
}

impl Selection<'_> {
    /// True when the view should render [`SELECT_PLACEHOLDER`].
    pub fn needs_placeholder(&self) -> bool {
        matches!(self, Self::None | Self::Stale(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::{VIEW_LIST, VIEW_NEW};

    #[test]
    fn default_route_is_dashboard_list() {
        let r = Route::default();
        assert_eq!(r.module, Module::Dashboard);
        assert_eq!(r.view, VIEW_LIST);
        assert!(r.id.is_none());
    }

    #[test]
    fn module_route_uses_default_view() {
        assert_eq!(Route::module(Module::Opps).view, VIEW_BOARD);
        assert_eq!(Route::module(Module::Articles).view, VIEW_NEW);
        assert_eq!(Route::module(Module::Contacts).view, VIEW_LIST);
    }

    #[test]
    fn display_includes_id_when_selected() {
        assert_eq!(Route::module(Module::Contacts).to_string(), "contacts/list");
        assert_eq!(
            Route::detail(Module::Contacts, "C002").to_string(),
            "contacts/detail/C002"
        );
        assert_eq!(Route::board("O001").to_string(), "opps/board/O001");
    }

    #[test]
    fn selection_resolves_existing_records() {
        let store = RecordStore::demo();
        match Route::detail(Module::Employees, "APL").selection(&store) {
            Selection::Employee(e) => assert_eq!(e.code, "APL"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            Route::board("O002").selection(&store),
            Selection::Opportunity(_)
        ));
    }

    #[test]
    fn stale_selection_degrades_to_placeholder() {
        let mut store = RecordStore::demo();
        let route = Route::detail(Module::Employees, "APL");
        store.remove_employee("APL");
        let sel = route.selection(&store);
        assert_eq!(sel, Selection::Stale("APL".into()));
        assert!(sel.needs_placeholder());
    }

    #[test]
    fn id_from_another_module_is_stale() {
        let store = RecordStore::demo();
        let route = Route::detail(Module::Contacts, "APL");
        assert!(matches!(route.selection(&store), Selection::Stale(_)));
    }
}
