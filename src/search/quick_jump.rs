//! Quick-jump: navigate straight to a record by typing its id or code.
//!
//! Resolution is exact (after trimming and case folding) and short-circuits
//! in a fixed order: employees, then contacts, then opportunities. When an
//! employee code collides with a contact id the employee wins. A blank token
//! or a miss never navigates; the caller opens the full search palette.

use crate::model::{Contact, Employee, Module, Opportunity, RecordStore};
use crate::ui::route::Route;
use serde::Serialize;

/// Records that can be addressed by quick-jump.
pub trait LookupKeys {
    fn lookup_id(&self) -> &str;

    /// Secondary key, if the record type has one.
    fn lookup_code(&self) -> Option<&str> {
        None
    }

    /// `needle` must already be trimmed and lowercased.
    fn matches_key(&self, needle: &str) -> bool {
        self.lookup_id().to_lowercase() == needle
            || self
                .lookup_code()
                .is_some_and(|code| code.to_lowercase() == needle)
    }
}

impl LookupKeys for Employee {
    fn lookup_id(&self) -> &str {
        &self.id
    }

    fn lookup_code(&self) -> Option<&str> {
        Some(&self.code)
    }
}

impl LookupKeys for Contact {
    fn lookup_id(&self) -> &str {
        &self.id
    }
}

impl LookupKeys for Opportunity {
    fn lookup_id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum JumpOutcome {
    Navigate { route: Route },
    /// No exact match: show the full search surface instead.
    OpenSearch,
}

impl JumpOutcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            Self::Navigate { route } => Some(route),
            Self::OpenSearch => None,
        }
    }
}

fn find_by_key<'a, T: LookupKeys>(items: &'a [T], needle: &str) -> Option<&'a T> {
    items.iter().find(|item| item.matches_key(needle))
}

/// Resolve a typed token to a route.
pub fn resolve(token: &str, store: &RecordStore) -> JumpOutcome {
    let needle = token.trim().to_lowercase();
    if needle.is_empty() {
        return JumpOutcome::OpenSearch;
    }

    let route = if let Some(e) = find_by_key(store.employees(), &needle) {
        Route::detail(Module::Employees, e.id.clone())
    } else if let Some(c) = find_by_key(store.contacts(), &needle) {
        Route::detail(Module::Contacts, c.id.clone())
    } else if let Some(o) = find_by_key(store.opportunities(), &needle) {
        Route::board(o.id.clone())
    } else {
        tracing::debug!(token = %needle, "quick-jump miss");
        return JumpOutcome::OpenSearch;
    };

    tracing::debug!(token = %needle, %route, "quick-jump hit");
    JumpOutcome::Navigate { route }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::VIEW_DETAIL;

    #[test]
    fn resolves_employee_code_case_insensitively() {
        let store = RecordStore::demo();
        let out = resolve("apl", &store);
        let route = out.route().expect("navigates");
        assert_eq!(route.module, Module::Employees);
        assert_eq!(route.view, VIEW_DETAIL);
        assert_eq!(route.id.as_deref(), Some("APL"));
    }

    #[test]
    fn resolves_contact_id() {
        let store = RecordStore::demo();
        assert_eq!(
            resolve("c002", &store).route(),
            Some(&Route::detail(Module::Contacts, "C002"))
        );
    }

    #[test]
    fn resolves_opportunity_to_board() {
        let store = RecordStore::demo();
        assert_eq!(resolve(" o003 ", &store).route(), Some(&Route::board("O003")));
    }

    #[test]
    fn blank_and_unknown_open_search() {
        let store = RecordStore::demo();
        assert_eq!(resolve("", &store), JumpOutcome::OpenSearch);
        assert_eq!(resolve("   ", &store), JumpOutcome::OpenSearch);
        assert_eq!(resolve("zzz", &store), JumpOutcome::OpenSearch);
    }

    #[test]
    fn partial_matches_do_not_jump() {
        let store = RecordStore::demo();
        assert_eq!(resolve("ap", &store), JumpOutcome::OpenSearch);
        assert_eq!(resolve("c00", &store), JumpOutcome::OpenSearch);
    }

    #[test]
    fn employee_code_beats_contact_id() {
        let mut store = RecordStore::demo();
        store.add_employee(Employee::new("E9", "Clash", "Test", "C001"));
        let route = resolve("C001", &store).route().cloned().unwrap();
        assert_eq!(route, Route::detail(Module::Employees, "E9"));
    }

    #[test]
    fn contact_beats_opportunity_on_id_collision() {
        let mut store = RecordStore::demo();
        store.add_contact(Contact::new("O001", "Shadow", "", ""));
        assert_eq!(
            resolve("o001", &store).route(),
            Some(&Route::detail(Module::Contacts, "O001"))
        );
    }

    #[test]
    fn employee_matches_by_code_when_id_differs() {
        let mut store = RecordStore::demo();
        store.add_employee(Employee::new("E-100", "Marie", "Kraus", "MKR"));
        assert_eq!(
            resolve("mkr", &store).route(),
            Some(&Route::detail(Module::Employees, "E-100"))
        );
        assert_eq!(
            resolve("e-100", &store).route(),
            Some(&Route::detail(Module::Employees, "E-100"))
        );
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let json = serde_json::to_value(JumpOutcome::OpenSearch).unwrap();
        assert_eq!(json["outcome"], "open_search");
        let json = serde_json::to_value(resolve("apl", &RecordStore::demo())).unwrap();
        assert_eq!(json["outcome"], "navigate");
        assert_eq!(json["route"]["module"], "employees");
    }
}
