//! Global search index backing the command palette.
//!
//! The index is rebuilt from scratch whenever the record store changes; it is
//! never patched in place. Entry order is part of the contract:
//!
//! | Category | Order within category                           |
//! |----------|-------------------------------------------------|
//! | Modules  | as given by the caller (see [`PALETTE_MODULES`]) |
//! | Records  | contacts, then employees, then opportunities     |
//!
//! Records keep collection order. Nothing is sorted by relevance and nothing
//! is deduplicated.

use crate::model::{Contact, Employee, Module, Opportunity, RecordStore};
use crate::ui::route::Route;
use serde::Serialize;

/// Modules offered by the palette, in display order.
pub const PALETTE_MODULES: &[Module] = &[
    Module::Contacts,
    Module::Opps,
    Module::Articles,
    Module::Employees,
    Module::ProdTypes,
];

/// Section an entry is listed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EntryCategory {
    Modules,
    Records,
}

impl EntryCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Modules => "Module",
            Self::Records => "Datensätze",
        }
    }

    /// All categories in display order.
    pub const ALL: &'static [EntryCategory] = &[EntryCategory::Modules, EntryCategory::Records];
}

/// One selectable palette target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IndexEntry {
    Module { module: Module, title: String },
    Contact { id: String, title: String },
    Employee { id: String, title: String },
    Opportunity { id: String, title: String },
}

impl IndexEntry {
    pub fn module(module: Module) -> Self {
        Self::Module {
            module,
            title: module.label().to_string(),
        }
    }

    pub fn from_contact(c: &Contact) -> Self {
        Self::Contact {
            id: c.id.clone(),
            title: c.name.clone(),
        }
    }

    pub fn from_employee(e: &Employee) -> Self {
        Self::Employee {
            id: e.id.clone(),
            title: e.display_name(),
        }
    }

    pub fn from_opportunity(o: &Opportunity) -> Self {
        Self::Opportunity {
            id: o.id.clone(),
            title: o.title.clone(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Module { title, .. }
            | Self::Contact { title, .. }
            | Self::Employee { title, .. }
            | Self::Opportunity { title, .. } => title,
        }
    }

    pub fn category(&self) -> EntryCategory {
        match self {
            Self::Module { .. } => EntryCategory::Modules,
            Self::Contact { .. } | Self::Employee { .. } | Self::Opportunity { .. } => {
                EntryCategory::Records
            }
        }
    }

    /// Short kind tag shown next to the title.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Module { .. } => "Modul",
            Self::Contact { .. } => "Kontakt",
            Self::Employee { .. } => "Mitarbeiter",
            Self::Opportunity { .. } => "Opportunity",
        }
    }

    pub fn record_id(&self) -> Option<&str> {
        match self {
            Self::Module { .. } => None,
            Self::Contact { id, .. } | Self::Employee { id, .. } | Self::Opportunity { id, .. } => {
                Some(id)
            }
        }
    }

    /// Where selecting this entry navigates to.
    ///
    /// Module entries open the module's default view with nothing selected;
    /// opportunities open the board with the card selected; other records
    /// open their detail view.
    pub fn target_route(&self) -> Route {
        match self {
            Self::Module { module, .. } => Route::module(*module),
            Self::Contact { id, .. } => Route::detail(Module::Contacts, id.clone()),
            Self::Employee { id, .. } => Route::detail(Module::Employees, id.clone()),
            Self::Opportunity { id, .. } => Route::board(id.clone()),
        }
    }

    /// Title, kind tag (the hint shown next to it) and record id.
    fn matches(&self, needle: &str) -> bool {
        self.title().to_lowercase().contains(needle)
            || self.kind_label().to_lowercase().contains(needle)
            || self
                .record_id()
                .is_some_and(|id| id.to_lowercase().contains(needle))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

impl SearchIndex {
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn in_category(&self, category: EntryCategory) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter().filter(move |e| e.category() == category)
    }

    /// Case-insensitive substring match on title, kind and id, keeping index order.
    /// A blank query returns every entry.
    pub fn filter(&self, query: &str) -> Vec<&IndexEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.entries.iter().collect();
        }
        self.entries.iter().filter(|e| e.matches(&needle)).collect()
    }
}

/// Build the index. Pure: same inputs, same output, same order.
pub fn build_index(
    modules: &[Module],
    contacts: &[Contact],
    employees: &[Employee],
    opportunities: &[Opportunity],
) -> SearchIndex {
    let mut entries =
        Vec::with_capacity(modules.len() + contacts.len() + employees.len() + opportunities.len());
    entries.extend(modules.iter().copied().map(IndexEntry::module));
    entries.extend(contacts.iter().map(IndexEntry::from_contact));
    entries.extend(employees.iter().map(IndexEntry::from_employee));
    entries.extend(opportunities.iter().map(IndexEntry::from_opportunity));
    SearchIndex { entries }
}

impl SearchIndex {
    pub fn from_store(store: &RecordStore) -> Self {
        build_index(
            PALETTE_MODULES,
            store.contacts(),
            store.employees(),
            store.opportunities(),
        )
    }
}

/// Index memoized on the store revision.
#[derive(Debug, Default)]
pub struct CachedIndex {
    built_at: Option<u64>,
    index: SearchIndex,
}

impl CachedIndex {
    /// Current index, rebuilt first if the store changed since the last read.
    pub fn get(&mut self, store: &RecordStore) -> &SearchIndex {
        if self.built_at != Some(store.revision()) {
            tracing::debug!(revision = store.revision(), "rebuilding search index");
            self.index = SearchIndex::from_store(store);
            self.built_at = Some(store.revision());
        }
        &self.index
    }

    pub fn is_stale(&self, store: &RecordStore) -> bool {
        self.built_at != Some(store.revision())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::{VIEW_BOARD, VIEW_DETAIL, VIEW_LIST};

    #[test]
    fn modules_come_before_records() {
        let index = SearchIndex::from_store(&RecordStore::demo());
        let first_record = index
            .entries()
            .iter()
            .position(|e| e.category() == EntryCategory::Records)
            .unwrap();
        assert!(
            index.entries()[first_record..]
                .iter()
                .all(|e| e.category() == EntryCategory::Records)
        );
        assert_eq!(first_record, PALETTE_MODULES.len());
    }

    #[test]
    fn records_are_contacts_then_employees_then_opportunities() {
        let index = SearchIndex::from_store(&RecordStore::demo());
        let kinds: Vec<&str> = index
            .in_category(EntryCategory::Records)
            .map(|e| e.kind_label())
            .collect();
        assert_eq!(
            kinds,
            vec![
                "Kontakt",
                "Kontakt",
                "Kontakt",
                "Mitarbeiter",
                "Mitarbeiter",
                "Opportunity",
                "Opportunity",
                "Opportunity",
            ]
        );
    }

    #[test]
    fn employee_titles_use_given_name_first() {
        let index = SearchIndex::from_store(&RecordStore::demo());
        assert!(index.entries().iter().any(|e| e.title() == "Andreas Plumacher"));
    }

    #[test]
    fn duplicate_titles_are_kept() {
        let contacts = vec![
            Contact::new("C1", "Same", "", ""),
            Contact::new("C2", "Same", "", ""),
        ];
        let index = build_index(&[], &contacts, &[], &[]);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn rebuild_is_deterministic() {
        let store = RecordStore::demo();
        assert_eq!(SearchIndex::from_store(&store), SearchIndex::from_store(&store));
    }

    #[test]
    fn target_routes_per_variant() {
        let r = IndexEntry::module(Module::Opps).target_route();
        assert_eq!((r.module, r.view.as_str(), r.id), (Module::Opps, VIEW_BOARD, None));

        let r = IndexEntry::module(Module::Employees).target_route();
        assert_eq!(r.view, VIEW_LIST);

        let c = IndexEntry::Contact {
            id: "C002".into(),
            title: "ABAX".into(),
        };
        let r = c.target_route();
        assert_eq!(r.module, Module::Contacts);
        assert_eq!(r.view, VIEW_DETAIL);
        assert_eq!(r.id.as_deref(), Some("C002"));

        let o = IndexEntry::Opportunity {
            id: "O001".into(),
            title: "x".into(),
        };
        assert_eq!(o.target_route(), Route::board("O001"));
    }

    #[test]
    fn filter_matches_title_kind_and_id() {
        let index = SearchIndex::from_store(&RecordStore::demo());
        assert_eq!(index.filter("").len(), index.len());
        let hits = index.filter("abax");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].record_id(), Some("C002"));
        assert_eq!(index.filter("c00").len(), 3);
        assert_eq!(index.filter("MITARBEITER").len(), 3, "module + two employees");
        assert!(index.filter("nothing-here").is_empty());
        // Section headers are not part of an entry's searchable text.
        assert!(index.filter("datensätze").is_empty());
    }

    #[test]
    fn cached_index_rebuilds_only_after_mutation() {
        let mut store = RecordStore::demo();
        let mut cache = CachedIndex::default();
        assert!(cache.is_stale(&store));
        let n = cache.get(&store).len();
        assert!(!cache.is_stale(&store));

        store.add_employee(Employee::new("NEW", "Nina", "Neu", "NN"));
        assert!(cache.is_stale(&store));
        assert_eq!(cache.get(&store).len(), n + 1);
    }
}
