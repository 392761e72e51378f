//! Sidebar navigation tree.

use crate::model::Module;
use crate::ui::route::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavGroup {
    pub group: &'static str,
    pub items: &'static [Module],
}

pub const NAV: &[NavGroup] = &[
    NavGroup {
        group: "Stammdaten",
        items: &[
            Module::Employees,
            Module::Contacts,
            Module::ProdTypes,
            Module::Articles,
        ],
    },
    NavGroup {
        group: "Verkäufe",
        items: &[Module::Opps],
    },
];

/// Groups with items whose label contains `filter` (case-insensitive).
/// Group headers are kept even when all their items are filtered out.
pub fn filter_nav(filter: &str) -> Vec<(&'static str, Vec<Module>)> {
    let needle = filter.to_lowercase();
    NAV.iter()
        .map(|g| {
            let items = g
                .items
                .iter()
                .copied()
                .filter(|m| m.label().to_lowercase().contains(&needle))
                .collect();
            (g.group, items)
        })
        .collect()
}

/// Route for clicking a sidebar entry.
pub fn nav_target(module: Module) -> Route {
    Route::module(module)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_shows_everything() {
        let groups = filter_nav("");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].1.len(), 4);
        assert_eq!(groups[1].1, vec![Module::Opps]);
    }

    #[test]
    fn filter_matches_labels() {
        let groups = filter_nav("KONT");
        assert_eq!(groups[0].1, vec![Module::Contacts]);
        assert!(groups[1].1.is_empty());
        assert_eq!(groups[1].0, "Verkäufe");
    }

    #[test]
    fn dashboard_is_not_in_sidebar() {
        assert!(NAV.iter().all(|g| !g.items.contains(&Module::Dashboard)));
    }
}
