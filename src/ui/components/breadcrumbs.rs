//! Breadcrumb bar: Home > Module > Record.

use crate::model::types::{VIEW_BOARD, VIEW_DETAIL, VIEW_LIST, VIEW_NEW};
use crate::model::{Module, RecordStore};
use crate::ui::route::{Route, Selection};

pub const HOME: &str = "Start";

pub fn view_label(view: &str) -> &str {
    match view {
        VIEW_DETAIL => "Detail",
        VIEW_BOARD => "Board",
        VIEW_NEW => "Neu",
        VIEW_LIST => "Liste",
        other => other,
    }
}

/// Crumbs for the route. Dashboard has only the home crumb; a resolvable
/// selection appends the record's display name.
pub fn crumbs(route: &Route, store: &RecordStore) -> Vec<String> {
    let mut out = vec![HOME.to_string()];
    if route.module == Module::Dashboard {
        return out;
    }
    out.push(route.module.label().to_string());
    match route.selection(store) {
        Selection::Employee(e) => out.push(e.display_name()),
        Selection::Contact(c) => out.push(c.name.clone()),
        Selection::Opportunity(o) => out.push(o.title.clone()),
        Selection::None | Selection::Stale(_) => out.push(view_label(&route.view).to_string()),
    }
    out
}

pub fn render(route: &Route, store: &RecordStore) -> String {
    crumbs(route, store).join(" › ")
}
