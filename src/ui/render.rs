//! Plain-text rendering of the current view, palette and index.
//!
//! Every function here is a pure `state -> String` projection. Styling goes
//! through [`ThemePalette`]; `console` drops the escape codes when the output
//! is not a terminal.

use crate::model::types::format_amount;
use crate::model::{Module, RecordStore, Stage};
use crate::search::{EntryCategory, SearchIndex};
use crate::ui::components::article_form::ArticleDraft;
use crate::ui::components::breadcrumbs;
use crate::ui::components::palette::PaletteState;
use crate::ui::components::theme::ThemePalette;
use crate::ui::nav::filter_nav;
use crate::ui::route::{Route, SELECT_PLACEHOLDER, Selection};
use std::fmt::Write as _;

const SELECTED_MARK: &str = "▸";
const NO_MATCHES: &str = "Keine Treffer";

fn mark(selected: bool) -> &'static str {
    if selected { SELECTED_MARK } else { " " }
}

/// Sidebar tree with the active module marked.
pub fn render_nav(route: &Route, filter: &str, theme: &ThemePalette) -> String {
    let mut out = String::new();
    for (group, items) in filter_nav(filter) {
        let _ = writeln!(out, "{}", theme.hint.apply_to(group));
        for module in items {
            let active = module == route.module;
            let label = if active {
                theme.accent.apply_to(module.label()).to_string()
            } else {
                module.label().to_string()
            };
            let _ = writeln!(out, " {} {label}", mark(active));
        }
    }
    out
}

/// Per-view state that lives outside the record store.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewState<'a> {
    pub contact_query: &'a str,
    pub article: Option<&'a ArticleDraft>,
}

/// Breadcrumbs plus the module body for `route`, with empty view state.
pub fn render_view(route: &Route, store: &RecordStore, theme: &ThemePalette) -> String {
    render_view_with(route, store, &ViewState::default(), theme)
}

pub fn render_view_with(
    route: &Route,
    store: &RecordStore,
    view: &ViewState<'_>,
    theme: &ThemePalette,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", theme.accent.apply_to(breadcrumbs::render(route, store)));
    let _ = writeln!(out);
    let selection = route.selection(store);
    let selected_id = route.id.as_deref();

    match route.module {
        Module::Dashboard => {
            let _ = writeln!(out, "Mitarbeiter:      {}", store.employees().len());
            let _ = writeln!(out, "Kontakte:         {}", store.contacts().len());
            let _ = writeln!(out, "Opportunitäten:   {}", store.opportunities().len());
            let pipeline: u64 = store
                .opportunities()
                .iter()
                .filter(|o| !matches!(o.stage, Stage::Won | Stage::Lost))
                .map(|o| o.amount)
                .sum();
            let _ = writeln!(out, "Offene Pipeline:  {} €", format_amount(pipeline));
        }
        Module::Employees => {
            for e in store.employees() {
                let _ = writeln!(
                    out,
                    " {} {:<6} {:<24} {}",
                    mark(selected_id == Some(e.id.as_str())),
                    e.code,
                    e.display_name(),
                    theme.hint.apply_to(&e.id)
                );
            }
            let _ = writeln!(out);
            match selection {
                Selection::Employee(e) => {
                    let _ = writeln!(out, "Vorname:  {}", e.first);
                    let _ = writeln!(out, "Name:     {}", e.name);
                    let _ = writeln!(out, "Kürzel:   {}", e.code);
                }
                _ => push_placeholder(&mut out, theme),
            }
        }
        Module::Contacts => {
            let contacts = store.filter_contacts(view.contact_query);
            if !view.contact_query.is_empty() {
                let search = format!("Suche: {}", view.contact_query);
                let _ = writeln!(out, "{}", theme.hint.apply_to(search));
                if contacts.is_empty() {
                    let _ = writeln!(out, "{}", theme.hint.apply_to(NO_MATCHES));
                }
            }
            for c in contacts {
                let _ = writeln!(
                    out,
                    " {} {:<8} {:<24} {}",
                    mark(selected_id == Some(c.id.as_str())),
                    c.id,
                    c.name,
                    theme.hint.apply_to(&c.city)
                );
            }
            let _ = writeln!(out);
            match selection {
                Selection::Contact(c) => {
                    let _ = writeln!(out, "Name:     {}", c.name);
                    let _ = writeln!(out, "Ort:      {}", c.city);
                    let _ = writeln!(out, "E-Mail:   {}", c.email);
                }
                _ => push_placeholder(&mut out, theme),
            }
        }
        Module::ProdTypes => {
            for pt in store.production_types() {
                let _ = writeln!(out, "   {:<8} {}", pt.id, pt.name);
            }
        }
        Module::Articles => {
            let empty = ArticleDraft::default();
            render_article_form(&mut out, view.article.unwrap_or(&empty), store, theme);
        }
        Module::Opps => {
            for stage in Stage::ALL {
                let _ = writeln!(out, "{}", theme.accent.apply_to(stage.title()));
                for o in store.opportunities_in(*stage) {
                    let _ = writeln!(
                        out,
                        " {} {:<6} {:<28} {:>10} €  {}",
                        mark(selected_id == Some(o.id.as_str())),
                        o.id,
                        o.title,
                        format_amount(o.amount),
                        theme.hint.apply_to(&o.owner)
                    );
                }
            }
            if let Selection::Stale(id) = selection {
                let _ = writeln!(out);
                let _ = writeln!(out, "{}", theme.hint.apply_to(format!("{id}: nicht gefunden")));
            }
        }
    }
    out
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

fn render_article_form(
    out: &mut String,
    draft: &ArticleDraft,
    store: &RecordStore,
    theme: &ThemePalette,
) {
    let _ = writeln!(out, "{} Kann verkauft werden", checkbox(draft.sellable));
    let _ = writeln!(out, "{} Kann gekauft werden", checkbox(draft.buyable));
    match &draft.production_type {
        Some(pt) => {
            let _ = writeln!(out, "Produktionstyp: {} {}", pt.name, theme.hint.apply_to(&pt.id));
        }
        None => {
            let _ = writeln!(out, "Produktionstyp: -");
        }
    }
    let Some(query) = draft.picker_query() else {
        return;
    };
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", theme.accent.apply_to("Produktionstyp wählen"));
    let _ = writeln!(out, "> {query}");
    let choices = draft.choices(store);
    if choices.is_empty() {
        let _ = writeln!(out, "{}", theme.hint.apply_to(NO_MATCHES));
    }
    for pt in choices {
        let _ = writeln!(out, "   {:<8} {}", pt.id, pt.name);
    }
}

fn push_placeholder(out: &mut String, theme: &ThemePalette) {
    let _ = writeln!(out, "{}", theme.placeholder.apply_to(SELECT_PLACEHOLDER));
}

/// Palette overlay: query line, then filtered items grouped by category.
pub fn render_palette(palette: &PaletteState, theme: &ThemePalette) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "> {}", palette.query);
    let groups = palette.grouped();
    if groups.is_empty() {
        let _ = writeln!(out, "{}", theme.hint.apply_to(NO_MATCHES));
        return out;
    }
    for (category, items) in groups {
        let _ = writeln!(out, "{}", theme.hint.apply_to(category.label()));
        for (idx, item) in items {
            let line = format!("{:<28} {}", item.label, item.hint);
            if idx == palette.selected {
                let _ = writeln!(out, " {} {}", SELECTED_MARK, theme.selected.apply_to(line));
            } else {
                let _ = writeln!(out, "   {line}");
            }
        }
    }
    out
}

/// Full index dump, one entry per line under its category header.
pub fn render_index(index: &SearchIndex) -> String {
    let mut out = String::new();
    for category in EntryCategory::ALL {
        let _ = writeln!(out, "{}", category.label());
        for entry in index.in_category(*category) {
            let _ = writeln!(
                out,
                "  {:<12} {:<28} → {}",
                entry.kind_label(),
                entry.title(),
                entry.target_route()
            );
        }
    }
    out
}
