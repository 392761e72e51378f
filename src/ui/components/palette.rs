//! Command palette state (keyboard-first, substring search over the index).
//! Integration hooks live in `src/ui/app.rs`; this module stays side-effect free.
//!
//! # Interaction Contract
//!
//! | Trigger          | Behavior                                            |
//! |------------------|-----------------------------------------------------|
//! | Ctrl+K / Cmd+K   | Open palette                                        |
//! | `/`              | Open palette (unless a text field has focus)        |
//! | Quick-jump miss  | Open palette seeded with the typed token            |
//! | Esc              | Close palette, discard query                        |
//! | Enter            | Commit selected entry → route + close in one step   |
//! | Up / Down        | Move selection (wraps)                              |
//! | Any printable    | Append to query → refilter → reset selection to 0   |
//! | Backspace        | Remove last char → refilter                         |
//!
//! # Commit
//!
//! [`PaletteState::commit`] is the only way out of the Open state that
//! produces a route. It closes the palette and hands back the target in the
//! same call, so a caller can never observe "route changed, palette still
//! open" or the reverse.

use crate::search::{EntryCategory, IndexEntry, SearchIndex};
use crate::ui::route::Route;

/// Render-ready descriptor for an index entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteItem {
    pub entry: IndexEntry,
    pub label: String,
    pub hint: String,
}

impl PaletteItem {
    pub fn from_entry(entry: &IndexEntry) -> Self {
        let hint = match entry.record_id() {
            Some(id) => format!("{} · {id}", entry.kind_label()),
            None => entry.kind_label().to_string(),
        };
        Self {
            entry: entry.clone(),
            label: entry.title().to_string(),
            hint,
        }
    }

    pub fn category(&self) -> EntryCategory {
        self.entry.category()
    }
}

/// Palette items for every index entry, in index order.
pub fn items_from_index(index: &SearchIndex) -> Vec<PaletteItem> {
    index.entries().iter().map(PaletteItem::from_entry).collect()
}

#[derive(Clone, Debug)]
pub struct PaletteState {
    pub open: bool,
    pub query: String,
    pub filtered: Vec<PaletteItem>,
    pub all_items: Vec<PaletteItem>,
    pub selected: usize,
}

impl PaletteState {
    pub fn new(items: Vec<PaletteItem>) -> Self {
        let filtered = items.clone();
        Self {
            open: false,
            query: String::new(),
            filtered,
            all_items: items,
            selected: 0,
        }
    }

    /// Closed → Open. Opening an open palette is a no-op.
    pub fn open(&mut self) {
        if !self.open {
            self.open = true;
            self.selected = 0;
            self.refilter();
        }
    }

    /// Open with the query pre-filled (quick-jump fallback).
    pub fn open_with_query(&mut self, query: &str) {
        self.open = true;
        self.query = query.trim().to_string();
        self.selected = 0;
        self.refilter();
    }

    /// Open → Closed without navigating.
    pub fn dismiss(&mut self) {
        self.open = false;
        self.query.clear();
        self.selected = 0;
        self.refilter();
    }

    /// Swap in a freshly built item list, keeping the query.
    pub fn set_items(&mut self, items: Vec<PaletteItem>) {
        self.all_items = items;
        self.refilter();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.selected = 0;
        self.refilter();
    }

    pub fn push_char(&mut self, ch: char) {
        self.query.push(ch);
        self.selected = 0;
        self.refilter();
    }

    pub fn backspace(&mut self) {
        self.query.pop();
        self.refilter();
    }

    /// Recompute filtered list using case-insensitive substring matching.
    pub fn refilter(&mut self) {
        if self.query.trim().is_empty() {
            self.filtered = self.all_items.clone();
        } else {
            let q = self.query.trim().to_lowercase();
            self.filtered = self
                .all_items
                .iter()
                .filter(|item| {
                    item.label.to_lowercase().contains(&q) || item.hint.to_lowercase().contains(&q)
                })
                .cloned()
                .collect();
        }
        if self.selected >= self.filtered.len() {
            self.selected = self.filtered.len().saturating_sub(1);
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.filtered.is_empty() {
            self.selected = 0;
            return;
        }
        let len = self.filtered.len() as isize;
        let idx = (self.selected as isize + delta).rem_euclid(len);
        self.selected = idx as usize;
    }

    pub fn selected_item(&self) -> Option<&PaletteItem> {
        self.filtered.get(self.selected)
    }

    /// Commit `entry`: close the palette and return the route to apply.
    pub fn commit(&mut self, entry: &IndexEntry) -> Route {
        let route = entry.target_route();
        self.dismiss();
        route
    }

    /// Commit the entry under the cursor; `None` if nothing matches the query.
    pub fn commit_selected(&mut self) -> Option<Route> {
        let entry = self.selected_item()?.entry.clone();
        Some(self.commit(&entry))
    }

    /// Filtered items grouped by category, in display order. Empty groups are skipped.
    pub fn grouped(&self) -> Vec<(EntryCategory, Vec<(usize, &PaletteItem)>)> {
        EntryCategory::ALL
            .iter()
            .filter_map(|cat| {
                let items: Vec<_> = self
                    .filtered
                    .iter()
                    .enumerate()
                    .filter(|(_, item)| item.category() == *cat)
                    .collect();
                (!items.is_empty()).then_some((*cat, items))
            })
            .collect()
    }
}
