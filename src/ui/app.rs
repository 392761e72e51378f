//! Application state and the single `handle(Action)` entry point.
//!
//! `App` owns one of every component: record store, cached search index,
//! route, palette, key dispatcher, preferences and panel sizes. Each
//! [`Action`] produces at most one transition per component before
//! returning, and every route change goes through [`App::navigate`], which
//! replaces the route wholesale and closes the palette in the same step.

use crate::model::{Contact, Employee, Module, Opportunity, RecordStore, Stage};
use crate::prefs::{KeyValueStore, Preferences};
use crate::search::quick_jump::{self, JumpOutcome};
use crate::search::{CachedIndex, IndexEntry, SearchIndex};
use crate::ui::components::article_form::ArticleDraft;
use crate::ui::components::palette::{PaletteState, items_from_index};
use crate::ui::components::theme::{ThemeMode, ThemePalette};
use crate::ui::nav::nav_target;
use crate::ui::render::ViewState;
use crate::ui::resize::{CONTACTS_PANEL, ResizeDrag, Sidebar};
use crate::ui::route::Route;
use crate::ui::shortcuts::{Focus, Key, KeyCommand, KeyDispatcher, KeyEvent};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Sidebar,
    Contacts,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Begin(i32),
    Move(i32),
    End,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Key(KeyEvent),
    /// Submit the quick-jump field.
    QuickJump(String),
    OpenPalette,
    DismissPalette,
    PaletteQuery(String),
    PaletteMove(isize),
    PaletteCommit,
    /// Commit a specific entry (mouse click in the palette).
    Select(IndexEntry),
    /// Sidebar click.
    Go(Module),
    /// Record click inside a view.
    Open(Route),
    AddEmployee(Employee),
    UpdateEmployee(Employee),
    RemoveEmployee(String),
    CreateContact {
        name: String,
        city: String,
        email: String,
    },
    UpdateContact(Contact),
    /// Contacts list search field.
    FilterContacts(String),
    AddOpportunity(Opportunity),
    MoveOpportunity {
        id: String,
        stage: Stage,
    },
    OpenProdTypePicker,
    ProdTypeQuery(String),
    PickProdType(String),
    CloseProdTypePicker,
    ToggleSellable,
    ToggleBuyable,
    SetTheme(ThemeMode),
    ToggleTheme,
    ToggleSidebar,
    Drag {
        panel: Panel,
        phase: DragPhase,
    },
    SetFocus(Focus),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Navigated(Route),
    PaletteOpened,
    PaletteClosed,
    PaletteChanged,
    RecordsChanged,
    PrefsChanged,
    /// View-local state changed (search field, form).
    ViewChanged,
    /// Mutation targeted an id that does not exist.
    NotFound(String),
    Nothing,
}

pub struct App {
    store: RecordStore,
    index: CachedIndex,
    route: Route,
    palette: PaletteState,
    keys: KeyDispatcher,
    focus: Focus,
    prefs: Preferences,
    prefs_store: Box<dyn KeyValueStore>,
    sidebar: Sidebar,
    contacts_panel: ResizeDrag,
    contact_query: String,
    article: ArticleDraft,
}

impl App {
    /// Build an app, reading preferences from `prefs_store` once.
    pub fn new(store: RecordStore, prefs_store: Box<dyn KeyValueStore>) -> Self {
        let prefs = Preferences::load(prefs_store.as_ref());
        Self::with_preferences(store, prefs_store, prefs)
    }

    pub fn with_preferences(
        store: RecordStore,
        prefs_store: Box<dyn KeyValueStore>,
        prefs: Preferences,
    ) -> Self {
        let mut index = CachedIndex::default();
        let palette = PaletteState::new(items_from_index(index.get(&store)));
        Self {
            store,
            index,
            route: Route::default(),
            palette,
            keys: KeyDispatcher::new(),
            focus: Focus::Page,
            sidebar: Sidebar::new(prefs.sidebar_width),
            contacts_panel: ResizeDrag::new(CONTACTS_PANEL, prefs.contacts_width),
            prefs,
            prefs_store,
            contact_query: String::new(),
            article: ArticleDraft::default(),
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn palette(&self) -> &PaletteState {
        &self.palette
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn contacts_panel(&self) -> &ResizeDrag {
        &self.contacts_panel
    }

    pub fn keys(&self) -> &KeyDispatcher {
        &self.keys
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn contact_query(&self) -> &str {
        &self.contact_query
    }

    pub fn article(&self) -> &ArticleDraft {
        &self.article
    }

    /// View-local state for rendering the current route.
    pub fn view_state(&self) -> ViewState<'_> {
        ViewState {
            contact_query: &self.contact_query,
            article: Some(&self.article),
        }
    }

    pub fn theme_palette(&self) -> ThemePalette {
        ThemePalette::for_mode(self.prefs.theme)
    }

    pub fn index(&mut self) -> &SearchIndex {
        self.index.get(&self.store)
    }

    /// Replace the route and close the palette as one step.
    pub fn navigate(&mut self, route: Route) -> Outcome {
        debug!(from = %self.route, to = %route, "navigate");
        if self.palette.open {
            self.palette.dismiss();
        }
        // Leaving a view discards its local state.
        if route.module != self.route.module {
            match self.route.module {
                Module::Contacts => self.contact_query.clear(),
                Module::Articles => self.article = ArticleDraft::default(),
                _ => {}
            }
        }
        self.route = route.clone();
        Outcome::Navigated(route)
    }

    fn sync_palette(&mut self) {
        if self.index.is_stale(&self.store) {
            let items = items_from_index(self.index.get(&self.store));
            self.palette.set_items(items);
        }
    }

    fn open_palette(&mut self, seed: Option<&str>) -> Outcome {
        self.keys.cancel();
        self.sync_palette();
        match seed {
            Some(q) => self.palette.open_with_query(q),
            None => self.palette.open(),
        }
        Outcome::PaletteOpened
    }

    fn commit(&mut self, entry: &IndexEntry) -> Outcome {
        let route = self.palette.commit(entry);
        self.navigate(route)
    }

    pub fn handle(&mut self, action: Action) -> Outcome {
        match action {
            Action::Key(ev) => self.handle_key(&ev),
            Action::QuickJump(token) => match quick_jump::resolve(&token, &self.store) {
                JumpOutcome::Navigate { route } => self.navigate(route),
                JumpOutcome::OpenSearch => self.open_palette(Some(&token)),
            },
            Action::OpenPalette => self.open_palette(None),
            Action::DismissPalette => {
                if !self.palette.open {
                    return Outcome::Nothing;
                }
                self.palette.dismiss();
                Outcome::PaletteClosed
            }
            Action::PaletteQuery(q) => {
                self.sync_palette();
                self.palette.set_query(q);
                Outcome::PaletteChanged
            }
            Action::PaletteMove(delta) => {
                self.palette.move_selection(delta);
                Outcome::PaletteChanged
            }
            Action::PaletteCommit => {
                if !self.palette.open {
                    return Outcome::Nothing;
                }
                match self.palette.commit_selected() {
                    Some(route) => self.navigate(route),
                    None => Outcome::Nothing,
                }
            }
            Action::Select(entry) => self.commit(&entry),
            Action::Go(module) => self.navigate(nav_target(module)),
            Action::Open(route) => self.navigate(route),
            Action::AddEmployee(employee) => {
                let id = employee.id.clone();
                self.store.add_employee(employee);
                self.sync_palette();
                self.navigate(Route::detail(Module::Employees, id))
            }
            Action::UpdateEmployee(employee) => {
                let id = employee.id.clone();
                if !self.store.update_employee(employee) {
                    return Outcome::NotFound(id);
                }
                self.sync_palette();
                self.navigate(Route::detail(Module::Employees, id))
            }
            Action::RemoveEmployee(id) => {
                if !self.store.remove_employee(&id) {
                    return Outcome::NotFound(id);
                }
                self.sync_palette();
                if self.route.module == Module::Employees
                    && self.route.id.as_deref() == Some(id.as_str())
                {
                    return self.navigate(Route::module(Module::Employees));
                }
                Outcome::RecordsChanged
            }
            Action::CreateContact { name, city, email } => {
                let id = self.store.create_contact(&name, &city, &email);
                self.sync_palette();
                self.navigate(Route::detail(Module::Contacts, id))
            }
            Action::UpdateContact(contact) => {
                let id = contact.id.clone();
                if !self.store.update_contact(contact) {
                    return Outcome::NotFound(id);
                }
                self.sync_palette();
                self.navigate(Route::detail(Module::Contacts, id))
            }
            Action::FilterContacts(query) => {
                self.contact_query = query;
                Outcome::ViewChanged
            }
            Action::AddOpportunity(opportunity) => {
                let id = opportunity.id.clone();
                self.store.add_opportunity(opportunity);
                self.sync_palette();
                self.navigate(Route::board(id))
            }
            Action::MoveOpportunity { id, stage } => {
                if !self.store.move_opportunity(&id, stage) {
                    return Outcome::NotFound(id);
                }
                self.sync_palette();
                Outcome::RecordsChanged
            }
            Action::OpenProdTypePicker => {
                self.article.open_picker();
                Outcome::ViewChanged
            }
            Action::ProdTypeQuery(query) => {
                if !self.article.picker_open() {
                    self.article.open_picker();
                }
                self.article.set_picker_query(query);
                Outcome::ViewChanged
            }
            Action::PickProdType(id) => {
                if self.article.pick(&self.store, &id) {
                    Outcome::ViewChanged
                } else {
                    Outcome::NotFound(id)
                }
            }
            Action::CloseProdTypePicker => {
                if self.article.close_picker() {
                    Outcome::ViewChanged
                } else {
                    Outcome::Nothing
                }
            }
            Action::ToggleSellable => {
                self.article.toggle_sellable();
                Outcome::ViewChanged
            }
            Action::ToggleBuyable => {
                self.article.toggle_buyable();
                Outcome::ViewChanged
            }
            Action::SetTheme(mode) => self.set_theme(mode),
            Action::ToggleTheme => self.set_theme(self.prefs.theme.toggled()),
            Action::ToggleSidebar => {
                self.sidebar.toggle();
                if let Some(width) = self.sidebar.persistable_width() {
                    self.prefs.sidebar_width = width;
                    self.prefs.persist_sidebar_width(self.prefs_store.as_mut());
                }
                Outcome::PrefsChanged
            }
            Action::Drag { panel, phase } => self.drag(panel, phase),
            Action::SetFocus(focus) => {
                // A half-typed `g` sequence does not survive a focus change.
                if focus != self.focus {
                    self.keys.cancel();
                }
                self.focus = focus;
                Outcome::Nothing
            }
        }
    }

    fn set_theme(&mut self, mode: ThemeMode) -> Outcome {
        self.prefs.theme = mode;
        self.prefs.persist_theme(self.prefs_store.as_mut());
        debug!(theme = %mode, "theme changed");
        Outcome::PrefsChanged
    }

    fn drag(&mut self, panel: Panel, phase: DragPhase) -> Outcome {
        match panel {
            Panel::Sidebar => {
                if phase == DragPhase::End {
                    let released = self.sidebar.drag().end();
                    // Collapsed width is fixed and never persisted.
                    return match released {
                        Some(w) if !self.sidebar.is_collapsed() => {
                            self.prefs.sidebar_width = w;
                            self.prefs.persist_sidebar_width(self.prefs_store.as_mut());
                            Outcome::PrefsChanged
                        }
                        _ => Outcome::Nothing,
                    };
                }
                if self.sidebar.is_collapsed() {
                    return Outcome::Nothing;
                }
                let drag = self.sidebar.drag();
                match phase {
                    DragPhase::Begin(x) => {
                        drag.begin(x);
                        Outcome::Nothing
                    }
                    DragPhase::Move(x) => match drag.move_to(x) {
                        Some(w) => {
                            self.prefs.sidebar_width = w;
                            Outcome::PrefsChanged
                        }
                        None => Outcome::Nothing,
                    },
                    DragPhase::End => Outcome::Nothing,
                }
            }
            Panel::Contacts => {
                let changed = match phase {
                    DragPhase::Begin(x) => {
                        self.contacts_panel.begin(x);
                        None
                    }
                    DragPhase::Move(x) => self.contacts_panel.move_to(x),
                    DragPhase::End => self.contacts_panel.end(),
                };
                match changed {
                    Some(w) => {
                        self.prefs.contacts_width = w;
                        self.prefs.persist_contacts_width(self.prefs_store.as_mut());
                        Outcome::PrefsChanged
                    }
                    None => Outcome::Nothing,
                }
            }
        }
    }

    fn handle_key(&mut self, ev: &KeyEvent) -> Outcome {
        // The palette's input owns focus while it is open.
        let focus = if self.palette.open {
            Focus::TextInput
        } else {
            self.focus
        };
        match self.keys.dispatch(ev, focus) {
            KeyCommand::Navigate(route) => self.navigate(route),
            KeyCommand::OpenPalette if self.palette.open => Outcome::Nothing,
            KeyCommand::OpenPalette => self.open_palette(None),
            KeyCommand::Unhandled if self.palette.open => self.palette_key(ev),
            KeyCommand::Unhandled => Outcome::Nothing,
        }
    }

    fn palette_key(&mut self, ev: &KeyEvent) -> Outcome {
        match ev.key {
            Key::Esc => self.handle(Action::DismissPalette),
            Key::Enter => self.handle(Action::PaletteCommit),
            Key::Up => self.handle(Action::PaletteMove(-1)),
            Key::Down => self.handle(Action::PaletteMove(1)),
            Key::Backspace => {
                self.palette.backspace();
                Outcome::PaletteChanged
            }
            Key::Char(ch) if ev.mods.none() => {
                self.palette.push_char(ch);
                Outcome::PaletteChanged
            }
            Key::Char(_) => Outcome::Nothing,
        }
    }
}
