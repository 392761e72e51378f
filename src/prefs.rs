//! Persisted UI preferences (theme, sidebar width, contacts pane width).
//!
//! Preferences are plain key-value pairs behind [`KeyValueStore`]. The file
//! backend keeps one flat JSON object:
//!
//! ```json
//! {
//!   "theme-pref": "dark",
//!   "sidebar-width": "300",
//!   "contacts-left-width": "420"
//! }
//! ```
//!
//! Storage is never fatal. [`Preferences::load`] falls back to defaults on any
//! read problem and the `persist_*` helpers log and move on when a write
//! fails.

use crate::ui::components::theme::{ThemeMode, system_scheme_from_env};
use crate::ui::resize::{CONTACTS_PANEL, PanelBounds, SIDEBAR};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

pub const THEME_KEY: &str = "theme-pref";
pub const SIDEBAR_WIDTH_KEY: &str = "sidebar-width";
pub const CONTACTS_WIDTH_KEY: &str = "contacts-left-width";

const APP_DIR: &str = "erp-console";
const PREFS_FILE: &str = "prefs.json";

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("Failed to read preferences {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write preferences {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse preferences: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError>;
}

/// In-memory store; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`FileStore::default_path`].
    pub fn open_default() -> Result<Self, PrefsError> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolution order:
    /// - `$ERP_PREFS_PATH`
    /// - `$XDG_CONFIG_HOME/erp-console/prefs.json`
    /// - platform config dir (e.g. `~/.config/erp-console/prefs.json` on Linux)
    pub fn default_path() -> Result<PathBuf, PrefsError> {
        if let Ok(explicit) = dotenvy::var("ERP_PREFS_PATH")
            && !explicit.trim().is_empty()
        {
            return Ok(PathBuf::from(explicit));
        }
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return Ok(PathBuf::from(xdg_config).join(APP_DIR).join(PREFS_FILE));
        }
        dirs::config_dir()
            .map(|p| p.join(APP_DIR).join(PREFS_FILE))
            .ok_or(PrefsError::NoConfigDir)
    }

    fn read_all(&self) -> Result<Map<String, Value>, PrefsError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Map::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(source) => Err(PrefsError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Each key stands on its own: a value of the wrong type hides only that key.
fn value_as_string(key: &str, value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => {
            warn!(key, value = %other, "ignoring non-scalar preference");
            None
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        Ok(self
            .read_all()?
            .remove(key)
            .and_then(|v| value_as_string(key, v)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        // Other keys are kept as they are. Only a file that is not a JSON
        // object at all is replaced rather than blocking every later write.
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(PrefsError::Parse(e)) => {
                warn!(path = %self.path.display(), error = %e, "replacing unreadable preferences");
                Map::new()
            }
            Err(e) => return Err(e),
        };
        values.insert(key.to_string(), Value::String(value.to_string()));

        let write_err = |source: std::io::Error| PrefsError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(&values)?;
        std::fs::write(&self.path, json).map_err(write_err)?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preferences {
    pub theme: ThemeMode,
    /// False when the theme came from the system default rather than the store.
    pub theme_stored: bool,
    pub sidebar_width: u32,
    pub contacts_width: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Light,
            theme_stored: false,
            sidebar_width: SIDEBAR.default,
            contacts_width: CONTACTS_PANEL.default,
        }
    }
}

fn read_key(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "preference read failed, using default");
            None
        }
    }
}

fn read_width(store: &dyn KeyValueStore, key: &str, bounds: PanelBounds) -> u32 {
    read_key(store, key)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .map(|n| bounds.clamp(n.round() as i64))
        .unwrap_or(bounds.default)
}

impl Preferences {
    /// Read every preference once. `system_theme` is used when no theme is stored.
    pub fn load_with(store: &dyn KeyValueStore, system_theme: Option<ThemeMode>) -> Self {
        let stored_theme = read_key(store, THEME_KEY).filter(|v| !v.is_empty());
        let (theme, theme_stored) = match stored_theme {
            Some(v) => (ThemeMode::from_stored(&v), true),
            None => (system_theme.unwrap_or_default(), false),
        };
        Self {
            theme,
            theme_stored,
            sidebar_width: read_width(store, SIDEBAR_WIDTH_KEY, SIDEBAR),
            contacts_width: read_width(store, CONTACTS_WIDTH_KEY, CONTACTS_PANEL),
        }
    }

    /// [`Preferences::load_with`] using the environment's color scheme.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self::load_with(store, system_scheme_from_env())
    }

    pub fn persist_theme(&mut self, store: &mut dyn KeyValueStore) {
        self.theme_stored = true;
        persist(store, THEME_KEY, self.theme.as_str());
    }

    pub fn persist_sidebar_width(&self, store: &mut dyn KeyValueStore) {
        persist(store, SIDEBAR_WIDTH_KEY, &self.sidebar_width.to_string());
    }

    pub fn persist_contacts_width(&self, store: &mut dyn KeyValueStore) {
        persist(store, CONTACTS_WIDTH_KEY, &self.contacts_width.to_string());
    }
}

/// Write one key; failures are logged and swallowed.
pub fn persist(store: &mut dyn KeyValueStore, key: &str, value: &str) -> bool {
    match store.set(key, value) {
        Ok(()) => true,
        Err(e) => {
            warn!(key, error = %e, "preference write failed");
            false
        }
    }
}
