//! Theme definitions.

use console::Style;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Value written to the `theme-pref` key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Anything other than `"dark"` reads as light, matching how the value is written.
    pub fn from_stored(value: &str) -> Self {
        if value.trim() == "dark" {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = crate::model::types::UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(crate::model::types::UnknownVariant {
                kind: "theme",
                value: s.to_string(),
            }),
        }
    }
}

/// System color-scheme preference.
///
/// `ERP_COLOR_SCHEME` (`dark`/`light`) wins; otherwise the background index in
/// `COLORFGBG` (`"15;0"` style) decides. `None` when neither says anything.
pub fn system_scheme(explicit: Option<&str>, colorfgbg: Option<&str>) -> Option<ThemeMode> {
    if let Some(value) = explicit
        && let Ok(mode) = value.parse::<ThemeMode>()
    {
        return Some(mode);
    }
    let bg: u8 = colorfgbg?.rsplit(';').next()?.trim().parse().ok()?;
    Some(if matches!(bg, 0..=6 | 8) {
        ThemeMode::Dark
    } else {
        ThemeMode::Light
    })
}

/// [`system_scheme`] read from the process environment.
pub fn system_scheme_from_env() -> Option<ThemeMode> {
    let explicit = dotenvy::var("ERP_COLOR_SCHEME").ok();
    let colorfgbg = std::env::var("COLORFGBG").ok();
    system_scheme(explicit.as_deref(), colorfgbg.as_deref())
}

#[derive(Clone, Debug)]
pub struct ThemePalette {
    pub accent: Style,
    pub hint: Style,
    pub selected: Style,
    pub placeholder: Style,
}

impl ThemePalette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            accent: Style::new().blue().bold(),
            hint: Style::new().black().dim(),
            selected: Style::new().black().on_cyan(),
            placeholder: Style::new().black().italic(),
        }
    }

    pub fn dark() -> Self {
        Self {
            accent: Style::new().cyan().bold(),
            hint: Style::new().white().dim(),
            selected: Style::new().black().on_cyan(),
            placeholder: Style::new().white().italic(),
        }
    }
}
