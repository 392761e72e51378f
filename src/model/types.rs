//! Normalized entity structs and the fixed module/stage enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const VIEW_LIST: &str = "list";
pub const VIEW_DETAIL: &str = "detail";
pub const VIEW_BOARD: &str = "board";
pub const VIEW_NEW: &str = "new";

/// Top-level application areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Dashboard,
    Employees,
    Contacts,
    ProdTypes,
    Articles,
    Opps,
}

impl Module {
    /// All modules in sidebar/declaration order.
    pub const ALL: &'static [Module] = &[
        Module::Dashboard,
        Module::Employees,
        Module::Contacts,
        Module::ProdTypes,
        Module::Articles,
        Module::Opps,
    ];

    /// Stable machine key used in routes and `--json` output.
    pub fn key(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Employees => "employees",
            Self::Contacts => "contacts",
            Self::ProdTypes => "prodtypes",
            Self::Articles => "articles",
            Self::Opps => "opps",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Employees => "Mitarbeiter",
            Self::Contacts => "Kontakte",
            Self::ProdTypes => "Produktionstypen",
            Self::Articles => "Artikel",
            Self::Opps => "Opportunitäten",
        }
    }

    /// View a module opens in when navigated to without a record.
    pub fn default_view(self) -> &'static str {
        match self {
            Self::Opps => VIEW_BOARD,
            Self::Articles => VIEW_NEW,
            _ => VIEW_LIST,
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for Module {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Module::ALL
            .iter()
            .copied()
            .find(|m| m.key() == needle || m.label().to_lowercase() == needle)
            .ok_or_else(|| UnknownVariant {
                kind: "module",
                value: s.to_string(),
            })
    }
}

/// Sales pipeline stage of an [`Opportunity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Open,
    Qualified,
    Won,
    Lost,
}

impl Stage {
    /// Board columns, left to right.
    pub const ALL: &'static [Stage] = &[Stage::Open, Stage::Qualified, Stage::Won, Stage::Lost];

    pub fn key(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Qualified => "qualified",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Qualified => "Qualified",
            Self::Won => "Won",
            Self::Lost => "Lost",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Stage {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Stage::ALL
            .iter()
            .copied()
            .find(|st| st.key() == needle)
            .ok_or_else(|| UnknownVariant {
                kind: "stage",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    /// Surname.
    pub name: String,
    /// Given name.
    pub first: String,
    /// Short code, usable as a lookup key alongside `id`.
    pub code: String,
}

impl Employee {
    pub fn new(
        id: impl Into<String>,
        first: impl Into<String>,
        name: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            first: first.into(),
            code: code.into(),
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub city: String,
    pub email: String,
}

impl Contact {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        city: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            city: city.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionType {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    pub title: String,
    pub owner: String,
    /// Whole currency units.
    pub amount: u64,
    pub stage: Stage,
}

/// Format an amount with `.` thousands separators (`125000` → `125.000`).
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
