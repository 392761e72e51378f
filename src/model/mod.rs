//! Data model layer: entity types and the in-memory record store.
//!
//! ## Files
//! - `types.rs`: entities plus the fixed `Module` and `Stage` enumerations.
//! - `store.rs`: `RecordStore`, the single source of truth for lookups.
//!
//! Types here are data-only; navigation and search live in `ui` and `search`.

pub mod store;
pub mod types;

pub use store::RecordStore;
pub use types::{Contact, Employee, Module, Opportunity, ProductionType, Stage};
