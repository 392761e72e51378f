//! Search over the record store.
//!
//! - `index.rs`: palette index (modules + records) and its revision cache.
//! - `quick_jump.rs`: exact id/code resolver with fixed type precedence.

pub mod index;
pub mod quick_jump;

pub use index::{CachedIndex, EntryCategory, IndexEntry, SearchIndex, build_index};
pub use quick_jump::{JumpOutcome, resolve};
