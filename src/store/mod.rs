//! Store - concurrent keyed collection of cellphone records.
//!
//! The store owns its records. Every read hands back an independent clone,
//! so nothing a caller does to a returned value can reach stored state.
//!
//! ## Example
//!
//! ```ignore
//! use cellphone_service::store::{CellphoneStore, InMemoryCellphoneStore};
//!
//! let store = InMemoryCellphoneStore::new();
//! store.save(&cellphone)?;
//! assert!(store.exists(&cellphone.id));
//! let matches = store.search(&condition);
//! ```

mod filter;
mod in_memory;

pub use filter::matches;
pub use in_memory::InMemoryCellphoneStore;

use crate::error::StoreError;
use crate::pb::{Cellphone, FilterCondition};

/// Keyed storage for cellphone records.
pub trait CellphoneStore: Send + Sync {
    /// Insert a copy of `cellphone`. Fails with `AlreadyExists` if its id is
    /// taken; the stored record is left untouched in that case.
    fn save(&self, cellphone: &Cellphone) -> Result<(), StoreError>;

    /// Number of stored records.
    fn size(&self) -> usize;

    fn exists(&self, id: &str) -> bool;

    /// Copy of the record stored under `id`.
    fn find(&self, id: &str) -> Option<Cellphone>;

    /// Copies of every record satisfying `condition`, taken from one
    /// consistent snapshot.
    fn search(&self, condition: &FilterCondition) -> Vec<Cellphone>;
}
