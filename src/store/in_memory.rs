//! InMemoryCellphoneStore - arena-backed cellphone store.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::{filter, CellphoneStore};
use crate::error::StoreError;
use crate::pb::{Cellphone, FilterCondition};

/// Records live in an append-only arena; `index` maps id to arena slot.
/// Both sit behind one lock so they can never disagree.
#[derive(Default)]
struct Catalog {
    records: Vec<Cellphone>,
    index: HashMap<String, usize>,
}

/// In-memory cellphone store guarded by a single `RwLock`.
///
/// Writers are exclusive, readers shared. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryCellphoneStore {
    catalog: Arc<RwLock<Catalog>>,
}

impl InMemoryCellphoneStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CellphoneStore for InMemoryCellphoneStore {
    fn save(&self, cellphone: &Cellphone) -> Result<(), StoreError> {
        let mut catalog = self
            .catalog
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        if catalog.index.contains_key(&cellphone.id) {
            return Err(StoreError::AlreadyExists(cellphone.id.clone()));
        }

        let slot = catalog.records.len();
        catalog.records.push(cellphone.clone());
        catalog.index.insert(cellphone.id.clone(), slot);
        Ok(())
    }

    // Reads recover a poisoned guard: a write is a single push + insert,
    // so a panicking writer cannot leave a half-stored record behind.

    fn size(&self) -> usize {
        let catalog = self.catalog.read().unwrap_or_else(PoisonError::into_inner);
        catalog.records.len()
    }

    fn exists(&self, id: &str) -> bool {
        let catalog = self.catalog.read().unwrap_or_else(PoisonError::into_inner);
        catalog.index.contains_key(id)
    }

    fn find(&self, id: &str) -> Option<Cellphone> {
        let catalog = self.catalog.read().unwrap_or_else(PoisonError::into_inner);
        catalog
            .index
            .get(id)
            .map(|&slot| catalog.records[slot].clone())
    }

    fn search(&self, condition: &FilterCondition) -> Vec<Cellphone> {
        // Held for the whole scan so the result is one snapshot.
        let catalog = self.catalog.read().unwrap_or_else(PoisonError::into_inner);
        catalog
            .records
            .iter()
            .filter(|cellphone| filter::matches(condition, cellphone))
            .cloned()
            .collect()
    }
}
