//! Orders - per-cellphone purchase aggregates.
//!
//! The ledger keeps a running count and price total for every cellphone id
//! that has been bought at least once. Entries are created on the first
//! purchase and only ever grow.

mod in_memory;

pub use in_memory::InMemoryOrderLedger;

use crate::error::StoreError;

/// Purchase totals for one cellphone id. `count` is at least 1 once present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderAggregate {
    pub count: u32,
    pub total: f64,
}

impl OrderAggregate {
    pub fn average(&self) -> f64 {
        self.total / f64::from(self.count)
    }
}

/// Concurrent keyed purchase ledger.
pub trait OrderLedger: Send + Sync {
    /// Add one purchase at `price` and return the aggregate as it stands
    /// right after this purchase. No validation of `price` happens here.
    fn record_purchase(&self, id: &str, price: f64) -> Result<OrderAggregate, StoreError>;

    /// Current aggregate for `id`, if it was ever purchased.
    fn get(&self, id: &str) -> Option<OrderAggregate>;

    /// Average purchase price for `id`, if it was ever purchased.
    fn average(&self, id: &str) -> Option<f64> {
        self.get(id).map(|aggregate| aggregate.average())
    }
}
