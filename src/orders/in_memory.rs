use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::{OrderAggregate, OrderLedger};
use crate::error::StoreError;

/// `HashMap`-backed ledger behind a single `RwLock`. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryOrderLedger {
    orders: Arc<RwLock<HashMap<String, OrderAggregate>>>,
}

impl InMemoryOrderLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderLedger for InMemoryOrderLedger {
    fn record_purchase(&self, id: &str, price: f64) -> Result<OrderAggregate, StoreError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| StoreError::LockPoisoned("order write"))?;

        // Read-modify-write under the write lock: no lost updates per key.
        let aggregate = orders
            .entry(id.to_string())
            .and_modify(|aggregate| {
                aggregate.count += 1;
                aggregate.total += price;
            })
            .or_insert(OrderAggregate {
                count: 1,
                total: price,
            });
        Ok(*aggregate)
    }

    fn get(&self, id: &str) -> Option<OrderAggregate> {
        let orders = self.orders.read().unwrap_or_else(PoisonError::into_inner);
        orders.get(id).copied()
    }
}
