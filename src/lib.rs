//! A cellphone catalog served over gRPC.
//!
//! The catalog is an in-memory [`store`] of cellphone records plus an order
//! [`orders`] ledger of running purchase averages. The [`service`] module
//! exposes them through four call patterns: unary create, server-streaming
//! search, client-streaming cover upload and bidirectional buy.

pub mod client;
pub mod config;
pub mod cover;
mod error;
pub mod orders;
pub mod pb;
pub mod sample;
pub mod service;
pub mod store;
pub mod telemetry;
pub mod validation;

pub use client::CellphoneClient;
pub use config::{ServerConfig, UploadConfig, MAX_COVER_IMAGE_BYTES};
pub use error::{ServiceError, StoreError};
pub use orders::{InMemoryOrderLedger, OrderAggregate, OrderLedger};
pub use service::CellphoneServer;
pub use store::{CellphoneStore, InMemoryCellphoneStore};
pub use validation::CallContext;
