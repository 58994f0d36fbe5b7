//! Cellphone operations - the four call patterns behind the gRPC service.
//!
//! `CellphoneServer` owns the shared store, order ledger and cover storage.
//! Each operation validates its input, checks call liveness, and delegates
//! to those collaborators:
//!
//! - `create` - one record in, one id out
//! - `search` - one filter in, a stream of matching records out
//! - `upload` - meta info then chunks in, one byte count out
//! - `buy` - purchases in, running averages out, one for one
//!
//! ## Example
//!
//! ```ignore
//! use cellphone_service::cover::InMemoryImageStore;
//! use cellphone_service::service::CellphoneServer;
//! use cellphone_service::validation::CallContext;
//!
//! let server = CellphoneServer::in_memory(InMemoryImageStore::new());
//! let created = server.create(&CallContext::new(), request)?;
//! ```

mod buy;
mod create;
mod grpc;
mod search;
mod upload;

pub use grpc::{grpc_server, serve};

use std::sync::Arc;

use tracing::info;

use crate::config::{ServerConfig, UploadConfig};
use crate::cover::{DiskImageStore, ImageStore};
use crate::error::ServiceError;
use crate::orders::{InMemoryOrderLedger, OrderLedger};
use crate::store::{CellphoneStore, InMemoryCellphoneStore};
use crate::validation::validate_id;

const DEFAULT_STREAM_BUFFER: usize = 16;

/// Business logic behind the cellphone service. Cheap to clone; clones share
/// the same store, ledger and cover storage.
#[derive(Clone)]
pub struct CellphoneServer {
    store: Arc<dyn CellphoneStore>,
    orders: Arc<dyn OrderLedger>,
    covers: Arc<dyn ImageStore>,
    upload: UploadConfig,
    stream_buffer: usize,
}

impl CellphoneServer {
    pub fn new(
        store: impl CellphoneStore + 'static,
        orders: impl OrderLedger + 'static,
        covers: impl ImageStore + 'static,
    ) -> Self {
        Self {
            store: Arc::new(store),
            orders: Arc::new(orders),
            covers: Arc::new(covers),
            upload: UploadConfig::default(),
            stream_buffer: DEFAULT_STREAM_BUFFER,
        }
    }

    /// In-memory store and ledger, covers written to `covers`.
    pub fn in_memory(covers: impl ImageStore + 'static) -> Self {
        Self::new(
            InMemoryCellphoneStore::new(),
            InMemoryOrderLedger::new(),
            covers,
        )
    }

    /// In-memory store and ledger, covers written under `config.cover_dir`.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::in_memory(DiskImageStore::new(&config.cover_dir))
            .with_upload_config(config.upload.clone())
            .with_stream_buffer(config.stream_buffer)
    }

    pub fn with_upload_config(mut self, upload: UploadConfig) -> Self {
        self.upload = upload;
        self
    }

    /// Capacity of the outbound channel behind server-push streams (min 1).
    pub fn with_stream_buffer(mut self, stream_buffer: usize) -> Self {
        self.stream_buffer = stream_buffer.max(1);
        self
    }

    pub fn store(&self) -> &dyn CellphoneStore {
        self.store.as_ref()
    }

    pub fn orders(&self) -> &dyn OrderLedger {
        self.orders.as_ref()
    }

    /// The id must be well-formed and name a stored cellphone.
    fn ensure_known(&self, id: &str) -> Result<(), ServiceError> {
        if let Err(err) = validate_id(id) {
            info!(id, "cellphone with invalid uuid");
            return Err(err);
        }
        if !self.store.exists(id) {
            info!(id, "cellphone not found");
            return Err(ServiceError::NotFound(format!("cellphone with {id} not found")));
        }
        Ok(())
    }
}
