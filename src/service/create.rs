use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{error, info};
use uuid::Uuid;

use super::CellphoneServer;
use crate::error::ServiceError;
use crate::pb::{CreateCellphoneRequest, CreateCellphoneResponse};
use crate::validation::{validate_id, CallContext};

impl CellphoneServer {
    /// Store a new cellphone and return its id.
    ///
    /// An empty id is replaced with a fresh UUID. A panic anywhere below this
    /// boundary is reported as `Internal` instead of unwinding into the
    /// transport.
    pub fn create(
        &self,
        ctx: &CallContext,
        request: CreateCellphoneRequest,
    ) -> Result<CreateCellphoneResponse, ServiceError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.create_unguarded(ctx, request)))
            .unwrap_or_else(|payload| {
                let reason = panic_reason(payload.as_ref());
                error!(reason, "panic while creating cellphone");
                Err(ServiceError::Internal(format!("internal panic: {reason}")))
            })
    }

    fn create_unguarded(
        &self,
        ctx: &CallContext,
        request: CreateCellphoneRequest,
    ) -> Result<CreateCellphoneResponse, ServiceError> {
        let mut cellphone = request
            .cellphone
            .ok_or_else(|| ServiceError::InvalidArgument("request carries no cellphone".into()))?;

        if cellphone.id.is_empty() {
            cellphone.id = Uuid::new_v4().to_string();
            info!(id = %cellphone.id, "requested id is empty, assigned a new one");
        } else {
            validate_id(&cellphone.id)?;
        }

        ctx.check()?;
        self.store.save(&cellphone)?;

        info!(id = %cellphone.id, "cellphone saved");
        Ok(CreateCellphoneResponse { id: cellphone.id })
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
