use thiserror::Error;
use tonic::{Code, Status};

/// Failure inside the in-memory store or order ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("cellphone {0} already exists")]
    AlreadyExists(String),
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

/// Error reported at the boundary of a cellphone operation.
///
/// Every variant maps onto exactly one gRPC status code.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("out of range: {0}")]
    OutOfRange(String),
    #[error("canceled")]
    Canceled,
    #[error("deadline exceeded")]
    DeadlineExceeded,
    #[error("internal: {0}")]
    Internal(String),
    /// Error received from the inbound half of a streaming call.
    #[error("stream error: {}", .0.message())]
    Stream(Status),
}

impl ServiceError {
    pub fn code(&self) -> Code {
        match self {
            ServiceError::InvalidArgument(_) => Code::InvalidArgument,
            ServiceError::AlreadyExists(_) => Code::AlreadyExists,
            ServiceError::NotFound(_) => Code::NotFound,
            ServiceError::OutOfRange(_) => Code::OutOfRange,
            ServiceError::Canceled => Code::Cancelled,
            ServiceError::DeadlineExceeded => Code::DeadlineExceeded,
            ServiceError::Internal(_) => Code::Internal,
            ServiceError::Stream(status) => status.code(),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(id) => {
                ServiceError::AlreadyExists(format!("cellphone {id} already exists"))
            }
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

impl From<ServiceError> for Status {
    fn from(err: ServiceError) -> Self {
        let code = err.code();
        match err {
            ServiceError::Stream(status) => status,
            ServiceError::InvalidArgument(msg)
            | ServiceError::AlreadyExists(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::OutOfRange(msg)
            | ServiceError::Internal(msg) => Status::new(code, msg),
            ServiceError::Canceled => Status::new(code, "canceled"),
            ServiceError::DeadlineExceeded => Status::new(code, "deadline exceeded"),
        }
    }
}
