//! Checks shared by every cellphone operation: identifier format and call
//! liveness.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tonic::metadata::MetadataMap;
use uuid::Uuid;

use crate::error::ServiceError;

const GRPC_TIMEOUT_HEADER: &str = "grpc-timeout";

/// Length of the canonical hyphenated form, `8-4-4-4-12`.
const HYPHENATED_LEN: usize = 36;

/// Accepts only the canonical 36-character hyphenated UUID form (hex digits
/// in either case).
pub fn validate_id(id: &str) -> Result<(), ServiceError> {
    if id.len() != HYPHENATED_LEN || Uuid::try_parse(id).is_err() {
        return Err(ServiceError::InvalidArgument(format!(
            "invalid uuid: {id:?}"
        )));
    }
    Ok(())
}

/// Cancellation and deadline signals of one call.
///
/// Clones share the same token, so cancelling any clone cancels the call.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    /// A context with no deadline that is only canceled explicitly.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancel: CancellationToken::new(),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Build a context from request metadata, honoring `grpc-timeout`.
    pub fn from_metadata(metadata: &MetadataMap) -> Self {
        metadata
            .get(GRPC_TIMEOUT_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_grpc_timeout)
            .map(Self::with_timeout)
            .unwrap_or_default()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Fails with `Canceled` once canceled, `DeadlineExceeded` once the
    /// deadline has passed.
    pub fn check(&self) -> Result<(), ServiceError> {
        if self.cancel.is_cancelled() {
            return Err(ServiceError::Canceled);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(ServiceError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Check liveness, then drive `fut` until it completes or the call is
    /// canceled or runs out of time, whichever happens first.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, ServiceError> {
        self.check()?;

        let deadline = async {
            match self.deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ServiceError::Canceled),
            _ = deadline => Err(ServiceError::DeadlineExceeded),
            output = fut => Ok(output),
        }
    }
}

/// Parse a `grpc-timeout` header value: up to 8 digits and a unit
/// (`H`, `M`, `S`, `m`, `u`, `n`).
fn parse_grpc_timeout(value: &str) -> Option<Duration> {
    if value.len() < 2 || value.len() > 9 {
        return None;
    }
    let (digits, unit) = value.split_at(value.len() - 1);
    let amount: u64 = digits.parse().ok()?;

    let timeout = match unit {
        "H" => Duration::from_secs(amount * 60 * 60),
        "M" => Duration::from_secs(amount * 60),
        "S" => Duration::from_secs(amount),
        "m" => Duration::from_millis(amount),
        "u" => Duration::from_micros(amount),
        "n" => Duration::from_nanos(amount),
        _ => return None,
    };
    Some(timeout)
}
