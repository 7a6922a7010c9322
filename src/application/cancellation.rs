use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::errors::{PaymentError, UseCaseResult, internal};

/// Issues one store or gateway call unless `cancel` has fired, racing the call
/// against the token. `call` is only invoked when the token is still live.
pub async fn guarded<T, F, Fut>(
    cancel: &CancellationToken,
    context: &'static str,
    call: F,
) -> UseCaseResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    if cancel.is_cancelled() {
        warn!(context, "payments: cancelled before store call");
        return Err(PaymentError::Cancelled);
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            warn!(context, "payments: cancelled during store call");
            Err(PaymentError::Cancelled)
        }
        result = call() => result.map_err(internal(context)),
    }
}

/// Issues a mutating call unless `cancel` has already fired. Once started the
/// call runs to completion, so a committed write is never reported as
/// cancelled.
pub async fn guarded_write<T, F, Fut>(
    cancel: &CancellationToken,
    context: &'static str,
    call: F,
) -> UseCaseResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    if cancel.is_cancelled() {
        warn!(context, "payments: cancelled before store write");
        return Err(PaymentError::Cancelled);
    }

    call().await.map_err(internal(context))
}
