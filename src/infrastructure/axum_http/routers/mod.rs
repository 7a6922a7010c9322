pub mod order_records;
pub mod payer_lookup;
pub mod payment_attempts;
pub mod payment_informations;
pub mod payments;

use tokio_util::sync::{CancellationToken, DropGuard};

/// Token for one request. It fires when the guard drops, which happens when
/// the handler future is dropped on client disconnect or timeout.
pub(crate) fn request_cancellation() -> (CancellationToken, DropGuard) {
    let cancel = CancellationToken::new();
    let guard = cancel.clone().drop_guard();
    (cancel, guard)
}
