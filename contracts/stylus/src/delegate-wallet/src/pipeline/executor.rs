//! Batch Executor.

use delegate_wallet_types::Batch;

use crate::{errors::WalletError, host::WalletHost};

/// Perform every sub-call in list order; stop at the first failure.
///
/// Undoing the calls that already ran is the caller's job (see [`crate::pipeline`]).
pub fn execute<H: WalletHost>(host: &mut H, batch: &Batch) -> Result<(), WalletError> {
    let calls = batch
        .targets
        .iter()
        .zip(batch.values.iter())
        .zip(batch.payloads.iter());

    for (index, ((target, value), payload)) in calls.enumerate() {
        host.call(*target, *value, payload)
            .map_err(|reason| WalletError::SubCallFailed { index, reason })?;
    }
    Ok(())
}
