//! The batch pipeline: authorize -> pre-guard -> execute -> post-guard -> fee -> event.
//!
//! Everything after authorization is a single atomic unit. A failure at any stage rolls back
//! every effect of that unit; the meta-nonce consumed by a successful authorization stays
//! consumed.

pub mod authorization;
pub mod config;
pub mod executor;
pub mod fees;
pub mod guards;

use stylus_sdk::alloy_primitives::{Address, FixedBytes};

use delegate_wallet_types::Batch;

use crate::{
    errors::{GuardStage, WalletError},
    host::{WalletEvent, WalletHost},
};

/// Run one relayed batch. Returns the digest the signature authorized.
///
/// Guarded against re-entry: a sub-call or module that calls back into this function while a
/// batch is in flight fails with [`WalletError::Reentrant`].
pub fn execute_batch<H: WalletHost>(
    host: &mut H,
    batch: &Batch,
    signature: &[u8],
) -> Result<FixedBytes<32>, WalletError> {
    if host.entered() {
        return Err(WalletError::Reentrant);
    }
    host.set_entered(true);
    let outcome = run(host, batch, signature);
    host.set_entered(false);
    outcome
}

fn run<H: WalletHost>(
    host: &mut H,
    batch: &Batch,
    signature: &[u8],
) -> Result<FixedBytes<32>, WalletError> {
    let auth = authorization::authorize(host, batch, signature)?;

    let checkpoint = host.checkpoint();
    match execute_authorized(host, batch, signature) {
        Ok(relayer) => {
            host.emit(WalletEvent::BatchExecuted {
                digest: auth.digest,
                nonce: auth.nonce,
                relayer,
            });
            Ok(auth.digest)
        }
        Err(err) => {
            host.rollback(checkpoint);
            Err(err)
        }
    }
}

fn execute_authorized<H: WalletHost>(
    host: &mut H,
    batch: &Batch,
    signature: &[u8],
) -> Result<Address, WalletError> {
    let caller = host.msg_sender();
    let payload = guards::guard_payload(batch, signature);

    guards::check(host, GuardStage::Pre, caller, &payload)?;
    executor::execute(host, batch)?;
    guards::check(host, GuardStage::Post, caller, &payload)?;

    let relayer = host.tx_origin();
    fees::settle(host, batch, relayer)?;
    Ok(relayer)
}

/// Digest a signer must produce for `batch` at the wallet's current nonce.
pub fn preview_digest<H: WalletHost>(host: &H, batch: &Batch) -> FixedBytes<32> {
    batch.digest(host.domain_separator(), host.meta_nonce())
}
