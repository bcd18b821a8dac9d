//! Guard Dispatcher.
//!
//! The policy module sees the caller and the full `executeBatch` call data before and after the
//! sub-calls run. A revert, malformed return data or `false` is a veto.

use alloc::vec::Vec;

use stylus_sdk::{
    alloy_primitives::{Address, Bytes},
    alloy_sol_types::SolCall,
};

use delegate_wallet_types::Batch;

use crate::{
    errors::{GuardStage, WalletError},
    host::WalletHost,
    modules::interfaces::{IDelegateWallet, IGuard},
};

/// ABI-encoded `executeBatch(...)` call data for `batch` and `signature`.
pub fn guard_payload(batch: &Batch, signature: &[u8]) -> Vec<u8> {
    IDelegateWallet::executeBatchCall {
        targets: batch.targets.clone(),
        values: batch.values.clone(),
        payloads: batch.payloads.iter().cloned().map(Bytes::from).collect(),
        feeToken: batch.fee_token,
        feeAmount: batch.fee_amount,
        expiry: batch.expiry,
        signature: Bytes::from(signature.to_vec()),
    }
    .abi_encode()
}

/// Ask the policy module (if any) to approve `stage`.
pub fn check<H: WalletHost>(
    host: &mut H,
    stage: GuardStage,
    caller: Address,
    payload: &[u8],
) -> Result<(), WalletError> {
    let module = host.policy_module();
    if module == Address::ZERO {
        return Ok(());
    }

    let payload = Bytes::from(payload.to_vec());
    let approved = match stage {
        GuardStage::Pre => {
            let call = IGuard::preCheckCall { caller, payload };
            host.static_call(module, &call.abi_encode())
                .ok()
                .and_then(|out| IGuard::preCheckCall::abi_decode_returns(&out, true).ok())
                .map(|ret| ret.approved)
        }
        GuardStage::Post => {
            let call = IGuard::postCheckCall { caller, payload };
            host.static_call(module, &call.abi_encode())
                .ok()
                .and_then(|out| IGuard::postCheckCall::abi_decode_returns(&out, true).ok())
                .map(|ret| ret.approved)
        }
    };

    match approved {
        Some(true) => Ok(()),
        _ => Err(WalletError::PolicyRejected(stage)),
    }
}
