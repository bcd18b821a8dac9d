//! Authorization Validator.
//!
//! Shape, freshness, nonce binding, then signer resolution: owner key first, recovery module
//! second. The digest always uses the stored nonce, so two relayers racing one signed message
//! compute the same digest and only the first to land can match it.

use stylus_sdk::{
    alloy_primitives::{Address, FixedBytes, U256},
    alloy_sol_types::SolCall,
};

use delegate_wallet_types::Batch;

use crate::{
    errors::WalletError,
    host::WalletHost,
    modules::{constants::ERC1271_MAGIC_VALUE, interfaces::IRecoveryModule},
    utils::crypto::ecrecover_address,
};

/// Who vouched for a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Authorizer {
    Owner,
    RecoveryModule(Address),
}

/// Result of a successful authorization. `nonce` is the value consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Authorization {
    pub digest: FixedBytes<32>,
    pub nonce: U256,
    pub authorizer: Authorizer,
}

pub fn authorize<H: WalletHost>(
    host: &mut H,
    batch: &Batch,
    signature: &[u8],
) -> Result<Authorization, WalletError> {
    if !batch.is_well_formed() {
        return Err(WalletError::InvalidBatchShape);
    }

    let timestamp = host.block_timestamp();
    if U256::from(timestamp) > batch.expiry {
        return Err(WalletError::Expired {
            expiry: batch.expiry,
            timestamp,
        });
    }

    let nonce = host.meta_nonce();
    let digest = batch.digest(host.domain_separator(), nonce);
    let next = nonce
        .checked_add(U256::from(1u64))
        .ok_or(WalletError::Unauthorized)?;

    // Consume the nonce before any external call is made.
    let checkpoint = host.checkpoint();
    host.set_meta_nonce(next);

    match resolve_authorizer(host, digest, signature) {
        Some(authorizer) => Ok(Authorization {
            digest,
            nonce,
            authorizer,
        }),
        None => {
            host.rollback(checkpoint);
            Err(WalletError::Unauthorized)
        }
    }
}

/// Owner key first; the recovery module only when the owner path fails and one is configured.
pub fn resolve_authorizer<H: WalletHost>(
    host: &mut H,
    digest: FixedBytes<32>,
    signature: &[u8],
) -> Option<Authorizer> {
    let owner = host.owner();
    if owner != Address::ZERO && ecrecover_address(host, digest, signature) == Some(owner) {
        return Some(Authorizer::Owner);
    }

    let module = host.recovery_module();
    if module == Address::ZERO {
        return None;
    }
    let call = IRecoveryModule::isValidSignatureCall {
        digest,
        signature: signature.to_vec().into(),
    };
    let out = host.static_call(module, &call.abi_encode()).ok()?;
    let ret = IRecoveryModule::isValidSignatureCall::abi_decode_returns(&out, true).ok()?;
    (ret.magicValue == ERC1271_MAGIC_VALUE).then_some(Authorizer::RecoveryModule(module))
}
