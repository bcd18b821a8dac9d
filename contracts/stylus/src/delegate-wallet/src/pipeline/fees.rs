//! Fee Settler.
//!
//! Pays the signed fee to whoever landed the transaction, in the native asset or an ERC-20.

use stylus_sdk::{
    alloy_primitives::{Address, U256},
    alloy_sol_types::SolCall,
};

use delegate_wallet_types::Batch;

use crate::{errors::WalletError, host::WalletHost, modules::interfaces::IERC20};

pub fn settle<H: WalletHost>(
    host: &mut H,
    batch: &Batch,
    relayer: Address,
) -> Result<(), WalletError> {
    if batch.fee_amount.is_zero() {
        return Ok(());
    }
    if batch.pays_native_fee() {
        return host
            .call(relayer, batch.fee_amount, &[])
            .map(|_| ())
            .map_err(|_| WalletError::FeeTransferFailed);
    }
    transfer_token(host, batch.fee_token, relayer, batch.fee_amount)
}

/// `IERC20.transfer` with the return value checked.
///
/// Tokens that return nothing are accepted only when the token address holds code; a call to an
/// empty account also returns nothing.
fn transfer_token<H: WalletHost>(
    host: &mut H,
    token: Address,
    to: Address,
    amount: U256,
) -> Result<(), WalletError> {
    let call = IERC20::transferCall { to, amount };
    let out = host
        .call(token, U256::ZERO, &call.abi_encode())
        .map_err(|_| WalletError::FeeTransferFailed)?;

    if out.is_empty() {
        return if host.code_size(token) > 0 {
            Ok(())
        } else {
            Err(WalletError::FeeTransferFailed)
        };
    }
    match IERC20::transferCall::abi_decode_returns(&out, false) {
        Ok(ret) if ret.success => Ok(()),
        _ => Err(WalletError::FeeTransferFailed),
    }
}
