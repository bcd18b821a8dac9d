//! Stylus entrypoint for the delegate wallet.
//!
//! Design notes:
//! - `owner` and `domain_separator` are written once by the constructor; nothing else writes
//!   them.
//! - On-chain atomicity comes from the runtime: an entry point returning `Err` reverts its whole
//!   frame, so [`WalletHost::checkpoint`] / [`WalletHost::rollback`] are no-ops here.
//! - Module addresses are plain references. Zero means "not configured".
//! - Built with `stylus-sdk/reentrant`: sub-calls may call back in (refunds land in `receive`).
//!   Only `executeBatch` refuses re-entry, through the stored `entered` flag.

use alloc::{vec, vec::Vec};

use alloy_sol_types::sol;
use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{Address, FixedBytes, U256},
    call::RawCall,
    prelude::*,
    stylus_core::log,
};

use delegate_wallet_types::{Batch, ModuleKind};

use crate::{
    errors::WalletRevert,
    host::{WalletEvent, WalletHost},
    modules::constants::{ECRECOVER_GAS, ECRECOVER_PRECOMPILE},
    pipeline::{self, config},
};

sol! {
    event BatchExecuted(bytes32 indexed digest, uint256 indexed nonce, address indexed relayer);
    event ModuleChanged(uint8 indexed kind, address oldModule, address newModule);
}

sol_storage! {
    #[entrypoint]
    pub struct DelegateWallet {
        /// Account whose key authorizes batches and module changes.
        address owner;
        /// EIP-712 domain separator derived from (chain id, owner) at construction.
        bytes32 domain_separator;
        /// Replay counter; bumped once per authorized batch.
        uint256 meta_nonce;

        /// Optional guard consulted before and after every batch.
        address policy_module;
        /// Optional alternate signature verifier.
        address recovery_module;

        /// Set while `executeBatch` is running.
        bool entered;
    }
}

#[public]
impl DelegateWallet {
    #[constructor]
    pub fn constructor(&mut self, owner: Address) -> Result<(), WalletRevert> {
        let chain_id = self.vm().chain_id();
        config::initialize(self, owner, chain_id)?;
        Ok(())
    }

    /// Plain native-asset deposits (funding sub-call values and fees).
    #[receive]
    #[payable]
    pub fn receive(&mut self) -> Result<(), Vec<u8>> {
        Ok(())
    }

    /// Relayed entry point: run a batch the owner (or recovery module) authorized offline.
    ///
    /// The signature must cover the batch fields and the current `metaNonce`. The relayer
    /// (`tx.origin`) receives `feeAmount` of `feeToken` (zero address = native) on success.
    #[allow(clippy::too_many_arguments)]
    pub fn execute_batch(
        &mut self,
        targets: Vec<Address>,
        values: Vec<U256>,
        payloads: Vec<Bytes>,
        fee_token: Address,
        fee_amount: U256,
        expiry: U256,
        signature: Bytes,
    ) -> Result<(), WalletRevert> {
        let batch = to_batch(targets, values, payloads, fee_token, fee_amount, expiry);
        pipeline::execute_batch(self, &batch, &signature)?;
        Ok(())
    }

    /// Owner-only: replace the guard module. Zero disables guards.
    pub fn set_policy_module(&mut self, module: Address) -> Result<(), WalletRevert> {
        config::set_module(self, ModuleKind::Policy, module)?;
        Ok(())
    }

    /// Owner-only: replace the alternate signature verifier. Zero disables it.
    pub fn set_recovery_module(&mut self, module: Address) -> Result<(), WalletRevert> {
        config::set_module(self, ModuleKind::Recovery, module)?;
        Ok(())
    }

    pub fn owner(&self) -> Address {
        self.owner.get()
    }

    pub fn domain_separator(&self) -> FixedBytes<32> {
        self.domain_separator.get()
    }

    pub fn meta_nonce(&self) -> U256 {
        self.meta_nonce.get()
    }

    pub fn policy_module(&self) -> Address {
        self.policy_module.get()
    }

    pub fn recovery_module(&self) -> Address {
        self.recovery_module.get()
    }

    /// Digest to sign for these batch fields at the current `metaNonce`.
    pub fn hash_batch(
        &self,
        targets: Vec<Address>,
        values: Vec<U256>,
        payloads: Vec<Bytes>,
        fee_token: Address,
        fee_amount: U256,
        expiry: U256,
    ) -> FixedBytes<32> {
        let batch = to_batch(targets, values, payloads, fee_token, fee_amount, expiry);
        pipeline::preview_digest(self, &batch)
    }
}

fn to_batch(
    targets: Vec<Address>,
    values: Vec<U256>,
    payloads: Vec<Bytes>,
    fee_token: Address,
    fee_amount: U256,
    expiry: U256,
) -> Batch {
    Batch {
        targets,
        values,
        payloads: payloads.into_iter().map(|p| p.to_vec()).collect(),
        fee_token,
        fee_amount,
        expiry,
    }
}

impl WalletHost for DelegateWallet {
    // The runtime reverts the frame on `Err`; there is nothing to journal.
    type Checkpoint = ();

    fn owner(&self) -> Address {
        self.owner.get()
    }

    fn domain_separator(&self) -> FixedBytes<32> {
        self.domain_separator.get()
    }

    fn initialize(&mut self, owner: Address, domain_separator: FixedBytes<32>) {
        self.owner.set(owner);
        self.domain_separator.set(domain_separator);
    }

    fn meta_nonce(&self) -> U256 {
        self.meta_nonce.get()
    }

    fn set_meta_nonce(&mut self, nonce: U256) {
        self.meta_nonce.set(nonce);
    }

    fn policy_module(&self) -> Address {
        self.policy_module.get()
    }

    fn set_policy_module(&mut self, module: Address) {
        self.policy_module.set(module);
    }

    fn recovery_module(&self) -> Address {
        self.recovery_module.get()
    }

    fn set_recovery_module(&mut self, module: Address) {
        self.recovery_module.set(module);
    }

    fn entered(&self) -> bool {
        self.entered.get()
    }

    fn set_entered(&mut self, entered: bool) {
        self.entered.set(entered);
    }

    fn msg_sender(&self) -> Address {
        self.vm().msg_sender()
    }

    fn tx_origin(&self) -> Address {
        self.vm().tx_origin()
    }

    fn block_timestamp(&self) -> u64 {
        self.vm().block_timestamp()
    }

    fn code_size(&self, account: Address) -> usize {
        self.vm().code_size(account)
    }

    fn call(&mut self, target: Address, value: U256, data: &[u8]) -> Result<Vec<u8>, Vec<u8>> {
        // The target may re-enter (refunds hit `receive`, a nested `executeBatch` must see
        // `entered`). Persist the nonce and the flag, and reload storage afterwards.
        unsafe {
            RawCall::new_with_value(value)
                .clear_storage_cache()
                .call(target, data)
        }
    }

    fn static_call(&mut self, target: Address, data: &[u8]) -> Result<Vec<u8>, Vec<u8>> {
        if target == ECRECOVER_PRECOMPILE {
            return unsafe { RawCall::new_static().gas(ECRECOVER_GAS).call(target, data) };
        }
        // Modules may read the wallet's views; they must see the consumed nonce.
        unsafe {
            RawCall::new_static()
                .flush_storage_cache()
                .call(target, data)
        }
    }

    fn checkpoint(&mut self) -> Self::Checkpoint {}

    fn rollback(&mut self, _checkpoint: Self::Checkpoint) {}

    fn emit(&mut self, event: WalletEvent) {
        match event {
            WalletEvent::BatchExecuted {
                digest,
                nonce,
                relayer,
            } => log(
                self.vm(),
                BatchExecuted {
                    digest,
                    nonce,
                    relayer,
                },
            ),
            WalletEvent::ModuleChanged {
                kind,
                old_module,
                new_module,
            } => log(
                self.vm(),
                ModuleChanged {
                    kind: kind.into(),
                    oldModule: old_module,
                    newModule: new_module,
                },
            ),
        }
    }
}
