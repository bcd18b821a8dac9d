//! The seam between the batch pipeline and the environment it runs in.
//!
//! On-chain, [`crate::DelegateWallet`] implements this over the Stylus VM and relies on the
//! runtime reverting a failed frame. Off-chain hosts model the same atomicity with
//! [`WalletHost::checkpoint`] / [`WalletHost::rollback`].

use alloc::vec::Vec;

use stylus_sdk::alloy_primitives::{Address, FixedBytes, U256};

use delegate_wallet_types::ModuleKind;

/// Events the wallet emits. Hosts translate these into logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletEvent {
    BatchExecuted {
        digest: FixedBytes<32>,
        nonce: U256,
        relayer: Address,
    },
    ModuleChanged {
        kind: ModuleKind,
        old_module: Address,
        new_module: Address,
    },
}

/// Storage, environment and call access needed by the pipeline.
pub trait WalletHost {
    /// Opaque marker returned by [`WalletHost::checkpoint`].
    type Checkpoint;

    // --- wallet storage ---

    fn owner(&self) -> Address;
    fn domain_separator(&self) -> FixedBytes<32>;
    /// Writes the immutable identity slots. Only reached from construction.
    fn initialize(&mut self, owner: Address, domain_separator: FixedBytes<32>);

    fn meta_nonce(&self) -> U256;
    fn set_meta_nonce(&mut self, nonce: U256);

    fn policy_module(&self) -> Address;
    fn set_policy_module(&mut self, module: Address);
    fn recovery_module(&self) -> Address;
    fn set_recovery_module(&mut self, module: Address);

    fn entered(&self) -> bool;
    fn set_entered(&mut self, entered: bool);

    // --- environment ---

    /// Direct caller of the current entry point.
    fn msg_sender(&self) -> Address;
    /// Account that submitted the transaction.
    fn tx_origin(&self) -> Address;
    fn block_timestamp(&self) -> u64;
    fn code_size(&self, account: Address) -> usize;

    // --- external calls ---

    /// State-changing call forwarding `value`. `Err` carries revert data.
    fn call(&mut self, target: Address, value: U256, data: &[u8]) -> Result<Vec<u8>, Vec<u8>>;
    /// Read-only call. `Err` carries revert data.
    fn static_call(&mut self, target: Address, data: &[u8]) -> Result<Vec<u8>, Vec<u8>>;

    // --- atomicity ---

    /// Marks a point every later effect can be undone back to, except `entered`.
    fn checkpoint(&mut self) -> Self::Checkpoint;
    /// Discards all storage, balance and event effects made since `checkpoint`.
    fn rollback(&mut self, checkpoint: Self::Checkpoint);

    fn emit(&mut self, event: WalletEvent);
}
