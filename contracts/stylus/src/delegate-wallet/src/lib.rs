//! Immutable account-delegation wallet for Arbitrum Stylus.
//!
//! An account activates this code at its own address and then has relayers submit batches of
//! sub-calls it signed offline. Each batch runs through one pipeline:
//! authorize -> pre-guard -> execute -> post-guard -> pay relayer fee -> emit.
//!
//! The pipeline is written against [`host::WalletHost`] so it can be driven by the Stylus VM
//! ([`DelegateWallet`]) or by an in-memory host with an explicit journal.

#![cfg_attr(not(any(test, feature = "export-abi")), no_std)]

extern crate alloc;

pub mod errors;
pub mod host;
pub mod modules;
pub mod pipeline;
pub mod utils;
pub mod wallet;

pub use delegate_wallet_types::{Batch, ModuleKind};
pub use errors::{GuardStage, WalletError, WalletRevert};
pub use host::{WalletEvent, WalletHost};
pub use wallet::DelegateWallet;
