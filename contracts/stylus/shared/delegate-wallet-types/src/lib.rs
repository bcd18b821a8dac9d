//! Types shared by the delegate wallet contract and its off-chain tooling.
//!
//! Both sides must derive the same digest for the same batch, so the EIP-712 encoding lives
//! here and nowhere else.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod batch;
pub mod eip712;
pub mod modules;

pub use batch::Batch;
pub use eip712::{batch_digest, domain_separator};
pub use modules::{ModuleKind, ERC1271_MAGIC_VALUE};
