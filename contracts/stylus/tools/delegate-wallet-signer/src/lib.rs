//! Relayer-side helpers: sign batch digests for the delegate wallet and recover signers.
//!
//! Signatures are 65 bytes `r || s || v` with `v` in {27, 28} and low `s`, which is what the
//! wallet's `ecrecover` path accepts.

mod signer;


pub use delegate_wallet_types::{batch_digest, domain_separator, Batch};
pub use signer::{address_of, recover_signer, BatchSigner};
