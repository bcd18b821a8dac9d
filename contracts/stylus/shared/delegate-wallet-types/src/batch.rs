use alloc::vec::Vec;

use alloy_primitives::{Address, FixedBytes, U256};

use crate::eip712;

/// Batch authorization message.
///
/// Never stored: the wallet rebuilds it from call arguments, hashes it together with its current
/// meta-nonce, and checks the signature against that digest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Batch {
    pub targets: Vec<Address>,
    pub values: Vec<U256>,
    pub payloads: Vec<Vec<u8>>,
    /// Zero address selects the native asset.
    pub fee_token: Address,
    pub fee_amount: U256,
    /// Unix timestamp; the batch is accepted while `block.timestamp <= expiry`.
    pub expiry: U256,
}

impl Batch {
    /// Number of sub-calls in the batch.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// The three call lists are parallel and non-empty.
    pub fn is_well_formed(&self) -> bool {
        !self.targets.is_empty()
            && self.targets.len() == self.values.len()
            && self.targets.len() == self.payloads.len()
    }

    pub fn pays_native_fee(&self) -> bool {
        self.fee_token == Address::ZERO
    }

    /// EIP-712 struct hash of this batch bound to `nonce`.
    pub fn struct_hash(&self, nonce: U256) -> FixedBytes<32> {
        eip712::batch_struct_hash(self, nonce)
    }

    /// Digest a signer must sign for this batch, under `domain_separator`, at `nonce`.
    pub fn digest(&self, domain_separator: FixedBytes<32>, nonce: U256) -> FixedBytes<32> {
        eip712::batch_digest(domain_separator, self, nonce)
    }
}
