//! EIP-712 domain and batch digest construction.
//!
//! Layout must stay bit-exact with what relayer tooling signs:
//! `keccak256("\x19\x01" || domainSeparator || structHash)`.

use alloc::vec::Vec;

use alloy_primitives::{keccak256, Address, FixedBytes, U256};

use crate::batch::Batch;

pub const DOMAIN_NAME: &[u8] = b"DelegateWallet";
pub const DOMAIN_VERSION: &[u8] = b"1";

pub const DOMAIN_TYPE: &[u8] =
    b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

pub const EXECUTE_BATCH_TYPE: &[u8] = b"ExecuteBatch(address[] targets,uint256[] values,bytes[] payloads,address feeToken,uint256 feeAmount,uint256 expiry,uint256 nonce)";

/// Domain separator binding signatures to `(chain_id, owner)`.
///
/// The owner doubles as `verifyingContract`: under account delegation the wallet lives at the
/// owner's address.
pub fn domain_separator(chain_id: u64, owner: Address) -> FixedBytes<32> {
    let mut buf = Vec::with_capacity(32 * 5);
    buf.extend_from_slice(keccak256(DOMAIN_TYPE).as_slice());
    buf.extend_from_slice(keccak256(DOMAIN_NAME).as_slice());
    buf.extend_from_slice(keccak256(DOMAIN_VERSION).as_slice());
    buf.extend_from_slice(&U256::from(chain_id).to_be_bytes::<32>());
    buf.extend_from_slice(&address_word(owner));
    keccak256(buf)
}

pub fn batch_struct_hash(batch: &Batch, nonce: U256) -> FixedBytes<32> {
    let mut buf = Vec::with_capacity(32 * 8);
    buf.extend_from_slice(keccak256(EXECUTE_BATCH_TYPE).as_slice());
    buf.extend_from_slice(hash_addresses(&batch.targets).as_slice());
    buf.extend_from_slice(hash_words(&batch.values).as_slice());
    buf.extend_from_slice(hash_payloads(&batch.payloads).as_slice());
    buf.extend_from_slice(&address_word(batch.fee_token));
    buf.extend_from_slice(&batch.fee_amount.to_be_bytes::<32>());
    buf.extend_from_slice(&batch.expiry.to_be_bytes::<32>());
    buf.extend_from_slice(&nonce.to_be_bytes::<32>());
    keccak256(buf)
}

pub fn batch_digest(domain_separator: FixedBytes<32>, batch: &Batch, nonce: U256) -> FixedBytes<32> {
    typed_data_digest(domain_separator, batch_struct_hash(batch, nonce))
}

pub fn typed_data_digest(domain_separator: FixedBytes<32>, struct_hash: FixedBytes<32>) -> FixedBytes<32> {
    let mut buf = Vec::with_capacity(2 + 32 + 32);
    buf.extend_from_slice(b"\x19\x01");
    buf.extend_from_slice(domain_separator.as_slice());
    buf.extend_from_slice(struct_hash.as_slice());
    keccak256(buf)
}

// address[]: keccak256 of the left-padded words.
fn hash_addresses(items: &[Address]) -> FixedBytes<32> {
    let mut buf = Vec::with_capacity(32 * items.len());
    for item in items {
        buf.extend_from_slice(&address_word(*item));
    }
    keccak256(buf)
}

fn hash_words(items: &[U256]) -> FixedBytes<32> {
    let mut buf = Vec::with_capacity(32 * items.len());
    for item in items {
        buf.extend_from_slice(&item.to_be_bytes::<32>());
    }
    keccak256(buf)
}

// bytes[]: keccak256 of the concatenated element hashes.
fn hash_payloads(items: &[Vec<u8>]) -> FixedBytes<32> {
    let mut buf = Vec::with_capacity(32 * items.len());
    for item in items {
        buf.extend_from_slice(keccak256(item).as_slice());
    }
    keccak256(buf)
}

fn address_word(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..32].copy_from_slice(address.as_slice());
    word
}
