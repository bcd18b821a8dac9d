use alloy_primitives::{Address, FixedBytes, U256};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use sha3::{Digest, Keccak256};

use delegate_wallet_types::Batch;

/// Wraps an owner (or recovery) key.
#[derive(Clone)]
pub struct BatchSigner {
    key: SigningKey,
}

impl BatchSigner {
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// Build from a 32-byte secret scalar.
    pub fn from_slice(secret: &[u8]) -> Result<Self, k256::ecdsa::Error> {
        Ok(Self::new(SigningKey::from_slice(secret)?))
    }

    /// Build from a hex secret, with or without `0x`.
    pub fn from_hex(secret: &str) -> Result<Self, k256::ecdsa::Error> {
        let secret = secret.trim().trim_start_matches("0x");
        let bytes = alloy_primitives::hex::decode(secret).map_err(|_| k256::ecdsa::Error::new())?;
        Self::from_slice(&bytes)
    }

    pub fn address(&self) -> Address {
        address_of(self.key.verifying_key())
    }

    /// Sign a 32-byte digest as-is (no further hashing).
    pub fn sign_digest(&self, digest: FixedBytes<32>) -> Result<[u8; 65], k256::ecdsa::Error> {
        let (signature, recovery_id) = self.key.sign_prehash_recoverable(digest.as_slice())?;
        let mut out = [0u8; 65];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64] = 27 + recovery_id.to_byte();
        Ok(out)
    }

    /// Sign `batch` for the wallet identified by `domain_separator` at `nonce`.
    pub fn sign_batch(
        &self,
        batch: &Batch,
        domain_separator: FixedBytes<32>,
        nonce: U256,
    ) -> Result<[u8; 65], k256::ecdsa::Error> {
        self.sign_digest(batch.digest(domain_separator, nonce))
    }
}

/// Ethereum address of a secp256k1 public key: last 20 bytes of keccak256(x || y).
pub fn address_of(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = Keccak256::digest(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..32])
}

/// Off-chain `ecrecover`: `None` for malformed input or an unrecoverable signature.
pub fn recover_signer(digest: FixedBytes<32>, sig: &[u8]) -> Option<Address> {
    if sig.len() != 65 {
        return None;
    }
    let v = match sig[64] {
        v @ (27 | 28) => v - 27,
        v @ (0 | 1) => v,
        _ => return None,
    };
    let signature = Signature::from_slice(&sig[..64]).ok()?;
    let recovery_id = RecoveryId::from_byte(v)?;
    let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &signature, recovery_id).ok()?;
    Some(address_of(&key))
}
