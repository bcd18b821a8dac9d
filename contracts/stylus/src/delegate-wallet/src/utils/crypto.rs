//! Signature recovery for the owner-key authorization path.

use alloc::vec::Vec;

use stylus_sdk::alloy_primitives::{Address, FixedBytes, U256};

use crate::{
    host::WalletHost,
    modules::constants::ECRECOVER_PRECOMPILE,
};

/// secp256k1 curve order `n` divided by two. Signatures with `s` above this are malleable twins.
const HALF_CURVE_ORDER: U256 = U256::from_limbs([
    0xdfe9_2f46_681b_20a0,
    0x5d57_6e73_57a4_501d,
    0xffff_ffff_ffff_ffff,
    0x7fff_ffff_ffff_ffff,
]);

/// Split a 65-byte `r || s || v` signature, normalising `v` to {27, 28}.
///
/// Rejects other lengths, unknown `v` values and high-`s` signatures.
pub fn split_signature(sig: &[u8]) -> Option<([u8; 32], [u8; 32], u8)> {
    if sig.len() != 65 {
        return None;
    }
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&sig[0..32]);
    s.copy_from_slice(&sig[32..64]);
    let v = match sig[64] {
        v @ (27 | 28) => v,
        v @ (0 | 1) => v + 27,
        _ => return None,
    };
    if U256::from_be_bytes(s) > HALF_CURVE_ORDER {
        return None;
    }
    Some((r, s, v))
}

/// Recover the signer of `digest` through the `ecrecover` precompile at `0x01`.
///
/// Returns `None` for malformed signatures and when the precompile yields no address.
pub fn ecrecover_address<H: WalletHost>(
    host: &mut H,
    digest: FixedBytes<32>,
    sig: &[u8],
) -> Option<Address> {
    let (r, s, v) = split_signature(sig)?;

    let mut input = Vec::with_capacity(128);
    input.extend_from_slice(digest.as_slice());
    // v as 32-byte big-endian word.
    let mut v_word = [0u8; 32];
    v_word[31] = v;
    input.extend_from_slice(&v_word);
    input.extend_from_slice(&r);
    input.extend_from_slice(&s);

    let out = host.static_call(ECRECOVER_PRECOMPILE, &input).ok()?;
    if out.len() < 32 {
        return None;
    }
    // precompile returns 32-byte word with address in the low 20 bytes.
    let recovered = Address::from_slice(&out[12..32]);
    (recovered != Address::ZERO).then_some(recovered)
}
