use stylus_sdk::alloy_primitives::Address;

pub use delegate_wallet_types::ERC1271_MAGIC_VALUE;

/// `ecrecover` precompile.
pub const ECRECOVER_PRECOMPILE: Address = Address::with_last_byte(1);

/// Gas forwarded to the `ecrecover` precompile (it costs 3000).
pub const ECRECOVER_GAS: u64 = 50_000;
