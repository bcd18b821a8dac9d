//! Shared utilities for the wallet.
//!
//! These helpers are small and deterministic, as they run inside Stylus / WASM.

pub mod crypto;
