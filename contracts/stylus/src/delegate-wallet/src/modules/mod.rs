//! Call contracts of the collaborators the wallet talks to.
//!
//! The wallet never owns these modules: it holds an address and calls through the interfaces
//! below only while that address is non-zero.

pub mod constants;
pub mod interfaces;
