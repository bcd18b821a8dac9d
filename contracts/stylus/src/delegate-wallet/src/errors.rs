use alloc::vec::Vec;

use alloy_sol_types::sol;
use stylus_sdk::{
    alloy_primitives::{Address, U256},
    stylus_proc::SolidityError,
};

/// Which guard hook vetoed a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum GuardStage {
    Pre = 0,
    Post = 1,
}

/// Failures of the batch pipeline and the administrative path.
///
/// Every variant aborts the attempt. None are retried inside the wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletError {
    /// Target/value/payload lists are empty or of different lengths.
    InvalidBatchShape,
    Expired { expiry: U256, timestamp: u64 },
    /// Neither the owner key nor the recovery module accepted the signature.
    Unauthorized,
    PolicyRejected(GuardStage),
    SubCallFailed { index: usize, reason: Vec<u8> },
    FeeTransferFailed,
    Reentrant,
    NotOwner(Address),
    InvalidChainId,
    InvalidOwner,
}

sol! {
    error InvalidBatchShape();
    error Expired(uint256 expiry, uint256 timestamp);
    error Unauthorized();
    error PolicyRejected(uint8 stage);
    error SubCallFailed(uint256 index, bytes reason);
    error FeeTransferFailed();
    error Reentrant();
    error NotOwner(address caller);
    error InvalidChainId();
    error InvalidOwner();
}

/// ABI-level revert reasons returned by the public entry points.
#[derive(SolidityError)]
pub enum WalletRevert {
    InvalidBatchShape(InvalidBatchShape),
    Expired(Expired),
    Unauthorized(Unauthorized),
    PolicyRejected(PolicyRejected),
    SubCallFailed(SubCallFailed),
    FeeTransferFailed(FeeTransferFailed),
    Reentrant(Reentrant),
    NotOwner(NotOwner),
    InvalidChainId(InvalidChainId),
    InvalidOwner(InvalidOwner),
}

impl From<WalletError> for WalletRevert {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::InvalidBatchShape => WalletRevert::InvalidBatchShape(InvalidBatchShape {}),
            WalletError::Expired { expiry, timestamp } => WalletRevert::Expired(Expired {
                expiry,
                timestamp: U256::from(timestamp),
            }),
            WalletError::Unauthorized => WalletRevert::Unauthorized(Unauthorized {}),
            WalletError::PolicyRejected(stage) => {
                WalletRevert::PolicyRejected(PolicyRejected { stage: stage as u8 })
            }
            WalletError::SubCallFailed { index, reason } => WalletRevert::SubCallFailed(SubCallFailed {
                index: U256::from(index),
                reason: reason.into(),
            }),
            WalletError::FeeTransferFailed => WalletRevert::FeeTransferFailed(FeeTransferFailed {}),
            WalletError::Reentrant => WalletRevert::Reentrant(Reentrant {}),
            WalletError::NotOwner(caller) => WalletRevert::NotOwner(NotOwner { caller }),
            WalletError::InvalidChainId => WalletRevert::InvalidChainId(InvalidChainId {}),
            WalletError::InvalidOwner => WalletRevert::InvalidOwner(InvalidOwner {}),
        }
    }
}
