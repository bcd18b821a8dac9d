//! Solidity ABI of the wallet and of the modules it calls.

use stylus_sdk::alloy_sol_types::sol;

sol! {
    /// Optional policy module consulted around every batch.
    ///
    /// Both hooks are invoked with `staticcall`; a revert or `false` vetoes the batch.
    interface IGuard {
        function preCheck(address caller, bytes payload) external view returns (bool approved);
        function postCheck(address caller, bytes payload) external view returns (bool approved);
    }

    /// Optional alternate verifier (ERC-1271 shaped).
    interface IRecoveryModule {
        function isValidSignature(bytes32 digest, bytes signature) external view returns (bytes4 magicValue);
    }

    /// Minimal fungible-asset surface used for relayer fees.
    interface IERC20 {
        function transfer(address to, uint256 amount) external returns (bool success);
    }

    /// The wallet's own batch entry point; its call data is the payload handed to guards.
    interface IDelegateWallet {
        function executeBatch(
            address[] targets,
            uint256[] values,
            bytes[] payloads,
            address feeToken,
            uint256 feeAmount,
            uint256 expiry,
            bytes signature
        ) external;
    }
}
