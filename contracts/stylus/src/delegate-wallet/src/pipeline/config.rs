//! Construction and Module Configuration (owner-only, direct call).

use stylus_sdk::alloy_primitives::Address;

use delegate_wallet_types::{domain_separator, ModuleKind};

use crate::{
    errors::WalletError,
    host::{WalletEvent, WalletHost},
};

/// Fix the owner and derive the domain separator. Neither changes afterwards.
pub fn initialize<H: WalletHost>(
    host: &mut H,
    owner: Address,
    chain_id: u64,
) -> Result<(), WalletError> {
    if chain_id == 0 {
        return Err(WalletError::InvalidChainId);
    }
    if owner == Address::ZERO {
        return Err(WalletError::InvalidOwner);
    }
    host.initialize(owner, domain_separator(chain_id, owner));
    Ok(())
}

/// Replace the policy or recovery module. Zero disables it.
///
/// The new module is not probed; the owner vouches for it.
pub fn set_module<H: WalletHost>(
    host: &mut H,
    kind: ModuleKind,
    new_module: Address,
) -> Result<(), WalletError> {
    let caller = host.msg_sender();
    if caller != host.owner() {
        return Err(WalletError::NotOwner(caller));
    }

    let old_module = match kind {
        ModuleKind::Policy => {
            let old = host.policy_module();
            host.set_policy_module(new_module);
            old
        }
        ModuleKind::Recovery => {
            let old = host.recovery_module();
            host.set_recovery_module(new_module);
            old
        }
    };

    host.emit(WalletEvent::ModuleChanged {
        kind,
        old_module,
        new_module,
    });
    Ok(())
}
