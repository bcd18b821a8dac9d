//! In-memory `WalletHost` with a snapshot journal, mock collaborators and an emulated
//! `ecrecover` precompile.

#![allow(dead_code)]

use std::collections::HashMap;

use alloy_primitives::{Address, FixedBytes, U256};
use alloy_sol_types::{SolCall, SolValue};

use delegate_wallet::{
    modules::{
        constants::{ECRECOVER_PRECOMPILE, ERC1271_MAGIC_VALUE},
        interfaces::{IGuard, IRecoveryModule, IERC20},
    },
    pipeline::{self, config},
    Batch, ModuleKind, WalletError, WalletEvent, WalletHost,
};
use delegate_wallet_signer::{recover_signer, BatchSigner};

pub const CHAIN_ID: u64 = 42161;
pub const NOW: u64 = 1_700_000_000;

pub const REVERT_REASON: &[u8] = b"nope";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Approve,
    Deny,
    Revert,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenMode {
    Standard,
    ReturnsFalse,
    NoReturn,
    Reverts,
}

#[derive(Clone, Debug)]
pub enum Contract {
    /// Counts every call it receives.
    Counter { hits: u64 },
    /// Always reverts with [`REVERT_REASON`].
    Reverter,
    /// Calls back into `executeBatch` on the wallet.
    Reenter { batch: Batch, signature: Vec<u8> },
    /// Sends any value it receives straight back to the wallet's `receive`.
    Refunder,
    Guard { pre: Verdict, post: Verdict },
    /// Accepts signatures recovering to `accepts`.
    Recovery { accepts: Address },
    Token {
        mode: TokenMode,
        balances: HashMap<Address, U256>,
    },
}

#[derive(Clone, Debug, Default)]
pub struct Slots {
    pub owner: Address,
    pub domain_separator: FixedBytes<32>,
    pub meta_nonce: U256,
    pub policy_module: Address,
    pub recovery_module: Address,
}

#[derive(Clone, Debug, Default)]
pub struct World {
    pub balances: HashMap<Address, U256>,
    pub contracts: HashMap<Address, Contract>,
    pub events: Vec<WalletEvent>,
}

#[derive(Clone, Debug)]
pub struct Snapshot {
    slots: Slots,
    world: World,
}

pub struct MockHost {
    /// Under delegation the wallet lives at the owner's address.
    pub wallet: Address,
    pub slots: Slots,
    pub entered: bool,
    pub world: World,
    pub sender: Address,
    pub origin: Address,
    pub now: u64,
    /// Errors seen by re-entering targets (outside the journal).
    pub reentry_errors: Vec<WalletError>,
    /// `(caller, payload)` of every guard hook invocation (outside the journal).
    pub guard_calls: Vec<(Address, Vec<u8>)>,
}

impl MockHost {
    pub fn new(owner: &BatchSigner) -> Self {
        Self::on_chain(owner.address(), CHAIN_ID).expect("valid construction")
    }

    pub fn on_chain(owner: Address, chain_id: u64) -> Result<Self, WalletError> {
        let mut host = Self {
            wallet: owner,
            slots: Slots::default(),
            entered: false,
            world: World::default(),
            sender: owner,
            origin: owner,
            now: NOW,
            reentry_errors: Vec::new(),
            guard_calls: Vec::new(),
        };
        config::initialize(&mut host, owner, chain_id)?;
        Ok(host)
    }

    pub fn deploy(&mut self, at: Address, contract: Contract) {
        self.world.contracts.insert(at, contract);
    }

    pub fn deploy_token(&mut self, at: Address, mode: TokenMode, holder: Address, amount: U256) {
        let mut balances = HashMap::new();
        balances.insert(holder, amount);
        self.deploy(at, Contract::Token { mode, balances });
    }

    pub fn fund(&mut self, who: Address, amount: U256) {
        *self.world.balances.entry(who).or_default() += amount;
    }

    pub fn balance(&self, who: Address) -> U256 {
        self.world.balances.get(&who).copied().unwrap_or_default()
    }

    pub fn token_balance(&self, token: Address, who: Address) -> U256 {
        match self.world.contracts.get(&token) {
            Some(Contract::Token { balances, .. }) => balances.get(&who).copied().unwrap_or_default(),
            _ => U256::ZERO,
        }
    }

    pub fn hits(&self, counter: Address) -> u64 {
        match self.world.contracts.get(&counter) {
            Some(Contract::Counter { hits }) => *hits,
            _ => 0,
        }
    }

    pub fn events(&self) -> &[WalletEvent] {
        &self.world.events
    }

    pub fn nonce(&self) -> U256 {
        self.slots.meta_nonce
    }

    /// Sign `batch` against this wallet's domain at its current nonce.
    pub fn sign(&self, signer: &BatchSigner, batch: &Batch) -> Vec<u8> {
        signer
            .sign_batch(batch, self.slots.domain_separator, self.slots.meta_nonce)
            .expect("signing")
            .to_vec()
    }

    /// Submit `batch` as `relayer` (both direct caller and transaction origin).
    pub fn relay(
        &mut self,
        relayer: Address,
        batch: &Batch,
        signature: &[u8],
    ) -> Result<FixedBytes<32>, WalletError> {
        self.sender = relayer;
        self.origin = relayer;
        pipeline::execute_batch(self, batch, signature)
    }

    /// Direct administrative call from `caller`.
    pub fn set_module_as(
        &mut self,
        caller: Address,
        kind: ModuleKind,
        module: Address,
    ) -> Result<(), WalletError> {
        self.sender = caller;
        self.origin = caller;
        config::set_module(self, kind, module)
    }

    fn move_native(&mut self, from: Address, to: Address, value: U256) -> Result<(), Vec<u8>> {
        if value.is_zero() {
            return Ok(());
        }
        let balance = self.balance(from);
        if balance < value {
            return Err(b"insufficient balance".to_vec());
        }
        self.world.balances.insert(from, balance - value);
        self.fund(to, value);
        Ok(())
    }

    fn call_from(
        &mut self,
        from: Address,
        target: Address,
        value: U256,
        data: &[u8],
    ) -> Result<Vec<u8>, Vec<u8>> {
        // A reverting frame leaves no trace.
        let before = self.world.clone();
        let result = self
            .move_native(from, target, value)
            .and_then(|_| self.dispatch(target, value, data));
        if result.is_err() {
            self.world = before;
        }
        result
    }

    fn dispatch(&mut self, target: Address, value: U256, data: &[u8]) -> Result<Vec<u8>, Vec<u8>> {
        if target == self.wallet {
            // Only `receive` is reachable from here; it takes no call data.
            return if data.is_empty() {
                Ok(Vec::new())
            } else {
                Err(b"unsupported wallet entry".to_vec())
            };
        }
        let Some(contract) = self.world.contracts.get(&target).cloned() else {
            // Plain account: accepts anything.
            return Ok(Vec::new());
        };
        match contract {
            Contract::Counter { .. } => {
                if let Some(Contract::Counter { hits }) = self.world.contracts.get_mut(&target) {
                    *hits += 1;
                }
                Ok(Vec::new())
            }
            Contract::Reverter => Err(REVERT_REASON.to_vec()),
            Contract::Refunder => {
                let wallet = self.wallet;
                self.call_from(target, wallet, value, &[])
            }
            Contract::Reenter { batch, signature } => {
                match pipeline::execute_batch(self, &batch, &signature) {
                    Ok(_) => Ok(Vec::new()),
                    Err(err) => {
                        self.reentry_errors.push(err);
                        Err(b"reentry failed".to_vec())
                    }
                }
            }
            Contract::Token { mode, .. } => self.token_transfer(target, mode, data),
            Contract::Guard { .. } | Contract::Recovery { .. } => Ok(Vec::new()),
        }
    }

    fn token_transfer(
        &mut self,
        token: Address,
        mode: TokenMode,
        data: &[u8],
    ) -> Result<Vec<u8>, Vec<u8>> {
        let call = IERC20::transferCall::abi_decode(data, true).map_err(|_| b"bad call".to_vec())?;
        match mode {
            TokenMode::Reverts => return Err(b"token paused".to_vec()),
            TokenMode::ReturnsFalse => return Ok(false.abi_encode()),
            TokenMode::Standard | TokenMode::NoReturn => {}
        }

        let from = self.wallet;
        let Some(Contract::Token { balances, .. }) = self.world.contracts.get_mut(&token) else {
            return Err(b"no token".to_vec());
        };
        let held = balances.get(&from).copied().unwrap_or_default();
        if held < call.amount {
            return Err(b"insufficient token balance".to_vec());
        }
        balances.insert(from, held - call.amount);
        *balances.entry(call.to).or_default() += call.amount;

        Ok(match mode {
            TokenMode::NoReturn => Vec::new(),
            _ => true.abi_encode(),
        })
    }

    fn ecrecover(data: &[u8]) -> Vec<u8> {
        if data.len() != 128 {
            return Vec::new();
        }
        let digest = FixedBytes::<32>::from_slice(&data[0..32]);
        let mut sig = Vec::with_capacity(65);
        sig.extend_from_slice(&data[64..128]);
        sig.push(data[63]);
        match recover_signer(digest, &sig) {
            Some(signer) => {
                let mut word = vec![0u8; 32];
                word[12..].copy_from_slice(signer.as_slice());
                word
            }
            None => Vec::new(),
        }
    }
}

impl WalletHost for MockHost {
    type Checkpoint = Snapshot;

    fn owner(&self) -> Address {
        self.slots.owner
    }

    fn domain_separator(&self) -> FixedBytes<32> {
        self.slots.domain_separator
    }

    fn initialize(&mut self, owner: Address, domain_separator: FixedBytes<32>) {
        self.slots.owner = owner;
        self.slots.domain_separator = domain_separator;
    }

    fn meta_nonce(&self) -> U256 {
        self.slots.meta_nonce
    }

    fn set_meta_nonce(&mut self, nonce: U256) {
        self.slots.meta_nonce = nonce;
    }

    fn policy_module(&self) -> Address {
        self.slots.policy_module
    }

    fn set_policy_module(&mut self, module: Address) {
        self.slots.policy_module = module;
    }

    fn recovery_module(&self) -> Address {
        self.slots.recovery_module
    }

    fn set_recovery_module(&mut self, module: Address) {
        self.slots.recovery_module = module;
    }

    fn entered(&self) -> bool {
        self.entered
    }

    fn set_entered(&mut self, entered: bool) {
        self.entered = entered;
    }

    fn msg_sender(&self) -> Address {
        self.sender
    }

    fn tx_origin(&self) -> Address {
        self.origin
    }

    fn block_timestamp(&self) -> u64 {
        self.now
    }

    fn code_size(&self, account: Address) -> usize {
        usize::from(self.world.contracts.contains_key(&account))
    }

    fn call(&mut self, target: Address, value: U256, data: &[u8]) -> Result<Vec<u8>, Vec<u8>> {
        let wallet = self.wallet;
        self.call_from(wallet, target, value, data)
    }

    fn static_call(&mut self, target: Address, data: &[u8]) -> Result<Vec<u8>, Vec<u8>> {
        if target == ECRECOVER_PRECOMPILE {
            return Ok(Self::ecrecover(data));
        }
        match self.world.contracts.get(&target).cloned() {
            Some(Contract::Guard { pre, post }) => {
                let verdict = if data.starts_with(&IGuard::preCheckCall::SELECTOR) {
                    let call = IGuard::preCheckCall::abi_decode(data, true).map_err(|_| Vec::new())?;
                    self.guard_calls.push((call.caller, call.payload.to_vec()));
                    pre
                } else if data.starts_with(&IGuard::postCheckCall::SELECTOR) {
                    let call = IGuard::postCheckCall::abi_decode(data, true).map_err(|_| Vec::new())?;
                    self.guard_calls.push((call.caller, call.payload.to_vec()));
                    post
                } else {
                    return Err(Vec::new());
                };
                match verdict {
                    Verdict::Approve => Ok(true.abi_encode()),
                    Verdict::Deny => Ok(false.abi_encode()),
                    Verdict::Revert => Err(b"guard reverted".to_vec()),
                }
            }
            Some(Contract::Recovery { accepts }) => {
                let call = IRecoveryModule::isValidSignatureCall::abi_decode(data, true)
                    .map_err(|_| Vec::new())?;
                let magic = if recover_signer(call.digest, &call.signature) == Some(accepts) {
                    ERC1271_MAGIC_VALUE
                } else {
                    FixedBytes([0xff; 4])
                };
                Ok(magic.abi_encode())
            }
            Some(_) | None => Ok(Vec::new()),
        }
    }

    fn checkpoint(&mut self) -> Snapshot {
        Snapshot {
            slots: self.slots.clone(),
            world: self.world.clone(),
        }
    }

    fn rollback(&mut self, checkpoint: Snapshot) {
        self.slots = checkpoint.slots;
        self.world = checkpoint.world;
    }

    fn emit(&mut self, event: WalletEvent) {
        self.world.events.push(event);
    }
}

pub fn signer(seed: u8) -> BatchSigner {
    BatchSigner::from_slice(&[seed; 32]).expect("valid scalar")
}

pub fn addr(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

/// Single call batch with no fee, valid for a minute.
pub fn single_call(target: Address, payload: Vec<u8>) -> Batch {
    Batch {
        targets: vec![target],
        values: vec![U256::ZERO],
        payloads: vec![payload],
        fee_token: Address::ZERO,
        fee_amount: U256::ZERO,
        expiry: U256::from(NOW + 60),
    }
}

pub fn erc20_transfer(to: Address, amount: U256) -> Vec<u8> {
    IERC20::transferCall { to, amount }.abi_encode()
}
