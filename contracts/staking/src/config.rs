use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::errors::ContractError;

// ── Storage keys ────────────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const PAUSED: Symbol = symbol_short!("PAUSED");
const WD_PAUSED: Symbol = symbol_short!("WD_PAUSE");
const CLM_PAUSED: Symbol = symbol_short!("CLM_PAUS");

pub(crate) const TTL_THRESHOLD: u32 = 5184000;
pub(crate) const TTL_EXTEND_TO: u32 = 10368000;

// ── Types ───────────────────────────────────────────────────────────────────

/// Process-wide staking parameters, written at `initialize` and changed only
/// by admin operations (and `total_weight` by the pool registry).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    pub admin: Address,
    /// Stellar Asset Contract of the native value asset (custody of pool 0).
    pub native_asset: Address,
    /// Asset paid out by `claim`.
    pub reward_asset: Address,
    /// First ledger of the emission window.
    pub start_ledger: u32,
    /// Ledger at which emission stops; always greater than `start_ledger`.
    pub end_ledger: u32,
    /// Reward units released per elapsed ledger, shared by weight.
    pub reward_per_ledger: i128,
    /// Sum of every pool's weight.
    pub total_weight: u64,
}

/// Which pause gate a `PauseSetEvent` refers to.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PauseGate {
    Global,
    Withdraw,
    Claim,
}

// ── Storage helpers ─────────────────────────────────────────────────────────

pub(crate) fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn load(env: &Env) -> Result<StakingConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn save(env: &Env, config: &StakingConfig) {
    env.storage().instance().set(&CONFIG, config);
    extend_instance_ttl(env);
}

pub fn pending_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_ADMIN)
}

pub fn set_pending_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&PENDING_ADMIN, admin);
}

pub fn clear_pending_admin(env: &Env) {
    env.storage().instance().remove(&PENDING_ADMIN);
}

// ── Pause gates ─────────────────────────────────────────────────────────────

fn gate_key(gate: &PauseGate) -> Symbol {
    match gate {
        PauseGate::Global => PAUSED,
        PauseGate::Withdraw => WD_PAUSED,
        PauseGate::Claim => CLM_PAUSED,
    }
}

pub fn is_paused(env: &Env, gate: &PauseGate) -> bool {
    env.storage()
        .instance()
        .get(&gate_key(gate))
        .unwrap_or(false)
}

/// Flip `gate` to `paused`. Setting a gate to the state it is already in is
/// rejected so that every successful call is an actual transition.
pub fn set_paused(env: &Env, gate: &PauseGate, paused: bool) -> Result<(), ContractError> {
    if is_paused(env, gate) == paused {
        return Err(ContractError::InvalidInput);
    }
    env.storage().instance().set(&gate_key(gate), &paused);
    extend_instance_ttl(env);
    Ok(())
}

/// Fails with the gate-specific error when `gate` (or the global stop) is on.
pub fn require_not_paused(env: &Env, gate: &PauseGate) -> Result<(), ContractError> {
    if is_paused(env, &PauseGate::Global) {
        return Err(ContractError::Paused);
    }
    match gate {
        PauseGate::Global => Ok(()),
        PauseGate::Withdraw if is_paused(env, gate) => Err(ContractError::WithdrawPaused),
        PauseGate::Claim if is_paused(env, gate) => Err(ContractError::ClaimPaused),
        _ => Ok(()),
    }
}
