use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{
    config::{StakingConfig, TTL_EXTEND_TO, TTL_THRESHOLD},
    errors::ContractError,
};

// ── Storage keys ────────────────────────────────────────────────────────────

const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
const POOL: Symbol = symbol_short!("POOL");

/// Pool id reserved for the native value asset.
pub const NATIVE_POOL_ID: u32 = 0;

// ── Types ───────────────────────────────────────────────────────────────────

/// The asset a pool accepts.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StakeAsset {
    /// The network's native value asset; only ever used by pool 0.
    Native,
    /// A fungible token contract.
    Token(Address),
}

/// One entry of the pool registry.
///
/// Identity (`id`, `asset`) is fixed at creation. `weight`, `min_deposit`
/// and `unlock_delay` are admin-mutable; the accrual fields are only ever
/// written by settlement and the stake ledger.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub id: u32,
    pub asset: StakeAsset,
    pub weight: u64,
    pub min_deposit: i128,
    /// Ledgers an unstaked amount stays locked before it can be withdrawn.
    pub unlock_delay: u32,
    /// Sum of all live (not pending-withdrawal) user stake.
    pub total_staked: i128,
    /// Cumulative reward per unit of stake, scaled by `math::PRECISION`.
    pub acc_reward_per_share: i128,
    /// Ledger up to which `acc_reward_per_share` is settled.
    pub last_accrual_ledger: u32,
}

impl Pool {
    /// Address of the contract holding this pool's stake asset.
    pub fn asset_address(&self, config: &StakingConfig) -> Address {
        match &self.asset {
            StakeAsset::Native => config.native_asset.clone(),
            StakeAsset::Token(token) => token.clone(),
        }
    }
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn pool_key(id: u32) -> (Symbol, u32) {
    (POOL, id)
}

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn load(env: &Env, id: u32) -> Result<Pool, ContractError> {
    let key = pool_key(id);
    let pool: Pool = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::PoolNotFound)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(pool)
}

pub fn save(env: &Env, pool: &Pool) {
    let key = pool_key(pool.id);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Append `pool` under the next sequential id and return that id.
pub fn push(env: &Env, mut pool: Pool) -> u32 {
    let id = count(env);
    pool.id = id;
    save(env, &pool);
    env.storage().instance().set(&POOL_COUNT, &(id + 1));
    id
}

/// Whether any registered pool already stakes `asset`.
pub fn uses_asset(env: &Env, config: &StakingConfig, asset: &Address) -> bool {
    (0..count(env)).any(|id| match load(env, id) {
        Ok(pool) => pool.asset_address(config) == *asset,
        Err(_) => false,
    })
}
