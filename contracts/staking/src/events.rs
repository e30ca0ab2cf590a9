#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::{config::PauseGate, pool::StakeAsset};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub reward_asset: Address,
    pub start_ledger: u32,
    pub end_ledger: u32,
    pub reward_per_ledger: i128,
    pub ledger: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pool_id: u32,
    pub asset: StakeAsset,
    pub weight: u64,
    pub min_deposit: i128,
    pub unlock_delay: u32,
    pub ledger: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolWeightSetEvent {
    pub pool_id: u32,
    pub weight: u64,
    pub total_weight: u64,
    pub ledger: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolUpdatedEvent {
    pub pool_id: u32,
    pub min_deposit: i128,
    pub unlock_delay: u32,
    pub ledger: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub user: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub new_total_staked: i128,
    pub ledger: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub user: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub unlock_at: u32,
    pub ledger: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub user: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub ledger: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimedEvent {
    pub user: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub ledger: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardAssetSetEvent {
    pub reward_asset: Address,
    pub ledger: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRateSetEvent {
    pub reward_per_ledger: i128,
    pub ledger: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WindowSetEvent {
    pub start_ledger: u32,
    pub end_ledger: u32,
    pub ledger: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseSetEvent {
    pub gate: PauseGate,
    pub paused: bool,
    pub ledger: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub ledger: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub ledger: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferCancelledEvent {
    pub admin: Address,
    pub cancelled_proposed: Address,
    pub ledger: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    reward_asset: Address,
    start_ledger: u32,
    end_ledger: u32,
    reward_per_ledger: i128,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            reward_asset,
            start_ledger,
            end_ledger,
            reward_per_ledger,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_added(
    env: &Env,
    pool_id: u32,
    asset: StakeAsset,
    weight: u64,
    min_deposit: i128,
    unlock_delay: u32,
) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pool_id),
        PoolAddedEvent {
            pool_id,
            asset,
            weight,
            min_deposit,
            unlock_delay,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_weight_set(env: &Env, pool_id: u32, weight: u64, total_weight: u64) {
    env.events().publish(
        (symbol_short!("POOL_WGT"), pool_id),
        PoolWeightSetEvent {
            pool_id,
            weight,
            total_weight,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_updated(env: &Env, pool_id: u32, min_deposit: i128, unlock_delay: u32) {
    env.events().publish(
        (symbol_short!("POOL_UPD"), pool_id),
        PoolUpdatedEvent {
            pool_id,
            min_deposit,
            unlock_delay,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_deposited(
    env: &Env,
    user: Address,
    pool_id: u32,
    amount: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), user.clone(), pool_id),
        DepositedEvent {
            user,
            pool_id,
            amount,
            new_total_staked,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_unstaked(env: &Env, user: Address, pool_id: u32, amount: i128, unlock_at: u32) {
    env.events().publish(
        (symbol_short!("UNSTAKE"), user.clone(), pool_id),
        UnstakedEvent {
            user,
            pool_id,
            amount,
            unlock_at,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, user: Address, pool_id: u32, amount: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), user.clone(), pool_id),
        WithdrawnEvent {
            user,
            pool_id,
            amount,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_claimed(env: &Env, user: Address, pool_id: u32, amount: i128) {
    env.events().publish(
        (symbol_short!("CLAIM"), user.clone(), pool_id),
        ClaimedEvent {
            user,
            pool_id,
            amount,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_reward_asset_set(env: &Env, reward_asset: Address) {
    env.events().publish(
        (symbol_short!("RWD_ASSET"),),
        RewardAssetSetEvent {
            reward_asset,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_reward_rate_set(env: &Env, reward_per_ledger: i128) {
    env.events().publish(
        (symbol_short!("RWD_RATE"),),
        RewardRateSetEvent {
            reward_per_ledger,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_window_set(env: &Env, start_ledger: u32, end_ledger: u32) {
    env.events().publish(
        (symbol_short!("WINDOW"),),
        WindowSetEvent {
            start_ledger,
            end_ledger,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_pause_set(env: &Env, gate: PauseGate, paused: bool) {
    env.events().publish(
        (symbol_short!("PAUSE_SET"),),
        PauseSetEvent {
            gate,
            paused,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"), admin.clone()),
        AdminTransferCancelledEvent {
            admin,
            cancelled_proposed,
            ledger: env.ledger().sequence(),
        },
    );
}
