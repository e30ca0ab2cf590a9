//! Lazy, pool-local reward accrual.
//!
//! Nothing accrues in the background. Every operation that touches a pool
//! first brings its accumulator up to the current ledger with [`settle`];
//! read-only queries use [`project`] to see the same value without
//! committing it.

use soroban_sdk::Env;

use crate::{
    config::StakingConfig,
    errors::ContractError,
    math,
    pool::{self, Pool},
};

/// Result of projecting a pool forward in time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Accrual {
    /// The pool as it would look once settled.
    pub pool: Pool,
    /// Reward distributed to the pool's stakers by this step.
    pub reward: i128,
}

/// Clamp `ledger` into the emission window.
pub fn settle_point(config: &StakingConfig, ledger: u32) -> u32 {
    ledger.clamp(config.start_ledger, config.end_ledger)
}

/// Project `pool` forward to `ledger` without touching storage.
///
/// ```text
/// up_to   = clamp(ledger, start, end)
/// reward  = (up_to − last) × rate × weight / total_weight
/// acc    += reward × PRECISION / total_staked
/// ```
///
/// Before the window opens, or when the pool is already settled at or past
/// `up_to`, the pool is returned unchanged. An empty pool only moves its
/// checkpoint: the reward of that slice is never emitted.
pub fn project(pool: &Pool, config: &StakingConfig, ledger: u32) -> Result<Accrual, ContractError> {
    let unchanged = Accrual {
        pool: pool.clone(),
        reward: 0,
    };
    if ledger < config.start_ledger {
        return Ok(unchanged);
    }
    let up_to = settle_point(config, ledger);
    if up_to <= pool.last_accrual_ledger {
        return Ok(unchanged);
    }

    let mut next = pool.clone();
    next.last_accrual_ledger = up_to;
    if pool.total_staked == 0 {
        return Ok(Accrual {
            pool: next,
            reward: 0,
        });
    }

    let emitted = math::emission(
        pool.last_accrual_ledger,
        up_to,
        config.reward_per_ledger,
    )?;
    let reward = math::pool_share(emitted, pool.weight, config.total_weight)?;
    let increment = math::acc_increment(reward, pool.total_staked)?;
    next.acc_reward_per_share = math::safe_add(pool.acc_reward_per_share, increment)?;

    Ok(Accrual { pool: next, reward })
}

/// Settle pool `id` up to the current ledger and persist it.
///
/// Idempotent within a ledger: a second call finds the pool already at
/// `up_to` and writes nothing.
pub fn settle(env: &Env, config: &StakingConfig, id: u32) -> Result<Pool, ContractError> {
    let current = pool::load(env, id)?;
    settle_from(env, config, &current)
}

/// [`settle`] for a pool the caller has already loaded.
pub fn settle_from(env: &Env, config: &StakingConfig, current: &Pool) -> Result<Pool, ContractError> {
    let accrual = project(current, config, env.ledger().sequence())?;
    if accrual.pool != *current {
        pool::save(env, &accrual.pool);
    }
    Ok(accrual.pool)
}

/// Settle every registered pool. Used before any change that alters how
/// future emission is split (weights, rate, window) so past accrual keeps
/// the old terms.
pub fn settle_all(env: &Env, config: &StakingConfig) -> Result<(), ContractError> {
    for id in 0..pool::count(env) {
        settle(env, config, id)?;
    }
    Ok(())
}
