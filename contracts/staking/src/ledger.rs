use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{
    config::{TTL_EXTEND_TO, TTL_THRESHOLD},
    errors::ContractError,
    math,
};

const USER_STAKE: Symbol = symbol_short!("USR_STK");

/// A user's position in one pool.
///
/// Created on first deposit and kept at zero `amount` afterwards so the
/// reward checkpoint and any unclaimed `pending_reward` survive a full
/// unstake.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserStake {
    /// Live stake, excluding amounts already queued for withdrawal.
    pub amount: i128,
    /// `amount × acc_reward_per_share / PRECISION` at the last checkpoint.
    pub reward_debt: i128,
    /// Reward settled but not yet paid out.
    pub pending_reward: i128,
}

impl UserStake {
    /// Move everything accrued since the last checkpoint into
    /// `pending_reward`. Must run with the pre-mutation `amount`.
    pub fn checkpoint(&mut self, acc_reward_per_share: i128) -> Result<i128, ContractError> {
        let fresh = math::accrued_since(self.amount, acc_reward_per_share, self.reward_debt)?;
        self.pending_reward = math::safe_add(self.pending_reward, fresh)?;
        self.reward_debt = math::accrued(self.amount, acc_reward_per_share)?;
        Ok(fresh)
    }

    /// Change the live amount by `delta` and re-anchor `reward_debt` so the
    /// new amount only earns from `acc_reward_per_share` onwards.
    pub fn rebase(&mut self, delta: i128, acc_reward_per_share: i128) -> Result<(), ContractError> {
        let amount = math::safe_add(self.amount, delta)?;
        if amount < 0 {
            return Err(ContractError::InsufficientStake);
        }
        self.amount = amount;
        self.reward_debt = math::accrued(amount, acc_reward_per_share)?;
        Ok(())
    }

    /// Total claimable reward if the pool accumulator stood at
    /// `acc_reward_per_share`.
    pub fn claimable(&self, acc_reward_per_share: i128) -> Result<i128, ContractError> {
        let fresh = math::accrued_since(self.amount, acc_reward_per_share, self.reward_debt)?;
        math::safe_add(self.pending_reward, fresh)
    }
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn user_key(pool_id: u32, user: &Address) -> (Symbol, u32, Address) {
    (USER_STAKE, pool_id, user.clone())
}

/// Load a user's stake, defaulting to an empty position.
pub fn load(env: &Env, pool_id: u32, user: &Address) -> UserStake {
    env.storage()
        .persistent()
        .get(&user_key(pool_id, user))
        .unwrap_or_default()
}

pub fn save(env: &Env, pool_id: u32, user: &Address, stake: &UserStake) {
    let key = user_key(pool_id, user);
    env.storage().persistent().set(&key, stake);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
