#![no_std]

pub mod accrual;
pub mod config;
pub mod errors;
pub mod events;
pub mod guard;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod queue;

use soroban_sdk::{contract, contractimpl, token, Address, Env, Vec};

pub use config::{PauseGate, StakingConfig};
pub use errors::{ContractError, ErrorCategory};
pub use ledger::UserStake;
pub use pool::{Pool, StakeAsset, NATIVE_POOL_ID};
pub use queue::{WithdrawRequest, MAX_WITHDRAW_REQUESTS};

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct MultiPoolStaking;

#[contractimpl]
impl MultiPoolStaking {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `native_asset`      – asset contract of the native value asset (pool 0).
    /// * `reward_asset`      – asset contract paid out by `claim`.
    /// * `start_ledger`      – first ledger of the emission window.
    /// * `end_ledger`        – ledger at which emission stops (`> start_ledger`).
    /// * `reward_per_ledger` – reward emitted per ledger across all pools.
    pub fn initialize(
        env: Env,
        admin: Address,
        native_asset: Address,
        reward_asset: Address,
        start_ledger: u32,
        end_ledger: u32,
        reward_per_ledger: i128,
    ) -> Result<(), ContractError> {
        if config::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if start_ledger >= end_ledger || reward_per_ledger < 0 {
            return Err(ContractError::InvalidInput);
        }
        if native_asset == reward_asset {
            return Err(ContractError::TokensIdentical);
        }

        config::save(
            &env,
            &StakingConfig {
                admin: admin.clone(),
                native_asset,
                reward_asset: reward_asset.clone(),
                start_ledger,
                end_ledger,
                reward_per_ledger,
                total_weight: 0,
            },
        );

        events::publish_initialized(
            &env,
            admin,
            reward_asset,
            start_ledger,
            end_ledger,
            reward_per_ledger,
        );

        Ok(())
    }

    // ── Deposits ────────────────────────────────────────────────────────────

    /// Stake `amount` of the native asset into pool 0.
    pub fn deposit_native(env: Env, user: Address, amount: i128) -> Result<(), ContractError> {
        user.require_auth();
        guard::non_reentrant(&env, || {
            Self::deposit_into(&env, &user, NATIVE_POOL_ID, amount)
        })
    }

    /// Stake `amount` of a token pool's asset. The native pool only accepts
    /// `deposit_native`.
    pub fn deposit(
        env: Env,
        user: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        user.require_auth();
        if pool_id == NATIVE_POOL_ID {
            return Err(ContractError::NativePoolMisuse);
        }
        guard::non_reentrant(&env, || Self::deposit_into(&env, &user, pool_id, amount))
    }

    // ── Unstaking ───────────────────────────────────────────────────────────

    /// Move `amount` from live stake into the withdrawal queue.
    ///
    /// The amount stops earning immediately and becomes withdrawable
    /// `unlock_delay` ledgers from now.
    pub fn unstake(
        env: Env,
        user: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<WithdrawRequest, ContractError> {
        user.require_auth();
        guard::non_reentrant(&env, || {
            let config = config::load(&env)?;
            config::require_not_paused(&env, &PauseGate::Withdraw)?;
            if amount <= 0 {
                return Err(ContractError::InvalidInput);
            }

            let current = pool::load(&env, pool_id)?;
            let mut stake = ledger::load(&env, pool_id, &user);
            if amount > stake.amount {
                return Err(ContractError::InsufficientStake);
            }

            // 1. Settle pool, then the user against the pre-unstake amount.
            let mut pool = accrual::settle_from(&env, &config, &current)?;
            stake.checkpoint(pool.acc_reward_per_share)?;

            // 2. Shrink live stake.
            stake.rebase(-amount, pool.acc_reward_per_share)?;
            pool.total_staked = math::safe_sub(pool.total_staked, amount)?;

            // 3. Queue the principal behind the unlock delay.
            let mut queue = queue::load(&env, pool_id, &user);
            let request = queue::enqueue(
                &mut queue,
                amount,
                env.ledger().sequence(),
                pool.unlock_delay,
            )?;

            pool::save(&env, &pool);
            ledger::save(&env, pool_id, &user, &stake);
            queue::save(&env, pool_id, &user, &queue);

            events::publish_unstaked(&env, user.clone(), pool_id, amount, request.unlock_at);

            Ok(request)
        })
    }

    /// Pay out every matured withdrawal request of `user` in `pool_id`.
    pub fn withdraw(env: Env, user: Address, pool_id: u32) -> Result<i128, ContractError> {
        user.require_auth();
        guard::non_reentrant(&env, || {
            let config = config::load(&env)?;
            config::require_not_paused(&env, &PauseGate::Withdraw)?;
            let pool = pool::load(&env, pool_id)?;

            let queue = queue::load(&env, pool_id, &user);
            let (remaining, matured) =
                queue::take_matured(&env, &queue, env.ledger().sequence())?;
            if matured == 0 {
                return Err(ContractError::NothingToWithdraw);
            }

            // Queue is final before the asset leaves custody.
            queue::save(&env, pool_id, &user, &remaining);

            token::Client::new(&env, &pool.asset_address(&config)).transfer(
                &env.current_contract_address(),
                &user,
                &matured,
            );

            events::publish_withdrawn(&env, user.clone(), pool_id, matured);

            Ok(matured)
        })
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out everything `user` has earned in `pool_id`.
    ///
    /// Returns the amount transferred; nothing is transferred when nothing
    /// is owed. Fails with `InsufficientRewardFunds` when the contract holds
    /// less reward than owed.
    pub fn claim(env: Env, user: Address, pool_id: u32) -> Result<i128, ContractError> {
        user.require_auth();
        guard::non_reentrant(&env, || {
            let config = config::load(&env)?;
            config::require_not_paused(&env, &PauseGate::Claim)?;

            let current = pool::load(&env, pool_id)?;
            let pool = accrual::settle_from(&env, &config, &current)?;
            let mut stake = ledger::load(&env, pool_id, &user);
            stake.checkpoint(pool.acc_reward_per_share)?;

            let reward = stake.pending_reward;
            let reward_token = token::Client::new(&env, &config.reward_asset);
            if reward > 0 && reward_token.balance(&env.current_contract_address()) < reward {
                return Err(ContractError::InsufficientRewardFunds);
            }

            stake.pending_reward = 0;
            ledger::save(&env, pool_id, &user, &stake);

            if reward > 0 {
                reward_token.transfer(&env.current_contract_address(), &user, &reward);
                events::publish_claimed(&env, user.clone(), pool_id, reward);
            }

            Ok(reward)
        })
    }

    // ── Settlement ──────────────────────────────────────────────────────────

    /// Bring `pool_id`'s accumulator up to the current ledger. Anyone may
    /// call this; it never changes what any user is owed.
    pub fn settle_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        let config = config::load(&env)?;
        accrual::settle(&env, &config, pool_id)
    }

    /// Settle every pool up to the current ledger.
    pub fn settle_all_pools(env: Env) -> Result<(), ContractError> {
        let config = config::load(&env)?;
        accrual::settle_all(&env, &config)
    }

    // ── Pool registry (admin) ───────────────────────────────────────────────

    /// Register a new pool and return its id.
    ///
    /// The first pool must be the native pool. With `with_update`, every
    /// existing pool is settled under the old total weight first.
    pub fn add_pool(
        env: Env,
        caller: Address,
        asset: StakeAsset,
        weight: u64,
        min_deposit: i128,
        unlock_delay: u32,
        with_update: bool,
    ) -> Result<u32, ContractError> {
        let mut config = Self::require_admin(&env, &caller)?;

        let now = env.ledger().sequence();
        if now >= config.end_ledger {
            return Err(ContractError::EmissionEnded);
        }
        if min_deposit < 0 || unlock_delay == 0 {
            return Err(ContractError::InvalidInput);
        }
        let first = pool::count(&env) == 0;
        match &asset {
            StakeAsset::Native if !first => return Err(ContractError::NativePoolMisuse),
            StakeAsset::Token(_) if first => return Err(ContractError::NativePoolRequired),
            StakeAsset::Token(token) if *token == config.native_asset => {
                return Err(ContractError::NativePoolMisuse)
            }
            StakeAsset::Token(token)
                if *token == config.reward_asset || pool::uses_asset(&env, &config, token) =>
            {
                return Err(ContractError::TokensIdentical)
            }
            _ => {}
        }

        if with_update {
            accrual::settle_all(&env, &config)?;
        }

        config.total_weight = config
            .total_weight
            .checked_add(weight)
            .ok_or(ContractError::ArithmeticOverflow)?;

        let pool_id = pool::push(
            &env,
            Pool {
                id: 0,
                asset: asset.clone(),
                weight,
                min_deposit,
                unlock_delay,
                total_staked: 0,
                acc_reward_per_share: 0,
                last_accrual_ledger: now.max(config.start_ledger),
            },
        );
        config::save(&env, &config);

        events::publish_pool_added(&env, pool_id, asset, weight, min_deposit, unlock_delay);

        Ok(pool_id)
    }

    /// Change a pool's weight. The pool itself is always settled under the
    /// old weight; `with_update` settles every other pool too.
    pub fn set_pool_weight(
        env: Env,
        caller: Address,
        pool_id: u32,
        weight: u64,
        with_update: bool,
    ) -> Result<(), ContractError> {
        let mut config = Self::require_admin(&env, &caller)?;
        pool::load(&env, pool_id)?;

        if with_update {
            accrual::settle_all(&env, &config)?;
        }
        let mut pool = accrual::settle(&env, &config, pool_id)?;

        config.total_weight = config
            .total_weight
            .checked_sub(pool.weight)
            .and_then(|rest| rest.checked_add(weight))
            .ok_or(ContractError::ArithmeticOverflow)?;
        pool.weight = weight;

        pool::save(&env, &pool);
        config::save(&env, &config);

        events::publish_pool_weight_set(&env, pool_id, weight, config.total_weight);

        Ok(())
    }

    /// Change a pool's minimum deposit and unlock delay. Requests already in
    /// a queue keep the `unlock_at` they were created with.
    pub fn update_pool(
        env: Env,
        caller: Address,
        pool_id: u32,
        min_deposit: i128,
        unlock_delay: u32,
    ) -> Result<(), ContractError> {
        let config = Self::require_admin(&env, &caller)?;
        if min_deposit < 0 || unlock_delay == 0 {
            return Err(ContractError::InvalidInput);
        }

        let mut pool = accrual::settle(&env, &config, pool_id)?;
        pool.min_deposit = min_deposit;
        pool.unlock_delay = unlock_delay;
        pool::save(&env, &pool);

        events::publish_pool_updated(&env, pool_id, min_deposit, unlock_delay);

        Ok(())
    }

    // ── Emission parameters (admin) ─────────────────────────────────────────

    /// Switch the asset paid out by `claim`. The new asset may not be one
    /// that any pool stakes.
    pub fn set_reward_asset(
        env: Env,
        caller: Address,
        reward_asset: Address,
    ) -> Result<(), ContractError> {
        let mut config = Self::require_admin(&env, &caller)?;
        if reward_asset == config.native_asset || pool::uses_asset(&env, &config, &reward_asset) {
            return Err(ContractError::TokensIdentical);
        }

        config.reward_asset = reward_asset.clone();
        config::save(&env, &config);

        events::publish_reward_asset_set(&env, reward_asset);

        Ok(())
    }

    /// Update the per-ledger emission.
    ///
    /// All pools are settled at the old rate before the rate changes, so no
    /// staker gains or loses reward retroactively.
    pub fn set_reward_per_ledger(
        env: Env,
        caller: Address,
        reward_per_ledger: i128,
    ) -> Result<(), ContractError> {
        let mut config = Self::require_admin(&env, &caller)?;
        if reward_per_ledger < 0 {
            return Err(ContractError::InvalidInput);
        }

        accrual::settle_all(&env, &config)?;

        config.reward_per_ledger = reward_per_ledger;
        config::save(&env, &config);

        events::publish_reward_rate_set(&env, reward_per_ledger);

        Ok(())
    }

    /// Move the start of the emission window.
    pub fn set_start_ledger(
        env: Env,
        caller: Address,
        start_ledger: u32,
    ) -> Result<(), ContractError> {
        let config = Self::require_admin(&env, &caller)?;
        let end_ledger = config.end_ledger;
        Self::apply_window(&env, config, start_ledger, end_ledger)
    }

    /// Move the end of the emission window.
    pub fn set_end_ledger(env: Env, caller: Address, end_ledger: u32) -> Result<(), ContractError> {
        let config = Self::require_admin(&env, &caller)?;
        let start_ledger = config.start_ledger;
        Self::apply_window(&env, config, start_ledger, end_ledger)
    }

    // ── Pause gates (admin) ─────────────────────────────────────────────────

    pub fn pause_withdraw(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::set_gate(&env, &caller, PauseGate::Withdraw, true)
    }

    pub fn unpause_withdraw(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::set_gate(&env, &caller, PauseGate::Withdraw, false)
    }

    pub fn pause_claim(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::set_gate(&env, &caller, PauseGate::Claim, true)
    }

    pub fn unpause_claim(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::set_gate(&env, &caller, PauseGate::Claim, false)
    }

    /// Emergency stop for every user operation.
    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::set_gate(&env, &caller, PauseGate::Global, true)
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::set_gate(&env, &caller, PauseGate::Global, false)
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new admin address. Only the current admin can call this.
    /// The new admin must call `accept_admin` to complete the transfer.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_admin(&env, &current_admin)?;

        config::set_pending_admin(&env, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept the pending admin transfer. Only the proposed new admin can call this.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        let mut config = config::load(&env)?;
        new_admin.require_auth();

        let pending = config::pending_admin(&env).ok_or(ContractError::InvalidInput)?;
        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_admin = config.admin.clone();
        config.admin = new_admin.clone();
        config::save(&env, &config);
        config::clear_pending_admin(&env);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    /// Cancel a pending admin transfer. Only the current admin can call this.
    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        Self::require_admin(&env, &current_admin)?;

        let pending = config::pending_admin(&env).ok_or(ContractError::InvalidInput)?;
        config::clear_pending_admin(&env);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);

        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        config::pending_admin(&env)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn is_initialized(env: Env) -> bool {
        config::is_initialized(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        Ok(config::load(&env)?.admin)
    }

    pub fn get_config(env: Env) -> Result<StakingConfig, ContractError> {
        config::load(&env)
    }

    pub fn pool_count(env: Env) -> u32 {
        pool::count(&env)
    }

    /// Stored snapshot of a pool, as of its last settlement.
    pub fn get_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        pool::load(&env, pool_id)
    }

    /// Live stake of `user` in `pool_id`.
    pub fn staking_balance(env: Env, pool_id: u32, user: Address) -> Result<i128, ContractError> {
        pool::load(&env, pool_id)?;
        Ok(ledger::load(&env, pool_id, &user).amount)
    }

    pub fn get_user_stake(
        env: Env,
        pool_id: u32,
        user: Address,
    ) -> Result<UserStake, ContractError> {
        pool::load(&env, pool_id)?;
        Ok(ledger::load(&env, pool_id, &user))
    }

    /// Reward `user` could claim from `pool_id` right now.
    pub fn pending_reward(env: Env, pool_id: u32, user: Address) -> Result<i128, ContractError> {
        let ledger = env.ledger().sequence();
        Self::pending_reward_at(env, pool_id, user, ledger)
    }

    /// Reward `user` would be able to claim at `ledger` if nothing else
    /// touched the pool until then.
    pub fn pending_reward_at(
        env: Env,
        pool_id: u32,
        user: Address,
        ledger: u32,
    ) -> Result<i128, ContractError> {
        let config = config::load(&env)?;
        let pool = pool::load(&env, pool_id)?;
        let projected = accrual::project(&pool, &config, ledger)?;
        ledger::load(&env, pool_id, &user).claimable(projected.pool.acc_reward_per_share)
    }

    /// `(total_requested, currently_withdrawable)` for `user` in `pool_id`.
    pub fn withdraw_amount(
        env: Env,
        pool_id: u32,
        user: Address,
    ) -> Result<(i128, i128), ContractError> {
        pool::load(&env, pool_id)?;
        let queue = queue::load(&env, pool_id, &user);
        let summary = queue::summarize(&queue, env.ledger().sequence())?;
        Ok((summary.requested, summary.withdrawable))
    }

    pub fn get_withdraw_requests(
        env: Env,
        pool_id: u32,
        user: Address,
    ) -> Result<Vec<WithdrawRequest>, ContractError> {
        pool::load(&env, pool_id)?;
        Ok(queue::load(&env, pool_id, &user))
    }

    /// Total emission across all pools for ledgers `[from, to)`, clamped to
    /// the emission window.
    pub fn emission_between(env: Env, from: u32, to: u32) -> Result<i128, ContractError> {
        let config = config::load(&env)?;
        if from > to {
            return Err(ContractError::InvalidInput);
        }
        math::emission(
            from.max(config.start_ledger),
            to.min(config.end_ledger),
            config.reward_per_ledger,
        )
    }

    pub fn withdraw_paused(env: Env) -> bool {
        config::is_paused(&env, &PauseGate::Withdraw)
    }

    pub fn claim_paused(env: Env) -> bool {
        config::is_paused(&env, &PauseGate::Claim)
    }

    pub fn is_paused(env: Env) -> bool {
        config::is_paused(&env, &PauseGate::Global)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: caller authenticated and equal to the stored admin. Returns the
    /// loaded config for the caller to mutate.
    fn require_admin(env: &Env, caller: &Address) -> Result<StakingConfig, ContractError> {
        let config = config::load(env)?;
        caller.require_auth();
        if *caller != config.admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(config)
    }

    fn set_gate(
        env: &Env,
        caller: &Address,
        gate: PauseGate,
        paused: bool,
    ) -> Result<(), ContractError> {
        Self::require_admin(env, caller)?;
        config::set_paused(env, &gate, paused)?;
        events::publish_pause_set(env, gate, paused);
        Ok(())
    }

    /// Shared body of deposit and native deposit.
    fn deposit_into(
        env: &Env,
        user: &Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        let config = config::load(env)?;
        config::require_not_paused(env, &PauseGate::Global)?;
        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }

        let current = pool::load(env, pool_id)?;
        if amount < current.min_deposit {
            return Err(ContractError::BelowMinDeposit);
        }
        let asset = token::Client::new(env, &current.asset_address(&config));
        if asset.balance(user) < amount {
            return Err(ContractError::InsufficientBalance);
        }

        // 1. Settle pool, then the user against the pre-deposit amount.
        let mut pool = accrual::settle_from(env, &config, &current)?;
        let mut stake = ledger::load(env, pool_id, user);
        stake.checkpoint(pool.acc_reward_per_share)?;

        // 2. Grow live stake and re-anchor the checkpoint.
        stake.rebase(amount, pool.acc_reward_per_share)?;
        pool.total_staked = math::safe_add(pool.total_staked, amount)?;

        pool::save(env, &pool);
        ledger::save(env, pool_id, user, &stake);

        // 3. Pull the asset into custody.
        asset.transfer(user, &env.current_contract_address(), &amount);

        events::publish_deposited(env, user.clone(), pool_id, amount, pool.total_staked);

        Ok(())
    }

    /// Settle every pool under the current window, then install
    /// `[start_ledger, end_ledger)` and move every checkpoint to at least
    /// the current ledger and the new start, so the new window only applies
    /// from now on.
    fn apply_window(
        env: &Env,
        mut config: StakingConfig,
        start_ledger: u32,
        end_ledger: u32,
    ) -> Result<(), ContractError> {
        if start_ledger >= end_ledger {
            return Err(ContractError::InvalidInput);
        }

        let now = env.ledger().sequence();
        let started = now >= config.start_ledger;
        accrual::settle_all(env, &config)?;

        config.start_ledger = start_ledger;
        config.end_ledger = end_ledger;

        for id in 0..pool::count(env) {
            let mut pool = pool::load(env, id)?;
            // Ledgers already behind `now` keep the accrual they had.
            let anchor = if started {
                pool.last_accrual_ledger.max(now).max(start_ledger)
            } else {
                now.max(start_ledger)
            };
            if anchor != pool.last_accrual_ledger {
                pool.last_accrual_ledger = anchor;
                pool::save(env, &pool);
            }
        }
        config::save(env, &config);

        events::publish_window_set(env, start_ledger, end_ledger);

        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod testutils;



#[cfg(test)]
mod test_pause;
