use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::{
    config::{TTL_EXTEND_TO, TTL_THRESHOLD},
    errors::ContractError,
    math,
};

const WD_QUEUE: Symbol = symbol_short!("WD_QUEUE");

/// Upper bound on outstanding requests per (pool, user).
pub const MAX_WITHDRAW_REQUESTS: u32 = 100;

// ── Types ───────────────────────────────────────────────────────────────────

/// Principal waiting out a pool's unlock delay.
///
/// A request is paid in full exactly once, by the first `withdraw` at or
/// after `unlock_at`; it is never split.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawRequest {
    pub amount: i128,
    /// Ledger at or after which the request may be withdrawn.
    pub unlock_at: u32,
}

impl WithdrawRequest {
    pub fn is_matured(&self, ledger: u32) -> bool {
        self.unlock_at <= ledger
    }
}

/// `(total_requested, currently_withdrawable)` for one queue.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WithdrawSummary {
    pub requested: i128,
    pub withdrawable: i128,
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn queue_key(pool_id: u32, user: &Address) -> (Symbol, u32, Address) {
    (WD_QUEUE, pool_id, user.clone())
}

pub fn load(env: &Env, pool_id: u32, user: &Address) -> Vec<WithdrawRequest> {
    env.storage()
        .persistent()
        .get(&queue_key(pool_id, user))
        .unwrap_or(Vec::new(env))
}

/// Persist `queue`, dropping the entry entirely once it is empty.
pub fn save(env: &Env, pool_id: u32, user: &Address, queue: &Vec<WithdrawRequest>) {
    let key = queue_key(pool_id, user);
    if queue.is_empty() {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, queue);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Queue logic ─────────────────────────────────────────────────────────────

/// Append a request maturing `unlock_delay` ledgers after `now`.
pub fn enqueue(
    queue: &mut Vec<WithdrawRequest>,
    amount: i128,
    now: u32,
    unlock_delay: u32,
) -> Result<WithdrawRequest, ContractError> {
    if queue.len() >= MAX_WITHDRAW_REQUESTS {
        return Err(ContractError::QueueFull);
    }
    let unlock_at = now
        .checked_add(unlock_delay)
        .ok_or(ContractError::ArithmeticOverflow)?;
    let request = WithdrawRequest { amount, unlock_at };
    queue.push_back(request.clone());
    Ok(request)
}

/// Split `queue` into the requests still locked at `ledger` and the summed
/// amount of those that have matured. Matured requests may sit anywhere in
/// the queue since the unlock delay can change between requests.
pub fn take_matured(
    env: &Env,
    queue: &Vec<WithdrawRequest>,
    ledger: u32,
) -> Result<(Vec<WithdrawRequest>, i128), ContractError> {
    let mut remaining = Vec::new(env);
    let mut matured = 0i128;
    for request in queue.iter() {
        if request.is_matured(ledger) {
            matured = math::safe_add(matured, request.amount)?;
        } else {
            remaining.push_back(request);
        }
    }
    Ok((remaining, matured))
}

/// Totals over `queue` at `ledger` without modifying it.
pub fn summarize(queue: &Vec<WithdrawRequest>, ledger: u32) -> Result<WithdrawSummary, ContractError> {
    let mut summary = WithdrawSummary::default();
    for request in queue.iter() {
        summary.requested = math::safe_add(summary.requested, request.amount)?;
        if request.is_matured(ledger) {
            summary.withdrawable = math::safe_add(summary.withdrawable, request.amount)?;
        }
    }
    Ok(summary)
}
