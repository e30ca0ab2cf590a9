use crate::errors::ContractError;

/// Fixed-point scaling factor for reward-per-share values.
///
/// Every `acc_reward_per_share` is stored multiplied by this constant so the
/// fractional reward per unit of stake survives integer division even when a
/// pool's stake dwarfs the per-ledger emission.
pub const PRECISION: i128 = 1_000_000_000_000;

pub fn safe_add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::ArithmeticOverflow)
}

pub fn safe_sub(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_sub(b).ok_or(ContractError::ArithmeticOverflow)
}

pub fn safe_mul(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_mul(b).ok_or(ContractError::ArithmeticOverflow)
}

/// `a * b / denominator`, multiplying first and truncating the quotient.
///
/// All inputs are non-negative, so truncation is a floor: residual dust
/// stays with the pool instead of the user.
pub fn mul_div_floor(a: i128, b: i128, denominator: i128) -> Result<i128, ContractError> {
    if denominator <= 0 {
        return Err(ContractError::ArithmeticOverflow);
    }
    Ok(safe_mul(a, b)? / denominator)
}

/// Total emission for the ledgers in `[from, to)` at `rate` per ledger.
///
/// ```text
/// emission = (to − from) × rate
/// ```
pub fn emission(from: u32, to: u32, rate: i128) -> Result<i128, ContractError> {
    if to <= from {
        return Ok(0);
    }
    safe_mul(i128::from(to - from), rate)
}

/// A pool's slice of `emission` according to its weight.
///
/// A registry with zero total weight emits nothing.
pub fn pool_share(emission: i128, weight: u64, total_weight: u64) -> Result<i128, ContractError> {
    if total_weight == 0 || weight == 0 {
        return Ok(0);
    }
    mul_div_floor(emission, i128::from(weight), i128::from(total_weight))
}

/// Increase of `acc_reward_per_share` when `reward` is spread over
/// `total_staked` units.
///
/// ```text
/// Δacc = reward × PRECISION / total_staked
/// ```
pub fn acc_increment(reward: i128, total_staked: i128) -> Result<i128, ContractError> {
    if total_staked <= 0 {
        return Ok(0);
    }
    mul_div_floor(reward, PRECISION, total_staked)
}

/// Reward owed to `amount` units at accumulator value `acc`, unscaled.
pub fn accrued(amount: i128, acc_reward_per_share: i128) -> Result<i128, ContractError> {
    mul_div_floor(amount, acc_reward_per_share, PRECISION)
}

/// Reward accrued since the checkpoint `reward_debt` was taken.
///
/// ```text
/// new = amount × acc / PRECISION − reward_debt
/// ```
///
/// The checkpoint is always taken with the same `amount` and a smaller or
/// equal `acc`, so the result is never negative for consistent state.
pub fn accrued_since(
    amount: i128,
    acc_reward_per_share: i128,
    reward_debt: i128,
) -> Result<i128, ContractError> {
    let total = accrued(amount, acc_reward_per_share)?;
    let fresh = safe_sub(total, reward_debt)?;
    if fresh < 0 {
        return Err(ContractError::ArithmeticOverflow);
    }
    Ok(fresh)
}
