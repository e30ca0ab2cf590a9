//! Contract-level reentrancy flag. The Soroban host already refuses to
//! re-enter a contract that is on the call stack; this flag is kept in
//! addition to that check, not in place of it.

use soroban_sdk::{symbol_short, Env, Symbol};

use crate::errors::ContractError;

const ENTERED: Symbol = symbol_short!("ENTERED");

/// Mark the contract as executing a user-facing mutation.
///
/// The flag lives in temporary storage and is cleared by [`exit`]; a failed
/// invocation is rolled back by the host, which clears it as well.
pub fn enter(env: &Env) -> Result<(), ContractError> {
    if env.storage().temporary().get(&ENTERED).unwrap_or(false) {
        return Err(ContractError::Reentrancy);
    }
    env.storage().temporary().set(&ENTERED, &true);
    Ok(())
}

pub fn exit(env: &Env) {
    env.storage().temporary().remove(&ENTERED);
}

/// Run `op` with the guard held.
pub fn non_reentrant<T>(
    env: &Env,
    op: impl FnOnce() -> Result<T, ContractError>,
) -> Result<T, ContractError> {
    enter(env)?;
    let result = op();
    exit(env);
    result
}
