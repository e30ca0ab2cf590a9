extern crate std;

use crate::{
    testutils::{setup, TOKEN_POOL},
    ContractError, NATIVE_POOL_ID,
};

// ── Withdraw gate ─────────────────────────────────────────────────────────────

#[test]
fn test_withdraw_pause_blocks_unstake_and_withdraw() {
    let s = setup();
    let alice = s.funded_user(100);
    s.client.deposit_native(&alice, &100);

    s.set_ledger(200);
    s.client.unstake(&alice, &NATIVE_POOL_ID, &40);

    s.client.pause_withdraw(&s.admin);
    assert!(s.client.withdraw_paused());

    s.set_ledger(210);
    assert_eq!(
        s.client.try_withdraw(&alice, &NATIVE_POOL_ID),
        Err(Ok(ContractError::WithdrawPaused))
    );
    assert_eq!(
        s.client.try_unstake(&alice, &NATIVE_POOL_ID, &10),
        Err(Ok(ContractError::WithdrawPaused))
    );
    assert_eq!(s.client.withdraw_amount(&NATIVE_POOL_ID, &alice), (40, 40));
    assert_eq!(s.client.staking_balance(&NATIVE_POOL_ID, &alice), 60);

    // Deposits and claims are not affected.
    s.mint(&s.native, &alice, 50);
    s.client.deposit_native(&alice, &50);
    assert!(s.client.claim(&alice, &NATIVE_POOL_ID) > 0);

    s.client.unpause_withdraw(&s.admin);
    assert!(!s.client.withdraw_paused());
    assert_eq!(s.client.withdraw(&alice, &NATIVE_POOL_ID), 40);
    assert_eq!(s.client.withdraw_amount(&NATIVE_POOL_ID, &alice), (0, 0));
}

// ── Claim gate ────────────────────────────────────────────────────────────────

#[test]
fn test_claim_pause_blocks_claim_but_not_accrual() {
    let s = setup();
    let alice = s.funded_user(1_000);
    s.client.deposit(&alice, &TOKEN_POOL, &1_000);

    s.client.pause_claim(&s.admin);
    assert!(s.client.claim_paused());

    s.set_ledger(160);
    assert_eq!(
        s.client.try_claim(&alice, &TOKEN_POOL),
        Err(Ok(ContractError::ClaimPaused))
    );
    assert_eq!(s.client.pending_reward(&TOKEN_POOL, &alice), 1_000);

    // Unstaking still works and keeps the earned reward.
    s.client.unstake(&alice, &TOKEN_POOL, &500);
    assert_eq!(s.client.pending_reward(&TOKEN_POOL, &alice), 1_000);

    s.client.unpause_claim(&s.admin);
    assert_eq!(s.client.claim(&alice, &TOKEN_POOL), 1_000);
    assert_eq!(s.balance(&s.reward, &alice), 1_000);
}

// ── Global gate ───────────────────────────────────────────────────────────────

#[test]
fn test_global_pause_blocks_everything() {
    let s = setup();
    let alice = s.funded_user(1_000);
    s.client.deposit_native(&alice, &500);

    s.client.pause(&s.admin);
    assert!(s.client.is_paused());

    s.set_ledger(210);
    assert_eq!(
        s.client.try_deposit_native(&alice, &100),
        Err(Ok(ContractError::Paused))
    );
    assert_eq!(
        s.client.try_deposit(&alice, &TOKEN_POOL, &100),
        Err(Ok(ContractError::Paused))
    );
    assert_eq!(
        s.client.try_unstake(&alice, &NATIVE_POOL_ID, &100),
        Err(Ok(ContractError::Paused))
    );
    assert_eq!(
        s.client.try_withdraw(&alice, &NATIVE_POOL_ID),
        Err(Ok(ContractError::Paused))
    );
    assert_eq!(
        s.client.try_claim(&alice, &NATIVE_POOL_ID),
        Err(Ok(ContractError::Paused))
    );

    s.client.unpause(&s.admin);
    assert!(!s.client.is_paused());
    assert_eq!(s.client.claim(&alice, &NATIVE_POOL_ID), 1_000);
}

#[test]
fn test_pause_toggle_must_change_state() {
    let s = setup();

    assert_eq!(
        s.client.try_unpause_withdraw(&s.admin),
        Err(Ok(ContractError::InvalidInput))
    );
    s.client.pause_claim(&s.admin);
    assert_eq!(
        s.client.try_pause_claim(&s.admin),
        Err(Ok(ContractError::InvalidInput))
    );
    s.client.pause(&s.admin);
    assert_eq!(
        s.client.try_pause(&s.admin),
        Err(Ok(ContractError::InvalidInput))
    );
    assert!(s.client.is_paused());
    assert!(s.client.claim_paused());
    assert!(!s.client.withdraw_paused());
}
