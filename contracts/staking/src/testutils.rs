extern crate std;

use soroban_sdk::{
    contract, contractimpl, symbol_short,
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env, Symbol,
};

use crate::{MultiPoolStaking, MultiPoolStakingClient, StakeAsset};

// ── Defaults shared by the contract tests ────────────────────────────────────

/// Ledger the environment sits at right after [`setup`].
pub const GENESIS: u32 = 100;
pub const START: u32 = 110;
pub const END: u32 = 1_110;
/// With weights 10 and 20 this pays 10 per ledger to pool 0 and 20 to pool 1.
pub const RATE: i128 = 30;

pub const NATIVE_WEIGHT: u64 = 10;
pub const NATIVE_MIN: i128 = 10;
pub const NATIVE_DELAY: u32 = 10;

pub const TOKEN_WEIGHT: u64 = 20;
pub const TOKEN_MIN: i128 = 1;
pub const TOKEN_DELAY: u32 = 20;

pub const TOKEN_POOL: u32 = 1;

pub struct Setup {
    pub env: Env,
    pub client: MultiPoolStakingClient<'static>,
    pub contract: Address,
    pub admin: Address,
    pub native: Address,
    pub stake: Address,
    pub reward: Address,
}

impl Setup {
    pub fn mint(&self, asset: &Address, to: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, asset).mint(to, &amount);
    }

    pub fn balance(&self, asset: &Address, id: &Address) -> i128 {
        TokenClient::new(&self.env, asset).balance(id)
    }

    /// A fresh user holding `amount` of the native and stake assets.
    pub fn funded_user(&self, amount: i128) -> Address {
        let user = Address::generate(&self.env);
        self.mint(&self.native, &user, amount);
        self.mint(&self.stake, &user, amount);
        user
    }

    pub fn set_ledger(&self, sequence: u32) {
        self.env.ledger().set_sequence_number(sequence);
    }
}

fn deploy(env: &Env) -> (MultiPoolStakingClient<'static>, Address) {
    let contract = env.register(MultiPoolStaking, ());
    (MultiPoolStakingClient::new(env, &contract), contract)
}

/// An initialized contract with no pools and no reward funding.
pub fn setup_bare() -> Setup {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(GENESIS);

    let native = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let stake = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let (client, contract) = deploy(&env);
    let admin = Address::generate(&env);
    client.initialize(&admin, &native, &reward, &START, &END, &RATE);

    Setup {
        env,
        client,
        contract,
        admin,
        native,
        stake,
        reward,
    }
}

/// Native pool 0 (weight 10) plus one token pool (weight 20), with
/// `reward_funding` of the reward asset held by the contract.
pub fn setup_with_funding(reward_funding: i128) -> Setup {
    let s = setup_bare();
    s.client.add_pool(
        &s.admin,
        &StakeAsset::Native,
        &NATIVE_WEIGHT,
        &NATIVE_MIN,
        &NATIVE_DELAY,
        &false,
    );
    s.client.add_pool(
        &s.admin,
        &StakeAsset::Token(s.stake.clone()),
        &TOKEN_WEIGHT,
        &TOKEN_MIN,
        &TOKEN_DELAY,
        &false,
    );
    if reward_funding > 0 {
        s.mint(&s.reward, &s.contract, reward_funding);
    }
    s
}

pub fn setup() -> Setup {
    setup_with_funding(1_000_000_000)
}

/// Deploy an uninitialized staking contract into `env`.
pub fn deploy_uninitialized(env: &Env) -> MultiPoolStakingClient<'static> {
    deploy(env).0
}

// ── Freezable token ──────────────────────────────────────────────────────────

const FROZEN: Symbol = symbol_short!("FROZEN");

/// Minimal token whose transfers can be made to fail on demand, used to
/// check that a failed payout leaves staking state untouched.
#[contract]
pub struct FreezableToken;

#[contractimpl]
impl FreezableToken {
    pub fn mint(env: Env, to: Address, amount: i128) {
        let balance = Self::balance(env.clone(), to.clone());
        env.storage().persistent().set(&to, &(balance + amount));
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage().persistent().get(&id).unwrap_or(0)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        if env.storage().instance().get(&FROZEN).unwrap_or(false) {
            panic!("transfers frozen");
        }
        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            panic!("insufficient balance");
        }
        env.storage().persistent().set(&from, &(from_balance - amount));
        let to_balance = Self::balance(env.clone(), to.clone());
        env.storage().persistent().set(&to, &(to_balance + amount));
    }

    pub fn set_frozen(env: Env, frozen: bool) {
        env.storage().instance().set(&FROZEN, &frozen);
    }
}

pub fn register_freezable(env: &Env) -> FreezableTokenClient<'static> {
    let id = env.register(FreezableToken, ());
    FreezableTokenClient::new(env, &id)
}
