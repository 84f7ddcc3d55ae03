#![allow(deprecated)]

use common::admin_tiers::AdminTier;
use soroban_sdk::{symbol_short, Address, Env};

use crate::config::{LockPolicy, PoolParams};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub asset: Address,
    pub whitelist: Address,
    pub params: PoolParams,
    pub lock_policy: LockPolicy,
    pub pool_reward_end_block: u32,
    pub ledger: u32,
}

/// Fired when a user opens or tops up a position.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub user: Address,
    pub amount: i128,
    pub position_amount: i128,
    pub banked_reward: i128,
    pub new_total_staked: i128,
    pub ledger: u32,
}

/// Fired when a position is unwound and paid out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub user: Address,
    pub principal: i128,
    pub reward: i128,
    pub new_total_staked: i128,
    pub ledger: u32,
}

/// Fired when an admin replaces the pool parameters.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolUpdatedEvent {
    pub caller: Address,
    pub params: PoolParams,
    pub pool_reward_end_block: u32,
    pub ledger: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistToggledEvent {
    pub caller: Address,
    pub enabled: bool,
    pub ledger: u32,
}

/// Fired when tokens are added to the reward reserve.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReserveFundedEvent {
    pub funder: Address,
    pub amount: i128,
    pub ledger: u32,
}

/// Fired when an admin tier is granted or revoked. `tier` is
/// [`AdminTier::rank`], or 0 on revocation.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTierChangedEvent {
    pub caller: Address,
    pub target: Address,
    pub tier: u32,
    pub ledger: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    asset: Address,
    whitelist: Address,
    params: PoolParams,
    lock_policy: LockPolicy,
    pool_reward_end_block: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            asset,
            whitelist,
            params,
            lock_policy,
            pool_reward_end_block,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    user: Address,
    amount: i128,
    position_amount: i128,
    banked_reward: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), user.clone()),
        StakedEvent {
            user,
            amount,
            position_amount,
            banked_reward,
            new_total_staked,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_unstaked(
    env: &Env,
    user: Address,
    principal: i128,
    reward: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), user.clone()),
        UnstakedEvent {
            user,
            principal,
            reward,
            new_total_staked,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_updated(
    env: &Env,
    caller: Address,
    params: PoolParams,
    pool_reward_end_block: u32,
) {
    env.events().publish(
        (symbol_short!("POOL_UPD"), caller.clone()),
        PoolUpdatedEvent {
            caller,
            params,
            pool_reward_end_block,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_whitelist_toggled(env: &Env, caller: Address, enabled: bool) {
    env.events().publish(
        (symbol_short!("WL_TOGGLE"), caller.clone()),
        WhitelistToggledEvent {
            caller,
            enabled,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_reserve_funded(env: &Env, funder: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("FUNDED"), funder.clone()),
        ReserveFundedEvent {
            funder,
            amount,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_admin_promoted(env: &Env, caller: Address, target: Address, tier: AdminTier) {
    env.events().publish(
        (symbol_short!("ADM_PROM"), target.clone()),
        AdminTierChangedEvent {
            caller,
            target,
            tier: tier.rank(),
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_admin_demoted(env: &Env, caller: Address, target: Address) {
    env.events().publish(
        (symbol_short!("ADM_DEM"), target.clone()),
        AdminTierChangedEvent {
            caller,
            target,
            tier: 0,
            ledger: env.ledger().sequence(),
        },
    );
}
