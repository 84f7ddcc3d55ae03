//! Headroom arithmetic over the running principal totals.
//!
//! Nothing here enforces limits; `stake` compares against these values.

use soroban_sdk::{symbol_short, Env, Symbol};

use crate::config::PoolConfig;

const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");

/// Aggregate principal across every open position.
pub fn total_staked(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
}

pub(crate) fn set_total_staked(env: &Env, total: i128) {
    env.storage().instance().set(&TOTAL_STAKED, &total);
}

/// Principal the pool can still accept, never negative.
pub fn remaining_pool_capacity(config: &PoolConfig, total_staked: i128) -> i128 {
    headroom(config.pool_capacity, total_staked)
}

/// Principal a user holding `principal` can still add, never negative.
pub fn remaining_user_capacity(config: &PoolConfig, principal: i128) -> i128 {
    headroom(config.max_principal_per_user, principal)
}

fn headroom(limit: i128, used: i128) -> i128 {
    limit.saturating_sub(used).max(0)
}
