use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

const CONFIG: Symbol = symbol_short!("CONFIG");

// ── Types ────────────────────────────────────────────────────────────────────

/// How a position's informational `end_block` is derived on stake.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum LockPolicy {
    /// `current_block + min_lock_blocks`, renewed on every top-up.
    Rolling = 0,
    /// Always the pool reward end block.
    PoolEnd = 1,
}

/// Tunable pool parameters, supplied at initialization and on admin update.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolParams {
    pub pool_capacity: i128,
    pub reward_rate_percent: u32,
    pub min_lock_blocks: u32,
    pub pool_duration_blocks: u32,
    pub max_principal_per_user: i128,
}

impl PoolParams {
    /// Checks the parameter set in isolation. Checks run in a fixed order so
    /// the first violated rule determines the error.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.pool_capacity <= 0 {
            return Err(ContractError::InvalidCapacity);
        }
        if self.reward_rate_percent == 0 || self.reward_rate_percent >= 100 {
            return Err(ContractError::InvalidRate);
        }
        if self.min_lock_blocks == 0 {
            return Err(ContractError::InvalidLockTime);
        }
        if self.pool_duration_blocks <= self.min_lock_blocks {
            return Err(ContractError::InvalidDuration);
        }
        if self.max_principal_per_user <= 0 || self.max_principal_per_user > self.pool_capacity {
            return Err(ContractError::InvalidUserCap);
        }
        Ok(())
    }

    /// Block at which accrual stops when the pool (re)starts at `current_block`.
    pub fn reward_end_block(&self, current_block: u32) -> Result<u32, ContractError> {
        current_block
            .checked_add(self.pool_duration_blocks)
            .ok_or(ContractError::InvalidDuration)
    }
}

/// The single pool's configuration, kept in instance storage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub asset: Address,
    pub whitelist: Address,
    pub pool_capacity: i128,
    pub reward_rate_percent: u32,
    pub min_lock_blocks: u32,
    pub pool_duration_blocks: u32,
    pub max_principal_per_user: i128,
    pub pool_reward_end_block: u32,
    pub whitelist_enabled: bool,
    pub lock_policy: LockPolicy,
}

impl PoolConfig {
    pub fn new(
        asset: Address,
        whitelist: Address,
        params: &PoolParams,
        lock_policy: LockPolicy,
        pool_reward_end_block: u32,
    ) -> Self {
        Self {
            asset,
            whitelist,
            pool_capacity: params.pool_capacity,
            reward_rate_percent: params.reward_rate_percent,
            min_lock_blocks: params.min_lock_blocks,
            pool_duration_blocks: params.pool_duration_blocks,
            max_principal_per_user: params.max_principal_per_user,
            pool_reward_end_block,
            whitelist_enabled: false,
            lock_policy,
        }
    }

    /// Overwrites the tunable fields. Addresses, policy and the whitelist
    /// toggle are left alone.
    pub fn apply(&mut self, params: &PoolParams, pool_reward_end_block: u32) {
        self.pool_capacity = params.pool_capacity;
        self.reward_rate_percent = params.reward_rate_percent;
        self.min_lock_blocks = params.min_lock_blocks;
        self.pool_duration_blocks = params.pool_duration_blocks;
        self.max_principal_per_user = params.max_principal_per_user;
        self.pool_reward_end_block = pool_reward_end_block;
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

pub fn exists(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn load(env: &Env) -> Result<PoolConfig, ContractError> {
    let config: PoolConfig = env
        .storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)?;
    common::ttl::extend_instance(env);
    Ok(config)
}

pub fn save(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&CONFIG, config);
    common::ttl::extend_instance(env);
}
