use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::config::{LockPolicy, PoolConfig};
use crate::ContractError;

// ── Storage key constants ───────────────────────────────────────────────────

const POSITION: Symbol = symbol_short!("POSITION");

// ── Types ───────────────────────────────────────────────────────────────────

/// A user's stake in the pool.
///
/// A position is opened by the first stake, topped up by later stakes and
/// closed by `unstake`. Closing keeps the record with `claimed` set, so a
/// repeat unstake is rejected instead of looking like an empty slot.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakePosition {
    /// Principal currently locked.
    pub amount: i128,
    /// Latest checkpoint; accrual since here is not yet banked.
    pub start_block: u32,
    /// Earliest unstake block under the pool's lock policy.
    pub end_block: u32,
    /// Reward locked in at earlier checkpoints.
    pub banked_reward: i128,
    pub claimed: bool,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PositionState {
    Empty = 0,
    Active = 1,
    Closed = 2,
}

/// Read-only view returned by `get_user_stake`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserStake {
    pub amount: i128,
    pub start_block: u32,
    pub end_block: u32,
    pub claimed: bool,
}

impl StakePosition {
    /// A position opened at `current_block` with nothing locked yet.
    pub fn opened_at(current_block: u32) -> Self {
        Self {
            amount: 0,
            start_block: current_block,
            end_block: current_block,
            banked_reward: 0,
            claimed: false,
        }
    }

    pub fn state(&self) -> PositionState {
        if self.claimed {
            PositionState::Closed
        } else if self.amount > 0 {
            PositionState::Active
        } else {
            PositionState::Empty
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == PositionState::Active
    }

    pub fn view(&self) -> UserStake {
        UserStake {
            amount: self.amount,
            start_block: self.start_block,
            end_block: self.end_block,
            claimed: self.claimed,
        }
    }
}

impl UserStake {
    pub fn empty() -> Self {
        Self {
            amount: 0,
            start_block: 0,
            end_block: 0,
            claimed: false,
        }
    }
}

/// Earliest unstake block for a stake made at `current_block`.
pub fn lock_end_block(config: &PoolConfig, current_block: u32) -> Result<u32, ContractError> {
    match config.lock_policy {
        LockPolicy::Rolling => current_block
            .checked_add(config.min_lock_blocks)
            .ok_or(ContractError::MathOverflow),
        LockPolicy::PoolEnd => Ok(config.pool_reward_end_block),
    }
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn position_key(user: &Address) -> (Symbol, Address) {
    (POSITION, user.clone())
}

/// Retrieve `user`'s position, `None` if they never staked.
pub fn load(env: &Env, user: &Address) -> Option<StakePosition> {
    let key = position_key(user);
    let position: Option<StakePosition> = env.storage().persistent().get(&key);
    if position.is_some() {
        common::ttl::extend_persistent(env, &key);
    }
    position
}

pub fn store(env: &Env, user: &Address, position: &StakePosition) {
    let key = position_key(user);
    env.storage().persistent().set(&key, position);
    common::ttl::extend_persistent(env, &key);
}

pub fn state_of(position: Option<&StakePosition>) -> PositionState {
    position.map_or(PositionState::Empty, StakePosition::state)
}
