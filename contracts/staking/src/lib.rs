#![no_std]

pub mod capacity;
pub mod config;
pub mod errors;
pub mod events;
pub mod position;
pub mod rewards;
mod transfer;

use common::admin_tiers::{self, AdminTier};
use soroban_sdk::{contract, contractimpl, Address, Env};

pub use config::{LockPolicy, PoolConfig, PoolParams};
pub use errors::{ContractError, ErrorKind};
pub use position::{PositionState, StakePosition, UserStake};

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the pool.
    ///
    /// * `asset`     – SEP-41 token that is staked and paid out as reward.
    /// * `whitelist` – contract consulted by `stake` once gating is enabled.
    /// * `params`    – capacity, rate and timing; see [`PoolParams::validate`].
    ///
    /// Accrual stops `params.pool_duration_blocks` after the current ledger.
    pub fn initialize(
        env: Env,
        admin: Address,
        asset: Address,
        whitelist: Address,
        params: PoolParams,
        lock_policy: LockPolicy,
    ) -> Result<(), ContractError> {
        if config::exists(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if asset == env.current_contract_address() || asset == whitelist {
            return Err(ContractError::InvalidAsset);
        }
        params.validate()?;

        let end_block = params.reward_end_block(env.ledger().sequence())?;
        let pool = PoolConfig::new(
            asset.clone(),
            whitelist.clone(),
            &params,
            lock_policy,
            end_block,
        );
        config::save(&env, &pool);
        capacity::set_total_staked(&env, 0);

        admin_tiers::bootstrap(&env, &admin);

        events::publish_initialized(
            &env,
            admin,
            asset,
            whitelist,
            params,
            lock_policy,
            end_block,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Lock `amount` of the pool asset.
    ///
    /// Topping up an open position banks the reward accrued so far and moves
    /// its checkpoint to the current block, so the combined principal accrues
    /// from here on and the lock restarts.
    pub fn stake(env: Env, user: Address, amount: i128) -> Result<(), ContractError> {
        let pool = Self::require_initialized(&env)?;
        user.require_auth();

        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        let current = env.ledger().sequence();
        if current >= pool.pool_reward_end_block {
            return Err(ContractError::PoolFinished);
        }
        if pool.whitelist_enabled && !common::is_authorized(&env, &pool.whitelist, &user) {
            return Err(ContractError::NotWhitelisted);
        }

        let existing = position::load(&env, &user);
        let held = existing
            .as_ref()
            .filter(|p| p.is_active())
            .map_or(0, |p| p.amount);

        let total = capacity::total_staked(&env);
        if amount > capacity::remaining_pool_capacity(&pool, total) {
            return Err(ContractError::PoolCapacityExceeded);
        }
        if amount > capacity::remaining_user_capacity(&pool, held) {
            return Err(ContractError::UserCapacityExceeded);
        }

        transfer::pull(&env, &pool.asset, &user, amount)?;

        // Bank what the old principal earned, or start a fresh position in the
        // same slot.
        let lock_end = position::lock_end_block(&pool, current)?;
        let mut stake = match existing {
            Some(p) if p.is_active() => {
                let banked = rewards::pending_reward(&p, &pool, current)?;
                StakePosition {
                    start_block: current,
                    end_block: p.end_block.max(lock_end),
                    banked_reward: banked,
                    ..p
                }
            }
            _ => StakePosition {
                end_block: lock_end,
                ..StakePosition::opened_at(current)
            },
        };
        stake.amount = stake
            .amount
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        let new_total = total
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;

        position::store(&env, &user, &stake);
        capacity::set_total_staked(&env, new_total);

        events::publish_staked(
            &env,
            user,
            amount,
            stake.amount,
            stake.banked_reward,
            new_total,
        );

        Ok(())
    }

    // ── Unstaking ───────────────────────────────────────────────────────────

    /// Close the caller's position, paying principal plus every reward owed
    /// in one transfer. Returns the amount paid.
    ///
    /// Rewards come out of the contract's balance above `total_staked`; if
    /// that reserve cannot cover them the call fails with `TransferFailed`
    /// and nothing changes.
    pub fn unstake(env: Env, user: Address) -> Result<i128, ContractError> {
        let pool = Self::require_initialized(&env)?;
        user.require_auth();

        let mut stake = position::load(&env, &user).ok_or(ContractError::NoActiveStake)?;
        match stake.state() {
            PositionState::Closed => return Err(ContractError::AlreadyClaimed),
            PositionState::Empty => return Err(ContractError::NoActiveStake),
            PositionState::Active => {}
        }

        let current = env.ledger().sequence();
        if current.saturating_sub(stake.start_block) < pool.min_lock_blocks {
            return Err(ContractError::LockNotElapsed);
        }

        let reward = rewards::pending_reward(&stake, &pool, current)?;
        let principal = stake.amount;
        let payout = principal
            .checked_add(reward)
            .ok_or(ContractError::MathOverflow)?;
        let new_total = capacity::total_staked(&env)
            .checked_sub(principal)
            .ok_or(ContractError::MathOverflow)?;

        // Principal of other open positions must stay in the contract.
        if reward > Self::reward_reserve(&env, &pool) {
            return Err(ContractError::TransferFailed);
        }

        // Mark as claimed before paying out (checks-effects-interactions).
        stake.amount = 0;
        stake.banked_reward = 0;
        stake.claimed = true;
        position::store(&env, &user, &stake);
        capacity::set_total_staked(&env, new_total);

        transfer::push(&env, &pool.asset, &user, payout)?;

        events::publish_unstaked(&env, user, principal, reward, new_total);

        Ok(payout)
    }

    // ── Reward reserve ──────────────────────────────────────────────────────

    /// Deposit pool-asset tokens that back future reward payouts.
    pub fn fund_reward_reserve(env: Env, funder: Address, amount: i128) -> Result<(), ContractError> {
        let pool = Self::require_initialized(&env)?;
        funder.require_auth();

        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        transfer::pull(&env, &pool.asset, &funder, amount)?;
        events::publish_reserve_funded(&env, funder, amount);

        Ok(())
    }

    /// Tokens held beyond staked principal, i.e. what rewards can draw on.
    pub fn get_reward_reserve(env: Env) -> Result<i128, ContractError> {
        let pool = config::load(&env)?;
        Ok(Self::reward_reserve(&env, &pool))
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    /// Reward `user` would receive if they unstaked at the current block.
    pub fn user_pending_rewards(env: Env, user: Address) -> Result<i128, ContractError> {
        let pool = config::load(&env)?;
        match position::load(&env, &user) {
            Some(stake) => rewards::pending_reward(&stake, &pool, env.ledger().sequence()),
            None => Ok(0),
        }
    }

    pub fn get_user_stake(env: Env, user: Address) -> UserStake {
        position::load(&env, &user).map_or_else(UserStake::empty, |p| p.view())
    }

    pub fn get_position_state(env: Env, user: Address) -> PositionState {
        position::state_of(position::load(&env, &user).as_ref())
    }

    pub fn get_remaining_stake_capacity(env: Env) -> Result<i128, ContractError> {
        let pool = config::load(&env)?;
        Ok(capacity::remaining_pool_capacity(
            &pool,
            capacity::total_staked(&env),
        ))
    }

    pub fn get_remaining_user_capacity(
        env: Env,
        user: Address,
    ) -> Result<i128, ContractError> {
        let pool = config::load(&env)?;
        let held = position::load(&env, &user)
            .filter(StakePosition::is_active)
            .map_or(0, |p| p.amount);
        Ok(capacity::remaining_user_capacity(&pool, held))
    }

    pub fn get_total_staked(env: Env) -> i128 {
        capacity::total_staked(&env)
    }

    pub fn get_pool_reward_end_block(env: Env) -> Result<u32, ContractError> {
        Ok(config::load(&env)?.pool_reward_end_block)
    }

    pub fn get_config(env: Env) -> Result<PoolConfig, ContractError> {
        config::load(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        config::exists(&env)
    }

    pub fn is_whitelist_enabled(env: Env) -> bool {
        config::load(&env).is_ok_and(|pool| pool.whitelist_enabled)
    }

    // ── Admin: pool parameters ──────────────────────────────────────────────

    /// Replace the pool parameters. Requires `ContractAdmin` or above.
    ///
    /// The reward end block restarts from the current block. Open positions
    /// keep their banked reward and accrue under the new rate and duration
    /// from their own checkpoint onward.
    pub fn update_pool(env: Env, caller: Address, params: PoolParams) -> Result<(), ContractError> {
        let mut pool = Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, AdminTier::ContractAdmin)?;

        params.validate()?;
        if params.pool_capacity < capacity::total_staked(&env) {
            return Err(ContractError::InvalidCapacity);
        }

        let end_block = params.reward_end_block(env.ledger().sequence())?;
        pool.apply(&params, end_block);
        config::save(&env, &pool);

        events::publish_pool_updated(&env, caller, params, end_block);

        Ok(())
    }

    /// Flip whitelist gating for new stakes and return the new setting.
    /// Requires `ContractAdmin` or above.
    pub fn toggle_whitelist(env: Env, caller: Address) -> Result<bool, ContractError> {
        let mut pool = Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin_tier(&env, &caller, AdminTier::ContractAdmin)?;

        pool.whitelist_enabled = !pool.whitelist_enabled;
        config::save(&env, &pool);

        events::publish_whitelist_toggled(&env, caller, pool.whitelist_enabled);

        Ok(pool.whitelist_enabled)
    }

    // ── Admin tier management ───────────────────────────────────────────────

    /// Grant `tier` to `target`. Only a `SuperAdmin` may call this, and never
    /// on itself.
    pub fn promote_admin(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !admin_tiers::promote(&env, &caller, &target, tier) {
            return Err(ContractError::Unauthorized);
        }
        events::publish_admin_promoted(&env, caller, target, tier);
        Ok(())
    }

    /// Revoke any tier held by `target`. Only a `SuperAdmin` may call this,
    /// and never on itself, so the pool always keeps one.
    pub fn demote_admin(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !admin_tiers::demote(&env, &caller, &target) {
            return Err(ContractError::Unauthorized);
        }
        events::publish_admin_demoted(&env, caller, target);
        Ok(())
    }

    pub fn get_admin_tier(env: Env, admin: Address) -> Option<AdminTier> {
        admin_tiers::tier_of(&env, &admin)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<PoolConfig, ContractError> {
        config::load(env)
    }

    fn reward_reserve(env: &Env, pool: &PoolConfig) -> i128 {
        transfer::held(env, &pool.asset)
            .saturating_sub(capacity::total_staked(env))
            .max(0)
    }

    fn require_admin_tier(
        env: &Env,
        caller: &Address,
        required: AdminTier,
    ) -> Result<(), ContractError> {
        if admin_tiers::has_tier(env, caller, required) {
            Ok(())
        } else {
            Err(ContractError::Unauthorized)
        }
    }
}
