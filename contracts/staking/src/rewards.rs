use crate::config::PoolConfig;
use crate::position::StakePosition;
use crate::ContractError;

// ── Core accrual engine ─────────────────────────────────────────────────────

/// Blocks that count toward accrual since `start_block`.
///
/// Accrual is capped at `reward_end_block`, so a position checkpointed after
/// the pool ended accrues nothing further.
pub fn elapsed_blocks(start_block: u32, current_block: u32, reward_end_block: u32) -> u32 {
    current_block
        .min(reward_end_block)
        .saturating_sub(start_block)
}

/// Reward earned by `amount` over `elapsed` blocks.
///
/// ```text
/// reward = amount × rate_percent × elapsed / duration / 100
/// ```
///
/// Operations run left to right and each division truncates, so small
/// positions held briefly earn zero.
pub fn accrue(
    amount: i128,
    rate_percent: u32,
    elapsed: u32,
    duration: u32,
) -> Result<i128, ContractError> {
    amount
        .checked_mul(i128::from(rate_percent))
        .and_then(|v| v.checked_mul(i128::from(elapsed)))
        .and_then(|v| v.checked_div(i128::from(duration)))
        .and_then(|v| v.checked_div(100))
        .ok_or(ContractError::MathOverflow)
}

/// Total reward owed to `position` at `current_block`: what was banked at
/// earlier checkpoints plus what accrued since the latest one.
pub fn pending_reward(
    position: &StakePosition,
    config: &PoolConfig,
    current_block: u32,
) -> Result<i128, ContractError> {
    if position.claimed {
        return Ok(0);
    }

    let elapsed = elapsed_blocks(
        position.start_block,
        current_block,
        config.pool_reward_end_block,
    );
    let fresh = accrue(
        position.amount,
        config.reward_rate_percent,
        elapsed,
        config.pool_duration_blocks,
    )?;

    position
        .banked_reward
        .checked_add(fresh)
        .ok_or(ContractError::MathOverflow)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
