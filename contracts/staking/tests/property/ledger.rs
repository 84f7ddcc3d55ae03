#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests of the stake ledger driven through the contract client.
//!
//! Invariants tested:
//! - `total_staked` always equals the sum of open principal
//! - A position is paid at most once
//! - Restaking banks the first leg's reward before the principal grows
//! - A stake over either capacity limit changes nothing
//! - Open principal stays backed by the contract balance whatever the reserve

use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};
use staking::rewards::accrue;
use staking::{
    ContractError, LockPolicy, PoolParams, PositionState, StakingContract, StakingContractClient,
};

const START: u32 = 100;
const RATE: u32 = 10;
const MIN_LOCK: u32 = 5;
const DURATION: u32 = 1_000;

// ── Helpers ───────────────────────────────────────────────────────────────────

struct Pool {
    env: Env,
    client: StakingContractClient<'static>,
    asset: Address,
    users: std::vec::Vec<Address>,
}

impl Pool {
    fn new(pool_capacity: i128, max_principal_per_user: i128) -> Self {
        Self::with_reserve(pool_capacity, max_principal_per_user, 1_000_000_000_000_000)
    }

    fn with_reserve(pool_capacity: i128, max_principal_per_user: i128, reserve: i128) -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_sequence_number(START);

        let asset = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();
        let client = StakingContractClient::new(&env, &env.register(StakingContract, ()));
        let params = PoolParams {
            pool_capacity,
            reward_rate_percent: RATE,
            min_lock_blocks: MIN_LOCK,
            pool_duration_blocks: DURATION,
            max_principal_per_user,
        };
        client.initialize(
            &Address::generate(&env),
            &asset,
            &Address::generate(&env),
            &params,
            &LockPolicy::Rolling,
        );

        if reserve > 0 {
            let funder = Address::generate(&env);
            StellarAssetClient::new(&env, &asset).mint(&funder, &reserve);
            client.fund_reward_reserve(&funder, &reserve);
        }

        let users = (0..3).map(|_| Address::generate(&env)).collect();
        Pool {
            env,
            client,
            asset,
            users,
        }
    }

    fn mint(&self, to: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, &self.asset).mint(to, &amount);
    }

    fn balance(&self, of: &Address) -> i128 {
        TokenClient::new(&self.env, &self.asset).balance(of)
    }

    fn advance(&self, blocks: u32) {
        let next = self.env.ledger().sequence() + blocks;
        self.env.ledger().set_sequence_number(next);
    }

    fn apply(&self, op: Op) {
        match op {
            Op::Stake { user, amount } => {
                self.mint(&self.users[user], amount);
                let _ = self.client.try_stake(&self.users[user], &amount);
            }
            Op::Unstake { user } => {
                let _ = self.client.try_unstake(&self.users[user]);
            }
            Op::Advance { blocks } => self.advance(blocks),
        }
    }

    fn open_principal(&self) -> i128 {
        self.users
            .iter()
            .map(|u| self.client.get_user_stake(u).amount)
            .sum()
    }
}

#[derive(Clone, Debug)]
enum Op {
    Stake { user: usize, amount: i128 },
    Unstake { user: usize },
    Advance { blocks: u32 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..3, 1i128..5_000_000).prop_map(|(user, amount)| Op::Stake { user, amount }),
        (0usize..3).prop_map(|user| Op::Unstake { user }),
        (0u32..20).prop_map(|blocks| Op::Advance { blocks }),
    ]
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// `total_staked` equals the sum of open principal after any sequence of
    /// stakes, unstakes and block advances, and never exceeds capacity.
    #[test]
    fn prop_total_staked_is_conserved(ops in prop::collection::vec(op_strategy(), 1..30)) {
        let pool = Pool::new(10_000_000, 6_000_000);

        for op in ops {
            pool.apply(op);

            let total = pool.client.get_total_staked();
            prop_assert_eq!(total, pool.open_principal());
            prop_assert!(total <= 10_000_000);
        }
    }

    /// A second unstake fails with `AlreadyClaimed` and moves no tokens.
    #[test]
    fn prop_no_double_payment(amount in 1i128..1_000_000_000, hold in MIN_LOCK..DURATION) {
        let pool = Pool::new(1_000_000_000_000, 1_000_000_000_000);
        let user = pool.users[0].clone();
        pool.mint(&user, amount);

        pool.client.stake(&user, &amount);
        pool.advance(hold);
        let paid = pool.client.unstake(&user);
        prop_assert_eq!(pool.balance(&user), paid);

        let second = pool.client.try_unstake(&user);
        prop_assert_eq!(second, Err(Ok(ContractError::AlreadyClaimed)));
        prop_assert_eq!(pool.balance(&user), paid);
        prop_assert_eq!(pool.client.get_position_state(&user), PositionState::Closed);
    }

    /// payout = A + B + reward(A, k) + reward(A + B, m)
    #[test]
    fn prop_restake_banks_first_leg(
        a in 1i128..1_000_000_000_000,
        b in 1i128..1_000_000_000_000,
        k in 0u32..400,
        m in MIN_LOCK..400,
    ) {
        let pool = Pool::new(10_000_000_000_000, 5_000_000_000_000);
        let user = pool.users[0].clone();
        pool.mint(&user, a + b);

        pool.client.stake(&user, &a);
        pool.advance(k);
        pool.client.stake(&user, &b);
        pool.advance(m);

        let expected = a + b
            + accrue(a, RATE, k, DURATION).unwrap()
            + accrue(a + b, RATE, m, DURATION).unwrap();
        prop_assert_eq!(pool.client.unstake(&user), expected);
        prop_assert_eq!(pool.balance(&user), expected);
    }

    /// Pending reward never decreases while a position stays open.
    #[test]
    fn prop_pending_reward_monotonic(
        amount in 1i128..1_000_000_000_000,
        steps in prop::collection::vec(0u32..200, 1..10),
    ) {
        let pool = Pool::new(1_000_000_000_000, 1_000_000_000_000);
        let user = pool.users[0].clone();
        pool.mint(&user, amount);
        pool.client.stake(&user, &amount);

        let mut last = 0;
        for step in steps {
            pool.advance(step);
            let pending = pool.client.user_pending_rewards(&user);
            prop_assert!(pending >= last);
            last = pending;
        }
    }

    /// A stake above the remaining user allowance fails and leaves totals,
    /// positions and balances untouched.
    #[test]
    fn prop_capacity_enforced(first in 1i128..1_000, excess in 1i128..1_000) {
        let pool = Pool::new(10_000, 1_000);
        let user = pool.users[0].clone();
        pool.mint(&user, 2_000);
        pool.client.stake(&user, &first);

        let over = 1_000 - first + excess;
        let result = pool.client.try_stake(&user, &over);
        prop_assert_eq!(result, Err(Ok(ContractError::UserCapacityExceeded)));
        prop_assert_eq!(pool.client.get_total_staked(), first);
        prop_assert_eq!(pool.client.get_user_stake(&user).amount, first);
        prop_assert_eq!(pool.balance(&user), 2_000 - first);
    }

    /// Rewards only ever come out of the surplus above `total_staked`, so
    /// the contract balance covers every open position even when the
    /// reserve runs dry.
    #[test]
    fn prop_principal_stays_backed(
        reserve in 0i128..200_000,
        ops in prop::collection::vec(op_strategy(), 1..30),
    ) {
        let pool = Pool::with_reserve(10_000_000, 6_000_000, reserve);
        let contract = pool.client.address.clone();

        for op in ops {
            pool.apply(op);
            prop_assert!(pool.balance(&contract) >= pool.client.get_total_staked());
        }

        // Every remaining position can still withdraw at least its principal
        // once its reward is covered.
        pool.advance(MIN_LOCK);
        let funder = Address::generate(&pool.env);
        for user in &pool.users {
            if pool.client.get_position_state(user) != PositionState::Active {
                continue;
            }
            let owed = pool.client.user_pending_rewards(user).max(1);
            pool.mint(&funder, owed);
            pool.client.fund_reward_reserve(&funder, &owed);
            let principal = pool.client.get_user_stake(user).amount;
            prop_assert!(pool.client.unstake(user) >= principal);
        }
        prop_assert_eq!(pool.client.get_total_staked(), 0);
    }
}
