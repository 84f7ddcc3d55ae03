#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use staking::{LockPolicy, PoolParams, StakingContract, StakingContractClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { user: u8, amount: u64 },
    Unstake { user: u8 },
    Advance { blocks: u8 },
    UpdateRate { rate: u8 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(100);

    let asset = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let tokens = StellarAssetClient::new(&env, &asset);
    let client = StakingContractClient::new(&env, &env.register(StakingContract, ()));

    let admin = Address::generate(&env);
    let mut params = PoolParams {
        pool_capacity: 1_000_000_000_000,
        reward_rate_percent: 10,
        min_lock_blocks: 5,
        pool_duration_blocks: 1_000,
        max_principal_per_user: 100_000_000_000,
    };
    client.initialize(
        &admin,
        &asset,
        &Address::generate(&env),
        &params,
        &LockPolicy::Rolling,
    );
    tokens.mint(&admin, &1_000_000_000_000);
    client.fund_reward_reserve(&admin, &1_000_000_000_000);

    let users: Vec<Address> = (0..4).map(|_| Address::generate(&env)).collect();

    // Errors are expected; panics and broken invariants are not.
    for action in actions {
        match action {
            FuzzAction::Stake { user, amount } => {
                let user = &users[user as usize % users.len()];
                let amount = amount as i128;
                tokens.mint(user, &amount.max(1));
                let _ = client.try_stake(user, &amount);
            }
            FuzzAction::Unstake { user } => {
                let _ = client.try_unstake(&users[user as usize % users.len()]);
            }
            FuzzAction::Advance { blocks } => {
                // Stay well inside the default entry TTLs of the test host.
                let next = (env.ledger().sequence() + blocks as u32).min(3_000);
                env.ledger().set_sequence_number(next);
            }
            FuzzAction::UpdateRate { rate } => {
                params.reward_rate_percent = rate as u32;
                let _ = client.try_update_pool(&admin, &params);
            }
        }

        let open: i128 = users.iter().map(|u| client.get_user_stake(u).amount).sum();
        assert_eq!(client.get_total_staked(), open);
        assert!(TokenClient::new(&env, &asset).balance(&client.address) >= open);
    }
});
