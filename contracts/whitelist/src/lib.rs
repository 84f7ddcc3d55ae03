#![no_std]
#![allow(deprecated)]

//! Address registry consulted by the staking pool when whitelist gating is on.

use common::admin_tiers::{self, AdminTier};
use common::{CommonError, WhitelistInterface};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Env, Symbol, Vec,
};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const MEMBER: Symbol = symbol_short!("MEMBER");

// ── Event payloads ───────────────────────────────────────────────────────────

/// Fired when addresses are added to or removed from the registry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MembershipChangedEvent {
    pub caller: Address,
    pub users: Vec<Address>,
    pub ledger: u32,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct WhitelistContract;

#[contractimpl]
impl WhitelistContract {
    /// Bootstrap the registry; `admin` becomes its `SuperAdmin`.
    pub fn initialize(env: Env, admin: Address) -> Result<(), CommonError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(CommonError::AlreadyInitialized);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        admin_tiers::bootstrap(&env, &admin);
        common::ttl::extend_instance(&env);

        env.events()
            .publish((symbol_short!("WL_INIT"),), (admin, env.ledger().sequence()));

        Ok(())
    }

    /// Mark every address in `users` as whitelisted. Requires `ContractAdmin`.
    pub fn add_to_whitelist(
        env: Env,
        caller: Address,
        users: Vec<Address>,
    ) -> Result<(), CommonError> {
        Self::require_editor(&env, &caller)?;
        if users.is_empty() {
            return Err(CommonError::InvalidInput);
        }

        for user in users.iter() {
            let key = (MEMBER, user);
            env.storage().persistent().set(&key, &true);
            common::ttl::extend_persistent(&env, &key);
        }

        env.events().publish(
            (symbol_short!("WL_ADD"), caller.clone()),
            MembershipChangedEvent {
                caller,
                users,
                ledger: env.ledger().sequence(),
            },
        );

        Ok(())
    }

    /// Drop every address in `users` from the registry. Requires `ContractAdmin`.
    pub fn remove_from_whitelist(
        env: Env,
        caller: Address,
        users: Vec<Address>,
    ) -> Result<(), CommonError> {
        Self::require_editor(&env, &caller)?;
        if users.is_empty() {
            return Err(CommonError::InvalidInput);
        }

        for user in users.iter() {
            env.storage().persistent().remove(&(MEMBER, user));
        }

        env.events().publish(
            (symbol_short!("WL_RM"), caller.clone()),
            MembershipChangedEvent {
                caller,
                users,
                ledger: env.ledger().sequence(),
            },
        );

        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    /// Promote `target` to `tier`. Only a `SuperAdmin` may call this, and
    /// never on itself.
    pub fn promote_admin(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), CommonError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !admin_tiers::promote(&env, &caller, &target, tier) {
            return Err(CommonError::AccessDenied);
        }
        Ok(())
    }

    pub fn get_admin_tier(env: Env, admin: Address) -> Option<AdminTier> {
        admin_tiers::tier_of(&env, &admin)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), CommonError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(CommonError::NotInitialized);
        }
        common::ttl::extend_instance(env);
        Ok(())
    }

    fn require_editor(env: &Env, caller: &Address) -> Result<(), CommonError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        if !admin_tiers::has_tier(env, caller, AdminTier::ContractAdmin) {
            return Err(CommonError::AccessDenied);
        }
        Ok(())
    }
}

#[contractimpl]
impl WhitelistInterface for WhitelistContract {
    fn is_whitelisted(env: Env, user: Address) -> bool {
        let key = (MEMBER, user);
        let listed = env.storage().persistent().get(&key).unwrap_or(false);
        if listed {
            common::ttl::extend_persistent(&env, &key);
        }
        listed
    }
}
