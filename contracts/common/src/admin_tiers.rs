//! Role gate shared by the staking pool and the whitelist registry.
//!
//! A `ContractAdmin` may reconfigure a pool and edit a registry. A
//! `SuperAdmin` may additionally hand out and revoke roles. Every
//! contract always keeps at least one `SuperAdmin`: the bootstrap admin is
//! one, and a `SuperAdmin` can never revoke its own role.

use soroban_sdk::{contracttype, Address, Env};

use crate::ttl;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum RoleKey {
    Tier(Address),
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AdminTier {
    ContractAdmin = 1,
    SuperAdmin = 2,
}

impl AdminTier {
    /// Stable numeric code, as carried in event payloads. Revocation is 0.
    pub fn rank(self) -> u32 {
        self as u32
    }

    /// Whether holding `self` satisfies a `required` gate.
    pub fn covers(self, required: AdminTier) -> bool {
        self.rank() >= required.rank()
    }
}

pub fn tier_of(env: &Env, admin: &Address) -> Option<AdminTier> {
    let key = RoleKey::Tier(admin.clone());
    let tier = env.storage().persistent().get(&key);
    if tier.is_some() {
        ttl::extend_persistent(env, &key);
    }
    tier
}

/// True when `caller` holds `required` or a higher role.
pub fn has_tier(env: &Env, caller: &Address, required: AdminTier) -> bool {
    tier_of(env, caller).is_some_and(|tier| tier.covers(required))
}

fn store(env: &Env, admin: &Address, tier: AdminTier) {
    let key = RoleKey::Tier(admin.clone());
    env.storage().persistent().set(&key, &tier);
    ttl::extend_persistent(env, &key);
}

/// Make `admin` the first `SuperAdmin`. Called once from `initialize`.
pub fn bootstrap(env: &Env, admin: &Address) {
    store(env, admin, AdminTier::SuperAdmin);
}

/// Grant `tier` to `target`, replacing any role it held. Returns `false`
/// unless `caller` is a `SuperAdmin`. Auth is the caller's job.
pub fn promote(env: &Env, caller: &Address, target: &Address, tier: AdminTier) -> bool {
    if !has_tier(env, caller, AdminTier::SuperAdmin) || caller == target {
        return false;
    }
    store(env, target, tier);
    true
}

/// Revoke whatever role `target` holds. Returns `false` unless `caller` is
/// a `SuperAdmin` other than `target`.
pub fn demote(env: &Env, caller: &Address, target: &Address) -> bool {
    if !has_tier(env, caller, AdminTier::SuperAdmin) || caller == target {
        return false;
    }
    env.storage()
        .persistent()
        .remove(&RoleKey::Tier(target.clone()));
    true
}
