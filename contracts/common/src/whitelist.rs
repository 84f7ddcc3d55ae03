//! Whitelist capability.
//!
//! Contracts that gate participation on identity hold the address of a
//! contract implementing [`WhitelistInterface`] and call it through the
//! generated [`WhitelistClient`]. Any contract exposing
//! `is_whitelisted(user) -> bool` satisfies the interface, so tests can
//! substitute their own policies.

use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "WhitelistClient")]
pub trait WhitelistInterface {
    /// Returns `true` when `user` may participate.
    fn is_whitelisted(env: Env, user: Address) -> bool;
}

/// Asks the whitelist contract at `registry` whether `user` is authorized.
pub fn is_authorized(env: &Env, registry: &Address, user: &Address) -> bool {
    WhitelistClient::new(env, registry).is_whitelisted(user)
}
