//! Shared utilities and error types for the staking contract suite.
//!
//! This crate provides:
//! - [`CommonError`]: standardised error codes shared by the contracts.
//! - [`admin_tiers`]: the role-based admin capability check.
//! - [`whitelist`]: the capability interface a whitelist contract exposes.
//! - [`ttl`]: storage TTL constants and bump helpers.

#![no_std]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod admin_tiers;
pub mod ttl;
pub mod whitelist;

pub use admin_tiers::AdminTier;
pub use whitelist::*;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Shared error codes for contracts without an error enum of their own.
///
/// # Code ranges
/// | Range   | Purpose                       |
/// |---------|-------------------------------|
/// | 1 – 9   | Lifecycle / initialisation    |
/// | 10 – 19 | Authentication & authorisation|
/// | 30 – 39 | Validation / input            |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    /// The contract has not been initialised yet.
    NotInitialized = 1,

    /// `initialize` was called more than once.
    AlreadyInitialized = 2,

    // ── Auth (10–19) ─────────────────────────────────────────
    /// The caller lacks the admin tier required for the operation.
    AccessDenied = 10,

    // ── Validation (30–39) ───────────────────────────────────
    /// One or more input parameters are invalid (e.g. an empty list).
    InvalidInput = 30,
}
