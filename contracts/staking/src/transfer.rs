//! Token movement between users and the pool.
//!
//! Failures come back as `TransferFailed` so the caller's error path rolls
//! back the whole invocation instead of trapping inside the token contract.

use soroban_sdk::{token, Address, Env};

use crate::ContractError;

/// Move `amount` of `asset` from `from` into the contract.
pub fn pull(env: &Env, asset: &Address, from: &Address, amount: i128) -> Result<(), ContractError> {
    settle(
        token::Client::new(env, asset).try_transfer(from, &env.current_contract_address(), &amount),
    )
}

/// Pay `amount` of `asset` out of the contract balance to `to`.
pub fn push(env: &Env, asset: &Address, to: &Address, amount: i128) -> Result<(), ContractError> {
    settle(
        token::Client::new(env, asset).try_transfer(&env.current_contract_address(), to, &amount),
    )
}

/// The contract's own balance of `asset`.
pub fn held(env: &Env, asset: &Address) -> i128 {
    token::Client::new(env, asset).balance(&env.current_contract_address())
}

/// Map the outcome of a `try_transfer` onto the pool's error codes.
///
/// `ContractError` is a fixed set, so a code raised by the token contract
/// (`Err(Ok(_))`, e.g. insufficient balance or missing auth) and a host
/// failure while invoking it (`Err(Err(_))`) both become `TransferFailed`.
/// So does a return value that fails to decode (`Ok(Err(_))`). Returning
/// `Err` from the entry point reverts the token call along with the pool's
/// own writes, so no variant leaves tokens half moved.
fn settle<R, E, I>(result: Result<Result<(), R>, Result<E, I>>) -> Result<(), ContractError> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(_)) => Err(ContractError::TransferFailed),
        Err(Ok(_token_error)) => Err(ContractError::TransferFailed),
        Err(Err(_host_error)) => Err(ContractError::TransferFailed),
    }
}
