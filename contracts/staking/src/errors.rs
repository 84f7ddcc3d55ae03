use soroban_sdk::{contracterror, contracttype};

/// Failures returned by the staking pool.
///
/// Every failing call leaves storage and balances exactly as they were.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAsset = 4,
    InvalidCapacity = 5,
    InvalidRate = 6,
    InvalidLockTime = 7,
    InvalidDuration = 8,
    InvalidUserCap = 9,
    ZeroAmount = 10,
    PoolFinished = 11,
    NotWhitelisted = 12,
    PoolCapacityExceeded = 13,
    UserCapacityExceeded = 14,
    NoActiveStake = 15,
    AlreadyClaimed = 16,
    LockNotElapsed = 17,
    TransferFailed = 18,
    MathOverflow = 19,
}

/// Coarse grouping of [`ContractError`] for clients that react by class
/// rather than by code.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorKind {
    /// Bad pool parameters or lifecycle misuse.
    Configuration = 1,
    Authorization = 2,
    /// Pool-wide or per-user principal limits.
    Capacity = 3,
    /// Pool already ended or lock not yet elapsed.
    Timing = 4,
    /// The position is not in a state that allows the call.
    State = 5,
    /// The token contract refused a transfer.
    Transfer = 6,
    Arithmetic = 7,
}

impl ContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::InvalidAsset
            | ContractError::InvalidCapacity
            | ContractError::InvalidRate
            | ContractError::InvalidLockTime
            | ContractError::InvalidDuration
            | ContractError::InvalidUserCap
            | ContractError::ZeroAmount => ErrorKind::Configuration,

            ContractError::Unauthorized | ContractError::NotWhitelisted => {
                ErrorKind::Authorization
            }

            ContractError::PoolCapacityExceeded | ContractError::UserCapacityExceeded => {
                ErrorKind::Capacity
            }

            ContractError::PoolFinished | ContractError::LockNotElapsed => ErrorKind::Timing,

            ContractError::NoActiveStake | ContractError::AlreadyClaimed => ErrorKind::State,

            ContractError::TransferFailed => ErrorKind::Transfer,

            ContractError::MathOverflow => ErrorKind::Arithmetic,
        }
    }

    /// Whether retrying the same call later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self.kind(), ErrorKind::Capacity | ErrorKind::Transfer)
            || *self == ContractError::LockNotElapsed
    }
}
