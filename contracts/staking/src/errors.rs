use soroban_sdk::contracttype;

/// Broad classes of failure, used by clients to decide how to react to a
/// rejected call.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Contract lifecycle: missing or repeated initialisation.
    Lifecycle = 1,
    /// Bad input: unknown pool, amount below minimum, amount above stake.
    Validation = 2,
    /// Caller is not allowed to perform the operation.
    Authorization = 3,
    /// A balance (user, custody or withdrawable) cannot cover the request.
    InsufficientFunds = 4,
    /// The operation is gated by an active pause flag.
    Paused = 5,
    /// Fixed-point or supply arithmetic left the representable range.
    Arithmetic = 6,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    PoolNotFound = 5,
    BelowMinDeposit = 6,
    InsufficientStake = 7,
    InsufficientBalance = 8,
    InsufficientRewardFunds = 9,
    NothingToWithdraw = 10,
    WithdrawPaused = 11,
    ClaimPaused = 12,
    Paused = 13,
    ArithmeticOverflow = 14,
    Reentrancy = 15,
    NativePoolRequired = 16,
    NativePoolMisuse = 17,
    TokensIdentical = 18,
    EmissionEnded = 19,
    QueueFull = 20,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::Lifecycle
            }

            ContractError::InvalidInput
            | ContractError::PoolNotFound
            | ContractError::BelowMinDeposit
            | ContractError::InsufficientStake
            | ContractError::NativePoolRequired
            | ContractError::NativePoolMisuse
            | ContractError::TokensIdentical
            | ContractError::EmissionEnded
            | ContractError::QueueFull => ErrorCategory::Validation,

            ContractError::Unauthorized | ContractError::Reentrancy => {
                ErrorCategory::Authorization
            }

            ContractError::InsufficientBalance
            | ContractError::InsufficientRewardFunds
            | ContractError::NothingToWithdraw => ErrorCategory::InsufficientFunds,

            ContractError::WithdrawPaused | ContractError::ClaimPaused | ContractError::Paused => {
                ErrorCategory::Paused
            }

            ContractError::ArithmeticOverflow => ErrorCategory::Arithmetic,
        }
    }

    /// Whether the same call may succeed later without any change by the
    /// caller (a pause being lifted, a lock maturing, custody being refilled).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ContractError::WithdrawPaused
                | ContractError::ClaimPaused
                | ContractError::Paused
                | ContractError::NothingToWithdraw
                | ContractError::InsufficientRewardFunds
        )
    }
}
