use common::CommonError;

/// Failures of the staker contract.
///
/// Every failure aborts the whole invocation; nothing is partially applied.
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    // ── Lifecycle & auth (1–9) ───────────────────────────────
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    Paused = 5,

    // ── Emission schedule (10–19) ────────────────────────────
    EmptySchedule = 10,
    ScheduleLocked = 11,
    UnsortedSchedule = 12,
    /// Pools cannot exist before both currencies have a schedule.
    EmissionsNotSet = 13,

    // ── Pools & eligibility (20–29) ──────────────────────────
    InactivePool = 20,
    PoolAlreadyExists = 21,
    InvalidAssetToStake = 22,
    InvalidAmount = 23,
    InvalidAssetKind = 24,
    /// Withdrawal asks for more than the position holds.
    InsufficientStake = 25,

    // ── Boosters (30–39) ─────────────────────────────────────
    InputLengthsMismatch = 30,
    EmptyBoostInfoArray = 31,
    BoosterIdZero = 32,
    InvalidConfBoostersAssetType = 33,
    InvalidInfoStakeForBoost = 34,

    // ── IOU receipts (40–49) ─────────────────────────────────
    IouNotFound = 40,
    NotAnOwnerOfIouToken = 41,
    IouTokenFromDifferentPool = 42,

    // ── Checkpoint claims (50–59) ────────────────────────────
    EmptyCheckpoint = 50,
    MismatchArgumentsAndHash = 51,
    NotAnAdmin = 52,
    HashUsed = 53,
    AttestorNotSet = 54,
    InvalidCheckpointInterval = 55,
    InvalidCheckpointBalance = 56,
    CheckpointOverlapsLiveStake = 57,

    // ── Distributor & points (60–69) ─────────────────────────
    DeveloperShareTooHigh = 60,
    DeveloperNotFound = 61,
    InsufficientPoints = 62,
    NotPointSpender = 63,
}

/// Coarse classification used by callers deciding whether to retry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorCategory {
    Lifecycle,
    Authorization,
    /// Bad schedule, bad booster configuration, zero ids.
    Configuration,
    /// Inactive pool, wrong asset, wrong booster match.
    Eligibility,
    /// Hash mismatch, bad signature, replayed digest.
    ReplayIntegrity,
    /// Over-withdrawal, foreign or unowned IOU.
    Invariant,
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        use ContractError::*;
        match self {
            NotInitialized | AlreadyInitialized | Paused => ErrorCategory::Lifecycle,
            Unauthorized | NotPointSpender => ErrorCategory::Authorization,
            InvalidInput
            | EmptySchedule
            | ScheduleLocked
            | UnsortedSchedule
            | EmissionsNotSet
            | PoolAlreadyExists
            | InvalidAssetKind
            | InputLengthsMismatch
            | EmptyBoostInfoArray
            | BoosterIdZero
            | InvalidConfBoostersAssetType
            | AttestorNotSet
            | DeveloperShareTooHigh
            | DeveloperNotFound => ErrorCategory::Configuration,
            InactivePool | InvalidAssetToStake | InvalidAmount | InvalidInfoStakeForBoost => {
                ErrorCategory::Eligibility
            }
            EmptyCheckpoint
            | MismatchArgumentsAndHash
            | NotAnAdmin
            | HashUsed
            | InvalidCheckpointInterval
            | InvalidCheckpointBalance
            | CheckpointOverlapsLiveStake => ErrorCategory::ReplayIntegrity,
            InsufficientStake
            | IouNotFound
            | NotAnOwnerOfIouToken
            | IouTokenFromDifferentPool
            | InsufficientPoints => ErrorCategory::Invariant,
        }
    }

    /// Whether resubmitting (possibly with corrected input) can succeed.
    ///
    /// A consumed digest and a locked schedule are final.
    pub fn retryable(&self) -> bool {
        !matches!(
            self,
            ContractError::HashUsed | ContractError::ScheduleLocked | ContractError::AlreadyInitialized
        )
    }
}

impl From<CommonError> for ContractError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::NotInitialized => ContractError::NotInitialized,
            CommonError::AlreadyInitialized => ContractError::AlreadyInitialized,
            CommonError::AccessDenied => ContractError::Unauthorized,
            CommonError::InvalidInput => ContractError::InvalidInput,
            CommonError::AlreadyConsumed => ContractError::HashUsed,
            CommonError::Paused => ContractError::Paused,
        }
    }
}
