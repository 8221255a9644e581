use steel::*;

/// Program error codes
/// Range 1000-1999: Game errors
/// Range 2000-2999: Validation errors
/// Range 3000-3999: System errors
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u32)]
pub enum GameError {
    // Game Errors (1000-1999)
    #[error("Staking window is closed")]
    WindowClosed = 1000,

    #[error("Staking window is still open")]
    WindowOpen = 1001,

    #[error("Round has already been resolved")]
    AlreadyResolved = 1002,

    #[error("Round has not been resolved")]
    NotResolved = 1003,

    #[error("Round does not follow the last settled epoch")]
    StaleEpoch = 1004,

    #[error("Position has already been settled for this round")]
    AlreadySettled = 1005,

    #[error("House bankroll insufficient for bet")]
    InsufficientBankroll = 1006,

    #[error("Round has expired")]
    RoundExpired = 1007,

    #[error("No pending winnings to claim")]
    NoWinnings = 1008,

    #[error("Slot hash for the round is not available")]
    EntropyUnavailable = 1009,

    #[error("Entropy sampler ran out of retries")]
    EntropyExhausted = 1010,

    #[error("Miner already staked this square")]
    AlreadyStaked = 1011,

    #[error("Position can still be settled normally")]
    PositionNotStale = 1012,

    // Validation Errors (2000-2999)
    #[error("Invalid bet type specified")]
    InvalidBetType = 2001,

    #[error("Invalid bet amount")]
    InvalidBetAmount = 2002,

    #[error("Invalid point value")]
    InvalidPoint = 2003,

    #[error("Invalid board square")]
    InvalidSquare = 2004,

    #[error("Signer is not the position authority")]
    InvalidAuthority = 2005,

    #[error("Invalid dice prediction")]
    InvalidPrediction = 2006,

    #[error("Invalid configuration value")]
    InvalidConfig = 2007,

    // System Errors (3000-3999)
    #[error("Arithmetic operation overflowed")]
    ArithmeticOverflow = 3001,
}

error!(GameError);
