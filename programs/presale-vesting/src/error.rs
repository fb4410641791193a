use anchor_lang::prelude::*;

/// Custom error codes for the presale vesting program.
#[error_code]
pub enum VestingError {
    #[msg("Unauthorized: caller is neither the record owner nor its controller")]
    Unauthorized,

    #[msg("Unauthorized: admin signature required")]
    UnauthorizedAdmin,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Schedule input lists differ in length")]
    ScheduleLengthMismatch,

    #[msg("Schedule count out of range")]
    InvalidScheduleCount,

    #[msg("Schedule end must be strictly after its start")]
    InvalidScheduleWindow,

    #[msg("Initial unlock must be within [0, 1000] per mille")]
    InvalidUnlockPerMille,

    #[msg("Duplicate schedule for source mint")]
    DuplicateSchedule,

    #[msg("Signing-domain name too long")]
    NameTooLong,

    #[msg("No schedule configured for this token")]
    UnknownToken,

    #[msg("Vesting has not started for this token")]
    VestingDoesNotStart,

    #[msg("Invalid amount (must be > 0)")]
    InvalidAmount,

    #[msg("Nothing to claim")]
    NothingToClaim,

    #[msg("Controller already holds this value")]
    ControllerUnchanged,

    #[msg("Signature invalid")]
    SignatureInvalid,

    #[msg("Signature expired")]
    SignatureExpired,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Math overflow")]
    MathOverflow,
}
