use anchor_lang::prelude::*;

use crate::constants::PER_MILLE_DENOMINATOR;
use crate::error::VestingError;

/// Linear release window of one source mint. Immutable once registered.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Presale token accepted by `vest`.
    pub source_mint: Pubkey,
    /// Curve begins here (Unix seconds). `vest` is rejected before it.
    pub start_ts: i64,
    /// Curve is fully vested here (Unix seconds). Strictly after `start_ts`.
    pub end_ts: i64,
    /// Share of every deposit released at vest time, in parts per thousand.
    pub initial_unlock_per_mille: u16,
}

impl ScheduleConfig {
    pub const SIZE: usize =
        32 + // source_mint
        8 +  // start_ts
        8 +  // end_ts
        2;   // initial_unlock_per_mille

    pub fn new(
        source_mint: Pubkey,
        start_ts: i64,
        end_ts: i64,
        initial_unlock_per_mille: u16,
    ) -> std::result::Result<Self, VestingError> {
        if source_mint == Pubkey::default() {
            return Err(VestingError::InvalidPubkey);
        }
        // A zero-length or inverted window would release every deposit at once.
        if end_ts <= start_ts {
            return Err(VestingError::InvalidScheduleWindow);
        }
        if u64::from(initial_unlock_per_mille) > PER_MILLE_DENOMINATOR {
            return Err(VestingError::InvalidUnlockPerMille);
        }
        Ok(Self {
            source_mint,
            start_ts,
            end_ts,
            initial_unlock_per_mille,
        })
    }

    pub fn has_started(&self, now_ts: i64) -> bool {
        now_ts >= self.start_ts
    }
}
