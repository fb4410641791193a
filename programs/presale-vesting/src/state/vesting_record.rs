use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::state::ScheduleConfig;
use crate::utils::unlock;

/// Per (source mint, user) vesting position. Both totals only ever grow.
#[account]
#[derive(Default, Debug)]
pub struct VestingRecord {
    /// Record owner and beneficiary of every payout.
    pub user: Pubkey,
    pub source_mint: Pubkey,
    /// Reward-equivalent amount credited by `vest`.
    pub total_vested: u64,
    /// Amount paid out, initial slices included.
    pub total_claimed: u64,
    pub bump: u8,
}

impl VestingRecord {
    pub const SIZE: usize =
        32 + // user
        32 + // source_mint
        8 +  // total_vested
        8 +  // total_claimed
        1;   // bump

    /// Fills in identity fields of a freshly created account.
    pub fn bind(&mut self, user: Pubkey, source_mint: Pubkey, bump: u8) {
        if self.user == Pubkey::default() {
            self.user = user;
            self.source_mint = source_mint;
            self.bump = bump;
        }
    }

    /// Credits a deposit of `amount` and books its initial slice as claimed.
    /// Returns the slice the caller must pay out.
    pub fn record_vest(
        &mut self,
        schedule: &ScheduleConfig,
        amount: u64,
    ) -> std::result::Result<u64, VestingError> {
        if amount == 0 {
            return Err(VestingError::InvalidAmount);
        }
        let slice = unlock::initial_unlock(amount, schedule.initial_unlock_per_mille)?;
        let total_vested = self
            .total_vested
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        let total_claimed = self
            .total_claimed
            .checked_add(slice)
            .ok_or(VestingError::MathOverflow)?;

        self.total_vested = total_vested;
        self.total_claimed = total_claimed;
        Ok(slice)
    }

    pub fn unlocked(
        &self,
        schedule: &ScheduleConfig,
        now_ts: i64,
    ) -> std::result::Result<u64, VestingError> {
        unlock::unlocked_amount(self.total_vested, schedule, now_ts)
    }

    /// Unlocked but not yet paid.
    pub fn claimable(
        &self,
        schedule: &ScheduleConfig,
        now_ts: i64,
    ) -> std::result::Result<u64, VestingError> {
        Ok(self
            .unlocked(schedule, now_ts)?
            .saturating_sub(self.total_claimed))
    }

    /// Books everything unlocked at `now_ts` as claimed. Returns the delta the
    /// caller must pay out.
    pub fn record_claim(
        &mut self,
        schedule: &ScheduleConfig,
        now_ts: i64,
    ) -> std::result::Result<u64, VestingError> {
        let unlocked = self.unlocked(schedule, now_ts)?;
        let delta = unlocked.saturating_sub(self.total_claimed);
        if delta == 0 {
            return Err(VestingError::NothingToClaim);
        }
        self.total_claimed = unlocked;
        Ok(delta)
    }
}
