//! Linear unlock curve with an immediate initial slice.
//!
//! - before start: nothing is unlocked
//! - at or after end: everything vested is unlocked
//! - in between: `slice + (vested - slice) * elapsed / duration`
//!
//! All divisions truncate, so rounding never releases more than the curve.

use crate::constants::PER_MILLE_DENOMINATOR;
use crate::error::VestingError;
use crate::state::ScheduleConfig;

/// Part of `amount` released immediately, `amount * per_mille / 1000`.
pub fn initial_unlock(amount: u64, per_mille: u16) -> Result<u64, VestingError> {
    let v = (amount as u128)
        .checked_mul(per_mille as u128)
        .ok_or(VestingError::MathOverflow)?
        / PER_MILLE_DENOMINATOR as u128;
    u64::try_from(v).map_err(|_| VestingError::MathOverflow)
}

/// Amount of `total_vested` unlocked at `now_ts`.
pub fn unlocked_amount(
    total_vested: u64,
    schedule: &ScheduleConfig,
    now_ts: i64,
) -> Result<u64, VestingError> {
    if now_ts < schedule.start_ts {
        return Ok(0);
    }
    if now_ts >= schedule.end_ts {
        return Ok(total_vested);
    }

    let slice = initial_unlock(total_vested, schedule.initial_unlock_per_mille)?;
    let remaining = total_vested
        .checked_sub(slice)
        .ok_or(VestingError::MathOverflow)?;

    // start <= now < end; widened so windows spanning most of the i64 range
    // still yield a positive u128 span.
    let elapsed = (now_ts as i128 - schedule.start_ts as i128) as u128;
    let duration = (schedule.end_ts as i128 - schedule.start_ts as i128) as u128;
    if duration == 0 {
        return Err(VestingError::InvalidScheduleWindow);
    }

    let linear = (remaining as u128)
        .checked_mul(elapsed)
        .ok_or(VestingError::MathOverflow)?
        / duration;
    let linear = u64::try_from(linear).map_err(|_| VestingError::MathOverflow)?;
    slice.checked_add(linear).ok_or(VestingError::MathOverflow)
}
