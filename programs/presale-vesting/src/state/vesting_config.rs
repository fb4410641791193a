use anchor_lang::prelude::*;

use crate::constants::MAX_SCHEDULES;
use crate::error::VestingError;
use crate::state::ScheduleConfig;

/// Singleton configuration PDA. Written once by `initialize`.
#[account]
#[derive(Debug)]
pub struct VestingConfig {
    /// Administrator allowed to sweep program-owned token accounts.
    pub admin: Pubkey,
    /// Token paid out by every schedule.
    pub reward_mint: Pubkey,
    /// Reward reserve (token account owned by this PDA).
    pub reward_vault: Pubkey,
    /// Binds off-chain authorizations to this program and config.
    pub domain_separator: [u8; 32],
    /// Registered schedules, one per source mint (<= MAX_SCHEDULES).
    pub schedules: Vec<ScheduleConfig>,
    pub bump: u8,
    pub reward_vault_bump: u8,
}

impl VestingConfig {
    pub const SIZE: usize =
        32 + // admin
        32 + // reward_mint
        32 + // reward_vault
        32 + // domain_separator
        4 + MAX_SCHEDULES * ScheduleConfig::SIZE + // schedules
        1 +  // bump
        1;   // reward_vault_bump

    /// Schedule registered for `source_mint`.
    pub fn schedule(
        &self,
        source_mint: &Pubkey,
    ) -> std::result::Result<&ScheduleConfig, VestingError> {
        self.schedules
            .iter()
            .find(|s| s.source_mint == *source_mint)
            .ok_or(VestingError::UnknownToken)
    }

    /// Only the configured admin may run recovery.
    pub fn authorize_admin(&self, caller: &Pubkey) -> std::result::Result<(), VestingError> {
        if *caller != self.admin {
            return Err(VestingError::UnauthorizedAdmin);
        }
        Ok(())
    }

    /// Validates the parallel construction lists as a whole. Any invalid
    /// entry rejects the entire set.
    pub fn build_schedules(
        source_mints: &[Pubkey],
        start_timestamps: &[i64],
        end_timestamps: &[i64],
        initial_unlocks: &[u16],
    ) -> std::result::Result<Vec<ScheduleConfig>, VestingError> {
        let n = source_mints.len();
        if start_timestamps.len() != n || end_timestamps.len() != n || initial_unlocks.len() != n
        {
            return Err(VestingError::ScheduleLengthMismatch);
        }
        if n == 0 || n > MAX_SCHEDULES {
            return Err(VestingError::InvalidScheduleCount);
        }

        let mut schedules: Vec<ScheduleConfig> = Vec::with_capacity(n);
        for i in 0..n {
            let schedule = ScheduleConfig::new(
                source_mints[i],
                start_timestamps[i],
                end_timestamps[i],
                initial_unlocks[i],
            )?;
            if schedules.iter().any(|s| s.source_mint == schedule.source_mint) {
                return Err(VestingError::DuplicateSchedule);
            }
            schedules.push(schedule);
        }
        Ok(schedules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_MONTH: i64 = 2_629_800;

    fn mints() -> [Pubkey; 3] {
        [
            Pubkey::new_from_array([1u8; 32]),
            Pubkey::new_from_array([2u8; 32]),
            Pubkey::new_from_array([3u8; 32]),
        ]
    }

    fn config(schedules: Vec<ScheduleConfig>) -> VestingConfig {
        VestingConfig {
            admin: Pubkey::new_from_array([9u8; 32]),
            reward_mint: Pubkey::new_from_array([8u8; 32]),
            reward_vault: Pubkey::new_from_array([10u8; 32]),
            domain_separator: [0u8; 32],
            schedules,
            bump: 255,
            reward_vault_bump: 254,
        }
    }

    #[test]
    fn only_admin_passes_admin_gate() {
        let cfg = config(Vec::new());
        assert!(cfg.authorize_admin(&Pubkey::new_from_array([9u8; 32])).is_ok());
        assert!(matches!(
            cfg.authorize_admin(&Pubkey::new_from_array([8u8; 32])),
            Err(VestingError::UnauthorizedAdmin)
        ));
        assert!(matches!(
            cfg.authorize_admin(&Pubkey::default()),
            Err(VestingError::UnauthorizedAdmin)
        ));
    }

    #[test]
    fn builds_and_looks_up_schedules() {
        let start = 1_700_000_000;
        let end = start + ONE_MONTH;
        let schedules = VestingConfig::build_schedules(
            &mints(),
            &[start, start, start],
            &[end, end, end],
            &[100, 200, 500],
        )
        .unwrap();
        let cfg = config(schedules);

        let b = cfg.schedule(&mints()[1]).unwrap();
        assert_eq!(b.start_ts, start);
        assert_eq!(b.end_ts, end);
        assert_eq!(b.end_ts - b.start_ts, ONE_MONTH);
        assert_eq!(b.initial_unlock_per_mille, 200);

        let unknown = Pubkey::new_from_array([42u8; 32]);
        assert!(matches!(cfg.schedule(&unknown), Err(VestingError::UnknownToken)));
    }

    #[test]
    fn one_zero_time_entry_rejects_the_whole_set() {
        let res = VestingConfig::build_schedules(
            &mints(),
            &[100, 0, 100],
            &[200, 0, 200],
            &[100, 200, 500],
        );
        assert!(matches!(res, Err(VestingError::InvalidScheduleWindow)));
    }

    #[test]
    fn all_zero_timestamps_rejected() {
        let res = VestingConfig::build_schedules(&mints(), &[0, 0, 0], &[0, 0, 0], &[100, 200, 500]);
        assert!(matches!(res, Err(VestingError::InvalidScheduleWindow)));
    }

    #[test]
    fn length_mismatch_rejected() {
        let res = VestingConfig::build_schedules(&mints(), &[1, 1], &[2, 2, 2], &[0, 0, 0]);
        assert!(matches!(res, Err(VestingError::ScheduleLengthMismatch)));
    }

    #[test]
    fn empty_and_oversized_sets_rejected() {
        let res = VestingConfig::build_schedules(&[], &[], &[], &[]);
        assert!(matches!(res, Err(VestingError::InvalidScheduleCount)));

        let n = MAX_SCHEDULES + 1;
        let many: Vec<Pubkey> = (0..n)
            .map(|i| Pubkey::new_from_array([i as u8 + 1; 32]))
            .collect();
        let res = VestingConfig::build_schedules(&many, &vec![1; n], &vec![2; n], &vec![0; n]);
        assert!(matches!(res, Err(VestingError::InvalidScheduleCount)));
    }

    #[test]
    fn duplicate_source_mint_rejected() {
        let m = mints();
        let res = VestingConfig::build_schedules(
            &[m[0], m[1], m[0]],
            &[1, 1, 1],
            &[2, 2, 2],
            &[0, 0, 0],
        );
        assert!(matches!(res, Err(VestingError::DuplicateSchedule)));
    }

    #[test]
    fn max_schedules_fit_in_reserved_space() {
        let schedules: Vec<ScheduleConfig> = (0..MAX_SCHEDULES)
            .map(|i| {
                ScheduleConfig::new(Pubkey::new_from_array([i as u8 + 1; 32]), 1, 2, 1_000)
                    .unwrap()
            })
            .collect();
        let cfg = config(schedules);
        let mut buf = Vec::new();
        cfg.serialize(&mut buf).unwrap();
        assert_eq!(buf.len(), VestingConfig::SIZE);
    }
}
