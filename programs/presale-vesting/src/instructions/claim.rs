use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, TransferChecked};

use crate::constants::{CONFIG_SEED, DELEGATION_SEED, VESTING_RECORD_SEED};
use crate::error::VestingError;
use crate::state::{Delegation, VestingConfig, VestingRecord};

/// Pays everything unlocked so far to the record owner. The caller is the
/// owner or, while delegated, the controller; funds always go to `user`.
pub fn claim(ctx: Context<Claim>, source_mint: Pubkey, user: Pubkey) -> Result<()> {
    let caller = ctx.accounts.caller.key();
    ctx.accounts.delegation.authorize(&user, &caller)?;

    let now = Clock::get()?.unix_timestamp;
    let config_bump = ctx.accounts.config.bump;
    let schedule = *ctx.accounts.config.schedule(&source_mint)?;

    let record = &mut ctx.accounts.vesting_record;
    let amount = record.record_claim(&schedule, now)?;
    let total_claimed = record.total_claimed;

    let signer_seeds: &[&[&[u8]]] = &[&[CONFIG_SEED, &[config_bump]]];
    token::transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.reward_vault.to_account_info(),
                mint: ctx.accounts.reward_mint.to_account_info(),
                to: ctx.accounts.user_reward_account.to_account_info(),
                authority: ctx.accounts.config.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
        ctx.accounts.reward_mint.decimals,
    )?;

    emit!(TokensClaimed {
        source_mint,
        user,
        caller,
        amount,
        total_claimed,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(source_mint: Pubkey, user: Pubkey)]
pub struct Claim<'info> {
    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, VestingConfig>>,

    #[account(
        mut,
        seeds = [VESTING_RECORD_SEED, source_mint.as_ref(), user.as_ref()],
        bump = vesting_record.bump
    )]
    pub vesting_record: Box<Account<'info, VestingRecord>>,

    #[account(
        seeds = [DELEGATION_SEED, source_mint.as_ref(), user.as_ref()],
        bump = delegation.bump
    )]
    pub delegation: Box<Account<'info, Delegation>>,

    #[account(address = config.reward_mint @ VestingError::InvalidTokenMint)]
    pub reward_mint: Box<Account<'info, Mint>>,

    #[account(mut, address = config.reward_vault @ VestingError::InvalidTokenAccount)]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = user_reward_account.mint == config.reward_mint @ VestingError::InvalidTokenMint,
        constraint = user_reward_account.owner == user @ VestingError::InvalidTokenAccount,
    )]
    pub user_reward_account: Box<Account<'info, TokenAccount>>,

    pub caller: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokensClaimed {
    pub source_mint: Pubkey,
    pub user: Pubkey,
    pub caller: Pubkey,
    pub amount: u64,
    pub total_claimed: u64,
}

#[cfg(test)]
mod tests {
    use crate::error::VestingError;
    use crate::state::{Delegation, ScheduleConfig, VestingRecord};
    use anchor_lang::prelude::Pubkey;

    const S: i64 = 1_700_000_000;
    const ONE_MONTH: i64 = 2_629_800;

    fn key(b: u8) -> Pubkey {
        Pubkey::new_from_array([b; 32])
    }

    /// Authorization then accounting, as the handler runs them.
    fn try_claim(
        delegation: &Delegation,
        record: &mut VestingRecord,
        schedule: &ScheduleConfig,
        user: &Pubkey,
        caller: &Pubkey,
        now: i64,
    ) -> Result<u64, VestingError> {
        delegation.authorize(user, caller)?;
        record.record_claim(schedule, now)
    }

    #[test]
    fn claim_authority_follows_delegation() {
        let schedule = ScheduleConfig::new(key(1), S, S + ONE_MONTH, 100).unwrap();
        let (user, controller, stranger) = (key(10), key(11), key(12));
        let mut delegation = Delegation::default();
        let mut record = VestingRecord::default();
        record.record_vest(&schedule, 1_000_000).unwrap();

        let t1 = S + ONE_MONTH / 4;
        assert!(matches!(
            try_claim(&delegation, &mut record, &schedule, &user, &stranger, t1),
            Err(VestingError::Unauthorized)
        ));
        let paid_by_user = try_claim(&delegation, &mut record, &schedule, &user, &user, t1).unwrap();
        assert!(paid_by_user > 0);

        delegation.authorize(&user, &user).unwrap();
        delegation.set_controller(&user, controller).unwrap();
        // the user can no longer re-delegate either
        assert!(matches!(
            delegation.authorize(&user, &user),
            Err(VestingError::Unauthorized)
        ));

        let t2 = S + ONE_MONTH / 2;
        assert!(matches!(
            try_claim(&delegation, &mut record, &schedule, &user, &user, t2),
            Err(VestingError::Unauthorized)
        ));
        let before = record.total_claimed;
        let paid_by_controller =
            try_claim(&delegation, &mut record, &schedule, &user, &controller, t2).unwrap();
        assert_eq!(record.total_claimed, before + paid_by_controller);

        delegation.authorize(&user, &controller).unwrap();
        delegation.set_controller(&user, user).unwrap();

        let t3 = S + ONE_MONTH;
        assert!(matches!(
            try_claim(&delegation, &mut record, &schedule, &user, &controller, t3),
            Err(VestingError::Unauthorized)
        ));
        try_claim(&delegation, &mut record, &schedule, &user, &user, t3).unwrap();
        assert_eq!(record.total_claimed, record.total_vested);
        assert!(matches!(
            try_claim(&delegation, &mut record, &schedule, &user, &user, t3 + 1),
            Err(VestingError::NothingToClaim)
        ));
    }

    #[test]
    fn unauthorized_caller_leaves_record_untouched() {
        let schedule = ScheduleConfig::new(key(1), S, S + ONE_MONTH, 200).unwrap();
        let user = key(10);
        let delegation = Delegation::default();
        let mut record = VestingRecord::default();
        record.record_vest(&schedule, 1_000).unwrap();

        let res = try_claim(&delegation, &mut record, &schedule, &user, &key(12), S + ONE_MONTH);
        assert!(matches!(res, Err(VestingError::Unauthorized)));
        assert_eq!(record.total_claimed, 200);
    }
}
