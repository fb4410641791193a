use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, TransferChecked};

use crate::constants::{CONFIG_SEED, DELEGATION_SEED, SOURCE_VAULT_SEED, VESTING_RECORD_SEED};
use crate::error::VestingError;
use crate::state::{Delegation, VestingConfig, VestingRecord};

/// Locks `amount` of the source token and pays its initial slice right away.
/// Depositing is always self-authorized.
pub fn vest(ctx: Context<Vest>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let source_mint = ctx.accounts.source_mint.key();
    let user = ctx.accounts.user.key();
    let config_bump = ctx.accounts.config.bump;

    let schedule = *ctx.accounts.config.schedule(&source_mint)?;
    require!(schedule.has_started(now), VestingError::VestingDoesNotStart);
    require!(amount > 0, VestingError::InvalidAmount);
    ensure_matching_decimals(
        ctx.accounts.source_mint.decimals,
        ctx.accounts.reward_mint.decimals,
    )?;

    // Book the deposit and the initial slice before any token moves.
    let record = &mut ctx.accounts.vesting_record;
    record.bind(user, source_mint, ctx.bumps.vesting_record);
    let initial_unlock = record.record_vest(&schedule, amount)?;
    let total_vested = record.total_vested;
    let total_claimed = record.total_claimed;

    ctx.accounts
        .delegation
        .bind(user, source_mint, ctx.bumps.delegation);

    token::transfer_checked(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.user_source_account.to_account_info(),
                mint: ctx.accounts.source_mint.to_account_info(),
                to: ctx.accounts.source_vault.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        amount,
        ctx.accounts.source_mint.decimals,
    )?;

    if initial_unlock > 0 {
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
            initial_unlock,
            ctx.accounts.reward_mint.decimals,
        )?;
    }

    emit!(TokensVested {
        source_mint,
        user,
        amount,
        initial_unlock,
        total_vested,
        total_claimed,
        start_ts: schedule.start_ts,
        end_ts: schedule.end_ts,
    });

    Ok(())
}

/// Deposits are credited one reward unit per source unit, which only holds
/// when both mints share a base-unit scale.
pub(crate) fn ensure_matching_decimals(
    source_decimals: u8,
    reward_decimals: u8,
) -> std::result::Result<(), VestingError> {
    if source_decimals != reward_decimals {
        return Err(VestingError::InvalidTokenMint);
    }
    Ok(())
}

#[derive(Accounts)]
pub struct Vest<'info> {
    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, VestingConfig>>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + VestingRecord::SIZE,
        seeds = [VESTING_RECORD_SEED, source_mint.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub vesting_record: Box<Account<'info, VestingRecord>>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + Delegation::SIZE,
        seeds = [DELEGATION_SEED, source_mint.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub delegation: Box<Account<'info, Delegation>>,

    pub source_mint: Box<Account<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = user,
        token::mint = source_mint,
        token::authority = config,
        seeds = [SOURCE_VAULT_SEED, config.key().as_ref(), source_mint.key().as_ref()],
        bump
    )]
    pub source_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = user_source_account.mint == source_mint.key() @ VestingError::InvalidTokenMint,
        constraint = user_source_account.owner == user.key() @ VestingError::InvalidTokenAccount,
    )]
    pub user_source_account: Box<Account<'info, TokenAccount>>,

    #[account(address = config.reward_mint @ VestingError::InvalidTokenMint)]
    pub reward_mint: Box<Account<'info, Mint>>,

    #[account(mut, address = config.reward_vault @ VestingError::InvalidTokenAccount)]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = user_reward_account.mint == config.reward_mint @ VestingError::InvalidTokenMint,
        constraint = user_reward_account.owner == user.key() @ VestingError::InvalidTokenAccount,
    )]
    pub user_reward_account: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct TokensVested {
    pub source_mint: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
    pub initial_unlock: u64,
    pub total_vested: u64,
    pub total_claimed: u64,
    pub start_ts: i64,
    pub end_ts: i64,
}
