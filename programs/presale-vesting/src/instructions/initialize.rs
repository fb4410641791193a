use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{CONFIG_SEED, MAX_NAME_LEN, REWARD_VAULT_SEED};
use crate::error::VestingError;
use crate::state::VestingConfig;
use crate::utils::signature;

/// Registers every schedule at once. Any invalid entry aborts the whole call,
/// so a partial schedule set is never stored.
pub fn initialize(
    ctx: Context<Initialize>,
    admin: Pubkey,
    name: String,
    source_mints: Vec<Pubkey>,
    start_timestamps: Vec<i64>,
    end_timestamps: Vec<i64>,
    initial_unlocks: Vec<u16>,
) -> Result<()> {
    require!(admin != Pubkey::default(), VestingError::InvalidPubkey);
    require!(name.len() <= MAX_NAME_LEN, VestingError::NameTooLong);

    let schedules = VestingConfig::build_schedules(
        &source_mints,
        &start_timestamps,
        &end_timestamps,
        &initial_unlocks,
    )?;

    let config_key = ctx.accounts.config.key();
    let cfg = &mut ctx.accounts.config;
    cfg.admin = admin;
    cfg.reward_mint = ctx.accounts.reward_mint.key();
    cfg.reward_vault = ctx.accounts.reward_vault.key();
    cfg.domain_separator = signature::domain_separator(&name, &crate::ID, &config_key);
    cfg.schedules = schedules;
    cfg.bump = ctx.bumps.config;
    cfg.reward_vault_bump = ctx.bumps.reward_vault;

    msg!("presale vesting: {} schedules registered", cfg.schedules.len());

    emit!(VestingInitialized {
        admin,
        reward_mint: cfg.reward_mint,
        reward_vault: cfg.reward_vault,
        schedule_count: cfg.schedules.len() as u8,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = payer,
        space = 8 + VestingConfig::SIZE,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Box<Account<'info, VestingConfig>>,

    #[account(
        init,
        payer = payer,
        token::mint = reward_mint,
        token::authority = config,
        seeds = [REWARD_VAULT_SEED, config.key().as_ref()],
        bump
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    pub reward_mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct VestingInitialized {
    pub admin: Pubkey,
    pub reward_mint: Pubkey,
    pub reward_vault: Pubkey,
    pub schedule_count: u8,
}
