use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, TransferChecked};

use crate::constants::CONFIG_SEED;
use crate::error::VestingError;
use crate::state::VestingConfig;

/// Admin sweep of a program-owned token account. Vesting and delegation
/// records are left untouched.
pub fn force_transfer(ctx: Context<ForceTransfer>, amount: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    cfg.authorize_admin(&ctx.accounts.admin.key())?;
    require!(amount > 0, VestingError::InvalidAmount);

    let signer_seeds: &[&[&[u8]]] = &[&[CONFIG_SEED, &[cfg.bump]]];
    token::transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.vault.to_account_info(),
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
                authority: ctx.accounts.config.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
        ctx.accounts.mint.decimals,
    )?;

    msg!(
        "force transfer: {} of mint {} to {}",
        amount,
        ctx.accounts.mint.key(),
        ctx.accounts.destination.key()
    );

    emit!(ForceTransferred {
        admin: cfg.admin,
        mint: ctx.accounts.mint.key(),
        vault: ctx.accounts.vault.key(),
        destination: ctx.accounts.destination.key(),
        amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ForceTransfer<'info> {
    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, VestingConfig>>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        constraint = vault.mint == mint.key() @ VestingError::InvalidTokenMint,
        constraint = vault.owner == config.key() @ VestingError::InvalidTokenAccount,
    )]
    pub vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = destination.mint == mint.key() @ VestingError::InvalidTokenMint,
    )]
    pub destination: Box<Account<'info, TokenAccount>>,

    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct ForceTransferred {
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
}
