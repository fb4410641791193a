use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, DELEGATION_SEED};
use crate::state::{Delegation, VestingConfig};

/// Direct controller hand-over by the current controller (or the user while
/// undelegated). `new_controller` equal to `user` or the default key returns
/// control to the user.
pub fn transfer_owner_on_chain(
    ctx: Context<TransferOwnerOnChain>,
    source_mint: Pubkey,
    user: Pubkey,
    new_controller: Pubkey,
) -> Result<()> {
    ctx.accounts.config.schedule(&source_mint)?;

    let caller = ctx.accounts.caller.key();
    let delegation = &mut ctx.accounts.delegation;
    delegation.bind(user, source_mint, ctx.bumps.delegation);
    delegation.authorize(&user, &caller)?;
    let previous_controller = delegation.set_controller(&user, new_controller)?;

    emit!(ControllerTransferred {
        source_mint,
        user,
        previous_controller,
        new_controller: delegation.controller,
        authorized_by: caller,
        via_signature: false,
        nonce: None,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(source_mint: Pubkey, user: Pubkey)]
pub struct TransferOwnerOnChain<'info> {
    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, VestingConfig>>,

    #[account(
        init_if_needed,
        payer = caller,
        space = 8 + Delegation::SIZE,
        seeds = [DELEGATION_SEED, source_mint.as_ref(), user.as_ref()],
        bump
    )]
    pub delegation: Box<Account<'info, Delegation>>,

    #[account(mut)]
    pub caller: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Emitted by both delegation paths.
#[event]
pub struct ControllerTransferred {
    pub source_mint: Pubkey,
    pub user: Pubkey,
    pub previous_controller: Pubkey,
    /// `Pubkey::default()` when control went back to the user.
    pub new_controller: Pubkey,
    /// Transaction signer for direct calls, message signer for signed ones.
    pub authorized_by: Pubkey,
    pub via_signature: bool,
    /// Nonce consumed by a signed authorization.
    pub nonce: Option<u64>,
}
