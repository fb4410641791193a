use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::solana_program::sysvar::instructions::{
    self as sysvar_instructions, load_current_index_checked, load_instruction_at_checked,
};

use crate::constants::{ed25519_program, CONFIG_SEED, DELEGATION_SEED, NONCE_SEED};
use crate::error::VestingError;
use crate::instructions::ControllerTransferred;
use crate::state::{Delegation, NonceCounter, VestingConfig};
use crate::utils::signature::{self, TransferOwnerMessage};

/// Controller hand-over authorized by `message.from`'s signature. Anyone may
/// relay it; the Ed25519 verification instruction must come right before
/// this one in the same transaction.
pub fn transfer_owner_off_chain(
    ctx: Context<TransferOwnerOffChain>,
    message: TransferOwnerMessage,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    cfg.schedule(&message.source_mint)?;

    let ed25519_ix = preceding_instruction(&ctx.accounts.ix_sysvar)?;
    require_keys_eq!(
        ed25519_ix.program_id,
        ed25519_program::ID,
        VestingError::SignatureInvalid
    );
    let now = Clock::get()?.unix_timestamp;

    let delegation = &mut ctx.accounts.delegation;
    delegation.bind(message.from, message.source_mint, ctx.bumps.delegation);
    let counter = &mut ctx.accounts.nonce_counter;
    counter.bind(message.from, ctx.bumps.nonce_counter);

    let accepted = apply_signed_transfer(
        &message,
        &cfg.domain_separator,
        &ed25519_ix.data,
        now,
        delegation,
        counter,
    )?;

    emit!(ControllerTransferred {
        source_mint: message.source_mint,
        user: message.from,
        previous_controller: accepted.previous_controller,
        new_controller: delegation.controller,
        authorized_by: message.from,
        via_signature: true,
        nonce: Some(accepted.nonce),
    });

    Ok(())
}

pub(crate) struct AcceptedTransfer {
    pub previous_controller: Pubkey,
    pub nonce: u64,
}

/// Checks a signed hand-over against current state and applies it.
/// Order: signature, expiry, exclusivity, then nonce consumption and the
/// controller change. Nothing is mutated unless every check passes.
pub(crate) fn apply_signed_transfer(
    message: &TransferOwnerMessage,
    domain_separator: &[u8; 32],
    ed25519_ix_data: &[u8],
    now_ts: i64,
    delegation: &mut Delegation,
    counter: &mut NonceCounter,
) -> std::result::Result<AcceptedTransfer, VestingError> {
    if !signature::signed_by_owner(message, counter.nonce, domain_separator, ed25519_ix_data) {
        return Err(VestingError::SignatureInvalid);
    }
    if message.is_expired(now_ts) {
        return Err(VestingError::SignatureExpired);
    }
    // A signature never outranks an existing delegation.
    delegation.authorize(&message.from, &message.from)?;

    let mut next = delegation.clone();
    let previous_controller = next.set_controller(&message.from, message.to)?;
    let nonce = counter.consume()?;
    *delegation = next;

    Ok(AcceptedTransfer {
        previous_controller,
        nonce,
    })
}

fn preceding_instruction(ix_sysvar: &AccountInfo) -> Result<Instruction> {
    let current = load_current_index_checked(ix_sysvar)? as usize;
    require!(current > 0, VestingError::SignatureInvalid);
    Ok(load_instruction_at_checked(current - 1, ix_sysvar)?)
}

#[derive(Accounts)]
#[instruction(message: TransferOwnerMessage)]
pub struct TransferOwnerOffChain<'info> {
    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, VestingConfig>>,

    #[account(
        init_if_needed,
        payer = relayer,
        space = 8 + Delegation::SIZE,
        seeds = [DELEGATION_SEED, message.source_mint.as_ref(), message.from.as_ref()],
        bump
    )]
    pub delegation: Box<Account<'info, Delegation>>,

    #[account(
        init_if_needed,
        payer = relayer,
        space = 8 + NonceCounter::SIZE,
        seeds = [NONCE_SEED, message.from.as_ref()],
        bump
    )]
    pub nonce_counter: Box<Account<'info, NonceCounter>>,

    /// CHECK: address-constrained to the instructions sysvar.
    #[account(address = sysvar_instructions::ID)]
    pub ix_sysvar: UncheckedAccount<'info>,

    #[account(mut)]
    pub relayer: Signer<'info>,

    pub system_program: Program<'info, System>,
}
