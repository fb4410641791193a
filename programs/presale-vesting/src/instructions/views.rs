//! Read-only accessors. Records are created lazily, so the PDAs are taken
//! unchecked (seed-constrained) and read as defaults when absent.

use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, DELEGATION_SEED, NONCE_SEED, VESTING_RECORD_SEED};
use crate::error::VestingError;
use crate::state::{Delegation, NonceCounter, ScheduleConfig, VestingConfig, VestingRecord};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct VestingRecordView {
    pub total_vested: u64,
    pub total_claimed: u64,
}

pub fn get_config(ctx: Context<GetConfig>, source_mint: Pubkey) -> Result<ScheduleConfig> {
    Ok(*ctx.accounts.config.schedule(&source_mint)?)
}

pub fn get_vesting_record(
    ctx: Context<GetUserState>,
    _source_mint: Pubkey,
    _user: Pubkey,
) -> Result<VestingRecordView> {
    let record: VestingRecord = load_or_default(&ctx.accounts.vesting_record)?;
    Ok(VestingRecordView {
        total_vested: record.total_vested,
        total_claimed: record.total_claimed,
    })
}

pub fn get_controller(
    ctx: Context<GetUserState>,
    _source_mint: Pubkey,
    _user: Pubkey,
) -> Result<Pubkey> {
    let delegation: Delegation = load_or_default(&ctx.accounts.delegation)?;
    Ok(delegation.controller)
}

/// Reward claimable right now; zero for unknown users and settled records.
pub fn get_unlocked_reward(
    ctx: Context<GetUserState>,
    source_mint: Pubkey,
    user: Pubkey,
) -> Result<u64> {
    let schedule = *ctx.accounts.config.schedule(&source_mint)?;
    let record: VestingRecord = load_or_default(&ctx.accounts.vesting_record)?;
    let now = Clock::get()?.unix_timestamp;
    let unlocked = record.unlocked(&schedule, now)?;
    let claimable = record.claimable(&schedule, now)?;

    emit!(UnlockedRewardQuote {
        source_mint,
        user,
        total_vested: record.total_vested,
        total_claimed: record.total_claimed,
        unlocked,
        claimable,
    });

    Ok(claimable)
}

pub fn get_nonce(ctx: Context<GetNonce>, _user: Pubkey) -> Result<u64> {
    let counter: NonceCounter = load_or_default(&ctx.accounts.nonce_counter)?;
    Ok(counter.nonce)
}

fn load_or_default<T>(info: &AccountInfo) -> Result<T>
where
    T: AccountDeserialize + Default,
{
    let data = info.try_borrow_data()?;
    decode_or_default(info.owner, &data)
}

/// An absent (empty) account reads as the default value; anything else must
/// be ours and decode cleanly.
fn decode_or_default<T>(owner: &Pubkey, data: &[u8]) -> Result<T>
where
    T: AccountDeserialize + Default,
{
    if data.is_empty() {
        return Ok(T::default());
    }
    require_keys_eq!(*owner, crate::ID, VestingError::InvalidPubkey);
    T::try_deserialize(&mut &data[..])
}

#[derive(Accounts)]
pub struct GetConfig<'info> {
    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, VestingConfig>>,
}

#[derive(Accounts)]
#[instruction(source_mint: Pubkey, user: Pubkey)]
pub struct GetUserState<'info> {
    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, VestingConfig>>,

    /// CHECK: PDA checked by seeds; may not exist yet.
    #[account(seeds = [VESTING_RECORD_SEED, source_mint.as_ref(), user.as_ref()], bump)]
    pub vesting_record: UncheckedAccount<'info>,

    /// CHECK: PDA checked by seeds; may not exist yet.
    #[account(seeds = [DELEGATION_SEED, source_mint.as_ref(), user.as_ref()], bump)]
    pub delegation: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct GetNonce<'info> {
    /// CHECK: PDA checked by seeds; may not exist yet.
    #[account(seeds = [NONCE_SEED, user.as_ref()], bump)]
    pub nonce_counter: UncheckedAccount<'info>,
}

#[event]
pub struct UnlockedRewardQuote {
    pub source_mint: Pubkey,
    pub user: Pubkey,
    pub total_vested: u64,
    pub total_claimed: u64,
    pub unlocked: u64,
    pub claimable: u64,
}
