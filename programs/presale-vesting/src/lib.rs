//! Presale vesting program.
//!
//! Users lock a presale (source) token and receive the reward token over a
//! per-source linear schedule, with part of every deposit released at once.
//! Claiming can be handed to another key, either by a direct call or by a
//! signed message relayed by anyone.
//!
//! Accounts:
//! - `VestingConfig` (singleton): admin, reward mint/vault, signing domain,
//!   immutable schedules.
//! - `VestingRecord` per (source mint, user): vested and claimed totals.
//! - `Delegation` per (source mint, user): current controller.
//! - `NonceCounter` per user: replay protection for signed hand-overs.
pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

use anchor_lang::prelude::*;

pub use instructions::*;
pub use state::ScheduleConfig;
pub use utils::signature::TransferOwnerMessage;

declare_id!("3nbexmEX468WmmxGpwWKRLqJ3xn4xCWUU5LESmhcygTD");

#[program]
pub mod presale_vesting {
    use super::*;

    /// Creates the config, the reward vault and every schedule in one step.
    /// Lists are parallel: entry `i` of each describes one source mint.
    pub fn initialize(
        ctx: Context<Initialize>,
        admin: Pubkey,
        name: String,
        source_mints: Vec<Pubkey>,
        start_timestamps: Vec<i64>,
        end_timestamps: Vec<i64>,
        initial_unlocks: Vec<u16>,
    ) -> Result<()> {
        instructions::initialize::initialize(
            ctx,
            admin,
            name,
            source_mints,
            start_timestamps,
            end_timestamps,
            initial_unlocks,
        )
    }

    pub fn vest(ctx: Context<Vest>, amount: u64) -> Result<()> {
        instructions::vest::vest(ctx, amount)
    }

    pub fn claim(ctx: Context<Claim>, source_mint: Pubkey, user: Pubkey) -> Result<()> {
        instructions::claim::claim(ctx, source_mint, user)
    }

    pub fn transfer_owner_on_chain(
        ctx: Context<TransferOwnerOnChain>,
        source_mint: Pubkey,
        user: Pubkey,
        new_controller: Pubkey,
    ) -> Result<()> {
        instructions::transfer_owner_on_chain::transfer_owner_on_chain(
            ctx,
            source_mint,
            user,
            new_controller,
        )
    }

    pub fn transfer_owner_off_chain(
        ctx: Context<TransferOwnerOffChain>,
        message: TransferOwnerMessage,
    ) -> Result<()> {
        instructions::transfer_owner_off_chain::transfer_owner_off_chain(ctx, message)
    }

    pub fn force_transfer(ctx: Context<ForceTransfer>, amount: u64) -> Result<()> {
        instructions::force_transfer::force_transfer(ctx, amount)
    }

    pub fn get_config(ctx: Context<GetConfig>, source_mint: Pubkey) -> Result<ScheduleConfig> {
        instructions::views::get_config(ctx, source_mint)
    }

    pub fn get_vesting_record(
        ctx: Context<GetUserState>,
        source_mint: Pubkey,
        user: Pubkey,
    ) -> Result<VestingRecordView> {
        instructions::views::get_vesting_record(ctx, source_mint, user)
    }

    pub fn get_controller(
        ctx: Context<GetUserState>,
        source_mint: Pubkey,
        user: Pubkey,
    ) -> Result<Pubkey> {
        instructions::views::get_controller(ctx, source_mint, user)
    }

    pub fn get_unlocked_reward(
        ctx: Context<GetUserState>,
        source_mint: Pubkey,
        user: Pubkey,
    ) -> Result<u64> {
        instructions::views::get_unlocked_reward(ctx, source_mint, user)
    }

    pub fn get_nonce(ctx: Context<GetNonce>, user: Pubkey) -> Result<u64> {
        instructions::views::get_nonce(ctx, user)
    }
}
