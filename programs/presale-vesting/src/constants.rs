//! Program-wide constants.

/// Seed of the singleton configuration PDA.
pub const CONFIG_SEED: &[u8] = b"vesting_config";

/// Seed of the reward vault token account (treasury reserve).
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";

/// Seed of the per source-mint deposit vault.
pub const SOURCE_VAULT_SEED: &[u8] = b"source_vault";

/// Seed of the per (source mint, user) vesting record.
pub const VESTING_RECORD_SEED: &[u8] = b"vesting_record";

/// Seed of the per (source mint, user) delegation record.
pub const DELEGATION_SEED: &[u8] = b"delegation";

/// Seed of the per-user off-chain authorization nonce.
pub const NONCE_SEED: &[u8] = b"nonce";

/// Max schedules stored in the configuration account.
pub const MAX_SCHEDULES: usize = 16;

/// Initial unlock is expressed in parts per thousand.
pub const PER_MILLE_DENOMINATOR: u64 = 1_000;

/// Max byte length of the signing-domain name given at construction.
pub const MAX_NAME_LEN: usize = 64;

/// Key-derivation context for the signing-domain separator.
pub const DOMAIN_CONTEXT: &str = "presale-vesting 2024-06-01 signing domain";

/// Canonical type string of the off-chain controller transfer message.
pub const TRANSFER_OWNER_TYPE: &[u8] =
    b"TransferOwner(Pubkey sourceMint,Pubkey from,Pubkey to,u64 nonce,i64 deadline)";

/// Prefix of the final typed digest.
pub const TYPED_DIGEST_PREFIX: [u8; 2] = [0x19, 0x01];

/// Native Ed25519 signature-verification program.
pub mod ed25519_program {
    use anchor_lang::prelude::*;

    declare_id!("Ed25519SigVerify111111111111111111111111111");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ed25519_program_id_is_the_native_verifier() {
        assert_eq!(
            ed25519_program::ID.to_string(),
            "Ed25519SigVerify111111111111111111111111111"
        );
        assert_ne!(ed25519_program::ID, anchor_lang::prelude::Pubkey::default());
    }
}
