//! Off-chain controller transfer authorization.
//!
//! The owner signs a 32-byte typed digest with their wallet key. The relayer
//! submits an Ed25519 native-program instruction carrying that signature
//! immediately before `transfer_owner_off_chain`; the native program rejects
//! the transaction if the signature does not verify, so here we only need to
//! read back which key signed which message.
//!
//! digest = blake3(0x19 0x01 || domain_separator || struct_hash)
//! struct_hash = blake3(type_hash || source_mint || from || to || nonce || deadline)

use anchor_lang::prelude::*;

use crate::constants::{DOMAIN_CONTEXT, TRANSFER_OWNER_TYPE, TYPED_DIGEST_PREFIX};

/// Ed25519 instruction layout (see the native program):
/// num_signatures: u8, padding: u8, then per signature seven u16 offsets.
const SIGNATURE_OFFSETS_START: usize = 2;
const SIGNATURE_OFFSETS_SERIALIZED_SIZE: usize = 14;
const PUBKEY_SERIALIZED_SIZE: usize = 32;
/// Instruction index meaning "data lives in the Ed25519 instruction itself".
const CURRENT_INSTRUCTION: u16 = u16::MAX;

/// Request to hand control of `(source_mint, from)` to `to`, signed by `from`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferOwnerMessage {
    pub source_mint: Pubkey,
    pub from: Pubkey,
    pub to: Pubkey,
    /// Last Unix second at which the authorization is accepted.
    pub deadline: i64,
}

impl TransferOwnerMessage {
    pub fn struct_hash(&self, nonce: u64) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&type_hash());
        hasher.update(self.source_mint.as_ref());
        hasher.update(self.from.as_ref());
        hasher.update(self.to.as_ref());
        hasher.update(&nonce.to_le_bytes());
        hasher.update(&self.deadline.to_le_bytes());
        *hasher.finalize().as_bytes()
    }

    /// Message the owner signs for the given nonce and signing domain.
    pub fn digest(&self, nonce: u64, domain_separator: &[u8; 32]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&TYPED_DIGEST_PREFIX);
        hasher.update(domain_separator);
        hasher.update(&self.struct_hash(nonce));
        *hasher.finalize().as_bytes()
    }

    pub fn is_expired(&self, now_ts: i64) -> bool {
        now_ts > self.deadline
    }
}

pub fn type_hash() -> [u8; 32] {
    *blake3::hash(TRANSFER_OWNER_TYPE).as_bytes()
}

/// Separator binding signatures to one program name, program id and config.
pub fn domain_separator(name: &str, program_id: &Pubkey, config: &Pubkey) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new_derive_key(DOMAIN_CONTEXT);
    hasher.update(&(name.len() as u32).to_le_bytes());
    hasher.update(name.as_bytes());
    hasher.update(program_id.as_ref());
    hasher.update(config.as_ref());
    *hasher.finalize().as_bytes()
}

/// True when the Ed25519 instruction data carries `message.from`'s
/// signature over the digest for `nonce`.
pub fn signed_by_owner(
    message: &TransferOwnerMessage,
    nonce: u64,
    domain_separator: &[u8; 32],
    ed25519_ix_data: &[u8],
) -> bool {
    let digest = message.digest(nonce, domain_separator);
    has_signature(ed25519_ix_data, &message.from, &digest)
}

/// Looks for an inline signature entry by `signer` over `digest`. Entries
/// from other keys are skipped, whatever they sign.
pub fn has_signature(ed25519_ix_data: &[u8], signer: &Pubkey, digest: &[u8; 32]) -> bool {
    let Some(&count) = ed25519_ix_data.first() else {
        return false;
    };
    (0..count as usize).any(|i| entry(ed25519_ix_data, i) == Some((*signer, *digest)))
}

/// Public key and 32-byte message of inline entry `i`, if well formed.
fn entry(data: &[u8], i: usize) -> Option<(Pubkey, [u8; 32])> {
    let base = SIGNATURE_OFFSETS_START + i * SIGNATURE_OFFSETS_SERIALIZED_SIZE;
    let signature_ix = read_u16(data, base + 2)?;
    let pubkey_offset = read_u16(data, base + 4)? as usize;
    let pubkey_ix = read_u16(data, base + 6)?;
    let message_offset = read_u16(data, base + 8)? as usize;
    let message_size = read_u16(data, base + 10)? as usize;
    let message_ix = read_u16(data, base + 12)?;

    // Offsets pointing into other instructions are not accepted.
    if signature_ix != CURRENT_INSTRUCTION
        || pubkey_ix != CURRENT_INSTRUCTION
        || message_ix != CURRENT_INSTRUCTION
    {
        return None;
    }

    let signed: [u8; 32] = data
        .get(message_offset..message_offset.checked_add(message_size)?)?
        .try_into()
        .ok()?;
    let key: [u8; 32] = data
        .get(pubkey_offset..pubkey_offset.checked_add(PUBKEY_SERIALIZED_SIZE)?)?
        .try_into()
        .ok()?;
    Some((Pubkey::new_from_array(key), signed))
}

fn read_u16(data: &[u8], at: usize) -> Option<u16> {
    let bytes = data.get(at..at.checked_add(2)?)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}
