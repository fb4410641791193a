use anchor_lang::prelude::*;

use crate::error::VestingError;

/// Per-user counter consumed by every accepted off-chain authorization,
/// across all source mints.
#[account]
#[derive(Default, Debug)]
pub struct NonceCounter {
    pub user: Pubkey,
    pub nonce: u64,
    pub bump: u8,
}

impl NonceCounter {
    pub const SIZE: usize =
        32 + // user
        8 +  // nonce
        1;   // bump

    pub fn bind(&mut self, user: Pubkey, bump: u8) {
        if self.user == Pubkey::default() {
            self.user = user;
            self.bump = bump;
        }
    }

    /// Marks the current nonce as used and returns it.
    pub fn consume(&mut self) -> std::result::Result<u64, VestingError> {
        let used = self.nonce;
        self.nonce = used.checked_add(1).ok_or(VestingError::MathOverflow)?;
        Ok(used)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_is_strictly_increasing() {
        let mut n = NonceCounter::default();
        assert_eq!(n.consume().unwrap(), 0);
        assert_eq!(n.consume().unwrap(), 1);
        assert_eq!(n.nonce, 2);
    }

    #[test]
    fn exhausted_counter_fails_without_wrapping() {
        let mut n = NonceCounter {
            nonce: u64::MAX,
            ..Default::default()
        };
        assert!(matches!(n.consume(), Err(VestingError::MathOverflow)));
        assert_eq!(n.nonce, u64::MAX);
    }
}
