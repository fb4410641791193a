use anchor_lang::prelude::*;

use crate::error::VestingError;

/// Claim authority over one (source mint, user) record.
///
/// `controller == Pubkey::default()` means the user acts for themself.
/// Any other value is exclusive: the user loses claim and re-delegation
/// rights until the controller hands them back.
#[account]
#[derive(Default, Debug)]
pub struct Delegation {
    pub user: Pubkey,
    pub source_mint: Pubkey,
    pub controller: Pubkey,
    pub bump: u8,
}

impl Delegation {
    pub const SIZE: usize =
        32 + // user
        32 + // source_mint
        32 + // controller
        1;   // bump

    /// Fills in identity fields of a freshly created account.
    pub fn bind(&mut self, user: Pubkey, source_mint: Pubkey, bump: u8) {
        if self.user == Pubkey::default() {
            self.user = user;
            self.source_mint = source_mint;
            self.bump = bump;
        }
    }

    pub fn is_delegated(&self) -> bool {
        self.controller != Pubkey::default()
    }

    /// Whether `caller` may claim for, or re-delegate, `user`'s record.
    pub fn can_act(&self, user: &Pubkey, caller: &Pubkey) -> bool {
        if self.is_delegated() {
            *caller == self.controller
        } else {
            caller == user
        }
    }

    pub fn authorize(
        &self,
        user: &Pubkey,
        caller: &Pubkey,
    ) -> std::result::Result<(), VestingError> {
        if self.can_act(user, caller) {
            Ok(())
        } else {
            Err(VestingError::Unauthorized)
        }
    }

    /// Hands control to `new_controller`; the user themself maps to the unset
    /// value. Re-assigning the controller already in force is rejected.
    /// Returns the previous controller.
    pub fn set_controller(
        &mut self,
        user: &Pubkey,
        new_controller: Pubkey,
    ) -> std::result::Result<Pubkey, VestingError> {
        let next = if new_controller == *user {
            Pubkey::default()
        } else {
            new_controller
        };
        if next == self.controller {
            return Err(VestingError::ControllerUnchanged);
        }
        let previous = self.controller;
        self.controller = next;
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(b: u8) -> Pubkey {
        Pubkey::new_from_array([b; 32])
    }

    #[test]
    fn unset_means_only_user_acts() {
        let d = Delegation::default();
        let user = key(1);
        assert!(d.can_act(&user, &user));
        assert!(!d.can_act(&user, &key(2)));
        assert!(!d.can_act(&user, &Pubkey::default()));
    }

    #[test]
    fn delegation_is_exclusive() {
        let user = key(1);
        let controller = key(2);
        let mut d = Delegation::default();
        assert_eq!(d.set_controller(&user, controller).unwrap(), Pubkey::default());

        assert!(d.can_act(&user, &controller));
        assert!(!d.can_act(&user, &user));
        assert!(!d.can_act(&user, &key(3)));
    }

    #[test]
    fn authorize_maps_to_unauthorized() {
        let user = key(1);
        let mut d = Delegation::default();
        assert!(d.authorize(&user, &user).is_ok());
        d.set_controller(&user, key(2)).unwrap();
        assert!(matches!(d.authorize(&user, &user), Err(VestingError::Unauthorized)));
        assert!(d.authorize(&user, &key(2)).is_ok());
    }

    #[test]
    fn same_value_transfer_rejected() {
        let user = key(1);
        let mut d = Delegation::default();
        d.set_controller(&user, key(2)).unwrap();
        assert!(matches!(
            d.set_controller(&user, key(2)),
            Err(VestingError::ControllerUnchanged)
        ));
        assert_eq!(d.controller, key(2));
    }

    #[test]
    fn delegating_to_self_while_unset_rejected() {
        let user = key(1);
        let mut d = Delegation::default();
        assert!(matches!(
            d.set_controller(&user, user),
            Err(VestingError::ControllerUnchanged)
        ));
        assert!(matches!(
            d.set_controller(&user, Pubkey::default()),
            Err(VestingError::ControllerUnchanged)
        ));
    }

    #[test]
    fn control_returns_to_user() {
        let user = key(1);
        let controller = key(2);
        let mut d = Delegation::default();
        d.set_controller(&user, controller).unwrap();

        // handing back via the user's own key normalises to unset
        assert_eq!(d.set_controller(&user, user).unwrap(), controller);
        assert!(!d.is_delegated());
        assert!(d.can_act(&user, &user));
        assert!(!d.can_act(&user, &controller));

        d.set_controller(&user, controller).unwrap();
        d.set_controller(&user, Pubkey::default()).unwrap();
        assert!(d.can_act(&user, &user));
    }

    #[test]
    fn controller_naming_itself_does_not_return_control() {
        let user = key(1);
        let controller = key(2);
        let mut d = Delegation::default();
        d.set_controller(&user, controller).unwrap();

        assert!(matches!(
            d.set_controller(&user, controller),
            Err(VestingError::ControllerUnchanged)
        ));
        assert!(d.can_act(&user, &controller));
        assert!(!d.can_act(&user, &user));
    }

    #[test]
    fn controller_can_pass_control_on() {
        let user = key(1);
        let mut d = Delegation::default();
        d.set_controller(&user, key(2)).unwrap();
        assert!(d.can_act(&user, &key(2)));
        d.set_controller(&user, key(3)).unwrap();
        assert!(!d.can_act(&user, &key(2)));
        assert!(d.can_act(&user, &key(3)));
    }

    #[test]
    fn bind_only_fills_fresh_accounts() {
        let mut d = Delegation::default();
        d.bind(key(1), key(5), 250);
        d.bind(key(9), key(9), 1);
        assert_eq!(d.user, key(1));
        assert_eq!(d.source_mint, key(5));
        assert_eq!(d.bump, 250);
    }
}
