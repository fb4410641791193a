pub mod claim;
pub mod force_transfer;
pub mod initialize;
pub mod transfer_owner_off_chain;
pub mod transfer_owner_on_chain;
pub mod vest;
pub mod views;

pub use claim::*;
pub use force_transfer::*;
pub use initialize::*;
pub use transfer_owner_off_chain::*;
pub use transfer_owner_on_chain::*;
pub use vest::*;
pub use views::*;
