pub mod delegation;
pub mod nonce_counter;
pub mod schedule;
pub mod vesting_config;
pub mod vesting_record;

pub use delegation::*;
pub use nonce_counter::*;
pub use schedule::*;
pub use vesting_config::*;
pub use vesting_record::*;
