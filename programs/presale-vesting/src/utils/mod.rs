pub mod signature;
pub mod unlock;
