// Shared errors
pub mod trade_error;

pub use trade_error::*;
