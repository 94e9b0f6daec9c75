//! Wire-level request and response types.

pub mod bytes;
pub mod health;
pub mod stats;
pub mod user;
