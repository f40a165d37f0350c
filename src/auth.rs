//! Token secrets and the per-request credential pair.

pub mod credentials;
pub mod secret;

pub use credentials::*;
pub use secret::*;
