//! Configuration types
//!
//! Board-agnostic configuration structures. Host tooling deserializes
//! these from TOML; every constructor validates its input so a bad value
//! is rejected at load time rather than when the menu reaches it.

pub mod error;
pub mod pins;
pub mod types;

pub use error::ConfigError;
pub use pins::*;
pub use types::*;
