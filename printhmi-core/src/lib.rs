//! Board-agnostic menu core for encoder-driven printer LCDs
//!
//! This crate contains the interaction logic of the printer display and
//! nothing that depends on a particular panel, serial link or printer host:
//!
//! - Selection cursor and scrolling window bookkeeping
//! - Encoder event translation (fast rotation, long press)
//! - The menu state machine and its per-state handlers
//! - Value editing with per-field bounds and commit actions
//! - The periodic reconciliation loop against controller status
//! - Display surface and printer controller traits
//! - Configuration type definitions and validation

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod config;
pub mod edit;
pub mod hmi;
pub mod input;
pub mod menu;
pub mod render;
pub mod runtime;
pub mod state;
pub mod traits;

pub use hmi::{Hmi, HmiError};
pub use state::MenuState;
