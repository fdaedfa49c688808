//! Menu state machine
//!
//! Exactly one [`MenuState`] is active. Input handlers move between states
//! directly; status changes observed by the reconciliation loop go through
//! [`MenuState::transition`] so forced transitions stay in one table.

pub mod events;
pub mod machine;

pub use events::StatusEvent;
pub use machine::MenuState;
