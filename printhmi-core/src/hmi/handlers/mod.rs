//! Input handlers, one per menu state
//!
//! Every handler receives the symbol already taken from the latch and
//! returns after at most one transition.

mod edit;
mod menus;
mod popups;
mod print;
mod probe;
