//! Encoder input
//!
//! Raw encoder edges become [`KeyEvent`]s in the [`EncoderTranslator`];
//! the menu consumes them as [`InputSymbol`]s through a one-slot latch.

pub mod encoder;
pub mod events;

pub use encoder::{EncoderTranslator, Rotation};
pub use events::{InputLatch, InputSymbol, KeyEvent};
