//! Collaborator traits
//!
//! These traits define the interface between the menu core and the two
//! things it drives: the LCD and the printer host.

pub mod controller;
pub mod display;

pub use controller::{
    Axis, CommandError, FileList, Heater, HomedAxes, JobState, Position, PrintProgress,
    PrinterController, PrinterStatus, ProbeStatus, StatusUnavailable, MAX_FILES, MAX_MESSAGE_LEN,
    MAX_PATH_LEN,
};
pub use display::{
    Color, DisplayError, DisplayExt, DisplaySurface, Font, Rect, ScrollDirection, TextStyle,
};
