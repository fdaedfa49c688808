//! Printer controller facade
//!
//! The printer host owns motion, heaters, files and G-code. The menu reads
//! a cached status snapshot and submits fire-and-forget commands; long
//! operations (homing, printing) are observed through later snapshots.

use core::fmt;

use heapless::{String, Vec};

use crate::config::MaterialPresets;

/// Maximum file path length
pub const MAX_PATH_LEN: usize = 64;

/// Maximum files listed from storage
pub const MAX_FILES: usize = 64;

/// Maximum message length (status text, error text)
pub const MAX_MESSAGE_LEN: usize = 96;

/// Flat list of printable file paths, `/` separated
pub type FileList = Vec<String<MAX_PATH_LEN>, MAX_FILES>;

/// Top-level print job state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JobState {
    #[default]
    Standby,
    Printing,
    Paused,
    Complete,
    Cancelled,
    Error,
}

impl JobState {
    /// Map a host job state name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "standby" | "operational" => Some(JobState::Standby),
            "printing" => Some(JobState::Printing),
            "paused" | "pausing" => Some(JobState::Paused),
            "complete" => Some(JobState::Complete),
            "cancelled" => Some(JobState::Cancelled),
            "error" => Some(JobState::Error),
            _ => None,
        }
    }
}

/// Current and target temperature of a heater (°C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Heater {
    pub current_c: i16,
    pub target_c: i16,
}

impl Heater {
    /// Check if the heater is still climbing toward its target
    pub fn is_heating(&self) -> bool {
        self.current_c < self.target_c
    }
}

/// Motion axes reachable from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
    Z,
    E,
}

impl Axis {
    /// Axis letter
    pub fn letter(&self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
            Axis::E => 'E',
        }
    }
}

/// Toolhead position (µm)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    pub x_um: i32,
    pub y_um: i32,
    pub z_um: i32,
    pub e_um: i32,
}

impl Position {
    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x_um,
            Axis::Y => self.y_um,
            Axis::Z => self.z_um,
            Axis::E => self.e_um,
        }
    }
}

/// Homed flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HomedAxes {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl HomedAxes {
    pub fn all(&self) -> bool {
        self.x && self.y && self.z
    }
}

/// Live manual probe state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProbeStatus {
    /// Nozzle height being tested (µm)
    pub z_um: i32,
}

/// Print progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PrintProgress {
    /// File progress in tenths of a percent (0-1000)
    pub permille: u16,
    /// Time spent printing (s)
    pub elapsed_s: u32,
}

impl PrintProgress {
    /// Whole percent, 0-100
    pub fn percent(&self) -> u8 {
        (self.permille.min(1000) / 10) as u8
    }

    /// Check if the file has been fully consumed
    pub fn is_finished(&self) -> bool {
        self.permille >= 1000
    }

    /// Estimated time left, extrapolated from progress so far
    pub fn remaining_s(&self) -> u32 {
        if self.permille == 0 {
            return 0;
        }
        let total = self.elapsed_s as u64 * 1000 / self.permille.min(1000) as u64;
        (total as u32).saturating_sub(self.elapsed_s)
    }
}

/// Snapshot of everything the menu shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PrinterStatus {
    pub job: JobState,
    pub hotend: Heater,
    pub bed: Heater,
    /// Part fan (percent)
    pub fan_percent: u8,
    /// Speed factor (percent)
    pub feedrate_percent: i32,
    /// Extrusion factor (percent)
    pub flow_percent: i32,
    pub position: Position,
    pub homed: HomedAxes,
    /// Applied Z offset (µm)
    pub z_offset_um: i32,
    /// Present while manual probing is active
    pub probe: Option<ProbeStatus>,
    pub progress: PrintProgress,
    /// File being printed
    pub file_name: String<MAX_PATH_LEN>,
    /// Operator message (empty when none)
    pub message: String<MAX_MESSAGE_LEN>,
    /// Controller error text, meaningful in [`JobState::Error`]
    pub error_message: String<MAX_MESSAGE_LEN>,
}

impl PrinterStatus {
    /// Check if any value drawn in the status area differs
    pub fn status_area_differs(&self, other: &PrinterStatus) -> bool {
        self.hotend != other.hotend
            || self.bed != other.bed
            || self.fan_percent != other.fan_percent
            || self.feedrate_percent != other.feedrate_percent
            || self.flow_percent != other.flow_percent
            || self.z_offset_um != other.z_offset_um
    }

    /// Check if the job is paused
    pub fn is_paused(&self) -> bool {
        self.job == JobState::Paused
    }
}

/// Status could not be read this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusUnavailable;

impl fmt::Display for StatusUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("printer status unavailable")
    }
}

/// Command submission failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Host rejected the command, with its reason
    Rejected(String<MAX_MESSAGE_LEN>),
    /// Host is not ready (starting up or shut down)
    NotReady,
    /// Another command is still running
    Busy,
}

impl CommandError {
    /// Build a rejection from a host message, truncating to fit
    pub fn rejected(reason: &str) -> Self {
        let mut msg = String::new();
        for c in reason.chars() {
            if msg.push(c).is_err() {
                break;
            }
        }
        CommandError::Rejected(msg)
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Rejected(reason) => f.write_str(reason),
            CommandError::NotReady => f.write_str("printer not ready"),
            CommandError::Busy => f.write_str("printer busy"),
        }
    }
}

/// Trait for the printer host
///
/// Status reads must not block; they return the host's cached state.
pub trait PrinterController {
    /// Read the current status snapshot
    fn status(&mut self) -> Result<PrinterStatus, StatusUnavailable>;

    /// List printable files as full paths
    fn file_paths(&mut self, out: &mut FileList) -> Result<(), CommandError>;

    /// Set hotend target (°C)
    fn set_hotend_target(&mut self, celsius: i16) -> Result<(), CommandError>;

    /// Set bed target (°C)
    fn set_bed_target(&mut self, celsius: i16) -> Result<(), CommandError>;

    /// Set part fan speed (percent)
    fn set_fan_speed(&mut self, percent: u8) -> Result<(), CommandError>;

    /// Set speed factor (percent)
    fn set_feedrate(&mut self, percent: i32) -> Result<(), CommandError>;

    /// Absolute move of one axis
    ///
    /// - `position_um`: target position
    /// - `feedrate`: mm/min
    fn move_axis(&mut self, axis: Axis, position_um: i32, feedrate: u32) -> Result<(), CommandError>;

    /// Zero the extruder position
    fn reset_extruder(&mut self) -> Result<(), CommandError>;

    /// Release all stepper motors
    fn disable_steppers(&mut self) -> Result<(), CommandError>;

    /// Home all axes; completion is observed through [`HomedAxes`]
    fn home_all(&mut self) -> Result<(), CommandError>;

    /// Apply an absolute Z offset (µm)
    fn apply_z_offset(&mut self, offset_um: i32) -> Result<(), CommandError>;

    /// Start printing a file
    fn start_print(&mut self, path: &str) -> Result<(), CommandError>;

    fn pause_job(&mut self) -> Result<(), CommandError>;

    fn resume_job(&mut self) -> Result<(), CommandError>;

    fn cancel_job(&mut self) -> Result<(), CommandError>;

    /// Run a configured macro command
    fn run_macro(&mut self, command: &str) -> Result<(), CommandError>;

    /// Persist configuration along with the material presets
    fn save_config(&mut self, presets: &MaterialPresets) -> Result<(), CommandError>;

    /// Move the nozzle by `delta_um` during manual probing
    fn probe_adjust(&mut self, delta_um: i32) -> Result<(), CommandError>;

    /// Accept the current manual probe height
    fn probe_accept(&mut self) -> Result<(), CommandError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_state_names() {
        assert_eq!(JobState::from_name("printing"), Some(JobState::Printing));
        assert_eq!(JobState::from_name("pausing"), Some(JobState::Paused));
        assert_eq!(JobState::from_name("operational"), Some(JobState::Standby));
        assert_eq!(JobState::from_name("warming"), None);
    }

    #[test]
    fn test_remaining_time() {
        let progress = PrintProgress {
            permille: 250,
            elapsed_s: 600,
        };
        assert_eq!(progress.percent(), 25);
        assert_eq!(progress.remaining_s(), 1800);
        assert!(!progress.is_finished());

        let idle = PrintProgress::default();
        assert_eq!(idle.remaining_s(), 0);
    }

    #[test]
    fn test_status_area_ignores_position() {
        let a = PrinterStatus::default();
        let mut b = a.clone();
        b.position.x_um = 5000;
        assert!(!a.status_area_differs(&b));
        b.bed.target_c = 60;
        assert!(a.status_area_differs(&b));
    }

    #[test]
    fn test_rejected_truncates() {
        let bytes = [b'x'; 200];
        let long = core::str::from_utf8(&bytes).unwrap();
        match CommandError::rejected(long) {
            CommandError::Rejected(msg) => assert_eq!(msg.len(), MAX_MESSAGE_LEN),
            other => panic!("unexpected {:?}", other),
        }
    }
}
