//! Status events driving forced transitions

/// Controller-side changes observed by the reconciliation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusEvent {
    /// Job entered the printing state
    PrintStarted,
    /// Job returned to standby, completed or was cancelled
    JobEnded,
    /// Manual probing became active
    ProbeStarted,
    /// Manual probing finished or was aborted
    ProbeEnded,
    /// All axes homed after a homing request
    HomingComplete,
}
