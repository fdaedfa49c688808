//! Menu state definition
//!
//! The active state selects the input handler and decides which screen
//! elements the reconciliation loop may redraw.

use super::events::StatusEvent;

/// Menu states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuState {
    /// Four large page icons
    MainMenu,
    /// File browser
    SelectFile,
    /// Move, home, preheat, cooldown
    Prepare,
    /// Temperature, motion and info entries
    Control,
    /// User macros
    Misc,
    /// Print progress with tune/pause/stop
    PrintProcess,
    /// Axis jog list
    AxisMove,
    /// Temperature targets and preset entries
    Temperature,
    /// Motion limits list
    Motion,
    /// Machine information
    Info,
    /// In-print adjustments
    Tune,
    /// PLA preset settings
    PlaPreheat,
    /// TPU preset settings
    TpuPreheat,
    MaxSpeed,
    MaxSpeedValue,
    MaxAcceleration,
    MaxAccelerationValue,
    MaxJerk,
    MaxJerkValue,
    Step,
    StepValue,
    /// "Not available" popup
    FeatureNotAvailable,
    /// Homing popup, waiting for all axes to report homed
    Homing,
    /// X position edit
    MoveX,
    /// Y position edit
    MoveY,
    /// Z position edit
    MoveZ,
    /// Extruder move edit
    Extruder,
    /// Hotend target edit
    HotendTemp,
    /// Z-offset edit
    ZOffset,
    /// Bed target edit
    BedTemp,
    /// Fan speed edit
    FanSpeed,
    /// Feedrate edit
    PrintSpeed,
    /// Pause/stop confirmation
    PrintWindow,
    /// Nozzle too cold to extrude
    PopupWindow,
    /// Manual Z probing
    ManualProbeProcess,
    /// Word-wrapped message with an OK button
    MessagePopup,
    /// Icon library browser
    IconFinder,
}

impl MenuState {
    /// Check if this state edits a numeric value
    pub fn is_value_edit(&self) -> bool {
        matches!(
            self,
            MenuState::MoveX
                | MenuState::MoveY
                | MenuState::MoveZ
                | MenuState::Extruder
                | MenuState::HotendTemp
                | MenuState::ZOffset
                | MenuState::BedTemp
                | MenuState::FanSpeed
                | MenuState::PrintSpeed
        )
    }

    /// Check if the status area (temperatures, speed, offset) is on screen
    pub fn shows_status_area(&self) -> bool {
        !matches!(
            self,
            MenuState::MainMenu
                | MenuState::MessagePopup
                | MenuState::Misc
                | MenuState::ManualProbeProcess
                | MenuState::IconFinder
        )
    }

    /// Check if a message popup may return to this state
    pub fn accepts_popup_return(&self) -> bool {
        matches!(
            self,
            MenuState::Motion
                | MenuState::Misc
                | MenuState::Info
                | MenuState::Temperature
                | MenuState::Prepare
                | MenuState::Control
                | MenuState::Tune
        )
    }

    /// Process a status event and return the next state
    ///
    /// These transitions override whatever the user is doing.
    pub fn transition(self, event: StatusEvent) -> Self {
        use MenuState::*;
        use StatusEvent::*;

        match (self, event) {
            (_, PrintStarted) => PrintProcess,
            (_, JobEnded) => MainMenu,

            (_, ProbeStarted) => ManualProbeProcess,
            (ManualProbeProcess, ProbeEnded) => MainMenu,

            (Homing, HomingComplete) => Prepare,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_start_from_any_state() {
        let states = [
            MenuState::MainMenu,
            MenuState::ZOffset,
            MenuState::MessagePopup,
            MenuState::ManualProbeProcess,
        ];
        for state in states {
            assert_eq!(
                state.transition(StatusEvent::PrintStarted),
                MenuState::PrintProcess
            );
        }
    }

    #[test]
    fn test_job_end_returns_to_main_menu() {
        assert_eq!(
            MenuState::PrintProcess.transition(StatusEvent::JobEnded),
            MenuState::MainMenu
        );
    }

    #[test]
    fn test_probe_end_only_leaves_probe_screen() {
        assert_eq!(
            MenuState::ManualProbeProcess.transition(StatusEvent::ProbeEnded),
            MenuState::MainMenu
        );
        assert_eq!(
            MenuState::Prepare.transition(StatusEvent::ProbeEnded),
            MenuState::Prepare
        );
        assert_eq!(
            MenuState::Prepare.transition(StatusEvent::ProbeStarted),
            MenuState::ManualProbeProcess
        );
    }

    #[test]
    fn test_homing_complete_needs_homing_popup() {
        assert_eq!(
            MenuState::Homing.transition(StatusEvent::HomingComplete),
            MenuState::Prepare
        );
        assert_eq!(
            MenuState::Tune.transition(StatusEvent::HomingComplete),
            MenuState::Tune
        );
    }

    #[test]
    fn test_status_area_blocklist() {
        assert!(!MenuState::MainMenu.shows_status_area());
        assert!(!MenuState::IconFinder.shows_status_area());
        assert!(MenuState::Prepare.shows_status_area());
        assert!(MenuState::PrintProcess.shows_status_area());
    }

    #[test]
    fn test_edit_predicates() {
        assert!(MenuState::MoveX.is_value_edit());
        assert!(MenuState::PrintSpeed.is_value_edit());
        assert!(!MenuState::AxisMove.is_value_edit());
        assert!(MenuState::Misc.accepts_popup_return());
        assert!(!MenuState::PrintProcess.accepts_popup_return());
    }
}
