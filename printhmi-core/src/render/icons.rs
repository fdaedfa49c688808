//! Icon identifiers in the panel's built-in libraries
//!
//! Library [`ICON`] holds the pictograms; the animated library [`GIF`]
//! holds heating and progress frames. Text icons live in the per-language
//! library chosen by [`crate::config::Language::icon_library`].

/// Pictogram library
pub const ICON: u8 = 0;

/// Animation library
pub const GIF: u8 = 27;

pub const PRINT: u8 = 1;
pub const PRINT_SELECTED: u8 = 2;
pub const PREPARE: u8 = 3;
pub const PREPARE_SELECTED: u8 = 4;
pub const CONTROL: u8 = 5;
pub const CONTROL_SELECTED: u8 = 6;
pub const LEVELING: u8 = 7;
pub const LEVELING_SELECTED: u8 = 8;
pub const HOTEND_TEMP: u8 = 9;
pub const BED_TEMP: u8 = 10;
pub const SPEED: u8 = 11;
pub const Z_OFFSET: u8 = 12;
pub const BACK: u8 = 13;
pub const FILE: u8 = 14;
pub const PRINT_TIME: u8 = 15;
pub const REMAIN_TIME: u8 = 16;
pub const TUNE: u8 = 17;
pub const TUNE_SELECTED: u8 = 18;
pub const PAUSE: u8 = 19;
pub const PAUSE_SELECTED: u8 = 20;
pub const CONTINUE: u8 = 21;
pub const CONTINUE_SELECTED: u8 = 22;
pub const STOP: u8 = 23;
pub const STOP_SELECTED: u8 = 24;
pub const MORE: u8 = 26;
pub const AXIS: u8 = 27;
pub const CLOSE_MOTOR: u8 = 28;
pub const HOMING: u8 = 29;
pub const SET_HOME: u8 = 30;
pub const PREHEAT_PLA: u8 = 31;
pub const PREHEAT_TPU: u8 = 32;
pub const COOL: u8 = 33;
pub const MOVE_X: u8 = 35;
pub const MOVE_Y: u8 = 36;
pub const MOVE_Z: u8 = 37;
pub const MOVE_E: u8 = 38;
pub const TEMPERATURE: u8 = 40;
pub const MOTION: u8 = 41;
pub const WRITE_EEPROM: u8 = 42;
pub const INFO: u8 = 45;
pub const SET_HOTEND_TEMP: u8 = 46;
pub const SET_BED_TEMP: u8 = 47;
pub const FAN_SPEED: u8 = 48;
pub const SET_PLA_PREHEAT: u8 = 49;
pub const SET_TPU_PREHEAT: u8 = 50;
pub const MAX_SPEED: u8 = 51;
pub const MAX_ACCEL: u8 = 52;
pub const MAX_JERK: u8 = 53;
pub const STEP: u8 = 54;
pub const PRINT_SIZE: u8 = 55;
pub const VERSION: u8 = 56;
pub const CONTACT: u8 = 57;
pub const FLOW: u8 = 62;
pub const SET_SPEED: u8 = 75;
pub const SET_Z_OFFSET: u8 = 76;
pub const TEMP_TOO_LOW: u8 = 79;

/// First frame of the progress ring (one frame per percent)
pub const PROGRESS_0: u8 = 145;
pub const NOZZLE_HEATING_0: u8 = 110;
pub const BED_HEATING_0: u8 = 125;

/// Text icons in the language library
pub mod text {
    pub const HEADER_MAIN: u8 = 1;
    pub const HEADER_TUNE: u8 = 17;
    pub const HEADER_PRINTING: u8 = 20;
    pub const BACK: u8 = 21;
    pub const HEADER_FILE_SELECTION: u8 = 26;
    pub const HEADER_MOTION: u8 = 33;
    pub const HEADER_MOVE: u8 = 39;
    pub const HEADER_PREPARE: u8 = 40;
    pub const HEADER_TEMPERATURE: u8 = 49;
    pub const HEADER_INFO: u8 = 61;
    pub const HEADER_PLA_SETTINGS: u8 = 62;
    pub const HEADER_TPU_SETTINGS: u8 = 64;
    pub const NOZZLE_TEMP_TOO_LOW: u8 = 69;
    pub const CANCEL_BUTTON: u8 = 72;
    pub const CONFIRM_BUTTON: u8 = 73;
    pub const POPUP_PAUSE_PRINT: u8 = 76;
    pub const POPUP_STOP_PRINT: u8 = 77;
    pub const HEADER_CONTROL: u8 = 80;
    pub const HEADER_PRINT_FINISH: u8 = 81;
    pub const POPUP_HOMING: u8 = 84;
    pub const HEADER_LEVELING: u8 = 85;

    pub const PRINT: u8 = 2;
    pub const PRINT_SELECTED: u8 = 8;
    pub const PREPARE: u8 = 3;
    pub const PREPARE_SELECTED: u8 = 9;
    pub const CONTROL: u8 = 4;
    pub const CONTROL_SELECTED: u8 = 10;
    pub const INFO: u8 = 5;
    pub const INFO_SELECTED: u8 = 11;
    pub const STOP: u8 = 6;
    pub const STOP_SELECTED: u8 = 12;
    pub const PAUSE: u8 = 7;
    pub const PAUSE_SELECTED: u8 = 13;
    pub const TUNE: u8 = 78;
    pub const TUNE_SELECTED: u8 = 79;
}
