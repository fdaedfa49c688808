//! Configuration validation errors

use core::fmt;

/// Errors raised while validating configuration values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin specification could not be parsed
    InvalidPin,
    /// Encoder needs exactly two pins
    EncoderPinCount,
    /// Encoder steps per detent must be 2 or 4
    StepsPerDetent,
    /// Fast rotation threshold must be positive
    FastRate,
    /// Analog button range must satisfy min < max
    AnalogRange,
    /// Analog pull-up resistor must be positive
    PullupResistor,
    /// Macro identifier lacks the reserved prefix
    InvalidMacroId,
    /// Macro label or command missing or too long
    MacroField,
    /// Language name not recognized
    UnknownLanguage,
    /// More macros than the menu can hold
    TooManyMacros,
    /// Temperature range is empty or inverted
    TemperatureRange,
    /// Axis travel range is empty or inverted
    AxisRange,
    /// Extrude length must not be negative
    ExtrudeLength,
    /// Z-offset window must not be negative
    ZOffsetLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::InvalidPin => "invalid pin specification",
            ConfigError::EncoderPinCount => "encoder_pins must name exactly two pins",
            ConfigError::StepsPerDetent => "encoder_steps_per_detent must be 2 or 4",
            ConfigError::FastRate => "encoder_fast_rate must be positive",
            ConfigError::AnalogRange => "analog range minimum must be below maximum",
            ConfigError::PullupResistor => "analog_pullup_resistor must be positive",
            ConfigError::InvalidMacroId => "macro id must start with MACRO",
            ConfigError::MacroField => "macro label and gcode must be non-empty and fit",
            ConfigError::UnknownLanguage => "unknown language",
            ConfigError::TooManyMacros => "too many macros",
            ConfigError::TemperatureRange => "temperature minimum must be below maximum",
            ConfigError::AxisRange => "axis minimum must be below maximum",
            ConfigError::ExtrudeLength => "extrude_max_length must not be negative",
            ConfigError::ZOffsetLimit => "z_offset_limit_um must not be negative",
        };
        f.write_str(msg)
    }
}
