//! Input hardware configuration
//!
//! Pin strings follow the host firmware convention: an optional `^`
//! (pull-up) or `~` (pull-down), an optional `!` (active-low), an optional
//! `chip:` prefix and the pin name, e.g. `"^!PB1"` or `"ar:PA12"`.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Maximum pin name length (chip prefix included)
pub const MAX_PIN_NAME_LEN: usize = 24;

/// Default encoder pins
pub const DEFAULT_ENCODER_PINS: &str = "^PA12, ^PA11";

/// Default click pin
pub const DEFAULT_CLICK_PIN: &str = "^!PB1";

/// Default threshold between two pulses for fast rotation
pub const DEFAULT_FAST_RATE_MS: u32 = 30;

/// Default hold time for a long press
pub const DEFAULT_LONG_PRESS_MS: u32 = 800;

/// Default analog button pull-up resistor (ohms)
pub const DEFAULT_PULLUP_OHMS: u32 = 4700;

/// Pull resistor selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pull {
    #[default]
    None,
    Up,
    Down,
}

/// Parsed pin specification
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinSpec {
    /// Pin name, including any `chip:` prefix
    pub name: String<MAX_PIN_NAME_LEN>,
    /// Pin is active-low
    pub inverted: bool,
    /// Pull resistor
    pub pull: Pull,
}

impl PinSpec {
    /// Parse a pin string such as `"^!PB1"`
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let mut rest = spec.trim();

        let pull = if let Some(r) = rest.strip_prefix('^') {
            rest = r;
            Pull::Up
        } else if let Some(r) = rest.strip_prefix('~') {
            rest = r;
            Pull::Down
        } else {
            Pull::None
        };

        let inverted = match rest.strip_prefix('!') {
            Some(r) => {
                rest = r;
                true
            }
            None => false,
        };

        let pin = match rest.split_once(':') {
            Some((chip, pin)) => {
                if !is_identifier(chip) {
                    return Err(ConfigError::InvalidPin);
                }
                pin
            }
            None => rest,
        };
        if !is_identifier(pin) {
            return Err(ConfigError::InvalidPin);
        }

        let mut name = String::new();
        name.push_str(rest).map_err(|_| ConfigError::InvalidPin)?;

        Ok(Self {
            name,
            inverted,
            pull,
        })
    }

    /// Pin name without modifiers
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Rotary encoder configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncoderConfig {
    /// Quadrature A/B pins
    pub pins: [PinSpec; 2],
    /// Quadrature transitions per detent (2 or 4)
    pub steps_per_detent: u8,
    /// Pulses closer together than this are reported as fast rotation
    pub fast_rate_ms: u32,
    /// Button hold time that turns a click into a long click
    pub long_press_ms: u32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        let pins = parse_encoder_pins(DEFAULT_ENCODER_PINS).unwrap_or_default();
        Self {
            pins,
            steps_per_detent: 4,
            fast_rate_ms: DEFAULT_FAST_RATE_MS,
            long_press_ms: DEFAULT_LONG_PRESS_MS,
        }
    }
}

impl EncoderConfig {
    /// Build a validated encoder config from its textual form
    pub fn new(pins: &str, steps_per_detent: u8, fast_rate_ms: u32) -> Result<Self, ConfigError> {
        let pins = parse_encoder_pins(pins)?;
        if steps_per_detent != 2 && steps_per_detent != 4 {
            return Err(ConfigError::StepsPerDetent);
        }
        if fast_rate_ms == 0 {
            return Err(ConfigError::FastRate);
        }
        Ok(Self {
            pins,
            steps_per_detent,
            fast_rate_ms,
            long_press_ms: DEFAULT_LONG_PRESS_MS,
        })
    }

    /// Override the long press hold time
    pub fn with_long_press_ms(mut self, long_press_ms: u32) -> Self {
        self.long_press_ms = long_press_ms;
        self
    }
}

/// Parse a comma separated encoder pin pair
pub fn parse_encoder_pins(spec: &str) -> Result<[PinSpec; 2], ConfigError> {
    let mut parts = spec.split(',');
    let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ConfigError::EncoderPinCount);
    };
    Ok([PinSpec::parse(a)?, PinSpec::parse(b)?])
}

/// Voltage window for a button read through an ADC
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnalogRange {
    pub min: f32,
    pub max: f32,
}

impl AnalogRange {
    /// Create a validated range
    pub fn new(min: f32, max: f32) -> Result<Self, ConfigError> {
        if min.partial_cmp(&max) != Some(core::cmp::Ordering::Less) {
            return Err(ConfigError::AnalogRange);
        }
        Ok(Self { min, max })
    }
}

/// Push button configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    /// Click pin
    pub click_pin: PinSpec,
    /// ADC window when the button shares an analog input
    pub analog_range: Option<AnalogRange>,
    /// Pull-up resistor used for the analog divider (ohms)
    pub analog_pullup_ohms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            click_pin: PinSpec::parse(DEFAULT_CLICK_PIN).unwrap_or_default(),
            analog_range: None,
            analog_pullup_ohms: DEFAULT_PULLUP_OHMS,
        }
    }
}

impl ButtonConfig {
    /// Build a validated button config
    pub fn new(
        click_pin: &str,
        analog_range: Option<AnalogRange>,
        analog_pullup_ohms: u32,
    ) -> Result<Self, ConfigError> {
        if analog_pullup_ohms == 0 {
            return Err(ConfigError::PullupResistor);
        }
        Ok(Self {
            click_pin: PinSpec::parse(click_pin)?,
            analog_range,
            analog_pullup_ohms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pin_modifiers() {
        let pin = PinSpec::parse("^!PB1").unwrap();
        assert_eq!(pin.name(), "PB1");
        assert_eq!(pin.pull, Pull::Up);
        assert!(pin.inverted);

        let pin = PinSpec::parse(" ~PA3 ").unwrap();
        assert_eq!(pin.pull, Pull::Down);
        assert!(!pin.inverted);
    }

    #[test]
    fn test_parse_pin_with_chip() {
        let pin = PinSpec::parse("!ar:PA12").unwrap();
        assert_eq!(pin.name(), "ar:PA12");
        assert!(pin.inverted);
    }

    #[test]
    fn test_parse_pin_rejects_garbage() {
        assert_eq!(PinSpec::parse(""), Err(ConfigError::InvalidPin));
        assert_eq!(PinSpec::parse("^"), Err(ConfigError::InvalidPin));
        assert_eq!(PinSpec::parse("P A1"), Err(ConfigError::InvalidPin));
        assert_eq!(PinSpec::parse(":PA1"), Err(ConfigError::InvalidPin));
        assert_eq!(PinSpec::parse("!^PA1"), Err(ConfigError::InvalidPin));
    }

    #[test]
    fn test_encoder_pins_need_two() {
        assert!(parse_encoder_pins("^PA12, ^PA11").is_ok());
        assert_eq!(
            parse_encoder_pins("^PA12").unwrap_err(),
            ConfigError::EncoderPinCount
        );
        assert_eq!(
            parse_encoder_pins("PA1, PA2, PA3").unwrap_err(),
            ConfigError::EncoderPinCount
        );
    }

    #[test]
    fn test_encoder_steps_per_detent() {
        assert!(EncoderConfig::new("PA1, PA2", 2, 30).is_ok());
        assert_eq!(
            EncoderConfig::new("PA1, PA2", 3, 30).unwrap_err(),
            ConfigError::StepsPerDetent
        );
        assert_eq!(
            EncoderConfig::new("PA1, PA2", 4, 0).unwrap_err(),
            ConfigError::FastRate
        );
    }

    #[test]
    fn test_defaults() {
        let encoder = EncoderConfig::default();
        assert_eq!(encoder.pins[0].name(), "PA12");
        assert_eq!(encoder.pins[1].name(), "PA11");
        assert_eq!(encoder.fast_rate_ms, 30);

        let button = ButtonConfig::default();
        assert_eq!(button.click_pin.name(), "PB1");
        assert!(button.click_pin.inverted);
        assert_eq!(button.analog_pullup_ohms, 4700);
    }

    #[test]
    fn test_analog_range() {
        assert!(AnalogRange::new(0.1, 0.4).is_ok());
        assert_eq!(AnalogRange::new(0.4, 0.1), Err(ConfigError::AnalogRange));
        assert_eq!(
            ButtonConfig::new("PB1", None, 0).unwrap_err(),
            ConfigError::PullupResistor
        );
    }
}
