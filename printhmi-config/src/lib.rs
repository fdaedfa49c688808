//! TOML loader for the HMI configuration
//!
//! Reads `hmi.toml` on the host and produces a validated
//! [`HmiConfig`]. Every section is optional; a missing key keeps the
//! core default. Values pass through the core constructors, so anything
//! the menu could not use is rejected here instead of on the printer.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info, warn};
use serde::Deserialize;

use printhmi_core::config::{
    AnalogRange, AxisRange, ButtonConfig, Capabilities, ConfigError, EncoderConfig, HmiConfig,
    Language, MacroDescriptor, MaterialPreset, TempRange, DEFAULT_CLICK_PIN, DEFAULT_ENCODER_PINS,
};

/// Failure loading a configuration file
#[derive(Debug)]
pub enum LoadError {
    /// File could not be read
    Io(io::Error),
    /// File is not valid TOML or has the wrong shape
    Toml(toml::de::Error),
    /// A value was rejected by validation
    Config(ConfigError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "cannot read config: {}", e),
            LoadError::Toml(e) => write!(f, "invalid config: {}", e),
            LoadError::Config(e) => write!(f, "invalid config value: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Toml(e) => Some(e),
            LoadError::Config(_) => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<toml::de::Error> for LoadError {
    fn from(e: toml::de::Error) -> Self {
        LoadError::Toml(e)
    }
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Config(e)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    display: RawDisplay,
    encoder: RawEncoder,
    button: RawButton,
    #[serde(rename = "macro")]
    macros: Vec<RawMacro>,
    preset: RawPresets,
    limits: RawLimits,
    capabilities: RawCapabilities,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawDisplay {
    language: Option<String>,
    dim_timeout_ticks: Option<u32>,
    brightness: Option<u8>,
    dim_brightness: Option<u8>,
    firmware_version: Option<String>,
    website: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawEncoder {
    encoder_pins: Option<String>,
    encoder_steps_per_detent: Option<u8>,
    /// Seconds
    encoder_fast_rate: Option<f32>,
    long_press_ms: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawButton {
    click_pin: Option<String>,
    analog_range_click_pin: Option<[f32; 2]>,
    analog_pullup_resistor: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMacro {
    id: String,
    label: String,
    icon: Option<u8>,
    gcode: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawPresets {
    pla: Option<RawPreset>,
    tpu: Option<RawPreset>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawPreset {
    hotend: Option<i16>,
    bed: Option<i16>,
    fan: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawLimits {
    x: Option<[i16; 2]>,
    y: Option<[i16; 2]>,
    z: Option<[i16; 2]>,
    hotend: Option<[i16; 2]>,
    bed: Option<[i16; 2]>,
    extrude_min_temp: Option<i16>,
    extrude_max_length: Option<i16>,
    z_offset_limit_um: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawCapabilities {
    misc_page: Option<bool>,
    fan: Option<bool>,
    bed_probe: Option<bool>,
    prevent_cold_extrusion: Option<bool>,
    jerk: Option<bool>,
}

/// Read and validate a configuration file
pub fn load_file(path: impl AsRef<Path>) -> Result<HmiConfig, LoadError> {
    let path = path.as_ref();
    debug!("reading {}", path.display());
    let text = fs::read_to_string(path)?;
    parse_config(&text)
}

/// Parse and validate configuration text
pub fn parse_config(text: &str) -> Result<HmiConfig, LoadError> {
    let raw: RawConfig = toml::from_str(text)?;
    let mut config = HmiConfig::default();

    apply_display(&mut config, raw.display)?;
    config.encoder = build_encoder(raw.encoder)?;
    config.button = build_button(raw.button)?;

    for m in raw.macros {
        let descriptor = MacroDescriptor::new(&m.id, &m.label, m.icon, &m.gcode)?;
        config.add_macro(descriptor)?;
    }

    if let Some(p) = raw.preset.pla {
        apply_preset(&mut config.presets.pla, p);
    }
    if let Some(p) = raw.preset.tpu {
        apply_preset(&mut config.presets.tpu, p);
    }

    apply_limits(&mut config, raw.limits);
    apply_capabilities(&mut config.capabilities, raw.capabilities);
    config.validate()?;

    info!(
        "config loaded: {} macros, language {:?}",
        config.macros.len(),
        config.language
    );
    Ok(config)
}

fn apply_display(config: &mut HmiConfig, raw: RawDisplay) -> Result<(), LoadError> {
    if let Some(name) = raw.language {
        config.language = Language::from_name(&name)?;
    }
    let display = &mut config.display;
    if let Some(ticks) = raw.dim_timeout_ticks {
        display.dim_timeout_ticks = ticks;
    }
    if let Some(level) = raw.brightness {
        display.brightness = level;
    }
    if let Some(level) = raw.dim_brightness {
        display.dim_brightness = level;
    }
    if let Some(version) = raw.firmware_version {
        display.firmware_version = fit("firmware_version", &version);
    }
    if let Some(website) = raw.website {
        display.website = fit("website", &website);
    }
    Ok(())
}

fn build_encoder(raw: RawEncoder) -> Result<EncoderConfig, LoadError> {
    let defaults = EncoderConfig::default();
    let pins = raw
        .encoder_pins
        .unwrap_or_else(|| DEFAULT_ENCODER_PINS.to_string());
    let steps = raw
        .encoder_steps_per_detent
        .unwrap_or(defaults.steps_per_detent);
    let fast_rate_ms = match raw.encoder_fast_rate {
        Some(seconds) if seconds > 0.0 => ((seconds * 1000.0).round() as u32).max(1),
        Some(_) => 0,
        None => defaults.fast_rate_ms,
    };
    let encoder = EncoderConfig::new(&pins, steps, fast_rate_ms)?;
    Ok(encoder.with_long_press_ms(raw.long_press_ms.unwrap_or(defaults.long_press_ms)))
}

fn build_button(raw: RawButton) -> Result<ButtonConfig, LoadError> {
    let defaults = ButtonConfig::default();
    let click_pin = raw
        .click_pin
        .unwrap_or_else(|| DEFAULT_CLICK_PIN.to_string());
    let analog_range = match raw.analog_range_click_pin {
        Some([min, max]) => Some(AnalogRange::new(min, max)?),
        None => None,
    };
    let pullup_ohms = match raw.analog_pullup_resistor {
        Some(ohms) if ohms > 0.0 => ohms.round() as u32,
        Some(_) => 0,
        None => defaults.analog_pullup_ohms,
    };
    Ok(ButtonConfig::new(&click_pin, analog_range, pullup_ohms)?)
}

fn apply_preset(preset: &mut MaterialPreset, raw: RawPreset) {
    if let Some(c) = raw.hotend {
        preset.hotend_c = c;
    }
    if let Some(c) = raw.bed {
        preset.bed_c = c;
    }
    if let Some(percent) = raw.fan {
        if percent > 100 {
            warn!("preset {} fan {}% clamped to 100%", preset.name.as_str(), percent);
        }
        preset.fan_percent = percent.min(100);
    }
}

fn apply_limits(config: &mut HmiConfig, raw: RawLimits) {
    let limits = &mut config.limits;
    if let Some([min, max]) = raw.x {
        limits.x = AxisRange::new(min, max);
    }
    if let Some([min, max]) = raw.y {
        limits.y = AxisRange::new(min, max);
    }
    if let Some([min, max]) = raw.z {
        limits.z = AxisRange::new(min, max);
    }
    if let Some([min, max]) = raw.hotend {
        limits.hotend = TempRange::new(min, max);
    }
    if let Some([min, max]) = raw.bed {
        limits.bed = TempRange::new(min, max);
    }
    if let Some(c) = raw.extrude_min_temp {
        limits.extrude_min_temp_c = c;
    }
    if let Some(mm) = raw.extrude_max_length {
        limits.extrude_max_length_mm = mm;
    }
    if let Some(um) = raw.z_offset_limit_um {
        limits.z_offset_limit_um = um;
    }
}

fn apply_capabilities(caps: &mut Capabilities, raw: RawCapabilities) {
    caps.misc_page = raw.misc_page.unwrap_or(caps.misc_page);
    caps.fan = raw.fan.unwrap_or(caps.fan);
    caps.bed_probe = raw.bed_probe.unwrap_or(caps.bed_probe);
    caps.prevent_cold_extrusion = raw
        .prevent_cold_extrusion
        .unwrap_or(caps.prevent_cold_extrusion);
    caps.jerk = raw.jerk.unwrap_or(caps.jerk);
}

/// Copy into a fixed-capacity string, cutting at a char boundary
fn fit<const N: usize>(field: &str, value: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in value.chars() {
        if out.push(c).is_err() {
            warn!("{} truncated to {} bytes", field, N);
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../hmi.toml");

    #[test]
    fn test_sample_file_parses() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.language, Language::English);
        assert_eq!(config.macros.len(), 2);
        assert_eq!(config.macros[0].id(), "MACRO_LEVEL");
        assert_eq!(config.macros[1].icon(), 14);
        assert_eq!(config.presets.pla.hotend_c, 205);
        assert_eq!(config.encoder.fast_rate_ms, 30);
        assert_eq!(config.encoder.pins[0].name(), "PA12");
        assert!(config.capabilities.fan);
        assert_eq!(config.limits.z.max_mm, 250);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), HmiConfig::default());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = parse_config(
            r#"
            [preset.tpu]
            bed = 70

            [capabilities]
            misc_page = false
            "#,
        )
        .unwrap();
        assert_eq!(config.presets.tpu.bed_c, 70);
        assert_eq!(config.presets.tpu.hotend_c, 210);
        assert!(!config.capabilities.misc_page);
        assert!(config.capabilities.bed_probe);
    }

    #[test]
    fn test_bad_macro_id_rejected() {
        let err = parse_config(
            r#"
            [[macro]]
            id = "LEVEL"
            label = "Level"
            gcode = "G29"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Config(ConfigError::InvalidMacroId)));
    }

    #[test]
    fn test_bad_values_rejected() {
        let cases = [
            ("[encoder]\nencoder_steps_per_detent = 3", ConfigError::StepsPerDetent),
            ("[encoder]\nencoder_fast_rate = 0.0", ConfigError::FastRate),
            ("[encoder]\nencoder_pins = \"PA1\"", ConfigError::EncoderPinCount),
            ("[button]\nanalog_range_click_pin = [2.0, 1.0]", ConfigError::AnalogRange),
            ("[button]\nanalog_pullup_resistor = 0.0", ConfigError::PullupResistor),
            ("[display]\nlanguage = \"klingon\"", ConfigError::UnknownLanguage),
            ("[limits]\nx = [100, 10]", ConfigError::AxisRange),
            ("[limits]\nbed = [100, 100]", ConfigError::TemperatureRange),
            ("[limits]\nx = [220, 0]", ConfigError::AxisRange),
            ("[limits]\nhotend = [260, 5]", ConfigError::TemperatureRange),
            ("[limits]\nextrude_max_length = -5", ConfigError::ExtrudeLength),
            ("[limits]\nz_offset_limit_um = -100", ConfigError::ZOffsetLimit),
        ];
        for (text, expected) in cases {
            match parse_config(text) {
                Err(LoadError::Config(e)) => assert_eq!(e, expected, "{}", text),
                other => panic!("{}: unexpected {:?}", text, other),
            }
        }
    }

    #[test]
    fn test_unknown_key_is_toml_error() {
        let err = parse_config("[display]\nbrightnes = 10").unwrap_err();
        assert!(matches!(err, LoadError::Toml(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_file("/nonexistent/hmi.toml").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
        assert!(err.to_string().starts_with("cannot read config"));
    }

    #[test]
    fn test_long_website_truncated() {
        let long = "x".repeat(64);
        let config = parse_config(&format!("[display]\nwebsite = \"{}\"", long)).unwrap();
        assert_eq!(config.display.website.len(), 32);
    }
}
