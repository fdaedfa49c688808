//! Configuration type definitions
//!
//! Menu language, macros, material presets, machine limits and feature
//! switches. Defaults match a 220x220x250 bed-slinger with a probe.

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::pins::{ButtonConfig, EncoderConfig};

/// Maximum label length shown in a menu row
pub const MAX_LABEL_LEN: usize = 24;

/// Maximum macro identifier length
pub const MAX_MACRO_ID_LEN: usize = 32;

/// Maximum macro command length
pub const MAX_GCODE_LEN: usize = 128;

/// Maximum macros in the Misc menu
pub const MAX_MACROS: usize = 16;

/// Reserved prefix every macro identifier carries
pub const MACRO_PREFIX: &str = "MACRO";

/// Icon used when a macro does not name one
pub const DEFAULT_MACRO_ICON: u8 = 14;

/// Menu language
///
/// Each language has its own icon library holding the rendered menu text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Language {
    Chinese,
    #[default]
    English,
    German,
    Russian,
    French,
    Turkish,
    Spanish,
    Italian,
    Portuguese,
    Japanese,
    Korean,
}

impl Language {
    /// Icon library holding this language's text
    pub fn icon_library(&self) -> u8 {
        match self {
            Language::Chinese => 2,
            Language::English => 4,
            Language::German => 6,
            Language::Russian => 9,
            Language::French => 12,
            Language::Turkish => 15,
            Language::Spanish => 17,
            Language::Italian => 19,
            Language::Portuguese => 21,
            Language::Japanese => 23,
            Language::Korean => 25,
        }
    }

    /// Look up a language by its lowercase name
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        let language = match name.trim() {
            "chinese" => Language::Chinese,
            "english" => Language::English,
            "german" => Language::German,
            "russian" => Language::Russian,
            "french" => Language::French,
            "turkish" => Language::Turkish,
            "spanish" => Language::Spanish,
            "italian" => Language::Italian,
            "portuguese" => Language::Portuguese,
            "japanese" => Language::Japanese,
            "korean" => Language::Korean,
            _ => return Err(ConfigError::UnknownLanguage),
        };
        Ok(language)
    }
}

/// A user command shown in the Misc menu
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MacroDescriptor {
    id: String<MAX_MACRO_ID_LEN>,
    label: String<MAX_LABEL_LEN>,
    icon: u8,
    gcode: String<MAX_GCODE_LEN>,
}

impl MacroDescriptor {
    /// Validate and build a macro
    ///
    /// # Arguments
    /// - `id`: section identifier, must start with `MACRO`
    /// - `label`: menu text
    /// - `icon`: icon index, `None` for the default file icon
    /// - `gcode`: command submitted when selected
    pub fn new(id: &str, label: &str, icon: Option<u8>, gcode: &str) -> Result<Self, ConfigError> {
        let id = id.trim();
        if !id.starts_with(MACRO_PREFIX) {
            return Err(ConfigError::InvalidMacroId);
        }
        let label = label.trim();
        let gcode = gcode.trim();
        if label.is_empty() || gcode.is_empty() {
            return Err(ConfigError::MacroField);
        }

        let mut m = Self {
            id: String::new(),
            label: String::new(),
            icon: icon.unwrap_or(DEFAULT_MACRO_ICON),
            gcode: String::new(),
        };
        m.id.push_str(id).map_err(|_| ConfigError::InvalidMacroId)?;
        m.label.push_str(label).map_err(|_| ConfigError::MacroField)?;
        m.gcode.push_str(gcode).map_err(|_| ConfigError::MacroField)?;
        Ok(m)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> u8 {
        self.icon
    }

    pub fn gcode(&self) -> &str {
        &self.gcode
    }
}

/// Which of the two material presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PresetSlot {
    Pla,
    Tpu,
}

/// Preheat temperatures for a material
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaterialPreset {
    /// Material name
    pub name: String<8>,
    /// Hotend target (°C)
    pub hotend_c: i16,
    /// Bed target (°C)
    pub bed_c: i16,
    /// Part fan (percent)
    pub fan_percent: u8,
}

impl MaterialPreset {
    pub fn new(name: &str, hotend_c: i16, bed_c: i16, fan_percent: u8) -> Self {
        let mut n = String::new();
        let _ = n.push_str(name);
        Self {
            name: n,
            hotend_c,
            bed_c,
            fan_percent,
        }
    }
}

/// Both material presets
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaterialPresets {
    pub pla: MaterialPreset,
    pub tpu: MaterialPreset,
}

impl Default for MaterialPresets {
    fn default() -> Self {
        Self {
            pla: MaterialPreset::new("PLA", 200, 60, 100),
            tpu: MaterialPreset::new("TPU", 210, 100, 100),
        }
    }
}

impl MaterialPresets {
    pub fn get(&self, slot: PresetSlot) -> &MaterialPreset {
        match slot {
            PresetSlot::Pla => &self.pla,
            PresetSlot::Tpu => &self.tpu,
        }
    }

    pub fn get_mut(&mut self, slot: PresetSlot) -> &mut MaterialPreset {
        match slot {
            PresetSlot::Pla => &mut self.pla,
            PresetSlot::Tpu => &mut self.tpu,
        }
    }
}

/// Travel range of one axis (mm)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisRange {
    pub min_mm: i16,
    pub max_mm: i16,
}

impl AxisRange {
    pub const fn new(min_mm: i16, max_mm: i16) -> Self {
        Self { min_mm, max_mm }
    }
}

/// Settable temperature window (°C)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TempRange {
    pub min_c: i16,
    pub max_c: i16,
}

impl TempRange {
    pub const fn new(min_c: i16, max_c: i16) -> Self {
        Self { min_c, max_c }
    }
}

/// Machine limits used to bound value edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MachineLimits {
    pub x: AxisRange,
    pub y: AxisRange,
    pub z: AxisRange,
    pub hotend: TempRange,
    pub bed: TempRange,
    /// Below this the extruder refuses to move
    pub extrude_min_temp_c: i16,
    /// Largest single extrusion from the move menu (mm)
    pub extrude_max_length_mm: i16,
    /// Z-offset edit window, symmetric around zero (µm)
    pub z_offset_limit_um: i32,
}

impl Default for MachineLimits {
    fn default() -> Self {
        Self {
            x: AxisRange::new(0, 220),
            y: AxisRange::new(0, 220),
            z: AxisRange::new(0, 250),
            hotend: TempRange::new(5, 275 - 15),
            bed: TempRange::new(5, 150 - 10),
            extrude_min_temp_c: 170,
            extrude_max_length_mm: 200,
            z_offset_limit_um: 20_000,
        }
    }
}

impl MachineLimits {
    /// Reject empty or inverted ranges and negative edit windows
    pub fn validate(&self) -> Result<(), ConfigError> {
        for axis in [self.x, self.y, self.z] {
            if axis.min_mm >= axis.max_mm {
                return Err(ConfigError::AxisRange);
            }
        }
        for temp in [self.hotend, self.bed] {
            if temp.min_c >= temp.max_c {
                return Err(ConfigError::TemperatureRange);
            }
        }
        if self.extrude_max_length_mm < 0 {
            return Err(ConfigError::ExtrudeLength);
        }
        if self.z_offset_limit_um < 0 {
            return Err(ConfigError::ZOffsetLimit);
        }
        Ok(())
    }
}

/// Optional menu features
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Capabilities {
    /// Fourth main menu page is Misc (macros) instead of Info
    pub misc_page: bool,
    /// Part cooling fan is controllable
    pub fan: bool,
    /// A bed probe is fitted (enables Z-offset items and manual probing)
    pub bed_probe: bool,
    /// Block extruder moves below the minimum temperature
    pub prevent_cold_extrusion: bool,
    /// Motion menu lists the jerk editor
    pub jerk: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            misc_page: true,
            fan: false,
            bed_probe: true,
            prevent_cold_extrusion: true,
            jerk: false,
        }
    }
}

/// Backlight and info screen settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplaySettings {
    /// Idle ticks before the backlight dims
    pub dim_timeout_ticks: u32,
    /// Normal backlight level
    pub brightness: u8,
    /// Dimmed backlight level
    pub dim_brightness: u8,
    /// Firmware version on the info screen
    pub firmware_version: String<16>,
    /// Contact line on the info screen
    pub website: String<32>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        let mut firmware_version = String::new();
        let _ = firmware_version.push_str("1.00");
        let mut website = String::new();
        let _ = website.push_str("www.klipper3d.org");
        Self {
            dim_timeout_ticks: 300,
            brightness: 40,
            dim_brightness: 5,
            firmware_version,
            website,
        }
    }
}

/// Complete HMI configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HmiConfig {
    pub language: Language,
    pub encoder: EncoderConfig,
    pub button: ButtonConfig,
    pub macros: Vec<MacroDescriptor, MAX_MACROS>,
    pub presets: MaterialPresets,
    pub limits: MachineLimits,
    pub capabilities: Capabilities,
    pub display: DisplaySettings,
}

impl HmiConfig {
    /// Append a macro, keeping declaration order
    pub fn add_macro(&mut self, descriptor: MacroDescriptor) -> Result<(), ConfigError> {
        self.macros
            .push(descriptor)
            .map_err(|_| ConfigError::TooManyMacros)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.limits.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_icon_libraries() {
        assert_eq!(Language::default(), Language::English);
        assert_eq!(Language::English.icon_library(), 4);
        assert_eq!(Language::Korean.icon_library(), 25);
        assert_eq!(Language::from_name("german"), Ok(Language::German));
        assert_eq!(
            Language::from_name("klingon"),
            Err(ConfigError::UnknownLanguage)
        );
    }

    #[test]
    fn test_macro_requires_prefix() {
        let m = MacroDescriptor::new("MACRO_LEVEL", "Level bed", None, "BED_MESH_CALIBRATE").unwrap();
        assert_eq!(m.id(), "MACRO_LEVEL");
        assert_eq!(m.icon(), DEFAULT_MACRO_ICON);
        assert_eq!(m.gcode(), "BED_MESH_CALIBRATE");

        assert_eq!(
            MacroDescriptor::new("LEVEL", "Level bed", None, "G29").unwrap_err(),
            ConfigError::InvalidMacroId
        );
        assert_eq!(
            MacroDescriptor::new("MACRO_X", "", None, "G29").unwrap_err(),
            ConfigError::MacroField
        );
    }

    #[test]
    fn test_macro_capacity() {
        let mut config = HmiConfig::default();
        for _ in 0..MAX_MACROS {
            let m = MacroDescriptor::new("MACRO_A", "A", Some(3), "M115").unwrap();
            config.add_macro(m).unwrap();
        }
        let m = MacroDescriptor::new("MACRO_B", "B", None, "M115").unwrap();
        assert_eq!(config.add_macro(m), Err(ConfigError::TooManyMacros));
    }

    #[test]
    fn test_default_limits() {
        let limits = MachineLimits::default();
        assert_eq!(limits.hotend.max_c, 260);
        assert_eq!(limits.bed.max_c, 140);
        assert!(limits.validate().is_ok());

        let bad = MachineLimits {
            z: AxisRange::new(10, 10),
            ..limits
        };
        assert_eq!(bad.validate(), Err(ConfigError::AxisRange));

        let bad = MachineLimits {
            extrude_max_length_mm: -5,
            ..limits
        };
        assert_eq!(bad.validate(), Err(ConfigError::ExtrudeLength));

        let bad = MachineLimits {
            z_offset_limit_um: -1,
            ..limits
        };
        assert_eq!(bad.validate(), Err(ConfigError::ZOffsetLimit));
    }

    #[test]
    fn test_presets() {
        let mut presets = MaterialPresets::default();
        assert_eq!(presets.get(PresetSlot::Pla).hotend_c, 200);
        presets.get_mut(PresetSlot::Tpu).bed_c = 90;
        assert_eq!(presets.tpu.bed_c, 90);
    }
}
