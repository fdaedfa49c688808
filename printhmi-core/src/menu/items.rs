//! Item lists of the fixed menus
//!
//! Some entries depend on the machine's capabilities, so each list is built
//! from [`Capabilities`] when the menu opens. Item 0 is always `Back`.

use heapless::Vec;

use crate::config::Capabilities;
use crate::render::icons;

/// Longest fixed menu
pub const MAX_ITEMS: usize = 8;

/// Capability-filtered item list
pub type Items<T> = Vec<T, MAX_ITEMS>;

/// Number shown beside a menu row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ItemValue {
    pub frac_digits: u8,
    pub value: i32,
}

impl ItemValue {
    pub const fn new(frac_digits: u8, value: i32) -> Self {
        Self { frac_digits, value }
    }
}

/// Values indexed like the item list
pub type ItemValues = [Option<ItemValue>; MAX_ITEMS];

/// A list without values
pub const NO_VALUES: ItemValues = [None; MAX_ITEMS];

/// Label and icon of a menu row
pub trait MenuItem: Copy + PartialEq {
    fn label(&self) -> &'static str;

    fn icon(&self) -> u8;
}

/// Position of `item` in `items`, or 0 (Back) if it is not listed
pub fn position_of<T: MenuItem>(items: &[T], item: T) -> usize {
    items.iter().position(|i| *i == item).unwrap_or(0)
}

fn build<T: MenuItem>(entries: &[(T, bool)]) -> Items<T> {
    let mut items = Items::new();
    for (item, enabled) in entries {
        if *enabled {
            let _ = items.push(*item);
        }
    }
    items
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PrepareItem {
    Back,
    Move,
    DisableSteppers,
    Home,
    ZOffset,
    PreheatPla,
    PreheatTpu,
    Cooldown,
}

impl PrepareItem {
    pub fn list(caps: &Capabilities) -> Items<Self> {
        build(&[
            (Self::Back, true),
            (Self::Move, true),
            (Self::DisableSteppers, true),
            (Self::Home, true),
            (Self::ZOffset, caps.bed_probe),
            (Self::PreheatPla, true),
            (Self::PreheatTpu, true),
            (Self::Cooldown, true),
        ])
    }
}

impl MenuItem for PrepareItem {
    fn label(&self) -> &'static str {
        match self {
            Self::Back => "Back",
            Self::Move => "Move",
            Self::DisableSteppers => "Disable Steppers",
            Self::Home => "Auto Home",
            Self::ZOffset => "Z-Offset",
            Self::PreheatPla => "Preheat PLA",
            Self::PreheatTpu => "Preheat TPU",
            Self::Cooldown => "Cooldown",
        }
    }

    fn icon(&self) -> u8 {
        match self {
            Self::Back => icons::BACK,
            Self::Move => icons::AXIS,
            Self::DisableSteppers => icons::CLOSE_MOTOR,
            Self::Home => icons::HOMING,
            Self::ZOffset => icons::SET_HOME,
            Self::PreheatPla => icons::PREHEAT_PLA,
            Self::PreheatTpu => icons::PREHEAT_TPU,
            Self::Cooldown => icons::COOL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlItem {
    Back,
    Temperature,
    Motion,
    Info,
}

impl ControlItem {
    pub fn list() -> Items<Self> {
        build(&[
            (Self::Back, true),
            (Self::Temperature, true),
            (Self::Motion, true),
            (Self::Info, true),
        ])
    }
}

impl MenuItem for ControlItem {
    fn label(&self) -> &'static str {
        match self {
            Self::Back => "Back",
            Self::Temperature => "Temperature",
            Self::Motion => "Motion",
            Self::Info => "Info",
        }
    }

    fn icon(&self) -> u8 {
        match self {
            Self::Back => icons::BACK,
            Self::Temperature => icons::TEMPERATURE,
            Self::Motion => icons::MOTION,
            Self::Info => icons::INFO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TuneItem {
    Back,
    Speed,
    Hotend,
    Bed,
    Fan,
    ZOffset,
}

impl TuneItem {
    pub fn list(caps: &Capabilities) -> Items<Self> {
        build(&[
            (Self::Back, true),
            (Self::Speed, true),
            (Self::Hotend, true),
            (Self::Bed, true),
            (Self::Fan, caps.fan),
            (Self::ZOffset, caps.bed_probe),
        ])
    }
}

impl MenuItem for TuneItem {
    fn label(&self) -> &'static str {
        match self {
            Self::Back => "Back",
            Self::Speed => "Print Speed",
            Self::Hotend => "Nozzle Temp",
            Self::Bed => "Bed Temp",
            Self::Fan => "Fan Speed",
            Self::ZOffset => "Z-Offset",
        }
    }

    fn icon(&self) -> u8 {
        match self {
            Self::Back => icons::BACK,
            Self::Speed => icons::SPEED,
            Self::Hotend => icons::HOTEND_TEMP,
            Self::Bed => icons::BED_TEMP,
            Self::Fan => icons::FAN_SPEED,
            Self::ZOffset => icons::Z_OFFSET,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TempItem {
    Back,
    Hotend,
    Bed,
    Fan,
    PlaPreset,
    TpuPreset,
}

impl TempItem {
    pub fn list(caps: &Capabilities) -> Items<Self> {
        build(&[
            (Self::Back, true),
            (Self::Hotend, true),
            (Self::Bed, true),
            (Self::Fan, caps.fan),
            (Self::PlaPreset, true),
            (Self::TpuPreset, true),
        ])
    }
}

impl MenuItem for TempItem {
    fn label(&self) -> &'static str {
        match self {
            Self::Back => "Back",
            Self::Hotend => "Nozzle Temp",
            Self::Bed => "Bed Temp",
            Self::Fan => "Fan Speed",
            Self::PlaPreset => "PLA Settings",
            Self::TpuPreset => "TPU Settings",
        }
    }

    fn icon(&self) -> u8 {
        match self {
            Self::Back => icons::BACK,
            Self::Hotend => icons::SET_HOTEND_TEMP,
            Self::Bed => icons::SET_BED_TEMP,
            Self::Fan => icons::FAN_SPEED,
            Self::PlaPreset => icons::SET_PLA_PREHEAT,
            Self::TpuPreset => icons::SET_TPU_PREHEAT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PreheatItem {
    Back,
    Hotend,
    Bed,
    Fan,
    Save,
}

impl PreheatItem {
    pub fn list(caps: &Capabilities) -> Items<Self> {
        build(&[
            (Self::Back, true),
            (Self::Hotend, true),
            (Self::Bed, true),
            (Self::Fan, caps.fan),
            (Self::Save, true),
        ])
    }
}

impl MenuItem for PreheatItem {
    fn label(&self) -> &'static str {
        match self {
            Self::Back => "Back",
            Self::Hotend => "Nozzle Temp",
            Self::Bed => "Bed Temp",
            Self::Fan => "Fan Speed",
            Self::Save => "Save",
        }
    }

    fn icon(&self) -> u8 {
        match self {
            Self::Back => icons::BACK,
            Self::Hotend => icons::SET_HOTEND_TEMP,
            Self::Bed => icons::SET_BED_TEMP,
            Self::Fan => icons::FAN_SPEED,
            Self::Save => icons::WRITE_EEPROM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionItem {
    Back,
    MaxSpeed,
    MaxAcceleration,
    MaxJerk,
    Steps,
}

impl MotionItem {
    pub fn list(caps: &Capabilities) -> Items<Self> {
        build(&[
            (Self::Back, true),
            (Self::MaxSpeed, true),
            (Self::MaxAcceleration, true),
            (Self::MaxJerk, caps.jerk),
            (Self::Steps, true),
        ])
    }
}

impl MenuItem for MotionItem {
    fn label(&self) -> &'static str {
        match self {
            Self::Back => "Back",
            Self::MaxSpeed => "Max Speed",
            Self::MaxAcceleration => "Max Acceleration",
            Self::MaxJerk => "Max Jerk",
            Self::Steps => "Steps-per-mm",
        }
    }

    fn icon(&self) -> u8 {
        match self {
            Self::Back => icons::BACK,
            Self::MaxSpeed => icons::MAX_SPEED,
            Self::MaxAcceleration => icons::MAX_ACCEL,
            Self::MaxJerk => icons::MAX_JERK,
            Self::Steps => icons::STEP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisItem {
    Back,
    X,
    Y,
    Z,
    E,
}

impl AxisItem {
    pub fn list() -> Items<Self> {
        build(&[
            (Self::Back, true),
            (Self::X, true),
            (Self::Y, true),
            (Self::Z, true),
            (Self::E, true),
        ])
    }
}

impl MenuItem for AxisItem {
    fn label(&self) -> &'static str {
        match self {
            Self::Back => "Back",
            Self::X => "Move X",
            Self::Y => "Move Y",
            Self::Z => "Move Z",
            Self::E => "Extruder",
        }
    }

    fn icon(&self) -> u8 {
        match self {
            Self::Back => icons::BACK,
            Self::X => icons::MOVE_X,
            Self::Y => icons::MOVE_Y,
            Self::Z => icons::MOVE_Z,
            Self::E => icons::MOVE_E,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_without_probe() {
        let caps = Capabilities {
            bed_probe: false,
            ..Capabilities::default()
        };
        let items = PrepareItem::list(&caps);
        assert_eq!(items.len(), 7);
        assert!(!items.contains(&PrepareItem::ZOffset));
        assert_eq!(position_of(&items, PrepareItem::Cooldown), 6);
    }

    #[test]
    fn test_optional_fan_rows() {
        let mut caps = Capabilities::default();
        assert_eq!(TempItem::list(&caps).len(), 5);
        assert_eq!(TuneItem::list(&caps).len(), 5);
        caps.fan = true;
        assert_eq!(TempItem::list(&caps).len(), 6);
        assert_eq!(PreheatItem::list(&caps)[3], PreheatItem::Fan);
    }

    #[test]
    fn test_jerk_hidden_by_default() {
        let items = MotionItem::list(&Capabilities::default());
        assert_eq!(items.len(), 4);
        assert_eq!(position_of(&items, MotionItem::MaxJerk), 0);
        assert_eq!(items[3], MotionItem::Steps);
    }

    #[test]
    fn test_back_is_first() {
        let caps = Capabilities::default();
        assert_eq!(PrepareItem::list(&caps)[0], PrepareItem::Back);
        assert_eq!(ControlItem::list()[0].icon(), icons::BACK);
        assert_eq!(AxisItem::list()[4].label(), "Extruder");
    }
}
