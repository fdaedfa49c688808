//! Value-edit sub-mode
//!
//! While a numeric field is being edited the encoder adjusts the value
//! instead of moving a cursor. Each field kind carries its own bounds and
//! the action taken when the value is committed.

use crate::config::{MachineLimits, PresetSlot};
use crate::input::InputSymbol;
use crate::state::MenuState;
use crate::traits::Axis;

/// Jog feedrate for X and Y (mm/min)
pub const XY_FEEDRATE: u32 = 5000;

/// Jog feedrate for Z (mm/min)
pub const Z_FEEDRATE: u32 = 600;

/// Extruder feedrate (mm/min)
pub const E_FEEDRATE: u32 = 300;

/// Position edits count in tenths of a millimetre
pub const POSITION_SCALE: i32 = 10;

/// Where a heater or fan value goes on commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Target {
    /// Running printer
    Live,
    /// Stored material preset
    Preset(PresetSlot),
}

/// Preset field updated by a preset edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PresetField {
    Hotend,
    Bed,
    Fan,
}

/// Kind of value being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditField {
    /// X, Y or Z position (0.1 mm)
    Axis(Axis),
    /// Extruder position (0.1 mm), limited around the value at entry
    Extruder { origin: i32 },
    /// Hotend temperature (°C)
    Hotend(Target),
    /// Bed temperature (°C)
    Bed(Target),
    /// Fan speed (percent)
    Fan(Target),
    /// Speed factor (percent)
    PrintSpeed,
    /// Z offset (µm)
    ZOffset,
}

/// Inclusive value range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bounds {
    pub min: i32,
    pub max: i32,
}

impl Bounds {
    pub const UNBOUNDED: Bounds = Bounds {
        min: i32::MIN,
        max: i32::MAX,
    };

    /// Ends are swapped when given in the wrong order
    pub const fn new(min: i32, max: i32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

impl EditField {
    /// Menu state that edits this field
    pub fn state(&self) -> MenuState {
        match self {
            EditField::Axis(Axis::X) => MenuState::MoveX,
            EditField::Axis(Axis::Y) => MenuState::MoveY,
            EditField::Axis(Axis::Z) => MenuState::MoveZ,
            EditField::Axis(Axis::E) | EditField::Extruder { .. } => MenuState::Extruder,
            EditField::Hotend(_) => MenuState::HotendTemp,
            EditField::Bed(_) => MenuState::BedTemp,
            EditField::Fan(_) => MenuState::FanSpeed,
            EditField::PrintSpeed => MenuState::PrintSpeed,
            EditField::ZOffset => MenuState::ZOffset,
        }
    }

    /// Allowed range for this field
    pub fn bounds(&self, limits: &MachineLimits) -> Bounds {
        match self {
            EditField::Axis(axis) => {
                let range = match axis {
                    Axis::X => limits.x,
                    Axis::Y => limits.y,
                    _ => limits.z,
                };
                Bounds::new(
                    range.min_mm as i32 * POSITION_SCALE,
                    range.max_mm as i32 * POSITION_SCALE,
                )
            }
            EditField::Extruder { origin } => {
                let reach = limits.extrude_max_length_mm as i32 * POSITION_SCALE;
                Bounds::new(origin.saturating_sub(reach), origin.saturating_add(reach))
            }
            EditField::Hotend(_) => {
                Bounds::new(limits.hotend.min_c as i32, limits.hotend.max_c as i32)
            }
            EditField::Bed(_) => Bounds::new(limits.bed.min_c as i32, limits.bed.max_c as i32),
            EditField::Fan(_) => Bounds::new(0, 100),
            EditField::PrintSpeed => Bounds::UNBOUNDED,
            EditField::ZOffset => Bounds::new(-limits.z_offset_limit_um, limits.z_offset_limit_um),
        }
    }

    /// Decimal places shown while editing
    pub fn frac_digits(&self) -> u8 {
        match self {
            EditField::Axis(_) | EditField::Extruder { .. } => 1,
            EditField::ZOffset => 3,
            _ => 0,
        }
    }
}

/// What committing an edit does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditCommit {
    MoveAxis {
        axis: Axis,
        position_um: i32,
        feedrate: u32,
    },
    HotendTarget(i16),
    BedTarget(i16),
    FanSpeed(u8),
    Feedrate(i32),
    ZOffset(i32),
    Preset {
        slot: PresetSlot,
        field: PresetField,
        value: i32,
    },
}

/// Active value edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValueEdit {
    field: EditField,
    value: i32,
    bounds: Bounds,
    return_to: MenuState,
    row: usize,
}

impl ValueEdit {
    /// Start editing
    ///
    /// # Arguments
    /// - `field`: what is edited
    /// - `initial`: starting value in the field's units
    /// - `limits`: machine limits used for the bounds
    /// - `return_to`: state restored on commit
    /// - `row`: screen row the value is drawn on
    pub fn new(
        field: EditField,
        initial: i32,
        limits: &MachineLimits,
        return_to: MenuState,
        row: usize,
    ) -> Self {
        Self {
            field,
            value: initial,
            bounds: field.bounds(limits),
            return_to,
            row,
        }
    }

    pub fn field(&self) -> EditField {
        self.field
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn return_to(&self) -> MenuState {
        self.return_to
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Apply a rotation symbol
    ///
    /// Returns true if the value changed. Values saturate and clamp, they
    /// never wrap.
    pub fn apply(&mut self, symbol: InputSymbol) -> bool {
        let step = symbol.step();
        if step == 0 {
            return false;
        }
        let next = self.bounds.clamp(self.value.saturating_add(step));
        let changed = next != self.value;
        self.value = next;
        changed
    }

    /// Action to perform for the current value
    pub fn commit(&self) -> EditCommit {
        let v = self.value;
        match self.field {
            EditField::Axis(axis) => EditCommit::MoveAxis {
                axis,
                position_um: v.saturating_mul(1000 / POSITION_SCALE),
                feedrate: match axis {
                    Axis::Z => Z_FEEDRATE,
                    Axis::E => E_FEEDRATE,
                    _ => XY_FEEDRATE,
                },
            },
            EditField::Extruder { .. } => EditCommit::MoveAxis {
                axis: Axis::E,
                position_um: v.saturating_mul(1000 / POSITION_SCALE),
                feedrate: E_FEEDRATE,
            },
            EditField::Hotend(Target::Live) => EditCommit::HotendTarget(to_i16(v)),
            EditField::Bed(Target::Live) => EditCommit::BedTarget(to_i16(v)),
            EditField::Fan(Target::Live) => EditCommit::FanSpeed(v.clamp(0, 100) as u8),
            EditField::Hotend(Target::Preset(slot)) => EditCommit::Preset {
                slot,
                field: PresetField::Hotend,
                value: v,
            },
            EditField::Bed(Target::Preset(slot)) => EditCommit::Preset {
                slot,
                field: PresetField::Bed,
                value: v,
            },
            EditField::Fan(Target::Preset(slot)) => EditCommit::Preset {
                slot,
                field: PresetField::Fan,
                value: v,
            },
            EditField::PrintSpeed => EditCommit::Feedrate(v),
            EditField::ZOffset => EditCommit::ZOffset(v),
        }
    }
}

fn to_i16(v: i32) -> i16 {
    v.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn limits() -> MachineLimits {
        MachineLimits::default()
    }

    #[test]
    fn test_axis_edit_commit() {
        let mut edit = ValueEdit::new(
            EditField::Axis(Axis::X),
            1205,
            &limits(),
            MenuState::AxisMove,
            1,
        );
        assert!(edit.apply(InputSymbol::FastCw));
        assert_eq!(edit.value(), 1215);
        assert_eq!(
            edit.commit(),
            EditCommit::MoveAxis {
                axis: Axis::X,
                position_um: 121_500,
                feedrate: XY_FEEDRATE,
            }
        );
        assert_eq!(edit.field().state(), MenuState::MoveX);
    }

    #[test]
    fn test_clamps_at_minimum() {
        let mut edit = ValueEdit::new(
            EditField::Hotend(Target::Live),
            6,
            &limits(),
            MenuState::Temperature,
            1,
        );
        assert!(edit.apply(InputSymbol::Ccw));
        assert_eq!(edit.value(), 5);
        assert!(!edit.apply(InputSymbol::FastCcw));
        assert_eq!(edit.value(), 5);
    }

    #[test]
    fn test_clamps_at_maximum() {
        let mut edit = ValueEdit::new(
            EditField::Bed(Target::Live),
            135,
            &limits(),
            MenuState::Temperature,
            2,
        );
        assert!(edit.apply(InputSymbol::FastCw));
        assert_eq!(edit.value(), 140);
        assert!(!edit.apply(InputSymbol::Cw));
    }

    #[test]
    fn test_extruder_delta_limit() {
        let mut edit = ValueEdit::new(
            EditField::Extruder { origin: 50 },
            50,
            &limits(),
            MenuState::AxisMove,
            4,
        );
        for _ in 0..300 {
            edit.apply(InputSymbol::FastCw);
        }
        assert_eq!(edit.value(), 50 + 2000);
        for _ in 0..600 {
            edit.apply(InputSymbol::FastCcw);
        }
        assert_eq!(edit.value(), 50 - 2000);
    }

    #[test]
    fn test_inverted_window_does_not_panic() {
        assert_eq!(Bounds::new(50, -50), Bounds::new(-50, 50));

        let limits = MachineLimits {
            extrude_max_length_mm: -5,
            ..limits()
        };
        let mut edit = ValueEdit::new(
            EditField::Extruder { origin: 0 },
            0,
            &limits,
            MenuState::AxisMove,
            4,
        );
        assert_eq!(edit.bounds(), Bounds::new(-50, 50));
        edit.apply(InputSymbol::Cw);
        assert_eq!(edit.value(), 1);
    }

    #[test]
    fn test_print_speed_unclamped() {
        let mut edit = ValueEdit::new(
            EditField::PrintSpeed,
            i32::MAX - 5,
            &limits(),
            MenuState::Tune,
            1,
        );
        edit.apply(InputSymbol::FastCw);
        assert_eq!(edit.value(), i32::MAX);
        assert_eq!(edit.commit(), EditCommit::Feedrate(i32::MAX));
    }

    #[test]
    fn test_preset_commit() {
        let edit = ValueEdit::new(
            EditField::Fan(Target::Preset(PresetSlot::Tpu)),
            80,
            &limits(),
            MenuState::TpuPreheat,
            3,
        );
        assert_eq!(
            edit.commit(),
            EditCommit::Preset {
                slot: PresetSlot::Tpu,
                field: PresetField::Fan,
                value: 80,
            }
        );
    }

    #[test]
    fn test_enter_is_not_a_step() {
        let mut edit = ValueEdit::new(EditField::ZOffset, 0, &limits(), MenuState::Tune, 4);
        assert!(!edit.apply(InputSymbol::Enter));
        assert_eq!(edit.bounds(), Bounds::new(-20_000, 20_000));
    }

    proptest! {
        #[test]
        fn prop_edit_stays_in_bounds(start in 0i32..=1000, steps in proptest::collection::vec(-10i32..=10, 0..200)) {
            let limits = limits();
            let mut edit = ValueEdit::new(EditField::ZOffset, start, &limits, MenuState::Prepare, 4);
            for step in steps {
                let symbol = match step {
                    s if s >= 5 => InputSymbol::FastCw,
                    s if s > 0 => InputSymbol::Cw,
                    s if s <= -5 => InputSymbol::FastCcw,
                    s if s < 0 => InputSymbol::Ccw,
                    _ => InputSymbol::None,
                };
                edit.apply(symbol);
                prop_assert!(edit.value() >= -limits.z_offset_limit_um);
                prop_assert!(edit.value() <= limits.z_offset_limit_um);
            }
        }
    }
}
