//! Numeric value edits

use crate::edit::{EditCommit, PresetField, ValueEdit};
use crate::hmi::{Hmi, HmiError};
use crate::input::InputSymbol;
use crate::state::MenuState;
use crate::traits::{DisplaySurface, PrinterController};

impl<D: DisplaySurface, C: PrinterController> Hmi<D, C> {
    /// Shared by all nine edit states
    pub(in crate::hmi) fn value_edit(&mut self, symbol: InputSymbol) -> Result<(), HmiError> {
        let Some(mut edit) = self.edit else {
            warn!("no active edit in {:?}", self.state);
            return self.show(MenuState::MainMenu);
        };

        match symbol {
            InputSymbol::Enter => self.commit_edit(edit),
            _ => {
                if edit.apply(symbol) {
                    self.edit = Some(edit);
                    self.renderer.draw_value(
                        edit.row(),
                        edit.field().frac_digits(),
                        edit.value(),
                        true,
                    )?;
                }
                Ok(())
            }
        }
    }

    /// Leave the edit and perform its action
    fn commit_edit(&mut self, edit: ValueEdit) -> Result<(), HmiError> {
        self.edit = None;
        self.state = edit.return_to();
        self.rate_limited = true;
        self.renderer.draw_value(
            edit.row(),
            edit.field().frac_digits(),
            edit.value(),
            false,
        )?;

        let commit = edit.commit();
        debug!("commit {:?}", commit);
        match commit {
            EditCommit::MoveAxis {
                axis,
                position_um,
                feedrate,
            } => {
                debug!("move {} to {}um", axis.letter(), position_um);
                self.controller.move_axis(axis, position_um, feedrate)?
            }
            EditCommit::HotendTarget(celsius) => self.controller.set_hotend_target(celsius)?,
            EditCommit::BedTarget(celsius) => self.controller.set_bed_target(celsius)?,
            EditCommit::FanSpeed(percent) => self.controller.set_fan_speed(percent)?,
            EditCommit::Feedrate(percent) => self.controller.set_feedrate(percent)?,
            EditCommit::ZOffset(offset_um) => self.controller.apply_z_offset(offset_um)?,
            EditCommit::Preset { slot, field, value } => {
                let preset = self.config.presets.get_mut(slot);
                match field {
                    PresetField::Hotend => preset.hotend_c = saturate_i16(value),
                    PresetField::Bed => preset.bed_c = saturate_i16(value),
                    PresetField::Fan => preset.fan_percent = value.clamp(0, 100) as u8,
                }
            }
        }
        Ok(())
    }
}

fn saturate_i16(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}
