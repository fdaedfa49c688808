//! List menus

use crate::config::PresetSlot;
use crate::edit::{EditField, Target};
use crate::hmi::screens::{draw_file_entry, tenths};
use crate::hmi::{HomingRequest, Hmi, HmiError, PrintSession};
use crate::input::InputSymbol;
use crate::menu::{
    position_of, AxisItem, ControlItem, MotionItem, PreheatItem, PrepareItem, Selected, TempItem,
    TuneItem, NO_VALUES,
};
use crate::state::MenuState;
use crate::traits::{Axis, DisplaySurface, FileList, PrinterController};

/// Main menu pages
const PAGES: usize = 4;

const PAGE_PRINT: usize = 0;
const PAGE_PREPARE: usize = 1;
const PAGE_CONTROL: usize = 2;
const PAGE_MISC: usize = 3;

fn is_rotation(symbol: InputSymbol) -> bool {
    symbol.is_cw() || symbol.is_ccw()
}

impl<D: DisplaySurface, C: PrinterController> Hmi<D, C> {
    pub(in crate::hmi) fn main_menu(&mut self, symbol: InputSymbol) -> Result<(), HmiError> {
        let misc_page = self.config.capabilities.misc_page;
        if is_rotation(symbol) {
            let previous = self.lists.page.now();
            let moved = if symbol.is_cw() {
                self.lists.page.inc(PAGES)
            } else {
                self.lists.page.dec()
            };
            if moved {
                self.renderer.draw_page(previous, false, misc_page)?;
                self.renderer
                    .draw_page(self.lists.page.now(), true, misc_page)?;
            }
            return Ok(());
        }
        if symbol != InputSymbol::Enter {
            return Ok(());
        }

        match self.lists.page.now() {
            PAGE_PRINT => {
                self.refresh_files();
                self.lists.file.reset();
                self.show(MenuState::SelectFile)
            }
            PAGE_PREPARE => {
                self.lists.prepare.reset();
                self.show(MenuState::Prepare)
            }
            PAGE_CONTROL => {
                self.lists.control.reset();
                self.show(MenuState::Control)
            }
            _ if misc_page => {
                self.lists.misc.reset();
                self.show(MenuState::Misc)
            }
            _ => self.show(MenuState::Info),
        }
    }

    /// Reload the file list from the controller
    ///
    /// A failed listing shows as an empty directory.
    fn refresh_files(&mut self) {
        let mut paths = FileList::new();
        if let Err(e) = self.controller.file_paths(&mut paths) {
            warn!("file list unavailable: {}", e);
            paths.clear();
        }
        debug!("{} files", paths.len());
        self.files.load(paths);
    }

    pub(in crate::hmi) fn select_file(&mut self, symbol: InputSymbol) -> Result<(), HmiError> {
        if is_rotation(symbol) {
            let count = self.files.len() + 1;
            if let Some(action) = self.lists.file.step(symbol.is_cw(), count) {
                let files = &self.files;
                self.renderer.apply_scroll(action, |r, item, row| {
                    draw_file_entry(r, files, item, row)
                })?;
            }
            return Ok(());
        }
        if symbol != InputSymbol::Enter {
            return Ok(());
        }

        let index = self.lists.file.now();
        if index == 0 {
            if self.files.up() {
                self.lists.file.reset();
                return self.show(MenuState::SelectFile);
            }
            self.lists.page.set(PAGE_PRINT);
            return self.show(MenuState::MainMenu);
        }

        match self.files.select(index - 1) {
            Some(Selected::Directory) => {
                self.lists.file.reset();
                self.show(MenuState::SelectFile)
            }
            Some(Selected::File(path)) => {
                self.controller.start_print(&path)?;
                info!("printing {}", path.as_str());
                self.print = PrintSession::default();
                self.lists.print.reset();
                self.lists.file.reset();
                self.show(MenuState::PrintProcess)
            }
            None => Ok(()),
        }
    }

    pub(in crate::hmi) fn prepare(&mut self, symbol: InputSymbol) -> Result<(), HmiError> {
        let caps = self.config.capabilities;
        let items = PrepareItem::list(&caps);
        if is_rotation(symbol) {
            let values = self.prepare_values(&items);
            let action = self.lists.prepare.step(symbol.is_cw(), items.len());
            return self.scroll_items(action, &items, &values);
        }
        if symbol != InputSymbol::Enter {
            return Ok(());
        }
        let Some(item) = items.get(self.lists.prepare.now()).copied() else {
            return Ok(());
        };

        match item {
            PrepareItem::Back => {
                self.lists.page.set(PAGE_PREPARE);
                self.show(MenuState::MainMenu)
            }
            PrepareItem::Move => {
                self.controller.reset_extruder()?;
                self.lists.axis.reset();
                self.show(MenuState::AxisMove)
            }
            PrepareItem::DisableSteppers => {
                self.controller.disable_steppers()?;
                Ok(())
            }
            PrepareItem::Home => {
                self.controller.home_all()?;
                self.homing = Some(HomingRequest {
                    cursor: self.lists.prepare.now(),
                });
                self.show(MenuState::Homing)
            }
            PrepareItem::ZOffset => {
                let offset = self.status_snapshot().z_offset_um;
                let row = self.lists.prepare.row();
                self.start_edit(EditField::ZOffset, offset, MenuState::Prepare, row)
            }
            PrepareItem::PreheatPla => self.preheat(PresetSlot::Pla),
            PrepareItem::PreheatTpu => self.preheat(PresetSlot::Tpu),
            PrepareItem::Cooldown => {
                self.controller.set_hotend_target(0)?;
                self.controller.set_bed_target(0)?;
                self.controller.set_fan_speed(0)?;
                Ok(())
            }
        }
    }

    fn preheat(&mut self, slot: PresetSlot) -> Result<(), HmiError> {
        let preset = self.config.presets.get(slot);
        info!("preheat {}", preset.name.as_str());
        self.controller.set_hotend_target(preset.hotend_c)?;
        self.controller.set_bed_target(preset.bed_c)?;
        if self.config.capabilities.fan {
            self.controller.set_fan_speed(preset.fan_percent)?;
        }
        Ok(())
    }

    pub(in crate::hmi) fn control(&mut self, symbol: InputSymbol) -> Result<(), HmiError> {
        let items = ControlItem::list();
        if is_rotation(symbol) {
            let action = self.lists.control.step(symbol.is_cw(), items.len());
            return self.scroll_items(action, &items, &NO_VALUES);
        }
        if symbol != InputSymbol::Enter {
            return Ok(());
        }

        match items.get(self.lists.control.now()) {
            Some(ControlItem::Back) => {
                self.lists.page.set(PAGE_CONTROL);
                self.show(MenuState::MainMenu)
            }
            Some(ControlItem::Temperature) => {
                self.lists.temperature.reset();
                self.show(MenuState::Temperature)
            }
            Some(ControlItem::Motion) => {
                self.lists.motion.reset();
                self.show(MenuState::Motion)
            }
            Some(ControlItem::Info) => self.show(MenuState::Info),
            None => Ok(()),
        }
    }

    pub(in crate::hmi) fn misc(&mut self, symbol: InputSymbol) -> Result<(), HmiError> {
        let count = self.config.macros.len() + 1;
        if is_rotation(symbol) {
            if let Some(action) = self.lists.misc.step(symbol.is_cw(), count) {
                let macros = &self.config.macros;
                self.renderer.apply_scroll(action, |r, item, row| {
                    match macros.get(item - 1) {
                        Some(m) => r.draw_menu_line(row, m.icon(), m.label()),
                        None => Ok(()),
                    }
                })?;
            }
            return Ok(());
        }
        if symbol != InputSymbol::Enter {
            return Ok(());
        }

        let index = self.lists.misc.now();
        if index == 0 {
            self.lists.misc.reset();
            self.lists.page.set(PAGE_MISC);
            return self.show(MenuState::MainMenu);
        }
        let Some(descriptor) = self.config.macros.get(index - 1) else {
            return Ok(());
        };
        info!("macro {}", descriptor.id());
        self.controller.run_macro(descriptor.gcode())?;
        Ok(())
    }

    pub(in crate::hmi) fn info(&mut self, symbol: InputSymbol) -> Result<(), HmiError> {
        if symbol != InputSymbol::Enter {
            return Ok(());
        }
        if self.config.capabilities.misc_page {
            let items = ControlItem::list();
            self.lists
                .control
                .select(position_of(&items, ControlItem::Info));
            self.show(MenuState::Control)
        } else {
            self.lists.page.set(PAGE_MISC);
            self.show(MenuState::MainMenu)
        }
    }

    pub(in crate::hmi) fn motion(&mut self, symbol: InputSymbol) -> Result<(), HmiError> {
        let items = MotionItem::list(&self.config.capabilities);
        if is_rotation(symbol) {
            let action = self.lists.motion.step(symbol.is_cw(), items.len());
            return self.scroll_items(action, &items, &NO_VALUES);
        }
        if symbol != InputSymbol::Enter {
            return Ok(());
        }

        match items.get(self.lists.motion.now()) {
            Some(MotionItem::Back) => {
                let control = ControlItem::list();
                self.lists
                    .control
                    .select(position_of(&control, ControlItem::Motion));
                self.show(MenuState::Control)
            }
            Some(_) => self.feature_not_available_from(MenuState::Motion),
            None => Ok(()),
        }
    }

    /// Max speed, acceleration, jerk and steps editors
    pub(in crate::hmi) fn motion_editor(&mut self, symbol: InputSymbol) -> Result<(), HmiError> {
        if symbol != InputSymbol::Enter {
            return Ok(());
        }
        self.feature_not_available_from(MenuState::Motion)
    }

    fn feature_not_available_from(&mut self, caller: MenuState) -> Result<(), HmiError> {
        self.popup_caller = Some(caller);
        self.show(MenuState::FeatureNotAvailable)
    }

    pub(in crate::hmi) fn tune(&mut self, symbol: InputSymbol) -> Result<(), HmiError> {
        let items = TuneItem::list(&self.config.capabilities);
        if is_rotation(symbol) {
            let values = self.tune_values(&items);
            let action = self.lists.tune.step(symbol.is_cw(), items.len());
            return self.scroll_items(action, &items, &values);
        }
        if symbol != InputSymbol::Enter {
            return Ok(());
        }
        let Some(item) = items.get(self.lists.tune.now()).copied() else {
            return Ok(());
        };
        let status = self.status_snapshot();
        let (field, initial) = match item {
            TuneItem::Back => {
                self.lists.print.reset();
                return self.show(MenuState::PrintProcess);
            }
            TuneItem::Speed => (EditField::PrintSpeed, status.feedrate_percent),
            TuneItem::Hotend => (
                EditField::Hotend(Target::Live),
                status.hotend.target_c as i32,
            ),
            TuneItem::Bed => (EditField::Bed(Target::Live), status.bed.target_c as i32),
            TuneItem::Fan => (EditField::Fan(Target::Live), status.fan_percent as i32),
            TuneItem::ZOffset => (EditField::ZOffset, status.z_offset_um),
        };
        let row = self.lists.tune.row();
        self.start_edit(field, initial, MenuState::Tune, row)
    }

    pub(in crate::hmi) fn axis_move(&mut self, symbol: InputSymbol) -> Result<(), HmiError> {
        let items = AxisItem::list();
        if is_rotation(symbol) {
            let values = self.axis_values(&items);
            let action = self.lists.axis.step(symbol.is_cw(), items.len());
            return self.scroll_items(action, &items, &values);
        }
        if symbol != InputSymbol::Enter {
            return Ok(());
        }
        let Some(item) = items.get(self.lists.axis.now()).copied() else {
            return Ok(());
        };

        let axis = match item {
            AxisItem::Back => {
                let prepare = PrepareItem::list(&self.config.capabilities);
                self.lists
                    .prepare
                    .select(position_of(&prepare, PrepareItem::Move));
                return self.show(MenuState::Prepare);
            }
            AxisItem::X => Axis::X,
            AxisItem::Y => Axis::Y,
            AxisItem::Z => Axis::Z,
            AxisItem::E => Axis::E,
        };

        let status = self.status_snapshot();
        let row = self.lists.axis.row();
        let value = tenths(status.position.get(axis));
        if axis != Axis::E {
            return self.start_edit(EditField::Axis(axis), value, MenuState::AxisMove, row);
        }

        let too_cold = self.config.capabilities.prevent_cold_extrusion
            && status.hotend.current_c < self.config.limits.extrude_min_temp_c;
        if too_cold {
            warn!(
                "extrude refused at {}C, need {}C",
                status.hotend.current_c,
                self.config.limits.extrude_min_temp_c
            );
            return self.show(MenuState::PopupWindow);
        }
        self.start_edit(
            EditField::Extruder { origin: value },
            value,
            MenuState::AxisMove,
            row,
        )
    }

    pub(in crate::hmi) fn temperature(&mut self, symbol: InputSymbol) -> Result<(), HmiError> {
        let items = TempItem::list(&self.config.capabilities);
        if is_rotation(symbol) {
            let values = self.temperature_values(&items);
            let action = self.lists.temperature.step(symbol.is_cw(), items.len());
            return self.scroll_items(action, &items, &values);
        }
        if symbol != InputSymbol::Enter {
            return Ok(());
        }
        let Some(item) = items.get(self.lists.temperature.now()).copied() else {
            return Ok(());
        };

        let status = self.status_snapshot();
        let row = self.lists.temperature.row();
        let (field, initial) = match item {
            TempItem::Back => {
                let control = ControlItem::list();
                self.lists
                    .control
                    .select(position_of(&control, ControlItem::Temperature));
                return self.show(MenuState::Control);
            }
            TempItem::PlaPreset => {
                self.lists.pla.reset();
                return self.show(MenuState::PlaPreheat);
            }
            TempItem::TpuPreset => {
                self.lists.tpu.reset();
                return self.show(MenuState::TpuPreheat);
            }
            TempItem::Hotend => (
                EditField::Hotend(Target::Live),
                status.hotend.target_c as i32,
            ),
            TempItem::Bed => (EditField::Bed(Target::Live), status.bed.target_c as i32),
            TempItem::Fan => (EditField::Fan(Target::Live), status.fan_percent as i32),
        };
        self.start_edit(field, initial, MenuState::Temperature, row)
    }

    pub(in crate::hmi) fn pla_preheat(&mut self, symbol: InputSymbol) -> Result<(), HmiError> {
        self.preset_menu(PresetSlot::Pla, symbol)
    }

    pub(in crate::hmi) fn tpu_preheat(&mut self, symbol: InputSymbol) -> Result<(), HmiError> {
        self.preset_menu(PresetSlot::Tpu, symbol)
    }

    fn preset_menu(&mut self, slot: PresetSlot, symbol: InputSymbol) -> Result<(), HmiError> {
        let (state, parent_item) = match slot {
            PresetSlot::Pla => (MenuState::PlaPreheat, TempItem::PlaPreset),
            PresetSlot::Tpu => (MenuState::TpuPreheat, TempItem::TpuPreset),
        };
        let items = PreheatItem::list(&self.config.capabilities);
        if is_rotation(symbol) {
            let values = self.preset_values(&items, slot);
            let list = match slot {
                PresetSlot::Pla => &mut self.lists.pla,
                PresetSlot::Tpu => &mut self.lists.tpu,
            };
            let action = list.step(symbol.is_cw(), items.len());
            return self.scroll_items(action, &items, &values);
        }
        if symbol != InputSymbol::Enter {
            return Ok(());
        }

        let list = match slot {
            PresetSlot::Pla => self.lists.pla,
            PresetSlot::Tpu => self.lists.tpu,
        };
        let Some(item) = items.get(list.now()).copied() else {
            return Ok(());
        };
        let preset = self.config.presets.get(slot).clone();
        let (field, initial) = match item {
            PreheatItem::Back => {
                let parent = TempItem::list(&self.config.capabilities);
                self.lists
                    .temperature
                    .select(position_of(&parent, parent_item));
                return self.show(MenuState::Temperature);
            }
            PreheatItem::Save => {
                self.controller.save_config(&self.config.presets)?;
                info!("presets saved");
                return Ok(());
            }
            PreheatItem::Hotend => (EditField::Hotend(Target::Preset(slot)), preset.hotend_c as i32),
            PreheatItem::Bed => (EditField::Bed(Target::Preset(slot)), preset.bed_c as i32),
            PreheatItem::Fan => (EditField::Fan(Target::Preset(slot)), preset.fan_percent as i32),
        };
        self.start_edit(field, initial, state, list.row())
    }
}
