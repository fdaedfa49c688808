//! Full-screen redraws and shared list helpers

use super::{Hmi, HmiError};
use crate::config::PresetSlot;
use crate::edit::{EditField, ValueEdit, POSITION_SCALE};
use crate::menu::{
    AxisItem, ControlItem, EntryKind, FileBrowser, ItemValue, ItemValues, MenuItem, MotionItem,
    PreheatItem, PrepareItem, ScrollAction, TempItem, TuneItem, NO_VALUES,
};
use crate::render::{icons, Renderer};
use crate::state::MenuState;
use crate::traits::{Axis, DisplayError, DisplaySurface, PrinterController};

/// Tenths of a millimetre for an axis position
pub(super) fn tenths(um: i32) -> i32 {
    um / (1000 / POSITION_SCALE)
}

fn temp(value: i16) -> Option<ItemValue> {
    Some(ItemValue::new(0, value as i32))
}

impl<D: DisplaySurface, C: PrinterController> Hmi<D, C> {
    /// Enter `state` and draw its whole screen
    pub(super) fn show(&mut self, state: MenuState) -> Result<(), HmiError> {
        use MenuState::*;

        self.state = state;
        let caps = self.config.capabilities;
        let with_status = match state {
            MainMenu => {
                self.renderer
                    .draw_main_menu(self.lists.page.now(), caps.misc_page)?;
                false
            }
            SelectFile => {
                self.renderer.draw_frame(icons::text::HEADER_FILE_SELECTION)?;
                self.draw_file_list()?;
                true
            }
            Prepare => {
                let items = PrepareItem::list(&caps);
                let values = self.prepare_values(&items);
                self.renderer.draw_frame(icons::text::HEADER_PREPARE)?;
                self.renderer
                    .draw_list(&items, &values, &self.lists.prepare)?;
                true
            }
            Control => {
                let items = ControlItem::list();
                self.renderer.draw_frame(icons::text::HEADER_CONTROL)?;
                self.renderer
                    .draw_list(&items, &NO_VALUES, &self.lists.control)?;
                true
            }
            Misc => {
                self.renderer.clear_screen()?;
                self.renderer.draw_title("Misc")?;
                self.draw_macro_list()?;
                false
            }
            AxisMove => {
                let items = AxisItem::list();
                let values = self.axis_values(&items);
                self.renderer.draw_frame(icons::text::HEADER_MOVE)?;
                self.renderer.draw_list(&items, &values, &self.lists.axis)?;
                true
            }
            Temperature => {
                let items = TempItem::list(&caps);
                let values = self.temperature_values(&items);
                self.renderer.draw_frame(icons::text::HEADER_TEMPERATURE)?;
                self.renderer
                    .draw_list(&items, &values, &self.lists.temperature)?;
                true
            }
            Motion => {
                let items = MotionItem::list(&caps);
                self.renderer.draw_frame(icons::text::HEADER_MOTION)?;
                self.renderer
                    .draw_list(&items, &NO_VALUES, &self.lists.motion)?;
                true
            }
            Info => {
                self.renderer.draw_info(
                    &self.config.limits,
                    &self.config.display.firmware_version,
                    &self.config.display.website,
                )?;
                true
            }
            Tune => {
                let items = TuneItem::list(&caps);
                let values = self.tune_values(&items);
                self.renderer.draw_frame(icons::text::HEADER_TUNE)?;
                self.renderer.draw_list(&items, &values, &self.lists.tune)?;
                true
            }
            PlaPreheat | TpuPreheat => {
                let (slot, title, list) = if state == PlaPreheat {
                    (
                        PresetSlot::Pla,
                        icons::text::HEADER_PLA_SETTINGS,
                        self.lists.pla,
                    )
                } else {
                    (
                        PresetSlot::Tpu,
                        icons::text::HEADER_TPU_SETTINGS,
                        self.lists.tpu,
                    )
                };
                let items = PreheatItem::list(&caps);
                let values = self.preset_values(&items, slot);
                self.renderer.draw_frame(title)?;
                self.renderer.draw_list(&items, &values, &list)?;
                true
            }
            PrintProcess => {
                self.draw_print_process()?;
                true
            }
            PrintWindow => {
                let stop = self.print.action == Some(super::PrintAction::Stop);
                self.renderer
                    .draw_pause_or_stop(stop, self.lists.confirm.now() == 0)?;
                false
            }
            FeatureNotAvailable => {
                self.renderer.draw_feature_not_available()?;
                false
            }
            Homing => {
                self.renderer.draw_homing_popup()?;
                false
            }
            PopupWindow => {
                self.renderer.draw_cold_extrusion_popup()?;
                false
            }
            ManualProbeProcess => {
                self.draw_probe(true)?;
                false
            }
            IconFinder => {
                let icon = self.lists.icon_finder.now().min(u8::MAX as usize) as u8;
                self.renderer.draw_icon_finder(icon)?;
                false
            }
            // Message popups are drawn with their text; edits and
            // motion editors draw in place.
            _ => false,
        };

        if with_status {
            self.draw_status()?;
        }
        Ok(())
    }

    /// Status area from the latest snapshot
    pub(super) fn draw_status(&mut self) -> Result<(), HmiError> {
        if let Some(status) = &self.last_status {
            self.renderer.draw_status_area(status)?;
        }
        Ok(())
    }

    pub(super) fn draw_print_process(&mut self) -> Result<(), HmiError> {
        let progress = self
            .last_status
            .as_ref()
            .map(|s| s.progress)
            .unwrap_or_default();
        let file_name = self
            .last_status
            .as_ref()
            .map(|s| s.file_name.as_str())
            .unwrap_or("");
        self.renderer
            .draw_print_screen(file_name, self.lists.print.now(), self.print.paused)?;
        if self.print.completion_shown {
            self.renderer.draw_print_complete()?;
        } else {
            self.renderer.draw_progress(&progress)?;
        }
        Ok(())
    }

    pub(super) fn draw_probe(&mut self, full: bool) -> Result<(), HmiError> {
        let z_um = self
            .last_status
            .as_ref()
            .and_then(|s| s.probe)
            .map(|p| p.z_um)
            .unwrap_or(0);
        self.renderer
            .draw_probe(z_um, self.probe.step_index, self.probe.out_of_range, full)?;
        Ok(())
    }

    pub(super) fn draw_file_list(&mut self) -> Result<(), HmiError> {
        if self.files.is_empty() {
            self.renderer.clear_menu_area()?;
            self.renderer.draw_back_first(true)?;
            self.renderer.draw_no_media()?;
            return Ok(());
        }
        let files = &self.files;
        self.renderer
            .draw_list_with(files.len() + 1, &self.lists.file, |r, item, row| {
                draw_file_entry(r, files, item, row)
            })?;
        Ok(())
    }

    pub(super) fn draw_macro_list(&mut self) -> Result<(), HmiError> {
        let macros = &self.config.macros;
        self.renderer
            .draw_list_with(macros.len() + 1, &self.lists.misc, |r, item, row| {
                match macros.get(item - 1) {
                    Some(m) => r.draw_menu_line(row, m.icon(), m.label()),
                    None => Ok(()),
                }
            })?;
        Ok(())
    }

    /// Redraw after a fixed menu's cursor moved
    pub(super) fn scroll_items<T: MenuItem>(
        &mut self,
        action: Option<ScrollAction>,
        items: &[T],
        values: &ItemValues,
    ) -> Result<(), HmiError> {
        if let Some(action) = action {
            self.renderer.apply_item_scroll(action, items, values)?;
        }
        Ok(())
    }

    /// Begin editing a value in the row of the selected item
    pub(super) fn start_edit(
        &mut self,
        field: EditField,
        initial: i32,
        return_to: MenuState,
        row: usize,
    ) -> Result<(), HmiError> {
        let edit = ValueEdit::new(field, initial, &self.config.limits, return_to, row);
        debug!("edit {:?} from {}", field.state(), initial);
        self.edit = Some(edit);
        self.rate_limited = false;
        self.state = field.state();
        debug_assert!(self.state.is_value_edit());
        self.renderer
            .draw_value(row, field.frac_digits(), edit.value(), true)?;
        Ok(())
    }

    pub(super) fn prepare_values(&self, items: &[PrepareItem]) -> ItemValues {
        let mut values = NO_VALUES;
        if let Some(status) = &self.last_status {
            for (i, item) in items.iter().enumerate() {
                if *item == PrepareItem::ZOffset {
                    values[i] = Some(ItemValue::new(3, status.z_offset_um));
                }
            }
        }
        values
    }

    pub(super) fn axis_values(&self, items: &[AxisItem]) -> ItemValues {
        let mut values = NO_VALUES;
        if let Some(status) = &self.last_status {
            for (i, item) in items.iter().enumerate() {
                let axis = match item {
                    AxisItem::Back => continue,
                    AxisItem::X => Axis::X,
                    AxisItem::Y => Axis::Y,
                    AxisItem::Z => Axis::Z,
                    AxisItem::E => Axis::E,
                };
                values[i] = Some(ItemValue::new(1, tenths(status.position.get(axis))));
            }
        }
        values
    }

    pub(super) fn temperature_values(&self, items: &[TempItem]) -> ItemValues {
        let mut values = NO_VALUES;
        if let Some(status) = &self.last_status {
            for (i, item) in items.iter().enumerate() {
                values[i] = match item {
                    TempItem::Hotend => temp(status.hotend.target_c),
                    TempItem::Bed => temp(status.bed.target_c),
                    TempItem::Fan => Some(ItemValue::new(0, status.fan_percent as i32)),
                    _ => None,
                };
            }
        }
        values
    }

    pub(super) fn tune_values(&self, items: &[TuneItem]) -> ItemValues {
        let mut values = NO_VALUES;
        if let Some(status) = &self.last_status {
            for (i, item) in items.iter().enumerate() {
                values[i] = match item {
                    TuneItem::Back => None,
                    TuneItem::Speed => Some(ItemValue::new(0, status.feedrate_percent)),
                    TuneItem::Hotend => temp(status.hotend.target_c),
                    TuneItem::Bed => temp(status.bed.target_c),
                    TuneItem::Fan => Some(ItemValue::new(0, status.fan_percent as i32)),
                    TuneItem::ZOffset => Some(ItemValue::new(3, status.z_offset_um)),
                };
            }
        }
        values
    }

    pub(super) fn preset_values(&self, items: &[PreheatItem], slot: PresetSlot) -> ItemValues {
        let preset = self.config.presets.get(slot);
        let mut values = NO_VALUES;
        for (i, item) in items.iter().enumerate() {
            values[i] = match item {
                PreheatItem::Hotend => temp(preset.hotend_c),
                PreheatItem::Bed => temp(preset.bed_c),
                PreheatItem::Fan => Some(ItemValue::new(0, preset.fan_percent as i32)),
                _ => None,
            };
        }
        values
    }
}

/// One file browser row; `item` counts the Back row
pub(super) fn draw_file_entry<D: DisplaySurface>(
    renderer: &mut Renderer<D>,
    files: &FileBrowser,
    item: usize,
    row: usize,
) -> Result<(), DisplayError> {
    match files.entries().get(item - 1) {
        Some(entry) => {
            let icon = match entry.kind {
                EntryKind::Directory => icons::MORE,
                EntryKind::File => icons::FILE,
            };
            renderer.draw_menu_line(row, icon, &entry.name)
        }
        None => Ok(()),
    }
}

