//! Recording display and controller doubles for tests

use std::string::{String, ToString};
use std::vec::Vec;

use crate::config::MaterialPresets;
use crate::traits::{
    Axis, Color, CommandError, DisplayError, DisplaySurface, FileList, PrinterController,
    PrinterStatus, Rect, ScrollDirection, StatusUnavailable, TextStyle, MAX_PATH_LEN,
};

/// One recorded display primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    FillRect {
        color: Color,
        area: Rect,
    },
    DrawRect {
        color: Color,
        area: Rect,
    },
    Line {
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    },
    Icon {
        library: u8,
        icon: u8,
        x: u16,
        y: u16,
    },
    Text {
        x: u16,
        y: u16,
        text: String,
    },
    Int {
        x: u16,
        y: u16,
        value: i32,
        background: Color,
    },
    Fixed {
        x: u16,
        y: u16,
        frac_digits: u8,
        value: i32,
        background: Color,
    },
    Backlight(u8),
    MoveArea {
        direction: ScrollDirection,
        distance: u16,
        area: Rect,
    },
}

/// 240x320 panel that records every call
#[derive(Debug, Default)]
pub struct MockDisplay {
    pub calls: Vec<DrawCall>,
    /// Fail every call with this error
    pub fail_with: Option<DisplayError>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, call: DrawCall) -> Result<(), DisplayError> {
        if let Some(e) = self.fail_with {
            return Err(e);
        }
        self.calls.push(call);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Drawn strings, in order
    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t == needle)
    }

    pub fn has_icon(&self, library: u8, icon: u8) -> bool {
        self.calls.iter().any(|c| {
            matches!(c, DrawCall::Icon { library: l, icon: i, .. } if *l == library && *i == icon)
        })
    }

    pub fn last_backlight(&self) -> Option<u8> {
        self.calls.iter().rev().find_map(|c| match c {
            DrawCall::Backlight(level) => Some(*level),
            _ => None,
        })
    }

    /// Values drawn with a highlighted background
    pub fn highlighted_values(&self) -> Vec<i32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Int {
                    value, background, ..
                }
                | DrawCall::Fixed {
                    value, background, ..
                } if *background == Color::SELECTED => Some(*value),
                _ => None,
            })
            .collect()
    }
}

impl DisplaySurface for MockDisplay {
    fn size(&self) -> (u16, u16) {
        (240, 320)
    }

    fn fill_rect(&mut self, color: Color, area: Rect) -> Result<(), DisplayError> {
        self.record(DrawCall::FillRect { color, area })
    }

    fn draw_rect(&mut self, color: Color, area: Rect) -> Result<(), DisplayError> {
        self.record(DrawCall::DrawRect { color, area })
    }

    fn draw_line(
        &mut self,
        _color: Color,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), DisplayError> {
        self.record(DrawCall::Line { x0, y0, x1, y1 })
    }

    fn draw_icon(&mut self, library: u8, icon: u8, x: u16, y: u16) -> Result<(), DisplayError> {
        self.record(DrawCall::Icon {
            library,
            icon,
            x,
            y,
        })
    }

    fn draw_text(
        &mut self,
        _style: TextStyle,
        x: u16,
        y: u16,
        text: &str,
    ) -> Result<(), DisplayError> {
        self.record(DrawCall::Text {
            x,
            y,
            text: text.to_string(),
        })
    }

    fn draw_int(
        &mut self,
        style: TextStyle,
        _digits: u8,
        x: u16,
        y: u16,
        value: i32,
    ) -> Result<(), DisplayError> {
        self.record(DrawCall::Int {
            x,
            y,
            value,
            background: style.background,
        })
    }

    fn draw_fixed(
        &mut self,
        style: TextStyle,
        _int_digits: u8,
        frac_digits: u8,
        x: u16,
        y: u16,
        value: i32,
    ) -> Result<(), DisplayError> {
        self.record(DrawCall::Fixed {
            x,
            y,
            frac_digits,
            value,
            background: style.background,
        })
    }

    fn set_backlight(&mut self, level: u8) -> Result<(), DisplayError> {
        self.record(DrawCall::Backlight(level))
    }

    fn move_area(
        &mut self,
        direction: ScrollDirection,
        distance: u16,
        _background: Color,
        area: Rect,
    ) -> Result<(), DisplayError> {
        self.record(DrawCall::MoveArea {
            direction,
            distance,
            area,
        })
    }
}

/// One recorded controller command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    HotendTarget(i16),
    BedTarget(i16),
    FanSpeed(u8),
    Feedrate(i32),
    MoveAxis {
        axis: Axis,
        position_um: i32,
        feedrate: u32,
    },
    ResetExtruder,
    DisableSteppers,
    HomeAll,
    ZOffset(i32),
    StartPrint(String),
    Pause,
    Resume,
    Cancel,
    Macro(String),
    SaveConfig(MaterialPresets),
    ProbeAdjust(i32),
    ProbeAccept,
}

/// Controller with a settable status that records commands
#[derive(Debug, Default)]
pub struct MockController {
    pub status: PrinterStatus,
    /// Status reads fail
    pub unavailable: bool,
    pub files: Vec<&'static str>,
    pub commands: Vec<Command>,
    /// Every command fails with this error
    pub fail_with: Option<CommandError>,
}

impl MockController {
    pub fn new() -> Self {
        Self::default()
    }

    fn submit(&mut self, command: Command) -> Result<(), CommandError> {
        if let Some(e) = &self.fail_with {
            return Err(e.clone());
        }
        self.commands.push(command);
        Ok(())
    }
}

impl PrinterController for MockController {
    fn status(&mut self) -> Result<PrinterStatus, StatusUnavailable> {
        if self.unavailable {
            return Err(StatusUnavailable);
        }
        Ok(self.status.clone())
    }

    fn file_paths(&mut self, out: &mut FileList) -> Result<(), CommandError> {
        for path in &self.files {
            let mut entry: heapless::String<MAX_PATH_LEN> = heapless::String::new();
            let _ = entry.push_str(path);
            let _ = out.push(entry);
        }
        Ok(())
    }

    fn set_hotend_target(&mut self, celsius: i16) -> Result<(), CommandError> {
        self.submit(Command::HotendTarget(celsius))
    }

    fn set_bed_target(&mut self, celsius: i16) -> Result<(), CommandError> {
        self.submit(Command::BedTarget(celsius))
    }

    fn set_fan_speed(&mut self, percent: u8) -> Result<(), CommandError> {
        self.submit(Command::FanSpeed(percent))
    }

    fn set_feedrate(&mut self, percent: i32) -> Result<(), CommandError> {
        self.submit(Command::Feedrate(percent))
    }

    fn move_axis(&mut self, axis: Axis, position_um: i32, feedrate: u32) -> Result<(), CommandError> {
        self.submit(Command::MoveAxis {
            axis,
            position_um,
            feedrate,
        })
    }

    fn reset_extruder(&mut self) -> Result<(), CommandError> {
        self.submit(Command::ResetExtruder)
    }

    fn disable_steppers(&mut self) -> Result<(), CommandError> {
        self.submit(Command::DisableSteppers)
    }

    fn home_all(&mut self) -> Result<(), CommandError> {
        self.submit(Command::HomeAll)
    }

    fn apply_z_offset(&mut self, offset_um: i32) -> Result<(), CommandError> {
        self.submit(Command::ZOffset(offset_um))
    }

    fn start_print(&mut self, path: &str) -> Result<(), CommandError> {
        self.submit(Command::StartPrint(path.to_string()))
    }

    fn pause_job(&mut self) -> Result<(), CommandError> {
        self.submit(Command::Pause)
    }

    fn resume_job(&mut self) -> Result<(), CommandError> {
        self.submit(Command::Resume)
    }

    fn cancel_job(&mut self) -> Result<(), CommandError> {
        self.submit(Command::Cancel)
    }

    fn run_macro(&mut self, command: &str) -> Result<(), CommandError> {
        self.submit(Command::Macro(command.to_string()))
    }

    fn save_config(&mut self, presets: &MaterialPresets) -> Result<(), CommandError> {
        self.submit(Command::SaveConfig(presets.clone()))
    }

    fn probe_adjust(&mut self, delta_um: i32) -> Result<(), CommandError> {
        self.submit(Command::ProbeAdjust(delta_um))
    }

    fn probe_accept(&mut self) -> Result<(), CommandError> {
        self.submit(Command::ProbeAccept)
    }
}
