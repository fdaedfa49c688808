//! Screen rendering
//!
//! Knows which display primitive to call for each screen element. The panel
//! is 240x320: a grey title bar, a list area of six menu rows and a status
//! area at the bottom.

pub mod icons;
pub mod text;

use core::fmt::Write;

use heapless::String;

use crate::config::{Language, MachineLimits};
use crate::menu::{ItemValues, MenuItem, MenuList, ScrollAction, MROWS};
use crate::traits::{
    Color, DisplayError, DisplayExt, DisplaySurface, Font, PrintProgress, PrinterStatus, Rect,
    ScrollDirection, TextStyle,
};

/// Title bar height
pub const HEADER_HEIGHT: u16 = 24;

/// Top of the status area
pub const STATUS_Y: u16 = 260;

/// Menu row height
pub const MLINE: u16 = 39;

/// Menu label column
pub const LBLX: u16 = 45;

/// Menu font advance
pub const MENU_CHR_W: u16 = 8;

/// Status font advance
pub const STAT_CHR_W: u16 = 10;

/// Column of edited values
pub const VALUE_X: u16 = 172;

/// Popup padding
const PADDING: u16 = 15;

/// Popup text line spacing
const POPUP_LINE_HEIGHT: u16 = 18;

/// OK button height
const BUTTON_HEIGHT: u16 = 31;

/// Manual probe step labels, in the session's step order
pub const PROBE_STEP_LABELS: [&str; 3] = ["1.0", "0.1", "0.05"];

const MENU_TEXT: TextStyle = TextStyle::new(Font::Font8x8, Color::WHITE, Color::BACKGROUND_BLACK);
const STATUS_TEXT: TextStyle =
    TextStyle::new(Font::Font8x8, Color::WHITE, Color::BACKGROUND_BLACK);
const POPUP_TEXT: TextStyle =
    TextStyle::new(Font::Font8x8, Color::WHITE, Color::POPUP_BACKGROUND);

/// Baseline of menu row `line`
pub const fn mbase(line: u16) -> u16 {
    45 + MLINE * line
}

/// Screen renderer over a display surface
pub struct Renderer<D: DisplaySurface> {
    surface: D,
    language: Language,
}

impl<D: DisplaySurface> Renderer<D> {
    /// Create a new renderer
    pub fn new(surface: D, language: Language) -> Self {
        Self { surface, language }
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut D {
        &mut self.surface
    }

    fn text_library(&self) -> u8 {
        self.language.icon_library()
    }

    fn width(&self) -> u16 {
        self.surface.size().0
    }

    fn height(&self) -> u16 {
        self.surface.size().1
    }

    pub fn set_backlight(&mut self, level: u8) -> Result<(), DisplayError> {
        self.surface.set_backlight(level)
    }

    // --- regions ---

    pub fn clear_title_bar(&mut self) -> Result<(), DisplayError> {
        self.surface
            .fill_band(Color::BACKGROUND_GREY, 0, HEADER_HEIGHT)
    }

    pub fn clear_menu_area(&mut self) -> Result<(), DisplayError> {
        self.surface
            .fill_band(Color::BACKGROUND_BLACK, HEADER_HEIGHT, STATUS_Y)
    }

    pub fn clear_status_area(&mut self) -> Result<(), DisplayError> {
        let height = self.height();
        self.surface
            .fill_band(Color::BACKGROUND_BLACK, STATUS_Y, height)
    }

    pub fn clear_main_window(&mut self) -> Result<(), DisplayError> {
        self.clear_title_bar()?;
        self.clear_menu_area()
    }

    pub fn clear_screen(&mut self) -> Result<(), DisplayError> {
        self.clear_main_window()?;
        self.clear_status_area()
    }

    /// Title from the language library
    pub fn draw_title_icon(&mut self, text_icon: u8) -> Result<(), DisplayError> {
        let library = self.text_library();
        self.surface
            .draw_icon(library, text_icon, HEADER_HEIGHT, 1)
    }

    /// Plain text title
    pub fn draw_title(&mut self, title: &str) -> Result<(), DisplayError> {
        let style = TextStyle::new(Font::Font12x24, Color::WHITE, Color::BACKGROUND_GREY);
        self.surface.draw_text(style, 14, 4, title)
    }

    /// Clear the main window and draw a title
    pub fn draw_frame(&mut self, text_icon: u8) -> Result<(), DisplayError> {
        self.clear_main_window()?;
        self.draw_title_icon(text_icon)
    }

    // --- menu rows ---

    pub fn draw_menu_cursor(&mut self, row: usize) -> Result<(), DisplayError> {
        let line = row as u16;
        self.surface.fill_rect(
            Color::CURSOR,
            Rect::new(0, mbase(line) - 18, 10, mbase(line + 1) - 20),
        )
    }

    pub fn erase_menu_cursor(&mut self, row: usize) -> Result<(), DisplayError> {
        let line = row as u16;
        self.surface.fill_rect(
            Color::BACKGROUND_BLACK,
            Rect::new(0, mbase(line) - 18, 14, mbase(line + 1) - 20),
        )
    }

    pub fn move_highlight(&mut self, from_row: usize, to_row: usize) -> Result<(), DisplayError> {
        self.erase_menu_cursor(from_row)?;
        self.draw_menu_cursor(to_row)
    }

    /// Icon, label and divider of one row
    pub fn draw_menu_line(&mut self, row: usize, icon: u8, label: &str) -> Result<(), DisplayError> {
        let line = row as u16;
        let width = self.width();
        self.surface.fill_rect(
            Color::BACKGROUND_BLACK,
            Rect::new(LBLX, mbase(line) - 5, width, mbase(line + 1) - 22),
        )?;
        self.surface.draw_text(MENU_TEXT, LBLX, mbase(line) - 5, label)?;
        self.surface
            .draw_icon(icons::ICON, icon, 20, mbase(line) - 14)?;
        self.surface.draw_line(
            Color::LINE,
            15,
            mbase(line + 1) - 22,
            235,
            mbase(line + 1) - 22,
        )
    }

    pub fn draw_item<T: MenuItem>(&mut self, row: usize, item: T) -> Result<(), DisplayError> {
        self.draw_menu_line(row, item.icon(), item.label())
    }

    /// Fixed "Back" row at the top of a list
    pub fn draw_back_first(&mut self, selected: bool) -> Result<(), DisplayError> {
        let library = self.text_library();
        let width = self.width();
        self.surface
            .draw_icon(icons::ICON, icons::BACK, 20, mbase(0) - 14)?;
        self.surface.fill_rect(
            Color::BACKGROUND_BLACK,
            Rect::new(LBLX, mbase(0) - 5, width, mbase(1) - 22),
        )?;
        self.surface
            .draw_icon(library, icons::text::BACK, LBLX, mbase(0) - 16)?;
        self.surface
            .draw_line(Color::LINE, 15, mbase(1) - 22, 235, mbase(1) - 22)?;
        if selected {
            self.draw_menu_cursor(0)?;
        }
        Ok(())
    }

    /// Draw the visible rows of a list and its cursor
    ///
    /// `draw_row` draws logical item `item` (never 0) at screen row `row`.
    pub fn draw_list_with<F>(
        &mut self,
        count: usize,
        list: &MenuList,
        mut draw_row: F,
    ) -> Result<(), DisplayError>
    where
        F: FnMut(&mut Self, usize, usize) -> Result<(), DisplayError>,
    {
        self.clear_menu_area()?;
        for item in list.window.visible(count) {
            let row = list.window.row_of(item);
            if item == 0 {
                self.draw_back_first(false)?;
            } else {
                draw_row(self, item, row)?;
            }
        }
        self.draw_menu_cursor(list.row())
    }

    /// Draw a fixed menu with optional values beside its rows
    pub fn draw_list<T: MenuItem>(
        &mut self,
        items: &[T],
        values: &ItemValues,
        list: &MenuList,
    ) -> Result<(), DisplayError> {
        self.draw_list_with(items.len(), list, |r, item, row| {
            r.draw_item_row(items, values, item, row)
        })
    }

    fn draw_item_row<T: MenuItem>(
        &mut self,
        items: &[T],
        values: &ItemValues,
        item: usize,
        row: usize,
    ) -> Result<(), DisplayError> {
        let Some(entry) = items.get(item) else {
            return Ok(());
        };
        self.draw_item(row, *entry)?;
        if let Some(Some(v)) = values.get(item) {
            self.draw_value(row, v.frac_digits, v.value, false)?;
        }
        Ok(())
    }

    /// Shift the list area by one row
    pub fn scroll_menu(&mut self, direction: ScrollDirection) -> Result<(), DisplayError> {
        let width = self.width();
        self.surface.move_area(
            direction,
            MLINE,
            Color::BACKGROUND_GREY,
            Rect::new(12, HEADER_HEIGHT, width - 1, STATUS_Y),
        )?;
        match direction {
            ScrollDirection::Down => self.move_highlight(1, 0),
            ScrollDirection::Up => {
                self.move_highlight(MROWS - 1, MROWS)?;
                let y = mbase(MROWS as u16 + 1) - 22;
                self.surface.draw_line(Color::LINE, 18, y, 238, y)
            }
        }
    }

    /// Redraw after a one-step cursor move
    ///
    /// `draw_row` draws a newly revealed item; the Back row is handled here.
    pub fn apply_scroll<F>(&mut self, action: ScrollAction, mut draw_row: F) -> Result<(), DisplayError>
    where
        F: FnMut(&mut Self, usize, usize) -> Result<(), DisplayError>,
    {
        match action {
            ScrollAction::ScrollDown { item } => {
                self.scroll_menu(ScrollDirection::Up)?;
                draw_row(self, item, MROWS)
            }
            ScrollAction::ScrollUp { item } => {
                self.scroll_menu(ScrollDirection::Down)?;
                if item == 0 {
                    self.draw_back_first(true)
                } else {
                    draw_row(self, item, 0)
                }
            }
            ScrollAction::Highlight { from_row, to_row } => self.move_highlight(from_row, to_row),
        }
    }

    pub fn apply_item_scroll<T: MenuItem>(
        &mut self,
        action: ScrollAction,
        items: &[T],
        values: &ItemValues,
    ) -> Result<(), DisplayError> {
        self.apply_scroll(action, |r, item, row| {
            r.draw_item_row(items, values, item, row)
        })
    }

    /// Value beside a menu row
    ///
    /// Highlighted while being edited.
    pub fn draw_value(
        &mut self,
        row: usize,
        frac_digits: u8,
        value: i32,
        highlighted: bool,
    ) -> Result<(), DisplayError> {
        let background = if highlighted {
            Color::SELECTED
        } else {
            Color::BACKGROUND_BLACK
        };
        let style = TextStyle::new(Font::Font8x8, Color::WHITE, background);
        let y = mbase(row as u16) - 5;
        if frac_digits == 0 {
            self.surface.draw_int(style, 3, VALUE_X + 16, y, value)
        } else {
            self.surface
                .draw_fixed(style, 3, frac_digits, VALUE_X, y, value)
        }
    }

    /// "No Media" banner for an empty file list
    pub fn draw_no_media(&mut self) -> Result<(), DisplayError> {
        let width = self.width();
        self.surface.fill_rect(
            Color::BACKGROUND_RED,
            Rect::new(11, mbase(3) - 10, width - 10, mbase(4)),
        )?;
        let style = TextStyle::new(Font::Font16x32, Color::YELLOW, Color::BACKGROUND_RED);
        self.surface
            .draw_text(style, (width - 8 * 16) / 2, mbase(3), "No Media")
    }

    // --- main menu ---

    /// Draw the four main menu pages
    ///
    /// - `page`: selected page
    /// - `misc_page`: fourth page is Misc instead of Info
    pub fn draw_main_menu(&mut self, page: usize, misc_page: bool) -> Result<(), DisplayError> {
        self.clear_screen()?;
        let library = self.text_library();
        self.surface
            .draw_icon(library, icons::text::HEADER_MAIN, 29, 1)?;
        for index in 0..4 {
            self.draw_page(index, index == page, misc_page)?;
        }
        Ok(())
    }

    /// Draw one main menu page tile
    pub fn draw_page(&mut self, index: usize, selected: bool, misc_page: bool) -> Result<(), DisplayError> {
        let library = self.text_library();
        let (x, y) = match index {
            0 => (12, 51),
            1 => (126, 51),
            2 => (12, 178),
            _ => (126, 178),
        };
        let (icon, text) = match (index, selected) {
            (0, false) => (icons::PRINT, icons::text::PRINT),
            (0, true) => (icons::PRINT_SELECTED, icons::text::PRINT_SELECTED),
            (1, false) => (icons::PREPARE, icons::text::PREPARE),
            (1, true) => (icons::PREPARE_SELECTED, icons::text::PREPARE_SELECTED),
            (2, false) => (icons::CONTROL, icons::text::CONTROL),
            (2, true) => (icons::CONTROL_SELECTED, icons::text::CONTROL_SELECTED),
            (_, false) => (icons::LEVELING, icons::text::INFO),
            (_, true) => (icons::LEVELING_SELECTED, icons::text::INFO_SELECTED),
        };
        self.surface.draw_icon(icons::ICON, icon, x, y)?;
        if index == 3 && misc_page {
            self.surface
                .draw_text(MENU_TEXT, x + 34, y + 69, "Misc")?;
        } else {
            self.surface.draw_icon(library, text, x + 1, y + 69)?;
        }
        if selected {
            self.surface
                .draw_rect(Color::WHITE, Rect::new(x, y, x + 100, y + 114))?;
        }
        Ok(())
    }

    // --- print screen ---

    /// Static parts of the print screen
    pub fn draw_print_screen(
        &mut self,
        file_name: &str,
        selected: usize,
        paused: bool,
    ) -> Result<(), DisplayError> {
        self.draw_frame(icons::text::HEADER_PRINTING)?;
        let width = self.width();
        let name: String<28> = truncate(file_name);
        self.surface.draw_text_centered(MENU_TEXT, 40, &name)?;
        self.surface
            .draw_icon(icons::ICON, icons::PRINT_TIME, 117, 77)?;
        self.surface
            .draw_icon(icons::ICON, icons::REMAIN_TIME, 117, 138)?;
        self.surface.draw_line(Color::LINE, 15, 185, width - 15, 185)?;
        for index in 0..3 {
            self.draw_print_button(index, index == selected, paused)?;
        }
        Ok(())
    }

    /// Tune, Pause/Resume or Stop button
    pub fn draw_print_button(&mut self, index: usize, selected: bool, paused: bool) -> Result<(), DisplayError> {
        let library = self.text_library();
        let (x, x1) = match index {
            0 => (12, 78),
            1 => (86, 151),
            _ => (160, 225),
        };
        let (icon, text) = match (index, selected) {
            (0, false) => (icons::TUNE, icons::text::TUNE),
            (0, true) => (icons::TUNE_SELECTED, icons::text::TUNE_SELECTED),
            (1, false) if paused => (icons::CONTINUE, icons::text::PAUSE),
            (1, true) if paused => (icons::CONTINUE_SELECTED, icons::text::PAUSE_SELECTED),
            (1, false) => (icons::PAUSE, icons::text::PAUSE),
            (1, true) => (icons::PAUSE_SELECTED, icons::text::PAUSE_SELECTED),
            (_, false) => (icons::STOP, icons::text::STOP),
            (_, true) => (icons::STOP_SELECTED, icons::text::STOP_SELECTED),
        };
        self.surface.fill_rect(
            Color::BACKGROUND_BLACK,
            Rect::new(x, 191, x1, 251),
        )?;
        self.surface.draw_icon(icons::ICON, icon, x, 191)?;
        self.surface.draw_icon(library, text, x, 225)?;
        if selected {
            self.surface
                .draw_rect(Color::WHITE, Rect::new(x, 191, x1, 251))?;
        }
        Ok(())
    }

    /// Progress ring plus elapsed and remaining time
    pub fn draw_progress(&mut self, progress: &PrintProgress) -> Result<(), DisplayError> {
        let frame = icons::PROGRESS_0.saturating_add(progress.percent());
        self.surface.draw_icon(icons::GIF, frame, 12, 75)?;
        self.draw_hours_minutes(100, progress.elapsed_s)?;
        if progress.permille > 0 {
            self.draw_hours_minutes(166, progress.remaining_s())?;
        }
        Ok(())
    }

    fn draw_hours_minutes(&mut self, y: u16, seconds: u32) -> Result<(), DisplayError> {
        let hours = (seconds / 3600).min(99) as i32;
        let minutes = ((seconds % 3600) / 60) as i32;
        self.surface.draw_int(STATUS_TEXT, 2, 160, y, hours)?;
        self.surface.draw_text(STATUS_TEXT, 183, y, ":")?;
        self.surface.draw_int(STATUS_TEXT, 2, 190, y, minutes)
    }

    /// Print finished overlay: empty ring and an OK button over the
    /// print buttons
    pub fn draw_print_complete(&mut self) -> Result<(), DisplayError> {
        let width = self.width();
        let library = self.text_library();
        self.clear_title_bar()?;
        self.draw_title_icon(icons::text::HEADER_PRINT_FINISH)?;
        self.surface
            .draw_icon(icons::GIF, icons::PROGRESS_0, 12, 75)?;
        self.surface.fill_rect(
            Color::BACKGROUND_BLACK,
            Rect::new(0, 185, width - 1, STATUS_Y),
        )?;
        self.surface
            .draw_icon(library, icons::text::CONFIRM_BUTTON, 86, 203)?;
        self.surface
            .draw_rect(Color::WHITE, Rect::new(86, 203, 166, 203 + BUTTON_HEIGHT))
    }

    /// Pause or stop confirmation
    pub fn draw_pause_or_stop(&mut self, stop: bool, confirm: bool) -> Result<(), DisplayError> {
        self.clear_main_window()?;
        let library = self.text_library();
        let icon = if stop {
            icons::text::POPUP_STOP_PRINT
        } else {
            icons::text::POPUP_PAUSE_PRINT
        };
        self.surface
            .draw_icon(library, icon, 15, HEADER_HEIGHT + 50)?;
        self.surface.draw_rect(
            Color::WHITE,
            Rect::new(15, HEADER_HEIGHT + 50, 225, 195),
        )?;
        self.draw_confirm_cancel(confirm)
    }

    /// Confirm and cancel buttons, with the selected one outlined
    pub fn draw_confirm_cancel(&mut self, confirm: bool) -> Result<(), DisplayError> {
        let library = self.text_library();
        let (c1, c2) = if confirm {
            (Color::WHITE, Color::POPUP_BACKGROUND)
        } else {
            (Color::POPUP_BACKGROUND, Color::WHITE)
        };
        self.surface.fill_rect(c1, Rect::new(28, 152, 113, 187))?;
        self.surface.fill_rect(c2, Rect::new(128, 152, 213, 187))?;
        self.surface.draw_icon(
            library,
            icons::text::CONFIRM_BUTTON,
            30,
            HEADER_HEIGHT + 130,
        )?;
        self.surface.draw_icon(
            library,
            icons::text::CANCEL_BUTTON,
            130,
            HEADER_HEIGHT + 130,
        )
    }

    fn draw_ok_button(&mut self, y: u16) -> Result<(), DisplayError> {
        let library = self.text_library();
        self.surface
            .draw_icon(library, icons::text::CONFIRM_BUTTON, 80, y)?;
        self.surface
            .draw_rect(Color::WHITE, Rect::new(80, y, 160, y + BUTTON_HEIGHT))
    }

    // --- popups ---

    pub fn draw_homing_popup(&mut self) -> Result<(), DisplayError> {
        self.clear_main_window()?;
        let library = self.text_library();
        self.surface
            .draw_icon(library, icons::text::POPUP_HOMING, 18, HEADER_HEIGHT + 60)
    }

    /// Nozzle too cold to extrude
    pub fn draw_cold_extrusion_popup(&mut self) -> Result<(), DisplayError> {
        self.clear_main_window()?;
        let library = self.text_library();
        let area = Rect::new(15, HEADER_HEIGHT + 50, 225, 195);
        self.surface.fill_rect(Color::POPUP_BACKGROUND, area)?;
        self.surface.draw_icon(
            library,
            icons::text::NOZZLE_TEMP_TOO_LOW,
            15,
            HEADER_HEIGHT + 50,
        )?;
        self.surface.draw_rect(Color::WHITE, area)?;
        self.draw_ok_button(154)
    }

    pub fn draw_feature_not_available(&mut self) -> Result<(), DisplayError> {
        let area = Rect::new(15, HEADER_HEIGHT + 50, 225, 195);
        self.surface.fill_rect(Color::POPUP_BACKGROUND, area)?;
        self.surface.draw_rect(Color::WHITE, area)?;
        self.surface
            .draw_text(POPUP_TEXT, 20, HEADER_HEIGHT + 55, "Feature not available on")?;
        self.surface
            .draw_text(POPUP_TEXT, 20, HEADER_HEIGHT + 75, "the screen yet, please")?;
        self.surface.draw_text(
            POPUP_TEXT,
            20,
            HEADER_HEIGHT + 95,
            "use the host interface.",
        )?;
        self.draw_ok_button(154)
    }

    /// Word-wrapped message box with an OK button, centred in the
    /// area below the title bar
    pub fn draw_message_popup(&mut self, message: &str) -> Result<(), DisplayError> {
        let (width, height) = self.surface.size();
        let columns = (width.saturating_sub(PADDING * 4) / MENU_CHR_W) as usize;
        let lines = text::wrap(message, columns);

        let box_height =
            POPUP_LINE_HEIGHT * lines.len() as u16 + BUTTON_HEIGHT + PADDING * 3;
        let top = (height.saturating_sub(HEADER_HEIGHT) / 2 + HEADER_HEIGHT)
            .saturating_sub(box_height / 2);
        let area = Rect::new(PADDING, top, width - PADDING, top + box_height);
        self.surface.fill_rect(Color::POPUP_BACKGROUND, area)?;
        self.surface.draw_rect(Color::WHITE, area)?;

        let mut y = top + PADDING;
        for line in lines.iter() {
            self.surface.draw_text(POPUP_TEXT, PADDING * 2, y, line)?;
            y += POPUP_LINE_HEIGHT;
        }
        self.draw_ok_button(y + PADDING)
    }

    // --- status area ---

    /// Temperatures, speed, flow, fan and Z offset
    pub fn draw_status_area(&mut self, status: &PrinterStatus) -> Result<(), DisplayError> {
        self.clear_status_area()?;

        self.draw_heater(262, status.hotend.is_heating(), icons::NOZZLE_HEATING_0, icons::HOTEND_TEMP, status.hotend.current_c, status.hotend.target_c)?;
        self.draw_heater(294, status.bed.is_heating(), icons::BED_HEATING_0, icons::BED_TEMP, status.bed.current_c, status.bed.target_c)?;

        self.draw_percent(99, 262, icons::SPEED, status.feedrate_percent)?;
        self.draw_percent(99, 294, icons::FLOW, status.flow_percent)?;
        self.draw_percent(165, 262, icons::FAN_SPEED, status.fan_percent as i32)?;

        self.surface
            .draw_icon(icons::ICON, icons::Z_OFFSET, 165, 294)?;
        self.surface
            .draw_fixed(STATUS_TEXT, 1, 3, 191, 300, status.z_offset_um)
    }

    fn draw_heater(
        &mut self,
        y: u16,
        heating: bool,
        gif: u8,
        icon: u8,
        current: i16,
        target: i16,
    ) -> Result<(), DisplayError> {
        if heating {
            self.surface.draw_icon(icons::GIF, gif, 6, y)?;
        } else {
            self.surface.draw_icon(icons::ICON, icon, 6, y)?;
        }
        let current_style = if heating {
            TextStyle::new(Font::Font8x8, Color::YELLOW, Color::BACKGROUND_BLACK)
        } else {
            STATUS_TEXT
        };
        let text_y = y + 6;
        self.surface
            .draw_int(current_style, 3, 26, text_y, current as i32)?;
        self.surface
            .draw_text(STATUS_TEXT, 26 + 3 * STAT_CHR_W + 4, text_y, "/")?;
        self.surface
            .draw_int(STATUS_TEXT, 3, 26 + 3 * STAT_CHR_W + 5, text_y, target as i32)
    }

    fn draw_percent(&mut self, x: u16, y: u16, icon: u8, value: i32) -> Result<(), DisplayError> {
        self.surface.draw_icon(icons::ICON, icon, x, y)?;
        self.surface
            .draw_int(STATUS_TEXT, 3, x + 2 * STAT_CHR_W, y + 6, value)?;
        self.surface
            .draw_text(STATUS_TEXT, x + 5 * STAT_CHR_W + 2, y + 6, "%")
    }

    // --- other screens ---

    /// Machine size, firmware version and contact line
    pub fn draw_info(
        &mut self,
        limits: &MachineLimits,
        version: &str,
        website: &str,
    ) -> Result<(), DisplayError> {
        self.draw_frame(icons::text::HEADER_INFO)?;
        self.draw_back_first(true)?;

        let small = TextStyle::new(Font::Font6x12, Color::WHITE, Color::BACKGROUND_BLACK);
        let mut size: String<24> = String::new();
        let _ = write!(
            size,
            "{}x{}x{}",
            limits.x.max_mm, limits.y.max_mm, limits.z.max_mm
        );

        self.surface.draw_text(MENU_TEXT, LBLX, 80, "Bed size")?;
        self.surface
            .draw_icon(icons::ICON, icons::PRINT_SIZE, 20, 90)?;
        self.surface.draw_text(small, 70, 105, &size)?;

        self.surface.draw_text(MENU_TEXT, LBLX, 140, "Firmware")?;
        self.surface
            .draw_icon(icons::ICON, icons::VERSION, 20, 140)?;
        self.surface.draw_text(small, 70, 155, version)?;

        self.surface.draw_text(MENU_TEXT, LBLX, 190, "Contact")?;
        self.surface
            .draw_icon(icons::ICON, icons::CONTACT, 20, 200)?;
        self.surface.draw_text(MENU_TEXT, 50, 215, website)
    }

    /// Manual probe screen
    ///
    /// - `z_um`: live probe height
    /// - `step_index`: selected entry of [`PROBE_STEP_LABELS`]
    /// - `out_of_range`: the last move was refused
    /// - `full`: also draw the header and footer
    pub fn draw_probe(
        &mut self,
        z_um: i32,
        step_index: usize,
        out_of_range: bool,
        full: bool,
    ) -> Result<(), DisplayError> {
        let (width, height) = self.surface.size();
        let window_x = PADDING;
        let window_y = HEADER_HEIGHT + PADDING;
        let window_width = width - PADDING * 2;
        let line_height = MLINE - 10;

        if full {
            self.clear_screen()?;
            self.draw_title_icon(icons::text::HEADER_LEVELING)?;
            self.surface
                .draw_text(MENU_TEXT, window_x, window_y, "Step sizes:")?;
            self.surface.draw_text_centered(
                MENU_TEXT,
                height - line_height * 2,
                "Tap to toggle between steps",
            )?;
            self.surface
                .draw_text_centered(MENU_TEXT, height - line_height, "Long press to confirm")?;
        }

        let count = PROBE_STEP_LABELS.len() as u16;
        let margin = 5;
        let box_width = (window_width - (count - 1) * margin) / count;
        let box_y = window_y + mbase(0) - 10;
        let box_bottom = window_y + mbase(1) - 10;
        for (i, label) in PROBE_STEP_LABELS.iter().enumerate() {
            let selected = i == step_index;
            let box_x = window_x + i as u16 * (box_width + margin);
            let outline = if selected {
                Color::YELLOW
            } else {
                Color::POPUP_BACKGROUND
            };
            self.surface
                .draw_rect(outline, Rect::new(box_x, box_y, box_x + box_width, box_bottom))?;
            let color = if selected { Color::YELLOW } else { Color::WHITE };
            let style = TextStyle::new(Font::Font8x8, color, Color::BACKGROUND_BLACK);
            let text_x = box_x + box_width / 2 - label.len() as u16 * MENU_CHR_W / 2;
            self.surface
                .draw_text(style, text_x, (box_y + box_bottom) / 2 - 4, label)?;
        }

        let z_y = window_y + mbase(2) - 10;
        self.surface.fill_rect(
            Color::BACKGROUND_BLACK,
            Rect::new(window_x, z_y, window_x + window_width, window_y + mbase(3) - 10),
        )?;
        let z_color = if out_of_range {
            Color::BACKGROUND_RED
        } else {
            Color::YELLOW
        };
        let z_style = TextStyle::new(Font::Font12x24, z_color, Color::BACKGROUND_BLACK);
        self.surface.draw_fixed(
            z_style,
            3,
            2,
            window_width / 2 - 5 * STAT_CHR_W / 2,
            z_y,
            z_um / 10,
        )?;

        let err_y = window_y + mbase(3) - 10;
        self.surface.fill_rect(
            Color::BACKGROUND_BLACK,
            Rect::new(window_x, err_y, window_x + window_width, window_y + mbase(4) - 10),
        )?;
        if out_of_range {
            let style = TextStyle::new(Font::Font8x8, Color::BACKGROUND_RED, Color::BACKGROUND_BLACK);
            self.surface.draw_text_centered(style, err_y, "Out of range!")?;
        }
        Ok(())
    }

    /// Icon library browser page
    pub fn draw_icon_finder(&mut self, icon: u8) -> Result<(), DisplayError> {
        let (width, height) = self.surface.size();
        self.clear_screen()?;
        self.surface
            .draw_text_centered(MENU_TEXT, HEADER_HEIGHT / 2, "Icon finder")?;
        self.surface
            .draw_icon(icons::ICON, icon, width / 2 - 16, height / 2 - 16)?;

        let mut label: String<12> = String::new();
        let _ = write!(label, "Icon {}", icon);
        let style = TextStyle::new(Font::Font8x8, Color::YELLOW, Color::BACKGROUND_BLACK);
        self.surface
            .draw_text_centered(style, height - (MENU_CHR_W + 15) * 2, &label)?;
        self.surface
            .draw_text_centered(MENU_TEXT, height - MENU_CHR_W - 15, "Press to exit")
    }
}

/// Copy as much of `text` as fits
fn truncate<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmi::testing::{DrawCall, MockDisplay};
    use crate::traits::Heater;

    fn renderer() -> Renderer<MockDisplay> {
        Renderer::new(MockDisplay::new(), Language::English)
    }

    #[test]
    fn test_row_geometry() {
        assert_eq!(mbase(0), 45);
        assert_eq!(mbase(MROWS as u16), 240);
        assert!(mbase(MROWS as u16 + 1) - 22 < STATUS_Y);
    }

    #[test]
    fn test_scroll_down_draws_bottom_row() {
        let mut r = renderer();
        let mut drawn = None;
        r.apply_scroll(ScrollAction::ScrollDown { item: 7 }, |_, item, row| {
            drawn = Some((item, row));
            Ok(())
        })
        .unwrap();
        assert_eq!(drawn, Some((7, MROWS)));
        assert!(matches!(
            r.surface().calls[0],
            DrawCall::MoveArea {
                direction: ScrollDirection::Up,
                distance: MLINE,
                ..
            }
        ));
    }

    #[test]
    fn test_scroll_up_to_back_row() {
        let mut r = renderer();
        r.apply_scroll(ScrollAction::ScrollUp { item: 0 }, |_, _, _| {
            panic!("Back row is drawn by the renderer")
        })
        .unwrap();
        assert!(r
            .surface()
            .calls
            .iter()
            .any(|c| matches!(c, DrawCall::Icon { icon, .. } if *icon == icons::text::BACK)));
    }

    #[test]
    fn test_message_popup_layout() {
        let mut r = renderer();
        r.draw_message_popup("Error: Must home axis first").unwrap();
        let texts = r.surface().texts();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0], "Error: Must home axis");
        assert_eq!(texts[1], "first");
        // two lines: 2*18 + 31 + 45 = 112 high, centred under the title bar
        assert!(r.surface().calls.iter().any(|c| matches!(
            c,
            DrawCall::FillRect { area, .. } if *area == Rect::new(15, 116, 225, 228)
        )));
    }

    #[test]
    fn test_status_area_heating_icon() {
        let mut r = renderer();
        let status = PrinterStatus {
            hotend: Heater {
                current_c: 120,
                target_c: 200,
            },
            ..PrinterStatus::default()
        };
        r.draw_status_area(&status).unwrap();
        assert!(r.surface().calls.iter().any(|c| matches!(
            c,
            DrawCall::Icon { library, icon, .. }
                if *library == icons::GIF && *icon == icons::NOZZLE_HEATING_0
        )));
        assert!(r.surface().calls.iter().any(|c| matches!(
            c,
            DrawCall::Icon { library, icon, .. }
                if *library == icons::ICON && *icon == icons::BED_TEMP
        )));
    }
}
