//! Display surface trait for the serial icon LCD
//!
//! The panel draws from its own icon libraries and fonts; the core only
//! decides which primitive to call and where. Implementations own the
//! serial transport and report its failures as [`DisplayError::Transport`].

use core::fmt;

/// Errors that can occur while drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Serial link failed or timed out
    Transport,
    /// Coordinates outside the panel
    InvalidCoordinates,
    /// Panel not initialized
    NotInitialized,
    /// Command did not fit the transmit buffer
    BufferOverflow,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Transport => f.write_str("display transport failed"),
            DisplayError::InvalidCoordinates => f.write_str("coordinates out of range"),
            DisplayError::NotInitialized => f.write_str("display not initialized"),
            DisplayError::BufferOverflow => f.write_str("display buffer overflow"),
        }
    }
}

/// RGB565 color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(pub u16);

impl Color {
    pub const WHITE: Color = Color(0xFFFF);
    pub const YELLOW: Color = Color(0xFF0F);
    pub const POPUP_BACKGROUND: Color = Color(0x31E8);
    pub const BACKGROUND_GREY: Color = Color(0x1145);
    pub const BACKGROUND_BLACK: Color = Color(0x0841);
    pub const BACKGROUND_RED: Color = Color(0xF00F);
    pub const POPUP_TEXT: Color = Color(0xD6BA);
    pub const LINE: Color = Color(0x3A6A);
    /// Menu cursor block
    pub const CURSOR: Color = Color(0xEE2F);
    pub const PERCENT: Color = Color(0xFE29);
    pub const SELECTED: Color = Color(0x33BB);
}

/// Built-in panel fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    Font6x12,
    Font8x8,
    Font12x24,
    Font16x32,
}

impl Font {
    /// Glyph width in pixels
    pub fn width(&self) -> u16 {
        match self {
            Font::Font6x12 => 6,
            Font::Font8x8 => 8,
            Font::Font12x24 => 12,
            Font::Font16x32 => 16,
        }
    }
}

/// Font and colors for text and numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextStyle {
    pub font: Font,
    pub color: Color,
    pub background: Color,
}

impl TextStyle {
    pub const fn new(font: Font, color: Color, background: Color) -> Self {
        Self {
            font,
            color,
            background,
        }
    }
}

/// Inclusive pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl Rect {
    pub const fn new(x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

/// Direction of a block move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollDirection {
    /// Content moves up, exposing a row at the bottom
    Up,
    /// Content moves down, exposing a row at the top
    Down,
}

/// Trait for the LCD
pub trait DisplaySurface {
    /// Panel size in pixels (width, height)
    fn size(&self) -> (u16, u16);

    /// Fill a rectangle (also used to clear regions)
    fn fill_rect(&mut self, color: Color, area: Rect) -> Result<(), DisplayError>;

    /// Draw a rectangle outline
    fn draw_rect(&mut self, color: Color, area: Rect) -> Result<(), DisplayError>;

    /// Draw a straight line
    fn draw_line(&mut self, color: Color, x0: u16, y0: u16, x1: u16, y1: u16)
        -> Result<(), DisplayError>;

    /// Draw icon `icon` from library `library` with its top-left at (x, y)
    fn draw_icon(&mut self, library: u8, icon: u8, x: u16, y: u16) -> Result<(), DisplayError>;

    /// Draw a string
    fn draw_text(&mut self, style: TextStyle, x: u16, y: u16, text: &str)
        -> Result<(), DisplayError>;

    /// Draw an integer right-aligned in `digits` columns
    fn draw_int(
        &mut self,
        style: TextStyle,
        digits: u8,
        x: u16,
        y: u16,
        value: i32,
    ) -> Result<(), DisplayError>;

    /// Draw a fixed-point number; `value` is scaled by 10^`frac_digits`
    fn draw_fixed(
        &mut self,
        style: TextStyle,
        int_digits: u8,
        frac_digits: u8,
        x: u16,
        y: u16,
        value: i32,
    ) -> Result<(), DisplayError>;

    /// Set backlight level (0-64)
    fn set_backlight(&mut self, level: u8) -> Result<(), DisplayError>;

    /// Block-copy `area` by `distance` pixels, filling the exposed strip
    fn move_area(
        &mut self,
        direction: ScrollDirection,
        distance: u16,
        background: Color,
        area: Rect,
    ) -> Result<(), DisplayError>;
}

/// Helpers for common regions
pub trait DisplayExt: DisplaySurface {
    /// Fill a full-width horizontal band
    fn fill_band(&mut self, color: Color, y0: u16, y1: u16) -> Result<(), DisplayError> {
        let (width, _) = self.size();
        self.fill_rect(color, Rect::new(0, y0, width, y1))
    }

    /// Draw text horizontally centered
    fn draw_text_centered(&mut self, style: TextStyle, y: u16, text: &str) -> Result<(), DisplayError> {
        let (width, _) = self.size();
        let text_width = (text.len() as u16).saturating_mul(style.font.width());
        let x = width.saturating_sub(text_width) / 2;
        self.draw_text(style, x, y, text)
    }
}

// Blanket implementation for all DisplaySurface types
impl<T: DisplaySurface> DisplayExt for T {}
