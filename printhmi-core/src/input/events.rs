//! Key events and menu input symbols

/// Key events delivered by the encoder layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyEvent {
    /// Short press
    Click,
    /// Press held past the long press threshold
    LongClick,
    /// Counter-clockwise detent
    Up,
    /// Clockwise detent
    Down,
    /// Counter-clockwise detent arriving faster than the fast rate
    FastUp,
    /// Clockwise detent arriving faster than the fast rate
    FastDown,
}

impl KeyEvent {
    /// Parse a key by its callback name (`"click"`, `"fast_down"`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "click" => Some(KeyEvent::Click),
            "long_click" => Some(KeyEvent::LongClick),
            "up" => Some(KeyEvent::Up),
            "down" => Some(KeyEvent::Down),
            "fast_up" => Some(KeyEvent::FastUp),
            "fast_down" => Some(KeyEvent::FastDown),
            _ => None,
        }
    }

    /// Callback name of this key
    pub fn name(self) -> &'static str {
        match self {
            KeyEvent::Click => "click",
            KeyEvent::LongClick => "long_click",
            KeyEvent::Up => "up",
            KeyEvent::Down => "down",
            KeyEvent::FastUp => "fast_up",
            KeyEvent::FastDown => "fast_down",
        }
    }
}

/// Menu input symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputSymbol {
    #[default]
    None,
    Cw,
    FastCw,
    Ccw,
    FastCcw,
    Enter,
    LongEnter,
}

impl From<KeyEvent> for InputSymbol {
    fn from(key: KeyEvent) -> Self {
        match key {
            KeyEvent::Click => InputSymbol::Enter,
            KeyEvent::LongClick => InputSymbol::LongEnter,
            KeyEvent::Up => InputSymbol::Ccw,
            KeyEvent::Down => InputSymbol::Cw,
            KeyEvent::FastUp => InputSymbol::FastCcw,
            KeyEvent::FastDown => InputSymbol::FastCw,
        }
    }
}

impl InputSymbol {
    /// Returns true for either clockwise variant
    pub fn is_cw(self) -> bool {
        matches!(self, InputSymbol::Cw | InputSymbol::FastCw)
    }

    /// Returns true for either counter-clockwise variant
    pub fn is_ccw(self) -> bool {
        matches!(self, InputSymbol::Ccw | InputSymbol::FastCcw)
    }

    /// Signed edit step: ±1, or ±10 for fast rotation
    pub fn step(self) -> i32 {
        match self {
            InputSymbol::Cw => 1,
            InputSymbol::FastCw => 10,
            InputSymbol::Ccw => -1,
            InputSymbol::FastCcw => -10,
            _ => 0,
        }
    }

    /// Fast rotation collapsed to a single step
    pub fn throttled(self) -> Self {
        match self {
            InputSymbol::FastCw => InputSymbol::Cw,
            InputSymbol::FastCcw => InputSymbol::Ccw,
            other => other,
        }
    }
}

/// One-slot buffer between the encoder and the menu handlers
///
/// A new symbol replaces any that was not consumed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputLatch {
    pending: InputSymbol,
}

impl InputLatch {
    pub const fn new() -> Self {
        Self {
            pending: InputSymbol::None,
        }
    }

    /// Store a symbol, overwriting the previous one
    pub fn latch(&mut self, symbol: InputSymbol) {
        self.pending = symbol;
    }

    /// Take the pending symbol and leave the latch empty
    pub fn take(&mut self) -> InputSymbol {
        core::mem::take(&mut self.pending)
    }

    /// Peek without consuming
    pub fn pending(&self) -> InputSymbol {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names_roundtrip() {
        let keys = [
            KeyEvent::Click,
            KeyEvent::LongClick,
            KeyEvent::Up,
            KeyEvent::Down,
            KeyEvent::FastUp,
            KeyEvent::FastDown,
        ];
        for key in keys {
            assert_eq!(KeyEvent::from_name(key.name()), Some(key));
        }
        assert_eq!(KeyEvent::from_name("double_click"), None);
    }

    #[test]
    fn test_down_is_clockwise() {
        assert_eq!(InputSymbol::from(KeyEvent::Down), InputSymbol::Cw);
        assert_eq!(InputSymbol::from(KeyEvent::FastUp), InputSymbol::FastCcw);
        assert_eq!(InputSymbol::from(KeyEvent::LongClick), InputSymbol::LongEnter);
    }

    #[test]
    fn test_steps() {
        assert_eq!(InputSymbol::FastCw.step(), 10);
        assert_eq!(InputSymbol::Ccw.step(), -1);
        assert_eq!(InputSymbol::Enter.step(), 0);
        assert_eq!(InputSymbol::FastCcw.throttled(), InputSymbol::Ccw);
        assert_eq!(InputSymbol::Enter.throttled(), InputSymbol::Enter);
    }

    #[test]
    fn test_latch_last_write_wins() {
        let mut latch = InputLatch::new();
        latch.latch(InputSymbol::Cw);
        latch.latch(InputSymbol::Enter);
        assert_eq!(latch.take(), InputSymbol::Enter);
        assert_eq!(latch.take(), InputSymbol::None);
    }
}
