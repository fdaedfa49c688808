//! Encoder event translator
//!
//! Decodes quadrature edges into detents, marks detents that follow the
//! previous same-direction detent within the fast rate, and times the push
//! button to tell clicks from long clicks. All timestamps are milliseconds
//! from an arbitrary monotonic origin.

use super::events::KeyEvent;
use crate::config::EncoderConfig;

// Index: (prev << 2) | curr over the AB levels, +1 clockwise, -1 counter-clockwise
const QUADRATURE_TRANSITIONS: [i8; 16] = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];

/// Detent direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    Cw,
    Ccw,
}

/// Converts raw encoder activity into key events
#[derive(Debug, Clone)]
pub struct EncoderTranslator {
    fast_rate_ms: u32,
    long_press_ms: u32,
    steps_per_detent: u8,
    prev_ab: u8,
    transition_accum: i8,
    last_cw_ms: Option<u64>,
    last_ccw_ms: Option<u64>,
    pressed_at_ms: Option<u64>,
    long_press_sent: bool,
}

impl EncoderTranslator {
    /// Create a translator from encoder configuration
    pub fn new(config: &EncoderConfig) -> Self {
        Self {
            fast_rate_ms: config.fast_rate_ms,
            long_press_ms: config.long_press_ms,
            steps_per_detent: config.steps_per_detent.max(1),
            prev_ab: 0,
            transition_accum: 0,
            last_cw_ms: None,
            last_ccw_ms: None,
            pressed_at_ms: None,
            long_press_sent: false,
        }
    }

    /// Feed sampled A/B levels
    ///
    /// Returns a key once a full detent has accumulated.
    pub fn on_quadrature(&mut self, a: bool, b: bool, now_ms: u64) -> Option<KeyEvent> {
        let curr_ab = ((a as u8) << 1) | b as u8;
        if curr_ab == self.prev_ab {
            return None;
        }
        let index = ((self.prev_ab << 2) | curr_ab) as usize;
        self.prev_ab = curr_ab;

        let delta = QUADRATURE_TRANSITIONS[index];
        if delta == 0 {
            // Skipped state, direction unknown
            self.transition_accum = 0;
            return None;
        }

        self.transition_accum = self.transition_accum.saturating_add(delta);
        let steps = self.steps_per_detent as i8;
        if self.transition_accum >= steps {
            self.transition_accum = 0;
            Some(self.on_rotation(Rotation::Cw, now_ms))
        } else if self.transition_accum <= -steps {
            self.transition_accum = 0;
            Some(self.on_rotation(Rotation::Ccw, now_ms))
        } else {
            None
        }
    }

    /// Translate one detent
    pub fn on_rotation(&mut self, rotation: Rotation, now_ms: u64) -> KeyEvent {
        let last = match rotation {
            Rotation::Cw => &mut self.last_cw_ms,
            Rotation::Ccw => &mut self.last_ccw_ms,
        };
        let fast = match *last {
            Some(prev) => now_ms.saturating_sub(prev) < self.fast_rate_ms as u64,
            None => false,
        };
        *last = Some(now_ms);

        match (rotation, fast) {
            (Rotation::Cw, false) => KeyEvent::Down,
            (Rotation::Cw, true) => KeyEvent::FastDown,
            (Rotation::Ccw, false) => KeyEvent::Up,
            (Rotation::Ccw, true) => KeyEvent::FastUp,
        }
    }

    /// Button edge
    ///
    /// A release before the long press deadline is a click. The release that
    /// ends a long press produces nothing.
    pub fn on_button(&mut self, pressed: bool, now_ms: u64) -> Option<KeyEvent> {
        if pressed {
            self.pressed_at_ms = Some(now_ms);
            self.long_press_sent = false;
            return None;
        }

        let was_pressed = self.pressed_at_ms.take().is_some();
        if was_pressed && !self.long_press_sent {
            Some(KeyEvent::Click)
        } else {
            None
        }
    }

    /// Long press timer
    ///
    /// Call periodically while the button may be held.
    pub fn poll(&mut self, now_ms: u64) -> Option<KeyEvent> {
        let pressed_at = self.pressed_at_ms?;
        if self.long_press_sent {
            return None;
        }
        if now_ms.saturating_sub(pressed_at) >= self.long_press_ms as u64 {
            self.long_press_sent = true;
            return Some(KeyEvent::LongClick);
        }
        None
    }

    /// Returns true while the button is held
    pub fn is_pressed(&self) -> bool {
        self.pressed_at_ms.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> EncoderTranslator {
        EncoderTranslator::new(&EncoderConfig::default())
    }

    #[test]
    fn test_slow_rotation() {
        let mut enc = translator();
        assert_eq!(enc.on_rotation(Rotation::Cw, 1000), KeyEvent::Down);
        assert_eq!(enc.on_rotation(Rotation::Cw, 1100), KeyEvent::Down);
        assert_eq!(enc.on_rotation(Rotation::Ccw, 1200), KeyEvent::Up);
    }

    #[test]
    fn test_fast_rotation_same_direction_only() {
        let mut enc = translator();
        assert_eq!(enc.on_rotation(Rotation::Cw, 1000), KeyEvent::Down);
        assert_eq!(enc.on_rotation(Rotation::Cw, 1010), KeyEvent::FastDown);
        // Opposite direction has its own timestamp
        assert_eq!(enc.on_rotation(Rotation::Ccw, 1015), KeyEvent::Up);
        assert_eq!(enc.on_rotation(Rotation::Ccw, 1020), KeyEvent::FastUp);
        // Exactly at the threshold is not fast
        assert_eq!(enc.on_rotation(Rotation::Cw, 1040), KeyEvent::Down);
    }

    #[test]
    fn test_short_click() {
        let mut enc = translator();
        assert_eq!(enc.on_button(true, 0), None);
        assert_eq!(enc.poll(500), None);
        assert_eq!(enc.on_button(false, 600), Some(KeyEvent::Click));
        assert!(!enc.is_pressed());
    }

    #[test]
    fn test_long_click_fires_once() {
        let mut enc = translator();
        enc.on_button(true, 0);
        assert_eq!(enc.poll(799), None);
        assert_eq!(enc.poll(800), Some(KeyEvent::LongClick));
        assert_eq!(enc.poll(900), None);
        assert_eq!(enc.on_button(false, 1000), None);
    }

    #[test]
    fn test_release_without_press() {
        let mut enc = translator();
        assert_eq!(enc.on_button(false, 10), None);
        assert_eq!(enc.poll(10_000), None);
    }

    #[test]
    fn test_quadrature_full_detent() {
        let mut enc = translator();
        // Clockwise Gray sequence 00 -> 10 -> 11 -> 01 -> 00
        assert_eq!(enc.on_quadrature(true, false, 0), None);
        assert_eq!(enc.on_quadrature(true, true, 1), None);
        assert_eq!(enc.on_quadrature(false, true, 2), None);
        assert_eq!(enc.on_quadrature(false, false, 3), Some(KeyEvent::Down));

        // Counter-clockwise keeps its own fast timestamp
        assert_eq!(enc.on_quadrature(false, true, 10), None);
        assert_eq!(enc.on_quadrature(true, true, 11), None);
        assert_eq!(enc.on_quadrature(true, false, 12), None);
        assert_eq!(enc.on_quadrature(false, false, 13), Some(KeyEvent::Up));
    }

    #[test]
    fn test_quadrature_half_detent_encoder() {
        let config = EncoderConfig::new("PA1, PA2", 2, 30).unwrap();
        let mut enc = EncoderTranslator::new(&config);
        assert_eq!(enc.on_quadrature(true, false, 0), None);
        assert_eq!(enc.on_quadrature(true, true, 1), Some(KeyEvent::Down));
    }
}
