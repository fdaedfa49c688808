//! Scrolling window over a list menu
//!
//! The panel shows `MROWS + 1` rows below the title bar. Row 0 of every list
//! is the fixed "Back" entry; once the list scrolls, the window maps logical
//! items `top - MROWS ..= top` onto the visible rows. Each cursor step costs
//! at most one new row of drawing.

use core::ops::RangeInclusive;

/// Visible list rows other than the first
pub const MROWS: usize = 5;

/// Total visible list rows
pub const TROWS: usize = MROWS + 1;

/// What the renderer must do after the cursor moved by one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollAction {
    /// Content shifted up one row; draw `item` on the bottom row
    ScrollDown { item: usize },
    /// Content shifted down one row; draw `item` on the top row
    /// (item 0 is the Back entry)
    ScrollUp { item: usize },
    /// No content change; move the highlight between rows
    Highlight { from_row: usize, to_row: usize },
}

/// Per-menu window state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollWindow {
    top: usize,
}

impl Default for ScrollWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollWindow {
    /// Window showing items `0..=MROWS`
    pub const fn new() -> Self {
        Self { top: MROWS }
    }

    /// Logical item mapped to the last visible row
    pub fn top(&self) -> usize {
        self.top
    }

    /// Return to the unscrolled position
    pub fn reset(&mut self) {
        self.top = MROWS;
    }

    /// Items currently on screen, clipped to a list of `count` items
    pub fn visible(&self, count: usize) -> RangeInclusive<usize> {
        let first = self.top - MROWS;
        let last = self.top.min(count.saturating_sub(1));
        first..=last
    }

    /// Screen row of a logical item inside the window
    pub fn row_of(&self, item: usize) -> usize {
        (item + MROWS).saturating_sub(self.top)
    }

    /// Shift the window just enough for `item` to be visible
    pub fn reveal(&mut self, item: usize) {
        if item > self.top {
            self.top = item;
        } else if item + MROWS < self.top {
            self.top = (item + MROWS).max(MROWS);
        }
    }

    /// Track a one-step cursor move from `previous` to `current`
    pub fn follow(&mut self, previous: usize, current: usize) -> ScrollAction {
        if current > previous && current > MROWS && current > self.top {
            self.top = current;
            return ScrollAction::ScrollDown { item: current };
        }
        if current < previous && current + MROWS < self.top {
            self.top -= 1;
            return ScrollAction::ScrollUp {
                item: self.top - MROWS,
            };
        }
        ScrollAction::Highlight {
            from_row: self.row_of(previous),
            to_row: self.row_of(current),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::cursor::SelectionCursor;
    use proptest::prelude::*;

    #[test]
    fn test_highlight_inside_window() {
        let mut window = ScrollWindow::new();
        assert_eq!(
            window.follow(2, 3),
            ScrollAction::Highlight {
                from_row: 2,
                to_row: 3
            }
        );
        assert_eq!(window.top(), MROWS);
    }

    #[test]
    fn test_scroll_down_past_last_row() {
        let mut window = ScrollWindow::new();
        assert_eq!(window.follow(5, 6), ScrollAction::ScrollDown { item: 6 });
        assert_eq!(window.top(), 6);
        assert_eq!(window.row_of(6), MROWS);
        assert_eq!(window.visible(10), 1..=6);
    }

    #[test]
    fn test_scroll_up_back_to_back_row() {
        let mut window = ScrollWindow::new();
        window.follow(5, 6);
        for p in (2..=6).rev() {
            assert!(matches!(
                window.follow(p, p - 1),
                ScrollAction::Highlight { .. }
            ));
        }
        assert_eq!(window.follow(1, 0), ScrollAction::ScrollUp { item: 0 });
        assert_eq!(window.top(), MROWS);
    }

    #[test]
    fn test_reveal_restored_cursor() {
        let mut window = ScrollWindow::new();
        window.reveal(8);
        assert_eq!(window.top(), 8);
        assert_eq!(window.row_of(8), MROWS);
        window.reveal(1);
        assert_eq!(window.top(), 6);
        window.reveal(0);
        assert_eq!(window.top(), MROWS);
    }

    #[test]
    fn test_visible_short_list() {
        let window = ScrollWindow::new();
        assert_eq!(window.visible(3), 0..=2);
    }

    proptest! {
        #[test]
        fn prop_cursor_stays_inside_window(count in 1usize..30, ops in proptest::collection::vec(any::<bool>(), 0..300)) {
            let mut cursor = SelectionCursor::new();
            let mut window = ScrollWindow::new();
            for down in ops {
                let previous = cursor.now();
                let moved = if down { cursor.inc(count) } else { cursor.dec() };
                if moved {
                    window.follow(previous, cursor.now());
                }
                let p = cursor.now();
                prop_assert!(window.top() >= MROWS);
                prop_assert!(window.top() - MROWS <= p);
                prop_assert!(p <= window.top());
                prop_assert!(window.row_of(p) <= MROWS);
            }
        }
    }
}
