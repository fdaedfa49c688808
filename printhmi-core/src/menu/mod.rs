//! List menu navigation
//!
//! Each list menu owns a [`MenuList`]: a selection cursor plus the scroll
//! window that maps it to screen rows. [`MenuLists`] groups one per menu so
//! a parent keeps its remembered position while a child is open.

pub mod cursor;
pub mod files;
pub mod items;
pub mod scroll;

pub use cursor::SelectionCursor;
pub use files::{Entry, EntryKind, FileBrowser, Selected};
pub use items::{
    position_of, AxisItem, ControlItem, ItemValue, ItemValues, Items, MenuItem, MotionItem,
    PreheatItem, PrepareItem, TempItem, TuneItem, MAX_ITEMS, NO_VALUES,
};
pub use scroll::{ScrollAction, ScrollWindow, MROWS, TROWS};

/// Cursor and window of one list menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuList {
    pub cursor: SelectionCursor,
    pub window: ScrollWindow,
}

impl MenuList {
    pub const fn new() -> Self {
        Self {
            cursor: SelectionCursor::new(),
            window: ScrollWindow::new(),
        }
    }

    /// Back to item 0, unscrolled
    pub fn reset(&mut self) {
        self.cursor.reset();
        self.window.reset();
    }

    /// Place the cursor on `item` and scroll it into view
    pub fn select(&mut self, item: usize) {
        self.cursor.set(item);
        self.window.reveal(item);
    }

    pub fn now(&self) -> usize {
        self.cursor.now()
    }

    /// Screen row of the selected item
    pub fn row(&self) -> usize {
        self.window.row_of(self.cursor.now())
    }

    /// Apply one navigation step
    ///
    /// Returns the scroll action when the cursor moved.
    pub fn step(&mut self, forward: bool, count: usize) -> Option<ScrollAction> {
        let previous = self.cursor.now();
        let moved = if forward {
            self.cursor.inc(count)
        } else {
            self.cursor.dec()
        };
        if !moved {
            return None;
        }
        Some(self.window.follow(previous, self.cursor.now()))
    }
}

/// Per-menu cursors owned by the HMI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuLists {
    /// Main menu page (Print, Prepare, Control, Misc/Info)
    pub page: SelectionCursor,
    /// Print screen buttons (Tune, Pause, Stop)
    pub print: SelectionCursor,
    /// Confirmation popup: 0 = confirm, 1 = cancel
    pub confirm: SelectionCursor,
    /// Icon finder index
    pub icon_finder: SelectionCursor,
    pub file: MenuList,
    pub prepare: MenuList,
    pub control: MenuList,
    pub misc: MenuList,
    pub axis: MenuList,
    pub temperature: MenuList,
    pub motion: MenuList,
    pub tune: MenuList,
    pub pla: MenuList,
    pub tpu: MenuList,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_reports_scroll() {
        let mut list = MenuList::new();
        for _ in 0..MROWS {
            assert!(matches!(
                list.step(true, 8),
                Some(ScrollAction::Highlight { .. })
            ));
        }
        assert_eq!(list.step(true, 8), Some(ScrollAction::ScrollDown { item: 6 }));
        assert_eq!(list.row(), MROWS);
    }

    #[test]
    fn test_step_at_limit_is_none() {
        let mut list = MenuList::new();
        assert_eq!(list.step(false, 4), None);
        list.select(3);
        assert_eq!(list.step(true, 4), None);
    }

    #[test]
    fn test_select_restores_visible_row() {
        let mut list = MenuList::new();
        list.select(7);
        assert_eq!(list.now(), 7);
        assert_eq!(list.row(), MROWS);
        list.reset();
        assert_eq!(list.now(), 0);
        assert_eq!(list.window.top(), MROWS);
    }
}
