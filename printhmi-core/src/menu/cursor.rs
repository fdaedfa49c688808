//! Bounded selection cursor
//!
//! Every list-style menu owns one. The upper bound is supplied on each
//! increment because some lists (files, macros) change length at runtime.

/// Cursor over a menu's items with edge-triggered change detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelectionCursor {
    now: usize,
    last: usize,
}

impl SelectionCursor {
    /// Create a cursor at index 0
    pub const fn new() -> Self {
        Self { now: 0, last: 0 }
    }

    /// Current index
    pub fn now(&self) -> usize {
        self.now
    }

    /// Force the cursor to `value` without reporting a change
    pub fn set(&mut self, value: usize) {
        self.now = value;
        self.last = value;
    }

    /// Equivalent to `set(0)`
    pub fn reset(&mut self) {
        self.set(0);
    }

    /// Returns true once per distinct movement since the previous check
    pub fn changed(&mut self) -> bool {
        if self.now == self.last {
            return false;
        }
        self.last = self.now;
        true
    }

    /// Step back one item
    pub fn dec(&mut self) -> bool {
        if self.now > 0 {
            self.now -= 1;
        }
        self.changed()
    }

    /// Step forward one item, clamping to `bound - 1`
    ///
    /// A zero bound leaves the cursor at 0.
    pub fn inc(&mut self, bound: usize) -> bool {
        let max = bound.saturating_sub(1);
        if self.now < max {
            self.now += 1;
        } else {
            self.now = max;
        }
        self.changed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_set_suppresses_change() {
        let mut cursor = SelectionCursor::new();
        cursor.set(3);
        assert_eq!(cursor.now(), 3);
        assert!(!cursor.changed());
    }

    #[test]
    fn test_changed_is_edge_triggered() {
        let mut cursor = SelectionCursor::new();
        cursor.now = 2;
        assert!(cursor.changed());
        assert!(!cursor.changed());
        assert!(!cursor.changed());
    }

    #[test]
    fn test_inc_at_limit_is_absorbed() {
        let mut cursor = SelectionCursor::new();
        assert!(cursor.inc(2));
        assert_eq!(cursor.now(), 1);
        assert!(!cursor.inc(2));
        assert_eq!(cursor.now(), 1);
    }

    #[test]
    fn test_dec_at_zero_is_absorbed() {
        let mut cursor = SelectionCursor::new();
        assert!(!cursor.dec());
        assert_eq!(cursor.now(), 0);
    }

    #[test]
    fn test_inc_clamps_after_bound_shrinks() {
        let mut cursor = SelectionCursor::new();
        cursor.set(7);
        // List shrank to three entries
        assert!(cursor.inc(3));
        assert_eq!(cursor.now(), 2);
    }

    #[test]
    fn test_zero_bound() {
        let mut cursor = SelectionCursor::new();
        assert!(!cursor.inc(0));
        assert_eq!(cursor.now(), 0);
    }

    proptest! {
        #[test]
        fn prop_cursor_stays_in_bounds(bound in 1usize..40, ops in proptest::collection::vec(any::<bool>(), 0..200)) {
            let mut cursor = SelectionCursor::new();
            for up in ops {
                let before = cursor.now();
                let reported = if up { cursor.inc(bound) } else { cursor.dec() };
                prop_assert!(cursor.now() < bound);
                prop_assert_eq!(reported, before != cursor.now());
                prop_assert!(!cursor.changed());
            }
        }
    }
}
