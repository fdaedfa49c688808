//! Text layout helpers for popups

use heapless::{String, Vec};

/// Longest wrapped line kept
pub const LINE_CAP: usize = 40;

/// Most lines a popup shows
pub const MAX_LINES: usize = 8;

/// Wrapped popup text
pub type Lines = Vec<String<LINE_CAP>, MAX_LINES>;

/// Greedy word wrap to `width` characters
///
/// Words longer than a line are split. Text beyond [`MAX_LINES`] lines is
/// dropped.
pub fn wrap(text: &str, width: usize) -> Lines {
    let width = width.clamp(1, LINE_CAP);
    let mut lines = Lines::new();
    let mut line: String<LINE_CAP> = String::new();
    let mut len = 0;

    for mut word in text.split_whitespace() {
        loop {
            let word_len = word.chars().count();
            let needed = if len == 0 { word_len } else { len + 1 + word_len };
            if needed <= width {
                if len > 0 {
                    let _ = line.push(' ');
                }
                let _ = line.push_str(word);
                len = needed;
                break;
            }
            if len > 0 {
                if lines.push(core::mem::take(&mut line)).is_err() {
                    return lines;
                }
                len = 0;
                continue;
            }
            let split = word
                .char_indices()
                .nth(width)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            let _ = line.push_str(&word[..split]);
            if lines.push(core::mem::take(&mut line)).is_err() {
                return lines;
            }
            word = &word[split..];
            if word.is_empty() {
                break;
            }
        }
    }

    if len > 0 {
        let _ = lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrap_on_word_boundaries() {
        let lines = wrap("Error: heater extruder not heating at expected rate", 22);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Error: heater extruder");
        assert_eq!(lines[1], "not heating at");
        assert_eq!(lines[2], "expected rate");
    }

    #[test]
    fn test_long_word_is_split() {
        let lines = wrap("abcdefghij", 4);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "abcd");
        assert_eq!(lines[1], "efgh");
        assert_eq!(lines[2], "ij");
    }

    #[test]
    fn test_blank_text_has_no_lines() {
        assert!(wrap("   ", 22).is_empty());
        assert!(wrap("", 22).is_empty());
    }

    #[test]
    fn test_excess_lines_dropped() {
        let lines = wrap("a b c d e f g h i j k l", 1);
        assert_eq!(lines.len(), MAX_LINES);
        assert_eq!(lines[MAX_LINES - 1], "h");
    }

    proptest! {
        #[test]
        fn prop_wrap_never_exceeds_width(text in "[a-z ]{0,120}", width in 1usize..=30) {
            for line in wrap(&text, width).iter() {
                prop_assert!(line.chars().count() <= width);
                prop_assert!(!line.is_empty());
            }
        }
    }
}
