use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
///
/// Unicode-aware: CJK and emoji count as 2 columns, combining marks as 0.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Truncate a string to fit within `max_width` terminal columns, appending
/// "..." when text was cut off.
///
/// Returns `Cow::Borrowed` when the string already fits. For widths of 3 or
/// fewer columns there is no room for a character plus the ellipsis, so the
/// result is as many characters as fit with no ellipsis.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let budget = if max_width <= ELLIPSIS_WIDTH {
        max_width
    } else {
        max_width - ELLIPSIS_WIDTH
    };

    let mut width = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + char_width > budget {
            break;
        }
        width += char_width;
        end = idx + c.len_utf8();
    }

    if max_width <= ELLIPSIS_WIDTH {
        Cow::Owned(s[..end].to_string())
    } else {
        Cow::Owned(format!("{}{}", &s[..end], ELLIPSIS))
    }
}

/// Strip terminal control characters and ANSI escape sequences from text.
///
/// The page document is generated from third-party feed content; titles and
/// source names must not be able to move the cursor or restyle the terminal
/// when rendered. Tab, newline, and carriage return survive; everything else
/// below 0x20, DEL, and ESC-introduced sequences are removed.
///
/// Returns `Cow::Borrowed` when the input is already clean (the common case).
pub fn sanitize_text(s: &str) -> Cow<'_, str> {
    fn is_hostile(c: char) -> bool {
        c == '\u{7f}' || (c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
    }

    if !s.chars().any(is_hostile) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            // CSI sequence: consume through its final byte (0x40-0x7e).
            if chars.peek() == Some(&'[') {
                chars.next();
                for c in chars.by_ref() {
                    if ('\u{40}'..='\u{7e}').contains(&c) {
                        break;
                    }
                }
            }
            // OSC sequence: consume until BEL.
            else if chars.peek() == Some(&']') {
                chars.next();
                for c in chars.by_ref() {
                    if c == '\u{07}' {
                        break;
                    }
                }
            }
            // Bare ESC is dropped.
        } else if !is_hostile(c) {
            out.push(c);
        }
    }

    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width_ascii() {
        assert_eq!(display_width("Hello"), 5);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn test_display_width_cjk() {
        assert_eq!(display_width("你好"), 4);
    }

    #[test]
    fn test_truncate_fits_is_borrowed() {
        let result = truncate_to_width("Short", 10);
        assert_eq!(result, "Short");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_truncate_appends_ellipsis() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
    }

    #[test]
    fn test_truncate_cjk_boundary() {
        // 7 columns: two CJK chars (4) + ellipsis (3); a third would overflow.
        assert_eq!(truncate_to_width("你好世界", 7), "你好...");
    }

    #[test]
    fn test_truncate_narrow_widths() {
        assert_eq!(truncate_to_width("Test!", 0), "");
        assert_eq!(truncate_to_width("Test!", 1), "T");
        assert_eq!(truncate_to_width("Test!", 3), "Tes");
    }

    #[test]
    fn test_sanitize_clean_is_borrowed() {
        let result = sanitize_text("Carbon markets rally");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_sanitize_strips_csi() {
        assert_eq!(sanitize_text("a\u{1b}[31mred\u{1b}[0mb"), "aredb");
    }

    #[test]
    fn test_sanitize_strips_osc() {
        assert_eq!(sanitize_text("x\u{1b}]0;title\u{07}y"), "xy");
    }

    #[test]
    fn test_sanitize_strips_bare_controls() {
        assert_eq!(sanitize_text("a\u{08}b\u{7f}c"), "abc");
    }

    #[test]
    fn test_sanitize_preserves_whitespace() {
        assert_eq!(sanitize_text("a\tb\nc"), "a\tb\nc");
    }
}
