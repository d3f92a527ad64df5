//! Display-width aware cell formatting shared by the report and the CLI tables.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cuts `s` to at most `max_width` display columns, ending with `…` when
/// anything was dropped.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

/// Truncates like [`truncate_to_width`], then pads with spaces to exactly
/// `width` columns.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let cut = truncate_to_width(s, width);
    let padding = width.saturating_sub(cut.width());
    format!("{}{}", cut, " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_only_when_needed() {
        assert_eq!(truncate_to_width("MacBook", 7), "MacBook");
        assert_eq!(truncate_to_width("MacBook Pro", 7), "MacBoo…");
        assert_eq!(truncate_to_width("", 3), "");
    }

    #[test]
    fn wide_characters_count_double() {
        let cut = truncate_to_width("日本語テキスト", 6);
        assert!(cut.width() <= 6);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn pads_to_exact_width() {
        assert_eq!(pad_to_width("iPad", 6), "iPad  ");
        assert_eq!(pad_to_width("AirPods Max", 6).width(), 6);
        assert_eq!(pad_to_width("日本語テキスト", 7).width(), 7);
    }
}
