use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }

    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }

    if max <= 3 {
        return s.chars().take(max).collect();
    }

    let truncated: String = s.chars().take(max - 3).collect();
    format!("{}...", truncated)
}

/// Clip `s` to at most `width` terminal columns, marking the cut with `…`.
pub fn fit_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// The tail of `s` that fits in `width` columns, used to keep the cursor end
/// of a long input visible.
pub fn tail_width(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in s.char_indices().rev() {
        used += c.width().unwrap_or(0);
        if used > width {
            return &s[idx + c.len_utf8()..];
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 2), "he");
        assert_eq!(truncate("hello", 0), "");
    }

    #[test]
    fn test_fit_width() {
        assert_eq!(fit_width("short", 10), "short");
        assert_eq!(fit_width("abcdefgh", 5), "abcd…");
        // Wide characters take two columns each
        assert_eq!(fit_width("日本語テキスト", 5), "日本…");
        assert_eq!(fit_width("abc", 0), "");
    }

    #[test]
    fn test_tail_width() {
        assert_eq!(tail_width("abcdef", 3), "def");
        assert_eq!(tail_width("abc", 10), "abc");
        assert_eq!(tail_width("日本語", 4), "本語");
        assert_eq!(tail_width("", 4), "");
    }
}
