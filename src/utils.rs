use crate::models::Score;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates to at most `max_width` display columns, ending in "..." when cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut width = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}

/// Share of correct answers, rounded to the nearest whole percent.
pub fn score_percentage(score: &Score) -> u16 {
    let total = score.answered();
    if total == 0 {
        return 0;
    }
    ((score.correct as f64 / total as f64) * 100.0).round() as u16
}
