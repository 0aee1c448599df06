//! Text measurement and wrapping.
//!
//! There is no font shaping here. Width is estimated as
//! `chars * AVG_CHAR_WIDTH_PX`; this formula is frozen because recorded
//! outputs depend on the exact wrap points it produces.

use super::theme;

/// Estimated rendered width of `text` in pixels.
pub fn estimate_text_width(text: &str) -> f64 {
    text.chars().count() as f64 * theme::AVG_CHAR_WIDTH_PX
}

/// Split `text` into at most two lines.
///
/// 1. `"<main> (<parenthetical>)"` longer than 36 chars: main, then parenthetical.
/// 2. Wider than `max_width_px`: split at the first word boundary whose running
///    width reaches half the total.
/// 3. Otherwise one line.
pub fn wrap_text(text: &str, max_width_px: f64) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    if text.chars().count() > theme::PARENTHETICAL_SPLIT_CHARS {
        if let Some((main, paren)) = split_parenthetical(text) {
            return vec![main.to_string(), paren.to_string()];
        }
    }

    if estimate_text_width(text) <= max_width_px {
        return vec![text.to_string()];
    }

    let words: Vec<&str> = text.split(' ').collect();
    if words.len() < 2 {
        return vec![text.to_string()];
    }

    let target = estimate_text_width(text) / 2.0;
    let space = estimate_text_width(" ");
    let mut running = 0.0;
    // Never split after the last word; a second line must not be empty.
    for (i, word) in words[..words.len() - 1].iter().enumerate() {
        if i > 0 {
            running += space;
        }
        running += estimate_text_width(word);
        if running >= target {
            let first = words[..=i].join(" ");
            let second = words[i + 1..].join(" ");
            return vec![first, second];
        }
    }

    let last = words.len() - 1;
    vec![words[..last].join(" "), words[last].to_string()]
}

/// Match `"<main> (<parenthetical>)"`, returning `main` and `(parenthetical)`.
fn split_parenthetical(text: &str) -> Option<(&str, &str)> {
    if !text.ends_with(')') {
        return None;
    }
    let open = text.rfind(" (")?;
    let main = text[..open].trim_end();
    let paren = &text[open + 1..];
    if main.is_empty() || paren.len() <= 2 {
        return None;
    }
    Some((main, paren))
}

/// Height taken by `lines` lines of text at `line_height`.
pub fn wrapped_height(lines: usize, line_height: f64) -> f64 {
    lines as f64 * line_height
}

/// Vertical band reserved for a chart title. Empty titles reserve nothing.
pub fn title_band_height(title: &str, max_width_px: f64) -> f64 {
    let lines = wrap_text(title, max_width_px);
    if lines.is_empty() {
        0.0
    } else {
        theme::TITLE_TOP_PADDING + wrapped_height(lines.len(), theme::TITLE_LINE_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_char_count_times_seven() {
        assert_eq!(estimate_text_width("abc"), 21.0);
        assert_eq!(estimate_text_width("Q₁"), 14.0);
        assert_eq!(estimate_text_width(""), 0.0);
    }

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap_text("Rainfall", 200.0), vec!["Rainfall"]);
        assert!(wrap_text("", 200.0).is_empty());
    }

    #[test]
    fn long_parenthetical_splits_into_main_and_parenthetical() {
        let lines = wrap_text("Average daily temperature (degrees Celsius)", 1000.0);
        assert_eq!(lines, vec!["Average daily temperature", "(degrees Celsius)"]);
    }

    #[test]
    fn short_parenthetical_is_not_split() {
        // 20 chars, below the parenthetical threshold and fits the width
        assert_eq!(wrap_text("Height (centimeters)", 500.0), vec!["Height (centimeters)"]);
    }

    #[test]
    fn wide_text_splits_near_the_middle() {
        // 37 chars => 259px total, target 129.5
        // running: one=21, one two=49, ... "one two three four five"=161 >= 129.5
        let text = "one two three four five six seventeen";
        let lines = wrap_text(text, 100.0);
        assert_eq!(lines, vec!["one two three four five", "six seventeen"]);
    }

    #[test]
    fn single_long_word_stays_on_one_line() {
        assert_eq!(wrap_text("Pneumonoultramicroscopic", 10.0).len(), 1);
    }

    #[test]
    fn title_band_counts_lines() {
        assert_eq!(title_band_height("", 300.0), 0.0);
        assert_eq!(title_band_height("Sales", 300.0), 35.0);
        assert_eq!(
            title_band_height("Average daily temperature (degrees Celsius)", 1000.0),
            55.0
        );
    }
}
