//! Shared rendering utilities.
//!
//! Highlight ranges use character indices, not byte indices, so titles with
//! multi-byte characters highlight correctly.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row`/`col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Character ranges of every non-overlapping, case-insensitive occurrence of
/// `query` in `text`.
///
/// # Examples
///
/// ```
/// use notepane::ui::helpers::substring_ranges;
///
/// assert_eq!(substring_ranges("Milk and more milk", "MILK"), vec![(0, 4), (14, 18)]);
/// assert!(substring_ranges("eggs", "").is_empty());
/// ```
#[must_use]
pub fn substring_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let fold = |c: char| c.to_lowercase().next().unwrap_or(c);
    let hay: Vec<char> = text.chars().map(fold).collect();
    let needle: Vec<char> = query.chars().map(fold).collect();

    let mut ranges = Vec::new();
    if needle.is_empty() || needle.len() > hay.len() {
        return ranges;
    }

    let mut start = 0;
    while start + needle.len() <= hay.len() {
        if hay[start..start + needle.len()] == needle[..] {
            ranges.push((start, start + needle.len()));
            start += needle.len();
        } else {
            start += 1;
        }
    }
    ranges
}

/// Prints `text` with `ranges` in the match highlight colors.
///
/// Selected rows skip highlighting so the selection background stays intact.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            let normal: String = chars[current_pos..start].iter().collect();
            print!("{normal}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted: String = chars[start..end].iter().collect();
        print!("{highlighted}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_are_character_based() {
        assert_eq!(substring_ranges("Café plan", "plan"), vec![(5, 9)]);
    }

    #[test]
    fn overlapping_matches_are_not_repeated() {
        assert_eq!(substring_ranges("aaaa", "aa"), vec![(0, 2), (2, 4)]);
    }

    #[test]
    fn missing_query_yields_nothing() {
        assert!(substring_ranges("Groceries", "work").is_empty());
        assert!(substring_ranges("ab", "abc").is_empty());
    }
}
