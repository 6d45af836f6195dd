//! Search and label input box.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::InputBarInfo;

/// Horizontal margin on each side of the box.
const INPUT_BOX_MARGIN: usize = 5;

/// Renders a 3-line bordered input box and returns the row after it.
///
/// ```text
/// [margin] ┌─────────────────┐ [margin]
/// [margin] │ Search: milk_   │ [margin]
/// [margin] └─────────────────┘ [margin]
/// ```
///
/// A focused box shows a trailing cursor.
pub fn render_input_bar(row: usize, input: &InputBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(INPUT_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if input.is_focused {
        &theme.colors.input_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if input.is_focused { "_" } else { "" };
    let text: String = format!(" {}: {}{cursor}", input.prompt, input.text)
        .chars()
        .take(inner_width)
        .collect();
    let padding = inner_width.saturating_sub(text.chars().count());

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
