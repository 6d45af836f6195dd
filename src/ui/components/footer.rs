//! Footer and status line renderers.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders centered keybinding hints, truncated to the pane width.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text: String = footer.keybindings.chars().take(cols).collect();
    let text_len = help_text.chars().count();
    let padding = cols.saturating_sub(text_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{help_text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the last status message left-aligned, or a blank line.
pub fn render_status(row: usize, status: Option<&str>, theme: &Theme, cols: usize) -> usize {
    let text: String = status.unwrap_or_default().chars().take(cols.saturating_sub(1)).collect();

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.status_fg));
    print!(" {text}");
    print!("{}", " ".repeat(cols.saturating_sub(text.chars().count() + 1)));
    print!("{}", Theme::reset());
    row + 1
}
