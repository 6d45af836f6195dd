//! View selector bar.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::MenuEntry;

/// Renders the menu entries on one line as `[n] Create a New Note  [/] Search Notes ...`.
///
/// The entry of the current view is bold in `menu_active_fg`. Entries that do
/// not fit in `cols` are dropped.
pub fn render_menu(row: usize, entries: &[MenuEntry], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let mut used = 1;
    print!(" ");
    for entry in entries {
        let text = format!("[{}] {}", entry.key, entry.label);
        let width = text.chars().count() + 2;
        if used + width > cols {
            break;
        }

        if entry.is_active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.menu_active_fg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{text}  ");
        print!("{}", Theme::reset());
        used += width;
    }
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}
