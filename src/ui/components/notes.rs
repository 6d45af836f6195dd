//! Note list renderer.

use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NoteRow;

const TITLE_COLUMN_WIDTH: usize = 30;

/// Renders every row and returns the row after the last one.
pub fn render_note_rows(row: usize, items: &[NoteRow], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_note_row(current_row, item, theme, cols);
    }
    current_row
}

/// One note:
///
/// ```text
/// ▌ Title                          excerpt   #tag #tag  ⏰ reminder   a: archive  d: delete
/// ```
///
/// The swatch uses the note's color. Selection colors win over highlights.
fn render_note_row(row: usize, item: &NoteRow, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if let Some(color) = &item.color {
        print!("{}▌{}", Theme::fg(color), Theme::reset());
    } else {
        print!(" ");
    }

    let base = || {
        if item.is_selected {
            format!(
                "{}{}",
                Theme::fg(&theme.colors.selection_fg),
                Theme::bg(&theme.colors.selection_bg)
            )
        } else {
            Theme::fg(&theme.colors.text_normal)
        }
    };

    print!("{} ", base());
    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);
    let title_len = item.title.chars().count();
    print!("{}", " ".repeat(TITLE_COLUMN_WIDTH.saturating_sub(title_len + 1)));
    let mut used = 1 + TITLE_COLUMN_WIDTH;

    if !item.excerpt.is_empty() {
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{}  ", item.excerpt);
        used += item.excerpt.chars().count() + 2;
    }

    if !item.tags.is_empty() {
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.tag_fg));
        }
        print!("{}  ", item.tags);
        used += item.tags.chars().count() + 2;
    }

    if let Some(reminder) = &item.reminder {
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.reminder_fg));
        }
        print!("{reminder}  ");
        used += reminder.chars().count() + 2;
    }

    let hint_len = item.action_hint.chars().count();
    let gap = cols.saturating_sub(used + hint_len + 1);
    print!("{}", base());
    print!("{}", " ".repeat(gap));
    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{} ", item.action_hint);

    print!("{}", Theme::reset());
    row + 1
}
