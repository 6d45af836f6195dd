//! New-note form.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FormInfo;

const LABEL_WIDTH: usize = 9;

/// Renders one line per draft field plus a hint line; returns the next row.
pub fn render_form(row: usize, form: &FormInfo, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;

    for field in &form.fields {
        position_cursor(current_row, 1);
        let marker = if field.is_active { '>' } else { ' ' };
        let label_color = if field.is_active {
            &theme.colors.input_border
        } else {
            &theme.colors.text_dim
        };

        print!("{}", Theme::fg(label_color));
        print!("{marker} {:<LABEL_WIDTH$}", field.label);
        print!("{}", Theme::fg(&theme.colors.text_normal));

        let value_width = cols.saturating_sub(LABEL_WIDTH + 3);
        let mut value: String = field.value.chars().take(value_width).collect();
        if field.is_active {
            value.push('_');
        }
        let used = LABEL_WIDTH + 2 + value.chars().count();
        print!("{value}");
        print!("{}", " ".repeat(cols.saturating_sub(used)));
        print!("{}", Theme::reset());
        current_row += 1;
    }

    position_cursor(current_row, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("  Tags are comma separated; color is a hex value such as #fff475");
    print!("{}", Theme::reset());

    current_row + 1
}
