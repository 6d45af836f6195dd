//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Centered view title
//! - [`menu`]: View selector bar
//! - [`input`]: Search/label input box
//! - [`form`]: New-note form
//! - [`notes`]: Note list rows
//! - [`empty`]: Empty state message
//! - [`footer`]: Status line and keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Menu]
//! [Border]
//! [Input box or form, when the view has one]
//! [Note rows or empty state]
//! [Blank padding]
//! [Status]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod form;
mod header;
mod input;
mod menu;
mod notes;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::{render_footer, render_status};
use form::render_form;
use header::render_header;
use input::render_input_bar;
use menu::render_menu;
use notes::render_note_rows;

/// Renders a horizontal border line and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full layout for `vm`.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_menu(current_row, &vm.menu, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    if let Some(input) = &vm.input_bar {
        current_row = render_input_bar(current_row, input, theme, cols);
    }
    if let Some(form) = &vm.form {
        current_row = render_form(current_row, form, theme, cols);
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    } else {
        render_note_rows(current_row, &vm.display_items, theme, cols);
    }

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let status_row = border_row.saturating_sub(1);

    render_status(status_row, vm.status.as_deref(), theme, cols);
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
