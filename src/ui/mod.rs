pub mod board_pane;
pub mod header_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod side_pane;
pub mod styles;

use crate::app::AppState;
use crate::domain::{Column, SidePanel, UiMode};
use board_pane::render_column;
use header_pane::render_header_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::{render_celebration, render_day_changed_modal};
use ratatui::Frame;
use side_pane::render_side_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &mut AppState) {
    let size = f.size();
    let layout = create_layout(size, app.side_panel != SidePanel::Hidden);

    render_keybindings(f, layout.keybindings_area);
    render_header_pane(f, &app.view(), app.use_emoji, layout.header_area);

    render_column(f, app, Column::Todo, layout.todo_area);
    render_column(f, app, Column::Done, layout.done_area);

    if let Some(side_area) = layout.side_area {
        render_side_pane(f, app, side_area);
    }

    render_celebration(f, app, size);

    // Day changed notice takes precedence over the form
    if app.ui_mode == UiMode::DayChanged {
        render_day_changed_modal(f, app, size);
        return;
    }

    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }
}
