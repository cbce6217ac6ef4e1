use crate::app::AppState;
use crate::domain::{Column, SidePanel, UiMode};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use std::env;
use std::fs;
use std::process::Command;
use tempfile::NamedTempFile;

/// Handle keyboard input events
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask => handle_input_form_mode(app, key),
        UiMode::DayChanged => handle_day_changed_mode(app, key),
    }
}

/// Key that opens the default quests in `$EDITOR`; the event loop leaves the
/// alternate screen around it
pub fn is_settings_key(app: &AppState, key: &KeyEvent) -> bool {
    app.ui_mode == UiMode::Normal && matches!(key.code, KeyCode::Char('s') | KeyCode::Char('S'))
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }
        KeyCode::Left => {
            app.focus_column(Column::Todo);
            Ok(false)
        }
        KeyCode::Right => {
            app.focus_column(Column::Done);
            Ok(false)
        }
        KeyCode::Tab => {
            app.focus_column(app.focus.other());
            Ok(false)
        }

        // Move the selected card to the other column
        KeyCode::Char(' ') | KeyCode::Enter => {
            app.move_selected_card();
            Ok(false)
        }

        // Add task
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_add_task();
            Ok(false)
        }

        // Soft delete
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
            app.delete_selected();
            Ok(false)
        }

        // Trash panel: select with [ and ], restore with r
        KeyCode::Char('[') => {
            if app.side_panel == SidePanel::Trash {
                app.trash_selection_up();
            }
            Ok(false)
        }
        KeyCode::Char(']') => {
            if app.side_panel == SidePanel::Trash {
                app.trash_selection_down();
            }
            Ok(false)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            if app.side_panel == SidePanel::Trash {
                app.restore_selected_trash();
            }
            Ok(false)
        }

        // Side panels
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.toggle_trash();
            Ok(false)
        }
        KeyCode::Char('h') | KeyCode::Char('H') => {
            app.toggle_history();
            Ok(false)
        }

        // Edit default quests
        KeyCode::Char('s') | KeyCode::Char('S') => {
            edit_defaults_external(app)?;
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Ok(true),

        // Escape closes the side panel
        KeyCode::Esc => {
            app.side_panel = SidePanel::Hidden;
            Ok(false)
        }

        _ => Ok(false),
    }
}

/// Handle keys in input form mode (adding a task)
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Submit form
        KeyCode::Enter => {
            app.submit_input_form();
            Ok(false)
        }

        // Cancel form
        KeyCode::Esc => {
            app.cancel_input_form();
            Ok(false)
        }

        KeyCode::Backspace => {
            app.input_form_backspace();
            Ok(false)
        }

        // Add character (without Ctrl so Ctrl+C is not typed)
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input_form_add_char(c);
            Ok(false)
        }

        _ => Ok(false),
    }
}

/// Handle keys while the new-day notice is shown
fn handle_day_changed_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
            app.dismiss_day_notice();
            Ok(false)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),
        _ => Ok(false),
    }
}

/// Handle mouse events: press picks up a card, release drops it
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    if app.ui_mode != UiMode::Normal {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.begin_drag(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.end_drag(mouse.column, mouse.row);
        }
        MouseEventKind::ScrollUp => app.move_selection_up(),
        MouseEventKind::ScrollDown => app.move_selection_down(),
        _ => {}
    }
}

/// Edit the default quests (one per line) using external $EDITOR
fn edit_defaults_external(app: &mut AppState) -> Result<()> {
    // Get editor from environment, default to vi
    let editor = env::var("EDITOR").unwrap_or_else(|_| {
        if cfg!(windows) {
            "notepad".to_string()
        } else {
            "vi".to_string()
        }
    });

    // Create temp file with the current list
    let mut temp_file = NamedTempFile::new().context("Failed to create temp file for settings")?;
    std::io::Write::write_all(&mut temp_file, app.board.defaults_text().as_bytes())?;
    let temp_path = temp_file.into_temp_path();

    let status = Command::new(&editor)
        .arg(&temp_path)
        .status()
        .with_context(|| format!("Failed to launch editor '{}'", editor))?;

    if status.success() {
        let edited = fs::read_to_string(&temp_path)?;
        app.apply_defaults(&edited);
    } else {
        log::warn!("Editor '{}' exited with {}; default quests unchanged", editor, status);
    }

    Ok(())
}
