use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected card highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Selected card in a column that doesn't have focus
pub fn unfocused_selected_style() -> Style {
    Style::default().fg(Color::White).bg(Color::DarkGray)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Border of the focused column
pub fn focused_border_style() -> Style {
    Style::default().fg(Color::LightCyan)
}

/// Border of a column a card is being dragged over
pub fn drop_target_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Progress gauge style
pub fn gauge_style() -> Style {
    Style::default().fg(Color::Green).bg(Color::DarkGray)
}

/// Streak badge style
pub fn streak_style() -> Style {
    Style::default()
        .fg(Color::LightRed)
        .add_modifier(Modifier::BOLD)
}

/// Trash badge style
pub fn trash_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Done card style
pub fn done_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Trashed card style
pub fn deleted_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// History date heading style
pub fn date_style() -> Style {
    Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
}

/// Celebration banner style
pub fn celebration_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightGreen)
        .add_modifier(Modifier::BOLD)
}
