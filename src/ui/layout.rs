use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub header_area: Rect,
    pub todo_area: Rect,
    pub done_area: Rect,
    pub side_area: Option<Rect>,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Header: progress gauge, streak and trash badges (3 rows)
/// - Board: To Do | Done, plus the History/Trash panel on the right when shown
pub fn create_layout(area: Rect, show_side: bool) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Board
        ])
        .split(area);

    let board_area = main_chunks[2];

    if show_side {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(35), // To Do
                Constraint::Percentage(35), // Done
                Constraint::Percentage(30), // History / Trash
            ])
            .split(board_area);

        MainLayout {
            keybindings_area: main_chunks[0],
            header_area: main_chunks[1],
            todo_area: horizontal[0],
            done_area: horizontal[1],
            side_area: Some(horizontal[2]),
        }
    } else {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(board_area);

        MainLayout {
            keybindings_area: main_chunks[0],
            header_area: main_chunks[1],
            todo_area: horizontal[0],
            done_area: horizontal[1],
            side_area: None,
        }
    }
}

/// Create centered modal area
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(10),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

/// Whether a terminal cell lies inside `rect`
pub fn rect_contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x.saturating_add(rect.width) && y >= rect.y && y < rect.y.saturating_add(rect.height)
}

/// Row index inside a bordered list, if `y` falls between the borders
pub fn list_row_at(rect: Rect, y: u16) -> Option<usize> {
    let first = rect.y.saturating_add(1);
    let end = rect.y.saturating_add(rect.height).saturating_sub(1);
    if y >= first && y < end {
        Some((y - first) as usize)
    } else {
        None
    }
}

/// Number of list rows visible inside a bordered block
pub fn visible_rows(rect: Rect) -> usize {
    rect.height.saturating_sub(2) as usize
}

/// First row to draw so that `selected` stays visible
pub fn scroll_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        0
    } else {
        selected.saturating_sub(visible - 1)
    }
}
