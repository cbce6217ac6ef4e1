use crate::app::AppState;
use crate::domain::{card_marker, Column, Task};
use crate::ui::layout::{scroll_offset, visible_rows};
use crate::ui::styles::{
    border_style, default_style, done_style, drop_target_style, focused_border_style, hint_style,
    selected_style, title_style, unfocused_selected_style,
};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Create a line for a card
fn create_card_line(task: &Task, is_dragged: bool) -> Line<'static> {
    let marker_style = match Column::for_status(task.status) {
        Some(Column::Done) => done_style(),
        _ => default_style(),
    };

    let mut spans = vec![
        Span::styled(format!("{} ", card_marker(task.status)), marker_style),
        Span::raw(task.content.clone()),
    ];
    if is_dragged {
        spans.push(Span::styled("  ⇄".to_string(), drop_target_style()));
    }

    Line::from(spans)
}

/// Render one board column and remember where it was drawn for mouse hit-testing
pub fn render_column(f: &mut Frame, app: &mut AppState, column: Column, area: Rect) {
    let selected = app.selected_index(column);
    let offset = scroll_offset(selected, visible_rows(area));
    let focused = app.focus == column;
    let dragged = app.drag.map(|d| d.task_id);

    let border = if app.drag_target(column) {
        drop_target_style()
    } else if focused {
        focused_border_style()
    } else {
        border_style()
    };

    let (items, count) = {
        let view = app.view();
        let tasks = view.column(column);

        let items: Vec<ListItem> = if tasks.is_empty() {
            vec![ListItem::new(Line::styled("  (drop cards here)", hint_style()))]
        } else {
            tasks
                .iter()
                .enumerate()
                .skip(offset)
                .map(|(idx, task)| {
                    let line = create_card_line(task, dragged == Some(task.id));
                    let style = match (idx == selected, focused) {
                        (true, true) => selected_style(),
                        (true, false) => unfocused_selected_style(),
                        _ => default_style(),
                    };
                    ListItem::new(line).style(style)
                })
                .collect()
        };
        (items, tasks.len())
    };

    let title = format!(" {} ({}) ", column.title(), count);
    let title_span = if focused {
        Span::styled(title, title_style().add_modifier(Modifier::UNDERLINED))
    } else {
        Span::styled(title, title_style())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title_span),
    );

    app.areas.set(column, area, offset);
    f.render_widget(list, area);
}
