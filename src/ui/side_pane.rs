use crate::app::AppState;
use crate::domain::{card_marker, SidePanel, TaskStatus};
use crate::ui::styles::{
    border_style, date_style, default_style, deleted_style, done_style, hint_style, selected_style,
    title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Render the History or Trash panel
pub fn render_side_pane(f: &mut Frame, app: &AppState, area: Rect) {
    match app.side_panel {
        SidePanel::History => render_history(f, app, area),
        SidePanel::Trash => render_trash(f, app, area),
        SidePanel::Hidden => {}
    }
}

fn render_history(f: &mut Frame, app: &AppState, area: Rect) {
    let view = app.view();
    let mut lines = Vec::new();

    if view.history.is_empty() {
        lines.push(Line::styled("No history yet.", hint_style()));
        lines.push(Line::styled(
            "Completed tasks are archived here when a new day starts.",
            hint_style(),
        ));
    }

    for entry in view.history {
        lines.push(Line::from(vec![
            Span::styled(entry.date.format("%a %b %d, %Y").to_string(), date_style()),
            Span::styled(format!("  ({})", entry.items.len()), hint_style()),
        ]));
        for item in &entry.items {
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", card_marker(TaskStatus::Done)), done_style()),
                Span::styled(item.clone(), default_style()),
            ]));
        }
        lines.push(Line::raw(""));
    }

    let title = format!(" History ({} days) ", view.history.len());
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(title, title_style())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

fn render_trash(f: &mut Frame, app: &AppState, area: Rect) {
    let view = app.view();

    let items: Vec<ListItem> = if view.trash.is_empty() {
        vec![ListItem::new(Line::styled("Trash is empty.", hint_style()))]
    } else {
        view.trash
            .iter()
            .enumerate()
            .map(|(idx, task)| {
                let line = Line::from(vec![
                    Span::raw(format!("{} ", card_marker(task.status))),
                    Span::styled(task.content.clone(), deleted_style()),
                ]);
                let style = if idx == app.trash_selected {
                    selected_style()
                } else {
                    default_style()
                };
                ListItem::new(line).style(style)
            })
            .collect()
    };

    let title = format!(" Trash ({}) · [/] select · r restore ", view.trash_count);
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}
