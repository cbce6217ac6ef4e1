use crate::domain::{progress_label, streak_glyph, BoardView};
use crate::ui::styles::{border_style, gauge_style, streak_style, title_style, trash_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Render the progress bar with the streak and trash badges
pub fn render_header_pane(f: &mut Frame, view: &BoardView, use_emoji: bool, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let percent = view.progress.percent();
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Today ", title_style())),
        )
        .gauge_style(gauge_style())
        .percent(percent.round().clamp(0.0, 100.0) as u16)
        .label(format!("{} ({:.0}%)", progress_label(&view.progress), percent));
    f.render_widget(gauge, chunks[0]);

    let trash_label = if view.trash_count == 1 { "item" } else { "items" };
    let badges = Line::from(vec![
        Span::styled(
            format!(" {} {} day streak ", streak_glyph(view.streak, use_emoji), view.streak),
            streak_style(),
        ),
        Span::raw("   "),
        Span::styled(
            format!("🗑 {} {} in trash", view.trash_count, trash_label),
            trash_style(),
        ),
    ]);

    let paragraph = Paragraph::new(badges).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style()),
    );
    f.render_widget(paragraph, chunks[1]);
}
