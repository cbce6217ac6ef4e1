use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::{
    layout::create_modal_area,
    styles::{celebration_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the new-day notice shown after a rollover during a session
pub fn render_day_changed_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if app.ui_mode != UiMode::DayChanged {
        return;
    }

    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let mut lines = vec![
        Line::raw(""),
        Line::raw("  A new day has begun!"),
        Line::raw(""),
    ];
    if let Some(notice) = &app.day_notice {
        lines.push(Line::raw(format!("  {}", notice)));
    }
    lines.push(Line::raw("  Today's quests are back in To Do."));
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("  [Enter]", modal_title_style()),
        Span::raw(" Continue  "),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" \u{1F305} New Day ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the streak celebration banner across the top of the board
pub fn render_celebration(f: &mut Frame, app: &AppState, area: Rect) {
    if !app.is_celebrating() || area.height < 3 {
        return;
    }

    let banner = Rect::new(area.x, area.y + area.height / 2 - 1, area.width, 3);
    f.render_widget(Clear, banner);

    let text = format!(
        "🎉 All quests done! Streak: {} day{} 🎉",
        app.board.streak,
        if app.board.streak == 1 { "" } else { "s" }
    );
    let paragraph = Paragraph::new(Line::from(Span::styled(text, celebration_style())))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).style(celebration_style()));

    f.render_widget(paragraph, banner);
}
