use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" ↑/↓ select   "),
        Span::raw("←/→ column   "),
        Span::raw("Space move   "),
        Span::raw("a add   "),
        Span::raw("x delete   "),
        Span::raw("t trash   "),
        Span::raw("r restore   "),
        Span::raw("h history   "),
        Span::raw("s settings   "),
        Span::raw("mouse drag   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
