use crate::domain::{progress_label, streak_glyph, BoardState, BoardView};
use crate::persistence::atomic_write;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

/// Format percentage without decimals
fn format_percent(value: f64) -> String {
    format!("{:.0}%", value)
}

/// Plain-text summary of today's board for the `status` command
pub fn render_status(board: &BoardState, today: NaiveDate) -> String {
    let view = BoardView::project(board);
    let mut out = String::new();

    out.push_str(&format!("Zen Focus - {}\n", today.format("%A, %B %d, %Y")));
    out.push_str(&format!(
        "Progress: {} ({})\n",
        progress_label(&view.progress),
        format_percent(view.progress.percent())
    ));
    out.push_str(&format!(
        "Streak:   {} {} day{}\n",
        streak_glyph(view.streak, false),
        view.streak,
        if view.streak == 1 { "" } else { "s" }
    ));
    out.push_str(&format!("Trash:    {} items\n", view.trash_count));

    if !view.todo.is_empty() {
        out.push_str("\nTo Do:\n");
        for task in &view.todo {
            out.push_str(&format!("  [ ] {}\n", task.content));
        }
    }
    if !view.done.is_empty() {
        out.push_str("\nDone:\n");
        for task in &view.done {
            out.push_str(&format!("  [x] {}\n", task.content));
        }
    }

    out
}

/// Markdown rendering of the archived history, most recent day first
pub fn render_history(board: &BoardState) -> String {
    let mut report = String::new();

    report.push_str("# Zen Focus History\n\n");
    report.push_str(&format!("- **Current streak:** {} days\n", board.streak));
    report.push_str(&format!("- **Days recorded:** {}\n\n", board.history.len()));

    if board.history.is_empty() {
        report.push_str("_No history yet._\n");
        return report;
    }

    for entry in &board.history {
        report.push_str(&format!("## {}\n\n", entry.date.format("%Y-%m-%d (%A)")));
        for item in &entry.items {
            report.push_str(&format!("- [x] {}\n", item));
        }
        report.push('\n');
    }

    report
}

/// Write a report to `output`, or print it when no path is given
pub fn write_report(content: &str, output: Option<PathBuf>) -> Result<Option<PathBuf>> {
    match output {
        Some(path) => {
            atomic_write(&path, content)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            Ok(Some(path))
        }
        None => {
            print!("{}", content);
            Ok(None)
        }
    }
}
