use super::enums::{Column, TaskStatus};
use super::state::{BoardState, Progress};
use super::task::{HistoryEntry, Task};

/// Everything the screen shows, derived from the board in one pass.
/// Rendering never keeps state of its own beyond this projection.
#[derive(Debug, Clone)]
pub struct BoardView<'a> {
    pub todo: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
    pub trash: Vec<&'a Task>,
    pub progress: Progress,
    pub streak: u32,
    pub trash_count: usize,
    pub history: &'a [HistoryEntry],
}

impl<'a> BoardView<'a> {
    pub fn project(board: &'a BoardState) -> Self {
        let mut todo = Vec::new();
        let mut done = Vec::new();
        let mut trash = Vec::new();

        for task in &board.tasks {
            match task.status {
                TaskStatus::Todo => todo.push(task),
                TaskStatus::Done => done.push(task),
                TaskStatus::Deleted => trash.push(task),
            }
        }

        let trash_count = trash.len();
        Self {
            todo,
            done,
            trash,
            progress: board.progress(),
            streak: board.streak,
            trash_count,
            history: &board.history,
        }
    }

    pub fn column(&self, column: Column) -> &[&'a Task] {
        match column {
            Column::Todo => &self.todo,
            Column::Done => &self.done,
        }
    }
}

/// Text shown next to the progress bar, e.g. "2/3 Completed"
pub fn progress_label(progress: &Progress) -> String {
    format!("{}/{} Completed", progress.done, progress.total)
}

/// Streak badge glyph, with an ASCII fallback
pub fn streak_glyph(streak: u32, use_emoji: bool) -> &'static str {
    match (use_emoji, streak) {
        (true, 0) => "🌑",
        (true, _) => "🔥",
        (false, 0) => "-",
        (false, _) => "*",
    }
}

/// Card marker for a column
pub fn card_marker(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "○",
        TaskStatus::Done => "✓",
        TaskStatus::Deleted => "✗",
    }
}
