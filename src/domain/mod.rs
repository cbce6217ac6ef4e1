pub mod enums;
mod lenient;
pub mod state;
pub mod task;
pub mod views;

pub use enums::{Column, SidePanel, TaskStatus, UiMode};
pub use state::{BoardState, Rollover, StreakChange, HISTORY_LIMIT};
pub use task::{Task, TaskId};
pub use views::{card_marker, progress_label, streak_glyph, BoardView};
