use serde::{Deserialize, Serialize};

/// Lifecycle status of a task card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Todo,
    Done,
    Deleted,
}

impl TaskStatus {
    /// Parse status from its stored tag like "todo"
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "todo" => Some(Self::Todo),
            "done" => Some(Self::Done),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }

    /// Deleted cards sit in the trash and are left out of the board and progress
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Deleted)
    }
}

/// A board column. Dropping a card on a column applies its target status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Todo,
    Done,
}

impl Column {
    pub fn target_status(&self) -> TaskStatus {
        match self {
            Column::Todo => TaskStatus::Todo,
            Column::Done => TaskStatus::Done,
        }
    }

    /// The column a card with this status is shown in (None for trashed cards)
    pub fn for_status(status: TaskStatus) -> Option<Self> {
        match status {
            TaskStatus::Todo => Some(Column::Todo),
            TaskStatus::Done => Some(Column::Done),
            TaskStatus::Deleted => None,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Column::Todo => Column::Done,
            Column::Done => Column::Todo,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Column::Todo => "To Do",
            Column::Done => "Done",
        }
    }

    pub fn all() -> &'static [Column] {
        &[Column::Todo, Column::Done]
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    DayChanged, // Shown after a rollover happened under a running session
}

/// Which panel occupies the right-hand side of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidePanel {
    Hidden,
    History,
    Trash,
}
