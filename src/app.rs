use crate::domain::{BoardState, BoardView, Column, Rollover, SidePanel, StreakChange, TaskId, UiMode};
use crate::notifications;
use crate::persistence::{save_board, Store};
use crate::ticker;
use crate::ui::layout::{list_row_at, rect_contains};
use anyhow::Result;
use chrono::NaiveDate;
use ratatui::layout::Rect;
use std::time::Instant;

/// Input form state for adding tasks
#[derive(Debug, Clone, Default)]
pub struct InputFormState {
    pub content: String,
}

/// A card picked up with the mouse, waiting to be dropped on a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub task_id: TaskId,
    pub from: Column,
}

/// Column areas from the last frame, kept for mouse hit-testing
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardAreas {
    pub todo: Rect,
    pub done: Rect,
    /// First visible card in each column (columns scroll to keep the selection visible)
    pub todo_offset: usize,
    pub done_offset: usize,
}

impl BoardAreas {
    pub fn area(&self, column: Column) -> Rect {
        match column {
            Column::Todo => self.todo,
            Column::Done => self.done,
        }
    }

    pub fn offset(&self, column: Column) -> usize {
        match column {
            Column::Todo => self.todo_offset,
            Column::Done => self.done_offset,
        }
    }

    pub fn set(&mut self, column: Column, area: Rect, offset: usize) {
        match column {
            Column::Todo => {
                self.todo = area;
                self.todo_offset = offset;
            }
            Column::Done => {
                self.done = area;
                self.done_offset = offset;
            }
        }
    }

    /// Column under a terminal cell
    pub fn column_at(&self, x: u16, y: u16) -> Option<Column> {
        Column::all()
            .iter()
            .copied()
            .find(|&column| rect_contains(self.area(column), x, y))
    }

    /// Column and card position under a terminal cell
    pub fn card_at(&self, x: u16, y: u16) -> Option<(Column, usize)> {
        let column = self.column_at(x, y)?;
        let row = list_row_at(self.area(column), y)?;
        Some((column, row + self.offset(column)))
    }
}

/// Main application state: owns the board and its store, and handles every UI event
pub struct AppState {
    pub board: BoardState,
    store: Box<dyn Store>,
    /// The calendar day the board is currently tracking
    pub today: NaiveDate,
    pub ui_mode: UiMode,
    pub focus: Column,
    pub selected_todo: usize,
    pub selected_done: usize,
    pub side_panel: SidePanel,
    pub trash_selected: usize,
    pub input_form: Option<InputFormState>,
    pub drag: Option<DragState>,
    pub areas: BoardAreas,
    pub celebrate_until: Option<Instant>,
    pub day_notice: Option<String>,
    pub use_emoji: bool,
    pub needs_save: bool,
}

impl AppState {
    pub fn new(board: BoardState, store: Box<dyn Store>, today: NaiveDate) -> Self {
        let mut app = Self {
            board,
            store,
            today,
            ui_mode: UiMode::Normal,
            focus: Column::Todo,
            selected_todo: 0,
            selected_done: 0,
            side_panel: SidePanel::Hidden,
            trash_selected: 0,
            input_form: None,
            drag: None,
            areas: BoardAreas::default(),
            celebrate_until: None,
            day_notice: None,
            use_emoji: true,
            needs_save: false,
        };

        // The first frame evaluates progress just like every later one
        app.refresh_progress();
        app
    }

    /// Derived view of the board for rendering
    pub fn view(&self) -> BoardView<'_> {
        BoardView::project(&self.board)
    }

    fn column_ids(&self, column: Column) -> Vec<TaskId> {
        self.view().column(column).iter().map(|t| t.id).collect()
    }

    fn trash_ids(&self) -> Vec<TaskId> {
        self.view().trash.iter().map(|t| t.id).collect()
    }

    pub fn selected_index(&self, column: Column) -> usize {
        match column {
            Column::Todo => self.selected_todo,
            Column::Done => self.selected_done,
        }
    }

    fn set_selected_index(&mut self, column: Column, index: usize) {
        match column {
            Column::Todo => self.selected_todo = index,
            Column::Done => self.selected_done = index,
        }
    }

    /// Id of the selected card in the focused column
    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.column_ids(self.focus)
            .get(self.selected_index(self.focus))
            .copied()
    }

    /// Id of the selected card in the trash panel
    pub fn selected_trash_id(&self) -> Option<TaskId> {
        self.trash_ids().get(self.trash_selected).copied()
    }

    /// Keep every selection inside its list after cards move
    fn clamp_selection(&mut self) {
        for &column in Column::all() {
            let len = self.column_ids(column).len();
            let index = self.selected_index(column).min(len.saturating_sub(1));
            self.set_selected_index(column, index);
        }
        let trash_len = self.trash_ids().len();
        self.trash_selected = self.trash_selected.min(trash_len.saturating_sub(1));
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        let index = self.selected_index(self.focus);
        self.set_selected_index(self.focus, index.saturating_sub(1));
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        let index = self.selected_index(self.focus);
        if index + 1 < self.column_ids(self.focus).len() {
            self.set_selected_index(self.focus, index + 1);
        }
    }

    pub fn focus_column(&mut self, column: Column) {
        self.focus = column;
        self.clamp_selection();
    }

    pub fn trash_selection_up(&mut self) {
        self.trash_selected = self.trash_selected.saturating_sub(1);
    }

    pub fn trash_selection_down(&mut self) {
        if self.trash_selected + 1 < self.trash_ids().len() {
            self.trash_selected += 1;
        }
    }

    /// Re-evaluate progress and the streak; called after every change to the board
    pub fn refresh_progress(&mut self) -> StreakChange {
        let (progress, change) = self.board.update_progress(self.today);

        match change {
            StreakChange::Credited => {
                log::info!(
                    "All {} tasks done on {}; streak is now {}",
                    progress.total,
                    self.today,
                    self.board.streak
                );
                self.celebrate_until = Some(Instant::now() + ticker::celebration_duration());
                notifications::notify_streak_earned(self.board.streak);
                self.needs_save = true;
            }
            StreakChange::Revoked => {
                log::info!(
                    "Completion dropped to {}/{}; streak back to {}",
                    progress.done,
                    progress.total,
                    self.board.streak
                );
                self.celebrate_until = None;
                self.needs_save = true;
            }
            StreakChange::Unchanged => {}
        }

        change
    }

    fn after_change(&mut self) {
        self.needs_save = true;
        self.refresh_progress();
        self.clamp_selection();
    }

    /// Drop a card onto a column
    pub fn drop_task(&mut self, id: TaskId, column: Column) -> bool {
        let changed = self.board.drop_on(id, column);
        if changed {
            self.after_change();
        }
        changed
    }

    /// Keyboard drag-and-drop: move the selected card to the other column
    pub fn move_selected_card(&mut self) -> bool {
        match self.selected_task_id() {
            Some(id) => self.drop_task(id, self.focus.other()),
            None => false,
        }
    }

    /// Move a card to the trash
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let changed = self.board.soft_delete(id);
        if changed {
            self.after_change();
        }
        changed
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.selected_task_id() {
            Some(id) => self.delete_task(id),
            None => false,
        }
    }

    /// Bring a card back from the trash into To Do
    pub fn restore_task(&mut self, id: TaskId) -> bool {
        let changed = self.board.restore(id);
        if changed {
            self.after_change();
        }
        changed
    }

    pub fn restore_selected_trash(&mut self) -> bool {
        match self.selected_trash_id() {
            Some(id) => self.restore_task(id),
            None => false,
        }
    }

    /// Add an ad-hoc card directly (for the CLI and tests)
    pub fn add_task(&mut self, content: &str) -> Option<TaskId> {
        let id = self.board.add_task(content)?;
        self.after_change();
        Some(id)
    }

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::default());
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            form.content.push(c);
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.content.pop();
        }
    }

    /// Submit input form and create the card
    pub fn submit_input_form(&mut self) {
        if let Some(form) = self.input_form.take() {
            if self.add_task(&form.content).is_some() {
                // Follow the new card
                self.focus = Column::Todo;
                self.selected_todo = self.column_ids(Column::Todo).len().saturating_sub(1);
            }
            self.ui_mode = UiMode::Normal;
        }
    }

    /// Cancel input form
    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Replace the default quests from newline-separated text
    pub fn apply_defaults(&mut self, raw: &str) -> usize {
        let added = self.board.save_defaults(raw);
        log::info!(
            "Default quests updated ({} quests, {} added to today)",
            self.board.default_quests.len(),
            added
        );
        self.after_change();
        added
    }

    pub fn toggle_history(&mut self) {
        self.side_panel = match self.side_panel {
            SidePanel::History => SidePanel::Hidden,
            _ => SidePanel::History,
        };
    }

    pub fn toggle_trash(&mut self) {
        self.side_panel = match self.side_panel {
            SidePanel::Trash => SidePanel::Hidden,
            _ => SidePanel::Trash,
        };
        self.clamp_selection();
    }

    /// Mouse press: pick up the card under the cursor
    pub fn begin_drag(&mut self, x: u16, y: u16) -> bool {
        let Some((column, index)) = self.areas.card_at(x, y) else {
            return false;
        };
        let Some(&task_id) = self.column_ids(column).get(index) else {
            return false;
        };

        self.focus = column;
        self.set_selected_index(column, index);
        self.drag = Some(DragState { task_id, from: column });
        true
    }

    /// Mouse release: drop the dragged card on the column under the cursor
    pub fn end_drag(&mut self, x: u16, y: u16) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        match self.areas.column_at(x, y) {
            Some(column) => self.drop_task(drag.task_id, column),
            None => false,
        }
    }

    /// Column currently under a drag, for highlighting
    pub fn drag_target(&self, column: Column) -> bool {
        matches!(self.drag, Some(drag) if drag.from != column)
    }

    /// Roll the board over when the calendar day changes under a running session
    pub fn check_day_change(&mut self, today: NaiveDate) -> bool {
        if today == self.today {
            return false;
        }

        self.today = today;
        if let Rollover::NewDay { previous, archived } = self.board.rollover(today) {
            log::info!("Day changed to {}: archived {} tasks from {}", today, archived, previous);
            notifications::notify_new_day(archived);
            self.day_notice = Some(if archived > 0 {
                format!("{} completed tasks from {} were saved to history.", archived, previous)
            } else {
                format!("Nothing was completed on {}.", previous)
            });
            self.input_form = None;
            self.drag = None;
            self.ui_mode = UiMode::DayChanged;
        }

        self.selected_todo = 0;
        self.selected_done = 0;
        self.after_change();
        true
    }

    pub fn dismiss_day_notice(&mut self) {
        self.day_notice = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Expire the streak celebration
    pub fn tick(&mut self, now: Instant) {
        if matches!(self.celebrate_until, Some(until) if now >= until) {
            self.celebrate_until = None;
        }
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrate_until.is_some()
    }

    /// Persist the board under the fixed key
    pub fn save(&mut self) -> Result<()> {
        save_board(self.store.as_mut(), &self.board)?;
        self.needs_save = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::HistoryEntry;
    use crate::domain::TaskStatus;
    use crate::persistence::{MemoryStore, STATE_KEY};
    use std::time::Duration;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, n).unwrap()
    }

    fn create_test_app() -> AppState {
        let mut board = BoardState::with_defaults(vec!["A".into(), "B".into()]);
        board.rollover(day(1));
        AppState::new(board, Box::new(MemoryStore::new()), day(1))
    }

    fn statuses(app: &AppState) -> Vec<TaskStatus> {
        app.board.tasks.iter().map(|t| t.status).collect()
    }

    #[test]
    fn test_app_state_new() {
        let app = create_test_app();
        assert_eq!(app.focus, Column::Todo);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.selected_task_id(), Some(app.board.tasks[0].id));
        assert!(!app.needs_save);
    }

    #[test]
    fn test_move_selection() {
        let mut app = create_test_app();

        app.move_selection_down();
        assert_eq!(app.selected_todo, 1);

        app.move_selection_down();
        assert_eq!(app.selected_todo, 1);

        app.move_selection_up();
        app.move_selection_up();
        assert_eq!(app.selected_todo, 0);
    }

    #[test]
    fn test_move_selected_card_and_streak() {
        let mut app = create_test_app();

        assert!(app.move_selected_card());
        assert_eq!(statuses(&app), vec![TaskStatus::Done, TaskStatus::Todo]);
        assert_eq!(app.board.streak, 0);

        assert!(app.move_selected_card());
        assert_eq!(app.board.streak, 1);
        assert!(app.is_celebrating());
        assert!(app.needs_save);

        // Nothing left in To Do
        assert!(!app.move_selected_card());

        app.focus_column(Column::Done);
        assert!(app.move_selected_card());
        assert_eq!(app.board.streak, 0);
        assert!(!app.is_celebrating());
    }

    #[test]
    fn test_delete_and_restore() {
        let mut app = create_test_app();
        let id = app.board.tasks[1].id;

        assert!(app.delete_task(id));
        assert_eq!(app.view().trash_count, 1);
        assert!(!app.delete_task(id));

        app.toggle_trash();
        assert_eq!(app.side_panel, SidePanel::Trash);
        assert_eq!(app.selected_trash_id(), Some(id));
        assert!(app.restore_selected_trash());
        assert_eq!(app.board.task(id).unwrap().status, TaskStatus::Todo);
        assert_eq!(app.selected_trash_id(), None);
    }

    #[test]
    fn test_delete_last_selected_clamps() {
        let mut app = create_test_app();
        app.move_selection_down();
        assert!(app.delete_selected());
        assert_eq!(app.selected_todo, 0);
    }

    #[test]
    fn test_input_form_adds_task() {
        let mut app = create_test_app();
        app.start_add_task();
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        for c in "Walk!".chars() {
            app.input_form_add_char(c);
        }
        app.input_form_backspace();
        app.submit_input_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
        assert_eq!(app.board.tasks.last().unwrap().content, "Walk");
        assert_eq!(app.selected_todo, 2);
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut app = create_test_app();
        app.start_add_task();
        app.input_form_add_char(' ');
        app.submit_input_form();

        assert_eq!(app.board.tasks.len(), 2);
        assert!(!app.needs_save);
    }

    #[test]
    fn test_adding_task_revokes_todays_credit() {
        let mut app = create_test_app();
        app.move_selected_card();
        app.move_selected_card();
        assert_eq!(app.board.streak, 1);

        app.add_task("One more");
        assert_eq!(app.board.streak, 0);
        assert_eq!(app.board.last_streak_date, None);
    }

    #[test]
    fn test_apply_defaults() {
        let mut app = create_test_app();
        let added = app.apply_defaults("A\nC\n");

        assert_eq!(added, 1);
        assert_eq!(app.board.default_quests, vec!["A", "C"]);
        let names: Vec<&str> = app.board.tasks.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_mouse_drag_between_columns() {
        let mut app = create_test_app();
        app.areas.set(Column::Todo, Rect::new(0, 2, 20, 10), 0);
        app.areas.set(Column::Done, Rect::new(20, 2, 20, 10), 0);

        // Second card sits on the second row inside the border
        assert!(app.begin_drag(5, 4));
        assert_eq!(app.drag.map(|d| d.task_id), Some(app.board.tasks[1].id));
        assert!(app.drag_target(Column::Done));
        assert!(!app.drag_target(Column::Todo));

        assert!(app.end_drag(25, 6));
        assert!(app.drag.is_none());
        assert_eq!(statuses(&app), vec![TaskStatus::Todo, TaskStatus::Done]);
    }

    #[test]
    fn test_mouse_drop_same_column_or_outside_is_noop() {
        let mut app = create_test_app();
        app.areas.set(Column::Todo, Rect::new(0, 2, 20, 10), 0);
        app.areas.set(Column::Done, Rect::new(20, 2, 20, 10), 0);

        assert!(app.begin_drag(5, 3));
        assert!(!app.end_drag(6, 8));
        assert!(app.begin_drag(5, 3));
        assert!(!app.end_drag(70, 30));
        assert!(!app.begin_drag(5, 9)); // empty row below the cards
        assert_eq!(statuses(&app), vec![TaskStatus::Todo, TaskStatus::Todo]);
    }

    #[test]
    fn test_day_change_rolls_over() {
        let mut app = create_test_app();
        app.move_selected_card();
        app.move_selected_card();

        assert!(!app.check_day_change(day(1)));
        assert!(app.check_day_change(day(2)));

        assert_eq!(app.ui_mode, UiMode::DayChanged);
        assert!(app.day_notice.is_some());
        assert_eq!(
            app.board.history,
            vec![HistoryEntry {
                date: day(1),
                items: vec!["A".to_string(), "B".to_string()],
            }]
        );
        assert_eq!(statuses(&app), vec![TaskStatus::Todo, TaskStatus::Todo]);
        assert_eq!(app.board.streak, 1);

        app.dismiss_day_notice();
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_celebration_expires() {
        let mut app = create_test_app();
        app.move_selected_card();
        app.move_selected_card();
        assert!(app.is_celebrating());

        app.tick(Instant::now());
        assert!(app.is_celebrating());

        app.tick(Instant::now() + ticker::celebration_duration() + Duration::from_secs(1));
        assert!(!app.is_celebrating());
    }

    #[test]
    fn test_save_writes_store() {
        let mut app = create_test_app();
        app.add_task("Persist me");
        app.save().unwrap();

        assert!(!app.needs_save);
        let raw = app.store.get(STATE_KEY).unwrap().unwrap();
        assert!(raw.contains("Persist me"));
        assert!(raw.contains("\"lastVisit\":\"2024-07-01\""));
    }
}
