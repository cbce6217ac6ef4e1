use super::enums::{Column, TaskStatus};
use super::lenient;
use super::task::{HistoryEntry, Task, TaskId};
use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Habits seeded on a fresh board
pub const DEFAULT_QUESTS: [&str; 3] = ["Drink Water", "Read 10 Pages", "Plan Tomorrow"];

/// Number of archived days kept in the history log
pub const HISTORY_LIMIT: usize = 30;

fn default_quests() -> Vec<String> {
    DEFAULT_QUESTS.iter().map(|q| q.to_string()).collect()
}

/// Null or non-list defaults fall back to the built-in quests
fn lenient_quests<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Array(_)) => lenient::list(value).map_err(de::Error::custom),
        _ => Ok(default_quests()),
    }
}

/// The persisted document: everything the board knows about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    #[serde(default, deserialize_with = "lenient::count")]
    pub streak: u32,
    #[serde(default, deserialize_with = "lenient::date")]
    pub last_visit: Option<NaiveDate>,
    /// Day the streak was last credited; guards against double credit
    #[serde(default, deserialize_with = "lenient::date")]
    pub last_streak_date: Option<NaiveDate>,
    #[serde(default = "default_quests", deserialize_with = "lenient_quests")]
    pub default_quests: Vec<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub tasks: Vec<Task>,
    /// Most recent day first; unreadable entries are dropped on load
    #[serde(default, deserialize_with = "lenient::list")]
    pub history: Vec<HistoryEntry>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            streak: 0,
            last_visit: None,
            last_streak_date: None,
            default_quests: default_quests(),
            tasks: Vec::new(),
            history: Vec::new(),
        }
    }
}

/// Completion counts over the non-deleted cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    /// Completion percentage in `0.0..=100.0` (0 for an empty board)
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.done as f64 / self.total as f64 * 100.0
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.done == self.total
    }
}

/// What a progress refresh did to the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    Unchanged,
    Credited,
    Revoked,
}

/// What the day-boundary check did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rollover {
    /// No previous visit on record; the date was stamped
    FirstVisit { seeded: bool },
    SameDay,
    /// A new day started; `archived` done cards were moved into history
    NewDay { previous: NaiveDate, archived: usize },
}

impl BoardState {
    #[cfg(test)]
    pub fn with_defaults(default_quests: Vec<String>) -> Self {
        Self {
            default_quests,
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    fn latest_id(&self) -> Option<TaskId> {
        self.tasks.iter().map(|t| t.id).filter(TaskId::is_safe).max()
    }

    fn next_id(&self) -> TaskId {
        TaskId::next_after(self.latest_id(), chrono::Local::now().timestamp_millis())
    }

    fn push_task(&mut self, content: &str) -> TaskId {
        let id = self.next_id();
        self.tasks.push(Task::new(id, content));
        id
    }

    fn seed_defaults(&mut self) {
        let quests = self.default_quests.clone();
        for quest in &quests {
            self.push_task(quest);
        }
    }

    /// Number of cards currently in the trash
    pub fn trash_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_active()).count()
    }

    /// Archive yesterday and reseed the defaults when `today` differs from the last visit
    pub fn rollover(&mut self, today: NaiveDate) -> Rollover {
        match self.last_visit {
            Some(last) if last == today => Rollover::SameDay,
            Some(last) => {
                let items: Vec<String> = self
                    .tasks
                    .iter()
                    .filter(|t| t.status == TaskStatus::Done)
                    .map(|t| t.content.clone())
                    .collect();
                let archived = items.len();

                if !items.is_empty() {
                    self.history.insert(0, HistoryEntry { date: last, items });
                    self.history.truncate(HISTORY_LIMIT);
                }

                self.tasks.clear();
                self.seed_defaults();
                self.last_visit = Some(today);

                Rollover::NewDay {
                    previous: last,
                    archived,
                }
            }
            None => {
                self.last_visit = Some(today);
                let seeded = self.tasks.is_empty();
                if seeded {
                    self.seed_defaults();
                }
                Rollover::FirstVisit { seeded }
            }
        }
    }

    pub fn progress(&self) -> Progress {
        let active = self.tasks.iter().filter(|t| t.is_active());
        let (done, total) = active.fold((0, 0), |(done, total), t| {
            (done + usize::from(t.status == TaskStatus::Done), total + 1)
        });
        Progress { done, total }
    }

    /// Recompute progress and credit or revoke today's streak.
    ///
    /// The streak is credited at most once per day. If completion drops
    /// below 100% after today's credit, the credit is taken back and can be
    /// earned again later the same day.
    pub fn update_progress(&mut self, today: NaiveDate) -> (Progress, StreakChange) {
        let progress = self.progress();
        let credited_today = self.last_streak_date == Some(today);

        let change = if progress.is_complete() {
            if credited_today {
                StreakChange::Unchanged
            } else {
                self.streak = self.streak.saturating_add(1);
                self.last_streak_date = Some(today);
                StreakChange::Credited
            }
        } else if credited_today {
            self.streak = self.streak.saturating_sub(1);
            self.last_streak_date = None;
            StreakChange::Revoked
        } else {
            StreakChange::Unchanged
        };

        (progress, change)
    }

    /// Add an ad-hoc card to the Todo column. Blank content is ignored.
    pub fn add_task(&mut self, content: &str) -> Option<TaskId> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }
        Some(self.push_task(content))
    }

    /// Move a card to the trash
    pub fn soft_delete(&mut self, id: TaskId) -> bool {
        match self.task_mut(id) {
            Some(task) if task.is_active() => {
                task.status = TaskStatus::Deleted;
                true
            }
            _ => false,
        }
    }

    /// Bring a trashed card back into the Todo column
    pub fn restore(&mut self, id: TaskId) -> bool {
        match self.task_mut(id) {
            Some(task) if task.status == TaskStatus::Deleted => {
                task.status = TaskStatus::Todo;
                true
            }
            _ => false,
        }
    }

    /// Drop a card onto a column. Same-column drops and trashed cards are no-ops.
    pub fn drop_on(&mut self, id: TaskId, column: Column) -> bool {
        let target = column.target_status();
        match self.task_mut(id) {
            Some(task) if task.is_active() && task.status != target => {
                task.status = target;
                true
            }
            _ => false,
        }
    }

    /// Default quests as newline-separated text for editing
    pub fn defaults_text(&self) -> String {
        self.default_quests.join("\n")
    }

    /// Replace the default quests and add any that are missing from today's board.
    ///
    /// Existing cards are never removed. Returns how many cards were added.
    pub fn save_defaults(&mut self, raw: &str) -> usize {
        self.default_quests = parse_defaults(raw);

        let quests = self.default_quests.clone();
        let mut added = 0;
        for quest in &quests {
            let present = self
                .tasks
                .iter()
                .any(|t| t.is_active() && t.content == *quest);
            if !present {
                self.push_task(quest);
                added += 1;
            }
        }
        added
    }
}

/// Split newline-separated defaults, trimming lines and dropping blanks
pub fn parse_defaults(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, n).unwrap()
    }

    fn board_with(quests: &[&str]) -> BoardState {
        BoardState::with_defaults(quests.iter().map(|q| q.to_string()).collect())
    }

    fn id_of(board: &BoardState, content: &str) -> TaskId {
        board.tasks.iter().find(|t| t.content == content).unwrap().id
    }

    fn contents(board: &BoardState) -> Vec<(&str, TaskStatus)> {
        board.tasks.iter().map(|t| (t.content.as_str(), t.status)).collect()
    }

    #[test]
    fn test_first_visit_seeds_defaults() {
        let mut board = board_with(&["A", "B"]);
        let outcome = board.rollover(day(1));

        assert_eq!(outcome, Rollover::FirstVisit { seeded: true });
        assert_eq!(board.last_visit, Some(day(1)));
        assert_eq!(contents(&board), vec![("A", TaskStatus::Todo), ("B", TaskStatus::Todo)]);
    }

    #[test]
    fn test_first_visit_keeps_existing_tasks() {
        let mut board = board_with(&["A"]);
        board.add_task("Carried over");
        let outcome = board.rollover(day(1));

        assert_eq!(outcome, Rollover::FirstVisit { seeded: false });
        assert_eq!(contents(&board), vec![("Carried over", TaskStatus::Todo)]);
    }

    #[test]
    fn test_same_day_is_noop() {
        let mut board = board_with(&["A"]);
        board.rollover(day(1));
        let before = board.clone();

        assert_eq!(board.rollover(day(1)), Rollover::SameDay);
        assert_eq!(board, before);
    }

    #[test]
    fn test_rollover_archives_done_in_board_order() {
        let mut board = board_with(&["A", "B", "C"]);
        board.rollover(day(1));
        board.add_task("Ad hoc");
        let c = id_of(&board, "C");
        let a = id_of(&board, "A");
        let adhoc = id_of(&board, "Ad hoc");
        board.drop_on(c, Column::Done);
        board.drop_on(a, Column::Done);
        board.drop_on(adhoc, Column::Done);
        board.soft_delete(id_of(&board, "B"));

        let outcome = board.rollover(day(2));

        assert_eq!(outcome, Rollover::NewDay { previous: day(1), archived: 3 });
        assert_eq!(
            board.history,
            vec![HistoryEntry {
                date: day(1),
                items: vec!["A".to_string(), "C".to_string(), "Ad hoc".to_string()],
            }]
        );
        assert_eq!(
            contents(&board),
            vec![("A", TaskStatus::Todo), ("B", TaskStatus::Todo), ("C", TaskStatus::Todo)]
        );
        assert_eq!(board.last_visit, Some(day(2)));
    }

    #[test]
    fn test_rollover_skips_archive_when_nothing_done() {
        let mut board = board_with(&["A"]);
        board.rollover(day(1));

        let outcome = board.rollover(day(2));

        assert_eq!(outcome, Rollover::NewDay { previous: day(1), archived: 0 });
        assert!(board.history.is_empty());
        assert_eq!(contents(&board), vec![("A", TaskStatus::Todo)]);
    }

    #[test]
    fn test_history_capped_evicting_oldest() {
        let mut board = board_with(&["A"]);
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        board.rollover(start);

        for offset in 1..=35 {
            let a = id_of(&board, "A");
            board.drop_on(a, Column::Done);
            board.rollover(start + chrono::Duration::days(offset));
        }

        assert_eq!(board.history.len(), HISTORY_LIMIT);
        // Newest first: the last archived day is the day before the final rollover
        assert_eq!(board.history[0].date, start + chrono::Duration::days(34));
        assert_eq!(board.history[HISTORY_LIMIT - 1].date, start + chrono::Duration::days(5));
    }

    #[test]
    fn test_two_day_walkthrough() {
        let mut board = board_with(&["A", "B"]);
        board.rollover(day(1));
        let (a, b) = (id_of(&board, "A"), id_of(&board, "B"));
        board.drop_on(a, Column::Done);
        board.drop_on(b, Column::Done);
        board.update_progress(day(1));

        assert_eq!(board.streak, 1);
        assert!(board.history.is_empty());

        board.rollover(day(2));
        board.update_progress(day(2));

        assert_eq!(
            board.history,
            vec![HistoryEntry {
                date: day(1),
                items: vec!["A".to_string(), "B".to_string()],
            }]
        );
        assert_eq!(contents(&board), vec![("A", TaskStatus::Todo), ("B", TaskStatus::Todo)]);
        assert_eq!(board.streak, 1);
    }

    #[test]
    fn test_streak_credited_once_per_day() {
        let mut board = board_with(&["A"]);
        board.rollover(day(1));
        board.drop_on(id_of(&board, "A"), Column::Done);

        assert_eq!(board.update_progress(day(1)).1, StreakChange::Credited);
        assert_eq!(board.update_progress(day(1)).1, StreakChange::Unchanged);
        assert_eq!(board.update_progress(day(1)).1, StreakChange::Unchanged);
        assert_eq!(board.streak, 1);
        assert_eq!(board.last_streak_date, Some(day(1)));
    }

    #[test]
    fn test_streak_revoked_and_recredited() {
        let mut board = board_with(&["A", "B"]);
        board.rollover(day(1));
        let (a, b) = (id_of(&board, "A"), id_of(&board, "B"));
        board.streak = 4;
        board.drop_on(a, Column::Done);
        board.drop_on(b, Column::Done);
        board.update_progress(day(1));
        assert_eq!(board.streak, 5);

        board.drop_on(b, Column::Todo);
        let (progress, change) = board.update_progress(day(1));
        assert_eq!(change, StreakChange::Revoked);
        assert_eq!(progress, Progress { done: 1, total: 2 });
        assert_eq!(board.streak, 4);
        assert_eq!(board.last_streak_date, None);

        board.drop_on(b, Column::Done);
        assert_eq!(board.update_progress(day(1)).1, StreakChange::Credited);
        assert_eq!(board.streak, 5);
    }

    #[test]
    fn test_streak_revoke_floors_at_zero() {
        let mut board = board_with(&["A"]);
        board.rollover(day(1));
        board.streak = 0;
        board.last_streak_date = Some(day(1));

        assert_eq!(board.update_progress(day(1)).1, StreakChange::Revoked);
        assert_eq!(board.streak, 0);
    }

    #[test]
    fn test_yesterdays_credit_not_revoked_today() {
        let mut board = board_with(&["A"]);
        board.streak = 3;
        board.last_streak_date = Some(day(1));
        board.rollover(day(1));
        board.rollover(day(2));

        assert_eq!(board.update_progress(day(2)).1, StreakChange::Unchanged);
        assert_eq!(board.streak, 3);
    }

    #[test]
    fn test_empty_board_never_credits() {
        let mut board = board_with(&[]);
        board.rollover(day(1));

        let (progress, change) = board.update_progress(day(1));
        assert_eq!(progress.total, 0);
        assert_eq!(progress.percent(), 0.0);
        assert_eq!(change, StreakChange::Unchanged);
    }

    #[test]
    fn test_deleted_excluded_from_progress_and_restored_to_todo() {
        let mut board = board_with(&["A", "B"]);
        board.rollover(day(1));
        let (a, b) = (id_of(&board, "A"), id_of(&board, "B"));
        board.drop_on(a, Column::Done);
        assert!(board.soft_delete(b));

        let (progress, change) = board.update_progress(day(1));
        assert_eq!(progress, Progress { done: 1, total: 1 });
        assert_eq!(change, StreakChange::Credited);
        assert_eq!(board.trash_count(), 1);

        assert!(board.restore(b));
        assert_eq!(board.task(b).unwrap().status, TaskStatus::Todo);
        assert_eq!(board.update_progress(day(1)).1, StreakChange::Revoked);
    }

    #[test]
    fn test_restore_deleted_done_task_goes_to_todo() {
        let mut board = board_with(&["A"]);
        board.rollover(day(1));
        let a = id_of(&board, "A");
        board.drop_on(a, Column::Done);
        board.soft_delete(a);

        assert!(board.restore(a));
        assert_eq!(board.task(a).unwrap().status, TaskStatus::Todo);
    }

    #[test]
    fn test_silent_noops() {
        let mut board = board_with(&["A"]);
        board.rollover(day(1));
        let a = id_of(&board, "A");

        assert!(!board.drop_on(a, Column::Todo));
        assert!(!board.drop_on(TaskId(-1), Column::Done));
        assert!(!board.soft_delete(TaskId(-1)));
        assert!(!board.restore(TaskId(-1)));
        assert!(!board.restore(a));

        board.soft_delete(a);
        assert!(!board.soft_delete(a));
        assert!(!board.drop_on(a, Column::Done));
        assert_eq!(board.task(a).unwrap().status, TaskStatus::Deleted);
    }

    #[test]
    fn test_add_task() {
        let mut board = board_with(&[]);
        let id = board.add_task("  Stretch  ").unwrap();
        assert_eq!(board.task(id).unwrap().content, "Stretch");
        assert_eq!(board.task(id).unwrap().status, TaskStatus::Todo);

        assert_eq!(board.add_task("   "), None);
        assert_eq!(board.tasks.len(), 1);
    }

    #[test]
    fn test_ids_unique_and_increasing() {
        let mut board = board_with(&["A", "B", "C"]);
        board.rollover(day(1));
        let id = board.add_task("D").unwrap();

        let ids: Vec<TaskId> = board.tasks.iter().map(|t| t.id).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(*ids.last().unwrap(), id);
    }

    #[test]
    fn test_save_defaults_is_additive() {
        let mut board = board_with(&["A", "B"]);
        board.rollover(day(1));
        board.add_task("Ad hoc");
        let b = id_of(&board, "B");
        board.drop_on(b, Column::Done);

        let added = board.save_defaults("  B \n\nC\nA\nC\n");

        assert_eq!(added, 1);
        assert_eq!(board.default_quests, vec!["B", "C", "A", "C"]);
        assert_eq!(
            contents(&board),
            vec![
                ("A", TaskStatus::Todo),
                ("B", TaskStatus::Done),
                ("Ad hoc", TaskStatus::Todo),
                ("C", TaskStatus::Todo),
            ]
        );
    }

    #[test]
    fn test_save_defaults_readds_trashed_default() {
        let mut board = board_with(&["A"]);
        board.rollover(day(1));
        let a = id_of(&board, "A");
        board.soft_delete(a);

        assert_eq!(board.save_defaults("A"), 1);
        assert_eq!(
            contents(&board),
            vec![("A", TaskStatus::Deleted), ("A", TaskStatus::Todo)]
        );
    }

    #[test]
    fn test_save_defaults_never_removes() {
        let mut board = board_with(&["A", "B"]);
        board.rollover(day(1));

        assert_eq!(board.save_defaults(""), 0);
        assert!(board.default_quests.is_empty());
        assert_eq!(board.tasks.len(), 2);
    }

    #[test]
    fn test_defaults_text_round_trip() {
        let board = board_with(&["Drink Water", "Read"]);
        assert_eq!(board.defaults_text(), "Drink Water\nRead");
        assert_eq!(parse_defaults(&board.defaults_text()), board.default_quests);
    }

    #[test]
    fn test_serialized_shape_is_camel_case() {
        let mut board = board_with(&["A"]);
        board.rollover(day(1));
        let value = serde_json::to_value(&board).unwrap();

        assert_eq!(value["lastVisit"], "2024-03-01");
        assert!(value["lastStreakDate"].is_null());
        assert_eq!(value["defaultQuests"][0], "A");
        assert_eq!(value["tasks"][0]["status"], "todo");
        assert!(value["history"].as_array().unwrap().is_empty());
    }
}
