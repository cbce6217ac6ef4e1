use super::store::{Store, StoreError, STATE_KEY};
use crate::domain::{BoardState, Rollover, TaskId, HISTORY_LIMIT};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Where the in-memory board came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Nothing stored yet
    Fresh,
    /// Stored blob parsed (possibly with back-filled fields)
    Stored,
    /// Stored blob was unreadable; built-in defaults are used instead
    Malformed,
}

/// Result of loading the board at startup
#[derive(Debug, Clone)]
pub struct Loaded {
    pub board: BoardState,
    pub source: LoadSource,
    pub rollover: Rollover,
}

/// Load the board and bring it up to date for `today`.
///
/// 1. Read the blob under the fixed key
/// 2. Parse leniently, back-filling fields older saves don't have
/// 3. Fall back to defaults if the blob is malformed
/// 4. Run the daily rollover
pub fn load_and_migrate(store: &dyn Store, today: NaiveDate) -> Result<Loaded, StoreError> {
    let (mut board, source) = match store.get(STATE_KEY)? {
        None => (BoardState::default(), LoadSource::Fresh),
        Some(raw) => match parse_board(&raw) {
            Ok(board) => (board, LoadSource::Stored),
            Err(e) => {
                log::warn!("Stored board is malformed, starting from defaults: {}", e);
                (BoardState::default(), LoadSource::Malformed)
            }
        },
    };

    let repaired = normalize(&mut board);
    if repaired > 0 {
        log::warn!("Repaired {} entries in the stored board", repaired);
    }

    let rollover = board.rollover(today);
    match rollover {
        Rollover::NewDay { previous, archived } => {
            log::info!("New day {}: archived {} done tasks from {}", today, archived, previous)
        }
        Rollover::FirstVisit { seeded } => {
            log::info!("First visit on {} (seeded defaults: {})", today, seeded)
        }
        Rollover::SameDay => log::debug!("Resuming board for {}", today),
    }

    Ok(Loaded {
        board,
        source,
        rollover,
    })
}

/// Parse a stored blob. Missing `history`, `status` and other fields are
/// back-filled; only JSON that is not a board object at all is rejected.
pub fn parse_board(raw: &str) -> Result<BoardState, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(raw)?;

    let Some(object) = value.as_object() else {
        return Err(serde::de::Error::custom("stored board is not a JSON object"));
    };
    if !object.contains_key("history") {
        log::debug!("Back-filling missing history");
    }
    let missing_status = object
        .get("tasks")
        .and_then(|tasks| tasks.as_array())
        .map(|tasks| tasks.iter().filter(|t| t.get("status").is_none()).count())
        .unwrap_or(0);
    if missing_status > 0 {
        log::debug!("Back-filling status on {} tasks", missing_status);
    }

    serde_json::from_value(value)
}

/// Repair invariants a hand-edited or legacy blob may break: missing,
/// out-of-range or duplicate task ids and an over-long history.
/// Returns the number of fixes.
pub fn normalize(board: &mut BoardState) -> usize {
    let mut fixes = 0;

    let mut seen = HashSet::new();
    let mut latest = board.tasks.iter().map(|t| t.id).filter(TaskId::is_safe).max();
    for task in &mut board.tasks {
        let unusable = task.id == TaskId::default() || !task.id.is_safe();
        if unusable || !seen.insert(task.id) {
            let fresh = TaskId::next_after(latest, chrono::Local::now().timestamp_millis());
            task.id = fresh;
            seen.insert(fresh);
            latest = Some(fresh);
            fixes += 1;
        }
    }

    if board.history.len() > HISTORY_LIMIT {
        fixes += board.history.len() - HISTORY_LIMIT;
        board.history.truncate(HISTORY_LIMIT);
    }

    fixes
}

/// Serialize the board under the fixed key
pub fn save_board(store: &mut dyn Store, board: &BoardState) -> Result<(), StoreError> {
    let json = serde_json::to_string(board)?;
    store.set(STATE_KEY, &json)?;
    log::debug!("Saved board ({} tasks, trash {})", board.tasks.len(), board.trash_count());
    Ok(())
}
