use super::enums::TaskStatus;
use super::lenient;
use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Timestamp-derived task identifier (Unix milliseconds, bumped to stay unique)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

/// Largest id a stored board may carry (ids were JavaScript numbers)
pub const MAX_SAFE_ID: i64 = (1 << 53) - 1;

impl TaskId {
    /// Next id given the largest id in use and the current time in milliseconds.
    /// Strictly greater than `latest` while ids stay in the safe range.
    pub fn next_after(latest: Option<TaskId>, now_millis: i64) -> TaskId {
        match latest {
            Some(TaskId(last)) if last >= now_millis => TaskId(last.saturating_add(1)),
            _ => TaskId(now_millis),
        }
    }

    pub fn is_safe(&self) -> bool {
        (-MAX_SAFE_ID..=MAX_SAFE_ID).contains(&self.0)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Older saves produced ids from `Date.now() + i` and occasionally fractional
// or string tokens; all of them are accepted and truncated to an integer.
impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Float(f64),
            Text(String),
        }

        let checked = |id: TaskId| {
            if id.is_safe() {
                Ok(id)
            } else {
                Err(de::Error::custom(format!("task id {} is out of range", id)))
            }
        };
        let float_id = |value: f64| {
            if value.is_finite() && value.abs() <= MAX_SAFE_ID as f64 {
                Ok(TaskId(value.trunc() as i64))
            } else {
                Err(de::Error::custom("task id is not a finite number in range"))
            }
        };

        match RawId::deserialize(deserializer)? {
            RawId::Int(value) => checked(TaskId(value)),
            RawId::Float(value) => float_id(value),
            RawId::Text(text) => match text.trim().parse::<f64>() {
                Ok(value) => float_id(value),
                Err(_) => Err(de::Error::custom(format!("invalid task id: {:?}", text))),
            },
        }
    }
}

/// A card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: TaskId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient::status")]
    pub status: TaskStatus,
}

impl Task {
    pub fn new(id: TaskId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            status: TaskStatus::Todo,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// One archived day: the contents of every card that was done, in board order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "lenient::list")]
    pub items: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_after_uses_clock_when_ahead() {
        assert_eq!(TaskId::next_after(None, 1_000), TaskId(1_000));
        assert_eq!(TaskId::next_after(Some(TaskId(10)), 1_000), TaskId(1_000));
    }

    #[test]
    fn test_next_after_bumps_past_latest() {
        assert_eq!(TaskId::next_after(Some(TaskId(1_000)), 1_000), TaskId(1_001));
        assert_eq!(TaskId::next_after(Some(TaskId(5_000)), 1_000), TaskId(5_001));
    }

    #[test]
    fn test_task_id_accepts_legacy_shapes() {
        let ids: Vec<TaskId> = serde_json::from_str(r#"[1700000000000, 1700000000001.75, "42"]"#).unwrap();
        assert_eq!(ids, vec![TaskId(1700000000000), TaskId(1700000000001), TaskId(42)]);

        assert!(serde_json::from_str::<TaskId>(r#""abc""#).is_err());
    }

    #[test]
    fn test_task_id_outside_safe_range() {
        assert!(serde_json::from_str::<TaskId>("1e19").is_err());
        assert!(serde_json::from_str::<TaskId>("9223372036854775807").is_err());
        assert!(serde_json::from_str::<TaskId>("9007199254740991").is_ok());

        // The card survives with a placeholder id that the loader re-issues
        let task: Task = serde_json::from_str(r#"{"id": 1e19, "content": "Keep me", "status": "done"}"#).unwrap();
        assert_eq!(task.id, TaskId::default());
        assert_eq!(task.content, "Keep me");
        assert_eq!(task.status, TaskStatus::Done);
    }

    #[test]
    fn test_next_after_saturates_instead_of_overflowing() {
        assert_eq!(TaskId::next_after(Some(TaskId(i64::MAX)), 1_000), TaskId(i64::MAX));
        assert!(!TaskId(i64::MAX).is_safe());
        assert!(TaskId(MAX_SAFE_ID).is_safe());
    }

    #[test]
    fn test_null_content_loads_empty() {
        let task: Task = serde_json::from_str(r#"{"id": 9, "content": null}"#).unwrap();
        assert_eq!(task.content, "");
    }

    #[test]
    fn test_task_status_backfill() {
        let task: Task = serde_json::from_str(r#"{"id": 1, "content": "Drink Water"}"#).unwrap();
        assert_eq!(task.status, TaskStatus::Todo);

        let task: Task = serde_json::from_str(r#"{"id": 2, "content": "x", "status": null}"#).unwrap();
        assert_eq!(task.status, TaskStatus::Todo);

        let task: Task = serde_json::from_str(r#"{"id": 3, "content": "x", "status": "bogus"}"#).unwrap();
        assert_eq!(task.status, TaskStatus::Todo);

        let task: Task = serde_json::from_str(r#"{"id": 4, "content": "x", "status": "done"}"#).unwrap();
        assert_eq!(task.status, TaskStatus::Done);
    }

    #[test]
    fn test_task_serializes_browser_shape() {
        let task = Task {
            id: TaskId(7),
            content: "Plan Tomorrow".to_string(),
            status: TaskStatus::Deleted,
        };
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"id":7,"content":"Plan Tomorrow","status":"deleted"}"#);
    }
}
