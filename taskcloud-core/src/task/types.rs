use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Urgency level, 1 (a month out) to 4 (today). Drives font size and ring order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const MIN: Priority = Priority(1);
    pub const MAX: Priority = Priority(4);

    pub fn new(value: i64) -> Result<Self> {
        if (1..=4).contains(&value) {
            Ok(Priority(value as u8))
        } else {
            Err(Error::InvalidPriority(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All levels, most urgent first. This is the ring processing order.
    pub fn descending() -> [Priority; 4] {
        [Priority(4), Priority(3), Priority(2), Priority(1)]
    }

    /// Zero-based slot for per-priority tables.
    pub(crate) fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl TryFrom<i64> for Priority {
    type Error = Error;
    fn try_from(value: i64) -> Result<Self> {
        Priority::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> u8 {
        p.0
    }
}

/// Importance level, 1..=4. Only the renderer's styling looks at it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Importance(u8);

impl Importance {
    pub fn new(value: i64) -> Result<Self> {
        if (1..=4).contains(&value) {
            Ok(Importance(value as u8))
        } else {
            Err(Error::InvalidImportance(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All levels, most important first.
    pub fn descending() -> [Importance; 4] {
        [Importance(4), Importance(3), Importance(2), Importance(1)]
    }
}

impl TryFrom<i64> for Importance {
    type Error = Error;
    fn try_from(value: i64) -> Result<Self> {
        Importance::new(value)
    }
}

impl From<Importance> for u8 {
    fn from(i: Importance) -> u8 {
        i.0
    }
}

/// A task as stored in the persisted document: nested, children inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(rename = "urgency")]
    pub priority: Priority,
    pub importance: Importance,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub children: Vec<Task>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, priority: Priority, importance: Importance) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            priority,
            importance,
            description: String::new(),
            children: Vec::new(),
        }
    }
}

/// The whole persisted tree: `{ "root": [Task, ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDocument {
    pub root: Vec<Task>,
}

/// Editable fields of a task, as submitted by the host's edit form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(rename = "urgency")]
    pub priority: Priority,
    pub importance: Importance,
    #[serde(default)]
    pub description: String,
}

impl TaskDraft {
    /// Trims title and description; rejects a blank title.
    pub(crate) fn normalized(&self) -> Result<TaskDraft> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Error::EmptyTitle);
        }
        Ok(TaskDraft {
            title: title.to_string(),
            priority: self.priority,
            importance: self.importance,
            description: self.description.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_bounds() {
        assert!(Priority::new(0).is_err());
        assert!(Priority::new(5).is_err());
        assert_eq!(Priority::new(4).unwrap(), Priority::MAX);
        assert!(Priority::new(4).unwrap() > Priority::new(3).unwrap());
    }

    #[test]
    fn test_task_uses_urgency_field_name() {
        let json = r#"{"id":"t","title":"T","urgency":3,"importance":2,"description":"","children":[]}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority.get(), 3);
        assert_eq!(serde_json::to_string(&task).unwrap(), json);
    }

    #[test]
    fn test_out_of_range_urgency_rejected() {
        let json = r#"{"id":"t","title":"T","urgency":9,"importance":2}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn test_missing_description_and_children_default() {
        let json = r#"{"id":"t","title":"T","urgency":1,"importance":1}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.description.is_empty());
        assert!(task.children.is_empty());
    }

    #[test]
    fn test_draft_normalization() {
        let draft = TaskDraft {
            title: "  Ship it  ".to_string(),
            priority: Priority::MAX,
            importance: Importance::new(1).unwrap(),
            description: " notes ".to_string(),
        };
        let n = draft.normalized().unwrap();
        assert_eq!(n.title, "Ship it");
        assert_eq!(n.description, "notes");

        let blank = TaskDraft { title: "   ".to_string(), ..draft };
        assert!(matches!(blank.normalized(), Err(Error::EmptyTitle)));
    }
}
