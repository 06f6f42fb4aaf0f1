use std::collections::BTreeMap;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// On-disk format of every `created` stamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub description: String,
    #[serde(with = "timestamp")]
    pub created: NaiveDateTime,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    pub content: String,
    #[serde(with = "timestamp")]
    pub created: NaiveDateTime,
}

/// Everything the assistant remembers. Persisted as one JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantState {
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
    pub preferences: BTreeMap<String, String>,
}

impl AssistantState {
    /// Ids are dense and count-based. They stay unique only while nothing
    /// is ever removed from `tasks`.
    pub fn next_task_id(&self) -> u64 {
        self.tasks.len() as u64 + 1
    }

    /// Same scheme and caveat as [`AssistantState::next_task_id`].
    pub fn next_note_id(&self) -> u64 {
        self.notes.len() as u64 + 1
    }

    pub fn add_task(&mut self, description: String, created: NaiveDateTime) -> &Task {
        let task = Task {
            id: self.next_task_id(),
            description,
            created: whole_seconds(created),
            completed: false,
        };
        self.tasks.push(task);
        &self.tasks[self.tasks.len() - 1]
    }

    /// Marks the first task carrying `id` as completed. Returns `false` if
    /// no task matches.
    pub fn complete_task(&mut self, id: u64) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = true;
                true
            }
            None => false,
        }
    }

    pub fn add_note(&mut self, content: String, created: NaiveDateTime) -> &Note {
        let note = Note {
            id: self.next_note_id(),
            content,
            created: whole_seconds(created),
        };
        self.notes.push(note);
        &self.notes[self.notes.len() - 1]
    }

    /// Last write wins.
    pub fn set_preference(&mut self, key: String, value: String) {
        self.preferences.insert(key, value);
    }

    /// Active tasks first, then completed ones, each in insertion order.
    pub fn partition_tasks(&self) -> (Vec<&Task>, Vec<&Task>) {
        self.tasks.iter().partition(|t| !t.completed)
    }
}

// Sub-second precision is not representable on disk.
fn whole_seconds(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_nanosecond(0).unwrap_or(dt)
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_ids_are_dense_from_one() {
        let mut state = AssistantState::default();
        assert_eq!(state.add_task("a".into(), at(9, 0, 0)).id, 1);
        assert_eq!(state.add_task("b".into(), at(9, 0, 1)).id, 2);
        assert_eq!(state.add_note("n".into(), at(9, 0, 2)).id, 1);
        assert_eq!(state.next_task_id(), 3);
        assert_eq!(state.next_note_id(), 2);
    }

    #[test]
    fn test_complete_task_missing_id() {
        let mut state = AssistantState::default();
        state.add_task("a".into(), at(9, 0, 0));
        assert!(!state.complete_task(7));
        assert!(!state.tasks[0].completed);
        assert!(state.complete_task(1));
        assert!(state.tasks[0].completed);
    }

    #[test]
    fn test_partition_keeps_order() {
        let mut state = AssistantState::default();
        for d in ["a", "b", "c", "d"] {
            state.add_task(d.into(), at(9, 0, 0));
        }
        state.complete_task(1);
        state.complete_task(3);
        let (active, done) = state.partition_tasks();
        let active: Vec<_> = active.iter().map(|t| t.description.as_str()).collect();
        let done: Vec<_> = done.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(active, vec!["b", "d"]);
        assert_eq!(done, vec!["a", "c"]);
    }

    #[test]
    fn test_created_is_truncated_to_seconds() {
        let mut state = AssistantState::default();
        let precise = at(10, 11, 12).with_nanosecond(123_456_789).unwrap();
        let task = state.add_task("x".into(), precise);
        assert_eq!(task.created, at(10, 11, 12));
    }

    #[test]
    fn test_serialized_shape() {
        let mut state = AssistantState::default();
        state.add_task("buy milk".into(), at(8, 5, 0));
        state.set_preference("theme".into(), "dark".into());
        let json: serde_json::Value = serde_json::to_value(&state).unwrap();
        assert_eq!(json["tasks"][0]["created"], "2024-03-09 08:05:00");
        assert_eq!(json["tasks"][0]["completed"], false);
        assert_eq!(json["preferences"]["theme"], "dark");
        assert!(json["notes"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let state: AssistantState =
            serde_json::from_str(r#"{"preferences": {"lang": "en"}}"#).unwrap();
        assert!(state.tasks.is_empty());
        assert!(state.notes.is_empty());
        assert_eq!(state.preferences.get("lang").map(String::as_str), Some("en"));
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let raw = r#"{"tasks": [{"id": 1, "description": "x", "created": "yesterday", "completed": false}]}"#;
        assert!(serde_json::from_str::<AssistantState>(raw).is_err());
    }
}
