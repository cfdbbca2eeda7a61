//! # Persistence Adapter
//!
//! Converts between the in-memory collection and the JSON snapshot kept in one
//! key-value slot.
//!
//! ## Loading is lenient
//!
//! The slot may hold anything: data written by older versions, hand-edited files, or plain
//! garbage. [`Persistence::load`] never fails:
//!
//! - Absent slot → empty list.
//! - Unreadable slot, invalid JSON, or a top-level value that is not an array → the problem
//!   is logged and an empty list is returned.
//! - Otherwise every array element becomes a well-formed [`Todo`]:
//!
//! | field         | accepted                       | fallback             |
//! |---------------|--------------------------------|----------------------|
//! | `id`          | non-empty string, number       | freshly generated    |
//! | `title`       | string (trimmed)               | `""`                 |
//! | `description` | string (trimmed)               | `""`                 |
//! | `completed`   | any value, by truthiness       | `false`              |
//! | `order`       | integer, finite float (truncated) | `0`               |
//!
//! A record whose id repeats an earlier record's id gets a fresh id, keeping ids unique.
//!
//! ## Saving is a full snapshot
//!
//! [`Persistence::save`] serializes the whole collection and hands it to the store in one
//! `set` call. There are no incremental writes.

use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, error, warn};

use crate::error::{Result, TodozError};
use crate::id::new_id;
use crate::model::Todo;
use crate::store::KeyValueStore;

/// Slot used when the configuration does not name one.
pub const DEFAULT_KEY: &str = "todos";

pub struct Persistence<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the slot and decodes it, degrading to an empty list on any failure.
    ///
    /// The returned list is in stored order; sorting by `order` is the collection's job.
    pub fn load(&self) -> Vec<Todo> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored todos, starting empty");
                return Vec::new();
            }
            Err(e) => {
                error!(key = %self.key, error = %e, "failed to read stored todos, starting empty");
                return Vec::new();
            }
        };

        match decode(&raw) {
            Ok(todos) => {
                debug!(key = %self.key, count = todos.len(), "loaded todos");
                todos
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored todos are malformed, starting empty");
                Vec::new()
            }
        }
    }

    /// Writes the full collection under the slot key.
    pub fn save(&self, todos: &[Todo]) -> Result<()> {
        let content = serde_json::to_string(todos).map_err(TodozError::Serialization)?;
        self.store.set(&self.key, &content)?;
        debug!(key = %self.key, count = todos.len(), "saved todos");
        Ok(())
    }
}

/// Decodes a raw snapshot, applying field defaults to every record.
///
/// Fails only when the text is not JSON or its top level is not an array.
pub fn decode(raw: &str) -> Result<Vec<Todo>> {
    let value: Value = serde_json::from_str(raw).map_err(TodozError::Serialization)?;
    let records = match value {
        Value::Array(records) => records,
        other => {
            return Err(TodozError::Store(format!(
                "expected a JSON array of todos, found {}",
                json_kind(&other)
            )))
        }
    };

    let mut seen = HashSet::with_capacity(records.len());
    let mut todos = Vec::with_capacity(records.len());

    for record in &records {
        let mut todo = todo_from_record(record);
        if !seen.insert(todo.id.clone()) {
            let replacement = new_id();
            warn!(id = %todo.id, replacement = %replacement, "duplicate todo id in stored data");
            todo.id = replacement;
            seen.insert(todo.id.clone());
        }
        todos.push(todo);
    }

    Ok(todos)
}

fn todo_from_record(record: &Value) -> Todo {
    let empty = Map::new();
    let fields = record.as_object().unwrap_or(&empty);

    Todo {
        id: coerce_id(fields.get("id")),
        title: coerce_text(fields.get("title")),
        description: coerce_text(fields.get("description")),
        completed: fields.get("completed").map(is_truthy).unwrap_or(false),
        order: coerce_order(fields.get("order")),
    }
}

fn coerce_id(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => new_id(),
    }
}

fn coerce_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        _ => String::new(),
    }
}

fn coerce_order(value: Option<&Value>) -> i64 {
    let Some(Value::Number(n)) = value else {
        return 0;
    };
    if let Some(i) = n.as_i64() {
        return i;
    }
    if n.as_u64().is_some() {
        return i64::MAX;
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => f.trunc() as i64,
        _ => 0,
    }
}

/// Loose truthiness for legacy `completed` values.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use serde_json::json;

    fn todo(id: &str, title: &str, completed: bool, order: i64) -> Todo {
        Todo {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            completed,
            order,
        }
    }

    #[test]
    fn test_absent_slot_loads_empty() {
        let persistence = Persistence::new(InMemoryStore::new(), DEFAULT_KEY);
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_invalid_json_loads_empty() {
        let store = InMemoryStore::with_slot(DEFAULT_KEY, "{not json");
        let persistence = Persistence::new(store, DEFAULT_KEY);
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_non_array_top_level_loads_empty() {
        let store = InMemoryStore::with_slot(DEFAULT_KEY, r#"{"id": "a"}"#);
        let persistence = Persistence::new(store, DEFAULT_KEY);
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_records() {
        let persistence = Persistence::new(InMemoryStore::new(), DEFAULT_KEY);
        let todos = vec![todo("a", "First", false, 0), todo("b", "Second", true, 1)];

        persistence.save(&todos).unwrap();
        assert_eq!(persistence.load(), todos);
        assert_eq!(persistence.store().write_count(), 1);
    }

    #[test]
    fn test_save_surfaces_store_failures() {
        let store = InMemoryStore::new();
        store.set_simulate_write_error(true);
        let persistence = Persistence::new(store, DEFAULT_KEY);

        let err = persistence.save(&[todo("a", "A", false, 0)]).unwrap_err();
        assert!(matches!(err, TodozError::Store(_)));
    }

    #[test]
    fn test_save_writes_a_json_array_under_the_key() {
        let persistence = Persistence::new(InMemoryStore::new(), "custom");
        persistence.save(&[todo("a", "A", false, 0)]).unwrap();

        let raw = persistence.store().raw("custom").unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            json!([{"id": "a", "title": "A", "description": "", "completed": false, "order": 0}])
        );
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let todos = decode(r#"[{"title": "Only a title"}]"#).unwrap();
        assert_eq!(todos.len(), 1);
        let t = &todos[0];
        assert!(!t.id.is_empty());
        assert_eq!(t.title, "Only a title");
        assert_eq!(t.description, "");
        assert!(!t.completed);
        assert_eq!(t.order, 0);
    }

    #[test]
    fn test_malformed_fields_are_coerced() {
        let raw = json!([
            {"id": "", "title": 42, "description": null, "completed": "yes", "order": "3"},
            {"id": 7, "title": "  padded  ", "completed": 0, "order": 2.9},
            {"id": "x", "completed": [], "order": -1},
        ])
        .to_string();
        let todos = decode(&raw).unwrap();

        assert!(!todos[0].id.is_empty());
        assert_eq!(todos[0].title, "");
        assert_eq!(todos[0].description, "");
        assert!(todos[0].completed);
        assert_eq!(todos[0].order, 0);

        assert_eq!(todos[1].id, "7");
        assert_eq!(todos[1].title, "padded");
        assert!(!todos[1].completed);
        assert_eq!(todos[1].order, 2);

        assert_eq!(todos[2].id, "x");
        assert!(todos[2].completed);
        assert_eq!(todos[2].order, -1);
    }

    #[test]
    fn test_non_object_records_get_all_defaults() {
        let todos = decode(r#"[null, "text"]"#).unwrap();
        assert_eq!(todos.len(), 2);
        assert_ne!(todos[0].id, todos[1].id);
        assert!(todos.iter().all(|t| t.title.is_empty() && !t.completed));
    }

    #[test]
    fn test_duplicate_ids_are_replaced() {
        let todos = decode(r#"[{"id": "same", "title": "A"}, {"id": "same", "title": "B"}]"#)
            .unwrap();
        assert_eq!(todos[0].id, "same");
        assert_ne!(todos[1].id, "same");
        assert_eq!(todos[1].title, "B");
    }

    #[test]
    fn test_keeps_stored_sequence() {
        let todos =
            decode(r#"[{"id": "b", "order": 5}, {"id": "a", "order": 1}]"#).unwrap();
        let ids: Vec<_> = todos.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
