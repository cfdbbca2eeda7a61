//! # API Facade
//!
//! [`TodozApi`] is the single entry point for every todoz operation, whatever the UI.
//! It owns the session's state: the [`TodoCollection`], the [`Persistence`] adapter, and
//! the current [`FilterMode`].
//!
//! ## Mutation Protocol
//!
//! Every mutating method runs the same three steps before returning:
//!
//! 1. **Mutate** the collection (or do nothing if the id is unknown / input is invalid).
//! 2. **Save** a full snapshot, but only if something changed.
//! 3. **Project** the current view into [`CmdResult::listed_todos`], which is what a UI
//!    re-renders.
//!
//! Methods take `&mut self`, so one session has exactly one writer and operations cannot
//! interleave. A host that shares a session between threads must put it behind a `Mutex`.
//!
//! ## Failure Reporting
//!
//! Operations do not return `Err`. The in-memory collection is the source of truth:
//! if the save step fails, the mutation stays applied, the error is logged and stored in
//! [`CmdResult::save_error`], and an error message is attached. Calling [`TodozApi::save`]
//! later retries the write.
//!
//! ## Testing Strategy
//!
//! Collection logic is tested in `collection.rs` / `reorder.rs`. Tests here check the
//! protocol: that writes happen exactly when something changed, that results carry the
//! refreshed view, and that failures are reported instead of raised.

use tracing::{debug, error};

use crate::collection::TodoCollection;
use crate::error::{Result, TodozError};
use crate::filter::{self, ViewCounts};
use crate::index::{self, DisplayTodo, TodoSelector};
use crate::model::{FilterMode, Todo};
use crate::persist::Persistence;
use crate::store::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Todos created, changed, or removed by the operation (post-change state).
    pub affected_todos: Vec<Todo>,
    /// The refreshed view under the current filter.
    pub listed_todos: Vec<DisplayTodo>,
    pub messages: Vec<CmdMessage>,
    /// Set when the mutation was applied in memory but could not be written.
    pub save_error: Option<TodozError>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_todos(mut self, todos: Vec<DisplayTodo>) -> Self {
        self.listed_todos = todos;
        self
    }

    pub fn changed(&self) -> bool {
        !self.affected_todos.is_empty()
    }

    pub fn is_persisted(&self) -> bool {
        self.save_error.is_none()
    }
}

/// The main API facade for todoz operations.
///
/// Generic over `KeyValueStore` so tests run against `InMemoryStore`.
pub struct TodozApi<S: KeyValueStore> {
    collection: TodoCollection,
    persistence: Persistence<S>,
    filter: FilterMode,
}

impl<S: KeyValueStore> TodozApi<S> {
    /// Starts a session by loading whatever is stored under `key`.
    pub fn open(store: S, key: impl Into<String>) -> Self {
        let persistence = Persistence::new(store, key);
        let collection = TodoCollection::from_todos(persistence.load());
        Self {
            collection,
            persistence,
            filter: FilterMode::All,
        }
    }

    /// Discards in-memory state and loads the stored snapshot again.
    pub fn reload(&mut self) {
        self.collection = TodoCollection::from_todos(self.persistence.load());
    }

    pub fn store(&self) -> &S {
        self.persistence.store()
    }

    pub fn get_all(&self) -> &[Todo] {
        self.collection.get_all()
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.collection.get(id)
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter
    }

    /// Todos visible under the current filter.
    pub fn project(&self) -> Vec<&Todo> {
        filter::project(self.collection.get_all(), self.filter)
    }

    /// The visible todos, each tagged with its position in the full list.
    pub fn view(&self) -> Vec<DisplayTodo> {
        index::index_todos(self.collection.get_all())
            .into_iter()
            .filter(|dt| filter::is_visible(&dt.todo, self.filter))
            .collect()
    }

    pub fn counts(&self) -> ViewCounts {
        filter::counts(self.collection.get_all())
    }

    pub fn resolve(&self, selector: &TodoSelector) -> Result<String> {
        index::resolve(self.collection.get_all(), selector)
    }

    /// Writes the current collection, returning any store failure directly.
    pub fn save(&self) -> Result<()> {
        self.persistence.save(self.collection.get_all())
    }

    pub fn set_filter_mode(&mut self, mode: FilterMode) -> CmdResult {
        self.filter = mode;
        CmdResult::default().with_listed_todos(self.view())
    }

    pub fn add(&mut self, title: &str, description: &str) -> CmdResult {
        let mut result = CmdResult::default();
        match self.collection.add(title, description) {
            Some(todo) => {
                debug!(id = %todo.id, order = todo.order, "added todo");
                result.add_message(CmdMessage::success(format!("Added: {}", todo.title)));
                result.affected_todos.push(todo.clone());
            }
            None => {
                result.add_message(CmdMessage::warning("Title cannot be empty"));
            }
        }
        self.finish(result)
    }

    pub fn edit(&mut self, id: &str, title: &str, description: &str) -> CmdResult {
        let mut result = CmdResult::default();
        if self.collection.get(id).is_some() && title.trim().is_empty() {
            result.add_message(CmdMessage::warning("Title cannot be empty"));
        } else if self.collection.edit(id, title, description) {
            if let Some(todo) = self.collection.get(id) {
                debug!(id = %id, "edited todo");
                result.add_message(CmdMessage::success(format!("Updated: {}", todo.title)));
                result.affected_todos.push(todo.clone());
            }
        } else {
            result.add_message(not_found(id));
        }
        self.finish(result)
    }

    pub fn toggle_complete(&mut self, id: &str) -> CmdResult {
        let mut result = CmdResult::default();
        if self.collection.toggle_complete(id) {
            if let Some(todo) = self.collection.get(id) {
                debug!(id = %id, completed = todo.completed, "toggled todo");
                let verb = if todo.completed { "Completed" } else { "Reopened" };
                result.add_message(CmdMessage::success(format!("{}: {}", verb, todo.title)));
                result.affected_todos.push(todo.clone());
            }
        } else {
            result.add_message(not_found(id));
        }
        self.finish(result)
    }

    pub fn delete(&mut self, id: &str) -> CmdResult {
        let mut result = CmdResult::default();
        match self.collection.delete(id) {
            Some(todo) => {
                debug!(id = %id, remaining = self.collection.len(), "deleted todo");
                result.add_message(CmdMessage::success(format!("Deleted: {}", todo.title)));
                result.affected_todos.push(todo);
            }
            None => result.add_message(not_found(id)),
        }
        self.finish(result)
    }

    pub fn move_before(&mut self, dragged_id: &str, target_id: &str) -> CmdResult {
        let mut result = CmdResult::default();
        if self.collection.move_before(dragged_id, target_id) {
            if let Some(todo) = self.collection.get(dragged_id) {
                debug!(id = %dragged_id, target = %target_id, order = todo.order, "moved todo");
                result.add_message(CmdMessage::success(format!("Moved: {}", todo.title)));
                result.affected_todos.push(todo.clone());
            }
        } else if dragged_id == target_id {
            result.add_message(CmdMessage::info("Cannot move a todo before itself"));
        } else {
            let missing = if self.collection.get(dragged_id).is_none() {
                dragged_id
            } else {
                target_id
            };
            result.add_message(not_found(missing));
        }
        self.finish(result)
    }

    pub fn clear_completed(&mut self) -> CmdResult {
        let mut result = CmdResult::default();
        let removed = self.collection.clear_completed();
        if removed.is_empty() {
            result.add_message(CmdMessage::info("No completed todos to clear"));
        } else {
            debug!(count = removed.len(), "cleared completed todos");
            result.add_message(CmdMessage::success(format!(
                "Cleared {} completed todo{}",
                removed.len(),
                if removed.len() == 1 { "" } else { "s" }
            )));
            result.affected_todos = removed;
        }
        self.finish(result)
    }

    /// Marks every todo completed.
    pub fn complete_all(&mut self) -> CmdResult {
        let mut result = CmdResult::default();
        let ids: Vec<String> = self.get_all().iter().map(|t| t.id.clone()).collect();
        for id in ids {
            if self.collection.set_completed(&id, true) {
                if let Some(todo) = self.collection.get(&id) {
                    result.affected_todos.push(todo.clone());
                }
            }
        }
        if result.changed() {
            result.add_message(CmdMessage::success(format!(
                "Completed {} todo{}",
                result.affected_todos.len(),
                if result.affected_todos.len() == 1 { "" } else { "s" }
            )));
        } else {
            result.add_message(CmdMessage::info("Nothing left to complete"));
        }
        self.finish(result)
    }

    /// Saves when the operation changed something, then attaches the refreshed view.
    fn finish(&self, mut result: CmdResult) -> CmdResult {
        if result.changed() {
            if let Err(e) = self.save() {
                error!(key = %self.persistence.key(), error = %e, "failed to save todos");
                result.add_message(CmdMessage::error(format!("Failed to save todos: {}", e)));
                result.save_error = Some(e);
            }
        }
        result.with_listed_todos(self.view())
    }
}

fn not_found(id: &str) -> CmdMessage {
    CmdMessage::info(format!("No todo with id {}", id))
}
