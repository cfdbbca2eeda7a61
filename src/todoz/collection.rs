//! # The Todo Collection
//!
//! [`TodoCollection`] owns the ordered list of todos and is the only thing allowed to
//! mutate it. It is pure in-memory state: persisting after a mutation is the API layer's
//! job (see `api.rs`).
//!
//! ## Invariants
//!
//! After every public method returns:
//! - the vector is sorted by `order` (ties keep their relative position);
//! - ids are unique;
//! - after a delete or move, `order` is exactly `0..n-1`.
//!
//! ## Not-found is not an error
//!
//! Operations addressed by id return `false` (or `None`) and change nothing when the id is
//! unknown, so a gesture fired from a stale view is harmless.

use crate::model::Todo;
use crate::reorder::{move_before, normalize_order};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoCollection {
    todos: Vec<Todo>,
}

impl TodoCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts decoded todos, stably sorted by `order`.
    pub fn from_todos(mut todos: Vec<Todo>) -> Self {
        todos.sort_by_key(|t| t.order);
        Self { todos }
    }

    pub fn get_all(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.todos.iter().position(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Appends a new todo after the current last one.
    ///
    /// Returns `None` when the trimmed title is empty; nothing is created.
    pub fn add(&mut self, title: &str, description: &str) -> Option<&Todo> {
        if title.trim().is_empty() {
            return None;
        }
        let order = self
            .todos
            .iter()
            .map(|t| t.order)
            .max()
            .map_or(0, |max| max.saturating_add(1));
        self.todos.push(Todo::new(title, description, order));
        self.todos.last()
    }

    /// Replaces title and description. A blank title is rejected like in [`Self::add`].
    pub fn edit(&mut self, id: &str, title: &str, description: &str) -> bool {
        if title.trim().is_empty() {
            return false;
        }
        match self.todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.title = title.trim().to_string();
                todo.description = description.trim().to_string();
                true
            }
            None => false,
        }
    }

    pub fn toggle_complete(&mut self, id: &str) -> bool {
        match self.todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.completed = !todo.completed;
                true
            }
            None => false,
        }
    }

    /// Sets the completion flag. Returns `true` only if the flag actually changed.
    pub fn set_completed(&mut self, id: &str, completed: bool) -> bool {
        match self.todos.iter_mut().find(|t| t.id == id) {
            Some(todo) if todo.completed != completed => {
                todo.completed = completed;
                true
            }
            _ => false,
        }
    }

    pub fn delete(&mut self, id: &str) -> Option<Todo> {
        let position = self.position(id)?;
        let removed = self.todos.remove(position);
        normalize_order(&mut self.todos);
        Some(removed)
    }

    /// Removes every completed todo and returns the removed ones.
    pub fn clear_completed(&mut self) -> Vec<Todo> {
        let (completed, remaining): (Vec<Todo>, Vec<Todo>) =
            self.todos.drain(..).partition(|t| t.completed);
        self.todos = remaining;
        if !completed.is_empty() {
            normalize_order(&mut self.todos);
        }
        completed
    }

    pub fn move_before(&mut self, dragged_id: &str, target_id: &str) -> bool {
        move_before(&mut self.todos, dragged_id, target_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(c: &TodoCollection) -> Vec<&str> {
        c.get_all().iter().map(|t| t.title.as_str()).collect()
    }

    fn orders(c: &TodoCollection) -> Vec<i64> {
        c.get_all().iter().map(|t| t.order).collect()
    }

    fn add(c: &mut TodoCollection, title: &str) -> String {
        c.add(title, "").unwrap().id.clone()
    }

    #[test]
    fn test_from_todos_sorts_stably_by_order() {
        let mk = |id: &str, order| Todo {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            completed: false,
            order,
        };
        let c = TodoCollection::from_todos(vec![mk("c", 2), mk("a", 0), mk("b1", 1), mk("b2", 1)]);
        assert_eq!(titles(&c), vec!["a", "b1", "b2", "c"]);
    }

    #[test]
    fn test_add_appends_with_next_order() {
        let mut c = TodoCollection::new();
        let first = c.add("  Buy milk ", " fresh ").unwrap().clone();
        assert_eq!(first.title, "Buy milk");
        assert_eq!(first.description, "fresh");
        assert_eq!(first.order, 0);
        assert!(!first.completed);

        add(&mut c, "Walk dog");
        assert_eq!(titles(&c), vec!["Buy milk", "Walk dog"]);
        assert_eq!(orders(&c), vec![0, 1]);
    }

    #[test]
    fn test_add_uses_max_order_not_length() {
        let mk = |id: &str, order| Todo {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            completed: false,
            order,
        };
        let mut c = TodoCollection::from_todos(vec![mk("a", 3), mk("b", 7)]);
        assert_eq!(c.add("c", "").unwrap().order, 8);
    }

    #[test]
    fn test_blank_titles_are_rejected() {
        let mut c = TodoCollection::new();
        assert!(c.add("   ", "desc").is_none());
        assert!(c.add("", "").is_none());
        assert!(c.is_empty());
    }

    #[test]
    fn test_edit_overwrites_text_only() {
        let mut c = TodoCollection::new();
        let id = add(&mut c, "Old");
        c.toggle_complete(&id);

        assert!(c.edit(&id, " New ", " details "));
        let todo = c.get(&id).unwrap();
        assert_eq!(todo.title, "New");
        assert_eq!(todo.description, "details");
        assert!(todo.completed);
        assert_eq!(todo.order, 0);
    }

    #[test]
    fn test_edit_with_blank_title_changes_nothing() {
        let mut c = TodoCollection::new();
        let id = add(&mut c, "Keep");
        let before = c.clone();
        assert!(!c.edit(&id, "  ", "x"));
        assert_eq!(c, before);
    }

    #[test]
    fn test_toggle_flips_back_and_forth() {
        let mut c = TodoCollection::new();
        let id = add(&mut c, "A");
        assert!(c.toggle_complete(&id));
        assert!(c.get(&id).unwrap().completed);
        assert!(c.toggle_complete(&id));
        assert!(!c.get(&id).unwrap().completed);
    }

    #[test]
    fn test_set_completed_reports_changes_only() {
        let mut c = TodoCollection::new();
        let id = add(&mut c, "A");
        assert!(!c.set_completed(&id, false));
        assert!(c.set_completed(&id, true));
        assert!(!c.set_completed(&id, true));
    }

    #[test]
    fn test_delete_renormalizes_order() {
        let mut c = TodoCollection::new();
        let a = add(&mut c, "A");
        add(&mut c, "B");
        add(&mut c, "C");

        assert_eq!(c.delete(&a).map(|t| t.title), Some("A".to_string()));
        assert_eq!(titles(&c), vec!["B", "C"]);
        assert_eq!(orders(&c), vec![0, 1]);
    }

    #[test]
    fn test_unknown_ids_leave_collection_unchanged() {
        let mut c = TodoCollection::new();
        let a = add(&mut c, "A");
        add(&mut c, "B");
        let before = c.clone();

        assert!(!c.edit("missing", "X", ""));
        assert!(!c.toggle_complete("missing"));
        assert!(c.delete("missing").is_none());
        assert!(!c.move_before("missing", &a));
        assert!(!c.move_before(&a, "missing"));
        assert_eq!(c, before);
    }

    #[test]
    fn test_clear_completed_removes_and_renormalizes() {
        let mut c = TodoCollection::new();
        let a = add(&mut c, "A");
        add(&mut c, "B");
        let cc = add(&mut c, "C");
        c.toggle_complete(&a);
        c.toggle_complete(&cc);

        let removed = c.clear_completed();
        assert_eq!(removed.len(), 2);
        assert_eq!(titles(&c), vec!["B"]);
        assert_eq!(orders(&c), vec![0]);
    }

    #[test]
    fn test_move_before_uses_post_removal_index() {
        let mut c = TodoCollection::new();
        let a = add(&mut c, "A");
        add(&mut c, "B");
        let cc = add(&mut c, "C");

        assert!(c.move_before(&a, &cc));
        assert_eq!(titles(&c), vec!["B", "A", "C"]);
        assert_eq!(orders(&c), vec![0, 1, 2]);
    }
}
