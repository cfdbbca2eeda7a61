//! View projection: which todos are visible under a [`FilterMode`].
//!
//! Everything here is read-only. Projection never reorders; the result follows the
//! collection's sequence.

use crate::model::{FilterMode, Todo};

/// Todos visible under `mode`, in collection order.
pub fn project(todos: &[Todo], mode: FilterMode) -> Vec<&Todo> {
    todos.iter().filter(|t| is_visible(t, mode)).collect()
}

pub fn is_visible(todo: &Todo, mode: FilterMode) -> bool {
    match mode {
        FilterMode::All => true,
        FilterMode::Active => !todo.completed,
        FilterMode::Completed => todo.completed,
    }
}

/// Totals for a summary line ("3 items left").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewCounts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

pub fn counts(todos: &[Todo]) -> ViewCounts {
    let completed = todos.iter().filter(|t| t.completed).count();
    ViewCounts {
        total: todos.len(),
        active: todos.len() - completed,
        completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: &str, completed: bool, order: i64) -> Todo {
        Todo {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            completed,
            order,
        }
    }

    fn sample() -> Vec<Todo> {
        vec![
            todo("a", false, 0),
            todo("b", true, 1),
            todo("c", false, 2),
            todo("d", true, 3),
        ]
    }

    fn ids(todos: Vec<&Todo>) -> Vec<&str> {
        todos.into_iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_all_returns_everything_in_order() {
        let todos = sample();
        assert_eq!(ids(project(&todos, FilterMode::All)), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_active_and_completed_split_the_list() {
        let todos = sample();
        assert_eq!(ids(project(&todos, FilterMode::Active)), vec!["a", "c"]);
        assert_eq!(ids(project(&todos, FilterMode::Completed)), vec!["b", "d"]);
    }

    #[test]
    fn test_unknown_mode_string_projects_all() {
        let todos = sample();
        let mode = "bogus".parse::<FilterMode>().unwrap();
        assert_eq!(project(&todos, mode).len(), todos.len());
    }

    #[test]
    fn test_counts_summarize_completion() {
        assert_eq!(
            counts(&sample()),
            ViewCounts {
                total: 4,
                active: 2,
                completed: 2
            }
        );
        assert_eq!(counts(&[]), ViewCounts::default());
    }
}
