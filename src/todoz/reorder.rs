//! # Reordering
//!
//! Manual ordering is driven by a "pick up X, drop it on Y" gesture. [`move_before`]
//! turns one such gesture into a new total order.
//!
//! ## Drop Semantics
//!
//! The dragged todo is spliced out first, then inserted at the index the target occupies
//! *after* that removal. The result depends on the drag direction:
//!
//! ```text
//! dragging up:    [A, B, C]  move C onto A  →  [C, A, B]   (lands before A)
//! dragging down:  [A, B, C]  move A onto C  →  [B, A, C]   (lands before C)
//! ```
//!
//! There is no "insert after the target when dragging downward" case: a todo can never be
//! dropped into the last slot by dropping it on the last todo.
//!
//! ## Normalization
//!
//! After any structural change `order` is rewritten to the dense `0..n-1` sequence, so the
//! stored `order` values always agree with vector position.

use crate::model::Todo;

/// Moves `dragged_id` to the slot currently held by `target_id`.
///
/// Returns `false` without touching `todos` when the ids are equal or either is missing.
pub fn move_before(todos: &mut Vec<Todo>, dragged_id: &str, target_id: &str) -> bool {
    if dragged_id == target_id {
        return false;
    }
    let Some(from) = todos.iter().position(|t| t.id == dragged_id) else {
        return false;
    };
    if !todos.iter().any(|t| t.id == target_id) {
        return false;
    }

    let dragged = todos.remove(from);
    // Both ids were present and differ, so the target survives the removal.
    let to = todos
        .iter()
        .position(|t| t.id == target_id)
        .unwrap_or(todos.len());
    todos.insert(to, dragged);

    normalize_order(todos);
    true
}

/// Rewrites `order` so it equals each todo's position.
pub fn normalize_order(todos: &mut [Todo]) {
    for (position, todo) in todos.iter_mut().enumerate() {
        todo.order = position as i64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(ids: &[&str]) -> Vec<Todo> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| Todo {
                id: id.to_string(),
                title: id.to_uppercase(),
                description: String::new(),
                completed: false,
                order: i as i64,
            })
            .collect()
    }

    fn ids(todos: &[Todo]) -> Vec<&str> {
        todos.iter().map(|t| t.id.as_str()).collect()
    }

    fn orders(todos: &[Todo]) -> Vec<i64> {
        todos.iter().map(|t| t.order).collect()
    }

    #[test]
    fn test_dragging_down_lands_before_target() {
        let mut todos = list(&["a", "b", "c"]);
        assert!(move_before(&mut todos, "a", "c"));
        assert_eq!(ids(&todos), vec!["b", "a", "c"]);
        assert_eq!(orders(&todos), vec![0, 1, 2]);
    }

    #[test]
    fn test_dragging_down_onto_next_neighbour_is_a_no_op_in_effect() {
        // Post-removal the target sits where the dragged todo was.
        let mut todos = list(&["a", "b", "c"]);
        assert!(move_before(&mut todos, "a", "b"));
        assert_eq!(ids(&todos), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_dragging_up_lands_before_target() {
        let mut todos = list(&["a", "b", "c", "d"]);
        assert!(move_before(&mut todos, "d", "b"));
        assert_eq!(ids(&todos), vec!["a", "d", "b", "c"]);
        assert_eq!(orders(&todos), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_cannot_reach_last_slot_by_dropping_on_last() {
        let mut todos = list(&["a", "b", "c"]);
        move_before(&mut todos, "a", "c");
        assert_eq!(todos.last().map(|t| t.id.as_str()), Some("c"));
    }

    #[test]
    fn test_same_id_is_a_no_op() {
        let mut todos = list(&["a", "b"]);
        todos[1].order = 9;
        let before = todos.clone();
        assert!(!move_before(&mut todos, "b", "b"));
        assert_eq!(todos, before);
    }

    #[test]
    fn test_missing_ids_are_no_ops() {
        let mut todos = list(&["a", "b"]);
        todos[0].order = 5;
        let before = todos.clone();
        assert!(!move_before(&mut todos, "zz", "a"));
        assert!(!move_before(&mut todos, "a", "zz"));
        assert_eq!(todos, before);
    }

    #[test]
    fn test_normalize_rewrites_sparse_orders() {
        let mut todos = list(&["a", "b", "c"]);
        todos[0].order = -4;
        todos[1].order = 10;
        todos[2].order = 10;
        normalize_order(&mut todos);
        assert_eq!(orders(&todos), vec![0, 1, 2]);
    }
}
