//! # Selectors
//!
//! Ids are long and opaque, so user-facing clients refer to todos with selectors:
//!
//! - `3` → the third todo in the full ordered list (1-based);
//! - `5f0c2b9e-…` → an exact id;
//! - `5f0c` → any unambiguous id prefix.
//!
//! Positions always count over the *full* list, not the filtered view. A todo keeps its
//! number whether the view shows all, active, or completed todos, so a number read off one
//! view still addresses the same todo after switching filters.

use crate::error::{Result, TodozError};
use crate::model::Todo;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoSelector {
    Position(usize),
    Id(String),
}

impl fmt::Display for TodoSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoSelector::Position(n) => write!(f, "{}", n),
            TodoSelector::Id(id) => write!(f, "\"{}\"", id),
        }
    }
}

impl FromStr for TodoSelector {
    type Err = TodozError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TodozError::Api("Empty selector".to_string()));
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            return match s.parse::<usize>() {
                Ok(n) if n > 0 => Ok(TodoSelector::Position(n)),
                _ => Err(TodozError::Api(format!("Invalid position: {}", s))),
            };
        }
        Ok(TodoSelector::Id(s.to_string()))
    }
}

/// A todo paired with its 1-based position in the full list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTodo {
    pub position: usize,
    pub todo: Todo,
}

/// Assigns display positions in collection order.
pub fn index_todos<'a, I>(todos: I) -> Vec<DisplayTodo>
where
    I: IntoIterator<Item = &'a Todo>,
{
    todos
        .into_iter()
        .enumerate()
        .map(|(i, todo)| DisplayTodo {
            position: i + 1,
            todo: todo.clone(),
        })
        .collect()
}

/// Resolves a selector to the id of exactly one todo.
pub fn resolve(todos: &[Todo], selector: &TodoSelector) -> Result<String> {
    match selector {
        TodoSelector::Position(n) => n
            .checked_sub(1)
            .and_then(|i| todos.get(i))
            .map(|t| t.id.clone())
            .ok_or_else(|| TodozError::Api(format!("Position {} not found", n))),
        TodoSelector::Id(needle) => {
            if let Some(todo) = todos.iter().find(|t| &t.id == needle) {
                return Ok(todo.id.clone());
            }
            let matches: Vec<&Todo> = todos
                .iter()
                .filter(|t| t.id.starts_with(needle.as_str()))
                .collect();
            match matches.as_slice() {
                [only] => Ok(only.id.clone()),
                [] => Err(TodozError::Api(format!("No todo matches id {}", selector))),
                _ => Err(TodozError::Api(format!(
                    "Id prefix {} is ambiguous ({} matches)",
                    selector,
                    matches.len()
                ))),
            }
        }
    }
}
