use std::collections::HashMap;

use serde::Serialize;

use crate::error::SprintboardError;
use crate::models::Task;

pub const DEFAULT_COLUMNS: [&str; 3] = ["todo", "in-progress", "done"];

/// One lane of the sprint board: a status token, its display title, and the
/// ordered task ids currently in that status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    pub task_ids: Vec<String>,
}

impl Column {
    fn empty(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: display_title(id),
            task_ids: Vec::new(),
        }
    }
}

/// Derived view of a sprint's tasks. Never persisted: recomputed from the
/// task list, then optionally mutated in memory by drags and column edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub columns: HashMap<String, Column>,
    pub order: Vec<String>,
}

/// Display title for a column id: fixed labels for the defaults, otherwise
/// the token upper-cased with hyphens turned into spaces.
pub fn display_title(id: &str) -> String {
    match id {
        "todo" => "TO DO".to_string(),
        "in-progress" => "IN PROGRESS".to_string(),
        "done" => "DONE".to_string(),
        other => other.to_uppercase().replace('-', " "),
    }
}

/// Column id for a user-supplied name: lower-cased, whitespace collapsed to
/// hyphens.
pub fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Project a task list into board columns.
///
/// Seeds the three default columns, appends one column per discovered status
/// in scan order, then places every task id into the column matching its
/// status. The resulting task-id lists partition the input exactly.
pub fn derive_board(tasks: &[Task]) -> Board {
    let mut columns: HashMap<String, Column> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for id in DEFAULT_COLUMNS {
        columns.insert(id.to_string(), Column::empty(id));
        order.push(id.to_string());
    }

    for task in tasks {
        let status = task.status.as_str();
        if !columns.contains_key(status) {
            columns.insert(status.to_string(), Column::empty(status));
            order.push(status.to_string());
        }
    }

    for task in tasks {
        let status = task.status.as_str();
        match columns.get_mut(status) {
            Some(col) => col.task_ids.push(task.id.clone()),
            None => {
                // Unreachable after the discovery scan, kept as a lazy insert.
                let mut col = Column::empty(status);
                col.task_ids.push(task.id.clone());
                columns.insert(status.to_string(), col);
                order.push(status.to_string());
            }
        }
    }

    Board { columns, order }
}

impl Board {
    /// Columns in display order.
    pub fn ordered_columns(&self) -> impl Iterator<Item = &Column> {
        self.order.iter().filter_map(|id| self.columns.get(id))
    }

    /// Add an empty user column at the end of the order. The column id is the
    /// slugified name; a duplicate id is a conflict and leaves the board
    /// untouched.
    pub fn add_column(&mut self, name: &str) -> Result<String, SprintboardError> {
        let id = slugify(name);
        if id.is_empty() {
            return Err(SprintboardError::validation("Column name cannot be empty"));
        }
        if self.columns.contains_key(&id) {
            return Err(SprintboardError::column_conflict(name));
        }
        self.columns.insert(
            id.clone(),
            Column {
                id: id.clone(),
                title: name.trim().to_string(),
                task_ids: Vec::new(),
            },
        );
        self.order.push(id.clone());
        Ok(id)
    }

    /// Remove a user column. The three defaults are permanent, and a column
    /// holding tasks cannot be removed.
    pub fn remove_column(&mut self, id: &str) -> Result<(), SprintboardError> {
        if DEFAULT_COLUMNS.contains(&id) {
            return Err(SprintboardError::default_column(id));
        }
        match self.columns.get(id) {
            None => return Err(SprintboardError::validation(format!("No column '{id}'"))),
            Some(col) if !col.task_ids.is_empty() => {
                return Err(SprintboardError::column_not_empty(id))
            }
            Some(_) => {}
        }
        self.columns.remove(id);
        self.order.retain(|c| c != id);
        Ok(())
    }

    /// Column currently holding `task_id`, with its index in that column.
    pub fn locate_task(&self, task_id: &str) -> Option<(&str, usize)> {
        for id in &self.order {
            if let Some(col) = self.columns.get(id) {
                if let Some(idx) = col.task_ids.iter().position(|t| t == task_id) {
                    return Some((id.as_str(), idx));
                }
            }
        }
        None
    }
}
