use rusqlite::{params, Connection};

use crate::error::SprintboardError;
use crate::models::{Priority, Task, TaskStatus, BACKLOG_SPRINT};

const TASK_COLUMNS: &str = "id, sprint_id, project_id, title, description, status,
                assigned_to, priority, story_points, created_at, updated_at";

#[allow(clippy::too_many_arguments)]
pub fn create_task(
    conn: &Connection,
    id: &str,
    sprint_id: &str,
    project_id: Option<&str>,
    title: &str,
    description: Option<&str>,
    status: &TaskStatus,
    assigned_to: Option<&str>,
    priority: Option<Priority>,
    story_points: Option<i64>,
) -> Result<Task, SprintboardError> {
    conn.execute(
        "INSERT INTO tasks (id, sprint_id, project_id, title, description, status,
                            assigned_to, priority, story_points)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            id,
            sprint_id,
            project_id,
            title,
            description,
            status.as_str(),
            assigned_to,
            priority.map(|p| p.as_str()),
            story_points
        ],
    )?;
    get_task_by_id(conn, id)
}

pub fn get_task_by_id(conn: &Connection, id: &str) -> Result<Task, SprintboardError> {
    conn.query_row(
        &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
        params![id],
        row_to_task,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => SprintboardError::task_not_found(id),
        _ => SprintboardError::from(e),
    })
}

/// Resolve a task by ID prefix.
pub fn resolve_task(conn: &Connection, reference: &str) -> Result<Task, SprintboardError> {
    if let Ok(task) = get_task_by_id(conn, reference) {
        return Ok(task);
    }

    let mut stmt =
        conn.prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id LIKE ?1"))?;
    let prefix = format!("{reference}%");
    let tasks: Vec<Task> = stmt
        .query_map(params![prefix], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;

    match tasks.len() {
        0 => Err(SprintboardError::task_not_found(reference)),
        1 => Ok(tasks.into_iter().next().unwrap()),
        _ => {
            let candidates: Vec<String> = tasks
                .iter()
                .map(|t| format!("{} ({})", t.title, t.id))
                .collect();
            Err(SprintboardError::ambiguous_ref(reference, &candidates))
        }
    }
}

/// Tasks of a sprint in creation order, which is also board insertion order.
pub fn list_tasks_by_sprint(
    conn: &Connection,
    sprint_id: &str,
) -> Result<Vec<Task>, SprintboardError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE sprint_id = ?1 ORDER BY created_at ASC, rowid ASC"
    ))?;
    let tasks = stmt
        .query_map(params![sprint_id], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tasks)
}

/// Backlog tasks of a project: the explicit backlog sprint, plus
/// backlog-status tasks linked straight to the project id.
pub fn list_backlog_tasks(
    conn: &Connection,
    project_id: &str,
) -> Result<Vec<Task>, SprintboardError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks
         WHERE (sprint_id = ?1 AND (project_id = ?2 OR project_id IS NULL))
            OR (status = 'backlog' AND sprint_id = ?2)
         ORDER BY created_at ASC, rowid ASC"
    ))?;
    let tasks = stmt
        .query_map(params![BACKLOG_SPRINT, project_id], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tasks)
}

pub fn update_task_status(
    conn: &Connection,
    id: &str,
    status: &TaskStatus,
) -> Result<Task, SprintboardError> {
    get_task_by_id(conn, id)?;
    conn.execute(
        "UPDATE tasks SET status = ?1, updated_at = datetime('now') WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    get_task_by_id(conn, id)
}

/// Move a task into a sprint (or back to the backlog), setting its status in
/// the same write.
pub fn move_task_to_sprint(
    conn: &Connection,
    id: &str,
    sprint_id: &str,
    status: &TaskStatus,
) -> Result<Task, SprintboardError> {
    get_task_by_id(conn, id)?;
    conn.execute(
        "UPDATE tasks SET sprint_id = ?1, status = ?2, updated_at = datetime('now')
         WHERE id = ?3",
        params![sprint_id, status.as_str(), id],
    )?;
    get_task_by_id(conn, id)
}

/// Field-level edit. `None` fields are left untouched.
#[derive(Debug, Default, Clone)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<String>,
    pub priority: Option<Priority>,
    pub story_points: Option<i64>,
}

pub fn update_task(
    conn: &Connection,
    id: &str,
    patch: &TaskPatch,
) -> Result<Task, SprintboardError> {
    let existing = get_task_by_id(conn, id)?;
    conn.execute(
        "UPDATE tasks SET title = ?1, description = ?2, status = ?3, assigned_to = ?4,
                          priority = ?5, story_points = ?6, updated_at = datetime('now')
         WHERE id = ?7",
        params![
            patch.title.as_deref().unwrap_or(&existing.title),
            patch.description.as_deref().or(existing.description.as_deref()),
            patch
                .status
                .as_ref()
                .unwrap_or(&existing.status)
                .as_str(),
            patch.assigned_to.as_deref().or(existing.assigned_to.as_deref()),
            patch
                .priority
                .or(existing.priority)
                .map(|p| p.as_str()),
            patch.story_points.or(existing.story_points),
            id
        ],
    )?;
    get_task_by_id(conn, id)
}

pub fn delete_task(conn: &Connection, id: &str) -> Result<(), SprintboardError> {
    get_task_by_id(conn, id)?;
    conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
    Ok(())
}

/// Count of a sprint's non-done tasks, excluding one task (the one whose
/// update is being evaluated).
pub fn remaining_open_count(
    conn: &Connection,
    sprint_id: &str,
    exclude_task_id: &str,
) -> Result<i64, SprintboardError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM tasks
         WHERE sprint_id = ?1 AND id != ?2 AND status != 'done'",
        params![sprint_id, exclude_task_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Whether the sprint has at least one task and all of them are done.
pub fn all_tasks_done(conn: &Connection, sprint_id: &str) -> Result<bool, SprintboardError> {
    let (total, done): (i64, i64) = conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(status = 'done'), 0) FROM tasks WHERE sprint_id = ?1",
        params![sprint_id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok(total > 0 && total == done)
}

fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        sprint_id: row.get(1)?,
        project_id: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        status: TaskStatus::parse(&row.get::<_, String>(5)?),
        assigned_to: row.get(6)?,
        priority: row
            .get::<_, Option<String>>(7)?
            .as_deref()
            .and_then(Priority::from_str),
        story_points: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}
