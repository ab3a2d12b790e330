use rusqlite::{params, Connection};

use crate::error::SprintboardError;
use crate::models::{Sprint, SprintStatus};

pub fn create_sprint(
    conn: &Connection,
    id: &str,
    project_id: &str,
    title: &str,
    description: Option<&str>,
    start_date: &str,
    end_date: &str,
) -> Result<Sprint, SprintboardError> {
    conn.execute(
        "INSERT INTO sprints (id, project_id, title, description, start_date, end_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![id, project_id, title, description, start_date, end_date],
    )?;
    get_sprint_by_id(conn, id)
}

pub fn get_sprint_by_id(conn: &Connection, id: &str) -> Result<Sprint, SprintboardError> {
    conn.query_row(
        "SELECT id, project_id, title, description, start_date, end_date, status,
                created_at, updated_at
         FROM sprints WHERE id = ?1",
        params![id],
        row_to_sprint,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => SprintboardError::sprint_not_found(id),
        _ => SprintboardError::from(e),
    })
}

/// Resolve a sprint by ID prefix.
pub fn resolve_sprint(conn: &Connection, reference: &str) -> Result<Sprint, SprintboardError> {
    if let Ok(sprint) = get_sprint_by_id(conn, reference) {
        return Ok(sprint);
    }

    let mut stmt = conn.prepare(
        "SELECT id, project_id, title, description, start_date, end_date, status,
                created_at, updated_at
         FROM sprints WHERE id LIKE ?1",
    )?;
    let prefix = format!("{reference}%");
    let sprints: Vec<Sprint> = stmt
        .query_map(params![prefix], row_to_sprint)?
        .collect::<Result<Vec<_>, _>>()?;

    match sprints.len() {
        0 => Err(SprintboardError::sprint_not_found(reference)),
        1 => Ok(sprints.into_iter().next().unwrap()),
        _ => {
            let candidates: Vec<String> = sprints
                .iter()
                .map(|s| format!("{} ({})", s.title, s.id))
                .collect();
            Err(SprintboardError::ambiguous_ref(reference, &candidates))
        }
    }
}

pub fn list_sprints_by_project(
    conn: &Connection,
    project_id: &str,
) -> Result<Vec<Sprint>, SprintboardError> {
    let mut stmt = conn.prepare(
        "SELECT id, project_id, title, description, start_date, end_date, status,
                created_at, updated_at
         FROM sprints WHERE project_id = ?1 ORDER BY start_date ASC, created_at ASC",
    )?;
    let sprints = stmt
        .query_map(params![project_id], row_to_sprint)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(sprints)
}

/// Transition a sprint's status. Completed sprints are immutable: any further
/// transition is rejected.
pub fn update_sprint_status(
    conn: &Connection,
    id: &str,
    status: SprintStatus,
) -> Result<Sprint, SprintboardError> {
    let sprint = get_sprint_by_id(conn, id)?;
    if sprint.status == SprintStatus::Completed {
        return Err(SprintboardError::sprint_completed(id));
    }
    conn.execute(
        "UPDATE sprints SET status = ?1, updated_at = datetime('now') WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    get_sprint_by_id(conn, id)
}

pub fn delete_sprint(conn: &Connection, id: &str) -> Result<(), SprintboardError> {
    get_sprint_by_id(conn, id)?;
    conn.execute("DELETE FROM tasks WHERE sprint_id = ?1", params![id])?;
    conn.execute("DELETE FROM sprints WHERE id = ?1", params![id])?;
    Ok(())
}

fn row_to_sprint(row: &rusqlite::Row) -> rusqlite::Result<Sprint> {
    Ok(Sprint {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        start_date: row.get(4)?,
        end_date: row.get(5)?,
        status: SprintStatus::from_str(&row.get::<_, String>(6)?).unwrap_or(SprintStatus::Planned),
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}
