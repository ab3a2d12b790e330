use rusqlite::{params, Connection};

use crate::error::SprintboardError;
use crate::models::Project;

pub fn create_project(
    conn: &Connection,
    id: &str,
    title: &str,
    description: Option<&str>,
    end_goal: Option<&str>,
) -> Result<Project, SprintboardError> {
    conn.execute(
        "INSERT INTO projects (id, title, description, end_goal) VALUES (?1, ?2, ?3, ?4)",
        params![id, title, description, end_goal],
    )?;
    get_project_by_id(conn, id)
}

pub fn get_project_by_id(conn: &Connection, id: &str) -> Result<Project, SprintboardError> {
    conn.query_row(
        "SELECT id, title, description, end_goal, created_at, updated_at
         FROM projects WHERE id = ?1",
        params![id],
        row_to_project,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => SprintboardError::project_not_found(id),
        _ => SprintboardError::from(e),
    })
}

/// Resolve a project by ID prefix.
pub fn resolve_project(conn: &Connection, reference: &str) -> Result<Project, SprintboardError> {
    if let Ok(project) = get_project_by_id(conn, reference) {
        return Ok(project);
    }

    let mut stmt = conn.prepare(
        "SELECT id, title, description, end_goal, created_at, updated_at
         FROM projects WHERE id LIKE ?1",
    )?;
    let prefix = format!("{reference}%");
    let projects: Vec<Project> = stmt
        .query_map(params![prefix], row_to_project)?
        .collect::<Result<Vec<_>, _>>()?;

    match projects.len() {
        0 => Err(SprintboardError::project_not_found(reference)),
        1 => Ok(projects.into_iter().next().unwrap()),
        _ => {
            let candidates: Vec<String> = projects
                .iter()
                .map(|p| format!("{} ({})", p.title, p.id))
                .collect();
            Err(SprintboardError::ambiguous_ref(reference, &candidates))
        }
    }
}

pub fn list_projects(conn: &Connection) -> Result<Vec<Project>, SprintboardError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, description, end_goal, created_at, updated_at
         FROM projects ORDER BY created_at ASC, id ASC",
    )?;
    let projects = stmt
        .query_map([], row_to_project)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(projects)
}

/// Delete a project. Sprints and burndown points cascade; tasks linked via
/// the project's sprints are removed explicitly.
pub fn delete_project(conn: &Connection, id: &str) -> Result<(), SprintboardError> {
    get_project_by_id(conn, id)?;
    conn.execute(
        "DELETE FROM tasks WHERE project_id = ?1
         OR sprint_id IN (SELECT id FROM sprints WHERE project_id = ?1)",
        params![id],
    )?;
    conn.execute("DELETE FROM projects WHERE id = ?1", params![id])?;
    Ok(())
}

fn row_to_project(row: &rusqlite::Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        end_goal: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
