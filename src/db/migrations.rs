use rusqlite::Connection;

use crate::error::SprintboardError;

pub fn run_migrations(conn: &Connection) -> Result<(), SprintboardError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS projects (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT,
            end_goal TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS sprints (
            id TEXT PRIMARY KEY,
            project_id TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            description TEXT,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'planned'
                CHECK (status IN ('planned', 'in-progress', 'completed')),
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- sprint_id is not a foreign key: the 'backlog' sentinel is a valid
        -- value. status is free text to admit user-created column tokens.
        CREATE TABLE IF NOT EXISTS tasks (
            id TEXT PRIMARY KEY,
            sprint_id TEXT NOT NULL,
            project_id TEXT,
            title TEXT NOT NULL,
            description TEXT,
            status TEXT NOT NULL DEFAULT 'todo',
            assigned_to TEXT,
            priority TEXT CHECK (priority IS NULL OR priority IN ('low', 'medium', 'high')),
            story_points INTEGER,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS burndown_points (
            project_id TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            date TEXT NOT NULL,
            ideal INTEGER NOT NULL DEFAULT 0,
            actual INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (project_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_sprints_project ON sprints(project_id);
        CREATE INDEX IF NOT EXISTS idx_tasks_sprint ON tasks(sprint_id);
        CREATE INDEX IF NOT EXISTS idx_tasks_sprint_status ON tasks(sprint_id, status);
        ",
    )?;
    Ok(())
}
