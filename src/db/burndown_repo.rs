use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::board::burndown::{self, BurndownAction};
use crate::error::SprintboardError;
use crate::models::BurndownPoint;

/// Load a project's series in date order. Empty vec when none exists yet.
pub fn load_series(
    conn: &Connection,
    project_id: &str,
) -> Result<Vec<BurndownPoint>, SprintboardError> {
    let mut stmt = conn.prepare(
        "SELECT date, ideal, actual FROM burndown_points
         WHERE project_id = ?1 ORDER BY date ASC",
    )?;
    let points = stmt
        .query_map(params![project_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut series = Vec::with_capacity(points.len());
    for (date, ideal, actual) in points {
        let date = date
            .parse::<NaiveDate>()
            .map_err(|e| SprintboardError::database(format!("bad burndown date: {e}")))?;
        series.push(BurndownPoint {
            date,
            ideal,
            actual,
        });
    }
    Ok(series)
}

/// A project's series for display: the stored one, or a fresh default.
pub fn series_or_default(
    conn: &Connection,
    project_id: &str,
    today: NaiveDate,
) -> Result<Vec<BurndownPoint>, SprintboardError> {
    let series = load_series(conn, project_id)?;
    if series.is_empty() {
        return Ok(burndown::default_series(today));
    }
    Ok(series)
}

fn save_series(
    conn: &Connection,
    project_id: &str,
    series: &[BurndownPoint],
) -> Result<(), SprintboardError> {
    conn.execute(
        "DELETE FROM burndown_points WHERE project_id = ?1",
        params![project_id],
    )?;
    let mut stmt = conn.prepare(
        "INSERT INTO burndown_points (project_id, date, ideal, actual) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for point in series {
        stmt.execute(params![
            project_id,
            point.date.to_string(),
            point.ideal,
            point.actual
        ])?;
    }
    Ok(())
}

/// Apply one burndown action to a project's persisted series, synthesizing
/// the default series first when none exists. No-op for non-positive points
/// or an empty project id.
pub fn apply(
    conn: &Connection,
    project_id: &str,
    points: i64,
    action: BurndownAction,
    today: NaiveDate,
) -> Result<(), SprintboardError> {
    if project_id.is_empty() || points <= 0 {
        return Ok(());
    }
    let series = series_or_default(conn, project_id, today)?;
    let updated = burndown::update_series(&series, points, action, today);
    save_series(conn, project_id, &updated)
}
