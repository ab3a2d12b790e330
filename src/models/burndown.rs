use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of a project burndown series: cumulative committed (`ideal`) vs.
/// completed (`actual`) story points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurndownPoint {
    pub date: NaiveDate,
    pub ideal: i64,
    pub actual: i64,
}
