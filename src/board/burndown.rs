use chrono::{Days, NaiveDate};

use crate::models::BurndownPoint;

/// Length of a project burndown series: today plus 20 subsequent days.
pub const SERIES_DAYS: u64 = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurndownAction {
    /// Story points newly committed to a sprint.
    Add,
    /// Story points completed today.
    Complete,
    /// A committed task removed (possibly after completion).
    Remove,
}

impl BurndownAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Complete => "complete",
            Self::Remove => "remove",
        }
    }
}

/// A fresh series starting at `today`: one point per day, all zeros.
pub fn default_series(today: NaiveDate) -> Vec<BurndownPoint> {
    (0..SERIES_DAYS)
        .map(|i| BurndownPoint {
            date: today + Days::new(i),
            ideal: 0,
            actual: 0,
        })
        .collect()
}

/// Apply one burndown action to a series. Pure given `today`.
///
/// `add` raises `ideal` for every point from today on; `remove` lowers it
/// (and today's `actual`, when positive) floored at zero; `complete` raises
/// today's `actual` only. Non-positive points leave the series unchanged.
pub fn update_series(
    series: &[BurndownPoint],
    points: i64,
    action: BurndownAction,
    today: NaiveDate,
) -> Vec<BurndownPoint> {
    if points <= 0 {
        return series.to_vec();
    }

    series
        .iter()
        .map(|point| {
            let mut next = point.clone();
            if point.date >= today {
                match action {
                    BurndownAction::Add => next.ideal += points,
                    BurndownAction::Remove => next.ideal = (next.ideal - points).max(0),
                    BurndownAction::Complete => {}
                }
            }
            if point.date == today {
                match action {
                    BurndownAction::Complete => next.actual += points,
                    BurndownAction::Remove if point.actual > 0 => {
                        next.actual = (next.actual - points).max(0)
                    }
                    _ => {}
                }
            }
            next
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    #[test]
    fn test_default_series_shape() {
        let series = default_series(today());
        assert_eq!(series.len(), 21);
        assert_eq!(series[0].date, today());
        assert_eq!(series[20].date, today() + Days::new(20));
        assert!(series.iter().all(|p| p.ideal == 0 && p.actual == 0));
        // Dates strictly increase.
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_add_raises_ideal_everywhere() {
        let series = update_series(&default_series(today()), 5, BurndownAction::Add, today());
        assert!(series.iter().all(|p| p.ideal == 5));
        assert!(series.iter().all(|p| p.actual == 0));
    }

    #[test]
    fn test_complete_touches_today_only() {
        let series = update_series(&default_series(today()), 5, BurndownAction::Add, today());
        let series = update_series(&series, 5, BurndownAction::Complete, today());
        assert_eq!(series[0].actual, 5);
        assert!(series[1..].iter().all(|p| p.actual == 0));
        assert!(series.iter().all(|p| p.ideal == 5));
    }

    #[test]
    fn test_add_then_remove_is_inverse() {
        let base = update_series(&default_series(today()), 3, BurndownAction::Add, today());
        let bumped = update_series(&base, 8, BurndownAction::Add, today());
        let reverted = update_series(&bumped, 8, BurndownAction::Remove, today());
        assert_eq!(reverted, base);
    }

    #[test]
    fn test_remove_floors_at_zero() {
        let series = update_series(&default_series(today()), 2, BurndownAction::Add, today());
        let series = update_series(&series, 10, BurndownAction::Remove, today());
        assert!(series.iter().all(|p| p.ideal == 0));
        assert!(series.iter().all(|p| p.actual >= 0));
    }

    #[test]
    fn test_remove_lowers_today_actual_when_positive() {
        let series = update_series(&default_series(today()), 5, BurndownAction::Add, today());
        let series = update_series(&series, 5, BurndownAction::Complete, today());
        let series = update_series(&series, 5, BurndownAction::Remove, today());
        assert_eq!(series[0].actual, 0);
        assert_eq!(series[0].ideal, 0);
    }

    #[test]
    fn test_past_points_untouched() {
        // Series generated yesterday; today's update must not reach back.
        let yesterday = today() - Days::new(1);
        let series = default_series(yesterday);
        let series = update_series(&series, 4, BurndownAction::Add, today());
        assert_eq!(series[0].ideal, 0);
        assert!(series[1..].iter().all(|p| p.ideal == 4));
    }

    #[test]
    fn test_zero_points_is_noop() {
        let base = update_series(&default_series(today()), 5, BurndownAction::Add, today());
        let same = update_series(&base, 0, BurndownAction::Complete, today());
        assert_eq!(same, base);
    }
}
