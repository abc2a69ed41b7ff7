use crate::models::{Metric, WeekSeries, WeekSummary, Workout};
use crate::week::WeekWindow;
use chrono::{Datelike, NaiveDate};

pub fn aggregate_week(workouts: &[Workout], reference: NaiveDate) -> WeekSummary {
    let window = WeekWindow::containing(reference);

    let mut count = 0usize;
    let mut calories = 0.0;
    let mut volume = 0.0;
    let mut duration = 0.0;
    for workout in in_window(workouts, window) {
        count += 1;
        calories += workout.metric(Metric::Calories);
        volume += workout.metric(Metric::Volume);
        duration += workout.metric(Metric::Duration);
    }

    if count == 0 {
        return WeekSummary::default();
    }

    WeekSummary {
        count,
        avg_calories: floored_average(calories, count),
        avg_volume: floored_average(volume, count),
        avg_duration_minutes: floored_average(duration, count),
    }
}

/// Per-weekday `metric` for the window containing `reference`. When a day has
/// several workouts the latest one by time of day wins; equal times fall back
/// to input order. Days with no workout stay `None` so charts can skip them.
pub fn week_series(workouts: &[Workout], reference: NaiveDate, metric: Metric) -> WeekSeries {
    let window = WeekWindow::containing(reference);
    let mut timed: Vec<_> = in_window(workouts, window)
        .filter_map(|workout| workout.timestamp().map(|stamp| (stamp, workout)))
        .collect();
    timed.sort_by_key(|(stamp, _)| *stamp);

    let mut values = [None; 7];
    for (stamp, workout) in timed {
        values[stamp.weekday().num_days_from_sunday() as usize] = Some(workout.metric(metric));
    }
    WeekSeries { metric, values }
}

fn in_window(workouts: &[Workout], window: WeekWindow) -> impl Iterator<Item = &Workout> {
    workouts
        .iter()
        .filter(move |workout| workout.date().is_some_and(|date| window.contains(date)))
}

fn floored_average(sum: f64, count: usize) -> i64 {
    (sum / count as f64).floor() as i64
}
