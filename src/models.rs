use crate::week::{parse_workout_date, parse_workout_timestamp, WeekWindow};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<String>,
    #[serde(default)]
    pub workout_date: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
}

impl Workout {
    /// Calendar day of the workout, if its date string parses.
    pub fn date(&self) -> Option<NaiveDate> {
        self.workout_date.as_deref().and_then(parse_workout_date)
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.workout_date.as_deref().and_then(parse_workout_timestamp)
    }

    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Calories => self.calories,
            Metric::Volume => self.volume,
            Metric::Duration => self.duration_minutes,
        }
        .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default)]
    pub workouts: Vec<Workout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Calories,
    Volume,
    Duration,
}

impl Metric {
    pub fn title(self) -> &'static str {
        match self {
            Metric::Calories => "Caloric Expenditure",
            Metric::Volume => "Volume Lifted",
            Metric::Duration => "Workout Duration",
        }
    }

    pub fn axis_name(self) -> &'static str {
        match self {
            Metric::Calories => "Calories (kcal)",
            Metric::Volume => "Volume (lbs)",
            Metric::Duration => "Duration (min)",
        }
    }

    pub fn noun(self) -> &'static str {
        match self {
            Metric::Calories => "Caloric",
            Metric::Volume => "Volume",
            Metric::Duration => "Duration",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    pub count: usize,
    pub avg_calories: i64,
    pub avg_volume: i64,
    pub avg_duration_minutes: i64,
}

/// One metric per weekday of a window, Sunday first.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeekSeries {
    pub metric: Metric,
    pub values: [Option<f64>; 7],
}

impl WeekSeries {
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekResponse {
    pub window: WeekWindow,
    pub start_label: String,
    pub end_label: String,
    /// Reference dates for stepping to the neighbouring weeks.
    pub previous_week: NaiveDate,
    pub next_week: NaiveDate,
    pub summary: WeekSummary,
}

impl WeekResponse {
    pub fn new(window: WeekWindow, summary: WeekSummary) -> Self {
        let (start_label, end_label) = window.labels();
        Self {
            window,
            start_label,
            end_label,
            previous_week: window.previous().start,
            next_week: window.next().start,
            summary,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub customer_id: i64,
}

#[derive(Debug, Deserialize, Default)]
pub struct WeekQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SeriesQuery {
    pub date: Option<String>,
    #[serde(default)]
    pub metric: Metric,
}

#[derive(Debug, Deserialize, Default)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}
