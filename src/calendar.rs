use crate::models::Workout;
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum CalendarCell {
    /// Padding before the first day so day 1 lands on its weekday column.
    Blank,
    Day {
        day_number: u32,
        is_today: bool,
        matched_workout: Option<Workout>,
    },
}

impl CalendarCell {
    /// The workout a click on this cell opens; blanks and empty days are inert.
    pub fn select(&self) -> Option<&Workout> {
        match self {
            CalendarCell::Day {
                matched_workout: Some(workout),
                ..
            } => Some(workout),
            _ => None,
        }
    }

    pub fn day_number(&self) -> Option<u32> {
        match self {
            CalendarCell::Day { day_number, .. } => Some(*day_number),
            CalendarCell::Blank => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub leading_blanks: u32,
    pub days_in_month: u32,
    pub cells: Vec<CalendarCell>,
}

impl MonthGrid {
    pub fn day(&self, day: u32) -> Option<&CalendarCell> {
        if day == 0 || day > self.days_in_month {
            return None;
        }
        self.cells.get((self.leading_blanks + day - 1) as usize)
    }
}

pub fn build_month(workouts: &[Workout], month_date: NaiveDate) -> Vec<CalendarCell> {
    build_month_at(Local::now().date_naive(), workouts, month_date)
}

pub fn build_month_at(
    today: NaiveDate,
    workouts: &[Workout],
    month_date: NaiveDate,
) -> Vec<CalendarCell> {
    let first = first_of_month(month_date);
    let day_count = days_in_month(first.year(), first.month());
    let blanks = first.weekday().num_days_from_sunday();

    // First workout per day, restricted to this month and year.
    let mut matches: Vec<Option<&Workout>> = vec![None; day_count as usize];
    for workout in workouts {
        let Some(date) = workout.date() else {
            continue;
        };
        if date.year() != first.year() || date.month() != first.month() {
            continue;
        }
        let slot = &mut matches[date.day0() as usize];
        if slot.is_none() {
            *slot = Some(workout);
        }
    }

    let mut cells = Vec::with_capacity((blanks + day_count) as usize);
    cells.extend((0..blanks).map(|_| CalendarCell::Blank));
    for (index, matched) in matches.into_iter().enumerate() {
        let date = first + Duration::days(index as i64);
        cells.push(CalendarCell::Day {
            day_number: date.day(),
            is_today: date == today,
            matched_workout: matched.cloned(),
        });
    }
    cells
}

pub fn month_grid(workouts: &[Workout], month_date: NaiveDate) -> MonthGrid {
    month_grid_at(Local::now().date_naive(), workouts, month_date)
}

pub fn month_grid_at(today: NaiveDate, workouts: &[Workout], month_date: NaiveDate) -> MonthGrid {
    let first = first_of_month(month_date);
    MonthGrid {
        year: first.year(),
        month: first.month(),
        label: first.format("%B %Y").to_string(),
        leading_blanks: first.weekday().num_days_from_sunday(),
        days_in_month: days_in_month(first.year(), first.month()),
        cells: build_month_at(today, workouts, first),
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

pub fn previous_month(date: NaiveDate) -> NaiveDate {
    first_of_month(first_of_month(date) - Duration::days(1))
}

pub fn next_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first + Duration::days(days_in_month(first.year(), first.month()) as i64)
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
