use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Sunday-through-Saturday span containing a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekWindow {
    pub fn containing(reference: NaiveDate) -> Self {
        let start = week_start(reference);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The seven days of the window, Sunday first.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..7).map(move |offset| self.start + Duration::days(offset))
    }

    pub fn previous(&self) -> Self {
        Self::containing(self.start - Duration::days(7))
    }

    pub fn next(&self) -> Self {
        Self::containing(self.start + Duration::days(7))
    }

    pub fn labels(&self) -> (String, String) {
        (date_label(self.start), date_label(self.end))
    }
}

pub fn is_in_week(date: NaiveDate, reference: NaiveDate) -> bool {
    WeekWindow::containing(reference).contains(date)
}

pub fn week_bounds(reference: NaiveDate) -> (String, String) {
    WeekWindow::containing(reference).labels()
}

/// Parses the date strings the customer API sends for workouts.
///
/// Timestamps with an offset keep the calendar day of that offset rather than
/// converting to local time. Returns `None` for anything unrecognised.
pub fn parse_workout_date(raw: &str) -> Option<NaiveDate> {
    parse_workout_timestamp(raw).map(|stamp| stamp.date())
}

/// Wall-clock time of a workout in its own offset. A bare date is midnight.
pub fn parse_workout_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.naive_local());
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(stamp);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

pub(crate) fn date_label(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}
