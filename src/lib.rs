pub mod account;
pub mod app;
pub mod calendar;
pub mod chart;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod source;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod week;

pub use app::router;
pub use calendar::{build_month, CalendarCell, MonthGrid};
pub use config::Config;
pub use models::{Customer, Metric, WeekSummary, Workout};
pub use state::AppState;
pub use stats::aggregate_week;
pub use week::{is_in_week, week_bounds, WeekWindow};
