use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/chart/week", get(handlers::get_week_chart))
        .route("/api/customer", get(handlers::get_customer))
        .route("/api/week", get(handlers::get_week))
        .route("/api/week/series", get(handlers::get_week_series))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/calendar/:year/:month/:day", get(handlers::get_calendar_day))
        .route("/api/signup", post(handlers::signup))
        .route("/api/login", post(handlers::login))
        .with_state(state)
}
