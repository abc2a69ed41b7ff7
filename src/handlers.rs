use crate::account::{LoginForm, SignupForm};
use crate::calendar::{month_grid, MonthGrid};
use crate::chart::ChartSpec;
use crate::errors::AppError;
use crate::models::{
    Customer, LoginResponse, MonthQuery, SeriesQuery, WeekQuery, WeekResponse, Workout,
};
use crate::state::AppState;
use crate::stats::{aggregate_week, week_series};
use crate::ui::render_index;
use crate::week::WeekWindow;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use chrono::{Local, NaiveDate};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let customer = state.refresh_customer().await;
    Html(render_index(&customer.name, today()))
}

pub async fn get_customer(State(state): State<AppState>) -> Json<Customer> {
    Json(state.refresh_customer().await)
}

pub async fn get_week(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<WeekResponse>, AppError> {
    let reference = reference_date(query.date.as_deref())?;
    let customer = state.refresh_customer().await;

    Ok(Json(WeekResponse::new(
        WeekWindow::containing(reference),
        aggregate_week(&customer.workouts, reference),
    )))
}

pub async fn get_week_series(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<ChartSpec>, AppError> {
    Ok(Json(weekly_chart(&state, &query).await?))
}

pub async fn get_week_chart(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let spec = weekly_chart(&state, &query).await?;
    let body = state.chart.render(&spec);
    Ok(([(header::CONTENT_TYPE, state.chart.content_type())], body))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthGrid>, AppError> {
    let month = match (query.year, query.month) {
        (Some(year), Some(month)) => first_day(year, month)?,
        (None, None) => today(),
        _ => return Err(AppError::bad_request("year and month must be given together")),
    };
    let customer = state.refresh_customer().await;
    Ok(Json(month_grid(&customer.workouts, month)))
}

pub async fn get_calendar_day(
    State(state): State<AppState>,
    Path((year, month, day)): Path<(i32, u32, u32)>,
) -> Result<Json<Workout>, AppError> {
    let first = first_day(year, month)?;
    let customer = state.refresh_customer().await;
    let grid = month_grid(&customer.workouts, first);
    grid.day(day)
        .and_then(|cell| cell.select())
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no workout on {year}-{month:02}-{day:02}")))
}

pub async fn signup(
    State(state): State<AppState>,
    Json(form): Json<SignupForm>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    let registration = form.validate()?;
    let customer = state.source.create_customer(&registration).await?;
    info!(id = ?customer.id, "account created");
    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<LoginResponse>, AppError> {
    let credentials = form.validate()?;
    let customer = state.source.login(&credentials).await?;
    let customer_id = customer
        .id
        .ok_or_else(|| AppError::bad_gateway("customer record has no id"))?;
    info!(customer_id, "logged in");
    Ok(Json(LoginResponse { customer_id }))
}

async fn weekly_chart(state: &AppState, query: &SeriesQuery) -> Result<ChartSpec, AppError> {
    let reference = reference_date(query.date.as_deref())?;
    let customer = state.refresh_customer().await;
    let series = week_series(&customer.workouts, reference, query.metric);
    Ok(ChartSpec::weekly(&series, &WeekWindow::containing(reference)))
}

fn reference_date(raw: Option<&str>) -> Result<NaiveDate, AppError> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| AppError::bad_request(format!("invalid date '{raw}', expected YYYY-MM-DD"))),
        None => Ok(today()),
    }
}

fn first_day(year: i32, month: u32) -> Result<NaiveDate, AppError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::bad_request(format!("invalid month {year}-{month}")))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
