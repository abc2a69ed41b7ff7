use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeekSummary {
    count: usize,
    avg_calories: i64,
    avg_volume: i64,
    avg_duration_minutes: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeekResponse {
    start_label: String,
    end_label: String,
    previous_week: String,
    next_week: String,
    summary: WeekSummary,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MonthGrid {
    label: String,
    leading_blanks: u32,
    days_in_month: u32,
    cells: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Workout {
    workout_date: Option<String>,
    calories: Option<f64>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

const CUSTOMERS: &str = r#"{
  "customers": [
    {
      "id": 1,
      "name": "John Doe",
      "email": "john.doe@example.com",
      "workouts": [
        { "id": 10, "workoutType": "Running", "workoutDate": "2024-02-15T07:30:00Z", "durationMinutes": 60, "calories": 500, "volume": 0 },
        { "id": 11, "workoutType": "Lifting", "workoutDate": "2024-02-13T18:00:00Z", "durationMinutes": 45, "calories": 301, "volume": 5000 },
        { "id": 12, "workoutType": "Cycling", "workoutDate": "2024-03-15T07:30:00Z", "durationMinutes": 90, "calories": 900, "volume": 0 },
        { "id": 13, "workoutType": "Rowing", "workoutDate": "not a date", "durationMinutes": 30, "calories": 250, "volume": 0 }
      ]
    }
  ]
}"#;

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn seeded_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("fit_track_http_{}_{}.json", std::process::id(), nanos));
    std::fs::write(&path, CUSTOMERS).expect("write seed data");
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/customer")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = seeded_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_fit_track"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("FIT_TRACK_CUSTOMER_ID", "1")
        .env_remove("FIT_TRACK_API_URL")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

#[tokio::test]
async fn http_week_summary_averages_in_window_workouts() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let week: WeekResponse = client
        .get(format!("{}/api/week?date=2024-02-15", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(week.start_label, "2/11/2024");
    assert_eq!(week.end_label, "2/17/2024");
    assert_eq!(week.previous_week, "2024-02-04");
    assert_eq!(week.next_week, "2024-02-18");
    assert_eq!(week.summary.count, 2);
    assert_eq!(week.summary.avg_calories, 400);
    assert_eq!(week.summary.avg_volume, 2500);
    assert_eq!(week.summary.avg_duration_minutes, 52);
}

#[tokio::test]
async fn http_week_rejects_malformed_date() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/week?date=15-02-2024", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_calendar_places_workouts_by_month() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let grid: MonthGrid = client
        .get(format!("{}/api/calendar?year=2024&month=2", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(grid.label, "February 2024");
    assert_eq!(grid.leading_blanks, 4);
    assert_eq!(grid.days_in_month, 29);
    assert_eq!(grid.cells.len(), 33);

    let matched: Vec<u64> = grid
        .cells
        .iter()
        .filter(|cell| !cell["matchedWorkout"].is_null() && cell["kind"] == "day")
        .filter_map(|cell| cell["dayNumber"].as_u64())
        .collect();
    assert_eq!(matched, vec![13, 15]);

    let workout: Workout = client
        .get(format!("{}/api/calendar/2024/2/15", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(workout.calories, Some(500.0));
    assert_eq!(workout.workout_date.as_deref(), Some("2024-02-15T07:30:00Z"));

    let empty = client
        .get(format!("{}/api/calendar/2024/2/16", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(empty.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_week_chart_is_svg() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/chart/week?date=2024-02-15&metric=calories",
            server.base_url
        ))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("image/svg+xml")
    );
    let body = response.text().await.unwrap();
    assert!(body.contains("Caloric Expenditure"));
    assert_eq!(body.matches("<circle").count(), 2);
}

#[tokio::test]
async fn http_signup_validates_and_creates() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let rejected = client
        .post(format!("{}/api/signup", server.base_url))
        .json(&serde_json::json!({
            "name": "Jane Doe",
            "email": "jane.doe@example.com",
            "password": "securePass",
            "age": "12",
            "gender": "FEMALE"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let created = client
        .post(format!("{}/api/signup", server.base_url))
        .json(&serde_json::json!({
            "name": "Jane Doe",
            "email": "jane.doe@example.com",
            "password": "securePass",
            "age": "28",
            "gender": "FEMALE"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let customer: serde_json::Value = created.json().await.unwrap();
    assert_eq!(customer["name"], "Jane Doe");
    assert!(customer["id"].as_i64().is_some_and(|id| id > 1));
}

#[tokio::test]
async fn http_login_returns_customer_id_for_matching_credentials() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let created: serde_json::Value = client
        .post(format!("{}/api/signup", server.base_url))
        .json(&serde_json::json!({
            "name": "Sam Lee",
            "email": "sam.lee@example.com",
            "password": "hunter22",
            "age": "41",
            "gender": "MALE"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let accepted = client
        .post(format!("{}/api/login", server.base_url))
        .json(&serde_json::json!({ "email": " Sam.Lee@example.com ", "password": "hunter22" }))
        .send()
        .await
        .unwrap();
    assert_eq!(accepted.status(), StatusCode::OK);
    let body: serde_json::Value = accepted.json().await.unwrap();
    assert_eq!(body["customerId"], id);

    let wrong = client
        .post(format!("{}/api/login", server.base_url))
        .json(&serde_json::json!({ "email": "sam.lee@example.com", "password": "hunter23" }))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let blank = client
        .post(format!("{}/api/login", server.base_url))
        .json(&serde_json::json!({ "email": "sam.lee@example.com", "password": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
}
