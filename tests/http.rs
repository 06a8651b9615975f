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
struct HabitBody {
    id: String,
    name: String,
    category: String,
    streak: u32,
    status: String,
}

#[derive(Debug, Deserialize)]
struct HabitsBody {
    source: String,
    habits: Vec<HabitBody>,
}

#[derive(Debug, Deserialize)]
struct HabitEnvelope {
    source: String,
    habit: HabitBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OverviewBody {
    active_habits: usize,
    completion_rate: u32,
    longest_streak: u32,
    categories: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DashboardBody {
    date: String,
    source: String,
    overview: OverviewBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsBody {
    collection_id: Option<String>,
    token_configured: bool,
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

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/settings")).send().await {
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
    let store_port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_habit_dashboard"))
        .env("PORT", port.to_string())
        .env("HABITS_API_BASE_URL", format!("http://127.0.0.1:{store_port}/v1"))
        .env("HABITS_API_TOKEN", "test-token")
        .env("HABITS_COLLECTION_ID", "test-db")
        .env("HABITS_API_TIMEOUT_SECS", "2")
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
async fn http_habits_fall_back_when_store_unreachable() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let body: HabitsBody = client
        .get(format!("{}/api/habits", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body.source, "fallback");
    assert_eq!(body.habits.len(), 5);
    assert_eq!(body.habits[0].id, "1");
    assert_eq!(body.habits[0].name, "Morning Run");
    assert_eq!(body.habits[4].status, "pending");
}

#[tokio::test]
async fn http_create_habit_returns_local_record() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "name": "Run" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: HabitEnvelope = response.json().await.unwrap();
    assert_eq!(body.source, "fallback");
    assert_eq!(body.habit.name, "Run");
    assert_eq!(body.habit.category, "Health");
    assert_eq!(body.habit.streak, 0);
    assert_eq!(body.habit.status, "pending");
    assert!(!body.habit.id.is_empty());
}

#[tokio::test]
async fn http_status_update_validates_status() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let rejected = client
        .post(format!("{}/api/habits/1/status", server.base_url))
        .json(&serde_json::json!({ "status": "skipped" }))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let body: HabitEnvelope = client
        .post(format!("{}/api/habits/1/status", server.base_url))
        .json(&serde_json::json!({ "status": "Completed" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body.source, "fallback");
    assert_eq!(body.habit.id, "1");
    assert_eq!(body.habit.status, "completed");
    assert_eq!(body.habit.streak, 1);
}

#[tokio::test]
async fn http_dashboard_summarizes_habits() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let body: DashboardBody = client
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body.source, "fallback");
    assert!(!body.date.is_empty());
    assert_eq!(body.overview.active_habits, 5);
    assert_eq!(body.overview.completion_rate, 87);
    assert_eq!(body.overview.longest_streak, 24);
    assert_eq!(body.overview.categories, 4);
}

#[tokio::test]
async fn http_settings_update_swaps_credentials() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let rejected = client
        .put(format!("{}/api/settings", server.base_url))
        .json(&serde_json::json!({ "apiToken": " ", "collectionId": "other-db" }))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let response = client
        .put(format!("{}/api/settings", server.base_url))
        .json(&serde_json::json!({ "apiToken": "new-token", "collectionId": "other-db" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let settings: SettingsBody = client
        .get(format!("{}/api/settings", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(settings.collection_id.as_deref(), Some("other-db"));
    assert!(settings.token_configured);
}
