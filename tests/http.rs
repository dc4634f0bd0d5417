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
struct Entry {
    date: String,
    score: u8,
    note: Option<String>,
    tags: Vec<String>,
    hint: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CheckInResponse {
    bucket: String,
    entry: Entry,
}

#[derive(Debug, Deserialize)]
struct Bucket {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Hint {
    text: String,
    bucket: Option<String>,
    source: String,
}

#[derive(Debug, Deserialize)]
struct HistoryItem {
    date: String,
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

fn unique_suffix() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}_{}", std::process::id(), nanos)
}

fn unique_data_path() -> String {
    let mut path = std::env::temp_dir();
    path.push(format!("mood_journal_http_{}.json", unique_suffix()));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/buckets")).send().await {
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
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_mood_journal"))
        .env("HOST", "127.0.0.1")
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .env_remove("MOOD_SEARCH_URL")
        .env_remove("OPENAI_API_KEY")
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

async fn check_in(
    client: &Client,
    server: &TestServer,
    user: &str,
    body: serde_json::Value,
) -> reqwest::Response {
    client
        .post(format!("{}/api/users/{user}/entries", server.base_url))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn entries(client: &Client, server: &TestServer, user: &str) -> Vec<Entry> {
    client
        .get(format!("{}/api/users/{user}/entries", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_same_day_check_in_overwrites() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let user = format!("upsert_{}", unique_suffix());

    let first = check_in(
        &client,
        &server,
        &user,
        serde_json::json!({ "date": "2024-01-10", "score": 3, "note": "first", "tags": ["work"] }),
    )
    .await;
    assert!(first.status().is_success());

    let second = check_in(
        &client,
        &server,
        &user,
        serde_json::json!({ "date": "2024-01-10", "score": 8, "note": "second", "tags": ["music, social"] }),
    )
    .await;
    assert!(second.status().is_success());
    let saved: CheckInResponse = second.json().await.unwrap();
    assert_eq!(saved.bucket, "good");
    assert!(saved.entry.hint.is_some_and(|hint| !hint.is_empty()));

    let stored = entries(&client, &server, &user).await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].date, "2024-01-10");
    assert_eq!(stored[0].score, 8);
    assert_eq!(stored[0].note.as_deref(), Some("second"));
    assert_eq!(stored[0].tags, vec!["music", "social"]);
}

#[tokio::test]
async fn http_classify_boundaries_and_rejections() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    for (score, expected) in [(0, "very_low"), (2, "very_low"), (3, "low"), (10, "great")] {
        let bucket: Bucket = client
            .get(format!("{}/api/classify?score={score}", server.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(bucket.id, expected, "score {score}");
    }

    for score in [-1, 11] {
        let response = client
            .get(format!("{}/api/classify?score={score}", server.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[tokio::test]
async fn http_crisis_note_returns_emergency_resources() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let hint: Hint = client
        .post(format!("{}/api/hint", server.base_url))
        .json(&serde_json::json!({ "score": 10, "note": "I want to end it all" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(hint.source, "crisis");
    assert_eq!(hint.bucket, None);
    assert!(hint.text.contains("988"));
}

#[tokio::test]
async fn http_hint_without_provider_uses_curated_quotes() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let hint: Hint = client
        .post(format!("{}/api/hint", server.base_url))
        .json(&serde_json::json!({ "score": 1 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(hint.source, "curated");
    assert_eq!(hint.bucket.as_deref(), Some("very_low"));
    assert!(hint.text.starts_with("During difficult times, remember: "));
}

#[tokio::test]
async fn http_invalid_check_ins_are_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let user = format!("invalid_{}", unique_suffix());

    let out_of_range = check_in(&client, &server, &user, serde_json::json!({ "score": 11 })).await;
    assert_eq!(out_of_range.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let future = check_in(
        &client,
        &server,
        &user,
        serde_json::json!({ "score": 5, "date": "2999-01-01" }),
    )
    .await;
    assert_eq!(future.status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert!(entries(&client, &server, &user).await.is_empty());
}

#[tokio::test]
async fn http_hint_history_filters_by_text() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let user = format!("history_{}", unique_suffix());

    for (date, note) in [("2024-02-01", "long walk by the river"), ("2024-02-02", "quiet evening")] {
        let response = check_in(
            &client,
            &server,
            &user,
            serde_json::json!({ "date": date, "score": 6, "note": note }),
        )
        .await;
        assert!(response.status().is_success());
    }

    let all: Vec<HistoryItem> = client
        .get(format!("{}/api/users/{user}/hints", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let dates: Vec<_> = all.iter().map(|item| item.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-02-02", "2024-02-01"]);

    let filtered: Vec<HistoryItem> = client
        .get(format!("{}/api/users/{user}/hints?q=RIVER", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].date, "2024-02-01");
}
