use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct CountdownState {
    title: String,
    target: String,
    theme: usize,
}

#[derive(Debug, Deserialize)]
struct TimeRemaining {
    days: u64,
    hours: u64,
    minutes: u64,
    seconds: u64,
    total_milliseconds: i64,
}

#[derive(Debug, Deserialize)]
struct ThemeInfo {
    index: usize,
    name: String,
}

#[derive(Debug, Deserialize)]
struct CountdownResponse {
    state: CountdownState,
    editing: bool,
    theme: ThemeInfo,
    remaining: TimeRemaining,
    complete: bool,
    share_url: String,
}

#[derive(Debug, Deserialize)]
struct ShareResponse {
    url: String,
}

#[derive(Debug, Deserialize)]
struct QuickPreset {
    label: String,
    target: String,
    theme: usize,
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
        if let Ok(resp) = client.get(format!("{base_url}/healthz")).send().await {
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
    let child = Command::new(env!("CARGO_BIN_EXE_countdown_timer"))
        .env("PORT", port.to_string())
        .env_remove("PUBLIC_ORIGIN")
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

async fn countdown(server: &TestServer, query: &str) -> CountdownResponse {
    Client::new()
        .get(format!("{}/api/countdown?{query}", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_countdown_decodes_shared_link() {
    let server = shared_server().await;
    let body = countdown(&server, "t=Our+wedding&d=2099-06-01T14:30&th=3").await;

    assert_eq!(body.state.title, "Our wedding");
    assert_eq!(body.state.target, "2099-06-01T14:30");
    assert_eq!(body.state.theme, 3);
    assert_eq!(body.theme.index, 3);
    assert_eq!(body.theme.name, "Baby");
    assert!(!body.editing);
    assert!(!body.complete);
    assert!(body.remaining.days > 365);
    assert!(body.remaining.hours < 24 && body.remaining.minutes < 60 && body.remaining.seconds < 60);
    assert_eq!(
        body.share_url,
        format!(
            "{}/?t=Our%20wedding&d=2099-06-01T14%3A30&th=3",
            server.base_url
        )
    );
}

#[tokio::test]
async fn http_countdown_falls_back_on_malformed_params() {
    let server = shared_server().await;
    let body = countdown(&server, "d=not-a-date&th=99&th=1").await;

    assert!(body.editing);
    assert_eq!(body.state.title, "My Countdown");
    assert_eq!(body.state.theme, 0);
    assert!(body.remaining.days == 29 || body.remaining.days == 30);
    assert!(!body.complete);
}

#[tokio::test]
async fn http_countdown_rejects_loosely_formatted_dates() {
    let server = shared_server().await;

    for raw in ["2099-1-1T0:0", "%2B2099-01-01T00%3A00", "%202099-01-01T00%3A00"] {
        let body = countdown(&server, &format!("d={raw}")).await;
        assert_eq!(body.state.target.len(), "YYYY-MM-DDTHH:mm".len(), "date {raw}");
        assert!(!body.state.target.starts_with("2099"), "date {raw}");
        assert!(body.remaining.days == 29 || body.remaining.days == 30);
    }
}

#[tokio::test]
async fn http_countdown_past_target_is_complete() {
    let server = shared_server().await;
    let body = countdown(&server, "t=Done&d=2001-01-01T00:00").await;

    assert!(body.complete);
    assert_eq!(
        (
            body.remaining.days,
            body.remaining.hours,
            body.remaining.minutes,
            body.remaining.seconds,
            body.remaining.total_milliseconds
        ),
        (0, 0, 0, 0, 0)
    );
}

#[tokio::test]
async fn http_share_normalises_state() {
    let server = shared_server().await;
    let share: ShareResponse = Client::new()
        .get(format!("{}/api/share?t=Trip&d=2099-01-01T00:00&th=oops", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        share.url,
        format!("{}/?t=Trip&d=2099-01-01T00%3A00&th=0", server.base_url)
    );
}

#[tokio::test]
async fn http_index_renders_shared_countdown() {
    let server = shared_server().await;
    let response = Client::new()
        .get(format!("{}/?t=%3Cscript%3E&th=2", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let html = response.text().await.unwrap();
    assert!(html.contains("<h2 id=\"title\">&lt;script&gt;</h2>"));
    assert!(html.contains("id=\"settings\" hidden"));
    assert!(html.contains("🎆"));
}

#[tokio::test]
async fn http_stream_ends_after_complete_tick() {
    let server = shared_server().await;
    let body = tokio::time::timeout(Duration::from_secs(5), async {
        Client::new()
            .get(format!(
                "{}/api/countdown/stream?d=2001-01-01T00:00",
                server.base_url
            ))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap()
    })
    .await
    .expect("stream did not end");

    assert!(body.contains("event: tick"));
    assert!(body.contains("\"total_milliseconds\":0"));
}

#[tokio::test]
async fn http_catalog_endpoints() {
    let server = shared_server().await;
    let client = Client::new();

    let themes: Vec<ThemeInfo> = client
        .get(format!("{}/api/themes", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(themes.len(), 7);
    assert_eq!(themes[6].name, "Simple");

    let presets: Vec<QuickPreset> = client
        .get(format!("{}/api/presets", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(presets.len(), 4);
    assert_eq!(presets[0].label, "New Year's Eve");
    assert!(presets[0].target.ends_with("-01-01T00:00"));
    assert_eq!(presets[0].theme, 2);
}
