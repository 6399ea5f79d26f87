//! Shared test utilities for integration tests
//!
//! Centralized setup for XDG directories and a minimal local HTTP server for
//! favicon downloads.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Global mutex to serialize environment variable access across all tests
static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_VARS: &[&str] = &[
    "HOME",
    "XDG_CONFIG_HOME",
    "XDG_DATA_HOME",
    "WALKER_BOOKMARKS_HOME",
];

/// Environment variable state to restore after test
struct EnvState {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            saved: ENV_VARS
                .iter()
                .map(|var| (*var, std::env::var(var).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (var, value) in self.saved {
            match value {
                Some(orig) => std::env::set_var(var, orig),
                None => std::env::remove_var(var),
            }
        }
    }
}

/// Run `f` with HOME, XDG_CONFIG_HOME and XDG_DATA_HOME pointing into `test_dir`
///
/// Layout: `<test_dir>/config`, `<test_dir>/data`, `<test_dir>/home`.
/// The original environment is restored afterwards.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let config_home = test_dir.path().join("config");
    let data_home = test_dir.path().join("data");
    let home = test_dir.path().join("home");
    for dir in [&config_home, &data_home, &home] {
        std::fs::create_dir_all(dir).unwrap();
    }

    std::env::set_var("HOME", &home);
    std::env::set_var("XDG_CONFIG_HOME", &config_home);
    std::env::set_var("XDG_DATA_HOME", &data_home);
    std::env::remove_var("WALKER_BOOKMARKS_HOME");

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    env_state.restore();

    match result {
        Ok(r) => r,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Canned response for one path of the stub server
#[derive(Clone, Debug)]
pub enum StubResponse {
    Body(Vec<u8>),
    Redirect(String),
    Status(u16),
}

/// Serve `routes` on an ephemeral localhost port until the runtime shuts down.
/// Unknown paths get a 404.
pub async fn spawn_http_stub(routes: Vec<(&str, StubResponse)>) -> SocketAddr {
    let routes: HashMap<String, StubResponse> = routes
        .into_iter()
        .map(|(path, response)| (path.to_string(), response))
        .collect();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let text = String::from_utf8_lossy(&request);
                let path = text
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();

                let (head, body) = match routes.get(&path) {
                    Some(StubResponse::Body(bytes)) => ("200 OK".to_string(), bytes.clone()),
                    Some(StubResponse::Redirect(location)) => {
                        (format!("302 Found\r\nLocation: {}", location), Vec::new())
                    }
                    Some(StubResponse::Status(code)) => (format!("{} Stub", code), Vec::new()),
                    None => ("404 Not Found".to_string(), Vec::new()),
                };
                let header = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    head,
                    body.len()
                );
                let _ = socket.write_all(header.as_bytes()).await;
                let _ = socket.write_all(&body).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}
