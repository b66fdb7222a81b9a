//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use route_swarm::paths::{MISSING_ASSETS, KNOWN_ROUTES, MISSING_PAGES};

/// Paths the mock target has been asked for, in arrival order.
pub type Recorded = Arc<Mutex<Vec<String>>>;

/// Start a mock of the demo app on an ephemeral port.
///
/// Known routes answer 200, anything else 404, like the app's catch-all.
pub async fn start_mock_target() -> (SocketAddr, Recorded) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let log = recorded.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let log = log.clone();
                    tokio::spawn(async move {
                        let Some(path) = read_request_path(&mut socket).await else {
                            return;
                        };
                        log.lock().unwrap().push(path.clone());

                        let (status, body) = if KNOWN_ROUTES.contains(&path) {
                            ("200 OK", format!("Hello from {}", path))
                        } else {
                            ("404 Not Found", "404 - Page not found".to_string())
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, recorded)
}

async fn read_request_path(socket: &mut tokio::net::TcpStream) -> Option<String> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 || buf.len() > 16 * 1024 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let head = String::from_utf8_lossy(&buf);
    let request_line = head.lines().next()?;
    let mut parts = request_line.split_whitespace();
    let _method = parts.next()?;
    parts.next().map(str::to_string)
}

/// True if `path` appears anywhere in the built-in catalogue.
#[allow(dead_code)]
pub fn in_catalogue(path: &str) -> bool {
    KNOWN_ROUTES.contains(path) || MISSING_PAGES.contains(path) || MISSING_ASSETS.contains(path)
}
