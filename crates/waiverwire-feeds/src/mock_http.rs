// Minimal canned-response HTTP server for client tests.
//
// Each connection serves exactly one request and is closed afterwards, so
// reqwest opens a fresh connection per call. Routes match on request-target
// prefix, first match wins; anything else gets a 404.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub(crate) struct Route {
    pub prefix: &'static str,
    pub status: u16,
    pub body: String,
}

pub(crate) fn route(prefix: &'static str, status: u16, body: impl Into<String>) -> Route {
    Route {
        prefix,
        status,
        body: body.into(),
    }
}

pub(crate) struct MockServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    /// Request-targets received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

pub(crate) async fn serve(routes: Vec<Route>) -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let log = Arc::clone(&log);
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                let mut raw = Vec::new();
                let mut buf = [0u8; 4096];
                loop {
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    raw.extend_from_slice(&buf[..n]);
                    if raw.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }

                let head = String::from_utf8_lossy(&raw).to_string();
                let target = head
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();
                log.lock().unwrap().push(target.clone());

                let (status, body) = routes
                    .iter()
                    .find(|r| target.starts_with(r.prefix))
                    .map(|r| (r.status, r.body.clone()))
                    .unwrap_or((404, "{}".to_string()));

                let response = format!(
                    "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    reason(status),
                    body.len(),
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.flush().await;
                let _ = socket.shutdown().await;
            });
        }
    });

    MockServer {
        base_url: format!("http://{addr}"),
        requests,
    }
}
