//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use api_proxy::config::{ProxyConfig, UpstreamConfig};
use api_proxy::{HttpServer, Shutdown};

/// A proxy instance running in-process for one test.
#[allow(dead_code)]
pub struct ProxyHandle {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

/// Start the proxy on an ephemeral port, pointed at the given upstreams.
#[allow(dead_code)]
pub async fn spawn_proxy(v1_url: String, v2_url: String) -> ProxyHandle {
    let mut config = ProxyConfig::default();
    config.upstreams.v1 = UpstreamConfig::new(v1_url);
    config.upstreams.v2 = UpstreamConfig::new(v2_url);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    // Let the accept loop come up before tests start firing requests.
    tokio::time::sleep(Duration::from_millis(50)).await;

    ProxyHandle {
        addr,
        shutdown,
        handle,
    }
}

/// An address nothing is listening on (connection refused).
#[allow(dead_code)]
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Start a simple mock backend that returns a fixed 200 response.
#[allow(dead_code)]
pub async fn start_mock_backend(body: &'static str) -> SocketAddr {
    start_programmable_backend(move || async move { (200, Vec::new(), body.to_string()) }).await
}

/// Start a programmable mock backend.
///
/// The closure decides status, extra headers, and body per request; it
/// may sleep to simulate a slow upstream.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, Vec<(String, String)>, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let _ = read_request(&mut socket).await;
                        let (status, headers, body) = f().await;

                        let mut response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
                            status_line(status),
                            body.len(),
                        );
                        for (name, value) in &headers {
                            response_str.push_str(&format!("{name}: {value}\r\n"));
                        }
                        response_str.push_str("\r\n");
                        response_str.push_str(&body);

                        let _ = socket.write_all(response_str.as_bytes()).await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a backend that captures the raw request text it receives and
/// replies 200.
#[allow(dead_code)]
pub async fn start_capture_backend(tx: mpsc::UnboundedSender<String>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let captured = read_request(&mut socket).await;
                        let _ = tx.send(captured);

                        let body = "captured";
                        let response_str = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Read the request off a fresh connection: the head, plus whatever body
/// bytes follow within a short idle window.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match tokio::time::timeout(Duration::from_millis(100), socket.read(&mut chunk)).await {
            Ok(Ok(0)) => break,
            Ok(Ok(n)) => {
                buf.extend_from_slice(&chunk[..n]);
                // Head complete and no announced body left to wait for.
                if buf.windows(4).any(|w| w == b"\r\n\r\n") && !expects_more(&buf) {
                    break;
                }
            }
            _ => break,
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn expects_more(buf: &[u8]) -> bool {
    let text = String::from_utf8_lossy(buf);
    let Some((head, body)) = text.split_once("\r\n\r\n") else {
        return true;
    };
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);
    body.len() < content_length
}

fn status_line(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        404 => "404 Not Found",
        418 => "418 I'm a teapot",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}
