//! Fixtures shared by the unit tests: a tiny in-process HTTP archive and
//! synthetic RSTN day files.

use crate::config::ArchiveConfig;
use async_compression::tokio::write::GzipEncoder;
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A canned HTTP response.
#[derive(Clone)]
pub(crate) struct Route {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Route {
    pub fn ok(body: Vec<u8>) -> Self {
        Self { status: 200, body }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }
}

/// Serves fixed responses by request path; unknown paths get a 404.
pub(crate) struct TestArchive {
    pub root: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestArchive {
    /// Starts serving `routes`, keyed by path relative to [`TestArchive::root`]
    /// (e.g. `"san-vito/2014/10/16oct14.lis.gz"`).
    pub async fn start(routes: Vec<(&str, Route)>) -> TestArchive {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, route)| (format!("/rstn/{path}"), route))
                .collect(),
        );
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let seen = Arc::clone(&seen);
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 8192];
                    let mut read = 0;
                    while read < buf.len() {
                        let n = socket.read(&mut buf[read..]).await.unwrap_or(0);
                        if n == 0 {
                            break;
                        }
                        read += n;
                        if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }
                    let request = String::from_utf8_lossy(&buf[..read]);
                    let path = request
                        .split_whitespace()
                        .nth(1)
                        .unwrap_or("/")
                        .to_string();
                    seen.lock().unwrap().push(path.clone());

                    let route = routes.get(&path).cloned().unwrap_or(Route::status(404));
                    let mut response = format!(
                        "HTTP/1.1 {} Test\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
                        route.status,
                        route.body.len()
                    )
                    .into_bytes();
                    response.extend_from_slice(&route.body);
                    let _ = socket.write_all(&response).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        TestArchive {
            root: format!("http://{addr}/rstn"),
            requests,
        }
    }

    /// Request paths seen so far, relative to the root.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.trim_start_matches("/rstn/").to_string())
            .collect()
    }

    pub fn config(&self) -> ArchiveConfig {
        ArchiveConfig {
            https_root: self.root.clone(),
            system_proxy: false,
            ..ArchiveConfig::default()
        }
    }
}

/// A config whose roots cannot be reached, for tests that must not touch the network.
pub(crate) fn unreachable_config() -> ArchiveConfig {
    ArchiveConfig {
        https_root: "http://127.0.0.1:9/rstn".to_string(),
        ftp_root: "ftp://127.0.0.1:9/rstn".to_string(),
        connect_timeout: std::time::Duration::from_secs(1),
        timeout: std::time::Duration::from_secs(2),
        system_proxy: false,
    }
}

/// Field width of the flux columns for data of `year`.
pub(crate) fn width_for(year: i32) -> usize {
    if year >= 2015 {
        8
    } else if year >= 2008 {
        7
    } else {
        6
    }
}

/// A synthetic day file: `seconds` one-second records starting at midnight
/// of `date`, with every eighth 610 MHz value missing.
pub(crate) fn sample_day(code: &str, date: NaiveDate, seconds: u32) -> String {
    let width = width_for(chrono::Datelike::year(&date));
    let start = date.and_hms_opt(0, 0, 0).unwrap();
    let mut text = String::new();
    for i in 0..seconds {
        let time = start + Duration::seconds(i as i64);
        text.push_str(&format!("{:<4}{}", code, time.format("%Y%m%d%H%M%S")));
        for channel in 0..8u32 {
            if channel == 2 && i % 8 == 0 {
                text.push_str(&" ".repeat(width));
            } else {
                let value = 10 * (channel + 1) + i;
                text.push_str(&format!("{:>width$}", value, width = width));
            }
        }
        text.push('\n');
    }
    text
}

pub(crate) async fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzipEncoder::new(Vec::new());
    encoder.write_all(bytes).await.unwrap();
    encoder.shutdown().await.unwrap();
    encoder.into_inner()
}

pub(crate) async fn write_file(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.unwrap();
    }
    tokio::fs::write(path, bytes).await.unwrap();
}
