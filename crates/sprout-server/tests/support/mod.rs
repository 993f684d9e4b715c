// SPDX-License-Identifier: Apache-2.0
#![allow(dead_code)]

//! Shared harness: boots the router on an ephemeral port backed by the
//! in-memory store and speaks raw HTTP/1.1 so tests exercise the real
//! wire, cookies and headers included.

use sprout_server::{build_router, ApiConfig, AppState};
use sprout_store::MemoryStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const TEST_PASSWORD: &str = "correct horse";

pub async fn spawn_app() -> SocketAddr {
    let config = ApiConfig {
        admin_password: TEST_PASSWORD.to_string(),
        ..ApiConfig::default()
    };
    let state = AppState::new(Arc::new(MemoryStore::new()), config);
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

pub async fn send_raw(
    addr: SocketAddr,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<&str>,
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    for (k, v) in headers {
        req.push_str(&format!("{k}: {v}\r\n"));
    }
    if let Some(body) = body {
        req.push_str(&format!(
            "content-type: application/json\r\ncontent-length: {}\r\n\r\n{body}",
            body.len()
        ));
    } else {
        req.push_str("\r\n");
    }
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    (status, head.to_string(), body.to_string())
}

pub async fn get(addr: SocketAddr, path: &str) -> (u16, String, String) {
    send_raw(addr, "GET", path, &[], None).await
}

pub async fn post_json(addr: SocketAddr, path: &str, body: &str) -> (u16, String, String) {
    send_raw(addr, "POST", path, &[], Some(body)).await
}

/// Logs in and returns the `admin_token` cookie pair ready for a
/// `cookie:` request header.
pub async fn login(addr: SocketAddr) -> String {
    let body = format!(r#"{{"password":"{TEST_PASSWORD}"}}"#);
    let (status, head, _) = post_json(addr, "/v1/admin/login", &body).await;
    assert_eq!(status, 200, "login must succeed in tests");
    let cookie = head
        .lines()
        .find_map(|line| line.strip_prefix("set-cookie: "))
        .expect("set-cookie header");
    cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}
