// SPDX-License-Identifier: Apache-2.0

mod support;

use serde_json::Value;
use support::{get, login, post_json, send_raw, spawn_app};

#[tokio::test]
async fn admin_routes_reject_anonymous_callers() {
    let addr = spawn_app().await;

    let (status, _, body) = get(addr, "/v1/admin/hero").await;
    assert_eq!(status, 401);
    let json: Value = serde_json::from_str(&body).expect("error json");
    assert_eq!(
        json.get("error")
            .and_then(|e| e.get("code"))
            .and_then(Value::as_str),
        Some("unauthorized")
    );

    let (status, _, _) = send_raw(
        addr,
        "GET",
        "/v1/admin/hero",
        &[("cookie", "admin_token=not-a-real-token")],
        None,
    )
    .await;
    assert_eq!(status, 401, "unknown tokens are rejected");
}

#[tokio::test]
async fn wrong_password_gets_401_and_no_cookie() {
    let addr = spawn_app().await;
    let (status, head, _) = post_json(addr, "/v1/admin/login", r#"{"password":"guess"}"#).await;
    assert_eq!(status, 401);
    assert!(!head.contains("set-cookie"), "no session on failed login");
}

#[tokio::test]
async fn login_grants_access_and_logout_revokes_it() {
    let addr = spawn_app().await;
    let cookie = login(addr).await;

    let (status, _, body) =
        send_raw(addr, "GET", "/v1/admin/hero", &[("cookie", &cookie)], None).await;
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).expect("collection json");
    assert_eq!(json.get("rows"), Some(&Value::Array(vec![])));

    let (status, _, _) = send_raw(
        addr,
        "POST",
        "/v1/admin/logout",
        &[("cookie", &cookie)],
        None,
    )
    .await;
    assert_eq!(status, 200);

    // Revocation is immediate; the old cookie is dead.
    let (status, _, _) =
        send_raw(addr, "GET", "/v1/admin/hero", &[("cookie", &cookie)], None).await;
    assert_eq!(status, 401);
}

#[tokio::test]
async fn session_probe_reports_validity_without_gating() {
    let addr = spawn_app().await;

    let (status, _, body) = get(addr, "/v1/admin/session").await;
    assert_eq!(status, 200, "probe is reachable without a session");
    let json: Value = serde_json::from_str(&body).expect("probe json");
    assert_eq!(json.get("ok"), Some(&Value::Bool(false)));

    let cookie = login(addr).await;
    let (status, _, body) = send_raw(
        addr,
        "GET",
        "/v1/admin/session",
        &[("cookie", &cookie)],
        None,
    )
    .await;
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).expect("probe json");
    assert_eq!(json.get("ok"), Some(&Value::Bool(true)));
}

#[tokio::test]
async fn responses_carry_request_id_header() {
    let addr = spawn_app().await;

    let (status, head, _) = get(addr, "/healthz").await;
    assert_eq!(status, 200);
    assert!(head.contains("x-request-id: "), "request id is stamped");

    let (_, head, _) = send_raw(
        addr,
        "GET",
        "/healthz",
        &[("x-request-id", "req-caller-1")],
        None,
    )
    .await;
    assert!(
        head.contains("x-request-id: req-caller-1"),
        "inbound id is echoed back"
    );
}
