// SPDX-License-Identifier: Apache-2.0

mod support;

use serde_json::Value;
use std::net::SocketAddr;
use support::{get, login, post_json, send_raw, spawn_app};

async fn admin_post(addr: SocketAddr, cookie: &str, path: &str, body: &str) -> (u16, Value) {
    let (status, _, body) = send_raw(addr, "POST", path, &[("cookie", cookie)], Some(body)).await;
    (status, serde_json::from_str(&body).unwrap_or(Value::Null))
}

fn rows(json: &Value) -> &Vec<Value> {
    json.get("rows").and_then(Value::as_array).expect("rows")
}

#[tokio::test]
async fn health_and_readiness_answer_ok() {
    let addr = spawn_app().await;
    let (status, _, body) = get(addr, "/healthz").await;
    assert_eq!(status, 200);
    assert_eq!(body, r#"{"ok":true}"#);
    let (status, _, _) = get(addr, "/readyz").await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn home_serves_only_active_rows_plus_settings() {
    let addr = spawn_app().await;
    let cookie = login(addr).await;

    admin_post(
        addr,
        &cookie,
        "/v1/admin/hero",
        r#"{"image":"/a.png","title":"visible"}"#,
    )
    .await;
    let (_, collection) = admin_post(
        addr,
        &cookie,
        "/v1/admin/hero",
        r#"{"image":"/b.png","title":"hidden","is_active":false}"#,
    )
    .await;
    assert_eq!(rows(&collection).len(), 2);

    let (status, _, body) = get(addr, "/v1/home").await;
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).expect("home json");
    let hero = json.get("hero").and_then(Value::as_array).expect("hero");
    assert_eq!(hero.len(), 1);
    assert_eq!(
        hero[0].get("title").and_then(Value::as_str),
        Some("visible")
    );
    assert!(json.get("settings").is_some());
    assert!(json.get("top10").is_some());
    assert!(json.get("news").is_some());
}

#[tokio::test]
async fn article_listing_filters_and_rejects_typos() {
    let addr = spawn_app().await;
    let cookie = login(addr).await;

    admin_post(
        addr,
        &cookie,
        "/v1/admin/articles",
        r#"{"title":"featured one","badges":"SNS","category":"marketing","is_featured":true}"#,
    )
    .await;
    admin_post(
        addr,
        &cookie,
        "/v1/admin/articles",
        r#"{"title":"plain one","badges":"콘텐츠","category":"press"}"#,
    )
    .await;
    admin_post(
        addr,
        &cookie,
        "/v1/admin/articles",
        r#"{"title":"inactive one","is_active":false}"#,
    )
    .await;

    let (status, _, body) = get(addr, "/v1/articles").await;
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).expect("articles json");
    assert_eq!(rows(&json).len(), 2, "inactive rows never leave the store");

    let (status, _, body) = get(addr, "/v1/articles?featured=true").await;
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).expect("articles json");
    assert_eq!(rows(&json).len(), 1);
    assert_eq!(
        rows(&json)[0].get("title").and_then(Value::as_str),
        Some("featured one")
    );

    let (status, _, body) = get(addr, "/v1/articles?tag=SNS").await;
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).expect("articles json");
    assert_eq!(rows(&json).len(), 1);

    let (status, _, _) = get(addr, "/v1/articles?category=press&limit=1").await;
    assert_eq!(status, 200);

    let (status, _, body) = get(addr, "/v1/articles?tga=SNS").await;
    assert_eq!(status, 400);
    let json: Value = serde_json::from_str(&body).expect("error json");
    assert_eq!(
        json.get("error")
            .and_then(|e| e.get("code"))
            .and_then(Value::as_str),
        Some("invalid_request")
    );
}

#[tokio::test]
async fn inactive_article_detail_is_404() {
    let addr = spawn_app().await;
    let cookie = login(addr).await;

    let (_, collection) = admin_post(
        addr,
        &cookie,
        "/v1/admin/articles",
        r#"{"title":"secret","is_active":false}"#,
    )
    .await;
    let id = rows(&collection)[0]
        .get("id")
        .and_then(Value::as_i64)
        .expect("id");

    let (status, _, _) = get(addr, &format!("/v1/articles/{id}")).await;
    assert_eq!(status, 404);

    let (status, _, _) = get(addr, "/v1/articles/not-a-number").await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn tag_page_lists_articles_carrying_the_badge() {
    let addr = spawn_app().await;
    let cookie = login(addr).await;

    admin_post(
        addr,
        &cookie,
        "/v1/admin/articles",
        r#"{"title":"tagged","badges":"바이럴, SNS"}"#,
    )
    .await;
    admin_post(
        addr,
        &cookie,
        "/v1/admin/articles",
        r#"{"title":"untagged","badges":"기타"}"#,
    )
    .await;

    let (status, _, body) = get(addr, "/v1/tags/SNS").await;
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).expect("tag json");
    assert_eq!(rows(&json).len(), 1);
    assert_eq!(
        rows(&json)[0].get("title").and_then(Value::as_str),
        Some("tagged")
    );
}

#[tokio::test]
async fn tracking_feeds_the_analytics_dashboard() {
    let addr = spawn_app().await;
    let cookie = login(addr).await;

    let beacon = r#"{"page_type":"home","visitor_id":"v1","session_id":"s1"}"#;
    let (status, _, _) = post_json(addr, "/v1/track", beacon).await;
    assert_eq!(status, 200);
    let beacon = r#"{"page_type":"tag","page_id":"SNS","visitor_id":"v2","session_id":"s2"}"#;
    let (status, _, _) = post_json(addr, "/v1/track", beacon).await;
    assert_eq!(status, 200);
    let (status, _, _) = post_json(addr, "/v1/track", beacon).await;
    assert_eq!(status, 200);

    let (status, _, body) = send_raw(
        addr,
        "GET",
        "/v1/admin/analytics",
        &[("cookie", &cookie)],
        None,
    )
    .await;
    assert_eq!(status, 200);
    let json: Value = serde_json::from_str(&body).expect("analytics json");
    let stats = json.get("stats").expect("stats");
    assert_eq!(stats.get("total_views").and_then(Value::as_u64), Some(3));
    assert_eq!(
        stats.get("active_visitors").and_then(Value::as_u64),
        Some(2)
    );
    assert_eq!(
        stats.get("today_unique_visitors").and_then(Value::as_u64),
        Some(2)
    );
    let tags = json
        .get("popular_tags")
        .and_then(Value::as_array)
        .expect("popular tags");
    assert_eq!(tags.len(), 1);
    assert_eq!(
        tags[0].get("tag_name").and_then(Value::as_str),
        Some("SNS")
    );
    assert_eq!(tags[0].get("view_count").and_then(Value::as_u64), Some(2));

    // Analytics is admin-only.
    let (status, _, _) = get(addr, "/v1/admin/analytics").await;
    assert_eq!(status, 401);
}
