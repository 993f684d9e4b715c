// SPDX-License-Identifier: Apache-2.0

//! End-to-end exercises of the move/toggle/delete protocol over the
//! wire, dashboard-style: every mutation's response is the re-fetched
//! collection and the next step trusts only that.

mod support;

use serde_json::Value;
use std::net::SocketAddr;
use support::{login, send_raw, spawn_app};

async fn admin(
    addr: SocketAddr,
    cookie: &str,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> (u16, Value) {
    let (status, _, body) = send_raw(addr, method, path, &[("cookie", cookie)], body).await;
    let json = serde_json::from_str(&body).unwrap_or(Value::Null);
    (status, json)
}

fn rows(json: &Value) -> &Vec<Value> {
    json.get("rows").and_then(Value::as_array).expect("rows")
}

fn titles_in_order(json: &Value) -> Vec<String> {
    let mut pairs: Vec<(u64, String)> = rows(json)
        .iter()
        .map(|row| {
            (
                row.get("order_index").and_then(Value::as_u64).expect("order"),
                row.get("title")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            )
        })
        .collect();
    pairs.sort();
    pairs.into_iter().map(|(_, title)| title).collect()
}

fn id_of(json: &Value, title: &str) -> i64 {
    rows(json)
        .iter()
        .find(|row| row.get("title").and_then(Value::as_str) == Some(title))
        .and_then(|row| row.get("id"))
        .and_then(Value::as_i64)
        .expect("id of titled row")
}

async fn seed_hero(addr: SocketAddr, cookie: &str, titles: &[&str]) -> Value {
    let mut last = Value::Null;
    for title in titles {
        let body = format!(r#"{{"image":"/img/{title}.png","title":"{title}"}}"#);
        let (status, json) = admin(addr, cookie, "POST", "/v1/admin/hero", Some(&body)).await;
        assert_eq!(status, 200);
        last = json;
    }
    last
}

#[tokio::test]
async fn two_move_downs_walk_a_row_to_the_tail() {
    let addr = spawn_app().await;
    let cookie = login(addr).await;
    let collection = seed_hero(addr, &cookie, &["A", "B", "C"]).await;
    assert_eq!(titles_in_order(&collection), vec!["A", "B", "C"]);
    let id = id_of(&collection, "A");

    let (status, collection) = admin(
        addr,
        &cookie,
        "POST",
        &format!("/v1/admin/hero/{id}/move"),
        Some(r#"{"direction":"down"}"#),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(titles_in_order(&collection), vec!["B", "A", "C"]);

    let (status, collection) = admin(
        addr,
        &cookie,
        "POST",
        &format!("/v1/admin/hero/{id}/move"),
        Some(r#"{"direction":"down"}"#),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(titles_in_order(&collection), vec!["B", "C", "A"]);

    // Tail row: a further down-move is a silent no-op.
    let (status, collection) = admin(
        addr,
        &cookie,
        "POST",
        &format!("/v1/admin/hero/{id}/move"),
        Some(r#"{"direction":"down"}"#),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(titles_in_order(&collection), vec!["B", "C", "A"]);
}

#[tokio::test]
async fn moving_an_unknown_row_is_404() {
    let addr = spawn_app().await;
    let cookie = login(addr).await;
    seed_hero(addr, &cookie, &["A"]).await;

    let (status, json) = admin(
        addr,
        &cookie,
        "POST",
        "/v1/admin/hero/999/move",
        Some(r#"{"direction":"up"}"#),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(
        json.get("error")
            .and_then(|e| e.get("code"))
            .and_then(Value::as_str),
        Some("not_found")
    );
}

#[tokio::test]
async fn toggling_visibility_never_reorders() {
    let addr = spawn_app().await;
    let cookie = login(addr).await;
    let collection = seed_hero(addr, &cookie, &["A", "B", "C"]).await;
    let id = id_of(&collection, "B");

    let (status, collection) = admin(
        addr,
        &cookie,
        "POST",
        &format!("/v1/admin/hero/{id}/active"),
        Some(r#"{"is_active":false}"#),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(titles_in_order(&collection), vec!["A", "B", "C"]);
    let hidden = rows(&collection)
        .iter()
        .find(|row| row.get("id").and_then(Value::as_i64) == Some(id))
        .expect("toggled row");
    assert_eq!(hidden.get("is_active"), Some(&Value::Bool(false)));

    // The hidden slide keeps its slot and reappears in place.
    let (status, collection) = admin(
        addr,
        &cookie,
        "POST",
        &format!("/v1/admin/hero/{id}/active"),
        Some(r#"{"is_active":true}"#),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(titles_in_order(&collection), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn top10_is_capped_but_hero_is_not() {
    let addr = spawn_app().await;
    let cookie = login(addr).await;

    for n in 0..10 {
        let body = format!(r#"{{"title":"entry-{n}"}}"#);
        let (status, _) = admin(addr, &cookie, "POST", "/v1/admin/top10", Some(&body)).await;
        assert_eq!(status, 200);
    }
    let (status, json) = admin(
        addr,
        &cookie,
        "POST",
        "/v1/admin/top10",
        Some(r#"{"title":"one-too-many"}"#),
    )
    .await;
    assert_eq!(status, 409);
    assert_eq!(
        json.get("error")
            .and_then(|e| e.get("code"))
            .and_then(Value::as_str),
        Some("capacity_exceeded")
    );

    // Hero has no cap; an eleventh slide appends normally.
    let titles: Vec<String> = (0..11).map(|n| format!("slide-{n}")).collect();
    let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
    let collection = seed_hero(addr, &cookie, &refs).await;
    assert_eq!(rows(&collection).len(), 11);
}

#[tokio::test]
async fn top10_delete_repacks_but_hero_delete_leaves_a_gap() {
    let addr = spawn_app().await;
    let cookie = login(addr).await;

    for title in ["first", "second", "third"] {
        let body = format!(r#"{{"title":"{title}"}}"#);
        let (status, _) = admin(addr, &cookie, "POST", "/v1/admin/top10", Some(&body)).await;
        assert_eq!(status, 200);
    }
    let (_, collection) = admin(addr, &cookie, "GET", "/v1/admin/top10", None).await;
    let id = id_of(&collection, "first");
    let (status, collection) = admin(
        addr,
        &cookie,
        "DELETE",
        &format!("/v1/admin/top10/{id}"),
        None,
    )
    .await;
    assert_eq!(status, 200);
    let mut ranks: Vec<u64> = rows(&collection)
        .iter()
        .filter_map(|row| row.get("order_index").and_then(Value::as_u64))
        .collect();
    ranks.sort_unstable();
    assert_eq!(ranks, vec![0, 1], "survivors re-pack contiguously");

    let collection = seed_hero(addr, &cookie, &["A", "B", "C"]).await;
    let id = id_of(&collection, "A");
    let (status, collection) = admin(
        addr,
        &cookie,
        "DELETE",
        &format!("/v1/admin/hero/{id}"),
        None,
    )
    .await;
    assert_eq!(status, 200);
    let mut ranks: Vec<u64> = rows(&collection)
        .iter()
        .filter_map(|row| row.get("order_index").and_then(Value::as_u64))
        .collect();
    ranks.sort_unstable();
    assert_eq!(ranks, vec![1, 2], "hero deletes do not close the gap");
}

#[tokio::test]
async fn create_normalizes_comma_separated_badges() {
    let addr = spawn_app().await;
    let cookie = login(addr).await;

    let (status, collection) = admin(
        addr,
        &cookie,
        "POST",
        "/v1/admin/hero",
        Some(r#"{"image":"/x.png","title":"T","badges":"SNS, 바이럴,  ,콘텐츠"}"#),
    )
    .await;
    assert_eq!(status, 200);
    let badges = rows(&collection)[0]
        .get("badges")
        .and_then(Value::as_array)
        .expect("badges");
    let texts: Vec<&str> = badges
        .iter()
        .filter_map(|badge| badge.get("text").and_then(Value::as_str))
        .collect();
    assert_eq!(texts, vec!["SNS", "바이럴", "콘텐츠"]);
    assert!(badges
        .iter()
        .all(|badge| badge.get("className").and_then(Value::as_str) == Some("badge-purple")));
}
